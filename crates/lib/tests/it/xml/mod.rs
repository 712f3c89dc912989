//! XML codec integration tests

mod encode_tests;
