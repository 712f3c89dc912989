//! Record boundary: typed structs to and from [`PathTree`].
//!
//! Conversion goes through serde, so field names follow the record type's own
//! serde attributes (`rename`, `rename_all`, `skip`). There is no
//! process-wide naming default.
//!
//! ```
//! use pathtree::PathTree;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! #[serde(rename_all = "camelCase")]
//! struct Order {
//!     order_id: i64,
//!     buyer_name: String,
//! }
//!
//! let order = Order { order_id: 7, buyer_name: "Alice".to_string() };
//! let tree = PathTree::from_record(&order)?;
//! assert_eq!(tree.get_int("orderId"), Some(7));
//!
//! let back: Order = tree.to_record()?;
//! assert_eq!(back, order);
//! # Ok::<(), pathtree::Error>(())
//! ```

use serde::{Serialize, de::DeserializeOwned};

use crate::{Result, json, tree::PathTree};

impl PathTree {
    /// Builds a tree from any serializable record.
    ///
    /// The record must serialize as a map or struct; `None` fields are
    /// omitted.
    pub fn from_record<T: Serialize + ?Sized>(record: &T) -> Result<PathTree> {
        let value = serde_json::to_value(record)?;
        Ok(json::from_json_value(value)?)
    }

    /// Populates a record from this tree.
    pub fn to_record<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(json::to_json_value(self))?)
    }

    /// Merges the fields of a record into this tree, overwriting colliding
    /// top-level keys.
    pub fn merge_record<T: Serialize + ?Sized>(&mut self, record: &T) -> Result<&mut Self> {
        let incoming = PathTree::from_record(record)?;
        Ok(self.replace_join(&incoming))
    }
}
