//! Commonly used types and functions.

pub use crate::list::{Builder, CowList, Snapshot};
pub use crate::ord::{
    insert_in_order, insert_in_order_by, insert_in_order_by_key, insert_in_order_with,
    try_insert_in_order, Probe,
};
pub use crate::value::Value;
pub use crate::Error;
