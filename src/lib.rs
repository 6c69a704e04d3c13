#![warn(missing_docs)]
#![allow(clippy::needless_doctest_main, clippy::module_name_repetitions)]
//!
//! Ordered insertion into sorted sequences and snapshot lists.
//!
//! This crate provides two building blocks:
//!
//! - [`ord`] inserts values into any sorted [`Sequence`](ord::Sequence)
//!   (e.g. `Vec` or `VecDeque`) such that the sequence remains sorted.
//!   Values equal to existing elements are placed behind them.
//! - [`list`] provides the [`CowList`](list::CowList), a list that publishes a
//!   new immutable version on every modification. Readers hold a
//!   [`Snapshot`](list::Snapshot) that is never modified, so they never
//!   observe a half written insert.
//!
//! ```
//! use cowlist::prelude::*;
//!
//! fn main() {
//!     let list = CowList::new();
//!     list.insert_in_order("3".to_string());
//!     list.insert_in_order("2".to_string());
//!     list.insert_in_order("1".to_string());
//!     list.insert_in_order("3".to_string());
//!
//!     println!("{list}"); // [1, 2, 3, 3]
//! }
//! ```
//!
//! Partially ordered elements, like the dynamically typed [`Value`](value::Value),
//! can be inserted with `try_insert_in_order`. This fails with
//! [`Error::TypeMismatch`] if the value cannot be compared with the
//! elements of the list.
//!
//! # Features
//!
//! | Feature | Description                                                     |
//! |---------|-----------------------------------------------------------------|
//! | serde   | Implements `Serialize` / `Deserialize` for lists and values.    |
//!

pub mod prelude;

pub mod list;
pub mod ord;
pub mod tracing;
pub mod value;

mod error;

pub use self::error::{Error, Result};
