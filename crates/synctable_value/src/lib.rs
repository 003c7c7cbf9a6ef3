//! # synctable value
//!
//! The managed value type exchanged between application code and the
//! synctable native runtime.
//!
//! A [`Value`] pairs a [`ValueKind`] variant tag, a last-modification
//! timestamp, and exactly one payload. Values are immutable once
//! constructed and may be shared freely across threads.
//!
//! Equality and hashing intentionally ignore the timestamp: two values
//! are equal iff their kind and payload are equal.
//!
//! ## Usage
//!
//! ```
//! use synctable_value::Value;
//!
//! let a = Value::double(3.5, 100);
//! let b = Value::double(3.5, 200);
//! assert_eq!(a, b); // timestamp excluded from equality
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod kind;
mod value;

pub use error::{ValueError, ValueResult};
pub use kind::ValueKind;
pub use value::{Payload, Value};
