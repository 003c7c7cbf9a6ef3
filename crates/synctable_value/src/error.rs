//! Error types for the value crate.

use thiserror::Error;

/// Result type for value operations.
pub type ValueResult<T> = Result<T, ValueError>;

/// Errors that can occur when working with values.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueError {
    /// A kind discriminant received from the native side does not name
    /// any known value kind.
    #[error("unknown value kind discriminant {0:#x}")]
    UnknownKind(u32),
}
