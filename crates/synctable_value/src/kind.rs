//! Variant tag for values.

use crate::error::ValueError;

/// The kind of payload a value holds.
///
/// The numeric discriminants are part of the native ABI and must match
/// the runtime's enumeration exactly; they are bit flags on the native
/// side, which is why they are powers of two rather than sequential.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// No payload assigned.
    Unassigned = 0x00,
    /// Single boolean.
    Boolean = 0x01,
    /// Single 64-bit float.
    Double = 0x02,
    /// UTF-8 text.
    String = 0x04,
    /// Opaque byte sequence.
    Raw = 0x08,
    /// Ordered sequence of booleans.
    BooleanArray = 0x10,
    /// Ordered sequence of 64-bit floats.
    DoubleArray = 0x20,
    /// Ordered sequence of text values.
    StringArray = 0x40,
    /// Remote-procedure payload. Same storage shape as [`ValueKind::Raw`];
    /// the tag records intent only.
    Rpc = 0x80,
}

impl ValueKind {
    /// Returns the native discriminant for this kind.
    pub fn as_raw(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for ValueKind {
    type Error = ValueError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        match raw {
            0x00 => Ok(ValueKind::Unassigned),
            0x01 => Ok(ValueKind::Boolean),
            0x02 => Ok(ValueKind::Double),
            0x04 => Ok(ValueKind::String),
            0x08 => Ok(ValueKind::Raw),
            0x10 => Ok(ValueKind::BooleanArray),
            0x20 => Ok(ValueKind::DoubleArray),
            0x40 => Ok(ValueKind::StringArray),
            0x80 => Ok(ValueKind::Rpc),
            other => Err(ValueError::UnknownKind(other)),
        }
    }
}
