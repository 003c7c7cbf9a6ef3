//! Fixed-layout mirrors of the native value types.
//!
//! Field order, sizes, and the union overlay must match the native
//! side's ABI bit-for-bit. Never reorder fields here without a
//! matching change on the native side.

use synctable_value::ValueKind;

/// A foreign (pointer, length) byte sequence.
///
/// Carries an explicit length and is not NUL-terminated. For strings
/// the bytes are UTF-8.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawString {
    /// Pointer to the first byte.
    pub data: *mut u8,
    /// Length in bytes.
    pub len: usize,
}

/// A foreign boolean array. Native booleans are C `int`s
/// (0 = false, nonzero = true).
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawBooleanArray {
    /// Pointer to the first element.
    pub arr: *mut i32,
    /// Element count.
    pub len: usize,
}

/// A foreign double array.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawDoubleArray {
    /// Pointer to the first element.
    pub arr: *mut f64,
    /// Element count.
    pub len: usize,
}

/// A foreign string array. Each element owns its own byte block.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawStringArray {
    /// Pointer to the first element.
    pub arr: *mut RawString,
    /// Element count.
    pub len: usize,
}

/// The payload overlay of a foreign value.
///
/// Exactly one field is meaningful, selected by [`RawValue::kind`].
/// `v_raw` is also the overlay for rpc payloads; the two kinds share
/// the byte-sequence shape.
#[repr(C)]
#[derive(Clone, Copy)]
pub union RawData {
    /// Scalar boolean (C `int`).
    pub v_boolean: i32,
    /// Scalar double.
    pub v_double: f64,
    /// UTF-8 string payload.
    pub v_string: RawString,
    /// Raw or rpc byte-sequence payload.
    pub v_raw: RawString,
    /// Boolean-array payload.
    pub arr_boolean: RawBooleanArray,
    /// Double-array payload.
    pub arr_double: RawDoubleArray,
    /// String-array payload.
    pub arr_string: RawStringArray,
}

/// A foreign binary value as exchanged across the native call boundary.
///
/// Two lifetimes apply, and they are the whole safety story:
///
/// - a `RawValue` *received* from the native side inside a callback is
///   valid only for the callback's extent; decode (deep-copy) before
///   returning — see [`crate::ValueView`];
/// - a `RawValue` *populated* by [`crate::encode_into`] owns foreign
///   allocations that must be released exactly once via
///   [`crate::dispose_raw`] — or hold it in a [`crate::EncodedValue`],
///   which does that on drop.
#[repr(C)]
pub struct RawValue {
    /// Kind discriminant (see [`ValueKind`] for the stable values).
    pub kind: u32,
    /// Last-modification timestamp.
    pub last_change: u64,
    /// Payload overlay selected by `kind`.
    pub data: RawData,
}

impl RawValue {
    /// Returns a zero-initialized value: unassigned kind, timestamp 0,
    /// payload bits all zero. This is the state [`crate::encode_into`]
    /// expects its output argument in.
    pub fn zeroed() -> Self {
        Self {
            kind: ValueKind::Unassigned.as_raw(),
            last_change: 0,
            data: RawData { v_double: 0.0 },
        }
    }
}

impl Default for RawValue {
    fn default() -> Self {
        Self::zeroed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_is_unassigned() {
        let raw = RawValue::zeroed();
        assert_eq!(raw.kind, ValueKind::Unassigned.as_raw());
        assert_eq!(raw.last_change, 0);
    }

    #[test]
    fn union_overlays_share_storage() {
        // The raw and string overlays are the same (pointer, length)
        // pair; writing one must be readable as the other.
        let mut raw = RawValue::zeroed();
        raw.data.v_raw = RawString {
            data: std::ptr::null_mut(),
            len: 17,
        };
        let len = unsafe { raw.data.v_string.len };
        assert_eq!(len, 17);
    }
}
