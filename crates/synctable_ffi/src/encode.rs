//! Managed-to-foreign encoding and disposal.

use synctable_value::{Payload, Value, ValueKind};

use crate::alloc::{alloc_block, free_block};
use crate::raw::{RawBooleanArray, RawDoubleArray, RawString, RawStringArray, RawValue};

/// Populates a foreign value from a managed one.
///
/// `out` should be zero-initialized (see [`RawValue::zeroed`]). Every
/// variable-length payload gets a freshly allocated foreign block;
/// ownership of those blocks transfers to the caller, which must
/// release them exactly once via [`dispose_raw`] after the native call
/// that consumed `out` completes. Prefer [`EncodedValue`], which pairs
/// the two automatically.
pub fn encode_into(value: &Value, out: &mut RawValue) {
    out.kind = value.kind().as_raw();
    out.last_change = value.last_change();
    match value.payload() {
        Payload::Unassigned => {}
        Payload::Boolean(b) => out.data.v_boolean = i32::from(*b),
        Payload::Double(d) => out.data.v_double = *d,
        Payload::String(s) => out.data.v_string = alloc_string(s),
        Payload::Raw(b) | Payload::Rpc(b) => {
            let (data, len) = alloc_block(b.clone());
            out.data.v_raw = RawString { data, len };
        }
        Payload::BooleanArray(a) => {
            let (arr, len) = alloc_block(a.iter().map(|&b| i32::from(b)).collect());
            out.data.arr_boolean = RawBooleanArray { arr, len };
        }
        Payload::DoubleArray(a) => {
            let (arr, len) = alloc_block(a.clone());
            out.data.arr_double = RawDoubleArray { arr, len };
        }
        Payload::StringArray(a) => {
            let (arr, len) = alloc_block(a.iter().map(|s| alloc_string(s)).collect());
            out.data.arr_string = RawStringArray { arr, len };
        }
    }
}

fn alloc_string(s: &str) -> RawString {
    let (data, len) = alloc_block(s.as_bytes().to_vec());
    RawString { data, len }
}

/// Releases the foreign allocations held by an encoded value.
///
/// Branches on the kind exactly as [`encode_into`] did: the byte block
/// for strings and raw/rpc payloads, the element block for arrays, and
/// for string arrays each element's text block before the containing
/// block. Scalar and unassigned values hold no allocation.
///
/// # Safety
///
/// `raw` must have been populated by a single [`encode_into`] call and
/// not disposed since, and the native side must be done with it.
/// Disposing twice, or disposing a value this crate never encoded, is
/// undefined behavior — hold encoded values in an [`EncodedValue`] so
/// the release is scoped instead of tracked by hand.
pub unsafe fn dispose_raw(raw: &mut RawValue) {
    match ValueKind::try_from(raw.kind) {
        Ok(ValueKind::String) => {
            free_block(raw.data.v_string.data, raw.data.v_string.len);
        }
        Ok(ValueKind::Raw | ValueKind::Rpc) => {
            free_block(raw.data.v_raw.data, raw.data.v_raw.len);
        }
        Ok(ValueKind::BooleanArray) => {
            free_block(raw.data.arr_boolean.arr, raw.data.arr_boolean.len);
        }
        Ok(ValueKind::DoubleArray) => {
            free_block(raw.data.arr_double.arr, raw.data.arr_double.len);
        }
        Ok(ValueKind::StringArray) => {
            let arr = raw.data.arr_string.arr;
            let len = raw.data.arr_string.len;
            for i in 0..len {
                let elem = *arr.add(i);
                free_block(elem.data, elem.len);
            }
            free_block(arr, len);
        }
        // Scalars and unassigned carry no allocation; unknown kinds
        // never come out of encode_into.
        Ok(_) | Err(_) => {}
    }
}

/// A scoped, encoded foreign value.
///
/// Owns the populated [`RawValue`] and runs [`dispose_raw`] on drop,
/// so the foreign allocations are released on every exit path and a
/// double release is unrepresentable. Hand [`Self::as_ptr`] to the
/// native call; keep the guard alive until the call returns.
pub struct EncodedValue {
    raw: RawValue,
}

impl EncodedValue {
    /// Encodes `value` into a caller-owned foreign value.
    pub fn new(value: &Value) -> Self {
        let mut raw = RawValue::zeroed();
        encode_into(value, &mut raw);
        Self { raw }
    }

    /// Returns the encoded foreign value.
    pub fn raw(&self) -> &RawValue {
        &self.raw
    }

    /// Returns a pointer suitable for the native call boundary.
    ///
    /// Valid while the guard is alive; the native side must not retain
    /// it past the call.
    pub fn as_ptr(&self) -> *const RawValue {
        &self.raw
    }
}

impl Drop for EncodedValue {
    fn drop(&mut self) {
        // Safety: self.raw came from encode_into in new() and the
        // guard's ownership guarantees this runs at most once.
        unsafe {
            dispose_raw(&mut self.raw);
        }
    }
}

impl From<&Value> for EncodedValue {
    fn from(value: &Value) -> Self {
        Self::new(value)
    }
}
