//! Foreign-to-managed decoding.

use synctable_value::{Payload, Value, ValueKind};

use crate::raw::{RawString, RawValue};

/// A borrowed view over a foreign value.
///
/// The view pins the foreign buffer's validity window to the borrow
/// `'a`: inside a notification callback, construct the view from the
/// callback argument and everything derived from it is confined to the
/// callback's extent. The only thing that may escape is the owned,
/// deep-copied [`Value`] from [`ValueView::to_value`].
pub struct ValueView<'a> {
    raw: &'a RawValue,
}

impl<'a> ValueView<'a> {
    /// Creates a view over a foreign value.
    ///
    /// # Safety
    ///
    /// For the whole borrow `'a`, `raw`'s payload pointers must be
    /// valid for reads for the lengths they carry, and the native side
    /// must not mutate the buffer. Inside a notification callback both
    /// are guaranteed for the callback argument until the callback
    /// returns.
    pub unsafe fn new(raw: &'a RawValue) -> Self {
        Self { raw }
    }

    /// Returns the kind discriminant exactly as the native side sent it.
    pub fn raw_kind(&self) -> u32 {
        self.raw.kind
    }

    /// Returns the kind, degrading an unrecognized discriminant to
    /// [`ValueKind::Unassigned`] (the same fallback [`Self::to_value`]
    /// applies).
    pub fn kind(&self) -> ValueKind {
        ValueKind::try_from(self.raw.kind).unwrap_or(ValueKind::Unassigned)
    }

    /// Returns the last-modification timestamp.
    pub fn last_change(&self) -> u64 {
        self.raw.last_change
    }

    /// Deep-copies the foreign value into an owned [`Value`].
    ///
    /// All variable-length payloads are copied out; the result holds no
    /// reference to the foreign buffer. An unrecognized kind
    /// discriminant decodes to an unassigned payload (logged, not
    /// raised).
    pub fn to_value(&self) -> Value {
        let raw = self.raw;
        let payload = match ValueKind::try_from(raw.kind) {
            Ok(ValueKind::Unassigned) => Payload::Unassigned,
            // Safety (all arms): the union field selected by the kind
            // discriminant is the one the native side populated, and
            // ValueView::new's contract makes its pointers readable.
            Ok(ValueKind::Boolean) => Payload::Boolean(unsafe { raw.data.v_boolean } != 0),
            Ok(ValueKind::Double) => Payload::Double(unsafe { raw.data.v_double }),
            Ok(ValueKind::String) => Payload::String(unsafe { read_string(&raw.data.v_string) }),
            Ok(ValueKind::Raw) => Payload::Raw(unsafe { read_bytes(&raw.data.v_raw) }),
            Ok(ValueKind::Rpc) => Payload::Rpc(unsafe { read_bytes(&raw.data.v_raw) }),
            Ok(ValueKind::BooleanArray) => Payload::BooleanArray(unsafe {
                elements(raw.data.arr_boolean.arr, raw.data.arr_boolean.len)
                    .iter()
                    .map(|&b| b != 0)
                    .collect()
            }),
            Ok(ValueKind::DoubleArray) => Payload::DoubleArray(unsafe {
                elements(raw.data.arr_double.arr, raw.data.arr_double.len).to_vec()
            }),
            Ok(ValueKind::StringArray) => Payload::StringArray(unsafe {
                elements(raw.data.arr_string.arr, raw.data.arr_string.len)
                    .iter()
                    .map(|s| read_string(s))
                    .collect()
            }),
            Err(err) => {
                // The native side may be newer than this client; keep
                // the value usable rather than failing the callback.
                tracing::warn!(discriminant = raw.kind, %err, "decoding unknown value kind as unassigned");
                Payload::Unassigned
            }
        };
        Value::new(payload, raw.last_change)
    }
}

/// Decodes a foreign value into an owned [`Value`].
///
/// Convenience for `ValueView::new(raw).to_value()`.
///
/// # Safety
///
/// Same contract as [`ValueView::new`]: `raw`'s payload pointers must
/// be valid for reads for this call's duration.
pub unsafe fn decode_raw(raw: &RawValue) -> Value {
    ValueView::new(raw).to_value()
}

/// Copies a foreign UTF-8 byte sequence into an owned `String`.
///
/// Invalid sequences are replaced, never raised; multi-byte sequences
/// decode exactly.
///
/// # Safety
///
/// `s.data` must be valid for `s.len` bytes of reads (ignored when
/// `s.len` is 0).
pub(crate) unsafe fn read_string(s: &RawString) -> String {
    if s.len == 0 {
        return String::new();
    }
    String::from_utf8_lossy(std::slice::from_raw_parts(s.data, s.len)).into_owned()
}

unsafe fn read_bytes(s: &RawString) -> Vec<u8> {
    elements(s.data, s.len).to_vec()
}

unsafe fn elements<'a, T>(ptr: *const T, len: usize) -> &'a [T] {
    if len == 0 {
        return &[];
    }
    std::slice::from_raw_parts(ptr, len)
}
