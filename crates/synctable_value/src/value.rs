//! The managed value type.

use std::hash::{Hash, Hasher};

use crate::kind::ValueKind;

/// The payload of a value.
///
/// Exactly one variant is active per value. `Raw` and `Rpc` share the
/// byte-sequence shape and differ only in intent, so they are distinct
/// variants that never compare equal to each other.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// No payload.
    Unassigned,
    /// Single boolean.
    Boolean(bool),
    /// Single 64-bit float.
    Double(f64),
    /// UTF-8 text.
    String(String),
    /// Opaque byte sequence.
    Raw(Vec<u8>),
    /// Remote-procedure byte sequence.
    Rpc(Vec<u8>),
    /// Ordered sequence of booleans.
    BooleanArray(Vec<bool>),
    /// Ordered sequence of 64-bit floats.
    DoubleArray(Vec<f64>),
    /// Ordered sequence of text values.
    StringArray(Vec<String>),
}

impl Payload {
    /// Returns the kind tag for this payload.
    pub fn kind(&self) -> ValueKind {
        match self {
            Payload::Unassigned => ValueKind::Unassigned,
            Payload::Boolean(_) => ValueKind::Boolean,
            Payload::Double(_) => ValueKind::Double,
            Payload::String(_) => ValueKind::String,
            Payload::Raw(_) => ValueKind::Raw,
            Payload::Rpc(_) => ValueKind::Rpc,
            Payload::BooleanArray(_) => ValueKind::BooleanArray,
            Payload::DoubleArray(_) => ValueKind::DoubleArray,
            Payload::StringArray(_) => ValueKind::StringArray,
        }
    }
}

/// An immutable value with a last-modification timestamp.
///
/// Values are the unit of exchange between application code and the
/// native runtime. The timestamp is metadata only: it is excluded from
/// both equality and hashing, so two values with the same payload but
/// different timestamps compare equal and hash identically.
///
/// Doubles compare by IEEE equality (`NaN != NaN`), so `Value`
/// implements [`PartialEq`] but not `Eq`.
#[derive(Debug, Clone)]
pub struct Value {
    last_change: u64,
    payload: Payload,
}

impl Value {
    /// Creates a value with no payload.
    pub fn unassigned(last_change: u64) -> Self {
        Self::new(Payload::Unassigned, last_change)
    }

    /// Creates a boolean value.
    pub fn boolean(v: bool, last_change: u64) -> Self {
        Self::new(Payload::Boolean(v), last_change)
    }

    /// Creates a double value.
    pub fn double(v: f64, last_change: u64) -> Self {
        Self::new(Payload::Double(v), last_change)
    }

    /// Creates a string value. The input is copied into owned storage.
    pub fn string(v: impl Into<String>, last_change: u64) -> Self {
        Self::new(Payload::String(v.into()), last_change)
    }

    /// Creates a raw byte-sequence value. The input is copied into
    /// owned storage.
    pub fn raw(v: impl Into<Vec<u8>>, last_change: u64) -> Self {
        Self::new(Payload::Raw(v.into()), last_change)
    }

    /// Creates a remote-procedure byte-sequence value.
    pub fn rpc(v: impl Into<Vec<u8>>, last_change: u64) -> Self {
        Self::new(Payload::Rpc(v.into()), last_change)
    }

    /// Creates a boolean-array value.
    pub fn boolean_array(v: impl Into<Vec<bool>>, last_change: u64) -> Self {
        Self::new(Payload::BooleanArray(v.into()), last_change)
    }

    /// Creates a double-array value.
    pub fn double_array(v: impl Into<Vec<f64>>, last_change: u64) -> Self {
        Self::new(Payload::DoubleArray(v.into()), last_change)
    }

    /// Creates a string-array value.
    pub fn string_array(v: impl Into<Vec<String>>, last_change: u64) -> Self {
        Self::new(Payload::StringArray(v.into()), last_change)
    }

    /// Creates a value from an already-built payload.
    pub fn new(payload: Payload, last_change: u64) -> Self {
        Self {
            last_change,
            payload,
        }
    }

    /// Returns the kind tag for this value.
    pub fn kind(&self) -> ValueKind {
        self.payload.kind()
    }

    /// Returns the last-modification timestamp.
    pub fn last_change(&self) -> u64 {
        self.last_change
    }

    /// Returns the payload.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Gets this value as a boolean, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match &self.payload {
            Payload::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Gets this value as a double, if it is one.
    pub fn as_double(&self) -> Option<f64> {
        match &self.payload {
            Payload::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// Gets this value as a string slice, if it is a string.
    pub fn as_str(&self) -> Option<&str> {
        match &self.payload {
            Payload::String(s) => Some(s),
            _ => None,
        }
    }

    /// Gets this value as bytes, if it is a raw or rpc byte sequence.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match &self.payload {
            Payload::Raw(b) | Payload::Rpc(b) => Some(b),
            _ => None,
        }
    }

    /// Gets this value as a boolean slice, if it is a boolean array.
    pub fn as_boolean_array(&self) -> Option<&[bool]> {
        match &self.payload {
            Payload::BooleanArray(a) => Some(a),
            _ => None,
        }
    }

    /// Gets this value as a double slice, if it is a double array.
    pub fn as_double_array(&self) -> Option<&[f64]> {
        match &self.payload {
            Payload::DoubleArray(a) => Some(a),
            _ => None,
        }
    }

    /// Gets this value as a string slice array, if it is a string array.
    pub fn as_string_array(&self) -> Option<&[String]> {
        match &self.payload {
            Payload::StringArray(a) => Some(a),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        // last_change is metadata and never participates. Payload
        // variants carry the kind, so a variant mismatch is a kind
        // mismatch and Unassigned == Unassigned holds for free.
        self.payload == other.payload
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Equal values must feed identical bytes to the hasher, so the
        // discriminant goes first and last_change never contributes.
        self.kind().as_raw().hash(state);
        match &self.payload {
            Payload::Unassigned => {}
            Payload::Boolean(b) => b.hash(state),
            Payload::Double(d) => d.to_bits().hash(state),
            Payload::String(s) => s.hash(state),
            Payload::Raw(b) | Payload::Rpc(b) => b.hash(state),
            Payload::BooleanArray(a) => a.hash(state),
            Payload::DoubleArray(a) => {
                a.len().hash(state);
                for d in a {
                    d.to_bits().hash(state);
                }
            }
            Payload::StringArray(a) => a.hash(state),
        }
    }
}
