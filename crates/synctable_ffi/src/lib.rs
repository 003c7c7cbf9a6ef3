//! # synctable ffi
//!
//! The foreign binary value layer for the synctable native call
//! boundary.
//!
//! This crate provides:
//! - `#[repr(C)]` mirrors of the native value layout ([`RawValue`] and
//!   friends), bit-for-bit compatible with the native ABI
//! - the decoder: [`ValueView`], a borrowed view over a callback's
//!   foreign buffer that deep-copies into an owned
//!   [`Value`](synctable_value::Value)
//! - the encoder/disposer pair: [`encode_into`]/[`dispose_raw`], and
//!   the scoped [`EncodedValue`] guard that makes release automatic
//! - connection metadata conversions ([`ConnectionNotification`])
//!
//! ## Ownership conventions
//!
//! A foreign value *received* in a callback is borrowed: wrap it in a
//! [`ValueView`] and copy out before the callback returns. A foreign
//! value *encoded* here is owned by the caller together with every
//! block the encoder allocated; [`EncodedValue`] scopes that ownership
//! so the disposer runs on every exit path, exactly once.
//!
//! ```
//! use synctable_value::Value;
//! use synctable_ffi::EncodedValue;
//!
//! let value = Value::string("héllo", 1);
//! let encoded = EncodedValue::new(&value);
//! // hand encoded.as_ptr() to the native call, keep the guard alive
//! // until it returns; drop releases the foreign allocations
//! ```

#![warn(missing_docs)]

mod alloc;
mod connection;
mod decode;
mod encode;
mod raw;

pub use connection::{
    ConnectionInfo, ConnectionNotification, ListenerHandle, RawConnectionInfo,
    RawConnectionNotification,
};
pub use decode::{decode_raw, ValueView};
pub use encode::{dispose_raw, encode_into, EncodedValue};
pub use raw::{RawBooleanArray, RawData, RawDoubleArray, RawString, RawStringArray, RawValue};

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use synctable_value::{Payload, Value, ValueKind};

    fn roundtrip(value: &Value) -> Value {
        let encoded = EncodedValue::new(value);
        // Safety: the guard's RawValue is alive and was populated by
        // encode_into.
        unsafe { decode_raw(encoded.raw()) }
    }

    #[test]
    fn roundtrip_boolean() {
        let value = Value::boolean(true, 5);
        let decoded = roundtrip(&value);
        assert_eq!(decoded, value);
        assert_eq!(decoded.last_change(), 5);
    }

    #[test]
    fn roundtrip_double() {
        let value = Value::double(-1234.5678, 3);
        assert_eq!(roundtrip(&value), value);
    }

    #[test]
    fn roundtrip_multibyte_string() {
        let value = Value::string("héllo", 1);
        let decoded = roundtrip(&value);
        assert_eq!(decoded, value);
        assert_eq!(decoded.as_str(), Some("héllo"));
    }

    #[test]
    fn roundtrip_empty_raw_stays_raw() {
        let value = Value::raw(Vec::new(), 0);
        let decoded = roundtrip(&value);
        assert_eq!(decoded, value);
        assert_eq!(decoded.kind(), ValueKind::Raw);
        assert_ne!(decoded, Value::unassigned(0));
    }

    #[test]
    fn roundtrip_rpc_keeps_its_tag() {
        let value = Value::rpc(vec![1, 2, 3], 4);
        let decoded = roundtrip(&value);
        assert_eq!(decoded.kind(), ValueKind::Rpc);
        assert_eq!(decoded, value);
    }

    #[test]
    fn roundtrip_string_array_preserves_order() {
        let value =
            Value::string_array(vec!["a".to_string(), "bb".to_string(), "ccc".to_string()], 9);
        let decoded = roundtrip(&value);
        assert_eq!(decoded, value);
        assert_eq!(
            decoded.as_string_array(),
            Some(&["a".to_string(), "bb".to_string(), "ccc".to_string()][..])
        );
    }

    #[test]
    fn roundtrip_unassigned() {
        let value = Value::unassigned(17);
        let decoded = roundtrip(&value);
        assert_eq!(decoded, value);
        assert_eq!(decoded.last_change(), 17);
    }

    #[test]
    fn roundtrip_empty_arrays() {
        for value in [
            Value::string("", 1),
            Value::boolean_array(Vec::new(), 2),
            Value::double_array(Vec::new(), 3),
            Value::string_array(Vec::<String>::new(), 4),
        ] {
            let decoded = roundtrip(&value);
            assert_eq!(decoded, value, "{:?}", value.kind());
            assert_eq!(decoded.kind(), value.kind());
        }
    }

    prop_compose! {
        fn arb_payload()(payload in prop_oneof![
            Just(Payload::Unassigned),
            any::<bool>().prop_map(Payload::Boolean),
            (-1.0e12f64..1.0e12).prop_map(Payload::Double),
            ".{0,24}".prop_map(Payload::String),
            proptest::collection::vec(any::<u8>(), 0..32).prop_map(Payload::Raw),
            proptest::collection::vec(any::<u8>(), 0..32).prop_map(Payload::Rpc),
            proptest::collection::vec(any::<bool>(), 0..16).prop_map(Payload::BooleanArray),
            proptest::collection::vec(-1.0e12f64..1.0e12, 0..16).prop_map(Payload::DoubleArray),
            proptest::collection::vec(".{0,8}", 0..8).prop_map(Payload::StringArray),
        ]) -> Payload {
            payload
        }
    }

    proptest! {
        #[test]
        fn roundtrip_preserves_equality(payload in arb_payload(), t in any::<u64>()) {
            let value = Value::new(payload, t);
            let decoded = roundtrip(&value);
            prop_assert_eq!(&decoded, &value);
            prop_assert_eq!(decoded.last_change(), t);
            prop_assert_eq!(decoded.kind(), value.kind());
        }
    }
}
