//! Connection metadata exchanged alongside values during callbacks.
//!
//! These are pure data conversions with the same lifetime contract as
//! the value decoder: the foreign structures are valid only for the
//! callback's extent, and the owned copies hold no reference to them.
//! Listener registration and dispatch live elsewhere.

use crate::decode::read_string;
use crate::raw::RawString;

/// Handle identifying a registered connection listener on the native
/// side. Opaque to this crate.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(pub u32);

/// Foreign layout of peer connection info.
#[repr(C)]
pub struct RawConnectionInfo {
    /// Peer's self-reported identity (UTF-8, not NUL-terminated).
    pub remote_id: RawString,
    /// Peer's address (UTF-8, not NUL-terminated).
    pub remote_ip: RawString,
    /// Peer's port.
    pub remote_port: u32,
    /// Timestamp of the last update received from this peer.
    pub last_update: u64,
    /// Negotiated protocol version.
    pub protocol_version: u32,
}

/// Foreign layout of a connection-event notification.
#[repr(C)]
pub struct RawConnectionNotification {
    /// The listener the event is for.
    pub listener: u32,
    /// Nonzero if the peer connected, zero if it disconnected.
    pub connected: i32,
    /// The peer's connection info.
    pub conn: RawConnectionInfo,
}

/// Owned peer connection info.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionInfo {
    /// Peer's self-reported identity.
    pub remote_id: String,
    /// Peer's address.
    pub remote_ip: String,
    /// Peer's port.
    pub remote_port: u32,
    /// Timestamp of the last update received from this peer.
    pub last_update: u64,
    /// Negotiated protocol version.
    pub protocol_version: u32,
}

impl ConnectionInfo {
    /// Deep-copies foreign connection info.
    ///
    /// # Safety
    ///
    /// `raw`'s string pointers must be valid for reads for the lengths
    /// they carry for this call's duration.
    pub unsafe fn from_raw(raw: &RawConnectionInfo) -> Self {
        Self {
            remote_id: read_string(&raw.remote_id),
            remote_ip: read_string(&raw.remote_ip),
            remote_port: raw.remote_port,
            last_update: raw.last_update,
            protocol_version: raw.protocol_version,
        }
    }
}

/// Owned connection-event notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionNotification {
    /// The listener the event is for.
    pub listener: ListenerHandle,
    /// Whether the peer connected (false means disconnected).
    pub connected: bool,
    /// The peer's connection info.
    pub conn: ConnectionInfo,
}

impl ConnectionNotification {
    /// Deep-copies a foreign notification.
    ///
    /// # Safety
    ///
    /// Same contract as [`ConnectionInfo::from_raw`] for the embedded
    /// connection info.
    pub unsafe fn from_raw(raw: &RawConnectionNotification) -> Self {
        Self {
            listener: ListenerHandle(raw.listener),
            connected: raw.connected != 0,
            conn: ConnectionInfo::from_raw(&raw.conn),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn borrowed_str(s: &str) -> RawString {
        RawString {
            data: s.as_ptr().cast_mut(),
            len: s.len(),
        }
    }

    #[test]
    fn connection_info_deep_copies() {
        let raw = RawConnectionInfo {
            remote_id: borrowed_str("peer-α"),
            remote_ip: borrowed_str("10.0.0.2"),
            remote_port: 1735,
            last_update: 120,
            protocol_version: 0x0300,
        };
        let info = unsafe { ConnectionInfo::from_raw(&raw) };
        assert_eq!(info.remote_id, "peer-α");
        assert_eq!(info.remote_ip, "10.0.0.2");
        assert_eq!(info.remote_port, 1735);
        assert_eq!(info.last_update, 120);
        assert_eq!(info.protocol_version, 0x0300);
    }

    #[test]
    fn notification_converts_native_booleans() {
        let raw = RawConnectionNotification {
            listener: 7,
            connected: 1,
            conn: RawConnectionInfo {
                remote_id: borrowed_str(""),
                remote_ip: borrowed_str("127.0.0.1"),
                remote_port: 0,
                last_update: 0,
                protocol_version: 0,
            },
        };
        let note = unsafe { ConnectionNotification::from_raw(&raw) };
        assert_eq!(note.listener, ListenerHandle(7));
        assert!(note.connected);
        assert_eq!(note.conn.remote_id, "");
    }
}
