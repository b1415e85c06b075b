//! Inter-process bus seam.
//!
//! The crate never opens a bus connection itself. The embedding process owns
//! the connection, wraps it in a [`BusTransport`] implementation, and hands it
//! to [`BusGateway`](crate::gateway::BusGateway) at construction. This keeps
//! the whole device core testable without a running daemon.

use std::future::Future;

use serde_json::Value;

use crate::errors::Error;

type Result<T> = std::result::Result<T, Error>;

/// Well-known bus name of the lighting daemon.
pub const SERVICE: &str = "org.razer";

/// Object path of the daemon's top-level device registry.
pub const REGISTRY_PATH: &str = "/org/razer";

/// Interface exposed by the registry object for device enumeration.
pub const DEVICES_INTERFACE: &str = "razer.devices";

/// Interface exposed per device for static metadata.
pub const MISC_INTERFACE: &str = "razer.device.misc";

/// Interface exposed per device for lighting brightness.
pub const BRIGHTNESS_INTERFACE: &str = "razer.device.lighting.brightness";

/// Interface exposed per device for lighting color effects.
pub const CHROMA_INTERFACE: &str = "razer.device.lighting.chroma";

/// Object path of the daemon object controlling one device.
pub fn device_path(serial: &str) -> String {
    format!("{REGISTRY_PATH}/device/{serial}")
}

/// A single request/response method call against the daemon.
///
/// Implementations map this onto whatever bus bindings the process uses.
/// Error contract:
///
/// - [`Error::Transport`] when the bus itself is unreachable,
/// - [`Error::Protocol`] when the object exists but does not implement the
///   requested interface or method,
/// - [`Error::DeviceNotFound`] when the object path names a device the daemon
///   no longer knows.
///
/// Calls never retry; retry policy belongs to the caller.
pub trait BusTransport: Send + Sync {
    /// Invoke `method` on `interface` of the object at `path`, addressed to
    /// the daemon's well-known service name.
    fn call(
        &self,
        path: &str,
        interface: &str,
        method: &str,
        args: Vec<Value>,
    ) -> impl Future<Output = Result<Value>> + Send;
}
