//! Static device metadata.

use serde::{Deserialize, Serialize};

/// Identity and static metadata for one physical device, as reported by the
/// daemon.
///
/// The `serial` is the primary identity key: globally unique and stable
/// across restarts. Descriptors are immutable once built; when the daemon
/// reports different metadata for a known serial, reconciliation constructs a
/// fresh record around a fresh descriptor instead of mutating this one.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    serial: String,
    display_name: String,
    device_type: String,
    vendor_id: String,
    product_id: String,
}

impl DeviceDescriptor {
    pub fn new(
        serial: &str,
        display_name: &str,
        device_type: &str,
        vendor_id: &str,
        product_id: &str,
    ) -> Self {
        DeviceDescriptor {
            serial: serial.to_string(),
            display_name: display_name.to_string(),
            device_type: device_type.to_string(),
            vendor_id: vendor_id.to_string(),
            product_id: product_id.to_string(),
        }
    }

    pub fn serial(&self) -> &str {
        &self.serial
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn device_type(&self) -> &str {
        &self.device_type
    }

    pub fn vendor_id(&self) -> &str {
        &self.vendor_id
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }
}
