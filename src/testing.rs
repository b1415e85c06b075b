//! In-memory gateway double shared by the cache, controller, and discovery
//! tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::device::DeviceDescriptor;
use crate::errors::Error;
use crate::gateway::DeviceGateway;
use crate::types::{Brightness, Color};

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum GatewayCall {
    ListSerials,
    Describe(String),
    SetBrightness(String, u8),
    SetColor(String, Option<Color>),
}

/// A daemon standing in for the real bus: fixed serial list, canned
/// descriptors, and per-channel failure switches.
#[derive(Debug, Default)]
pub(crate) struct MockGateway {
    serials: Vec<String>,
    descriptors: HashMap<String, DeviceDescriptor>,
    fail_brightness: AtomicBool,
    fail_color: AtomicBool,
    unreachable: AtomicBool,
    calls: Mutex<Vec<GatewayCall>>,
}

impl MockGateway {
    pub(crate) fn with_devices(serials: &[&str]) -> Self {
        let descriptors = serials
            .iter()
            .map(|serial| ((*serial).to_string(), descriptor(serial)))
            .collect();
        MockGateway {
            serials: serials.iter().map(|s| (*s).to_string()).collect(),
            descriptors,
            ..Default::default()
        }
    }

    /// A daemon whose bus cannot be reached at all.
    pub(crate) fn unreachable() -> Self {
        let gateway = MockGateway::default();
        gateway.unreachable.store(true, Ordering::SeqCst);
        gateway
    }

    /// Keep a serial in the live list but make its metadata unreadable.
    pub(crate) fn drop_descriptor(&mut self, serial: &str) {
        self.descriptors.remove(serial);
    }

    pub(crate) fn fail_brightness(&self) {
        self.fail_brightness.store(true, Ordering::SeqCst);
    }

    pub(crate) fn fail_color(&self) {
        self.fail_color.store(true, Ordering::SeqCst);
    }

    pub(crate) fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: GatewayCall) {
        self.calls.lock().unwrap().push(call);
    }
}

pub(crate) fn descriptor(serial: &str) -> DeviceDescriptor {
    DeviceDescriptor::new(
        serial,
        &format!("Device {serial}"),
        "accessory",
        "1532",
        "0f08",
    )
}

impl DeviceGateway for MockGateway {
    async fn list_serials(&self) -> Result<Vec<String>> {
        self.record(GatewayCall::ListSerials);
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(Error::transport("getDevices", "bus unreachable"));
        }
        Ok(self.serials.clone())
    }

    async fn describe(&self, serial: &str) -> Result<DeviceDescriptor> {
        self.record(GatewayCall::Describe(serial.to_string()));
        self.descriptors
            .get(serial)
            .cloned()
            .ok_or_else(|| Error::DeviceNotFound(serial.to_string()))
    }

    async fn brightness(&self, _serial: &str) -> Result<Brightness> {
        Ok(Brightness::full())
    }

    async fn set_brightness(&self, serial: &str, value: Brightness) -> Result<()> {
        self.record(GatewayCall::SetBrightness(serial.to_string(), value.value()));
        if self.fail_brightness.load(Ordering::SeqCst) {
            return Err(Error::transport("setBrightness", "bus unreachable"));
        }
        Ok(())
    }

    async fn color(&self, _serial: &str) -> Result<Option<Color>> {
        Ok(None)
    }

    async fn set_color(&self, serial: &str, color: Option<Color>) -> Result<()> {
        self.record(GatewayCall::SetColor(serial.to_string(), color));
        if self.fail_color.load(Ordering::SeqCst) {
            return Err(Error::transport("setStatic", "bus unreachable"));
        }
        Ok(())
    }
}
