//! Remote device gateway.
//!
//! Maps the typed device operations onto bus calls against the daemon. The
//! gateway performs no retries and keeps no state; every operation is one (or
//! for [`DeviceGateway::describe`], three concurrent) request/response
//! exchanges.

use std::future::Future;

use log::debug;
use serde_json::{Value, json};

use crate::bus::{
    BRIGHTNESS_INTERFACE, BusTransport, CHROMA_INTERFACE, DEVICES_INTERFACE, MISC_INTERFACE,
    REGISTRY_PATH, device_path,
};
use crate::device::DeviceDescriptor;
use crate::errors::Error;
use crate::types::{Brightness, Color};

type Result<T> = std::result::Result<T, Error>;

/// The remote control surface of the lighting daemon.
///
/// `set_color(serial, None)` disables active lighting output entirely, which
/// is distinct from brightness 0.
pub trait DeviceGateway: Send + Sync {
    /// All serials currently registered with the daemon.
    fn list_serials(&self) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// Static metadata for one device.
    fn describe(&self, serial: &str) -> impl Future<Output = Result<DeviceDescriptor>> + Send;

    /// Current lighting brightness of one device.
    fn brightness(&self, serial: &str) -> impl Future<Output = Result<Brightness>> + Send;

    /// Set the lighting brightness of one device.
    fn set_brightness(
        &self,
        serial: &str,
        value: Brightness,
    ) -> impl Future<Output = Result<()>> + Send;

    /// The device's current static effect color, or `None` when lighting
    /// output is disabled.
    fn color(&self, serial: &str) -> impl Future<Output = Result<Option<Color>>> + Send;

    /// Set the device's static effect color, or disable lighting output with
    /// `None`.
    fn set_color(
        &self,
        serial: &str,
        color: Option<Color>,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// [`DeviceGateway`] implementation speaking to the daemon over an injected
/// [`BusTransport`].
#[derive(Debug)]
pub struct BusGateway<B> {
    transport: B,
}

impl<B: BusTransport> BusGateway<B> {
    /// Wrap a bus transport owned by the embedding process.
    pub fn new(transport: B) -> Self {
        BusGateway { transport }
    }
}

impl<B: BusTransport> DeviceGateway for BusGateway<B> {
    async fn list_serials(&self) -> Result<Vec<String>> {
        let reply = self
            .transport
            .call(REGISTRY_PATH, DEVICES_INTERFACE, "getDevices", Vec::new())
            .await?;
        let serials = as_string_array(&reply).ok_or_else(|| {
            Error::protocol(
                REGISTRY_PATH,
                DEVICES_INTERFACE,
                format!("getDevices returned {reply}, expected an array of serials"),
            )
        })?;
        debug!("daemon reports {} registered devices", serials.len());
        Ok(serials)
    }

    async fn describe(&self, serial: &str) -> Result<DeviceDescriptor> {
        let path = device_path(serial);
        let (name, device_type, vid_pid) = futures::try_join!(
            self.transport
                .call(&path, MISC_INTERFACE, "getDeviceName", Vec::new()),
            self.transport
                .call(&path, MISC_INTERFACE, "getDeviceType", Vec::new()),
            self.transport
                .call(&path, MISC_INTERFACE, "getVidPid", Vec::new()),
        )?;

        let name = as_string(&name)
            .ok_or_else(|| malformed(&path, MISC_INTERFACE, "getDeviceName", &name))?;
        let device_type = as_string(&device_type)
            .ok_or_else(|| malformed(&path, MISC_INTERFACE, "getDeviceType", &device_type))?;
        let (vid, pid) = as_id_pair(&vid_pid)
            .ok_or_else(|| malformed(&path, MISC_INTERFACE, "getVidPid", &vid_pid))?;

        Ok(DeviceDescriptor::new(serial, &name, &device_type, &vid, &pid))
    }

    async fn brightness(&self, serial: &str) -> Result<Brightness> {
        let path = device_path(serial);
        let reply = self
            .transport
            .call(&path, BRIGHTNESS_INTERFACE, "getBrightness", Vec::new())
            .await?;
        reply
            .as_f64()
            .and_then(|v| Brightness::create(v.round() as u8))
            .ok_or_else(|| malformed(&path, BRIGHTNESS_INTERFACE, "getBrightness", &reply))
    }

    async fn set_brightness(&self, serial: &str, value: Brightness) -> Result<()> {
        self.transport
            .call(
                &device_path(serial),
                BRIGHTNESS_INTERFACE,
                "setBrightness",
                vec![json!(value.value())],
            )
            .await?;
        Ok(())
    }

    async fn color(&self, serial: &str) -> Result<Option<Color>> {
        let path = device_path(serial);
        let reply = self
            .transport
            .call(&path, CHROMA_INTERFACE, "getEffectColor", Vec::new())
            .await?;

        // The daemon reports an empty array (or null) while lighting output
        // is disabled.
        match reply {
            Value::Null => Ok(None),
            Value::Array(ref channels) if channels.is_empty() => Ok(None),
            ref other => as_color(other)
                .map(Some)
                .ok_or_else(|| malformed(&path, CHROMA_INTERFACE, "getEffectColor", other)),
        }
    }

    async fn set_color(&self, serial: &str, color: Option<Color>) -> Result<()> {
        let path = device_path(serial);
        match color {
            Some(color) => {
                self.transport
                    .call(
                        &path,
                        CHROMA_INTERFACE,
                        "setStatic",
                        vec![
                            json!(color.red()),
                            json!(color.green()),
                            json!(color.blue()),
                        ],
                    )
                    .await?
            }
            None => {
                self.transport
                    .call(&path, CHROMA_INTERFACE, "setNone", Vec::new())
                    .await?
            }
        };
        Ok(())
    }
}

fn malformed(path: &str, interface: &str, method: &str, reply: &Value) -> Error {
    Error::protocol(path, interface, format!("{method} returned {reply}"))
}

fn as_string(value: &Value) -> Option<String> {
    value.as_str().map(String::from)
}

fn as_string_array(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(as_string)
        .collect::<Option<Vec<String>>>()
}

/// Vendor/product ids arrive as either strings or numbers depending on the
/// daemon version.
fn as_id_pair(value: &Value) -> Option<(String, String)> {
    let pair = value.as_array()?;
    if pair.len() != 2 {
        return None;
    }
    Some((as_id(&pair[0])?, as_id(&pair[1])?))
}

fn as_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => n.as_u64().map(|n| format!("{n:04x}")),
        _ => None,
    }
}

fn as_color(value: &Value) -> Option<Color> {
    let channels = value.as_array()?;
    if channels.len() != 3 {
        return None;
    }
    let mut rgb = [0u8; 3];
    for (slot, channel) in rgb.iter_mut().zip(channels) {
        *slot = u8::try_from(channel.as_u64()?).ok()?;
    }
    Some(Color::rgb(rgb[0], rgb[1], rgb[2]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Canned-reply transport that records every call it sees.
    struct MockBus {
        replies: HashMap<&'static str, Value>,
        calls: Mutex<Vec<(String, String, String, Vec<Value>)>>,
        unreachable: bool,
    }

    impl MockBus {
        fn new(replies: HashMap<&'static str, Value>) -> Self {
            MockBus {
                replies,
                calls: Mutex::new(Vec::new()),
                unreachable: false,
            }
        }

        fn unreachable() -> Self {
            MockBus {
                replies: HashMap::new(),
                calls: Mutex::new(Vec::new()),
                unreachable: true,
            }
        }

        fn calls(&self) -> Vec<(String, String, String, Vec<Value>)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl BusTransport for MockBus {
        async fn call(
            &self,
            path: &str,
            interface: &str,
            method: &str,
            args: Vec<Value>,
        ) -> Result<Value> {
            self.calls.lock().unwrap().push((
                path.to_string(),
                interface.to_string(),
                method.to_string(),
                args,
            ));
            if self.unreachable {
                return Err(Error::transport(method, "bus unreachable"));
            }
            self.replies
                .get(method)
                .cloned()
                .ok_or_else(|| Error::protocol(path, interface, format!("no method {method}")))
        }
    }

    #[tokio::test]
    async fn test_list_serials() {
        let bus = MockBus::new(HashMap::from([("getDevices", json!(["X1", "Y2"]))]));
        let gateway = BusGateway::new(bus);

        let serials = gateway.list_serials().await.unwrap();
        assert_eq!(serials, vec!["X1".to_string(), "Y2".to_string()]);
    }

    #[tokio::test]
    async fn test_list_serials_malformed_reply() {
        let bus = MockBus::new(HashMap::from([("getDevices", json!(42))]));
        let gateway = BusGateway::new(bus);

        assert!(matches!(
            gateway.list_serials().await,
            Err(Error::Protocol { .. })
        ));
    }

    #[tokio::test]
    async fn test_list_serials_unreachable_bus() {
        let gateway = BusGateway::new(MockBus::unreachable());

        assert!(matches!(
            gateway.list_serials().await,
            Err(Error::Transport { .. })
        ));
    }

    #[tokio::test]
    async fn test_describe() {
        let bus = MockBus::new(HashMap::from([
            ("getDeviceName", json!("Razer Base Station Chroma")),
            ("getDeviceType", json!("accessory")),
            ("getVidPid", json!([0x1532, 0x0f08])),
        ]));
        let gateway = BusGateway::new(bus);

        let descriptor = gateway.describe("X1").await.unwrap();
        assert_eq!(descriptor.serial(), "X1");
        assert_eq!(descriptor.display_name(), "Razer Base Station Chroma");
        assert_eq!(descriptor.device_type(), "accessory");
        assert_eq!(descriptor.vendor_id(), "1532");
        assert_eq!(descriptor.product_id(), "0f08");
    }

    #[tokio::test]
    async fn test_describe_targets_device_path() {
        let bus = MockBus::new(HashMap::from([
            ("getDeviceName", json!("n")),
            ("getDeviceType", json!("t")),
            ("getVidPid", json!(["1532", "0f08"])),
        ]));
        let gateway = BusGateway::new(bus);

        gateway.describe("X1").await.unwrap();
        for (path, interface, _, _) in gateway.transport.calls() {
            assert_eq!(path, "/org/razer/device/X1");
            assert_eq!(interface, MISC_INTERFACE);
        }
    }

    #[tokio::test]
    async fn test_set_brightness_call_shape() {
        let bus = MockBus::new(HashMap::from([("setBrightness", Value::Null)]));
        let gateway = BusGateway::new(bus);

        gateway
            .set_brightness("X1", Brightness::create(45).unwrap())
            .await
            .unwrap();

        let calls = gateway.transport.calls();
        assert_eq!(calls.len(), 1);
        let (path, interface, method, args) = &calls[0];
        assert_eq!(path, "/org/razer/device/X1");
        assert_eq!(interface, BRIGHTNESS_INTERFACE);
        assert_eq!(method, "setBrightness");
        assert_eq!(args, &vec![json!(45)]);
    }

    #[tokio::test]
    async fn test_brightness_rounds_daemon_double() {
        let bus = MockBus::new(HashMap::from([("getBrightness", json!(74.6))]));
        let gateway = BusGateway::new(bus);

        assert_eq!(
            gateway.brightness("X1").await.unwrap(),
            Brightness::create(75).unwrap()
        );
    }

    #[tokio::test]
    async fn test_set_color_static() {
        let bus = MockBus::new(HashMap::from([("setStatic", Value::Null)]));
        let gateway = BusGateway::new(bus);

        gateway
            .set_color("X1", Some(Color::rgb(26, 230, 26)))
            .await
            .unwrap();

        let calls = gateway.transport.calls();
        let (_, interface, method, args) = &calls[0];
        assert_eq!(interface, CHROMA_INTERFACE);
        assert_eq!(method, "setStatic");
        assert_eq!(args, &vec![json!(26), json!(230), json!(26)]);
    }

    #[tokio::test]
    async fn test_set_color_none_disables_output() {
        let bus = MockBus::new(HashMap::from([("setNone", Value::Null)]));
        let gateway = BusGateway::new(bus);

        gateway.set_color("X1", None).await.unwrap();

        let calls = gateway.transport.calls();
        let (_, _, method, args) = &calls[0];
        assert_eq!(method, "setNone");
        assert!(args.is_empty());
    }

    #[tokio::test]
    async fn test_color_disabled_output_maps_to_none() {
        let bus = MockBus::new(HashMap::from([("getEffectColor", json!([]))]));
        let gateway = BusGateway::new(bus);

        assert_eq!(gateway.color("X1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_color_triplet() {
        let bus = MockBus::new(HashMap::from([("getEffectColor", json!([255, 0, 128]))]));
        let gateway = BusGateway::new(bus);

        assert_eq!(
            gateway.color("X1").await.unwrap(),
            Some(Color::rgb(255, 0, 128))
        );
    }
}
