//! Per-device accessory controller.
//!
//! One controller per managed device, binding the bridge's characteristic
//! get/set entry points to the device's state cache. The controller holds no
//! state of its own beyond its record and cache.

use std::sync::Arc;

use log::debug;
use strum_macros::{Display, EnumIter, EnumString};

use crate::accessory::AccessoryRecord;
use crate::errors::Error;
use crate::gateway::DeviceGateway;
use crate::state::StateCache;
use crate::types::{Brightness, Hue, Saturation};

type Result<T> = std::result::Result<T, Error>;

/// A controllable attribute exposed to the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum Characteristic {
    On,
    Brightness,
    Hue,
    Saturation,
}

/// A characteristic value as the bridge carries it: booleans for power,
/// integers for brightness percent, floats for hue degrees and saturation
/// percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CharacteristicValue {
    Bool(bool),
    Int(i64),
    Float(f32),
}

impl std::fmt::Display for CharacteristicValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CharacteristicValue::Bool(v) => write!(f, "{v}"),
            CharacteristicValue::Int(v) => write!(f, "{v}"),
            CharacteristicValue::Float(v) => write!(f, "{v}"),
        }
    }
}

/// Accessory information the bridge shows for the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessoryInformation {
    pub name: String,
    pub manufacturer: String,
    pub model: String,
    pub serial_number: String,
}

/// Binds one accessory's characteristics to its [`StateCache`].
///
/// Reads are synchronous and cache-backed; writes suspend on the remote call
/// and resolve exactly once with either success or the gateway's error.
#[derive(Debug)]
pub struct AccessoryController<G> {
    record: AccessoryRecord,
    cache: StateCache<G>,
}

impl<G: DeviceGateway> AccessoryController<G> {
    /// Bind a controller to a reconciled record, with a fresh default cache.
    pub fn new(gateway: Arc<G>, record: AccessoryRecord) -> Self {
        let cache = StateCache::new(gateway, record.serial());
        AccessoryController { record, cache }
    }

    pub fn record(&self) -> &AccessoryRecord {
        &self.record
    }

    pub fn cache(&self) -> &StateCache<G> {
        &self.cache
    }

    /// Values for the bridge's accessory-information service.
    pub fn information(&self) -> AccessoryInformation {
        let context = self.record.context();
        AccessoryInformation {
            name: context.display_name().to_string(),
            manufacturer: "Razer".to_string(),
            model: context.device_type().to_string(),
            serial_number: context.serial().to_string(),
        }
    }

    /// Handle a characteristic get. Never suspends.
    pub fn read(&self, characteristic: Characteristic) -> CharacteristicValue {
        let value = match characteristic {
            Characteristic::On => CharacteristicValue::Bool(self.cache.on()),
            Characteristic::Brightness => {
                CharacteristicValue::Int(self.cache.brightness().value() as i64)
            }
            Characteristic::Hue => CharacteristicValue::Float(self.cache.hue().degrees()),
            Characteristic::Saturation => {
                CharacteristicValue::Float(self.cache.saturation().percent())
            }
        };
        debug!("get characteristic {characteristic} -> {value} for {}", self.record.serial());
        value
    }

    /// Handle a characteristic set, delegating to the cache and re-surfacing
    /// its error unchanged.
    pub async fn write(
        &self,
        characteristic: Characteristic,
        value: CharacteristicValue,
    ) -> Result<()> {
        debug!("set characteristic {characteristic} -> {value} for {}", self.record.serial());
        match characteristic {
            Characteristic::On => self.cache.set_on(expect_bool(characteristic, value)?).await,
            Characteristic::Brightness => {
                self.cache
                    .set_brightness(expect_brightness(characteristic, value)?)
                    .await
            }
            Characteristic::Hue => {
                let degrees = expect_float(characteristic, value)?;
                let hue = Hue::create(degrees)
                    .ok_or_else(|| Error::invalid_value(characteristic, degrees))?;
                self.cache.set_hue(hue).await
            }
            Characteristic::Saturation => {
                let percent = expect_float(characteristic, value)?;
                let saturation = Saturation::create(percent)
                    .ok_or_else(|| Error::invalid_value(characteristic, percent))?;
                self.cache.set_saturation(saturation).await
            }
        }
    }
}

fn expect_bool(characteristic: Characteristic, value: CharacteristicValue) -> Result<bool> {
    match value {
        CharacteristicValue::Bool(v) => Ok(v),
        other => Err(Error::invalid_value(characteristic, other)),
    }
}

fn expect_brightness(
    characteristic: Characteristic,
    value: CharacteristicValue,
) -> Result<Brightness> {
    let CharacteristicValue::Int(v) = value else {
        return Err(Error::invalid_value(characteristic, value));
    };
    u8::try_from(v)
        .ok()
        .and_then(Brightness::create)
        .ok_or_else(|| Error::invalid_value(characteristic, v))
}

fn expect_float(characteristic: Characteristic, value: CharacteristicValue) -> Result<f32> {
    match value {
        CharacteristicValue::Float(v) => Ok(v),
        CharacteristicValue::Int(v) => Ok(v as f32),
        other => Err(Error::invalid_value(characteristic, other)),
    }
}
