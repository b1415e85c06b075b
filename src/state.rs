//! Locally cached device state with optimistic remote mutation.
//!
//! The daemon has no native hue/saturation concept: it accepts a brightness
//! level and an absolute RGB triplet, nothing else. The cache therefore keeps
//! the last hue/saturation the bridge wrote as ground truth instead of
//! re-deriving them from the device, which would lose precision on every RGB
//! round trip. Reads never touch the bus; writes apply optimistically, issue
//! the remote call, and restore the captured fields if the call fails.

use std::sync::{Arc, Mutex};

use log::debug;
use serde::Serialize;

use crate::color::color_for_hs;
use crate::errors::Error;
use crate::gateway::DeviceGateway;
use crate::types::{Brightness, Color, Hue, Saturation};

type Result<T> = std::result::Result<T, Error>;

/// The mutable control state of one managed device.
///
/// Hue and saturation are meaningful relative to the fixed lightness used
/// when converting to RGB for transmission
/// ([`DEFAULT_LIGHTNESS`](crate::color::DEFAULT_LIGHTNESS)).
#[derive(Debug, Serialize, Clone, Copy, Default, PartialEq)]
pub struct DeviceState {
    pub is_on: bool,
    pub brightness: u8,
    pub hue: f32,
    pub saturation: f32,
}

/// Serializes all reads and writes of one device's cached state.
///
/// The cache only ever reflects the device's last confirmed state, with one
/// deliberate exception: while a remote call is in flight, readers observe
/// the optimistic not-yet-confirmed value. Independent fields may have
/// concurrent in-flight writes; each failure restores exactly the fields the
/// failed write touched.
#[derive(Debug)]
pub struct StateCache<G> {
    serial: String,
    gateway: Arc<G>,
    state: Mutex<DeviceState>,
}

impl<G: DeviceGateway> StateCache<G> {
    /// Create a cache with default state (off, dark, hue/saturation 0).
    pub fn new(gateway: Arc<G>, serial: &str) -> Self {
        StateCache {
            serial: serial.to_string(),
            gateway,
            state: Mutex::new(DeviceState::default()),
        }
    }

    pub fn serial(&self) -> &str {
        &self.serial
    }

    /// Snapshot of the current cached state.
    pub fn state(&self) -> DeviceState {
        *self.state.lock().unwrap()
    }

    /// Cached power state. Never suspends; bridges penalize slow reads.
    pub fn on(&self) -> bool {
        self.state().is_on
    }

    /// Cached brightness. Never suspends.
    pub fn brightness(&self) -> Brightness {
        Brightness::create_or(self.state().brightness)
    }

    /// Cached hue. Never suspends.
    pub fn hue(&self) -> Hue {
        Hue {
            degrees: self.state().hue,
        }
    }

    /// Cached saturation. Never suspends.
    pub fn saturation(&self) -> Saturation {
        Saturation {
            percent: self.state().saturation,
        }
    }

    /// Turn the device on or off through the brightness channel.
    ///
    /// On restores the cached brightness (or full brightness when the cache
    /// is dark); off drives brightness to 0.
    pub async fn set_on(&self, value: bool) -> Result<()> {
        let (captured, target) = self.apply(|state| {
            let captured = (state.is_on, state.brightness);
            let target = match (value, state.brightness) {
                (true, 0) => 100,
                (true, cached) => cached,
                (false, _) => 0,
            };
            state.is_on = value;
            state.brightness = target;
            (captured, target)
        });

        debug!("set on -> {value} (brightness {target}) for {}", self.serial);
        let result = self
            .gateway
            .set_brightness(&self.serial, Brightness::create_or(target))
            .await;
        self.commit_or_revert(result, |state| {
            (state.is_on, state.brightness) = captured;
        })
    }

    /// Set the brightness, deriving the power state from it.
    pub async fn set_brightness(&self, value: Brightness) -> Result<()> {
        let captured = self.apply(|state| {
            let captured = (state.is_on, state.brightness);
            state.brightness = value.value();
            state.is_on = value.value() > 0;
            captured
        });

        debug!("set brightness -> {} for {}", value.value(), self.serial);
        let result = self.gateway.set_brightness(&self.serial, value).await;
        self.commit_or_revert(result, |state| {
            (state.is_on, state.brightness) = captured;
        })
    }

    /// Set the hue, retransmitting the RGB triplet derived from the cached
    /// hue/saturation pair.
    pub async fn set_hue(&self, value: Hue) -> Result<()> {
        let (captured, rgb) = self.apply(|state| {
            let captured = state.hue;
            state.hue = value.degrees();
            (captured, color_for_state(state))
        });

        debug!("set hue -> {} for {}", value.degrees(), self.serial);
        let result = self.gateway.set_color(&self.serial, Some(rgb)).await;
        self.commit_or_revert(result, |state| state.hue = captured)
    }

    /// Set the saturation, retransmitting the RGB triplet derived from the
    /// cached hue/saturation pair.
    pub async fn set_saturation(&self, value: Saturation) -> Result<()> {
        let (captured, rgb) = self.apply(|state| {
            let captured = state.saturation;
            state.saturation = value.percent();
            (captured, color_for_state(state))
        });

        debug!("set saturation -> {} for {}", value.percent(), self.serial);
        let result = self.gateway.set_color(&self.serial, Some(rgb)).await;
        self.commit_or_revert(result, |state| state.saturation = captured)
    }

    fn apply<T>(&self, mutate: impl FnOnce(&mut DeviceState) -> T) -> T {
        mutate(&mut self.state.lock().unwrap())
    }

    /// Commit an acknowledged remote call, or revert the captured fields and
    /// re-surface the gateway's error unchanged.
    fn commit_or_revert(
        &self,
        result: Result<()>,
        revert: impl FnOnce(&mut DeviceState),
    ) -> Result<()> {
        if let Err(err) = result {
            debug!("remote call failed for {}, reverting: {err}", self.serial);
            self.apply(revert);
            return Err(err);
        }
        Ok(())
    }
}

fn color_for_state(state: &DeviceState) -> Color {
    color_for_hs(
        Hue {
            degrees: state.hue,
        },
        Saturation {
            percent: state.saturation,
        },
    )
}
