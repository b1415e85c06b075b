//! # razer_lights_rs
//!
//! An async Rust library for bridging OpenRazer-style lighting devices to a
//! smart-home accessory bridge.
//!
//! The lighting daemon exposes each device over an inter-process bus with a
//! brightness level and an absolute RGB color; smart-home bridges instead
//! speak in On/Off, Brightness, Hue, and Saturation characteristics. This
//! crate carries the state between the two worlds: it discovers devices,
//! reconciles them against the bridge's persisted accessory set by stable
//! identity, and keeps a per-device color/power cache that converts between
//! the bridge's hue/saturation model and the daemon's RGB triplets,
//! optimistically applying every write and rolling it back when the daemon
//! rejects it.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use razer_lights_rs::{
//!     AccessoryStore, BusGateway, Characteristic, CharacteristicValue, reconcile,
//! };
//!
//! // Works with any async runtime!
//! async fn bridge_devices(bus: impl razer_lights_rs::BusTransport) -> Result<(), razer_lights_rs::Error> {
//!     let gateway = Arc::new(BusGateway::new(bus));
//!
//!     // Records the bridge restored from disk, reconciled against the
//!     // daemon's live device list.
//!     let mut store = AccessoryStore::new();
//!     let outcome = reconcile(&gateway, &mut store).await?;
//!
//!     for controller in &outcome.controllers {
//!         controller
//!             .write(Characteristic::Hue, CharacteristicValue::Float(120.0))
//!             .await?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Discovery & Reconciliation**: Match live devices against persisted
//!   accessories by deterministic identity with [`reconcile`]
//! - **Optimistic State Cache**: Per-device On/Brightness/Hue/Saturation
//!   cache with rollback on failure via [`StateCache`]
//! - **Color Conversion**: Pure RGB↔HSV/HSL conversion in [`color`]
//! - **Gateway**: Typed remote operations over an injected bus transport
//!   with [`BusGateway`]
//! - **Controllers**: Per-accessory characteristic binding with
//!   [`AccessoryController`]
//!
//! ## Transport
//!
//! The crate never opens a bus connection itself. Implement [`BusTransport`]
//! over the bindings your process uses and hand it to [`BusGateway::new`];
//! everything above that seam is transport-independent and runtime-agnostic.

mod accessory;
mod bus;
pub mod color;
mod controller;
mod device;
mod discovery;
mod errors;
mod gateway;
mod state;
#[cfg(test)]
pub(crate) mod testing;
mod types;

// Re-export public API
pub use accessory::{AccessoryRecord, AccessoryStore, accessory_id};
pub use bus::{
    BRIGHTNESS_INTERFACE, BusTransport, CHROMA_INTERFACE, DEVICES_INTERFACE, MISC_INTERFACE,
    REGISTRY_PATH, SERVICE, device_path,
};
pub use controller::{
    AccessoryController, AccessoryInformation, Characteristic, CharacteristicValue,
};
pub use device::DeviceDescriptor;
pub use discovery::{Reconciliation, ReconcileReport, reconcile};
pub use errors::Error;
pub use gateway::{BusGateway, DeviceGateway};
pub use state::{DeviceState, StateCache};
pub use types::{Brightness, Color, Hue, Saturation};
