//! Bridge-visible accessory records and their persisted set.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::device::DeviceDescriptor;

/// Namespace for accessory ids, fixed for the lifetime of the crate so that
/// ids survive restarts.
const ACCESSORY_NAMESPACE: Uuid = Uuid::from_u128(0x9d94_b7e2_41c3_4c5a_8f6e_02d1_7a55_c0de);

/// Deterministic accessory identity for a device serial.
///
/// Name-based v5 UUIDs are collision-free over the daemon's serial domain;
/// the same serial always yields the same id, across processes and restarts.
///
/// # Examples
///
/// ```
/// use razer_lights_rs::accessory_id;
///
/// assert_eq!(accessory_id("PM1337"), accessory_id("PM1337"));
/// assert_ne!(accessory_id("PM1337"), accessory_id("PM1338"));
/// ```
pub fn accessory_id(serial: &str) -> Uuid {
    Uuid::new_v5(&ACCESSORY_NAMESPACE, serial.as_bytes())
}

/// One bridge-visible accessory: its identity plus the descriptor it was
/// built from. The bridge persists records across restarts, so both halves
/// are serde round-trippable.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AccessoryRecord {
    id: Uuid,
    context: DeviceDescriptor,
}

impl AccessoryRecord {
    /// Build the record for a freshly described device.
    pub fn new(context: DeviceDescriptor) -> Self {
        AccessoryRecord {
            id: accessory_id(context.serial()),
            context,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn serial(&self) -> &str {
        self.context.serial()
    }

    pub fn display_name(&self) -> &str {
        self.context.display_name()
    }

    /// The descriptor captured when this record was (re)built.
    pub fn context(&self) -> &DeviceDescriptor {
        &self.context
    }
}

/// The locally persisted accessory set, keyed by accessory id.
///
/// Restored from whatever the bridge saved; reconciliation may find records
/// whose serial no longer exists remotely, and live serials with no record.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct AccessoryStore {
    records: HashMap<Uuid, AccessoryRecord>,
}

impl AccessoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the set from records the bridge restored from disk.
    pub fn restore(records: impl IntoIterator<Item = AccessoryRecord>) -> Self {
        AccessoryStore {
            records: records.into_iter().map(|r| (r.id(), r)).collect(),
        }
    }

    pub fn get(&self, id: &Uuid) -> Option<&AccessoryRecord> {
        self.records.get(id)
    }

    /// Insert or replace the record with the same id.
    pub fn insert(&mut self, record: AccessoryRecord) {
        self.records.insert(record.id(), record);
    }

    pub fn remove(&mut self, id: &Uuid) -> Option<AccessoryRecord> {
        self.records.remove(id)
    }

    pub fn records(&self) -> impl Iterator<Item = &AccessoryRecord> {
        self.records.values()
    }

    pub fn ids(&self) -> Vec<Uuid> {
        self.records.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
