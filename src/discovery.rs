//! Startup discovery and accessory reconciliation.
//!
//! Matches the daemon's live device list against the locally persisted
//! accessory set by stable identity and settles the set before any controller
//! exists: create a record for every new serial, rebuild the record for every
//! matched serial, remove every record whose serial vanished. A device whose
//! metadata cannot be read is skipped for the cycle without aborting the run.

use std::collections::HashSet;
use std::sync::Arc;

use log::{info, warn};
use uuid::Uuid;

use crate::accessory::{AccessoryRecord, AccessoryStore, accessory_id};
use crate::controller::AccessoryController;
use crate::errors::Error;
use crate::gateway::DeviceGateway;

type Result<T> = std::result::Result<T, Error>;

/// What one reconciliation cycle did, by device serial.
#[derive(Debug, Default)]
pub struct ReconcileReport {
    /// Live serials that had no cached record; a record was created.
    pub added: Vec<String>,
    /// Live serials whose cached record was rebuilt from a fresh descriptor.
    pub refreshed: Vec<String>,
    /// Cached serials no longer present among live devices.
    pub removed: Vec<String>,
    /// Live serials skipped this cycle, with the failure that caused it.
    pub skipped: Vec<(String, Error)>,
}

/// The settled outcome of a cycle: one controller per reachable live device,
/// plus the report.
pub struct Reconciliation<G> {
    pub controllers: Vec<AccessoryController<G>>,
    pub report: ReconcileReport,
}

/// Run one reconciliation cycle against the daemon.
///
/// Fails only when enumeration itself fails; per-device describe failures are
/// collected in the report. Controllers are constructed after the record set
/// is final, so they never observe a partially reconciled set.
pub async fn reconcile<G: DeviceGateway>(
    gateway: &Arc<G>,
    store: &mut AccessoryStore,
) -> Result<Reconciliation<G>> {
    let serials = gateway.list_serials().await?;
    info!(
        "reconciling {} live devices against {} cached accessories",
        serials.len(),
        store.len()
    );

    let mut report = ReconcileReport::default();
    let mut active: HashSet<Uuid> = HashSet::new();
    let mut bind: Vec<Uuid> = Vec::new();

    for serial in &serials {
        let id = accessory_id(serial);
        match gateway.describe(serial).await {
            Ok(descriptor) => {
                let record = AccessoryRecord::new(descriptor);
                if store.get(&id).is_some() {
                    info!("restoring cached accessory: {}", record.display_name());
                    report.refreshed.push(serial.clone());
                } else {
                    info!("adding new accessory: {serial}");
                    report.added.push(serial.clone());
                }
                store.insert(record);
                active.insert(id);
                bind.push(id);
            }
            Err(err) => {
                warn!("skipping device {serial} this cycle: {err}");
                // Still live, so an existing record is kept for next cycle.
                if store.get(&id).is_some() {
                    active.insert(id);
                }
                report.skipped.push((serial.clone(), err));
            }
        }
    }

    for id in store.ids() {
        if !active.contains(&id)
            && let Some(record) = store.remove(&id)
        {
            info!("removing stale accessory: {}", record.display_name());
            report.removed.push(record.serial().to_string());
        }
    }

    let controllers = bind
        .iter()
        .filter_map(|id| store.get(id))
        .map(|record| AccessoryController::new(gateway.clone(), record.clone()))
        .collect();

    Ok(Reconciliation {
        controllers,
        report,
    })
}
