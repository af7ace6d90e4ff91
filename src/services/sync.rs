use anyhow::Result;
use chrono::NaiveDate;
use log::{info, warn};

use crate::config::settings::AppConfig;
use crate::ingestion::{load_roster, reconcile, RosterReport, SnapshotChange, SnapshotStore};

/// Housekeeping on the exports folder: promoting fresh downloads and
/// checking them against the friends list.
pub struct SyncService {
    config: AppConfig,
    store: SnapshotStore,
}

impl SyncService {
    pub fn new(config: AppConfig) -> Self {
        let store = SnapshotStore::new(&config.data);
        Self { config, store }
    }

    pub fn promote(&self, today: NaiveDate) -> Result<Vec<SnapshotChange>> {
        info!("=== Promoting New Exports ===\n");
        let changes = self.store.promote_new_files(today)?;
        info!("  → {} exports promoted into {}", changes.len(), self.store.current_dir().display());
        Ok(changes)
    }

    pub fn check_roster(&self) -> Result<RosterReport> {
        let roster = load_roster(&self.config.data.roster_path())?;
        let exported = self.store.current_usernames()?;
        let report = reconcile(&roster, &exported);

        if !report.is_consistent() {
            warn!(
                "Roster mismatch: {} exports not on the list, {} friends without exports",
                report.not_on_roster.len(),
                report.missing_exports.len()
            );
        }
        Ok(report)
    }
}
