pub mod differences;
pub mod exports;
pub mod reference;
pub mod roster;
pub mod snapshots;
pub mod stars;

pub use differences::ItemDifferences;
pub use exports::{ExportReader, RaterExport};
pub use reference::{load_reference, AlbumMap};
pub use roster::{load_roster, reconcile, RosterReport};
pub use snapshots::{SnapshotChange, SnapshotStore};
pub use stars::StarParser;
