use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::info;
use serde::Serialize;

use super::exports::list_files;
use crate::config::settings::DataSettings;
use crate::errors::io_context;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotChange {
    Added(String),
    Replaced(String),
}

impl SnapshotChange {
    pub fn file_name(&self) -> &str {
        match self {
            SnapshotChange::Added(name) | SnapshotChange::Replaced(name) => name,
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            SnapshotChange::Added(_) => "added",
            SnapshotChange::Replaced(_) => "replaced",
        }
    }
}

/// Rater exports kept in three folders: freshly downloaded (`new`), in use
/// (`current`) and superseded (`discarded/<date>`).
pub struct SnapshotStore {
    new_dir: PathBuf,
    current_dir: PathBuf,
    discarded_dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(settings: &DataSettings) -> Self {
        Self {
            new_dir: settings.new_path(),
            current_dir: settings.current_path(),
            discarded_dir: settings.discarded_path(),
        }
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    /// Moves every file of `new` into `current`, first retiring the file it
    /// replaces to `discarded/<today>`.
    pub fn promote_new_files(&self, today: NaiveDate) -> Result<Vec<SnapshotChange>> {
        self.ensure_dirs()?;
        let today_dir = self.discarded_dir.join(today.format("%Y-%m-%d").to_string());

        let mut changes = Vec::new();
        for source in list_files(&self.new_dir)? {
            let change = self.promote_file(&source, &today_dir)?;
            info!("{} {}.", change.file_name(), change.verb());
            changes.push(change);
        }

        Ok(changes)
    }

    /// Usernames of the exports in `current`, taken from the file stems
    pub fn current_usernames(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = list_files(&self.current_dir)?
            .iter()
            .filter_map(|path| path.file_stem())
            .map(|stem| stem.to_string_lossy().into_owned())
            .collect();
        names.sort();
        Ok(names)
    }

    fn promote_file(&self, source: &Path, today_dir: &Path) -> Result<SnapshotChange> {
        let file_name = source
            .file_name()
            .context("Snapshot file has no name")?
            .to_string_lossy()
            .into_owned();
        let target = self.current_dir.join(&file_name);

        let replaced = target.exists();
        if replaced {
            fs::create_dir_all(today_dir).with_context(|| io_context("create", today_dir))?;
            let retired = today_dir.join(&file_name);
            fs::rename(&target, &retired).with_context(|| io_context("retire", &target))?;
        }
        fs::rename(source, &target).with_context(|| io_context("promote", source))?;

        Ok(if replaced {
            SnapshotChange::Replaced(file_name)
        } else {
            SnapshotChange::Added(file_name)
        })
    }

    fn ensure_dirs(&self) -> Result<()> {
        for dir in [&self.new_dir, &self.current_dir, &self.discarded_dir] {
            fs::create_dir_all(dir).with_context(|| io_context("create", dir))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(root: &Path) -> DataSettings {
        DataSettings {
            data_dir: root.to_path_buf(),
            ..DataSettings::default()
        }
    }

    #[test]
    fn test_promote_adds_and_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path());
        let store = SnapshotStore::new(&settings);
        fs::create_dir_all(settings.new_path()).unwrap();
        fs::create_dir_all(settings.current_path()).unwrap();

        fs::write(settings.current_path().join("mary.txt"), "old").unwrap();
        fs::write(settings.new_path().join("mary.txt"), "fresh").unwrap();
        fs::write(settings.new_path().join("johnny.txt"), "first").unwrap();

        let today = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let changes = store.promote_new_files(today).unwrap();

        assert_eq!(
            changes,
            vec![
                SnapshotChange::Added("johnny.txt".to_string()),
                SnapshotChange::Replaced("mary.txt".to_string()),
            ]
        );
        assert_eq!(fs::read_to_string(settings.current_path().join("mary.txt")).unwrap(), "fresh");
        assert_eq!(
            fs::read_to_string(settings.discarded_path().join("2024-03-09").join("mary.txt")).unwrap(),
            "old"
        );
        assert!(list_files(&settings.new_path()).unwrap().is_empty());
        assert_eq!(store.current_usernames().unwrap(), vec!["johnny", "mary"]);
    }

    #[test]
    fn test_promote_with_nothing_new() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(&settings(dir.path()));
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        assert!(store.promote_new_files(today).unwrap().is_empty());
    }
}
