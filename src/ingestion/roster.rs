use std::collections::BTreeSet;
use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::errors::{io_context, parse_context};

/// Usernames from the friends list, one per row in the first column
pub fn read_roster<R: Read>(source: R) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(source);

    let mut names = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| parse_context("roster row"))?;
        if let Some(name) = record.get(0).map(str::trim).filter(|n| !n.is_empty()) {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

pub fn load_roster(path: &Path) -> Result<Vec<String>> {
    let file = fs::File::open(path).with_context(|| io_context("open", path))?;
    read_roster(file)
}

/// Disagreements between the friends list and the exports on disk
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RosterReport {
    /// Exports whose username is not on the friends list
    pub not_on_roster: Vec<String>,
    /// Friends with no export in `current`
    pub missing_exports: Vec<String>,
}

impl RosterReport {
    pub fn is_consistent(&self) -> bool {
        self.not_on_roster.is_empty() && self.missing_exports.is_empty()
    }
}

pub fn reconcile(roster: &[String], exported: &[String]) -> RosterReport {
    let roster: BTreeSet<&String> = roster.iter().collect();
    let exported: BTreeSet<&String> = exported.iter().collect();

    RosterReport {
        not_on_roster: exported.difference(&roster).map(|s| s.to_string()).collect(),
        missing_exports: roster.difference(&exported).map(|s| s.to_string()).collect(),
    }
}
