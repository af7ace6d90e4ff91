use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;

use crate::ranking::types::{RawRatingMatrix, ReferenceRatings};

/// Items only one side knows about; usually spelling mismatches worth an
/// album map entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ItemDifferences {
    pub only_reference: Vec<String>,
    pub only_raters: Vec<String>,
}

impl ItemDifferences {
    pub fn between(raw: &RawRatingMatrix, reference: &ReferenceRatings) -> Self {
        let rater_items: BTreeSet<&String> = raw.values().flat_map(|r| r.keys()).collect();
        let reference_items: BTreeSet<&String> = reference.keys().collect();

        Self {
            only_reference: reference_items
                .difference(&rater_items)
                .map(|s| s.to_string())
                .collect(),
            only_raters: rater_items
                .difference(&reference_items)
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Writes `my_items.csv` and `their_items.csv` into `dir`
    pub fn write_csv(&self, dir: &Path) -> Result<()> {
        write_column(&dir.join("my_items.csv"), &self.only_reference)?;
        write_column(&dir.join("their_items.csv"), &self.only_raters)?;
        Ok(())
    }
}

fn write_column(path: &Path, items: &[String]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    writer.write_record(["item"])?;
    for item in items {
        writer.write_record([item])?;
    }
    writer.flush()?;
    info!("Wrote {} items to {}", items.len(), path.display());
    Ok(())
}
