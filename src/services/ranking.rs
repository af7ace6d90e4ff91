use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

use crate::config::overrides::SpecialOverrides;
use crate::config::settings::AppConfig;
use crate::errors::RankingError;
use crate::ingestion::{load_reference, AlbumMap, ExportReader, ItemDifferences};
use crate::ranking::{RankingInputs, RankingOutcome, RawRatingMatrix, ReferenceRatings};

/// Loads the rater exports and the reference sheet, then ranks the raters
pub struct RankingService {
    config: AppConfig,
    overrides: SpecialOverrides,
}

impl RankingService {
    pub fn new(config: AppConfig, overrides: SpecialOverrides) -> Self {
        Self { config, overrides }
    }

    pub fn run(&self) -> Result<RankingOutcome> {
        info!("=== Starting Neighbour Ranking ===\n");

        // Step 1: Load inputs
        let (raw, reference) = self.load_inputs()?;
        info!(
            "  → {} raters, {} reference ratings\n",
            raw.len(),
            reference.len()
        );

        // Step 2: Rank
        let outcome = RankingInputs::new()
            .with_matrix(raw)
            .with_reference(reference)
            .with_overrides(self.overrides.clone())
            .with_settings(self.config.ranking.clone())
            .run()?;

        info!(
            "  → Ranked {} raters over {} items\n",
            outcome.ranking.len(),
            outcome.normalized.n_items()
        );
        info!("=== Ranking Complete ===");
        Ok(outcome)
    }

    /// Items that only one side rated, for fixing up the album map
    pub fn differences(&self) -> Result<ItemDifferences> {
        let (raw, reference) = self.load_inputs()?;
        Ok(ItemDifferences::between(&raw, &reference))
    }

    pub fn write_json(outcome: &RankingOutcome, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&outcome.ranking)
            .context("Failed to serialize ranking")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write ranking to {}", path.display()))?;
        info!("Saved ranking to {}", path.display());
        Ok(())
    }

    fn load_inputs(&self) -> Result<(RawRatingMatrix, ReferenceRatings)> {
        let raw = self.load_matrix()?;
        let reference = self.load_reference()?;
        Ok((raw, reference))
    }

    fn load_matrix(&self) -> Result<RawRatingMatrix> {
        let current = self.config.data.current_path();
        if !current.is_dir() {
            return Err(RankingError::MissingInput("rating matrix"))
                .with_context(|| format!("No exports directory at {}", current.display()));
        }

        info!("Reading rater exports from {}", current.display());
        ExportReader::new()?.read_dir(&current)
    }

    fn load_reference(&self) -> Result<ReferenceRatings> {
        let path: &PathBuf = &self.config.data.reference_file;
        if !path.is_file() {
            return Err(RankingError::MissingInput("reference ratings"))
                .with_context(|| format!("No reference ratings at {}", path.display()));
        }

        let album_map = AlbumMap::load(&self.config.data.album_map_file)?;
        load_reference(path, &album_map)
    }
}
