use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info};
use serde::Deserialize;

use crate::errors::{io_context, parse_context};
use crate::ranking::types::{ItemId, ReferenceRatings};

/// Renames reference items to the spelling the raters' exports use
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlbumMap {
    aliases: BTreeMap<String, String>,
}

impl AlbumMap {
    pub fn new(aliases: BTreeMap<String, String>) -> Self {
        Self { aliases }
    }

    /// A missing file means no aliases
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No album map at {}", path.display());
            return Ok(Self::default());
        }

        let json = fs::read_to_string(path).with_context(|| io_context("read", path))?;
        let aliases = serde_json::from_str(&json).with_context(|| parse_context("album map"))?;
        Ok(Self { aliases })
    }

    pub fn translate(&self, item: &str) -> ItemId {
        self.aliases
            .get(item)
            .cloned()
            .unwrap_or_else(|| item.to_string())
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct ReferenceRow {
    #[serde(rename = "Artist")]
    artist: String,
    #[serde(rename = "Album")]
    album: String,
    #[serde(rename = "Score")]
    score: String,
}

impl ReferenceRow {
    fn item(&self) -> ItemId {
        format!("{} - {}", self.artist.trim(), self.album.trim())
    }
}

/// Reads the reference user's `Artist,Album,Score` sheet
pub fn load_reference(path: &Path, album_map: &AlbumMap) -> Result<ReferenceRatings> {
    let file = fs::File::open(path).with_context(|| io_context("open", path))?;
    let ratings = read_reference(file, album_map)
        .with_context(|| format!("Failed to read reference ratings {}", path.display()))?;
    info!("Loaded {} reference ratings from {}", ratings.len(), path.display());
    Ok(ratings)
}

pub fn read_reference<R: Read>(source: R, album_map: &AlbumMap) -> Result<ReferenceRatings> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(source);

    let mut ratings = ReferenceRatings::new();
    for row in reader.deserialize::<ReferenceRow>() {
        let row = row.with_context(|| parse_context("reference row"))?;
        match row.score.parse::<f64>() {
            Ok(score) if score.is_finite() => {
                ratings.insert(album_map.translate(&row.item()), score);
            }
            _ => debug!("Skipping {} with score '{}'", row.item(), row.score),
        }
    }

    Ok(ratings)
}
