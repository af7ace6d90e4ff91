use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use log::{debug, info, warn};

use super::stars::StarParser;
use crate::errors::io_context;
use crate::ranking::types::{ItemId, RaterId, RawRatingMatrix};

const ITEM_COLUMN: usize = 1;
const RATING_COLUMN: usize = 2;

/// One rater's tab-separated export: `rental<TAB>item<TAB>rating`, where the
/// header of the rating column is the rater's username.
#[derive(Debug, Clone, PartialEq)]
pub struct RaterExport {
    pub rater: RaterId,
    pub ratings: BTreeMap<ItemId, f64>,
    pub skipped_rows: usize,
}

pub struct ExportReader {
    stars: StarParser,
}

impl ExportReader {
    pub fn new() -> Result<Self> {
        Ok(Self {
            stars: StarParser::new()?,
        })
    }

    pub fn read_file(&self, path: &Path) -> Result<RaterExport> {
        let file = fs::File::open(path).with_context(|| io_context("open", path))?;
        self.read_from(file)
            .with_context(|| format!("Failed to read rater export {}", path.display()))
    }

    pub fn read_from<R: Read>(&self, source: R) -> Result<RaterExport> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .quoting(false)
            .flexible(true)
            .from_reader(source);

        let rater = Self::extract_rater(reader.headers()?)?;
        let mut ratings = BTreeMap::new();
        let mut skipped_rows = 0;

        for record in reader.records() {
            let record = record?;
            match self.parse_row(&record) {
                Some((item, rating)) => {
                    ratings.insert(item, rating);
                }
                None => skipped_rows += 1,
            }
        }

        if skipped_rows > 0 {
            debug!("{}: skipped {} unrated or malformed rows", rater, skipped_rows);
        }

        Ok(RaterExport {
            rater,
            ratings,
            skipped_rows,
        })
    }

    /// Reads every export in `dir` into one raw rating matrix
    pub fn read_dir(&self, dir: &Path) -> Result<RawRatingMatrix> {
        let mut matrix = RawRatingMatrix::new();

        for path in list_files(dir)? {
            let export = self.read_file(&path)?;
            info!("  → {}: {} ratings", export.rater, export.ratings.len());

            if matrix.contains_key(&export.rater) {
                warn!("Rater {} appears in more than one export, keeping {}", export.rater, path.display());
            }
            matrix.insert(export.rater, export.ratings);
        }

        Ok(matrix)
    }

    fn extract_rater(headers: &csv::StringRecord) -> Result<RaterId> {
        match headers.get(RATING_COLUMN).map(str::trim) {
            Some(name) if !name.is_empty() => Ok(name.to_string()),
            _ => bail!("Export header has no username in column {}", RATING_COLUMN + 1),
        }
    }

    fn parse_row(&self, record: &csv::StringRecord) -> Option<(ItemId, f64)> {
        let item = record.get(ITEM_COLUMN)?.trim();
        if item.is_empty() {
            return None;
        }
        let rating = self.stars.parse(record.get(RATING_COLUMN)?)?;
        Some((item.to_string(), rating))
    }
}

/// Regular files of `dir`, sorted by name
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| io_context("list", dir))? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
