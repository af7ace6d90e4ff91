use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::errors::{with_parse_context, RankingError};

/// A hand-picked item whose normalized rating shifts a candidate's score by
/// `rating / divisor`. A negative divisor turns a high rating into a penalty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialOverride {
    pub item: String,
    pub divisor: f64,
}

impl SpecialOverride {
    pub fn new(item: impl Into<String>, divisor: f64) -> Result<Self, RankingError> {
        let item = item.into();
        if !divisor.is_finite() || divisor == 0.0 {
            return Err(RankingError::InvalidOverride { item, divisor });
        }
        Ok(Self { item, divisor })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecialOverrides {
    entries: Vec<SpecialOverride>,
}

impl SpecialOverrides {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_map(map: BTreeMap<String, f64>) -> Result<Self, RankingError> {
        let entries = map
            .into_iter()
            .map(|(item, divisor)| SpecialOverride::new(item, divisor))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    /// Reads a JSON object of `item -> divisor`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read overrides file {}", path.display()))?;
        let map: BTreeMap<String, f64> = with_parse_context(serde_json::from_str(&json), "overrides file")?;
        Ok(Self::from_map(map)?)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpecialOverride> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Known taste markers used when no overrides file is given
pub fn get_overrides() -> SpecialOverrides {
    SpecialOverrides {
        entries: vec![
            SpecialOverride { item: "Women - Public Strain".to_string(), divisor: 10.0 },
            SpecialOverride { item: "Institute - Catharsis".to_string(), divisor: 20.0 },
            SpecialOverride { item: "Cindy Lee - Act of Tenderness".to_string(), divisor: 20.0 },
            SpecialOverride { item: "Parquet Courts - Light Up Gold".to_string(), divisor: 30.0 },
            SpecialOverride { item: "Swans - The Seer".to_string(), divisor: -20.0 },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_divisor_rejected() {
        let err = SpecialOverride::new("x", 0.0).unwrap_err();
        assert_eq!(
            err,
            RankingError::InvalidOverride { item: "x".to_string(), divisor: 0.0 }
        );
        assert!(SpecialOverride::new("x", f64::NAN).is_err());
    }

    #[test]
    fn test_builtin_table_is_valid() {
        let overrides = get_overrides();
        assert_eq!(overrides.len(), 5);
        assert!(overrides.iter().all(|o| o.divisor != 0.0));
        assert!(overrides.iter().any(|o| o.divisor < 0.0));
    }

    #[test]
    fn test_load_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overrides.json");
        fs::write(&path, r#"{"A - B": 10, "C - D": -5.5}"#).unwrap();

        let overrides = SpecialOverrides::load(&path).unwrap();
        let entries: Vec<_> = overrides.iter().cloned().collect();
        assert_eq!(
            entries,
            vec![
                SpecialOverride { item: "A - B".to_string(), divisor: 10.0 },
                SpecialOverride { item: "C - D".to_string(), divisor: -5.5 },
            ]
        );
    }

    #[test]
    fn test_load_rejects_zero_divisor() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overrides.json");
        fs::write(&path, r#"{"A - B": 0}"#).unwrap();

        assert!(SpecialOverrides::load(&path).is_err());
    }
}
