use std::collections::BTreeMap;

use super::normalization::normalize_reference;
use super::types::{ItemId, ReferenceRatings, Score};

/// The reference user's z-scored ratings, the ground truth every group of
/// raters is measured against.
#[derive(Debug, Clone, Default)]
pub struct ReferenceSet {
    scores: BTreeMap<ItemId, Score>,
}

impl ReferenceSet {
    pub fn from_ratings(ratings: &ReferenceRatings) -> Self {
        Self {
            scores: normalize_reference(ratings),
        }
    }

    /// Takes scores that are already normalized
    pub fn from_normalized<I>(scores: I) -> Self
    where
        I: IntoIterator<Item = (ItemId, f64)>,
    {
        Self {
            scores: scores
                .into_iter()
                .map(|(item, v)| (item, Score::from_value(v)))
                .collect(),
        }
    }

    pub fn get(&self, item: &str) -> Score {
        self.scores.get(item).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Items with a usable score
    pub fn present(&self) -> impl Iterator<Item = (&str, f64)> {
        self.scores
            .iter()
            .filter_map(|(item, score)| score.value().map(|v| (item.as_str(), v)))
    }
}
