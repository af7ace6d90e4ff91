use std::collections::{BTreeMap, BTreeSet};
use serde::{Deserialize, Serialize};

pub type RaterId = String;
pub type ItemId = String;
pub type RatingValue = f64;

/// Rater -> (Item -> raw rating), as handed over by the ingestion layer
pub type RawRatingMatrix = BTreeMap<RaterId, BTreeMap<ItemId, RatingValue>>;

/// Reference user's raw scores keyed by item
pub type ReferenceRatings = BTreeMap<ItemId, RatingValue>;

/// A single cell of the rating matrix.
///
/// Absent and non-finite values are the same thing to every consumer: they
/// never take part in averaging, comparison or counting.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Score {
    Present(f64),
    #[default]
    Absent,
}

impl Score {
    pub fn from_value(value: f64) -> Self {
        if value.is_finite() {
            Score::Present(value)
        } else {
            Score::Absent
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Score::Present(v) => Some(v),
            Score::Absent => None,
        }
    }

    pub fn is_present(self) -> bool {
        matches!(self, Score::Present(_))
    }
}

impl From<Option<f64>> for Score {
    fn from(value: Option<f64>) -> Self {
        value.map(Score::from_value).unwrap_or_default()
    }
}

/// One entry of the final ordering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRater {
    pub rater: RaterId,
    /// `+inf` for raters that could not be compared with the reference;
    /// written as the string "inf" since JSON has no infinity.
    #[serde(with = "score_format")]
    pub score: f64,
}

mod score_format {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(score: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if score.is_finite() {
            serializer.serialize_f64(*score)
        } else if score.is_nan() {
            serializer.serialize_str("nan")
        } else if *score > 0.0 {
            serializer.serialize_str("inf")
        } else {
            serializer.serialize_str("-inf")
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(v) => Ok(v),
            Repr::Text(text) => match text.as_str() {
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                "nan" => Ok(f64::NAN),
                other => Err(serde::de::Error::custom(format!("invalid score '{other}'"))),
            },
        }
    }
}

/// Raters already ranked, best first. Entries are append-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChosenSet {
    entries: Vec<RankedRater>,
}

impl ChosenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, rater: &str) -> bool {
        self.entries.iter().any(|e| e.rater == rater)
    }

    pub fn get(&self, rater: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.rater == rater)
            .map(|e| e.score)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RankedRater> {
        self.entries.iter()
    }

    pub fn raters(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.rater.as_str())
    }

    pub(crate) fn with_entry(mut self, rater: RaterId, score: f64) -> Self {
        debug_assert!(!self.contains(&rater));
        self.entries.push(RankedRater { rater, score });
        self
    }
}

impl IntoIterator for ChosenSet {
    type Item = RankedRater;
    type IntoIter = std::vec::IntoIter<RankedRater>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Column indices of raters not yet ranked. Ordered, so enumeration follows
/// the lexical order of rater ids.
pub type CandidatePool = BTreeSet<usize>;
