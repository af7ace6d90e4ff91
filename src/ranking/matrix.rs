use std::collections::{BTreeSet, HashMap};
use log::{debug, warn};
use ndarray::Array2;

use super::normalization::normalize_column;
use super::types::{ItemId, RaterId, RawRatingMatrix, ReferenceRatings, Score};

/// Item and rater labels of a dense matrix, both in lexical order
#[derive(Debug, Clone, Default)]
struct Axes {
    items: Vec<ItemId>,
    raters: Vec<RaterId>,
    item_to_idx: HashMap<ItemId, usize>,
    rater_to_idx: HashMap<RaterId, usize>,
}

impl Axes {
    fn new(items: Vec<ItemId>, raters: Vec<RaterId>) -> Self {
        let item_to_idx = index_labels(&items);
        let rater_to_idx = index_labels(&raters);
        Self {
            items,
            raters,
            item_to_idx,
            rater_to_idx,
        }
    }
}

fn index_labels(labels: &[String]) -> HashMap<String, usize> {
    labels
        .iter()
        .enumerate()
        .map(|(idx, label)| (label.clone(), idx))
        .collect()
}

/// Raw ratings laid out as (item x rater)
#[derive(Debug, Clone)]
pub struct RatingMatrix {
    axes: Axes,
    values: Array2<Score>,
}

impl RatingMatrix {
    /// The item universe is every item any rater rated plus every item the
    /// reference user rated.
    pub fn build(raw: &RawRatingMatrix, reference: &ReferenceRatings) -> Self {
        let items = collect_items(raw, reference);
        let raters: Vec<RaterId> = raw.keys().cloned().collect();
        let axes = Axes::new(items, raters);

        let mut values = Array2::from_elem((axes.items.len(), axes.raters.len()), Score::Absent);
        for (j, ratings) in raw.values().enumerate() {
            for (item, &raw_value) in ratings {
                let i = axes.item_to_idx[item];
                values[[i, j]] = Score::from_value(raw_value);
            }
        }

        debug!(
            "Built rating matrix: {} items x {} raters",
            axes.items.len(),
            axes.raters.len()
        );

        Self { axes, values }
    }

    pub fn items(&self) -> &[ItemId] {
        &self.axes.items
    }

    pub fn raters(&self) -> &[RaterId] {
        &self.axes.raters
    }

    pub fn get(&self, item: &str, rater: &str) -> Score {
        lookup(&self.axes, &self.values, item, rater)
    }

    /// Per-rater z-scores. Each column only ever sees its own present values.
    pub fn normalize(&self) -> NormalizedMatrix {
        let mut values = self.values.clone();
        let mut degenerate = Vec::new();

        for j in 0..self.axes.raters.len() {
            if !normalize_column(values.column_mut(j)) {
                warn!(
                    "Rater {} has no rating variance, treating all of their ratings as absent",
                    self.axes.raters[j]
                );
                degenerate.push(j);
            }
        }

        let coverage = (0..self.axes.raters.len())
            .map(|j| values.column(j).iter().filter(|s| s.is_present()).count())
            .collect();

        NormalizedMatrix {
            axes: self.axes.clone(),
            values,
            coverage,
            degenerate,
        }
    }
}

fn collect_items(raw: &RawRatingMatrix, reference: &ReferenceRatings) -> Vec<ItemId> {
    let items: BTreeSet<&ItemId> = raw
        .values()
        .flat_map(|ratings| ratings.keys())
        .chain(reference.keys())
        .collect();

    items.into_iter().cloned().collect()
}

fn lookup(axes: &Axes, values: &Array2<Score>, item: &str, rater: &str) -> Score {
    match (axes.item_to_idx.get(item), axes.rater_to_idx.get(rater)) {
        (Some(&i), Some(&j)) => values[[i, j]],
        _ => Score::Absent,
    }
}

/// Z-scored view of a [`RatingMatrix`] plus the counts derived from it
#[derive(Debug, Clone)]
pub struct NormalizedMatrix {
    axes: Axes,
    values: Array2<Score>,
    coverage: Vec<usize>,
    degenerate: Vec<usize>,
}

impl NormalizedMatrix {
    pub fn items(&self) -> &[ItemId] {
        &self.axes.items
    }

    pub fn raters(&self) -> &[RaterId] {
        &self.axes.raters
    }

    pub fn n_items(&self) -> usize {
        self.axes.items.len()
    }

    pub fn n_raters(&self) -> usize {
        self.axes.raters.len()
    }

    pub fn item_index(&self, item: &str) -> Option<usize> {
        self.axes.item_to_idx.get(item).copied()
    }

    pub fn rater_index(&self, rater: &str) -> Option<usize> {
        self.axes.rater_to_idx.get(rater).copied()
    }

    pub fn get(&self, item: &str, rater: &str) -> Score {
        lookup(&self.axes, &self.values, item, rater)
    }

    pub(crate) fn at(&self, item_idx: usize, rater_idx: usize) -> Score {
        self.values[[item_idx, rater_idx]]
    }

    /// Number of present normalized ratings of the rater at `rater_idx`
    pub(crate) fn coverage_at(&self, rater_idx: usize) -> usize {
        self.coverage[rater_idx]
    }

    pub fn rater_coverage(&self, rater: &str) -> Option<usize> {
        self.rater_index(rater).map(|j| self.coverage[j])
    }

    /// How many raters have a usable rating for each item, in item order
    pub fn item_coverage(&self) -> Vec<(&str, usize)> {
        self.axes
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let count = self.values.row(i).iter().filter(|s| s.is_present()).count();
                (item.as_str(), count)
            })
            .collect()
    }

    /// Raters whose ratings had no variance
    pub fn degenerate_raters(&self) -> Vec<&str> {
        self.degenerate
            .iter()
            .map(|&j| self.axes.raters[j].as_str())
            .collect()
    }
}

/// Builds the matrix and normalizes it in one go
pub fn normalize_ratings(raw: &RawRatingMatrix, reference: &ReferenceRatings) -> NormalizedMatrix {
    RatingMatrix::build(raw, reference).normalize()
}
