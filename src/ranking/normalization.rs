use super::types::{ItemId, ReferenceRatings, Score};
use std::collections::BTreeMap;

/// Mean and population standard deviation over the present values of one column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStats {
    pub mean: f64,
    pub std_dev: f64,
    pub count: usize,
}

impl ColumnStats {
    /// Fewer than two distinct values leave nothing to scale by
    pub fn is_degenerate(&self) -> bool {
        self.std_dev.is_nan() || self.std_dev <= 0.0
    }
}

pub fn column_stats<'a, I>(scores: I) -> Option<ColumnStats>
where
    I: IntoIterator<Item = &'a Score>,
{
    let values: Vec<f64> = scores.into_iter().filter_map(|s| s.value()).collect();
    if values.is_empty() {
        return None;
    }

    let mean = calculate_mean(&values);
    let std_dev = calculate_std_dev(&values, mean);

    Some(ColumnStats {
        mean,
        std_dev,
        count: values.len(),
    })
}

/// Rewrites every present score as a z-score of its own column.
/// Returns false when the column is degenerate, in which case all of its
/// scores become absent.
pub fn normalize_column<'a, I>(scores: I) -> bool
where
    I: IntoIterator<Item = &'a mut Score>,
{
    let mut column: Vec<&mut Score> = scores.into_iter().collect();
    let stats = column_stats(column.iter().map(|s| &**s));

    match stats {
        Some(stats) if !stats.is_degenerate() => {
            for score in column.iter_mut() {
                **score = transform_score(**score, &stats);
            }
            true
        }
        _ => {
            for score in column.iter_mut() {
                **score = Score::Absent;
            }
            false
        }
    }
}

/// Same transform for the reference user, done as its own independent pass
pub fn normalize_reference(ratings: &ReferenceRatings) -> BTreeMap<ItemId, Score> {
    let mut scores: BTreeMap<ItemId, Score> = ratings
        .iter()
        .map(|(item, &raw)| (item.clone(), Score::from_value(raw)))
        .collect();

    normalize_column(scores.values_mut());
    scores
}

fn calculate_mean(values: &[f64]) -> f64 {
    let sum: f64 = values.iter().sum();
    sum / values.len() as f64
}

fn calculate_std_dev(values: &[f64], mean: f64) -> f64 {
    let variance = calculate_variance(values, mean);
    variance.sqrt()
}

fn calculate_variance(values: &[f64], mean: f64) -> f64 {
    let sum_sq_diff: f64 = values
        .iter()
        .map(|&v| (v - mean).powi(2))
        .sum();

    sum_sq_diff / values.len() as f64
}

fn transform_score(score: Score, stats: &ColumnStats) -> Score {
    match score {
        Score::Present(v) => Score::from_value((v - stats.mean) / stats.std_dev),
        Score::Absent => Score::Absent,
    }
}
