use log::debug;

use super::matrix::NormalizedMatrix;
use super::predictor::Predictor;
use super::reference::ReferenceSet;
use super::scorer::Scorer;
use crate::config::overrides::SpecialOverrides;
use crate::config::settings::RankingSettings;

/// Scores "what if this candidate joined the chosen group". Lower is better.
pub struct CandidateEvaluator<'a> {
    matrix: &'a NormalizedMatrix,
    predictor: Predictor<'a>,
    scorer: Scorer,
    // (matrix row, divisor); override items outside the matrix are dropped
    overrides: Vec<(usize, f64)>,
    coverage_divisor: f64,
}

impl<'a> CandidateEvaluator<'a> {
    pub fn new(
        matrix: &'a NormalizedMatrix,
        reference: &ReferenceSet,
        overrides: &SpecialOverrides,
        settings: &RankingSettings,
    ) -> Self {
        let resolved: Vec<(usize, f64)> = overrides
            .iter()
            .filter_map(|o| matrix.item_index(&o.item).map(|idx| (idx, o.divisor)))
            .collect();

        if resolved.len() < overrides.len() {
            debug!(
                "{} of {} override items are not in the rating matrix",
                overrides.len() - resolved.len(),
                overrides.len()
            );
        }

        Self {
            matrix,
            predictor: Predictor::new(matrix, settings.uncovered_score),
            scorer: Scorer::new(matrix, reference),
            overrides: resolved,
            coverage_divisor: settings.coverage_divisor,
        }
    }

    pub fn matrix(&self) -> &NormalizedMatrix {
        self.matrix
    }

    /// Evaluates by rater name. `None` if any name is unknown.
    pub fn evaluate(&self, chosen: &[&str], candidate: &str) -> Option<f64> {
        let chosen = chosen
            .iter()
            .map(|rater| self.matrix.rater_index(rater))
            .collect::<Option<Vec<_>>>()?;
        let candidate = self.matrix.rater_index(candidate)?;
        Some(self.evaluate_index(&chosen, candidate))
    }

    /// A group that shares no item with the reference scores `+inf`
    pub fn evaluate_index(&self, chosen: &[usize], candidate: usize) -> f64 {
        let mut group = Vec::with_capacity(chosen.len() + 1);
        group.extend_from_slice(chosen);
        group.push(candidate);

        let prediction = self.predictor.predict(&group);
        let Some(base_error) = self.scorer.score(&prediction) else {
            return f64::INFINITY;
        };

        let result = base_error - self.coverage_bonus(candidate);
        result - self.override_adjustment(candidate)
    }

    fn coverage_bonus(&self, candidate: usize) -> f64 {
        let coverage = self.matrix.coverage_at(candidate) as f64;
        coverage.sqrt() / self.coverage_divisor
    }

    fn override_adjustment(&self, candidate: usize) -> f64 {
        self.overrides
            .iter()
            .filter_map(|&(idx, divisor)| {
                self.matrix.at(idx, candidate).value().map(|rating| rating / divisor)
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::matrix::normalize_ratings;
    use crate::ranking::types::{RawRatingMatrix, ReferenceRatings};
    use std::collections::BTreeMap;

    fn ratings(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_base_error_minus_coverage_bonus() {
        let mut raw = RawRatingMatrix::new();
        raw.insert("a".to_string(), ratings(&[("x", 5.0), ("y", 4.0)]));
        let matrix = normalize_ratings(&raw, &ReferenceRatings::new());
        let reference = ReferenceSet::from_normalized(vec![
            ("x".to_string(), 1.0),
            ("y".to_string(), -1.0),
        ]);
        let evaluator = CandidateEvaluator::new(
            &matrix,
            &reference,
            &SpecialOverrides::empty(),
            &RankingSettings::default(),
        );

        let score = evaluator.evaluate(&[], "a").unwrap();
        assert!((score - (0.0 - 2f64.sqrt() / 200.0)).abs() < 1e-12);
    }

    #[test]
    fn test_negative_divisor_penalizes_high_rating() {
        // Normalizes to w=+2, the rest -0.5
        let mut raw = RawRatingMatrix::new();
        raw.insert(
            "a".to_string(),
            ratings(&[("w", 5.0), ("x", 2.5), ("y", 2.5), ("z", 2.5), ("v", 2.5)]),
        );
        let matrix = normalize_ratings(&raw, &ReferenceRatings::new());
        assert!((matrix.get("w", "a").value().unwrap() - 2.0).abs() < 1e-12);

        let reference = ReferenceSet::from_normalized(vec![("x".to_string(), 0.0)]);
        let settings = RankingSettings::default();
        let plain = CandidateEvaluator::new(&matrix, &reference, &SpecialOverrides::empty(), &settings)
            .evaluate(&[], "a")
            .unwrap();

        let overrides = SpecialOverrides::from_map(ratings(&[("w", -20.0)])).unwrap();
        let adjusted = CandidateEvaluator::new(&matrix, &reference, &overrides, &settings)
            .evaluate(&[], "a")
            .unwrap();

        assert!((adjusted - plain - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_absent_override_item_contributes_nothing() {
        let mut raw = RawRatingMatrix::new();
        raw.insert("a".to_string(), ratings(&[("x", 5.0), ("y", 4.0)]));
        raw.insert("b".to_string(), ratings(&[("z", 5.0), ("y", 4.0)]));
        let matrix = normalize_ratings(&raw, &ReferenceRatings::new());
        let reference = ReferenceSet::from_normalized(vec![("y".to_string(), 0.0)]);
        let settings = RankingSettings::default();

        let plain = CandidateEvaluator::new(&matrix, &reference, &SpecialOverrides::empty(), &settings);
        let overrides = SpecialOverrides::from_map(ratings(&[("z", 10.0), ("missing", 5.0)])).unwrap();
        let adjusted = CandidateEvaluator::new(&matrix, &reference, &overrides, &settings);

        assert_eq!(plain.evaluate(&[], "a"), adjusted.evaluate(&[], "a"));
        assert_ne!(plain.evaluate(&[], "b"), adjusted.evaluate(&[], "b"));
    }

    #[test]
    fn test_more_coverage_never_scores_worse() {
        let mut raw = RawRatingMatrix::new();
        raw.insert("a".to_string(), ratings(&[("x", 5.0), ("y", 4.0)]));
        let small = normalize_ratings(&raw, &ReferenceRatings::new());
        raw.insert(
            "a".to_string(),
            ratings(&[("x", 5.0), ("y", 4.0), ("p", 5.0), ("q", 4.0)]),
        );
        let large = normalize_ratings(&raw, &ReferenceRatings::new());

        let reference = ReferenceSet::from_normalized(vec![
            ("x".to_string(), 1.0),
            ("y".to_string(), -1.0),
        ]);
        let settings = RankingSettings::default();
        let overrides = SpecialOverrides::empty();

        let small_score = CandidateEvaluator::new(&small, &reference, &overrides, &settings)
            .evaluate(&[], "a")
            .unwrap();
        let large_score = CandidateEvaluator::new(&large, &reference, &overrides, &settings)
            .evaluate(&[], "a")
            .unwrap();

        assert!(large_score < small_score);
    }

    #[test]
    fn test_empty_overlap_is_infinite() {
        let mut raw = RawRatingMatrix::new();
        raw.insert("a".to_string(), ratings(&[("x", 5.0), ("y", 4.0)]));
        let matrix = normalize_ratings(&raw, &ReferenceRatings::new());
        let evaluator = CandidateEvaluator::new(
            &matrix,
            &ReferenceSet::default(),
            &SpecialOverrides::empty(),
            &RankingSettings::default(),
        );

        assert_eq!(evaluator.evaluate(&[], "a"), Some(f64::INFINITY));
        assert_eq!(evaluator.evaluate(&[], "nobody"), None);
    }

    #[test]
    fn test_disjoint_candidate_is_scored_against_sentinel() {
        // "a" rated nothing the reference rated; the reference items are in
        // the universe, so the uncovered prediction is compared instead
        let mut raw = RawRatingMatrix::new();
        raw.insert("a".to_string(), ratings(&[("x", 5.0), ("y", 4.0)]));
        let reference_items = ratings(&[("p", 4.0), ("q", 2.0)]);
        let matrix = normalize_ratings(&raw, &reference_items);
        let reference = ReferenceSet::from_normalized(vec![
            ("p".to_string(), 1.0),
            ("q".to_string(), -1.0),
        ]);
        let evaluator = CandidateEvaluator::new(
            &matrix,
            &reference,
            &SpecialOverrides::empty(),
            &RankingSettings::default(),
        );

        // ((-1 - 1)^2 + (-1 + 1)^2) / 2 - sqrt(2) / 200
        let score = evaluator.evaluate(&[], "a").unwrap();
        assert!(score.is_finite());
        assert!((score - (2.0 - 2f64.sqrt() / 200.0)).abs() < 1e-12);
    }
}
