use super::matrix::NormalizedMatrix;

/// Predicted score for every item of the matrix, indexed like its rows
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    scores: Vec<f64>,
}

impl Prediction {
    pub fn at(&self, item_idx: usize) -> f64 {
        self.scores[item_idx]
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.scores.iter().copied()
    }
}

/// Averages the normalized ratings of a group of raters
pub struct Predictor<'a> {
    matrix: &'a NormalizedMatrix,
    uncovered_score: f64,
}

impl<'a> Predictor<'a> {
    pub fn new(matrix: &'a NormalizedMatrix, uncovered_score: f64) -> Self {
        Self {
            matrix,
            uncovered_score,
        }
    }

    /// Items none of `group` rated get the uncovered score instead of being
    /// dropped, so blind spots count against the group.
    pub fn predict(&self, group: &[usize]) -> Prediction {
        let scores = (0..self.matrix.n_items())
            .map(|item_idx| self.predict_item(item_idx, group))
            .collect();

        Prediction { scores }
    }

    fn predict_item(&self, item_idx: usize, group: &[usize]) -> f64 {
        let (sum, count) = group
            .iter()
            .filter_map(|&rater_idx| self.matrix.at(item_idx, rater_idx).value())
            .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

        if count == 0 {
            self.uncovered_score
        } else {
            sum / count as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::matrix::normalize_ratings;
    use crate::ranking::types::{RawRatingMatrix, ReferenceRatings};

    fn matrix() -> NormalizedMatrix {
        let mut raw = RawRatingMatrix::new();
        raw.insert(
            "a".to_string(),
            [("x".to_string(), 5.0), ("y".to_string(), 4.0)].into_iter().collect(),
        );
        raw.insert(
            "b".to_string(),
            [("x".to_string(), 3.0), ("z".to_string(), 1.0)].into_iter().collect(),
        );
        raw.insert(
            "c".to_string(),
            [("x".to_string(), 2.0), ("y".to_string(), 2.0)].into_iter().collect(),
        );
        normalize_ratings(&raw, &ReferenceRatings::new())
    }

    #[test]
    fn test_mean_over_present_ratings_only() {
        let matrix = matrix();
        let predictor = Predictor::new(&matrix, -1.0);
        let a = matrix.rater_index("a").unwrap();
        let b = matrix.rater_index("b").unwrap();
        let prediction = predictor.predict(&[a, b]);

        let x = matrix.item_index("x").unwrap();
        let y = matrix.item_index("y").unwrap();
        let z = matrix.item_index("z").unwrap();
        // x: a=+1, b=+1; y: only a=-1; z: only b=-1
        assert!((prediction.at(x) - 1.0).abs() < 1e-9);
        assert!((prediction.at(y) + 1.0).abs() < 1e-9);
        assert!((prediction.at(z) + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_uncovered_items_get_sentinel() {
        let matrix = matrix();
        let predictor = Predictor::new(&matrix, -1.0);
        let a = matrix.rater_index("a").unwrap();
        let prediction = predictor.predict(&[a]);

        let z = matrix.item_index("z").unwrap();
        assert_eq!(prediction.at(z), -1.0);
        assert_eq!(prediction.len(), matrix.n_items());
    }

    #[test]
    fn test_degenerate_rater_contributes_nothing() {
        let matrix = matrix();
        let predictor = Predictor::new(&matrix, -0.5);
        let c = matrix.rater_index("c").unwrap();
        let prediction = predictor.predict(&[c]);

        assert!(prediction.iter().all(|score| score == -0.5));
    }
}
