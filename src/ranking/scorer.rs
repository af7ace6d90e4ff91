use super::matrix::NormalizedMatrix;
use super::predictor::Prediction;
use super::reference::ReferenceSet;

/// Mean squared error of a prediction over the items the reference user rated
pub struct Scorer {
    // (matrix row, reference score)
    targets: Vec<(usize, f64)>,
}

impl Scorer {
    pub fn new(matrix: &NormalizedMatrix, reference: &ReferenceSet) -> Self {
        let targets = reference
            .present()
            .filter_map(|(item, score)| matrix.item_index(item).map(|idx| (idx, score)))
            .collect();

        Self { targets }
    }

    /// Number of items taking part in every comparison
    pub fn overlap(&self) -> usize {
        self.targets.len()
    }

    /// `None` when the prediction and the reference share no item
    pub fn score(&self, prediction: &Prediction) -> Option<f64> {
        if self.targets.is_empty() {
            return None;
        }

        let sum_sq_diff: f64 = self
            .targets
            .iter()
            .map(|&(idx, target)| (prediction.at(idx) - target).powi(2))
            .sum();

        Some(sum_sq_diff / self.targets.len() as f64)
    }
}
