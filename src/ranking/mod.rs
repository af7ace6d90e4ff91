pub mod evaluator;
pub mod greedy;
pub mod matrix;
pub mod normalization;
pub mod predictor;
pub mod reference;
pub mod scorer;
pub mod types;

pub use evaluator::CandidateEvaluator;
pub use greedy::{GreedyRanker, RankerState, RankingState};
pub use matrix::{normalize_ratings, NormalizedMatrix, RatingMatrix};
pub use reference::ReferenceSet;
pub use types::{ChosenSet, RankedRater, RawRatingMatrix, ReferenceRatings, Score};

use crate::config::overrides::SpecialOverrides;
use crate::config::settings::RankingSettings;
use crate::errors::RankingError;

/// Result of a ranking run together with the intermediate data behind it
#[derive(Debug, Clone)]
pub struct RankingOutcome {
    pub ranking: ChosenSet,
    pub normalized: NormalizedMatrix,
    pub reference: ReferenceSet,
}

/// Collects the inputs of a ranking run. The rating matrix and the reference
/// ratings are required; overrides and settings fall back to empty/defaults.
#[derive(Debug, Default)]
pub struct RankingInputs {
    matrix: Option<RawRatingMatrix>,
    reference: Option<ReferenceRatings>,
    overrides: SpecialOverrides,
    settings: RankingSettings,
}

impl RankingInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_matrix(mut self, matrix: RawRatingMatrix) -> Self {
        self.matrix = Some(matrix);
        self
    }

    pub fn with_reference(mut self, reference: ReferenceRatings) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn with_overrides(mut self, overrides: SpecialOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn with_settings(mut self, settings: RankingSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn run(self) -> Result<RankingOutcome, RankingError> {
        let raw = self.matrix.ok_or(RankingError::MissingInput("rating matrix"))?;
        let reference_ratings = self
            .reference
            .ok_or(RankingError::MissingInput("reference ratings"))?;

        let normalized = normalize_ratings(&raw, &reference_ratings);
        let reference = ReferenceSet::from_ratings(&reference_ratings);

        let evaluator = CandidateEvaluator::new(&normalized, &reference, &self.overrides, &self.settings);
        let ranking = GreedyRanker::new(evaluator, &self.settings).rank();

        Ok(RankingOutcome {
            ranking,
            normalized,
            reference,
        })
    }
}
