use log::{debug, info};
use rayon::prelude::*;

use super::evaluator::CandidateEvaluator;
use super::types::{CandidatePool, ChosenSet};
use crate::config::settings::RankingSettings;

/// Everything one round needs: who is ranked so far and who is left
#[derive(Debug, Clone, PartialEq)]
pub struct RankingState {
    chosen: ChosenSet,
    chosen_idx: Vec<usize>,
    pool: CandidatePool,
}

impl RankingState {
    pub fn chosen(&self) -> &ChosenSet {
        &self.chosen
    }

    pub fn pool(&self) -> &CandidatePool {
        &self.pool
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RankerState {
    Running(RankingState),
    Done(ChosenSet),
}

impl RankerState {
    fn from_state(state: RankingState) -> Self {
        if state.pool.is_empty() {
            RankerState::Done(state.chosen)
        } else {
            RankerState::Running(state)
        }
    }
}

/// Greedy forward selection: each round adds the candidate whose inclusion
/// gives the lowest evaluation.
pub struct GreedyRanker<'a> {
    evaluator: CandidateEvaluator<'a>,
    score_decimals: i32,
    parallel: bool,
}

impl<'a> GreedyRanker<'a> {
    pub fn new(evaluator: CandidateEvaluator<'a>, settings: &RankingSettings) -> Self {
        Self {
            evaluator,
            score_decimals: settings.score_decimals,
            parallel: settings.parallel,
        }
    }

    /// Every rater of the matrix starts in the pool
    pub fn start(&self) -> RankerState {
        let pool: CandidatePool = (0..self.evaluator.matrix().n_raters()).collect();
        RankerState::from_state(RankingState {
            chosen: ChosenSet::new(),
            chosen_idx: Vec::new(),
            pool,
        })
    }

    /// Runs one round: moves exactly one candidate from the pool to the chosen set
    pub fn step(&self, state: RankingState) -> RankerState {
        let evaluations = self.evaluate_pool(&state);
        let Some((best, score)) = select_best(&evaluations) else {
            return RankerState::Done(state.chosen);
        };

        let RankingState {
            chosen,
            mut chosen_idx,
            mut pool,
        } = state;

        let rater = self.evaluator.matrix().raters()[best].clone();
        let rounded = round_score(score, self.score_decimals);
        info!("Round {}: {} ({})", chosen.len() + 1, rater, rounded);

        pool.remove(&best);
        chosen_idx.push(best);

        RankerState::from_state(RankingState {
            chosen: chosen.with_entry(rater, rounded),
            chosen_idx,
            pool,
        })
    }

    /// Full ordering of all raters, best first
    pub fn rank(&self) -> ChosenSet {
        let mut state = self.start();
        loop {
            match state {
                RankerState::Running(running) => state = self.step(running),
                RankerState::Done(chosen) => return chosen,
            }
        }
    }

    fn evaluate_pool(&self, state: &RankingState) -> Vec<(usize, f64)> {
        let candidates: Vec<usize> = state.pool.iter().copied().collect();
        debug!("Evaluating {} candidates", candidates.len());

        let evaluate = |&candidate: &usize| {
            let score = self.evaluator.evaluate_index(&state.chosen_idx, candidate);
            (candidate, sanitize(score))
        };

        if self.parallel {
            candidates.par_iter().map(evaluate).collect()
        } else {
            candidates.iter().map(evaluate).collect()
        }
    }
}

fn sanitize(score: f64) -> f64 {
    if score.is_nan() { f64::INFINITY } else { score }
}

/// Strict minimum; on ties the earliest candidate (lexically smallest rater) wins
fn select_best(evaluations: &[(usize, f64)]) -> Option<(usize, f64)> {
    evaluations.iter().copied().fold(None, |best, (candidate, score)| match best {
        Some((_, best_score)) if score.total_cmp(&best_score).is_ge() => best,
        _ => Some((candidate, score)),
    })
}

/// Halves go to the even neighbour (0.125 -> 0.12); non-finite scores pass through
fn round_score(score: f64, decimals: i32) -> f64 {
    if !score.is_finite() {
        return score;
    }
    let factor = 10f64.powi(decimals);
    (score * factor).round_ties_even() / factor
}
