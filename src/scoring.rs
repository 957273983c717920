//! Per-category score accumulation.

use thiserror::Error;

use crate::registry::AnswerRegistry;

/// Scoring aborts when a selected answer's weight tuple does not cover
/// every category. This is an authoring defect, not a user error, and is
/// never absorbed silently.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScoreError {
    #[error("question {question}: answer covers {found} categories, expected {expected}")]
    CategoryMismatch {
        question: usize,
        expected: usize,
        found: usize,
    },
}

/// Accumulated per-category totals, in category order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreVector(Vec<i32>);

impl ScoreVector {
    pub fn zeroed(categories: usize) -> Self {
        Self(vec![0; categories])
    }

    pub fn values(&self) -> &[i32] {
        &self.0
    }

    pub fn max(&self) -> i32 {
        self.0.iter().copied().max().unwrap_or(0)
    }

    fn add(&mut self, weights: &[i32]) {
        for (total, weight) in self.0.iter_mut().zip(weights) {
            *total += weight;
        }
    }
}

impl From<Vec<i32>> for ScoreVector {
    fn from(values: Vec<i32>) -> Self {
        Self(values)
    }
}

/// Sum the selected weight tuples element-wise across all questions in
/// ascending order. Unanswered questions contribute nothing; after a
/// successful completeness check there are none, but gaps are tolerated.
/// Deterministic in the registry state.
pub fn compute_scores(
    registry: &AnswerRegistry,
    categories: usize,
) -> Result<ScoreVector, ScoreError> {
    let mut scores = ScoreVector::zeroed(categories);
    for question in 1..=registry.total() {
        let Some(choice) = registry.selection(question) else {
            continue;
        };
        let weights = choice.weights();
        if weights.len() != categories {
            return Err(ScoreError::CategoryMismatch {
                question,
                expected: categories,
                found: weights.len(),
            });
        }
        scores.add(weights.as_slice());
    }
    Ok(scores)
}
