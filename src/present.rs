//! Result derivation: per-category rows, winner selection, reveal timing.

use std::time::Duration;

use crate::models::Category;
use crate::scoring::ScoreVector;

/// Delay between making the result visible and applying its reveal
/// effect, so the visibility change can settle first.
pub const REVEAL_DELAY: Duration = Duration::from_millis(100);

/// Score row addressed at one category's display target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryScore {
    pub name: String,
    pub target: String,
    pub score: i32,
}

/// Everything the rendering collaborator needs to show a result: the
/// per-target score rows, the winning category names, and the deferred
/// reveal effect it should schedule after making the result visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderInstruction {
    pub rows: Vec<CategoryScore>,
    pub top_score: i32,
    /// All categories at the maximum, in configured order. Ties are not
    /// broken.
    pub winners: Vec<String>,
    /// Winner names joined with `" & "`.
    pub headline: String,
    pub reveal_delay: Duration,
}

/// Derive the displayable result from a score vector. Pure; the render
/// and reveal side effects belong to the caller.
pub fn present(categories: &[Category], scores: &ScoreVector) -> RenderInstruction {
    let rows: Vec<CategoryScore> = categories
        .iter()
        .zip(scores.values())
        .map(|(category, &score)| CategoryScore {
            name: category.name.clone(),
            target: category.target.clone(),
            score,
        })
        .collect();

    let top_score = scores.max();
    let winners: Vec<String> = rows
        .iter()
        .filter(|row| row.score == top_score)
        .map(|row| row.name.clone())
        .collect();
    let headline = winners.join(" & ");

    RenderInstruction {
        rows,
        top_score,
        winners,
        headline,
        reveal_delay: REVEAL_DELAY,
    }
}
