use std::cmp::Ordering;

use crate::models::ScoredRecipe;

/// Orders scored recipes best first
///
/// Highest score wins, then highest average rating. The sort is stable, so
/// recipes equal on both keep their incoming order. Nothing is filtered out.
pub fn rank(mut scored: Vec<ScoredRecipe>) -> Vec<ScoredRecipe> {
    scored.sort_by(compare);
    scored
}

fn compare(a: &ScoredRecipe, b: &ScoredRecipe) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.signal.average_rating.total_cmp(&a.signal.average_rating))
}
