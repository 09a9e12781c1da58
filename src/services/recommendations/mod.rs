use chrono::{Datelike, Days, NaiveDate};
use std::time::Instant;
use uuid::Uuid;

use crate::{
    db::RecipeRepository,
    error::AppResult,
    models::{Assignment, Rating, Recipe, RecommendationList, RecommendedRecipe},
};

pub mod aggregator;
pub mod ranker;
pub mod scorer;

pub use aggregator::aggregate;
pub use ranker::rank;
pub use scorer::score;

/// Ranks every saved recipe for the week starting on `week_start`
///
/// Reads a fresh snapshot from the repository, then runs the pure pipeline:
/// 1. Aggregate ratings and assignments into per-recipe signals
/// 2. Score each signal
/// 3. Rank by score, then average rating
///
/// Storage failures are returned before any scoring happens.
pub async fn recommend(
    repository: &dyn RecipeRepository,
    week_start: NaiveDate,
) -> AppResult<RecommendationList> {
    let start = Instant::now();
    tracing::info!(week_start = %week_start, "Generating recipe recommendations");

    let recipes = repository.list_recipes().await?;
    let recipe_ids: Vec<Uuid> = recipes.iter().map(|r| r.id).collect();
    let ratings = repository.list_ratings_for(&recipe_ids).await?;
    let assignments = repository.list_assignments().await?;

    tracing::debug!(
        recipes = recipes.len(),
        ratings = ratings.len(),
        assignments = assignments.len(),
        "Snapshot loaded"
    );

    let list = recommend_from_snapshot(recipes, &ratings, &assignments, week_start);

    tracing::info!(
        total_recipes = list.total_recipes,
        processing_time_ms = start.elapsed().as_millis(),
        "Recommendations generated"
    );

    Ok(list)
}

/// Runs aggregation, scoring and ranking over an in-hand snapshot
pub fn recommend_from_snapshot(
    recipes: Vec<Recipe>,
    ratings: &[Rating],
    assignments: &[Assignment],
    week_start: NaiveDate,
) -> RecommendationList {
    let scored = aggregate(recipes, ratings, assignments)
        .into_iter()
        .map(|signal| score(signal, week_start))
        .collect();

    let recipes: Vec<RecommendedRecipe> = rank(scored)
        .into_iter()
        .map(RecommendedRecipe::from)
        .collect();

    RecommendationList {
        week_start_date: week_start,
        total_recipes: recipes.len(),
        recipes,
    }
}

/// The Monday after `today`; a Monday maps to the following week's Monday
pub fn next_monday(today: NaiveDate) -> NaiveDate {
    let days_until = 7 - today.weekday().num_days_from_monday();
    today + Days::new(u64::from(days_until))
}

/// Rounds to one decimal place, sending exact halves to the even neighbour
pub(crate) fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
