use chrono::NaiveDate;
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::{Assignment, FrequencyPreference, Rating, Recipe, RecipeSignal};

use super::round_one_decimal;

/// Builds one signal per recipe from the rating log and assignment history
///
/// Signals come back in the same order as `recipes`. Ratings are expected in
/// log order (oldest first); that order decides frequency preference ties.
pub fn aggregate(
    recipes: Vec<Recipe>,
    ratings: &[Rating],
    assignments: &[Assignment],
) -> Vec<RecipeSignal> {
    let mut ratings_by_recipe: HashMap<Uuid, Vec<&Rating>> = HashMap::new();
    for rating in ratings {
        ratings_by_recipe
            .entry(rating.recipe_id)
            .or_default()
            .push(rating);
    }

    let last_assigned = last_assigned_days(assignments);

    recipes
        .into_iter()
        .map(|recipe| {
            let recipe_ratings = ratings_by_recipe
                .get(&recipe.id)
                .map(Vec::as_slice)
                .unwrap_or_default();

            RecipeSignal {
                average_rating: average_rating(recipe_ratings),
                rating_count: recipe_ratings.len(),
                dominant_frequency_preference: dominant_frequency(recipe_ratings),
                last_assigned_day: last_assigned.get(&recipe.id).copied(),
                recipe,
            }
        })
        .collect()
}

/// Mean star value rounded to one decimal, `0.0` when there are no ratings
pub fn average_rating(ratings: &[&Rating]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }

    let total: f64 = ratings.iter().map(|r| f64::from(r.value)).sum();
    round_one_decimal(total / ratings.len() as f64)
}

/// Most frequently stated preference; the first one seen wins a tie
pub fn dominant_frequency(ratings: &[&Rating]) -> Option<FrequencyPreference> {
    let mut tally: Vec<(FrequencyPreference, usize)> = Vec::new();
    for preference in ratings.iter().filter_map(|r| r.frequency_preference) {
        match tally.iter_mut().find(|(seen, _)| *seen == preference) {
            Some((_, count)) => *count += 1,
            None => tally.push((preference, 1)),
        }
    }

    let mut best: Option<(FrequencyPreference, usize)> = None;
    for (preference, count) in tally {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((preference, count));
        }
    }

    best.map(|(preference, _)| preference)
}

fn last_assigned_days(assignments: &[Assignment]) -> HashMap<Uuid, NaiveDate> {
    let mut last: HashMap<Uuid, NaiveDate> = HashMap::new();
    for assignment in assignments {
        last.entry(assignment.recipe_id)
            .and_modify(|day| *day = (*day).max(assignment.day))
            .or_insert(assignment.day);
    }
    last
}
