use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uuid::Uuid;

use super::{FrequencyPreference, Recipe};

/// Machine-readable tag explaining why a recipe scored the way it did
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ReasonCode {
    HighlyRated,
    NeverRated,
    MarkedNever,
    MeetsFrequency,
    NotCookedRecently,
    NeverCooked,
}

impl ReasonCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::HighlyRated => "HighlyRated",
            ReasonCode::NeverRated => "NeverRated",
            ReasonCode::MarkedNever => "MarkedNever",
            ReasonCode::MeetsFrequency => "MeetsFrequency",
            ReasonCode::NotCookedRecently => "NotCookedRecently",
            ReasonCode::NeverCooked => "NeverCooked",
        }
    }
}

impl Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-recipe summary of the rating log and meal plan history
///
/// Recomputed on every request and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeSignal {
    pub recipe: Recipe,
    /// Mean star value rounded to one decimal, `0.0` when unrated
    pub average_rating: f64,
    pub rating_count: usize,
    pub dominant_frequency_preference: Option<FrequencyPreference>,
    pub last_assigned_day: Option<NaiveDate>,
}

/// A signal with its final score and the reasons behind it
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecipe {
    pub signal: RecipeSignal,
    pub score: f64,
    pub reason_codes: Vec<ReasonCode>,
}

/// One row of the recommendation list returned to callers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedRecipe {
    pub recipe_id: Uuid,
    pub title: String,
    pub image_url: Option<String>,
    pub cuisine_type: Option<String>,
    pub prep_time_minutes: Option<i32>,
    pub cook_time_minutes: Option<i32>,
    pub score: f64,
    pub average_rating: f64,
    pub rating_count: usize,
    pub last_cooked_date: Option<NaiveDate>,
    pub frequency_preference: Option<FrequencyPreference>,
    pub reason_codes: Vec<ReasonCode>,
}

impl From<ScoredRecipe> for RecommendedRecipe {
    fn from(scored: ScoredRecipe) -> Self {
        let ScoredRecipe {
            signal,
            score,
            reason_codes,
        } = scored;

        Self {
            recipe_id: signal.recipe.id,
            title: signal.recipe.title,
            image_url: signal.recipe.image_url,
            cuisine_type: signal.recipe.cuisine_type,
            prep_time_minutes: signal.recipe.prep_time_minutes,
            cook_time_minutes: signal.recipe.cook_time_minutes,
            score,
            average_rating: signal.average_rating,
            rating_count: signal.rating_count,
            last_cooked_date: signal.last_assigned_day,
            frequency_preference: signal.dominant_frequency_preference,
            reason_codes,
        }
    }
}

/// Ranked recipes for the week starting on `week_start_date`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationList {
    pub week_start_date: NaiveDate,
    pub total_recipes: usize,
    pub recipes: Vec<RecommendedRecipe>,
}
