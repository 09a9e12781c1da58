use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod frequency;
pub mod meal_plan;
pub mod recommendation;

pub use frequency::FrequencyPreference;
pub use meal_plan::{
    AssignRecipeRequest, CreateMealPlanRequest, MealPlan, MealPlanDetail, MealPlanList,
    MealPlanSummary, PlanDay, PlannedRecipe,
};
pub use recommendation::{
    ReasonCode, RecipeSignal, RecommendationList, RecommendedRecipe, ScoredRecipe,
};

// ============================================================================
// Stored records
// ============================================================================

/// A saved dish, as owned by the storage layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: Uuid,
    pub title: String,
    pub image_url: Option<String>,
    pub cuisine_type: Option<String>,
    pub prep_time_minutes: Option<i32>,
    pub cook_time_minutes: Option<i32>,
}

impl Recipe {
    /// Creates a recipe with only a title and no display metadata
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            image_url: None,
            cuisine_type: None,
            prep_time_minutes: None,
            cook_time_minutes: None,
        }
    }
}

/// One entry in a recipe's rating log
///
/// Ratings are append-only: a household member rating the same dish twice
/// produces two entries, and both count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rating {
    pub id: Uuid,
    pub recipe_id: Uuid,
    pub user_id: String,
    /// Star value, 1 to 5
    pub value: i16,
    pub comments: Option<String>,
    pub frequency_preference: Option<FrequencyPreference>,
    pub rated_at: DateTime<Utc>,
}

/// A recipe placed on a calendar day of some meal plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Assignment {
    pub meal_plan_id: Uuid,
    pub recipe_id: Uuid,
    pub day: NaiveDate,
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipeRequest {
    pub title: String,
    pub image_url: Option<String>,
    pub cuisine_type: Option<String>,
    pub prep_time_minutes: Option<i32>,
    pub cook_time_minutes: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateRecipeRequest {
    pub user_id: String,
    /// Star value; anything outside 1 to 5 is rejected
    pub rating: i32,
    pub comments: Option<String>,
    /// Must be one of the `FrequencyPreference` names when present
    pub frequency_preference: Option<String>,
}

// ============================================================================
// Recipe and rating responses
// ============================================================================

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    pub id: Uuid,
    pub title: String,
    pub image_url: Option<String>,
    pub cuisine_type: Option<String>,
    pub prep_time_minutes: Option<i32>,
    pub cook_time_minutes: Option<i32>,
    pub average_rating: f64,
    pub rating_count: usize,
}

impl From<RecipeSignal> for RecipeSummary {
    fn from(signal: RecipeSignal) -> Self {
        Self {
            id: signal.recipe.id,
            title: signal.recipe.title,
            image_url: signal.recipe.image_url,
            cuisine_type: signal.recipe.cuisine_type,
            prep_time_minutes: signal.recipe.prep_time_minutes,
            cook_time_minutes: signal.recipe.cook_time_minutes,
            average_rating: signal.average_rating,
            rating_count: signal.rating_count,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeList {
    pub total_recipes: usize,
    pub recipes: Vec<RecipeSummary>,
}

/// Acknowledges a new rating with the recipe's updated totals
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RatingSubmitted {
    pub rating_id: Uuid,
    pub recipe_id: Uuid,
    pub rating: i16,
    pub average_rating: f64,
    pub total_ratings: usize,
}

/// All ratings recorded for a single recipe, newest first
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RatingHistory {
    pub recipe_id: Uuid,
    pub total_ratings: usize,
    pub average_rating: f64,
    pub ratings: Vec<RatingEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RatingEntry {
    pub user_id: String,
    pub rating: i16,
    pub comments: Option<String>,
    pub frequency_preference: Option<FrequencyPreference>,
    pub rated_at: DateTime<Utc>,
}

/// Everything one user has rated, newest first
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserRatingHistory {
    pub user_id: String,
    pub total_ratings: usize,
    pub ratings: Vec<UserRatingEntry>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserRatingEntry {
    pub recipe_id: Uuid,
    /// `None` when the recipe has since been deleted
    pub recipe_title: Option<String>,
    pub rating: i16,
    pub comments: Option<String>,
    pub frequency_preference: Option<FrequencyPreference>,
    pub rated_at: DateTime<Utc>,
}

impl From<&Rating> for RatingEntry {
    fn from(rating: &Rating) -> Self {
        Self {
            user_id: rating.user_id.clone(),
            rating: rating.value,
            comments: rating.comments.clone(),
            frequency_preference: rating.frequency_preference,
            rated_at: rating.rated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_recipe_has_no_metadata() {
        let recipe = Recipe::new("Shakshuka");
        assert_eq!(recipe.title, "Shakshuka");
        assert!(recipe.image_url.is_none());
        assert!(recipe.prep_time_minutes.is_none());
    }

    #[test]
    fn test_recipe_serializes_camel_case() {
        let mut recipe = Recipe::new("Gumbo");
        recipe.cook_time_minutes = Some(90);

        let json = serde_json::to_value(&recipe).unwrap();
        assert_eq!(json["title"], "Gumbo");
        assert_eq!(json["cookTimeMinutes"], 90);
        assert!(json["imageUrl"].is_null());
    }

    #[test]
    fn test_rate_request_accepts_missing_optionals() {
        let request: RateRecipeRequest =
            serde_json::from_str(r#"{"userId": "kim", "rating": 4}"#).unwrap();
        assert_eq!(request.user_id, "kim");
        assert_eq!(request.rating, 4);
        assert!(request.comments.is_none());
        assert!(request.frequency_preference.is_none());
    }

    #[test]
    fn test_rating_entry_serializes_camel_case() {
        let rating = Rating {
            id: Uuid::new_v4(),
            recipe_id: Uuid::new_v4(),
            user_id: "sam".to_string(),
            value: 4,
            comments: None,
            frequency_preference: Some(FrequencyPreference::OnceAMonth),
            rated_at: Utc.with_ymd_and_hms(2026, 2, 1, 18, 30, 0).unwrap(),
        };

        let json = serde_json::to_value(RatingEntry::from(&rating)).unwrap();
        assert_eq!(json["userId"], "sam");
        assert_eq!(json["rating"], 4);
        assert_eq!(json["frequencyPreference"], "OnceAMonth");
        assert_eq!(json["ratedAt"], "2026-02-01T18:30:00Z");
    }
}
