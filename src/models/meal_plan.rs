use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Recipe;

/// Status given to every newly created plan
pub const DRAFT_STATUS: &str = "Draft";

/// Length of a plan created without an end date
pub const DEFAULT_PLAN_DAYS: u64 = 7;

/// A named range of days, one dinner per day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    pub id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_by: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl MealPlan {
    pub fn new(
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        created_by: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            start_date,
            end_date,
            created_by,
            status: DRAFT_STATUS.to_string(),
            created_at: Utc::now(),
        }
    }

    /// Number of calendar days covered, both ends included
    pub fn total_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day <= self.end_date
    }

    /// Every day of the plan in order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start_date
            .iter_days()
            .take_while(move |day| *day <= self.end_date)
    }
}

/// Falls back to a one-week plan when no end date is given
pub fn default_end_date(start_date: NaiveDate) -> NaiveDate {
    start_date + Days::new(DEFAULT_PLAN_DAYS - 1)
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMealPlanRequest {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRecipeRequest {
    pub recipe_id: Uuid,
    pub day: NaiveDate,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanSummary {
    #[serde(flatten)]
    pub plan: MealPlan,
    pub total_days: i64,
    pub recipes_assigned: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanList {
    pub total_meal_plans: usize,
    pub meal_plans: Vec<MealPlanSummary>,
}

/// A plan laid out day by day, with empty days included
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanDetail {
    #[serde(flatten)]
    pub plan: MealPlan,
    pub total_days: i64,
    pub recipes_assigned: usize,
    pub days: Vec<PlanDay>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanDay {
    pub date: NaiveDate,
    pub day_of_week: String,
    pub recipe: Option<PlannedRecipe>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlannedRecipe {
    pub recipe_id: Uuid,
    pub title: String,
    pub image_url: Option<String>,
    pub cuisine_type: Option<String>,
    pub prep_time_minutes: Option<i32>,
    pub cook_time_minutes: Option<i32>,
}

impl From<&Recipe> for PlannedRecipe {
    fn from(recipe: &Recipe) -> Self {
        Self {
            recipe_id: recipe.id,
            title: recipe.title.clone(),
            image_url: recipe.image_url.clone(),
            cuisine_type: recipe.cuisine_type.clone(),
            prep_time_minutes: recipe.prep_time_minutes,
            cook_time_minutes: recipe.cook_time_minutes,
        }
    }
}
