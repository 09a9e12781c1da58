use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Assignment, MealPlan, Rating, Recipe},
};

/// Access to the stored recipe book, rating log and meal plans
///
/// The recommendation engine only ever reads through this trait, so any
/// backend that can list recipes, their rating log and meal plan assignments
/// can drive it. Failures are returned as-is; callers never see partial data.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Lists every recipe in a stable order (oldest first)
    async fn list_recipes(&self) -> AppResult<Vec<Recipe>>;

    /// Lists the ratings of the given recipes, oldest first
    async fn list_ratings_for(&self, recipe_ids: &[Uuid]) -> AppResult<Vec<Rating>>;

    /// Lists every meal plan assignment
    async fn list_assignments(&self) -> AppResult<Vec<Assignment>>;

    /// Looks up a single recipe by id
    async fn find_recipe(&self, recipe_id: Uuid) -> AppResult<Option<Recipe>>;

    async fn create_recipe(&self, recipe: &Recipe) -> AppResult<()>;

    /// Appends to the rating log; earlier ratings are never replaced
    async fn add_rating(&self, rating: &Rating) -> AppResult<()>;

    /// Lists one user's ratings, newest first
    async fn list_ratings_by_user(&self, user_id: &str) -> AppResult<Vec<Rating>>;

    async fn create_meal_plan(&self, plan: &MealPlan) -> AppResult<()>;

    /// Lists every meal plan, latest start date first
    async fn list_meal_plans(&self) -> AppResult<Vec<MealPlan>>;

    async fn find_meal_plan(&self, meal_plan_id: Uuid) -> AppResult<Option<MealPlan>>;

    /// Lists the assignments of one plan in day order
    async fn list_plan_assignments(&self, meal_plan_id: Uuid) -> AppResult<Vec<Assignment>>;

    /// Puts a recipe on a plan day, replacing whatever was there
    ///
    /// Returns `true` when an earlier assignment for that day was replaced.
    async fn assign_recipe(&self, assignment: &Assignment) -> AppResult<bool>;

    /// Clears a plan day; returns `false` when nothing was assigned to it
    async fn unassign_day(&self, meal_plan_id: Uuid, day: NaiveDate) -> AppResult<bool>;
}
