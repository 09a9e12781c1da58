use chrono::NaiveDate;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Assignment, MealPlan, Rating, Recipe},
};

use super::RecipeRepository;

/// Recipe repository kept entirely in memory
///
/// Insertion order is preserved, which makes it the natural backend for
/// tests and local demos.
#[derive(Clone, Default)]
pub struct InMemoryRecipeRepository {
    inner: Arc<RwLock<InMemoryInner>>,
}

#[derive(Default)]
struct InMemoryInner {
    recipes: Vec<Recipe>,
    ratings: Vec<Rating>,
    assignments: Vec<Assignment>,
    meal_plans: Vec<MealPlan>,
}

impl InMemoryRecipeRepository {
    /// Creates an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_recipe(&self, recipe: Recipe) {
        self.inner.write().await.recipes.push(recipe);
    }

    pub async fn insert_rating(&self, rating: Rating) {
        self.inner.write().await.ratings.push(rating);
    }

    pub async fn insert_assignment(&self, assignment: Assignment) {
        self.inner.write().await.assignments.push(assignment);
    }
}

#[async_trait::async_trait]
impl RecipeRepository for InMemoryRecipeRepository {
    async fn list_recipes(&self) -> AppResult<Vec<Recipe>> {
        Ok(self.inner.read().await.recipes.clone())
    }

    async fn list_ratings_for(&self, recipe_ids: &[Uuid]) -> AppResult<Vec<Rating>> {
        let inner = self.inner.read().await;
        let mut ratings: Vec<Rating> = inner
            .ratings
            .iter()
            .filter(|rating| recipe_ids.contains(&rating.recipe_id))
            .cloned()
            .collect();

        // Stable, so ratings sharing a timestamp keep insertion order
        ratings.sort_by_key(|rating| rating.rated_at);
        Ok(ratings)
    }

    async fn list_assignments(&self) -> AppResult<Vec<Assignment>> {
        Ok(self.inner.read().await.assignments.clone())
    }

    async fn find_recipe(&self, recipe_id: Uuid) -> AppResult<Option<Recipe>> {
        let inner = self.inner.read().await;
        Ok(inner.recipes.iter().find(|r| r.id == recipe_id).cloned())
    }

    async fn create_recipe(&self, recipe: &Recipe) -> AppResult<()> {
        self.inner.write().await.recipes.push(recipe.clone());
        Ok(())
    }

    async fn add_rating(&self, rating: &Rating) -> AppResult<()> {
        self.inner.write().await.ratings.push(rating.clone());
        Ok(())
    }

    async fn list_ratings_by_user(&self, user_id: &str) -> AppResult<Vec<Rating>> {
        let inner = self.inner.read().await;
        let mut ratings: Vec<Rating> = inner
            .ratings
            .iter()
            .filter(|rating| rating.user_id == user_id)
            .cloned()
            .collect();

        ratings.sort_by(|a, b| b.rated_at.cmp(&a.rated_at));
        Ok(ratings)
    }

    async fn create_meal_plan(&self, plan: &MealPlan) -> AppResult<()> {
        self.inner.write().await.meal_plans.push(plan.clone());
        Ok(())
    }

    async fn list_meal_plans(&self) -> AppResult<Vec<MealPlan>> {
        let mut plans = self.inner.read().await.meal_plans.clone();
        plans.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        Ok(plans)
    }

    async fn find_meal_plan(&self, meal_plan_id: Uuid) -> AppResult<Option<MealPlan>> {
        let inner = self.inner.read().await;
        Ok(inner.meal_plans.iter().find(|p| p.id == meal_plan_id).cloned())
    }

    async fn list_plan_assignments(&self, meal_plan_id: Uuid) -> AppResult<Vec<Assignment>> {
        let inner = self.inner.read().await;
        let mut assignments: Vec<Assignment> = inner
            .assignments
            .iter()
            .filter(|a| a.meal_plan_id == meal_plan_id)
            .cloned()
            .collect();

        assignments.sort_by_key(|a| a.day);
        Ok(assignments)
    }

    async fn assign_recipe(&self, assignment: &Assignment) -> AppResult<bool> {
        let mut inner = self.inner.write().await;
        let existing = inner
            .assignments
            .iter()
            .position(|a| a.meal_plan_id == assignment.meal_plan_id && a.day == assignment.day);

        match existing {
            Some(index) => {
                inner.assignments[index].recipe_id = assignment.recipe_id;
                Ok(true)
            }
            None => {
                inner.assignments.push(assignment.clone());
                Ok(false)
            }
        }
    }

    async fn unassign_day(&self, meal_plan_id: Uuid, day: NaiveDate) -> AppResult<bool> {
        let mut inner = self.inner.write().await;
        let before = inner.assignments.len();
        inner
            .assignments
            .retain(|a| !(a.meal_plan_id == meal_plan_id && a.day == day));
        Ok(inner.assignments.len() < before)
    }
}
