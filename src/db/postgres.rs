use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{postgres::PgPoolOptions, FromRow, PgPool};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Assignment, FrequencyPreference, MealPlan, Rating, Recipe},
};

use super::RecipeRepository;

/// Creates a PostgreSQL connection pool
pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    Ok(pool)
}

#[derive(Debug, FromRow)]
struct RecipeRow {
    id: Uuid,
    title: String,
    image_url: Option<String>,
    cuisine_type: Option<String>,
    prep_time_minutes: Option<i32>,
    cook_time_minutes: Option<i32>,
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        Recipe {
            id: row.id,
            title: row.title,
            image_url: row.image_url,
            cuisine_type: row.cuisine_type,
            prep_time_minutes: row.prep_time_minutes,
            cook_time_minutes: row.cook_time_minutes,
        }
    }
}

#[derive(Debug, FromRow)]
struct RatingRow {
    id: Uuid,
    recipe_id: Uuid,
    user_id: String,
    rating: i16,
    comments: Option<String>,
    frequency_preference: Option<String>,
    rated_at: DateTime<Utc>,
}

impl From<RatingRow> for Rating {
    fn from(row: RatingRow) -> Self {
        Rating {
            id: row.id,
            recipe_id: row.recipe_id,
            user_id: row.user_id,
            value: row.rating,
            comments: row.comments,
            frequency_preference: FrequencyPreference::parse_lenient(
                row.frequency_preference.as_deref(),
            ),
            rated_at: row.rated_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct AssignmentRow {
    meal_plan_id: Uuid,
    recipe_id: Uuid,
    day: NaiveDate,
}

impl From<AssignmentRow> for Assignment {
    fn from(row: AssignmentRow) -> Self {
        Assignment {
            meal_plan_id: row.meal_plan_id,
            recipe_id: row.recipe_id,
            day: row.day,
        }
    }
}

#[derive(Debug, FromRow)]
struct MealPlanRow {
    id: Uuid,
    name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    created_by: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
}

impl From<MealPlanRow> for MealPlan {
    fn from(row: MealPlanRow) -> Self {
        MealPlan {
            id: row.id,
            name: row.name,
            start_date: row.start_date,
            end_date: row.end_date,
            created_by: row.created_by,
            status: row.status,
            created_at: row.created_at,
        }
    }
}

/// Recipe repository backed by PostgreSQL
#[derive(Clone)]
pub struct PgRecipeRepository {
    pool: PgPool,
}

impl PgRecipeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies the embedded schema migrations
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl RecipeRepository for PgRecipeRepository {
    async fn list_recipes(&self) -> AppResult<Vec<Recipe>> {
        let rows = sqlx::query_as::<_, RecipeRow>(
            r#"
            SELECT id, title, image_url, cuisine_type, prep_time_minutes, cook_time_minutes
            FROM recipes
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    async fn list_ratings_for(&self, recipe_ids: &[Uuid]) -> AppResult<Vec<Rating>> {
        if recipe_ids.is_empty() {
            return Ok(vec![]);
        }

        let rows = sqlx::query_as::<_, RatingRow>(
            r#"
            SELECT id, recipe_id, user_id, rating, comments, frequency_preference, rated_at
            FROM recipe_ratings
            WHERE recipe_id = ANY($1)
            ORDER BY rated_at, id
            "#,
        )
        .bind(recipe_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Rating::from).collect())
    }

    async fn list_assignments(&self) -> AppResult<Vec<Assignment>> {
        let rows = sqlx::query_as::<_, AssignmentRow>(
            r#"
            SELECT meal_plan_id, recipe_id, day
            FROM meal_plan_recipes
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Assignment::from).collect())
    }

    async fn find_recipe(&self, recipe_id: Uuid) -> AppResult<Option<Recipe>> {
        let row = sqlx::query_as::<_, RecipeRow>(
            r#"
            SELECT id, title, image_url, cuisine_type, prep_time_minutes, cook_time_minutes
            FROM recipes
            WHERE id = $1
            "#,
        )
        .bind(recipe_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Recipe::from))
    }

    async fn create_recipe(&self, recipe: &Recipe) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO recipes (id, title, image_url, cuisine_type, prep_time_minutes, cook_time_minutes)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(recipe.id)
        .bind(&recipe.title)
        .bind(&recipe.image_url)
        .bind(&recipe.cuisine_type)
        .bind(recipe.prep_time_minutes)
        .bind(recipe.cook_time_minutes)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn add_rating(&self, rating: &Rating) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO recipe_ratings (id, recipe_id, user_id, rating, comments, frequency_preference, rated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(rating.id)
        .bind(rating.recipe_id)
        .bind(&rating.user_id)
        .bind(rating.value)
        .bind(&rating.comments)
        .bind(rating.frequency_preference.map(|p| p.as_str()))
        .bind(rating.rated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_ratings_by_user(&self, user_id: &str) -> AppResult<Vec<Rating>> {
        let rows = sqlx::query_as::<_, RatingRow>(
            r#"
            SELECT id, recipe_id, user_id, rating, comments, frequency_preference, rated_at
            FROM recipe_ratings
            WHERE user_id = $1
            ORDER BY rated_at DESC, id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Rating::from).collect())
    }

    async fn create_meal_plan(&self, plan: &MealPlan) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO meal_plans (id, name, start_date, end_date, created_by, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(plan.id)
        .bind(&plan.name)
        .bind(plan.start_date)
        .bind(plan.end_date)
        .bind(&plan.created_by)
        .bind(&plan.status)
        .bind(plan.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_meal_plans(&self) -> AppResult<Vec<MealPlan>> {
        let rows = sqlx::query_as::<_, MealPlanRow>(
            r#"
            SELECT id, name, start_date, end_date, created_by, status, created_at
            FROM meal_plans
            ORDER BY start_date DESC, created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(MealPlan::from).collect())
    }

    async fn find_meal_plan(&self, meal_plan_id: Uuid) -> AppResult<Option<MealPlan>> {
        let row = sqlx::query_as::<_, MealPlanRow>(
            r#"
            SELECT id, name, start_date, end_date, created_by, status, created_at
            FROM meal_plans
            WHERE id = $1
            "#,
        )
        .bind(meal_plan_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(MealPlan::from))
    }

    async fn list_plan_assignments(&self, meal_plan_id: Uuid) -> AppResult<Vec<Assignment>> {
        let rows = sqlx::query_as::<_, AssignmentRow>(
            r#"
            SELECT meal_plan_id, recipe_id, day
            FROM meal_plan_recipes
            WHERE meal_plan_id = $1
            ORDER BY day
            "#,
        )
        .bind(meal_plan_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Assignment::from).collect())
    }

    async fn assign_recipe(&self, assignment: &Assignment) -> AppResult<bool> {
        let mut tx = self.pool.begin().await?;

        let replaced = sqlx::query(
            r#"
            UPDATE meal_plan_recipes
            SET recipe_id = $3, created_at = now()
            WHERE meal_plan_id = $1 AND day = $2
            "#,
        )
        .bind(assignment.meal_plan_id)
        .bind(assignment.day)
        .bind(assignment.recipe_id)
        .execute(&mut *tx)
        .await?
        .rows_affected()
            > 0;

        if !replaced {
            sqlx::query(
                r#"
                INSERT INTO meal_plan_recipes (id, meal_plan_id, recipe_id, day)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(assignment.meal_plan_id)
            .bind(assignment.recipe_id)
            .bind(assignment.day)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(replaced)
    }

    async fn unassign_day(&self, meal_plan_id: Uuid, day: NaiveDate) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM meal_plan_recipes
            WHERE meal_plan_id = $1 AND day = $2
            "#,
        )
        .bind(meal_plan_id)
        .bind(day)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rating_row(frequency_preference: Option<&str>) -> RatingRow {
        RatingRow {
            id: Uuid::new_v4(),
            recipe_id: Uuid::new_v4(),
            user_id: "alex".to_string(),
            rating: 5,
            comments: Some("Kids loved it".to_string()),
            frequency_preference: frequency_preference.map(str::to_string),
            rated_at: Utc::now(),
        }
    }

    #[test]
    fn test_rating_row_parses_known_frequency() {
        let rating: Rating = rating_row(Some("OnceAWeek")).into();
        assert_eq!(
            rating.frequency_preference,
            Some(FrequencyPreference::OnceAWeek)
        );
        assert_eq!(rating.value, 5);
    }

    #[test]
    fn test_rating_row_drops_unknown_frequency() {
        let rating: Rating = rating_row(Some("EveryOtherTuesday")).into();
        assert_eq!(rating.frequency_preference, None);
    }

    #[test]
    fn test_meal_plan_row_conversion() {
        let row = MealPlanRow {
            id: Uuid::new_v4(),
            name: "Week of Feb 9".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 2, 9).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 2, 15).unwrap(),
            created_by: None,
            status: "Draft".to_string(),
            created_at: Utc::now(),
        };
        let id = row.id;

        let plan: MealPlan = row.into();
        assert_eq!(plan.id, id);
        assert_eq!(plan.total_days(), 7);
        assert_eq!(plan.status, "Draft");
    }

    #[test]
    fn test_recipe_row_conversion() {
        let row = RecipeRow {
            id: Uuid::new_v4(),
            title: "Ramen".to_string(),
            image_url: Some("https://img.example/ramen.jpg".to_string()),
            cuisine_type: Some("Japanese".to_string()),
            prep_time_minutes: Some(15),
            cook_time_minutes: Some(45),
        };
        let id = row.id;

        let recipe: Recipe = row.into();
        assert_eq!(recipe.id, id);
        assert_eq!(recipe.title, "Ramen");
        assert_eq!(recipe.cook_time_minutes, Some(45));
    }
}
