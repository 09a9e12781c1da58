use uuid::Uuid;

use crate::{
    db::RecipeRepository,
    error::{AppError, AppResult},
    models::{CreateRecipeRequest, Recipe, RecipeList, RecipeSummary},
    services::recommendations::aggregate,
};

/// Saves a new recipe after trimming its text fields
pub async fn create_recipe(
    repository: &dyn RecipeRepository,
    request: CreateRecipeRequest,
) -> AppResult<Recipe> {
    let title = request.title.trim();
    if title.is_empty() {
        return Err(AppError::InvalidInput("Title is required".to_string()));
    }

    for (field, minutes) in [
        ("prepTimeMinutes", request.prep_time_minutes),
        ("cookTimeMinutes", request.cook_time_minutes),
    ] {
        if minutes.is_some_and(|m| m < 0) {
            return Err(AppError::InvalidInput(format!(
                "{} must not be negative",
                field
            )));
        }
    }

    let mut recipe = Recipe::new(title);
    recipe.image_url = non_blank(request.image_url);
    recipe.cuisine_type = non_blank(request.cuisine_type);
    recipe.prep_time_minutes = request.prep_time_minutes;
    recipe.cook_time_minutes = request.cook_time_minutes;

    repository.create_recipe(&recipe).await?;
    tracing::info!(recipe_id = %recipe.id, title = %recipe.title, "Recipe created");

    Ok(recipe)
}

/// Lists every recipe with its average rating and rating count
pub async fn list_recipes(repository: &dyn RecipeRepository) -> AppResult<RecipeList> {
    let recipes = repository.list_recipes().await?;
    let recipe_ids: Vec<Uuid> = recipes.iter().map(|r| r.id).collect();
    let ratings = repository.list_ratings_for(&recipe_ids).await?;

    let recipes: Vec<RecipeSummary> = aggregate(recipes, &ratings, &[])
        .into_iter()
        .map(RecipeSummary::from)
        .collect();

    Ok(RecipeList {
        total_recipes: recipes.len(),
        recipes,
    })
}

pub async fn get_recipe(repository: &dyn RecipeRepository, recipe_id: Uuid) -> AppResult<Recipe> {
    repository
        .find_recipe(recipe_id)
        .await?
        .ok_or_else(|| recipe_not_found(recipe_id))
}

pub(crate) fn recipe_not_found(recipe_id: Uuid) -> AppError {
    AppError::NotFound(format!("Recipe with ID {} not found", recipe_id))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::MockRecipeRepository, models::Rating};
    use chrono::Utc;

    fn request(title: &str) -> CreateRecipeRequest {
        CreateRecipeRequest {
            title: title.to_string(),
            image_url: None,
            cuisine_type: None,
            prep_time_minutes: None,
            cook_time_minutes: None,
        }
    }

    #[tokio::test]
    async fn test_create_trims_and_saves() {
        let mut repo = MockRecipeRepository::new();
        repo.expect_create_recipe()
            .withf(|recipe| recipe.title == "Lasagne" && recipe.cuisine_type.is_none())
            .times(1)
            .returning(|_| Ok(()));

        let mut req = request("  Lasagne ");
        req.cuisine_type = Some("   ".to_string());
        req.cook_time_minutes = Some(60);

        let recipe = create_recipe(&repo, req).await.unwrap();
        assert_eq!(recipe.title, "Lasagne");
        assert_eq!(recipe.cook_time_minutes, Some(60));
    }

    #[tokio::test]
    async fn test_create_rejects_blank_title() {
        let mut repo = MockRecipeRepository::new();
        repo.expect_create_recipe().never();

        let err = create_recipe(&repo, request("   ")).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_negative_times() {
        let mut repo = MockRecipeRepository::new();
        repo.expect_create_recipe().never();

        let mut req = request("Soup");
        req.prep_time_minutes = Some(-5);

        let err = create_recipe(&repo, req).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(ref msg) if msg.contains("prepTimeMinutes")));
    }

    #[tokio::test]
    async fn test_list_includes_rating_summary() {
        let rated = Recipe::new("Rated");
        let unrated = Recipe::new("Unrated");
        let rated_id = rated.id;
        let recipes = vec![rated, unrated];

        let mut repo = MockRecipeRepository::new();
        repo.expect_list_recipes()
            .returning(move || Ok(recipes.clone()));
        repo.expect_list_ratings_for().returning(move |_| {
            Ok([4, 5]
                .into_iter()
                .map(|value| Rating {
                    id: Uuid::new_v4(),
                    recipe_id: rated_id,
                    user_id: "lee".to_string(),
                    value,
                    comments: None,
                    frequency_preference: None,
                    rated_at: Utc::now(),
                })
                .collect())
        });

        let list = list_recipes(&repo).await.unwrap();
        assert_eq!(list.total_recipes, 2);
        assert_eq!(list.recipes[0].average_rating, 4.5);
        assert_eq!(list.recipes[0].rating_count, 2);
        assert_eq!(list.recipes[1].average_rating, 0.0);
        assert_eq!(list.recipes[1].rating_count, 0);
    }

    #[tokio::test]
    async fn test_get_missing_recipe_is_not_found() {
        let mut repo = MockRecipeRepository::new();
        repo.expect_find_recipe().returning(|_| Ok(None));

        let err = get_recipe(&repo, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
