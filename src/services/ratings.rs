use chrono::Utc;
use std::collections::HashMap;
use uuid::Uuid;

use crate::{
    db::RecipeRepository,
    error::{AppError, AppResult},
    models::{
        FrequencyPreference, RateRecipeRequest, Rating, RatingEntry, RatingHistory,
        RatingSubmitted, UserRatingEntry, UserRatingHistory,
    },
    services::{recipes::recipe_not_found, recommendations::aggregator::average_rating},
};

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;
pub const MAX_COMMENT_LENGTH: usize = 500;

/// Appends a rating to a recipe's log and returns the updated totals
///
/// Rating again never overwrites an earlier entry; every rating counts
/// toward the average and the dominant frequency preference.
pub async fn submit_rating(
    repository: &dyn RecipeRepository,
    recipe_id: Uuid,
    request: RateRecipeRequest,
) -> AppResult<RatingSubmitted> {
    let (value, frequency_preference) = validate(&request)?;

    if repository.find_recipe(recipe_id).await?.is_none() {
        tracing::warn!(recipe_id = %recipe_id, "Rating for unknown recipe");
        return Err(recipe_not_found(recipe_id));
    }

    let rating = Rating {
        id: Uuid::new_v4(),
        recipe_id,
        user_id: request.user_id.trim().to_string(),
        value,
        comments: request.comments.filter(|c| !c.trim().is_empty()),
        frequency_preference,
        rated_at: Utc::now(),
    };
    repository.add_rating(&rating).await?;

    let ratings = repository.list_ratings_for(&[recipe_id]).await?;
    let average = average_rating(&ratings.iter().collect::<Vec<_>>());

    tracing::info!(
        recipe_id = %recipe_id,
        rating = value,
        average_rating = average,
        total_ratings = ratings.len(),
        "Rating recorded"
    );

    Ok(RatingSubmitted {
        rating_id: rating.id,
        recipe_id,
        rating: value,
        average_rating: average,
        total_ratings: ratings.len(),
    })
}

fn validate(request: &RateRecipeRequest) -> AppResult<(i16, Option<FrequencyPreference>)> {
    if request.user_id.trim().is_empty() {
        return Err(AppError::InvalidInput("userId is required".to_string()));
    }

    if !(MIN_RATING..=MAX_RATING).contains(&request.rating) {
        return Err(AppError::InvalidInput(format!(
            "Rating must be between {} and {}",
            MIN_RATING, MAX_RATING
        )));
    }

    if request
        .comments
        .as_ref()
        .is_some_and(|c| c.chars().count() > MAX_COMMENT_LENGTH)
    {
        return Err(AppError::InvalidInput(format!(
            "Comments must be {} characters or less",
            MAX_COMMENT_LENGTH
        )));
    }

    // Unlike stored values, a submitted preference must be on the allow-list
    let frequency_preference = request
        .frequency_preference
        .as_deref()
        .filter(|raw| !raw.trim().is_empty())
        .map(str::parse::<FrequencyPreference>)
        .transpose()?;

    // In range, checked above
    let value = request.rating as i16;
    Ok((value, frequency_preference))
}

/// Returns every rating recorded for a recipe, newest first
pub async fn rating_history(
    repository: &dyn RecipeRepository,
    recipe_id: Uuid,
) -> AppResult<RatingHistory> {
    if repository.find_recipe(recipe_id).await?.is_none() {
        tracing::warn!(recipe_id = %recipe_id, "Recipe not found");
        return Err(recipe_not_found(recipe_id));
    }

    let ratings = repository.list_ratings_for(&[recipe_id]).await?;
    let average = average_rating(&ratings.iter().collect::<Vec<_>>());

    Ok(RatingHistory {
        recipe_id,
        total_ratings: ratings.len(),
        average_rating: average,
        ratings: ratings.iter().rev().map(RatingEntry::from).collect(),
    })
}

/// Returns everything one user has rated, newest first
pub async fn user_rating_history(
    repository: &dyn RecipeRepository,
    user_id: &str,
) -> AppResult<UserRatingHistory> {
    let ratings = repository.list_ratings_by_user(user_id).await?;

    let titles: HashMap<Uuid, String> = if ratings.is_empty() {
        HashMap::new()
    } else {
        repository
            .list_recipes()
            .await?
            .into_iter()
            .map(|recipe| (recipe.id, recipe.title))
            .collect()
    };

    let ratings: Vec<UserRatingEntry> = ratings
        .into_iter()
        .map(|rating| UserRatingEntry {
            recipe_id: rating.recipe_id,
            recipe_title: titles.get(&rating.recipe_id).cloned(),
            rating: rating.value,
            comments: rating.comments,
            frequency_preference: rating.frequency_preference,
            rated_at: rating.rated_at,
        })
        .collect();

    Ok(UserRatingHistory {
        user_id: user_id.to_string(),
        total_ratings: ratings.len(),
        ratings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::MockRecipeRepository, models::Recipe};
    use chrono::{Duration, TimeZone, Utc};

    fn rating(recipe_id: Uuid, user_id: &str, value: i16, day: i64) -> Rating {
        Rating {
            id: Uuid::new_v4(),
            recipe_id,
            user_id: user_id.to_string(),
            value,
            comments: None,
            frequency_preference: None,
            rated_at: Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap() + Duration::days(day),
        }
    }

    #[tokio::test]
    async fn test_unknown_recipe_is_not_found() {
        let mut repo = MockRecipeRepository::new();
        repo.expect_find_recipe().returning(|_| Ok(None));
        repo.expect_list_ratings_for().never();

        let err = rating_history(&repo, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_history_is_newest_first_with_average() {
        let recipe = Recipe::new("Fajitas");
        let recipe_id = recipe.id;

        let mut repo = MockRecipeRepository::new();
        repo.expect_find_recipe()
            .returning(move |_| Ok(Some(recipe.clone())));
        repo.expect_list_ratings_for().returning(move |_| {
            Ok(vec![
                rating(recipe_id, "ana", 3, 0),
                rating(recipe_id, "ben", 4, 1),
                rating(recipe_id, "ana", 4, 2),
            ])
        });

        let history = rating_history(&repo, recipe_id).await.unwrap();
        assert_eq!(history.total_ratings, 3);
        assert_eq!(history.average_rating, 3.7);

        let values: Vec<i16> = history.ratings.iter().map(|r| r.rating).collect();
        assert_eq!(values, vec![4, 4, 3]);
        assert_eq!(history.ratings[2].user_id, "ana");
    }

    #[tokio::test]
    async fn test_unrated_recipe_has_zero_average() {
        let recipe = Recipe::new("New dish");
        let recipe_id = recipe.id;

        let mut repo = MockRecipeRepository::new();
        repo.expect_find_recipe()
            .returning(move |_| Ok(Some(recipe.clone())));
        repo.expect_list_ratings_for().returning(|_| Ok(vec![]));

        let history = rating_history(&repo, recipe_id).await.unwrap();
        assert_eq!(history.total_ratings, 0);
        assert_eq!(history.average_rating, 0.0);
        assert!(history.ratings.is_empty());
    }

    fn rate_request(rating: i32, frequency_preference: Option<&str>) -> RateRecipeRequest {
        RateRecipeRequest {
            user_id: "ana".to_string(),
            rating,
            comments: None,
            frequency_preference: frequency_preference.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_submit_appends_and_reports_totals() {
        let recipe = Recipe::new("Risotto");
        let recipe_id = recipe.id;

        let mut repo = MockRecipeRepository::new();
        repo.expect_find_recipe()
            .returning(move |_| Ok(Some(recipe.clone())));
        repo.expect_add_rating()
            .withf(move |r| {
                r.recipe_id == recipe_id
                    && r.value == 5
                    && r.frequency_preference == Some(FrequencyPreference::OnceAMonth)
            })
            .times(1)
            .returning(|_| Ok(()));
        repo.expect_list_ratings_for().returning(move |_| {
            Ok(vec![
                rating(recipe_id, "ana", 4, 0),
                rating(recipe_id, "ana", 5, 1),
            ])
        });

        let submitted = submit_rating(&repo, recipe_id, rate_request(5, Some("OnceAMonth")))
            .await
            .unwrap();
        assert_eq!(submitted.rating, 5);
        assert_eq!(submitted.total_ratings, 2);
        assert_eq!(submitted.average_rating, 4.5);
    }

    #[tokio::test]
    async fn test_submit_rejects_out_of_range_rating() {
        let mut repo = MockRecipeRepository::new();
        repo.expect_find_recipe().never();
        repo.expect_add_rating().never();

        for value in [0, 6, -1] {
            let err = submit_rating(&repo, Uuid::new_v4(), rate_request(value, None))
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::InvalidInput(_)), "rating {value}");
        }
    }

    #[tokio::test]
    async fn test_submit_rejects_unknown_frequency() {
        let mut repo = MockRecipeRepository::new();
        repo.expect_add_rating().never();

        let err = submit_rating(&repo, Uuid::new_v4(), rate_request(4, Some("Daily")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(ref msg) if msg.contains("Daily")));
    }

    #[tokio::test]
    async fn test_submit_rejects_long_comments() {
        let mut repo = MockRecipeRepository::new();
        repo.expect_add_rating().never();

        let mut request = rate_request(3, None);
        request.comments = Some("x".repeat(MAX_COMMENT_LENGTH + 1));

        let err = submit_rating(&repo, Uuid::new_v4(), request).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_submit_for_unknown_recipe_is_not_found() {
        let mut repo = MockRecipeRepository::new();
        repo.expect_find_recipe().returning(|_| Ok(None));
        repo.expect_add_rating().never();

        let err = submit_rating(&repo, Uuid::new_v4(), rate_request(4, None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_user_history_attaches_titles() {
        let recipe = Recipe::new("Gnocchi");
        let recipe_id = recipe.id;
        let orphan_id = Uuid::new_v4();

        let mut repo = MockRecipeRepository::new();
        repo.expect_list_ratings_by_user().returning(move |_| {
            Ok(vec![
                rating(recipe_id, "ana", 5, 2),
                rating(orphan_id, "ana", 2, 1),
            ])
        });
        repo.expect_list_recipes()
            .returning(move || Ok(vec![recipe.clone()]));

        let history = user_rating_history(&repo, "ana").await.unwrap();
        assert_eq!(history.user_id, "ana");
        assert_eq!(history.total_ratings, 2);
        assert_eq!(history.ratings[0].recipe_title.as_deref(), Some("Gnocchi"));
        assert_eq!(history.ratings[1].recipe_title, None);
    }
}
