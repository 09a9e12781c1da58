use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{RateRecipeRequest, RatingHistory, RatingSubmitted, UserRatingHistory},
    routes::AppState,
    services::ratings,
};

/// Handler for a recipe's rating history
pub async fn history(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(recipe_id): Path<Uuid>,
) -> AppResult<Json<RatingHistory>> {
    tracing::info!(
        request_id = %request_id,
        recipe_id = %recipe_id,
        "Fetching rating history"
    );

    let history = ratings::rating_history(state.repository.as_ref(), recipe_id).await?;
    Ok(Json(history))
}

/// Handler for rating a recipe
pub async fn rate(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(recipe_id): Path<Uuid>,
    Json(request): Json<RateRecipeRequest>,
) -> AppResult<(StatusCode, Json<RatingSubmitted>)> {
    tracing::info!(
        request_id = %request_id,
        recipe_id = %recipe_id,
        rating = request.rating,
        "Processing rating"
    );

    let submitted = ratings::submit_rating(state.repository.as_ref(), recipe_id, request).await?;
    Ok((StatusCode::CREATED, Json(submitted)))
}

/// Handler for one user's rating history
pub async fn user_history(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(user_id): Path<String>,
) -> AppResult<Json<UserRatingHistory>> {
    tracing::info!(request_id = %request_id, user_id = %user_id, "Fetching user ratings");

    let history = ratings::user_rating_history(state.repository.as_ref(), &user_id).await?;
    Ok(Json(history))
}
