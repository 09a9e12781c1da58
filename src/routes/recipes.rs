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
    models::{CreateRecipeRequest, Recipe, RecipeList},
    routes::AppState,
    services::recipes,
};

/// Handler for listing the recipe book
pub async fn list(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<Json<RecipeList>> {
    tracing::info!(request_id = %request_id, "Listing recipes");

    let list = recipes::list_recipes(state.repository.as_ref()).await?;
    Ok(Json(list))
}

/// Handler for adding a recipe
pub async fn create(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<CreateRecipeRequest>,
) -> AppResult<(StatusCode, Json<Recipe>)> {
    tracing::info!(request_id = %request_id, "Creating recipe");

    let recipe = recipes::create_recipe(state.repository.as_ref(), request).await?;
    Ok((StatusCode::CREATED, Json(recipe)))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(recipe_id): Path<Uuid>,
) -> AppResult<Json<Recipe>> {
    tracing::info!(request_id = %request_id, recipe_id = %recipe_id, "Fetching recipe");

    let recipe = recipes::get_recipe(state.repository.as_ref(), recipe_id).await?;
    Ok(Json(recipe))
}
