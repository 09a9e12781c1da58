use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{AssignRecipeRequest, CreateMealPlanRequest, MealPlan, MealPlanDetail, MealPlanList},
    routes::AppState,
    services::meal_plans,
};

/// Handler for creating a meal plan
pub async fn create(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<CreateMealPlanRequest>,
) -> AppResult<(StatusCode, Json<MealPlan>)> {
    tracing::info!(
        request_id = %request_id,
        start_date = %request.start_date,
        "Creating meal plan"
    );

    let plan = meal_plans::create_meal_plan(state.repository.as_ref(), request).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<Json<MealPlanList>> {
    tracing::info!(request_id = %request_id, "Listing meal plans");

    let list = meal_plans::list_meal_plans(state.repository.as_ref()).await?;
    Ok(Json(list))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(meal_plan_id): Path<Uuid>,
) -> AppResult<Json<MealPlanDetail>> {
    tracing::info!(request_id = %request_id, meal_plan_id = %meal_plan_id, "Fetching meal plan");

    let detail = meal_plans::get_meal_plan(state.repository.as_ref(), meal_plan_id).await?;
    Ok(Json(detail))
}

/// Handler for putting a recipe on a plan day
pub async fn add_recipe(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(meal_plan_id): Path<Uuid>,
    Json(request): Json<AssignRecipeRequest>,
) -> AppResult<Json<MealPlanDetail>> {
    tracing::info!(
        request_id = %request_id,
        meal_plan_id = %meal_plan_id,
        recipe_id = %request.recipe_id,
        day = %request.day,
        "Assigning recipe"
    );

    let detail =
        meal_plans::assign_recipe(state.repository.as_ref(), meal_plan_id, request).await?;
    Ok(Json(detail))
}

/// Handler for clearing a plan day
pub async fn remove_recipe(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path((meal_plan_id, day)): Path<(Uuid, NaiveDate)>,
) -> AppResult<StatusCode> {
    tracing::info!(
        request_id = %request_id,
        meal_plan_id = %meal_plan_id,
        day = %day,
        "Removing recipe from meal plan"
    );

    meal_plans::remove_recipe(state.repository.as_ref(), meal_plan_id, day).await?;
    Ok(StatusCode::NO_CONTENT)
}
