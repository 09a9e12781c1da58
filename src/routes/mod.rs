use axum::{
    http::StatusCode,
    middleware,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    db::RecipeRepository,
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
};

pub mod meal_plans;
pub mod ratings;
pub mod recipes;
pub mod recommendations;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn RecipeRepository>,
}

impl AppState {
    pub fn new(repository: Arc<dyn RecipeRepository>) -> Self {
        Self { repository }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(Arc::new(state))
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/recipes", get(recipes::list).post(recipes::create))
        .route("/recipes/recommended", get(recommendations::recommended))
        .route("/recipes/:id", get(recipes::get))
        .route("/recipes/:id/ratings", get(ratings::history).post(ratings::rate))
        .route("/users/:user_id/ratings", get(ratings::user_history))
        .route("/meal-plans", get(meal_plans::list).post(meal_plans::create))
        .route("/meal-plans/:id", get(meal_plans::get))
        .route("/meal-plans/:id/recipes", post(meal_plans::add_recipe))
        .route("/meal-plans/:id/recipes/:day", delete(meal_plans::remove_recipe))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryRecipeRepository;
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    fn app() -> Router {
        create_router(AppState::new(Arc::new(InMemoryRecipeRepository::new())))
    }

    #[tokio::test]
    async fn test_health_route() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_malformed_recipe_id_is_rejected() {
        let response = app()
            .oneshot(
                Request::get("/api/v1/recipes/not-a-uuid/ratings")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_recommended_is_not_taken_as_a_recipe_id() {
        let response = app()
            .oneshot(
                Request::get("/api/v1/recipes/recommended")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_malformed_plan_day_is_rejected() {
        let uri = format!("/api/v1/meal-plans/{}/recipes/tuesday", uuid::Uuid::new_v4());
        let response = app()
            .oneshot(Request::delete(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = app()
            .oneshot(Request::get("/api/v1/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
