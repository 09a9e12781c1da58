use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::RecommendationList,
    routes::AppState,
    services::recommendations,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationQuery {
    pub week_start: Option<String>,
}

/// Handler for recommended recipes endpoint
pub async fn recommended(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationList>> {
    let week_start = resolve_week_start(query.week_start.as_deref(), Utc::now().date_naive());

    tracing::info!(
        request_id = %request_id,
        week_start = %week_start,
        "Processing recommendation request"
    );

    let list = recommendations::recommend(state.repository.as_ref(), week_start).await?;

    tracing::info!(
        request_id = %request_id,
        total_recipes = list.total_recipes,
        "Recommendation request completed"
    );

    Ok(Json(list))
}

/// Picks the week to plan for
///
/// Accepts a plain date or an RFC 3339 timestamp. Anything else, including a
/// missing value, falls back to the Monday after `today`.
fn resolve_week_start(raw: Option<&str>, today: NaiveDate) -> NaiveDate {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return recommendations::next_monday(today);
    };

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date;
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return timestamp.date_naive();
    }

    tracing::warn!(week_start = %raw, "Unparseable weekStart, defaulting to next Monday");
    recommendations::next_monday(today)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        // A Thursday
        NaiveDate::from_ymd_opt(2026, 10, 22).unwrap()
    }

    #[test]
    fn test_explicit_date_is_used_as_is() {
        let resolved = resolve_week_start(Some("2026-02-09"), today());
        assert_eq!(resolved, NaiveDate::from_ymd_opt(2026, 2, 9).unwrap());
    }

    #[test]
    fn test_timestamp_is_truncated_to_date() {
        let resolved = resolve_week_start(Some("2026-02-09T00:00:00Z"), today());
        assert_eq!(resolved, NaiveDate::from_ymd_opt(2026, 2, 9).unwrap());
    }

    #[test]
    fn test_missing_or_bad_value_defaults_to_next_monday() {
        let next_monday = NaiveDate::from_ymd_opt(2026, 10, 26).unwrap();
        assert_eq!(resolve_week_start(None, today()), next_monday);
        assert_eq!(resolve_week_start(Some(""), today()), next_monday);
        assert_eq!(resolve_week_start(Some("next week"), today()), next_monday);
    }
}
