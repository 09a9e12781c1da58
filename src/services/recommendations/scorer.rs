//! Weighted recommendation score.
//!
//! score = rating (0-30) + frequency fit (up to 40) + recency (0-30)
//!
//! Frequency fit goes negative for a dish already planned after the week start.
//!
//! A dominant preference of `Never` forces the score to zero and skips the
//! remaining components.

use chrono::NaiveDate;

use crate::models::{FrequencyPreference, ReasonCode, RecipeSignal, ScoredRecipe};

use super::round_one_decimal;

pub const RATING_WEIGHT: f64 = 30.0;
pub const FREQUENCY_WEIGHT: f64 = 40.0;
pub const RECENCY_WEIGHT: f64 = 30.0;

/// Share of a component's weight given when there is nothing to go on
pub const NEUTRAL_SHARE: f64 = 0.5;

/// Average rating at or above which a recipe is flagged `HighlyRated`
pub const HIGHLY_RATED_THRESHOLD: f64 = 4.0;

/// A recipe with a cadence but no cooking history counts as this many
/// cadences overdue.
// Tunable; changing it reorders recommendations.
pub const NEVER_COOKED_OVERDUE_FACTOR: u32 = 2;

/// Outcome of the frequency-fit phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrequencyFit {
    /// The household asked never to see this recipe
    MarkedNever,
    Points(f64, Option<ReasonCode>),
}

/// Scores a single recipe signal for the week starting on `week_start`
pub fn score(signal: RecipeSignal, week_start: NaiveDate) -> ScoredRecipe {
    let mut reason_codes = Vec::new();
    let mut total = 0.0;

    let (rating_points, rating_reason) = rating_component(&signal);
    total += rating_points;
    reason_codes.extend(rating_reason);

    match frequency_component(&signal, week_start) {
        FrequencyFit::MarkedNever => {
            return ScoredRecipe {
                signal,
                score: 0.0,
                reason_codes: vec![ReasonCode::MarkedNever],
            };
        }
        FrequencyFit::Points(points, reason) => {
            total += points;
            reason_codes.extend(reason);
        }
    }

    let (recency_points, recency_reason) = recency_component(&signal, week_start);
    total += recency_points;
    reason_codes.extend(recency_reason);

    ScoredRecipe {
        signal,
        score: round_one_decimal(total),
        reason_codes,
    }
}

/// Scales the 1-5 star average onto 0-30 points
pub fn rating_component(signal: &RecipeSignal) -> (f64, Option<ReasonCode>) {
    if signal.rating_count == 0 {
        return (RATING_WEIGHT * NEUTRAL_SHARE, Some(ReasonCode::NeverRated));
    }

    let points = ((signal.average_rating - 1.0) / 4.0) * RATING_WEIGHT;
    let reason =
        (signal.average_rating >= HIGHLY_RATED_THRESHOLD).then_some(ReasonCode::HighlyRated);
    (points, reason)
}

/// Rewards recipes whose time since last cooking has reached their cadence
pub fn frequency_component(signal: &RecipeSignal, week_start: NaiveDate) -> FrequencyFit {
    let Some(preference) = signal.dominant_frequency_preference else {
        return FrequencyFit::Points(FREQUENCY_WEIGHT * NEUTRAL_SHARE, None);
    };

    let Some(ideal_days) = preference.ideal_days() else {
        debug_assert_eq!(preference, FrequencyPreference::Never);
        return FrequencyFit::MarkedNever;
    };
    let ideal_days = i64::from(ideal_days);

    // Negative when the dish is already planned inside the target week
    let days_since_cooked = match signal.last_assigned_day {
        Some(day) => days_between(day, week_start),
        None => ideal_days * i64::from(NEVER_COOKED_OVERDUE_FACTOR),
    };

    if days_since_cooked >= ideal_days {
        FrequencyFit::Points(FREQUENCY_WEIGHT, Some(ReasonCode::MeetsFrequency))
    } else {
        let points = (days_since_cooked as f64 / ideal_days as f64) * FREQUENCY_WEIGHT;
        FrequencyFit::Points(points, None)
    }
}

/// Penalises recipes cooked in the last month, regardless of preference
pub fn recency_component(signal: &RecipeSignal, week_start: NaiveDate) -> (f64, Option<ReasonCode>) {
    let Some(day) = signal.last_assigned_day else {
        return (RECENCY_WEIGHT, Some(ReasonCode::NeverCooked));
    };

    match days_between(day, week_start) {
        d if d <= 7 => (RECENCY_WEIGHT * 0.1, None),
        d if d <= 14 => (RECENCY_WEIGHT * 0.5, None),
        d if d <= 30 => (RECENCY_WEIGHT * 0.75, None),
        _ => (RECENCY_WEIGHT, Some(ReasonCode::NotCookedRecently)),
    }
}

fn days_between(earlier: NaiveDate, later: NaiveDate) -> i64 {
    (later - earlier).num_days()
}
