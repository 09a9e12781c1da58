use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// How often a household wants a dish to come back around
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FrequencyPreference {
    OnceAWeek,
    OnceAMonth,
    AFewTimesAYear,
    Yearly,
    /// The household never wants this dish suggested again
    Never,
}

impl FrequencyPreference {
    pub const ALL: [FrequencyPreference; 5] = [
        FrequencyPreference::OnceAWeek,
        FrequencyPreference::OnceAMonth,
        FrequencyPreference::AFewTimesAYear,
        FrequencyPreference::Yearly,
        FrequencyPreference::Never,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FrequencyPreference::OnceAWeek => "OnceAWeek",
            FrequencyPreference::OnceAMonth => "OnceAMonth",
            FrequencyPreference::AFewTimesAYear => "AFewTimesAYear",
            FrequencyPreference::Yearly => "Yearly",
            FrequencyPreference::Never => "Never",
        }
    }

    /// Target number of days between two cookings of the dish
    ///
    /// `Never` has no cadence and returns `None`.
    pub fn ideal_days(&self) -> Option<u32> {
        match self {
            FrequencyPreference::OnceAWeek => Some(7),
            FrequencyPreference::OnceAMonth => Some(30),
            FrequencyPreference::AFewTimesAYear => Some(90),
            FrequencyPreference::Yearly => Some(365),
            FrequencyPreference::Never => None,
        }
    }

    /// Parses a stored value, mapping empty or unknown strings to `None`
    ///
    /// Stored preferences come from an open text column, so anything outside
    /// the allow-list is treated as "no preference stated".
    pub fn parse_lenient(raw: Option<&str>) -> Option<Self> {
        let raw = raw?.trim();
        if raw.is_empty() {
            return None;
        }

        match raw.parse() {
            Ok(preference) => Some(preference),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring unrecognised frequency preference");
                None
            }
        }
    }
}

impl Display for FrequencyPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown frequency preference: {0}")]
pub struct UnknownFrequency(pub String);

impl FromStr for FrequencyPreference {
    type Err = UnknownFrequency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preference| preference.as_str() == s)
            .ok_or_else(|| UnknownFrequency(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_accepts_allow_list() {
        for preference in FrequencyPreference::ALL {
            assert_eq!(preference.as_str().parse(), Ok(preference));
        }
    }

    #[test]
    fn test_from_str_is_case_sensitive() {
        let err = "onceaweek".parse::<FrequencyPreference>().unwrap_err();
        assert_eq!(err, UnknownFrequency("onceaweek".to_string()));
    }

    #[test]
    fn test_parse_lenient_treats_junk_as_absent() {
        assert_eq!(FrequencyPreference::parse_lenient(None), None);
        assert_eq!(FrequencyPreference::parse_lenient(Some("")), None);
        assert_eq!(FrequencyPreference::parse_lenient(Some("   ")), None);
        assert_eq!(FrequencyPreference::parse_lenient(Some("Daily")), None);
        assert_eq!(
            FrequencyPreference::parse_lenient(Some("Yearly")),
            Some(FrequencyPreference::Yearly)
        );
    }

    #[test]
    fn test_ideal_days() {
        assert_eq!(FrequencyPreference::OnceAWeek.ideal_days(), Some(7));
        assert_eq!(FrequencyPreference::OnceAMonth.ideal_days(), Some(30));
        assert_eq!(FrequencyPreference::AFewTimesAYear.ideal_days(), Some(90));
        assert_eq!(FrequencyPreference::Yearly.ideal_days(), Some(365));
        assert_eq!(FrequencyPreference::Never.ideal_days(), None);
    }

    #[test]
    fn test_serialization_uses_variant_names() {
        let json = serde_json::to_string(&FrequencyPreference::AFewTimesAYear).unwrap();
        assert_eq!(json, "\"AFewTimesAYear\"");
    }
}
