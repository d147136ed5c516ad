//! Inbound trip request types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Default trip length when the caller omits `duration`
pub const DEFAULT_DURATION_DAYS: u8 = 7;

/// A travel month in `YYYY-MM` form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TravelMonth {
    pub year: i32,
    pub month: u32,
}

impl std::fmt::Display for TravelMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl std::str::FromStr for TravelMonth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        let shaped = bytes.len() == 7
            && bytes[4] == b'-'
            && bytes[..4].iter().all(u8::is_ascii_digit)
            && bytes[5..].iter().all(u8::is_ascii_digit);
        if !shaped {
            return Err(format!("expected YYYY-MM, got '{}'", s));
        }

        // Round-trip through chrono so the month range is checked by the calendar
        let date = chrono::NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
            .map_err(|_| format!("'{}' is not a valid year-month", s))?;
        Ok(Self {
            year: chrono::Datelike::year(&date),
            month: chrono::Datelike::month(&date),
        })
    }
}

/// Trip request body exactly as it arrives over the wire
///
/// Every field is optional so the validator can report which one is wrong
/// instead of failing on the first missing key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TripRequestBody {
    #[serde(rename = "fromLocation", default)]
    pub from_location: Option<String>,

    #[serde(default)]
    pub destination: Option<String>,

    #[serde(default)]
    pub travelers: Option<i64>,

    #[serde(rename = "travelDate", default)]
    pub travel_date: Option<String>,

    #[serde(default)]
    pub duration: Option<i64>,

    #[serde(default)]
    pub interests: Option<BTreeMap<String, bool>>,
}

/// A validated, normalized trip request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRequest {
    pub origin: String,
    pub destination: String,
    pub travelers: u8,
    pub travel_date: TravelMonth,
    pub duration_days: u8,
    pub interests: BTreeMap<String, bool>,
}

impl TripRequest {
    /// Interest names flagged true, in name order
    pub fn selected_interests(&self) -> Vec<&str> {
        self.interests
            .iter()
            .filter(|(_, enabled)| **enabled)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_travel_month_parse() {
        let month: TravelMonth = "2025-04".parse().unwrap();
        assert_eq!(month, TravelMonth { year: 2025, month: 4 });
        assert_eq!(month.to_string(), "2025-04");
    }

    #[test]
    fn test_travel_month_rejects_bad_shapes() {
        assert!("2025-4".parse::<TravelMonth>().is_err());
        assert!("2025/04".parse::<TravelMonth>().is_err());
        assert!("2025-04-01".parse::<TravelMonth>().is_err());
        assert!("April 2025".parse::<TravelMonth>().is_err());
        assert!("".parse::<TravelMonth>().is_err());
    }

    #[test]
    fn test_travel_month_rejects_bad_month() {
        assert!("2025-00".parse::<TravelMonth>().is_err());
        assert!("2025-13".parse::<TravelMonth>().is_err());
        assert!("2025-12".parse::<TravelMonth>().is_ok());
    }

    #[test]
    fn test_body_deserializes_camel_case() {
        let body: TripRequestBody = serde_json::from_str(
            r#"{"fromLocation":"Bengaluru","destination":"London","travelers":2,
                "travelDate":"2025-04","interests":{"food":true,"shopping":false}}"#,
        )
        .unwrap();

        assert_eq!(body.from_location.as_deref(), Some("Bengaluru"));
        assert_eq!(body.travelers, Some(2));
        assert_eq!(body.duration, None);
        assert_eq!(body.interests.unwrap().len(), 2);
    }

    #[test]
    fn test_selected_interests_only_true_flags() {
        let mut interests = BTreeMap::new();
        interests.insert("nature".to_string(), true);
        interests.insert("shopping".to_string(), false);
        interests.insert("food".to_string(), true);

        let request = TripRequest {
            origin: "Paris".to_string(),
            destination: "Rome".to_string(),
            travelers: 1,
            travel_date: TravelMonth { year: 2025, month: 6 },
            duration_days: 3,
            interests,
        };

        assert_eq!(request.selected_interests(), vec!["food", "nature"]);
    }
}
