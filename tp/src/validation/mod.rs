//! Request validation
//!
//! Turns a raw [`TripRequestBody`] into a normalized [`TripRequest`] or a
//! field-identified [`ValidationError`]. Runs before any external call.

use std::ops::RangeInclusive;

use thiserror::Error;
use tracing::debug;

use crate::domain::{DEFAULT_DURATION_DAYS, TravelMonth, TripRequest, TripRequestBody};

/// Allowed traveler counts
pub const TRAVELERS_RANGE: RangeInclusive<i64> = 1..=10;

/// Allowed trip lengths in days
pub const DURATION_RANGE: RangeInclusive<i64> = 1..=30;

/// A rejected request, naming the offending field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Wire name of the field (`fromLocation`, `travelers`, ...)
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate and normalize a raw trip request
pub fn validate_request(body: TripRequestBody) -> Result<TripRequest, ValidationError> {
    debug!(?body, "validate_request: called");

    let origin = required_text("fromLocation", body.from_location)?;
    let destination = required_text("destination", body.destination)?;

    let travelers = body
        .travelers
        .ok_or_else(|| ValidationError::new("travelers", "field required"))?;
    let travelers = bounded("travelers", travelers, TRAVELERS_RANGE)?;

    let travel_date = body
        .travel_date
        .ok_or_else(|| ValidationError::new("travelDate", "field required"))?;
    let travel_date: TravelMonth = travel_date
        .trim()
        .parse()
        .map_err(|e: String| ValidationError::new("travelDate", e))?;

    let duration_days = match body.duration {
        Some(duration) => bounded("duration", duration, DURATION_RANGE)?,
        None => {
            debug!("validate_request: duration missing, using default");
            DEFAULT_DURATION_DAYS
        }
    };

    Ok(TripRequest {
        origin,
        destination,
        travelers,
        travel_date,
        duration_days,
        interests: body.interests.unwrap_or_default(),
    })
}

fn required_text(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    match value.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        Some(_) => Err(ValidationError::new(field, "must not be empty")),
        None => Err(ValidationError::new(field, "field required")),
    }
}

fn bounded(field: &'static str, value: i64, range: RangeInclusive<i64>) -> Result<u8, ValidationError> {
    if !range.contains(&value) {
        return Err(ValidationError::new(
            field,
            format!("must be between {} and {}, got {}", range.start(), range.end(), value),
        ));
    }
    u8::try_from(value).map_err(|_| ValidationError::new(field, "out of range"))
}
