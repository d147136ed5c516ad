//! Per-field failure handling for a trip plan

use std::fmt;

/// A field of the merged trip response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanField {
    Narrative,
    Coordinates,
    Flights,
    Hotels,
    Photos,
}

/// What a failure of one field does to the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnFailure {
    /// The request fails with an internal error
    Abort,
    /// The field takes its fallback value and the request still succeeds
    Degrade,
    /// The field cannot fail
    Infallible,
}

impl PlanField {
    pub const ALL: [PlanField; 5] = [
        PlanField::Narrative,
        PlanField::Coordinates,
        PlanField::Flights,
        PlanField::Hotels,
        PlanField::Photos,
    ];

    pub fn on_failure(self) -> OnFailure {
        match self {
            PlanField::Narrative => OnFailure::Abort,
            PlanField::Coordinates | PlanField::Hotels | PlanField::Photos => OnFailure::Degrade,
            PlanField::Flights => OnFailure::Infallible,
        }
    }

    /// Human-readable fallback, used in degradation logs
    pub fn fallback(self) -> &'static str {
        match self {
            PlanField::Narrative => "request fails",
            PlanField::Coordinates => "(0.0, 0.0)",
            PlanField::Flights => "none",
            PlanField::Hotels => "empty list",
            PlanField::Photos => "single placeholder",
        }
    }
}

impl fmt::Display for PlanField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlanField::Narrative => "narrative",
            PlanField::Coordinates => "coordinates",
            PlanField::Flights => "flights",
            PlanField::Hotels => "hotels",
            PlanField::Photos => "photos",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_table() {
        let table: Vec<(String, OnFailure)> = PlanField::ALL
            .iter()
            .map(|f| (f.to_string(), f.on_failure()))
            .collect();

        assert_eq!(
            table,
            vec![
                ("narrative".to_string(), OnFailure::Abort),
                ("coordinates".to_string(), OnFailure::Degrade),
                ("flights".to_string(), OnFailure::Infallible),
                ("hotels".to_string(), OnFailure::Degrade),
                ("photos".to_string(), OnFailure::Degrade),
            ]
        );
    }

    #[test]
    fn test_only_narrative_aborts() {
        let aborting: Vec<PlanField> = PlanField::ALL
            .into_iter()
            .filter(|f| f.on_failure() == OnFailure::Abort)
            .collect();
        assert_eq!(aborting, vec![PlanField::Narrative]);
    }
}
