//! Error types for the statistics core.
//!
//! The aggregator performs no I/O, so the only failures it can raise come from
//! the time window attached to each intervention. Both variants of
//! [`StatisticsError`] name the offending record so the caller can decide
//! whether to skip it, abort, or report it.

use crate::models::InterventionId;
use std::fmt;

/// Which end of an intervention's time window a value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Start,
    End,
}

impl fmt::Display for TimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeField::Start => write!(f, "start_time"),
            TimeField::End => write!(f, "end_time"),
        }
    }
}

/// Failure to read a wall-clock value such as `"09:30"` or `"17:00:00"`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeParseError {
    #[error("time value is empty")]
    Empty,

    #[error("time value '{value}' is not HH:MM or HH:MM:SS: {source}")]
    Invalid {
        value: String,
        #[source]
        source: chrono::format::ParseError,
    },
}

/// Result type for aggregation.
pub type StatisticsResult<T> = Result<T, StatisticsError>;

/// Error raised while aggregating interventions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StatisticsError {
    /// A start or end time did not parse as a 24-hour clock value.
    #[error("intervention {intervention_id}: malformed {field} '{value}': {source}")]
    MalformedTime {
        intervention_id: InterventionId,
        field: TimeField,
        value: String,
        #[source]
        source: TimeParseError,
    },

    /// The end time precedes the start time and the active policy rejects it.
    #[error("intervention {intervention_id}: end time {end} is before start time {start}")]
    InvertedTimeRange {
        intervention_id: InterventionId,
        start: String,
        end: String,
    },
}

impl StatisticsError {
    /// Identifier of the intervention that caused the error.
    pub fn intervention_id(&self) -> InterventionId {
        match self {
            Self::MalformedTime {
                intervention_id, ..
            }
            | Self::InvertedTimeRange {
                intervention_id, ..
            } => *intervention_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeOfDay;

    #[test]
    fn test_malformed_time_message_names_record() {
        let err = StatisticsError::MalformedTime {
            intervention_id: InterventionId::new(42),
            field: TimeField::End,
            value: "25:00".to_string(),
            source: TimeOfDay::parse("25:00").unwrap_err(),
        };
        let message = err.to_string();
        assert!(message.contains("intervention 42"));
        assert!(message.contains("end_time"));
        assert!(message.contains("25:00"));
        assert_eq!(err.intervention_id(), InterventionId::new(42));
    }

    #[test]
    fn test_inverted_range_message() {
        let err = StatisticsError::InvertedTimeRange {
            intervention_id: InterventionId::new(7),
            start: "17:00".to_string(),
            end: "09:00".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "intervention 7: end time 09:00 is before start time 17:00"
        );
    }
}
