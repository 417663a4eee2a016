//! Duration of an intervention's time window.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{StatisticsError, StatisticsResult, TimeField, TimeParseError};
use crate::models::{Intervention, TimeOfDay};

/// Elapsed time between two wall-clock values, in fractional hours.
///
/// Seconds are ignored. There is no wraparound: if `end` is earlier than
/// `start` the result is negative.
pub fn duration_hours(start: &str, end: &str) -> Result<f64, TimeParseError> {
    let start = TimeOfDay::parse(start)?;
    let end = TimeOfDay::parse(end)?;
    Ok(minutes_between(start, end) as f64 / 60.0)
}

fn minutes_between(start: TimeOfDay, end: TimeOfDay) -> i64 {
    end.minutes_since_midnight() as i64 - start.minutes_since_midnight() as i64
}

/// What to do with an intervention whose end time precedes its start time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvertedRangePolicy {
    /// Fail the aggregation with [`StatisticsError::InvertedTimeRange`].
    #[default]
    Reject,
    /// Count the intervention with a zero duration.
    Clamp,
    /// Treat the window as crossing midnight.
    Wrap,
}

impl FromStr for InvertedRangePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "clamp" => Ok(Self::Clamp),
            "wrap" => Ok(Self::Wrap),
            other => Err(format!("Unknown inverted range policy: {}", other)),
        }
    }
}

impl fmt::Display for InvertedRangePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Reject => "reject",
            Self::Clamp => "clamp",
            Self::Wrap => "wrap",
        };
        f.write_str(name)
    }
}

/// Duration of one intervention in hours, with the inverted-range policy applied.
pub fn resolve_duration(
    intervention: &Intervention,
    policy: InvertedRangePolicy,
) -> StatisticsResult<f64> {
    let start = parse_field(intervention, TimeField::Start, &intervention.start_time)?;
    let end = parse_field(intervention, TimeField::End, &intervention.end_time)?;

    let minutes = minutes_between(start, end);
    let minutes = if minutes >= 0 {
        minutes
    } else {
        match policy {
            InvertedRangePolicy::Reject => {
                return Err(StatisticsError::InvertedTimeRange {
                    intervention_id: intervention.id,
                    start: intervention.start_time.clone(),
                    end: intervention.end_time.clone(),
                })
            }
            InvertedRangePolicy::Clamp => 0,
            InvertedRangePolicy::Wrap => minutes + TimeOfDay::MINUTES_PER_DAY as i64,
        }
    };

    Ok(minutes as f64 / 60.0)
}

fn parse_field(
    intervention: &Intervention,
    field: TimeField,
    value: &str,
) -> StatisticsResult<TimeOfDay> {
    TimeOfDay::parse(value).map_err(|source| StatisticsError::MalformedTime {
        intervention_id: intervention.id,
        field,
        value: value.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InterventionId;
    use chrono::NaiveDate;

    fn record(start: &str, end: &str) -> Intervention {
        Intervention::new(
            1,
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            "equipe1",
            "A",
            "preventive",
            start,
            end,
        )
    }

    #[test]
    fn test_full_working_day() {
        assert_eq!(duration_hours("09:00", "17:00").unwrap(), 8.0);
    }

    #[test]
    fn test_half_hour() {
        assert_eq!(duration_hours("09:30", "10:00").unwrap(), 0.5);
    }

    #[test]
    fn test_ninety_minutes() {
        assert_eq!(duration_hours("08:00:00", "09:30:59").unwrap(), 1.5);
    }

    #[test]
    fn test_zero_length() {
        assert_eq!(duration_hours("12:00", "12:00").unwrap(), 0.0);
    }

    #[test]
    fn test_inverted_is_negative() {
        assert_eq!(duration_hours("17:00", "09:00").unwrap(), -8.0);
    }

    #[test]
    fn test_malformed_input() {
        assert!(duration_hours("9h", "10:00").is_err());
        assert!(duration_hours("09:00", "").is_err());
    }

    #[test]
    fn test_resolve_duration_ok() {
        let hours = resolve_duration(&record("10:00", "10:30"), InvertedRangePolicy::Reject);
        assert_eq!(hours, Ok(0.5));
    }

    #[test]
    fn test_resolve_duration_reject() {
        let err = resolve_duration(&record("22:00", "02:00"), InvertedRangePolicy::Reject)
            .unwrap_err();
        assert!(matches!(err, StatisticsError::InvertedTimeRange { .. }));
        assert_eq!(err.intervention_id(), InterventionId::new(1));
    }

    #[test]
    fn test_resolve_duration_clamp_and_wrap() {
        let overnight = record("22:00", "02:00");
        assert_eq!(resolve_duration(&overnight, InvertedRangePolicy::Clamp), Ok(0.0));
        assert_eq!(resolve_duration(&overnight, InvertedRangePolicy::Wrap), Ok(4.0));
    }

    #[test]
    fn test_resolve_duration_names_bad_field() {
        let err = resolve_duration(&record("08:00", "25:00"), InvertedRangePolicy::Reject)
            .unwrap_err();
        match err {
            StatisticsError::MalformedTime { field, value, .. } => {
                assert_eq!(field, TimeField::End);
                assert_eq!(value, "25:00");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("wrap".parse::<InvertedRangePolicy>(), Ok(InvertedRangePolicy::Wrap));
        assert_eq!(" Clamp ".parse::<InvertedRangePolicy>(), Ok(InvertedRangePolicy::Clamp));
        assert!("ignore".parse::<InvertedRangePolicy>().is_err());
        assert_eq!(InvertedRangePolicy::default(), InvertedRangePolicy::Reject);
    }
}
