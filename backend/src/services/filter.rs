//! Filtering of interventions before aggregation.
//!
//! Every constraint is optional. String constraints set to `""` or `"all"` are
//! treated as absent, matching what the filter forms send when a select box is
//! left on its default entry.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::models::{Intervention, MaintenanceType, UserId};

/// Sentinel meaning "no restriction on this dimension".
pub const ALL: &str = "all";

/// Filter on the `validated` flag as worded on the technician dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    All,
    /// Validated and sent.
    Sent,
    /// Saved, not yet validated.
    Saved,
}

impl FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | ALL => Ok(Self::All),
            "sent" => Ok(Self::Sent),
            "saved" => Ok(Self::Saved),
            other => Err(format!("Unknown submission status: {}", other)),
        }
    }
}

/// Optional constraints applied to a list of interventions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatisticsFilter {
    /// Inclusive lower bound on the intervention date.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on the intervention date.
    pub date_to: Option<NaiveDate>,
    pub team: Option<String>,
    pub section: Option<String>,
    pub maintenance_type: Option<String>,
    /// Case-insensitive substring over reference, post, team, section and type.
    pub search: Option<String>,
    pub submission: Option<SubmissionStatus>,
    pub validated: Option<bool>,
    pub user_id: Option<UserId>,
}

/// Active value of a string constraint, or `None` when it is unset, empty or `"all"`.
pub fn constraint(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty() && *v != ALL)
}

impl StatisticsFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date_from(mut self, date: NaiveDate) -> Self {
        self.date_from = Some(date);
        self
    }

    pub fn date_to(mut self, date: NaiveDate) -> Self {
        self.date_to = Some(date);
        self
    }

    pub fn team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    pub fn section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    pub fn maintenance_type(mut self, maintenance_type: impl Into<String>) -> Self {
        self.maintenance_type = Some(maintenance_type.into());
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn submission(mut self, status: SubmissionStatus) -> Self {
        self.submission = Some(status);
        self
    }

    pub fn validated(mut self, validated: bool) -> Self {
        self.validated = Some(validated);
        self
    }

    pub fn user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// True when no constraint is active.
    pub fn is_empty(&self) -> bool {
        self.date_from.is_none()
            && self.date_to.is_none()
            && constraint(&self.team).is_none()
            && constraint(&self.section).is_none()
            && constraint(&self.maintenance_type).is_none()
            && constraint(&self.search).is_none()
            && matches!(self.submission, None | Some(SubmissionStatus::All))
            && self.validated.is_none()
            && self.user_id.is_none()
    }

    /// Whether one intervention satisfies every active constraint.
    pub fn matches(&self, intervention: &Intervention) -> bool {
        if let Some(from) = self.date_from {
            if intervention.date < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if intervention.date > to {
                return false;
            }
        }
        if let Some(team) = constraint(&self.team) {
            if intervention.team != team {
                return false;
            }
        }
        if let Some(section) = constraint(&self.section) {
            if intervention.section != section {
                return false;
            }
        }
        if let Some(maintenance_type) = constraint(&self.maintenance_type) {
            if intervention.maintenance_type != MaintenanceType::from(maintenance_type) {
                return false;
            }
        }
        if let Some(term) = constraint(&self.search) {
            if !matches_search(intervention, term) {
                return false;
            }
        }
        match self.submission {
            Some(SubmissionStatus::Sent) if !intervention.validated => return false,
            Some(SubmissionStatus::Saved) if intervention.validated => return false,
            _ => {}
        }
        if let Some(validated) = self.validated {
            if intervention.validated != validated {
                return false;
            }
        }
        if let Some(user_id) = self.user_id {
            if intervention.user_id != Some(user_id) {
                return false;
            }
        }
        true
    }
}

fn matches_search(intervention: &Intervention, term: &str) -> bool {
    let term = term.to_lowercase();
    [
        intervention.reference.as_str(),
        intervention.post.as_str(),
        intervention.team.as_str(),
        intervention.section.as_str(),
        intervention.maintenance_type.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&term))
}

/// Interventions satisfying every active constraint, in their original order.
pub fn filter_interventions(
    interventions: &[Intervention],
    filter: &StatisticsFilter,
) -> Vec<Intervention> {
    if filter.is_empty() {
        return interventions.to_vec();
    }
    interventions
        .iter()
        .filter(|i| filter.matches(i))
        .cloned()
        .collect()
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod filter_tests;
