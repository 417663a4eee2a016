use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Row id of an intervention, assigned by the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterventionId(i64);

/// Id of the technician who filed an intervention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl InterventionId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Id following this one, `None` once `i64::MAX` is reached.
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl UserId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for InterventionId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for InterventionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Nature of a maintenance intervention.
///
/// Values outside the four known kinds are kept verbatim in [`MaintenanceType::Other`]
/// so they still form their own statistics bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MaintenanceType {
    Cooperative,
    Preventive,
    Corrective,
    Urgent,
    Other(String),
}

impl MaintenanceType {
    /// The fixed enumeration, in display order.
    pub const KNOWN: [MaintenanceType; 4] = [
        MaintenanceType::Cooperative,
        MaintenanceType::Preventive,
        MaintenanceType::Corrective,
        MaintenanceType::Urgent,
    ];

    /// Canonical key used for grouping and filtering.
    pub fn as_str(&self) -> &str {
        match self {
            MaintenanceType::Cooperative => "cooperative",
            MaintenanceType::Preventive => "preventive",
            MaintenanceType::Corrective => "corrective",
            MaintenanceType::Urgent => "urgent",
            MaintenanceType::Other(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, MaintenanceType::Other(_))
    }
}

impl From<&str> for MaintenanceType {
    fn from(value: &str) -> Self {
        match value {
            // `coperative` and `urgente` are the spellings stored by the intake forms.
            "cooperative" | "coperative" => MaintenanceType::Cooperative,
            "preventive" => MaintenanceType::Preventive,
            "corrective" => MaintenanceType::Corrective,
            "urgent" | "urgente" => MaintenanceType::Urgent,
            other => MaintenanceType::Other(other.to_string()),
        }
    }
}

impl From<String> for MaintenanceType {
    fn from(value: String) -> Self {
        match MaintenanceType::from(value.as_str()) {
            MaintenanceType::Other(_) => MaintenanceType::Other(value),
            known => known,
        }
    }
}

impl From<MaintenanceType> for String {
    fn from(value: MaintenanceType) -> Self {
        match value {
            MaintenanceType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for MaintenanceType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(MaintenanceType::from(s))
    }
}

impl fmt::Display for MaintenanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A logged maintenance event.
///
/// Field names follow the JSON export of the intervention API; the legacy
/// snake-case names are accepted as aliases. Start and end times stay as the
/// raw strings received so that the aggregator can report the exact value that
/// failed to parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intervention {
    #[serde(alias = "intervention_id")]
    pub id: InterventionId,
    #[serde(deserialize_with = "deserialize_calendar_date")]
    pub date: NaiveDate,
    pub team: String,
    #[serde(deserialize_with = "deserialize_section_name")]
    pub section: String,
    #[serde(alias = "maintenance_type")]
    pub maintenance_type: MaintenanceType,
    #[serde(alias = "start_time")]
    pub start_time: String,
    #[serde(alias = "end_time")]
    pub end_time: String,
    #[serde(alias = "validate", default)]
    pub validated: bool,
    #[serde(alias = "status", default)]
    pub active: bool,
    #[serde(alias = "planification", default)]
    pub planning: bool,
    #[serde(default)]
    pub reception: bool,
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub post: String,
    #[serde(alias = "user_id", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

impl Intervention {
    /// Create an unvalidated, active intervention with empty free-text fields.
    pub fn new(
        id: i64,
        date: NaiveDate,
        team: impl Into<String>,
        section: impl Into<String>,
        maintenance_type: impl Into<MaintenanceType>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            id: InterventionId::new(id),
            date,
            team: team.into(),
            section: section.into(),
            maintenance_type: maintenance_type.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            validated: false,
            active: true,
            planning: false,
            reception: false,
            reference: String::new(),
            post: String::new(),
            user_id: None,
        }
    }

    pub fn with_validated(mut self, validated: bool) -> Self {
        self.validated = validated;
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn with_planning(mut self, planning: bool) -> Self {
        self.planning = planning;
        self
    }

    pub fn with_reception(mut self, reception: bool) -> Self {
        self.reception = reception;
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>, post: impl Into<String>) -> Self {
        self.reference = reference.into();
        self.post = post.into();
        self
    }

    pub fn with_user(mut self, user_id: i64) -> Self {
        self.user_id = Some(UserId::new(user_id));
        self
    }
}

/// Accepts `YYYY-MM-DD` as well as a full RFC 3339 timestamp, keeping only the
/// calendar date the timestamp was written with.
fn deserialize_calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_calendar_date(&raw).map_err(serde::de::Error::custom)
}

pub(crate) fn parse_calendar_date(raw: &str) -> Result<NaiveDate, String> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.date_naive()))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date())
        })
        .map_err(|e| format!("invalid calendar date '{}': {}", raw, e))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SectionField {
    Name(String),
    Nested { name: String },
}

/// The API embeds the section as `{ "name": ... }`; flat strings are accepted too.
fn deserialize_section_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match SectionField::deserialize(deserializer)? {
        SectionField::Name(name) | SectionField::Nested { name } => name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maintenance_type_known_values() {
        assert_eq!(MaintenanceType::from("preventive"), MaintenanceType::Preventive);
        assert_eq!(MaintenanceType::from("coperative"), MaintenanceType::Cooperative);
        assert_eq!(MaintenanceType::from("urgente"), MaintenanceType::Urgent);
        assert_eq!(MaintenanceType::Urgent.as_str(), "urgent");
        assert!(MaintenanceType::KNOWN.iter().all(|t| t.is_known()));
    }

    #[test]
    fn test_maintenance_type_unknown_passthrough() {
        let t = MaintenanceType::from("inspection");
        assert_eq!(t, MaintenanceType::Other("inspection".to_string()));
        assert_eq!(t.as_str(), "inspection");
        assert!(!t.is_known());
    }

    #[test]
    fn test_maintenance_type_serde_as_string() {
        let json = serde_json::to_string(&MaintenanceType::Corrective).unwrap();
        assert_eq!(json, "\"corrective\"");
        let parsed: MaintenanceType = serde_json::from_str("\"calibration\"").unwrap();
        assert_eq!(parsed, MaintenanceType::Other("calibration".to_string()));
    }

    #[test]
    fn test_deserialize_api_payload() {
        let json = r#"{
            "intervention_id": 12,
            "date": "2025-03-14",
            "team": "equipe1",
            "reference": "REF-1",
            "post": "P2",
            "maintenance_type": "coperative",
            "status": true,
            "planification": true,
            "reception": false,
            "start_time": "09:00:00",
            "end_time": "17:00:00",
            "validate": true,
            "user_id": 3,
            "section": { "name": "Mécanique" }
        }"#;

        let intervention: Intervention = serde_json::from_str(json).unwrap();
        assert_eq!(intervention.id, InterventionId::new(12));
        assert_eq!(intervention.date, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
        assert_eq!(intervention.section, "Mécanique");
        assert_eq!(intervention.maintenance_type, MaintenanceType::Cooperative);
        assert!(intervention.validated);
        assert!(intervention.active);
        assert!(intervention.planning);
        assert!(!intervention.reception);
        assert_eq!(intervention.user_id, Some(UserId::new(3)));
    }

    #[test]
    fn test_deserialize_camel_case_and_flat_section() {
        let json = r#"{
            "id": 1,
            "date": "2025-01-02T00:00:00.000Z",
            "team": "equipe2",
            "section": "Électricité",
            "maintenanceType": "urgent",
            "startTime": "08:00",
            "endTime": "12:00"
        }"#;

        let intervention: Intervention = serde_json::from_str(json).unwrap();
        assert_eq!(intervention.date, NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
        assert_eq!(intervention.section, "Électricité");
        assert!(!intervention.validated);
        assert!(!intervention.active);
        assert_eq!(intervention.user_id, None);
    }

    #[test]
    fn test_calendar_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        assert_eq!(parse_calendar_date("2025-03-03").unwrap(), expected);
        assert_eq!(parse_calendar_date("2025-03-03T08:15:00Z").unwrap(), expected);
        // Date as written, not shifted to UTC.
        assert_eq!(parse_calendar_date("2025-03-03T23:30:00-05:00").unwrap(), expected);
        assert_eq!(parse_calendar_date("2025-03-03T08:15:00").unwrap(), expected);
        assert!(parse_calendar_date("2025-03-03Tgarbage").is_err());
        assert!(parse_calendar_date("2025-02-30").is_err());
    }

    #[test]
    fn test_ids_step_forward() {
        assert_eq!(InterventionId::new(4).next(), Some(InterventionId::new(5)));
        assert_eq!(InterventionId::new(i64::MAX).next(), None);
        assert_eq!(UserId::from(3).to_string(), "3");
    }

    #[test]
    fn test_rejects_bad_date() {
        let json = r#"{
            "id": 1, "date": "14/03/2025", "team": "equipe1", "section": "A",
            "maintenanceType": "urgent", "startTime": "08:00", "endTime": "09:00"
        }"#;
        let err = serde_json::from_str::<Intervention>(json).unwrap_err();
        assert!(err.to_string().contains("invalid calendar date"));
    }

    #[test]
    fn test_builder_defaults() {
        let i = Intervention::new(
            5,
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            "equipe3",
            "Hydraulique",
            "preventive",
            "10:00",
            "11:00",
        )
        .with_validated(true)
        .with_user(9);

        assert_eq!(i.id.value(), 5);
        assert!(i.validated);
        assert!(i.active);
        assert_eq!(i.user_id, Some(UserId::new(9)));
    }
}
