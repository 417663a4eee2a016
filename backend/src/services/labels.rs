//! Display labels for statistics keys.
//!
//! Labels are only for presentation. Grouping keys (`preventive`, `2025-03`, ...)
//! never depend on them.

use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::models::MaintenanceType;
use crate::routes::statistics::StatisticsData;

const MONTH_NAMES: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// Label for a maintenance type key, or the key itself when it has none.
pub fn maintenance_type_label(key: &str) -> Cow<'_, str> {
    match MaintenanceType::from(key) {
        MaintenanceType::Cooperative => Cow::Borrowed("Coopérative"),
        MaintenanceType::Preventive => Cow::Borrowed("Préventive"),
        MaintenanceType::Corrective => Cow::Borrowed("Corrective"),
        MaintenanceType::Urgent => Cow::Borrowed("Urgente"),
        MaintenanceType::Other(_) => Cow::Borrowed(key),
    }
}

/// Label for a `YYYY-MM` month key, e.g. `mars 2025`. Malformed keys are returned as is.
pub fn month_label(key: &str) -> String {
    let parsed = key.split_once('-').and_then(|(year, month)| {
        let year: i32 = year.parse().ok()?;
        let month: usize = month.parse().ok()?;
        let name = MONTH_NAMES.get(month.checked_sub(1)?)?;
        Some(format!("{} {}", name, year))
    });
    parsed.unwrap_or_else(|| key.to_string())
}

/// Label for the submission state of an intervention.
pub fn submission_label(validated: bool) -> &'static str {
    if validated {
        "Envoyée"
    } else {
        "Enregistrée"
    }
}

/// Labels for every key that appears in one statistics snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayLabels {
    pub maintenance_types: BTreeMap<String, String>,
    pub months: BTreeMap<String, String>,
}

pub fn display_labels(data: &StatisticsData) -> DisplayLabels {
    DisplayLabels {
        maintenance_types: data
            .by_maintenance_type
            .iter()
            .map(|m| {
                let label = maintenance_type_label(&m.maintenance_type).into_owned();
                (m.maintenance_type.clone(), label)
            })
            .collect(),
        months: data
            .by_month
            .iter()
            .map(|m| (m.month.clone(), month_label(&m.month)))
            .collect(),
    }
}
