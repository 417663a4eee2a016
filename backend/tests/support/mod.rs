#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;
use intervention_stats::api::Intervention;

/// Serializes tests that touch the `INTERVENTION_STATS_*` variables.
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Applies `vars` (`None` unsets) for the duration of `f`, then puts the
/// previous values back, even if `f` panics.
pub fn with_scoped_env<R>(vars: &[(&str, Option<&str>)], f: impl FnOnce() -> R) -> R {
    let _restore = EnvOverride::apply(vars);
    f()
}

struct EnvOverride {
    previous: Vec<(String, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvOverride {
    fn apply(vars: &[(&str, Option<&str>)]) -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut previous: Vec<(String, Option<String>)> = Vec::with_capacity(vars.len());
        for (name, value) in vars {
            if !previous.iter().any(|(seen, _)| seen == name) {
                previous.push((name.to_string(), std::env::var(name).ok()));
            }
            set_or_remove(name, *value);
        }
        Self {
            previous,
            _lock: lock,
        }
    }
}

impl Drop for EnvOverride {
    fn drop(&mut self) {
        for (name, value) in &self.previous {
            set_or_remove(name, value.as_deref());
        }
    }
}

fn set_or_remove(name: &str, value: Option<&str>) {
    match value {
        Some(value) => std::env::set_var(name, value),
        None => std::env::remove_var(name),
    }
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// The three-intervention reference scenario.
pub fn scenario() -> Vec<Intervention> {
    vec![
        Intervention::new(1, day(2025, 3, 3), "equipe1", "Mécanique", "preventive", "09:00", "17:00")
            .with_validated(true)
            .with_reference("REF-001", "Poste A")
            .with_user(1),
        Intervention::new(2, day(2025, 3, 4), "equipe1", "Mécanique", "corrective", "08:00", "12:00")
            .with_reference("REF-002", "Poste B")
            .with_user(1),
        Intervention::new(3, day(2025, 4, 1), "equipe2", "Électricité", "urgent", "10:00", "10:30")
            .with_validated(true)
            .with_reference("REF-003", "Tableau général")
            .with_user(2),
    ]
}

/// Path of the JSON dataset shipped with the tests.
pub fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("interventions.json")
}
