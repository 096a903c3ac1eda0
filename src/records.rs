//! Maintenance-due records as delivered by the service API.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Status values the planner clusters. Everything else is dropped by the builder.
pub const ACCEPTED_STATUSES: &[(&str, PmStatus)] = &[
    ("Overdue", PmStatus::Overdue),
    ("DueSoon", PmStatus::DueSoon),
    ("Due Soon", PmStatus::DueSoon),
];

/// Urgency of a preventive-maintenance obligation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PmStatus {
    Overdue,
    DueSoon,
}

impl PmStatus {
    /// Maps a raw status string onto a clusterable status.
    ///
    /// Returns `None` for anything outside [`ACCEPTED_STATUSES`]; matching is
    /// exact after trimming.
    pub fn from_raw(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        ACCEPTED_STATUSES
            .iter()
            .find(|(name, _)| *name == raw)
            .map(|(_, status)| *status)
    }
}

impl fmt::Display for PmStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PmStatus::Overdue => write!(f, "Overdue"),
            PmStatus::DueSoon => write!(f, "Due Soon"),
        }
    }
}

/// One overdue or due-soon PM obligation for one unit at one customer site.
///
/// Only `city`, `state`, `zip` and `status` matter to clustering. The rest is
/// carried through untouched for display and export. Any field of the wrong
/// JSON type degrades to a string (scalars) or `None` (arrays, objects) so the
/// record itself is never lost.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,

    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub state: Option<String>,
    #[serde(default, alias = "postalCode", deserialize_with = "opt_string_or_number")]
    pub zip: Option<String>,

    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub status: Option<String>,
    #[serde(default, alias = "daysUntilDue", deserialize_with = "lenient_days")]
    pub days_until_due: Option<i64>,

    #[serde(default, alias = "serialNumber", deserialize_with = "opt_string_or_number")]
    pub serial_number: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub customer: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub contact: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub make: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub model: Option<String>,
    #[serde(default, alias = "unitNumber", deserialize_with = "opt_string_or_number")]
    pub unit_number: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub frequency: Option<String>,
    #[serde(default, alias = "lastServiceDate", deserialize_with = "opt_string_or_number")]
    pub last_service_date: Option<String>,
    #[serde(default, alias = "nextDueDate", deserialize_with = "opt_string_or_number")]
    pub next_due_date: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub technician: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub comments: Option<String>,
}

impl MaintenanceRecord {
    /// The record's status, if it is one the planner clusters.
    pub fn pm_status(&self) -> Option<PmStatus> {
        self.status.as_deref().and_then(PmStatus::from_raw)
    }

    /// State code trimmed and uppercased; empty when absent.
    pub fn state_code(&self) -> String {
        self.state
            .as_deref()
            .map(|s| s.trim().to_uppercase())
            .unwrap_or_default()
    }

    /// Postal code with surrounding whitespace removed; `None` when absent or blank.
    pub fn postal_code(&self) -> Option<&str> {
        self.zip
            .as_deref()
            .map(str::trim)
            .filter(|zip| !zip.is_empty())
    }
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_string(value).unwrap_or_default())
}

fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_string(value))
}

// Upstream sends whole days, occasionally as a float or a numeric string.
fn lenient_days<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    })
}
