//! JSON parser for the maintenance-due payload.

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{PlanError, PlanResult};
use crate::records::MaintenanceRecord;

/// Key under which the service nests its record list.
pub const RECORDS_FIELD: &str = "pms";

/// Counters describing what the parser saw.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParseStats {
    pub total: usize,
    pub malformed: usize,
}

/// Records decoded from one payload, in payload order.
#[derive(Debug, Default)]
pub struct ParsedRecords {
    pub records: Vec<MaintenanceRecord>,
    pub stats: ParseStats,
}

/// Decodes a `{ "pms": [...] }` payload (or a bare array) into records.
///
/// Elements that are not JSON objects are skipped and counted in
/// [`ParseStats::malformed`]. Fields of the wrong type inside an object are
/// degraded by the record's own deserializers instead.
///
/// # Errors
///
/// Returns [`PlanError::InvalidInput`] if the bytes are not JSON or the record
/// list is not an array.
pub fn parse_records(bytes: &[u8]) -> PlanResult<ParsedRecords> {
    let payload: Value = serde_json::from_slice(bytes)
        .map_err(|e| PlanError::InvalidInput(format!("payload is not JSON: {e}")))?;

    let items = match payload {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove(RECORDS_FIELD) {
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(PlanError::InvalidInput(format!(
                    "`{RECORDS_FIELD}` is {}, expected an array",
                    type_name(&other)
                )));
            }
            None => {
                return Err(PlanError::InvalidInput(format!(
                    "payload has no `{RECORDS_FIELD}` field"
                )));
            }
        },
        other => {
            return Err(PlanError::InvalidInput(format!(
                "payload is {}, expected an object or array",
                type_name(&other)
            )));
        }
    };

    let mut parsed = ParsedRecords {
        records: Vec::with_capacity(items.len()),
        stats: ParseStats {
            total: items.len(),
            malformed: 0,
        },
    };

    for (index, item) in items.into_iter().enumerate() {
        if !item.is_object() {
            parsed.stats.malformed += 1;
            warn!(index, kind = type_name(&item), "Skipping non-object record");
            continue;
        }

        match serde_json::from_value::<MaintenanceRecord>(item) {
            Ok(record) => parsed.records.push(record),
            Err(e) => {
                parsed.stats.malformed += 1;
                warn!(index, error = %e, "Skipping malformed record");
            }
        }
    }

    debug!(
        total = parsed.stats.total,
        malformed = parsed.stats.malformed,
        "Payload parsed"
    );

    Ok(parsed)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wrapped_payload() {
        let bytes = br#"{"pms": [{"id": "1", "city": "Fargo", "state": "ND", "status": "Overdue"}]}"#;
        let parsed = parse_records(bytes).unwrap();

        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].city.as_deref(), Some("Fargo"));
        assert_eq!(parsed.stats, ParseStats { total: 1, malformed: 0 });
    }

    #[test]
    fn test_parse_bare_array() {
        let parsed = parse_records(br#"[{"id": 1}, {"id": 2}]"#).unwrap();
        assert_eq!(parsed.records.len(), 2);
    }

    #[test]
    fn test_parse_empty_list_is_not_an_error() {
        let parsed = parse_records(br#"{"pms": []}"#).unwrap();
        assert!(parsed.records.is_empty());
        assert_eq!(parsed.stats.total, 0);
    }

    #[test]
    fn test_parse_skips_malformed_elements() {
        let bytes = br#"{"pms": [{"id": "1"}, 17, "oops", null, [1, 2]]}"#;
        let parsed = parse_records(bytes).unwrap();

        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.stats, ParseStats { total: 5, malformed: 4 });
    }

    #[test]
    fn test_numeric_display_fields_keep_records_in_plan() {
        let bytes = br#"{"pms": [
            {"id": "1", "city": "Fargo", "state": "ND", "status": "Overdue", "phone": 7015551234},
            {"id": "2", "city": "Fargo", "state": "ND", "status": "DueSoon", "model": 320},
            {"id": "3", "city": ["Fargo"], "state": "ND", "status": "Overdue"}
        ]}"#;
        let parsed = parse_records(bytes).unwrap();

        assert_eq!(parsed.stats, ParseStats { total: 3, malformed: 0 });

        let (clusters, stats) = crate::clustering::plan(&parsed.records);
        assert_eq!(stats.accepted, 3);
        let keys: Vec<_> = clusters.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["FARGO, ND", "Unknown Location, ND"]);
        assert_eq!(clusters[0].members.len(), 2);
        assert_eq!(clusters[0].members[0].phone.as_deref(), Some("7015551234"));
        assert_eq!(clusters[0].members[1].model.as_deref(), Some("320"));
    }

    #[test]
    fn test_parse_rejects_non_array_records() {
        let err = parse_records(br#"{"pms": {"id": "1"}}"#).unwrap_err();
        assert!(matches!(err, PlanError::InvalidInput(_)));
    }

    #[test]
    fn test_parse_rejects_missing_field() {
        let err = parse_records(br#"{"records": []}"#).unwrap_err();
        assert!(matches!(err, PlanError::InvalidInput(_)));
    }

    #[test]
    fn test_parse_rejects_scalar_payload() {
        assert!(matches!(
            parse_records(b"42").unwrap_err(),
            PlanError::InvalidInput(_)
        ));
        assert!(matches!(
            parse_records(b"not json").unwrap_err(),
            PlanError::InvalidInput(_)
        ));
    }
}
