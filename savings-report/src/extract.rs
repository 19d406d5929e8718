use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use log::warn;
use savings_core::{CaseStatus, DoctorRef, MedicationEntry, SavingsCase};
use serde_json::Value;

/// Normalize every row of a case export.
pub fn normalize_cases(rows: &[Value]) -> Vec<SavingsCase> {
    rows.iter().map(normalize_case).collect()
}

/// Normalize one case row. Missing or non-numeric amounts become 0 and an
/// unrecognized medication shape yields no entries; this never fails.
pub fn normalize_case(row: &Value) -> SavingsCase {
    let id = identifier(row.get("id")).unwrap_or_default();

    let created_at = row
        .get("created_at")
        .and_then(Value::as_str)
        .and_then(parse_timestamp);
    if created_at.is_none() {
        warn!("Case {id:?} has no usable created_at; it is left out of month and year buckets");
    }

    SavingsCase {
        diagnosis: text(row.get("diagnosis")).unwrap_or_default(),
        status: row
            .get("status")
            .and_then(Value::as_str)
            .map(CaseStatus::from_wire)
            .unwrap_or_default(),
        doctor_id: identifier(row.get("evaluating_doctor_id")),
        initial_monthly_cost: amount(row, "initial_monthly_cost"),
        current_monthly_cost: amount(row, "current_monthly_cost"),
        initial_projected_cost: amount(row, "initial_projected_cost"),
        current_projected_cost: amount(row, "current_projected_cost"),
        intervention_cost: amount(row, "intervention_cost"),
        monthly_savings: amount(row, "monthly_savings"),
        projected_savings: amount(row, "projected_savings"),
        savings_percentage: amount(row, "savings_percentage"),
        created_at,
        intervention_date: row
            .get("intervention_date")
            .and_then(Value::as_str)
            .and_then(parse_timestamp),
        medications: resolve_medications(&id, row.get("initial_medication")),
        evaluating_doctor: row.get("evaluating_doctor").and_then(extract_doctor),
        id,
    }
}

/// Parse an RFC 3339 timestamp, a naive `YYYY-MM-DDTHH:MM:SS` (taken as UTC)
/// or a bare `YYYY-MM-DD` date (UTC midnight).
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn amount(row: &Value, field: &str) -> f64 {
    row.get(field).and_then(Value::as_f64).unwrap_or(0.0)
}

fn text(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}

fn non_empty_text(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn identifier(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn resolve_medications(case_id: &str, value: Option<&Value>) -> Vec<MedicationEntry> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().map(medication_entry).collect(),
        Some(Value::Object(map)) => map.values().map(medication_entry).collect(),
        Some(other) => {
            warn!(
                "Case {case_id:?} has initial_medication of unsupported shape ({}); ignoring it",
                value_kind(other)
            );
            Vec::new()
        }
    }
}

fn medication_entry(value: &Value) -> MedicationEntry {
    MedicationEntry {
        name: non_empty_text(value.get("name")),
        medication: non_empty_text(value.get("medication")),
        dose: non_empty_text(value.get("dose")),
        frequency: non_empty_text(value.get("frequency")),
    }
}

fn extract_doctor(value: &Value) -> Option<DoctorRef> {
    if !value.is_object() {
        return None;
    }
    Some(DoctorRef {
        full_name: text(value.get("full_name")),
        specialty: text(value.get("specialty")),
    })
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
