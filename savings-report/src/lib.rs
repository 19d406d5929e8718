//! Cost-savings report builder: normalizes case rows and derives KPI,
//! time-series, leaderboard, yearly trend and latency views from them.

mod extract;
mod filter;
mod grouping;
mod kpi;
mod latency;
mod leaderboard;
mod series;
mod status;
mod trends;

use log::debug;
use savings_core::{ReportConfig, ReportError, SavingsCase, SavingsReport};
use serde_json::Value;

pub use extract::{normalize_case, normalize_cases, parse_timestamp};
pub use filter::CaseFilter;
pub use kpi::{roi_percentage, summarize_kpis};
pub use latency::average_days_to_intervention;
pub use leaderboard::{
    doctor_leaderboard, doctor_roi_leaderboard, medication_leaderboard, specialty_leaderboard,
};
pub use series::{cost_comparison, savings_evolution};
pub use status::status_distribution;
pub use trends::yearly_trends;

/// Build a report from a JSON string holding case rows.
pub fn build_report_str(
    cases_json: &str,
    config: &ReportConfig,
) -> Result<SavingsReport, ReportError> {
    let cases = cases_from_str(cases_json)?;
    Ok(build_report(&cases, config))
}

/// Build a report from a `serde_json::Value` holding case rows.
pub fn build_report_value(
    cases: &Value,
    config: &ReportConfig,
) -> Result<SavingsReport, ReportError> {
    let cases = cases_from_value(cases)?;
    Ok(build_report(&cases, config))
}

/// Parse and normalize case rows from a JSON string.
pub fn cases_from_str(cases_json: &str) -> Result<Vec<SavingsCase>, ReportError> {
    let value: Value =
        serde_json::from_str(cases_json).map_err(|err| ReportError::Parse(err.to_string()))?;
    cases_from_value(&value)
}

/// Normalize case rows given either as a JSON array or as an object with a
/// `cases` array.
pub fn cases_from_value(value: &Value) -> Result<Vec<SavingsCase>, ReportError> {
    let rows = match value {
        Value::Array(rows) => rows,
        Value::Object(map) => map
            .get("cases")
            .and_then(Value::as_array)
            .ok_or(ReportError::MissingData)?,
        _ => {
            return Err(ReportError::Parse(
                "Expected a JSON array of case rows".to_string(),
            ))
        }
    };

    Ok(normalize_cases(rows))
}

/// Derive every report view from normalized cases. An empty slice gives an
/// all-zero report.
pub fn build_report(cases: &[SavingsCase], config: &ReportConfig) -> SavingsReport {
    let doctors = doctor_leaderboard(cases, config);
    let doctor_roi = doctor_roi_leaderboard(cases, &doctors, config);

    let report = SavingsReport {
        kpis: summarize_kpis(cases),
        monthly_savings: savings_evolution(cases),
        cost_comparison: cost_comparison(cases),
        status_distribution: status_distribution(cases),
        top_medications: medication_leaderboard(cases, config),
        doctors,
        doctor_roi,
        specialties: specialty_leaderboard(cases, config),
        yearly_trends: yearly_trends(cases, config),
        avg_days_to_intervention: average_days_to_intervention(cases),
    };

    debug!(
        "Built report from {} cases: {} months, {} statuses, {} medications, {} doctors, {} years",
        cases.len(),
        report.monthly_savings.len(),
        report.status_distribution.len(),
        report.top_medications.len(),
        report.doctors.len(),
        report.yearly_trends.rows.len()
    );

    report
}
