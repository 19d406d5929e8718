//! Core types for cost-savings case analytics: the normalized case record and
//! every derived view the report builder produces.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Limits and fallback labels used while building a report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    /// Number of entries kept in the medication leaderboard.
    pub medication_limit: usize,
    /// Number of entries kept in the doctor ROI leaderboard.
    pub doctor_roi_limit: usize,
    /// Number of most recent years kept in the yearly trend table.
    pub yearly_window: usize,
    /// Doctor bucket used for cases with no evaluating doctor.
    pub unassigned_doctor_label: String,
    /// Key used for medication entries with neither `name` nor `medication`.
    pub unnamed_medication_label: String,
    /// Specialty shown for a doctor bucket whose first case has no specialty.
    pub unknown_specialty_label: String,
    /// Specialty bucket used when a case has no doctor specialty.
    pub no_specialty_label: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            medication_limit: 10,
            doctor_roi_limit: 10,
            yearly_window: 5,
            unassigned_doctor_label: "Unassigned".to_string(),
            unnamed_medication_label: "unnamed".to_string(),
            unknown_specialty_label: "N/A".to_string(),
            no_specialty_label: "No specialty".to_string(),
        }
    }
}

/// Lifecycle status of a cost-savings case.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    #[serde(alias = "en_evaluacion")]
    InEvaluation,
    #[serde(alias = "intervenido")]
    Intervened,
    #[serde(alias = "completado")]
    Completed,
    #[serde(alias = "sin_optimizacion")]
    NoOptimization,
    #[default]
    Unknown,
}

impl CaseStatus {
    /// Map a stored status value, accepting both the English names and the
    /// store's Spanish enum values.
    pub fn from_wire(value: &str) -> Self {
        match value.trim() {
            "in_evaluation" | "en_evaluacion" => CaseStatus::InEvaluation,
            "intervened" | "intervenido" => CaseStatus::Intervened,
            "completed" | "completado" => CaseStatus::Completed,
            "no_optimization" | "sin_optimizacion" => CaseStatus::NoOptimization,
            _ => CaseStatus::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStatus::InEvaluation => "in_evaluation",
            CaseStatus::Intervened => "intervened",
            CaseStatus::Completed => "completed",
            CaseStatus::NoOptimization => "no_optimization",
            CaseStatus::Unknown => "unknown",
        }
    }
}

/// One medication listed on a case.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct MedicationEntry {
    pub name: Option<String>,
    pub medication: Option<String>,
    pub dose: Option<String>,
    pub frequency: Option<String>,
}

impl MedicationEntry {
    /// Leaderboard key: `name`, then `medication`, then `fallback`.
    pub fn display_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.medication.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or(fallback)
    }
}

/// Evaluating doctor attached to a case.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DoctorRef {
    pub full_name: Option<String>,
    pub specialty: Option<String>,
}

/// A case after null-safe normalization. Every monetary and percentage
/// field is already coalesced to 0.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SavingsCase {
    pub id: String,
    pub diagnosis: String,
    pub status: CaseStatus,
    pub doctor_id: Option<String>,
    pub initial_monthly_cost: f64,
    pub current_monthly_cost: f64,
    pub initial_projected_cost: f64,
    pub current_projected_cost: f64,
    pub intervention_cost: f64,
    pub monthly_savings: f64,
    pub projected_savings: f64,
    pub savings_percentage: f64,
    pub created_at: Option<DateTime<Utc>>,
    pub intervention_date: Option<DateTime<Utc>>,
    pub medications: Vec<MedicationEntry>,
    pub evaluating_doctor: Option<DoctorRef>,
}

impl SavingsCase {
    /// Calendar month bucket (`YYYY-MM`, UTC) of the creation timestamp.
    pub fn month_key(&self) -> Option<String> {
        self.created_at.map(|ts| ts.format("%Y-%m").to_string())
    }

    /// Calendar year bucket (UTC) of the creation timestamp.
    pub fn year(&self) -> Option<i32> {
        self.created_at.map(|ts| ts.year())
    }

    /// Raw doctor name, exactly as stored.
    pub fn doctor_name(&self) -> Option<&str> {
        self.evaluating_doctor
            .as_ref()
            .and_then(|doctor| doctor.full_name.as_deref())
    }

    /// Doctor name used as a grouping key, or `fallback` when none is set.
    pub fn doctor_label<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.doctor_name().filter(|s| !s.is_empty()).unwrap_or(fallback)
    }

    pub fn doctor_specialty(&self) -> Option<&str> {
        self.evaluating_doctor
            .as_ref()
            .and_then(|doctor| doctor.specialty.as_deref())
            .filter(|s| !s.is_empty())
    }
}

/// Headline metrics.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct KpiSummary {
    pub total_cases: usize,
    pub total_savings: f64,
    pub avg_savings_percentage: f64,
    pub roi: f64,
    pub total_intervention_cost: f64,
    pub total_initial_cost: f64,
}

/// Savings accumulated for one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyPoint {
    pub month: String,
    pub savings_sum: f64,
    pub case_count: usize,
}

/// Initial vs current projected cost for one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CostComparisonPoint {
    pub month: String,
    pub initial_cost_sum: f64,
    pub current_cost_sum: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusCount {
    pub status: CaseStatus,
    pub count: usize,
}

/// One bucket of a medication, doctor or specialty leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaderboardEntry {
    pub name: String,
    pub cases: usize,
    pub savings: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
}

/// Doctor leaderboard entry enriched with intervention cost and ROI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DoctorRoiEntry {
    pub name: String,
    pub specialty: Option<String>,
    pub cases: usize,
    pub savings: f64,
    pub intervention_cost: f64,
    pub avg_savings: f64,
    pub roi: f64,
}

/// Summary statistics for one calendar year.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct YearlyTrendRow {
    pub year: i32,
    pub cases: usize,
    pub total_savings: f64,
    pub total_intervention_cost: f64,
    pub avg_savings: f64,
    pub avg_percentage: f64,
    pub roi: f64,
}

/// Most recent years, newest first, with the best year of that window.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct YearlyTrends {
    pub rows: Vec<YearlyTrendRow>,
    pub best_year: Option<i32>,
}

impl YearlyTrends {
    pub fn best_row(&self) -> Option<&YearlyTrendRow> {
        let year = self.best_year?;
        self.rows.iter().find(|row| row.year == year)
    }
}

/// Every derived view produced for one report request.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SavingsReport {
    pub kpis: KpiSummary,
    pub monthly_savings: Vec<MonthlyPoint>,
    pub cost_comparison: Vec<CostComparisonPoint>,
    pub status_distribution: Vec<StatusCount>,
    pub top_medications: Vec<LeaderboardEntry>,
    pub doctors: Vec<LeaderboardEntry>,
    pub doctor_roi: Vec<DoctorRoiEntry>,
    pub specialties: Vec<LeaderboardEntry>,
    pub yearly_trends: YearlyTrends,
    pub avg_days_to_intervention: f64,
}

impl SavingsReport {
    /// True when the report was built from no cases at all.
    pub fn is_empty(&self) -> bool {
        self.kpis.total_cases == 0
    }
}

/// Errors raised while reading case data.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Input is missing required case data")]
    MissingData,
    #[error("Could not read case data: {0}")]
    Parse(String),
}

/// Report for an empty case list.
pub fn empty_report() -> SavingsReport {
    SavingsReport::default()
}
