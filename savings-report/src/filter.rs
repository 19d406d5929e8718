use chrono::{DateTime, Utc};
use savings_core::{CaseStatus, SavingsCase};
use serde::{Deserialize, Serialize};

/// Restrictions applied to normalized cases before a report is built. An
/// unset field places no restriction on that dimension.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CaseFilter {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub specialty: Option<String>,
    pub doctor_id: Option<String>,
    pub status: Option<CaseStatus>,
}

impl CaseFilter {
    pub fn is_empty(&self) -> bool {
        *self == CaseFilter::default()
    }

    pub fn matches(&self, case: &SavingsCase) -> bool {
        if let Some(start) = self.start_date {
            if !case.created_at.is_some_and(|created| created >= start) {
                return false;
            }
        }

        if let Some(end) = self.end_date {
            if !case.created_at.is_some_and(|created| created <= end) {
                return false;
            }
        }

        if let Some(specialty) = self.specialty.as_deref() {
            if case.doctor_specialty() != Some(specialty) {
                return false;
            }
        }

        if let Some(doctor_id) = self.doctor_id.as_deref() {
            if case.doctor_id.as_deref() != Some(doctor_id) {
                return false;
            }
        }

        match self.status {
            Some(status) => case.status == status,
            None => true,
        }
    }

    pub fn apply(&self, cases: Vec<SavingsCase>) -> Vec<SavingsCase> {
        if self.is_empty() {
            return cases;
        }
        cases.into_iter().filter(|case| self.matches(case)).collect()
    }
}
