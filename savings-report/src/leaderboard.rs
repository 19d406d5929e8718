use std::cmp::Ordering;
use std::collections::HashMap;

use savings_core::{DoctorRoiEntry, LeaderboardEntry, ReportConfig, SavingsCase};

use crate::grouping::OrderedGroups;
use crate::kpi::{mean, roi_percentage};

#[derive(Default)]
struct Tally {
    cases: usize,
    savings: f64,
    specialty: Option<String>,
}

impl Tally {
    fn add(&mut self, case: &SavingsCase) {
        self.cases += 1;
        self.savings += case.projected_savings;
    }
}

/// Top medications by attributed savings.
///
/// A case listing several medications credits its full projected savings to
/// each of them, so the board total can exceed the KPI total.
pub fn medication_leaderboard(
    cases: &[SavingsCase],
    config: &ReportConfig,
) -> Vec<LeaderboardEntry> {
    let mut groups: OrderedGroups<String, Tally> = OrderedGroups::new();
    for case in cases {
        for entry in &case.medications {
            let key = entry.display_name(&config.unnamed_medication_label);
            groups.bucket(key, Tally::default).add(case);
        }
    }

    let mut board = ranked(groups);
    board.truncate(config.medication_limit);
    board
}

/// Every doctor by cumulative savings. The specialty is taken from the first
/// case seen for each doctor.
pub fn doctor_leaderboard(cases: &[SavingsCase], config: &ReportConfig) -> Vec<LeaderboardEntry> {
    let mut groups: OrderedGroups<String, Tally> = OrderedGroups::new();
    for case in cases {
        let key = case.doctor_label(&config.unassigned_doctor_label);
        groups
            .bucket(key, || Tally {
                specialty: Some(
                    case.doctor_specialty()
                        .unwrap_or(&config.unknown_specialty_label)
                        .to_string(),
                ),
                ..Tally::default()
            })
            .add(case);
    }

    ranked(groups)
}

/// Savings per doctor specialty.
pub fn specialty_leaderboard(
    cases: &[SavingsCase],
    config: &ReportConfig,
) -> Vec<LeaderboardEntry> {
    let mut groups: OrderedGroups<String, Tally> = OrderedGroups::new();
    for case in cases {
        let key = case
            .doctor_specialty()
            .unwrap_or(&config.no_specialty_label);
        groups.bucket(key, Tally::default).add(case);
    }

    ranked(groups)
}

/// Doctors ranked by return on intervention cost.
///
/// Intervention cost is joined to each doctor entry by exact, case-sensitive
/// equality between the entry name and the case's stored doctor name. Cases
/// with no doctor never match, so the unassigned bucket reports an ROI of 0.
pub fn doctor_roi_leaderboard(
    cases: &[SavingsCase],
    doctors: &[LeaderboardEntry],
    config: &ReportConfig,
) -> Vec<DoctorRoiEntry> {
    let mut cost_by_name: HashMap<&str, f64> = HashMap::new();
    for case in cases {
        if let Some(name) = case.doctor_name() {
            *cost_by_name.entry(name).or_insert(0.0) += case.intervention_cost;
        }
    }

    let mut board: Vec<DoctorRoiEntry> = doctors
        .iter()
        .map(|doctor| {
            let intervention_cost = cost_by_name
                .get(doctor.name.as_str())
                .copied()
                .unwrap_or(0.0);
            DoctorRoiEntry {
                name: doctor.name.clone(),
                specialty: doctor.specialty.clone(),
                cases: doctor.cases,
                savings: doctor.savings,
                intervention_cost,
                avg_savings: mean(doctor.savings, doctor.cases),
                roi: roi_percentage(doctor.savings, intervention_cost),
            }
        })
        .collect();

    board.sort_by(|a, b| b.roi.partial_cmp(&a.roi).unwrap_or(Ordering::Equal));
    board.truncate(config.doctor_roi_limit);
    board
}

// Stable sort: equal savings keep first-seen order.
fn ranked(groups: OrderedGroups<String, Tally>) -> Vec<LeaderboardEntry> {
    let mut board: Vec<LeaderboardEntry> = groups
        .into_vec()
        .into_iter()
        .map(|(name, tally)| LeaderboardEntry {
            name,
            cases: tally.cases,
            savings: tally.savings,
            specialty: tally.specialty,
        })
        .collect();
    board.sort_by(|a, b| b.savings.partial_cmp(&a.savings).unwrap_or(Ordering::Equal));
    board
}
