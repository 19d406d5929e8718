use savings_core::{CaseStatus, ReportConfig, SavingsCase};
use savings_report::{
    average_days_to_intervention, build_report, build_report_value, cases_from_value,
    doctor_leaderboard, doctor_roi_leaderboard, medication_leaderboard, savings_evolution,
    status_distribution, summarize_kpis, yearly_trends,
};
use serde_json::{json, Value};

fn row(id: &str, created_at: &str, projected_savings: f64) -> Value {
    json!({
        "id": id,
        "status": "intervened",
        "created_at": created_at,
        "projected_savings": projected_savings,
    })
}

fn normalize(rows: Value) -> Vec<SavingsCase> {
    cases_from_value(&rows).expect("rows should normalize")
}

#[test]
fn scenario_a_months_group_and_sort() {
    let cases = normalize(json!([
        row("a", "2024-01-05T10:00:00Z", 100.0),
        row("b", "2024-02-11T10:00:00Z", 200.0),
        row("c", "2024-01-20T10:00:00Z", 300.0),
    ]));
    let report = build_report(&cases, &ReportConfig::default());

    let months: Vec<(&str, f64, usize)> = report
        .monthly_savings
        .iter()
        .map(|point| (point.month.as_str(), point.savings_sum, point.case_count))
        .collect();
    assert_eq!(months, vec![("2024-01", 400.0, 2), ("2024-02", 200.0, 1)]);
    assert_eq!(report.kpis.total_savings, 600.0);
}

#[test]
fn scenario_b_empty_input_is_all_zero() {
    let report = build_report_value(&json!([]), &ReportConfig::default())
        .expect("empty list is valid input");

    assert!(report.is_empty());
    assert_eq!(report.kpis.total_cases, 0);
    assert_eq!(report.kpis.total_savings, 0.0);
    assert_eq!(report.kpis.avg_savings_percentage, 0.0);
    assert_eq!(report.kpis.roi, 0.0);
    assert!(report.monthly_savings.is_empty());
    assert!(report.cost_comparison.is_empty());
    assert!(report.status_distribution.is_empty());
    assert!(report.top_medications.is_empty());
    assert!(report.doctors.is_empty());
    assert!(report.doctor_roi.is_empty());
    assert!(report.specialties.is_empty());
    assert!(report.yearly_trends.rows.is_empty());
    assert_eq!(report.yearly_trends.best_year, None);
    assert_eq!(report.avg_days_to_intervention, 0.0);
    assert_eq!(report, savings_core::empty_report());
}

#[test]
fn scenario_c_zero_intervention_cost_guards_roi() {
    let cases = normalize(json!([{
        "id": "c",
        "created_at": "2024-04-01T00:00:00Z",
        "projected_savings": 500,
        "intervention_cost": 0,
        "evaluating_doctor": { "full_name": "Dr. Vega", "specialty": "Nefrología" }
    }]));
    let config = ReportConfig::default();

    let doctors = doctor_leaderboard(&cases, &config);
    let roi = doctor_roi_leaderboard(&cases, &doctors, &config);

    assert_eq!(roi.len(), 1);
    assert_eq!(roi[0].name, "Dr. Vega");
    assert_eq!(roi[0].roi, 0.0);
    assert_eq!(roi[0].avg_savings, 500.0);
}

#[test]
fn scenario_d_each_medication_gets_full_savings() {
    let cases = normalize(json!([{
        "id": "d",
        "created_at": "2024-04-01T00:00:00Z",
        "projected_savings": 50,
        "initial_medication": [{ "name": "A" }, { "medication": "B" }]
    }]));
    let board = medication_leaderboard(&cases, &ReportConfig::default());

    let entries: Vec<(&str, usize, f64)> = board
        .iter()
        .map(|entry| (entry.name.as_str(), entry.cases, entry.savings))
        .collect();
    assert_eq!(entries, vec![("A", 1, 50.0), ("B", 1, 50.0)]);

    let board_total: f64 = board.iter().map(|entry| entry.savings).sum();
    assert_eq!(board_total, 100.0);
    assert!(board_total > summarize_kpis(&cases).total_savings);
}

#[test]
fn total_savings_ignores_input_order() {
    let rows = vec![
        row("a", "2023-03-01T00:00:00Z", 125.5),
        row("b", "2024-07-01T00:00:00Z", -40.25),
        row("c", "2022-01-01T00:00:00Z", 1000.0),
        row("d", "2024-07-09T00:00:00Z", 0.75),
    ];
    let forward = normalize(Value::Array(rows.clone()));
    let mut reversed_rows = rows;
    reversed_rows.reverse();
    let reversed = normalize(Value::Array(reversed_rows));

    let forward_kpis = summarize_kpis(&forward);
    assert_eq!(forward_kpis.total_cases, 4);
    assert_eq!(forward_kpis.total_savings, summarize_kpis(&reversed).total_savings);
    assert_eq!(
        savings_evolution(&forward),
        savings_evolution(&reversed),
        "monthly series must not depend on input order"
    );
}

#[test]
fn roi_is_zero_without_intervention_cost() {
    let cases = normalize(json!([
        row("a", "2024-01-01T00:00:00Z", -300.0),
        row("b", "2024-01-02T00:00:00Z", 100.0),
    ]));

    let kpis = summarize_kpis(&cases);
    assert_eq!(kpis.total_intervention_cost, 0.0);
    assert_eq!(kpis.roi, 0.0);
}

#[test]
fn monthly_series_sums_to_total_savings() {
    let cases = normalize(json!([
        row("a", "2024-03-01T00:00:00Z", 10.0),
        row("b", "2023-12-31T23:59:59Z", 20.0),
        row("c", "2024-03-15T00:00:00Z", 30.0),
        row("d", "2024-01-01T00:00:00Z", 40.0),
    ]));
    let series = savings_evolution(&cases);

    let months: Vec<&str> = series.iter().map(|point| point.month.as_str()).collect();
    assert_eq!(months, vec!["2023-12", "2024-01", "2024-03"]);

    let series_total: f64 = series.iter().map(|point| point.savings_sum).sum();
    assert_eq!(series_total, summarize_kpis(&cases).total_savings);
}

#[test]
fn medication_board_keeps_top_ten_in_descending_order() {
    let medications: Vec<Value> = (0..12)
        .map(|index| json!({ "name": format!("Med {index}") }))
        .collect();
    let mut rows = Vec::new();
    for (index, medication) in medications.into_iter().enumerate() {
        let savings = (index % 4) as f64 * 100.0;
        rows.push(json!({
            "id": format!("m{index}"),
            "created_at": "2024-05-01T00:00:00Z",
            "projected_savings": savings,
            "initial_medication": [medication]
        }));
    }
    let board = medication_leaderboard(&normalize(Value::Array(rows)), &ReportConfig::default());

    assert_eq!(board.len(), 10);
    assert!(board
        .windows(2)
        .all(|pair| pair[0].savings >= pair[1].savings));
    // Ties keep first-seen order: Med 3 and Med 7 both saved 300.
    assert_eq!(board[0].name, "Med 3");
    assert_eq!(board[1].name, "Med 7");
}

#[test]
fn unassigned_doctor_bucket_collects_cases_without_doctor() {
    let cases = normalize(json!([
        {
            "id": "a",
            "created_at": "2024-01-01T00:00:00Z",
            "projected_savings": 70,
            "evaluating_doctor": null
        },
        {
            "id": "b",
            "created_at": "2024-01-02T00:00:00Z",
            "projected_savings": 30,
            "evaluating_doctor": { "full_name": "Dr. Sosa", "specialty": "Pediatría" }
        },
        {
            "id": "c",
            "created_at": "2024-01-03T00:00:00Z",
            "projected_savings": 5
        }
    ]));
    let board = doctor_leaderboard(&cases, &ReportConfig::default());

    assert_eq!(board.len(), 2);
    assert_eq!(board[0].name, "Unassigned");
    assert_eq!(board[0].cases, 2);
    assert_eq!(board[0].savings, 75.0);
    assert_eq!(board[0].specialty.as_deref(), Some("N/A"));
    assert_eq!(board[1].name, "Dr. Sosa");
    assert!(board.iter().all(|entry| entry.cases > 0));
}

#[test]
fn doctor_specialty_comes_from_first_case() {
    let cases = normalize(json!([
        {
            "id": "a",
            "created_at": "2024-01-01T00:00:00Z",
            "evaluating_doctor": { "full_name": "Dr. Sosa", "specialty": "Pediatría" }
        },
        {
            "id": "b",
            "created_at": "2024-01-02T00:00:00Z",
            "projected_savings": 30,
            "evaluating_doctor": { "full_name": "Dr. Sosa", "specialty": "Neonatología" }
        }
    ]));
    let board = doctor_leaderboard(&cases, &ReportConfig::default());

    assert_eq!(board.len(), 1);
    assert_eq!(board[0].specialty.as_deref(), Some("Pediatría"));
}

#[test]
fn doctor_roi_matches_names_exactly() {
    let cases = normalize(json!([
        {
            "id": "a",
            "created_at": "2024-01-01T00:00:00Z",
            "projected_savings": 300,
            "intervention_cost": 100,
            "evaluating_doctor": { "full_name": "Dr. Sosa" }
        },
        {
            "id": "b",
            "created_at": "2024-01-02T00:00:00Z",
            "projected_savings": 0,
            "intervention_cost": 900,
            "evaluating_doctor": { "full_name": "DR. SOSA" }
        }
    ]));
    let config = ReportConfig::default();
    let doctors = doctor_leaderboard(&cases, &config);
    let roi = doctor_roi_leaderboard(&cases, &doctors, &config);

    let sosa = roi
        .iter()
        .find(|entry| entry.name == "Dr. Sosa")
        .expect("Dr. Sosa should be ranked");
    assert_eq!(sosa.intervention_cost, 100.0);
    assert_eq!(sosa.roi, 200.0);
    assert_eq!(roi[0].name, "Dr. Sosa");
    assert_eq!(roi[1].roi, -100.0);
}

#[test]
fn doctor_roi_board_is_capped() {
    let rows: Vec<Value> = (0..14)
        .map(|index: u32| {
            let savings = 100 + index;
            json!({
                "id": format!("r{index}"),
                "created_at": "2024-01-01T00:00:00Z",
                "projected_savings": savings,
                "intervention_cost": 50,
                "evaluating_doctor": { "full_name": format!("Doctor {index}") }
            })
        })
        .collect();
    let cases = normalize(Value::Array(rows));
    let config = ReportConfig::default();
    let doctors = doctor_leaderboard(&cases, &config);
    let roi = doctor_roi_leaderboard(&cases, &doctors, &config);

    assert_eq!(doctors.len(), 14);
    assert_eq!(roi.len(), 10);
    assert_eq!(roi[0].name, "Doctor 13");
    assert!(roi.windows(2).all(|pair| pair[0].roi >= pair[1].roi));
}

#[test]
fn yearly_table_keeps_five_latest_years() {
    let rows: Vec<Value> = (2017..=2024)
        .map(|year| {
            let savings = if year == 2018 { 10_000.0 } else { (year - 2000) as f64 };
            row(&format!("y{year}"), &format!("{year}-06-15T00:00:00Z"), savings)
        })
        .collect();
    let trends = yearly_trends(&normalize(Value::Array(rows)), &ReportConfig::default());

    let years: Vec<i32> = trends.rows.iter().map(|row| row.year).collect();
    assert_eq!(years, vec![2024, 2023, 2022, 2021, 2020]);
    // 2018 has the historical maximum but lies outside the window.
    assert_eq!(trends.best_year, Some(2024));
    assert_eq!(trends.best_row().map(|row| row.total_savings), Some(24.0));
}

#[test]
fn yearly_average_percentage_is_mean_of_year_cases() {
    let cases = normalize(json!([
        {
            "id": "a",
            "created_at": "2023-02-01T00:00:00Z",
            "projected_savings": 100,
            "savings_percentage": 30,
            "intervention_cost": 50
        },
        {
            "id": "b",
            "created_at": "2023-09-01T00:00:00Z",
            "projected_savings": 300,
            "savings_percentage": null
        },
        {
            "id": "c",
            "created_at": "2024-01-01T00:00:00Z",
            "savings_percentage": 90
        }
    ]));
    let trends = yearly_trends(&cases, &ReportConfig::default());

    let year_2023 = &trends.rows[1];
    assert_eq!(year_2023.year, 2023);
    assert_eq!(year_2023.cases, 2);
    assert_eq!(year_2023.avg_savings, 200.0);
    assert_eq!(year_2023.avg_percentage, 15.0);
    assert_eq!(year_2023.roi, 700.0);
    assert_eq!(trends.best_year, Some(2023));
}

#[test]
fn best_year_absent_without_positive_savings() {
    let cases = normalize(json!([
        row("a", "2023-01-01T00:00:00Z", 0.0),
        row("b", "2024-01-01T00:00:00Z", -20.0),
    ]));
    let trends = yearly_trends(&cases, &ReportConfig::default());

    assert_eq!(trends.rows.len(), 2);
    assert_eq!(trends.best_year, None);
    assert!(trends.best_row().is_none());
}

#[test]
fn best_year_tie_keeps_most_recent() {
    let cases = normalize(json!([
        row("a", "2022-01-01T00:00:00Z", 500.0),
        row("b", "2024-01-01T00:00:00Z", 500.0),
    ]));
    assert_eq!(
        yearly_trends(&cases, &ReportConfig::default()).best_year,
        Some(2024)
    );
}

#[test]
fn latency_is_zero_without_intervention_dates() {
    let cases = normalize(json!([
        row("a", "2024-01-01T00:00:00Z", 1.0),
        { "id": "b", "intervention_date": "2024-01-04T00:00:00Z" },
    ]));
    assert_eq!(average_days_to_intervention(&cases), 0.0);
}

#[test]
fn latency_floors_each_case_before_averaging() {
    let cases = normalize(json!([
        {
            "id": "a",
            "created_at": "2024-01-01T00:00:00Z",
            "intervention_date": "2024-01-03T23:00:00Z"
        },
        {
            "id": "b",
            "created_at": "2024-01-01T12:00:00Z",
            "intervention_date": "2024-01-01"
        },
        {
            "id": "c",
            "created_at": "2024-01-01T00:00:00Z"
        }
    ]));

    // 2 full days, and half a day backwards floors to -1.
    assert_eq!(average_days_to_intervention(&cases), 0.5);
}

#[test]
fn status_distribution_uses_first_occurrence_order() {
    let cases = normalize(json!([
        { "id": "a", "status": "completed" },
        { "id": "b", "status": "en_evaluacion" },
        { "id": "c", "status": "completado" },
        { "id": "d", "status": "archived" },
    ]));
    let distribution = status_distribution(&cases);

    let rows: Vec<(CaseStatus, usize)> = distribution
        .iter()
        .map(|row| (row.status, row.count))
        .collect();
    assert_eq!(
        rows,
        vec![
            (CaseStatus::Completed, 2),
            (CaseStatus::InEvaluation, 1),
            (CaseStatus::Unknown, 1),
        ]
    );
}

#[test]
fn custom_limits_apply() {
    let config = ReportConfig {
        medication_limit: 1,
        yearly_window: 1,
        ..ReportConfig::default()
    };
    let cases = normalize(json!([
        {
            "id": "a",
            "created_at": "2023-01-01T00:00:00Z",
            "projected_savings": 5,
            "initial_medication": [{ "name": "X" }, { "name": "Y" }]
        },
        row("b", "2024-01-01T00:00:00Z", 1.0),
    ]));
    let report = build_report(&cases, &config);

    assert_eq!(report.top_medications.len(), 1);
    assert_eq!(report.yearly_trends.rows.len(), 1);
    assert_eq!(report.yearly_trends.best_year, Some(2024));
}
