use savings_core::{ReportConfig, SavingsCase, YearlyTrendRow, YearlyTrends};

use crate::grouping::OrderedGroups;
use crate::kpi::{mean, roi_percentage};

#[derive(Default)]
struct YearAcc {
    cases: usize,
    total_savings: f64,
    total_intervention_cost: f64,
}

/// Year-over-year table, newest year first, limited to the configured window.
pub fn yearly_trends(cases: &[SavingsCase], config: &ReportConfig) -> YearlyTrends {
    let mut groups: OrderedGroups<i32, YearAcc> = OrderedGroups::new();
    for case in cases {
        let Some(year) = case.year() else {
            continue;
        };
        let acc = groups.bucket(&year, YearAcc::default);
        acc.cases += 1;
        acc.total_savings += case.projected_savings;
        acc.total_intervention_cost += case.intervention_cost;
    }

    let mut rows: Vec<YearlyTrendRow> = groups
        .into_vec()
        .into_iter()
        .map(|(year, acc)| {
            let percentage_sum: f64 = cases
                .iter()
                .filter(|case| case.year() == Some(year))
                .map(|case| case.savings_percentage)
                .sum();
            YearlyTrendRow {
                year,
                cases: acc.cases,
                total_savings: acc.total_savings,
                total_intervention_cost: acc.total_intervention_cost,
                avg_savings: mean(acc.total_savings, acc.cases),
                avg_percentage: mean(percentage_sum, acc.cases),
                roi: roi_percentage(acc.total_savings, acc.total_intervention_cost),
            }
        })
        .collect();

    rows.sort_by(|a, b| b.year.cmp(&a.year));
    rows.truncate(config.yearly_window);

    let best_year = best_year(&rows);
    YearlyTrends { rows, best_year }
}

// Only rows inside the displayed window compete. The running maximum starts
// at 0 and needs a strictly greater total to move, so ties keep the newer
// year and a window with no positive savings has no best year.
fn best_year(rows: &[YearlyTrendRow]) -> Option<i32> {
    let mut best: Option<&YearlyTrendRow> = None;
    for row in rows {
        let current = best.map_or(0.0, |leader| leader.total_savings);
        if row.total_savings > current {
            best = Some(row);
        }
    }
    best.map(|row| row.year)
}
