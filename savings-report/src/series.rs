use savings_core::{CostComparisonPoint, MonthlyPoint, SavingsCase};

use crate::grouping::OrderedGroups;

#[derive(Default)]
struct SavingsAcc {
    savings_sum: f64,
    case_count: usize,
}

#[derive(Default)]
struct CostAcc {
    initial_cost_sum: f64,
    current_cost_sum: f64,
}

/// Projected savings and case count per calendar month, oldest first.
pub fn savings_evolution(cases: &[SavingsCase]) -> Vec<MonthlyPoint> {
    group_by_month(cases, |acc: &mut SavingsAcc, case| {
        acc.savings_sum += case.projected_savings;
        acc.case_count += 1;
    })
    .into_iter()
    .map(|(month, acc)| MonthlyPoint {
        month,
        savings_sum: acc.savings_sum,
        case_count: acc.case_count,
    })
    .collect()
}

/// Initial vs current projected cost per calendar month, oldest first.
pub fn cost_comparison(cases: &[SavingsCase]) -> Vec<CostComparisonPoint> {
    group_by_month(cases, |acc: &mut CostAcc, case| {
        acc.initial_cost_sum += case.initial_projected_cost;
        acc.current_cost_sum += case.current_projected_cost;
    })
    .into_iter()
    .map(|(month, acc)| CostComparisonPoint {
        month,
        initial_cost_sum: acc.initial_cost_sum,
        current_cost_sum: acc.current_cost_sum,
    })
    .collect()
}

// Input is not guaranteed chronological, so buckets are re-sorted by their
// `YYYY-MM` key after grouping.
fn group_by_month<V, F>(cases: &[SavingsCase], mut accumulate: F) -> Vec<(String, V)>
where
    V: Default,
    F: FnMut(&mut V, &SavingsCase),
{
    let mut groups: OrderedGroups<String, V> = OrderedGroups::new();
    for case in cases {
        let Some(month) = case.month_key() else {
            continue;
        };
        accumulate(groups.bucket(month.as_str(), V::default), case);
    }

    let mut months = groups.into_vec();
    months.sort_by(|a, b| a.0.cmp(&b.0));
    months
}
