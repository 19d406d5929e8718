use savings_core::{KpiSummary, SavingsCase};

/// Reduce the case list to its headline metrics.
pub fn summarize_kpis(cases: &[SavingsCase]) -> KpiSummary {
    let total_savings: f64 = cases.iter().map(|case| case.projected_savings).sum();
    let percentage_sum: f64 = cases.iter().map(|case| case.savings_percentage).sum();
    let total_intervention_cost: f64 = cases.iter().map(|case| case.intervention_cost).sum();
    let total_initial_cost: f64 = cases.iter().map(|case| case.initial_projected_cost).sum();

    KpiSummary {
        total_cases: cases.len(),
        total_savings,
        avg_savings_percentage: mean(percentage_sum, cases.len()),
        roi: roi_percentage(total_savings, total_intervention_cost),
        total_intervention_cost,
        total_initial_cost,
    }
}

/// `(savings - cost) / cost * 100`, or 0 when `cost` is not positive.
pub fn roi_percentage(savings: f64, cost: f64) -> f64 {
    if cost > 0.0 {
        (savings - cost) / cost * 100.0
    } else {
        0.0
    }
}

pub(crate) fn mean(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
