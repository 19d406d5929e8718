use savings_core::SavingsCase;

use crate::kpi::mean;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Mean whole days from case creation to intervention, over cases that have
/// both timestamps. Each case's elapsed time is floored to whole days first.
pub fn average_days_to_intervention(cases: &[SavingsCase]) -> f64 {
    let days: Vec<i64> = cases
        .iter()
        .filter_map(|case| {
            let created = case.created_at?;
            let intervened = case.intervention_date?;
            let elapsed = intervened.signed_duration_since(created);
            Some(elapsed.num_milliseconds().div_euclid(MILLIS_PER_DAY))
        })
        .collect();

    mean(days.iter().sum::<i64>() as f64, days.len())
}
