use savings_core::{CaseStatus, SavingsCase, StatusCount};

use crate::grouping::OrderedGroups;

/// Case count per status, in order of first occurrence. Statuses with no
/// cases produce no row.
pub fn status_distribution(cases: &[SavingsCase]) -> Vec<StatusCount> {
    let mut groups: OrderedGroups<CaseStatus, usize> = OrderedGroups::new();
    for case in cases {
        *groups.bucket(&case.status, || 0) += 1;
    }

    groups
        .into_vec()
        .into_iter()
        .map(|(status, count)| StatusCount { status, count })
        .collect()
}
