use crate::types::{Comparison, Snapshot};
use crate::util::round_to;

/// Compare each snapshot with the one before it.
///
/// Fewer than two snapshots yield no comparisons.
pub fn compare_snapshots(snapshots: &[Snapshot]) -> Vec<Comparison> {
    snapshots
        .windows(2)
        .map(|pair| compare_pair(&pair[0], &pair[1]))
        .collect()
}

pub fn compare_pair(prev: &Snapshot, curr: &Snapshot) -> Comparison {
    let retained = prev
        .active_customers
        .intersection(&curr.active_customers)
        .count();
    let lost = prev.active_customers.len() - retained;
    let added = curr.active_customers.len() - retained;

    Comparison {
        period_pair: (prev.period.clone(), curr.period.clone()),
        comparison: format!("{} vs {}", prev.period, curr.period),
        retention_rate: retention_rate(retained, prev.active_customers.len()),
        growth_rate: growth_rate(prev.total_sales, curr.total_sales),
        retained_count: retained,
        new_count: added,
        lost_count: lost,
    }
}

/// Share of the previous period's customers still active, in percent.
/// An empty previous period reports 0.
pub fn retention_rate(retained: usize, previous: usize) -> f64 {
    if previous == 0 {
        return 0.0;
    }
    round_to(retained as f64 / previous as f64 * 100.0, 2)
}

/// Sales change relative to the previous period, in percent.
///
/// A previous total of zero reports 0, even when the current period sold
/// something.
pub fn growth_rate(prev_sales: f64, curr_sales: f64) -> f64 {
    if prev_sales == 0.0 {
        return 0.0;
    }
    let growth = round_to((curr_sales - prev_sales) / prev_sales * 100.0, 2);
    if growth.is_finite() {
        growth
    } else {
        0.0
    }
}
