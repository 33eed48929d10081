use crate::types::{CustomerSales, PeriodLabel, SaleValue, Snapshot};
use std::collections::HashSet;

/// Distinct customers seen with a positive sale.
///
/// Each product fills its own accumulator; a distributor merges the ones of
/// its products once they are done.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerUnion {
    customers: HashSet<String>,
}

impl CustomerUnion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, customer: &str) {
        self.customers.insert(customer.to_owned());
    }

    pub fn merge(&mut self, other: CustomerUnion) {
        self.customers.extend(other.customers);
    }

    pub fn contains(&self, customer: &str) -> bool {
        self.customers.contains(customer)
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}

/// Amount of a positive sale, or `None` when the customer did not buy.
pub fn positive_sale(value: SaleValue) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}

/// Active customers and total sales of one product in `period`.
///
/// Every active customer is also recorded in `seen`.
pub fn compute_snapshot(
    customers: &CustomerSales,
    period: &str,
    seen: &mut CustomerUnion,
) -> Snapshot {
    let mut snapshot = Snapshot {
        period: PeriodLabel::from(period),
        active_customers: Default::default(),
        total_sales: 0.0,
    };
    for (customer, sales) in customers {
        let Some(amount) = sales.get(period).copied().and_then(positive_sale) else {
            continue;
        };
        snapshot.active_customers.insert(customer.clone());
        snapshot.total_sales += amount;
        seen.record(customer);
    }
    snapshot
}

/// Record every customer with a positive sale in any period, resolved or not.
pub fn record_all_buyers(customers: &CustomerSales, seen: &mut CustomerUnion) {
    for (customer, sales) in customers {
        if sales.values().any(|v| positive_sale(*v).is_some()) {
            seen.record(customer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PeriodSales;

    fn product() -> CustomerSales {
        let mut c = CustomerSales::new();
        let x: PeriodSales = [("Jan", Some(100.0)), ("Feb", Some(0.0)), ("Mar", Some(50.0))]
            .into_iter()
            .map(|(p, v)| (p.to_string(), v))
            .collect();
        let y: PeriodSales = [("Jan", None), ("Feb", Some(200.0)), ("Mar", Some(200.0))]
            .into_iter()
            .map(|(p, v)| (p.to_string(), v))
            .collect();
        let z: PeriodSales = [("Jan", Some(-5.0)), ("Mar", Some(f64::NAN)), ("Apr", Some(10.0))]
            .into_iter()
            .map(|(p, v)| (p.to_string(), v))
            .collect();
        c.insert("X".into(), x);
        c.insert("Y".into(), y);
        c.insert("Z".into(), z);
        c
    }

    #[test]
    fn only_strictly_positive_sales_are_active() {
        let mut seen = CustomerUnion::new();
        let jan = compute_snapshot(&product(), "Jan", &mut seen);
        assert_eq!(jan.active_customers.len(), 1);
        assert!(jan.active_customers.contains("X"));
        assert_eq!(jan.total_sales, 100.0);

        let mar = compute_snapshot(&product(), "Mar", &mut seen);
        assert_eq!(mar.active_customers.len(), 2);
        assert!(!mar.active_customers.contains("Z"));
        assert_eq!(mar.total_sales, 250.0);
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn nan_and_negative_sales_are_inactive() {
        assert_eq!(positive_sale(Some(f64::NAN)), None);
        assert_eq!(positive_sale(Some(-5.0)), None);
        assert_eq!(positive_sale(Some(0.0)), None);
        assert_eq!(positive_sale(None), None);
        assert_eq!(positive_sale(Some(0.5)), Some(0.5));
    }

    #[test]
    fn unknown_period_is_empty() {
        let mut seen = CustomerUnion::new();
        let snap = compute_snapshot(&product(), "Dec", &mut seen);
        assert!(snap.active_customers.is_empty());
        assert_eq!(snap.total_sales, 0.0);
        assert!(seen.is_empty());
    }

    #[test]
    fn record_all_buyers_covers_unresolved_periods() {
        let mut seen = CustomerUnion::new();
        record_all_buyers(&product(), &mut seen);
        assert_eq!(seen.len(), 3);
        assert!(seen.contains("Z"));
    }

    #[test]
    fn merging_unions_deduplicates() {
        let mut a = CustomerUnion::new();
        a.record("X");
        a.record("Y");
        let mut b = CustomerUnion::new();
        b.record("Y");
        b.record("Z");
        a.merge(b);
        assert_eq!(a.len(), 3);
        a.record("X");
        assert_eq!(a.len(), 3);
    }
}
