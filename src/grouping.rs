use crate::types::{GroupedData, Row};

/// Fold the decoded rows into distributor -> product -> customer -> sales.
///
/// A repeated (distributor, product, customer) key replaces the earlier
/// sales entirely but keeps the customer's original position, so the
/// "first customer" of a product is the first one ever seen for it.
pub fn group_rows(rows: &[Row]) -> GroupedData {
    let mut grouped = GroupedData::new();
    for row in rows {
        let customers = grouped
            .entry(row.distributor.clone())
            .or_default()
            .entry(row.product.clone())
            .or_default();
        if customers
            .insert(row.customer.clone(), row.period_sales.clone())
            .is_some()
        {
            log::trace!(
                "duplicate row for {}/{}/{}, keeping the later one",
                row.distributor,
                row.product,
                row.customer
            );
        }
    }
    grouped
}
