use crate::comparison::compare_snapshots;
use crate::grouping::group_rows;
use crate::periods::PeriodOrdering;
use crate::snapshot::{compute_snapshot, record_all_buyers, CustomerUnion};
use crate::types::{Comparison, CustomerSales, DistributorReport, GroupedData, Report, Row};

/// Comparisons of one product plus the customers it saw buying.
#[derive(Debug, Clone)]
pub struct ProductAnalysis {
    pub comparisons: Vec<Comparison>,
    pub customers: CustomerUnion,
}

/// Runs the grouping, snapshot and comparison steps under a period ordering
/// policy. Holds no state between runs.
#[derive(Debug, Clone, Default)]
pub struct Analyzer<P> {
    ordering: P,
}

impl<P: PeriodOrdering> Analyzer<P> {
    pub fn new(ordering: P) -> Self {
        Self { ordering }
    }

    pub fn run(&self, rows: &[Row]) -> Report {
        let grouped = group_rows(rows);
        log::info!(
            "grouped {} rows into {} distributors",
            rows.len(),
            grouped.len()
        );
        self.assemble(&grouped)
    }

    pub fn assemble(&self, grouped: &GroupedData) -> Report {
        let mut report = Report::default();
        for (distributor, products) in grouped {
            let mut seen = CustomerUnion::new();
            let mut entry = DistributorReport::default();
            for (product, customers) in products {
                let analysis = self.analyze_product(customers);
                log::debug!(
                    "{distributor}/{product}: {} customers, {} comparisons",
                    customers.len(),
                    analysis.comparisons.len()
                );
                seen.merge(analysis.customers);
                entry.products.insert(product.clone(), analysis.comparisons);
            }
            entry.total_customers = seen.len();
            report.distributors.insert(distributor.clone(), entry);
        }
        report
    }

    /// Analyse one product in isolation; nothing outside `customers` is read
    /// or written.
    pub fn analyze_product(&self, customers: &CustomerSales) -> ProductAnalysis {
        let mut seen = CustomerUnion::new();
        let snapshots: Vec<_> = self
            .ordering
            .resolve(customers)
            .iter()
            .map(|period| compute_snapshot(customers, period, &mut seen))
            .collect();
        record_all_buyers(customers, &mut seen);
        ProductAnalysis {
            comparisons: compare_snapshots(&snapshots),
            customers: seen,
        }
    }
}
