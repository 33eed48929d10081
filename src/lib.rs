//! Customer retention and sales growth per distributor and product.
//!
//! Rows of per-customer period sales are grouped by distributor, product and
//! customer; for each product the periods are snapshotted (who bought, how
//! much) and adjacent snapshots are compared into retention, growth and churn
//! figures. Each distributor also gets a count of its distinct buyers.
pub mod comparison;
pub mod config;
pub mod error;
pub mod grouping;
pub mod loader;
pub mod output;
pub mod periods;
pub mod report;
pub mod snapshot;
pub mod types;
pub mod util;

pub use config::{AnalysisConfig, ColumnSpec};
pub use periods::{FirstCustomer, PeriodOrder, PeriodOrdering, UnionOfCustomers};
pub use report::Analyzer;
pub use types::{Comparison, DistributorReport, Report, Row};

/// Run the whole analysis with the ordering policy from `config`.
pub fn analyze(rows: &[Row], config: &AnalysisConfig) -> Report {
    Analyzer::new(config.period_order).run(rows)
}
