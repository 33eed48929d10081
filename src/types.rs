use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tabled::Tabled;

/// Opaque period identifier, e.g. a month name taken from a column header.
pub type PeriodLabel = String;

/// A single sales cell. `None` when the cell was empty or not a number.
pub type SaleValue = Option<f64>;

/// Sales per period for one customer, in the order the period columns appeared.
pub type PeriodSales = IndexMap<PeriodLabel, SaleValue>;

/// customer -> sales per period
pub type CustomerSales = IndexMap<String, PeriodSales>;

/// product -> customers
pub type ProductSales = IndexMap<String, CustomerSales>;

/// distributor -> products -> customers -> sales per period
pub type GroupedData = IndexMap<String, ProductSales>;

/// One decoded observation: a (distributor, product, customer) tuple and its
/// sales per period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub distributor: String,
    pub product: String,
    pub customer: String,
    pub period_sales: PeriodSales,
}

impl Row {
    pub fn new(
        distributor: impl Into<String>,
        product: impl Into<String>,
        customer: impl Into<String>,
        period_sales: PeriodSales,
    ) -> Self {
        Self {
            distributor: distributor.into(),
            product: product.into(),
            customer: customer.into(),
            period_sales,
        }
    }
}

/// Customers with a positive sale in one period, and what they bought in total.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub period: PeriodLabel,
    pub active_customers: BTreeSet<String>,
    pub total_sales: f64,
}

/// Retention and growth between two adjacent periods of one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub period_pair: (PeriodLabel, PeriodLabel),
    /// Human readable form of `period_pair`, e.g. `Jan vs Feb`.
    pub comparison: String,
    pub retention_rate: f64,
    pub growth_rate: f64,
    #[serde(rename = "retainedCustomers")]
    pub retained_count: usize,
    #[serde(rename = "newCustomers")]
    pub new_count: usize,
    #[serde(rename = "lostCustomers")]
    pub lost_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributorReport {
    pub total_customers: usize,
    pub products: IndexMap<String, Vec<Comparison>>,
}

/// Final analysis result, keyed by distributor in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Report {
    pub distributors: IndexMap<String, DistributorReport>,
}

impl Report {
    pub fn get(&self, distributor: &str) -> Option<&DistributorReport> {
        self.distributors.get(distributor)
    }

    pub fn is_empty(&self) -> bool {
        self.distributors.is_empty()
    }

    pub fn comparison_count(&self) -> usize {
        self.distributors
            .values()
            .flat_map(|d| d.products.values())
            .map(Vec::len)
            .sum()
    }
}

/// Flat, display-ready form of one comparison, used for CSV export and the
/// console preview.
#[derive(Debug, Serialize, Tabled, Clone)]
pub struct ComparisonRow {
    #[serde(rename = "Distributor")]
    #[tabled(skip)]
    pub distributor: String,
    #[serde(rename = "Product")]
    #[tabled(skip)]
    pub product: String,
    #[serde(rename = "Comparison")]
    #[tabled(rename = "Month Comparison")]
    pub comparison: String,
    #[serde(rename = "RetentionRate")]
    #[tabled(rename = "Retention Rate (%)")]
    pub retention_rate: String,
    #[serde(rename = "GrowthRate")]
    #[tabled(rename = "Growth Rate (%)")]
    pub growth_rate: String,
    #[serde(rename = "Retained")]
    #[tabled(rename = "Retained")]
    pub retained: usize,
    #[serde(rename = "New")]
    #[tabled(rename = "New")]
    pub new: usize,
    #[serde(rename = "Lost")]
    #[tabled(rename = "Lost")]
    pub lost: usize,
}
