//! Period ordering policies.
//!
//! Period labels carry no calendar meaning, so the order in which a product's
//! periods are compared is decided by a [`PeriodOrdering`] policy.

use crate::types::{CustomerSales, PeriodLabel};
use clap::ValueEnum;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

pub trait PeriodOrdering {
    /// Ordered period labels to compare for one product's customers.
    fn resolve(&self, customers: &CustomerSales) -> Vec<PeriodLabel>;
}

/// Use the periods of the first customer recorded for the product.
///
/// Labels that only later customers carry are not compared.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstCustomer;

impl PeriodOrdering for FirstCustomer {
    fn resolve(&self, customers: &CustomerSales) -> Vec<PeriodLabel> {
        customers
            .values()
            .next()
            .map(|sales| sales.keys().cloned().collect())
            .unwrap_or_default()
    }
}

/// Union of every customer's periods, ordered by first appearance.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnionOfCustomers;

impl PeriodOrdering for UnionOfCustomers {
    fn resolve(&self, customers: &CustomerSales) -> Vec<PeriodLabel> {
        let labels: IndexSet<&PeriodLabel> =
            customers.values().flat_map(|sales| sales.keys()).collect();
        labels.into_iter().cloned().collect()
    }
}

/// Selectable policy, as chosen on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PeriodOrder {
    #[default]
    FirstCustomer,
    Union,
}

impl PeriodOrdering for PeriodOrder {
    fn resolve(&self, customers: &CustomerSales) -> Vec<PeriodLabel> {
        match self {
            PeriodOrder::FirstCustomer => FirstCustomer.resolve(customers),
            PeriodOrder::Union => UnionOfCustomers.resolve(customers),
        }
    }
}
