use crate::periods::PeriodOrder;
use serde::{Deserialize, Serialize};

/// Header names of the three identity columns. Every other column is a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub distributor: String,
    pub product: String,
    pub customer: String,
}

impl Default for ColumnSpec {
    fn default() -> Self {
        Self {
            distributor: "Distributor".to_string(),
            product: "Product".to_string(),
            customer: "Customer".to_string(),
        }
    }
}

impl ColumnSpec {
    pub fn is_identity(&self, header: &str) -> bool {
        header == self.distributor || header == self.product || header == self.customer
    }
}

/// Settings for one analysis run that do not concern where files live.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub columns: ColumnSpec,
    pub period_order: PeriodOrder,
}
