use crate::config::ColumnSpec;
use crate::error::{LoadError, LoadResult};
use crate::types::{PeriodLabel, PeriodSales, Row};
use crate::util::parse_f64_safe;
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub loaded_rows: usize,
    pub skipped_rows: usize,
    pub parse_errors: usize,
    pub period_columns: Vec<PeriodLabel>,
}

/// Where each identity column sits, and which columns are periods.
struct Layout {
    distributor: usize,
    product: usize,
    customer: usize,
    periods: Vec<(usize, PeriodLabel)>,
}

impl Layout {
    fn from_headers(headers: &StringRecord, spec: &ColumnSpec) -> LoadResult<Self> {
        if spec.distributor == spec.product || spec.distributor == spec.customer {
            return Err(LoadError::DuplicateColumn(spec.distributor.clone()));
        }
        if spec.product == spec.customer {
            return Err(LoadError::DuplicateColumn(spec.product.clone()));
        }
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
        };
        let periods = headers
            .iter()
            .enumerate()
            .map(|(idx, h)| (idx, h.trim()))
            .filter(|(_, h)| !spec.is_identity(h))
            .map(|(idx, h)| (idx, h.to_string()))
            .collect();
        Ok(Self {
            distributor: find(spec.distributor.as_str())?,
            product: find(spec.product.as_str())?,
            customer: find(spec.customer.as_str())?,
            periods,
        })
    }

    fn identity(record: &StringRecord, idx: usize) -> Option<String> {
        record
            .get(idx)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    /// Blank or absent cells leave the period out of the row entirely; text
    /// that is not a number is kept as `None`.
    fn row(&self, record: &StringRecord) -> Option<Row> {
        let distributor = Self::identity(record, self.distributor)?;
        let product = Self::identity(record, self.product)?;
        let customer = Self::identity(record, self.customer)?;
        let period_sales: PeriodSales = self
            .periods
            .iter()
            .filter_map(|(idx, label)| {
                let cell = record.get(*idx).map(str::trim).filter(|c| !c.is_empty())?;
                Some((label.clone(), parse_f64_safe(Some(cell))))
            })
            .collect();
        Some(Row {
            distributor,
            product,
            customer,
            period_sales,
        })
    }
}

/// Decode a CSV sheet into rows. The three identity columns are matched by
/// header name; every other column becomes a period, in header order.
///
/// Malformed records and records without a full identity are skipped and
/// counted rather than aborting the load.
pub fn load_rows<R: Read>(reader: R, spec: &ColumnSpec) -> LoadResult<(Vec<Row>, LoadReport)> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let layout = Layout::from_headers(rdr.headers()?, spec)?;

    let mut report = LoadReport {
        period_columns: layout.periods.iter().map(|(_, l)| l.clone()).collect(),
        ..LoadReport::default()
    };
    let mut rows = Vec::new();

    for (line, result) in rdr.records().enumerate() {
        report.total_rows += 1;
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                log::warn!("skipping record {}: {}", line + 2, e);
                report.parse_errors += 1;
                continue;
            }
        };
        match layout.row(&record) {
            Some(row) => rows.push(row),
            None => {
                log::warn!("skipping record {}: missing distributor, product or customer", line + 2);
                report.skipped_rows += 1;
            }
        }
    }

    report.loaded_rows = rows.len();
    Ok((rows, report))
}

pub fn load_rows_from_path(
    path: impl AsRef<Path>,
    spec: &ColumnSpec,
) -> LoadResult<(Vec<Row>, LoadReport)> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    load_rows(file, spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = "\
Distributor,Product,Customer,Jan,Feb,Mar
Acme,Widget,X,100,0,50
Acme,Widget,Y,,\"1,200\",n/a
";

    #[test]
    fn period_columns_follow_header_order() {
        let (rows, report) = load_rows(SHEET.as_bytes(), &ColumnSpec::default()).unwrap();
        assert_eq!(report.period_columns, vec!["Jan", "Feb", "Mar"]);
        assert_eq!(report.total_rows, 2);
        assert_eq!(report.loaded_rows, 2);
        let labels: Vec<_> = rows[0].period_sales.keys().cloned().collect();
        assert_eq!(labels, vec!["Jan", "Feb", "Mar"]);
    }

    #[test]
    fn blank_cells_are_left_out_and_text_is_kept_as_none() {
        let (rows, _) = load_rows(SHEET.as_bytes(), &ColumnSpec::default()).unwrap();
        let y = &rows[1];
        assert_eq!(y.customer, "Y");
        assert!(!y.period_sales.contains_key("Jan"));
        assert_eq!(y.period_sales["Feb"], Some(1200.0));
        assert_eq!(y.period_sales["Mar"], None);
        let labels: Vec<_> = y.period_sales.keys().cloned().collect();
        assert_eq!(labels, vec!["Feb", "Mar"]);
    }

    #[test]
    fn whitespace_only_cells_count_as_blank() {
        let sheet = "Distributor,Product,Customer,Jan,Feb,Mar
Acme,Widget,X,5,  ,6
";
        let (rows, _) = load_rows(sheet.as_bytes(), &ColumnSpec::default()).unwrap();
        let labels: Vec<_> = rows[0].period_sales.keys().cloned().collect();
        assert_eq!(labels, vec!["Jan", "Mar"]);
    }

    #[test]
    fn identity_columns_may_sit_anywhere() {
        let sheet = "Q1,Customer,Q2,Product,Distributor\n5,X,7,Widget,Acme\n";
        let (rows, report) = load_rows(sheet.as_bytes(), &ColumnSpec::default()).unwrap();
        assert_eq!(report.period_columns, vec!["Q1", "Q2"]);
        assert_eq!(rows[0].distributor, "Acme");
        assert_eq!(rows[0].period_sales["Q2"], Some(7.0));
    }

    #[test]
    fn rows_without_identity_are_skipped() {
        let sheet = "Distributor,Product,Customer,Jan\nAcme,,X,1\nAcme,Widget,X,2\n";
        let (rows, report) = load_rows(sheet.as_bytes(), &ColumnSpec::default()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(report.skipped_rows, 1);
        assert_eq!(report.total_rows, 2);
    }

    #[test]
    fn short_rows_leave_out_trailing_periods() {
        let sheet = "Distributor,Product,Customer,Jan,Feb\nAcme,Widget,X,3\n";
        let (rows, _) = load_rows(sheet.as_bytes(), &ColumnSpec::default()).unwrap();
        assert_eq!(rows[0].period_sales["Jan"], Some(3.0));
        assert!(!rows[0].period_sales.contains_key("Feb"));
        assert_eq!(rows[0].period_sales.len(), 1);
    }

    #[test]
    fn missing_identity_header_is_an_error() {
        let sheet = "Distributor,Item,Customer,Jan\n";
        let err = load_rows(sheet.as_bytes(), &ColumnSpec::default()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(ref c) if c == "Product"));
    }

    #[test]
    fn custom_column_names_are_honoured() {
        let spec = ColumnSpec {
            distributor: "Dist".into(),
            product: "Sku".into(),
            customer: "Client".into(),
        };
        let sheet = "Dist,Sku,Client,Jan\nAcme,W1,C9,4\n";
        let (rows, _) = load_rows(sheet.as_bytes(), &spec).unwrap();
        assert_eq!(rows[0].product, "W1");
        assert_eq!(rows[0].customer, "C9");
    }

    #[test]
    fn colliding_identity_names_are_rejected() {
        let spec = ColumnSpec {
            distributor: "Name".into(),
            product: "Name".into(),
            customer: "Customer".into(),
        };
        let err = load_rows("Name,Customer\n".as_bytes(), &spec).unwrap_err();
        assert!(matches!(err, LoadError::DuplicateColumn(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_rows_from_path("/definitely/not/here.csv", &ColumnSpec::default()).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.csv"));
    }
}
