use crate::error::OutputResult;
use crate::types::{Comparison, ComparisonRow, Report};
use crate::util::{format_int, format_rate};
use serde::Serialize;
use std::path::Path;
use tabled::{settings::Style, Table};

fn product_rows<'a>(
    distributor: &'a str,
    product: &'a str,
    comparisons: &'a [Comparison],
) -> impl Iterator<Item = ComparisonRow> + 'a {
    comparisons.iter().map(move |c| ComparisonRow {
        distributor: distributor.to_string(),
        product: product.to_string(),
        comparison: c.comparison.clone(),
        retention_rate: format_rate(c.retention_rate),
        growth_rate: format_rate(c.growth_rate),
        retained: c.retained_count,
        new: c.new_count,
        lost: c.lost_count,
    })
}

/// One display row per comparison, distributors and products in report order.
pub fn flatten_report(report: &Report) -> Vec<ComparisonRow> {
    let mut rows = Vec::with_capacity(report.comparison_count());
    for (distributor, entry) in &report.distributors {
        for (product, comparisons) in &entry.products {
            rows.extend(product_rows(distributor, product, comparisons));
        }
    }
    rows
}

pub fn write_csv<T: Serialize>(path: impl AsRef<Path>, rows: &[T]) -> OutputResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: impl AsRef<Path>, value: &T) -> OutputResult<()> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

/// Markdown tables for the console, one per product, at most `max_rows`
/// comparisons each.
pub fn render_report(report: &Report, max_rows: usize) -> String {
    let mut out = String::new();
    if report.is_empty() {
        out.push_str("(no rows)\n");
        return out;
    }
    for (distributor, entry) in &report.distributors {
        out.push_str(&format!(
            "{} - Total Customers: {}\n\n",
            distributor,
            format_int(entry.total_customers)
        ));
        for (product, comparisons) in &entry.products {
            out.push_str(&format!("Product: {}\n\n", product));
            let slice: Vec<ComparisonRow> = product_rows(distributor, product, comparisons)
                .take(max_rows)
                .collect();
            if slice.is_empty() {
                out.push_str("(no comparisons)\n\n");
                continue;
            }
            let table = Table::new(slice).with(Style::markdown()).to_string();
            out.push_str(&table);
            out.push_str("\n\n");
        }
    }
    out
}

pub fn preview_report(report: &Report, max_rows: usize) {
    print!("{}", render_report(report, max_rows));
}
