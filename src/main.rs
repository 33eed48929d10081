// Command line entry point.
//
// Loads a CSV sheet of per-customer period sales, runs the retention
// analysis, prints a preview of each product's comparisons and optionally
// exports the full result as JSON and/or CSV.
use anyhow::{Context, Result};
use clap::Parser;
use sales_retention::{
    analyze, loader, output, util, AnalysisConfig, ColumnSpec, PeriodOrder,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sales-retention", version)]
#[command(about = "Customer retention and sales growth per distributor and product")]
struct Args {
    /// CSV sheet with identity columns and one column per period
    input: PathBuf,

    /// Header of the distributor column
    #[arg(long, default_value = "Distributor")]
    distributor_column: String,

    /// Header of the product column
    #[arg(long, default_value = "Product")]
    product_column: String,

    /// Header of the customer column
    #[arg(long, default_value = "Customer")]
    customer_column: String,

    /// How the periods of a product are ordered for comparison
    #[arg(long, value_enum, default_value_t = PeriodOrder::FirstCustomer)]
    period_order: PeriodOrder,

    /// Write the full report as JSON
    #[arg(long, value_name = "FILE")]
    json_out: Option<PathBuf>,

    /// Write one CSV line per comparison
    #[arg(long, value_name = "FILE")]
    csv_out: Option<PathBuf>,

    /// Comparisons shown per product in the console preview
    #[arg(long, default_value_t = 12)]
    preview_rows: usize,
}

impl Args {
    fn config(&self) -> AnalysisConfig {
        AnalysisConfig {
            columns: ColumnSpec {
                distributor: self.distributor_column.clone(),
                product: self.product_column.clone(),
                customer: self.customer_column.clone(),
            },
            period_order: self.period_order,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = args.config();
    log::debug!("config: {:?}", config);

    let (rows, load_report) = loader::load_rows_from_path(&args.input, &config.columns)
        .with_context(|| format!("loading {}", args.input.display()))?;
    println!(
        "Processing dataset... ({} rows loaded, {} period columns)",
        util::format_int(load_report.loaded_rows),
        util::format_int(load_report.period_columns.len())
    );
    if load_report.skipped_rows + load_report.parse_errors > 0 {
        println!(
            "Note: {} rows skipped due to parse/validation errors.",
            util::format_int(load_report.skipped_rows + load_report.parse_errors)
        );
    }
    println!();

    let report = analyze(&rows, &config);
    output::preview_report(&report, args.preview_rows);

    if let Some(path) = &args.json_out {
        output::write_json(path, &report)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("(Full report exported to {})", path.display());
    }
    if let Some(path) = &args.csv_out {
        output::write_csv(path, &output::flatten_report(&report))
            .with_context(|| format!("writing {}", path.display()))?;
        println!("(Comparisons exported to {})", path.display());
    }
    Ok(())
}
