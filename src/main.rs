// Command-line host for the reservation reports.
//
// Loads the reservations CSV once, then hands the records to the runner,
// which builds and exports each requested report independently.
use anyhow::{Context, Result};
use clap::Parser;
use hotel_analytics::run::{run_reports, ReportKind, RunOptions};
use hotel_analytics::{loader, util};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "hotel-analytics", about = "Revenue and cancellation reports over hotel reservations")]
struct Args {
    /// Reservations CSV export
    #[arg(long, env = "HOTEL_ANALYTICS_INPUT", default_value = "hotel_reservations_clean.csv")]
    input: PathBuf,

    /// Directory the report files are written to
    #[arg(long, env = "HOTEL_ANALYTICS_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Reports to build; repeat the flag for several
    #[arg(long = "report", value_enum, default_value = "all")]
    reports: Vec<ReportKind>,

    /// Rows shown in each console preview
    #[arg(long, env = "HOTEL_ANALYTICS_PREVIEW_ROWS", default_value_t = 10)]
    preview_rows: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let (data, load_report) = loader::load_from_path(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    println!(
        "Processing dataset... ({} reservations, {} confirmed, {} canceled)\n",
        util::format_int(load_report.total_rows as u64),
        util::format_int(load_report.confirmed_rows as u64),
        util::format_int(load_report.canceled_rows as u64)
    );

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("failed to create {}", args.output_dir.display()))?;
    info!("Writing reports to {}", args.output_dir.display());

    let opts = RunOptions {
        output_dir: args.output_dir,
        reports: args.reports,
        preview_rows: args.preview_rows,
    };
    let outcome = run_reports(&data, &opts);
    if !outcome.failed.is_empty() {
        warn!(
            "{} of {} report files could not be written",
            outcome.failed.len(),
            outcome.failed.len() + outcome.written.len()
        );
    }
    Ok(())
}
