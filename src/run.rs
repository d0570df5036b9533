//! Report-by-report execution for the CLI.
//!
//! Each selected report is built, previewed and exported on its own. A
//! failed export is logged and recorded; the remaining reports still run.

use crate::error::Result;
use crate::types::{MonthlyInsights, ReservationRecord};
use crate::{output, reports, util};
use clap::ValueEnum;
use std::path::{Path, PathBuf};
use tracing::error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    All,
    Segment,
    Monthly,
    LeadTime,
    RoomType,
    Summary,
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub output_dir: PathBuf,
    pub reports: Vec<ReportKind>,
    pub preview_rows: usize,
}

impl RunOptions {
    fn wants(&self, kind: ReportKind) -> bool {
        self.reports.iter().any(|k| *k == ReportKind::All || *k == kind)
    }
}

/// Files written and files that could not be written during one run.
#[derive(Debug, Default)]
pub struct RunOutcome {
    pub written: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
}

impl RunOutcome {
    fn record(&mut self, result: Result<()>, path: PathBuf) {
        match result {
            Ok(()) => {
                println!("(Full table exported to {})\n", path.display());
                self.written.push(path);
            }
            Err(e) => {
                error!("Write error for {}: {}", path.display(), e);
                self.failed.push(path);
            }
        }
    }
}

pub const SEGMENT_FILE: &str = "report1_segment_revenue.csv";
pub const MONTHLY_FILE: &str = "report2_monthly_trend.csv";
pub const MONTHLY_INSIGHTS_FILE: &str = "monthly_insights.json";
pub const LEAD_TIME_FILE: &str = "report3_lead_time_risk.csv";
pub const ROOM_TYPE_FILE: &str = "report4_room_type.csv";
pub const SUMMARY_FILE: &str = "summary.json";

fn run_summary(data: &[ReservationRecord], dir: &Path, out: &mut RunOutcome) {
    let summary = reports::headline_summary(data);
    println!("Quick stats:");
    println!("  Total bookings:     {}", util::format_int(summary.total_bookings as u64));
    println!("  Confirmed bookings: {}", util::format_int(summary.confirmed_bookings as u64));
    println!("  Average ADR:        {}", util::format_optional(summary.average_adr, 2));
    println!("  Total revenue:      {}\n", util::format_number(summary.total_revenue, 0));
    let path = dir.join(SUMMARY_FILE);
    out.record(output::write_json(&path, &summary), path);
}

fn run_segment(data: &[ReservationRecord], opts: &RunOptions, out: &mut RunOutcome) {
    let rows = reports::segment_revenue_report(data);
    output::preview_table(
        1,
        "Revenue by Market Segment",
        Some("Confirmed bookings only"),
        &rows,
        opts.preview_rows,
    );
    let path = opts.output_dir.join(SEGMENT_FILE);
    out.record(output::write_csv(&path, &rows), path);
}

fn run_monthly(data: &[ReservationRecord], opts: &RunOptions, out: &mut RunOutcome) {
    let report = reports::monthly_trend_report(data);
    output::preview_table(
        2,
        "Monthly Revenue Trend",
        Some("Confirmed bookings only"),
        &report.rows,
        opts.preview_rows,
    );
    let path = opts.output_dir.join(MONTHLY_FILE);
    out.record(output::write_csv(&path, &report.rows), path);

    if let (Some(peak), Some(lowest)) = (&report.peak, &report.lowest) {
        println!(
            "Peak month: {} ({})  Lowest month: {} ({})  Average: {}\n",
            peak.period,
            util::format_number(peak.revenue, 0),
            lowest.period,
            util::format_number(lowest.revenue, 0),
            util::format_optional(report.average_revenue, 0)
        );
    }
    let insights = MonthlyInsights {
        peak: report.peak.as_ref(),
        lowest: report.lowest.as_ref(),
        average_revenue: report.average_revenue,
    };
    let path = opts.output_dir.join(MONTHLY_INSIGHTS_FILE);
    out.record(output::write_json(&path, &insights), path);
}

fn run_lead_time(data: &[ReservationRecord], opts: &RunOptions, out: &mut RunOutcome) {
    let rows = reports::lead_time_risk_report(data);
    output::preview_table(
        3,
        "Cancellation Analysis by Lead Time",
        Some("All bookings"),
        &rows,
        opts.preview_rows,
    );
    let path = opts.output_dir.join(LEAD_TIME_FILE);
    out.record(output::write_csv(&path, &rows), path);
}

fn run_room_type(data: &[ReservationRecord], opts: &RunOptions, out: &mut RunOutcome) {
    let rows = reports::room_type_report(data);
    output::preview_table(
        4,
        "Room Type Performance",
        Some("Revenue and ADR from confirmed bookings; revenue per booking over all bookings"),
        &rows,
        opts.preview_rows,
    );
    let path = opts.output_dir.join(ROOM_TYPE_FILE);
    out.record(output::write_csv(&path, &rows), path);
}

/// Build and export every selected report.
pub fn run_reports(data: &[ReservationRecord], opts: &RunOptions) -> RunOutcome {
    let mut out = RunOutcome::default();
    if opts.wants(ReportKind::Summary) {
        run_summary(data, &opts.output_dir, &mut out);
    }
    if opts.wants(ReportKind::Segment) {
        run_segment(data, opts, &mut out);
    }
    if opts.wants(ReportKind::Monthly) {
        run_monthly(data, opts, &mut out);
    }
    if opts.wants(ReportKind::LeadTime) {
        run_lead_time(data, opts, &mut out);
    }
    if opts.wants(ReportKind::RoomType) {
        run_room_type(data, opts, &mut out);
    }
    out
}
