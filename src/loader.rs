use crate::error::{AnalyticsError, Result};
use crate::normalize::normalize;
use crate::types::{RawRow, ReservationRecord};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub confirmed_rows: usize,
    pub canceled_rows: usize,
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<(Vec<ReservationRecord>, LoadReport)> {
    let path = path.as_ref();
    info!("Reading reservations from {}", path.display());
    let file = File::open(path)?;
    load_from_reader(file)
}

/// Read a reservations CSV from any reader and normalize it.
///
/// A row the CSV layer cannot decode aborts the load, same as a row that
/// fails validation.
pub fn load_from_reader<R: Read>(reader: R) -> Result<(Vec<ReservationRecord>, LoadReport)> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let mut raw_rows: Vec<RawRow> = Vec::new();
    for (idx, result) in rdr.deserialize::<RawRow>().enumerate() {
        let row = result.map_err(|source| AnalyticsError::Csv {
            row: idx + 1,
            source,
        })?;
        raw_rows.push(row);
    }
    debug!("Parsed {} raw rows", raw_rows.len());

    let records = normalize(raw_rows)?;
    let confirmed_rows = records.iter().filter(|r| r.is_confirmed()).count();
    let report = LoadReport {
        total_rows: records.len(),
        confirmed_rows,
        canceled_rows: records.len() - confirmed_rows,
    };
    info!(
        total = report.total_rows,
        confirmed = report.confirmed_rows,
        canceled = report.canceled_rows,
        "Loaded reservations"
    );
    Ok((records, report))
}
