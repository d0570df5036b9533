//! Raw rows to validated reservation records.
//!
//! Every required column must be present and well-typed; the first bad row
//! rejects the whole input.

use crate::error::{AnalyticsError, Result};
use crate::types::{BookingStatus, RawRow, ReservationRecord};
use crate::util::{parse_f64_safe, parse_i32_safe, parse_u32_safe};

fn required<'a>(row: usize, field: &'static str, value: &'a Option<String>) -> Result<&'a str> {
    match value.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(AnalyticsError::MissingField { row, field }),
    }
}

fn invalid(row: usize, field: &'static str, value: &str) -> AnalyticsError {
    AnalyticsError::InvalidField {
        row,
        field,
        value: value.to_string(),
    }
}

fn count_field(row: usize, field: &'static str, value: &Option<String>) -> Result<u32> {
    let s = required(row, field, value)?;
    parse_u32_safe(s).ok_or_else(|| invalid(row, field, s))
}

fn ranged_field(
    row: usize,
    field: &'static str,
    value: &Option<String>,
    range: std::ops::RangeInclusive<u32>,
) -> Result<u32> {
    let s = required(row, field, value)?;
    match parse_u32_safe(s) {
        Some(v) if range.contains(&v) => Ok(v),
        _ => Err(invalid(row, field, s)),
    }
}

fn amount_field(row: usize, field: &'static str, value: &Option<String>) -> Result<f64> {
    let s = required(row, field, value)?;
    parse_f64_safe(s).ok_or_else(|| invalid(row, field, s))
}

/// Validate a single raw row. `row` is the 1-based data row number used in
/// error messages.
pub fn normalize_row(row: usize, raw: &RawRow) -> Result<ReservationRecord> {
    let booking_id = required(row, "booking_id", &raw.booking_id)?.to_string();
    let adults = count_field(row, "adults", &raw.adults)?;
    let children = count_field(row, "children", &raw.children)?;

    let year_text = required(row, "arrival_year", &raw.arrival_year)?;
    let arrival_year =
        parse_i32_safe(year_text).ok_or_else(|| invalid(row, "arrival_year", year_text))?;
    let arrival_month = ranged_field(row, "arrival_month", &raw.arrival_month, 1..=12)?;
    let arrival_day = ranged_field(row, "arrival_day", &raw.arrival_day, 1..=31)?;
    let lead_time = count_field(row, "lead_time", &raw.lead_time)?;

    let market_segment = required(row, "market_segment", &raw.market_segment)?.to_string();
    let room_type = required(row, "room_type", &raw.room_type)?.to_string();

    let price_text = required(row, "avg_price_per_room", &raw.avg_price_per_room)?;
    let avg_price_per_room = match parse_f64_safe(price_text) {
        Some(v) if v >= 0.0 => v,
        _ => return Err(invalid(row, "avg_price_per_room", price_text)),
    };

    let status_text = required(row, "booking_status", &raw.booking_status)?;
    let booking_status: BookingStatus =
        status_text.parse().map_err(|_| AnalyticsError::UnknownStatus {
            row,
            value: status_text.to_string(),
        })?;

    let total_revenue = amount_field(row, "total_revenue", &raw.total_revenue)?;

    let total_guests = adults
        .checked_add(children)
        .ok_or_else(|| invalid(row, "children", &children.to_string()))?;

    Ok(ReservationRecord {
        booking_id,
        adults,
        children,
        arrival_year,
        arrival_month,
        arrival_day,
        lead_time,
        market_segment,
        room_type,
        avg_price_per_room,
        booking_status,
        total_revenue,
        total_guests,
    })
}

/// Validate every row, failing on the first bad one.
pub fn normalize(rows: Vec<RawRow>) -> Result<Vec<ReservationRecord>> {
    rows.iter()
        .enumerate()
        .map(|(idx, raw)| normalize_row(idx + 1, raw))
        .collect()
}

/// Records with status `Confirmed`, in input order.
pub fn confirmed_set(records: &[ReservationRecord]) -> Vec<&ReservationRecord> {
    records.iter().filter(|r| r.is_confirmed()).collect()
}
