//! Descriptive analytics over hotel reservation records.
//!
//! `normalize` turns raw rows into validated records; the builders in
//! `reports` turn those into summary tables. Every builder is a pure
//! function of the record slice it is given.

pub mod error;
pub mod loader;
pub mod normalize;
pub mod output;
pub mod reports;
pub mod run;
pub mod types;
pub mod util;

pub use error::{AnalyticsError, Result};
pub use normalize::{confirmed_set, normalize};
pub use reports::{
    categorize_lead_time, headline_summary, lead_time_risk_report, monthly_trend_report,
    room_type_report, segment_revenue_report,
};
pub use types::{BookingStatus, RawRow, ReservationRecord};
