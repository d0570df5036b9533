use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tabled::Tabled;

use crate::util::{format_number, format_optional};

#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawRow {
    #[serde(rename = "Booking_ID", alias = "booking_id")]
    pub booking_id: Option<String>,
    #[serde(rename = "no_of_adults", alias = "adults")]
    pub adults: Option<String>,
    #[serde(rename = "no_of_children", alias = "children")]
    pub children: Option<String>,
    #[serde(rename = "arrival_year")]
    pub arrival_year: Option<String>,
    #[serde(rename = "arrival_month")]
    pub arrival_month: Option<String>,
    #[serde(rename = "arrival_date", alias = "arrival_day")]
    pub arrival_day: Option<String>,
    #[serde(rename = "lead_time")]
    pub lead_time: Option<String>,
    #[serde(rename = "market_segment_type", alias = "market_segment")]
    pub market_segment: Option<String>,
    #[serde(rename = "room_type_reserved", alias = "room_type")]
    pub room_type: Option<String>,
    #[serde(rename = "avg_price_per_room")]
    pub avg_price_per_room: Option<String>,
    #[serde(rename = "booking_status")]
    pub booking_status: Option<String>,
    #[serde(rename = "total_revenue")]
    pub total_revenue: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingStatus {
    Confirmed,
    Canceled,
}

impl FromStr for BookingStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // The reservations export spells a kept booking `Not_Canceled`.
        match s.trim() {
            "Not_Canceled" | "Confirmed" => Ok(BookingStatus::Confirmed),
            "Canceled" => Ok(BookingStatus::Canceled),
            _ => Err(()),
        }
    }
}

/// One validated reservation. Built only by `normalize`, never mutated after.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservationRecord {
    pub booking_id: String,
    pub adults: u32,
    pub children: u32,
    pub arrival_year: i32,
    pub arrival_month: u32,
    pub arrival_day: u32,
    pub lead_time: u32,
    pub market_segment: String,
    pub room_type: String,
    pub avg_price_per_room: f64,
    pub booking_status: BookingStatus,
    pub total_revenue: f64,
    pub total_guests: u32,
}

impl ReservationRecord {
    pub fn is_confirmed(&self) -> bool {
        self.booking_status == BookingStatus::Confirmed
    }

    pub fn is_canceled(&self) -> bool {
        self.booking_status == BookingStatus::Canceled
    }
}

/// `YYYY-MM` label of an arrival month.
pub fn period_label(year: i32, month: u32) -> String {
    format!("{}-{:02}", year, month)
}

/// Booking windows by lead time. Declaration order is label order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LeadTimeBucket {
    LastMinute,
    ShortNotice,
    Standard,
    EarlyBooking,
    VeryEarly,
}

impl LeadTimeBucket {
    pub fn from_days(days: u32) -> Self {
        match days {
            0..=6 => LeadTimeBucket::LastMinute,
            7..=29 => LeadTimeBucket::ShortNotice,
            30..=89 => LeadTimeBucket::Standard,
            90..=179 => LeadTimeBucket::EarlyBooking,
            _ => LeadTimeBucket::VeryEarly,
        }
    }

    // Consumers sort by this text; the digit prefix must stay.
    pub fn label(self) -> &'static str {
        match self {
            LeadTimeBucket::LastMinute => "1. Last Minute (0-6 days)",
            LeadTimeBucket::ShortNotice => "2. Short Notice (7-29 days)",
            LeadTimeBucket::Standard => "3. Standard (30-89 days)",
            LeadTimeBucket::EarlyBooking => "4. Early Booking (90-179 days)",
            LeadTimeBucket::VeryEarly => "5. Very Early (180+ days)",
        }
    }
}

fn money(v: &f64) -> String {
    format_number(*v, 2)
}

fn money_opt(v: &Option<f64>) -> String {
    format_optional(*v, 2)
}

fn pct_opt(v: &Option<f64>) -> String {
    format_optional(*v, 1)
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct SegmentRevenueRow {
    #[serde(rename = "Segment")]
    #[tabled(rename = "Segment")]
    pub segment: String,
    #[serde(rename = "TotalRevenue")]
    #[tabled(rename = "TotalRevenue", display_with = "money")]
    pub total_revenue: f64,
    #[serde(rename = "Bookings")]
    #[tabled(rename = "Bookings")]
    pub bookings: usize,
    #[serde(rename = "ADR")]
    #[tabled(rename = "ADR", display_with = "money")]
    pub adr: f64,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct MonthlyTrendRow {
    #[serde(rename = "Period")]
    #[tabled(rename = "Period")]
    pub period: String,
    #[serde(rename = "Year")]
    #[tabled(skip)]
    pub year: i32,
    #[serde(rename = "Month")]
    #[tabled(skip)]
    pub month: u32,
    #[serde(rename = "Revenue")]
    #[tabled(rename = "Revenue", display_with = "money")]
    pub revenue: f64,
    #[serde(rename = "Bookings")]
    #[tabled(rename = "Bookings")]
    pub bookings: usize,
    #[serde(rename = "ADR")]
    #[tabled(rename = "ADR", display_with = "money")]
    pub adr: f64,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PeriodRevenue {
    pub period: String,
    pub revenue: f64,
}

/// Monthly rows plus the headline numbers drawn from them.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct MonthlyTrendReport {
    pub rows: Vec<MonthlyTrendRow>,
    pub peak: Option<PeriodRevenue>,
    pub lowest: Option<PeriodRevenue>,
    pub average_revenue: Option<f64>,
}

/// Insights half of the monthly report, without the rows.
#[derive(Debug, Serialize)]
pub struct MonthlyInsights<'a> {
    pub peak: Option<&'a PeriodRevenue>,
    pub lowest: Option<&'a PeriodRevenue>,
    pub average_revenue: Option<f64>,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct LeadTimeRiskRow {
    #[serde(rename = "BookingWindow")]
    #[tabled(rename = "BookingWindow")]
    pub booking_window: String,
    #[serde(rename = "TotalBookings")]
    #[tabled(rename = "TotalBookings")]
    pub total_bookings: usize,
    #[serde(rename = "Canceled")]
    #[tabled(rename = "Canceled")]
    pub canceled: usize,
    #[serde(rename = "ADR")]
    #[tabled(rename = "ADR", display_with = "money")]
    pub adr: f64,
    #[serde(rename = "AvgLeadTime")]
    #[tabled(rename = "AvgLeadTime", display_with = "money")]
    pub avg_lead_time: f64,
    #[serde(rename = "CancellationRatePct")]
    #[tabled(rename = "CancellationRatePct", display_with = "pct_opt")]
    pub cancellation_rate: Option<f64>,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct RoomTypeRow {
    #[serde(rename = "RoomType")]
    #[tabled(rename = "RoomType")]
    pub room_type: String,
    #[serde(rename = "TotalBookings")]
    #[tabled(rename = "TotalBookings")]
    pub total_bookings: usize,
    #[serde(rename = "Confirmed")]
    #[tabled(rename = "Confirmed")]
    pub confirmed: usize,
    #[serde(rename = "Canceled")]
    #[tabled(rename = "Canceled")]
    pub canceled: usize,
    #[serde(rename = "CancellationRatePct")]
    #[tabled(rename = "CancellationRatePct", display_with = "pct_opt")]
    pub cancellation_rate: Option<f64>,
    #[serde(rename = "ADR")]
    #[tabled(rename = "ADR", display_with = "money_opt")]
    pub adr: Option<f64>,
    #[serde(rename = "TotalRevenue")]
    #[tabled(rename = "TotalRevenue", display_with = "money")]
    pub total_revenue: f64,
    #[serde(rename = "RevenuePerBooking")]
    #[tabled(rename = "RevenuePerBooking", display_with = "money_opt")]
    pub revenue_per_booking: Option<f64>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct HeadlineSummary {
    pub total_bookings: usize,
    pub confirmed_bookings: usize,
    pub canceled_bookings: usize,
    pub average_adr: Option<f64>,
    pub total_revenue: f64,
    pub average_guests: Option<f64>,
}
