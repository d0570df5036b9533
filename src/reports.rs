use crate::normalize::confirmed_set;
use crate::types::{
    period_label, HeadlineSummary, LeadTimeBucket, LeadTimeRiskRow, MonthlyTrendReport,
    MonthlyTrendRow, PeriodRevenue, ReservationRecord, RoomTypeRow, SegmentRevenueRow,
};
use crate::util::{mean, percentage, round_to};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Label of the booking window `days` falls in.
pub fn categorize_lead_time(days: u32) -> &'static str {
    LeadTimeBucket::from_days(days).label()
}

fn desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Revenue, volume and ADR per market segment over confirmed bookings,
/// highest revenue first.
pub fn segment_revenue_report(records: &[ReservationRecord]) -> Vec<SegmentRevenueRow> {
    #[derive(Default)]
    struct Acc {
        revenue: f64,
        prices: Vec<f64>,
    }
    let mut map: HashMap<&str, Acc> = HashMap::new();
    for r in confirmed_set(records) {
        let e = map.entry(r.market_segment.as_str()).or_default();
        e.revenue += r.total_revenue;
        e.prices.push(r.avg_price_per_room);
    }

    let mut rows: Vec<SegmentRevenueRow> = map
        .into_iter()
        .map(|(segment, acc)| SegmentRevenueRow {
            segment: segment.to_string(),
            total_revenue: round_to(acc.revenue, 2),
            bookings: acc.prices.len(),
            // Groups exist only because a record landed in them.
            adr: round_to(mean(&acc.prices).unwrap_or(0.0), 2),
        })
        .collect();
    rows.sort_by(|a, b| {
        desc(a.total_revenue, b.total_revenue).then_with(|| a.segment.cmp(&b.segment))
    });
    rows
}

/// Revenue per arrival month over confirmed bookings, in calendar order.
pub fn monthly_trend_report(records: &[ReservationRecord]) -> MonthlyTrendReport {
    #[derive(Default)]
    struct Acc {
        revenue: f64,
        prices: Vec<f64>,
    }
    let mut map: HashMap<(i32, u32), Acc> = HashMap::new();
    for r in confirmed_set(records) {
        let e = map.entry((r.arrival_year, r.arrival_month)).or_default();
        e.revenue += r.total_revenue;
        e.prices.push(r.avg_price_per_room);
    }

    let mut keyed: Vec<((i32, u32), Acc)> = map.into_iter().collect();
    keyed.sort_by_key(|(key, _)| *key);
    let rows: Vec<MonthlyTrendRow> = keyed
        .into_iter()
        .map(|((year, month), acc)| MonthlyTrendRow {
            period: period_label(year, month),
            year,
            month,
            revenue: acc.revenue,
            bookings: acc.prices.len(),
            adr: mean(&acc.prices).unwrap_or(0.0),
        })
        .collect();

    // Strict comparisons keep the earliest period on ties.
    let mut peak: Option<&MonthlyTrendRow> = None;
    let mut lowest: Option<&MonthlyTrendRow> = None;
    for row in &rows {
        if peak.map_or(true, |p| row.revenue > p.revenue) {
            peak = Some(row);
        }
        if lowest.map_or(true, |l| row.revenue < l.revenue) {
            lowest = Some(row);
        }
    }
    let to_period = |row: &MonthlyTrendRow| PeriodRevenue {
        period: row.period.clone(),
        revenue: row.revenue,
    };
    let peak = peak.map(to_period);
    let lowest = lowest.map(to_period);
    let average_revenue = mean(&rows.iter().map(|r| r.revenue).collect::<Vec<_>>());

    MonthlyTrendReport {
        rows,
        peak,
        lowest,
        average_revenue,
    }
}

/// Cancellation risk per booking window over all bookings.
pub fn lead_time_risk_report(records: &[ReservationRecord]) -> Vec<LeadTimeRiskRow> {
    #[derive(Default)]
    struct Acc {
        canceled: usize,
        prices: Vec<f64>,
        lead_times: Vec<f64>,
    }
    let mut map: HashMap<LeadTimeBucket, Acc> = HashMap::new();
    for r in records {
        let e = map.entry(LeadTimeBucket::from_days(r.lead_time)).or_default();
        if r.is_canceled() {
            e.canceled += 1;
        }
        e.prices.push(r.avg_price_per_room);
        e.lead_times.push(r.lead_time as f64);
    }

    let mut keyed: Vec<(LeadTimeBucket, Acc)> = map.into_iter().collect();
    keyed.sort_by(|a, b| a.0.label().cmp(b.0.label()));
    keyed
        .into_iter()
        .map(|(bucket, acc)| {
            let total = acc.prices.len();
            LeadTimeRiskRow {
                booking_window: bucket.label().to_string(),
                total_bookings: total,
                canceled: acc.canceled,
                adr: mean(&acc.prices).unwrap_or(0.0),
                avg_lead_time: mean(&acc.lead_times).unwrap_or(0.0),
                cancellation_rate: percentage(acc.canceled, total),
            }
        })
        .collect()
}

/// Volume, cancellations and confirmed revenue per room type.
///
/// Counts come from every booking; revenue and ADR from confirmed ones only.
/// The two passes are joined on room type.
pub fn room_type_report(records: &[ReservationRecord]) -> Vec<RoomTypeRow> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for r in records {
        let e = counts.entry(r.room_type.as_str()).or_insert((0, 0));
        e.0 += 1;
        if r.is_canceled() {
            e.1 += 1;
        }
    }

    let mut confirmed: HashMap<&str, (f64, Vec<f64>)> = HashMap::new();
    for r in confirmed_set(records) {
        let e = confirmed
            .entry(r.room_type.as_str())
            .or_insert_with(|| (0.0, Vec::new()));
        e.0 += r.total_revenue;
        e.1.push(r.avg_price_per_room);
    }

    let mut rows: Vec<RoomTypeRow> = counts
        .into_iter()
        .map(|(room_type, (total, canceled))| {
            let (revenue, prices) = confirmed
                .remove(room_type)
                .unwrap_or_else(|| (0.0, Vec::new()));
            // Denominator is every booking, canceled included.
            let revenue_per_booking = if total == 0 {
                None
            } else {
                Some(round_to(revenue / total as f64, 2))
            };
            RoomTypeRow {
                room_type: room_type.to_string(),
                total_bookings: total,
                confirmed: total - canceled,
                canceled,
                cancellation_rate: percentage(canceled, total),
                adr: mean(&prices).map(|v| round_to(v, 2)),
                total_revenue: round_to(revenue, 2),
                revenue_per_booking,
            }
        })
        .collect();
    rows.sort_by(|a, b| {
        desc(a.total_revenue, b.total_revenue).then_with(|| a.room_type.cmp(&b.room_type))
    });
    rows
}

/// Headline numbers shown above the reports.
pub fn headline_summary(records: &[ReservationRecord]) -> HeadlineSummary {
    let confirmed = confirmed_set(records);
    let prices: Vec<f64> = confirmed.iter().map(|r| r.avg_price_per_room).collect();
    let guests: Vec<f64> = records.iter().map(|r| r.total_guests as f64).collect();
    let total_revenue: f64 = confirmed.iter().map(|r| r.total_revenue).sum();
    HeadlineSummary {
        total_bookings: records.len(),
        confirmed_bookings: confirmed.len(),
        canceled_bookings: records.len() - confirmed.len(),
        average_adr: mean(&prices).map(|v| round_to(v, 2)),
        total_revenue: round_to(total_revenue, 2),
        average_guests: mean(&guests).map(|v| round_to(v, 2)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BookingStatus;

    fn rec(
        segment: &str,
        room: &str,
        year: i32,
        month: u32,
        lead_time: u32,
        price: f64,
        revenue: f64,
        status: BookingStatus,
    ) -> ReservationRecord {
        ReservationRecord {
            booking_id: format!("{segment}-{room}-{year}-{month}-{lead_time}"),
            adults: 2,
            children: 0,
            arrival_year: year,
            arrival_month: month,
            arrival_day: 1,
            lead_time,
            market_segment: segment.to_string(),
            room_type: room.to_string(),
            avg_price_per_room: price,
            booking_status: status,
            total_revenue: revenue,
            total_guests: 2,
        }
    }

    use BookingStatus::{Canceled, Confirmed};

    #[test]
    fn lead_time_boundaries() {
        let days = [0, 6, 7, 29, 30, 89, 90, 179, 180, 500];
        let prefixes: Vec<char> = days
            .iter()
            .map(|d| categorize_lead_time(*d).chars().next().unwrap())
            .collect();
        assert_eq!(prefixes, vec!['1', '1', '2', '2', '3', '3', '4', '4', '5', '5']);
        assert_eq!(categorize_lead_time(u32::MAX), "5. Very Early (180+ days)");
    }

    #[test]
    fn bucket_labels_sort_like_buckets() {
        let buckets = [
            LeadTimeBucket::LastMinute,
            LeadTimeBucket::ShortNotice,
            LeadTimeBucket::Standard,
            LeadTimeBucket::EarlyBooking,
            LeadTimeBucket::VeryEarly,
        ];
        let mut labels: Vec<&str> = buckets.iter().rev().map(|b| b.label()).collect();
        labels.sort();
        let expected: Vec<&str> = buckets.iter().map(|b| b.label()).collect();
        assert_eq!(labels, expected);
    }

    #[test]
    fn segment_report_excludes_canceled_revenue() {
        let data = vec![
            rec("A", "R1", 2018, 1, 10, 80.0, 100.0, Confirmed),
            rec("A", "R1", 2018, 1, 10, 90.0, 50.0, Canceled),
            rec("B", "R1", 2018, 1, 10, 120.0, 200.0, Confirmed),
        ];
        let rows = segment_revenue_report(&data);
        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].segment.as_str(), rows[0].total_revenue, rows[0].bookings), ("B", 200.0, 1));
        assert_eq!((rows[1].segment.as_str(), rows[1].total_revenue, rows[1].bookings), ("A", 100.0, 1));
        assert_eq!(rows[1].adr, 80.0);
    }

    #[test]
    fn segment_ties_break_by_name() {
        let data = vec![
            rec("Online", "R1", 2018, 1, 1, 50.0, 100.0, Confirmed),
            rec("Corporate", "R1", 2018, 1, 1, 50.0, 100.0, Confirmed),
        ];
        let rows = segment_revenue_report(&data);
        assert_eq!(rows[0].segment, "Corporate");
        assert_eq!(rows[1].segment, "Online");
    }

    #[test]
    fn segment_report_of_only_canceled_is_empty() {
        let data = vec![rec("A", "R1", 2018, 1, 1, 50.0, 100.0, Canceled)];
        assert!(segment_revenue_report(&data).is_empty());
    }

    #[test]
    fn monthly_report_is_chronological_with_first_tie_winning() {
        let data = vec![
            rec("A", "R1", 2018, 3, 1, 100.0, 300.0, Confirmed),
            rec("A", "R1", 2017, 12, 1, 100.0, 300.0, Confirmed),
            rec("A", "R1", 2018, 1, 1, 60.0, 100.0, Confirmed),
            rec("A", "R1", 2018, 2, 1, 60.0, 100.0, Confirmed),
            rec("A", "R1", 2018, 2, 1, 60.0, 999.0, Canceled),
        ];
        let report = monthly_trend_report(&data);
        let periods: Vec<&str> = report.rows.iter().map(|r| r.period.as_str()).collect();
        assert_eq!(periods, vec!["2017-12", "2018-01", "2018-02", "2018-03"]);
        assert_eq!(report.peak.as_ref().unwrap().period, "2017-12");
        assert_eq!(report.lowest.as_ref().unwrap().period, "2018-01");
        assert_eq!(report.average_revenue, Some(200.0));
        assert_eq!(report.rows[2].bookings, 1);
    }

    #[test]
    fn monthly_report_of_nothing_has_no_insights() {
        let report = monthly_trend_report(&[]);
        assert!(report.rows.is_empty());
        assert_eq!(report.peak, None);
        assert_eq!(report.lowest, None);
        assert_eq!(report.average_revenue, None);
    }

    #[test]
    fn lead_time_report_counts_cancellations() {
        let data = vec![
            rec("A", "R1", 2018, 1, 200, 100.0, 0.0, Canceled),
            rec("A", "R1", 2018, 1, 250, 80.0, 0.0, Canceled),
            rec("A", "R1", 2018, 1, 300, 60.0, 0.0, Confirmed),
            rec("A", "R1", 2018, 1, 2, 70.0, 0.0, Confirmed),
        ];
        let rows = lead_time_risk_report(&data);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].booking_window, "1. Last Minute (0-6 days)");
        assert_eq!(rows[0].cancellation_rate, Some(0.0));
        assert_eq!(rows[1].booking_window, "5. Very Early (180+ days)");
        assert_eq!(rows[1].total_bookings, 3);
        assert_eq!(rows[1].canceled, 2);
        assert_eq!(rows[1].cancellation_rate, Some(66.7));
        assert_eq!(rows[1].adr, 80.0);
        assert_eq!(rows[1].avg_lead_time, 250.0);
    }

    #[test]
    fn room_type_report_splits_counts_and_confirmed_revenue() {
        let data = vec![
            rec("A", "Room_Type 1", 2018, 1, 1, 100.0, 300.0, Confirmed),
            rec("A", "Room_Type 1", 2018, 1, 1, 200.0, 900.0, Canceled),
            rec("A", "Room_Type 1", 2018, 1, 1, 50.0, 100.0, Confirmed),
            rec("A", "Room_Type 6", 2018, 1, 1, 300.0, 1200.0, Canceled),
        ];
        let rows = room_type_report(&data);
        assert_eq!(rows.len(), 2);

        let r1 = &rows[0];
        assert_eq!(r1.room_type, "Room_Type 1");
        assert_eq!(r1.total_bookings, 3);
        assert_eq!(r1.canceled, 1);
        assert_eq!(r1.confirmed, 2);
        assert_eq!(r1.total_revenue, 400.0);
        assert_eq!(r1.adr, Some(75.0));
        assert_eq!(r1.cancellation_rate, Some(33.3));
        assert_eq!(r1.revenue_per_booking, Some(133.33));

        let r6 = &rows[1];
        assert_eq!(r6.confirmed, 0);
        assert_eq!(r6.total_revenue, 0.0);
        assert_eq!(r6.adr, None);
        assert_eq!(r6.cancellation_rate, Some(100.0));
        assert_eq!(r6.revenue_per_booking, Some(0.0));
    }

    #[test]
    fn room_type_ties_break_by_name() {
        let data = vec![
            rec("A", "Room_Type 7", 2018, 1, 1, 50.0, 250.0, Confirmed),
            rec("A", "Room_Type 2", 2018, 1, 1, 50.0, 250.0, Confirmed),
            rec("A", "Room_Type 5", 2018, 1, 1, 50.0, 250.0, Confirmed),
            rec("A", "Room_Type 3", 2018, 1, 1, 50.0, 900.0, Canceled),
        ];
        let names: Vec<String> = room_type_report(&data)
            .into_iter()
            .map(|r| r.room_type)
            .collect();
        assert_eq!(names, vec!["Room_Type 2", "Room_Type 5", "Room_Type 7", "Room_Type 3"]);
    }

    #[test]
    fn headline_summary_uses_confirmed_for_money() {
        let data = vec![
            rec("A", "R1", 2018, 1, 1, 100.0, 300.0, Confirmed),
            rec("A", "R1", 2018, 1, 1, 500.0, 900.0, Canceled),
            rec("A", "R1", 2018, 1, 1, 50.0, 100.0, Confirmed),
        ];
        let s = headline_summary(&data);
        assert_eq!(s.total_bookings, 3);
        assert_eq!(s.confirmed_bookings, 2);
        assert_eq!(s.canceled_bookings, 1);
        assert_eq!(s.average_adr, Some(75.0));
        assert_eq!(s.total_revenue, 400.0);
        assert_eq!(s.average_guests, Some(2.0));

        let empty = headline_summary(&[]);
        assert_eq!(empty.average_adr, None);
        assert_eq!(empty.total_revenue, 0.0);
    }
}
