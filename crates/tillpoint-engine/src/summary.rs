//! # Sales Summary
//!
//! Aggregates the listing read path: overall totals, a zero-filled 7-day
//! revenue series, and week-over-week movement. All arithmetic runs in
//! integer cents; decimals appear only in the serialized output.

use chrono::NaiveDate;
use serde::Serialize;

use tillpoint_core::Money;
use tillpoint_db::ListedSale;

// =============================================================================
// Output Types
// =============================================================================

/// Aggregate view over all recorded sales.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    /// Net revenue (sale totals) across every sale.
    pub total_revenue: f64,
    pub sale_count: u64,
    /// Revenue divided by count; 0 when there are no sales.
    pub average_order_value: f64,
    /// Last 7 days including today, oldest first, zero-filled.
    pub daily_revenue: Vec<DailyRevenue>,
    /// Last-7-days vs the 7 days before, in percent.
    pub revenue_change_pct: f64,
    pub sale_count_change_pct: f64,
    pub average_order_value_change_pct: f64,
    /// The same movement as absolute deltas (current window minus previous).
    pub revenue_change: f64,
    pub sale_count_change: i64,
    pub average_order_value_change: f64,
}

/// Revenue recorded on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub revenue: f64,
}

// =============================================================================
// Aggregation
// =============================================================================

/// Summarizes recorded sales as of `today` (the caller's calendar day;
/// sale timestamps are bucketed by their UTC date).
pub fn summarize(sales: &[ListedSale], today: NaiveDate) -> SalesSummary {
    let total_cents: i64 = sales.iter().map(|s| s.sale.total_cents).sum();
    let count = sales.len() as u64;

    let week_start = today - chrono::Days::new(6);
    let prev_week_start = today - chrono::Days::new(13);

    let mut daily_cents = [0i64; 7];
    let (mut cur_cents, mut cur_count) = (0i64, 0u64);
    let (mut prev_cents, mut prev_count) = (0i64, 0u64);

    for sale in sales {
        let day = sale.sale.created_at.date_naive();
        if day >= week_start && day <= today {
            cur_cents += sale.sale.total_cents;
            cur_count += 1;
            let offset = (day - week_start).num_days() as usize;
            daily_cents[offset] += sale.sale.total_cents;
        } else if day >= prev_week_start && day < week_start {
            prev_cents += sale.sale.total_cents;
            prev_count += 1;
        }
    }

    let daily_revenue = daily_cents
        .iter()
        .enumerate()
        .map(|(offset, &cents)| DailyRevenue {
            date: week_start + chrono::Days::new(offset as u64),
            revenue: Money::from_cents(cents).to_decimal(),
        })
        .collect();

    let cur_aov = average_cents(cur_cents, cur_count);
    let prev_aov = average_cents(prev_cents, prev_count);

    SalesSummary {
        total_revenue: Money::from_cents(total_cents).to_decimal(),
        sale_count: count,
        average_order_value: average_cents(total_cents, count),
        daily_revenue,
        revenue_change_pct: pct_change(prev_cents as f64, cur_cents as f64),
        sale_count_change_pct: pct_change(prev_count as f64, cur_count as f64),
        average_order_value_change_pct: pct_change(prev_aov, cur_aov),
        revenue_change: Money::from_cents(cur_cents - prev_cents).to_decimal(),
        sale_count_change: cur_count as i64 - prev_count as i64,
        average_order_value_change: cur_aov - prev_aov,
    }
}

/// Average in decimal currency; 0 for an empty window.
fn average_cents(total_cents: i64, count: u64) -> f64 {
    if count == 0 {
        0.0
    } else {
        total_cents as f64 / count as f64 / 100.0
    }
}

/// Percentage change with the zero-window convention: a previous window of
/// zero reads as +100% when anything happened, 0% when nothing did.
fn pct_change(previous: f64, current: f64) -> f64 {
    if previous == 0.0 {
        if current > 0.0 {
            100.0
        } else {
            0.0
        }
    } else {
        (current - previous) / previous * 100.0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tillpoint_core::{PaymentMethod, Sale};

    fn sale_on(date: NaiveDate, total_cents: i64) -> ListedSale {
        let created_at = Utc
            .from_utc_datetime(&date.and_hms_opt(12, 0, 0).unwrap());
        ListedSale {
            sale: Sale {
                id: format!("s-{date}-{total_cents}"),
                receipt_number: format!("r-{date}-{total_cents}"),
                attendant_id: "u-1".to_string(),
                payment_method: PaymentMethod::Cash,
                subtotal_cents: total_cents,
                discount_cents: 0,
                total_cents,
                created_at,
            },
            attendant_username: None,
            attendant_display_name: None,
            items: Vec::new(),
        }
    }

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_empty_summary() {
        let summary = summarize(&[], day("2026-08-24"));
        assert_eq!(summary.total_revenue, 0.0);
        assert_eq!(summary.sale_count, 0);
        assert_eq!(summary.average_order_value, 0.0);
        assert_eq!(summary.daily_revenue.len(), 7);
        assert!(summary.daily_revenue.iter().all(|d| d.revenue == 0.0));
        assert_eq!(summary.revenue_change_pct, 0.0);
    }

    #[test]
    fn test_series_is_oldest_first_and_zero_filled() {
        let today = day("2026-08-24");
        let sales = vec![sale_on(day("2026-08-22"), 1000), sale_on(today, 500)];
        let summary = summarize(&sales, today);

        assert_eq!(summary.daily_revenue[0].date, day("2026-08-18"));
        assert_eq!(summary.daily_revenue[6].date, today);
        assert_eq!(summary.daily_revenue[4].revenue, 10.0);
        assert_eq!(summary.daily_revenue[6].revenue, 5.0);
        assert_eq!(summary.daily_revenue[5].revenue, 0.0);
    }

    #[test]
    fn test_totals_and_average() {
        let today = day("2026-08-24");
        let sales = vec![sale_on(today, 1998), sale_on(today, 1000)];
        let summary = summarize(&sales, today);
        assert_eq!(summary.total_revenue, 29.98);
        assert_eq!(summary.sale_count, 2);
        assert_eq!(summary.average_order_value, 14.99);
    }

    #[test]
    fn test_week_over_week_change() {
        let today = day("2026-08-24");
        let sales = vec![
            // Previous window (Aug 11 - Aug 17)
            sale_on(day("2026-08-15"), 1000),
            // Current window (Aug 18 - Aug 24)
            sale_on(day("2026-08-20"), 1500),
        ];
        let summary = summarize(&sales, today);
        assert_eq!(summary.revenue_change_pct, 50.0);
        assert_eq!(summary.sale_count_change_pct, 0.0);
        assert_eq!(summary.average_order_value_change_pct, 50.0);
        assert_eq!(summary.revenue_change, 5.0);
        assert_eq!(summary.sale_count_change, 0);
        assert_eq!(summary.average_order_value_change, 5.0);
    }

    #[test]
    fn test_deltas_can_be_negative() {
        let today = day("2026-08-24");
        let sales = vec![
            sale_on(day("2026-08-15"), 2000),
            sale_on(day("2026-08-15"), 1000),
            sale_on(day("2026-08-20"), 1000),
        ];
        let summary = summarize(&sales, today);
        assert_eq!(summary.revenue_change, -20.0);
        assert_eq!(summary.sale_count_change, -1);
        assert!(summary.average_order_value_change < 0.0);
    }

    #[test]
    fn test_zero_previous_window_reads_as_full_growth() {
        let today = day("2026-08-24");
        let sales = vec![sale_on(today, 1500)];
        let summary = summarize(&sales, today);
        assert_eq!(summary.revenue_change_pct, 100.0);
        assert_eq!(summary.sale_count_change_pct, 100.0);
    }

    #[test]
    fn test_old_sales_count_toward_totals_only() {
        let today = day("2026-08-24");
        let sales = vec![sale_on(day("2026-01-01"), 9999)];
        let summary = summarize(&sales, today);
        assert_eq!(summary.total_revenue, 99.99);
        assert!(summary.daily_revenue.iter().all(|d| d.revenue == 0.0));
        assert_eq!(summary.revenue_change_pct, 0.0);
    }
}
