use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::types::{Granularity, Transaction, round_cents};

/// Completed sales within one period, labelled by the period's last day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeBucket {
    pub period_end: NaiveDate,
    pub revenue: f64,
    pub transactions: usize,
}

/// Revenue and completed transaction count per period.
///
/// The series runs from the first to the last period with sales and
/// includes empty periods in between with zero values.
pub fn sales_over_time(rows: &[&Transaction], granularity: Granularity) -> Vec<TimeBucket> {
    let mut buckets: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for t in rows.iter().filter(|t| t.is_completed()) {
        let entry = buckets.entry(granularity.period_end(t.date)).or_default();
        entry.0 += t.total_amount;
        entry.1 += 1;
    }

    let (Some(&first), Some(&last)) = (buckets.keys().next(), buckets.keys().next_back()) else {
        return Vec::new();
    };

    let mut series = Vec::new();
    let mut period_end = first;
    while period_end <= last {
        let (revenue, transactions) = buckets.get(&period_end).copied().unwrap_or_default();
        series.push(TimeBucket {
            period_end,
            revenue: round_cents(revenue),
            transactions,
        });

        match period_end.succ_opt() {
            Some(next_day) => period_end = granularity.period_end(next_day),
            None => break,
        }
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Category, PaymentMethod, TransactionStatus};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn txn(day: NaiveDate, amount: f64, status: TransactionStatus) -> Transaction {
        Transaction {
            transaction_id: "TXN_000001".to_string(),
            date: day,
            customer_id: "CUST_0001".to_string(),
            category: Category::Books,
            product: "Novel".to_string(),
            quantity: 1,
            unit_price: amount,
            total_amount: if status.is_completed() { amount } else { 0.0 },
            region: "Bretagne".to_string(),
            payment_method: PaymentMethod::PayPal,
            status,
        }
    }

    #[test]
    fn test_empty_input_gives_empty_series() {
        assert!(sales_over_time(&[], Granularity::Month).is_empty());

        let rows = vec![txn(date(2024, 1, 1), 10.0, TransactionStatus::Cancelled)];
        let refs: Vec<_> = rows.iter().collect();
        assert!(sales_over_time(&refs, Granularity::Day).is_empty());
    }

    #[test]
    fn test_monthly_series_is_zero_filled() {
        let rows = vec![
            txn(date(2024, 1, 5), 10.0, TransactionStatus::Completed),
            txn(date(2024, 1, 31), 5.5, TransactionStatus::Completed),
            txn(date(2024, 2, 10), 99.0, TransactionStatus::Refunded),
            txn(date(2024, 4, 1), 20.0, TransactionStatus::Completed),
        ];
        let refs: Vec<_> = rows.iter().collect();
        let series = sales_over_time(&refs, Granularity::Month);

        let ends: Vec<_> = series.iter().map(|b| b.period_end).collect();
        assert_eq!(
            ends,
            vec![date(2024, 1, 31), date(2024, 2, 29), date(2024, 3, 31), date(2024, 4, 30)]
        );
        assert_eq!(series[0].revenue, 15.5);
        assert_eq!(series[0].transactions, 2);
        assert_eq!(series[1].revenue, 0.0);
        assert_eq!(series[1].transactions, 0);
        assert_eq!(series[3].transactions, 1);
    }

    #[test]
    fn test_weekly_buckets_end_on_sunday() {
        let rows = vec![
            // Monday and Sunday of the same week
            txn(date(2024, 5, 13), 1.0, TransactionStatus::Completed),
            txn(date(2024, 5, 19), 2.0, TransactionStatus::Completed),
            txn(date(2024, 5, 27), 4.0, TransactionStatus::Completed),
        ];
        let refs: Vec<_> = rows.iter().collect();
        let series = sales_over_time(&refs, Granularity::Week);

        assert_eq!(series.len(), 3);
        assert_eq!(series[0].period_end, date(2024, 5, 19));
        assert_eq!(series[0].revenue, 3.0);
        assert_eq!(series[1].period_end, date(2024, 5, 26));
        assert_eq!(series[1].transactions, 0);
        assert_eq!(series[2].period_end, date(2024, 6, 2));
    }

    #[test]
    fn test_daily_revenue_matches_total() {
        let rows = vec![
            txn(date(2024, 2, 27), 1.25, TransactionStatus::Completed),
            txn(date(2024, 3, 2), 2.5, TransactionStatus::Completed),
        ];
        let refs: Vec<_> = rows.iter().collect();
        let series = sales_over_time(&refs, Granularity::Day);

        assert_eq!(series.len(), 5);
        let total: f64 = series.iter().map(|b| b.revenue).sum();
        assert_eq!(total, 3.75);
    }
}
