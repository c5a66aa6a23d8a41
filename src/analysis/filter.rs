use chrono::NaiveDate;
use serde::Serialize;

use crate::core::constants::filters;
use crate::core::error::{Result, SalesboardError};
use crate::core::types::{Category, Transaction};

/// Row filter applied before any aggregation. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransactionFilter {
    /// Inclusive lower date bound
    pub start: Option<NaiveDate>,
    /// Inclusive upper date bound
    pub end: Option<NaiveDate>,
    pub category: Option<Category>,
    pub region: Option<String>,
}

impl TransactionFilter {
    /// Build a filter from raw user input. `All` and blank values mean no filter.
    pub fn from_parts(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        category: Option<&str>,
        region: Option<&str>,
    ) -> Result<Self> {
        let category = match selection(category) {
            Some(raw) => Some(raw.parse::<Category>()?),
            None => None,
        };
        let filter = Self {
            start,
            end,
            category,
            region: selection(region).map(str::to_string),
        };
        filter.validate()?;
        Ok(filter)
    }

    pub fn validate(&self) -> Result<()> {
        if let (Some(start), Some(end)) = (self.start, self.end)
            && start > end
        {
            return Err(SalesboardError::InvalidArgument(format!(
                "Start date {start} is after end date {end}"
            )));
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none() && self.category.is_none() && self.region.is_none()
    }

    pub fn matches(&self, t: &Transaction) -> bool {
        self.start.is_none_or(|start| t.date >= start)
            && self.end.is_none_or(|end| t.date <= end)
            && self.category.is_none_or(|category| t.category == category)
            && self
                .region
                .as_deref()
                .is_none_or(|region| t.region == region)
    }

    pub fn apply<'a>(&self, rows: &'a [Transaction]) -> Vec<&'a Transaction> {
        rows.iter().filter(|t| self.matches(t)).collect()
    }

    /// One line summary of the active filters
    pub fn describe(&self) -> String {
        let period = match (self.start, self.end) {
            (None, None) => "all dates".to_string(),
            (Some(start), None) => format!("from {start}"),
            (None, Some(end)) => format!("until {end}"),
            (Some(start), Some(end)) => format!("{start} to {end}"),
        };
        let category = self
            .category
            .map_or("all categories".to_string(), |c| c.label().to_string());
        let region = self
            .region
            .clone()
            .unwrap_or_else(|| "all regions".to_string());
        format!("{period} · {category} · {region}")
    }
}

fn selection(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty() && !value.eq_ignore_ascii_case(filters::ALL_OPTION))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{PaymentMethod, TransactionStatus};

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn txn(day: NaiveDate, category: Category, region: &str) -> Transaction {
        Transaction {
            transaction_id: "TXN_000001".to_string(),
            date: day,
            customer_id: "CUST_0001".to_string(),
            category,
            product: "Novel".to_string(),
            quantity: 1,
            unit_price: 10.0,
            total_amount: 10.0,
            region: region.to_string(),
            payment_method: PaymentMethod::CreditCard,
            status: TransactionStatus::Completed,
        }
    }

    fn rows() -> Vec<Transaction> {
        vec![
            txn(date(1, 1), Category::Books, "Bretagne"),
            txn(date(1, 15), Category::Clothing, "Bretagne"),
            txn(date(2, 1), Category::Books, "Occitanie"),
            txn(date(3, 31), Category::Electronics, "Grand Est"),
        ]
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let rows = rows();
        let filter = TransactionFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&rows).len(), rows.len());
    }

    #[test]
    fn test_date_bounds_are_inclusive() {
        let rows = rows();
        let filter = TransactionFilter {
            start: Some(date(1, 15)),
            end: Some(date(2, 1)),
            ..Default::default()
        };
        let kept = filter.apply(&rows);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].date, date(1, 15));
        assert_eq!(kept[1].date, date(2, 1));
    }

    #[test]
    fn test_category_and_region_combine() {
        let rows = rows();
        let filter = TransactionFilter::from_parts(None, None, Some("books"), Some("Bretagne")).unwrap();
        let kept = filter.apply(&rows);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].date, date(1, 1));
    }

    #[test]
    fn test_all_and_blank_mean_no_filter() {
        let filter = TransactionFilter::from_parts(None, None, Some("All"), Some("  ")).unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn test_unknown_category_rejected() {
        let result = TransactionFilter::from_parts(None, None, Some("Groceries"), None);
        assert!(matches!(result, Err(SalesboardError::InvalidArgument(_))));
    }

    #[test]
    fn test_reversed_dates_rejected() {
        let result = TransactionFilter::from_parts(Some(date(3, 1)), Some(date(2, 1)), None, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_region_matches_nothing() {
        let rows = rows();
        let filter = TransactionFilter::from_parts(None, None, None, Some("Atlantis")).unwrap();
        assert!(filter.apply(&rows).is_empty());
    }

    #[test]
    fn test_describe() {
        assert_eq!(
            TransactionFilter::default().describe(),
            "all dates · all categories · all regions"
        );
        let filter = TransactionFilter {
            start: Some(date(1, 1)),
            end: Some(date(1, 31)),
            category: Some(Category::HomeGarden),
            region: Some("Bretagne".to_string()),
        };
        assert_eq!(filter.describe(), "2024-01-01 to 2024-01-31 · Home & Garden · Bretagne");
    }
}
