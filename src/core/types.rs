//! Domain records and the small enums describing them

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::constants::segments;
use crate::core::error::{Result, SalesboardError};

/// Round an amount to cents
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Product category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Electronics,
    Clothing,
    #[serde(rename = "Home & Garden")]
    HomeGarden,
    #[serde(rename = "Sports & Leisure")]
    SportsLeisure,
    Books,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Electronics,
        Category::Clothing,
        Category::HomeGarden,
        Category::SportsLeisure,
        Category::Books,
    ];

    /// Human readable label, also used in the CSV files
    pub fn label(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Clothing => "Clothing",
            Category::HomeGarden => "Home & Garden",
            Category::SportsLeisure => "Sports & Leisure",
            Category::Books => "Books",
        }
    }

    /// Short form accepted on the command line and in query strings
    pub fn slug(&self) -> &'static str {
        match self {
            Category::Electronics => "electronics",
            Category::Clothing => "clothing",
            Category::HomeGarden => "home-garden",
            Category::SportsLeisure => "sports-leisure",
            Category::Books => "books",
        }
    }

    pub fn products(&self) -> &'static [&'static str] {
        match self {
            Category::Electronics => &[
                "Smartphone",
                "Laptop",
                "Tablet",
                "Headphones",
                "Smartwatch",
                "Bluetooth Speaker",
            ],
            Category::Clothing => &["T-shirt", "Jeans", "Dress", "Jacket", "Shoes", "Handbag"],
            Category::HomeGarden => &[
                "Vacuum Cleaner",
                "Coffee Maker",
                "Lamp",
                "Cushion",
                "Plant",
                "Candle",
            ],
            Category::SportsLeisure => &[
                "Ball",
                "Yoga Mat",
                "Bicycle",
                "Racket",
                "Sports Bag",
                "Water Bottle",
            ],
            Category::Books => &[
                "Novel",
                "Comic Book",
                "How-to Guide",
                "Biography",
                "Science Fiction",
                "Cookbook",
            ],
        }
    }

    /// Range the base unit price is drawn from
    pub fn price_range(&self) -> (f64, f64) {
        match self {
            Category::Electronics => (50.0, 1200.0),
            Category::Clothing => (15.0, 150.0),
            Category::HomeGarden => (10.0, 300.0),
            Category::SportsLeisure => (10.0, 500.0),
            Category::Books => (5.0, 50.0),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = SalesboardError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| {
                c.label().eq_ignore_ascii_case(wanted) || c.slug().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| {
                SalesboardError::InvalidArgument(format!(
                    "Unknown category '{wanted}'. Expected one of: {}.",
                    Category::ALL
                        .iter()
                        .map(|c| c.label())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })
    }
}

/// Outcome of a transaction; only completed ones count toward revenue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    Completed,
    Cancelled,
    Refunded,
}

impl TransactionStatus {
    pub const ALL: [TransactionStatus; 3] = [
        TransactionStatus::Completed,
        TransactionStatus::Cancelled,
        TransactionStatus::Refunded,
    ];

    pub fn is_completed(&self) -> bool {
        matches!(self, TransactionStatus::Completed)
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionStatus::Completed => "Completed",
            TransactionStatus::Cancelled => "Cancelled",
            TransactionStatus::Refunded => "Refunded",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "Credit Card")]
    CreditCard,
    PayPal,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
    #[serde(rename = "Apple Pay")]
    ApplePay,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::CreditCard,
        PaymentMethod::PayPal,
        PaymentMethod::BankTransfer,
        PaymentMethod::ApplePay,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::PayPal => "PayPal",
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::ApplePay => "Apple Pay",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Customer bucket derived from total completed spend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Segment {
    Premium,
    Regular,
    Occasional,
}

impl Segment {
    pub const ALL: [Segment; 3] = [Segment::Premium, Segment::Regular, Segment::Occasional];

    pub fn from_total_spent(total_spent: f64) -> Self {
        if total_spent > segments::PREMIUM_THRESHOLD {
            Segment::Premium
        } else if total_spent > segments::REGULAR_THRESHOLD {
            Segment::Regular
        } else {
            Segment::Occasional
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Segment::Premium => "Premium",
            Segment::Regular => "Regular",
            Segment::Occasional => "Occasional",
        };
        f.write_str(label)
    }
}

/// Time bucket size of the revenue series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    #[default]
    Month,
}

impl Granularity {
    pub const ALL: [Granularity; 3] = [Granularity::Day, Granularity::Week, Granularity::Month];

    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
        }
    }

    /// Last day of the bucket containing `date`. Weeks end on Sunday.
    pub fn period_end(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Day => date,
            Granularity::Week => {
                let days_to_sunday = 6 - date.weekday().num_days_from_monday();
                date.checked_add_days(Days::new(u64::from(days_to_sunday)))
                    .unwrap_or(date)
            }
            Granularity::Month => date
                .with_day(1)
                .and_then(|first| first.checked_add_months(Months::new(1)))
                .and_then(|next_month| next_month.pred_opt())
                .unwrap_or(date),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = SalesboardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "d" | "daily" => Ok(Granularity::Day),
            "week" | "w" | "weekly" => Ok(Granularity::Week),
            "month" | "m" | "monthly" => Ok(Granularity::Month),
            other => Err(SalesboardError::InvalidArgument(format!(
                "Invalid granularity '{other}'. Expected one of: day, week, month."
            ))),
        }
    }
}

/// A single sale line as stored in `transactions.csv`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: String,
    pub date: NaiveDate,
    pub customer_id: String,
    pub category: Category,
    pub product: String,
    pub quantity: u32,
    pub unit_price: f64,
    /// Zero unless the transaction completed
    pub total_amount: f64,
    pub region: String,
    pub payment_method: PaymentMethod,
    pub status: TransactionStatus,
}

impl Transaction {
    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }
}

/// Per-customer aggregate as stored in `customers.csv`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: String,
    pub first_purchase_date: NaiveDate,
    pub total_purchases: u32,
    pub total_spent: f64,
    pub segment: Segment,
}
