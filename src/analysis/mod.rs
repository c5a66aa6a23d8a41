//! Filtering and aggregation of the sales dataset
//!
//! Every aggregate takes the already filtered rows as `&[&Transaction]`
//! and only counts completed transactions toward revenue.

pub mod aggregate;
pub mod dataset;
pub mod filter;
pub mod time_series;

pub use aggregate::{
    CategorySales, Kpis, PaymentSales, ProductSales, RegionSales, SegmentStats, calculate_kpis,
    customer_segments, payment_methods, sales_by_category, sales_by_region, top_products,
};
pub use dataset::{
    Dataset, available_categories, available_regions, date_bounds, load_dataset,
};
pub use filter::TransactionFilter;
pub use time_series::{TimeBucket, sales_over_time};
