use chrono::NaiveDate;
use serde::Serialize;

use crate::analysis::{
    self, CategorySales, Dataset, Kpis, PaymentSales, ProductSales, RegionSales, SegmentStats,
    TimeBucket, TransactionFilter,
};
use crate::core::types::{Category, Granularity};

/// Every aggregate shown on the dashboard for one filter selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub filter: TransactionFilter,
    pub granularity: Granularity,
    pub top_n: usize,
    /// Rows in the dataset before filtering
    pub total_rows: usize,
    /// Rows left after filtering
    pub filtered_rows: usize,
    pub kpis: Kpis,
    pub categories: Vec<CategorySales>,
    pub regions: Vec<RegionSales>,
    pub time_series: Vec<TimeBucket>,
    pub top_products: Vec<ProductSales>,
    pub payment_methods: Vec<PaymentSales>,
    /// Computed on the whole customer table, filters do not apply
    pub segments: Vec<SegmentStats>,
}

impl DashboardSummary {
    pub fn build(
        dataset: &Dataset,
        filter: &TransactionFilter,
        granularity: Granularity,
        top_n: usize,
    ) -> Self {
        let rows = filter.apply(&dataset.transactions);
        crate::reporting::logging::log_filter_applied(filter, rows.len(), dataset.transactions.len());

        Self {
            filter: filter.clone(),
            granularity,
            top_n,
            total_rows: dataset.transactions.len(),
            filtered_rows: rows.len(),
            kpis: analysis::calculate_kpis(&rows),
            categories: analysis::sales_by_category(&rows),
            regions: analysis::sales_by_region(&rows),
            time_series: analysis::sales_over_time(&rows, granularity),
            top_products: analysis::top_products(&rows, top_n),
            payment_methods: analysis::payment_methods(&rows),
            segments: analysis::customer_segments(&dataset.customers),
        }
    }
}

/// Values offered by the dashboard filter controls
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterOptions {
    pub categories: Vec<Category>,
    pub regions: Vec<String>,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
}

impl FilterOptions {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let bounds = dataset.date_bounds();
        Self {
            categories: dataset.categories(),
            regions: dataset.regions(),
            min_date: bounds.map(|(min, _)| min),
            max_date: bounds.map(|(_, max)| max),
        }
    }
}
