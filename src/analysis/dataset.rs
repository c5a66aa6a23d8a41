use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::core::error::Result;
use crate::core::types::{Category, Customer, Transaction};
use crate::storage::{self, DataPaths};

/// Transactions and customers loaded together
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub transactions: Vec<Transaction>,
    pub customers: Vec<Customer>,
}

impl Dataset {
    pub fn new(transactions: Vec<Transaction>, customers: Vec<Customer>) -> Self {
        Self {
            transactions,
            customers,
        }
    }

    /// Read both CSV files. Missing files are reported as `DataNotFound`.
    pub fn load(paths: &DataPaths) -> Result<Self> {
        paths.ensure_exist()?;
        let transactions = storage::read_transactions(&paths.transactions)?;
        let customers = storage::read_customers(&paths.customers)?;
        Ok(Self::new(transactions, customers))
    }

    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        date_bounds(&self.transactions)
    }

    pub fn categories(&self) -> Vec<Category> {
        available_categories(&self.transactions)
    }

    pub fn regions(&self) -> Vec<String> {
        available_regions(&self.transactions)
    }
}

/// Load the dataset stored at `paths`
pub fn load_dataset(paths: &DataPaths) -> Result<Dataset> {
    Dataset::load(paths)
}

/// Earliest and latest transaction dates
pub fn date_bounds(rows: &[Transaction]) -> Option<(NaiveDate, NaiveDate)> {
    let min = rows.iter().map(|t| t.date).min()?;
    let max = rows.iter().map(|t| t.date).max()?;
    Some((min, max))
}

/// Categories present in the data, sorted by label
pub fn available_categories(rows: &[Transaction]) -> Vec<Category> {
    let present: BTreeSet<&str> = rows.iter().map(|t| t.category.label()).collect();
    let mut categories: Vec<Category> = Category::ALL
        .into_iter()
        .filter(|c| present.contains(c.label()))
        .collect();
    categories.sort_by_key(|c| c.label());
    categories
}

/// Regions present in the data, sorted alphabetically
pub fn available_regions(rows: &[Transaction]) -> Vec<String> {
    rows.iter()
        .map(|t| t.region.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
