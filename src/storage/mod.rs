//! Flat file persistence
//!
//! Transactions and customers live in two CSV files with a header row.
//! Rows are (de)serialized straight from the domain records.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::constants::files;
use crate::core::error::{Result, SalesboardError};
use crate::core::types::{Customer, Transaction};

/// Locations of the two data files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub transactions: PathBuf,
    pub customers: PathBuf,
}

impl DataPaths {
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            transactions: dir.join(files::TRANSACTIONS_FILE),
            customers: dir.join(files::CUSTOMERS_FILE),
        }
    }

    /// Fail with a hint to run the generator when either file is missing
    pub fn ensure_exist(&self) -> Result<()> {
        for path in [&self.transactions, &self.customers] {
            if !path.is_file() {
                return Err(SalesboardError::DataNotFound(path.display().to_string()));
            }
        }
        Ok(())
    }
}

pub fn write_transactions<P: AsRef<Path>>(path: P, rows: &[Transaction]) -> Result<()> {
    write_rows(path.as_ref(), rows)
}

pub fn write_customers<P: AsRef<Path>>(path: P, rows: &[Customer]) -> Result<()> {
    write_rows(path.as_ref(), rows)
}

pub fn read_transactions<P: AsRef<Path>>(path: P) -> Result<Vec<Transaction>> {
    read_rows(path.as_ref())
}

pub fn read_customers<P: AsRef<Path>>(path: P) -> Result<Vec<Customer>> {
    read_rows(path.as_ref())
}

fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.is_file() {
        return Err(SalesboardError::DataNotFound(path.display().to_string()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Category, PaymentMethod, Segment, TransactionStatus};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn sample_transaction() -> Transaction {
        Transaction {
            transaction_id: "TXN_000001".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
            customer_id: "CUST_0042".to_string(),
            category: Category::HomeGarden,
            product: "Lamp".to_string(),
            quantity: 2,
            unit_price: 24.5,
            total_amount: 49.0,
            region: "Provence-Alpes-Côte d'Azur".to_string(),
            payment_method: PaymentMethod::ApplePay,
            status: TransactionStatus::Completed,
        }
    }

    #[test]
    fn test_transactions_round_trip_through_csv() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("nested").join("transactions.csv");
        let rows = vec![sample_transaction()];

        write_transactions(&path, &rows)?;
        let loaded = read_transactions(&path)?;

        assert_eq!(loaded, rows);
        Ok(())
    }

    #[test]
    fn test_transactions_header_and_labels() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("transactions.csv");
        write_transactions(&path, &[sample_transaction()])?;

        let content = fs::read_to_string(&path)?;
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some(
                "transaction_id,date,customer_id,category,product,quantity,unit_price,total_amount,region,payment_method,status"
            )
        );
        assert_eq!(
            lines.next(),
            Some(
                "TXN_000001,2024-03-14,CUST_0042,Home & Garden,Lamp,2,24.5,49.0,Provence-Alpes-Côte d'Azur,Apple Pay,Completed"
            )
        );
        Ok(())
    }

    #[test]
    fn test_customers_round_trip_through_csv() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("customers.csv");
        let rows = vec![Customer {
            customer_id: "CUST_0001".to_string(),
            first_purchase_date: NaiveDate::from_ymd_opt(2023, 1, 2).unwrap(),
            total_purchases: 3,
            total_spent: 2150.75,
            segment: Segment::Premium,
        }];

        write_customers(&path, &rows)?;
        assert_eq!(read_customers(&path)?, rows);
        Ok(())
    }

    #[test]
    fn test_read_missing_file_is_data_not_found() {
        let result = read_transactions("/definitely/not/here/transactions.csv");
        assert!(matches!(result, Err(SalesboardError::DataNotFound(_))));
    }

    #[test]
    fn test_read_malformed_row_is_csv_error() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("customers.csv");
        fs::write(
            &path,
            "customer_id,first_purchase_date,total_purchases,total_spent,segment\nCUST_0001,2023-01-02,three,10.0,Premium\n",
        )?;

        let result = read_customers(&path);
        assert!(matches!(result, Err(SalesboardError::Csv(_))));
        Ok(())
    }

    #[test]
    fn test_ensure_exist() -> Result<()> {
        let dir = TempDir::new()?;
        let paths = DataPaths::in_dir(dir.path());
        assert!(paths.ensure_exist().is_err());

        fs::write(&paths.transactions, "")?;
        fs::write(&paths.customers, "")?;
        paths.ensure_exist()?;
        Ok(())
    }
}
