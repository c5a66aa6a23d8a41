use chrono::{Days, Local, NaiveDate};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::Config;
use crate::core::constants::{defaults, distribution, limits, regions};
use crate::core::error::{Result, SalesboardError};
use crate::core::types::{
    Category, PaymentMethod, Transaction, TransactionStatus, round_cents,
};

/// Parameters of a generation run
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorSettings {
    /// Number of transactions to produce
    pub transactions: usize,
    /// Customer ids are drawn uniformly from `1..=customer_pool`
    pub customer_pool: u32,
    pub seed: u64,
    /// Last day of the generated history
    pub end_date: NaiveDate,
    pub history_days: i64,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            transactions: defaults::TRANSACTIONS,
            customer_pool: defaults::CUSTOMER_POOL,
            seed: defaults::SEED,
            end_date: Local::now().date_naive(),
            history_days: defaults::HISTORY_DAYS,
        }
    }
}

impl GeneratorSettings {
    pub fn from_config(config: &Config, end_date: NaiveDate) -> Self {
        Self {
            transactions: config.transactions.unwrap_or(defaults::TRANSACTIONS),
            customer_pool: config.customer_pool.unwrap_or(defaults::CUSTOMER_POOL),
            seed: config.seed.unwrap_or(defaults::SEED),
            end_date,
            history_days: config.history_days.unwrap_or(defaults::HISTORY_DAYS),
        }
    }

    /// First day of the generated history
    pub fn start_date(&self) -> NaiveDate {
        self.end_date
            .checked_sub_days(Days::new(self.history_days.max(0) as u64))
            .unwrap_or(self.end_date)
    }
}

/// Seeded synthetic transaction generator
///
/// The same settings always produce the same rows.
pub struct Generator {
    settings: GeneratorSettings,
    rng: StdRng,
    quantities: WeightedIndex<f64>,
    statuses: WeightedIndex<f64>,
}

impl Generator {
    pub fn new(settings: GeneratorSettings) -> Result<Self> {
        // Customer ids have four digits
        if !(1..=limits::MAX_CUSTOMER_POOL).contains(&settings.customer_pool) {
            return Err(SalesboardError::InvalidArgument(format!(
                "Customer pool of {} is invalid. Expected a value between 1-{}.",
                settings.customer_pool,
                limits::MAX_CUSTOMER_POOL
            )));
        }

        let quantities = WeightedIndex::new(distribution::QUANTITY_WEIGHTS)
            .map_err(|e| SalesboardError::Config(format!("Invalid quantity weights: {e}")))?;
        let statuses = WeightedIndex::new(distribution::STATUS_WEIGHTS)
            .map_err(|e| SalesboardError::Config(format!("Invalid status weights: {e}")))?;

        Ok(Self {
            rng: StdRng::seed_from_u64(settings.seed),
            settings,
            quantities,
            statuses,
        })
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Generate all transactions, sorted by date
    pub fn generate_transactions(&mut self) -> Vec<Transaction> {
        self.generate_with_progress(|_| {})
    }

    /// Generate all transactions, calling `on_row` with the number of rows produced so far
    pub fn generate_with_progress<F: FnMut(usize)>(&mut self, mut on_row: F) -> Vec<Transaction> {
        let mut rows = Vec::with_capacity(self.settings.transactions);
        for index in 0..self.settings.transactions {
            rows.push(self.next_transaction(index));
            on_row(index + 1);
        }

        // Stable: rows sharing a date keep generation order
        rows.sort_by_key(|t| t.date);
        rows
    }

    fn next_transaction(&mut self, index: usize) -> Transaction {
        let start = self.settings.start_date();
        let offset = self.draw_day_offset();
        let date = start
            .checked_add_days(Days::new(offset))
            .unwrap_or(self.settings.end_date);

        let category = Category::ALL[self.rng.gen_range(0..Category::ALL.len())];
        let products = category.products();
        let product = products[self.rng.gen_range(0..products.len())];

        let (low, high) = category.price_range();
        let base_price = self.rng.gen_range(low..high);

        let quantity = distribution::QUANTITIES[self.quantities.sample(&mut self.rng)];

        let jitter = self
            .rng
            .gen_range(distribution::PRICE_JITTER_MIN..distribution::PRICE_JITTER_MAX);
        let unit_price = round_cents(base_price * jitter);
        let total = round_cents(unit_price * f64::from(quantity));

        let customer_number = self.rng.gen_range(1..=self.settings.customer_pool);
        let region = regions::ALL[self.rng.gen_range(0..regions::ALL.len())];
        let payment_method = PaymentMethod::ALL[self.rng.gen_range(0..PaymentMethod::ALL.len())];
        let status = TransactionStatus::ALL[self.statuses.sample(&mut self.rng)];

        Transaction {
            transaction_id: format!("TXN_{:06}", index + 1),
            date,
            customer_id: format!("CUST_{customer_number:04}"),
            category,
            product: product.to_string(),
            quantity,
            unit_price,
            total_amount: if status.is_completed() { total } else { 0.0 },
            region: region.to_string(),
            payment_method,
            status,
        }
    }

    /// Exponential offset from the start of the history, favouring early days.
    /// Offsets past the end of the history are redrawn uniformly.
    fn draw_day_offset(&mut self) -> u64 {
        let history = self.settings.history_days.max(0) as u64;
        let u: f64 = self.rng.gen_range(0.0..1.0);
        let offset = (-distribution::MEAN_DAY_OFFSET * (1.0 - u).ln()) as u64;
        if offset > history {
            self.rng.gen_range(0..=history)
        } else {
            offset
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn settings(transactions: usize, seed: u64) -> GeneratorSettings {
        GeneratorSettings {
            transactions,
            customer_pool: 50,
            seed,
            end_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            history_days: 730,
        }
    }

    fn generate(transactions: usize, seed: u64) -> Vec<Transaction> {
        Generator::new(settings(transactions, seed))
            .unwrap()
            .generate_transactions()
    }

    #[test]
    fn test_generates_requested_count() {
        assert_eq!(generate(321, 1).len(), 321);
        assert!(generate(0, 1).is_empty());
    }

    #[test]
    fn test_same_seed_same_rows() {
        assert_eq!(generate(200, 42), generate(200, 42));
        assert_ne!(generate(200, 42), generate(200, 43));
    }

    #[test]
    fn test_rows_sorted_by_date_within_history() {
        let s = settings(500, 3);
        let rows = generate(500, 3);

        assert!(rows.windows(2).all(|w| w[0].date <= w[1].date));
        assert!(rows.iter().all(|t| t.date >= s.start_date() && t.date <= s.end_date));
    }

    #[test]
    fn test_transaction_ids_are_unique_and_padded() {
        let rows = generate(150, 5);
        let ids: HashSet<_> = rows.iter().map(|t| t.transaction_id.as_str()).collect();
        assert_eq!(ids.len(), 150);
        assert!(ids.contains("TXN_000001"));
        assert!(ids.contains("TXN_000150"));
    }

    #[test]
    fn test_field_domains() {
        for t in generate(1000, 11) {
            assert!((1..=5).contains(&t.quantity));
            assert!(t.category.products().contains(&t.product.as_str()));
            assert!(regions::ALL.contains(&t.region.as_str()));

            let (low, high) = t.category.price_range();
            assert!(t.unit_price >= round_cents(low * 0.9) - 0.01);
            assert!(t.unit_price <= round_cents(high * 1.1) + 0.01);

            let number: u32 = t.customer_id.trim_start_matches("CUST_").parse().unwrap();
            assert!((1..=50).contains(&number));
            assert_eq!(t.customer_id.len(), "CUST_0000".len());
        }
    }

    #[test]
    fn test_amount_is_zero_unless_completed() {
        for t in generate(1000, 13) {
            if t.is_completed() {
                assert_eq!(t.total_amount, round_cents(t.unit_price * f64::from(t.quantity)));
            } else {
                assert_eq!(t.total_amount, 0.0);
            }
        }
    }

    #[test]
    fn test_status_mix_is_mostly_completed() {
        let rows = generate(2000, 17);
        let completed = rows.iter().filter(|t| t.is_completed()).count();
        let share = completed as f64 / rows.len() as f64;
        assert!(share > 0.9 && share < 0.99, "completed share {share}");
    }

    #[test]
    fn test_recent_history_start_is_over_represented() {
        let s = settings(3000, 19);
        let rows = generate(3000, 19);
        let first_year = rows
            .iter()
            .filter(|t| (t.date - s.start_date()).num_days() < 365)
            .count();
        assert!(first_year > rows.len() / 2);
    }

    #[test]
    fn test_customer_pool_bounds() {
        for pool in [0, limits::MAX_CUSTOMER_POOL + 1, u32::MAX] {
            let mut s = settings(10, 1);
            s.customer_pool = pool;
            assert!(matches!(
                Generator::new(s),
                Err(SalesboardError::InvalidArgument(_))
            ));
        }

        let mut s = settings(200, 1);
        s.customer_pool = limits::MAX_CUSTOMER_POOL;
        let rows = Generator::new(s).unwrap().generate_transactions();
        assert!(rows.iter().all(|t| t.customer_id.len() == "CUST_0000".len()));
    }

    #[test]
    fn test_progress_callback_counts_rows() {
        let mut calls = 0;
        let mut last = 0;
        Generator::new(settings(40, 1))
            .unwrap()
            .generate_with_progress(|n| {
                calls += 1;
                last = n;
            });
        assert_eq!(calls, 40);
        assert_eq!(last, 40);
    }
}
