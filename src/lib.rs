//! salesboard generates a synthetic e-commerce sales dataset and explores it
//! through KPIs, aggregates, a static HTML report and an HTTP dashboard.
//!
//! The crate is organized as:
//! - [`core`]: domain records, errors and constants
//! - [`config`]: TOML configuration merged with CLI arguments
//! - [`storage`]: CSV persistence of the two data files
//! - [`generation`]: reproducible transaction generator and customer derivation
//! - [`analysis`]: filters, KPIs and aggregates
//! - [`reporting`]: dashboard summaries, HTML rendering and logging
//! - [`server`]: the interactive dashboard served over HTTP
//! - [`ui`]: CLI parsing and terminal output

pub mod analysis;
pub mod config;
pub mod core;
pub mod generation;
pub mod reporting;
pub mod server;
pub mod storage;
pub mod ui;

pub use analysis::{Dataset, TransactionFilter};
pub use config::{CliConfig, Config};
pub use core::{
    Category, Customer, Granularity, PaymentMethod, Result, SalesboardError, Segment,
    Transaction, TransactionStatus,
};
pub use generation::{Generator, GeneratorSettings, derive_customers};
pub use reporting::{DashboardSummary, FilterOptions};
pub use storage::DataPaths;
