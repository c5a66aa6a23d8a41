//! Core types and foundational components
//!
//! This module contains the domain records, error handling,
//! and constants used throughout the application.

pub mod constants;
pub mod error;
pub mod types;

// Re-export commonly used items for convenience
pub use error::{Result, SalesboardError};
pub use types::{
    Category, Customer, Granularity, PaymentMethod, Segment, Transaction, TransactionStatus,
    round_cents,
};
