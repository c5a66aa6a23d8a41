//! Synthetic data generation
//!
//! Produces a reproducible set of e-commerce transactions and the
//! customer table derived from them.

pub mod customers;
pub mod generator;

pub use customers::derive_customers;
pub use generator::{Generator, GeneratorSettings};
