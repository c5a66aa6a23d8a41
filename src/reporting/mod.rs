//! Analysis and reporting
//!
//! This module assembles dashboard summaries, renders the HTML dashboard,
//! and provides structured logging for the application.

pub mod dashboard;
pub mod logging;
pub mod summary;

// Re-export commonly used items
pub use dashboard::{DashboardData, HtmlDashboard, escape_html};
pub use summary::{DashboardSummary, FilterOptions};
