use crate::analysis::TransactionFilter;
use crate::config::Config;
use crate::core::constants::files;
use log::{debug, error, info, warn};
use std::path::Path;

/// Initialize the logger with appropriate level based on verbosity.
/// An explicit `RUST_LOG` takes precedence over the flags.
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Off // Only show structured logs in verbose mode
    };

    let mut builder = env_logger::Builder::from_default_env();
    if std::env::var_os("RUST_LOG").is_none() {
        builder.filter_level(level);
    }

    // Tests and the server may initialise more than once
    if builder
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .try_init()
        .is_ok()
    {
        debug!("Logger initialized with level: {level:?}");
    }
}

/// Log configuration information
pub fn log_config_info(config: &Config) {
    info!(
        "Configuration: data_dir={}, format={}, top={}",
        config.data_dir.as_deref().unwrap_or(files::DEFAULT_DATA_DIR),
        config.output_format(),
        config.top_products()
    );
    debug!(
        "Generation: transactions={:?}, customers={:?}, seed={:?}, history_days={:?}",
        config.transactions, config.customer_pool, config.seed, config.history_days
    );
}

/// Log the start of a generation run
pub fn log_generation_start(transactions: usize, customer_pool: u32, seed: u64) {
    info!("Generating {transactions} transactions for up to {customer_pool} customers (seed={seed})");
}

/// Log generation completion
pub fn log_generation_complete(transactions: usize, customers: usize, duration_ms: u128) {
    info!(
        "✅ Generation complete: {transactions} transactions, {customers} customers ({duration_ms}ms)"
    );
}

/// Log a file written to disk
pub fn log_file_written<P: AsRef<Path>>(path: P, rows: usize) {
    debug!("Wrote {rows} row(s) to {}", path.as_ref().display());
}

/// Log dataset loading
pub fn log_dataset_loaded<P: AsRef<Path>>(path: P, transactions: usize, customers: usize) {
    info!(
        "Loaded {transactions} transactions and {customers} customers from {}",
        path.as_ref().display()
    );
}

/// Log filter application
pub fn log_filter_applied(filter: &TransactionFilter, kept: usize, total: usize) {
    if filter.is_empty() {
        debug!("No filter: {total} transactions");
    } else {
        info!("Filter [{}] kept {kept}/{total} transactions", filter.describe());
    }
}

/// Log one served HTTP request
pub fn log_request(method: &str, path: &str, status: u16, duration_ms: u128) {
    if status >= 400 {
        warn!("{method} {path} -> {status} ({duration_ms}ms)");
    } else {
        debug!("{method} {path} -> {status} ({duration_ms}ms)");
    }
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}

/// Log warning information
pub fn log_warning(message: &str) {
    warn!("{message}");
}
