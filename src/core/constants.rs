/// Application-wide constants to avoid magic values throughout the codebase.
///
/// This module centralizes the literal values used across the application:
/// file names, generator distributions, segment thresholds and display strings.
/// Output format constants
pub mod output_formats {
    /// Text output format - colorful, emoji-enhanced tables
    pub const TEXT: &str = "text";
    /// JSON output format - structured output for automation
    pub const JSON: &str = "json";
    /// Minimal output format - plain text without colors or emojis
    pub const MINIMAL: &str = "minimal";

    /// Default output format
    pub const DEFAULT: &str = TEXT;

    /// All valid output formats
    pub const ALL: [&str; 3] = [TEXT, JSON, MINIMAL];
}

/// Data file locations
pub mod files {
    /// Directory holding the generated CSV files
    pub const DEFAULT_DATA_DIR: &str = "data";
    /// Transactions file name inside the data directory
    pub const TRANSACTIONS_FILE: &str = "transactions.csv";
    /// Customers file name inside the data directory
    pub const CUSTOMERS_FILE: &str = "customers.csv";
    /// Default output path of the static HTML dashboard
    pub const DEFAULT_DASHBOARD_PATH: &str = "dashboard.html";
    /// Configuration file looked up in the working directory and its parents
    pub const CONFIG_FILE_NAME: &str = ".salesboard.toml";
    /// Rows shown in the preview printed after generation
    pub const PREVIEW_ROWS: usize = 5;
}

/// Default configuration values
pub mod defaults {
    /// Number of transactions generated
    pub const TRANSACTIONS: usize = 5000;
    /// Number of distinct customer ids transactions are drawn from
    pub const CUSTOMER_POOL: u32 = 1000;
    /// Random seed
    pub const SEED: u64 = 42;
    /// Length of the generated history, ending at the end date
    pub const HISTORY_DAYS: i64 = 730;
    /// Products listed in the top products ranking
    pub const TOP_PRODUCTS: usize = 10;
    /// Address the dashboard server binds to
    pub const BIND_ADDR: &str = "127.0.0.1:8501";
    /// Time series granularity
    pub const GRANULARITY: &str = "month";
}

/// Validation limits
pub mod limits {
    /// Customer ids are rendered with four digits
    pub const MAX_CUSTOMER_POOL: u32 = 9999;
    /// Transaction ids are rendered with six digits
    pub const MAX_TRANSACTIONS: usize = 999_999;
    /// Ten years of history
    pub const MAX_HISTORY_DAYS: i64 = 3650;
    /// Upper bound for any top-N ranking
    pub const MAX_TOP_PRODUCTS: usize = 100;
    /// Range offered by the dashboard's top products control
    pub const DASHBOARD_TOP_MIN: usize = 5;
    pub const DASHBOARD_TOP_MAX: usize = 20;
}

/// Random distributions used by the generator
pub mod distribution {
    /// Mean of the exponential day offset from the start of the history
    pub const MEAN_DAY_OFFSET: f64 = 200.0;
    /// Possible quantities per order
    pub const QUANTITIES: [u32; 5] = [1, 2, 3, 4, 5];
    /// Weights of each quantity
    pub const QUANTITY_WEIGHTS: [f64; 5] = [0.50, 0.25, 0.15, 0.07, 0.03];
    /// Weights of Completed, Cancelled and Refunded statuses
    pub const STATUS_WEIGHTS: [f64; 3] = [0.95, 0.03, 0.02];
    /// Multiplicative jitter applied to the base price
    pub const PRICE_JITTER_MIN: f64 = 0.9;
    pub const PRICE_JITTER_MAX: f64 = 1.1;
}

/// Customer segmentation thresholds on total completed spend
pub mod segments {
    /// Spend strictly above this is Premium
    pub const PREMIUM_THRESHOLD: f64 = 2000.0;
    /// Spend strictly above this (and not Premium) is Regular
    pub const REGULAR_THRESHOLD: f64 = 500.0;
}

/// Sales regions transactions are spread over
pub mod regions {
    pub const ALL: [&str; 8] = [
        "Île-de-France",
        "Auvergne-Rhône-Alpes",
        "Provence-Alpes-Côte d'Azur",
        "Nouvelle-Aquitaine",
        "Occitanie",
        "Hauts-de-France",
        "Bretagne",
        "Grand Est",
    ];
}

/// Dashboard filter constants
pub mod filters {
    /// Select option meaning "no filter"
    pub const ALL_OPTION: &str = "All";
}

/// Display and formatting constants
pub mod display {
    /// Currency symbol appended to amounts
    pub const CURRENCY: &str = "€";
    /// Emoji for revenue
    pub const REVENUE_EMOJI: &str = "💰";
    /// Emoji for transactions
    pub const TRANSACTIONS_EMOJI: &str = "🛒";
    /// Emoji for average basket
    pub const BASKET_EMOJI: &str = "📦";
    /// Emoji for customers
    pub const CUSTOMERS_EMOJI: &str = "👥";
    /// Emoji for units sold
    pub const UNITS_EMOJI: &str = "📊";
    /// Emoji for conversion rate
    pub const CONVERSION_EMOJI: &str = "✅";
    /// Emoji for the top products section
    pub const TROPHY_EMOJI: &str = "🏆";
    /// Emoji for file information
    pub const FILE_EMOJI: &str = "📁";
}
