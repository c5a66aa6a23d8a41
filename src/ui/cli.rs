// Command-line interface definitions and parsing for salesboard

use crate::analysis::TransactionFilter;
use crate::config::CliConfig;
use crate::core::constants::output_formats;
use crate::core::error::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "salesboard",
    author,
    version,
    about = "Generate, analyze and visualize synthetic e-commerce sales data",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    // Data
    /// Directory holding transactions.csv and customers.csv (default: data)
    #[arg(long, value_name = "DIR", global = true, help_heading = "Data")]
    pub data_dir: Option<String>,

    // Output & Verbosity
    /// Suppress progress and informational output
    #[arg(short = 'q', long, global = true, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", global = true, help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, global = true, help_heading = "Configuration")]
    pub no_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate synthetic transactions and customers
    Generate(GenerateArgs),
    /// Print KPIs, category sales, top products and customer segments
    Analyze(AnalyzeArgs),
    /// Write a static HTML dashboard
    Dashboard(DashboardArgs),
    /// Serve the interactive dashboard over HTTP
    Serve(ServeArgs),
}

#[derive(Args, Debug, Default, Clone)]
pub struct GenerateArgs {
    /// Number of transactions to generate (default: 5000)
    #[arg(long, value_name = "COUNT", help_heading = "Generation")]
    pub transactions: Option<usize>,

    /// Size of the customer pool (default: 1000)
    #[arg(long = "customers", value_name = "COUNT", help_heading = "Generation")]
    pub customer_pool: Option<u32>,

    /// Random seed (default: 42)
    #[arg(long, value_name = "SEED", help_heading = "Generation")]
    pub seed: Option<u64>,

    /// Last day of the generated history, YYYY-MM-DD (default: today)
    #[arg(long, value_name = "DATE", help_heading = "Generation")]
    pub end_date: Option<NaiveDate>,

    /// Length of the generated history in days (default: 730)
    #[arg(long, value_name = "DAYS", help_heading = "Generation")]
    pub history_days: Option<i64>,
}

#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Keep transactions on or after this date, YYYY-MM-DD
    #[arg(long = "from", value_name = "DATE", help_heading = "Filters")]
    pub from: Option<NaiveDate>,

    /// Keep transactions on or before this date, YYYY-MM-DD
    #[arg(long = "to", value_name = "DATE", help_heading = "Filters")]
    pub to: Option<NaiveDate>,

    /// Keep a single category (label or slug, e.g. "home-garden")
    #[arg(long, value_name = "CATEGORY", help_heading = "Filters")]
    pub category: Option<String>,

    /// Keep a single region
    #[arg(long, value_name = "REGION", help_heading = "Filters")]
    pub region: Option<String>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> Result<TransactionFilter> {
        TransactionFilter::from_parts(
            self.from,
            self.to,
            self.category.as_deref(),
            self.region.as_deref(),
        )
    }
}

#[derive(Args, Debug, Default, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Number of products in the ranking (default: 10)
    #[arg(long, value_name = "COUNT", help_heading = "Output & Verbosity")]
    pub top: Option<usize>,

    /// Output format
    #[arg(long, value_name = "FORMAT", value_parser = output_formats::ALL, help_heading = "Output & Verbosity")]
    pub format: Option<String>,
}

#[derive(Args, Debug, Default, Clone)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Time series granularity: day, week or month (default: month)
    #[arg(long, value_name = "GRANULARITY", help_heading = "Dashboard")]
    pub granularity: Option<String>,

    /// Number of products in the ranking (default: 10)
    #[arg(long, value_name = "COUNT", help_heading = "Dashboard")]
    pub top: Option<usize>,

    /// Output path of the HTML file (default: dashboard.html)
    #[arg(short = 'o', long, value_name = "PATH", help_heading = "Dashboard")]
    pub output: Option<String>,
}

#[derive(Args, Debug, Default, Clone)]
pub struct ServeArgs {
    /// Address to listen on (default: 127.0.0.1:8501)
    #[arg(long, value_name = "ADDR", help_heading = "Server")]
    pub bind: Option<String>,

    /// Default time series granularity (default: month)
    #[arg(long, value_name = "GRANULARITY", help_heading = "Server")]
    pub granularity: Option<String>,

    /// Default number of products in the ranking (default: 10)
    #[arg(long, value_name = "COUNT", help_heading = "Server")]
    pub top: Option<usize>,
}

/// Convert derive-based CLI arguments directly to CliConfig structure
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    let mut cli_config = CliConfig {
        data_dir: cli.data_dir.clone(),
        quiet: cli.quiet,
        verbose: cli.verbose,
        config_file: cli.config.clone(),
        no_config: cli.no_config,
        ..Default::default()
    };

    match &cli.command {
        Commands::Generate(args) => {
            cli_config.transactions = args.transactions;
            cli_config.customer_pool = args.customer_pool;
            cli_config.seed = args.seed;
            cli_config.history_days = args.history_days;
        }
        Commands::Analyze(args) => {
            cli_config.top_products = args.top;
            cli_config.output_format = args.format.clone();
        }
        Commands::Dashboard(args) => {
            cli_config.granularity = args.granularity.clone();
            cli_config.top_products = args.top;
            cli_config.dashboard_path = args.output.clone();
        }
        Commands::Serve(args) => {
            cli_config.bind = args.bind.clone();
            cli_config.granularity = args.granularity.clone();
            cli_config.top_products = args.top;
        }
    }

    cli_config
}
