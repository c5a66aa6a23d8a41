use chrono::{Local, Utc};
use clap::Parser;
use salesboard::analysis::Dataset;
use salesboard::config::{CliConfig, Config};
use salesboard::core::Result;
use salesboard::generation::{Generator, GeneratorSettings, derive_customers};
use salesboard::reporting::logging;
use salesboard::reporting::{DashboardData, DashboardSummary, HtmlDashboard};
use salesboard::server::{self, AppState};
use salesboard::storage::{self, DataPaths};
use salesboard::ui::ProgressReporter;
use salesboard::ui::cli::{AnalyzeArgs, DashboardArgs, GenerateArgs};
use salesboard::ui::output;
use salesboard::ui::{Cli, Commands, cli_to_config};

use std::time::Instant;

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are not failures
            let _ = e.print();
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    if let Err(e) = run_salesboard_logic(&cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Dispatch the parsed command, extracted from main() for testing
pub async fn run_salesboard_logic(cli: &Cli) -> Result<()> {
    let cli_config = cli_to_config(cli);
    let config = load_and_merge_config(&cli_config)?;

    logging::init_logger(config.verbose.unwrap_or(false), cli_config.quiet);
    logging::log_config_info(&config);

    match &cli.command {
        Commands::Generate(args) => run_generate_logic(args, &config, cli_config.quiet),
        Commands::Analyze(args) => run_analyze_logic(args, &config, cli_config.quiet),
        Commands::Dashboard(args) => run_dashboard_logic(args, &config, cli_config.quiet),
        Commands::Serve(_) => run_serve_logic(&config, cli_config.quiet).await,
    }
}

/// Load configuration from file or standard locations and merge with CLI config
pub fn load_and_merge_config(cli_config: &CliConfig) -> Result<Config> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file).inspect_err(|e| {
            logging::log_error(
                &format!("Could not load config file '{config_file}'"),
                Some(e),
            );
        })?
    } else {
        Config::load_from_standard_locations()
    };

    // CLI takes precedence
    config.merge_with_cli(cli_config);
    config.validate()?;
    Ok(config)
}

pub fn run_generate_logic(args: &GenerateArgs, config: &Config, quiet: bool) -> Result<()> {
    let end_date = args.end_date.unwrap_or_else(|| Local::now().date_naive());
    let settings = GeneratorSettings::from_config(config, end_date);
    logging::log_generation_start(settings.transactions, settings.customer_pool, settings.seed);

    let started = Instant::now();
    let mut generator = Generator::new(settings)?;

    let mut progress = ProgressReporter::new(!quiet);
    progress.start_generation(generator.settings().transactions);
    let transactions = generator.generate_with_progress(|rows| progress.update_generation(rows));
    progress.finish_generation();

    let customers = derive_customers(&transactions);
    logging::log_generation_complete(
        transactions.len(),
        customers.len(),
        started.elapsed().as_millis(),
    );

    let paths = config.data_paths();
    storage::write_transactions(&paths.transactions, &transactions)?;
    logging::log_file_written(&paths.transactions, transactions.len());
    storage::write_customers(&paths.customers, &customers)?;
    logging::log_file_written(&paths.customers, customers.len());

    if !quiet {
        output::display_generation_summary(&transactions, &customers, &paths);
    }
    Ok(())
}

pub fn run_analyze_logic(args: &AnalyzeArgs, config: &Config, quiet: bool) -> Result<()> {
    let filter = args.filters.to_filter()?;
    let dataset = load_dataset(&config.data_paths(), quiet)?;

    let summary = DashboardSummary::build(
        &dataset,
        &filter,
        config.granularity()?,
        config.top_products(),
    );
    output::display_analysis(&summary, config.output_format())
}

pub fn run_dashboard_logic(args: &DashboardArgs, config: &Config, quiet: bool) -> Result<()> {
    let filter = args.filters.to_filter()?;
    let paths = config.data_paths();
    let dataset = load_dataset(&paths, quiet)?;

    let data = DashboardData {
        summary: DashboardSummary::build(
            &dataset,
            &filter,
            config.granularity()?,
            config.top_products(),
        ),
        options: None,
        data_source: paths.transactions.display().to_string(),
        timestamp: Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    };

    let dashboard_path = config.dashboard_path();
    HtmlDashboard::generate_dashboard(&data, &dashboard_path)?;

    if !quiet {
        output::display_dashboard_written(&dashboard_path, &data.summary);
    }
    Ok(())
}

pub async fn run_serve_logic(config: &Config, quiet: bool) -> Result<()> {
    let addr = config.bind_addr()?;
    let paths = config.data_paths();
    let dataset = load_dataset(&paths, quiet)?;
    let transactions = dataset.transactions.len();

    let state = AppState::new(dataset, paths.transactions.display().to_string())
        .with_defaults(config.granularity()?, config.top_products());

    let listener = server::bind(addr).await?;
    if !quiet {
        output::display_server_start(listener.local_addr().unwrap_or(addr), transactions);
    }
    server::serve(listener, state).await
}

/// Read both data files behind a spinner
fn load_dataset(paths: &DataPaths, quiet: bool) -> Result<Dataset> {
    let spinner = ProgressReporter::new(!quiet).create_spinner("Loading dataset...");
    let result = Dataset::load(paths);
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let dataset = result?;
    logging::log_dataset_loaded(
        &paths.transactions,
        dataset.transactions.len(),
        dataset.customers.len(),
    );
    if dataset.transactions.is_empty() {
        logging::log_warning(&format!(
            "{} has no transactions",
            paths.transactions.display()
        ));
    }
    Ok(dataset)
}
