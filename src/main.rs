//! fi-alerts main entry point
//!
//! Command-line interface for the investor-alert register scraper.

use clap::Parser;
use fi_alerts::config::{load_config_with_hash, Config};
use fi_alerts::crawler::run_crawl;
use fi_alerts::dataset::Dataset;
use fi_alerts::output::XlsxSink;
use fi_alerts::vpn::{connect_advisory, disconnect_if_connected, ExpressVpnCli};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// fi-alerts: investor-alert register scraper
///
/// Pages through the Swedish FSA's public investor-alert search endpoint,
/// extracts one record per alert, and exports the cleaned, deduplicated
/// table to an Excel workbook.
#[derive(Parser, Debug)]
#[command(name = "fi-alerts")]
#[command(version = "1.0.0")]
#[command(about = "Scrapes the investor-alert register to a workbook", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show the crawl plan without fetching
    #[arg(long)]
    dry_run: bool,

    /// Skip the VPN collaborator even if the config enables it
    #[arg(long)]
    no_vpn: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using built-in defaults");
            Config::default()
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    run(config, cli.no_vpn).await;
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("fi_alerts=info,warn"),
            1 => EnvFilter::new("fi_alerts=debug,info"),
            2 => EnvFilter::new("fi_alerts=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows the crawl plan
fn handle_dry_run(config: &Config) {
    println!("=== fi-alerts Dry Run ===\n");

    println!("Search:");
    println!("  Endpoint: {}", config.search.endpoint);
    println!("  Listings page: {}", config.search.listings_page);
    println!(
        "  Query: q={} take={} lang={}",
        config.search.query, config.search.take, config.search.lang
    );
    if config.search.max_pages > 0 {
        println!("  Max pages: {}", config.search.max_pages);
    } else {
        println!("  Max pages: unbounded (server-terminated)");
    }

    println!("\nHTTP:");
    println!("  Browser profiles: {}", config.http.user_agents.len());
    println!("  Session cookie: {}", config.http.session_cookie);

    println!("\nVPN:");
    if config.vpn.enabled {
        println!("  Enabled, region: {}", config.vpn.region);
    } else {
        println!("  Disabled");
    }

    println!("\nOutput:");
    println!("  Workbook: {}", config.output.workbook_path);

    println!("\n✓ Configuration is valid");
    println!("✓ Would start crawling at page token 0");
}

/// Runs the full pipeline: VPN up, crawl, finalize, VPN down.
///
/// Crawl and export failures are logged, not returned: whatever was
/// accumulated before a failure still reaches the finalizer, and the
/// process exits cleanly either way.
async fn run(config: Config, no_vpn: bool) {
    let started = std::time::Instant::now();
    tracing::info!(
        "Run started at {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );

    let vpn = (config.vpn.enabled && !no_vpn).then(ExpressVpnCli::new);
    if let Some(vpn) = &vpn {
        connect_advisory(vpn, &config.vpn.region);
    }

    let workbook_path = PathBuf::from(&config.output.workbook_path);
    let (records, crawl_error) = run_crawl(config).await;

    if let Some(e) = crawl_error {
        tracing::error!(
            "Crawl aborted: {}; finalizing the {} records collected so far",
            e,
            records.len()
        );
    }

    let mut dataset = Dataset::new(records);
    if dataset.finalize(&XlsxSink, &workbook_path) {
        tracing::info!("Workbook written to {}", workbook_path.display());
    } else {
        tracing::info!("Run produced no workbook");
    }

    if let Some(vpn) = &vpn {
        disconnect_if_connected(vpn);
    }

    tracing::info!("Scraping done in {:.2} seconds", started.elapsed().as_secs_f64());
}
