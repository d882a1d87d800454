//! uik-scrape main entry point
//!
//! Command-line interface for the precinct-level election results harvester.

use anyhow::Context;
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use uik_scrape::config::{default_config, load_config, Config};
use uik_scrape::crawler::crawl;

/// uik-scrape: harvest precinct-level election results
///
/// Crawls the hierarchical region pages of the election-commission site,
/// extracts the results table from every precinct-commission leaf, and
/// writes one `;`-delimited record per precinct.
#[derive(Parser, Debug)]
#[command(name = "uik-scrape")]
#[command(version = "1.0.0")]
#[command(about = "Precinct-level election results harvester", long_about = None)]
struct Cli {
    /// Output file path; records go to stdout when omitted
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Path to a TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the effective configuration without crawling
    #[arg(long)]
    dry_run: bool,
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
            load_config(path).with_context(|| format!("loading {}", path.display()))?
        }
        None => default_config()?,
    };

    if cli.dry_run {
        handle_dry_run(&config, cli.output.as_deref());
        return Ok(());
    }

    // Progress goes to the log; records go to the sink. Partial output is
    // preserved when the crawl aborts, so the sink is not buffered away
    // from the file until completion.
    let sink: Box<dyn Write> = match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating output file {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    match crawl(&config, sink).await {
        Ok(()) => {
            tracing::info!("Crawl completed successfully");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("uik_scrape=info,warn"),
            1 => EnvFilter::new("uik_scrape=debug,info"),
            2 => EnvFilter::new("uik_scrape=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(io::stderr)
        .init();
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config, output: Option<&std::path::Path>) {
    println!("=== uik-scrape Dry Run ===\n");

    println!("Site:");
    println!("  Root URL: {}", config.site.root_url);
    println!("  Region link prefix: {}", config.site.region_link_prefix);
    println!("  Leaf link text: {}", config.site.leaf_link_text);
    println!("  Page encoding: {}", config.site.page_encoding);

    println!("\nFetch:");
    println!("  Timeout: {}s", config.fetch.timeout_secs);
    println!("  Connect timeout: {}s", config.fetch.connect_timeout_secs);
    println!("  User agent: {}", config.fetch.user_agent);

    println!("\nOutput:");
    match output {
        Some(path) => println!("  File: {}", path.display()),
        None => println!("  stdout"),
    }

    println!("\n✓ Configuration is valid");
}
