//! Sumi-Capture main entry point
//!
//! This is the command-line interface for the Sumi-Capture archiving crawler.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use sumi_capture::config::{load_config_with_hash, Config};
use sumi_capture::crawler::run_crawl;
use tracing_subscriber::EnvFilter;

/// Sumi-Capture: an archiving web crawler
///
/// Sumi-Capture fetches seed pages, archives every HTTP exchange including
/// redirects, captures page assets and follows outlinks up to a hop limit.
#[derive(Parser, Debug)]
#[command(name = "sumi-capture")]
#[command(version = "1.0.0")]
#[command(about = "An archiving web crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    tracing::info!(
        "Seeds: {}, max hops: {}, workers: {}",
        config.seeds.len(),
        config.crawler.max_hops,
        config.crawler.workers
    );

    let summary = run_crawl(&config).await.context("Crawl failed")?;

    tracing::info!(
        "Crawl finished: {} pages, {} failures, {} exchanges archived{}",
        summary.pages_processed,
        summary.fetch_failures,
        summary.archived,
        if summary.time_limit_reached {
            " (time limit reached)"
        } else {
            ""
        }
    );

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_capture=info,warn"),
            1 => EnvFilter::new("sumi_capture=debug,info"),
            2 => EnvFilter::new("sumi_capture=trace,debug"),
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

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Sumi-Capture Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max hops: {}", config.crawler.max_hops);
    println!("  Max redirects: {}", config.crawler.max_redirect);
    println!("  Max retries: {}", config.crawler.max_retry);
    println!("  HTTP timeout: {}s", config.crawler.http_timeout);
    println!("  Workers: {}", config.crawler.workers);
    println!("  Seencheck: {}", config.crawler.seencheck);
    println!(
        "  Assets capture: {}",
        if config.crawler.disable_assets_capture {
            "disabled"
        } else {
            "enabled"
        }
    );
    if !config.crawler.disabled_html_tags.is_empty() {
        println!(
            "  Disabled HTML tags: {}",
            config.crawler.disabled_html_tags.join(", ")
        );
    }

    println!("\nUser Agent: {}", config.user_agent.header_value());

    println!("\nArchive:");
    if config.archive.enabled {
        println!("  Temp dir: {}", config.archive.temp_dir);
        println!("  Output dir: {}", config.archive.output_dir);
    } else {
        println!("  disabled");
    }

    if let Some(proxy) = &config.proxy {
        println!("\nProxy: {} ({} bypass entries)", proxy.url, proxy.bypass.len());
    }

    println!("\nSeeds ({}):", config.seeds.len());
    for seed in &config.seeds {
        println!("  - {}", seed);
    }

    println!("\n✓ Configuration is valid");
}
