//! sia-refs - Redmine wiki updater for academic references
//!
//! Searches Semantic Scholar for the SIA topic, renders the top papers as
//! markdown and replaces the content of the project's wiki page.
//!
//! ## Usage
//!
//! ```bash
//! REDMINE_API_KEY=... sia-refs
//! REDMINE_API_KEY=... sia-refs --dry-run --limit 3
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use sia_refs::config::Overrides;
use sia_refs::{pipeline, Config, RunOutcome};
use std::process::ExitCode;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

// ============================================================================
// CLI Definition
// ============================================================================

/// Publish Semantic Scholar results to a Redmine wiki page
#[derive(Parser)]
#[command(name = "sia-refs")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Search and render, print the markdown, do not publish
    #[arg(long)]
    dry_run: bool,

    /// Override the search topic
    #[arg(long)]
    query: Option<String>,

    /// Number of papers to request
    #[arg(long, default_value_t = sia_refs::config::DEFAULT_LIMIT)]
    limit: u32,

    /// Redmine server base URL
    #[arg(long)]
    redmine_url: Option<String>,

    /// Redmine project identifier
    #[arg(long)]
    project: Option<String>,

    /// Wiki page title
    #[arg(long)]
    page: Option<String>,

    /// Verify the Redmine TLS certificate (off by default for the production server)
    #[arg(long)]
    verify_tls: bool,
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging (stderr, so stdout only carries status lines)
    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    if cli.json_logs {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(false)
            .with_writer(std::io::stderr)
            .init();
    }

    let config = build_config(&cli).context("Failed to load configuration")?;
    info!(
        redmine = %config.redmine_url,
        project = %config.project_identifier,
        page = %config.wiki_page_title,
        "Configuration loaded"
    );

    let outcome = pipeline::run(&config, cli.dry_run).await;

    if let RunOutcome::DryRun { document, .. } = &outcome {
        println!("{}", document);
    }

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn build_config(cli: &Cli) -> Result<Config> {
    let overrides = Overrides {
        query: cli.query.clone(),
        limit: Some(cli.limit),
        redmine_url: cli.redmine_url.clone(),
        project: cli.project.clone(),
        page: cli.page.clone(),
        verify_tls: cli.verify_tls,
    };

    let config = Config::from_env()?.with_overrides(&overrides);
    config.validate()?;
    Ok(config)
}
