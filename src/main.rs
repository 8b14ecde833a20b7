mod adapters;
mod config;
mod coordinator;
mod merge;
mod models;
mod output;
mod search;
mod sources;

use std::io::{stderr, stdout, BufWriter};
use std::path::PathBuf;
use std::process::exit;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use tokio::io::{stdin, AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::config::Config;
use crate::coordinator::{FetchCoordinator, FetchState};
use crate::models::Source;
use crate::output::{describe_state, render, write_transactions};
use crate::search::{filter_transactions, FilteredView, SearchInput};

/// Fetches the four bank feeds, merges them newest first and prints them as CSV.
#[derive(Debug, Parser)]
#[command(name = "bank-aggregator", version, about)]
struct Cli {
    /// JSON settings file
    #[arg(long, env = "BANK_AGGREGATOR_CONFIG")]
    config: Option<PathBuf>,

    /// Base URL the feeds are fetched from
    #[arg(long)]
    base_url: Option<String>,

    /// Read the feeds from this directory instead of over HTTP
    #[arg(long)]
    source_dir: Option<PathBuf>,

    /// Only fetch these banks (bko, kibk, rbk, kd); repeatable
    #[arg(long = "source")]
    sources: Vec<Source>,

    /// Only print transactions whose description contains this text
    #[arg(long)]
    search: Option<String>,

    /// Keep running: read search text from stdin, `:r` refreshes, `:q` quits
    #[arg(long, short)]
    interactive: bool,

    /// error, warn, info, debug or trace
    #[arg(long, default_value = "error")]
    log_level: String
}

impl Cli {
    fn build_config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;

        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }

        if let Some(source_dir) = &self.source_dir {
            config.source_dir = Some(source_dir.clone());
        }

        if !self.sources.is_empty() {
            config.select_sources(&self.sources)?;
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(parse_log_level(&cli.log_level));

    let config = cli.build_config()?;
    debug!("Running with {config:?}");

    let (sources, probe) = sources::from_config(&config)?;
    let coordinator = Arc::new(FetchCoordinator::new(sources, probe));

    if cli.interactive {
        run_interactive(coordinator, config.debounce, cli.search).await
    } else {
        run_once(coordinator, cli.search.as_deref().unwrap_or_default()).await
    }
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: Transactions go to stdout, so logging has to stay on stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

async fn run_once(coordinator: Arc<FetchCoordinator>, search: &str) -> Result<()> {
    coordinator.refresh().await;

    let state = coordinator.state();

    match &state {
        FetchState::Success(_) => {
            let visible = filter_transactions(&coordinator.transactions(), search);
            let debits = visible.iter().filter(|transaction| transaction.is_debit()).count();

            info!("Showing {} of {} transactions, {debits} debits", visible.len(), state.count().unwrap_or_default());
            write_transactions(BufWriter::new(stdout().lock()), &visible)
        }
        FetchState::Error(error) => {
            eprintln!("{}", describe_state(&state));
            exit(if error.is_no_connectivity() { 2 } else { 1 });
        }
        FetchState::Loading => bail!("Merge cycle finished without publishing a result")
    }
}

async fn run_interactive(coordinator: Arc<FetchCoordinator>, debounce: Duration, search: Option<String>) -> Result<()> {
    let input = SearchInput::spawn(debounce);

    if let Some(text) = search {
        input.set_input_text(text);
    }

    let view = FilteredView::spawn(coordinator.subscribe_transactions(), input.committed());
    let renderer = tokio::spawn(render(
        view.subscribe(),
        coordinator.subscribe_state(),
        BufWriter::new(stdout()),
        stderr()
    ));

    coordinator.spawn_refresh();
    eprintln!("Type to search, :s shows the search, :r refreshes, :q quits");

    let mut lines = BufReader::new(stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            ":q" | ":quit" => break,
            ":r" | ":refresh" => {
                coordinator.spawn_refresh();
            }
            ":s" | ":search" => {
                eprintln!(
                    "Search {:?} (typed {:?}) shows {} transactions",
                    input.committed_text(),
                    input.input_text(),
                    view.visible().len()
                );
            }
            text => input.set_input_text(text)
        }
    }

    renderer.abort();

    Ok(())
}
