mod config;
mod model;
mod scraper;
mod parser;
mod normalizer;
mod presenter;

use crate::config::{load_config_or_default, AppConfig};
use crate::model::{AppError, DrawListing};
use crate::normalizer::normalize_all;
use crate::parser::{MiniLotoParser, Parser};
use crate::scraper::{Scraper, ScraperImpl};
use chrono::Utc;
use std::io::Write;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const CONFIG_ENV: &str = "MINILOTO_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config.json";

fn main() -> ExitCode {
    // Logs go to stderr so stdout only carries the table
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("😱 Panic occurred: {:?}", panic_info);
    }));

    ExitCode::from(exit_status(run(), &mut std::io::stderr()))
}

/// 0 on success; otherwise reports the error on `err_out` and returns 1.
fn exit_status(result: Result<(), AppError>, err_out: &mut impl Write) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            error!("{}", e);
            let _ = writeln!(err_out, "error: {}", e);
            1
        }
    }
}

fn run() -> Result<(), AppError> {
    let config_path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = load_config_or_default(&config_path)?;
    info!("Using config from {} (defaults if absent)", config_path);

    let listing = scrape(&config)?;

    let output = presenter::render(&listing, &config)?;
    println!("{}", output);
    Ok(())
}

/// Fetch, extract and normalize the draws listed at the configured URL.
fn scrape(config: &AppConfig) -> Result<DrawListing, AppError> {
    let scraper = ScraperImpl::new(config)?;
    let parser = MiniLotoParser::new(config.extract.clone())?;

    info!("Fetching {}...", config.url);
    let html = scraper.fetch(&config.url)?;
    let fetched_at = Utc::now();

    info!("Parsing HTML...");
    let rows = parser.parse(&html)?;
    info!("Extracted {} rows", rows.len());

    let (rows, draws) = normalize_all(rows, config.extract.on_malformed)?;
    info!("Normalized {} draws", draws.len());

    Ok(DrawListing {
        source: config.url.clone(),
        fetched_at,
        draws,
        rows,
    })
}
