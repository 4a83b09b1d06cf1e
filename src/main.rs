use anyhow::{Context, Result};
use clap::Parser;
use crash_analytics::config::Config;
use crash_analytics::data::{CrashTables, Data};
use crash_analytics::report::Report;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    let config = Config::parse();

    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    config.apply_threads();
    info!(
        input = %config.input.display(),
        threads = polars_core::POOL.current_num_threads(),
        "startup"
    );

    let start = Instant::now();
    let tables = CrashTables::load(&config)
        .with_context(|| format!("loading tables from {}", config.input.display()))?;
    let data = Data::new(&tables).context("extracting join columns")?;

    let report = Report::run(&tables, &data, &config.selected()).context("running queries")?;
    println!("{report}");

    info!(elapsed = ?start.elapsed(), "finished");
    Ok(())
}
