//! Hashes the emails of a CSV file and keeps a subset of its columns.
//!
//! ```text
//! hash-emails attendees.csv attendees_hashed.csv --email-column=email --keep-columns="start date,end date"
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use csv_email_hash::{
    config::HashJobConfig, core::step::SKIP_LOG_TARGET, hash_job::run_hash_job,
};
use env_logger::Env;
use log::LevelFilter;

#[derive(Parser)]
#[command(
    name = "hash-emails",
    version,
    about = "Hash emails in a CSV file using SHA-256"
)]
struct Cli {
    /// Path to input CSV file
    input_csv: String,

    /// Path to output CSV file
    output_csv: String,

    /// Name of the column containing email addresses
    #[arg(long)]
    email_column: String,

    /// Comma-separated list of columns to keep (the email column is always written last)
    #[arg(long)]
    keep_columns: String,
}

/// Logs at `info` unless `RUST_LOG` says otherwise. Skipped rows are always
/// reported unless `RUST_LOG` names their target explicitly.
fn init_logger() {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .filter_module(SKIP_LOG_TARGET, LevelFilter::Warn)
        .parse_env(Env::default())
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logger();

    let config = HashJobConfig::new(
        &cli.input_csv,
        &cli.output_csv,
        &cli.email_column,
        &cli.keep_columns,
    )
    .context("invalid arguments")?;

    run_hash_job(&config).with_context(|| {
        format!(
            "failed to hash emails from {} into {}",
            cli.input_csv, cli.output_csv
        )
    })?;

    Ok(())
}
