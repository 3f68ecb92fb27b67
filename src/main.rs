use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};

use record_pipeline::config::AppConfig;
use record_pipeline::logging::{self, LogOptions};
use record_pipeline::metrics::{init_metrics, render_metrics};
use record_pipeline::pipeline::{presets, BatchOutcome};
use record_pipeline::{loader, ContactRecord};

#[derive(Parser)]
#[command(name = "record_pipeline")]
#[command(about = "Validate and transform batches of records")]
#[command(version)]
struct Cli {
    /// Configuration file (.json or .toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(long, global = true)]
    debug: bool,

    /// Also write JSON logs to this directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Print Prometheus metrics for the run after the results
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load id,name,value rows from a CSV file and validate them
    Load {
        path: PathBuf,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the contact pipeline over a JSON array of contacts
    Process {
        path: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Run the contact pipeline over a built-in sample batch
    Demo {
        #[arg(long)]
        json: bool,
    },
}

fn sample_contacts() -> Vec<ContactRecord> {
    vec![
        ContactRecord::new("1", "John", "JOHN@EXAMPLE.COM", 25),
        ContactRecord::new("2", "Jane", "jane@test.org", 30),
        ContactRecord::new("3", "Bob", "invalid-email", 17),
        ContactRecord::new("4", "Alice", "ALICE@DOMAIN.COM", 150),
    ]
}

fn report<R: Serialize + std::fmt::Debug>(outcome: &BatchOutcome<R>, json: bool) -> Result<()> {
    if json {
        let rendered =
            serde_json::to_string_pretty(outcome).context("Failed to serialize outcome")?;
        println!("{}", rendered);
        return Ok(());
    }

    println!("\n📊 Pipeline Results:");
    println!("   Total records: {}", outcome.total());
    println!("   Accepted: {}", outcome.successes.len());
    println!("   Rejected: {}", outcome.failures.len());

    if !outcome.successes.is_empty() {
        println!("\n✅ Accepted records:");
        for record in &outcome.successes {
            println!("   - {:?}", record);
        }
    }

    if !outcome.failures.is_empty() {
        warn!("{} records rejected", outcome.failures.len());
        println!("\n⚠️  Rejected records:");
        for failure in &outcome.failures {
            println!("   - {}", failure);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config =
        AppConfig::load_or_default(cli.config.as_deref()).context("Failed to load configuration")?;

    let _log_guard = logging::init_logging(&LogOptions {
        debug: cli.debug || config.features.debug_mode,
        log_dir: cli.log_dir.clone(),
    });
    if cli.metrics {
        init_metrics();
    }

    match cli.command {
        Commands::Load { path, json } => {
            info!(path = %path.display(), "Loading data records");
            let pipeline = presets::data_record_pipeline();
            let outcome = loader::process_csv_file(&path, &pipeline)
                .with_context(|| format!("Error processing file {}", path.display()))?;
            report(&outcome, json)?;
        }
        Commands::Process { path, json } => {
            let records = loader::load_contact_records(&path)
                .with_context(|| format!("Error reading contacts from {}", path.display()))?;
            let pipeline = presets::contact_pipeline(&config.pipeline);
            report(&pipeline.process_batch(records), json)?;
        }
        Commands::Demo { json } => {
            let pipeline = presets::contact_pipeline(&config.pipeline);
            report(&pipeline.process_batch(sample_contacts()), json)?;
        }
    }

    if cli.metrics {
        match render_metrics() {
            Some(rendered) => println!("\n📈 Metrics:\n{}", rendered),
            None => warn!("Metrics recorder unavailable, nothing to print"),
        }
    }

    Ok(())
}
