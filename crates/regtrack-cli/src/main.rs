mod amend;
mod config;
mod display;

use anyhow::Context;
use clap::{Parser, Subcommand};
use regtrack_core::check_risks;
use regtrack_engine::AmendmentEngine;
use regtrack_store::{HistoryLog, RegulationStore, adapter_for};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[derive(Parser)]
#[command(
    name = "regtrack",
    version,
    about = "Keep contracts in step with changing regulations"
)]
struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the current regulation set
    Regulations,
    /// List contracts in the data directory
    Contracts,
    /// Show which required clauses each contract is missing
    Risk,
    /// Amend every contract and write updated versions
    Apply,
    /// Show the amendment history of one contract
    History {
        /// Contract file name, e.g. employment.pdf
        contract: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("regtrack v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let data = cli.config.data();

    match cli.command {
        Command::Regulations => {
            let regulations = RegulationStore::in_data_dir(&data).load_current()?;
            display::print_regulations(&regulations);
        }
        Command::Contracts => {
            data.ensure().context("creating data directories")?;
            display::print_contracts(&data.list_contracts()?);
        }
        Command::Risk => {
            let regulations = RegulationStore::in_data_dir(&data).load_current()?;
            data.ensure().context("creating data directories")?;
            for path in data.list_contracts()? {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let text = match adapter_for(&path).and_then(|a| a.extract_text(&path)) {
                    Ok(text) => text,
                    Err(err) => {
                        tracing::warn!(contract = %name, error = %err, "cannot read contract");
                        println!("{name}\n  Unreadable: {err}");
                        continue;
                    }
                };
                display::print_risk(&name, &check_risks(&text, &regulations));
            }
        }
        Command::Apply => {
            let mut engine = AmendmentEngine::new(cli.config.embedding_provider());
            let notifier = cli.config.notifier();
            let report = amend::run_batch(&data, &mut engine, notifier.as_ref()).await?;
            display::print_batch_report(&report);
        }
        Command::History { contract } => {
            let records = HistoryLog::new(data.history())
                .read(&contract)
                .with_context(|| format!("reading history for {contract}"))?;
            display::print_history(&contract, &records);
        }
    }

    Ok(())
}
