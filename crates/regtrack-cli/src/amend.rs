//! Batch amendment pipeline: regulations → contracts → updated documents,
//! history records, and notifications.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{SecondsFormat, Utc};
use regtrack_ai::EmbeddingProvider;
use regtrack_core::{AmendmentAction, HistoryRecord, Regulation, check_risks, detect_changes};
use regtrack_core::{join_paragraphs, split_paragraphs};
use regtrack_engine::AmendmentEngine;
use regtrack_notify::{Notification, Notifier};
use regtrack_store::{DataDir, HistoryLog, RegulationStore, adapter_for, versioned_name};
use tracing::{info, warn};

/// Which regulations each contract is amended against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// The regulation set changed since the last run; apply the changes to
    /// every contract.
    Changes(Vec<Regulation>),
    /// Nothing changed; fill each contract's own gaps.
    RiskGaps,
}

impl Mode {
    pub fn select(previous: &[Regulation], current: &[Regulation]) -> Self {
        let changes = detect_changes(previous, current);
        if changes.is_empty() {
            Self::RiskGaps
        } else {
            Self::Changes(changes)
        }
    }
}

#[derive(Debug)]
pub enum Outcome {
    Updated {
        output: PathBuf,
        actions: Vec<AmendmentAction>,
    },
    Unchanged,
    Failed(String),
}

pub struct ContractReport {
    pub contract: String,
    pub outcome: Outcome,
}

pub struct BatchReport {
    pub mode: Mode,
    pub contracts: Vec<ContractReport>,
}

impl BatchReport {
    pub fn updated(&self) -> usize {
        self.contracts
            .iter()
            .filter(|c| matches!(c.outcome, Outcome::Updated { .. }))
            .count()
    }
}

/// Amend every contract in the data directory, then save the snapshot.
///
/// Regulation load failures abort the batch. A contract that cannot be read
/// or rendered is reported as failed and the batch moves on.
pub async fn run_batch<P: EmbeddingProvider>(
    data: &DataDir,
    engine: &mut AmendmentEngine<P>,
    notifier: &dyn Notifier,
) -> anyhow::Result<BatchReport> {
    data.ensure().context("creating data directories")?;

    let store = RegulationStore::in_data_dir(data);
    let current = store.load_current().context("loading regulations")?;
    let previous = store.load_snapshot().context("loading regulation snapshot")?;

    let mode = Mode::select(&previous, &current);
    match &mode {
        Mode::Changes(changes) => info!(changed = changes.len(), "applying regulation changes"),
        Mode::RiskGaps => info!("no regulation changes, filling risk gaps"),
    }

    let history = HistoryLog::new(data.history());
    let contracts = data.list_contracts().context("listing contracts")?;

    let mut reports = Vec::with_capacity(contracts.len());
    for path in &contracts {
        let contract = file_name(path);
        let outcome = match amend_contract(path, &mode, &current, data, &history, engine, notifier).await
        {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(contract = %contract, error = %format!("{err:#}"), "contract skipped");
                Outcome::Failed(format!("{err:#}"))
            }
        };
        reports.push(ContractReport { contract, outcome });
    }

    store
        .save_snapshot(&current)
        .context("saving regulation snapshot")?;

    Ok(BatchReport {
        mode,
        contracts: reports,
    })
}

async fn amend_contract<P: EmbeddingProvider>(
    path: &Path,
    mode: &Mode,
    current: &[Regulation],
    data: &DataDir,
    history: &HistoryLog,
    engine: &mut AmendmentEngine<P>,
    notifier: &dyn Notifier,
) -> anyhow::Result<Outcome> {
    let contract = file_name(path);
    let adapter = adapter_for(path)?;
    let text = adapter.extract_text(path)?;

    let gaps;
    let regulations = match mode {
        Mode::Changes(changes) => changes.as_slice(),
        Mode::RiskGaps => {
            gaps = check_risks(&text, current);
            gaps.as_slice()
        }
    };

    let amendment = engine.apply_amendment(split_paragraphs(&text), regulations);
    let Some(paragraphs) = amendment.paragraphs else {
        return Ok(Outcome::Unchanged);
    };
    let actions = amendment.actions;

    let now = Utc::now();
    let output_name = versioned_name(&contract, now.timestamp().max(0) as u64);
    let output = data.updated_contracts().join(&output_name);
    adapter
        .render(&join_paragraphs(&paragraphs), &output)
        .with_context(|| format!("writing {}", output.display()))?;
    info!(contract = %contract, output = %output_name, "wrote amended contract");

    // The output document stays even if the history record cannot be written.
    let record = HistoryRecord::new(
        now.to_rfc3339_opts(SecondsFormat::Secs, true),
        contract.as_str(),
        output_name.as_str(),
        &actions,
    );
    if let Err(err) = history.append(&record) {
        warn!(contract = %contract, error = %err, "history record not written");
    }

    let notification =
        Notification::contract_updated(&output_name, &actions, Some(output.clone()));
    if let Err(err) = notifier.notify(&notification).await {
        warn!(contract = %contract, error = %err, "notification failed");
    }

    Ok(Outcome::Updated { output, actions })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
