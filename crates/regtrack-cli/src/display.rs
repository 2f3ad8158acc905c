//! Console output for the CLI subcommands.

use std::path::{Path, PathBuf};

use regtrack_core::{HistoryRecord, Regulation};

use crate::amend::{BatchReport, Mode, Outcome};

const CLAUSE_PREVIEW_CHARS: usize = 100;

/// First `max` characters of `text`, with `...` when cut.
fn preview(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn print_regulations(regulations: &[Regulation]) {
    println!("=== Regulations ({}) ===", regulations.len());
    for reg in regulations {
        println!();
        println!("  {:<12} {}", reg.id, reg.title);
        println!("  {:<12} {}", "", preview(reg.clause(), CLAUSE_PREVIEW_CHARS));
        if !reg.keywords.is_empty() {
            println!("  {:<12} {}", "keywords", reg.keywords.join(", "));
        }
        if !reg.remove_keywords.is_empty() {
            println!("  {:<12} {}", "removes", reg.remove_keywords.join(", "));
        }
    }
}

pub fn print_contracts(contracts: &[PathBuf]) {
    println!("=== Contracts ({}) ===", contracts.len());
    for path in contracts {
        println!("  {}", display_name(path));
    }
}

/// One contract's missing clauses, or "Fully compliant".
pub fn print_risk(contract: &str, missing: &[Regulation]) {
    println!("{contract}");
    if missing.is_empty() {
        println!("  Fully compliant");
        return;
    }
    println!("  Missing:");
    for reg in missing {
        println!("  - {}", preview(reg.clause(), CLAUSE_PREVIEW_CHARS));
    }
}

pub fn print_batch_report(report: &BatchReport) {
    match &report.mode {
        Mode::Changes(changes) => {
            let ids: Vec<&str> = changes.iter().map(|r| r.id.as_str()).collect();
            println!("Applied regulation changes: {}", ids.join(", "));
        }
        Mode::RiskGaps => println!("No regulation changes; filled compliance gaps"),
    }
    println!();

    for entry in &report.contracts {
        match &entry.outcome {
            Outcome::Updated { output, actions } => {
                println!("  {:<32} Updated -> {}", entry.contract, display_name(output));
                for action in actions {
                    println!("  {:<32}   - {action}", "");
                }
            }
            Outcome::Unchanged => println!("  {:<32} Unchanged", entry.contract),
            Outcome::Failed(reason) => println!("  {:<32} Failed: {reason}", entry.contract),
        }
    }

    println!();
    println!(
        "{} of {} contracts updated",
        report.updated(),
        report.contracts.len()
    );
}

pub fn print_history(contract: &str, records: &[HistoryRecord]) {
    if records.is_empty() {
        println!("{contract}: no amendments recorded");
        return;
    }
    println!("=== {contract} ({} amendments) ===", records.len());
    for record in records {
        println!();
        println!("  {}  {}", record.timestamp, record.updated_filename);
        for action in &record.actions {
            println!("    - {action}");
        }
    }
}
