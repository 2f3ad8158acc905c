//! Selecting which regulations are actionable for a contract.
//!
//! Two sources: [`detect_changes`] diffs the current regulation set against
//! the last-applied snapshot; [`check_risks`] finds regulations whose clause a
//! contract does not yet carry.

use std::collections::HashMap;

use tracing::debug;

use crate::Regulation;

/// Regulations in `current` whose trimmed clause differs from the snapshot.
///
/// A regulation absent from `previous` compares against the empty string, so
/// new regulations are always reported. If `previous` holds duplicate ids the
/// later record wins. Output preserves the order of `current`.
pub fn detect_changes(previous: &[Regulation], current: &[Regulation]) -> Vec<Regulation> {
    let mut by_id: HashMap<&str, &Regulation> = HashMap::with_capacity(previous.len());
    for reg in previous {
        if by_id.insert(reg.id.as_str(), reg).is_some() {
            debug!(id = %reg.id, "duplicate id in snapshot, keeping the later record");
        }
    }

    current
        .iter()
        .filter(|reg| {
            let old = by_id
                .get(reg.id.as_str())
                .map(|prev| prev.required_clause.trim())
                .unwrap_or("");
            old != reg.required_clause.trim()
        })
        .cloned()
        .collect()
}

/// Regulations whose clause does not appear (case-insensitively) in `contract_text`.
pub fn check_risks(contract_text: &str, regulations: &[Regulation]) -> Vec<Regulation> {
    let haystack = contract_text.to_lowercase();
    regulations
        .iter()
        .filter(|reg| !haystack.contains(&reg.required_clause.to_lowercase()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reg(id: &str, clause: &str) -> Regulation {
        Regulation {
            id: id.into(),
            title: id.to_uppercase(),
            required_clause: clause.into(),
            keywords: vec![],
            remove_keywords: vec![],
        }
    }

    fn ids(regs: &[Regulation]) -> Vec<&str> {
        regs.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn unchanged_clause_is_not_reported() {
        let prev = vec![reg("a", "Clause A.")];
        let curr = vec![reg("a", "Clause A.")];
        assert!(detect_changes(&prev, &curr).is_empty());
    }

    #[test]
    fn whitespace_only_difference_is_not_a_change() {
        let prev = vec![reg("a", "Clause A.")];
        let curr = vec![reg("a", "  Clause A.\n")];
        assert!(detect_changes(&prev, &curr).is_empty());
    }

    #[test]
    fn new_regulation_is_always_reported() {
        let prev = vec![reg("a", "Clause A.")];
        let curr = vec![reg("a", "Clause A."), reg("b", "Clause B.")];
        assert_eq!(ids(&detect_changes(&prev, &curr)), vec!["b"]);
    }

    #[test]
    fn first_run_reports_everything() {
        let curr = vec![reg("a", "Clause A."), reg("b", "Clause B.")];
        assert_eq!(ids(&detect_changes(&[], &curr)), vec!["a", "b"]);
    }

    #[test]
    fn changed_clause_reported_in_current_order() {
        let prev = vec![reg("b", "Old B."), reg("a", "Old A."), reg("c", "C.")];
        let curr = vec![reg("a", "New A."), reg("b", "New B."), reg("c", "C.")];
        assert_eq!(ids(&detect_changes(&prev, &curr)), vec!["a", "b"]);
    }

    #[test]
    fn duplicate_snapshot_ids_last_wins() {
        let prev = vec![reg("a", "First."), reg("a", "Second.")];
        assert!(detect_changes(&prev, &[reg("a", "Second.")]).is_empty());
        assert_eq!(detect_changes(&prev, &[reg("a", "First.")]).len(), 1);
    }

    #[test]
    fn empty_new_clause_against_missing_snapshot_is_unchanged() {
        assert!(detect_changes(&[], &[reg("a", "   ")]).is_empty());
    }

    #[test]
    fn risk_check_is_case_insensitive() {
        let regs = vec![reg("hi", "health insurance")];
        assert!(check_risks("The Employer provides Health Insurance.", &regs).is_empty());
    }

    #[test]
    fn risk_check_reports_missing_clause() {
        let regs = vec![reg("hi", "health insurance")];
        assert_eq!(ids(&check_risks("No benefits mentioned.", &regs)), vec!["hi"]);
    }

    #[test]
    fn risk_check_keeps_input_order() {
        let regs = vec![reg("z", "zeta"), reg("a", "alpha"), reg("m", "mu")];
        assert_eq!(ids(&check_risks("alpha only", &regs)), vec!["z", "m"]);
    }
}
