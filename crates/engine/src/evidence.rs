use std::collections::HashMap;

use crate::model::{MatchAction, MatchSummary, TransactionOutcome};

/// Compute summary statistics from a batch of decisions.
pub fn compute_summary(outcomes: &[TransactionOutcome]) -> MatchSummary {
    let mut action_counts: HashMap<String, usize> = HashMap::new();
    let mut auto_applied = 0;
    let mut ambiguous = 0;
    let mut low_confidence = 0;
    let mut unmatched = 0;

    for o in outcomes {
        *action_counts
            .entry(o.decision.action.to_string())
            .or_insert(0) += 1;

        match o.decision.action {
            MatchAction::AutoApply => auto_applied += 1,
            MatchAction::ReviewAmbiguous => ambiguous += 1,
            MatchAction::ReviewLowConfidence => low_confidence += 1,
            MatchAction::NoMatch => unmatched += 1,
        }
    }

    MatchSummary {
        total_transactions: outcomes.len(),
        auto_applied,
        ambiguous,
        low_confidence,
        unmatched,
        action_counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MatchDecision;

    fn outcome(action: MatchAction) -> TransactionOutcome {
        TransactionOutcome {
            transaction_id: "txn_1".into(),
            decision: MatchDecision {
                action,
                primary_candidate_id: None,
                confidence: 0,
                alternatives: Vec::new(),
                reasoning: String::new(),
            },
        }
    }

    #[test]
    fn summary_counts() {
        let outcomes = vec![
            outcome(MatchAction::AutoApply),
            outcome(MatchAction::AutoApply),
            outcome(MatchAction::ReviewAmbiguous),
            outcome(MatchAction::ReviewLowConfidence),
            outcome(MatchAction::NoMatch),
        ];
        let summary = compute_summary(&outcomes);
        assert_eq!(summary.total_transactions, 5);
        assert_eq!(summary.auto_applied, 2);
        assert_eq!(summary.ambiguous, 1);
        assert_eq!(summary.low_confidence, 1);
        assert_eq!(summary.unmatched, 1);
        assert_eq!(summary.action_counts["auto_apply"], 2);
        assert_eq!(summary.action_counts["no_match"], 1);
    }

    #[test]
    fn summary_empty() {
        let summary = compute_summary(&[]);
        assert_eq!(summary.total_transactions, 0);
        assert!(summary.action_counts.is_empty());
    }
}
