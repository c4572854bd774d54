//! Ranking and the four-way decision classification.
//!
//! Stateless per call; the classification forms a decision tree with four
//! terminal states. Candidate order is a total order (score descending,
//! candidate id ascending on ties) so repeated runs are bit-identical.

use crate::config::Thresholds;
use crate::model::{AlternativeMatch, MatchAction, MatchDecision, ScoredCandidate, Transaction};

/// Classify scored candidates into exactly one `MatchDecision`.
///
/// Never fails for well-formed input: no eligible candidate is the
/// `NoMatch` state and a tie at the top is the `ReviewAmbiguous` state,
/// neither is an error.
pub fn decide(
    _txn: &Transaction,
    scored: &[ScoredCandidate],
    thresholds: &Thresholds,
) -> MatchDecision {
    // Candidates below the visibility threshold are discarded entirely —
    // they never appear even as alternatives.
    let mut visible: Vec<&ScoredCandidate> = scored
        .iter()
        .filter(|c| c.score >= thresholds.visibility)
        .collect();

    visible.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.candidate_id.cmp(&b.candidate_id))
    });

    if visible.is_empty() {
        return MatchDecision {
            action: MatchAction::NoMatch,
            primary_candidate_id: None,
            confidence: 0,
            alternatives: Vec::new(),
            reasoning: "no candidate invoice scored above the minimum visibility threshold".into(),
        };
    }

    let high_confidence = visible
        .iter()
        .filter(|c| c.score >= thresholds.auto_apply)
        .count();

    // `visible` is sorted, so the primary is always the front element: the
    // sole high-confidence candidate for AutoApply, the best overall for
    // both review states.
    let primary = visible[0];
    let alternatives: Vec<AlternativeMatch> = visible[1..]
        .iter()
        .map(|c| AlternativeMatch {
            candidate_id: c.candidate_id.clone(),
            score: c.score,
        })
        .collect();

    let (action, reasoning) = if high_confidence == 1 {
        (MatchAction::AutoApply, primary.reasons.join("; "))
    } else if high_confidence > 1 {
        (
            MatchAction::ReviewAmbiguous,
            format!(
                "ambiguous: {high_confidence} candidates scored at or above {}%",
                thresholds.auto_apply
            ),
        )
    } else {
        (
            MatchAction::ReviewLowConfidence,
            format!(
                "best match scored {}%, below auto-apply threshold of {}%",
                primary.score, thresholds.auto_apply
            ),
        )
    };

    MatchDecision {
        action,
        primary_candidate_id: Some(primary.candidate_id.clone()),
        confidence: primary.score,
        alternatives,
        reasoning,
    }
}
