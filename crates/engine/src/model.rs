use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A single incoming bank credit, as imported from the bank feed.
///
/// Immutable from the engine's perspective. `reference` and `payee_name`
/// are payer-supplied free text and may be absent or blank.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: String,
    /// Minor currency units (cents). Non-negative for credits.
    pub amount_cents: i64,
    pub reference: Option<String>,
    pub payee_name: Option<String>,
    pub date: NaiveDate,
}

/// An open (unpaid or partially paid) invoice eligible for matching.
///
/// Callers must not supply fully-settled invoices; `outstanding_cents <= 0`
/// is tolerated (scores 0 on the amount dimension) but never expected.
#[derive(Debug, Clone)]
pub struct InvoiceCandidate {
    pub id: String,
    pub invoice_number: String,
    /// Minor currency units still owed on this invoice.
    pub outstanding_cents: i64,
    pub payer_name: Option<String>,
    /// Reference the payer is expected to quote (falls back to the
    /// invoice number when the source data has no separate hint).
    pub reference_hint: Option<String>,
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// The three independent sub-scores behind a confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubScores {
    /// Reference match, 0–40.
    pub reference: u32,
    /// Amount match, 0–40.
    pub amount: u32,
    /// Payee-name similarity, 0–20.
    pub name: u32,
}

impl SubScores {
    pub fn total(&self) -> u32 {
        self.reference + self.amount + self.name
    }
}

/// One candidate invoice scored against one transaction.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredCandidate {
    pub candidate_id: String,
    pub invoice_number: String,
    /// Sum of the sub-scores, 0–100.
    pub score: u32,
    pub subscores: SubScores,
    /// Human-readable contributions, fixed reference→amount→name order.
    pub reasons: Vec<String>,
}

// ---------------------------------------------------------------------------
// Decision
// ---------------------------------------------------------------------------

/// Terminal outcome of a single match decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchAction {
    AutoApply,
    ReviewAmbiguous,
    ReviewLowConfidence,
    NoMatch,
}

impl std::fmt::Display for MatchAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AutoApply => write!(f, "auto_apply"),
            Self::ReviewAmbiguous => write!(f, "review_ambiguous"),
            Self::ReviewLowConfidence => write!(f, "review_low_confidence"),
            Self::NoMatch => write!(f, "no_match"),
        }
    }
}

/// A non-primary candidate that cleared the visibility threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternativeMatch {
    pub candidate_id: String,
    pub score: u32,
}

/// The sole externally consumed output of the engine: one decision per
/// transaction. Serializes losslessly so audit-log round-trips preserve the
/// action, primary id, confidence, and alternative ordering exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchDecision {
    pub action: MatchAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_candidate_id: Option<String>,
    pub confidence: u32,
    pub alternatives: Vec<AlternativeMatch>,
    pub reasoning: String,
}

// ---------------------------------------------------------------------------
// Batch output
// ---------------------------------------------------------------------------

/// Decision for one transaction within a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionOutcome {
    pub transaction_id: String,
    pub decision: MatchDecision,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchSummary {
    pub total_transactions: usize,
    pub auto_applied: usize,
    pub ambiguous: usize,
    pub low_confidence: usize,
    pub unmatched: usize,
    pub action_counts: HashMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
}

/// Full result of a batch run: meta, summary, per-transaction outcomes.
#[derive(Debug, Clone, Serialize)]
pub struct MatchRun {
    pub meta: RunMeta,
    pub summary: MatchSummary,
    pub outcomes: Vec<TransactionOutcome>,
}
