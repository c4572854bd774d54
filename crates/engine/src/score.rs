//! Confidence scoring for one (transaction, candidate) pair.
//!
//! Pure and total: no IO, deterministic, and never panics — degenerate
//! input (blank strings, zero outstanding) scores 0 on that dimension so a
//! single bad record can never block a batch.

use crate::model::{InvoiceCandidate, ScoredCandidate, SubScores, Transaction};
use crate::text::{normalize_name, normalize_reference, similarity_ratio};

const SUFFIX_LEN: usize = 6;

/// Score one candidate against one transaction.
///
/// `score = reference (0–40) + amount (0–40) + name (0–20)`, with reasons
/// accumulated in that fixed order.
pub fn score(txn: &Transaction, candidate: &InvoiceCandidate) -> ScoredCandidate {
    let mut reasons = Vec::new();

    let reference = reference_score(
        txn.reference.as_deref().unwrap_or(""),
        candidate.reference_hint.as_deref().unwrap_or(""),
        &mut reasons,
    );
    let amount = amount_score(txn.amount_cents, candidate.outstanding_cents, &mut reasons);
    let name = name_score(
        txn.payee_name.as_deref().unwrap_or(""),
        candidate.payer_name.as_deref().unwrap_or(""),
        &mut reasons,
    );

    let subscores = SubScores {
        reference,
        amount,
        name,
    };

    ScoredCandidate {
        candidate_id: candidate.id.clone(),
        invoice_number: candidate.invoice_number.clone(),
        score: subscores.total(),
        subscores,
        reasons,
    }
}

/// Reference match, 0–40 points.
fn reference_score(txn_ref: &str, hint: &str, reasons: &mut Vec<String>) -> u32 {
    let txn_ref = normalize_reference(txn_ref);
    let hint = normalize_reference(hint);

    if txn_ref.is_empty() || hint.is_empty() {
        return 0;
    }

    if txn_ref == hint {
        reasons.push("exact reference match".into());
        return 40;
    }

    if txn_ref.contains(&hint) || hint.contains(&txn_ref) {
        reasons.push("reference contains invoice number".into());
        return 30;
    }

    // Banks often truncate references; compare the trailing characters.
    if char_suffix(&txn_ref, SUFFIX_LEN) == char_suffix(&hint, SUFFIX_LEN) {
        reasons.push("reference suffix match".into());
        return 15;
    }

    0
}

/// Amount match, 0–40 points. Bracket edges are evaluated with integer
/// cross-multiplication so no float rounding can flip a bracket.
fn amount_score(amount_cents: i64, outstanding_cents: i64, reasons: &mut Vec<String>) -> u32 {
    // Caller invariant says outstanding > 0; a settled or malformed invoice
    // simply scores 0 here rather than dividing by zero.
    if outstanding_cents <= 0 {
        return 0;
    }

    // Widen before multiplying: amounts are caller-controlled i64 cents and
    // the engine must stay total even on absurd values.
    let diff = (amount_cents as i128 - outstanding_cents as i128).abs();
    let outstanding = outstanding_cents as i128;

    if diff == 0 {
        reasons.push("exact amount match".into());
        return 40;
    }
    if diff * 100 <= outstanding {
        reasons.push("amount within 1%".into());
        return 35;
    }
    if diff * 20 <= outstanding {
        reasons.push("amount within 5%".into());
        return 25;
    }
    if diff * 10 <= outstanding {
        reasons.push("amount within 10%".into());
        return 15;
    }

    0
}

/// Payee-name similarity, 0–20 points.
fn name_score(payee: &str, payer: &str, reasons: &mut Vec<String>) -> u32 {
    let payee = normalize_name(payee);
    let payer = normalize_name(payer);

    if payee.is_empty() || payer.is_empty() {
        return 0;
    }

    if payee == payer {
        reasons.push("exact name match".into());
        return 20;
    }

    let ratio = similarity_ratio(&payee, &payer);
    if ratio > 0.8 {
        reasons.push("high name similarity".into());
        return 15;
    }
    if ratio > 0.6 {
        reasons.push("partial name similarity".into());
        return 10;
    }

    0
}

/// The last `n` characters of `s` (the whole string when shorter).
fn char_suffix(s: &str, n: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    let start = chars.len().saturating_sub(n);
    chars[start..].iter().collect()
}
