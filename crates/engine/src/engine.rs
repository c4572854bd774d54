//! Batch runner: load CSV sources, score every open invoice against every
//! credit, decide per transaction, summarize.

use crate::config::{InvoiceSource, MatchConfig, TransactionSource};
use crate::decide::decide;
use crate::error::MatchError;
use crate::evidence::compute_summary;
use crate::model::{
    InvoiceCandidate, MatchRun, RunMeta, ScoredCandidate, Transaction, TransactionOutcome,
};
use crate::score::score;

/// Pre-loaded engine input. In batch mode every open invoice in the export
/// is a candidate for every credit; tenant scoping happened upstream when
/// the files were produced.
pub struct MatchInput {
    pub transactions: Vec<Transaction>,
    pub invoices: Vec<InvoiceCandidate>,
}

/// Run matching per config. Returns per-transaction decisions + summary.
pub fn run(config: &MatchConfig, input: &MatchInput) -> Result<MatchRun, MatchError> {
    let mut outcomes = Vec::with_capacity(input.transactions.len());

    for txn in &input.transactions {
        let scored: Vec<ScoredCandidate> = input
            .invoices
            .iter()
            .map(|candidate| score(txn, candidate))
            .collect();

        outcomes.push(TransactionOutcome {
            transaction_id: txn.id.clone(),
            decision: decide(txn, &scored, &config.thresholds),
        });
    }

    let summary = compute_summary(&outcomes);

    Ok(MatchRun {
        meta: RunMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        outcomes,
    })
}

/// Load bank transactions from CSV, applying column mapping and filter.
pub fn load_transactions(
    csv_data: &str,
    source: &TransactionSource,
) -> Result<Vec<Transaction>, MatchError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| MatchError::Io(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let col = &source.columns;

    let idx = |name: &str| -> Result<usize, MatchError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| MatchError::MissingColumn {
                source: "transactions".into(),
                column: name.into(),
            })
    };

    let id_idx = idx(&col.id)?;
    let amount_idx = idx(&col.amount)?;
    let reference_idx = idx(&col.reference)?;
    let payee_idx = idx(&col.payee_name)?;
    let date_idx = idx(&col.date)?;

    let filter_idx = match source.filter {
        Some(ref filter) => Some(idx(&filter.column)?),
        None => None,
    };

    let mut transactions = Vec::new();

    for record in reader.records() {
        let record = record.map_err(|e| MatchError::Io(e.to_string()))?;

        if let (Some(ref filter), Some(fi)) = (&source.filter, filter_idx) {
            let val = record.get(fi).unwrap_or("");
            if !filter.values.iter().any(|v| v == val) {
                continue;
            }
        }

        let id = record.get(id_idx).unwrap_or("").to_string();

        let amount_str = record.get(amount_idx).unwrap_or("");
        let amount_cents: i64 = amount_str.parse().map_err(|_| MatchError::AmountParse {
            source: "transactions".into(),
            record_id: id.clone(),
            value: amount_str.into(),
        })?;

        let date_str = record.get(date_idx).unwrap_or("");
        let date = chrono::NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| {
            MatchError::DateParse {
                source: "transactions".into(),
                record_id: id.clone(),
                value: date_str.into(),
            }
        })?;

        transactions.push(Transaction {
            id,
            amount_cents,
            reference: optional_cell(record.get(reference_idx)),
            payee_name: optional_cell(record.get(payee_idx)),
            date,
        });
    }

    Ok(transactions)
}

/// Load open invoices from CSV, applying column mapping.
pub fn load_invoices(
    csv_data: &str,
    source: &InvoiceSource,
) -> Result<Vec<InvoiceCandidate>, MatchError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| MatchError::Io(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let col = &source.columns;

    let idx = |name: &str| -> Result<usize, MatchError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| MatchError::MissingColumn {
                source: "invoices".into(),
                column: name.into(),
            })
    };

    let id_idx = idx(&col.id)?;
    let number_idx = idx(&col.invoice_number)?;
    let outstanding_idx = idx(&col.outstanding_amount)?;
    let payer_idx = idx(&col.payer_name)?;
    let hint_idx = match col.reference_hint {
        Some(ref hint_col) => Some(idx(hint_col)?),
        None => None,
    };

    let mut invoices = Vec::new();

    for record in reader.records() {
        let record = record.map_err(|e| MatchError::Io(e.to_string()))?;

        let id = record.get(id_idx).unwrap_or("").to_string();
        let invoice_number = record.get(number_idx).unwrap_or("").to_string();

        let outstanding_str = record.get(outstanding_idx).unwrap_or("");
        let outstanding_cents: i64 =
            outstanding_str.parse().map_err(|_| MatchError::AmountParse {
                source: "invoices".into(),
                record_id: id.clone(),
                value: outstanding_str.into(),
            })?;

        // No configured hint column → the invoice number is the best
        // reference the payer could have quoted.
        let reference_hint = match hint_idx {
            Some(hi) => optional_cell(record.get(hi)),
            None => optional_cell(Some(invoice_number.as_str())),
        };

        invoices.push(InvoiceCandidate {
            id,
            invoice_number,
            outstanding_cents,
            payer_name: optional_cell(record.get(payer_idx)),
            reference_hint,
        });
    }

    Ok(invoices)
}

fn optional_cell(value: Option<&str>) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v.to_string()),
        _ => None,
    }
}
