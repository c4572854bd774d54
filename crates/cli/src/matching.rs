//! `paymatch match` — config-driven payment-to-invoice matching.

use std::path::PathBuf;

use clap::Subcommand;

use crate::exit_codes::{
    EXIT_MATCH_INVALID_CONFIG, EXIT_MATCH_REVIEW, EXIT_MATCH_RUNTIME, EXIT_MATCH_UNMATCHED,
};
use crate::CliError;

#[derive(Subcommand)]
pub enum MatchCommands {
    /// Run a matching batch from a TOML config file
    #[command(after_help = "\
Examples:
  paymatch match run february.toml
  paymatch match run february.toml --json
  paymatch match run february.toml --output decisions.json")]
    Run {
        /// Path to the .toml run config
        config: PathBuf,

        /// Output JSON to stdout instead of human summary only
        #[arg(long)]
        json: bool,

        /// Write JSON output to file (overrides [output] in the config)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate a run config without running
    #[command(after_help = "\
Examples:
  paymatch match validate february.toml")]
    Validate {
        /// Path to the .toml run config
        config: PathBuf,
    },

    /// Score a single ad hoc transaction/invoice pair
    #[command(after_help = "\
Examples:
  paymatch match score --amount 300000 --outstanding 300000 \\
      --reference INV-1001 --hint INV-1001 --payee 'JOHN SMITH' --payer 'JOHN SMITH'")]
    Score {
        /// Transaction amount in cents
        #[arg(long)]
        amount: i64,

        /// Invoice outstanding amount in cents
        #[arg(long)]
        outstanding: i64,

        /// Transaction reference as captured from the bank feed
        #[arg(long)]
        reference: Option<String>,

        /// Reference hint associated with the invoice
        #[arg(long)]
        hint: Option<String>,

        /// Payee name as captured from the bank feed
        #[arg(long)]
        payee: Option<String>,

        /// Expected payer name on the invoice
        #[arg(long)]
        payer: Option<String>,

        /// Auto-apply threshold (percent)
        #[arg(long, default_value_t = 80)]
        auto_apply: u32,

        /// Visibility threshold (percent)
        #[arg(long, default_value_t = 20)]
        visibility: u32,
    },
}

pub fn cmd_match(cmd: MatchCommands) -> Result<(), CliError> {
    match cmd {
        MatchCommands::Run {
            config,
            json,
            output,
        } => cmd_match_run(config, json, output),
        MatchCommands::Validate { config } => cmd_match_validate(config),
        MatchCommands::Score {
            amount,
            outstanding,
            reference,
            hint,
            payee,
            payer,
            auto_apply,
            visibility,
        } => cmd_match_score(
            amount,
            outstanding,
            reference,
            hint,
            payee,
            payer,
            auto_apply,
            visibility,
        ),
    }
}

fn match_err(code: u8, msg: impl Into<String>) -> CliError {
    CliError {
        code,
        message: msg.into(),
        hint: None,
    }
}

fn cmd_match_run(
    config_path: PathBuf,
    json_output: bool,
    output_file: Option<PathBuf>,
) -> Result<(), CliError> {
    use paymatch_engine::engine::{load_invoices, load_transactions};

    let config_str = std::fs::read_to_string(&config_path)
        .map_err(|e| match_err(EXIT_MATCH_RUNTIME, format!("cannot read config: {e}")))?;

    let config = paymatch_engine::MatchConfig::from_toml(&config_str)
        .map_err(|e| match_err(EXIT_MATCH_INVALID_CONFIG, e.to_string()))?;

    // Resolve data files relative to the config file's directory.
    let base_dir = config_path
        .parent()
        .unwrap_or_else(|| std::path::Path::new("."));

    let txn_path = base_dir.join(&config.transactions.file);
    let txn_data = std::fs::read_to_string(&txn_path).map_err(|e| {
        match_err(
            EXIT_MATCH_RUNTIME,
            format!("cannot read {}: {e}", txn_path.display()),
        )
    })?;
    let transactions = load_transactions(&txn_data, &config.transactions)
        .map_err(|e| match_err(EXIT_MATCH_RUNTIME, e.to_string()))?;

    let inv_path = base_dir.join(&config.invoices.file);
    let inv_data = std::fs::read_to_string(&inv_path).map_err(|e| {
        match_err(
            EXIT_MATCH_RUNTIME,
            format!("cannot read {}: {e}", inv_path.display()),
        )
    })?;
    let invoices = load_invoices(&inv_data, &config.invoices)
        .map_err(|e| match_err(EXIT_MATCH_RUNTIME, e.to_string()))?;

    let input = paymatch_engine::MatchInput {
        transactions,
        invoices,
    };

    let result = paymatch_engine::run(&config, &input)
        .map_err(|e| match_err(EXIT_MATCH_RUNTIME, e.to_string()))?;

    let json_str = serde_json::to_string_pretty(&result)
        .map_err(|e| match_err(EXIT_MATCH_RUNTIME, format!("JSON serialization error: {e}")))?;

    // --output flag wins; otherwise honor [output] from the config.
    let output_path = output_file.or_else(|| {
        config
            .output
            .json
            .as_ref()
            .map(|p| base_dir.join(p))
    });
    if let Some(ref path) = output_path {
        std::fs::write(path, &json_str)
            .map_err(|e| match_err(EXIT_MATCH_RUNTIME, format!("cannot write output: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    if json_output {
        println!("{json_str}");
    }

    // Human summary to stderr
    let s = &result.summary;
    eprintln!(
        "matched {} transaction(s) — {} auto-applied, {} ambiguous, {} low-confidence, {} unmatched",
        s.total_transactions, s.auto_applied, s.ambiguous, s.low_confidence, s.unmatched,
    );

    if s.ambiguous > 0 || s.low_confidence > 0 {
        return Err(match_err(
            EXIT_MATCH_REVIEW,
            "decisions need human review",
        ));
    }
    if s.unmatched > 0 {
        return Err(match_err(
            EXIT_MATCH_UNMATCHED,
            "unmatched transactions found",
        ));
    }

    Ok(())
}

fn cmd_match_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&config_path)
        .map_err(|e| match_err(EXIT_MATCH_RUNTIME, format!("cannot read config: {e}")))?;

    match paymatch_engine::MatchConfig::from_toml(&config_str) {
        Ok(config) => {
            eprintln!(
                "valid: '{}' (auto-apply {}%, visibility {}%)",
                config.name, config.thresholds.auto_apply, config.thresholds.visibility,
            );
            Ok(())
        }
        Err(e) => Err(match_err(EXIT_MATCH_INVALID_CONFIG, e.to_string())),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_match_score(
    amount: i64,
    outstanding: i64,
    reference: Option<String>,
    hint: Option<String>,
    payee: Option<String>,
    payer: Option<String>,
    auto_apply: u32,
    visibility: u32,
) -> Result<(), CliError> {
    use paymatch_engine::{decide, score, InvoiceCandidate, Thresholds, Transaction};

    let txn = Transaction {
        id: "txn".into(),
        amount_cents: amount,
        reference,
        payee_name: payee,
        date: chrono::Utc::now().date_naive(),
    };
    let candidate = InvoiceCandidate {
        id: "invoice".into(),
        invoice_number: "invoice".into(),
        outstanding_cents: outstanding,
        payer_name: payer,
        reference_hint: hint,
    };

    let scored = score(&txn, &candidate);
    let thresholds = Thresholds {
        auto_apply,
        visibility,
    };
    let decision = decide(&txn, std::slice::from_ref(&scored), &thresholds);

    #[derive(serde::Serialize)]
    struct ScoreOutput {
        scored: paymatch_engine::ScoredCandidate,
        decision: paymatch_engine::MatchDecision,
    }

    let json_str = serde_json::to_string_pretty(&ScoreOutput { scored, decision })
        .map_err(|e| match_err(EXIT_MATCH_RUNTIME, format!("JSON serialization error: {e}")))?;
    println!("{json_str}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &std::path::Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    const CONFIG: &str = r#"
name = "Fixture run"

[transactions]
file = "bank.csv"
[transactions.columns]
id         = "txn_id"
amount     = "amount_cents"
reference  = "reference"
payee_name = "payee"
date       = "txn_date"

[invoices]
file = "invoices.csv"
[invoices.columns]
id                 = "invoice_id"
invoice_number     = "invoice_number"
outstanding_amount = "outstanding_cents"
payer_name         = "parent_name"
"#;

    #[test]
    fn run_resolves_paths_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = write_file(dir.path(), "run.toml", CONFIG);
        write_file(
            dir.path(),
            "bank.csv",
            "txn_id,amount_cents,reference,payee,txn_date\n\
             txn_1,300000,INV-1001,JOHN SMITH,2026-02-01\n",
        );
        write_file(
            dir.path(),
            "invoices.csv",
            "invoice_id,invoice_number,outstanding_cents,parent_name\n\
             inv_a,INV-1001,300000,JOHN SMITH\n",
        );

        let out_path = dir.path().join("decisions.json");
        cmd_match_run(config_path, false, Some(out_path.clone())).unwrap();

        let written = std::fs::read_to_string(out_path).unwrap();
        assert!(written.contains("\"auto_apply\""));
        assert!(written.contains("inv_a"));
    }

    #[test]
    fn run_maps_review_outcomes_to_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = write_file(dir.path(), "run.toml", CONFIG);
        write_file(
            dir.path(),
            "bank.csv",
            "txn_id,amount_cents,reference,payee,txn_date\n\
             txn_1,300000,,J SMITH,2026-02-01\n",
        );
        write_file(
            dir.path(),
            "invoices.csv",
            "invoice_id,invoice_number,outstanding_cents,parent_name\n\
             inv_a,INV-1001,300000,JOHN SMITH\n",
        );

        let err = cmd_match_run(config_path, false, None).unwrap_err();
        assert_eq!(err.code, EXIT_MATCH_REVIEW);
    }

    #[test]
    fn validate_rejects_bad_thresholds() {
        let dir = tempfile::tempdir().unwrap();
        let bad = CONFIG.to_string() + "\n[thresholds]\nauto_apply = 0\n";
        let config_path = write_file(dir.path(), "run.toml", &bad);

        let err = cmd_match_validate(config_path).unwrap_err();
        assert_eq!(err.code, EXIT_MATCH_INVALID_CONFIG);
    }
}
