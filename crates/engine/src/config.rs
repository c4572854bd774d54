use serde::Deserialize;

use crate::error::MatchError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct MatchConfig {
    pub name: String,
    #[serde(default)]
    pub thresholds: Thresholds,
    pub transactions: TransactionSource,
    pub invoices: InvoiceSource,
    #[serde(default)]
    pub output: OutputConfig,
}

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Decision thresholds, 0–100 percent scale.
///
/// Explicit values rather than module constants so a tenant-specific run
/// can tune them without touching the engine.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Thresholds {
    /// Minimum score for an unambiguous automatic match.
    #[serde(default = "default_auto_apply")]
    pub auto_apply: u32,
    /// Below this score a candidate is discarded entirely — it is never
    /// shown even as an alternative.
    #[serde(default = "default_visibility")]
    pub visibility: u32,
}

fn default_auto_apply() -> u32 {
    80
}

fn default_visibility() -> u32 {
    20
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            auto_apply: default_auto_apply(),
            visibility: default_visibility(),
        }
    }
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionSource {
    pub file: String,
    pub columns: TransactionColumns,
    #[serde(default)]
    pub filter: Option<RowFilter>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionColumns {
    pub id: String,
    pub amount: String,
    pub reference: String,
    pub payee_name: String,
    pub date: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceSource {
    pub file: String,
    pub columns: InvoiceColumns,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceColumns {
    pub id: String,
    pub invoice_number: String,
    pub outstanding_amount: String,
    pub payer_name: String,
    /// Optional; when absent the invoice number doubles as the hint.
    #[serde(default)]
    pub reference_hint: Option<String>,
}

/// Keep only rows whose `column` value is one of `values` — bank exports
/// mix debits and credits and only credits are matchable.
#[derive(Debug, Clone, Deserialize)]
pub struct RowFilter {
    pub column: String,
    pub values: Vec<String>,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub json: Option<String>,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl MatchConfig {
    pub fn from_toml(input: &str) -> Result<Self, MatchError> {
        let config: MatchConfig =
            toml::from_str(input).map_err(|e| MatchError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        let t = &self.thresholds;

        if t.auto_apply == 0 || t.auto_apply > 100 {
            return Err(MatchError::ConfigValidation(format!(
                "auto_apply threshold must be in 1..=100, got {}",
                t.auto_apply
            )));
        }

        if t.visibility == 0 || t.visibility > t.auto_apply {
            return Err(MatchError::ConfigValidation(format!(
                "visibility threshold must be in 1..=auto_apply ({}), got {}",
                t.auto_apply, t.visibility
            )));
        }

        if let Some(ref filter) = self.transactions.filter {
            if filter.values.is_empty() {
                return Err(MatchError::ConfigValidation(format!(
                    "transactions filter on '{}' has no values",
                    filter.column
                )));
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
name = "February bank import"

[thresholds]
auto_apply = 80
visibility = 20

[transactions]
file = "bank.csv"
[transactions.columns]
id         = "txn_id"
amount     = "amount_cents"
reference  = "reference"
payee_name = "payee"
date       = "txn_date"
[transactions.filter]
column = "type"
values = ["credit"]

[invoices]
file = "invoices.csv"
[invoices.columns]
id                 = "invoice_id"
invoice_number     = "invoice_number"
outstanding_amount = "outstanding_cents"
payer_name         = "parent_name"
reference_hint     = "billing_reference"

[output]
json = "decisions.json"
"#;

    #[test]
    fn parse_valid() {
        let config = MatchConfig::from_toml(VALID).unwrap();
        assert_eq!(config.name, "February bank import");
        assert_eq!(config.thresholds.auto_apply, 80);
        assert_eq!(config.thresholds.visibility, 20);
        assert_eq!(config.transactions.file, "bank.csv");
        assert_eq!(config.invoices.columns.reference_hint.as_deref(), Some("billing_reference"));
        assert_eq!(config.output.json.as_deref(), Some("decisions.json"));

        let filter = config.transactions.filter.as_ref().unwrap();
        assert_eq!(filter.column, "type");
        assert_eq!(filter.values, vec!["credit"]);
    }

    #[test]
    fn thresholds_default_to_80_20() {
        let input = r#"
name = "Defaults"

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
        let config = MatchConfig::from_toml(input).unwrap();
        assert_eq!(config.thresholds.auto_apply, 80);
        assert_eq!(config.thresholds.visibility, 20);
        assert!(config.invoices.columns.reference_hint.is_none());
        assert!(config.output.json.is_none());
    }

    #[test]
    fn reject_auto_apply_out_of_range() {
        let input = VALID.replace("auto_apply = 80", "auto_apply = 101");
        let err = MatchConfig::from_toml(&input).unwrap_err();
        assert!(err.to_string().contains("auto_apply"));
    }

    #[test]
    fn reject_visibility_above_auto_apply() {
        let input = VALID.replace("visibility = 20", "visibility = 90");
        let err = MatchConfig::from_toml(&input).unwrap_err();
        assert!(err.to_string().contains("visibility"));
    }

    #[test]
    fn reject_empty_filter_values() {
        let input = VALID.replace("values = [\"credit\"]", "values = []");
        let err = MatchConfig::from_toml(&input).unwrap_err();
        assert!(err.to_string().contains("no values"));
    }

    #[test]
    fn reject_missing_section() {
        let input = r#"
name = "Broken"

[transactions]
file = "bank.csv"
[transactions.columns]
id         = "txn_id"
amount     = "amount_cents"
reference  = "reference"
payee_name = "payee"
date       = "txn_date"
"#;
        let err = MatchConfig::from_toml(input).unwrap_err();
        assert!(matches!(err, MatchError::ConfigParse(_)));
    }
}
