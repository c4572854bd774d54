use std::fmt;

#[derive(Debug)]
pub enum MatchError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (bad thresholds, missing section, etc.).
    ConfigValidation(String),
    /// Missing required column in input data.
    MissingColumn { source: String, column: String },
    /// Date parse error.
    DateParse {
        source: String,
        record_id: String,
        value: String,
    },
    /// Amount parse error.
    AmountParse {
        source: String,
        record_id: String,
        value: String,
    },
    /// IO error (file read, etc.).
    Io(String),
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingColumn { source, column } => {
                write!(f, "{source}: missing column '{column}'")
            }
            Self::DateParse {
                source,
                record_id,
                value,
            } => {
                write!(f, "{source}, record '{record_id}': cannot parse date '{value}'")
            }
            Self::AmountParse {
                source,
                record_id,
                value,
            } => {
                write!(
                    f,
                    "{source}, record '{record_id}': cannot parse amount '{value}'"
                )
            }
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for MatchError {}
