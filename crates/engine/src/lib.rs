//! `paymatch-engine` — Payment-to-invoice matching and confidence scoring.
//!
//! Pure engine crate: receives pre-loaded bank credits and open invoices,
//! returns one deterministic decision per transaction. No CLI, network, or
//! persistence dependencies. Applying a match, audit logging, and review
//! queues are caller concerns.

pub mod config;
pub mod decide;
pub mod engine;
pub mod error;
pub mod evidence;
pub mod model;
pub mod score;
pub mod text;

pub use config::{MatchConfig, Thresholds};
pub use decide::decide;
pub use engine::{run, MatchInput};
pub use error::MatchError;
pub use model::{
    InvoiceCandidate, MatchAction, MatchDecision, MatchRun, ScoredCandidate, Transaction,
};
pub use score::score;
