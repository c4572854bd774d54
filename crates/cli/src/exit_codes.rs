//! CLI Exit Code Registry
//!
//! Single source of truth for all CLI exit codes. Exit codes are part of
//! the shell contract — import pipelines branch on them.
//!
//! # Exit Code Ranges
//!
//! | Range | Domain    | Description                                  |
//! |-------|-----------|----------------------------------------------|
//! | 0     | Universal | Success                                      |
//! | 1     | Universal | General error (unspecified)                  |
//! | 2     | Universal | CLI usage error (bad args, missing file)     |
//! | 3-9   | match     | Matching-run codes                           |

/// Success - every transaction auto-applied, or there was nothing to match.
pub const EXIT_SUCCESS: u8 = 0;

// Exit code 1 is reserved for unspecified failures; commands should always
// prefer a specific code below.

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Run config failed to parse or validate.
pub const EXIT_MATCH_INVALID_CONFIG: u8 = 3;

/// Runtime failure: unreadable files, malformed CSV rows, output IO.
pub const EXIT_MATCH_RUNTIME: u8 = 4;

/// Decisions escalated for human review (ambiguous or low-confidence).
pub const EXIT_MATCH_REVIEW: u8 = 5;

/// Transactions with no matching candidate at all (and nothing to review).
pub const EXIT_MATCH_UNMATCHED: u8 = 6;
