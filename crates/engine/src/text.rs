//! String normalization and similarity for scoring.
//!
//! Bank references and payee names arrive as free text with inconsistent
//! casing and spacing, so every comparison runs on a normalized form.

/// Normalize a bank reference: trim and uppercase.
pub fn normalize_reference(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Normalize a person/payer name: trim, uppercase, collapse internal
/// whitespace runs to single spaces.
pub fn normalize_name(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Classic Levenshtein edit distance over Unicode scalar values.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two-row DP.
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr: Vec<usize> = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Levenshtein similarity in [0.0, 1.0]: `1 − dist / max(len_a, len_b)`.
///
/// Two empty strings are defined as ratio 0.0 — scoring treats empty names
/// as a non-match, never a perfect one.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 0.0;
    }
    1.0 - (levenshtein_distance(a, b) as f64 / max_len as f64)
}
