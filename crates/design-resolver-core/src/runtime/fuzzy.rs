// crates/design-resolver-core/src/runtime/fuzzy.rs
// ============================================================================
// Module: Design Resolver Fuzzy Matching
// Description: Levenshtein-based string similarity and best-match search.
// Purpose: Tolerate naming drift between requested keys and native names.
// Dependencies: strsim
// ============================================================================

//! ## Overview
//! Similarity is `1 - levenshtein / max_len` over lowercased, trimmed input,
//! so it lies in [0, 1] with 1 meaning equal. Best-match search keeps the
//! first candidate on ties so results follow candidate order.

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default minimum similarity for treating two keys as equivalent.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.6;

// ============================================================================
// SECTION: Similarity
// ============================================================================

/// Returns the normalized Levenshtein similarity of two strings.
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a == b {
        return 1.0;
    }
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    let distance = strsim::levenshtein(&a, &b);
    (1.0 - ratio(distance, max_len)).clamp(0.0, 1.0)
}

/// Divides two counts as `f64`.
#[allow(clippy::cast_precision_loss, reason = "String lengths stay far below 2^52.")]
const fn ratio(numerator: usize, denominator: usize) -> f64 {
    numerator as f64 / denominator as f64
}

// ============================================================================
// SECTION: Best Match
// ============================================================================

/// Best fuzzy match of a query against a candidate list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatch<'a> {
    /// Matched candidate.
    pub candidate: &'a str,
    /// Index of the candidate in the input order.
    pub index: usize,
    /// Similarity in [0, 1].
    pub score: f64,
}

/// Returns the most similar candidate scoring at least `threshold`.
#[must_use]
pub fn best_match<'a, I>(query: &str, candidates: I, threshold: f64) -> Option<FuzzyMatch<'a>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<FuzzyMatch<'a>> = None;
    for (index, candidate) in candidates.into_iter().enumerate() {
        let score = similarity(query, candidate);
        if score < threshold {
            continue;
        }
        if best.is_none_or(|current| score > current.score) {
            best = Some(FuzzyMatch {
                candidate,
                index,
                score,
            });
        }
    }
    best
}
