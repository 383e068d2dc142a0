//! Department scoring and primary/secondary selection.
//!
//! Score = number of a department's keywords with at least one matching token.
//! A single token can satisfy several keywords, so the score is bounded by the
//! keyword-list length, not the token count.
//!
//! Selection uses a **stable** descending sort with the canonical table order
//! as the implicit secondary key. Rust's `sort_by_key` is stable, which makes
//! the tie-break explicit and reproducible: first department in table order
//! wins among equals.

use std::cmp::Reverse;

use crate::catalog::{Catalog, Department};

/// Score every scored department against the tokens. Returns the full map in
/// canonical table order, zero scores included.
pub fn score_departments(catalog: &Catalog, tokens: &[String]) -> Vec<(Department, u32)> {
    catalog
        .keyword_table()
        .iter()
        .map(|(dept, keywords)| {
            let score = keywords
                .iter()
                .filter(|kw| tokens.iter().any(|t| t.contains(kw.as_str())))
                .count() as u32;
            (*dept, score)
        })
        .collect()
}

/// The highest-scoring department with score > 0, or `fallback` when nothing
/// scored. Ties go to the earlier table entry (stable sort).
pub fn select_primary(scores: &[(Department, u32)], fallback: Department) -> Department {
    let mut ranked: Vec<&(Department, u32)> = scores.iter().filter(|(_, s)| *s > 0).collect();
    ranked.sort_by_key(|(_, s)| Reverse(*s));
    ranked.first().map(|(d, _)| *d).unwrap_or(fallback)
}

/// Up to two further departments with score > 0, primary excluded, descending
/// by score with the same stable tie-break.
pub fn select_secondaries(scores: &[(Department, u32)], primary: Department) -> Vec<Department> {
    let mut ranked: Vec<&(Department, u32)> = scores
        .iter()
        .filter(|(d, s)| *s > 0 && *d != primary)
        .collect();
    ranked.sort_by_key(|(_, s)| Reverse(*s));
    ranked.iter().take(2).map(|(d, _)| *d).collect()
}
