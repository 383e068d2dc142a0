//! Keyword and intent extraction — substring containment over query tokens.
//!
//! Matching rule, shared by both tables: lowercase the query, split on
//! whitespace, and a table entry matches when ANY token contains it as a
//! substring. This is deliberately loose ("billing" satisfies both "bill" and
//! "billing"); whole-word matching is a known non-goal.

use crate::catalog::{Catalog, Intent};

/// Lowercase and whitespace-split a query. Empty input yields no tokens.
pub fn tokenize(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

fn any_token_contains(tokens: &[String], needle: &str) -> bool {
    tokens.iter().any(|t| t.contains(needle))
}

/// All keywords (across every department) with at least one matching token.
/// Deduplicated; department attribution is dropped here and recomputed during
/// scoring.
pub fn match_keywords(catalog: &Catalog, tokens: &[String]) -> Vec<String> {
    let mut matched: Vec<String> = Vec::new();
    for (_, keywords) in catalog.keyword_table() {
        for keyword in keywords {
            if any_token_contains(tokens, keyword) && !matched.contains(keyword) {
                matched.push(keyword.clone());
            }
        }
    }
    matched
}

/// All intents with at least one matching trigger, in detection-table order.
pub fn match_intents(catalog: &Catalog, tokens: &[String]) -> Vec<Intent> {
    let mut matched: Vec<Intent> = Vec::new();
    for (intent, triggers) in catalog.intent_table() {
        if triggers.iter().any(|t| any_token_contains(tokens, t)) {
            matched.push(*intent);
        }
    }
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn tokenize_lowercases_and_splits() {
        assert_eq!(
            tokenize("Pay My WATER Bill"),
            vec!["pay", "my", "water", "bill"]
        );
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t  ").is_empty());
    }

    #[test]
    fn substring_containment_matches_inside_tokens() {
        // "billing?" contains both "bill" and "billing".
        let tokens = tokenize("question about billing?");
        let matched = match_keywords(Catalog::builtin(), &tokens);
        assert!(matched.contains(&"bill".to_string()));
        assert!(matched.contains(&"billing".to_string()));
    }

    #[test]
    fn matched_keywords_are_deduplicated() {
        let tokens = tokenize("water water water");
        let matched = match_keywords(Catalog::builtin(), &tokens);
        assert_eq!(
            matched.iter().filter(|k| k.as_str() == "water").count(),
            1
        );
    }

    #[test]
    fn intents_follow_table_order() {
        // Triggers for emergency and payment both present; payment is listed
        // first in the intent table.
        let tokens = tokenize("urgent! I need to pay a fee");
        let matched = match_intents(Catalog::builtin(), &tokens);
        assert_eq!(matched, vec![Intent::Payment, Intent::Emergency]);
    }

    #[test]
    fn no_tokens_no_matches() {
        let tokens = tokenize("");
        assert!(match_keywords(Catalog::builtin(), &tokens).is_empty());
        assert!(match_intents(Catalog::builtin(), &tokens).is_empty());
    }
}
