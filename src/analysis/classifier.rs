//! Complexity tier classifier — pure heuristic, no I/O.
//!
//! The tier only controls how elaborate the status narration and synthesized
//! response look; it carries no routing semantics of its own.
//!
//! Rules, first match wins:
//!   1. 3+ scoring departments OR 3+ intents OR a coordination intent → Complex
//!   2. 2+ scoring departments OR 2+ intents → Medium
//!   3. otherwise → Simple

use serde::Serialize;

use crate::catalog::Intent;

/// Coarse estimate of how many domains a query spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Simple,
    Medium,
    Complex,
}

impl Complexity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Medium => "medium",
            Self::Complex => "complex",
        }
    }
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify from the number of departments with score > 0 and the detected
/// intents.
pub fn classify(agent_count: usize, intents: &[Intent]) -> Complexity {
    let intent_count = intents.len();
    if agent_count >= 3 || intent_count >= 3 || intents.contains(&Intent::Coordination) {
        Complexity::Complex
    } else if agent_count >= 2 || intent_count >= 2 {
        Complexity::Medium
    } else {
        Complexity::Simple
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_counts_are_simple() {
        assert_eq!(classify(0, &[]), Complexity::Simple);
        assert_eq!(classify(1, &[Intent::Payment]), Complexity::Simple);
    }

    #[test]
    fn two_of_either_is_medium() {
        assert_eq!(classify(2, &[]), Complexity::Medium);
        assert_eq!(classify(0, &[Intent::Payment, Intent::Inquiry]), Complexity::Medium);
        assert_eq!(classify(2, &[Intent::Payment, Intent::Inquiry]), Complexity::Medium);
    }

    #[test]
    fn three_of_either_is_complex() {
        assert_eq!(classify(3, &[]), Complexity::Complex);
        assert_eq!(
            classify(1, &[Intent::Payment, Intent::Inquiry, Intent::Dispute]),
            Complexity::Complex
        );
    }

    #[test]
    fn coordination_intent_always_complex() {
        assert_eq!(classify(0, &[Intent::Coordination]), Complexity::Complex);
        assert_eq!(classify(1, &[Intent::Coordination]), Complexity::Complex);
    }
}
