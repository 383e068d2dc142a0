/// Property tests over the analyzer: no input may ever break the structural
/// invariants the narrator and composer rely on.
use munibot::analysis::{analyze, Complexity};
use munibot::catalog::{Catalog, Department};
use proptest::prelude::*;

proptest! {
    #[test]
    fn never_more_than_two_secondaries(query in ".{0,200}") {
        let a = analyze(Catalog::builtin(), &query);
        prop_assert!(a.secondaries.len() <= 2);
    }

    #[test]
    fn primary_never_among_secondaries(query in ".{0,200}") {
        let a = analyze(Catalog::builtin(), &query);
        prop_assert!(!a.secondaries.contains(&a.primary));
    }

    #[test]
    fn analysis_is_pure(query in ".{0,200}") {
        let a = analyze(Catalog::builtin(), &query);
        let b = analyze(Catalog::builtin(), &query);
        prop_assert_eq!(a.primary, b.primary);
        prop_assert_eq!(a.secondaries, b.secondaries);
        prop_assert_eq!(a.scores, b.scores);
        prop_assert_eq!(a.complexity, b.complexity);
    }

    #[test]
    fn gov_only_appears_as_fallback(query in "[a-z ]{0,100}") {
        let a = analyze(Catalog::builtin(), &query);
        if a.primary == Department::Gov {
            // Fallback means nothing scored at all.
            prop_assert!(a.scores.iter().all(|(_, s)| *s == 0));
            prop_assert!(a.secondaries.is_empty());
        }
        prop_assert!(!a.secondaries.contains(&Department::Gov));
    }

    #[test]
    fn few_matches_stay_simple(word in "[a-z]{1,12}") {
        // A single token can match at most a handful of keywords, but if it
        // matches neither 2 departments nor 2 intents the tier must be Simple.
        let a = analyze(Catalog::builtin(), &word);
        let departments = a.scores.iter().filter(|(_, s)| *s > 0).count();
        let coordination = a
            .intents
            .contains(&munibot::catalog::Intent::Coordination);
        if departments < 2 && a.intents.len() < 2 && !coordination {
            prop_assert_eq!(a.complexity, Complexity::Simple);
        }
    }

    #[test]
    fn scores_bounded_by_keyword_list_length(query in ".{0,200}") {
        let catalog = Catalog::builtin();
        let a = analyze(catalog, &query);
        for (dept, score) in &a.scores {
            let len = catalog
                .keyword_table()
                .iter()
                .find(|(d, _)| d == dept)
                .map(|(_, kws)| kws.len() as u32)
                .unwrap();
            prop_assert!(*score <= len);
        }
    }
}
