//! Property-based tests for the annotation model.
//!
//! These verify the invariants that hold for any input or command
//! interleaving: normalization is idempotent, identifiers stay unique, the
//! store stays append-only, traversal visits exactly the outstanding
//! entity types, and suggestions are deterministic.

use proptest::prelude::*;

use entlink::{normalize_link, Corpus, EntityType, LinkAnnotations, Mention, SourceFile, SuggestionEngine};
use indexmap::IndexMap;
use tempfile::TempDir;

// =============================================================================
// Test Strategies
// =============================================================================

/// Arbitrary link-ish user input: sentinels, bare titles, full URLs, noise.
fn link_input() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("-".to_string()),
        Just("".to_string()),
        Just("   ".to_string()),
        // Bare titles, possibly with spaces
        "[A-Za-z][A-Za-z ]{0,30}",
        // Already-normalized URLs
        "https://en\\.wikipedia\\.org/wiki/[A-Za-z_]{1,20}",
        // Other schemes
        "http://[a-z]{3,10}\\.org/[a-z]{0,10}",
    ]
}

/// Surface strings without tabs or newlines (the record format is TSV).
fn surface_text() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z ]{0,20}[A-Za-z]"
}

fn build_corpus(documents: &[(String, Vec<String>)]) -> Corpus {
    let files = documents
        .iter()
        .map(|(name, texts)| {
            let mut types = IndexMap::new();
            for (i, text) in texts.iter().enumerate() {
                types.entry(text.clone()).or_insert_with(|| {
                    EntityType::new(name, text, "MISC", Mention::new(i * 30, i * 30 + 1))
                });
            }
            SourceFile::from_parts(name.clone(), " ".repeat(2000), types)
        })
        .collect();
    Corpus::from_files(files)
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// normalize(normalize(x)) == normalize(x) for any input.
    #[test]
    fn prop_normalize_idempotent(input in link_input()) {
        let once = normalize_link(&input);
        prop_assert_eq!(normalize_link(&once), once);
    }

    /// Normalized output is either the sentinel or carries a URL scheme.
    #[test]
    fn prop_normalize_output_shape(input in link_input()) {
        let normalized = normalize_link(&input);
        prop_assert!(normalized.is_empty() || normalized.contains("://"));
    }

    /// Identifiers stay unique for any interleaving of adds and corrections,
    /// and the file never shrinks.
    #[test]
    fn prop_identifiers_unique_and_append_only(
        decisions in prop::collection::vec((surface_text(), link_input(), any::<bool>()), 1..20)
    ) {
        let dir = TempDir::new().unwrap();
        let mut store = LinkAnnotations::load(dir.path().join("annotations.tab")).unwrap();
        let mut previous_len = 0;

        for (text, link, correct_last) in decisions {
            if correct_last && !store.is_empty() {
                let last_id = store.iter().last().unwrap().identifier;
                let old = store.get_annotation(last_id).unwrap().clone();
                let fixed = store.create_link(&link, &old);
                store.save_annotation(fixed).unwrap();
            } else {
                let entity = EntityType::new("doc1", &text, "MISC", Mention::new(0, 1));
                store.add_link(&entity, &link).unwrap();
            }

            prop_assert!(store.len() > previous_len);
            previous_len = store.len();

            let mut ids: Vec<u64> = store.iter().map(|r| r.identifier).collect();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(ids.len(), store.len());
        }
    }

    /// For N distinct types with M annotated, a fresh pass yields exactly
    /// N - M entity types before the terminal signal.
    #[test]
    fn prop_traversal_completeness(
        texts in prop::collection::hash_set(surface_text(), 1..15),
        annotate_mask in prop::collection::vec(any::<bool>(), 15)
    ) {
        let texts: Vec<String> = texts.into_iter().collect();
        let documents = vec![("doc1".to_string(), texts.clone())];

        let dir = TempDir::new().unwrap();
        let mut store = LinkAnnotations::load(dir.path().join("annotations.tab")).unwrap();

        let mut annotated = 0;
        for (text, keep) in texts.iter().zip(&annotate_mask) {
            if *keep {
                let entity = EntityType::new("doc1", text, "MISC", Mention::new(0, 1));
                store.add_link(&entity, "-").unwrap();
                annotated += 1;
            }
        }

        let mut corpus = build_corpus(&documents);
        let mut yielded = 0;
        while corpus.next(&store).is_some() {
            yielded += 1;
        }

        prop_assert_eq!(yielded, texts.len() - annotated);
        prop_assert!(corpus.next(&store).is_none());
    }

    /// Suggestions are a pure function of store state.
    #[test]
    fn prop_suggestion_deterministic(
        decisions in prop::collection::vec((surface_text(), link_input()), 1..15),
        query in surface_text()
    ) {
        let dir = TempDir::new().unwrap();
        let mut store = LinkAnnotations::load(dir.path().join("annotations.tab")).unwrap();
        for (i, (text, link)) in decisions.iter().enumerate() {
            let document = format!("doc{}", i);
            let entity = EntityType::new(&document, text, "MISC", Mention::new(0, 1));
            store.add_link(&entity, link).unwrap();
        }

        let first = SuggestionEngine::from_store(&store)
            .suggest(&query)
            .map(str::to_string);
        let second = SuggestionEngine::from_store(&store)
            .suggest(&query)
            .map(str::to_string);
        prop_assert_eq!(first, second);
    }
}
