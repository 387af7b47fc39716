//! Link suggestions from prior annotations.
//!
//! A pure majority vote over the links already assigned to identical
//! surface strings. The engine is a snapshot: it is rebuilt from the store
//! whenever a suggestion is needed and never mutates anything.

use indexmap::IndexMap;

use crate::store::LinkAnnotations;

/// Snapshot of surface text to previously assigned links.
#[derive(Debug, Clone, Default)]
pub struct SuggestionEngine {
    /// Non-sentinel links per surface text, in store scan order.
    links: IndexMap<String, Vec<String>>,
}

impl SuggestionEngine {
    /// Build a snapshot from the store's current records.
    ///
    /// Superseded records do not contribute; sentinel decisions are
    /// excluded, so a string marked "not linkable" never yields a
    /// suggestion.
    pub fn from_store(store: &LinkAnnotations) -> Self {
        let mut links: IndexMap<String, Vec<String>> = IndexMap::new();
        for record in store.current_records() {
            if record.is_linked() {
                links
                    .entry(record.text.clone())
                    .or_default()
                    .push(record.link.clone());
            }
        }
        Self { links }
    }

    /// Propose a link for a surface string.
    ///
    /// Returns the most frequent link among prior decisions for exactly
    /// this string; ties go to the link encountered first in scan order.
    /// `None` when no prior link exists.
    pub fn suggest(&self, text: &str) -> Option<&str> {
        let candidates = self.links.get(text)?;

        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for link in candidates {
            *counts.entry(link.as_str()).or_insert(0) += 1;
        }

        let mut best: Option<(&str, usize)> = None;
        for (link, count) in counts {
            match best {
                Some((_, best_count)) if count <= best_count => {}
                _ => best = Some((link, count)),
            }
        }
        best.map(|(link, _)| link)
    }

    /// Number of surface strings with at least one prior link.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// True when no prior links exist at all.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
