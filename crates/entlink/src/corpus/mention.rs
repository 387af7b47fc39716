//! Mentions and entity types - the units the annotator works with.

use serde::{Deserialize, Serialize};

/// One occurrence of a named entity in a document.
///
/// A mention is always a single contiguous extent; there are no
/// multi-fragment mentions. Offsets are character offsets into the owning
/// document's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mention {
    /// Start offset (inclusive).
    pub start: usize,
    /// End offset (exclusive).
    pub end: usize,
}

impl Mention {
    /// Create a new mention extent.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// All mentions of one surface string within one document.
///
/// This is the unit of annotation: one decision links every mention in the
/// group at once. Groups are keyed by exact surface-text equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityType {
    /// The document this group belongs to.
    pub document: String,
    /// The shared surface text.
    pub text: String,
    /// The entity class label of the first occurrence (e.g. PERSON, ORG).
    pub class: String,
    /// Every extent with this surface text, in document order.
    pub mentions: Vec<Mention>,
}

impl EntityType {
    /// Create a group from its first mention.
    pub fn new(
        document: impl Into<String>,
        text: impl Into<String>,
        class: impl Into<String>,
        first: Mention,
    ) -> Self {
        Self {
            document: document.into(),
            text: text.into(),
            class: class.into(),
            mentions: vec![first],
        }
    }

    /// Add another occurrence to the group.
    pub fn push(&mut self, mention: Mention) {
        self.mentions.push(mention);
    }

    /// The first mention in document order.
    ///
    /// Its offsets go into the persisted record for this group; a group
    /// always has at least one mention.
    pub fn first_mention(&self) -> Mention {
        self.mentions[0]
    }

    /// Number of occurrences in the group.
    pub fn mention_count(&self) -> usize {
        self.mentions.len()
    }
}
