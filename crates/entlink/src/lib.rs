//! Entlink: the entity-linking annotation model.
//!
//! A single annotator works through a queue of named-entity mentions
//! extracted from source documents and links each one to a canonical
//! reference URL (or explicitly marks it as not linkable). This crate holds
//! the model behind that loop: the corpus and its traversal order, the
//! append-only annotation store, link normalization and validation, and the
//! majority-vote link suggestion engine.
//!
//! # Core Principles
//!
//! - **Append-only**: decisions and corrections are appended, never edited
//!   in place; the full history stays auditable.
//! - **Store as truth**: what counts as "already annotated" is always
//!   derived from the persisted store, never from transient display state.
//! - **Deterministic traversal**: documents in name order, entity types in
//!   first-occurrence order, every outstanding type visited exactly once
//!   per pass.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use entlink::{Corpus, LinkAnnotations, SuggestionEngine};
//!
//! # fn example() -> entlink::Result<()> {
//! let mut corpus = Corpus::load(Path::new("sources"), Path::new("entities"))?;
//! let mut store = LinkAnnotations::load("annotations.tab")?;
//!
//! while let Some(entity) = corpus.next(&store) {
//!     let engine = SuggestionEngine::from_store(&store);
//!     match engine.suggest(&entity.text) {
//!         Some(link) => { store.add_link(&entity, link)?; }
//!         None => { store.add_link(&entity, "-")?; }
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod corpus;
pub mod error;
pub mod store;
pub mod suggest;
pub mod validate;

pub use config::{AnnotatorConfig, DEFAULT_CONTEXT_SIZE};
pub use corpus::{Corpus, CorpusStatus, EntityType, FileStatus, Mention, SourceFile};
pub use error::{EntlinkError, Result};
pub use store::{normalize_link, LinkAnnotation, LinkAnnotations, EMPTY_LINK, WIKIPEDIA_BASE};
pub use suggest::SuggestionEngine;
pub use validate::{AcceptAllValidator, HttpValidator, LinkValidator, MockValidator};
