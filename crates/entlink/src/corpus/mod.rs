//! The in-memory corpus model: documents, mentions, entity types, and the
//! traversal that decides which entity the annotator sees next.

mod corpus;
mod mention;
mod source_file;

pub use corpus::{Corpus, CorpusStatus};
pub use mention::{EntityType, Mention};
pub use source_file::{FileStatus, SourceFile};
