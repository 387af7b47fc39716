//! The corpus: all source files plus the traversal that decides what's next.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EntlinkError, Result};
use crate::store::LinkAnnotations;

use super::mention::EntityType;
use super::source_file::{FileStatus, SourceFile};

/// Extension of entity record files in the entities directory.
const ENTITIES_EXTENSION: &str = "ann";

/// Extension of raw text files in the sources directory.
const SOURCES_EXTENSION: &str = "txt";

/// Corpus-wide completion statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusStatus {
    /// Per-file statistics, in corpus order.
    pub files: Vec<FileStatus>,
    /// Distinct entity types across the corpus.
    pub total_types: usize,
    /// Entity types with a current record in the store.
    pub annotated_types: usize,
    /// Corpus-wide completion percentage (0 for an empty corpus).
    pub percent_done: f64,
}

impl CorpusStatus {
    /// Render as pretty-printed JSON, for scripting against the tool.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// All source files for a dataset plus the traversal cursor.
///
/// Files are loaded in sorted name order and entity types kept in
/// first-occurrence order, so traversal is deterministic. The cursor only
/// moves forward; what counts as "already annotated" is derived from the
/// store on every step, never from transient in-memory state.
#[derive(Debug)]
pub struct Corpus {
    files: Vec<SourceFile>,
    cursor: Cursor,
}

#[derive(Debug, Clone, Copy, Default)]
struct Cursor {
    file: usize,
    entry: usize,
}

impl Corpus {
    /// Load a corpus from a sources directory (`<docid>.txt`) and an
    /// entities directory (`<docid>.ann`).
    ///
    /// Every entity file must have a matching source text; files pair by
    /// stem. Documents are ordered by name.
    pub fn load(sources_dir: &Path, entities_dir: &Path) -> Result<Self> {
        let mut entity_files: Vec<_> = fs::read_dir(entities_dir)
            .map_err(|e| EntlinkError::Io {
                path: entities_dir.to_path_buf(),
                source: e,
            })?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .is_some_and(|ext| ext == ENTITIES_EXTENSION)
            })
            .collect();
        entity_files.sort();

        if entity_files.is_empty() {
            return Err(EntlinkError::Config(format!(
                "no .{} files found in '{}'",
                ENTITIES_EXTENSION,
                entities_dir.display()
            )));
        }

        let mut files = Vec::with_capacity(entity_files.len());
        for entities_path in entity_files {
            let name = entities_path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let text_path = sources_dir.join(format!("{}.{}", name, SOURCES_EXTENSION));
            files.push(SourceFile::load(name, &text_path, &entities_path)?);
        }

        Ok(Self {
            files,
            cursor: Cursor::default(),
        })
    }

    /// Build a corpus from already-parsed source files (tests, demos).
    pub fn from_files(files: Vec<SourceFile>) -> Self {
        Self {
            files,
            cursor: Cursor::default(),
        }
    }

    /// The source files in corpus order.
    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    /// Look up a source file by document id.
    pub fn file(&self, name: &str) -> Option<&SourceFile> {
        self.files.iter().find(|f| f.name == name)
    }

    /// Advance to the next entity type without a current record in the
    /// store.
    ///
    /// Lazy and single-pass: the cursor never rewinds, and `None` marks the
    /// end of the pass. Entity types annotated between calls are skipped
    /// when the cursor reaches them.
    pub fn next(&mut self, store: &LinkAnnotations) -> Option<EntityType> {
        while self.cursor.file < self.files.len() {
            let file = &self.files[self.cursor.file];
            match file.types.get_index(self.cursor.entry) {
                None => {
                    self.cursor.file += 1;
                    self.cursor.entry = 0;
                }
                Some((text, entity)) => {
                    self.cursor.entry += 1;
                    if !store.is_annotated(&file.name, text) {
                        return Some(entity.clone());
                    }
                }
            }
        }
        None
    }

    /// Completion statistics per file and corpus-wide.
    ///
    /// Reads the store only; calling this never disturbs the traversal
    /// cursor.
    pub fn status(&self, store: &LinkAnnotations) -> CorpusStatus {
        let files: Vec<FileStatus> = self
            .files
            .iter()
            .map(|f| f.status(|e| store.is_annotated(&e.document, &e.text)))
            .collect();

        let total_types: usize = files.iter().map(|f| f.total_types).sum();
        let annotated_types: usize = files.iter().map(|f| f.annotated_types).sum();
        let percent_done = if total_types == 0 {
            0.0
        } else {
            annotated_types as f64 / total_types as f64 * 100.0
        };

        CorpusStatus {
            files,
            total_types,
            annotated_types,
            percent_done,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Mention;
    use indexmap::IndexMap;
    use tempfile::TempDir;

    fn source_file(name: &str, texts: &[(&str, &str)]) -> SourceFile {
        let mut types = IndexMap::new();
        for (i, &(text, class)) in texts.iter().enumerate() {
            types.insert(
                text.to_string(),
                EntityType::new(name, text, class, Mention::new(i * 10, i * 10 + text.len())),
            );
        }
        SourceFile::from_parts(name, "x".repeat(200), types)
    }

    fn empty_store(dir: &TempDir) -> LinkAnnotations {
        LinkAnnotations::load(dir.path().join("annotations.tab")).unwrap()
    }

    #[test]
    fn test_traversal_visits_every_type_once() {
        let dir = TempDir::new().unwrap();
        let store = empty_store(&dir);
        let mut corpus = Corpus::from_files(vec![
            source_file("doc1", &[("Jim Lehrer", "PERSON"), ("Acme Corp", "ORG")]),
            source_file("doc2", &[("Jim Lehrer", "PERSON")]),
        ]);

        let mut seen = Vec::new();
        while let Some(entity) = corpus.next(&store) {
            seen.push((entity.document.clone(), entity.text.clone()));
        }

        assert_eq!(
            seen,
            vec![
                ("doc1".to_string(), "Jim Lehrer".to_string()),
                ("doc1".to_string(), "Acme Corp".to_string()),
                ("doc2".to_string(), "Jim Lehrer".to_string()),
            ]
        );
        assert!(corpus.next(&store).is_none());
    }

    #[test]
    fn test_traversal_skips_annotated_types() {
        let dir = TempDir::new().unwrap();
        let mut store = empty_store(&dir);
        let mut corpus = Corpus::from_files(vec![source_file(
            "doc1",
            &[("Jim Lehrer", "PERSON"), ("Acme Corp", "ORG")],
        )]);

        let first = corpus.next(&store).unwrap();
        store.add_link(&first, "Jim Lehrer").unwrap();

        let second = corpus.next(&store).unwrap();
        assert_eq!(second.text, "Acme Corp");
        assert!(corpus.next(&store).is_none());
    }

    #[test]
    fn test_status_does_not_move_cursor() {
        let dir = TempDir::new().unwrap();
        let store = empty_store(&dir);
        let mut corpus = Corpus::from_files(vec![source_file("doc1", &[("Jim Lehrer", "PERSON")])]);

        let status = corpus.status(&store);
        assert_eq!(status.total_types, 1);
        assert_eq!(status.percent_done, 0.0);

        assert_eq!(corpus.next(&store).unwrap().text, "Jim Lehrer");
    }

    #[test]
    fn test_status_serializes_to_json() {
        let dir = TempDir::new().unwrap();
        let store = empty_store(&dir);
        let corpus = Corpus::from_files(vec![source_file("doc1", &[("Jim Lehrer", "PERSON")])]);

        let json = corpus.status(&store).to_json().unwrap();
        assert!(json.contains("\"total_types\": 1"));
    }

    #[test]
    fn test_status_fully_annotated_is_hundred_percent() {
        let dir = TempDir::new().unwrap();
        let mut store = empty_store(&dir);
        let mut corpus = Corpus::from_files(vec![
            source_file("doc1", &[("Jim Lehrer", "PERSON")]),
            source_file("doc2", &[("Acme Corp", "ORG")]),
        ]);

        while let Some(entity) = corpus.next(&store) {
            store.add_link(&entity, "-").unwrap();
        }

        let status = corpus.status(&store);
        assert_eq!(status.annotated_types, 2);
        assert_eq!(status.percent_done, 100.0);
    }
}
