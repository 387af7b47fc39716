//! A single document: raw text plus its extracted entity mentions.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{EntlinkError, Result};

use super::mention::{EntityType, Mention};

/// Completion statistics for one source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileStatus {
    /// Document identifier.
    pub name: String,
    /// Distinct entity types in the file.
    pub total_types: usize,
    /// Entity types with a current record in the store.
    pub annotated_types: usize,
    /// Completion percentage (0 for a file with no entity types).
    pub percent_done: f64,
}

/// One document's text and its entity types, in first-occurrence order.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Document identifier (file stem).
    pub name: String,
    /// Raw document text, as characters for offset-safe slicing.
    chars: Vec<char>,
    /// Entity types keyed by exact surface text, insertion-ordered.
    pub types: IndexMap<String, EntityType>,
}

impl SourceFile {
    /// Load one document from its raw text file and its entity record file.
    ///
    /// Entity records are headerless tab-separated lines:
    /// `start <TAB> end <TAB> entity-class <TAB> surface-text`
    /// with character offsets into the text file. Offsets that fall outside
    /// the text are a parse error naming the file and line.
    pub fn load(name: impl Into<String>, text_path: &Path, entities_path: &Path) -> Result<Self> {
        let name = name.into();

        let text = fs::read_to_string(text_path).map_err(|e| EntlinkError::Io {
            path: text_path.to_path_buf(),
            source: e,
        })?;
        let chars: Vec<char> = text.chars().collect();

        let raw = fs::read_to_string(entities_path).map_err(|e| EntlinkError::Io {
            path: entities_path.to_path_buf(),
            source: e,
        })?;

        let mut file = Self {
            name,
            chars,
            types: IndexMap::new(),
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .from_reader(raw.as_bytes());

        for (index, record) in reader.records().enumerate() {
            let line = index + 1;
            let record = record?;
            file.add_record(&record, line, entities_path)?;
        }

        Ok(file)
    }

    /// Build a source file from already-parsed parts (tests, demos).
    pub fn from_parts(
        name: impl Into<String>,
        text: impl Into<String>,
        types: IndexMap<String, EntityType>,
    ) -> Self {
        Self {
            name: name.into(),
            chars: text.into().chars().collect(),
            types,
        }
    }

    fn add_record(&mut self, record: &csv::StringRecord, line: usize, path: &Path) -> Result<()> {
        let parse_error = |message: String| EntlinkError::Parse {
            file: path.display().to_string(),
            line,
            message,
        };

        if record.len() < 4 {
            return Err(parse_error(format!(
                "expected 4 fields (start, end, class, text), got {}",
                record.len()
            )));
        }

        let start: usize = record[0]
            .trim()
            .parse()
            .map_err(|_| parse_error(format!("invalid start offset '{}'", &record[0])))?;
        let end: usize = record[1]
            .trim()
            .parse()
            .map_err(|_| parse_error(format!("invalid end offset '{}'", &record[1])))?;
        let class = record[2].trim().to_string();
        let text = record[3].to_string();

        if start >= end || end > self.chars.len() {
            return Err(parse_error(format!(
                "extent ({}, {}) out of bounds for document of {} characters",
                start,
                end,
                self.chars.len()
            )));
        }

        let mention = Mention::new(start, end);
        match self.types.get_mut(&text) {
            Some(entity) => entity.push(mention),
            None => {
                let entity = EntityType::new(&self.name, &text, class, mention);
                self.types.insert(text, entity);
            }
        }

        Ok(())
    }

    /// Number of distinct entity types in this file.
    pub fn entity_type_count(&self) -> usize {
        self.types.len()
    }

    /// Look up an entity type by exact surface text.
    pub fn entity_type(&self, text: &str) -> Option<&EntityType> {
        self.types.get(text)
    }

    /// Render the left and right context windows around a mention.
    ///
    /// Windows are clamped to the document bounds; a size of zero yields
    /// empty strings. Newlines are flattened to spaces so the context stays
    /// on one display line.
    pub fn context(&self, mention: Mention, size: usize) -> (String, String) {
        let start = mention.start.min(self.chars.len());
        let end = mention.end.clamp(start, self.chars.len());

        let left_start = start.saturating_sub(size);
        let right_end = (end + size).min(self.chars.len());

        let left = flatten(&self.chars[left_start..start]);
        let right = flatten(&self.chars[end..right_end]);

        (left, right)
    }

    /// Completion statistics given a predicate for "already annotated".
    ///
    /// The percentage is 0 for a file with no entity types rather than a
    /// division error.
    pub fn status<F>(&self, is_annotated: F) -> FileStatus
    where
        F: Fn(&EntityType) -> bool,
    {
        let total = self.types.len();
        let done = self.types.values().filter(|e| is_annotated(e)).count();
        let percent = if total == 0 {
            0.0
        } else {
            done as f64 / total as f64 * 100.0
        };

        FileStatus {
            name: self.name.clone(),
            total_types: total,
            annotated_types: done,
            percent_done: percent,
        }
    }
}

fn flatten(chars: &[char]) -> String {
    chars
        .iter()
        .map(|&c| if c == '\n' || c == '\t' { ' ' } else { c })
        .collect()
}
