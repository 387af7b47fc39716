//! The append-only annotation store.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use indexmap::IndexMap;

use crate::corpus::EntityType;
use crate::error::{EntlinkError, Result};

use super::normalize::normalize_link;
use super::record::LinkAnnotation;

/// The durable record of accepted links.
///
/// The persisted file is append-only: every decision, including a
/// correction, becomes one new line; lines are never rewritten or
/// reordered. "The current value for identifier X" is the latest record in
/// file order on X's supersession chain.
#[derive(Debug)]
pub struct LinkAnnotations {
    path: PathBuf,
    records: Vec<LinkAnnotation>,
    next_identifier: u64,
}

impl LinkAnnotations {
    /// Open a store, loading any records already persisted at `path`.
    ///
    /// A missing file is an empty store; the file is created on the first
    /// append.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let mut records = Vec::new();
        if path.exists() {
            let contents = fs::read_to_string(&path).map_err(|e| EntlinkError::Io {
                path: path.clone(),
                source: e,
            })?;
            let file = path.display().to_string();
            for (index, line) in contents.lines().enumerate() {
                if line.is_empty() {
                    continue;
                }
                records.push(LinkAnnotation::parse(line, index + 1, &file)?);
            }
        }

        let next_identifier = records.iter().map(|r| r.identifier).max().unwrap_or(0) + 1;

        Ok(Self {
            path,
            records,
            next_identifier,
        })
    }

    /// Path of the persisted file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of records, corrections included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing has been persisted yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in file order.
    pub fn iter(&self) -> impl Iterator<Item = &LinkAnnotation> {
        self.records.iter()
    }

    /// The most recent `n` records, in file order.
    pub fn recent(&self, n: usize) -> &[LinkAnnotation] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }

    /// Record one link decision for an entity type.
    ///
    /// The link is normalized, the record gets the next unique identifier
    /// and the offsets of the group's first mention, and the line is
    /// appended and flushed before this returns.
    pub fn add_link(&mut self, entity: &EntityType, link: &str) -> Result<&LinkAnnotation> {
        let first = entity.first_mention();
        let record = LinkAnnotation {
            identifier: self.next_identifier,
            document: entity.document.clone(),
            start: first.start,
            end: first.end,
            text: entity.text.clone(),
            class: entity.class.clone(),
            link: normalize_link(link),
            supersedes: None,
        };
        self.save_annotation(record)?;
        Ok(self.records.last().expect("record just appended"))
    }

    /// Build a replacement record for a correction.
    ///
    /// Copies the old record's descriptive fields, takes the new link, a
    /// fresh identifier, and an explicit supersedes pointer. Nothing is
    /// persisted; pass the result to [`save_annotation`](Self::save_annotation).
    pub fn create_link(&self, link: &str, old: &LinkAnnotation) -> LinkAnnotation {
        LinkAnnotation {
            identifier: self.next_identifier,
            document: old.document.clone(),
            start: old.start,
            end: old.end,
            text: old.text.clone(),
            class: old.class.clone(),
            link: normalize_link(link),
            supersedes: Some(old.identifier),
        }
    }

    /// Append one record line to the persisted file.
    ///
    /// Never rewrites existing lines. Rejects an identifier already present
    /// in the store; the write is flushed so the next read-modify-append
    /// cycle sees it.
    pub fn save_annotation(&mut self, record: LinkAnnotation) -> Result<()> {
        if self.records.iter().any(|r| r.identifier == record.identifier) {
            return Err(EntlinkError::Persistence(format!(
                "identifier {} already exists in the store",
                record.identifier
            )));
        }

        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|e| EntlinkError::Io {
                path: self.path.clone(),
                source: e,
            })?;
        writeln!(file, "{}", record.to_line()).map_err(|e| EntlinkError::Io {
            path: self.path.clone(),
            source: e,
        })?;
        file.flush().map_err(|e| EntlinkError::Io {
            path: self.path.clone(),
            source: e,
        })?;

        self.next_identifier = self.next_identifier.max(record.identifier + 1);
        self.records.push(record);
        Ok(())
    }

    /// Resolve the current record for a logical identifier.
    ///
    /// Walks supersession chains: after `fix-link 3`, both identifier 3 and
    /// the correction's own identifier resolve to the correction record.
    /// Fails with `AnnotationNotFound` for an identifier that never existed.
    pub fn get_annotation(&self, identifier: u64) -> Result<&LinkAnnotation> {
        let (roots, current) = self.resolve();
        let root = roots
            .get(&identifier)
            .ok_or(EntlinkError::AnnotationNotFound(identifier))?;
        Ok(current[root])
    }

    /// The latest record of every supersession chain, in the order the
    /// chains first appeared in the file.
    pub fn current_records(&self) -> Vec<&LinkAnnotation> {
        let (_, current) = self.resolve();
        current.into_values().collect()
    }

    /// True when an entity type already has a current record.
    pub fn is_annotated(&self, document: &str, text: &str) -> bool {
        self.current_records()
            .iter()
            .any(|r| r.document == document && r.text == text)
    }

    fn resolve(&self) -> (HashMap<u64, u64>, IndexMap<u64, &LinkAnnotation>) {
        let mut roots: HashMap<u64, u64> = HashMap::new();
        let mut current: IndexMap<u64, &LinkAnnotation> = IndexMap::new();

        for record in &self.records {
            let root = match record.supersedes {
                Some(old) => *roots.get(&old).unwrap_or(&old),
                None => record.identifier,
            };
            roots.insert(record.identifier, root);
            current.insert(root, record);
        }

        (roots, current)
    }

    /// Copy the persisted file to a timestamped backup path.
    ///
    /// Writes a temporary file first and renames it into place, so an
    /// interrupted backup never leaves a partial file under the backup
    /// name. Returns the backup path.
    pub fn backup(&self) -> Result<PathBuf> {
        let stamp = Local::now().format("%Y%m%d-%H%M%S");
        let backup_path = PathBuf::from(format!("{}.{}.bak", self.path.display(), stamp));
        let temp_path = backup_path.with_extension("bak.tmp");

        if self.path.exists() {
            fs::copy(&self.path, &temp_path).map_err(|e| {
                EntlinkError::Persistence(format!(
                    "failed to copy '{}' to '{}': {}",
                    self.path.display(),
                    temp_path.display(),
                    e
                ))
            })?;
        } else {
            fs::write(&temp_path, "").map_err(|e| {
                EntlinkError::Persistence(format!(
                    "failed to create backup '{}': {}",
                    temp_path.display(),
                    e
                ))
            })?;
        }

        fs::rename(&temp_path, &backup_path).map_err(|e| {
            EntlinkError::Persistence(format!(
                "failed to finalize backup '{}': {}",
                backup_path.display(),
                e
            ))
        })?;

        Ok(backup_path)
    }
}
