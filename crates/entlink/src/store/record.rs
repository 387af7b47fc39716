//! The persisted annotation record and its line codec.

use serde::{Deserialize, Serialize};

use crate::error::{EntlinkError, Result};

/// One persisted link decision.
///
/// Records are written one per line as tab-separated fields in this fixed
/// order: identifier, document, start, end, surface text, entity class,
/// link. Correction records carry a trailing eighth field naming the
/// identifier they supersede; plain records stay at seven fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkAnnotation {
    /// Unique identifier, monotonically assigned and never reused.
    pub identifier: u64,
    /// Owning document.
    pub document: String,
    /// Start offset of the first mention in the group.
    pub start: usize,
    /// End offset of the first mention in the group.
    pub end: usize,
    /// Surface text of the entity type.
    pub text: String,
    /// Entity class label.
    pub class: String,
    /// Normalized link, or the empty string for "deliberately not linkable".
    pub link: String,
    /// Identifier of the record this one corrects, if any.
    pub supersedes: Option<u64>,
}

impl LinkAnnotation {
    /// True when the record carries a real link rather than the sentinel.
    pub fn is_linked(&self) -> bool {
        !self.link.is_empty()
    }

    /// True when this record corrects an earlier one.
    pub fn is_correction(&self) -> bool {
        self.supersedes.is_some()
    }

    /// Serialize to one store line, without the trailing newline.
    pub fn to_line(&self) -> String {
        let mut line = format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.identifier, self.document, self.start, self.end, self.text, self.class, self.link
        );
        if let Some(superseded) = self.supersedes {
            line.push('\t');
            line.push_str(&superseded.to_string());
        }
        line
    }

    /// Parse one store line.
    pub fn parse(line: &str, line_number: usize, file: &str) -> Result<Self> {
        let parse_error = |message: String| EntlinkError::Parse {
            file: file.to_string(),
            line: line_number,
            message,
        };

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 7 || fields.len() > 8 {
            return Err(parse_error(format!(
                "expected 7 or 8 tab-separated fields, got {}",
                fields.len()
            )));
        }

        let identifier: u64 = fields[0]
            .parse()
            .map_err(|_| parse_error(format!("invalid identifier '{}'", fields[0])))?;
        let start: usize = fields[2]
            .parse()
            .map_err(|_| parse_error(format!("invalid start offset '{}'", fields[2])))?;
        let end: usize = fields[3]
            .parse()
            .map_err(|_| parse_error(format!("invalid end offset '{}'", fields[3])))?;
        let supersedes = match fields.get(7) {
            Some(value) => Some(
                value
                    .parse()
                    .map_err(|_| parse_error(format!("invalid supersedes field '{}'", value)))?,
            ),
            None => None,
        };

        Ok(Self {
            identifier,
            document: fields[1].to_string(),
            start,
            end,
            text: fields[4].to_string(),
            class: fields[5].to_string(),
            link: fields[6].to_string(),
            supersedes,
        })
    }

    /// Aligned single-line rendering for the annotation listing.
    pub fn pretty_line(&self) -> String {
        let link = if self.is_linked() { &self.link } else { "-" };
        format!(
            "{:>4}  {:<24}  {:>5} {:>5}  {:<24}  {:<8}  {}",
            self.identifier, self.document, self.start, self.end, self.text, self.class, link
        )
    }
}
