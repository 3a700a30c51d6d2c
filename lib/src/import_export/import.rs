use super::codec::codec_for_path;
use super::merge::MergeReport;
use crate::config::Config;
use crate::error::Result;
use crate::models::bookmark::Bookmark;
use serde_json::Value;
use std::path::Path;

/// Why an imported document was turned away as a whole
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImportRejection {
    #[error("file does not contain a list of bookmarks")]
    NotASequence,

    #[error("entry {index} is not a bookmark record")]
    NotARecord { index: usize },

    #[error("entry {index} has no title")]
    MissingTitle { index: usize },

    #[error("entry {index} has a title that is not text")]
    TitleNotText { index: usize },

    #[error("entry {index} is malformed: {reason}")]
    Malformed { index: usize, reason: String },
}

/// Result of checking a decoded document before anything is merged
#[derive(Debug, Clone, PartialEq)]
pub enum ImportValidation {
    Valid(Vec<Bookmark>),
    /// The document holds nothing at all (`null` / empty YAML)
    Empty,
    Invalid(ImportRejection),
}

/// What an import did to the editor
#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    /// The user dismissed the file chooser
    Cancelled,
    Empty,
    Rejected(ImportRejection),
    Merged(MergeReport),
}

/// Check that every entry of `doc` is a record with a text title.
///
/// One bad entry rejects the whole document. Nothing is partially accepted.
pub fn validate_import(doc: &Value) -> ImportValidation {
    let entries = match doc {
        Value::Null => return ImportValidation::Empty,
        Value::Array(entries) => entries,
        _ => return ImportValidation::Invalid(ImportRejection::NotASequence),
    };

    let mut bookmarks = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let Value::Object(map) = entry else {
            return ImportValidation::Invalid(ImportRejection::NotARecord { index });
        };
        match map.get("title") {
            None => return ImportValidation::Invalid(ImportRejection::MissingTitle { index }),
            Some(Value::String(_)) => {}
            Some(_) => return ImportValidation::Invalid(ImportRejection::TitleNotText { index }),
        }
        match serde_json::from_value::<Bookmark>(entry.clone()) {
            Ok(bookmark) => bookmarks.push(bookmark),
            Err(e) => {
                return ImportValidation::Invalid(ImportRejection::Malformed {
                    index,
                    reason: e.to_string(),
                })
            }
        }
    }

    ImportValidation::Valid(bookmarks)
}

/// Read and validate the bookmark candidates stored at `path`
pub fn read_candidates(path: &Path, config: &Config) -> Result<ImportValidation> {
    let bytes = std::fs::read(path)?;
    let doc = codec_for_path(path, config).decode(&bytes)?;
    let validation = validate_import(&doc);
    log::debug!("Validated {:?}: {:?}", path, summary(&validation));
    Ok(validation)
}

fn summary(validation: &ImportValidation) -> String {
    match validation {
        ImportValidation::Valid(b) => format!("{} record(s)", b.len()),
        ImportValidation::Empty => "empty".to_string(),
        ImportValidation::Invalid(r) => format!("rejected ({})", r),
    }
}
