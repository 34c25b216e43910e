//! Error taxonomy for the tag engine.
//!
//! Every error is scoped to one file. Neither the refresh pass nor the batch
//! writer aborts because a single file failed:
//! - refresh drops the file from the set and reports a warning
//! - write records the failure in the report and moves on

use std::path::PathBuf;
use thiserror::Error;

use super::types::{FieldName, TagVersion};

#[derive(Debug, Error)]
pub enum TagError {
    #[error("missing file: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("missing id3 tag: {}", .0.display())]
    MissingTag(PathBuf),

    #[error("invalid value {value:?} for {field} in ID3v{version}")]
    InvalidFieldValue {
        field: FieldName,
        value: String,
        version: TagVersion,
    },

    #[error("Invalid version {0}")]
    InvalidVersionRequest(String),

    #[error("write failed for {}: {reason}", .path.display())]
    WriteFailure { path: PathBuf, reason: String },

    #[error("cannot use {} as artwork: {reason}", .path.display())]
    InvalidArtwork { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, TagError>;

impl TagError {
    pub fn write_failure(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        TagError::WriteFailure {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
