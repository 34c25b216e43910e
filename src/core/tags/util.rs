//! core/tags/util.rs
//! Small helpers shared by tag reading/writing.

use std::io;
use std::path::Path;

use id3::frame::Content;
use id3::{ErrorKind, Tag, TagLike, Version};

use super::super::error::TagError;
use super::super::types::TagVersion;

/// Split TRCK/TPOS text without parsing, so "03/12" keeps its padding:
/// - "3" -> ("3", "")
/// - "03/12" -> ("03", "12")
/// - "/12" -> ("", "12")
pub(crate) fn split_slash_pair(s: &str) -> (String, String) {
    match s.split_once('/') {
        Some((n, total)) => (n.trim().to_string(), total.trim().to_string()),
        None => (s.trim().to_string(), String::new()),
    }
}

/// Inverse of [`split_slash_pair`]; `None` means "remove the frame".
pub(crate) fn join_slash_pair(n: &str, total: &str) -> Option<String> {
    match (n.is_empty(), total.is_empty()) {
        (true, true) => None,
        (_, true) => Some(n.to_string()),
        _ => Some(format!("{n}/{total}")),
    }
}

/// Get the value of a plain text frame (T***).
pub(crate) fn text_frame(tag: &Tag, id: &str) -> Option<String> {
    let frame = tag.get(id)?;
    match frame.content() {
        Content::Text(s) => Some(s.clone()),
        _ => None,
    }
}

pub(crate) fn from_id3_version(v: Version) -> TagVersion {
    match v {
        Version::Id3v22 => TagVersion::V22,
        Version::Id3v23 => TagVersion::V23,
        Version::Id3v24 => TagVersion::V24,
    }
}

pub(crate) fn to_id3_version(v: TagVersion) -> Option<Version> {
    match v {
        TagVersion::V22 => Some(Version::Id3v22),
        TagVersion::V23 => Some(Version::Id3v23),
        TagVersion::V24 => Some(Version::Id3v24),
        TagVersion::Legacy => None,
    }
}

/// Map an `id3` read error onto the engine's two read failures.
/// Anything that isn't "file not there" counts as "no usable tag".
pub(crate) fn read_error(path: &Path, err: id3::Error) -> TagError {
    match err.kind {
        ErrorKind::Io(ref e) if e.kind() == io::ErrorKind::NotFound => {
            TagError::MissingFile(path.to_path_buf())
        }
        _ => TagError::MissingTag(path.to_path_buf()),
    }
}

pub(crate) fn write_error(path: &Path, err: id3::Error) -> TagError {
    match err.kind {
        ErrorKind::Io(ref e) if e.kind() == io::ErrorKind::NotFound => {
            TagError::MissingFile(path.to_path_buf())
        }
        _ => TagError::write_failure(path, err.to_string()),
    }
}
