//! Decide, per file, which tag version a batch write emits.

use super::types::{TagVersion, VersionChoice};

/// What the codec should encode one file as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Rewrite the file's own parsed tag in place, keeping frames we don't model.
    Original,
    /// Build a fresh tag in this version.
    Encode(TagVersion),
    /// The requested menu code names no version.
    Unsupported(u8),
}

/// Pure: depends only on its inputs, so it runs independently for every file.
pub fn resolve(current: TagVersion, requested: VersionChoice, keep_obscure: bool) -> Target {
    if requested.as_version() == Some(current) && keep_obscure {
        return Target::Original;
    }
    match requested {
        VersionChoice::Original => Target::Encode(current),
        VersionChoice::Unsupported(code) => Target::Unsupported(code),
        other => match other.as_version() {
            Some(v) => Target::Encode(v),
            None => Target::Encode(current),
        },
    }
}
