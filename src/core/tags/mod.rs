//! core/tags/mod.rs
//!
//! Tag codec seam.
//! Public API:
//! - [`TagCodec`] is what the engine talks to: read a snapshot, write a tag.
//! - [`Id3Codec`] implements it on top of the `id3` crate.
//! - `MemoryCodec` (tests and the `test-codec` feature) keeps tags in memory.

mod art;
#[cfg(any(test, feature = "test-codec"))]
mod memory;
mod read;
mod util;
mod write;

use std::collections::BTreeMap;
use std::path::Path;

use super::error::Result;
use super::types::{Artwork, FieldName, TagSnapshot};
use super::version::Target;

#[cfg(any(test, feature = "test-codec"))]
pub use memory::MemoryCodec;

/// Everything a codec needs to emit one file's tag.
///
/// `fields` holds every field, numbering included; an empty string removes
/// the frame. `artwork: None` means the file ends up with no picture.
#[derive(Debug, Clone)]
pub struct TagWrite<'a> {
    pub target: Target,
    pub fields: &'a BTreeMap<FieldName, String>,
    pub artwork: Option<&'a Artwork>,
}

pub trait TagCodec {
    /// Fails with `MissingFile` or `MissingTag`.
    fn read(&self, path: &Path) -> Result<TagSnapshot>;

    /// Fails with `MissingFile`, `InvalidFieldValue`, `InvalidVersionRequest`
    /// or `WriteFailure`.
    fn write(&self, path: &Path, request: &TagWrite<'_>) -> Result<()>;
}

/// ID3v2 codec backed by the `id3` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Id3Codec;

impl TagCodec for Id3Codec {
    fn read(&self, path: &Path) -> Result<TagSnapshot> {
        read::read_snapshot(path)
    }

    fn write(&self, path: &Path, request: &TagWrite<'_>) -> Result<()> {
        write::write_tag(path, request)
    }
}
