//! What picture (if any) a batch write embeds in each file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::{Result, TagError};
use super::types::Artwork;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ArtworkPolicy {
    /// Carry each file's existing picture through untouched.
    #[default]
    Keep,
    /// Embed the image at this path in every file.
    Replace(PathBuf),
    /// Strip pictures.
    Clear,
}

impl ArtworkPolicy {
    /// Resolve the picture to emit for one file, given what it already has.
    ///
    /// `Replace` loads the image fresh for every file. The returned buffer is
    /// the codec's staging copy: it lives for one write attempt and is dropped
    /// with the caller's scope whether the write succeeds or not.
    pub fn resolve(&self, existing: Option<&Artwork>) -> Result<Option<Artwork>> {
        match self {
            ArtworkPolicy::Keep => Ok(existing.cloned()),
            ArtworkPolicy::Clear => Ok(None),
            ArtworkPolicy::Replace(path) => load_image(path).map(Some),
        }
    }
}

/// Read an image file and tag it with the MIME type sniffed from its bytes.
/// Only raster formats the `image` crate recognises are accepted.
pub fn load_image(path: &Path) -> Result<Artwork> {
    let data = fs::read(path).map_err(|e| TagError::InvalidArtwork {
        path: path.to_path_buf(),
        reason: match e.kind() {
            io::ErrorKind::NotFound => "file not found".to_string(),
            _ => e.to_string(),
        },
    })?;

    let format = image::guess_format(&data).map_err(|e| TagError::InvalidArtwork {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mime_type = format.to_mime_type().to_string();
    debug!(path = %path.display(), %mime_type, bytes = data.len(), "loaded artwork");

    Ok(Artwork { mime_type, data })
}
