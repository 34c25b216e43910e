//! In-memory codec: a path -> snapshot map standing in for files on disk.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::super::error::{Result, TagError};
use super::super::types::{TagSnapshot, TagVersion};
use super::super::version::Target;
use super::{TagCodec, TagWrite};

#[derive(Debug, Clone)]
enum Entry {
    Tagged(TagSnapshot),
    Untagged,
}

#[derive(Debug, Default)]
pub struct MemoryCodec {
    files: RefCell<HashMap<PathBuf, Entry>>,
    writes: RefCell<Vec<PathBuf>>,
}

impl MemoryCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a tagged file "on disk".
    pub fn insert(&self, path: impl Into<PathBuf>, snapshot: TagSnapshot) {
        self.files
            .borrow_mut()
            .insert(path.into(), Entry::Tagged(snapshot));
    }

    /// Put a file with no tag "on disk".
    pub fn insert_untagged(&self, path: impl Into<PathBuf>) {
        self.files.borrow_mut().insert(path.into(), Entry::Untagged);
    }

    /// Delete a file.
    pub fn remove(&self, path: &Path) {
        self.files.borrow_mut().remove(path);
    }

    pub fn snapshot(&self, path: &Path) -> Option<TagSnapshot> {
        match self.files.borrow().get(path) {
            Some(Entry::Tagged(s)) => Some(s.clone()),
            _ => None,
        }
    }

    /// Paths written so far, in call order.
    pub fn writes(&self) -> Vec<PathBuf> {
        self.writes.borrow().clone()
    }
}

impl TagCodec for MemoryCodec {
    fn read(&self, path: &Path) -> Result<TagSnapshot> {
        match self.files.borrow().get(path) {
            Some(Entry::Tagged(s)) => Ok(s.clone()),
            Some(Entry::Untagged) => Err(TagError::MissingTag(path.to_path_buf())),
            None => Err(TagError::MissingFile(path.to_path_buf())),
        }
    }

    fn write(&self, path: &Path, request: &TagWrite<'_>) -> Result<()> {
        let mut files = self.files.borrow_mut();
        let Some(entry) = files.get_mut(path) else {
            return Err(TagError::MissingFile(path.to_path_buf()));
        };

        let version = match (request.target, &*entry) {
            (Target::Unsupported(code), _) => {
                return Err(TagError::InvalidVersionRequest(code.to_string()));
            }
            (Target::Encode(v), _) => v,
            (Target::Original, Entry::Tagged(s)) => s.version,
            (Target::Original, Entry::Untagged) => {
                return Err(TagError::MissingTag(path.to_path_buf()));
            }
        };
        if version == TagVersion::Legacy {
            return Err(TagError::InvalidVersionRequest(version.to_string()));
        }

        let mut snap = TagSnapshot::new(version);
        for (field, value) in request.fields {
            field.validate(value, version)?;
            if !value.is_empty() {
                snap.fields.insert(*field, value.clone());
            }
        }
        snap.artwork = request.artwork.cloned();

        *entry = Entry::Tagged(snap);
        self.writes.borrow_mut().push(path.to_path_buf());
        Ok(())
    }
}
