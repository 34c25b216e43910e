//! The ordered, duplicate-free set of files selected for a batch.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Insertion order is preserved and never changed; duplicates are dropped on add.
///
/// Adding or removing does NOT refresh aggregates. Callers reconcile afterwards
/// (see `Session::add_files`).
#[derive(Debug, Clone, Default)]
pub struct FileSet {
    order: Vec<PathBuf>,
    seen: HashSet<PathBuf>,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append every path not already present. Returns how many were new.
    pub fn add<I, P>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut added = 0;
        for path in paths {
            let path = path.into();
            if self.seen.insert(path.clone()) {
                self.order.push(path);
                added += 1;
            }
        }
        added
    }

    /// Remove a path, keeping the relative order of the rest.
    pub fn remove(&mut self, path: &Path) -> bool {
        if !self.seen.remove(path) {
            return false;
        }
        self.order.retain(|p| p != path);
        true
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.seen.contains(path)
    }

    pub fn all(&self) -> &[PathBuf] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// 0-based position of `path`.
    pub fn position(&self, path: &Path) -> Option<usize> {
        self.order.iter().position(|p| p == path)
    }
}
