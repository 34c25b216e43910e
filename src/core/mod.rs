//! core/mod.rs
//!
//! The brain of the tag editor:
//! - Keep the ordered set of files being edited
//! - Reconcile their tags into one per-field view (common value or conflict)
//! - Rewrite every file in a chosen ID3 version, one file's failure never
//!   stopping the others
//!
//! The pipeline is explicit:
//!   (A) mutate the file set        -> `FileSet::add` / `FileSet::remove`
//!   (B) reconcile                  -> `aggregate::refresh`
//!   (C) the UI sets override intents on the `FieldTable`
//!   (D) write                      -> `batch::write_batch` -> `WriteReport`
//!   (E) reconcile again
//!
//! [`Session`] bundles that state so nothing lives in globals; the UI keeps one
//! and calls into it. Everything is synchronous and runs file by file.

pub mod aggregate;
pub mod artwork;
pub mod batch;
pub mod error;
pub mod fields;
pub mod files;
pub mod numbering;
pub mod tags;
pub mod types;
pub mod version;

use std::path::PathBuf;

use tracing::info;

use aggregate::{FieldTable, RefreshReport};
use artwork::ArtworkPolicy;
use batch::{BatchOptions, WriteReport};
use files::FileSet;
use tags::TagCodec;
use types::{FieldName, VersionChoice};

/// One editing session: the files, the per-field view and the write settings.
#[derive(Debug)]
pub struct Session<C: TagCodec> {
    codec: C,
    files: FileSet,
    fields: FieldTable,
    /// Keep frames we don't model for files whose version doesn't change.
    pub keep_obscure: bool,
    pub artwork: ArtworkPolicy,
}

impl<C: TagCodec> Session<C> {
    pub fn new(codec: C) -> Self {
        Self {
            codec,
            files: FileSet::new(),
            fields: FieldTable::new(),
            keep_obscure: false,
            artwork: ArtworkPolicy::Keep,
        }
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub fn files(&self) -> &FileSet {
        &self.files
    }

    pub fn fields(&self) -> &FieldTable {
        &self.fields
    }

    /// Override intents are set here.
    pub fn fields_mut(&mut self) -> &mut FieldTable {
        &mut self.fields
    }

    /// Whether there is anything that quitting would throw away.
    pub fn has_files(&self) -> bool {
        !self.files.is_empty()
    }

    /// Add files (duplicates ignored), then reconcile.
    pub fn add_files<I, P>(&mut self, paths: I) -> RefreshReport
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let added = self.files.add(paths);
        info!(added, total = self.files.len(), "files added");
        self.refresh()
    }

    /// Re-read every file; unreadable ones are dropped and reported.
    pub fn refresh(&mut self) -> RefreshReport {
        aggregate::refresh(&self.codec, &mut self.files, &mut self.fields)
    }

    /// Preview of what `field` will be written as.
    pub fn preview(&self, field: FieldName) -> String {
        self.fields.preview(field, self.files.len())
    }

    /// Write every file in `version`, then reconcile so the displays show
    /// what is now on disk.
    pub fn write(&mut self, version: VersionChoice) -> (WriteReport, RefreshReport) {
        let options = BatchOptions {
            version,
            keep_obscure: self.keep_obscure,
        };
        let report =
            batch::write_batch(&self.codec, &self.files, &self.fields, &self.artwork, options);
        let refreshed = self.refresh();
        (report, refreshed)
    }
}
