//! id3batch
//!
//! # What this crate is
//! The engine behind a batch ID3 tag editor. A desktop UI (not part of this
//! crate) lets the user pick a bunch of `.mp3` files, shows what their tags
//! have in common, lets them override fields, and rewrites every file in a
//! chosen ID3v2 version. This crate does everything except the window.
//!
//! # Workflow
//! - `Session::add_files` adds paths and reconciles their tags into a
//!   `FieldTable` (one common value per field, or the values joined with `;`).
//! - The UI toggles overrides on the table and shows `Session::preview`.
//! - `Session::write` rewrites every file and returns a `WriteReport` whose
//!   `Display` is the message to show the user.
//!
//! # Architecture constraints (on purpose)
//! - Tag IO goes through the `TagCodec` trait; `Id3Codec` is the real one.
//! - Single-threaded and synchronous: batches are small.
//! - Errors are per file; a batch always runs to the end.

pub mod core;

pub use crate::core::Session;
pub use crate::core::aggregate::{FieldAggregate, FieldTable, RefreshReport};
pub use crate::core::artwork::ArtworkPolicy;
pub use crate::core::batch::{BatchOptions, FailureKind, ReportSummary, WriteOutcome, WriteReport};
pub use crate::core::error::{Result, TagError};
pub use crate::core::files::FileSet;
pub use crate::core::tags::{Id3Codec, TagCodec, TagWrite};
#[cfg(feature = "test-codec")]
pub use crate::core::tags::MemoryCodec;
pub use crate::core::types::{Artwork, FieldName, TagSnapshot, TagVersion, VersionChoice};
pub use crate::core::version::Target;
