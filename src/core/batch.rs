//! Batch write: rewrite every file in the set, one at a time.
//!
//! Per file: read -> resolve version -> resolve fields -> resolve numbering
//! -> resolve artwork -> write.
//!
//! A failure only ends that file's processing. It's recorded in the report
//! and the batch moves on; the file set itself is never touched here.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::aggregate::FieldTable;
use super::artwork::ArtworkPolicy;
use super::error::TagError;
use super::files::FileSet;
use super::numbering;
use super::tags::{TagCodec, TagWrite};
use super::types::{FieldName, TagVersion, VersionChoice};
use super::version::{self, Target};

/// Knobs for one batch write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOptions {
    pub version: VersionChoice,
    /// Keep frames we don't model when a file's version doesn't change.
    pub keep_obscure: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    MissingFile,
    MissingTag,
    InvalidField,
    InvalidVersion,
    InvalidArtwork,
    WriteFailure,
}

#[derive(Debug)]
pub enum WriteOutcome {
    Success,
    Failure { kind: FailureKind, error: TagError },
}

impl WriteOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, WriteOutcome::Success)
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            WriteOutcome::Success => None,
            WriteOutcome::Failure { kind, .. } => Some(*kind),
        }
    }

    /// User-facing reason, `None` on success.
    pub fn reason(&self) -> Option<String> {
        let WriteOutcome::Failure { kind, error } = self else {
            return None;
        };
        Some(match kind {
            FailureKind::InvalidField => "Invalid tag error".to_string(),
            FailureKind::WriteFailure => "Write error".to_string(),
            FailureKind::MissingFile
            | FailureKind::MissingTag
            | FailureKind::InvalidVersion
            | FailureKind::InvalidArtwork => error.to_string(),
        })
    }
}

/// Overall shape of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportSummary {
    NothingToDo,
    AllSucceeded { total: usize },
    Partial { succeeded: usize, total: usize },
    AllFailed { total: usize },
}

/// Outcome of every file in one batch write, in file order.
#[derive(Debug, Default)]
pub struct WriteReport {
    entries: Vec<(PathBuf, WriteOutcome)>,
}

impl WriteReport {
    pub fn processed(&self) -> usize {
        self.entries.len()
    }

    pub fn succeeded(&self) -> usize {
        self.entries.iter().filter(|(_, o)| o.is_success()).count()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&Path, &WriteOutcome)> {
        self.entries.iter().map(|(p, o)| (p.as_path(), o))
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Path, &WriteOutcome)> {
        self.entries().filter(|(_, o)| !o.is_success())
    }

    pub fn outcome(&self, path: &Path) -> Option<&WriteOutcome> {
        self.entries.iter().find(|(p, _)| p == path).map(|(_, o)| o)
    }

    pub fn summary(&self) -> ReportSummary {
        let total = self.processed();
        let succeeded = self.succeeded();
        if total == 0 {
            ReportSummary::NothingToDo
        } else if succeeded == total {
            ReportSummary::AllSucceeded { total }
        } else if succeeded == 0 {
            ReportSummary::AllFailed { total }
        } else {
            ReportSummary::Partial { succeeded, total }
        }
    }
}

/// The message the UI pops up after a write.
impl fmt::Display for WriteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.summary() {
            ReportSummary::NothingToDo => return writeln!(f, "No files have been opened yet"),
            ReportSummary::AllSucceeded { total } => {
                return writeln!(f, "Replaced tags for all {total} files with success");
            }
            ReportSummary::AllFailed { total } => writeln!(f, "All {total} files failed:")?,
            ReportSummary::Partial { succeeded, total } => {
                writeln!(f, "{succeeded} of the {total} succeeded, but some failed:")?
            }
        }
        for (path, outcome) in self.failures() {
            writeln!(
                f,
                "{} - {}",
                path.display(),
                outcome.reason().unwrap_or_default()
            )?;
        }
        Ok(())
    }
}

/// Rewrite every file in `files`.
///
/// Numbering is allocated once, up front, from the current file order.
pub fn write_batch<C: TagCodec>(
    codec: &C,
    files: &FileSet,
    table: &FieldTable,
    artwork: &ArtworkPolicy,
    options: BatchOptions,
) -> WriteReport {
    info!(
        files = files.len(),
        version = options.version.code(),
        keep_obscure = options.keep_obscure,
        "writing tags"
    );

    let numbers = if table.numbering_enabled() {
        Some(numbering::allocate(files.len(), table.padding_enabled()))
    } else {
        None
    };

    let mut report = WriteReport::default();
    for (i, path) in files.all().iter().enumerate() {
        let numbering = numbers.as_ref().and_then(|n| n.get(i));
        let outcome = match write_one(codec, path, table, numbering, artwork, options) {
            Ok(()) => WriteOutcome::Success,
            Err((kind, error)) => {
                warn!(path = %path.display(), ?kind, %error, "file skipped");
                WriteOutcome::Failure { kind, error }
            }
        };
        report.entries.push((path.clone(), outcome));
    }

    info!(
        processed = report.processed(),
        succeeded = report.succeeded(),
        "batch write finished"
    );
    report
}

type FileResult = std::result::Result<(), (FailureKind, TagError)>;

fn write_one<C: TagCodec>(
    codec: &C,
    path: &Path,
    table: &FieldTable,
    numbering: Option<&(String, String)>,
    artwork: &ArtworkPolicy,
    options: BatchOptions,
) -> FileResult {
    // 1. read (fresh every time; an earlier write may have changed the file)
    let snap = codec.read(path).map_err(|e| match e {
        TagError::MissingFile(_) => (FailureKind::MissingFile, e),
        _ => (FailureKind::MissingTag, e),
    })?;

    // 2. version
    let target = version::resolve(snap.version, options.version, options.keep_obscure);
    let effective = match target {
        Target::Original => snap.version,
        Target::Encode(v) => v,
        Target::Unsupported(code) => {
            return Err(invalid_version(code.to_string()));
        }
    };
    if effective == TagVersion::Legacy {
        return Err(invalid_version(effective.to_string()));
    }
    debug!(path = %path.display(), ?target, "resolved version");

    // 3. free-text fields: the same literal override for every file
    let mut fields: BTreeMap<FieldName, String> = BTreeMap::new();
    for field in FieldName::ALL.into_iter().filter(|f| !f.is_numbering()) {
        let value = table
            .override_text(field)
            .unwrap_or_else(|| snap.value(field));
        fields.insert(field, value.to_string());
    }

    // 4. numbering: per file
    let (track, total) = match numbering {
        Some((track, total)) => (track.clone(), total.clone()),
        None => (
            snap.value(FieldName::Track).to_string(),
            snap.value(FieldName::TrackTotal).to_string(),
        ),
    };
    fields.insert(FieldName::Track, track);
    fields.insert(FieldName::TrackTotal, total);

    for (field, value) in &fields {
        field
            .validate(value, effective)
            .map_err(|e| (FailureKind::InvalidField, e))?;
    }

    // 5. artwork; dropped at the end of this call, success or not
    let picture = artwork
        .resolve(snap.artwork.as_ref())
        .map_err(|e| (FailureKind::InvalidArtwork, e))?;

    // 6. write
    let request = TagWrite {
        target,
        fields: &fields,
        artwork: picture.as_ref(),
    };
    codec.write(path, &request).map_err(|e| {
        let kind = match e {
            TagError::InvalidFieldValue { .. } => FailureKind::InvalidField,
            TagError::InvalidVersionRequest(_) => FailureKind::InvalidVersion,
            TagError::InvalidArtwork { .. } => FailureKind::InvalidArtwork,
            TagError::MissingFile(_) | TagError::MissingTag(_) | TagError::WriteFailure { .. } => {
                FailureKind::WriteFailure
            }
        };
        (kind, e)
    })
}

fn invalid_version(requested: String) -> (FailureKind, TagError) {
    (
        FailureKind::InvalidVersion,
        TagError::InvalidVersionRequest(requested),
    )
}
