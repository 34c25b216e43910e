//! Per-field "common value / conflicting" view across the current file set,
//! plus the user's override intent for each field.
//!
//! - A field whose values all match displays that single value.
//! - A field with differing values displays them semicolon-joined in file order.
//! - The preview ("what will be written") is derived on demand, never stored.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::{debug, warn};

use super::error::TagError;
use super::files::FileSet;
use super::numbering;
use super::tags::TagCodec;
use super::types::FieldName;

const SEPARATOR: &str = ";";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAggregate {
    pub original_display: String,
    /// Every readable file had the same value (vacuously true for an empty set).
    pub all_agree: bool,
    pub override_enabled: bool,
    /// Only meaningful while `override_enabled`.
    pub override_text: String,
}

impl Default for FieldAggregate {
    fn default() -> Self {
        Self {
            original_display: String::new(),
            all_agree: true,
            override_enabled: false,
            override_text: String::new(),
        }
    }
}

impl FieldAggregate {
    /// Free-text preview. Numbering fields go through [`FieldTable::preview`].
    pub fn preview(&self) -> &str {
        if self.override_enabled {
            &self.override_text
        } else {
            &self.original_display
        }
    }
}

/// One aggregate per field, plus the aggregated tag version.
///
/// Track and track total don't take free text:
/// - the track flag switches the batch to automatic sequential numbering
/// - the track total flag zero-pads those numbers
#[derive(Debug, Clone)]
pub struct FieldTable {
    fields: BTreeMap<FieldName, FieldAggregate>,
    version_display: String,
}

impl Default for FieldTable {
    fn default() -> Self {
        Self {
            fields: FieldName::ALL
                .iter()
                .map(|f| (*f, FieldAggregate::default()))
                .collect(),
            version_display: String::new(),
        }
    }
}

impl FieldTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: FieldName) -> &FieldAggregate {
        // Every FieldName is inserted by Default and never removed.
        &self.fields[&field]
    }

    pub fn set_override(&mut self, field: FieldName, enabled: bool, text: impl Into<String>) {
        if let Some(agg) = self.fields.get_mut(&field) {
            agg.override_enabled = enabled;
            agg.override_text = text.into();
        }
    }

    pub fn set_override_enabled(&mut self, field: FieldName, enabled: bool) {
        if let Some(agg) = self.fields.get_mut(&field) {
            agg.override_enabled = enabled;
        }
    }

    /// The literal text to write to every file, if this field is overridden.
    pub fn override_text(&self, field: FieldName) -> Option<&str> {
        let agg = self.get(field);
        agg.override_enabled.then_some(agg.override_text.as_str())
    }

    pub fn numbering_enabled(&self) -> bool {
        self.get(FieldName::Track).override_enabled
    }

    pub fn padding_enabled(&self) -> bool {
        self.get(FieldName::TrackTotal).override_enabled
    }

    /// "2.4", or "2.3;2.4" when files disagree.
    pub fn version_display(&self) -> &str {
        &self.version_display
    }

    /// What the UI shows as "will be written" for `field`.
    pub fn preview(&self, field: FieldName, file_count: usize) -> String {
        if field.is_numbering() {
            if !self.numbering_enabled() {
                return self.get(field).original_display.clone();
            }
            let (track, total) = numbering::preview(file_count, self.padding_enabled());
            return match field {
                FieldName::Track => track,
                _ => total,
            };
        }
        self.get(field).preview().to_string()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &FieldAggregate)> {
        self.fields.iter().map(|(f, a)| (*f, a))
    }
}

/// Files the refresh dropped, with the reason for each.
#[derive(Debug, Default)]
pub struct RefreshReport {
    pub warnings: Vec<TagError>,
    pub removed: Vec<PathBuf>,
}

/// Running fold of one column of values.
#[derive(Default)]
struct Fold {
    joined: String,
    last: Option<String>,
    all_agree: bool,
}

impl Fold {
    fn new() -> Self {
        Self {
            all_agree: true,
            ..Default::default()
        }
    }

    fn push(&mut self, value: &str) {
        if let Some(last) = &self.last {
            self.joined.push_str(SEPARATOR);
            if last != value {
                self.all_agree = false;
            }
        }
        self.joined.push_str(value);
        self.last = Some(value.to_string());
    }

    /// Collapse to the shared value when everything agreed.
    fn finish(self, collapse: bool) -> (String, bool) {
        match self.last {
            Some(last) if collapse && self.all_agree => (last, true),
            _ => (self.joined, self.all_agree),
        }
    }
}

/// Re-read every file and rebuild the original-value displays.
///
/// Two phases, in this order:
/// 1. Accumulate: read each file in order, joining values. Unreadable files are
///    only noted, so the pass in progress is never perturbed.
/// 2. Drop the unreadable files from `files`, and only then collapse each
///    display to its shared value where all files agreed.
///
/// Override intents are left alone.
pub fn refresh<C: TagCodec>(codec: &C, files: &mut FileSet, table: &mut FieldTable) -> RefreshReport {
    let mut report = RefreshReport::default();
    let mut folds: BTreeMap<FieldName, Fold> =
        FieldName::ALL.iter().map(|f| (*f, Fold::new())).collect();
    let mut versions = Fold::new();

    for path in files.all() {
        match codec.read(path) {
            Ok(snap) => {
                for (field, fold) in folds.iter_mut() {
                    fold.push(snap.value(*field));
                }
                versions.push(&snap.version.to_string());
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "dropping unreadable file");
                report.removed.push(path.clone());
                report.warnings.push(err);
            }
        }
    }

    for path in &report.removed {
        files.remove(path);
    }

    let collapse = !files.is_empty();
    for (field, fold) in folds {
        let (display, all_agree) = fold.finish(collapse);
        if let Some(agg) = table.fields.get_mut(&field) {
            agg.original_display = display;
            agg.all_agree = all_agree;
        }
    }
    table.version_display = versions.finish(collapse).0;

    debug!(
        files = files.len(),
        removed = report.removed.len(),
        "refreshed field aggregates"
    );
    report
}
