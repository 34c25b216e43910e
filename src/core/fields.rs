//! Version-aware validation of field values.
//!
//! Runs before anything touches the codec, so a bad override fails the file
//! with `InvalidFieldValue` instead of producing a half-written tag.

use id3::Timestamp;

use super::error::{Result, TagError};
use super::types::{FieldName, TagVersion};

impl FieldName {
    /// Check that `value` can be encoded for this field in `version`.
    /// Empty values are always fine: they remove the frame.
    pub fn validate(self, value: &str, version: TagVersion) -> Result<()> {
        if value.is_empty() {
            return Ok(());
        }

        let ok = !value.contains('\0')
            && match self {
                FieldName::Track | FieldName::TrackTotal | FieldName::Disc | FieldName::DiscTotal => {
                    is_number(value)
                }
                FieldName::Date => is_date(value, version),
                _ => true,
            };

        if ok {
            Ok(())
        } else {
            Err(TagError::InvalidFieldValue {
                field: self,
                value: value.to_string(),
                version,
            })
        }
    }
}

fn is_number(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

/// v2.4 stores a full timestamp (TDRC). Older versions split it into
/// TYER/TDAT/TIME, where the time is HHMM: hour and minute together, no seconds.
fn is_date(s: &str, version: TagVersion) -> bool {
    let Ok(ts) = s.parse::<Timestamp>() else {
        return false;
    };
    if !(0..=9999).contains(&ts.year) {
        return false;
    }
    match version {
        TagVersion::V24 | TagVersion::Legacy => true,
        TagVersion::V22 | TagVersion::V23 => {
            ts.second.is_none() && ts.hour.is_some() == ts.minute.is_some()
        }
    }
}
