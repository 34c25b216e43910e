//! core/tags/write.rs
//! Write a resolved field set back to an MP3 as an ID3v2 tag.

use std::collections::BTreeMap;
use std::path::Path;

use id3::frame::Comment;
use id3::{Tag, TagLike, Timestamp};

use super::super::error::{Result, TagError};
use super::super::types::{FieldName, TagVersion};
use super::super::version::Target;
use super::TagWrite;
use super::art::set_picture;
use super::read::plain_comment;
use super::util::{
    from_id3_version, join_slash_pair, read_error, text_frame, to_id3_version, write_error,
};

/// Write one file.
///
/// - `Target::Original` re-reads the file and edits its tag in place, so
///   frames outside the named fields survive.
/// - `Target::Encode(v)` starts from an empty tag.
///
/// Frames are only touched when their value changes, so rewriting a tag with
/// its own values is a no-op at the frame level.
pub(crate) fn write_tag(path: &Path, request: &TagWrite<'_>) -> Result<()> {
    let (mut tag, version) = match request.target {
        Target::Unsupported(code) => {
            return Err(TagError::InvalidVersionRequest(code.to_string()));
        }
        Target::Original => {
            let tag = Tag::read_from_path(path).map_err(|e| read_error(path, e))?;
            let version = tag.version();
            (tag, version)
        }
        Target::Encode(v) => {
            let version = to_id3_version(v)
                .ok_or_else(|| TagError::InvalidVersionRequest(v.to_string()))?;
            if !path.is_file() {
                return Err(TagError::MissingFile(path.to_path_buf()));
            }
            (Tag::new(), version)
        }
    };

    apply_fields(&mut tag, from_id3_version(version), request.fields)?;
    set_picture(&mut tag, request.artwork);

    tag.write_to_path(path, version)
        .map_err(|e| write_error(path, e))
}

fn apply_fields(
    tag: &mut Tag,
    version: TagVersion,
    fields: &BTreeMap<FieldName, String>,
) -> Result<()> {
    let get = |f: FieldName| fields.get(&f).map(String::as_str).unwrap_or("");

    set_text(tag, "TIT2", get(FieldName::Title));
    set_text(tag, "TPE1", get(FieldName::Artist));
    set_text(tag, "TPE2", get(FieldName::AlbumArtist));
    set_text(tag, "TALB", get(FieldName::Album));
    set_text(tag, "TCOM", get(FieldName::Composer));
    set_text(tag, "TCON", get(FieldName::Genre));
    set_text(tag, "TIT1", get(FieldName::Grouping));

    set_slash_pair(tag, "TRCK", get(FieldName::Track), get(FieldName::TrackTotal));
    set_slash_pair(tag, "TPOS", get(FieldName::Disc), get(FieldName::DiscTotal));

    set_date(tag, version, get(FieldName::Date))?;
    set_comment(tag, get(FieldName::Comment));

    Ok(())
}

/// Set/remove a plain text frame (T***); untouched if already equal.
fn set_text(tag: &mut Tag, id: &str, value: &str) {
    if value.is_empty() {
        let _ = tag.remove(id); // TagLike::remove returns Vec<Frame>; discard it
        return;
    }
    if text_frame(tag, id).as_deref() != Some(value) {
        tag.set_text(id, value);
    }
}

/// Write TRCK/TPOS as "n" or "n/total" (or remove if both are empty).
fn set_slash_pair(tag: &mut Tag, id: &str, n: &str, total: &str) {
    match join_slash_pair(n, total) {
        Some(text) => set_text(tag, id, &text),
        None => {
            let _ = tag.remove(id);
        }
    }
}

/// v2.4 keeps the whole timestamp in TDRC. v2.2/v2.3 split it into
/// TYER (YYYY), TDAT (DDMM) and TIME (HHMM).
fn set_date(tag: &mut Tag, version: TagVersion, value: &str) -> Result<()> {
    match version {
        TagVersion::V24 | TagVersion::Legacy => {
            for id in ["TYER", "TDAT", "TIME"] {
                let _ = tag.remove(id);
            }
            set_text(tag, "TDRC", value);
        }
        TagVersion::V22 | TagVersion::V23 => {
            let _ = tag.remove("TDRC");
            if value.is_empty() {
                for id in ["TYER", "TDAT", "TIME"] {
                    let _ = tag.remove(id);
                }
                return Ok(());
            }

            let ts = value
                .parse::<Timestamp>()
                .map_err(|_| TagError::InvalidFieldValue {
                    field: FieldName::Date,
                    value: value.to_string(),
                    version,
                })?;

            set_text(tag, "TYER", &format!("{:04}", ts.year));
            match (ts.month, ts.day) {
                (Some(m), Some(d)) => set_text(tag, "TDAT", &format!("{d:02}{m:02}")),
                _ => {
                    let _ = tag.remove("TDAT");
                }
            }
            match (ts.hour, ts.minute) {
                (Some(h), Some(m)) => set_text(tag, "TIME", &format!("{h:02}{m:02}")),
                _ => {
                    let _ = tag.remove("TIME");
                }
            }
        }
    }
    Ok(())
}

/// Comment (COMM with an empty description). Described COMM frames such as
/// `iTunNORM` belong to other software and are never touched.
fn set_comment(tag: &mut Tag, value: &str) {
    if plain_comment(tag).as_deref().unwrap_or("") == value {
        return;
    }

    tag.remove_comment(Some(""), None);
    if !value.is_empty() {
        let _ = tag.add_frame(Comment {
            lang: "eng".to_string(),
            description: String::new(),
            text: value.to_string(),
        });
    }
}
