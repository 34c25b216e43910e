//! core/tags/read.rs
//! Read ID3 tags from an MP3 and convert them into a `TagSnapshot`.

use std::path::Path;

use id3::Tag;

use super::super::error::Result;
use super::super::types::{FieldName, TagSnapshot};
use super::art::first_picture;
use super::util::{from_id3_version, read_error, split_slash_pair, text_frame};

pub(crate) fn read_snapshot(path: &Path) -> Result<TagSnapshot> {
    let tag = Tag::read_from_path(path).map_err(|e| read_error(path, e))?;
    Ok(build_snapshot(&tag))
}

pub(crate) fn build_snapshot(tag: &Tag) -> TagSnapshot {
    let mut snap = TagSnapshot::new(from_id3_version(tag.version()));

    let mut put = |field: FieldName, value: Option<String>| {
        if let Some(v) = value.filter(|v| !v.is_empty()) {
            snap.fields.insert(field, v);
        }
    };

    put(FieldName::Title, text_frame(tag, "TIT2"));
    put(FieldName::Artist, text_frame(tag, "TPE1"));
    put(FieldName::Date, read_date(tag));
    put(FieldName::AlbumArtist, text_frame(tag, "TPE2"));
    put(FieldName::Album, text_frame(tag, "TALB"));
    put(FieldName::Composer, text_frame(tag, "TCOM"));
    put(FieldName::Genre, text_frame(tag, "TCON"));
    put(FieldName::Comment, plain_comment(tag));
    put(FieldName::Grouping, text_frame(tag, "TIT1"));

    // Numbers stay as text so zero padding survives a round trip.
    if let Some(trck) = text_frame(tag, "TRCK") {
        let (n, total) = split_slash_pair(&trck);
        put(FieldName::Track, Some(n));
        put(FieldName::TrackTotal, Some(total));
    }
    if let Some(tpos) = text_frame(tag, "TPOS") {
        let (n, total) = split_slash_pair(&tpos);
        put(FieldName::Disc, Some(n));
        put(FieldName::DiscTotal, Some(total));
    }

    snap.artwork = first_picture(tag);
    snap
}

/// TDRC on v2.4; TYER plus TDAT (DDMM) and TIME (HHMM) on older tags.
fn read_date(tag: &Tag) -> Option<String> {
    if let Some(tdrc) = text_frame(tag, "TDRC") {
        return Some(tdrc);
    }
    let year = text_frame(tag, "TYER")?;
    let Some(ddmm) = text_frame(tag, "TDAT").filter(|s| is_four_digits(s)) else {
        return Some(year);
    };
    let date = format!("{}-{}-{}", year, &ddmm[2..], &ddmm[..2]);
    match text_frame(tag, "TIME").filter(|s| is_four_digits(s)) {
        Some(hhmm) => Some(format!("{}T{}:{}", date, &hhmm[..2], &hhmm[2..])),
        None => Some(date),
    }
}

fn is_four_digits(s: &str) -> bool {
    s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit())
}

/// Text of the first COMM frame with an empty description. Described ones
/// (`iTunNORM`, `iTunSMPB`, ...) are other software's data, not the user's comment.
pub(crate) fn plain_comment(tag: &Tag) -> Option<String> {
    tag.comments()
        .find(|c| c.description.is_empty())
        .map(|c| c.text.clone())
}
