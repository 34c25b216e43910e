//! Integration tests for the batch engine on real ID3 tags.
//!
//! Each test builds a few tiny "mp3" files in a temp dir (a few bytes of
//! payload, optionally behind an ID3v2 tag written with the `id3` crate) and
//! drives a `Session<Id3Codec>` over them.

use std::fs;
use std::path::{Path, PathBuf};

use id3::frame::{Comment, Content, Picture, PictureType};
use id3::{Tag, TagLike, Version};
use id3batch::{
    ArtworkPolicy, FailureKind, FieldName, Id3Codec, ReportSummary, Session, TagCodec, TagError,
    TagVersion, VersionChoice,
};
use tempfile::TempDir;

const PAYLOAD: &[u8] = b"\xff\xfb\x90\x00not really mpeg audio";
const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR\0\0\0\x01";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Write an untagged audio file.
fn bare_file(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, PAYLOAD).expect("write payload");
    path
}

/// Write an audio file carrying `tag` in `version`.
fn tagged_file(dir: &Path, name: &str, tag: &Tag, version: Version) -> PathBuf {
    let path = bare_file(dir, name);
    tag.write_to_path(&path, version).expect("write tag");
    path
}

fn titled(title: &str) -> Tag {
    let mut tag = Tag::new();
    tag.set_text("TIT2", title);
    tag
}

fn text(path: &Path, id: &str) -> Option<String> {
    let tag = Tag::read_from_path(path).expect("read back");
    match tag.get(id)?.content() {
        Content::Text(s) => Some(s.clone()),
        _ => None,
    }
}

fn comment(description: &str, text: &str) -> Comment {
    Comment {
        lang: "eng".to_string(),
        description: description.to_string(),
        text: text.to_string(),
    }
}

#[test]
fn title_override_scenario() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let a = tagged_file(dir.path(), "A.mp3", &titled("X"), Version::Id3v24);
    let b = tagged_file(dir.path(), "B.mp3", &titled("Y"), Version::Id3v24);

    let mut session = Session::new(Id3Codec);
    let refreshed = session.add_files([a.clone(), b.clone()]);
    assert!(refreshed.warnings.is_empty());
    assert_eq!(session.fields().get(FieldName::Title).original_display, "X;Y");
    assert!(!session.fields().get(FieldName::Title).all_agree);

    session.fields_mut().set_override(FieldName::Title, true, "Z");
    assert_eq!(session.preview(FieldName::Title), "Z");

    let (report, _) = session.write(VersionChoice::Original);

    assert_eq!(report.summary(), ReportSummary::AllSucceeded { total: 2 });
    assert_eq!(text(&a, "TIT2").as_deref(), Some("Z"));
    assert_eq!(text(&b, "TIT2").as_deref(), Some("Z"));
    assert_eq!(session.fields().get(FieldName::Title).original_display, "Z");
}

#[test]
fn shared_values_collapse_and_missing_frames_join_empty() {
    let dir = TempDir::new().unwrap();
    let mut tag = titled("Same");
    tag.set_text("TALB", "Album");
    let a = tagged_file(dir.path(), "a.mp3", &tag, Version::Id3v24);
    let b = tagged_file(dir.path(), "b.mp3", &titled("Same"), Version::Id3v23);

    let mut session = Session::new(Id3Codec);
    session.add_files([a, b]);

    let fields = session.fields();
    assert_eq!(fields.get(FieldName::Title).original_display, "Same");
    assert!(fields.get(FieldName::Title).all_agree);
    assert_eq!(fields.get(FieldName::Album).original_display, "Album;");
    assert_eq!(fields.version_display(), "2.4;2.3");
}

#[test]
fn unreadable_files_are_dropped_on_refresh() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let good = tagged_file(dir.path(), "good.mp3", &titled("X"), Version::Id3v24);
    let untagged = bare_file(dir.path(), "untagged.mp3");
    let missing = dir.path().join("missing.mp3");

    let mut session = Session::new(Id3Codec);
    let refreshed = session.add_files([good.clone(), untagged.clone(), missing.clone()]);

    assert_eq!(refreshed.removed, vec![untagged, missing]);
    assert!(matches!(refreshed.warnings[0], TagError::MissingTag(_)));
    assert!(matches!(refreshed.warnings[1], TagError::MissingFile(_)));
    assert_eq!(session.files().all(), &[good]);
    assert_eq!(session.fields().get(FieldName::Title).original_display, "X");
}

#[test]
fn sequential_numbering_with_padding() {
    let dir = TempDir::new().unwrap();
    let paths: Vec<PathBuf> = ["1.mp3", "2.mp3", "3.mp3"]
        .iter()
        .map(|n| tagged_file(dir.path(), n, &titled(n), Version::Id3v24))
        .collect();

    let mut session = Session::new(Id3Codec);
    session.add_files(paths.clone());
    session.fields_mut().set_override_enabled(FieldName::Track, true);
    session.fields_mut().set_override_enabled(FieldName::TrackTotal, true);
    assert_eq!(session.preview(FieldName::Track), "01;02;03");

    let (report, _) = session.write(VersionChoice::Original);

    assert_eq!(report.summary(), ReportSummary::AllSucceeded { total: 3 });
    for (path, expected) in paths.iter().zip(["01/3", "02/3", "03/3"]) {
        assert_eq!(text(path, "TRCK").as_deref(), Some(expected));
    }
    assert_eq!(session.fields().get(FieldName::TrackTotal).original_display, "3");
}

#[test]
fn deleted_file_does_not_abort_the_batch() {
    let dir = TempDir::new().unwrap();
    let a = tagged_file(dir.path(), "A.mp3", &titled("X"), Version::Id3v24);
    let b = tagged_file(dir.path(), "B.mp3", &titled("Y"), Version::Id3v24);

    let mut session = Session::new(Id3Codec);
    session.add_files([a.clone(), b.clone()]);
    fs::remove_file(&a).unwrap();

    let (report, refreshed) = session.write(VersionChoice::V23);

    assert_eq!(report.processed(), 2);
    assert_eq!(
        report.outcome(&a).and_then(|o| o.failure_kind()),
        Some(FailureKind::MissingFile)
    );
    assert!(report.outcome(&b).is_some_and(|o| o.is_success()));
    assert_eq!(report.summary(), ReportSummary::Partial { succeeded: 1, total: 2 });
    assert!(report.to_string().contains("missing file"));

    // the refresh after the write is what drops it
    assert_eq!(refreshed.removed, vec![a]);
    assert_eq!(Tag::read_from_path(&b).unwrap().version(), Version::Id3v23);
}

#[test]
fn rewriting_without_changes_round_trips() {
    let dir = TempDir::new().unwrap();
    let mut tag = titled("Song");
    tag.set_text("TPE1", "Artist");
    tag.set_text("TDRC", "2001-05-02");
    tag.set_text("TRCK", "03/12");
    tag.set_text("TPOS", "1/2");
    let _ = tag.add_frame(comment("", "liner notes"));
    let _ = tag.add_frame(Picture {
        mime_type: "image/png".to_string(),
        picture_type: PictureType::CoverFront,
        description: String::new(),
        data: PNG_MAGIC.to_vec(),
    });
    let path = tagged_file(dir.path(), "song.mp3", &tag, Version::Id3v24);

    let before = Id3Codec.read(&path).unwrap();
    assert_eq!(before.value(FieldName::Track), "03");
    assert_eq!(before.value(FieldName::DiscTotal), "2");

    let mut session = Session::new(Id3Codec);
    session.add_files([path.clone()]);
    let (report, _) = session.write(VersionChoice::Original);
    assert_eq!(report.summary(), ReportSummary::AllSucceeded { total: 1 });

    assert_eq!(Id3Codec.read(&path).unwrap(), before);
}

#[test]
fn keep_obscure_preserves_unmodelled_frames() {
    let dir = TempDir::new().unwrap();
    let mut tag = titled("Song");
    tag.set_text("TBPM", "128");
    let kept = tagged_file(dir.path(), "kept.mp3", &tag, Version::Id3v24);
    let fresh = tagged_file(dir.path(), "fresh.mp3", &tag, Version::Id3v24);

    let mut session = Session::new(Id3Codec);
    session.keep_obscure = true;
    session.add_files([kept.clone()]);
    session.write(VersionChoice::V24);
    assert_eq!(text(&kept, "TBPM").as_deref(), Some("128"));

    let mut session = Session::new(Id3Codec);
    session.add_files([fresh.clone()]);
    session.write(VersionChoice::V24);
    assert_eq!(text(&fresh, "TBPM"), None);
    assert_eq!(text(&fresh, "TIT2").as_deref(), Some("Song"));
}

#[test]
fn converting_to_another_version() {
    let dir = TempDir::new().unwrap();
    let mut tag = titled("Song");
    tag.set_text("TRCK", "7");
    let path = tagged_file(dir.path(), "song.mp3", &tag, Version::Id3v24);

    let mut session = Session::new(Id3Codec);
    session.keep_obscure = true;
    session.add_files([path.clone()]);
    let (report, _) = session.write(VersionChoice::V23);

    assert_eq!(report.summary(), ReportSummary::AllSucceeded { total: 1 });
    let snap = Id3Codec.read(&path).unwrap();
    assert_eq!(snap.version, TagVersion::V23);
    assert_eq!(snap.value(FieldName::Title), "Song");
    assert_eq!(snap.value(FieldName::Track), "7");
    assert_eq!(session.fields().version_display(), "2.3");
}

#[test]
fn timestamped_date_survives_conversion_to_v23() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let mut tag = titled("Song");
    tag.set_text("TDRC", "2001-05-02T10:30");
    let path = tagged_file(dir.path(), "a.mp3", &tag, Version::Id3v24);

    let mut session = Session::new(Id3Codec);
    session.add_files([path.clone()]);
    let (report, _) = session.write(VersionChoice::V23);

    assert_eq!(report.summary(), ReportSummary::AllSucceeded { total: 1 });
    assert_eq!(text(&path, "TYER").as_deref(), Some("2001"));
    assert_eq!(text(&path, "TDAT").as_deref(), Some("0205"));
    assert_eq!(text(&path, "TIME").as_deref(), Some("1030"));
    assert_eq!(Id3Codec.read(&path).unwrap().value(FieldName::Date), "2001-05-02T10:30");
    assert_eq!(session.fields().get(FieldName::Date).original_display, "2001-05-02T10:30");

    let (report, _) = session.write(VersionChoice::V24);
    assert_eq!(report.summary(), ReportSummary::AllSucceeded { total: 1 });
    assert_eq!(text(&path, "TDRC").as_deref(), Some("2001-05-02T10:30"));
}

#[test]
fn comment_field_is_the_undescribed_comm_frame() {
    let dir = TempDir::new().unwrap();
    let mut tag = titled("Song");
    let _ = tag.add_frame(comment("iTunNORM", " 0000 1111"));
    let _ = tag.add_frame(comment("", "real comment"));
    let path = tagged_file(dir.path(), "a.mp3", &tag, Version::Id3v24);

    assert_eq!(
        Id3Codec.read(&path).unwrap().get(FieldName::Comment),
        Some("real comment")
    );

    let mut session = Session::new(Id3Codec);
    session.keep_obscure = true;
    session.add_files([path.clone()]);
    session.fields_mut().set_override(FieldName::Comment, true, "edited");
    let (report, _) = session.write(VersionChoice::Original);
    assert_eq!(report.summary(), ReportSummary::AllSucceeded { total: 1 });

    let back = Tag::read_from_path(&path).unwrap();
    let mut comments: Vec<(String, String)> = back
        .comments()
        .map(|c| (c.description.clone(), c.text.clone()))
        .collect();
    comments.sort();
    assert_eq!(
        comments,
        vec![
            (String::new(), "edited".to_string()),
            ("iTunNORM".to_string(), " 0000 1111".to_string()),
        ]
    );
    assert_eq!(session.fields().get(FieldName::Comment).original_display, "edited");
}

#[test]
fn artwork_replace_and_clear() {
    let dir = TempDir::new().unwrap();
    let path = tagged_file(dir.path(), "song.mp3", &titled("Song"), Version::Id3v24);
    let cover = dir.path().join("cover.png");
    fs::write(&cover, PNG_MAGIC).unwrap();

    let mut session = Session::new(Id3Codec);
    session.add_files([path.clone()]);

    session.artwork = ArtworkPolicy::Replace(cover);
    let (report, _) = session.write(VersionChoice::Original);
    assert_eq!(report.summary(), ReportSummary::AllSucceeded { total: 1 });
    let art = Id3Codec.read(&path).unwrap().artwork.expect("picture embedded");
    assert_eq!(art.mime_type, "image/png");
    assert_eq!(art.data, PNG_MAGIC);

    session.artwork = ArtworkPolicy::Keep;
    session.fields_mut().set_override(FieldName::Album, true, "New");
    session.write(VersionChoice::V23);
    assert!(Id3Codec.read(&path).unwrap().artwork.is_some());

    session.artwork = ArtworkPolicy::Clear;
    session.write(VersionChoice::Original);
    assert!(Id3Codec.read(&path).unwrap().artwork.is_none());
}

#[test]
fn bad_requests_fail_per_file_and_leave_files_alone() {
    let dir = TempDir::new().unwrap();
    let a = tagged_file(dir.path(), "a.mp3", &titled("X"), Version::Id3v24);
    let b = tagged_file(dir.path(), "b.mp3", &titled("Y"), Version::Id3v24);

    let mut session = Session::new(Id3Codec);
    session.add_files([a.clone(), b.clone()]);

    let (report, _) = session.write(VersionChoice::from_code(9));
    assert_eq!(report.summary(), ReportSummary::AllFailed { total: 2 });
    for (_, outcome) in report.entries() {
        assert_eq!(outcome.reason().as_deref(), Some("Invalid version 9"));
    }

    session.fields_mut().set_override(FieldName::Date, true, "someday");
    let (report, _) = session.write(VersionChoice::Original);
    assert_eq!(report.summary(), ReportSummary::AllFailed { total: 2 });
    assert!(report.to_string().contains("Invalid tag error"));

    assert_eq!(text(&a, "TIT2").as_deref(), Some("X"));
    assert_eq!(text(&b, "TIT2").as_deref(), Some("Y"));
}
