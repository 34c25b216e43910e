//! Core data types shared between the engine and the UI collaborator.
//!
//! Rule of thumb:
//! - These types should be "boring bags of data"
//! - No filesystem code
//! - No tag parsing code
//!
//! `TagSnapshot` represents ONE audio file's tag as it was on disk at read time.

use std::collections::BTreeMap;
use std::fmt;

/// The semantic fields the engine reconciles across a batch.
///
/// Order matters: it is the order the UI lists them in, and the order
/// the batch writer applies them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldName {
    Title,
    Artist,
    Date,
    AlbumArtist,
    Album,
    Track,
    TrackTotal,
    Disc,
    DiscTotal,
    Composer,
    Genre,
    Comment,
    Grouping,
}

impl FieldName {
    pub const ALL: [FieldName; 13] = [
        FieldName::Title,
        FieldName::Artist,
        FieldName::Date,
        FieldName::AlbumArtist,
        FieldName::Album,
        FieldName::Track,
        FieldName::TrackTotal,
        FieldName::Disc,
        FieldName::DiscTotal,
        FieldName::Composer,
        FieldName::Genre,
        FieldName::Comment,
        FieldName::Grouping,
    ];

    /// Snake-case key, e.g. `album_artist`.
    pub fn key(self) -> &'static str {
        match self {
            FieldName::Title => "title",
            FieldName::Artist => "artist",
            FieldName::Date => "date",
            FieldName::AlbumArtist => "album_artist",
            FieldName::Album => "album",
            FieldName::Track => "track",
            FieldName::TrackTotal => "track_total",
            FieldName::Disc => "disc",
            FieldName::DiscTotal => "disc_total",
            FieldName::Composer => "composer",
            FieldName::Genre => "genre",
            FieldName::Comment => "comment",
            FieldName::Grouping => "grouping",
        }
    }

    /// Human label, e.g. `Album Artist`.
    pub fn label(self) -> String {
        self.key()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Track and track total are allocated per file instead of taking free text.
    pub fn is_numbering(self) -> bool {
        matches!(self, FieldName::Track | FieldName::TrackTotal)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Tag container revision a file is currently encoded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagVersion {
    V22,
    V23,
    V24,
    /// Anything the codec recognises but cannot re-encode (e.g. ID3v1 only).
    Legacy,
}

impl fmt::Display for TagVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagVersion::V22 => f.write_str("2.2"),
            TagVersion::V23 => f.write_str("2.3"),
            TagVersion::V24 => f.write_str("2.4"),
            TagVersion::Legacy => f.write_str("legacy"),
        }
    }
}

/// The version requested for a whole batch write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionChoice {
    /// Keep each file's own version.
    #[default]
    Original,
    V22,
    V23,
    V24,
    /// A menu code outside 0/2/3/4. Every file in the batch fails with it.
    Unsupported(u8),
}

impl VersionChoice {
    /// Map the UI's numeric menu codes (0 = original, 2/3/4 = ID3v2.x).
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => VersionChoice::Original,
            2 => VersionChoice::V22,
            3 => VersionChoice::V23,
            4 => VersionChoice::V24,
            n => VersionChoice::Unsupported(n),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            VersionChoice::Original => 0,
            VersionChoice::V22 => 2,
            VersionChoice::V23 => 3,
            VersionChoice::V24 => 4,
            VersionChoice::Unsupported(n) => n,
        }
    }

    /// The concrete version this choice names, if any.
    pub fn as_version(self) -> Option<TagVersion> {
        match self {
            VersionChoice::V22 => Some(TagVersion::V22),
            VersionChoice::V23 => Some(TagVersion::V23),
            VersionChoice::V24 => Some(TagVersion::V24),
            VersionChoice::Original | VersionChoice::Unsupported(_) => None,
        }
    }
}

/// An embedded picture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artwork {
    /// e.g. "image/jpeg"
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// Immutable result of reading one file.
///
/// Missing frames are simply absent from `fields`; the UI shows them as "".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSnapshot {
    pub version: TagVersion,
    pub fields: BTreeMap<FieldName, String>,
    pub artwork: Option<Artwork>,
}

impl TagSnapshot {
    pub fn new(version: TagVersion) -> Self {
        Self {
            version,
            fields: BTreeMap::new(),
            artwork: None,
        }
    }

    /// Raw value, `None` if the frame is absent.
    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// Display value: absent frames read as "".
    pub fn value(&self, field: FieldName) -> &str {
        self.get(field).unwrap_or("")
    }

    /// Builder-style setter, mostly for tests and codecs.
    pub fn with(mut self, field: FieldName, value: impl Into<String>) -> Self {
        self.fields.insert(field, value.into());
        self
    }
}
