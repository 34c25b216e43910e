use id3::frame::{Content, Picture, PictureType};
use id3::{Tag, TagLike};

use super::super::types::Artwork;

/// Frame ids that carry embedded pictures: APIC (v2.3/v2.4) and PIC (v2.2).
const PICTURE_IDS: [&str; 2] = ["APIC", "PIC"];

/// The first embedded picture under either id, if any.
pub(crate) fn first_picture(tag: &Tag) -> Option<Artwork> {
    for f in tag.frames() {
        if !PICTURE_IDS.contains(&f.id()) {
            continue;
        }
        if let Content::Picture(p) = f.content() {
            return Some(Artwork {
                mime_type: p.mime_type.clone(),
                data: p.data.clone(),
            });
        }
    }
    None
}

/// Make `tag` carry exactly `artwork` (or no picture).
/// Leaves the frames alone when the first picture already matches.
pub(crate) fn set_picture(tag: &mut Tag, artwork: Option<&Artwork>) {
    if first_picture(tag).as_ref() == artwork {
        return;
    }

    for id in PICTURE_IDS {
        let _ = tag.remove(id); // returns the removed frames; discard
    }

    if let Some(art) = artwork {
        let _ = tag.add_frame(Picture {
            mime_type: art.mime_type.clone(),
            picture_type: PictureType::CoverFront,
            description: String::new(),
            data: art.data.clone(),
        });
    }
}
