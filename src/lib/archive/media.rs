use std::fmt;

use crate::api::{File, Message, PhotoSize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Photo,
    Video,
    Document,
    Audio,
}

impl fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AttachmentKind::Photo => "photo",
            AttachmentKind::Video => "video",
            AttachmentKind::Document => "document",
            AttachmentKind::Audio => "audio",
        })
    }
}

/// A downloadable file attached to a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub kind: AttachmentKind,
    pub file_id: String,
    pub file_unique_id: String,
}

/// Returns the photo size with the most pixels. On a tie the earliest size wins.
pub fn largest_photo(photos: &[PhotoSize]) -> Option<&PhotoSize> {
    // max_by_key keeps the last maximum, so walk backwards.
    photos.iter().rev().max_by_key(|p| p.area())
}

/// Lists the attachments of `message`: the largest photo, then video,
/// document and audio.
pub fn attachments(message: &Message) -> Vec<Attachment> {
    let mut attachments = vec![];

    if let Some(photo) = message.photo.as_deref().and_then(largest_photo) {
        attachments.push(Attachment {
            kind: AttachmentKind::Photo,
            file_id: photo.file_id.clone(),
            file_unique_id: photo.file_unique_id.clone(),
        });
    }

    if let Some(ref video) = message.video {
        attachments.push(Attachment {
            kind: AttachmentKind::Video,
            file_id: video.file_id.clone(),
            file_unique_id: video.file_unique_id.clone(),
        });
    }

    if let Some(ref document) = message.document {
        attachments.push(Attachment {
            kind: AttachmentKind::Document,
            file_id: document.file_id.clone(),
            file_unique_id: document.file_unique_id.clone(),
        });
    }

    if let Some(ref audio) = message.audio {
        attachments.push(Attachment {
            kind: AttachmentKind::Audio,
            file_id: audio.file_id.clone(),
            file_unique_id: audio.file_unique_id.clone(),
        });
    }

    attachments
}

/// Name of the file on disk: the last segment of the remote `file_path`
/// (e.g. `file_12.jpg`), else the unique id, else the file id.
pub fn stored_name(file: &File, attachment: &Attachment) -> String {
    let remote = file
        .file_path
        .as_deref()
        .and_then(|path| path.rsplit('/').next());

    [
        remote,
        Some(attachment.file_unique_id.as_str()),
        Some(attachment.file_id.as_str()),
    ]
    .into_iter()
    .flatten()
    .map(sanitize)
    .find(|name| !name.is_empty())
    .unwrap_or_else(|| format!("{}.bin", attachment.kind))
}

/// Strips anything that could escape the post directory.
fn sanitize(name: &str) -> String {
    let name: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c => c,
        })
        .collect();

    if name.trim_matches('.').is_empty() {
        String::new()
    } else {
        name
    }
}
