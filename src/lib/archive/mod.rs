//! Writes channel posts to disk.
//!
//! Every post gets its own directory under the archive root, named after the
//! post's UTC timestamp (see [`folder_name`]). The directory holds the caption
//! or text, if any, and one file per attachment. Failures on a single file are
//! logged and skipped so the rest of the post is still saved.

pub mod folder;
pub mod media;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;

use crate::api::{self, Message, API};

pub use folder::*;
pub use media::*;

/// Name of the file holding a media caption.
pub const CAPTION_FILE: &str = "caption.txt";

/// Name of the file holding the text of a plain text post.
pub const TEXT_FILE: &str = "text.txt";

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Post date {0} is out of range")]
    InvalidDate(i64),

    #[error("Telegram returned no file path for {0} (file too large?)")]
    MissingFilePath(String),
}

/// What [`Archiver::archive`] wrote for a post.
#[derive(Debug, Clone, Default)]
pub struct PostArtifact {
    /// The post directory.
    pub dir: PathBuf,

    /// Caption or text file, if the post had any text.
    pub text_file: Option<PathBuf>,

    /// Saved attachments, in the order of [`attachments`].
    pub media: Vec<PathBuf>,

    /// Number of text or attachment writes that failed.
    pub failed: usize,

    /// Telegram's `media_group_id`. Album items arrive as separate posts
    /// with the same date, so they share `dir`.
    pub album: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Archiver {
    root: PathBuf,
}

impl Archiver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the archive root if it doesn't exist yet.
    pub async fn ensure_root(&self) -> anyhow::Result<()> {
        fs::create_dir_all(&self.root).await?;
        info!("Saving posts to {}", self.root.display());
        Ok(())
    }

    /// Directory for a post sent at `date`.
    pub fn post_dir(&self, date: i64) -> Result<PathBuf, ArchiveError> {
        Ok(self.root.join(folder_name(date)?))
    }

    /// Save `message` to its post directory. Only creating the directory is
    /// fatal; text and attachment failures are logged and counted.
    pub async fn archive(&self, api: &API, message: &Message) -> anyhow::Result<PostArtifact> {
        let dir = self.post_dir(message.date)?;
        fs::create_dir_all(&dir).await?;

        let mut artifact = PostArtifact {
            dir: dir.clone(),
            album: message.media_group_id.clone(),
            ..Default::default()
        };

        if let Some(ref album) = artifact.album {
            debug!("Post {} is part of album {}", message.message_id, album);
        }

        match self.save_text(&dir, message).await {
            Ok(Some(path)) => artifact.text_file = Some(path),
            Ok(None) => info!("Post {} has no caption", message.message_id),
            Err(err) => {
                error!("Failed to save text of post {}: {:#}", message.message_id, err);
                artifact.failed += 1;
            }
        }

        for attachment in attachments(message) {
            match self.save_attachment(api, &dir, &attachment).await {
                Ok(path) => {
                    info!("Saved {}: {}", attachment.kind, path.display());
                    artifact.media.push(path);
                }
                Err(err) => {
                    error!(
                        "Failed to save {} {} of post {}: {:#}",
                        attachment.kind, attachment.file_id, message.message_id, err
                    );
                    artifact.failed += 1;
                }
            }
        }

        info!(
            "Archived post {} to {} ({} files, {} failed)",
            message.message_id,
            dir.display(),
            artifact.media.len() + artifact.text_file.iter().count(),
            artifact.failed
        );

        Ok(artifact)
    }

    /// Writes the caption to `caption.txt`, or the text of a plain post to
    /// `text.txt`. Returns `None` if the post has neither.
    async fn save_text(&self, dir: &Path, message: &Message) -> anyhow::Result<Option<PathBuf>> {
        let (name, body) = match (&message.caption, &message.text) {
            (Some(caption), _) if !caption.is_empty() => (CAPTION_FILE, caption),
            (_, Some(text)) if !text.is_empty() => (TEXT_FILE, text),
            _ => return Ok(None),
        };

        let path = dir.join(name);
        fs::write(&path, body).await?;
        info!("Saved {}", path.display());
        Ok(Some(path))
    }

    async fn save_attachment(
        &self,
        api: &API,
        dir: &Path,
        attachment: &Attachment,
    ) -> anyhow::Result<PathBuf> {
        let file = api
            .get_file(&api::GetFileRequest::new(attachment.file_id.clone()))
            .await?;

        let file_path = file
            .file_path
            .clone()
            .ok_or_else(|| ArchiveError::MissingFilePath(attachment.file_id.clone()))?;

        let contents = api
            .download_file(&api::DownloadRequest::new(file_path))
            .await?;

        let path = dir.join(stored_name(&file, attachment));
        fs::write(&path, &contents).await?;
        Ok(path)
    }
}
