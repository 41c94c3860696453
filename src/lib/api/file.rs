use postkeeper_derive::BotRequest;
use serde::{Deserialize, Serialize};

use super::API;

/// A file ready to be downloaded. The file can be downloaded via
/// [`API::download_file`] with the `file_path`. The link stays valid for at
/// least one hour.
#[derive(Default, Debug, Clone, Deserialize, Serialize)]
pub struct File {
    /// Identifier for this file, which can be used to download or reuse the file
    pub file_id: String,

    /// Unique identifier for this file
    #[serde(default)]
    pub file_unique_id: String,

    /// File size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<i64>,

    /// File path relative to the file endpoint. Missing for files the Bot API
    /// refuses to serve (larger than 20 MB).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, BotRequest)]
pub struct GetFileRequest {
    /// Unique identifier for target file
    pub file_id: String,
}

impl GetFileRequest {
    pub fn new(file_id: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DownloadRequest {
    /// `file_path` as returned by `getFile`
    pub file_path: String,
}

impl DownloadRequest {
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }
}

impl API {
    pub async fn get_file(&self, req: &GetFileRequest) -> anyhow::Result<File> {
        self.client.post("getFile", req).await
    }

    pub async fn download_file(&self, req: &DownloadRequest) -> anyhow::Result<bytes::Bytes> {
        self.client.download_file(&req.file_path).await
    }
}
