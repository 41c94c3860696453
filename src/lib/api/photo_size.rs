use serde::{Deserialize, Serialize};

/// One size of a photo or a file/sticker thumbnail. Telegram sends several
/// sizes for every photo.
#[derive(Default, Debug, Clone, Deserialize, Serialize)]
pub struct PhotoSize {
    /// Identifier for this file, which can be used to download or reuse the file
    pub file_id: String,

    /// Unique identifier for this file, which is supposed to be the same over
    /// time and for different bots. Can't be used to download or reuse the file.
    #[serde(default)]
    pub file_unique_id: String,

    /// Photo width
    pub width: i64,

    /// Photo height
    pub height: i64,

    /// File size in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<i64>,
}

impl PhotoSize {
    /// Number of pixels in this size.
    pub fn area(&self) -> i64 {
        self.width.saturating_mul(self.height)
    }
}
