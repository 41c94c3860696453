use postkeeper_derive::BotRequest;
use serde::{Deserialize, Serialize};

use super::{Audio, Chat, Document, PhotoSize, ReplyMarkup, User, Video, API};

#[derive(Default, Debug, Clone, Deserialize, Serialize)]
pub struct Message {
    /// Unique message identifier inside this chat
    pub message_id: i64,

    /// Sender, empty for messages sent to channels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<User>,

    /// Date the message was sent in Unix time
    pub date: i64,

    /// Conversation the message belongs to
    pub chat: Chat,

    /// The unique identifier of a media message group this message belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_group_id: Option<String>,

    /// Message text, for text messages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Caption for the animation, audio, document, photo, video or voice
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,

    /// Available sizes of the photo, for photo messages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<Vec<PhotoSize>>,

    /// Message is a video, information about the video
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<Video>,

    /// Message is a general file, information about the file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<Document>,

    /// Message is an audio file, information about the file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<Audio>,
}

impl Message {
    pub fn new(from: impl Into<String>, text: impl Into<String>) -> Self {
        let from = from.into();

        Self {
            from: Some(User {
                username: Some(from.clone()),
                first_name: from.clone(),
                ..Default::default()
            }),
            text: Some(text.into()),
            chat: Chat {
                chat_type: String::from("private"),
                username: Some(from.clone()),
                first_name: Some(from),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Returns the caption for media posts, or the text for plain posts.
    pub fn body(&self) -> Option<&str> {
        self.caption.as_deref().or(self.text.as_deref())
    }

    /// True if the message carries any attachment the archiver knows about.
    pub fn has_media(&self) -> bool {
        self.photo.as_ref().is_some_and(|p| !p.is_empty())
            || self.video.is_some()
            || self.document.is_some()
            || self.audio.is_some()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ParseMode {
    MarkdownV2,
}

#[derive(Default, Debug, Serialize, Deserialize, Clone, BotRequest)]
pub struct SendMessageRequest {
    /// Unique identifier for the target chat
    pub chat_id: i64,

    /// Text of the message to be sent
    pub text: String,

    /// Parse mode for the message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,

    /// Keyboard or other reply markup to show with the message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<ReplyMarkup>,
}

impl SendMessageRequest {
    pub fn new(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_parse_mode(mut self, parse_mode: Option<ParseMode>) -> Self {
        self.parse_mode = parse_mode;
        self
    }

    pub fn with_reply_markup(mut self, reply_markup: ReplyMarkup) -> Self {
        self.reply_markup = Some(reply_markup);
        self
    }
}

impl API {
    pub async fn send_message(&self, req: &SendMessageRequest) -> anyhow::Result<Message> {
        self.client.post("sendMessage", req).await
    }
}
