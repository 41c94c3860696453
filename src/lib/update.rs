use std::fmt;

use anyhow::anyhow;

use crate::api::{self, Message};

/// `Update` is the typed form of an [`api::Update`], keyed by the kind of
/// message it carries.
#[derive(Debug, Clone)]
pub enum Update {
    Message(Message),
    EditedMessage(Message),
    ChannelPost(Message),
    EditedChannelPost(Message),
    Unknown,
}

impl From<api::Update> for Update {
    fn from(update: api::Update) -> Self {
        if let Some(m) = update.message {
            Self::Message(m)
        } else if let Some(m) = update.edited_message {
            Self::EditedMessage(m)
        } else if let Some(m) = update.channel_post {
            Self::ChannelPost(m)
        } else if let Some(m) = update.edited_channel_post {
            Self::EditedChannelPost(m)
        } else {
            Self::Unknown
        }
    }
}

/// Displays the message body (text or caption), or nothing.
impl fmt::Display for Update {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = self
            .get_message_or_post()
            .ok()
            .and_then(|m| m.body())
            .unwrap_or_default();
        f.write_str(body)
    }
}

impl Update {
    pub fn get_message(&self) -> anyhow::Result<&Message> {
        match self {
            Update::Message(msg) | Update::EditedMessage(msg) => Some(msg),
            _ => None,
        }
        .ok_or(anyhow!("update is not a Message"))
    }

    pub fn get_post(&self) -> anyhow::Result<&Message> {
        match self {
            Update::ChannelPost(msg) | Update::EditedChannelPost(msg) => Some(msg),
            _ => None,
        }
        .ok_or(anyhow!("update is not a ChannelPost"))
    }

    pub fn get_new_post(&self) -> anyhow::Result<&Message> {
        match self {
            Update::ChannelPost(msg) => Some(msg),
            _ => None,
        }
        .ok_or(anyhow!("update is not a new ChannelPost"))
    }

    pub fn get_message_or_post(&self) -> anyhow::Result<&Message> {
        match self {
            Update::Message(msg)
            | Update::EditedMessage(msg)
            | Update::ChannelPost(msg)
            | Update::EditedChannelPost(msg) => Some(msg),
            Update::Unknown => None,
        }
        .ok_or(anyhow!("update is not a Message or ChannelPost"))
    }

    pub fn chat_id(&self) -> anyhow::Result<i64> {
        self.get_message_or_post().map(|msg| msg.chat.id)
    }

    /// Returns the text, or the caption for media messages.
    pub fn text(&self) -> anyhow::Result<&str> {
        self.get_message_or_post()?
            .body()
            .ok_or(anyhow!("message has no text"))
    }

    pub fn from_user(&self) -> anyhow::Result<&api::User> {
        self.get_message_or_post()?
            .from
            .as_ref()
            .ok_or(anyhow!("message has no user"))
    }
}
