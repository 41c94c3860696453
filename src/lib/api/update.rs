use postkeeper_derive::BotRequest;
use serde::{Deserialize, Serialize};

use super::{message::Message, API};

/// Raw update as returned by `getUpdates`. Exactly one of the optional
/// fields is set. See [`crate::Update`] for the typed form.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Update {
    /// Increases by one per update; the poll loop acknowledges updates by
    /// asking for the next id.
    pub update_id: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub edited_message: Option<Message>,

    /// A new post in a channel the bot administers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_post: Option<Message>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub edited_channel_post: Option<Message>,
}

/// Long-poll request. Updates with ids below `offset` are confirmed and
/// dropped by Telegram.
#[derive(Debug, Clone, Deserialize, Serialize, Default, BotRequest)]
pub struct GetUpdatesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,

    /// Seconds to hold the connection open while waiting for updates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_updates: Option<Vec<String>>,
}

impl GetUpdatesRequest {
    /// Subscribes to the four update kinds the router knows about.
    pub fn new() -> Self {
        Self {
            allowed_updates: Some(
                ["message", "edited_message", "channel_post", "edited_channel_post"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            ),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: i64) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }
}

impl API {
    pub async fn get_updates(&self, req: &GetUpdatesRequest) -> anyhow::Result<Vec<Update>> {
        self.client.post("getUpdates", req).await
    }
}
