use std::sync::Arc;

use crate::{
    api::{Message, ReplyMarkup, SendMessageRequest, API},
    Text, Update,
};

/// `Event` is what the router hands to every handler: the update plus a
/// handle to the API for sending replies or fetching files.
#[derive(Clone)]
pub struct Event {
    pub api: Arc<API>,
    pub update: Update,
}

impl Event {
    pub fn new(api: Arc<API>, update: Update) -> Self {
        Self { api, update }
    }

    fn reply(&self, text: impl Into<Text>) -> anyhow::Result<SendMessageRequest> {
        let (body, parse_mode) = text.into().into_parts();
        Ok(SendMessageRequest::new(self.update.chat_id()?, body).with_parse_mode(parse_mode))
    }

    /// Send a message to the chat the update came from.
    pub async fn send_message(&self, text: impl Into<Text>) -> anyhow::Result<Message> {
        self.api.send_message(&self.reply(text)?).await
    }

    /// Same as [`Event::send_message`], with a reply keyboard of one button
    /// per row.
    pub async fn send_menu<T: Into<String>>(
        &self,
        text: impl Into<Text>,
        menu: impl IntoIterator<Item = T>,
    ) -> anyhow::Result<Message> {
        let req = self.reply(text)?.with_reply_markup(ReplyMarkup::menu(menu));
        self.api.send_message(&req).await
    }
}
