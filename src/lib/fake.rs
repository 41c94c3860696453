/// This is a fake Telegram API server. Install it with
/// [`crate::Client::with_post_handler`] and the bot talks to it instead of
/// Telegram. Tests use [`FakeChat`] to talk to the bot as a user,
/// [`FakeChannel`] to publish channel posts, and [`FakeAPI::add_file`] to
/// make files downloadable.
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
    time::Duration,
};
use tokio::sync::{mpsc, Mutex};

use crate::{
    api::{self, BotCommand, GetUpdatesRequest, Message, ReplyMarkup, SendMessageRequest},
    ApiResponse, Post, Update,
};

/// A private chat between a fake user and the bot.
pub struct FakeChat {
    pub chat_id: i64,
    pub user_id: i64,
    pub from: String,
    api: FakeAPI,
    chat_rx: Mutex<mpsc::Receiver<Message>>,
}

impl FakeChat {
    pub async fn send_text(&self, text: impl Into<String>) -> Result<()> {
        let mut message = Message::new(self.from.clone(), text);
        message.message_id = rand::random::<u32>() as i64;
        message.date = Utc::now().timestamp();
        message.chat.id = self.chat_id;
        if let Some(ref mut from) = message.from {
            from.id = self.user_id;
        }

        self.api
            .push_update(api::Update {
                message: Some(message),
                ..Default::default()
            })
            .await
    }

    /// Next message the bot sent to this chat.
    pub async fn recv_message(&self) -> Option<Message> {
        self.chat_rx.lock().await.recv().await
    }

    /// Same as [`FakeChat::recv_message`], typed as an [`Update`].
    pub async fn recv_update(&self) -> Option<Update> {
        self.recv_message().await.map(Update::Message)
    }

    /// Button labels of the reply keyboard the bot last sent here.
    pub async fn menu(&self) -> Option<Vec<Vec<String>>> {
        self.api
            .menus
            .lock()
            .await
            .get(&self.chat_id)
            .map(|m| m.buttons())
    }
}

/// A public channel the bot is an admin of.
pub struct FakeChannel {
    pub chat_id: i64,
    pub username: String,
    api: FakeAPI,
}

impl FakeChannel {
    /// Publish `post`. Its chat is replaced with this channel; `date` and
    /// `message_id` are filled in when zero.
    pub async fn post(&self, mut post: Message) -> Result<()> {
        self.fill(&mut post);
        self.api
            .push_update(api::Update {
                channel_post: Some(post),
                ..Default::default()
            })
            .await
    }

    pub async fn edit(&self, mut post: Message) -> Result<()> {
        self.fill(&mut post);
        self.api
            .push_update(api::Update {
                edited_channel_post: Some(post),
                ..Default::default()
            })
            .await
    }

    fn fill(&self, post: &mut Message) {
        post.chat = api::Chat {
            id: self.chat_id,
            chat_type: "channel".to_string(),
            title: Some(self.username.clone()),
            username: Some(self.username.clone()),
            ..Default::default()
        };
        if post.date == 0 {
            post.date = Utc::now().timestamp();
        }
        if post.message_id == 0 {
            post.message_id = rand::random::<u32>() as i64;
        }
    }
}

/// A file the fake serves via `getFile` and downloads.
#[derive(Debug, Clone)]
struct FakeFile {
    file_path: Option<String>,
    contents: bytes::Bytes,
}

#[derive(Clone)]
pub struct FakeAPI {
    pub bot_name: String,
    update_id: Arc<Mutex<i64>>,
    update_tx: mpsc::Sender<api::Update>,
    update_rx: Arc<Mutex<mpsc::Receiver<api::Update>>>,
    chat_queue: Arc<Mutex<HashMap<i64, mpsc::Sender<Message>>>>,
    files: Arc<Mutex<HashMap<String, FakeFile>>>,
    menus: Arc<Mutex<HashMap<i64, ReplyMarkup>>>,
    failing: Arc<Mutex<HashSet<String>>>,
    commands: Arc<Mutex<Vec<BotCommand>>>,
}

impl Default for FakeAPI {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeAPI {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(100);

        Self {
            bot_name: "postkeeper".to_string(),
            update_id: Arc::new(Mutex::new(0)),
            update_tx: tx,
            update_rx: Arc::new(Mutex::new(rx)),
            chat_queue: Arc::new(Mutex::new(HashMap::new())),
            files: Arc::new(Mutex::new(HashMap::new())),
            menus: Arc::new(Mutex::new(HashMap::new())),
            failing: Arc::new(Mutex::new(HashSet::new())),
            commands: Arc::new(Mutex::new(vec![])),
        }
    }

    pub async fn create_chat(&self, from: impl Into<String>) -> FakeChat {
        let chat_id = rand::random::<u32>() as i64;
        let (tx, rx) = mpsc::channel(100);

        self.chat_queue.lock().await.insert(chat_id, tx);

        FakeChat {
            chat_id,
            user_id: rand::random::<u32>() as i64,
            from: from.into(),
            api: self.clone(),
            chat_rx: Mutex::new(rx),
        }
    }

    pub fn create_channel(&self, username: impl Into<String>) -> FakeChannel {
        FakeChannel {
            chat_id: -1_000_000_000_000 - rand::random::<u32>() as i64,
            username: username.into(),
            api: self.clone(),
        }
    }

    /// Serve `contents` for `file_id`, at remote path `file_path`.
    pub async fn add_file(
        &self,
        file_id: impl Into<String>,
        file_path: impl Into<String>,
        contents: impl Into<bytes::Bytes>,
    ) {
        self.files.lock().await.insert(
            file_id.into(),
            FakeFile {
                file_path: Some(file_path.into()),
                contents: contents.into(),
            },
        );
    }

    /// Register `file_id` without a path, like files over the 20 MB limit.
    pub async fn add_oversized_file(&self, file_id: impl Into<String>) {
        self.files.lock().await.insert(
            file_id.into(),
            FakeFile {
                file_path: None,
                contents: bytes::Bytes::new(),
            },
        );
    }

    /// Answer every later call to Bot API `method` with an error.
    pub async fn fail_method(&self, method: impl Into<String>) {
        self.failing.lock().await.insert(method.into());
    }

    /// Commands registered with `setMyCommands`.
    pub async fn commands(&self) -> Vec<BotCommand> {
        self.commands.lock().await.clone()
    }

    async fn push_update(&self, mut update: api::Update) -> Result<()> {
        update.update_id = {
            let mut update_id = self.update_id.lock().await;
            *update_id += 1;
            *update_id
        };

        self.update_tx
            .send(update)
            .await
            .map_err(|_| anyhow!("update queue closed"))
    }

    async fn get_updates(&self, req: GetUpdatesRequest) -> ApiResponse<Vec<api::Update>> {
        let mut rx = self.update_rx.lock().await;

        tokio::select! {
            Some(update) = rx.recv() => {
                ApiResponse::ok(vec![update])
            }
            _ = tokio::time::sleep(Duration::from_secs(req.timeout.unwrap_or(1) as u64)) => {
                ApiResponse::ok(vec![])
            }
        }
    }

    async fn send_message(&self, req: SendMessageRequest) -> ApiResponse<Message> {
        if let Some(menu) = req.reply_markup {
            self.menus.lock().await.insert(req.chat_id, menu);
        }

        let message = Message {
            message_id: rand::random::<u32>() as i64,
            from: Some(api::User {
                id: 1,
                is_bot: true,
                first_name: self.bot_name.clone(),
                username: Some(self.bot_name.clone()),
                ..Default::default()
            }),
            date: Utc::now().timestamp(),
            chat: api::Chat {
                id: req.chat_id,
                chat_type: String::from("private"),
                ..Default::default()
            },
            text: Some(req.text),
            ..Default::default()
        };

        match self.chat_queue.lock().await.get(&req.chat_id) {
            Some(chat) => {
                if chat.send(message.clone()).await.is_err() {
                    warn!("Chat {} is gone", req.chat_id);
                }
            }
            None => warn!("Can't find Chat with id = {}", req.chat_id),
        }

        ApiResponse::ok(message)
    }

    async fn get_file(&self, req: api::GetFileRequest) -> ApiResponse<api::File> {
        match self.files.lock().await.get(&req.file_id) {
            Some(file) => ApiResponse::ok(api::File {
                file_id: req.file_id.clone(),
                file_unique_id: format!("unique_{}", req.file_id),
                file_size: Some(file.contents.len() as i64),
                file_path: file.file_path.clone(),
            }),
            None => ApiResponse::error("Bad Request: invalid file_id"),
        }
    }

    fn get_me(&self) -> ApiResponse<api::User> {
        ApiResponse::ok(api::User {
            id: 1,
            is_bot: true,
            first_name: self.bot_name.clone(),
            username: Some(self.bot_name.clone()),
            ..Default::default()
        })
    }

    async fn set_my_commands(&self, req: api::SetMyCommandsRequest) -> ApiResponse<bool> {
        *self.commands.lock().await = req.commands;
        ApiResponse::ok(true)
    }
}

#[async_trait]
impl Post for FakeAPI {
    async fn post(&self, method: String, req: String) -> Result<String> {
        use serde_json::to_string as json;

        debug!("method = {}, req = {}", method, req);
        if self.failing.lock().await.contains(&method) {
            return Ok(json(&ApiResponse::<()>::error(format!(
                "Bad Request: {} is disabled",
                method
            )))?);
        }

        let response = match method.as_str() {
            "getMe" => json(&self.get_me()),
            "getUpdates" => json(&self.get_updates(serde_json::from_str(&req)?).await),
            "sendMessage" => json(&self.send_message(serde_json::from_str(&req)?).await),
            "getFile" => json(&self.get_file(serde_json::from_str(&req)?).await),
            "setMyCommands" => json(&self.set_my_commands(serde_json::from_str(&req)?).await),
            _ => {
                warn!("Unknown method: {}", method);
                json(&ApiResponse::<()>::error(format!(
                    "Unknown method: {}",
                    method
                )))
            }
        };

        Ok(response?)
    }

    async fn download(&self, file_path: String) -> Result<bytes::Bytes> {
        self.files
            .lock()
            .await
            .values()
            .find(|f| f.file_path.as_deref() == Some(file_path.as_str()))
            .map(|f| f.contents.clone())
            .ok_or_else(|| anyhow!("404 Not Found: {}", file_path))
    }
}
