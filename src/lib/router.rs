/// `Router` owns the poll loop. It fetches updates from Telegram, finds the
/// handlers whose [`Route`] matches each update, and runs them in the order
/// they were added.
///
/// The router keeps one [`State`] per chat ID, created by cloning the initial
/// state the first time the chat is seen.
use std::{cmp::max, collections::HashMap, sync::Arc, time::Duration};

use futures::{future::BoxFuture, Future};
use regex::Regex;
use tokio::{
    sync::{mpsc, Notify, RwLock},
    task::JoinHandle,
};

use crate::{
    api::{GetUpdatesRequest, Message, SendMessageRequest, API},
    handler::{BotHandlerFn, BotState, State},
    Action, Client, Event, Update,
};

/// Called with the API, chat ID, chat state and error whenever a handler fails.
pub type ErrorHandler<S> =
    Box<dyn Fn(Arc<API>, i64, State<S>, anyhow::Error) -> BoxFuture<'static, ()> + Send + Sync>;

type Routes<S> = Vec<(Route, Box<dyn BotHandlerFn<S>>)>;

/// Filters applied to the message of an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    Any,
    /// Text or caption is exactly this string.
    Exact(String),
    /// Text or caption starts with this string.
    Prefix(String),
    /// Text or caption matches this regex. Build it with [`Matcher::regex`].
    Regex(Pattern),
    /// Text is the bot command `/name`, optionally followed by `@botname`
    /// and arguments. Pass the name without the slash. A `@botname` naming
    /// another bot does not match.
    BotCommand(String),
    Photo,
    Video,
    Document,
    Audio,
    /// Any of photo, video, document or audio.
    Media,
}

/// A compiled route regex. Compares by pattern text.
#[derive(Debug, Clone)]
pub struct Pattern(Regex);

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_str() == other.0.as_str()
    }
}

impl Eq for Pattern {}

impl Matcher {
    pub fn regex(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Matcher::Regex(Pattern(Regex::new(pattern)?)))
    }

    /// `bot_username` is this bot's username, used to ignore commands
    /// addressed to other bots. `None` accepts any `@botname`.
    pub fn matches(&self, message: &Message, bot_username: Option<&str>) -> bool {
        let body = message.body().unwrap_or_default();

        match self {
            Matcher::Any => true,
            Matcher::Exact(s) => body == s,
            Matcher::Prefix(s) => body.starts_with(s.as_str()),
            Matcher::Regex(Pattern(re)) => re.is_match(body),
            Matcher::BotCommand(cmd) => match parse_command(body) {
                Some((name, target)) if name == cmd => match (target, bot_username) {
                    (Some(target), Some(me)) => target.eq_ignore_ascii_case(me),
                    _ => true,
                },
                _ => false,
            },
            Matcher::Photo => message.photo.as_ref().is_some_and(|p| !p.is_empty()),
            Matcher::Video => message.video.is_some(),
            Matcher::Document => message.document.is_some(),
            Matcher::Audio => message.audio.is_some(),
            Matcher::Media => message.has_media(),
        }
    }
}

/// Splits a bot command into its name and the `@botname` it is addressed
/// to, if any. Returns `None` if `text` is not a command.
pub fn parse_command(text: &str) -> Option<(&str, Option<&str>)> {
    let word = text.split_whitespace().next()?.strip_prefix('/')?;
    let (name, target) = match word.split_once('@') {
        Some((name, target)) => (name, Some(target)),
        None => (word, None),
    };
    (!name.is_empty()).then_some((name, target))
}

/// Returns the whitespace separated arguments following a bot command.
pub fn command_args(text: &str) -> Vec<&str> {
    text.split_whitespace().skip(1).collect()
}

/// Which updates a handler receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Every update.
    Default,
    Message(Matcher),
    EditedMessage(Matcher),
    ChannelPost(Matcher),
    EditedChannelPost(Matcher),
}

impl Route {
    pub fn matches(&self, update: &Update, bot_username: Option<&str>) -> bool {
        match (self, update) {
            (Route::Default, _) => true,
            (Route::Message(m), Update::Message(msg))
            | (Route::EditedMessage(m), Update::EditedMessage(msg))
            | (Route::ChannelPost(m), Update::ChannelPost(msg))
            | (Route::EditedChannelPost(m), Update::EditedChannelPost(msg)) => {
                m.matches(msg, bot_username)
            }
            _ => false,
        }
    }
}

pub struct Router<S: BotState> {
    pub api: Arc<API>,

    routes: Arc<RwLock<Routes<S>>>,

    /// Cloned into every new chat's state.
    initial_state: State<S>,

    /// One entry per chat or channel seen since start. Entries are never
    /// evicted; the bot sees a bounded set of private chats and channels.
    chat_state: Arc<RwLock<HashMap<i64, State<S>>>>,

    error_handler: Arc<ErrorHandler<S>>,

    /// This bot's username, for `/cmd@botname`. Looked up with `getMe` on
    /// start if not set.
    bot_username: Option<String>,

    /// HTTP poll timeout
    timeout_s: i64,

    /// Shutdown notifier
    shutdown: Arc<Notify>,
    shutdown_tx: Arc<mpsc::Sender<()>>,
    shutdown_rx: mpsc::Receiver<()>,
}

impl<S: BotState + Default> Router<S> {
    /// Create a new router with the given client and default state.
    pub fn new(client: Client) -> Self {
        Self::from_state(client, S::default())
    }
}

impl<S: BotState> Router<S> {
    /// Create a new router whose chats all start from `state`.
    pub fn from_state(client: Client, state: S) -> Self {
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        Self {
            api: Arc::new(API::new(client)),
            routes: Arc::new(RwLock::new(vec![])),
            initial_state: State::new(state),
            chat_state: Arc::new(RwLock::new(HashMap::new())),
            error_handler: Arc::new(Box::new(|_, chat_id, _, err| {
                Box::pin(async move { error!("Handler error (chat {}): {:#}", chat_id, err) })
            })),
            bot_username: None,
            timeout_s: 60,
            shutdown: Arc::new(Notify::new()),
            shutdown_tx: Arc::new(shutdown_tx),
            shutdown_rx,
        }
    }

    pub fn with_poll_timeout_s(mut self, timeout_s: i64) -> Self {
        self.timeout_s = timeout_s;
        self
    }

    /// Skip the `getMe` lookup on start.
    pub fn with_bot_username(mut self, username: impl Into<String>) -> Self {
        self.bot_username = Some(username.into());
        self
    }

    /// Replace the default error handler, which only logs.
    pub fn with_error_handler<Func, Fut>(mut self, func: Func) -> Self
    where
        Func: Send + Sync + 'static + Fn(Arc<API>, i64, State<S>, anyhow::Error) -> Fut,
        Fut: Send + 'static + Future<Output = ()>,
    {
        self.error_handler = Arc::new(Box::new(move |a, b, c, d| Box::pin(func(a, b, c, d))));
        self
    }

    /// Add a handler for updates matching `route`. Must be called before
    /// [`Router::start`].
    pub fn add_route(&mut self, route: Route, h: impl Into<Box<dyn BotHandlerFn<S>>>) -> &mut Self {
        match self.routes.try_write() {
            Ok(mut routes) => routes.push((route, h.into())),
            Err(_) => error!("Routes are locked; add_route called on a running router"),
        }
        self
    }

    /// Sending on the channel stops [`Router::start`]. The notifier fires
    /// once every in-flight handler has finished.
    pub fn shutdown(&self) -> (Arc<Notify>, Arc<mpsc::Sender<()>>) {
        (Arc::clone(&self.shutdown), Arc::clone(&self.shutdown_tx))
    }

    async fn resolve_bot_username(&mut self) {
        if self.bot_username.is_some() {
            return;
        }

        match self.api.get_me().await {
            Ok(me) => {
                info!("Running as @{}", me.username.as_deref().unwrap_or(&me.first_name));
                self.bot_username = me.username;
            }
            Err(err) => warn!("getMe failed, accepting commands for any bot: {:#}", err),
        }
    }

    /// Start the router. Runs until a shutdown signal is received.
    pub async fn start(&mut self) {
        self.resolve_bot_username().await;

        let bot_username: Option<Arc<str>> = self.bot_username.as_deref().map(Arc::from);
        let mut in_flight: Vec<JoinHandle<()>> = vec![];
        let mut last_update_id = 0;

        loop {
            in_flight.retain(|task| !task.is_finished());

            debug!(
                "Polling /getUpdates with last_update_id = {} timeout = {}s",
                last_update_id, self.timeout_s
            );

            let req = GetUpdatesRequest::new()
                .with_timeout(self.timeout_s)
                .with_offset(last_update_id + 1);

            let updates = tokio::select! {
                _ = self.shutdown_rx.recv() => {
                    info!("Received shutdown signal");
                    break;
                }
                updates = self.api.get_updates(&req) => updates,
            };

            let updates = match updates {
                Ok(updates) => updates,
                Err(err) => {
                    warn!("getUpdates failed: {:#}", err);
                    tokio::time::sleep(Duration::from_secs(1)).await;
                    continue;
                }
            };

            for update in updates {
                last_update_id = max(last_update_id, update.update_id);

                let api = Arc::clone(&self.api);
                let routes = Arc::clone(&self.routes);
                let chat_state = Arc::clone(&self.chat_state);
                let initial_state = self.initial_state.clone();
                let error_handler = Arc::clone(&self.error_handler);
                let bot_username = bot_username.clone();

                in_flight.push(tokio::spawn(async move {
                    let update = Update::from(update);
                    let chat_id = update.chat_id().unwrap_or_default();

                    let state = {
                        let mut chat_state = chat_state.write().await;
                        match chat_state.get(&chat_id) {
                            Some(state) => state.clone(),
                            None => {
                                let state = initial_state.from().await;
                                chat_state.insert(chat_id, state.clone());
                                state
                            }
                        }
                    };

                    let result = Self::handle_update(
                        Arc::clone(&api),
                        routes,
                        update,
                        state.clone(),
                        bot_username.as_deref(),
                    )
                    .await;

                    if let Err(err) = result {
                        (**error_handler)(api, chat_id, state, err).await;
                    }
                }));
            }
        }

        for task in in_flight {
            if let Err(err) = task.await {
                error!("Handler task failed: {}", err);
            }
        }

        self.shutdown.notify_waiters();
    }

    async fn handle_update(
        api: Arc<API>,
        routes: Arc<RwLock<Routes<S>>>,
        update: Update,
        state: State<S>,
        bot_username: Option<&str>,
    ) -> anyhow::Result<()> {
        if let Update::Unknown = update {
            debug!("Skipping unsupported update");
            return Ok(());
        }

        for (route, handler) in routes.read().await.iter() {
            if !route.matches(&update, bot_username) {
                continue;
            }

            let event = Event::new(Arc::clone(&api), update.clone());
            let reply = handler.run(event, state.clone()).await?;

            match reply {
                Action::Next => {}
                Action::Done => break,
                Action::ReplyText(text) => {
                    api.send_message(&SendMessageRequest::new(update.chat_id()?, text))
                        .await?;
                }
                Action::ReplyMarkdown(text) => {
                    api.send_message(
                        &SendMessageRequest::new(update.chat_id()?, text)
                            .with_parse_mode(Some(crate::api::ParseMode::MarkdownV2)),
                    )
                    .await?;
                }
            }
        }

        Ok(())
    }
}
