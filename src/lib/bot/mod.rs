//! The archiving bot: shared state, handlers and router setup.

pub mod commands;
pub mod posts;

use std::sync::Arc;

use crate::{
    api::{BotCommand, SetMyCommandsRequest, API},
    archive::Archiver,
    config::Config,
    handlers::log_handler,
    store::{normalize_channel, ChannelStore},
    BotState, Client, Matcher, Route, Router,
};

/// State shared by every chat. Cloning is cheap; all clones see the same
/// archive and database.
#[derive(Clone, BotState)]
pub struct App {
    pub archiver: Arc<Archiver>,
    pub store: Arc<ChannelStore>,
    /// Channels from the configuration, normalized.
    pub channels: Arc<Vec<String>>,
}

impl App {
    pub fn new(archiver: Archiver, store: ChannelStore, channels: Vec<String>) -> Self {
        Self {
            archiver: Arc::new(archiver),
            store: Arc::new(store),
            channels: Arc::new(channels.iter().map(|c| normalize_channel(c)).collect()),
        }
    }

    /// Opens the database and prepares the posts directory.
    pub async fn open(config: &Config) -> anyhow::Result<Self> {
        let archiver = Archiver::new(&config.posts_dir);
        archiver.ensure_root().await?;
        let store = ChannelStore::open(&config.db_path)?;

        let tracked = store.all_channels()?;
        if !tracked.is_empty() {
            info!("Users track @{}", tracked.join(", @"));
        }

        Ok(Self::new(archiver, store, config.channels.clone()))
    }

    /// True if posts from `username` should be archived, either because it is
    /// configured or because some user tracks it.
    pub fn is_watched(&self, username: &str) -> anyhow::Result<bool> {
        let username = normalize_channel(username);
        if self.channels.contains(&username) {
            return Ok(true);
        }
        self.store.is_tracked(&username)
    }
}

/// Commands shown in the Telegram command menu.
pub fn bot_commands() -> Vec<BotCommand> {
    vec![
        BotCommand::new("start", "Show the main menu"),
        BotCommand::new("help", "List available commands"),
        BotCommand::new("add_channel", "Track a channel: /add_channel <name> [auth]"),
        BotCommand::new("remove_channel", "Stop tracking a channel"),
        BotCommand::new("channels", "List your tracked channels"),
        BotCommand::new("chat_id", "Show the id of this chat"),
    ]
}

/// Publishes [`bot_commands`]. Failure is logged, not fatal. Returns whether
/// Telegram accepted the list.
pub async fn register_commands(api: &API) -> bool {
    match api
        .set_my_commands(&SetMyCommandsRequest::new(bot_commands()))
        .await
    {
        Ok(_) => {
            debug!("Registered bot commands");
            true
        }
        Err(err) => {
            warn!("Failed to register bot commands: {:#}", err);
            false
        }
    }
}

/// Builds a router with all archiver routes.
pub fn build_router(client: Client, app: App) -> Router<App> {
    let mut router = Router::from_state(client, app);

    router
        .add_route(Route::Default, log_handler)
        .add_route(Route::ChannelPost(Matcher::Any), posts::archive_post)
        .add_route(
            Route::EditedChannelPost(Matcher::Any),
            posts::skip_edited_post,
        )
        .add_route(command("start"), commands::start)
        .add_route(command("help"), commands::help)
        .add_route(command("add_channel"), commands::add_channel)
        .add_route(command("remove_channel"), commands::remove_channel)
        .add_route(command("channels"), commands::list_channels)
        .add_route(command("chat_id"), commands::chat_id);

    router
}

fn command(name: &str) -> Route {
    Route::Message(Matcher::BotCommand(name.into()))
}

/// Runs the bot until Ctrl-C.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let app = App::open(&config).await?;
    let mut router =
        build_router(Client::new(config.token.clone()), app).with_poll_timeout_s(config.poll_timeout_s);

    register_commands(&router.api).await;

    let (_, shutdown_tx) = router.shutdown();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C received, shutting down...");
            _ = shutdown_tx.send(()).await;
        }
    });

    if config.channels.is_empty() {
        info!("Bot started. Waiting for posts from tracked channels...");
    } else {
        info!(
            "Bot started. Waiting for posts from @{}...",
            config.channels.join(", @")
        );
    }

    router.start().await;
    Ok(())
}
