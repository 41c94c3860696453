use anyhow::Result;
use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    api::escape_md,
    router::command_args,
    store::normalize_channel,
    Action, Event, State, Text,
};

use super::App;

pub const GREETING: &str = "Hi! I save posts from the Telegram channels you track.";

pub const HELP: &str = "Available commands:\n\
    /add_channel <channel> [auth] - track a new channel\n\
    /remove_channel <channel> - stop tracking a channel\n\
    /channels - list your tracked channels\n\
    /chat_id - show the id of this chat\n\
    /help - show this message";

pub const ADD_CHANNEL_USAGE: &str = "Usage: /add_channel <channel> [auth]";

pub const REMOVE_CHANNEL_USAGE: &str = "Usage: /remove_channel <channel>";

lazy_static! {
    /// Public usernames: 5-32 characters, letters, digits and underscores,
    /// starting with a letter. Checked after normalization, so lowercase only.
    static ref CHANNEL_USERNAME: Regex = Regex::new(r"^[a-z][a-z0-9_]{4,31}$").unwrap();
}

pub fn is_valid_channel(name: &str) -> bool {
    CHANNEL_USERNAME.is_match(name)
}

pub async fn start(e: Event, _: State<App>) -> Result<Action> {
    e.send_menu(GREETING, ["/add_channel", "/help"]).await?;
    Ok(Action::Done)
}

pub async fn help(e: Event, _: State<App>) -> Result<Action> {
    e.send_menu(HELP, ["/add_channel"]).await?;
    Ok(Action::Done)
}

pub async fn add_channel(e: Event, state: State<App>) -> Result<Action> {
    let args = command_args(e.update.text()?);
    let Some(name) = args.first() else {
        return Ok(Action::ReplyText(ADD_CHANNEL_USAGE.into()));
    };

    let channel = normalize_channel(name);
    if !is_valid_channel(&channel) {
        return Ok(Action::ReplyText(format!(
            "{} is not a valid channel username.",
            name
        )));
    }

    let user_id = e.update.from_user()?.id;
    let auth = args.get(1).map(|a| a.as_bytes());
    let app = state.get().read().await.clone();

    let reply = if app.store.add_channel(user_id, &channel, auth)? {
        info!("User {} is now tracking @{}", user_id, channel);
        format!("Now tracking @{}.", channel)
    } else if auth.is_some() && app.store.set_auth(user_id, &channel, auth)? {
        format!("Updated access for @{}.", channel)
    } else {
        format!("@{} is already tracked.", channel)
    };

    Ok(Action::ReplyText(reply))
}

pub async fn remove_channel(e: Event, state: State<App>) -> Result<Action> {
    let args = command_args(e.update.text()?);
    let Some(name) = args.first() else {
        return Ok(Action::ReplyText(REMOVE_CHANNEL_USAGE.into()));
    };

    let channel = normalize_channel(name);
    let user_id = e.update.from_user()?.id;
    let app = state.get().read().await.clone();

    let reply = if app.store.remove_channel(user_id, &channel)? {
        info!("User {} stopped tracking @{}", user_id, channel);
        format!("Stopped tracking @{}.", channel)
    } else {
        format!("@{} was not tracked.", channel)
    };

    Ok(Action::ReplyText(reply))
}

pub async fn list_channels(e: Event, state: State<App>) -> Result<Action> {
    let user_id = e.update.from_user()?.id;
    let app = state.get().read().await.clone();
    let channels = app.store.channels_for(user_id)?;

    if channels.is_empty() {
        return Ok(Action::ReplyText(
            "You are not tracking any channels. Use /add_channel to add one.".into(),
        ));
    }

    let list = channels
        .iter()
        .map(|c| format!("• @{}", escape_md(&c.channel)))
        .collect::<Vec<_>>()
        .join("\n");

    e.send_message(Text::Markdown(format!("*Tracked channels:*\n{}", list)))
        .await?;
    Ok(Action::Done)
}

pub async fn chat_id(e: Event, _: State<App>) -> Result<Action> {
    let chat_id = e.update.chat_id()?;
    info!("Chat ID requested: {}", chat_id);
    Ok(Action::ReplyText(format!("Chat ID: {}", chat_id)))
}
