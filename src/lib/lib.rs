//! `postkeeper` is a Telegram bot that archives channel posts to disk.
//!
//! The bot long-polls the Bot API for updates. For every new post in a
//! watched channel it creates a directory named after the post's UTC
//! timestamp and saves the caption (or text) and the attached photo, video,
//! document or audio into it. Which channels are watched comes from the
//! configuration and from a small SQLite table that users fill in with
//! `/add_channel`.
//!
//! # Framework
//!
//! The bot is built on a small routing layer:
//!
//! - [`Client`] sends requests to the Telegram API, or to a fake server in tests.
//!
//! - [`Router`] polls for updates and passes each one to the handlers whose
//! [`Route`] matches, in the order they were added.
//!
//! - Handlers are async functions taking an [`Event`] and a [`State`], and
//! returning an [`Action`].
//!
//! # Example
//!
//! ```no_run
//! use postkeeper::*;
//!
//! async fn log_media(e: Event, _: State<()>) -> anyhow::Result<Action> {
//!     log::info!("Media post in chat {}", e.update.chat_id()?);
//!     Ok(Action::Done)
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = Client::new(std::env::var("BOT_TOKEN").unwrap());
//!     let mut router = Router::<()>::new(client);
//!
//!     router.add_route(Route::ChannelPost(Matcher::Media), log_media);
//!     router.start().await;
//! }
//! ```

#[macro_use]
extern crate log;

extern crate self as postkeeper;

pub mod api;
pub mod archive;
pub mod bot;
pub mod client;
pub mod config;
pub mod event;
pub mod fake;
pub mod handler;
pub mod handlers;
pub mod router;
pub mod store;
pub mod text;
pub mod update;

pub use api::{ApiError, ApiResponse, API};
pub use archive::{Archiver, PostArtifact};
pub use client::*;
pub use event::*;
pub use handler::*;
pub use postkeeper_derive::BotState;
pub use router::*;
pub use text::*;
pub use update::*;

/// Sets up [`env_logger`] from `RUST_LOG`, falling back to `info`. Safe to
/// call more than once.
pub fn init_logger() {
    let env = env_logger::Env::default().default_filter_or("info");
    if env_logger::Builder::from_env(env).try_init().is_ok() {
        debug!("Logger initialized");
    }
}
