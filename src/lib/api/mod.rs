#[allow(clippy::module_inception)]
pub mod api;
pub mod botcommand;
pub mod chat;
pub mod file;
pub mod format;
pub mod media;
pub mod message;
pub mod photo_size;
pub mod reply_markup;
pub mod update;
pub mod user;

pub use api::*;
pub use botcommand::*;
pub use chat::*;
pub use file::*;
pub use format::*;
pub use media::*;
pub use message::*;
pub use photo_size::*;
pub use reply_markup::*;
pub use update::*;
pub use user::*;
