use crate::{Action, Event, State, Update};

/// This handler logs every update received.
pub async fn log_handler<S: Clone>(e: Event, _: State<S>) -> Result<Action, anyhow::Error> {
    match e.update {
        Update::Message(message) | Update::EditedMessage(message) => {
            let from = message.from.unwrap_or_default();
            let text = message.text.unwrap_or_default();

            info!(
                "({}) Message from {}: {}",
                message.chat.id, from.first_name, text
            );
        }
        Update::ChannelPost(message) | Update::EditedChannelPost(message) => {
            let channel = message.chat.username.unwrap_or_default();
            let body = message.caption.or(message.text).unwrap_or_default();

            info!(
                "({}) Post {} in @{}: {}",
                message.chat.id, message.message_id, channel, body
            );
        }
        Update::Unknown => {
            debug!("Unknown update type");
        }
    }

    Ok(Action::Next)
}
