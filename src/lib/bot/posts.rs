use anyhow::Result;

use crate::{Action, Event, State};

use super::App;

/// Archives new posts from watched channels. Posts from other channels are
/// logged and dropped.
pub async fn archive_post(e: Event, state: State<App>) -> Result<Action> {
    let message = e.update.get_new_post()?;

    let Some(username) = message.chat.username.as_deref() else {
        info!(
            "Ignoring post {} from private channel {}",
            message.message_id, message.chat.id
        );
        return Ok(Action::Done);
    };

    let app = state.get().read().await.clone();

    if !app.is_watched(username)? {
        info!(
            "Ignoring post {} from @{}: not a watched channel",
            message.message_id, username
        );
        return Ok(Action::Done);
    }

    let artifact = app.archiver.archive(&e.api, message).await?;
    if artifact.failed > 0 {
        warn!(
            "Post {} from @{} archived with {} failures",
            message.message_id, username, artifact.failed
        );
    }

    Ok(Action::Done)
}

/// Edits are not archived; the first version of a post is what gets saved.
pub async fn skip_edited_post(e: Event, _: State<App>) -> Result<Action> {
    let message = e.update.get_post()?;
    debug!(
        "Skipping edit of post {} in chat {}",
        message.message_id, message.chat.id
    );
    Ok(Action::Done)
}
