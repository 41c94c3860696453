use crate::api::ParseMode;

/// Outgoing message text, tagged with how Telegram should render it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Text {
    Plain(String),
    /// MarkdownV2. User input must go through [`crate::api::escape_md`].
    Markdown(String),
}

impl Text {
    pub fn into_parts(self) -> (String, Option<ParseMode>) {
        match self {
            Text::Plain(body) => (body, None),
            Text::Markdown(body) => (body, Some(ParseMode::MarkdownV2)),
        }
    }
}

impl From<&str> for Text {
    fn from(text: &str) -> Self {
        Text::Plain(text.into())
    }
}

impl From<String> for Text {
    fn from(text: String) -> Self {
        Text::Plain(text)
    }
}
