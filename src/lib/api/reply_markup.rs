use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct KeyboardButton {
    /// Sent as a message when the button is pressed.
    pub text: String,
}

impl<T: Into<String>> From<T> for KeyboardButton {
    fn from(text: T) -> Self {
        Self { text: text.into() }
    }
}

/// A custom reply keyboard (Telegram's `ReplyKeyboardMarkup`). Only the
/// fields the bot sets are modelled.
#[derive(Default, Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ReplyMarkup {
    pub keyboard: Vec<Vec<KeyboardButton>>,

    #[serde(default)]
    pub resize_keyboard: bool,

    #[serde(default)]
    pub one_time_keyboard: bool,
}

impl ReplyMarkup {
    /// One button per row, sized to fit, kept open after use.
    pub fn menu<T: Into<String>>(buttons: impl IntoIterator<Item = T>) -> Self {
        Self {
            keyboard: buttons
                .into_iter()
                .map(|b| vec![KeyboardButton::from(b)])
                .collect(),
            resize_keyboard: true,
            one_time_keyboard: false,
        }
    }

    /// Button labels, row by row.
    pub fn buttons(&self) -> Vec<Vec<String>> {
        self.keyboard
            .iter()
            .map(|row| row.iter().map(|b| b.text.clone()).collect())
            .collect()
    }
}
