use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use crate::Client;

/// Typed entry point to the Bot API methods the archiver uses. Each method
/// lives next to its request type in the sibling modules.
pub struct API {
    pub client: Client,
}

impl API {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

/// Marker for bodies that can be posted to a Bot API method. Derive it with
/// `#[derive(BotRequest)]`.
pub trait Request: Serialize + Send + Sync {}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Telegram answered with `ok: false`.
    #[error("Telegram error: {description}")]
    Telegram {
        code: Option<i64>,
        description: String,
    },

    /// Telegram answered with `ok: true` but no `result`.
    #[error("Telegram returned no result")]
    MissingResult,
}

/// Envelope of every Bot API response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiResponse<T> {
    pub ok: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T> ApiResponse<T> {
    /// A successful response carrying `result`.
    pub fn ok(result: T) -> Self {
        Self {
            ok: true,
            error_code: None,
            description: None,
            result: Some(result),
        }
    }

    /// A failed response, as Telegram sends for a bad request.
    pub fn error(description: impl Into<String>) -> Self {
        Self {
            ok: false,
            error_code: Some(400),
            description: Some(description.into()),
            result: None,
        }
    }

    pub fn into_result(self) -> Result<T, ApiError> {
        if !self.ok {
            return Err(ApiError::Telegram {
                code: self.error_code,
                description: self
                    .description
                    .unwrap_or_else(|| "no description".to_string()),
            });
        }
        self.result.ok_or(ApiError::MissingResult)
    }
}

impl<T: DeserializeOwned> ApiResponse<T> {
    pub fn parse(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }
}
