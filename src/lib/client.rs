use anyhow::Result;
use derive_more::{Display, From};
use serde::de::DeserializeOwned;

use crate::api::ApiResponse;

/// Bot token issued by @BotFather.
#[derive(Debug, Clone, From, Display)]
pub struct ApiToken(String);

impl From<&str> for ApiToken {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

/// Transport used by [`Client`] in place of HTTP. Implemented by
/// [`crate::fake::FakeAPI`] so bots can be tested without Telegram.
#[async_trait::async_trait]
pub trait Post {
    /// Handle Bot API `method` with the JSON encoded `req`, returning the JSON
    /// encoded `ApiResponse`.
    async fn post(&self, method: String, req: String) -> Result<String>;

    /// Return the contents of the file at `file_path` on the file endpoint.
    async fn download(&self, file_path: String) -> Result<bytes::Bytes>;
}

/// HTTP transport for the Bot API. Method calls go to `base_url`, file
/// downloads to `file_url`; both embed the token.
pub struct Client {
    base_url: String,
    file_url: String,
    client: reqwest::Client,

    /// Replaces HTTP when set.
    post_handler: Option<Box<dyn Post + Send + Sync>>,
}

impl Client {
    pub fn new(token: impl Into<ApiToken>) -> Self {
        let token = token.into();
        Self {
            base_url: format!("https://api.telegram.org/bot{token}"),
            file_url: format!("https://api.telegram.org/file/bot{token}"),
            client: reqwest::Client::new(),
            post_handler: None,
        }
    }

    pub fn with_post_handler(mut self, post_handler: impl Post + Send + Sync + 'static) -> Self {
        self.post_handler = Some(Box::new(post_handler));
        self
    }

    /// Posts `req` to Bot API `method` and unwraps the response envelope.
    pub async fn post<Req, Resp>(&self, method: &str, req: &Req) -> Result<Resp>
    where
        Req: crate::api::Request,
        Resp: DeserializeOwned,
    {
        let req = serde_json::to_string(req)?;
        debug!("POST /{}: {}", method, req);

        let body = match self.post_handler {
            Some(ref post_handler) => post_handler.post(method.to_string(), req).await?,
            None => {
                self.client
                    .post(format!("{}/{}", self.base_url, method))
                    .header(reqwest::header::CONTENT_TYPE, "application/json")
                    .body(req)
                    .send()
                    .await?
                    .text()
                    .await?
            }
        };

        debug!("Response /{}: {}", method, body);
        Ok(ApiResponse::<Resp>::parse(&body)?.into_result()?)
    }

    /// Fetch the contents of `file_path` (as returned by `getFile`).
    pub async fn download_file(&self, file_path: &str) -> Result<bytes::Bytes> {
        debug!("Downloading file /{}", file_path);
        let body = match self.post_handler {
            Some(ref post_handler) => post_handler.download(file_path.to_string()).await?,
            None => {
                self.client
                    .get(format!("{}/{}", self.file_url, file_path))
                    .send()
                    .await?
                    .error_for_status()?
                    .bytes()
                    .await?
            }
        };
        debug!("Downloaded /{} ({} bytes)", file_path, body.len());
        Ok(body)
    }
}
