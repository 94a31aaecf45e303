//! Telegram Bot API client.
//!
//! Only the two methods the bot needs are covered: `getUpdates` for long
//! polling and `sendMessage` for replies. [`TelegramApi`] is the seam the
//! poll loop is written against; [`HttpTelegramApi`] is the [`reqwest`]
//! implementation.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};

use crate::error::BotError;

/// Extra time on top of the long-poll timeout before the HTTP request
/// itself is abandoned.
const REQUEST_GRACE: Duration = Duration::from_secs(10);

/// Timeout for `sendMessage`.
const SEND_TIMEOUT: Duration = Duration::from_secs(15);

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    #[serde(default)]
    pub from: Option<User>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    #[serde(default)]
    pub username: Option<String>,
}

/// Body of a `sendMessage` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SendMessage {
    pub chat_id: i64,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_app: Option<WebAppInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebAppInfo {
    pub url: String,
}

#[derive(Debug, Serialize)]
struct GetUpdates {
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<i64>,
    timeout: u64,
    allowed_updates: &'static [&'static str],
}

/// Envelope every Bot API method answers with.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
    error_code: Option<i64>,
}

impl<T> ApiResponse<T> {
    fn into_result(self) -> Result<T, BotError> {
        match self {
            ApiResponse {
                ok: true,
                result: Some(result),
                ..
            } => Ok(result),
            ApiResponse {
                description,
                error_code,
                ..
            } => Err(BotError::Api {
                code: error_code.unwrap_or_default(),
                description: description.unwrap_or_else(|| "missing result".to_string()),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

#[async_trait]
pub trait TelegramApi: Send + Sync {
    /// Long-poll for updates with `update_id >= offset`.
    async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, BotError>;

    async fn send_message(&self, message: &SendMessage) -> Result<(), BotError>;
}

/// Bot API client over HTTPS.
pub struct HttpTelegramApi {
    client: reqwest::Client,
    /// `{api_url}/bot{token}`; never logged.
    base_url: String,
}

impl HttpTelegramApi {
    pub fn new(api_url: &str, token: &str) -> Self {
        Self::with_client(reqwest::Client::new(), api_url, token)
    }

    pub fn with_client(client: reqwest::Client, api_url: &str, token: &str) -> Self {
        Self {
            client,
            base_url: format!("{}/bot{token}", api_url.trim_end_matches('/')),
        }
    }

    async fn call<B, T>(&self, method: &str, body: &B, timeout: Duration) -> Result<T, BotError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        let response: ApiResponse<T> = self
            .client
            .post(format!("{}/{method}", self.base_url))
            .timeout(timeout)
            .json(body)
            .send()
            .await?
            .json()
            .await?;

        response.into_result()
    }
}

#[async_trait]
impl TelegramApi for HttpTelegramApi {
    async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, BotError> {
        let body = GetUpdates {
            offset,
            timeout: timeout_secs,
            allowed_updates: &["message"],
        };
        self.call(
            "getUpdates",
            &body,
            Duration::from_secs(timeout_secs) + REQUEST_GRACE,
        )
        .await
    }

    async fn send_message(&self, message: &SendMessage) -> Result<(), BotError> {
        self.call::<_, IgnoredAny>("sendMessage", message, SEND_TIMEOUT)
            .await
            .map(|_| ())
    }
}
