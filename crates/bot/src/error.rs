/// Errors from the bot's configuration and the Telegram Bot API layer.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    /// A required environment variable is unset or empty.
    #[error("{0} environment variable is required")]
    MissingVar(&'static str),

    /// An environment variable is set but unusable.
    #[error("{name} must be {expected}, got '{value}'")]
    InvalidVar {
        name: &'static str,
        expected: &'static str,
        value: String,
    },

    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Http(reqwest::Error),

    /// Telegram answered with `ok: false`.
    #[error("Telegram API error ({code}): {description}")]
    Api { code: i64, description: String },
}

impl From<reqwest::Error> for BotError {
    /// Request URLs embed the bot token, so they are stripped here.
    fn from(err: reqwest::Error) -> Self {
        BotError::Http(err.without_url())
    }
}
