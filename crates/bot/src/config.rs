use crate::error::BotError;

/// Bot configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub token: String,
    /// URL the "Open Passkeep" button launches as a Telegram mini-app.
    pub mini_app_url: String,
    /// Bot API base URL (default: `https://api.telegram.org`).
    pub api_url: String,
    /// Long-poll timeout passed to `getUpdates` (default: `30`).
    pub poll_timeout_secs: u64,
}

impl BotConfig {
    /// | Env Var              | Required | Default                    |
    /// |----------------------|----------|----------------------------|
    /// | `TELEGRAM_BOT_TOKEN` | yes      | --                         |
    /// | `MINI_APP_URL`       | yes      | --                         |
    /// | `TELEGRAM_API_URL`   | no       | `https://api.telegram.org` |
    /// | `POLL_TIMEOUT_SECS`  | no       | `30`                       |
    pub fn from_env() -> Result<Self, BotError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, BotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(BotError::MissingVar(name))
        };

        let token = required("TELEGRAM_BOT_TOKEN")?;
        let mini_app_url = required("MINI_APP_URL")?;

        // Telegram only opens web apps served over HTTPS.
        if !mini_app_url.starts_with("https://") {
            return Err(BotError::InvalidVar {
                name: "MINI_APP_URL",
                expected: "an https:// URL",
                value: mini_app_url,
            });
        }

        let api_url = lookup("TELEGRAM_API_URL")
            .unwrap_or_else(|| "https://api.telegram.org".into())
            .trim_end_matches('/')
            .to_string();

        let poll_timeout_secs = match lookup("POLL_TIMEOUT_SECS") {
            None => 30,
            Some(raw) => raw.trim().parse().map_err(|_| BotError::InvalidVar {
                name: "POLL_TIMEOUT_SECS",
                expected: "a number of seconds",
                value: raw,
            })?,
        };

        Ok(Self {
            token,
            mini_app_url,
            api_url,
            poll_timeout_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<BotConfig, BotError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        BotConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn required_vars_with_defaults() {
        let config = load(&[
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("MINI_APP_URL", "https://app.passkeep.test"),
        ])
        .unwrap();

        assert_eq!(config.token, "123:abc");
        assert_eq!(config.api_url, "https://api.telegram.org");
        assert_eq!(config.poll_timeout_secs, 30);
    }

    #[test]
    fn missing_token_is_reported() {
        assert_matches!(
            load(&[("MINI_APP_URL", "https://app.passkeep.test")]),
            Err(BotError::MissingVar("TELEGRAM_BOT_TOKEN"))
        );
        assert_matches!(
            load(&[("TELEGRAM_BOT_TOKEN", "  "), ("MINI_APP_URL", "https://x.test")]),
            Err(BotError::MissingVar("TELEGRAM_BOT_TOKEN"))
        );
    }

    #[test]
    fn mini_app_must_be_https() {
        assert_matches!(
            load(&[("TELEGRAM_BOT_TOKEN", "t"), ("MINI_APP_URL", "http://localhost:5173")]),
            Err(BotError::InvalidVar { name: "MINI_APP_URL", .. })
        );
    }

    #[test]
    fn api_url_trailing_slash_is_trimmed() {
        let config = load(&[
            ("TELEGRAM_BOT_TOKEN", "t"),
            ("MINI_APP_URL", "https://x.test"),
            ("TELEGRAM_API_URL", "http://127.0.0.1:8081/"),
            ("POLL_TIMEOUT_SECS", "5"),
        ])
        .unwrap();
        assert_eq!(config.api_url, "http://127.0.0.1:8081");
        assert_eq!(config.poll_timeout_secs, 5);
    }
}
