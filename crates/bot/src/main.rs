//! `passkeep-bot` -- Telegram entry point to the Passkeep mini-app.
//!
//! Long-polls the Bot API and answers every text message with a button
//! that opens the frontend as a Telegram web app.
//!
//! # Environment variables
//!
//! | Variable             | Required | Default                    | Description                     |
//! |----------------------|----------|----------------------------|---------------------------------|
//! | `TELEGRAM_BOT_TOKEN` | yes      | --                         | Token issued by @BotFather      |
//! | `MINI_APP_URL`       | yes      | --                         | HTTPS URL of the frontend       |
//! | `TELEGRAM_API_URL`   | no       | `https://api.telegram.org` | Bot API base URL                |
//! | `POLL_TIMEOUT_SECS`  | no       | `30`                       | Long-poll timeout per request   |

use passkeep_bot::config::BotConfig;
use passkeep_bot::poller::Poller;
use passkeep_bot::telegram::HttpTelegramApi;
use tokio_util::sync::CancellationToken;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "passkeep_bot=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = BotConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid bot configuration");
        std::process::exit(1);
    });

    tracing::info!(
        mini_app_url = %config.mini_app_url,
        poll_timeout_secs = config.poll_timeout_secs,
        "Starting passkeep-bot",
    );

    let api = HttpTelegramApi::new(&config.api_url, &config.token);
    let poller = Poller::new(api, config.mini_app_url, config.poll_timeout_secs);

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received SIGINT (Ctrl-C), stopping");
        }
        shutdown.cancel();
    });

    poller.run(cancel).await;
}
