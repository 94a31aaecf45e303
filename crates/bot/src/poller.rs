//! Long-polling update loop.
//!
//! Fetches updates with `getUpdates`, answers each one and advances the
//! offset past it. Failed polls are retried after a fixed delay; the loop
//! only ends when its [`CancellationToken`] fires.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::BotError;
use crate::handler::reply_for;
use crate::telegram::TelegramApi;

/// Delay before polling again after a failed `getUpdates`.
pub const RETRY_DELAY: Duration = Duration::from_secs(5);

pub struct Poller<A> {
    api: A,
    mini_app_url: String,
    poll_timeout_secs: u64,
    retry_delay: Duration,
}

impl<A: TelegramApi> Poller<A> {
    pub fn new(api: A, mini_app_url: impl Into<String>, poll_timeout_secs: u64) -> Self {
        Self {
            api,
            mini_app_url: mini_app_url.into(),
            poll_timeout_secs,
            retry_delay: RETRY_DELAY,
        }
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Run until `cancel` fires.
    pub async fn run(&self, cancel: CancellationToken) {
        tracing::info!(poll_timeout_secs = self.poll_timeout_secs, "Polling for updates");
        let mut offset = None;

        loop {
            let polled = tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                polled = self.poll_once(offset) => polled,
            };

            match polled {
                Ok(next) => offset = next,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to fetch updates");
                    tokio::select! {
                        biased;
                        () = cancel.cancelled() => break,
                        () = tokio::time::sleep(self.retry_delay) => {}
                    }
                }
            }
        }

        tracing::info!("Update loop stopped");
    }

    /// Fetch one batch of updates and answer them.
    ///
    /// Returns the offset for the next poll. A reply that fails to send is
    /// logged and the update is still acknowledged.
    pub async fn poll_once(&self, offset: Option<i64>) -> Result<Option<i64>, BotError> {
        let updates = self.api.get_updates(offset, self.poll_timeout_secs).await?;
        let mut next = offset;

        for update in &updates {
            match reply_for(update, &self.mini_app_url) {
                Some(reply) => {
                    let chat_id = reply.chat_id;
                    match self.api.send_message(&reply).await {
                        Ok(()) => tracing::debug!(update_id = update.update_id, chat_id, "Replied"),
                        Err(e) => tracing::warn!(
                            update_id = update.update_id,
                            chat_id,
                            error = %e,
                            "Failed to send reply",
                        ),
                    }
                }
                None => tracing::debug!(update_id = update.update_id, "Ignoring non-text update"),
            }

            next = Some(next.map_or(update.update_id + 1, |n: i64| n.max(update.update_id + 1)));
        }

        Ok(next)
    }
}
