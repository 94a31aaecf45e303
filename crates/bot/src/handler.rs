//! Turns incoming updates into replies.

use crate::telegram::{InlineKeyboardButton, InlineKeyboardMarkup, SendMessage, Update, WebAppInfo};

pub const OPEN_BUTTON_TEXT: &str = "Open Passkeep";

const WELCOME_TEXT: &str = "Passkeep keeps your passwords in one place. \
Tap the button below to open your vault.";

const HELP_TEXT: &str = "Send /start or tap the button below to open Passkeep.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/start`, with the deep-link payload if one was given.
    Start(Option<String>),
    Help,
    /// Any other text.
    Text,
}

impl Command {
    /// Parse message text. Commands may carry a `@BotName` suffix, as sent
    /// in group chats.
    pub fn parse(text: &str) -> Self {
        let mut parts = text.trim().splitn(2, char::is_whitespace);
        let head = parts.next().unwrap_or_default();
        let command = head.split('@').next().unwrap_or_default();

        match command {
            "/start" => Command::Start(
                parts
                    .next()
                    .map(str::trim)
                    .filter(|payload| !payload.is_empty())
                    .map(str::to_string),
            ),
            "/help" => Command::Help,
            _ => Command::Text,
        }
    }
}

/// The reply to `update`, or `None` when the update carries no text message.
pub fn reply_for(update: &Update, mini_app_url: &str) -> Option<SendMessage> {
    let message = update.message.as_ref()?;
    let text = message.text.as_deref()?;

    let body = match Command::parse(text) {
        Command::Start(_) => match message.from.as_ref() {
            Some(user) => format!("Hi, {}! {WELCOME_TEXT}", user.first_name),
            None => WELCOME_TEXT.to_string(),
        },
        Command::Help | Command::Text => HELP_TEXT.to_string(),
    };

    Some(SendMessage {
        chat_id: message.chat.id,
        text: body,
        reply_markup: Some(open_app_keyboard(mini_app_url)),
    })
}

/// One-button keyboard launching the mini-app.
pub fn open_app_keyboard(mini_app_url: &str) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup {
        inline_keyboard: vec![vec![InlineKeyboardButton {
            text: OPEN_BUTTON_TEXT.to_string(),
            web_app: Some(WebAppInfo {
                url: mini_app_url.to_string(),
            }),
        }]],
    }
}
