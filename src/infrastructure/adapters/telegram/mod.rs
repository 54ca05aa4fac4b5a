//! Telegram adapter

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::errors::BotError;
use crate::application::messaging::MessageParser;
use crate::domain::entities::{self, Command, ParseMode};
use crate::domain::traits::{Bot, BotInfo, KeyboardButton};

/// Telegram API base URL
pub const API_BASE: &str = "https://api.telegram.org";

/// Extra time on top of the long-poll timeout before the HTTP request gives up
const POLL_GRACE_SECS: u64 = 10;

/// Telegram update type
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    #[serde(default)]
    pub date: i64,
    pub text: Option<String>,
    pub reply_to_message: Option<Box<Message>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    pub message: Option<Message>,
    pub data: Option<String>,
}

/// Envelope around every Bot API response
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Serialize)]
struct InlineKeyboardMarkup {
    inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

#[derive(Debug, Serialize)]
struct InlineKeyboardButton {
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    callback_data: Option<String>,
}

impl From<&[Vec<KeyboardButton>]> for InlineKeyboardMarkup {
    fn from(buttons: &[Vec<KeyboardButton>]) -> Self {
        let inline_keyboard = buttons
            .iter()
            .map(|row| {
                row.iter()
                    .map(|btn| InlineKeyboardButton {
                        text: btn.text.clone(),
                        callback_data: btn.callback_data.clone(),
                    })
                    .collect()
            })
            .collect();
        Self { inline_keyboard }
    }
}

#[derive(Debug, Deserialize)]
struct MessageResult {
    message_id: i64,
}

impl From<User> for entities::User {
    fn from(user: User) -> Self {
        entities::User::new(user.id.to_string())
            .with_username(user.username)
            .with_first_name(user.first_name)
    }
}

/// Convert a Telegram update into a domain message.
///
/// Returns `None` for updates that carry nothing we handle.
pub fn update_to_message(update: Update, parser: &MessageParser) -> Option<entities::Message> {
    if let Some(msg) = update.message {
        let text = msg.text?;
        let chat_id = msg.chat.id.to_string();
        let reply_to_text = msg.reply_to_message.and_then(|m| m.text);
        let timestamp = DateTime::<Utc>::from_timestamp(msg.date, 0).unwrap_or_else(Utc::now);

        let message = parser
            .parse(chat_id, text, msg.from.map(Into::into))
            .with_id(msg.message_id.to_string())
            .with_reply_to_text(reply_to_text)
            .with_timestamp(timestamp);
        return Some(message);
    }

    if let Some(cb) = update.callback_query {
        // Inline-mode buttons have no message; acknowledge them anyway
        let (chat_id, message_id) = match &cb.message {
            Some(m) => (m.chat.id.to_string(), Some(m.message_id.to_string())),
            None => (cb.from.id.to_string(), None),
        };

        let mut message = parser.parse_callback(chat_id, cb.id, cb.data, cb.from.into());
        message.id = message_id;
        return Some(message);
    }

    None
}

/// Next getUpdates offset, keeping `current` when nothing arrived
pub fn next_offset(updates: &[Update], current: i64) -> i64 {
    updates
        .iter()
        .map(|u| u.update_id + 1)
        .max()
        .map_or(current, |next| next.max(current))
}

/// Telegram bot adapter
pub struct TelegramAdapter {
    token: String,
    api_base: String,
    client: Client,
    info: BotInfo,
}

impl TelegramAdapter {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_base: API_BASE.to_string(),
            client: Client::new(),
            info: BotInfo {
                id: "unknown".to_string(),
                name: "randomizer-bot".to_string(),
                username: String::new(),
            },
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Get the API URL for a method
    fn api_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token, method)
    }

    /// Call a Bot API method and unwrap its response envelope
    async fn call<P, T>(&self, method: &str, payload: &P, timeout: Option<Duration>) -> Result<T, BotError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.client.post(self.api_url(method)).json(payload);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();

        let body: ApiResponse<T> = match response.json().await {
            Ok(body) => body,
            Err(e) if !status.is_success() => {
                return Err(BotError::Network(format!("{} failed with {}: {}", method, status, e)));
            }
            Err(e) => return Err(BotError::Parse(e.to_string())),
        };

        if !body.ok {
            let description = body.description.unwrap_or_else(|| status.to_string());
            return Err(BotError::Api(format!("{}: {}", method, description)));
        }

        body.result
            .ok_or_else(|| BotError::Parse(format!("{} returned no result", method)))
    }

    /// Fetch bot info from Telegram API
    pub async fn fetch_bot_info(&mut self) -> Result<(), BotError> {
        #[derive(Deserialize)]
        struct BotInfoResponse {
            id: i64,
            first_name: String,
            username: Option<String>,
        }

        let data: BotInfoResponse = self.call("getMe", &serde_json::json!({}), None).await?;

        self.info = BotInfo {
            id: data.id.to_string(),
            name: data.first_name,
            username: data.username.unwrap_or_default(),
        };

        Ok(())
    }

    /// Get updates from Telegram using getUpdates API
    pub async fn get_updates(&self, offset: i64, timeout: u64) -> Result<Vec<Update>, BotError> {
        #[derive(Serialize)]
        struct GetUpdatesRequest {
            offset: i64,
            timeout: u64,
            allowed_updates: Vec<&'static str>,
        }

        let request = GetUpdatesRequest {
            offset,
            timeout,
            allowed_updates: vec!["message", "callback_query"],
        };

        self.call("getUpdates", &request, Some(Duration::from_secs(timeout + POLL_GRACE_SECS)))
            .await
    }

    /// Register bot commands with Telegram
    pub async fn register_commands(&self) -> Result<(), BotError> {
        #[derive(Serialize)]
        struct BotCommand {
            command: &'static str,
            description: &'static str,
        }

        #[derive(Serialize)]
        struct SetMyCommandsRequest {
            commands: Vec<BotCommand>,
        }

        let commands = Command::ALL
            .iter()
            .flat_map(|cmd| {
                std::iter::once(cmd.name())
                    .chain(cmd.aliases().iter().copied())
                    .map(move |name| BotCommand { command: name, description: cmd.description() })
            })
            .collect();

        let _: bool = self
            .call("setMyCommands", &SetMyCommandsRequest { commands }, None)
            .await?;

        tracing::info!("Registered bot commands with Telegram");
        Ok(())
    }

    async fn send_text(
        &self,
        chat_id: &str,
        text: &str,
        parse_mode: Option<ParseMode>,
        reply_markup: Option<InlineKeyboardMarkup>,
    ) -> Result<String, BotError> {
        #[derive(Serialize)]
        struct SendMessageRequest<'a> {
            chat_id: &'a str,
            text: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            parse_mode: Option<&'static str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            reply_markup: Option<InlineKeyboardMarkup>,
        }

        let request = SendMessageRequest {
            chat_id,
            text,
            parse_mode: parse_mode.map(|p| p.as_str()),
            reply_markup,
        };

        let data: MessageResult = self.call("sendMessage", &request, None).await?;
        Ok(data.message_id.to_string())
    }
}

#[async_trait]
impl Bot for TelegramAdapter {
    async fn start(&self) -> Result<(), BotError> {
        tracing::info!("Starting Telegram bot (token: {}...)", &self.token[..8.min(self.token.len())]);
        Ok(())
    }

    async fn send_message(&self, chat_id: &str, text: &str, parse_mode: Option<ParseMode>) -> Result<String, BotError> {
        tracing::debug!("Sending to {}: {}", chat_id, text);
        self.send_text(chat_id, text, parse_mode, None).await
    }

    async fn send_with_keyboard(
        &self,
        chat_id: &str,
        text: &str,
        parse_mode: Option<ParseMode>,
        buttons: &[Vec<KeyboardButton>],
    ) -> Result<String, BotError> {
        tracing::debug!("Sending with keyboard to {}: {}", chat_id, text);
        self.send_text(chat_id, text, parse_mode, Some(buttons.into())).await
    }

    async fn edit_message(&self, chat_id: &str, message_id: &str, text: &str) -> Result<(), BotError> {
        #[derive(Serialize)]
        struct EditMessageTextRequest<'a> {
            chat_id: &'a str,
            message_id: i64,
            text: &'a str,
        }

        let message_id = message_id
            .parse()
            .map_err(|_| BotError::Parse(format!("Invalid message id: {}", message_id)))?;

        let request = EditMessageTextRequest { chat_id, message_id, text };

        // Result is the edited message, or `true` for inline messages
        match self.call::<_, serde_json::Value>("editMessageText", &request, None).await {
            Ok(_) => Ok(()),
            Err(BotError::Api(e)) if e.contains("message is not modified") => {
                tracing::debug!("[{}] Message {} already shows this text", chat_id, message_id);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    async fn answer_callback(&self, callback_id: &str, text: Option<&str>) -> Result<(), BotError> {
        #[derive(Serialize)]
        struct AnswerRequest<'a> {
            callback_query_id: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            text: Option<&'a str>,
        }

        let request = AnswerRequest {
            callback_query_id: callback_id,
            text,
        };

        let _: bool = self.call("answerCallbackQuery", &request, None).await?;
        Ok(())
    }

    async fn send_dice(&self, chat_id: &str, emoji: &str) -> Result<String, BotError> {
        #[derive(Serialize)]
        struct SendDiceRequest<'a> {
            chat_id: &'a str,
            emoji: &'a str,
        }

        let data: MessageResult = self
            .call("sendDice", &SendDiceRequest { chat_id, emoji }, None)
            .await?;
        Ok(data.message_id.to_string())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
