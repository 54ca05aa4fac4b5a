use async_trait::async_trait;
use crate::domain::entities::ParseMode;
use crate::application::errors::BotError;

/// Bot trait - abstraction for messaging transports
#[async_trait]
pub trait Bot: Send + Sync {
    /// Prepare the transport before events start flowing
    async fn start(&self) -> Result<(), BotError>;

    /// Send a text message to a chat, returns the new message id
    async fn send_message(&self, chat_id: &str, text: &str, parse_mode: Option<ParseMode>) -> Result<String, BotError>;

    /// Send a message with inline keyboard
    async fn send_with_keyboard(
        &self,
        chat_id: &str,
        text: &str,
        parse_mode: Option<ParseMode>,
        buttons: &[Vec<KeyboardButton>],
    ) -> Result<String, BotError>;

    /// Replace the text of a message the bot sent earlier
    async fn edit_message(&self, chat_id: &str, message_id: &str, text: &str) -> Result<(), BotError>;

    /// Answer a callback query, clearing the client's loading indicator
    async fn answer_callback(&self, callback_id: &str, text: Option<&str>) -> Result<(), BotError>;

    /// Send the platform's animated dice
    async fn send_dice(&self, chat_id: &str, emoji: &str) -> Result<String, BotError>;

    /// Get bot info
    fn bot_info(&self) -> BotInfo;
}

/// Keyboard button for inline keyboards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardButton {
    pub text: String,
    pub callback_data: Option<String>,
}

impl KeyboardButton {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            callback_data: None,
        }
    }

    pub fn with_callback(mut self, data: impl Into<String>) -> Self {
        self.callback_data = Some(data.into());
        self
    }
}

/// Bot information
#[derive(Debug, Clone, Default)]
pub struct BotInfo {
    pub id: String,
    pub name: String,
    pub username: String,
}
