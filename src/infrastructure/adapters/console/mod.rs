//! Console adapter for development/testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use crate::application::errors::BotError;
use crate::application::messaging::MessageParser;
use crate::domain::entities::{Message, ParseMode, User};
use crate::domain::traits::{Bot, BotInfo, KeyboardButton};

/// Chat id used for every console message
pub const CONSOLE_CHAT: &str = "console";

/// Console bot adapter for local development
pub struct ConsoleAdapter {
    info: BotInfo,
    lines: Mutex<Lines<BufReader<Stdin>>>,
    next_message_id: AtomicU64,
}

impl ConsoleAdapter {
    pub fn new() -> Self {
        Self {
            info: BotInfo {
                id: "console".to_string(),
                name: "randomizer-bot".to_string(),
                username: "console".to_string(),
            },
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
            next_message_id: AtomicU64::new(1),
        }
    }

    /// Read the next line from stdin, `None` at end of input
    pub async fn read_line(&self) -> Result<Option<String>, BotError> {
        self.lines
            .lock()
            .await
            .next_line()
            .await
            .map_err(|e| BotError::Internal(format!("Failed to read stdin: {}", e)))
    }

    fn next_id(&self) -> String {
        self.next_message_id.fetch_add(1, Ordering::Relaxed).to_string()
    }

    /// The id of the most recently printed message
    pub fn last_message_id(&self) -> Option<String> {
        match self.next_message_id.load(Ordering::Relaxed) {
            1 => None,
            next => Some((next - 1).to_string()),
        }
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn one console line into a message.
///
/// `#token` presses a menu button on `button_message`, anything else is
/// parsed like chat text.
pub fn line_to_message(line: &str, parser: &MessageParser, button_message: Option<String>) -> Option<Message> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let user = User::new("local").with_username(Some("console".to_string()));

    if let Some(token) = line.strip_prefix('#') {
        let mut msg = parser.parse_callback(CONSOLE_CHAT, "console-callback", Some(token.to_string()), user);
        msg.id = button_message;
        return Some(msg);
    }

    Some(parser.parse(CONSOLE_CHAT, line, Some(user)))
}

#[async_trait]
impl Bot for ConsoleAdapter {
    async fn start(&self) -> Result<(), BotError> {
        tracing::info!("Starting console bot (dev mode)");
        println!("Type commands like /roll 1 6. Press a menu button with #help_roll.");
        Ok(())
    }

    async fn send_message(&self, _chat_id: &str, text: &str, _parse_mode: Option<ParseMode>) -> Result<String, BotError> {
        let id = self.next_id();
        println!("[BOT #{}] {}", id, text);
        Ok(id)
    }

    async fn send_with_keyboard(
        &self,
        chat_id: &str,
        text: &str,
        parse_mode: Option<ParseMode>,
        buttons: &[Vec<KeyboardButton>],
    ) -> Result<String, BotError> {
        let id = self.send_message(chat_id, text, parse_mode).await?;
        for row in buttons {
            let row_text: Vec<String> = row
                .iter()
                .map(|b| format!("{} (#{})", b.text, b.callback_data.as_deref().unwrap_or("")))
                .collect();
            println!("  [Buttons] {}", row_text.join(" | "));
        }
        Ok(id)
    }

    async fn edit_message(&self, _chat_id: &str, message_id: &str, text: &str) -> Result<(), BotError> {
        println!("[BOT #{} edited] {}", message_id, text);
        Ok(())
    }

    async fn answer_callback(&self, _callback_id: &str, _text: Option<&str>) -> Result<(), BotError> {
        Ok(())
    }

    async fn send_dice(&self, chat_id: &str, emoji: &str) -> Result<String, BotError> {
        self.send_message(chat_id, emoji, None).await
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
