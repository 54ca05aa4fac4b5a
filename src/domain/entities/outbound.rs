use crate::domain::traits::KeyboardButton;

/// Telegram text formatting mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// Legacy Markdown: `*bold*`, `` `code` ``
    Markdown,
}

impl ParseMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseMode::Markdown => "Markdown",
        }
    }
}

/// A text message to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub chat_id: String,
    pub text: String,
    pub parse_mode: Option<ParseMode>,
    pub keyboard: Vec<Vec<KeyboardButton>>,
}

impl Reply {
    pub fn new(chat_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            text: text.into(),
            parse_mode: None,
            keyboard: Vec::new(),
        }
    }

    pub fn markdown(mut self) -> Self {
        self.parse_mode = Some(ParseMode::Markdown);
        self
    }

    pub fn with_keyboard(mut self, keyboard: Vec<Vec<KeyboardButton>>) -> Self {
        self.keyboard = keyboard;
        self
    }
}

/// The single action produced for one inbound event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    /// Send a text message, optionally with an inline keyboard
    Text(Reply),
    /// Send the platform's animated dice
    Dice { chat_id: String, emoji: String },
    /// Acknowledge a button press, then replace the text of the message carrying it
    CallbackEdit {
        callback_id: String,
        chat_id: String,
        message_id: Option<String>,
        text: String,
    },
}

impl Outbound {
    /// Text that will be shown, for assertions and log lines
    pub fn text(&self) -> Option<&str> {
        match self {
            Outbound::Text(reply) => Some(&reply.text),
            Outbound::Dice { .. } => None,
            Outbound::CallbackEdit { text, .. } => Some(text),
        }
    }
}
