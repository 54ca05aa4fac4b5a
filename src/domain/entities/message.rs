use super::User;
use chrono::{DateTime, Utc};

/// Kind of inbound event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageType {
    Text,
    Command,
    Callback,
}

impl MessageType {
    pub fn as_str(&self) -> &str {
        match self {
            MessageType::Text => "text",
            MessageType::Command => "command",
            MessageType::Callback => "callback",
        }
    }
}

/// Message content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Command { name: String, args: Vec<String> },
    CallbackData(Option<String>),
    Empty,
}

impl Content {
    pub fn text(&self) -> Option<&str> {
        match self {
            Content::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_command(&self) -> bool {
        matches!(self, Content::Command { .. })
    }
}

/// An inbound event, independent of the transport that delivered it
#[derive(Debug, Clone)]
pub struct Message {
    /// Platform message id. For callbacks this is the message carrying the button.
    pub id: Option<String>,
    pub chat_id: String,
    pub sender: Option<User>,
    pub content: Content,
    pub message_type: MessageType,
    /// Text of the message this one replies to
    pub reply_to_text: Option<String>,
    /// Set for button presses, needed to acknowledge them
    pub callback_id: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(chat_id: impl Into<String>, content: Content) -> Self {
        let message_type = match &content {
            Content::Command { .. } => MessageType::Command,
            Content::CallbackData(_) => MessageType::Callback,
            Content::Text(_) | Content::Empty => MessageType::Text,
        };

        Self {
            id: None,
            chat_id: chat_id.into(),
            sender: None,
            content,
            message_type,
            reply_to_text: None,
            callback_id: None,
            timestamp: Utc::now(),
        }
    }

    pub fn from_text(chat_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(chat_id, Content::Text(text.into()))
    }

    pub fn from_command(chat_id: impl Into<String>, name: impl Into<String>, args: Vec<String>) -> Self {
        Self::new(chat_id, Content::Command { name: name.into(), args })
    }

    pub fn from_callback(
        chat_id: impl Into<String>,
        callback_id: impl Into<String>,
        data: Option<String>,
    ) -> Self {
        let mut msg = Self::new(chat_id, Content::CallbackData(data));
        msg.callback_id = Some(callback_id.into());
        msg
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_sender(mut self, user: User) -> Self {
        self.sender = Some(user);
        self
    }

    pub fn with_sender_opt(mut self, user: Option<User>) -> Self {
        if let Some(u) = user {
            self.sender = Some(u);
        }
        self
    }

    pub fn with_reply_to_text(mut self, text: Option<String>) -> Self {
        self.reply_to_text = text;
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Who sent this, for log lines
    pub fn sender_name(&self) -> String {
        self.sender
            .as_ref()
            .map(|u| u.display_name())
            .unwrap_or_else(|| "unknown".to_string())
    }
}
