//! Message parser - Parses raw chat text into structured messages

use crate::domain::entities::{Message, User};

/// Parses incoming text into structured Message objects
#[derive(Debug, Clone, Default)]
pub struct MessageParser {
    bot_username: Option<String>,
}

impl MessageParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only accept `/cmd@name` when `name` is this bot
    pub fn with_bot_username(mut self, username: impl Into<String>) -> Self {
        let username = username.into();
        self.bot_username = Some(username.trim_start_matches('@').to_string());
        self
    }

    /// Parse a text message
    pub fn parse(&self, chat_id: impl Into<String>, text: impl Into<String>, sender: Option<User>) -> Message {
        let text = text.into();
        let chat_id = chat_id.into();

        let parsed = text
            .strip_prefix('/')
            .and_then(|body| self.parse_command(&chat_id, body));

        parsed
            .unwrap_or_else(|| Message::from_text(chat_id, text))
            .with_sender_opt(sender)
    }

    /// Parse a command body (text after the slash)
    fn parse_command(&self, chat_id: &str, body: &str) -> Option<Message> {
        if body.starts_with(char::is_whitespace) {
            return None;
        }

        let mut parts = body.split_whitespace();
        let head = parts.next()?;

        let (name, target) = match head.split_once('@') {
            Some((name, target)) => (name, Some(target)),
            None => (head, None),
        };

        // Addressed to another bot in a group chat
        if let (Some(target), Some(me)) = (target, &self.bot_username) {
            if !target.eq_ignore_ascii_case(me) {
                return None;
            }
        }

        if name.is_empty() {
            return None;
        }

        let args = parts.map(str::to_string).collect();
        Some(Message::from_command(chat_id, name.to_lowercase(), args))
    }

    /// Parse a callback query (inline button press)
    pub fn parse_callback(
        &self,
        chat_id: impl Into<String>,
        callback_id: impl Into<String>,
        data: Option<String>,
        user: User,
    ) -> Message {
        Message::from_callback(chat_id, callback_id, data).with_sender(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Content, MessageType};

    fn command_parts(msg: &Message) -> (&str, Vec<&str>) {
        match &msg.content {
            Content::Command { name, args } => (name.as_str(), args.iter().map(String::as_str).collect()),
            other => panic!("expected command, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_command_with_args() {
        let parser = MessageParser::new();
        let msg = parser.parse("10", "/roll 1 6", None);
        assert_eq!(msg.message_type, MessageType::Command);
        assert_eq!(command_parts(&msg), ("roll", vec!["1", "6"]));
    }

    #[test]
    fn test_parse_lowercases_name_and_strips_own_mention() {
        let parser = MessageParser::new().with_bot_username("@RandBot");
        let msg = parser.parse("10", "/ROLL@randbot 1 6", None);
        assert_eq!(command_parts(&msg), ("roll", vec!["1", "6"]));
    }

    #[test]
    fn test_command_for_other_bot_is_plain_text() {
        let parser = MessageParser::new().with_bot_username("RandBot");
        let msg = parser.parse("10", "/roll@OtherBot", None);
        assert_eq!(msg.content, Content::Text("/roll@OtherBot".to_string()));
    }

    #[test]
    fn test_mention_accepted_when_username_unknown() {
        let parser = MessageParser::new();
        let msg = parser.parse("10", "/coin@SomeBot", None);
        assert_eq!(command_parts(&msg), ("coin", vec![]));
    }

    #[test]
    fn test_non_commands() {
        let parser = MessageParser::new();
        assert_eq!(parser.parse("10", "hello", None).content, Content::Text("hello".to_string()));
        assert!(!parser.parse("10", "/", None).content.is_command());
        assert!(!parser.parse("10", "/ roll", None).content.is_command());
    }

    #[test]
    fn test_choice_args_keep_punctuation() {
        let parser = MessageParser::new();
        let msg = parser.parse("10", "/choice чай, кофе;сок", None);
        assert_eq!(command_parts(&msg), ("choice", vec!["чай,", "кофе;сок"]));
    }

    #[test]
    fn test_parse_callback() {
        let parser = MessageParser::new();
        let msg = parser.parse_callback("10", "cb", Some("help_dice".to_string()), User::new("7"));
        assert_eq!(msg.content, Content::CallbackData(Some("help_dice".to_string())));
        assert_eq!(msg.sender, Some(User::new("7")));
    }
}
