//! End-to-end dispatch tests against a recording transport
//! Run with: cargo test --test dispatch_test

use std::sync::{Mutex, Once};

use async_trait::async_trait;
use randomizer_bot::application::errors::BotError;
use randomizer_bot::application::messaging::{texts, Dispatcher, MessageParser};
use randomizer_bot::application::services::MessageService;
use randomizer_bot::domain::entities::{Message, Outbound, ParseMode};
use randomizer_bot::domain::traits::{Bot, BotInfo, KeyboardButton};

static INIT: Once = Once::new();

fn ensure_init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Send { chat_id: String, text: String, parse_mode: Option<ParseMode>, buttons: usize },
    Edit { chat_id: String, message_id: String, text: String },
    Answer { callback_id: String },
    Dice { chat_id: String, emoji: String },
}

/// Records every transport call instead of talking to Telegram
#[derive(Default)]
struct RecordingBot {
    calls: Mutex<Vec<Call>>,
    reject_markdown: bool,
    /// Every send fails with this API error
    send_error: Option<&'static str>,
}

impl RecordingBot {
    fn rejecting_markdown() -> Self {
        Self { reject_markdown: true, ..Self::default() }
    }

    fn failing_sends(error: &'static str) -> Self {
        Self { send_error: Some(error), ..Self::default() }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn start(&self) -> Result<(), BotError> {
        Ok(())
    }

    async fn send_message(&self, chat_id: &str, text: &str, parse_mode: Option<ParseMode>) -> Result<String, BotError> {
        self.send_with_keyboard(chat_id, text, parse_mode, &[]).await
    }

    async fn send_with_keyboard(
        &self,
        chat_id: &str,
        text: &str,
        parse_mode: Option<ParseMode>,
        buttons: &[Vec<KeyboardButton>],
    ) -> Result<String, BotError> {
        self.record(Call::Send {
            chat_id: chat_id.to_string(),
            text: text.to_string(),
            parse_mode,
            buttons: buttons.iter().map(Vec::len).sum(),
        });
        if let Some(error) = self.send_error {
            return Err(BotError::Api(error.to_string()));
        }
        if self.reject_markdown && parse_mode.is_some() {
            return Err(BotError::Api("sendMessage: Bad Request: can't parse entities".to_string()));
        }
        Ok("1".to_string())
    }

    async fn edit_message(&self, chat_id: &str, message_id: &str, text: &str) -> Result<(), BotError> {
        self.record(Call::Edit {
            chat_id: chat_id.to_string(),
            message_id: message_id.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str, _text: Option<&str>) -> Result<(), BotError> {
        self.record(Call::Answer { callback_id: callback_id.to_string() });
        Ok(())
    }

    async fn send_dice(&self, chat_id: &str, emoji: &str) -> Result<String, BotError> {
        self.record(Call::Dice { chat_id: chat_id.to_string(), emoji: emoji.to_string() });
        Ok("2".to_string())
    }

    fn bot_info(&self) -> BotInfo {
        BotInfo {
            id: "1".to_string(),
            name: "test".to_string(),
            username: "RandBot".to_string(),
        }
    }
}

fn service(bot: RecordingBot) -> MessageService<RecordingBot> {
    ensure_init();
    MessageService::new(bot, Dispatcher::new())
}

fn text_message(text: &str) -> Message {
    MessageParser::new().with_bot_username("RandBot").parse("500", text, None)
}

#[tokio::test]
async fn test_start_sends_menu() {
    let service = service(RecordingBot::default());
    service.process(text_message("/start")).await.unwrap();

    assert_eq!(
        service.bot().calls(),
        vec![Call::Send {
            chat_id: "500".to_string(),
            text: texts::WELCOME.to_string(),
            parse_mode: None,
            buttons: 5,
        }]
    );
}

#[tokio::test]
async fn test_button_press_answers_then_edits() {
    let service = service(RecordingBot::default());
    let press = Message::from_callback("500", "cb-1", Some("help_choice".to_string())).with_id("77");
    service.process(press).await.unwrap();

    let calls = service.bot().calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], Call::Answer { callback_id: "cb-1".to_string() });
    match &calls[1] {
        Call::Edit { chat_id, message_id, text } => {
            assert_eq!(chat_id, "500");
            assert_eq!(message_id, "77");
            assert!(text.contains("/choice"));
        }
        other => panic!("expected edit, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unknown_button_edits_to_full_help() {
    let service = service(RecordingBot::default());
    service
        .process(Message::from_callback("500", "a", Some("help_full".to_string())).with_id("1"))
        .await
        .unwrap();
    service
        .process(Message::from_callback("500", "b", Some("nonsense".to_string())).with_id("1"))
        .await
        .unwrap();

    let edits: Vec<String> = service
        .bot()
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            Call::Edit { text, .. } => Some(text),
            _ => None,
        })
        .collect();
    assert_eq!(edits.len(), 2);
    assert_eq!(edits[0], edits[1]);
}

#[tokio::test]
async fn test_button_press_without_message_is_only_answered() {
    let service = service(RecordingBot::default());
    service
        .process(Message::from_callback("500", "cb-2", Some("help_roll".to_string())))
        .await
        .unwrap();

    assert_eq!(service.bot().calls(), vec![Call::Answer { callback_id: "cb-2".to_string() }]);
}

#[tokio::test]
async fn test_dice_uses_native_animation() {
    let service = service(RecordingBot::default());
    let outbound = service.process(text_message("/dice@RandBot")).await.unwrap();

    assert!(matches!(outbound, Some(Outbound::Dice { .. })));
    assert_eq!(
        service.bot().calls(),
        vec![Call::Dice { chat_id: "500".to_string(), emoji: "🎲".to_string() }]
    );
}

#[tokio::test]
async fn test_roll_reply_is_markdown_with_normalized_bounds() {
    let service = service(RecordingBot::default());
    service.process(text_message("/roll 100 1")).await.unwrap();

    match &service.bot().calls()[..] {
        [Call::Send { text, parse_mode, .. }] => {
            assert!(text.ends_with("(из 1…100)"), "{}", text);
            assert_eq!(*parse_mode, Some(ParseMode::Markdown));
        }
        other => panic!("unexpected calls {:?}", other),
    }
}

#[tokio::test]
async fn test_rejected_markdown_is_resent_as_plain_text() {
    let service = service(RecordingBot::rejecting_markdown());
    service.process(text_message("/choice a_b; c*d")).await.unwrap();

    let calls = service.bot().calls();
    assert_eq!(calls.len(), 2);
    match (&calls[0], &calls[1]) {
        (
            Call::Send { text: first, parse_mode: Some(ParseMode::Markdown), .. },
            Call::Send { text: second, parse_mode: None, .. },
        ) => assert_eq!(first, second),
        other => panic!("unexpected calls {:?}", other),
    }
}

#[tokio::test]
async fn test_other_api_errors_are_not_resent() {
    let service = service(RecordingBot::failing_sends("sendMessage: Forbidden: bot was blocked by the user"));
    let result = service.process(text_message("/roll")).await;

    assert!(matches!(result, Err(BotError::Api(ref e)) if e.contains("blocked")), "{:?}", result);
    match &service.bot().calls()[..] {
        [Call::Send { parse_mode, .. }] => assert_eq!(*parse_mode, Some(ParseMode::Markdown)),
        other => panic!("unexpected calls {:?}", other),
    }
}

#[tokio::test]
async fn test_choice_validation_message() {
    let service = service(RecordingBot::default());
    service.process(text_message("/choice единственный")).await.unwrap();

    match &service.bot().calls()[..] {
        [Call::Send { text, .. }] => assert_eq!(text, texts::CHOICE_TOO_FEW),
        other => panic!("unexpected calls {:?}", other),
    }
}

#[tokio::test]
async fn test_ignored_events_send_nothing() {
    let service = service(RecordingBot::default());

    assert!(service.process(text_message("just chatting")).await.unwrap().is_none());
    assert!(service.process(text_message("/unknown")).await.unwrap().is_none());
    assert!(service.process(text_message("/roll@OtherBot")).await.unwrap().is_none());
    assert!(service.bot().calls().is_empty());
}
