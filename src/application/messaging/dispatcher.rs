//! Message dispatcher - Routes commands and button presses to handlers

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use crate::domain::entities::{CallbackToken, ChoiceSet, Command, Content, Message, Outbound, Reply};
use crate::domain::traits::KeyboardButton;
use super::normalizer::{normalize_range, parse_choices};
use super::texts;

/// Input handed to a command handler
pub struct CommandInput<'a> {
    pub chat_id: &'a str,
    pub args: &'a [String],
    /// Text of the replied-to message, a secondary source for `/choice`
    pub reply_to_text: Option<&'a str>,
}

/// Handler function type
pub type Handler = fn(&CommandInput<'_>, &mut dyn RngCore) -> Outbound;

/// Maps inbound events to outbound actions. Holds no per-event state.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dispatcher;

impl Dispatcher {
    pub fn new() -> Self {
        Self
    }

    /// Handler registered for a command
    pub fn handler(&self, command: Command) -> Handler {
        match command {
            Command::Start => handle_start,
            Command::Help => handle_help,
            Command::Roll => handle_roll,
            Command::Coin => handle_coin,
            Command::Choice => handle_choice,
            Command::Dice => handle_dice,
        }
    }

    /// Produce the single outbound action for an event, or `None` when the
    /// event is not addressed to us.
    pub fn dispatch<R: Rng>(&self, message: &Message, rng: &mut R) -> Option<Outbound> {
        match &message.content {
            Content::Command { name, args } => {
                let Some(command) = Command::from_name(name) else {
                    tracing::debug!("[{}] Ignoring unknown command /{}", message.chat_id, name);
                    return None;
                };

                tracing::debug!("[{}] {} from {} args={:?}", message.chat_id, command, message.sender_name(), args);

                let input = CommandInput {
                    chat_id: &message.chat_id,
                    args,
                    reply_to_text: message.reply_to_text.as_deref(),
                };
                Some(self.handler(command)(&input, rng))
            }
            Content::CallbackData(data) => {
                let Some(callback_id) = &message.callback_id else {
                    tracing::warn!("[{}] Callback without an id, skipping", message.chat_id);
                    return None;
                };

                let token = CallbackToken::from_data(data.as_deref());
                tracing::debug!("[{}] Button {} pressed by {}", message.chat_id, token.as_str(), message.sender_name());

                Some(Outbound::CallbackEdit {
                    callback_id: callback_id.clone(),
                    chat_id: message.chat_id.clone(),
                    message_id: message.id.clone(),
                    text: texts::callback_text(token).to_string(),
                })
            }
            Content::Text(_) | Content::Empty => None,
        }
    }
}

/// Inline menu shown by `/start`
pub fn start_menu() -> Vec<Vec<KeyboardButton>> {
    texts::MENU
        .iter()
        .map(|row| {
            row.iter()
                .map(|(label, token)| KeyboardButton::new(*label).with_callback(token.as_str()))
                .collect()
        })
        .collect()
}

fn handle_start(input: &CommandInput<'_>, _rng: &mut dyn RngCore) -> Outbound {
    Outbound::Text(Reply::new(input.chat_id, texts::WELCOME).with_keyboard(start_menu()))
}

fn handle_help(input: &CommandInput<'_>, _rng: &mut dyn RngCore) -> Outbound {
    Outbound::Text(Reply::new(input.chat_id, texts::HELP))
}

fn handle_roll(input: &CommandInput<'_>, rng: &mut dyn RngCore) -> Outbound {
    let range = normalize_range(input.args);
    let value = rng.gen_range(range.low..=range.high);
    Outbound::Text(Reply::new(input.chat_id, texts::roll_result(value, range.low, range.high)).markdown())
}

fn handle_coin(input: &CommandInput<'_>, rng: &mut dyn RngCore) -> Outbound {
    let side = texts::COIN_SIDES.choose(rng).copied().unwrap_or(texts::COIN_SIDES[0]);
    Outbound::Text(Reply::new(input.chat_id, texts::coin_result(side)))
}

fn handle_choice(input: &CommandInput<'_>, rng: &mut dyn RngCore) -> Outbound {
    let mut source = input.args.join(" ");
    if source.is_empty() {
        source = input.reply_to_text.unwrap_or_default().to_string();
    }

    let set = match ChoiceSet::new(parse_choices(&source)) {
        Ok(set) => set,
        Err(items) => {
            tracing::debug!("[{}] /choice got {} item(s), need {}", input.chat_id, items.len(), ChoiceSet::MIN_ITEMS);
            return Outbound::Text(Reply::new(input.chat_id, texts::CHOICE_TOO_FEW).markdown());
        }
    };

    // ChoiceSet is never empty
    let pick = set.items().choose(rng).map(String::as_str).unwrap_or_default();
    Outbound::Text(Reply::new(input.chat_id, texts::choice_result(pick)).markdown())
}

fn handle_dice(input: &CommandInput<'_>, _rng: &mut dyn RngCore) -> Outbound {
    Outbound::Dice {
        chat_id: input.chat_id.to_string(),
        emoji: texts::DICE_EMOJI.to_string(),
    }
}
