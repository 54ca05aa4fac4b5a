use crate::application::errors::BotError;
use crate::application::messaging::Dispatcher;
use crate::domain::entities::{Message, Outbound, Reply};
use crate::domain::traits::Bot;

/// Runs the dispatcher for one inbound event and delivers the result
pub struct MessageService<B: Bot> {
    bot: B,
    dispatcher: Dispatcher,
}

impl<B: Bot> MessageService<B> {
    pub fn new(bot: B, dispatcher: Dispatcher) -> Self {
        Self { bot, dispatcher }
    }

    pub fn bot(&self) -> &B {
        &self.bot
    }

    /// Process an incoming message. Returns the delivered action, if any.
    pub async fn process(&self, message: Message) -> Result<Option<Outbound>, BotError> {
        tracing::debug!("[{}] Processing {} from {}", message.chat_id, message.message_type.as_str(), message.sender_name());

        let outbound = {
            let mut rng = rand::thread_rng();
            self.dispatcher.dispatch(&message, &mut rng)
        };

        let Some(outbound) = outbound else {
            return Ok(None);
        };

        self.deliver(&outbound).await?;
        Ok(Some(outbound))
    }

    /// Hand one outbound action to the transport
    pub async fn deliver(&self, outbound: &Outbound) -> Result<(), BotError> {
        match outbound {
            Outbound::Text(reply) => {
                self.respond(reply).await?;
            }
            Outbound::Dice { chat_id, emoji } => {
                self.bot.send_dice(chat_id, emoji).await?;
            }
            Outbound::CallbackEdit { callback_id, chat_id, message_id, text } => {
                self.bot.answer_callback(callback_id, None).await?;
                match message_id {
                    Some(message_id) => self.bot.edit_message(chat_id, message_id, text).await?,
                    None => tracing::warn!("[{}] Button message is unavailable, nothing to edit", chat_id),
                }
            }
        }
        Ok(())
    }

    /// Send a reply, retrying as plain text when the formatted version is rejected
    pub async fn respond(&self, reply: &Reply) -> Result<String, BotError> {
        match self.send_reply(reply, reply.parse_mode).await {
            Err(BotError::Api(e)) if reply.parse_mode.is_some() && is_markup_rejected(&e) => {
                tracing::warn!("Markdown failed, using plain text: {}", e);
                self.send_reply(reply, None).await
            }
            result => result,
        }
    }

    async fn send_reply(&self, reply: &Reply, parse_mode: Option<crate::domain::entities::ParseMode>) -> Result<String, BotError> {
        if reply.keyboard.is_empty() {
            self.bot.send_message(&reply.chat_id, &reply.text, parse_mode).await
        } else {
            self.bot.send_with_keyboard(&reply.chat_id, &reply.text, parse_mode, &reply.keyboard).await
        }
    }
}

/// Telegram refused the formatting, not the message itself
fn is_markup_rejected(error: &str) -> bool {
    error.contains("can't parse entities")
}
