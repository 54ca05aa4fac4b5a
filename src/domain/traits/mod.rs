//! Domain traits - Abstractions for transport implementations

pub mod bot;

pub use bot::{Bot, BotInfo, KeyboardButton};
