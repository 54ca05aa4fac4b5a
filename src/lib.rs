//! Randomizer bot
//!
//! A Telegram bot answering slash-commands with random outputs:
//! - `/roll [min] [max]` and `/rand` draw a number
//! - `/coin` flips a coin
//! - `/choice a; b; c` picks one option
//! - `/dice` sends the animated dice
//!
//! `/start` shows an inline menu whose buttons explain each command.

pub mod application;
pub mod domain;
pub mod infrastructure;
