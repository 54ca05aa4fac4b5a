//! Domain entities - Transient values built per inbound event

pub mod user;
pub mod message;
pub mod command;
pub mod outbound;
pub mod random;

pub use user::User;
pub use message::{Message, MessageType, Content};
pub use command::{Command, CallbackToken};
pub use outbound::{Outbound, Reply, ParseMode};
pub use random::{Range, ChoiceSet};
