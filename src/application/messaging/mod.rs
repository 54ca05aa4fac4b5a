//! Message handling - Event-driven command and callback processing

pub mod dispatcher;
pub mod normalizer;
pub mod parser;
pub mod texts;

pub use dispatcher::{Dispatcher, start_menu};
pub use normalizer::{normalize_range, parse_choices, parse_int};
pub use parser::MessageParser;
