use std::fmt;

/// Slash-commands the bot responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Start,
    Help,
    Roll,
    Coin,
    Choice,
    Dice,
}

impl Command {
    /// Every command, in menu order
    pub const ALL: [Command; 6] = [
        Command::Start,
        Command::Help,
        Command::Roll,
        Command::Coin,
        Command::Choice,
        Command::Dice,
    ];

    /// Resolve a trigger name (without the leading slash).
    ///
    /// Lookup is case-insensitive and `rand` is an alias of `roll`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "start" => Some(Command::Start),
            "help" => Some(Command::Help),
            "roll" | "rand" => Some(Command::Roll),
            "coin" => Some(Command::Coin),
            "choice" => Some(Command::Choice),
            "dice" => Some(Command::Dice),
            _ => None,
        }
    }

    /// Primary trigger name
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Help => "help",
            Command::Roll => "roll",
            Command::Coin => "coin",
            Command::Choice => "choice",
            Command::Dice => "dice",
        }
    }

    /// Additional trigger names
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Command::Roll => &["rand"],
            _ => &[],
        }
    }

    /// Short description shown in the client's command list
    pub fn description(&self) -> &'static str {
        match self {
            Command::Start => "Меню с кнопками",
            Command::Help => "Список команд",
            Command::Roll => "Случайное число: /roll [min] [max]",
            Command::Coin => "Орёл или решка",
            Command::Choice => "Выбрать один из вариантов",
            Command::Dice => "Бросить кубик",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.name())
    }
}

/// Token carried by an inline menu button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallbackToken {
    HelpRoll,
    HelpCoin,
    HelpChoice,
    HelpDice,
    HelpFull,
}

impl CallbackToken {
    /// Map raw callback data to a token. Anything unrecognized, including
    /// missing data, falls back to full help.
    pub fn from_data(data: Option<&str>) -> Self {
        match data {
            Some("help_roll") => CallbackToken::HelpRoll,
            Some("help_coin") => CallbackToken::HelpCoin,
            Some("help_choice") => CallbackToken::HelpChoice,
            Some("help_dice") => CallbackToken::HelpDice,
            _ => CallbackToken::HelpFull,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CallbackToken::HelpRoll => "help_roll",
            CallbackToken::HelpCoin => "help_coin",
            CallbackToken::HelpChoice => "help_choice",
            CallbackToken::HelpDice => "help_dice",
            CallbackToken::HelpFull => "help_full",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_lookup() {
        assert_eq!(Command::from_name("roll"), Some(Command::Roll));
        assert_eq!(Command::from_name("rand"), Some(Command::Roll));
        assert_eq!(Command::from_name("CoIn"), Some(Command::Coin));
        assert_eq!(Command::from_name("version"), None);
        assert_eq!(Command::from_name(""), None);
    }

    #[test]
    fn test_every_name_and_alias_resolves_back() {
        for cmd in Command::ALL {
            assert_eq!(Command::from_name(cmd.name()), Some(cmd));
            for alias in cmd.aliases() {
                assert_eq!(Command::from_name(alias), Some(cmd));
            }
        }
    }

    #[test]
    fn test_callback_token_round_trip() {
        for token in [
            CallbackToken::HelpRoll,
            CallbackToken::HelpCoin,
            CallbackToken::HelpChoice,
            CallbackToken::HelpDice,
            CallbackToken::HelpFull,
        ] {
            assert_eq!(CallbackToken::from_data(Some(token.as_str())), token);
        }
    }

    #[test]
    fn test_unknown_callback_defaults_to_full_help() {
        assert_eq!(CallbackToken::from_data(Some("bogus")), CallbackToken::HelpFull);
        assert_eq!(CallbackToken::from_data(None), CallbackToken::HelpFull);
    }
}
