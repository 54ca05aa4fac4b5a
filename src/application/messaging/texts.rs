//! User-facing texts

use crate::domain::entities::CallbackToken;

pub const WELCOME: &str = "Привет! Я — рандомайзер‑бот. Нажми кнопку или используй команды.\n\
Быстрый старт: /roll 1 100";

pub const HELP: &str = "Команды:\n\
• /roll [min] [max] — случайное число (по умолчанию 1…100)\n\
• /coin — орёл/решка\n\
• /choice вариант1; вариант2; вариант3 — выберу один\n\
• /dice — кубик (телеграм‑анимация)\n\
\n\
Примеры:\n\
• /roll 1 6\n\
• /choice чай, кофе, сок\n";

pub const CHOICE_TOO_FEW: &str = "Нужно минимум *2 варианта*.\n\
Пример: `/choice чай; кофе; сок`";

pub const COIN_SIDES: [&str; 2] = ["Орёл", "Решка"];

pub const DICE_EMOJI: &str = "🎲";

const HELP_ROLL: &str = "Используй: /roll [min] [max]\nПример: /roll 1 6";
const HELP_COIN: &str = "Команда /coin — подбрасывает монетку: орёл или решка.";
const HELP_CHOICE: &str = "Команда /choice — выберу один из вариантов.\nПример: /choice чай; кофе; сок";
const HELP_DICE: &str = "Команда /dice — телеграм‑анимация кубика 🎲";
const HELP_FULL: &str = "📜 /help\n\
• /roll [min] [max]\n\
• /coin\n\
• /choice вариант1; вариант2; вариант3\n\
• /dice";

/// Start menu rows: (label, token)
pub const MENU: [&[(&str, CallbackToken)]; 3] = [
    &[("🎲 /roll", CallbackToken::HelpRoll), ("🪙 /coin", CallbackToken::HelpCoin)],
    &[("🎯 /choice", CallbackToken::HelpChoice), ("🎰 /dice", CallbackToken::HelpDice)],
    &[("📜 /help", CallbackToken::HelpFull)],
];

pub fn roll_result(value: i64, low: i64, high: i64) -> String {
    format!("🎲 Случайное число: *{}* (из {}…{})", value, low, high)
}

pub fn coin_result(side: &str) -> String {
    format!("🪙 {}!", side)
}

pub fn choice_result(pick: &str) -> String {
    format!("🎯 Выбор: *{}*", pick)
}

/// Canned text a menu button edits its message into
pub fn callback_text(token: CallbackToken) -> &'static str {
    match token {
        CallbackToken::HelpRoll => HELP_ROLL,
        CallbackToken::HelpCoin => HELP_COIN,
        CallbackToken::HelpChoice => HELP_CHOICE,
        CallbackToken::HelpDice => HELP_DICE,
        CallbackToken::HelpFull => HELP_FULL,
    }
}
