use clap::{Parser, Subcommand};

use randomizer_bot::application::errors::BotError;
use randomizer_bot::application::messaging::{Dispatcher, MessageParser};
use randomizer_bot::application::services::MessageService;
use randomizer_bot::domain::entities::Outbound;
use randomizer_bot::domain::traits::Bot;
use randomizer_bot::infrastructure::adapters::{console, telegram, ConsoleAdapter, TelegramAdapter};
use randomizer_bot::infrastructure::config::Config;

/// Pause after a failed getUpdates call
const POLL_RETRY_SECS: u64 = 5;

#[derive(Parser)]
#[command(name = "randomizer-bot")]
#[command(about = "Telegram bot for random numbers, coin flips and choices", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml", global = true)]
    config: String,

    /// Bot token (overrides config and BOT_TOKEN)
    #[arg(short, long, global = true)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the Telegram bot
    Run,
    /// Talk to the bot from the terminal
    Console,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("No .env file loaded: {}", e);
    }

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run => run_bot(&cli.config, cli.token),
        Commands::Console => run_console(),
        Commands::Version => {
            println!("randomizer-bot v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(),
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn build_runtime() -> Result<tokio::runtime::Runtime, BotError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| BotError::Internal(format!("Failed to start runtime: {}", e)))
}

fn run_bot(config_path: &str, token_override: Option<String>) -> Result<(), BotError> {
    let config = Config::load_or_default(config_path).with_env_token(token_override);

    // No token, no bot
    let token = config.telegram_token()?.to_string();

    tracing::info!("Starting {}", config.bot.name);

    let rt = build_runtime()?;
    rt.block_on(async {
        let mut bot = TelegramAdapter::new(token).with_api_base(&config.telegram.api_base);
        bot.start().await?;
        bot.fetch_bot_info().await?;

        // Register bot commands with Telegram
        if config.telegram.register_commands {
            if let Err(e) = bot.register_commands().await {
                tracing::warn!("Failed to register commands: {}", e);
            }
        }

        let service = MessageService::new(bot, Dispatcher::new());
        run_telegram_bot(&service, config.telegram.poll_timeout_secs).await
    })
}

async fn run_telegram_bot(service: &MessageService<TelegramAdapter>, timeout_seconds: u64) -> Result<(), BotError> {
    let info = service.bot().bot_info();
    tracing::info!("Bot started: @{}", info.username);

    let parser = if info.username.is_empty() {
        MessageParser::new()
    } else {
        MessageParser::new().with_bot_username(&info.username)
    };

    let mut offset: i64 = 0;

    tracing::info!("Starting message loop...");

    loop {
        let updates = tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, stopping message loop");
                return Ok(());
            }
            result = service.bot().get_updates(offset, timeout_seconds) => result,
        };

        match updates {
            Ok(updates) => {
                if !updates.is_empty() {
                    tracing::debug!("Received {} updates", updates.len());
                }

                // Update offset
                offset = telegram::next_offset(&updates, offset);

                for update in updates {
                    let Some(message) = telegram::update_to_message(update, &parser) else {
                        continue;
                    };

                    let chat_id = message.chat_id.clone();
                    match service.process(message).await {
                        Ok(Some(outbound)) => {
                            tracing::info!("[{}] Responded: {}", chat_id, outbound.text().unwrap_or("dice"));
                        }
                        Ok(None) => {}
                        Err(e) => tracing::error!("[{}] Failed to send response: {}", chat_id, e),
                    }
                }
            }
            Err(e) => {
                tracing::error!("Failed to get updates: {}", e);
                tokio::time::sleep(tokio::time::Duration::from_secs(POLL_RETRY_SECS)).await;
            }
        }
    }
}

fn run_console() -> Result<(), BotError> {
    let rt = build_runtime()?;
    rt.block_on(async {
        let service = MessageService::new(ConsoleAdapter::new(), Dispatcher::new());
        service.bot().start().await?;

        let parser = MessageParser::new().with_bot_username(service.bot().bot_info().username);

        // Message carrying the latest /start menu, target of #token presses
        let mut menu_message: Option<String> = None;

        while let Some(line) = service.bot().read_line().await? {
            let Some(message) = console::line_to_message(&line, &parser, menu_message.clone()) else {
                continue;
            };

            match service.process(message).await {
                Ok(Some(Outbound::Text(reply))) if !reply.keyboard.is_empty() => {
                    menu_message = service.bot().last_message_id();
                }
                Ok(_) => {}
                Err(e) => tracing::error!("Failed to send response: {}", e),
            }
        }

        Ok::<(), BotError>(())
    })
}

fn init_config() -> Result<(), BotError> {
    let config = Config::default();
    let yaml = serde_yaml::to_string(&config)
        .map_err(|e| BotError::Internal(format!("Failed to render config: {}", e)))?;
    println!("{}", yaml);
    println!("\nSave this to config.yaml and adjust as needed. Keep the token in BOT_TOKEN.");
    Ok(())
}
