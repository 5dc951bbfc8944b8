mod commands;
mod gateway;

use clap::{Parser, Subcommand};
use ortho_channels::telegram::TelegramChannel;
use ortho_core::{
    config::{self, Config, OrthoConfig},
    traits::GrammarEngine,
};
use ortho_grammar::languagetool::LanguageToolEngine;
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

#[derive(Parser)]
#[command(
    name = "ortho",
    version,
    about = "Ortho — spell-checks your own chat messages and fixes them in place"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Disable all logging.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the relay.
    Start,
    /// Verify the bot token and grammar engine without starting.
    Status,
    /// Correct a piece of text once and print the result.
    Check {
        /// The text to check.
        #[arg(trailing_var_arg = true)]
        text: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (mut cfg, source) = config::load(&cli.config)?;
    config::apply_env_overrides(&mut cfg, |k| std::env::var(k).ok())?;

    let _log_guard = if cli.quiet {
        None
    } else {
        init_logging(&cfg.ortho)?
    };
    if source == config::Source::Defaults {
        info!("Config file not found at {}, using defaults", cli.config);
    }

    match cli.command {
        Commands::Start => {
            let engine = build_engine(&cfg)?;
            if !engine.is_available().await {
                anyhow::bail!(
                    "grammar engine '{}' is not available at {}",
                    engine.name(),
                    cfg.grammar.base_url
                );
            }

            let channel = build_channel(&cfg)?;
            let self_id = channel.owner_id().to_string();

            println!("Ortho — Starting relay...");
            let gw = Arc::new(gateway::Gateway::new(
                engine,
                Arc::new(channel),
                self_id,
                cfg.commands.prefix.clone(),
            ));
            gw.run().await?;
        }
        Commands::Status => {
            println!("Ortho — Status Check\n");
            println!("Config: {}", cli.config);
            println!("Command prefix: {}", cfg.commands.prefix);
            println!("Language: {}", cfg.grammar.language);
            println!();

            let engine = build_engine(&cfg)?;
            println!(
                "  {} ({}): {}",
                engine.name(),
                cfg.grammar.base_url,
                if engine.is_available().await {
                    "available"
                } else {
                    "unreachable"
                }
            );

            match cfg.channel.telegram {
                Some(ref tg) if !tg.enabled => println!("  telegram: disabled"),
                Some(ref tg) if tg.bot_token.is_empty() => {
                    println!("  telegram: enabled but missing bot_token")
                }
                Some(ref tg) => {
                    let channel = TelegramChannel::new(tg.clone());
                    match channel.get_me().await {
                        Ok(bot) => println!(
                            "  telegram: authorized as @{} (owner {})",
                            bot.username.unwrap_or_else(|| bot.id.to_string()),
                            if tg.owner_id == 0 {
                                "not set".to_string()
                            } else {
                                tg.owner_id.to_string()
                            }
                        ),
                        Err(e) => println!("  telegram: {e}"),
                    }
                }
                None => println!("  telegram: not configured"),
            }
        }
        Commands::Check { text } => {
            if text.is_empty() {
                anyhow::bail!("no text provided. Usage: ortho check <text>");
            }

            let text = text.join(" ");
            let engine = build_engine(&cfg)?;
            let correction = gateway::pipeline::correct(engine.as_ref(), &text).await?;
            println!("{}", correction.corrected);
        }
    }

    Ok(())
}

/// Install the tracing subscriber. `RUST_LOG` wins over the configured level.
fn init_logging(cfg: &OrthoConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.log_level));

    match cfg.log_file.as_deref() {
        Some(path) if !path.is_empty() => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| anyhow::anyhow!("failed to open log file {path}: {e}"))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Ok(Some(guard))
        }
        _ => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
            Ok(None)
        }
    }
}

/// Build the configured grammar engine.
fn build_engine(cfg: &Config) -> anyhow::Result<Arc<dyn GrammarEngine>> {
    Ok(Arc::new(LanguageToolEngine::from_config(&cfg.grammar)?))
}

/// Build the Telegram channel, refusing incomplete settings.
fn build_channel(cfg: &Config) -> anyhow::Result<TelegramChannel> {
    let tg = match cfg.channel.telegram {
        Some(ref tg) if tg.enabled => tg,
        _ => anyhow::bail!(
            "Telegram is not enabled. Add a [channel.telegram] section to the config \
             or set TELEGRAM_BOT_TOKEN and TELEGRAM_OWNER_ID."
        ),
    };
    if tg.bot_token.is_empty() {
        anyhow::bail!(
            "Telegram is enabled but bot_token is empty. \
             Set it in config.toml or TELEGRAM_BOT_TOKEN env var."
        );
    }
    if tg.owner_id == 0 {
        anyhow::bail!(
            "Telegram owner_id is not set. \
             Set it in config.toml or TELEGRAM_OWNER_ID env var."
        );
    }
    Ok(TelegramChannel::new(tg.clone()))
}
