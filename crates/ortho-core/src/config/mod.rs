mod channels;
mod defaults;


pub use channels::*;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::OrthoError;
use defaults::*;

/// Top-level Ortho configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ortho: OrthoConfig,
    #[serde(default)]
    pub commands: CommandConfig,
    #[serde(default)]
    pub grammar: GrammarConfig,
    #[serde(default)]
    pub channel: ChannelConfig,
}

/// General relay settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrthoConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Append logs to this file instead of stderr.
    #[serde(default)]
    pub log_file: Option<String>,
}

impl Default for OrthoConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_file: None,
        }
    }
}

/// Control command settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandConfig {
    /// Leading string that marks a control command (`!start`, `!stop`, `!status`).
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
        }
    }
}

/// Grammar engine (LanguageTool) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrammarConfig {
    /// Server root, without the `/v2` suffix.
    #[serde(default = "default_grammar_url")]
    pub base_url: String,
    /// Language variant, fixed for the process lifetime.
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// LanguageTool rule IDs to skip.
    #[serde(default)]
    pub disabled_rules: Vec<String>,
    /// Premium API credentials. Both must be set to take effect.
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    /// Texts longer than this many chars are passed through unchecked.
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            base_url: default_grammar_url(),
            language: default_language(),
            timeout_secs: default_timeout_secs(),
            disabled_rules: Vec::new(),
            username: None,
            api_key: None,
            max_text_length: default_max_text_length(),
        }
    }
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist; `Source::Defaults`
/// tells the caller so it can report it once logging is up.
pub fn load(path: &str) -> Result<(Config, Source), OrthoError> {
    let path = Path::new(path);
    if !path.exists() {
        return Ok((Config::default(), Source::Defaults));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| OrthoError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    Ok((parse(&content)?, Source::File))
}

/// Where a loaded configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    File,
    /// No file at the given path.
    Defaults,
}

/// Parse configuration from TOML text.
pub fn parse(content: &str) -> Result<Config, OrthoError> {
    let cfg: Config = toml::from_str(content)
        .map_err(|e| OrthoError::Config(format!("failed to parse config: {e}")))?;
    validate_prefix(&cfg.commands.prefix)?;
    Ok(cfg)
}

/// Markdown characters escaped in incoming text. A prefix containing one
/// would never match.
const MARKDOWN_SPECIAL: [char; 4] = ['_', '*', '`', '['];

/// A command prefix must be non-blank and free of Markdown specials.
pub fn validate_prefix(prefix: &str) -> Result<(), OrthoError> {
    if prefix.trim().is_empty() {
        return Err(OrthoError::Config(
            "commands.prefix must not be empty".to_string(),
        ));
    }
    if let Some(ch) = prefix.chars().find(|c| MARKDOWN_SPECIAL.contains(c)) {
        return Err(OrthoError::Config(format!(
            "commands.prefix '{prefix}' contains '{ch}', which is escaped in message text"
        )));
    }
    Ok(())
}

/// Overlay secrets and endpoints taken from the environment.
///
/// `lookup` is usually `|k| std::env::var(k).ok()`. Empty values are ignored.
pub fn apply_env_overrides<F>(cfg: &mut Config, lookup: F) -> Result<(), OrthoError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(url) = get("LANGUAGETOOL_URL") {
        cfg.grammar.base_url = url;
    }
    if let Some(user) = get("LANGUAGETOOL_USERNAME") {
        cfg.grammar.username = Some(user);
    }
    if let Some(key) = get("LANGUAGETOOL_API_KEY") {
        cfg.grammar.api_key = Some(key);
    }

    let token = get("TELEGRAM_BOT_TOKEN");
    let owner = get("TELEGRAM_OWNER_ID");
    if token.is_some() || owner.is_some() {
        let tg = cfg.channel.telegram.get_or_insert_with(TelegramConfig::default);
        if let Some(token) = token {
            tg.bot_token = token;
        }
        if let Some(owner) = owner {
            tg.owner_id = owner.trim().parse().map_err(|e| {
                OrthoError::Config(format!("invalid TELEGRAM_OWNER_ID '{owner}': {e}"))
            })?;
        }
    }

    Ok(())
}
