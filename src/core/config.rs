//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.commandchan/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::Level;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::data::providers::DEFAULT_API_BASE_URL;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChanConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub fetch_timeout_secs: Option<u64>,
    pub log_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub user_agent: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LOG_FILE: &str = "commandchan.log";
pub const DEFAULT_USER_AGENT: &str = concat!("commandchan/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub api_base_url: String,
    pub user_agent: String,
    pub fetch_timeout: Duration,
    pub log_file: PathBuf,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Startup Log
// ============================================================================

/// Messages raised while loading config, before the file logger exists.
///
/// The log file location is itself a config value, so `main` replays these
/// once the logger is installed.
#[derive(Debug, Default)]
pub struct StartupLog {
    entries: Vec<(Level, String)>,
}

impl StartupLog {
    fn push(&mut self, level: Level, message: String) {
        self.entries.push((level, message));
    }

    pub fn entries(&self) -> &[(Level, String)] {
        &self.entries
    }

    /// Sends every buffered message to the installed logger.
    pub fn replay(self) {
        for (level, message) in self.entries {
            log::log!(level, "{}", message);
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.commandchan/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".commandchan").join("config.toml"))
}

/// Load config from `path`, or from `~/.commandchan/config.toml` when `None`.
///
/// A missing default config file is generated (commented out) and treated as
/// empty. A missing explicit file is an I/O error. A malformed file returns
/// `ConfigError::Parse`.
pub fn load_config(path: Option<&Path>, log: &mut StartupLog) -> Result<ChanConfig, ConfigError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match config_path() {
            Some(p) => {
                if !p.exists() {
                    log.push(
                        Level::Info,
                        format!("No config file found, generating default at {}", p.display()),
                    );
                    generate_default_config(&p, log);
                    return Ok(ChanConfig::default());
                }
                p
            }
            None => {
                log.push(
                    Level::Warn,
                    "Could not determine home directory, using default config".to_string(),
                );
                return Ok(ChanConfig::default());
            }
        },
    };

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    log.push(Level::Info, format!("Loaded config from {}", path.display()));
    log.push(Level::Debug, format!("Config: {:?}", config));
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<ChanConfig, ConfigError> {
    toml::from_str(contents).map_err(ConfigError::Parse)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path, log: &mut StartupLog) {
    let default_content = r#"# CommandChan Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# fetch_timeout_secs = 10            # Or set COMMANDCHAN_FETCH_TIMEOUT_SECS
# log_file = "commandchan.log"       # Or set COMMANDCHAN_LOG_FILE

# [api]
# base_url = "https://a.4cdn.org"    # Or set COMMANDCHAN_API_URL
# user_agent = "commandchan/0.1.0"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        log.push(Level::Warn, format!("Failed to create config directory: {}", e));
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        log.push(Level::Warn, format!("Failed to write default config: {}", e));
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars.
pub fn resolve(config: &ChanConfig, log: &mut StartupLog) -> ResolvedConfig {
    resolve_with(config, |key| std::env::var(key).ok(), log)
}

/// Resolution with an injectable environment lookup.
fn resolve_with(
    config: &ChanConfig,
    env: impl Fn(&str) -> Option<String>,
    log: &mut StartupLog,
) -> ResolvedConfig {
    // Base URL: env → config → default
    let api_base_url = env("COMMANDCHAN_API_URL")
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

    let user_agent = config
        .api
        .user_agent
        .clone()
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

    // Timeout: env → config → default. Unparseable env values fall through.
    let fetch_timeout_secs = env("COMMANDCHAN_FETCH_TIMEOUT_SECS")
        .and_then(|v| match v.trim().parse::<u64>() {
            Ok(secs) => Some(secs),
            Err(e) => {
                log.push(
                    Level::Warn,
                    format!("Ignoring COMMANDCHAN_FETCH_TIMEOUT_SECS={:?}: {}", v, e),
                );
                None
            }
        })
        .or(config.general.fetch_timeout_secs)
        .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS)
        .max(1);

    let log_file = env("COMMANDCHAN_LOG_FILE")
        .or_else(|| config.general.log_file.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    ResolvedConfig {
        api_base_url,
        user_agent,
        fetch_timeout: Duration::from_secs(fetch_timeout_secs),
        log_file: PathBuf::from(log_file),
    }
}
