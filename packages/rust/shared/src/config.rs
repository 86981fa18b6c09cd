//! Application configuration for the advisor.
//!
//! User config lives at `~/.itmo-advisor/itmo-advisor.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AdvisorError, Result};
use crate::types::Program;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "itmo-advisor.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".itmo-advisor";

// ---------------------------------------------------------------------------
// Config structs (matching itmo-advisor.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Program pages to scrape for curriculum links.
    #[serde(default)]
    pub programs: ProgramsConfig,

    /// HTTP timeouts and endpoints.
    #[serde(default)]
    pub http: HttpConfig,

    /// Artifact locations.
    #[serde(default)]
    pub paths: PathsConfig,

    /// Bot transport settings.
    #[serde(default)]
    pub telegram: TelegramConfig,
}

/// `[programs]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramsConfig {
    /// Page of the "ai" program.
    #[serde(default = "default_ai_url")]
    pub ai: String,

    /// Page of the "ai_product" program.
    #[serde(default = "default_ai_product_url")]
    pub ai_product: String,
}

impl Default for ProgramsConfig {
    fn default() -> Self {
        Self {
            ai: default_ai_url(),
            ai_product: default_ai_product_url(),
        }
    }
}

impl ProgramsConfig {
    /// Program pages in program declaration order.
    pub fn pages(&self) -> Vec<(Program, String)> {
        vec![
            (Program::Ai, self.ai.clone()),
            (Program::AiProduct, self.ai_product.clone()),
        ]
    }
}

fn default_ai_url() -> String {
    "https://abit.itmo.ru/program/master/ai".into()
}
fn default_ai_product_url() -> String {
    "https://abit.itmo.ru/program/master/ai_product".into()
}

/// `[http]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Timeout for program page requests.
    #[serde(default = "default_page_timeout")]
    pub page_timeout_secs: u64,

    /// Timeout for document downloads.
    #[serde(default = "default_download_timeout")]
    pub download_timeout_secs: u64,

    /// Base URL of the document host.
    #[serde(default = "default_drive_base_url")]
    pub drive_base_url: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            page_timeout_secs: default_page_timeout(),
            download_timeout_secs: default_download_timeout(),
            drive_base_url: default_drive_base_url(),
        }
    }
}

fn default_page_timeout() -> u64 {
    15
}
fn default_download_timeout() -> u64 {
    30
}
fn default_drive_base_url() -> String {
    "https://drive.google.com".into()
}

/// `[paths]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Output of `discover`, input of `extract`.
    #[serde(default = "default_links_file")]
    pub links_file: PathBuf,

    /// Output of `extract`, input of `serve` / `ask`.
    #[serde(default = "default_curricula_file")]
    pub curricula_file: PathBuf,

    /// Where downloaded PDFs are kept. Not cached when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_dir: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            links_file: default_links_file(),
            curricula_file: default_curricula_file(),
            pdf_dir: None,
        }
    }
}

fn default_links_file() -> PathBuf {
    PathBuf::from("drive_links.json")
}
fn default_curricula_file() -> PathBuf {
    PathBuf::from("curricula.json")
}

/// `[telegram]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Name of the env var holding the bot token (never store the token itself).
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// Bot API base URL.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Long-polling timeout passed to `getUpdates`.
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_secs: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token_env: default_token_env(),
            api_base_url: default_api_base_url(),
            poll_timeout_secs: default_poll_timeout(),
        }
    }
}

fn default_token_env() -> String {
    "TELEGRAM_BOT_TOKEN".into()
}
fn default_api_base_url() -> String {
    "https://api.telegram.org".into()
}
fn default_poll_timeout() -> u64 {
    30
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.itmo-advisor/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| AdvisorError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.itmo-advisor/itmo-advisor.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| AdvisorError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        AdvisorError::config(format!("failed to parse {}: {e}", path.display()))
    })?;

    for (program, page) in config.programs.pages() {
        url::Url::parse(&page).map_err(|e| {
            AdvisorError::config(format!("invalid page URL for {program} '{page}': {e}"))
        })?;
    }

    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| AdvisorError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| AdvisorError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| AdvisorError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Read the bot token from the env var named in the config.
pub fn resolve_bot_token(config: &AppConfig) -> Result<String> {
    let var_name = &config.telegram.token_env;
    match std::env::var(var_name) {
        Ok(val) if !val.trim().is_empty() => Ok(val.trim().to_string()),
        _ => Err(AdvisorError::config(format!(
            "bot token not found. Set the {var_name} environment variable and run again \
             (the bot uses long polling)."
        ))),
    }
}
