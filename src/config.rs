//! Configuration management for Home Copilot
//!
//! The configuration is loaded once at process start and passed by reference
//! into the components that need it. Both JSON and YAML
//! are accepted; keys keep their upper-case names (`IFTTT_KEY`,
//! `DEVICE_TOPICS`, `TARIFF_CONFIG`).

mod defaults;

pub use defaults::{
    DEFAULT_CONFIG_PATHS, DEFAULT_LOW_TARIFF_END, DEFAULT_LOW_TARIFF_START,
    DEFAULT_WEBHOOK_BASE_URL, DEFAULT_WEBHOOK_TIMEOUT_SECS,
};

use crate::error::{CopilotError, Result};
use crate::tariff::TariffWindow;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Config {
    /// IFTTT Webhooks key; an empty or missing key disables all webhook calls
    pub ifttt_key: Option<String>,

    /// Logical device name to topic/identifier forwarded to the webhook service
    pub device_topics: BTreeMap<String, String>,

    /// Low-tariff window
    pub tariff_config: TariffConfig,

    /// IANA timezone used for the current hour; host local time when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    /// Webhook endpoint settings
    pub webhook: WebhookConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Low-tariff window hours, `[LOW_TARIFF_START, LOW_TARIFF_END)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct TariffConfig {
    pub low_tariff_start: u8,
    pub low_tariff_end: u8,
}

/// Webhook endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct WebhookConfig {
    /// Service root; requests go to `{BASE_URL}/trigger/{event}/with/key/{key}`
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct LoggingConfig {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    pub level: String,

    /// Directory or file path for rolling log files; console only when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Number of rotated files to keep
    pub backup_count: u32,

    /// Whether to log to console
    pub console_output: bool,

    /// Whether to use JSON format
    pub json_format: bool,
}

impl TariffConfig {
    /// The configured window as a value the tariff rule understands
    pub fn window(&self) -> TariffWindow {
        TariffWindow::new(self.low_tariff_start, self.low_tariff_end)
    }
}

/// Load, default and validate the configuration at `path`.
///
/// Every failure here is fatal for the process: a missing file, content that
/// is not valid JSON/YAML, or values outside their allowed range.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let config = Config::from_file(path)?;
    config.validate()?;
    Ok(config)
}

/// Find the first existing file among the default locations
pub fn find_default_config() -> Option<PathBuf> {
    DEFAULT_CONFIG_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
}

impl Config {
    /// Load configuration from a JSON or YAML file (chosen by extension)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CopilotError::config(format!(
                    "Config file '{}' not found. Please create it based on the config.json template \
                     (run `home-copilot init-config {}`).",
                    path.display(),
                    path.display()
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                return Err(CopilotError::serialization(format!(
                    "Failed to parse '{}': {}",
                    path.display(),
                    e
                )));
            }
            Err(e) => {
                return Err(CopilotError::io(format!(
                    "Failed to read '{}': {}",
                    path.display(),
                    e
                )));
            }
        };

        let parsed = if is_json_path(path) {
            serde_json::from_str(&contents).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str(&contents).map_err(|e| e.to_string())
        };
        parsed.map_err(|e| {
            CopilotError::serialization(format!("Failed to parse '{}': {}", path.display(), e))
        })
    }

    /// Parse configuration text; JSON when `json` is set, YAML otherwise
    pub fn parse(contents: &str, json: bool) -> Result<Self> {
        let config: Config = if json {
            serde_json::from_str(contents)?
        } else {
            serde_yaml::from_str(contents)?
        };
        Ok(config)
    }

    /// Save configuration to a file, JSON or YAML by extension
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let text = if is_json_path(path) {
            serde_json::to_string_pretty(self)?
        } else {
            serde_yaml::to_string(self)?
        };
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Write [`Config::template`] to `path`; an existing file is never replaced
    pub fn write_template<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if path.exists() {
            return Err(CopilotError::config(format!(
                "'{}' already exists; refusing to overwrite it",
                path.display()
            )));
        }
        Self::template().save_to_file(path)
    }

    /// Starter configuration written by `init-config`
    pub fn template() -> Self {
        let device_topics = [
            ("lamp", "living_room_lamp"),
            ("ac", "bedroom_ac"),
            ("charger", "garage_ev_charger"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            ifttt_key: Some(String::new()),
            device_topics,
            ..Default::default()
        }
    }

    /// The webhook key if one is configured
    pub fn api_key(&self) -> Option<&str> {
        self.ifttt_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    /// Parsed timezone, if one is configured
    pub fn tz(&self) -> Result<Option<Tz>> {
        match self.timezone.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(name) => name.parse::<Tz>().map(Some).map_err(|_| {
                CopilotError::validation("TIMEZONE", format!("Unknown timezone '{}'", name))
            }),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.tariff_config.low_tariff_start > 23 {
            return Err(CopilotError::validation(
                "TARIFF_CONFIG.LOW_TARIFF_START",
                "Must be an hour between 0 and 23",
            ));
        }

        if self.tariff_config.low_tariff_end > 23 {
            return Err(CopilotError::validation(
                "TARIFF_CONFIG.LOW_TARIFF_END",
                "Must be an hour between 0 and 23",
            ));
        }

        if self.webhook.base_url.trim().is_empty() {
            return Err(CopilotError::validation(
                "WEBHOOK.BASE_URL",
                "Cannot be empty",
            ));
        }

        if self.webhook.timeout_secs == 0 {
            return Err(CopilotError::validation(
                "WEBHOOK.TIMEOUT_SECS",
                "Must be greater than 0",
            ));
        }

        self.tz()?;

        Ok(())
    }
}

fn is_json_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}
