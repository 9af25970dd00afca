use super::*;

/// Start of the low-tariff window when `LOW_TARIFF_START` is absent
pub const DEFAULT_LOW_TARIFF_START: u8 = 22;

/// End (exclusive) of the low-tariff window when `LOW_TARIFF_END` is absent
pub const DEFAULT_LOW_TARIFF_END: u8 = 7;

pub const DEFAULT_WEBHOOK_BASE_URL: &str = "https://maker.ifttt.com";

pub const DEFAULT_WEBHOOK_TIMEOUT_SECS: u64 = 5;

/// Searched in order when no `--config` is given
pub const DEFAULT_CONFIG_PATHS: [&str; 3] = [
    "config.json",
    "config.yaml",
    "/etc/home-copilot/config.yaml",
];

impl Default for TariffConfig {
    fn default() -> Self {
        Self {
            low_tariff_start: DEFAULT_LOW_TARIFF_START,
            low_tariff_end: DEFAULT_LOW_TARIFF_END,
        }
    }
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_WEBHOOK_BASE_URL.to_string(),
            timeout_secs: DEFAULT_WEBHOOK_TIMEOUT_SECS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
            file: None,
            backup_count: 5,
            console_output: true,
            json_format: false,
        }
    }
}
