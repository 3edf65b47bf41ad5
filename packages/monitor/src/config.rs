use anyhow::{Context, Result};
use dotenvy::dotenv;
use extraction::{DropdownInteraction, DropdownMode};
use notifier::{
    NtfyOptions, TelegramOptions, DEFAULT_NTFY_BASE_URL, DEFAULT_TELEGRAM_API_BASE_URL,
};
use std::env;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_TARGET_URL: &str = "https://example.com";
pub const DEFAULT_CONTENT_SELECTOR: &str = "body";
pub const DEFAULT_DROPDOWN_WAIT_AFTER_MS: u64 = 2000;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub target_url: String,
    pub content_selector: String,
    pub use_browser: bool,
    pub headless: bool,
    /// Set when `DROPDOWN_SELECTOR` is non-empty
    pub dropdown: Option<DropdownInteraction>,
    pub table_filter_label: String,
    pub table_filter_value: String,
    pub table_cell_names: Vec<String>,
    pub ntfy: NtfyOptions,
    pub telegram: TelegramOptions,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load a specific dotenv file, then read the environment.
    pub fn from_env_file(path: &Path) -> Result<Self> {
        dotenvy::from_path(path)
            .with_context(|| format!("Failed to load env file {}", path.display()))?;

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup. All values are trimmed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .unwrap_or_default()
        };
        // First non-empty value among `keys`; later keys are legacy names.
        let var_any = |keys: &[&str]| {
            keys.iter()
                .map(|&key| var(key))
                .find(|value| !value.is_empty())
                .unwrap_or_default()
        };
        let var_or = |key: &str, default: &str| {
            let value = var(key);
            if value.is_empty() {
                default.to_string()
            } else {
                value
            }
        };

        let target_url = var_or("TARGET_URL", DEFAULT_TARGET_URL);
        url::Url::parse(&target_url)
            .with_context(|| format!("TARGET_URL is not a valid URL: {target_url}"))?;

        let dropdown_selector = var("DROPDOWN_SELECTOR");
        let dropdown = if dropdown_selector.is_empty() {
            None
        } else {
            let wait_ms = match var("DROPDOWN_WAIT_AFTER_MS").as_str() {
                "" => DEFAULT_DROPDOWN_WAIT_AFTER_MS,
                raw => raw.parse::<u64>().with_context(|| {
                    format!("DROPDOWN_WAIT_AFTER_MS must be a number of milliseconds, got {raw:?}")
                })?,
            };
            let mode = if is_enabled(&var("DROPDOWN_CUSTOM")) {
                DropdownMode::Custom
            } else {
                DropdownMode::Native
            };

            Some(
                DropdownInteraction::new(dropdown_selector)
                    .with_value(var("DROPDOWN_OPTION_VALUE"))
                    .with_label(var("DROPDOWN_OPTION_LABEL"))
                    .with_settle_delay(Duration::from_millis(wait_ms))
                    .with_mode(mode)
                    .with_option_selector(var("DROPDOWN_OPTION_SELECTOR")),
            )
        };

        let ntfy_base_url = var_or("NTFY_BASE_URL", DEFAULT_NTFY_BASE_URL);
        url::Url::parse(&ntfy_base_url)
            .with_context(|| format!("NTFY_BASE_URL is not a valid URL: {ntfy_base_url}"))?;
        let telegram_base_url = var_or("TELEGRAM_API_BASE_URL", DEFAULT_TELEGRAM_API_BASE_URL);
        url::Url::parse(&telegram_base_url).with_context(|| {
            format!("TELEGRAM_API_BASE_URL is not a valid URL: {telegram_base_url}")
        })?;

        Ok(Self {
            target_url,
            content_selector: var_or("CONTENT_SELECTOR", DEFAULT_CONTENT_SELECTOR),
            use_browser: is_enabled(&var_any(&["USE_BROWSER", "USE_PLAYWRIGHT"])),
            headless: !is_disabled(&var("HEADLESS")),
            dropdown,
            table_filter_label: var_any(&["TABLE_FILTER_LABEL", "TABLE_FILTER_ESPECIALIDAD"]),
            table_filter_value: var_any(&[
                "TABLE_FILTER_VALUE",
                "TABLE_FILTER_ESPECIALIDAD_VALUE",
            ]),
            table_cell_names: split_names(&var("TABLE_CELL_NAMES")),
            ntfy: NtfyOptions {
                topic: var("NTFY_TOPIC"),
                base_url: ntfy_base_url,
            },
            telegram: TelegramOptions {
                bot_token: var("TELEGRAM_BOT_TOKEN"),
                chat_id: var("TELEGRAM_CHAT_ID"),
                api_base_url: telegram_base_url,
            },
        })
    }
}

fn is_enabled(value: &str) -> bool {
    matches!(value, "1" | "true")
}

fn is_disabled(value: &str) -> bool {
    matches!(value, "0" | "false")
}

/// Comma-separated names, trimmed, blanks dropped.
fn split_names(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}
