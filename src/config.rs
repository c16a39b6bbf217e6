use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub snail: SnailConfig,
    pub webhook: WebhookConfig,
}

/// Settings for the animated foreground process.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SnailConfig {
    /// Frame pacing, milliseconds. Smaller is faster.
    pub frame_interval_ms: u64,
    /// How long the process stays alive after acknowledging SIGTERM.
    pub grace_period_secs: u64,
    /// Banner color name.
    pub color: String,
}

impl Default for SnailConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: 50,
            grace_period_secs: 5,
            color: "green".to_string(),
        }
    }
}

impl SnailConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    pub fn grace_period(&self) -> Duration {
        Duration::from_secs(self.grace_period_secs)
    }

    /// The configured color. Validation guarantees the name is known; an
    /// unvalidated config falls back to the default.
    pub fn color(&self) -> Color {
        parse_color(&self.color).unwrap_or(Color::Green)
    }
}

/// Settings for the webhook listener.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    /// Listen address. All interfaces by default so a remote host can reach it.
    pub bind_addr: String,
    /// Directory for the append-only payload log, created at startup.
    pub log_dir: PathBuf,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5000".to_string(),
            log_dir: PathBuf::from("logs"),
        }
    }
}

fn parse_color(name: &str) -> Option<Color> {
    match name.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        _ => None,
    }
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/snail/config.toml` on Unix/macOS, or equivalent on
    /// other platforms via `dirs::config_dir()`. Falls back to the current
    /// directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("snail").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Config::default());
        }

        Self::load_from(&path)
    }

    /// Loads configuration from an explicit path; the file must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The frame interval is nonzero
    /// - The banner color name is known
    /// - The webhook bind address parses as a socket address
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.snail.frame_interval_ms == 0 {
            return Err(ConfigError::ValidationError {
                message: "snail.frame_interval_ms must be greater than zero".to_string(),
            });
        }

        if parse_color(&self.snail.color).is_none() {
            return Err(ConfigError::ValidationError {
                message: format!("Unknown snail.color '{}'", self.snail.color),
            });
        }

        if self.webhook.bind_addr.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::ValidationError {
                message: format!("Invalid webhook.bind_addr '{}'", self.webhook.bind_addr),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        config.validate().expect("default config should validate");
        assert_eq!(config.snail.frame_interval(), Duration::from_millis(50));
        assert_eq!(config.snail.grace_period(), Duration::from_secs(5));
        assert_eq!(config.snail.color(), Color::Green);
        assert_eq!(config.webhook.bind_addr, "0.0.0.0:5000");
    }

    #[test]
    fn partial_file_overrides_defaults() {
        let config: Config = toml::from_str(
            r#"
            [snail]
            frame_interval_ms = 20
            color = "cyan"
            "#,
        )
        .expect("toml should parse");
        config.validate().expect("config should validate");
        assert_eq!(config.snail.frame_interval_ms, 20);
        assert_eq!(config.snail.color(), Color::Cyan);
        // Untouched sections keep their defaults.
        assert_eq!(config.snail.grace_period_secs, 5);
        assert_eq!(config.webhook.log_dir, PathBuf::from("logs"));
    }

    #[test]
    fn zero_frame_interval_is_rejected() {
        let mut config = Config::default();
        config.snail.frame_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_color_is_rejected() {
        let mut config = Config::default();
        config.snail.color = "chartreuse".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn bad_bind_addr_is_rejected() {
        let mut config = Config::default();
        config.webhook.bind_addr = "not-an-address".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_from_reads_and_validates() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        let mut file = fs::File::create(&path).expect("create config");
        writeln!(file, "[snail]\ngrace_period_secs = 1").expect("write config");

        let config = Config::load_from(&path).expect("load_from should succeed");
        assert_eq!(config.snail.grace_period(), Duration::from_secs(1));
    }

    #[test]
    fn load_from_missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = Config::load_from(&dir.path().join("absent.toml"))
            .expect_err("missing file should error");
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }
}
