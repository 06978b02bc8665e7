pub mod toml_config;

use crate::domain::model::Settings;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_broker_url, validate_non_empty_string, validate_range, Validate,
};
use clap::Parser;
use std::path::PathBuf;
use toml_config::TomlConfig;

pub const DEFAULT_BROKER_URL: &str = "ssl://mqtt.ably.io:8883";
pub const DEFAULT_KEEP_ALIVE_SECS: u64 = 15;
pub const DEFAULT_USERNAME: &str = "FIRST_HALF_OF_API_KEY";
pub const DEFAULT_PASSWORD: &str = "SECOND_HALF_OF_API_KEY";
pub const DEFAULT_DISCONNECT_GRACE_MS: u64 = 250;

pub fn default_client_id() -> String {
    format!("snake-controller-{}", std::process::id())
}

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "snake-controller")]
#[command(about = "Steer a snake over MQTT with the arrow keys")]
pub struct CliConfig {
    /// TOML file with a [broker] table
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Broker URL, e.g. ssl://mqtt.ably.io:8883 or tcp://localhost:1883
    #[arg(long)]
    pub broker: Option<String>,

    #[arg(long, env = "SNAKE_MQTT_USERNAME")]
    pub username: Option<String>,

    #[arg(long, env = "SNAKE_MQTT_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Keep-alive interval in seconds
    #[arg(long)]
    pub keep_alive: Option<u64>,

    #[arg(long)]
    pub client_id: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 合併預設值、設定檔與命令列參數 (命令列優先)
    pub fn resolve(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        let broker = file.broker();

        let settings = Settings {
            broker_url: self
                .broker
                .clone()
                .or(broker.url)
                .unwrap_or_else(|| DEFAULT_BROKER_URL.to_string()),
            keep_alive_secs: self
                .keep_alive
                .or(broker.keep_alive)
                .unwrap_or(DEFAULT_KEEP_ALIVE_SECS),
            username: self
                .username
                .clone()
                .or(broker.username)
                .unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
            password: self
                .password
                .clone()
                .or(broker.password)
                .unwrap_or_else(|| DEFAULT_PASSWORD.to_string()),
            client_id: self
                .client_id
                .clone()
                .or(broker.client_id)
                .unwrap_or_else(default_client_id),
            disconnect_grace_ms: broker
                .disconnect_grace_ms
                .unwrap_or(DEFAULT_DISCONNECT_GRACE_MS),
        };

        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_broker_url("broker.url", &self.broker_url)?;
        // 部分 rumqttc 版本要求 keep-alive 至少 5 秒
        validate_range("broker.keep_alive", self.keep_alive_secs, 5, u16::MAX as u64)?;
        validate_non_empty_string("broker.client_id", &self.client_id)?;
        validate_range("broker.disconnect_grace_ms", self.disconnect_grace_ms, 0, 10_000)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ControllerError;

    #[test]
    fn test_no_arguments_uses_compiled_defaults() {
        let settings = CliConfig::default().resolve().unwrap();

        assert_eq!(settings.broker_url, "ssl://mqtt.ably.io:8883");
        assert_eq!(settings.keep_alive_secs, 15);
        assert_eq!(settings.username, "FIRST_HALF_OF_API_KEY");
        assert_eq!(settings.password, "SECOND_HALF_OF_API_KEY");
        assert!(settings.client_id.starts_with("snake-controller-"));
        assert_eq!(settings.disconnect_grace_ms, 250);
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = CliConfig::parse_from([
            "snake-controller",
            "--broker",
            "tcp://localhost:1883",
            "--keep-alive",
            "60",
            "--client-id",
            "snake-7",
        ]);
        let settings = cli.resolve().unwrap();

        assert_eq!(settings.broker_url, "tcp://localhost:1883");
        assert_eq!(settings.keep_alive_secs, 60);
        assert_eq!(settings.client_id, "snake-7");
    }

    #[test]
    fn test_short_keep_alive_is_rejected() {
        let cli = CliConfig {
            keep_alive: Some(1),
            ..CliConfig::default()
        };
        let err = cli.resolve().unwrap_err();
        assert!(matches!(
            err,
            ControllerError::InvalidConfigValueError { ref field, .. } if field == "broker.keep_alive"
        ));
    }

    #[test]
    fn test_bad_broker_url_is_rejected() {
        let cli = CliConfig {
            broker: Some("http://mqtt.ably.io".to_string()),
            ..CliConfig::default()
        };
        assert!(cli.resolve().is_err());
    }
}
