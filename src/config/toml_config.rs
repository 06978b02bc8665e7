use crate::utils::error::{ControllerError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub broker: Option<BrokerSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BrokerSection {
    pub url: Option<String>,
    pub keep_alive: Option<u64>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub client_id: Option<String>,
    pub disconnect_grace_ms: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ControllerError::ConfigParseError {
                message: format!("cannot read {}: {}", path.display(), e),
            })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ControllerError::ConfigParseError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ABLY_API_KEY})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ControllerError::ConfigParseError {
            message: format!("placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 取得 broker 區段 (不存在時為空)
    pub fn broker(&self) -> BrokerSection {
        self.broker.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_broker_section() {
        let toml_content = r#"
[broker]
url = "tcp://localhost:1883"
keep_alive = 30
username = "snake"
password = "hiss"
client_id = "snake-lab"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let broker = config.broker();

        assert_eq!(broker.url.as_deref(), Some("tcp://localhost:1883"));
        assert_eq!(broker.keep_alive, Some(30));
        assert_eq!(broker.client_id.as_deref(), Some("snake-lab"));
        assert_eq!(broker.disconnect_grace_ms, None);
    }

    #[test]
    fn test_empty_file_is_valid() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.broker.is_none());
        assert!(config.broker().url.is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SNAKE_TOML_TEST_PASSWORD", "from-env");

        let toml_content = r#"
[broker]
password = "${SNAKE_TOML_TEST_PASSWORD}"
username = "${SNAKE_TOML_TEST_UNSET_VARIABLE}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let broker = config.broker();
        assert_eq!(broker.password.as_deref(), Some("from-env"));
        assert_eq!(
            broker.username.as_deref(),
            Some("${SNAKE_TOML_TEST_UNSET_VARIABLE}")
        );

        std::env::remove_var("SNAKE_TOML_TEST_PASSWORD");
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let toml_content = r#"
[broker]
adress = "tcp://localhost"
"#;
        let err = TomlConfig::from_toml_str(toml_content).unwrap_err();
        assert!(matches!(err, ControllerError::ConfigParseError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[broker]\nurl = \"mqtts://broker.example.com\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(
            config.broker().url.as_deref(),
            Some("mqtts://broker.example.com")
        );
    }

    #[test]
    fn test_missing_file_is_a_config_error() {
        let err = TomlConfig::from_file("/nonexistent/snake-controller.toml").unwrap_err();
        assert!(matches!(err, ControllerError::ConfigParseError { .. }));
    }
}
