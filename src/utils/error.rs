use thiserror::Error;

#[derive(Error, Debug)]
pub enum ControllerError {
    #[error("MQTT client request failed: {0}")]
    MqttClientError(#[from] rumqttc::ClientError),

    #[error("MQTT connection failed: {0}")]
    MqttConnectionError(#[from] rumqttc::ConnectionError),

    #[error("Terminal error: {0}")]
    TerminalError(#[from] std::io::Error),

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to parse configuration: {message}")]
    ConfigParseError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Terminal,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ControllerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MqttClientError(_) | Self::MqttConnectionError(_) => ErrorCategory::Network,
            Self::TerminalError(_) => ErrorCategory::Terminal,
            Self::InvalidConfigValueError { .. } | Self::ConfigParseError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Terminal => ErrorSeverity::Critical,
        }
    }

    /// Exit status for a fatal error, derived from severity.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::MqttClientError(_) => "Could not hand the request to the MQTT client".to_string(),
            Self::MqttConnectionError(e) => format!("Could not connect to the MQTT broker: {}", e),
            Self::TerminalError(e) => format!("Could not set up the terminal: {}", e),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            Self::ConfigParseError { message } => format!("Config file is not valid: {}", message),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::MqttClientError(_) => "The network task has stopped; restart the controller",
            Self::MqttConnectionError(_) => {
                "Check the broker address, the credentials and your network connection"
            }
            Self::TerminalError(_) => "Run the controller from an interactive terminal (a TTY)",
            Self::InvalidConfigValueError { .. } => {
                "Fix the value on the command line or in the config file"
            }
            Self::ConfigParseError { .. } => "Make sure the file exists and is valid TOML",
        }
    }
}

pub type Result<T> = std::result::Result<T, ControllerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_map_to_exit_code_one() {
        let err = ControllerError::ConfigParseError {
            message: "expected `]`".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_terminal_error_is_critical() {
        let err = ControllerError::from(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "not a tty",
        ));
        assert_eq!(err.category(), ErrorCategory::Terminal);
        assert_eq!(err.exit_code(), 3);
        assert!(err.user_friendly_message().contains("not a tty"));
    }

    #[test]
    fn test_invalid_value_message_names_field() {
        let err = ControllerError::InvalidConfigValueError {
            field: "broker.keep_alive".to_string(),
            value: "0".to_string(),
            reason: "Value must be between 5 and 65535".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value '0' for broker.keep_alive: Value must be between 5 and 65535"
        );
        assert!(err.user_friendly_message().contains("broker.keep_alive"));
    }
}
