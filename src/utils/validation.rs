use crate::domain::model::BrokerAddress;
use crate::utils::error::{ControllerError, Result};
use url::{Host, Url};

pub const TLS_SCHEMES: [&str; 3] = ["ssl", "tls", "mqtts"];
pub const PLAIN_SCHEMES: [&str; 2] = ["tcp", "mqtt"];

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_broker_url(field_name: &str, url_str: &str) -> Result<()> {
    parse_broker_url(field_name, url_str).map(|_| ())
}

/// Split a broker URL such as `ssl://mqtt.ably.io:8883` into host, port and transport.
pub fn parse_broker_url(field_name: &str, url_str: &str) -> Result<BrokerAddress> {
    let invalid = |reason: String| ControllerError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: url_str.to_string(),
        reason,
    };

    if url_str.is_empty() {
        return Err(invalid("URL cannot be empty".to_string()));
    }

    let url = Url::parse(url_str).map_err(|e| invalid(format!("Invalid URL format: {}", e)))?;

    let scheme = url.scheme();
    let tls = TLS_SCHEMES.contains(&scheme);
    if !tls && !PLAIN_SCHEMES.contains(&scheme) {
        return Err(invalid(format!(
            "Unsupported URL scheme: {}. Valid schemes: {}, {}",
            scheme,
            TLS_SCHEMES.join(", "),
            PLAIN_SCHEMES.join(", ")
        )));
    }

    let host = match url.host() {
        Some(Host::Domain(domain)) if !domain.is_empty() => domain.to_string(),
        Some(Host::Ipv4(addr)) => addr.to_string(),
        Some(Host::Ipv6(addr)) => addr.to_string(),
        _ => return Err(invalid("URL has no host".to_string())),
    };
    let port = url.port().unwrap_or(if tls { 8883 } else { 1883 });

    Ok(BrokerAddress { host, port, tls })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ControllerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ControllerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
