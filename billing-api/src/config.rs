use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use thiserror::Error;

pub const PORT_VAR: &str = "BILLING_API_PORT";
pub const HOST_VAR: &str = "BILLING_API_HOST";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a port number, got {value:?}")]
    InvalidPort { var: &'static str, value: String },

    #[error("{var} must be an IP address, got {value:?}")]
    InvalidHost { var: &'static str, value: String },
}

/// Listener settings. Defaults to 0.0.0.0:5000.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 5000,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        ApiConfig::from_lookup(|var| env::var(var).ok())
    }

    /// Build from any variable lookup; unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ApiConfig::default();
        if let Some(value) = lookup(PORT_VAR) {
            config.port = value.trim().parse().map_err(|_| ConfigError::InvalidPort {
                var: PORT_VAR,
                value: value.clone(),
            })?;
        }
        if let Some(value) = lookup(HOST_VAR) {
            config.host = value.trim().parse().map_err(|_| ConfigError::InvalidHost {
                var: HOST_VAR,
                value: value.clone(),
            })?;
        }
        Ok(config)
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let config = ApiConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.addr().to_string(), "0.0.0.0:5000");
    }

    #[test]
    fn reads_port_and_host() {
        let config = ApiConfig::from_lookup(|var| match var {
            PORT_VAR => Some("8080".to_string()),
            HOST_VAR => Some("127.0.0.1".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.addr().to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn rejects_bad_port() {
        let err = ApiConfig::from_lookup(|var| (var == PORT_VAR).then(|| "http".to_string()))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidPort {
                var: PORT_VAR,
                value: "http".to_string()
            }
        );
    }
}
