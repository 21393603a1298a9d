//! Server settings read from the environment (after `.env` is loaded by the binary).

use crate::error::ConfigError;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub const HOST_VAR: &str = "MOCK_API_HOST";
pub const PORT_VAR: &str = "MOCK_API_PORT";
pub const RESOURCES_VAR: &str = "MOCK_API_RESOURCES";
pub const BODY_LIMIT_VAR: &str = "MOCK_API_BODY_LIMIT";

pub const DEFAULT_PORT: u16 = 3333;
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerSettings {
    pub host: IpAddr,
    pub port: u16,
    pub resources_path: PathBuf,
    /// Maximum accepted request body, in bytes.
    pub body_limit: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            resources_path: PathBuf::from("resources.json"),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl ServerSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = ServerSettings::default();
        if let Some(v) = lookup(HOST_VAR) {
            settings.host = v.trim().parse().map_err(|_| ConfigError::Setting {
                key: HOST_VAR,
                message: format!("'{}' is not an IP address", v),
            })?;
        }
        if let Some(v) = lookup(PORT_VAR) {
            settings.port = v.trim().parse().map_err(|_| ConfigError::Setting {
                key: PORT_VAR,
                message: format!("'{}' is not a TCP port", v),
            })?;
        }
        if let Some(v) = lookup(RESOURCES_VAR) {
            if v.trim().is_empty() {
                return Err(ConfigError::Setting {
                    key: RESOURCES_VAR,
                    message: "path is empty".into(),
                });
            }
            settings.resources_path = PathBuf::from(v);
        }
        if let Some(v) = lookup(BODY_LIMIT_VAR) {
            settings.body_limit = match v.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Setting {
                        key: BODY_LIMIT_VAR,
                        message: format!("'{}' is not a positive byte count", v),
                    })
                }
            };
        }
        Ok(settings)
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
