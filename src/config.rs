//! Service configuration
//!
//! Configuration is read once at startup, from an optional YAML file with
//! command-line overrides on top, and then shared read-only with every
//! request handler.
//!
//! ```yaml
//! host: 0.0.0.0
//! port: 5000
//! banner: SH Rocks
//! message_mode: banner   # or: echo
//! cors: true
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;

// ============================================================================
// Message Mode
// ============================================================================

/// Which text the routing response carries in its `message` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageMode {
    /// Always respond with the configured banner
    #[default]
    Banner,
    /// Echo the caller's message back
    Echo,
}

impl MessageMode {
    /// Select the response message
    pub fn select<'a>(self, banner: &'a str, request_message: &'a str) -> &'a str {
        match self {
            MessageMode::Banner => banner,
            MessageMode::Echo => request_message,
        }
    }
}

// ============================================================================
// Service Config
// ============================================================================

/// Complete service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Banner returned in the response `message` field
    #[serde(default = "default_banner")]
    pub banner: String,

    /// Banner or echo behavior for the response message
    #[serde(default)]
    pub message_mode: MessageMode,

    /// Allow cross-origin requests from any origin
    #[serde(default = "default_cors")]
    pub cors: bool,
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    5000
}

fn default_banner() -> String {
    "SH Rocks".to_string()
}

fn default_cors() -> bool {
    true
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            banner: default_banner(),
            message_mode: MessageMode::default(),
            cors: default_cors(),
        }
    }
}

impl ServiceConfig {
    /// Parse a config from YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: ServiceConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::config(format!(
                    "Failed to read config file '{}': {}",
                    path.display(),
                    e
                ))
            }
        })?;
        Self::from_yaml_str(&content)
    }

    /// Apply command-line overrides
    #[must_use]
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(host) = overrides.host {
            self.host = host;
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(banner) = &overrides.banner {
            self.banner.clone_from(banner);
        }
        if overrides.echo_message {
            self.message_mode = MessageMode::Echo;
        }
        self
    }

    /// Check field values
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(Error::invalid_config("port", "must be non-zero"));
        }
        if self.banner.trim().is_empty() {
            return Err(Error::invalid_config("banner", "must not be empty"));
        }
        Ok(())
    }

    /// Address to bind the listener to
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Values given on the command line that take precedence over the file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Listen address
    pub host: Option<IpAddr>,
    /// Listen port
    pub port: Option<u16>,
    /// Fixed response banner
    pub banner: Option<String>,
    /// Switch to echoing the request message
    pub echo_message: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:5000");
        assert_eq!(config.banner, "SH Rocks");
        assert_eq!(config.message_mode, MessageMode::Banner);
        assert!(config.cors);
    }

    #[test]
    fn test_from_yaml_partial() {
        let config = ServiceConfig::from_yaml_str("port: 8080\nmessage_mode: echo\n").unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.message_mode, MessageMode::Echo);
        assert_eq!(config.banner, "SH Rocks");
    }

    #[test]
    fn test_from_yaml_rejects_zero_port() {
        let err = ServiceConfig::from_yaml_str("port: 0").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid config value for 'port': must be non-zero"
        );
    }

    #[test]
    fn test_from_yaml_rejects_blank_banner() {
        let err = ServiceConfig::from_yaml_str("banner: '  '").unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { .. }));
    }

    #[test]
    fn test_from_yaml_invalid() {
        let err = ServiceConfig::from_yaml_str("port: [1, 2]").unwrap_err();
        assert!(matches!(err, Error::YamlParse(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "host: 127.0.0.1\nport: 9000\nbanner: Hello\ncors: false").unwrap();

        let config = ServiceConfig::from_file(file.path()).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:9000");
        assert_eq!(config.banner, "Hello");
        assert!(!config.cors);
    }

    #[test]
    fn test_from_missing_file() {
        let err = ServiceConfig::from_file("/nonexistent/router.yaml").unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_overrides() {
        let overrides = ConfigOverrides {
            host: Some("127.0.0.1".parse().unwrap()),
            port: Some(7000),
            banner: Some("Routed".to_string()),
            echo_message: true,
        };
        let config = ServiceConfig::default().with_overrides(&overrides);

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:7000");
        assert_eq!(config.banner, "Routed");
        assert_eq!(config.message_mode, MessageMode::Echo);
    }

    #[test]
    fn test_empty_overrides_keep_file_values() {
        let config = ServiceConfig::from_yaml_str("port: 6000").unwrap();
        let merged = config.clone().with_overrides(&ConfigOverrides::default());
        assert_eq!(merged, config);
    }

    #[test]
    fn test_message_mode_select() {
        assert_eq!(MessageMode::Banner.select("SH Rocks", "hi"), "SH Rocks");
        assert_eq!(MessageMode::Echo.select("SH Rocks", "hi"), "hi");
    }
}
