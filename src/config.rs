//! Clawfeed configuration management

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main Clawfeed configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClawfeedConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Static page configuration
    #[serde(default)]
    pub ui: UiConfig,
}

impl ClawfeedConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(Error::Config("server.host must not be empty".to_string()));
        }
        Ok(())
    }

    /// Render as pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Allowed CORS origins (empty = any)
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Static page configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// HTML page served at `/`
    pub index_path: PathBuf,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            index_path: PathBuf::from("static/index.html"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClawfeedConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(config.server.cors_origins.is_empty());
        assert_eq!(config.ui.index_path, PathBuf::from("static/index.html"));
        assert_eq!(config.server.bind_addr(), "127.0.0.1:8000");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ClawfeedConfig::from_toml(
            r#"
            [server]
            port = 9100
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.ui, UiConfig::default());
    }

    #[test]
    fn test_empty_toml() {
        let config = ClawfeedConfig::from_toml("").unwrap();
        assert_eq!(config, ClawfeedConfig::default());
    }

    #[test]
    fn test_full_toml() {
        let config = ClawfeedConfig::from_toml(
            r#"
            [server]
            host = "0.0.0.0"
            port = 80
            cors_origins = ["https://feed.example.com"]

            [ui]
            index_path = "/srv/clawfeed/index.html"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.bind_addr(), "0.0.0.0:80");
        assert_eq!(config.server.cors_origins.len(), 1);
        assert_eq!(
            config.ui.index_path,
            PathBuf::from("/srv/clawfeed/index.html")
        );
    }

    #[test]
    fn test_blank_host_rejected() {
        let err = ClawfeedConfig::from_toml("[server]\nhost = \" \"\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_invalid_toml() {
        let err = ClawfeedConfig::from_toml("[server\nport = 1").unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn test_toml_output_parses_back() {
        let config = ClawfeedConfig::default();
        let rendered = config.to_toml().unwrap();
        assert!(rendered.contains("[server]"));
        assert_eq!(ClawfeedConfig::from_toml(&rendered).unwrap(), config);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("clawfeed.toml");
        std::fs::write(&path, "[server]\nport = 8123\n").unwrap();

        let config = ClawfeedConfig::load(&path).unwrap();
        assert_eq!(config.server.port, 8123);

        let missing = ClawfeedConfig::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(missing, Error::Io(_)));
    }
}
