//! Settings structures for the console configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Main settings structure matching `settings.yml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub api: ApiSettings,
    pub ui: UiSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables (PROSPECTS_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("PROSPECTS_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Ok(val) = std::env::var("PROSPECTS_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("PROSPECTS_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Ok(val) = std::env::var("PROSPECTS_API_URL") {
            self.api.base_url = val;
        }
        if let Ok(val) = std::env::var("PROSPECTS_API_TOKEN") {
            self.api.token = Some(val);
        }
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
    /// Name shown in page titles
    pub instance_name: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            instance_name: "Entidades Prospects".to_string(),
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_address: "127.0.0.1".to_string(),
        }
    }
}

/// Settings for the upstream REST API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL every resource path is joined onto
    pub base_url: String,
    /// Access token sent with every request
    pub token: Option<String>,
    /// Header carrying the access token
    pub token_header: String,
    /// Request timeout in seconds
    pub request_timeout: f64,
    /// Pool max size
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
    /// Extra headers to send
    pub extra_headers: HashMap<String, String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3333/".to_string(),
            token: None,
            token_header: "Riosoft-Token".to_string(),
            request_timeout: 10.0,
            pool_maxsize: 20,
            verify_ssl: true,
            proxies: ProxySettings::default(),
            extra_headers: HashMap::new(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Rows per listing page, also the fallback total when the API omits `x-total-count`
    pub page_size: u32,
    /// Caption rendered for an empty listing
    pub empty_listing_message: String,
    /// Quiet period before a search is sent, in milliseconds
    pub debounce_ms: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            page_size: crate::DEFAULT_PAGE_SIZE,
            empty_listing_message: "Nenhum registro encontrado.".to_string(),
            debounce_ms: crate::DEFAULT_DEBOUNCE_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8080);
        assert!(!settings.general.debug);
        assert_eq!(settings.api.token_header, "Riosoft-Token");
        assert_eq!(settings.ui.page_size, 5);
        assert_eq!(settings.ui.debounce_ms, 300);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
api:
  base_url: "https://erp.example.com/"
  token: "secret"
ui:
  page_size: 20
"#;
        let settings = Settings::from_yaml(yaml).unwrap();
        assert_eq!(settings.api.base_url, "https://erp.example.com/");
        assert_eq!(settings.api.token.as_deref(), Some("secret"));
        assert_eq!(settings.api.request_timeout, 10.0);
        assert_eq!(settings.ui.page_size, 20);
        assert_eq!(settings.ui.empty_listing_message, "Nenhum registro encontrado.");
        assert_eq!(settings.server.bind_address, "127.0.0.1");
    }

    #[test]
    fn test_invalid_yaml_is_rejected() {
        assert!(Settings::from_yaml("server: [1, 2").is_err());
    }
}
