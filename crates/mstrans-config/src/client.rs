use std::env;

use serde::{Deserialize, Serialize};

fn default_api_base() -> String {
    "http://api.microsofttranslator.com/V2/Ajax.svc".to_string()
}

fn default_online() -> bool {
    true
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL the per-operation paths are appended to
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Initial connectivity assumption; calls made while offline fail fast
    #[serde(default = "default_online")]
    pub online: bool,
}

impl ClientConfig {
    pub fn new() -> Self {
        let api_base = env::var("TRANSLATOR_API_BASE").unwrap_or_else(|_| default_api_base());

        Self {
            api_base,
            online: default_online(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            online: default_online(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_ajax_service() {
        let config = ClientConfig::default();

        assert_eq!(config.api_base, "http://api.microsofttranslator.com/V2/Ajax.svc");
        assert!(config.online);
    }
}
