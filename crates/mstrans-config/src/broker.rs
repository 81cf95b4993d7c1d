use std::env;

use serde::{Deserialize, Serialize};

fn default_token_endpoint() -> String {
    "https://datamarket.accesscontrol.windows.net/v2/OAuth2-13/".to_string()
}

fn default_scope() -> String {
    "http://api.microsofttranslator.com".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct BrokerConfig {
    /// OAuth2 token endpoint the broker posts client credentials to
    #[serde(default = "default_token_endpoint")]
    pub token_endpoint: String,
    /// Fixed translator scope requested with every grant
    #[serde(default = "default_scope")]
    pub scope: String,
}

impl BrokerConfig {
    pub fn new() -> Self {
        let token_endpoint =
            env::var("TRANSLATOR_TOKEN_ENDPOINT").unwrap_or_else(|_| default_token_endpoint());
        let scope = env::var("TRANSLATOR_SCOPE").unwrap_or_else(|_| default_scope());

        Self {
            token_endpoint,
            scope,
        }
    }
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            token_endpoint: default_token_endpoint(),
            scope: default_scope(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_datamarket() {
        let config = BrokerConfig::default();

        assert_eq!(
            config.token_endpoint,
            "https://datamarket.accesscontrol.windows.net/v2/OAuth2-13/"
        );
        assert_eq!(config.scope, "http://api.microsofttranslator.com");
    }
}
