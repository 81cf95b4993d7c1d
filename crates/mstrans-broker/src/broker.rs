use std::sync::Arc;

use mstrans_config::{BrokerConfig, Credentials};
use mstrans_http::{HttpResponse, HttpTransport};
use mstrans_types::{Claims, TokenEmbed, TokenResponse, UpstreamErrorBody};

use crate::error::BrokerError;

/// Exchanges client credentials for a bearer token.
///
/// Exactly one fetch per call: no retry, no caching, no expiry tracking. A
/// token that expires simply makes a later translator call fail upstream.
pub struct TokenBroker {
    config: BrokerConfig,
    transport: Arc<dyn HttpTransport>,
}

/// A successful exchange: the raw body (kept verbatim for embedding), the
/// typed response, and the decoded claims.
#[derive(Debug, Clone)]
pub struct TokenGrant {
    pub raw: String,
    pub response: TokenResponse,
    pub claims: Claims,
}

impl TokenGrant {
    /// The credential attached to every translator call as `appId`.
    pub fn access_token(&self) -> &str {
        &self.response.access_token
    }

    pub fn embed(&self) -> TokenEmbed {
        TokenEmbed::new(self.raw.clone(), &self.claims)
    }
}

impl TokenBroker {
    pub fn new(config: BrokerConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    /// Performs the client-credentials grant.
    ///
    /// Transport trouble is [`BrokerError::Network`]; the service's own
    /// `{error, error_description}` payload comes back verbatim as
    /// [`BrokerError::Upstream`]; anything without an `access_token` is
    /// [`BrokerError::UnexpectedResponse`].
    pub async fn fetch(&self, credentials: &Credentials) -> Result<TokenGrant, BrokerError> {
        let form = vec![
            ("client_id".to_string(), credentials.client_id.clone()),
            ("client_secret".to_string(), credentials.client_secret.clone()),
            ("scope".to_string(), self.config.scope.clone()),
            ("grant_type".to_string(), "client_credentials".to_string()),
        ];

        tracing::debug!("requesting access token from {}", self.config.token_endpoint);

        let response = self
            .transport
            .post_form(&self.config.token_endpoint, &form)
            .await
            .map_err(BrokerError::Network)?;

        // The service reports its own errors as a JSON body on a 400, so
        // inspect the body before judging the status line.
        let body: serde_json::Value = match serde_json::from_str(&response.body) {
            Ok(body) => body,
            Err(_) => {
                return Err(BrokerError::UnexpectedResponse {
                    detail: detail(&response),
                });
            }
        };

        if body.get("error").is_some() {
            return match serde_json::from_str::<UpstreamErrorBody>(&response.body) {
                Ok(upstream) => Err(BrokerError::Upstream {
                    error: upstream.error,
                    error_description: upstream.error_description,
                }),
                Err(_) => Err(BrokerError::UnexpectedResponse {
                    detail: detail(&response),
                }),
            };
        }

        let parsed: TokenResponse = match serde_json::from_str(&response.body) {
            Ok(parsed) => parsed,
            Err(_) => {
                return Err(BrokerError::UnexpectedResponse {
                    detail: detail(&response),
                });
            }
        };

        let claims = Claims::parse(&parsed.access_token);

        tracing::info!(
            "access token received: {} claims, expires_in={}",
            claims.len(),
            parsed.expires_in.as_deref().unwrap_or("?")
        );

        Ok(TokenGrant {
            raw: response.body,
            response: parsed,
            claims,
        })
    }
}

fn detail(response: &HttpResponse) -> String {
    let trimmed = response.body.trim();
    if trimmed.is_empty() {
        return format!("HTTP {} with an empty body", response.status);
    }

    let excerpt: String = trimmed.chars().take(200).collect();
    format!("HTTP {}: {}", response.status, excerpt)
}
