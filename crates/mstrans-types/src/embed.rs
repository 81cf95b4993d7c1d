use serde::{Deserialize, Serialize};

use crate::token::Claims;

/// The OAuth service's own error payload, passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamErrorBody {
    pub error: String,
    #[serde(default)]
    pub error_description: String,
}

/// The two JSON documents the hosting page defines before loading the client
/// library: the raw token-fetch response and the flattened claims mapping.
///
/// Embeddable broker failures (the upstream error shape, an unexpected
/// response) replace the response document with `{error, error_description}`
/// and leave the claims document an empty object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenEmbed {
    pub response_json: String,
    pub access_token_as_json: String,
}

impl TokenEmbed {
    pub fn new(response_json: String, claims: &Claims) -> Self {
        Self {
            response_json,
            access_token_as_json: claims.to_json(),
        }
    }

    pub fn from_error(error: &str, error_description: &str) -> Self {
        let body = UpstreamErrorBody {
            error: error.to_string(),
            error_description: error_description.to_string(),
        };

        Self {
            response_json: serde_json::to_string(&body).expect("error shape serializes"),
            access_token_as_json: "{}".to_string(),
        }
    }

    /// Single-document form, convenient for printing:
    /// `{"response_json": …, "access_token_as_json": …}`.
    pub fn to_json(&self) -> serde_json::Value {
        let parse = |raw: &str| {
            serde_json::from_str::<serde_json::Value>(raw)
                .unwrap_or_else(|_| serde_json::Value::String(raw.to_string()))
        };

        serde_json::json!({
            "response_json": parse(&self.response_json),
            "access_token_as_json": parse(&self.access_token_as_json),
        })
    }
}
