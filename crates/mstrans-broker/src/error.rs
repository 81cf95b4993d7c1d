use mstrans_http::TransportError;
use mstrans_types::TokenEmbed;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrokerError {
    /// The transport never produced a response. Fatal for this invocation.
    #[error("token request failed: {0}")]
    Network(#[source] TransportError),

    /// The OAuth service answered with its own error payload. Not retried.
    #[error("token service error: {error}. {error_description}")]
    Upstream {
        error: String,
        error_description: String,
    },

    /// A response that is neither a grant nor the documented error shape.
    #[error("unexpected token response: {detail}")]
    UnexpectedResponse { detail: String },
}

impl BrokerError {
    /// Embeddable `{error, error_description}` shape for the hosting page,
    /// when one exists. Network failures halt rendering instead.
    pub fn embed(&self) -> Option<TokenEmbed> {
        match self {
            BrokerError::Network(_) => None,
            BrokerError::Upstream {
                error,
                error_description,
            } => Some(TokenEmbed::from_error(error, error_description)),
            BrokerError::UnexpectedResponse { detail } => {
                Some(TokenEmbed::from_error("unexpected_response", detail))
            }
        }
    }
}
