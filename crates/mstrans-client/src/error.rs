use std::fmt;

use mstrans_http::TransportError;
use thiserror::Error;

use crate::validate::Kind;

/// What a completion handler receives: the decoded JSON payload of the
/// operation, or the reason the call never produced one.
pub type CallResult = Result<serde_json::Value, CallError>;

/// Why a dispatched call failed after it left the client.
#[derive(Debug, Error)]
pub enum CallError {
    #[error("transport failure: {0}")]
    Transport(#[source] TransportError),

    #[error("service answered HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("undecodable response payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Why a call was rejected before anything went on the wire.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The client is marked offline, so the call was not attempted.
    #[error("offline: {operation} was not attempted")]
    Offline { operation: &'static str },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Declared by the remote service but not supported by this client.
    #[error("{operation} is not implemented")]
    NotImplemented { operation: &'static str },
}

/// A single option failed the parameter rules of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation}: parameter `{parameter}` {problem}")]
pub struct ValidationError {
    pub operation: &'static str,
    pub parameter: &'static str,
    pub problem: Problem,
}

impl ValidationError {
    pub(crate) fn missing(operation: &'static str, parameter: &'static str) -> Self {
        Self {
            operation,
            parameter,
            problem: Problem::Missing,
        }
    }

    pub(crate) fn empty(operation: &'static str, parameter: &'static str) -> Self {
        Self {
            operation,
            parameter,
            problem: Problem::Empty,
        }
    }

    pub(crate) fn wrong_kind(
        operation: &'static str,
        parameter: &'static str,
        expected: Kind,
        found: Kind,
    ) -> Self {
        Self {
            operation,
            parameter,
            problem: Problem::WrongKind { expected, found },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Problem {
    Missing,
    Empty,
    WrongKind { expected: Kind, found: Kind },
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::Missing => write!(f, "is required but missing"),
            Problem::Empty => write!(f, "must not be empty"),
            Problem::WrongKind { expected, found } => {
                write!(f, "must be {expected}, found {found}")
            }
        }
    }
}
