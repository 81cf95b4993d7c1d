//! Client for the Microsoft Translator V2 Ajax endpoints.
//!
//! One method per remote operation. Each call validates its options
//! against the operation's parameter table, serializes them into a
//! percent-encoded query, and fires the request on a spawned task; the
//! decoded JSON payload (or the failure) reaches the caller through the
//! completion handler registered in the options.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use mstrans_client::{Options, TranslatorClient};
//! use mstrans_config::ClientConfig;
//! use mstrans_http::ReqwestTransport;
//!
//! # fn demo() -> Result<(), mstrans_client::ClientError> {
//! let client = TranslatorClient::new(
//!     ClientConfig::new(),
//!     "raw-access-token",
//!     Arc::new(ReqwestTransport::new()),
//! );
//!
//! client.translate(
//!     Options::new()
//!         .set("text", "the quick brown fox")
//!         .set("to", "nl")
//!         .on_result(|result| println!("{result:?}")),
//! )?;
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod options;
mod query;
mod registry;
mod specs;
mod validate;

pub use client::TranslatorClient;
pub use error::{CallError, CallResult, ClientError, Problem, ValidationError};
pub use options::{CompletionHandler, OptionValue, Options};
pub use registry::{PendingCallbacks, RequestId};
pub use validate::{Kind, ParamSpec, validate};

#[cfg(test)]
mod tests;
