//! One-shot OAuth2 client-credentials exchange against the datamarket
//! access control service.

mod broker;
mod error;

pub use broker::{TokenBroker, TokenGrant};
pub use error::BrokerError;
