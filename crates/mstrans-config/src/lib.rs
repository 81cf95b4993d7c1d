use serde::{Deserialize, Serialize};

pub mod broker;
pub mod client;
pub mod credentials;
pub mod error;

pub use broker::BrokerConfig;
pub use client::ClientConfig;
pub use credentials::Credentials;
pub use error::ConfigError;

#[derive(Default, Serialize, Deserialize)]
pub struct Config {
    pub broker: BrokerConfig,
    pub client: ClientConfig,
}

impl Config {
    pub fn new() -> Self {
        Config {
            broker: BrokerConfig::new(),
            client: ClientConfig::new(),
        }
    }
}
