use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use mstrans_broker::TokenBroker;
use mstrans_config::{BrokerConfig, Credentials};
use mstrans_http::ReqwestTransport;

/// Runs the broker once and prints the embeddable token document on
/// stdout: the raw token response paired with the flattened claims, or
/// the upstream error shape.
pub async fn run(credentials: &Path) -> Result<()> {
    let credentials = Credentials::load(credentials)?;
    let broker = TokenBroker::new(BrokerConfig::new(), Arc::new(ReqwestTransport::new()));

    match broker.fetch(&credentials).await {
        Ok(grant) => {
            println!("{}", serde_json::to_string_pretty(&grant.embed().to_json())?);
            Ok(())
        }
        Err(err) => {
            // The hosting page still gets a document to render when the
            // service itself reported the failure.
            if let Some(embed) = err.embed() {
                println!("{}", serde_json::to_string_pretty(&embed.to_json())?);
            }
            Err(err.into())
        }
    }
}
