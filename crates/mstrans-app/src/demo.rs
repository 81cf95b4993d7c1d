use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use mstrans_broker::TokenBroker;
use mstrans_client::{CallResult, Options, TranslatorClient};
use mstrans_config::{Config, Credentials};
use mstrans_http::{HttpTransport, ReqwestTransport};
use tokio::time::timeout;

const RESPONSE_WAIT: Duration = Duration::from_secs(15);

/// Replays the original sample page: list the translatable and speakable
/// languages, resolve their localized names, translate the sample text,
/// and render it as speech.
pub async fn run(credentials: &Path, text: String, to: String, locale: String) -> Result<()> {
    let credentials = Credentials::load(credentials)?;
    let config = Config::new();
    let transport: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport::new());

    let broker = TokenBroker::new(config.broker, Arc::clone(&transport));
    let grant = broker.fetch(&credentials).await?;
    tracing::info!("token fetched, starting the call sequence");

    let client = TranslatorClient::new(config.client, grant.access_token(), transport);
    let (tx, rx) = kanal::unbounded_async::<(&'static str, CallResult)>();

    client.languages_for_translate(
        Options::new().on_result(report(&tx, "GetLanguagesForTranslate")),
    )?;
    client.languages_for_speak(Options::new().on_result(report(&tx, "GetLanguagesForSpeak")))?;
    client.language_names(
        Options::new()
            .set("locale", locale.as_str())
            .on_result(report(&tx, "GetLanguageNames")),
    )?;
    client.translate(
        Options::new()
            .set("text", text.as_str())
            .set("to", to.as_str())
            .on_result(report(&tx, "Translate")),
    )?;
    client.speak(
        Options::new()
            .set("text", text.as_str())
            .set("language", to.as_str())
            .on_result(report(&tx, "Speak")),
    )?;

    for _ in 0..5 {
        let (operation, result) = timeout(RESPONSE_WAIT, rx.recv())
            .await
            .context("timed out waiting for a response")??;
        match result {
            Ok(payload) => tracing::info!("{}: {}", operation, summarize(&payload)),
            Err(err) => tracing::error!("{}: {}", operation, err),
        }
    }

    Ok(())
}

fn report(
    tx: &kanal::AsyncSender<(&'static str, CallResult)>,
    operation: &'static str,
) -> impl FnOnce(CallResult) + Send + 'static {
    let tx = tx.clone();
    move |result| {
        tokio::spawn(async move {
            if tx.send((operation, result)).await.is_err() {
                tracing::warn!("{}: receiver already gone", operation);
            }
        });
    }
}

/// Language listings run to dozens of entries; log a compact view.
fn summarize(payload: &serde_json::Value) -> String {
    match payload {
        serde_json::Value::Array(items) => format!("{} entries", items.len()),
        other => other.to_string(),
    }
}
