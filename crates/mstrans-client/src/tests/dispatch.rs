use std::sync::Arc;
use std::time::Duration;

use mstrans_config::ClientConfig;
use mstrans_http::{HttpResponse, StaticTransport};
use tokio::time::timeout;

use crate::{CallError, CallResult, ClientError, Options, TranslatorClient};

fn test_client(transport: Arc<StaticTransport>) -> TranslatorClient {
    let config = ClientConfig {
        api_base: "http://svc.test/V2/Ajax.svc".to_string(),
        online: true,
    };
    TranslatorClient::new(config, "token-123", transport)
}

/// Completion handlers run on whichever task resolved the call, so they
/// hand their result to the test through a channel.
fn forward_to(tx: &kanal::AsyncSender<CallResult>) -> impl FnOnce(CallResult) + Send + 'static {
    let tx = tx.clone();
    move |result| {
        tokio::spawn(async move {
            tx.send(result).await.expect("send failed");
        });
    }
}

#[tokio::test]
async fn translate_round_trip_reaches_the_handler() {
    let transport = Arc::new(StaticTransport::new());
    // The service prefixes its JSON with a BOM.
    transport.push_ok("\u{feff}\"snel\"");
    let client = test_client(Arc::clone(&transport));
    let (tx, rx) = kanal::unbounded_async::<CallResult>();

    let id = client
        .translate(
            Options::new()
                .set("text", "quick")
                .set("to", "nl")
                .on_result(forward_to(&tx)),
        )
        .expect("dispatch failed");
    assert_eq!(id.value(), 1);

    let result = timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("handler never ran")
        .expect("channel closed");
    assert_eq!(result.expect("call failed"), serde_json::json!("snel"));

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(
        requests[0].url,
        "http://svc.test/V2/Ajax.svc/Translate?appId=Bearer%20token-123\
         &text=quick&to=nl&contentType=text%2Fplain"
    );
    assert_eq!(client.pending_calls(), 0);
}

#[tokio::test]
async fn offline_calls_fail_fast() {
    let transport = Arc::new(StaticTransport::new());
    let client = test_client(Arc::clone(&transport));
    client.set_online(false);

    let err = client
        .translate(Options::new().set("text", "quick").on_result(|_| {}))
        .unwrap_err();

    assert!(matches!(
        err,
        ClientError::Offline {
            operation: "Translate"
        }
    ));
    assert_eq!(transport.request_count(), 0);
    assert_eq!(client.pending_calls(), 0);
}

#[tokio::test]
async fn coming_back_online_restores_dispatch() {
    let transport = Arc::new(StaticTransport::new());
    transport.push_ok("[]");
    let client = test_client(Arc::clone(&transport));
    let (tx, rx) = kanal::unbounded_async::<CallResult>();

    client.set_online(false);
    assert!(client.languages_for_translate(Options::new().on_result(|_| {})).is_err());

    client.set_online(true);
    client
        .languages_for_translate(Options::new().on_result(forward_to(&tx)))
        .expect("dispatch failed");

    let result = timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("handler never ran")
        .expect("channel closed");
    assert_eq!(result.expect("call failed"), serde_json::json!([]));
}

#[tokio::test]
async fn validation_failures_never_dispatch() {
    let transport = Arc::new(StaticTransport::new());
    let client = test_client(Arc::clone(&transport));

    let err = client
        .translate(Options::new().set("to", "nl").on_result(|_| {}))
        .unwrap_err();

    match err {
        ClientError::Validation(err) => {
            assert_eq!(err.operation, "Translate");
            assert_eq!(err.parameter, "text");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn concurrent_calls_get_distinct_slots() {
    let transport = Arc::new(StaticTransport::new());
    transport.push_ok("\"one\"");
    transport.push_ok("\"two\"");
    let client = test_client(Arc::clone(&transport));
    let (tx, rx) = kanal::unbounded_async::<CallResult>();

    let first = client
        .detect(Options::new().set("text", "eins").on_result(forward_to(&tx)))
        .expect("dispatch failed");
    let second = client
        .detect(Options::new().set("text", "zwei").on_result(forward_to(&tx)))
        .expect("dispatch failed");
    assert_ne!(first, second);

    // Responses are canned FIFO while the two tasks race, so only the
    // multiset of payloads is deterministic.
    let mut payloads = Vec::new();
    for _ in 0..2 {
        let result = timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("handler never ran")
            .expect("channel closed");
        payloads.push(result.expect("call failed"));
    }
    payloads.sort_by_key(|value| value.to_string());

    assert_eq!(payloads, vec![serde_json::json!("one"), serde_json::json!("two")]);
    assert_eq!(client.pending_calls(), 0);
    assert_eq!(transport.request_count(), 2);
}

#[tokio::test]
async fn service_errors_reach_the_handler() {
    let transport = Arc::new(StaticTransport::new());
    transport.push_response(HttpResponse {
        status: 500,
        body: "argument exception".to_string(),
    });
    let client = test_client(Arc::clone(&transport));
    let (tx, rx) = kanal::unbounded_async::<CallResult>();

    client
        .detect(Options::new().set("text", "hoi").on_result(forward_to(&tx)))
        .expect("dispatch failed");

    let result = timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("handler never ran")
        .expect("channel closed");

    match result.unwrap_err() {
        CallError::Http { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "argument exception");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn transport_failures_reach_the_handler() {
    let transport = Arc::new(StaticTransport::new());
    transport.push_failure("connection refused");
    let client = test_client(Arc::clone(&transport));
    let (tx, rx) = kanal::unbounded_async::<CallResult>();

    client
        .detect(Options::new().set("text", "hoi").on_result(forward_to(&tx)))
        .expect("dispatch failed");

    let result = timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("handler never ran")
        .expect("channel closed");

    assert!(matches!(result.unwrap_err(), CallError::Transport(_)));
    assert_eq!(client.pending_calls(), 0);
}

#[tokio::test]
async fn undecodable_payloads_surface_as_decode_errors() {
    let transport = Arc::new(StaticTransport::new());
    transport.push_ok("<html>maintenance</html>");
    let client = test_client(Arc::clone(&transport));
    let (tx, rx) = kanal::unbounded_async::<CallResult>();

    client
        .detect(Options::new().set("text", "hoi").on_result(forward_to(&tx)))
        .expect("dispatch failed");

    let result = timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("handler never ran")
        .expect("channel closed");

    assert!(matches!(result.unwrap_err(), CallError::Decode(_)));
}

#[tokio::test]
async fn a_caller_supplied_token_wins_over_the_stored_one() {
    let transport = Arc::new(StaticTransport::new());
    transport.push_ok("\"fr\"");
    let client = test_client(Arc::clone(&transport));
    let (tx, rx) = kanal::unbounded_async::<CallResult>();

    client
        .detect(
            Options::new()
                .set("appId", "caller-token")
                .set("text", "bonjour")
                .on_result(forward_to(&tx)),
        )
        .expect("dispatch failed");

    timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("handler never ran")
        .expect("channel closed")
        .expect("call failed");

    let url = &transport.requests()[0].url;
    assert!(url.contains("appId=Bearer%20caller-token"), "{url}");
    assert!(!url.contains("token-123"), "{url}");
}

#[tokio::test]
async fn declared_but_unsupported_operations_reject() {
    let transport = Arc::new(StaticTransport::new());
    let client = test_client(Arc::clone(&transport));

    let calls: [(&str, Result<_, ClientError>); 4] = [
        ("AddTranslation", client.add_translation(Options::new())),
        ("AddTranslationArray", client.add_translation_array(Options::new())),
        ("GetTranslations", client.get_translations(Options::new())),
        ("GetTranslationsArray", client.get_translations_array(Options::new())),
    ];

    for (name, outcome) in calls {
        match outcome {
            Err(ClientError::NotImplemented { operation }) => assert_eq!(operation, name),
            other => panic!("{name}: unexpected outcome: {other:?}"),
        }
    }
    assert_eq!(transport.request_count(), 0);
    assert_eq!(client.pending_calls(), 0);
}
