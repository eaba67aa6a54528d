mod common;

use common::{MockTransport, RecordingBridge, RecordingFrame, Shown};
use consolekit::domain::{EnvelopeCode, PaginationState, Severity, SortKey};
use consolekit::host::MessageKind;
use consolekit::net::{
    ApiClient, Method, RawResponse, RequestOptions, TokenOrigin, TransportFailure, AUTH_HEADER,
    SERVER_UNAVAILABLE,
};
use consolekit::storage::{MemoryTokenStore, TokenStore};
use consolekit::{ConsoleError, DataGridController, Host};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

struct Harness {
    client: ApiClient,
    transport: Arc<MockTransport>,
    bridge: Arc<RecordingBridge>,
}

fn harness(transport: MockTransport) -> Harness {
    let transport = Arc::new(transport);
    let bridge = Arc::new(RecordingBridge::reachable());
    let host = Host::new(bridge.clone(), Arc::new(RecordingFrame::default()));
    let client = ApiClient::builder()
        .transport(transport.clone())
        .host(host)
        .build()
        .unwrap();
    Harness {
        client,
        transport,
        bridge,
    }
}

#[tokio::test]
async fn raw_body_passes_through_unchanged() {
    let body = json!({"results": [{"id": 1}], "next": null});
    let h = harness(MockTransport::json(200, &body.to_string()));

    let value = h.client.get("/raw", None, &[], RequestOptions::default()).await.unwrap();

    assert_eq!(value, body);
    assert!(h.bridge.shown().is_empty());
}

#[tokio::test]
async fn success_envelope_yields_data_without_notice() {
    let h = harness(MockTransport::json(200, r#"{"code":0,"data":{"x":1}}"#));

    let value = h
        .client
        .post("/users", Some(json!({"name": "ann"})), &[], RequestOptions::default())
        .await
        .unwrap();

    assert_eq!(value, json!({"x": 1}));
    assert!(h.bridge.shown().is_empty());

    let sent = h.transport.requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, Method::Post);
    assert_eq!(sent[0].body, Some(json!({"name": "ann"})));
}

#[tokio::test]
async fn error_level_shows_exactly_one_blocking_alert() {
    let h = harness(MockTransport::json(200, r#"{"code":42,"msg":"bad","level":"e"}"#));

    let err = h.client.delete("/users/1", None, &[], RequestOptions::default()).await.unwrap_err();

    match &err {
        ConsoleError::Business { code, message, severity } => {
            assert_eq!(*code, EnvelopeCode::Numeric(42));
            assert_eq!(message, "bad");
            assert_eq!(*severity, Severity::Error);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(err.is_notified());
    assert_eq!(
        h.bridge.shown(),
        vec![Shown::Alert {
            title: "Error: 42".to_string(),
            message: "bad".to_string()
        }]
    );
}

#[tokio::test]
async fn warning_level_shows_one_warning_toast() {
    let h = harness(MockTransport::json(200, r#"{"code":7,"msg":"stale","level":"w"}"#));

    let err = h.client.put("/users/1", Some(json!({})), &[], RequestOptions::default()).await.unwrap_err();

    assert!(matches!(err, ConsoleError::Business { severity: Severity::Warning, .. }));
    assert_eq!(h.bridge.shown(), vec![Shown::Toast(MessageKind::Warning, "stale".to_string())]);
}

#[tokio::test]
async fn transport_failure_shows_server_unavailable() {
    let h = harness(MockTransport::replying(vec![Err(TransportFailure(
        "connection refused".to_string(),
    ))]));

    let err = h.client.get("/users", None, &[], RequestOptions::default()).await.unwrap_err();

    assert!(matches!(err, ConsoleError::Transport(_)));
    assert_eq!(
        h.bridge.shown(),
        vec![Shown::Alert {
            title: "Error".to_string(),
            message: SERVER_UNAVAILABLE.to_string()
        }]
    );
}

#[tokio::test]
async fn gateway_error_page_is_a_transport_failure() {
    let h = harness(MockTransport::replying(vec![Ok(RawResponse::new(504, "Gateway Timeout"))]));

    let err = h.client.get("/users", None, &[], RequestOptions::default()).await.unwrap_err();

    assert!(matches!(err, ConsoleError::Transport(_)));
    assert_eq!(h.bridge.shown().len(), 1);
}

#[tokio::test]
async fn header_origin_attaches_bearer_token() {
    let transport = Arc::new(MockTransport::json(200, "{}"));
    let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::with_token("abc"));
    let client = ApiClient::builder()
        .transport(transport.clone())
        .host(Host::detached(Arc::new(RecordingFrame::default())))
        .token_origin(TokenOrigin::Header)
        .token_store(store)
        .build()
        .unwrap();

    let options = RequestOptions::default()
        .with_header("X-Trace", "1")
        .with_timeout(Duration::from_secs(2));
    client.get("/me", None, &[], options).await.unwrap();

    let sent = &transport.requests()[0];
    assert_eq!(sent.header(AUTH_HEADER), Some("Bearer abc"));
    assert_eq!(sent.header("X-Trace"), Some("1"));
    assert_eq!(sent.timeout, Some(Duration::from_secs(2)));
}

#[tokio::test]
async fn cookie_origin_sends_no_auth_header() {
    let h = harness(MockTransport::json(200, "{}"));

    h.client.get("/me", None, &[], RequestOptions::default()).await.unwrap();

    assert_eq!(h.transport.requests()[0].header(AUTH_HEADER), None);
}

#[tokio::test]
async fn header_origin_without_saved_token_still_sends() {
    let transport = Arc::new(MockTransport::json(200, "{}"));
    let client = ApiClient::builder()
        .transport(transport.clone())
        .host(Host::detached(Arc::new(RecordingFrame::default())))
        .token_origin(TokenOrigin::Header)
        .token_store(Arc::new(MemoryTokenStore::new()))
        .build()
        .unwrap();

    client.get("/me", None, &[], RequestOptions::default()).await.unwrap();

    assert_eq!(transport.requests()[0].header(AUTH_HEADER), None);
}

#[test]
fn builder_fails_fast_without_collaborators() {
    let frame = Arc::new(RecordingFrame::default());

    let no_host = ApiClient::builder().transport(Arc::new(MockTransport::default())).build();
    assert!(matches!(no_host, Err(ConsoleError::Config(_))));

    let no_transport = ApiClient::builder().host(Host::detached(frame.clone())).build();
    assert!(matches!(no_transport, Err(ConsoleError::Config(_))));

    let no_store = ApiClient::builder()
        .transport(Arc::new(MockTransport::default()))
        .host(Host::detached(frame))
        .token_origin(TokenOrigin::Header)
        .build();
    assert!(matches!(no_store, Err(ConsoleError::Config(_))));
}

#[tokio::test]
async fn cancelled_request_is_not_notified() {
    let h = harness(MockTransport::slow(Duration::from_secs(5)));
    let (options, cancel) = RequestOptions::default().cancellable();

    let pending = h.client.get("/slow", None, &[], options);
    cancel.cancel();
    let err = pending.await.unwrap_err();

    assert!(matches!(err, ConsoleError::Cancelled));
    assert!(!err.is_notified());
    assert!(cancel.is_cancelled());
    assert!(h.bridge.shown().is_empty());
}

#[tokio::test]
async fn grid_query_round_trips_through_paginated_endpoint() {
    let page = json!({
        "code": 0,
        "data": {
            "current_page": 2,
            "page_size": 15,
            "total_count": 47,
            "items": [{"id": 16, "name": "p"}]
        }
    });
    let h = harness(MockTransport::json(200, &page.to_string()));

    let mut grid = DataGridController::new(
        consolekit::domain::ColumnSet::new(vec![consolekit::domain::ColumnDescriptor::text(
            "name", "Name",
        )])
        .unwrap(),
        Some(PaginationState {
            current_page: 1,
            page_size: 15,
            total_count: 0,
        }),
        serde_json::Map::new(),
    );
    grid.set_sort(vec![SortKey::desc("id")]).unwrap();
    grid.set_page(2).unwrap();

    let fetched = h.client.fetch_page("/products", &grid.query()).await.unwrap();
    grid.apply_page(&fetched).unwrap();

    let sent = &h.transport.requests()[0];
    assert!(sent.query.contains(&("page".to_string(), "2".to_string())));
    assert!(sent.query.contains(&("sort".to_string(), r#"["-id"]"#.to_string())));
    assert_eq!(grid.pagination().total_count, 47);
    assert_eq!(grid.pagination().total_pages(), 4);
    assert_eq!(fetched.items, vec![json!({"id": 16, "name": "p"})]);
}
