#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    routing::get,
    Router,
};
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{oneshot, Notify};
use tower::ServiceExt;

use counter_server::{app_state::AppState, router::build_router, server};

async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, String) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let rsp = app.clone().oneshot(req).await.unwrap();
    let status = rsp.status();
    let bytes = axum::body::to_bytes(rsp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn healthz_and_readyz() {
    let state = AppState::new();
    let app = build_router(state.clone());

    assert_eq!(send(&app, Method::GET, "/healthz").await, (StatusCode::OK, "ok".into()));
    assert_eq!(send(&app, Method::GET, "/readyz").await, (StatusCode::OK, "ready".into()));

    state.set_draining();
    assert_eq!(
        send(&app, Method::GET, "/readyz").await,
        (StatusCode::SERVICE_UNAVAILABLE, "draining".into())
    );
    // Liveness is unaffected by draining.
    assert_eq!(send(&app, Method::GET, "/healthz").await.0, StatusCode::OK);
}

#[tokio::test]
async fn metrics_track_outcomes() {
    let state = AppState::new();
    let app = build_router(state.clone());

    send(&app, Method::POST, "/api/v1/counter").await;
    send(&app, Method::POST, "/api/v1/counter").await;
    send(&app, Method::DELETE, "/api/v1/counter").await;
    send(&app, Method::DELETE, "/api/v1/counter").await;
    send(&app, Method::DELETE, "/api/v1/counter").await;
    send(&app, Method::PUT, "/api/v1/counter").await;

    let m = state.metrics();
    assert_eq!(m.requests.get(&[("method", "POST"), ("outcome", "ok")]), 2);
    assert_eq!(m.requests.get(&[("method", "DELETE"), ("outcome", "ok")]), 2);
    assert_eq!(m.requests.get(&[("method", "DELETE"), ("outcome", "at_minimum")]), 1);
    assert_eq!(m.requests.get(&[("method", "other"), ("outcome", "unsupported")]), 1);
    assert_eq!(m.request_duration.count(&[("method", "DELETE")]), 3);

    let (status, body) = send(&app, Method::GET, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("counter_requests_total{method=\"POST\",outcome=\"ok\"} 2"));
    assert!(body.contains("counter_requests_total{method=\"DELETE\",outcome=\"at_minimum\"} 1"));
    assert!(body.contains("counter_value 0"));
    assert!(body.contains("counter_draining 0"));
}

#[tokio::test]
async fn run_drains_and_returns_on_shutdown() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let state = AppState::new();
    let (tx, rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(server::run(
        listener,
        build_router(state.clone()),
        state.clone(),
        Duration::from_secs(2),
        async move {
            let _ = rx.await;
        },
    ));

    assert!(!state.is_draining());
    tx.send(()).unwrap();

    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("serve loop must stop")
        .unwrap()
        .unwrap();
    assert!(state.is_draining());
}

#[tokio::test]
async fn run_abandons_requests_past_the_grace() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state = AppState::new();

    let entered = Arc::new(Notify::new());
    let slow = {
        let entered = Arc::clone(&entered);
        move || async move {
            entered.notify_one();
            tokio::time::sleep(Duration::from_secs(30)).await;
            "late"
        }
    };
    let app = build_router(state.clone()).route("/slow", get(slow));

    let (tx, rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(server::run(
        listener,
        app,
        state.clone(),
        Duration::from_millis(200),
        async move {
            let _ = rx.await;
        },
    ));

    let mut conn = TcpStream::connect(addr).await.unwrap();
    conn.write_all(b"GET /slow HTTP/1.1\r\nHost: localhost\r\n\r\n")
        .await
        .unwrap();
    tokio::time::timeout(Duration::from_secs(5), entered.notified())
        .await
        .expect("slow handler must start");

    let started = Instant::now();
    tx.send(()).unwrap();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("serve loop must give up after the grace")
        .unwrap()
        .unwrap();
    assert!(started.elapsed() >= Duration::from_millis(200));
    assert!(state.is_draining());
    drop(conn);
}
