//! Shared utilities for integration tests.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::IntoResponse,
    Router,
};
use tokio::net::TcpListener;
use web_tunnel::config::Secret;
use web_tunnel::{Shutdown, TunnelConfig, TunnelServer};

/// What the mock upstream received.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub uri: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

pub type Recorded = Arc<Mutex<Vec<RecordedRequest>>>;

/// Start a programmable upstream that records every request it receives.
pub async fn start_upstream<F, Fut>(f: F) -> (SocketAddr, Recorded)
where
    F: Fn() -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = (u16, &'static str)> + Send + 'static,
{
    let recorded: Recorded = Arc::new(Mutex::new(Vec::new()));
    let log = recorded.clone();

    let app = Router::new().fallback(
        move |method: Method, uri: Uri, headers: HeaderMap, body: Bytes| {
            let f = f.clone();
            let log = log.clone();
            async move {
                log.lock().unwrap().push(RecordedRequest {
                    method,
                    uri: uri.to_string(),
                    headers,
                    body,
                });
                let (status, body) = f().await;
                (StatusCode::from_u16(status).unwrap(), body).into_response()
            }
        },
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (addr, recorded)
}

/// Upstream that always answers with `status` and `body`.
#[allow(dead_code)]
pub async fn start_fixed_upstream(status: u16, body: &'static str) -> (SocketAddr, Recorded) {
    start_upstream(move || async move { (status, body) }).await
}

/// Config for tests: given secret, no system proxy.
pub fn tunnel_config(secret: &str) -> TunnelConfig {
    let mut config = TunnelConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.tunnel.shared_secret = Secret::new(secret);
    config.upstream.use_system_proxy = false;
    config
}

/// Start a tunnel on an ephemeral port.
pub async fn start_tunnel(config: TunnelConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = TunnelServer::new(config).unwrap();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// HTTP client that never goes through a proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// POST a forward directive with an optional secret header.
pub async fn forward(
    tunnel: SocketAddr,
    secret: Option<&str>,
    body: impl Into<reqwest::Body>,
) -> reqwest::Response {
    let mut request = client()
        .post(format!("http://{}/tunnel/forward", tunnel))
        .header("content-type", "application/json")
        .body(body);
    if let Some(secret) = secret {
        request = request.header("x-tunnel-secret", secret);
    }
    request.send().await.expect("tunnel unreachable")
}
