//! In-process mock backend for tests.
//!
//! Binds an `axum` router to an ephemeral local port and returns an
//! [`HttpClient`] pointed at it with the default service prefixes.

use axum::{Json, Router};
use serde::Serialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::config::ClientConfig;
use crate::http::HttpClient;

/// Serve `router` on `127.0.0.1` and build a client for it.
pub async fn spawn(router: Router) -> HttpClient {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().expect("mock backend address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });

    let config = ClientConfig {
        base_url: format!("http://{addr}"),
        ..Default::default()
    };
    HttpClient::new(config).expect("mock backend client")
}

/// Successful envelope around `data`.
pub fn ok<T: Serialize>(data: T) -> Json<Value> {
    Json(json!({ "code": 0, "msg": "success", "data": data }))
}

/// Failed envelope with a business error code.
pub fn fail(code: i64, msg: &str) -> Json<Value> {
    Json(json!({ "code": code, "msg": msg, "data": null }))
}
