//! HTTP client for the OpsDesk REST endpoints.
//!
//! Every endpoint answers with an envelope `{"code", "msg", "data"}`; a
//! non-zero `code` is a business error. A successful response may carry a
//! refreshed access token in the `x-access-token` header, which replaces the
//! stored token and is sent as a bearer token from then on.

use std::sync::{Arc, RwLock};

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{ClientConfig, Service};
use crate::error::ClientError;

/// Response header carrying a refreshed access token.
pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    msg: String,
    #[serde(default)]
    data: serde_json::Value,
}

/// HTTP client shared by all API modules.
///
/// Cloning is cheap; clones share the connection pool, cookie jar and token.
#[derive(Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    config: Arc<ClientConfig>,
    token: Arc<RwLock<Option<String>>>,
}

impl HttpClient {
    /// Create a new HTTP client.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;
        let inner = reqwest::Client::builder()
            .timeout(config.timeout())
            .cookie_store(true)
            .build()?;
        Ok(Self {
            inner,
            config: Arc::new(config),
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// Configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Current access token, if any.
    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    /// Replace the access token.
    pub fn set_token(&self, token: impl Into<String>) {
        match self.token.write() {
            Ok(mut slot) => *slot = Some(token.into()),
            Err(_) => warn!("Token store poisoned, dropping refreshed token"),
        }
    }

    /// POST a JSON body and decode the envelope's data.
    pub async fn post<B, T>(&self, service: Service, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.config.url(service, path);
        debug!(url = %url, "POST request");
        self.send(self.inner.post(&url).json(body), path).await
    }

    /// POST without a body.
    pub async fn post_empty<T: DeserializeOwned>(
        &self,
        service: Service,
        path: &str,
    ) -> Result<T, ClientError> {
        let url = self.config.url(service, path);
        debug!(url = %url, "POST request");
        self.send(self.inner.post(&url), path).await
    }

    /// GET and decode the envelope's data.
    pub async fn get<T: DeserializeOwned>(
        &self,
        service: Service,
        path: &str,
    ) -> Result<T, ClientError> {
        let url = self.config.url(service, path);
        debug!(url = %url, "GET request");
        self.send(self.inner.get(&url), path).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        path: &str,
    ) -> Result<T, ClientError> {
        let request = match self.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        if let Some(token) = response
            .headers()
            .get(ACCESS_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
        {
            debug!(path = %path, "Access token refreshed");
            self.set_token(token);
        }

        let envelope: Envelope = response
            .json()
            .await
            .map_err(|e| ClientError::Serialization(e.to_string()))?;

        if envelope.code != 0 {
            return Err(ClientError::Api {
                code: envelope.code,
                msg: envelope.msg,
            });
        }

        if envelope.data.is_null() {
            // Option<T> and () accept null; everything else is missing data.
            return serde_json::from_value(serde_json::Value::Null)
                .map_err(|_| ClientError::MissingData(path.to_string()));
        }

        serde_json::from_value(envelope.data).map_err(|e| ClientError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{self, fail, ok};
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_decodes_envelope_data() {
        let router = Router::new().route(
            "/api/cmdb/echo",
            post(|Json(body): Json<Value>| async move { ok(body["n"].clone()) }),
        );
        let http = testing::spawn(router).await;

        let n: i64 = http
            .post(Service::Cmdb, "/echo", &json!({"n": 7}))
            .await
            .unwrap();
        assert_eq!(n, 7);
    }

    #[tokio::test]
    async fn test_business_error_code() {
        let router = Router::new().route("/api/cmdb/boom", post(|| async { fail(5001, "denied") }));
        let http = testing::spawn(router).await;

        let err = http
            .post_empty::<i64>(Service::Cmdb, "/boom")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Api { code: 5001, ref msg } if msg == "denied"));
    }

    #[tokio::test]
    async fn test_http_status_error() {
        let router = Router::new().route(
            "/api/task/executor/list",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let http = testing::spawn(router).await;

        let err = http
            .get::<Vec<Value>>(Service::Task, "/executor/list")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_null_data() {
        let router = Router::new().route("/api/cmdb/empty", post(|| async { ok(Value::Null) }));
        let http = testing::spawn(router).await;

        let maybe: Option<i64> = http.post_empty(Service::Cmdb, "/empty").await.unwrap();
        assert!(maybe.is_none());

        let err = http
            .post_empty::<i64>(Service::Cmdb, "/empty")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::MissingData(_)));
    }

    #[tokio::test]
    async fn test_access_token_is_captured_and_sent() {
        let router = Router::new()
            .route(
                "/api/cmdb/login",
                post(|| async { ([(ACCESS_TOKEN_HEADER, "tok-1")], ok(1)) }),
            )
            .route(
                "/api/cmdb/whoami",
                post(|headers: HeaderMap| async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    ok(auth)
                }),
            );
        let http = testing::spawn(router).await;
        assert!(http.token().is_none());

        let _: i64 = http.post_empty(Service::Cmdb, "/login").await.unwrap();
        assert_eq!(http.token().as_deref(), Some("tok-1"));

        let auth: String = http.post_empty(Service::Cmdb, "/whoami").await.unwrap();
        assert_eq!(auth, "Bearer tok-1");
    }
}
