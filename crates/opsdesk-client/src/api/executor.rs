//! Executor endpoints of the task service.

use opsdesk_core::Executor;

use crate::config::Service;
use crate::error::ClientError;
use crate::http::HttpClient;

/// Client for the task service executor endpoints.
#[derive(Clone)]
pub struct ExecutorClient {
    http: HttpClient,
}

impl ExecutorClient {
    /// Create an executor client on a shared HTTP client.
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// List executors with their handlers and serving nodes.
    pub async fn list(&self) -> Result<Vec<Executor>, ClientError> {
        self.http
            .get::<Option<Vec<Executor>>>(Service::Task, "/executor/list")
            .await
            .map(Option::unwrap_or_default)
    }
}
