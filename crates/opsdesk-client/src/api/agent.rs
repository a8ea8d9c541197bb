//! Queue-mode agent endpoints of the task service.

use opsdesk_core::Agent;

use crate::config::Service;
use crate::error::ClientError;
use crate::http::HttpClient;

/// Client for the task service agent endpoints.
#[derive(Clone)]
pub struct AgentClient {
    http: HttpClient,
}

impl AgentClient {
    /// Create an agent client on a shared HTTP client.
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// List agents and their handlers.
    pub async fn list(&self) -> Result<Vec<Agent>, ClientError> {
        self.http
            .get::<Option<Vec<Agent>>>(Service::Task, "/agent/list")
            .await
            .map(Option::unwrap_or_default)
    }
}
