//! Kafka worker endpoints.

use opsdesk_core::{PageReq, Workers};

use crate::config::Service;
use crate::error::ClientError;
use crate::http::HttpClient;

/// Client for the CMDB worker endpoints.
#[derive(Clone)]
pub struct WorkerClient {
    http: HttpClient,
}

impl WorkerClient {
    /// Create a worker client on a shared HTTP client.
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// List registered workers.
    pub async fn list(&self, page: PageReq) -> Result<Workers, ClientError> {
        self.http.post(Service::Cmdb, "/worker/list", &page).await
    }
}
