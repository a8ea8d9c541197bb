//! Codebook endpoints.

use opsdesk_core::{Codebooks, PageReq};

use crate::config::Service;
use crate::error::ClientError;
use crate::http::HttpClient;

/// Client for the CMDB codebook endpoints.
#[derive(Clone)]
pub struct CodebookClient {
    http: HttpClient,
}

impl CodebookClient {
    /// Create a codebook client on a shared HTTP client.
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// List codebooks.
    pub async fn list(&self, page: PageReq) -> Result<Codebooks, ClientError> {
        self.http.post(Service::Cmdb, "/codebook/list", &page).await
    }
}
