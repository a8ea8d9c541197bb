//! Runner endpoints.

use opsdesk_core::runner::{ListByCodebookReq, RegisterOrUpdateRunner, RunnerTagsResp, WorkflowIdReq};
use opsdesk_core::{IdReq, IdsReq, PageReq, RunnerId, Runners};

use crate::config::Service;
use crate::error::ClientError;
use crate::http::HttpClient;

/// Client for the CMDB runner endpoints.
#[derive(Clone)]
pub struct RunnerClient {
    http: HttpClient,
}

impl RunnerClient {
    /// Create a runner client on a shared HTTP client.
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// List runners.
    pub async fn list(&self, page: PageReq) -> Result<Runners, ClientError> {
        self.http.post(Service::Cmdb, "/runner/list", &page).await
    }

    /// Tag-to-topic mapping of every codebook's runners.
    pub async fn list_tags(&self) -> Result<RunnerTagsResp, ClientError> {
        self.http.post_empty(Service::Cmdb, "/runner/list/tags").await
    }

    /// Register a new runner, returning its id.
    pub async fn register(&self, req: &RegisterOrUpdateRunner) -> Result<i64, ClientError> {
        self.http.post(Service::Cmdb, "/runner/register", req).await
    }

    /// Delete a runner.
    pub async fn delete(&self, id: RunnerId) -> Result<i64, ClientError> {
        self.http
            .post(Service::Cmdb, "/runner/delete", &IdReq { id })
            .await
    }

    /// Update an existing runner.
    pub async fn update(&self, req: &RegisterOrUpdateRunner) -> Result<i64, ClientError> {
        self.http.post(Service::Cmdb, "/runner/update", req).await
    }

    /// Runners with the given ids.
    pub async fn list_by_ids(&self, ids: Vec<RunnerId>) -> Result<Runners, ClientError> {
        self.http
            .post(Service::Cmdb, "/runner/list/by_ids", &IdsReq { ids })
            .await
    }

    /// Runners referenced by a workflow.
    pub async fn list_by_workflow_id(&self, workflow_id: i64) -> Result<Runners, ClientError> {
        self.http
            .post(
                Service::Cmdb,
                "/runner/list/by_workflow_id",
                &WorkflowIdReq { workflow_id },
            )
            .await
    }

    /// Runners bound to a codebook.
    pub async fn list_by_codebook_uid(
        &self,
        req: &ListByCodebookReq,
    ) -> Result<Runners, ClientError> {
        self.http
            .post(Service::Cmdb, "/runner/list/by_codebook_uid", req)
            .await
    }

    /// Runners not bound to a codebook (candidates for forking).
    pub async fn list_excluding_codebook_uid(
        &self,
        req: &ListByCodebookReq,
    ) -> Result<Runners, ClientError> {
        self.http
            .post(Service::Cmdb, "/runner/list/exclude_codebook_uid", req)
            .await
    }
}
