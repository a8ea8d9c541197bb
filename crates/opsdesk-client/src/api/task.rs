//! Automation task endpoints.

use opsdesk_core::task::{ListByInstanceReq, StartTaskReq, UpdateArgsReq, UpdateVariablesReq};
use opsdesk_core::{IdReq, PageReq, TaskId, Tasks};

use crate::config::Service;
use crate::error::ClientError;
use crate::http::HttpClient;

/// Client for the CMDB task endpoints.
#[derive(Clone)]
pub struct TaskClient {
    http: HttpClient,
}

impl TaskClient {
    /// Create a task client on a shared HTTP client.
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Start an order task.
    pub async fn start(&self, req: &StartTaskReq) -> Result<i64, ClientError> {
        self.http.post(Service::Cmdb, "/task/start", req).await
    }

    /// List tasks.
    pub async fn list(&self, page: PageReq) -> Result<Tasks, ClientError> {
        self.http.post(Service::Cmdb, "/task/list", &page).await
    }

    /// Tasks spawned by one workflow instance.
    pub async fn list_by_instance_id(&self, req: ListByInstanceReq) -> Result<Tasks, ClientError> {
        self.http
            .post(Service::Cmdb, "/task/list/by_instance_id", &req)
            .await
    }

    /// Replace a task's arguments.
    pub async fn update_args(&self, req: &UpdateArgsReq) -> Result<i64, ClientError> {
        self.http.post(Service::Cmdb, "/task/update/args", req).await
    }

    /// Replace a task's variables.
    pub async fn update_variables(&self, req: &UpdateVariablesReq) -> Result<i64, ClientError> {
        self.http
            .post(Service::Cmdb, "/task/update/variables", req)
            .await
    }

    /// Retry a task.
    pub async fn retry(&self, id: TaskId) -> Result<i64, ClientError> {
        self.http
            .post(Service::Cmdb, "/task/retry", &IdReq { id })
            .await
    }

    /// Execution log of a task.
    pub async fn logs(&self, id: TaskId) -> Result<String, ClientError> {
        self.http
            .get(Service::Cmdb, &format!("/task/logs/{id}"))
            .await
    }
}
