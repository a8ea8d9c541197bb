//! Order template endpoints.

use opsdesk_core::runner::WorkflowIdReq;
use opsdesk_core::template::{
    ByKeywordReq, CreateOrUpdateTemplate, CreateTemplateGroup, TemplateCombinations,
    TemplateGroups, TemplateRules, ToggleFavoriteReq,
};
use opsdesk_core::{
    IdReq, IdsReq, PageReq, Template, TemplateCombination, TemplateGroupId, TemplateId, Templates,
};

use crate::config::Service;
use crate::error::ClientError;
use crate::http::HttpClient;

/// Client for the CMDB template endpoints.
#[derive(Clone)]
pub struct TemplateClient {
    http: HttpClient,
}

impl TemplateClient {
    /// Create a template client on a shared HTTP client.
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn create(&self, req: &CreateOrUpdateTemplate) -> Result<i64, ClientError> {
        self.http.post(Service::Cmdb, "/template/create", req).await
    }

    pub async fn update(&self, req: &CreateOrUpdateTemplate) -> Result<i64, ClientError> {
        self.http.post(Service::Cmdb, "/template/update", req).await
    }

    pub async fn detail(&self, id: TemplateId) -> Result<Template, ClientError> {
        self.http
            .post(Service::Cmdb, "/template/detail", &IdReq { id })
            .await
    }

    pub async fn list(&self, page: PageReq) -> Result<Templates, ClientError> {
        self.http.post(Service::Cmdb, "/template/list", &page).await
    }

    pub async fn delete(&self, id: TemplateId) -> Result<i64, ClientError> {
        self.http
            .post(Service::Cmdb, "/template/delete", &IdReq { id })
            .await
    }

    pub async fn create_group(&self, req: &CreateTemplateGroup) -> Result<i64, ClientError> {
        self.http
            .post(Service::Cmdb, "/template/group/create", req)
            .await
    }

    pub async fn list_groups(&self, page: PageReq) -> Result<TemplateGroups, ClientError> {
        self.http
            .post(Service::Cmdb, "/template/group/list", &page)
            .await
    }

    /// Templates grouped by template group.
    pub async fn pipeline(&self) -> Result<TemplateCombinations, ClientError> {
        self.http
            .post_empty(Service::Cmdb, "/template/list/pipeline")
            .await
    }

    pub async fn find_by_ids(&self, ids: Vec<TemplateId>) -> Result<Templates, ClientError> {
        self.http
            .post(Service::Cmdb, "/template/by_ids", &IdsReq { ids })
            .await
    }

    /// All templates attached to a workflow.
    pub async fn by_workflow_id(&self, workflow_id: i64) -> Result<Templates, ClientError> {
        self.http
            .post(
                Service::Cmdb,
                "/template/get_by_workflow_id",
                &WorkflowIdReq { workflow_id },
            )
            .await
    }

    /// Form rules of every template attached to a workflow.
    pub async fn rules_by_workflow_id(&self, workflow_id: i64) -> Result<TemplateRules, ClientError> {
        self.http
            .post(
                Service::Cmdb,
                "/template/rules/by_workflow_id",
                &WorkflowIdReq { workflow_id },
            )
            .await
    }

    pub async fn groups_by_ids(
        &self,
        ids: Vec<TemplateGroupId>,
    ) -> Result<TemplateGroups, ClientError> {
        self.http
            .post(Service::Cmdb, "/template/group/by_ids", &IdsReq { ids })
            .await
    }

    pub async fn search(&self, req: &ByKeywordReq) -> Result<Templates, ClientError> {
        self.http
            .post(Service::Cmdb, "/template/list/by_keyword", req)
            .await
    }

    /// Flip the favorite flag of a template for the current user.
    pub async fn toggle_favorite(&self, template_id: TemplateId) -> Result<bool, ClientError> {
        self.http
            .post(
                Service::Cmdb,
                "/template/favorite/toggle",
                &ToggleFavoriteReq { template_id },
            )
            .await
    }

    /// The current user's favorites; `None` when the user has none.
    pub async fn favorites(&self) -> Result<Option<TemplateCombination>, ClientError> {
        self.http
            .post_empty(Service::Cmdb, "/template/favorite/list")
            .await
    }
}
