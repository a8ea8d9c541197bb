//! User directory endpoints, including LDAP import.

use opsdesk_core::user::{
    BindRoleCodesReq, CreateOrUpdateUser, LdapUsers, UserDepartmentCombination,
    UserDepartmentReq, UserKeywordReq, UsernameReq, UsernamesReq,
};
use opsdesk_core::{IdReq, IdsReq, PageReq, User, UserId, Users};

use crate::config::Service;
use crate::error::ClientError;
use crate::http::HttpClient;

/// Client for the CMDB user endpoints.
#[derive(Clone)]
pub struct UserClient {
    http: HttpClient,
}

impl UserClient {
    /// Create a user client on a shared HTTP client.
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self, page: PageReq) -> Result<Users, ClientError> {
        self.http.post(Service::Cmdb, "/user/list", &page).await
    }

    /// Fuzzy match on username or display name.
    pub async fn list_by_keyword(&self, req: &UserKeywordReq) -> Result<Users, ClientError> {
        self.http
            .post(Service::Cmdb, "/user/find/by_keyword", req)
            .await
    }

    pub async fn list_by_department(&self, req: &UserDepartmentReq) -> Result<Users, ClientError> {
        self.http
            .post(Service::Cmdb, "/user/find/department_id", req)
            .await
    }

    pub async fn bind_role_codes(&self, req: &BindRoleCodesReq) -> Result<i64, ClientError> {
        self.http.post(Service::Cmdb, "/user/role/bind", req).await
    }

    /// The signed-in user.
    pub async fn info(&self) -> Result<User, ClientError> {
        self.http.post_empty(Service::Cmdb, "/user/info").await
    }

    pub async fn create(&self, req: &CreateOrUpdateUser) -> Result<i64, ClientError> {
        self.http.post(Service::Cmdb, "/user/create", req).await
    }

    pub async fn update(&self, req: &CreateOrUpdateUser) -> Result<Vec<User>, ClientError> {
        self.http.post(Service::Cmdb, "/user/update", req).await
    }

    /// Users grouped by department.
    pub async fn pipeline_by_department(
        &self,
    ) -> Result<Vec<UserDepartmentCombination>, ClientError> {
        self.http
            .post_empty::<Option<Vec<UserDepartmentCombination>>>(
                Service::Cmdb,
                "/user/pipeline/department_id",
            )
            .await
            .map(Option::unwrap_or_default)
    }

    pub async fn find_by_usernames(&self, usernames: Vec<String>) -> Result<Users, ClientError> {
        self.http
            .post(
                Service::Cmdb,
                "/user/find/usernames",
                &UsernamesReq { usernames },
            )
            .await
    }

    pub async fn find_by_ids(&self, ids: Vec<UserId>) -> Result<Users, ClientError> {
        self.http
            .post(Service::Cmdb, "/user/find/by_ids", &IdsReq { ids })
            .await
    }

    pub async fn find_by_username(&self, username: &str) -> Result<User, ClientError> {
        self.http
            .post(
                Service::Cmdb,
                "/user/find/username",
                &UsernameReq {
                    username: username.to_string(),
                },
            )
            .await
    }

    pub async fn find_by_id(&self, id: UserId) -> Result<User, ClientError> {
        self.http
            .post(Service::Cmdb, "/user/find/id", &IdReq { id })
            .await
    }

    /// Search the LDAP directory.
    pub async fn search_ldap(&self, req: &UserKeywordReq) -> Result<LdapUsers, ClientError> {
        self.http
            .post(Service::Cmdb, "/user/ldap/search", req)
            .await
    }

    /// Rebuild the backend's LDAP cache.
    pub async fn refresh_ldap_cache(&self) -> Result<String, ClientError> {
        self.http
            .post_empty(Service::Cmdb, "/user/ldap/refresh_cache")
            .await
    }

    /// Register a local (non-LDAP) system user.
    pub async fn register_system_user(&self, req: &CreateOrUpdateUser) -> Result<i64, ClientError> {
        self.http.post(Service::Cmdb, "/user/register", req).await
    }

    /// Import an LDAP entry as a platform user.
    pub async fn sync_ldap_user(&self, req: &CreateOrUpdateUser) -> Result<i64, ClientError> {
        self.http.post(Service::Cmdb, "/user/ldap/sync", req).await
    }
}
