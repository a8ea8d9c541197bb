//! Task history view with page-number pagination.

use std::sync::Arc;

use tokio::sync::RwLock;

use opsdesk_client::TaskClient;
use opsdesk_core::{CoreError, PageReq, Task};

use crate::list::{FetchMode, ListHandle};
use crate::notify::Notifier;
use crate::status::LoadState;

/// Page sizes offered by list views.
pub const PAGE_SIZES: [u64; 4] = [10, 20, 50, 100];

/// Page-number pagination.
///
/// Page and size are only set together through [`Pagination::new`] or the
/// setters, which keep the page offset representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current_page: u64,
    page_size: u64,
    /// Backend total of the last fetch.
    pub total: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_size: PAGE_SIZES[0],
            total: 0,
        }
    }
}

impl Pagination {
    /// Pagination at 1-based `page` with `size` items per page.
    pub fn new(page: u64, size: u64) -> Result<Self, CoreError> {
        if page == 0 {
            return Err(CoreError::InvalidInput("page numbers start at 1".to_string()));
        }
        if size == 0 {
            return Err(CoreError::InvalidInput("page size must be positive".to_string()));
        }
        if (page - 1).checked_mul(size).is_none() {
            return Err(CoreError::InvalidInput(format!(
                "page {page} of size {size} is out of range"
            )));
        }
        Ok(Self {
            current_page: page,
            page_size: size,
            total: 0,
        })
    }

    /// 1-based page number.
    pub fn current_page(&self) -> u64 {
        self.current_page
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn set_current_page(&mut self, page: u64) -> Result<(), CoreError> {
        *self = Self {
            total: self.total,
            ..Self::new(page, self.page_size)?
        };
        Ok(())
    }

    pub fn set_page_size(&mut self, size: u64) -> Result<(), CoreError> {
        *self = Self {
            total: self.total,
            ..Self::new(self.current_page, size)?
        };
        Ok(())
    }

    /// Offset/limit request for the current page.
    pub fn page_req(&self) -> PageReq {
        PageReq::new((self.current_page - 1) * self.page_size, self.page_size)
    }

    /// Number of pages for the current total.
    pub fn page_count(&self) -> u64 {
        self.total.div_ceil(self.page_size)
    }
}

/// Paged history of automation tasks.
///
/// Every change of page, page size or search query triggers a fetch.
#[derive(Clone)]
pub struct TaskHistory {
    client: TaskClient,
    notifier: Arc<dyn Notifier>,
    tasks: ListHandle<Task>,
    pagination: Arc<RwLock<Pagination>>,
    search_query: Arc<RwLock<String>>,
}

impl TaskHistory {
    pub fn new(client: TaskClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            client,
            notifier,
            tasks: ListHandle::new(),
            pagination: Arc::new(RwLock::new(Pagination::default())),
            search_query: Arc::new(RwLock::new(String::new())),
        }
    }

    pub fn tasks(&self) -> &ListHandle<Task> {
        &self.tasks
    }

    /// Current pagination, with the total of the last fetch.
    pub async fn pagination(&self) -> Pagination {
        let mut pagination = *self.pagination.read().await;
        pagination.total = self.tasks.total().await;
        pagination
    }

    pub async fn search_query(&self) -> String {
        self.search_query.read().await.clone()
    }

    /// Fetch the current page.
    pub async fn fetch(&self) -> LoadState {
        // TODO: send the search query once /task/list accepts a keyword.
        let page = self.pagination.read().await.page_req();
        self.tasks
            .load(
                FetchMode::Replace,
                "Loading task history",
                self.notifier.as_ref(),
                self.client.list(page),
            )
            .await
    }

    pub async fn set_current_page(&self, page: u64) -> Result<LoadState, CoreError> {
        self.pagination.write().await.set_current_page(page)?;
        Ok(self.fetch().await)
    }

    pub async fn set_page_size(&self, size: u64) -> Result<LoadState, CoreError> {
        self.pagination.write().await.set_page_size(size)?;
        Ok(self.fetch().await)
    }

    /// Jump to `page` at `size` items per page with a single fetch.
    pub async fn go_to(&self, page: u64, size: u64) -> Result<LoadState, CoreError> {
        let next = Pagination::new(page, size)?;
        *self.pagination.write().await = next;
        Ok(self.fetch().await)
    }

    pub async fn set_search_query(&self, query: impl Into<String>) -> LoadState {
        *self.search_query.write().await = query.into();
        self.fetch().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::LogNotifier;
    use axum::routing::post;
    use axum::{Json, Router};
    use opsdesk_client::testing::{self, ok};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_pagination_math() {
        let mut p = Pagination::default();
        p.set_page_size(20).unwrap();
        p.set_current_page(3).unwrap();
        p.total = 41;
        assert_eq!(p.page_req(), PageReq::new(40, 20));
        assert_eq!(p.page_count(), 3);
        assert!(p.set_current_page(0).is_err());
        assert!(p.set_page_size(0).is_err());
        assert_eq!((p.current_page(), p.page_size()), (3, 20));
    }

    #[test]
    fn test_out_of_range_page_is_rejected() {
        let mut p = Pagination::default();
        p.set_page_size(100).unwrap();
        assert!(p.set_current_page(u64::MAX / 10).is_err());
        assert_eq!(p.current_page(), 1);

        p.set_current_page(u64::MAX / 100).unwrap();
        assert!(p.set_page_size(200).is_err());
        assert_eq!(p.page_size(), 100);
        assert!(Pagination::new(u64::MAX, 2).is_err());
    }

    #[tokio::test]
    async fn test_page_change_fetches_offset() {
        let router = Router::new().route(
            "/api/cmdb/task/list",
            post(|Json(body): Json<Value>| async move {
                let offset = body["offset"].as_u64().unwrap_or(0);
                let tasks: Vec<Value> = (offset..offset + 2)
                    .map(|i| json!({"id": i, "status": 1, "kind": "EXECUTE"}))
                    .collect();
                ok(json!({"tasks": tasks, "total": 42}))
            }),
        );
        let history = TaskHistory::new(
            TaskClient::new(testing::spawn(router).await),
            Arc::new(LogNotifier),
        );

        assert_eq!(history.fetch().await, LoadState::Loaded);
        assert_eq!(history.set_page_size(10).await.unwrap(), LoadState::Loaded);
        assert_eq!(history.set_current_page(3).await.unwrap(), LoadState::Loaded);

        let tasks = history.tasks().items().await;
        assert_eq!(tasks[0].id.get(), 20);
        let pagination = history.pagination().await;
        assert_eq!(pagination.total, 42);
        assert_eq!(pagination.page_count(), 5);
    }

    fn counted_tasks(calls: Arc<AtomicUsize>) -> Router {
        Router::new().route(
            "/api/cmdb/task/list",
            post(move || {
                let calls = calls.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    ok(json!({"tasks": [{"id": 1, "kind": "KAFKA"}], "total": 1}))
                }
            }),
        )
    }

    #[tokio::test]
    async fn test_rejected_jump_keeps_pagination() {
        let calls = Arc::new(AtomicUsize::new(0));
        let history = TaskHistory::new(
            TaskClient::new(testing::spawn(counted_tasks(calls.clone())).await),
            Arc::new(LogNotifier),
        );

        assert!(history.go_to(0, 50).await.is_err());
        let pagination = history.pagination().await;
        assert_eq!(pagination.current_page(), 1);
        assert_eq!(pagination.page_size(), 10);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert_eq!(history.go_to(2, 50).await.unwrap(), LoadState::Loaded);
        assert_eq!(history.pagination().await.page_req(), PageReq::new(50, 50));
    }

    #[tokio::test]
    async fn test_search_query_change_refetches() {
        let calls = Arc::new(AtomicUsize::new(0));
        let history = TaskHistory::new(
            TaskClient::new(testing::spawn(counted_tasks(calls.clone())).await),
            Arc::new(LogNotifier),
        );

        assert_eq!(history.set_search_query("deploy").await, LoadState::Loaded);
        assert_eq!(history.search_query().await, "deploy");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(history.tasks().items().await.len(), 1);

        history.set_search_query("").await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
