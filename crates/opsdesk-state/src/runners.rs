//! Runner lists of the codebook view.

use std::sync::Arc;

use tracing::{debug, info, warn};

use opsdesk_client::RunnerClient;
use opsdesk_core::runner::ListByCodebookReq;
use opsdesk_core::{CodebookUid, Kind, PageReq, Runner, RunnerId};

use crate::list::{FetchMode, ListHandle};
use crate::notify::{Notice, Notifier};
use crate::status::LoadState;

/// Page size of the unscoped runner list.
pub const ALL_RUNNERS_LIMIT: u64 = 1000;

/// Default page size of the codebook-scoped lists.
pub const DEFAULT_RUNNER_PAGE: u64 = 20;

/// Query for a codebook-scoped runner list.
#[derive(Debug, Clone, PartialEq)]
pub struct RunnerQuery {
    pub codebook_uid: CodebookUid,
    pub offset: u64,
    pub limit: u64,
    pub keyword: Option<String>,
    pub kind: Option<Kind>,
    pub mode: FetchMode,
}

impl RunnerQuery {
    /// First page of a codebook's runners.
    pub fn new(codebook_uid: impl Into<CodebookUid>) -> Self {
        Self {
            codebook_uid: codebook_uid.into(),
            offset: 0,
            limit: DEFAULT_RUNNER_PAGE,
            keyword: None,
            kind: None,
            mode: FetchMode::Replace,
        }
    }

    pub fn with_page(mut self, offset: u64, limit: u64) -> Self {
        self.offset = offset;
        self.limit = limit;
        self
    }

    /// Filter by keyword; blank keywords are not sent.
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        let keyword = keyword.into();
        self.keyword = (!keyword.trim().is_empty()).then_some(keyword);
        self
    }

    pub fn with_kind(mut self, kind: Kind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Append the page to the list instead of replacing it.
    pub fn appending(mut self) -> Self {
        self.mode = FetchMode::Append;
        self
    }

    fn to_request(&self) -> ListByCodebookReq {
        ListByCodebookReq {
            page: PageReq::new(self.offset, self.limit),
            codebook_uid: self.codebook_uid.clone(),
            keyword: self.keyword.clone(),
            kind: self.kind,
        }
    }
}

/// Which codebook-scoped list a query fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Runners bound to the codebook.
    Codebook,
    /// Runners outside the codebook.
    Forkable,
}

/// Runner lists for one codebook view: all runners, the codebook's own
/// runners, and the runners it could fork.
#[derive(Clone)]
pub struct RunnerBoard {
    client: RunnerClient,
    notifier: Arc<dyn Notifier>,
    all: ListHandle<Runner>,
    codebook: ListHandle<Runner>,
    forkable: ListHandle<Runner>,
}

impl RunnerBoard {
    pub fn new(client: RunnerClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            client,
            notifier,
            all: ListHandle::new(),
            codebook: ListHandle::new(),
            forkable: ListHandle::new(),
        }
    }

    /// Every runner, regardless of codebook.
    pub fn all(&self) -> &ListHandle<Runner> {
        &self.all
    }

    /// Runners bound to the current codebook.
    pub fn codebook(&self) -> &ListHandle<Runner> {
        &self.codebook
    }

    /// Runners outside the current codebook.
    pub fn forkable(&self) -> &ListHandle<Runner> {
        &self.forkable
    }

    /// The list `scope` fills.
    pub fn scoped(&self, scope: Scope) -> &ListHandle<Runner> {
        match scope {
            Scope::Codebook => &self.codebook,
            Scope::Forkable => &self.forkable,
        }
    }

    pub async fn fetch_runners(&self) -> LoadState {
        self.all
            .load(
                FetchMode::Replace,
                "Loading runners",
                self.notifier.as_ref(),
                self.client.list(PageReq::new(0, ALL_RUNNERS_LIMIT)),
            )
            .await
    }

    pub async fn fetch_codebook_runners(&self, query: &RunnerQuery) -> LoadState {
        let req = query.to_request();
        self.codebook
            .load(
                query.mode,
                "Loading codebook runners",
                self.notifier.as_ref(),
                self.client.list_by_codebook_uid(&req),
            )
            .await
    }

    pub async fn fetch_forkable_runners(&self, query: &RunnerQuery) -> LoadState {
        let req = query.to_request();
        self.forkable
            .load(
                query.mode,
                "Loading forkable runners",
                self.notifier.as_ref(),
                self.client.list_excluding_codebook_uid(&req),
            )
            .await
    }

    pub async fn fetch_scoped(&self, scope: Scope, query: &RunnerQuery) -> LoadState {
        match scope {
            Scope::Codebook => self.fetch_codebook_runners(query).await,
            Scope::Forkable => self.fetch_forkable_runners(query).await,
        }
    }

    /// Fetch `query`, then keep appending pages until the backend total is
    /// covered or a page adds nothing.
    pub async fn fetch_remaining(&self, scope: Scope, mut query: RunnerQuery) -> LoadState {
        let handle = self.scoped(scope);
        loop {
            let before = match query.mode {
                FetchMode::Replace => 0,
                FetchMode::Append => handle.read(|s| s.items.len() as u64).await,
            };
            let status = self.fetch_scoped(scope, &query).await;
            if status.is_error() {
                return status;
            }

            let (loaded, total) = handle.read(|s| (s.items.len() as u64, s.total)).await;
            let added = loaded.saturating_sub(before);
            let next = query.offset.saturating_add(added);
            if added == 0 || next >= total {
                debug!(loaded, total, "Runner pages exhausted");
                return status;
            }
            let limit = query.limit;
            query = query.with_page(next, limit).appending();
        }
    }

    /// Delete a runner. Confirmation is the caller's concern.
    ///
    /// Returns true on success; the caller re-fetches whichever list it shows.
    pub async fn delete_runner(&self, id: RunnerId, name: &str) -> bool {
        match self.client.delete(id).await {
            Ok(_) => {
                info!(runner_id = %id, name = %name, "Runner deleted");
                self.notifier
                    .notify(Notice::success(format!("Deleted runner [{name}]")));
                true
            }
            Err(e) => {
                warn!(runner_id = %id, error = %e, "Failed to delete runner");
                self.notifier.notify(Notice::error(format!(
                    "Deleting runner [{name}] failed, please retry"
                )));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::ChannelNotifier;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use opsdesk_client::testing::{self, fail, ok};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::time::timeout;

    fn runners(range: std::ops::Range<u64>) -> Value {
        Value::Array(
            range
                .map(|i| json!({"id": i, "name": format!("runner-{i}"), "kind": "KAFKA"}))
                .collect(),
        )
    }

    async fn setup(router: Router) -> (RunnerBoard, tokio::sync::mpsc::UnboundedReceiver<Notice>) {
        let (notifier, rx) = ChannelNotifier::new();
        let client = RunnerClient::new(testing::spawn(router).await);
        (RunnerBoard::new(client, Arc::new(notifier)), rx)
    }

    #[tokio::test]
    async fn test_fetch_codebook_runners() {
        let router = Router::new().route(
            "/api/cmdb/runner/list/by_codebook_uid",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["codebook_uid"], "uid-1");
                assert_eq!(body["offset"], 0);
                assert_eq!(body["limit"], 20);
                ok(json!({"runners": runners(0..5), "total": 5}))
            }),
        );
        let (board, _rx) = setup(router).await;

        let status = board
            .fetch_codebook_runners(&RunnerQuery::new("uid-1"))
            .await;

        assert_eq!(status, LoadState::Loaded);
        let state = board.codebook().snapshot().await;
        assert_eq!(state.items.len(), 5);
        assert_eq!(state.total, 5);
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_appended_pages_never_exceed_total() {
        let router = Router::new().route(
            "/api/cmdb/runner/list/exclude_codebook_uid",
            post(|Json(body): Json<Value>| async move {
                let offset = body["offset"].as_u64().unwrap_or(0);
                let limit = body["limit"].as_u64().unwrap_or(0);
                let end = (offset + limit).min(45);
                ok(json!({"runners": runners(offset.min(end)..end), "total": 45}))
            }),
        );
        let (board, _rx) = setup(router).await;

        let mut query = RunnerQuery::new("uid-1");
        board.fetch_forkable_runners(&query).await;
        while board.forkable().read(|s| s.has_more()).await {
            let loaded = board.forkable().read(|s| s.items.len() as u64).await;
            query = query.with_page(loaded, DEFAULT_RUNNER_PAGE).appending();
            board.fetch_forkable_runners(&query).await;
            let state = board.forkable().snapshot().await;
            assert!(state.items.len() as u64 <= state.total);
        }

        let state = board.forkable().snapshot().await;
        assert_eq!(state.items.len(), 45);
        assert_eq!(state.items[44].name, "runner-44");
    }

    fn counted_pages(total: u64, served: u64, calls: Arc<AtomicUsize>) -> Router {
        Router::new().route(
            "/api/cmdb/runner/list/by_codebook_uid",
            post(move |Json(body): Json<Value>| {
                let calls = calls.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    let offset = body["offset"].as_u64().unwrap_or(0);
                    let limit = body["limit"].as_u64().unwrap_or(0);
                    let end = (offset + limit).min(served);
                    ok(json!({"runners": runners(offset.min(end)..end), "total": total}))
                }
            }),
        )
    }

    #[tokio::test]
    async fn test_fetch_remaining_from_offset_stops_at_total() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (board, _rx) = setup(counted_pages(45, 45, calls.clone())).await;

        let query = RunnerQuery::new("uid-1").with_page(10, 20);
        let status = timeout(Duration::from_secs(3), board.fetch_remaining(Scope::Codebook, query))
            .await
            .unwrap();

        assert_eq!(status, LoadState::Loaded);
        let state = board.codebook().snapshot().await;
        assert_eq!(state.items.len(), 35);
        assert_eq!(state.items[0].name, "runner-10");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_fetch_remaining_stops_on_empty_page() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (board, _rx) = setup(counted_pages(100, 30, calls.clone())).await;

        let status = timeout(
            Duration::from_secs(3),
            board.fetch_remaining(Scope::Codebook, RunnerQuery::new("uid-1")),
        )
        .await
        .unwrap();

        assert_eq!(status, LoadState::Loaded);
        assert_eq!(board.codebook().items().await.len(), 30);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_failed_fetch_resets_and_notifies() {
        let router = Router::new()
            .route(
                "/api/cmdb/runner/list",
                post(|| async { ok(json!({"runners": runners(0..3), "total": 3})) }),
            )
            .route(
                "/api/cmdb/runner/list/by_codebook_uid",
                post(|| async { StatusCode::BAD_GATEWAY }),
            );
        let (board, mut rx) = setup(router).await;

        assert_eq!(board.fetch_runners().await, LoadState::Loaded);
        assert_eq!(board.all().total().await, 3);

        let status = board
            .fetch_codebook_runners(&RunnerQuery::new("uid-1"))
            .await;
        assert_eq!(status, LoadState::Error);
        let state = board.codebook().snapshot().await;
        assert!(state.items.is_empty());
        assert_eq!(state.total, 0);
        assert!(!state.loading);
        assert!(rx.try_recv().unwrap().is_error());
    }

    #[tokio::test]
    async fn test_delete_runner_outcomes() {
        let router = Router::new().route(
            "/api/cmdb/runner/delete",
            post(|Json(body): Json<Value>| async move {
                if body["id"] == 1 {
                    ok(1)
                } else {
                    fail(404, "runner not found")
                }
            }),
        );
        let (board, mut rx) = setup(router).await;

        assert!(board.delete_runner(RunnerId::new(1), "deploy").await);
        assert_eq!(
            rx.try_recv().unwrap(),
            Notice::Success("Deleted runner [deploy]".to_string())
        );

        assert!(!board.delete_runner(RunnerId::new(2), "gone").await);
        assert!(rx.try_recv().unwrap().is_error());
    }
}
