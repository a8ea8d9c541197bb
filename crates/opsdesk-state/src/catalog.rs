//! Template catalog of the order start page, with optimistic favorites.
//!
//! Toggling a favorite updates the local list before the backend answers.
//! If the backend rejects the toggle the local change is undone; when a
//! concurrent toggle has already touched the same template, the favorite
//! list is re-fetched instead. Toggles are not sequenced: the last one to
//! land wins.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use opsdesk_client::TemplateClient;
use opsdesk_core::{Template, TemplateCombination, TemplateId};

use crate::notify::{Notice, Notifier};
use crate::status::LoadState;

/// Snapshot of the catalog.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    /// Templates grouped by template group.
    pub combinations: Vec<TemplateCombination>,

    /// The user's favorite templates.
    pub favorites: Vec<Template>,

    /// True when the last combination fetch returned nothing.
    pub empty: bool,

    pub loading: bool,

    pub status: LoadState,
}

impl CatalogState {
    pub fn favorite_ids(&self) -> Vec<TemplateId> {
        self.favorites.iter().map(|t| t.id).collect()
    }

    pub fn is_favorite(&self, id: TemplateId) -> bool {
        self.favorites.iter().any(|t| t.id == id)
    }

    /// Number of templates across all groups.
    pub fn total_template_count(&self) -> usize {
        self.combinations.iter().map(|c| c.templates.len()).sum()
    }

    /// Look a template up in the loaded groups.
    pub fn find_template(&self, id: TemplateId) -> Option<&Template> {
        self.combinations
            .iter()
            .flat_map(|c| c.templates.iter())
            .find(|t| t.id == id)
    }
}

/// What a toggle changed locally, so it can be undone.
enum Speculation {
    Added,
    Removed { index: usize, template: Template },
}

/// Catalog controller.
#[derive(Clone)]
pub struct TemplateCatalog {
    client: TemplateClient,
    notifier: Arc<dyn Notifier>,
    state: Arc<RwLock<CatalogState>>,
}

impl TemplateCatalog {
    pub fn new(client: TemplateClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            client,
            notifier,
            state: Arc::new(RwLock::new(CatalogState::default())),
        }
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> CatalogState {
        self.state.read().await.clone()
    }

    pub async fn favorite_ids(&self) -> Vec<TemplateId> {
        self.state.read().await.favorite_ids()
    }

    pub async fn total_template_count(&self) -> usize {
        self.state.read().await.total_template_count()
    }

    /// Fetch the grouped templates.
    pub async fn list_combinations(&self) -> LoadState {
        self.state.write().await.loading = true;
        let status = self.load_combinations().await;
        self.state.write().await.loading = false;
        status
    }

    /// Combination fetch without touching the loading flag.
    async fn load_combinations(&self) -> LoadState {
        self.state.write().await.status = LoadState::Loading;
        let result = self.client.pipeline().await;

        let mut state = self.state.write().await;
        match result {
            Ok(resp) => {
                state.combinations = resp.template_combinations;
                state.empty = state.combinations.is_empty();
                state.status = LoadState::Loaded;
                debug!(groups = state.combinations.len(), "Template groups loaded");
            }
            Err(e) => {
                warn!(error = %e, "Failed to load template groups");
                state.combinations.clear();
                state.empty = true;
                state.status = LoadState::Error;
                self.notifier
                    .notify(Notice::error("Loading templates failed, please retry"));
            }
        }
        state.status
    }

    /// Fetch the user's favorites. Failures leave an empty list.
    pub async fn fetch_favorites(&self) -> bool {
        let result = self.client.favorites().await;

        let mut state = self.state.write().await;
        match result {
            Ok(favorites) => {
                state.favorites = favorites.map(|c| c.templates).unwrap_or_default();
                true
            }
            Err(e) => {
                warn!(error = %e, "Failed to sync favorites");
                state.favorites.clear();
                false
            }
        }
    }

    /// Fetch favorites and groups concurrently.
    pub async fn refresh(&self) -> LoadState {
        self.state.write().await.loading = true;
        let (_, status) = tokio::join!(self.fetch_favorites(), self.load_combinations());
        self.state.write().await.loading = false;
        status
    }

    /// Flip a template's favorite flag optimistically.
    ///
    /// Returns true if the backend accepted the toggle.
    pub async fn toggle_favorite(&self, id: TemplateId) -> bool {
        let speculation = {
            let mut state = self.state.write().await;
            match state.favorites.iter().position(|t| t.id == id) {
                None => {
                    let template = state
                        .find_template(id)
                        .cloned()
                        .unwrap_or_else(|| Template::placeholder(id));
                    state.favorites.push(template);
                    Speculation::Added
                }
                Some(index) => {
                    let template = state.favorites.remove(index);
                    Speculation::Removed { index, template }
                }
            }
        };
        let adding = matches!(speculation, Speculation::Added);

        match self.client.toggle_favorite(id).await {
            Ok(_) => {
                info!(template_id = %id, adding, "Favorite toggled");
                self.notifier.notify(Notice::success(if adding {
                    "Added to favorites"
                } else {
                    "Removed from favorites"
                }));
                true
            }
            Err(e) => {
                warn!(template_id = %id, error = %e, "Favorite toggle failed, rolling back");
                if !self.rollback(id, speculation).await {
                    self.fetch_favorites().await;
                }
                self.notifier
                    .notify(Notice::error("Updating favorites failed, please retry"));
                false
            }
        }
    }

    /// Undo a speculative toggle. Returns false if the list no longer
    /// looks the way the speculation left it.
    async fn rollback(&self, id: TemplateId, speculation: Speculation) -> bool {
        let mut state = self.state.write().await;
        match speculation {
            Speculation::Added => match state.favorites.iter().position(|t| t.id == id) {
                Some(index) => {
                    state.favorites.remove(index);
                    true
                }
                None => false,
            },
            Speculation::Removed { index, template } => {
                if state.is_favorite(id) {
                    return false;
                }
                let index = index.min(state.favorites.len());
                state.favorites.insert(index, template);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::ChannelNotifier;
    use axum::extract::State;
    use axum::routing::post;
    use axum::{Json, Router};
    use opsdesk_client::testing::{self, fail, ok};
    use serde_json::{json, Value};
    use std::time::Duration;
    use tokio::sync::{mpsc, Notify};

    fn pipeline() -> Value {
        json!({"template_combinations": [
            {"id": 1, "name": "Compute", "icon": "Cpu", "total": 2, "templates": [
                {"id": 10, "name": "Create VM", "icon": "Box"},
                {"id": 11, "name": "Resize VM", "icon": "Box"}
            ]},
            {"id": 2, "name": "Network", "icon": "Link", "total": 1, "templates": [
                {"id": 20, "name": "Open port", "icon": "Lock"}
            ]}
        ]})
    }

    /// Backend where favorites start as `[10]`, without the toggle route.
    fn base() -> Router {
        Router::new()
            .route("/api/cmdb/template/list/pipeline", post(|| async { ok(pipeline()) }))
            .route(
                "/api/cmdb/template/favorite/list",
                post(|| async {
                    ok(json!({"id": 0, "name": "favorites", "templates": [
                        {"id": 10, "name": "Create VM", "icon": "Box"}
                    ]}))
                }),
            )
    }

    fn backend(toggle_ok: bool) -> Router {
        base().route(
            "/api/cmdb/template/favorite/toggle",
            post(move |Json(_): Json<Value>| async move {
                if toggle_ok {
                    ok(true)
                } else {
                    fail(500, "db unavailable")
                }
            }),
        )
    }

    async fn setup(router: Router) -> (TemplateCatalog, mpsc::UnboundedReceiver<Notice>) {
        let (notifier, rx) = ChannelNotifier::new();
        let client = TemplateClient::new(testing::spawn(router).await);
        let catalog = TemplateCatalog::new(client, Arc::new(notifier));
        assert_eq!(catalog.refresh().await, LoadState::Loaded);
        (catalog, rx)
    }

    #[tokio::test]
    async fn test_refresh_loads_both_lists() {
        let (catalog, _rx) = setup(backend(true)).await;
        let state = catalog.snapshot().await;
        assert_eq!(state.total_template_count(), 3);
        assert_eq!(state.favorite_ids(), vec![TemplateId::new(10)]);
        assert!(!state.empty);
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_double_toggle_restores_original() {
        let (catalog, mut rx) = setup(backend(true)).await;
        let before = catalog.snapshot().await.favorites;

        assert!(catalog.toggle_favorite(TemplateId::new(20)).await);
        assert_eq!(
            catalog.favorite_ids().await,
            vec![TemplateId::new(10), TemplateId::new(20)]
        );
        assert!(catalog.toggle_favorite(TemplateId::new(20)).await);

        assert_eq!(catalog.snapshot().await.favorites, before);
        assert_eq!(rx.try_recv().unwrap(), Notice::success("Added to favorites"));
        assert_eq!(rx.try_recv().unwrap(), Notice::success("Removed from favorites"));
    }

    #[tokio::test]
    async fn test_failed_toggle_rolls_back() {
        let (catalog, mut rx) = setup(backend(false)).await;
        let before = catalog.snapshot().await.favorites;

        // Adding a favorite
        assert!(!catalog.toggle_favorite(TemplateId::new(11)).await);
        assert_eq!(catalog.snapshot().await.favorites, before);

        // Removing a favorite
        assert!(!catalog.toggle_favorite(TemplateId::new(10)).await);
        assert_eq!(catalog.snapshot().await.favorites, before);

        assert!(rx.try_recv().unwrap().is_error());
        assert!(rx.try_recv().unwrap().is_error());
    }

    #[tokio::test]
    async fn test_unknown_template_gets_placeholder() {
        let (catalog, _rx) = setup(backend(true)).await;

        assert!(catalog.toggle_favorite(TemplateId::new(99)).await);
        let state = catalog.snapshot().await;
        let added = state.favorites.last().unwrap();
        assert_eq!(added.id, TemplateId::new(99));
        assert_eq!(added.name, "Unknown template");
        assert_eq!(added.icon, "Flag");
    }

    #[tokio::test]
    async fn test_update_is_visible_before_backend_answers() {
        let gate = Arc::new(Notify::new());
        let router = base().route(
            "/api/cmdb/template/favorite/toggle",
            post(|State(gate): State<Arc<Notify>>| async move {
                gate.notified().await;
                ok(true)
            })
            .with_state(gate.clone()),
        );
        let (catalog, _rx) = setup(router).await;

        let pending = tokio::spawn({
            let catalog = catalog.clone();
            async move { catalog.toggle_favorite(TemplateId::new(11)).await }
        });

        tokio::time::timeout(Duration::from_secs(5), async {
            while !catalog.snapshot().await.is_favorite(TemplateId::new(11)) {
                tokio::task::yield_now().await;
            }
        })
        .await
        .unwrap();

        gate.notify_one();
        assert!(pending.await.unwrap());
        assert!(catalog.snapshot().await.is_favorite(TemplateId::new(11)));
    }

    #[tokio::test]
    async fn test_refresh_stays_loading_until_favorites_arrive() {
        let gate = Arc::new(Notify::new());
        let router = Router::new()
            .route("/api/cmdb/template/list/pipeline", post(|| async { ok(pipeline()) }))
            .route(
                "/api/cmdb/template/favorite/list",
                post(|State(gate): State<Arc<Notify>>| async move {
                    gate.notified().await;
                    ok(json!({"id": 0, "name": "favorites", "templates": []}))
                })
                .with_state(gate.clone()),
            );
        let catalog = TemplateCatalog::new(
            TemplateClient::new(testing::spawn(router).await),
            Arc::new(crate::notify::LogNotifier),
        );

        let pending = tokio::spawn({
            let catalog = catalog.clone();
            async move { catalog.refresh().await }
        });

        tokio::time::timeout(Duration::from_secs(5), async {
            while catalog.snapshot().await.status != LoadState::Loaded {
                tokio::task::yield_now().await;
            }
        })
        .await
        .unwrap();
        assert!(catalog.snapshot().await.loading);

        gate.notify_one();
        assert_eq!(pending.await.unwrap(), LoadState::Loaded);
        assert!(!catalog.snapshot().await.loading);
    }
}
