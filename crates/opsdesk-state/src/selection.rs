//! Pickers backing the runner form.
//!
//! Handler pickers fetch a parent list (executors or agents) and derive the
//! handlers of whichever parent the form currently selects. The selection is
//! read through a caller-supplied accessor on every call, so the derived list
//! always follows the form.

use std::sync::Arc;

use async_trait::async_trait;

use opsdesk_client::{AgentClient, ClientError, CodebookClient, ExecutorClient, WorkerClient};
use opsdesk_core::codebook::secret_for;
use opsdesk_core::runner::RegisterOrUpdateRunner;
use opsdesk_core::{
    handlers_for, Agent, Codebook, CodebookUid, Executor, HandlerDetail, HandlerSource, PageReq,
    Worker,
};

use crate::list::{FetchMode, ListHandle};
use crate::notify::Notifier;
use crate::status::LoadState;

/// Page size used when a picker loads its options.
pub const PICKER_LIMIT: u64 = 100;

/// Reads the parent key currently selected by the caller.
pub type Selector = Arc<dyn Fn() -> Option<String> + Send + Sync>;

/// A backend list of handler-owning parents.
#[async_trait]
pub trait ParentSource: Send + Sync {
    type Parent: HandlerSource + Clone + Send + Sync;

    /// Label used in logs and notices.
    const WHAT: &'static str;

    async fn fetch(&self) -> Result<Vec<Self::Parent>, ClientError>;
}

#[async_trait]
impl ParentSource for ExecutorClient {
    type Parent = Executor;
    const WHAT: &'static str = "Loading executors";

    async fn fetch(&self) -> Result<Vec<Executor>, ClientError> {
        self.list().await
    }
}

#[async_trait]
impl ParentSource for AgentClient {
    type Parent = Agent;
    const WHAT: &'static str = "Loading agents";

    async fn fetch(&self) -> Result<Vec<Agent>, ClientError> {
        self.list().await
    }
}

/// Parent list plus handlers of the selected parent.
#[derive(Clone)]
pub struct HandlerPicker<S: ParentSource> {
    source: S,
    notifier: Arc<dyn Notifier>,
    parents: ListHandle<S::Parent>,
    selected: Selector,
}

/// Executors keyed by service name.
pub type ExecutorPicker = HandlerPicker<ExecutorClient>;

/// Agents keyed by topic.
pub type AgentPicker = HandlerPicker<AgentClient>;

impl<S: ParentSource> HandlerPicker<S> {
    pub fn new<F>(source: S, notifier: Arc<dyn Notifier>, selected: F) -> Self
    where
        F: Fn() -> Option<String> + Send + Sync + 'static,
    {
        Self {
            source,
            notifier,
            parents: ListHandle::new(),
            selected: Arc::new(selected),
        }
    }

    pub fn parents(&self) -> &ListHandle<S::Parent> {
        &self.parents
    }

    pub async fn fetch(&self) -> LoadState {
        self.parents
            .load(
                FetchMode::Replace,
                S::WHAT,
                self.notifier.as_ref(),
                self.source.fetch(),
            )
            .await
    }

    /// Handlers of the selected parent; empty when nothing is selected or
    /// the selection matches no parent.
    pub async fn available_handlers(&self) -> Vec<HandlerDetail> {
        let selected = (self.selected)();
        self.parents
            .read(|state| handlers_for(&state.items, selected.as_deref()).to_vec())
            .await
    }
}

/// Codebook options, and the secret of the selected codebook.
#[derive(Clone)]
pub struct CodebookPicker {
    client: CodebookClient,
    notifier: Arc<dyn Notifier>,
    codebooks: ListHandle<Codebook>,
}

impl CodebookPicker {
    pub fn new(client: CodebookClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            client,
            notifier,
            codebooks: ListHandle::new(),
        }
    }

    pub fn codebooks(&self) -> &ListHandle<Codebook> {
        &self.codebooks
    }

    pub async fn fetch(&self) -> LoadState {
        self.codebooks
            .load(
                FetchMode::Replace,
                "Loading codebooks",
                self.notifier.as_ref(),
                self.client.list(PageReq::new(0, PICKER_LIMIT)),
            )
            .await
    }

    /// Secret of the codebook `uid`, or empty when it is not loaded.
    pub async fn secret_for(&self, uid: &CodebookUid) -> String {
        self.codebooks
            .read(|state| secret_for(&state.items, uid).to_string())
            .await
    }

    /// Fill the form's secret from its selected codebook.
    pub async fn sync_secret(&self, form: &mut RegisterOrUpdateRunner) {
        form.codebook_secret = self.secret_for(&form.codebook_uid).await;
    }
}

/// Kafka worker options.
#[derive(Clone)]
pub struct WorkerPicker {
    client: WorkerClient,
    notifier: Arc<dyn Notifier>,
    workers: ListHandle<Worker>,
}

impl WorkerPicker {
    pub fn new(client: WorkerClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            client,
            notifier,
            workers: ListHandle::new(),
        }
    }

    pub fn workers(&self) -> &ListHandle<Worker> {
        &self.workers
    }

    pub async fn fetch(&self) -> LoadState {
        self.workers
            .load(
                FetchMode::Replace,
                "Loading workers",
                self.notifier.as_ref(),
                self.client.list(PageReq::new(0, PICKER_LIMIT)),
            )
            .await
    }

    /// Display labels of the loaded workers.
    pub async fn labels(&self) -> Vec<String> {
        self.workers
            .read(|state| state.items.iter().map(Worker::label).collect())
            .await
    }
}
