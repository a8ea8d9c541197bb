//! One client per backend resource, all sharing one [`HttpClient`].

pub mod agent;
pub mod codebook;
pub mod executor;
pub mod runner;
pub mod task;
pub mod template;
pub mod user;
pub mod worker;

pub use agent::AgentClient;
pub use codebook::CodebookClient;
pub use executor::ExecutorClient;
pub use runner::RunnerClient;
pub use task::TaskClient;
pub use template::TemplateClient;
pub use user::UserClient;
pub use worker::WorkerClient;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::http::HttpClient;

/// Combined client with access to all resources.
#[derive(Clone)]
pub struct OpsClient {
    /// Runner endpoints.
    pub runners: RunnerClient,
    /// Task endpoints.
    pub tasks: TaskClient,
    /// Template endpoints.
    pub templates: TemplateClient,
    /// User endpoints.
    pub users: UserClient,
    /// Agent endpoints.
    pub agents: AgentClient,
    /// Executor endpoints.
    pub executors: ExecutorClient,
    /// Codebook endpoints.
    pub codebooks: CodebookClient,
    /// Worker endpoints.
    pub workers: WorkerClient,
    http: HttpClient,
}

impl OpsClient {
    /// Build a client from configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        Ok(Self::from_http(HttpClient::new(config)?))
    }

    /// Build all resource clients on an existing HTTP client.
    pub fn from_http(http: HttpClient) -> Self {
        Self {
            runners: RunnerClient::new(http.clone()),
            tasks: TaskClient::new(http.clone()),
            templates: TemplateClient::new(http.clone()),
            users: UserClient::new(http.clone()),
            agents: AgentClient::new(http.clone()),
            executors: ExecutorClient::new(http.clone()),
            codebooks: CodebookClient::new(http.clone()),
            workers: WorkerClient::new(http.clone()),
            http,
        }
    }

    /// The shared HTTP client.
    pub fn http(&self) -> &HttpClient {
        &self.http
    }
}
