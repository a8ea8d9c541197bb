//! Typed client for the OpsDesk backends.
//!
//! Provides one client per backend resource (runners, tasks, templates,
//! users, agents, executors, codebooks, workers) on top of a shared
//! [`HttpClient`].

pub mod api;
pub mod config;
pub mod error;
pub mod http;
#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use api::{
    AgentClient, CodebookClient, ExecutorClient, OpsClient, RunnerClient, TaskClient,
    TemplateClient, UserClient, WorkerClient,
};
pub use config::{ClientConfig, Service};
pub use error::ClientError;
pub use http::HttpClient;
