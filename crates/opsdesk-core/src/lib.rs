//! OpsDesk Core Domain Types
//!
//! This crate contains the records mirrored from the OpsDesk backends
//! (CMDB and the distributed task service) with no dependencies on:
//! - HTTP
//! - Runtime specifics
//!
//! Field names follow the backend JSON contract.

pub mod codebook;
pub mod error;
pub mod executor;
pub mod ids;
pub mod kind;
pub mod page;
pub mod runner;
mod serde_ext;
pub mod task;
pub mod template;
pub mod user;
pub mod worker;

// Re-export commonly used types
pub use codebook::{Codebook, Codebooks};
pub use error::CoreError;
pub use executor::{handlers_for, Agent, Executor, HandlerDetail, HandlerSource, NodeDetail};
pub use ids::{CodebookUid, RunnerId, TaskId, TemplateGroupId, TemplateId, UserId};
pub use kind::Kind;
pub use page::{IdReq, IdsReq, PageReq, Paged};
pub use runner::{Runner, Runners, Variable};
pub use task::{Task, Tasks};
pub use template::{Template, TemplateCombination, TemplateGroup, Templates};
pub use user::{User, Users};
pub use worker::{Worker, Workers};
