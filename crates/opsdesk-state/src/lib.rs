//! OpsDesk view state
//!
//! Controllers that sit between the typed client and a presentation layer:
//! - paged lists with append/replace merging ([`ListHandle`])
//! - the runner lists of a codebook ([`RunnerBoard`])
//! - task history pagination ([`TaskHistory`])
//! - the template catalog with optimistic favorites ([`TemplateCatalog`])
//! - cascading selections for the runner form ([`ExecutorPicker`], [`AgentPicker`])
//!
//! Controllers never return transport errors. Failures are logged, reported
//! through a [`Notifier`] and reflected in a [`LoadState`].

pub mod catalog;
pub mod filter;
pub mod list;
pub mod notify;
pub mod runners;
pub mod selection;
pub mod status;
pub mod task_history;

pub use catalog::{CatalogState, TemplateCatalog};
pub use filter::{Category, TemplateFilter};
pub use list::{FetchMode, ListHandle, ListState};
pub use notify::{ChannelNotifier, LogNotifier, Notice, Notifier};
pub use runners::{RunnerBoard, RunnerQuery, Scope};
pub use selection::{
    AgentPicker, CodebookPicker, ExecutorPicker, HandlerPicker, ParentSource, WorkerPicker,
};
pub use status::LoadState;
pub use task_history::{Pagination, TaskHistory};
