//! Distributed task service nodes: executors and queue-mode agents.

use serde::{Deserialize, Serialize};

use crate::serde_ext::null_as_default;

/// A named handler exposed by an executor or agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandlerDetail {
    pub name: String,
    pub desc: String,
}

impl HandlerDetail {
    /// Create a handler with an empty description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            desc: String::new(),
        }
    }
}

/// A node serving an executor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeDetail {
    pub id: String,
    pub address: String,
}

/// An executor service and the nodes currently serving it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Executor {
    pub name: String,
    pub desc: String,
    #[serde(deserialize_with = "null_as_default")]
    pub handlers: Vec<HandlerDetail>,
    #[serde(deserialize_with = "null_as_default")]
    pub nodes: Vec<NodeDetail>,
}

impl Executor {
    /// Builder method to add a handler.
    pub fn with_handler(mut self, handler: HandlerDetail) -> Self {
        self.handlers.push(handler);
        self
    }
}

/// A queue-mode agent consuming a Kafka topic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Agent {
    pub name: String,
    pub desc: String,
    pub topic: String,
    #[serde(deserialize_with = "null_as_default")]
    pub handlers: Vec<HandlerDetail>,
}

/// A parent record that owns a list of handlers.
pub trait HandlerSource {
    /// Key the caller selects this parent by.
    fn key(&self) -> &str;

    /// Handlers exposed by this parent.
    fn handlers(&self) -> &[HandlerDetail];
}

impl HandlerSource for Executor {
    fn key(&self) -> &str {
        &self.name
    }

    fn handlers(&self) -> &[HandlerDetail] {
        &self.handlers
    }
}

/// Agents are selected by topic, which is what a Kafka runner targets.
impl HandlerSource for Agent {
    fn key(&self) -> &str {
        &self.topic
    }

    fn handlers(&self) -> &[HandlerDetail] {
        &self.handlers
    }
}

/// Handlers of the parent whose key equals `selected`.
///
/// Empty when nothing is selected or no parent matches.
pub fn handlers_for<'a, S: HandlerSource>(
    parents: &'a [S],
    selected: Option<&str>,
) -> &'a [HandlerDetail] {
    match selected {
        Some(key) if !key.is_empty() => parents
            .iter()
            .find(|p| p.key() == key)
            .map(HandlerSource::handlers)
            .unwrap_or(&[]),
        _ => &[],
    }
}
