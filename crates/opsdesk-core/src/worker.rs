//! Kafka worker node records.

use serde::{Deserialize, Serialize};

use crate::serde_ext::null_as_default;
use crate::Paged;

/// A worker node consuming one Kafka topic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Worker {
    pub id: i64,
    pub name: String,
    pub desc: String,
    pub topic: String,
    /// Backend status code.
    pub status: i32,
}

impl Worker {
    /// Display label used in worker pickers.
    pub fn label(&self) -> String {
        format!("{} - [ topic: {} ]", self.name, self.topic)
    }
}

/// Paged worker list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Workers {
    #[serde(deserialize_with = "null_as_default")]
    pub workers: Vec<Worker>,
    pub total: u64,
}

impl From<Workers> for Paged<Worker> {
    fn from(w: Workers) -> Self {
        Paged::new(w.workers, w.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label() {
        let worker = Worker {
            name: "w1".to_string(),
            topic: "ops.shell".to_string(),
            ..Default::default()
        };
        assert_eq!(worker.label(), "w1 - [ topic: ops.shell ]");
    }
}
