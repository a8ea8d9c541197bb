//! Execution mode of Runners and Tasks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// How a Runner (and the Tasks it spawns) is dispatched.
///
/// The backend has shipped two spellings of this enum. The current one is
/// `KAFKA`/`GRPC`; the older `WORKER`/`EXECUTE` names are still accepted on
/// input and map onto the same variants. Output always uses the current
/// spelling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Kind {
    /// Pushed to worker nodes through Kafka.
    #[default]
    #[serde(alias = "WORKER")]
    Kafka,
    /// Dispatched to executor nodes of the distributed task platform.
    #[serde(alias = "EXECUTE")]
    Grpc,
}

impl Kind {
    /// Wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kafka => "KAFKA",
            Self::Grpc => "GRPC",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "KAFKA" | "WORKER" => Ok(Self::Kafka),
            "GRPC" | "EXECUTE" => Ok(Self::Grpc),
            other => Err(CoreError::UnknownKind(other.to_string())),
        }
    }
}
