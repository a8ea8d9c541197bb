//! Runner records and request shapes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::serde_ext::null_as_default;
use crate::{CodebookUid, Kind, PageReq, Paged, RunnerId};

/// A variable injected into a Runner's execution environment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub key: String,
    /// Arbitrary JSON value.
    #[serde(default)]
    pub value: serde_json::Value,
    /// Secret values are masked by the backend when listed.
    #[serde(default)]
    pub secret: bool,
}

/// A registered execution unit bound to a codebook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Runner {
    pub id: RunnerId,
    pub name: String,
    pub codebook_uid: CodebookUid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codebook_name: Option<String>,
    pub codebook_secret: String,
    pub kind: Kind,
    /// Kafka topic or executor service name, depending on `kind`.
    pub target: String,
    pub handler: String,
    pub desc: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub variables: Vec<Variable>,
}

/// Body for both `/runner/register` and `/runner/update`.
///
/// `id` is only sent on update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegisterOrUpdateRunner {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RunnerId>,
    pub name: String,
    pub codebook_uid: CodebookUid,
    pub codebook_secret: String,
    pub kind: Kind,
    pub target: String,
    pub handler: String,
    pub desc: String,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Vec<Variable>>,
}

impl From<&Runner> for RegisterOrUpdateRunner {
    fn from(runner: &Runner) -> Self {
        Self {
            id: Some(runner.id),
            name: runner.name.clone(),
            codebook_uid: runner.codebook_uid.clone(),
            codebook_secret: runner.codebook_secret.clone(),
            kind: runner.kind,
            target: runner.target.clone(),
            handler: runner.handler.clone(),
            desc: runner.desc.clone(),
            tags: runner.tags.clone(),
            variables: Some(runner.variables.clone()),
        }
    }
}

/// Paged runner list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Runners {
    #[serde(deserialize_with = "null_as_default")]
    pub runners: Vec<Runner>,
    pub total: u64,
}

impl From<Runners> for Paged<Runner> {
    fn from(r: Runners) -> Self {
        Paged::new(r.runners, r.total)
    }
}

/// Runner list scoped by codebook, with optional keyword and kind filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListByCodebookReq {
    #[serde(flatten)]
    pub page: PageReq,
    pub codebook_uid: CodebookUid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<Kind>,
}

/// Body `{ "workflow_id": .. }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowIdReq {
    pub workflow_id: i64,
}

/// Tag-to-topic mapping of the runners of one codebook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerTags {
    pub codebook_name: String,
    pub codebook_uid: CodebookUid,
    #[serde(deserialize_with = "null_as_default")]
    pub tags_topic: HashMap<String, String>,
}

/// Response of `/runner/list/tags`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerTagsResp {
    #[serde(deserialize_with = "null_as_default")]
    pub runner_tags: Vec<RunnerTags>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_collections_become_empty() {
        let runners: Runners = serde_json::from_value(json!({
            "runners": null,
            "total": 0
        }))
        .unwrap();
        assert!(runners.runners.is_empty());

        let runner: Runner = serde_json::from_value(json!({
            "id": 3,
            "name": "deploy",
            "kind": "GRPC",
            "tags": null
        }))
        .unwrap();
        assert_eq!(runner.id, RunnerId::new(3));
        assert_eq!(runner.kind, Kind::Grpc);
        assert!(runner.tags.is_empty());
        assert!(runner.codebook_name.is_none());
    }

    #[test]
    fn test_list_by_codebook_omits_unset_filters() {
        let req = ListByCodebookReq {
            page: PageReq::new(0, 20),
            codebook_uid: "uid-1".into(),
            keyword: None,
            kind: Some(Kind::Kafka),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({"offset": 0, "limit": 20, "codebook_uid": "uid-1", "kind": "KAFKA"})
        );
    }
}
