//! Order template records and request shapes.

use serde::{Deserialize, Serialize};

use crate::serde_ext::null_as_default;
use crate::{PageReq, Paged, TemplateGroupId, TemplateId};

/// Icon used for templates the client only knows by id.
pub const PLACEHOLDER_ICON: &str = "Flag";

/// Name used for templates the client only knows by id.
pub const PLACEHOLDER_NAME: &str = "Unknown template";

/// An order form definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Template {
    pub id: TemplateId,
    pub name: String,
    /// Form rules, opaque to the client.
    pub rules: serde_json::Value,
    /// Form options, opaque to the client.
    pub options: serde_json::Value,
    pub create_type: i32,
    pub desc: String,
    pub icon: String,
    pub workflow_id: i64,
    pub group_id: TemplateGroupId,
}

impl Template {
    /// Minimal stand-in for a template that is not loaded locally.
    pub fn placeholder(id: TemplateId) -> Self {
        Self {
            id,
            name: PLACEHOLDER_NAME.to_string(),
            icon: PLACEHOLDER_ICON.to_string(),
            ..Default::default()
        }
    }
}

/// Paged template list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Templates {
    pub total: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub templates: Vec<Template>,
}

impl From<Templates> for Paged<Template> {
    fn from(t: Templates) -> Self {
        Paged::new(t.templates, t.total)
    }
}

/// Body for `/template/create` and `/template/update`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateOrUpdateTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TemplateId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<serde_json::Value>,
    pub desc: String,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<TemplateGroupId>,
}

/// Keyword search over templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByKeywordReq {
    #[serde(flatten)]
    pub page: PageReq,
    pub keyword: String,
}

/// A single form field rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rule {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub field: String,
}

/// The rules of one template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateRule {
    pub id: TemplateId,
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub rules: Vec<Rule>,
}

/// Response of `/template/rules/by_workflow_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateRules {
    #[serde(deserialize_with = "null_as_default")]
    pub template_rules: Vec<TemplateRule>,
}

/// Body for `/template/group/create`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTemplateGroup {
    pub name: String,
    pub icon: String,
}

/// A named group of templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateGroup {
    pub id: TemplateGroupId,
    pub name: String,
    pub icon: String,
}

/// Paged template group list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateGroups {
    pub total: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub template_groups: Vec<TemplateGroup>,
}

impl From<TemplateGroups> for Paged<TemplateGroup> {
    fn from(g: TemplateGroups) -> Self {
        Paged::new(g.template_groups, g.total)
    }
}

/// A template group together with its templates.
///
/// Also the shape of the favorites response, where the "group" is the
/// user's favorite set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateCombination {
    pub id: TemplateGroupId,
    pub name: String,
    pub icon: String,
    pub total: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub templates: Vec<Template>,
}

/// Response of `/template/list/pipeline`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateCombinations {
    #[serde(deserialize_with = "null_as_default")]
    pub template_combinations: Vec<TemplateCombination>,
}

/// Body for `/template/favorite/toggle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleFavoriteReq {
    pub template_id: TemplateId,
}
