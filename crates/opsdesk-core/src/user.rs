//! User directory records and request shapes.

use serde::{Deserialize, Serialize};

use crate::serde_ext::null_as_default;
use crate::{PageReq, Paged, UserId};

/// A platform user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub title: String,
    pub department_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub role_codes: Vec<String>,
}

/// Paged user list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Users {
    #[serde(deserialize_with = "null_as_default")]
    pub users: Vec<User>,
    pub total: u64,
}

impl From<Users> for Paged<User> {
    fn from(u: Users) -> Self {
        Paged::new(u.users, u.total)
    }
}

/// Keyword search over users (also used for LDAP search).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserKeywordReq {
    #[serde(flatten)]
    pub page: PageReq,
    pub keyword: String,
}

/// Users of one department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDepartmentReq {
    #[serde(flatten)]
    pub page: PageReq,
    pub department_id: i64,
}

/// Body for `/user/role/bind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindRoleCodesReq {
    pub id: UserId,
    pub role_codes: Vec<String>,
}

/// Body for user create/update/register/LDAP sync.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrUpdateUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub title: String,
    pub department_id: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub role_codes: Vec<String>,
}

/// Users grouped by department.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserDepartmentCombination {
    pub department_id: i64,
    pub total: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub users: Vec<User>,
}

/// Body `{ "usernames": [..] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsernamesReq {
    pub usernames: Vec<String>,
}

/// Body `{ "username": .. }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsernameReq {
    pub username: String,
}

/// A directory entry returned by LDAP search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LdapUser {
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub title: String,
    /// Whether the entry already exists as a platform user.
    pub is_system_exist: bool,
}

/// Paged LDAP search result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LdapUsers {
    #[serde(deserialize_with = "null_as_default")]
    pub users: Vec<LdapUser>,
    pub total: u64,
}

impl From<LdapUsers> for Paged<LdapUser> {
    fn from(u: LdapUsers) -> Self {
        Paged::new(u.users, u.total)
    }
}
