//! Newtype wrappers for identifiers to ensure type safety.
//!
//! The CMDB hands out numeric ids for most records; codebooks are
//! addressed by a string uid instead.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create a new id from its raw value.
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the raw value.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }
    };
}

numeric_id!(
    /// Identifier of a registered Runner.
    RunnerId
);
numeric_id!(
    /// Identifier of an automation Task.
    TaskId
);
numeric_id!(
    /// Identifier of an order Template.
    TemplateId
);
numeric_id!(
    /// Identifier of a Template group.
    TemplateGroupId
);
numeric_id!(
    /// Identifier of a User.
    UserId
);

/// Unique identifier of a Codebook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodebookUid(String);

impl CodebookUid {
    /// Create a new CodebookUid from a string.
    pub fn new(uid: impl Into<String>) -> Self {
        Self(uid.into())
    }

    /// Get the inner string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the uid is blank (no codebook selected).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CodebookUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<String> for CodebookUid {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CodebookUid {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}
