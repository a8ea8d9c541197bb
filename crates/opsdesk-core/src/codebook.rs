//! Codebook records.

use serde::{Deserialize, Serialize};

use crate::serde_ext::null_as_default;
use crate::{CodebookUid, Paged};

/// A reusable script and credential bundle that runners execute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Codebook {
    pub id: i64,
    pub name: String,
    pub identifier: CodebookUid,
    pub secret: String,
    pub language: String,
    pub owner: String,
}

/// Paged codebook list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Codebooks {
    #[serde(deserialize_with = "null_as_default")]
    pub codebooks: Vec<Codebook>,
    pub total: u64,
}

impl From<Codebooks> for Paged<Codebook> {
    fn from(c: Codebooks) -> Self {
        Paged::new(c.codebooks, c.total)
    }
}

/// Secret of the codebook identified by `uid`, or empty when unknown.
pub fn secret_for<'a>(codebooks: &'a [Codebook], uid: &CodebookUid) -> &'a str {
    codebooks
        .iter()
        .find(|c| &c.identifier == uid)
        .map(|c| c.secret.as_str())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_for() {
        let codebooks = vec![Codebook {
            identifier: "uid-1".into(),
            secret: "s3cr3t".to_string(),
            ..Default::default()
        }];
        assert_eq!(secret_for(&codebooks, &"uid-1".into()), "s3cr3t");
        assert_eq!(secret_for(&codebooks, &"uid-2".into()), "");
    }
}
