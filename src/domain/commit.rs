//! Branches and commits

use serde::Deserialize;
use serde_json::Value;

use super::{UNKNOWN, decode_page, non_empty};
use crate::error::Result;

/// Branches treated as long-lived when listing
pub const PRIMARY_BRANCHES: &[&str] = &["main", "master", "develop"];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Branch {
    pub name: String,
}

impl Branch {
    pub fn page_from_value(value: &Value) -> Result<Vec<Self>> {
        decode_page(value, "branches")
    }

    pub fn is_primary(&self) -> bool {
        PRIMARY_BRANCHES.contains(&self.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub hash: String,
    pub message: String,
    pub author: String,
}

impl Commit {
    pub fn page_from_value(value: &Value) -> Result<Vec<Self>> {
        let raw: Vec<RawCommit> = decode_page(value, "commits")?;
        Ok(raw.into_iter().map(Self::from).collect())
    }

    /// First eight characters of the hash
    pub fn short_hash(&self) -> &str {
        let end = self
            .hash
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.hash.len());
        &self.hash[..end]
    }

    pub fn headline(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}

#[derive(Debug, Deserialize)]
struct RawCommit {
    hash: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    author: Option<RawCommitAuthor>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCommitAuthor {
    /// `Name <email>` as recorded by git
    raw: Option<String>,
    user: Option<RawUser>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawUser {
    display_name: Option<String>,
}

impl From<RawCommit> for Commit {
    fn from(raw: RawCommit) -> Self {
        let author = raw
            .author
            .and_then(|a| non_empty(a.user.and_then(|u| u.display_name)).or(non_empty(a.raw)))
            .unwrap_or_else(|| UNKNOWN.to_string());

        Self {
            hash: raw.hash,
            message: raw.message,
            author,
        }
    }
}
