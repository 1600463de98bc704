//! Domain types for atlassian-mcp
//!
//! Typed views of the REST payloads returned by the backing services:
//! - Issue, IssueSearch, Transition: issue tracker records
//! - Repository, PullRequest, Branch, Commit: source control records
//!
//! Optional fields decode to defined fallbacks (e.g. an absent assignee reads
//! as "Unassigned") so rendering never has to guess.

pub mod commit;
pub mod issue;
pub mod pull_request;
pub mod repository;

pub use commit::{Branch, Commit};
pub use issue::{Issue, IssueSearch, Transition, UNASSIGNED};
pub use pull_request::PullRequest;
pub use repository::Repository;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{BridgeError, Result};

/// Fallback for absent author / language fields
pub const UNKNOWN: &str = "Unknown";

/// Decode a JSON value, labelling failures with what was being read
pub(crate) fn decode<T: DeserializeOwned>(value: &Value, what: &str) -> Result<T> {
    T::deserialize(value).map_err(|e| BridgeError::Decode(format!("{}: {}", what, e)))
}

/// Decode the `values` array of a paginated source control response
pub(crate) fn decode_page<T: DeserializeOwned>(value: &Value, what: &str) -> Result<Vec<T>> {
    let page: Page<T> = decode(value, what)?;
    Ok(page.values)
}

#[derive(Debug, Deserialize)]
struct Page<T> {
    #[serde(default = "Vec::new")]
    values: Vec<T>,
}

/// `{"name": ...}` objects used all over both APIs
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Named {
    pub name: Option<String>,
}

/// Treat empty strings like absent ones
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_page_missing_values() {
        let values: Vec<Branch> = decode_page(&json!({}), "branches").unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn test_decode_error_is_labelled() {
        let err = decode::<Vec<String>>(&json!({"fields": {}}), "issue").unwrap_err();
        assert!(matches!(err, BridgeError::Decode(_)));
        assert!(err.to_string().contains("issue"));
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("x".into())), Some("x".to_string()));
        assert_eq!(non_empty(Some("  ".into())), None);
        assert_eq!(non_empty(None), None);
    }
}
