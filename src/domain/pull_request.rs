//! Pull requests

use serde::Deserialize;
use serde_json::Value;

use super::{Named, UNKNOWN, decode, decode_page, non_empty};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct PullRequest {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub source_branch: String,
    pub destination_branch: String,
    pub description: String,
    pub state: String,
}

impl PullRequest {
    pub fn from_value(value: &Value) -> Result<Self> {
        let raw: RawPullRequest = decode(value, "pull request")?;
        Ok(raw.into())
    }

    pub fn page_from_value(value: &Value) -> Result<Vec<Self>> {
        let raw: Vec<RawPullRequest> = decode_page(value, "pull requests")?;
        Ok(raw.into_iter().map(Self::from).collect())
    }

    /// Title and description joined the way cross-reference matching reads them
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}

#[derive(Debug, Deserialize)]
struct RawPullRequest {
    id: u64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    author: Option<RawAuthor>,
    #[serde(default)]
    source: Option<RawEndpoint>,
    #[serde(default)]
    destination: Option<RawEndpoint>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    state: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawAuthor {
    display_name: Option<String>,
    nickname: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawEndpoint {
    branch: Option<Named>,
}

impl RawEndpoint {
    fn branch_name(endpoint: Option<Self>) -> String {
        endpoint
            .and_then(|e| e.branch)
            .and_then(|b| b.name)
            .unwrap_or_default()
    }
}

impl From<RawPullRequest> for PullRequest {
    fn from(raw: RawPullRequest) -> Self {
        Self {
            id: raw.id,
            title: raw.title,
            author: raw
                .author
                .and_then(|a| non_empty(a.display_name).or(non_empty(a.nickname)))
                .unwrap_or_else(|| UNKNOWN.to_string()),
            source_branch: RawEndpoint::branch_name(raw.source),
            destination_branch: RawEndpoint::branch_name(raw.destination),
            description: raw.description.unwrap_or_default(),
            state: raw.state.unwrap_or_else(|| "OPEN".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pull_request_decode() {
        let pr = PullRequest::from_value(&json!({
            "id": 12,
            "title": "SCRUM-5: add retries",
            "author": {"display_name": "Grace Hopper"},
            "source": {"branch": {"name": "feature/retries"}},
            "destination": {"branch": {"name": "main"}},
            "description": "Adds backoff",
            "state": "MERGED"
        }))
        .unwrap();

        assert_eq!(pr.id, 12);
        assert_eq!(pr.author, "Grace Hopper");
        assert_eq!(pr.source_branch, "feature/retries");
        assert_eq!(pr.destination_branch, "main");
        assert_eq!(pr.state, "MERGED");
        assert_eq!(pr.searchable_text(), "SCRUM-5: add retries Adds backoff");
    }

    #[test]
    fn test_pull_request_fallbacks() {
        let pr = PullRequest::from_value(&json!({"id": 3, "title": "x", "description": null})).unwrap();
        assert_eq!(pr.author, UNKNOWN);
        assert_eq!(pr.description, "");
        assert_eq!(pr.source_branch, "");
        assert_eq!(pr.searchable_text(), "x ");
    }

    #[test]
    fn test_pull_request_requires_id() {
        assert!(PullRequest::from_value(&json!({"title": "no id"})).is_err());
    }
}
