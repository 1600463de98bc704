//! Issue tracker records

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use serde_json::Value;

use super::{Named, decode, non_empty};
use crate::error::Result;

/// Rendered in place of an absent assignee
pub const UNASSIGNED: &str = "Unassigned";

/// A single issue
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub key: String,
    pub summary: String,
    pub status: String,
    pub assignee: Option<String>,
    /// Plain text; empty when the issue has none
    pub description: String,
    pub priority: Option<String>,
    pub issue_type: Option<String>,
    pub created: Option<DateTime<FixedOffset>>,
    pub updated: Option<DateTime<FixedOffset>>,
}

impl Issue {
    pub fn from_value(value: &Value) -> Result<Self> {
        let raw: RawIssue = decode(value, "issue")?;
        Ok(raw.into())
    }

    pub fn assignee_name(&self) -> &str {
        self.assignee.as_deref().unwrap_or(UNASSIGNED)
    }
}

/// Result of a JQL search
#[derive(Debug, Clone, PartialEq)]
pub struct IssueSearch {
    /// Total matches reported by the server (may exceed `issues.len()`)
    pub total: u64,
    pub issues: Vec<Issue>,
}

impl IssueSearch {
    pub fn from_value(value: &Value) -> Result<Self> {
        let raw: RawSearch = decode(value, "search result")?;
        let issues: Vec<Issue> = raw.issues.into_iter().map(Issue::from).collect();
        Ok(Self {
            total: raw.total.unwrap_or(issues.len() as u64),
            issues,
        })
    }
}

/// A workflow transition available on an issue
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Transition {
    pub id: String,
    pub name: String,
}

impl Transition {
    pub fn list_from_value(value: &Value) -> Result<Vec<Self>> {
        let raw: RawTransitions = decode(value, "transitions")?;
        Ok(raw.transitions)
    }
}

#[derive(Debug, Deserialize)]
struct RawSearch {
    total: Option<u64>,
    #[serde(default)]
    issues: Vec<RawIssue>,
}

#[derive(Debug, Deserialize)]
struct RawTransitions {
    #[serde(default)]
    transitions: Vec<Transition>,
}

#[derive(Debug, Deserialize)]
struct RawIssue {
    key: String,
    #[serde(default)]
    fields: RawFields,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawFields {
    summary: Option<String>,
    status: Option<Named>,
    assignee: Option<RawUser>,
    description: Option<Value>,
    priority: Option<Named>,
    #[serde(rename = "issuetype")]
    issue_type: Option<Named>,
    created: Option<String>,
    updated: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawUser {
    display_name: Option<String>,
    account_id: Option<String>,
}

impl From<RawIssue> for Issue {
    fn from(raw: RawIssue) -> Self {
        let fields = raw.fields;
        Self {
            key: raw.key,
            summary: fields.summary.unwrap_or_default(),
            status: fields
                .status
                .and_then(|s| s.name)
                .unwrap_or_else(|| "Unknown".to_string()),
            assignee: fields
                .assignee
                .and_then(|a| non_empty(a.display_name).or(a.account_id)),
            description: fields.description.as_ref().map(plain_text).unwrap_or_default(),
            priority: fields.priority.and_then(|p| p.name),
            issue_type: fields.issue_type.and_then(|t| t.name),
            created: fields.created.as_deref().and_then(parse_timestamp),
            updated: fields.updated.as_deref().and_then(parse_timestamp),
        }
    }
}

/// Jira timestamps look like `2024-03-01T10:15:30.000+0000`
pub fn parse_timestamp(s: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z")
        .or_else(|_| DateTime::parse_from_rfc3339(s))
        .ok()
}

/// Flatten a description: v2 returns a string, v3 a document tree
fn plain_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(_) => {
            let mut out = String::new();
            collect_text(value, &mut out);
            out.trim().to_string()
        }
        _ => String::new(),
    }
}

fn collect_text(node: &Value, out: &mut String) {
    if let Some(text) = node.get("text").and_then(Value::as_str) {
        out.push_str(text);
    }
    if let Some(children) = node.get("content").and_then(Value::as_array) {
        for child in children {
            collect_text(child, out);
        }
        if node.get("type").and_then(Value::as_str) == Some("paragraph") {
            out.push('\n');
        }
    }
}
