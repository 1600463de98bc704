//! Result Formatter
//!
//! Deterministic text templates for tool results. Listings always state a
//! count, empty listings render a fixed sentence, and cross-reference
//! annotations are appended as bracketed suffixes only when non-empty.

mod bitbucket;
mod crossref;
mod jira;

pub use bitbucket::{branches, commits, created_pull_request, pull_requests, repositories, repository_detail};
pub use crossref::{NO_RELATED_PULL_REQUESTS, cross_references, extracted_references};
pub use jira::{
    assigned, comment_added, created_issue, issue_detail, issue_search, no_fields_to_update,
    transition_not_found, transitioned, updated_issue,
};

use std::collections::BTreeSet;
use std::fmt::Display;

/// Bullet used for every listed item
pub const BULLET: &str = "\u{2022}";

/// Arrow between source and destination branches
pub const ARROW: &str = "\u{2192}";

/// ` [label: a, b]`, or nothing when `refs` is empty
pub fn annotation(label: &str, refs: &BTreeSet<String>) -> String {
    if refs.is_empty() {
        return String::new();
    }
    let joined: Vec<&str> = refs.iter().map(String::as_str).collect();
    format!(" [{}: {}]", label, joined.join(", "))
}

/// `Found N noun:` header followed by a blank line and one entry per line
pub fn listing(header: String, entries: &[String]) -> String {
    format!("{}\n\n{}", header, entries.join("\n"))
}

/// Text for a failed tool call
pub fn error(action: &str, err: impl Display) -> String {
    format!("Error {}: {}", action, err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_omitted_when_empty() {
        assert_eq!(annotation("issues", &BTreeSet::new()), "");
    }

    #[test]
    fn test_annotation_sorted() {
        let refs: BTreeSet<String> = ["PROJ-2", "ABC-1"].iter().map(|s| s.to_string()).collect();
        assert_eq!(annotation("issues", &refs), " [issues: ABC-1, PROJ-2]");
    }

    #[test]
    fn test_error_text() {
        assert_eq!(error("searching issues", "boom"), "Error searching issues: boom");
    }
}
