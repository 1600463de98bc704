//! Cross-Reference Resolver
//!
//! Finds identifiers of one service embedded in text owned by the other:
//! - `extract`: issue keys and repository names in free text
//! - `resolver`: scan a workspace's pull requests for an issue key

mod extract;
mod resolver;

pub use extract::{extract_issue_references, extract_repo_references};
pub use resolver::{CrossReferenceReport, PullRequestMatch, SCAN_PAGE_LIMIT, resolve_cross_references};
