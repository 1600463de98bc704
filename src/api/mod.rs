//! Typed service facades over the request gateway
//!
//! Each facade knows its endpoint paths and query parameters and decodes
//! responses into `domain` types.

mod bitbucket;
mod jira;

pub use bitbucket::{BitbucketApi, NewPullRequest};
pub use jira::{JiraApi, NewIssue};
