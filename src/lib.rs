//! Atlassian MCP - Jira and Bitbucket tools over the Model Context Protocol
//!
//! A stdio tool server: newline-delimited JSON-RPC 2.0 requests come in on
//! stdin, each `tools/call` is routed to a Jira or Bitbucket REST call, and
//! the result goes back on stdout as human-readable text. Cross-reference
//! tools link Jira issue keys with Bitbucket pull requests.

pub mod api;
pub mod config;
pub mod crossref;
pub mod domain;
pub mod error;
pub mod format;
pub mod gateway;
pub mod protocol;
pub mod server;
pub mod tools;

pub use error::{BridgeError, Result};
