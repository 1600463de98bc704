//! Tool Registry - tool definitions, handlers, and routing
//!
//! Each tool pairs a name and input schema with an async handler. The
//! registry validates arguments against the schema before a handler runs and
//! turns every handler failure into error content.

mod bitbucket;
mod catalog;
mod context;
mod cross_reference;
mod definition;
mod jira;
mod router;

pub use bitbucket::{
    CreatePullRequestTool, GetCommitsTool, GetRepositoryTool, ListBranchesTool, ListPullRequestsTool,
    ListRepositoriesTool,
};
pub use catalog::{bitbucket_tools, cross_reference_tools, jira_tools};
pub use context::ToolContext;
pub use cross_reference::{ExtractReferencesTool, SearchCrossReferencesTool};
pub use definition::{Arguments, InputSchema, ParamType, ToolDefinition};
pub use jira::{
    AddCommentTool, AssignIssueTool, CreateIssueTool, GetIssueTool, SearchIssuesTool, TransitionIssueTool,
    UpdateIssueTool,
};
pub use router::ToolRegistry;

use async_trait::async_trait;

use crate::error::Result;

/// A named operation exposed to the calling assistant
#[async_trait]
pub trait Tool: Send + Sync {
    /// Globally unique tool name
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn input_schema(&self) -> InputSchema;

    /// Gerund phrase for failure text, e.g. "searching issues"
    fn action(&self) -> &'static str;

    /// Run with validated arguments, returning the rendered result
    async fn execute(&self, args: Arguments, ctx: &ToolContext) -> Result<String>;

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema().to_json(),
        }
    }
}

/// Result from tool execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResult {
    pub content: String,
    pub is_error: bool,
}

impl ToolResult {
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: true,
        }
    }
}
