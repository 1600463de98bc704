//! Cross-reference tools

use async_trait::async_trait;

use super::{Arguments, InputSchema, ParamType, Tool, ToolContext};
use crate::crossref::{extract_issue_references, extract_repo_references, resolve_cross_references};
use crate::error::Result;
use crate::format;

pub struct SearchCrossReferencesTool;

#[async_trait]
impl Tool for SearchCrossReferencesTool {
    fn name(&self) -> &'static str {
        "search_cross_references"
    }

    fn description(&self) -> &'static str {
        "Find pull requests across the workspace whose title or description mention a Jira issue"
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new()
            .required("jira_issue_key", ParamType::String, "Issue key (e.g. PROJ-123)")
            .optional("workspace", ParamType::String, "Workspace (default: configured workspace)")
    }

    fn action(&self) -> &'static str {
        "finding cross-references"
    }

    async fn execute(&self, args: Arguments, ctx: &ToolContext) -> Result<String> {
        let workspace = ctx.workspace(&args)?;
        let report = resolve_cross_references(ctx.gateway(), workspace, args.str("jira_issue_key")?).await?;
        Ok(format::cross_references(&report))
    }
}

pub struct ExtractReferencesTool;

#[async_trait]
impl Tool for ExtractReferencesTool {
    fn name(&self) -> &'static str {
        "extract_references"
    }

    fn description(&self) -> &'static str {
        "Extract issue keys and repository-like names from free text (heuristic, may over-match hyphenated words)"
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new().required("text", ParamType::String, "Text to scan")
    }

    fn action(&self) -> &'static str {
        "extracting references"
    }

    async fn execute(&self, args: Arguments, _ctx: &ToolContext) -> Result<String> {
        let text = args.str("text")?;
        Ok(format::extracted_references(
            &extract_issue_references(text),
            &extract_repo_references(text),
        ))
    }
}
