//! Issue tracker tools

use async_trait::async_trait;
use serde_json::{Map, Value, json};

use super::{Arguments, InputSchema, ParamType, Tool, ToolContext};
use crate::api::{JiraApi, NewIssue};
use crate::error::Result;
use crate::format;

const ISSUE_KEY_DESCRIPTION: &str = "Issue key (e.g. PROJ-123)";

pub struct SearchIssuesTool;

#[async_trait]
impl Tool for SearchIssuesTool {
    fn name(&self) -> &'static str {
        "search_jira_issues"
    }

    fn description(&self) -> &'static str {
        "Search Jira issues using JQL, annotating each with repository references found in its description"
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new()
            .required("jql", ParamType::String, "JQL query (e.g. project = PROJ AND status = Open)")
            .defaulted("max_results", ParamType::Integer, "Maximum number of issues", json!(10))
    }

    fn action(&self) -> &'static str {
        "searching issues"
    }

    async fn execute(&self, args: Arguments, ctx: &ToolContext) -> Result<String> {
        let search = JiraApi::new(ctx.gateway())
            .search(args.str("jql")?, args.u64("max_results")?)
            .await?;
        Ok(format::issue_search(&search))
    }
}

pub struct GetIssueTool;

#[async_trait]
impl Tool for GetIssueTool {
    fn name(&self) -> &'static str {
        "get_jira_issue"
    }

    fn description(&self) -> &'static str {
        "Get details of a Jira issue"
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new().required("issue_key", ParamType::String, ISSUE_KEY_DESCRIPTION)
    }

    fn action(&self) -> &'static str {
        "getting issue"
    }

    async fn execute(&self, args: Arguments, ctx: &ToolContext) -> Result<String> {
        let key = args.str("issue_key")?;
        let issue = JiraApi::new(ctx.gateway()).issue(key).await?;
        Ok(format::issue_detail(&issue, ctx.browse_url(&issue.key).as_deref()))
    }
}

pub struct CreateIssueTool;

impl CreateIssueTool {
    /// Append the repository/branch section to a description
    fn with_references(description: &str, repo: Option<&str>, branch: Option<&str>) -> String {
        if repo.is_none() && branch.is_none() {
            return description.to_string();
        }
        let mut text = format!("{}\n\n--- Bitbucket References ---\n", description);
        if let Some(repo) = repo {
            text.push_str(&format!("Repository: {}\n", repo));
        }
        if let Some(branch) = branch {
            text.push_str(&format!("Branch: {}\n", branch));
        }
        text
    }
}

#[async_trait]
impl Tool for CreateIssueTool {
    fn name(&self) -> &'static str {
        "create_jira_issue"
    }

    fn description(&self) -> &'static str {
        "Create a new Jira issue with optional Bitbucket repository and branch references"
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new()
            .required("project_key", ParamType::String, "Jira project key")
            .required("summary", ParamType::String, "Issue title")
            .defaulted("description", ParamType::String, "Issue description", json!(""))
            .defaulted("issue_type", ParamType::String, "Issue type (Task, Bug, Story, ...)", json!("Task"))
            .optional("bitbucket_repo", ParamType::String, "Related Bitbucket repository")
            .optional("branch", ParamType::String, "Related branch name")
    }

    fn action(&self) -> &'static str {
        "creating issue"
    }

    async fn execute(&self, args: Arguments, ctx: &ToolContext) -> Result<String> {
        let repo = args.opt_str("bitbucket_repo");
        let issue = NewIssue {
            project_key: args.str("project_key")?.to_string(),
            summary: args.str("summary")?.to_string(),
            description: Self::with_references(args.opt_str("description").unwrap_or(""), repo, args.opt_str("branch")),
            issue_type: args.str("issue_type")?.to_string(),
        };

        let key = JiraApi::new(ctx.gateway()).create_issue(&issue).await?;
        log::info!("Created issue {}", key);
        Ok(format::created_issue(
            &key,
            &issue.summary,
            &issue.issue_type,
            repo,
            ctx.browse_url(&key).as_deref(),
        ))
    }
}

pub struct UpdateIssueTool;

#[async_trait]
impl Tool for UpdateIssueTool {
    fn name(&self) -> &'static str {
        "update_jira_issue"
    }

    fn description(&self) -> &'static str {
        "Update the summary and/or description of a Jira issue"
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new()
            .required("issue_key", ParamType::String, ISSUE_KEY_DESCRIPTION)
            .optional("summary", ParamType::String, "New summary")
            .optional("description", ParamType::String, "New description")
    }

    fn action(&self) -> &'static str {
        "updating issue"
    }

    async fn execute(&self, args: Arguments, ctx: &ToolContext) -> Result<String> {
        let key = args.str("issue_key")?;

        let mut fields = Map::new();
        for name in ["summary", "description"] {
            if let Some(value) = args.opt_str(name) {
                fields.insert(name.to_string(), Value::String(value.to_string()));
            }
        }
        if fields.is_empty() {
            return Ok(format::no_fields_to_update());
        }

        let updated: Vec<&str> = fields.keys().map(String::as_str).collect();
        let text = format::updated_issue(key, &updated);
        JiraApi::new(ctx.gateway()).update_fields(key, fields).await?;
        Ok(text)
    }
}

pub struct TransitionIssueTool;

#[async_trait]
impl Tool for TransitionIssueTool {
    fn name(&self) -> &'static str {
        "transition_jira_issue"
    }

    fn description(&self) -> &'static str {
        "Move a Jira issue through a workflow transition (e.g. 'In Progress', 'Done')"
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new()
            .required("issue_key", ParamType::String, ISSUE_KEY_DESCRIPTION)
            .required("transition_name", ParamType::String, "Transition name, matched case-insensitively")
    }

    fn action(&self) -> &'static str {
        "transitioning issue"
    }

    async fn execute(&self, args: Arguments, ctx: &ToolContext) -> Result<String> {
        let key = args.str("issue_key")?;
        let wanted = args.str("transition_name")?;
        let api = JiraApi::new(ctx.gateway());

        let transitions = api.transitions(key).await?;
        let Some(transition) = transitions.iter().find(|t| t.name.eq_ignore_ascii_case(wanted)) else {
            return Ok(format::transition_not_found(wanted, &transitions));
        };

        api.transition(key, &transition.id).await?;
        Ok(format::transitioned(key, &transition.name))
    }
}

pub struct AddCommentTool;

#[async_trait]
impl Tool for AddCommentTool {
    fn name(&self) -> &'static str {
        "add_jira_comment"
    }

    fn description(&self) -> &'static str {
        "Add a comment to a Jira issue"
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new()
            .required("issue_key", ParamType::String, ISSUE_KEY_DESCRIPTION)
            .required("comment", ParamType::String, "Comment text")
    }

    fn action(&self) -> &'static str {
        "adding comment"
    }

    async fn execute(&self, args: Arguments, ctx: &ToolContext) -> Result<String> {
        let key = args.str("issue_key")?;
        JiraApi::new(ctx.gateway())
            .add_comment(key, args.str("comment")?)
            .await?;
        Ok(format::comment_added(key))
    }
}

pub struct AssignIssueTool;

#[async_trait]
impl Tool for AssignIssueTool {
    fn name(&self) -> &'static str {
        "assign_jira_issue"
    }

    fn description(&self) -> &'static str {
        "Assign a Jira issue to an account, or to the authenticated user when no account is given"
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new()
            .required("issue_key", ParamType::String, ISSUE_KEY_DESCRIPTION)
            .optional("account_id", ParamType::String, "Assignee account id (default: current user)")
    }

    fn action(&self) -> &'static str {
        "assigning issue"
    }

    async fn execute(&self, args: Arguments, ctx: &ToolContext) -> Result<String> {
        let key = args.str("issue_key")?;
        let api = JiraApi::new(ctx.gateway());

        let account_id = match args.opt_str("account_id") {
            Some(id) => id.to_string(),
            None => api.current_account_id().await?,
        };

        api.assign(key, &account_id).await?;
        Ok(format::assigned(key, &account_id))
    }
}
