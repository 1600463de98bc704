//! Source control tools
//!
//! Every tool accepts an optional `workspace` that overrides the configured one.

use async_trait::async_trait;
use serde_json::json;

use super::{Arguments, InputSchema, ParamType, Tool, ToolContext};
use crate::api::{BitbucketApi, NewPullRequest};
use crate::error::Result;
use crate::format;

const REPO_DESCRIPTION: &str = "Repository name or slug";
const WORKSPACE_DESCRIPTION: &str = "Workspace (default: configured workspace)";
const LIMIT_DESCRIPTION: &str = "Maximum number of results";

fn schema() -> InputSchema {
    InputSchema::new().optional("workspace", ParamType::String, WORKSPACE_DESCRIPTION)
}

fn api<'a>(ctx: &'a ToolContext, args: &'a Arguments) -> Result<BitbucketApi<'a>> {
    Ok(BitbucketApi::new(ctx.gateway(), ctx.workspace(args)?))
}

pub struct ListRepositoriesTool;

#[async_trait]
impl Tool for ListRepositoriesTool {
    fn name(&self) -> &'static str {
        "list_bitbucket_repositories"
    }

    fn description(&self) -> &'static str {
        "List Bitbucket repositories in a workspace, annotated with issue keys found in their descriptions"
    }

    fn input_schema(&self) -> InputSchema {
        schema().defaulted("limit", ParamType::Integer, LIMIT_DESCRIPTION, json!(10))
    }

    fn action(&self) -> &'static str {
        "listing repositories"
    }

    async fn execute(&self, args: Arguments, ctx: &ToolContext) -> Result<String> {
        let repos = api(ctx, &args)?.repositories(args.u64("limit")?).await?;
        Ok(format::repositories(&repos))
    }
}

pub struct GetRepositoryTool;

#[async_trait]
impl Tool for GetRepositoryTool {
    fn name(&self) -> &'static str {
        "get_bitbucket_repository"
    }

    fn description(&self) -> &'static str {
        "Get details of a Bitbucket repository"
    }

    fn input_schema(&self) -> InputSchema {
        schema().required("repo_name", ParamType::String, REPO_DESCRIPTION)
    }

    fn action(&self) -> &'static str {
        "getting repository"
    }

    async fn execute(&self, args: Arguments, ctx: &ToolContext) -> Result<String> {
        let repo = api(ctx, &args)?.repository(args.str("repo_name")?).await?;
        Ok(format::repository_detail(&repo))
    }
}

pub struct ListPullRequestsTool;

#[async_trait]
impl Tool for ListPullRequestsTool {
    fn name(&self) -> &'static str {
        "list_pull_requests"
    }

    fn description(&self) -> &'static str {
        "List pull requests in a repository, annotated with referenced issue keys"
    }

    fn input_schema(&self) -> InputSchema {
        schema()
            .required("repo_name", ParamType::String, REPO_DESCRIPTION)
            .defaulted("state", ParamType::String, "PR state (OPEN, MERGED, DECLINED)", json!("OPEN"))
            .defaulted("limit", ParamType::Integer, LIMIT_DESCRIPTION, json!(10))
    }

    fn action(&self) -> &'static str {
        "listing pull requests"
    }

    async fn execute(&self, args: Arguments, ctx: &ToolContext) -> Result<String> {
        let repo = args.str("repo_name")?;
        let state = args.str("state")?.to_uppercase();
        let prs = api(ctx, &args)?
            .pull_requests(repo, Some(state.as_str()), args.u64("limit")?)
            .await?;
        Ok(format::pull_requests(repo, &state, &prs))
    }
}

pub struct CreatePullRequestTool;

#[async_trait]
impl Tool for CreatePullRequestTool {
    fn name(&self) -> &'static str {
        "create_pull_request"
    }

    fn description(&self) -> &'static str {
        "Create a pull request, optionally linking it to an issue"
    }

    fn input_schema(&self) -> InputSchema {
        schema()
            .required("repo_name", ParamType::String, REPO_DESCRIPTION)
            .required("title", ParamType::String, "Pull request title")
            .required("source_branch", ParamType::String, "Source branch")
            .defaulted("dest_branch", ParamType::String, "Destination branch", json!("main"))
            .defaulted("description", ParamType::String, "Pull request description", json!(""))
            .optional("jira_issue", ParamType::String, "Related issue key (e.g. PROJ-123)")
    }

    fn action(&self) -> &'static str {
        "creating pull request"
    }

    async fn execute(&self, args: Arguments, ctx: &ToolContext) -> Result<String> {
        let issue_key = args.opt_str("jira_issue");
        let mut description = args.opt_str("description").unwrap_or("").to_string();
        if let Some(key) = issue_key {
            description.push_str(&format!("\n\nResolves: {}", key));
        }

        let pr = NewPullRequest {
            title: args.str("title")?.to_string(),
            description,
            source_branch: args.str("source_branch")?.to_string(),
            destination_branch: args.str("dest_branch")?.to_string(),
        };

        let id = api(ctx, &args)?
            .create_pull_request(args.str("repo_name")?, &pr)
            .await?;
        log::info!("Created pull request #{}", id);
        Ok(format::created_pull_request(
            id,
            &pr.title,
            &pr.source_branch,
            &pr.destination_branch,
            issue_key,
        ))
    }
}

pub struct ListBranchesTool;

#[async_trait]
impl Tool for ListBranchesTool {
    fn name(&self) -> &'static str {
        "list_branches"
    }

    fn description(&self) -> &'static str {
        "List branches in a repository"
    }

    fn input_schema(&self) -> InputSchema {
        schema()
            .required("repo_name", ParamType::String, REPO_DESCRIPTION)
            .defaulted("limit", ParamType::Integer, LIMIT_DESCRIPTION, json!(10))
    }

    fn action(&self) -> &'static str {
        "listing branches"
    }

    async fn execute(&self, args: Arguments, ctx: &ToolContext) -> Result<String> {
        let repo = args.str("repo_name")?;
        let branches = api(ctx, &args)?.branches(repo, args.u64("limit")?).await?;
        Ok(format::branches(repo, &branches))
    }
}

pub struct GetCommitsTool;

#[async_trait]
impl Tool for GetCommitsTool {
    fn name(&self) -> &'static str {
        "get_commits"
    }

    fn description(&self) -> &'static str {
        "Get recent commits on a branch, annotated with referenced issue keys"
    }

    fn input_schema(&self) -> InputSchema {
        schema()
            .required("repo_name", ParamType::String, REPO_DESCRIPTION)
            .defaulted("branch", ParamType::String, "Branch name", json!("main"))
            .defaulted("limit", ParamType::Integer, LIMIT_DESCRIPTION, json!(10))
    }

    fn action(&self) -> &'static str {
        "getting commits"
    }

    async fn execute(&self, args: Arguments, ctx: &ToolContext) -> Result<String> {
        let repo = args.str("repo_name")?;
        let branch = args.str("branch")?;
        let commits = api(ctx, &args)?.commits(repo, branch, args.u64("limit")?).await?;
        Ok(format::commits(repo, branch, &commits))
    }
}
