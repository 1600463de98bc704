//! Issue -> pull request correlation across a workspace

use crate::api::{BitbucketApi, JiraApi};
use crate::error::Result;
use crate::gateway::Gateway;

/// Page size for both the repository listing and each pull request listing
pub const SCAN_PAGE_LIMIT: u64 = 50;

/// A pull request whose title or description mentions the issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestMatch {
    pub repository: String,
    pub id: u64,
    pub title: String,
}

/// Outcome of a cross-reference scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossReferenceReport {
    pub issue_key: String,
    pub issue_summary: String,
    pub repositories_scanned: usize,
    pub matches: Vec<PullRequestMatch>,
    /// Repositories whose pull requests could not be fetched
    pub skipped_repositories: Vec<String>,
    /// Set when the repository listing itself failed
    pub listing_error: Option<String>,
}

impl CrossReferenceReport {
    pub fn has_matches(&self) -> bool {
        !self.matches.is_empty()
    }
}

/// Find pull requests in `workspace` that mention `issue_key`
///
/// Only failure to fetch the issue is an error. A repository whose pull
/// requests cannot be read is skipped, and a failed repository listing yields
/// an empty scan with `listing_error` set. Calls are made one at a time.
pub async fn resolve_cross_references(
    gateway: &dyn Gateway,
    workspace: &str,
    issue_key: &str,
) -> Result<CrossReferenceReport> {
    let issue = JiraApi::new(gateway).issue(issue_key).await?;

    let mut report = CrossReferenceReport {
        issue_key: issue_key.to_string(),
        issue_summary: issue.summary,
        repositories_scanned: 0,
        matches: Vec::new(),
        skipped_repositories: Vec::new(),
        listing_error: None,
    };

    let bitbucket = BitbucketApi::new(gateway, workspace);
    let repositories = match bitbucket.repositories(SCAN_PAGE_LIMIT).await {
        Ok(repositories) => repositories,
        Err(e) => {
            log::warn!("Cannot list repositories in {}: {}", workspace, e);
            report.listing_error = Some(e.to_string());
            return Ok(report);
        }
    };

    for repo in &repositories {
        let pull_requests = match bitbucket
            .pull_requests(repo.path_segment(), None, SCAN_PAGE_LIMIT)
            .await
        {
            Ok(prs) => prs,
            Err(e) => {
                log::warn!("Skipping repository {}: {}", repo.name, e);
                report.skipped_repositories.push(repo.name.clone());
                continue;
            }
        };
        report.repositories_scanned += 1;

        report.matches.extend(
            pull_requests
                .into_iter()
                .filter(|pr| pr.searchable_text().contains(issue_key))
                .map(|pr| PullRequestMatch {
                    repository: repo.name.clone(),
                    id: pr.id,
                    title: pr.title,
                }),
        );
    }

    log::info!(
        "Cross-reference scan for {}: {} match(es) across {} repositories, {} skipped",
        issue_key,
        report.matches.len(),
        report.repositories_scanned,
        report.skipped_repositories.len()
    );

    Ok(report)
}
