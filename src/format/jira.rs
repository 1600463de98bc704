use super::{BULLET, annotation, listing};
use crate::crossref::extract_repo_references;
use crate::domain::{Issue, IssueSearch, Transition};

pub fn issue_search(search: &IssueSearch) -> String {
    if search.issues.is_empty() {
        return "No issues found matching the query.".to_string();
    }

    let entries: Vec<String> = search
        .issues
        .iter()
        .map(|issue| {
            format!(
                "{} {}: {} [{}] - {}{}",
                BULLET,
                issue.key,
                issue.summary,
                issue.status,
                issue.assignee_name(),
                annotation("repos", &extract_repo_references(&issue.description))
            )
        })
        .collect();

    let count = entries.len() as u64;
    let header = if search.total > count {
        format!("Found {} issue(s) ({} total):", count, search.total)
    } else {
        format!("Found {} issue(s):", count)
    };
    listing(header, &entries)
}

pub fn issue_detail(issue: &Issue, browse_url: Option<&str>) -> String {
    let mut lines = vec![
        format!("Issue: {}", issue.key),
        format!("Summary: {}", issue.summary),
        format!("Status: {}", issue.status),
        format!("Assignee: {}", issue.assignee_name()),
    ];
    if let Some(issue_type) = &issue.issue_type {
        lines.push(format!("Type: {}", issue_type));
    }
    if let Some(priority) = &issue.priority {
        lines.push(format!("Priority: {}", priority));
    }
    if let Some(created) = issue.created {
        lines.push(format!("Created: {}", created.format("%Y-%m-%d %H:%M")));
    }
    if let Some(updated) = issue.updated {
        lines.push(format!("Updated: {}", updated.format("%Y-%m-%d %H:%M")));
    }
    lines.push(format!(
        "Description: {}",
        if issue.description.is_empty() {
            "No description"
        } else {
            issue.description.as_str()
        }
    ));

    let repos = extract_repo_references(&issue.description);
    if !repos.is_empty() {
        let names: Vec<&str> = repos.iter().map(String::as_str).collect();
        lines.push(format!("Referenced repositories: {}", names.join(", ")));
    }
    if let Some(url) = browse_url {
        lines.push(format!("URL: {}", url));
    }
    lines.join("\n")
}

pub fn created_issue(key: &str, summary: &str, issue_type: &str, repo: Option<&str>, browse_url: Option<&str>) -> String {
    let mut text = format!("Created issue: {}\nTitle: {}\nType: {}", key, summary, issue_type);
    if let Some(repo) = repo {
        text.push_str(&format!("\nLinked to repository: {}", repo));
    }
    if let Some(url) = browse_url {
        text.push_str(&format!("\nURL: {}", url));
    }
    text
}

pub fn updated_issue(key: &str, fields: &[&str]) -> String {
    format!("Issue {} updated ({})", key, fields.join(", "))
}

pub fn no_fields_to_update() -> String {
    "No fields to update specified.".to_string()
}

pub fn transitioned(key: &str, transition_name: &str) -> String {
    format!("Issue {} transitioned to '{}'", key, transition_name)
}

pub fn transition_not_found(transition_name: &str, available: &[Transition]) -> String {
    if available.is_empty() {
        return format!("Transition '{}' not found. No transitions are available.", transition_name);
    }
    let names: Vec<&str> = available.iter().map(|t| t.name.as_str()).collect();
    format!(
        "Transition '{}' not found. Available transitions: {}",
        transition_name,
        names.join(", ")
    )
}

pub fn comment_added(key: &str) -> String {
    format!("Comment added to issue {}", key)
}

pub fn assigned(key: &str, account_id: &str) -> String {
    format!("Issue {} assigned to {}", key, account_id)
}
