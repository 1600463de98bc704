use super::{ARROW, BULLET, annotation, listing};
use crate::crossref::extract_issue_references;
use crate::domain::{Branch, Commit, PullRequest, Repository};

pub fn repositories(repos: &[Repository]) -> String {
    if repos.is_empty() {
        return "No repositories found in workspace.".to_string();
    }

    let entries: Vec<String> = repos
        .iter()
        .map(|repo| {
            format!(
                "{} {} ({}) - {}{}",
                BULLET,
                repo.name,
                repo.language,
                repo.visibility(),
                annotation("issues", &extract_issue_references(&repo.description))
            )
        })
        .collect();

    listing(format!("Found {} repository(ies):", entries.len()), &entries)
}

pub fn repository_detail(repo: &Repository) -> String {
    let mut lines = vec![
        format!("Repository: {}", repo.full_name),
        format!("Name: {}", repo.name),
        format!("Language: {}", repo.language),
        format!("Visibility: {}", repo.visibility()),
    ];
    if let Some(branch) = &repo.main_branch {
        lines.push(format!("Main branch: {}", branch));
    }
    if !repo.description.is_empty() {
        lines.push(format!(
            "Description: {}{}",
            repo.description,
            annotation("issues", &extract_issue_references(&repo.description))
        ));
    }
    lines.join("\n")
}

pub fn pull_requests(repo_name: &str, state: &str, prs: &[PullRequest]) -> String {
    let state = state.to_lowercase();
    if prs.is_empty() {
        return format!("No {} pull requests found in {}.", state, repo_name);
    }

    let entries: Vec<String> = prs
        .iter()
        .map(|pr| {
            format!(
                "{} PR #{}: {}\n  {} {} {} by {}{}",
                BULLET,
                pr.id,
                pr.title,
                pr.source_branch,
                ARROW,
                pr.destination_branch,
                pr.author,
                annotation("issues", &extract_issue_references(&pr.searchable_text()))
            )
        })
        .collect();

    listing(
        format!("Found {} {} pull request(s) in {}:", entries.len(), state, repo_name),
        &entries,
    )
}

pub fn created_pull_request(id: u64, title: &str, source: &str, destination: &str, issue_key: Option<&str>) -> String {
    let mut text = format!(
        "Created pull request: #{}\nTitle: {}\n{} {} {}",
        id, title, source, ARROW, destination
    );
    if let Some(key) = issue_key {
        text.push_str(&format!("\nLinked to issue: {}", key));
    }
    text
}

pub fn branches(repo_name: &str, branches: &[Branch]) -> String {
    if branches.is_empty() {
        return format!("No branches found in {}.", repo_name);
    }

    let entries: Vec<String> = branches
        .iter()
        .map(|branch| {
            if branch.is_primary() {
                format!("{} {} (primary)", BULLET, branch.name)
            } else {
                format!("{} {}", BULLET, branch.name)
            }
        })
        .collect();

    listing(format!("Found {} branch(es) in {}:", entries.len(), repo_name), &entries)
}

pub fn commits(repo_name: &str, branch: &str, commits: &[Commit]) -> String {
    if commits.is_empty() {
        return format!("No commits found in {}/{}.", repo_name, branch);
    }

    let entries: Vec<String> = commits
        .iter()
        .map(|commit| {
            format!(
                "{} {}: {} - {}{}",
                BULLET,
                commit.short_hash(),
                commit.headline(),
                commit.author,
                annotation("issues", &extract_issue_references(&commit.message))
            )
        })
        .collect();

    listing(
        format!("Found {} commit(s) in {}/{}:", entries.len(), repo_name, branch),
        &entries,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(name: &str, description: &str) -> Repository {
        Repository {
            name: name.to_string(),
            full_name: format!("acme/{}", name),
            slug: None,
            is_private: true,
            language: "rust".to_string(),
            description: description.to_string(),
            main_branch: None,
        }
    }

    #[test]
    fn test_repositories() {
        assert_eq!(repositories(&[]), "No repositories found in workspace.");

        let text = repositories(&[repo("api", "Tracks PROJ-1"), repo("web", "")]);
        assert_eq!(
            text,
            "Found 2 repository(ies):\n\n\
             \u{2022} api (rust) - Private [issues: PROJ-1]\n\
             \u{2022} web (rust) - Private"
        );
    }

    #[test]
    fn test_pull_requests() {
        assert_eq!(pull_requests("api", "OPEN", &[]), "No open pull requests found in api.");

        let pr = PullRequest {
            id: 4,
            title: "SCRUM-5 retries".to_string(),
            author: "Grace".to_string(),
            source_branch: "feature/retries".to_string(),
            destination_branch: "main".to_string(),
            description: String::new(),
            state: "OPEN".to_string(),
        };
        assert_eq!(
            pull_requests("api", "OPEN", &[pr]),
            "Found 1 open pull request(s) in api:\n\n\
             \u{2022} PR #4: SCRUM-5 retries\n  feature/retries \u{2192} main by Grace [issues: SCRUM-5]"
        );
    }

    #[test]
    fn test_branches() {
        assert_eq!(branches("api", &[]), "No branches found in api.");
        let text = branches(
            "api",
            &[Branch { name: "main".into() }, Branch { name: "feature/x".into() }],
        );
        assert_eq!(text, "Found 2 branch(es) in api:\n\n\u{2022} main (primary)\n\u{2022} feature/x");
    }

    #[test]
    fn test_commits() {
        assert_eq!(commits("api", "main", &[]), "No commits found in api/main.");
        let commit = Commit {
            hash: "0123456789".to_string(),
            message: "OPS-2 tidy\n\nbody".to_string(),
            author: "Ada".to_string(),
        };
        assert_eq!(
            commits("api", "main", &[commit]),
            "Found 1 commit(s) in api/main:\n\n\u{2022} 01234567: OPS-2 tidy - Ada [issues: OPS-2]"
        );
    }

    #[test]
    fn test_created_pull_request() {
        assert_eq!(
            created_pull_request(9, "Retries", "feature/r", "main", Some("SCRUM-5")),
            "Created pull request: #9\nTitle: Retries\nfeature/r \u{2192} main\nLinked to issue: SCRUM-5"
        );
    }
}
