use std::collections::BTreeSet;

use super::BULLET;
use crate::crossref::CrossReferenceReport;

/// Sentence rendered when a scan finds nothing
pub const NO_RELATED_PULL_REQUESTS: &str = "No related pull requests found.";

pub fn cross_references(report: &CrossReferenceReport) -> String {
    let mut text = format!(
        "Cross-references for {}:\nIssue: {}\n\n",
        report.issue_key, report.issue_summary
    );

    if report.has_matches() {
        text.push_str(&format!("Found {} related pull request(s):\n", report.matches.len()));
        let entries: Vec<String> = report
            .matches
            .iter()
            .map(|m| format!("{} PR #{} in {}: {}", BULLET, m.id, m.repository, m.title))
            .collect();
        text.push_str(&entries.join("\n"));
    } else {
        text.push_str(NO_RELATED_PULL_REQUESTS);
    }

    if !report.skipped_repositories.is_empty() {
        text.push_str(&format!(
            "\n\nSkipped repositories: {}",
            report.skipped_repositories.join(", ")
        ));
    }
    if let Some(err) = &report.listing_error {
        text.push_str(&format!("\n\nRepository listing unavailable: {}", err));
    }
    text
}

pub fn extracted_references(issues: &BTreeSet<String>, repos: &BTreeSet<String>) -> String {
    let render = |set: &BTreeSet<String>| {
        if set.is_empty() {
            "none".to_string()
        } else {
            set.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
        }
    };
    format!(
        "Issue references ({}): {}\nRepository references ({}): {}",
        issues.len(),
        render(issues),
        repos.len(),
        render(repos)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crossref::PullRequestMatch;

    fn report(matches: Vec<PullRequestMatch>) -> CrossReferenceReport {
        CrossReferenceReport {
            issue_key: "SCRUM-5".to_string(),
            issue_summary: "Retry uploads".to_string(),
            repositories_scanned: 1,
            matches,
            skipped_repositories: vec![],
            listing_error: None,
        }
    }

    #[test]
    fn test_no_matches() {
        assert_eq!(
            cross_references(&report(vec![])),
            "Cross-references for SCRUM-5:\nIssue: Retry uploads\n\nNo related pull requests found."
        );
    }

    #[test]
    fn test_matches() {
        let text = cross_references(&report(vec![PullRequestMatch {
            repository: "api".to_string(),
            id: 7,
            title: "SCRUM-5 retries".to_string(),
        }]));
        assert!(text.ends_with("Found 1 related pull request(s):\n\u{2022} PR #7 in api: SCRUM-5 retries"));
    }

    #[test]
    fn test_matches_state_count() {
        let m = |id: u64| PullRequestMatch {
            repository: "api".to_string(),
            id,
            title: format!("SCRUM-5 part {}", id),
        };
        let text = cross_references(&report(vec![m(1), m(2)]));
        assert!(text.contains("Found 2 related pull request(s):\n\u{2022} PR #1 in api: SCRUM-5 part 1\n\u{2022} PR #2"));
    }

    #[test]
    fn test_skipped_repositories_listed() {
        let mut r = report(vec![]);
        r.skipped_repositories = vec!["secret".to_string()];
        assert!(cross_references(&r).ends_with("Skipped repositories: secret"));
    }

    #[test]
    fn test_extracted_references() {
        let issues: BTreeSet<String> = ["PROJ-1".to_string()].into_iter().collect();
        assert_eq!(
            extracted_references(&issues, &BTreeSet::new()),
            "Issue references (1): PROJ-1\nRepository references (0): none"
        );
    }
}
