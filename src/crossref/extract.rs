//! Identifier extraction from free text
//!
//! Both extractors are pattern heuristics. They will miss identifiers written
//! in unusual forms and the repository pattern accepts any hyphenated or
//! slash-joined token (e.g. "follow-up"), so results are hints for a reader,
//! never authoritative links.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

fn issue_key_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b[A-Z]{2,10}-\d+\b").expect("issue key regex must compile"))
}

fn repo_ref_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(?:[\w-]+/)?[\w-]+(?:\.git)?\b").expect("repository regex must compile")
    })
}

/// Issue keys such as `PROJ-123`: 2-10 uppercase letters, a hyphen, digits
pub fn extract_issue_references(text: &str) -> BTreeSet<String> {
    issue_key_re()
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Repository-like tokens (`repo-name`, `workspace/repo`, `repo.git`)
///
/// Only tokens containing a hyphen or a slash are kept, which filters plain
/// words but not hyphenated prose.
pub fn extract_repo_references(text: &str) -> BTreeSet<String> {
    repo_ref_re()
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|token| token.contains('-') || token.contains('/'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_issue_references_deduplicated() {
        let refs = extract_issue_references("PROJ-1 has a fix, see PROJ-1 again");
        assert_eq!(refs, set(&["PROJ-1"]));
    }

    #[test]
    fn test_issue_references_multiple() {
        let refs = extract_issue_references("Fixes ABC-12 and SCRUM-5; relates to ABC-12.");
        assert_eq!(refs, set(&["ABC-12", "SCRUM-5"]));
    }

    #[test]
    fn test_issue_references_rejects_near_misses() {
        assert!(extract_issue_references("A-1 lowercase-12 proj-3 TOOLONGPREFIX-1 PROJ-").is_empty());
        assert!(extract_issue_references("").is_empty());
    }

    #[test]
    fn test_issue_references_idempotent() {
        let first = extract_issue_references("See PROJ-1, OPS-22 and PROJ-1");
        let rendered = first.iter().cloned().collect::<Vec<_>>().join(" ");
        assert_eq!(extract_issue_references(&rendered), first);
    }

    #[test]
    fn test_repo_references() {
        let refs = extract_repo_references("Code lives in acme/auth-service and billing-api.git");
        assert!(refs.contains("acme/auth-service"));
        assert!(refs.contains("billing-api.git"));
        assert!(!refs.iter().any(|r| r == "Code" || r == "lives"));
    }

    #[test]
    fn test_repo_references_over_match_hyphenated_words() {
        let refs = extract_repo_references("a follow-up task");
        assert_eq!(refs, set(&["follow-up"]));
    }

    #[test]
    fn test_repo_references_plain_text() {
        assert!(extract_repo_references("nothing to see here").is_empty());
        assert!(extract_repo_references("").is_empty());
    }
}
