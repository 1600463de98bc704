//! Tool catalog - the building blocks tool sets are composed from

use super::{
    AddCommentTool, AssignIssueTool, CreateIssueTool, CreatePullRequestTool, ExtractReferencesTool, GetCommitsTool,
    GetIssueTool, GetRepositoryTool, ListBranchesTool, ListPullRequestsTool, ListRepositoriesTool,
    SearchCrossReferencesTool, SearchIssuesTool, Tool, TransitionIssueTool, UpdateIssueTool,
};

/// Issue tracker tools, in listing order
pub fn jira_tools() -> Vec<Box<dyn Tool>> {
    vec![
        Box::new(SearchIssuesTool),
        Box::new(GetIssueTool),
        Box::new(CreateIssueTool),
        Box::new(UpdateIssueTool),
        Box::new(TransitionIssueTool),
        Box::new(AddCommentTool),
        Box::new(AssignIssueTool),
    ]
}

/// Source control tools, in listing order
pub fn bitbucket_tools() -> Vec<Box<dyn Tool>> {
    vec![
        Box::new(ListRepositoriesTool),
        Box::new(GetRepositoryTool),
        Box::new(ListPullRequestsTool),
        Box::new(CreatePullRequestTool),
        Box::new(ListBranchesTool),
        Box::new(GetCommitsTool),
    ]
}

/// Tools spanning both services
pub fn cross_reference_tools() -> Vec<Box<dyn Tool>> {
    vec![Box::new(SearchCrossReferencesTool), Box::new(ExtractReferencesTool)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_names_unique() {
        let all: Vec<Box<dyn Tool>> = jira_tools()
            .into_iter()
            .chain(bitbucket_tools())
            .chain(cross_reference_tools())
            .collect();
        let names: HashSet<&str> = all.iter().map(|t| t.name()).collect();
        assert_eq!(names.len(), all.len());
        assert_eq!(all.len(), 15);
    }

    #[test]
    fn test_every_schema_lists_required_properties() {
        for tool in jira_tools().iter().chain(bitbucket_tools().iter()).chain(cross_reference_tools().iter()) {
            let schema = tool.input_schema().to_json();
            for name in schema["required"].as_array().unwrap() {
                let name = name.as_str().unwrap();
                assert!(
                    schema["properties"].get(name).is_some(),
                    "{} requires undeclared {}",
                    tool.name(),
                    name
                );
            }
        }
    }
}
