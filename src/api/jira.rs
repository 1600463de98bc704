//! Issue tracker endpoints

use serde_json::{Value, json};

use crate::domain::{Issue, IssueSearch, Transition};
use crate::error::{BridgeError, Result};
use crate::gateway::{ApiRequest, Gateway, Service};

/// Fields for a new issue
#[derive(Debug, Clone, PartialEq)]
pub struct NewIssue {
    pub project_key: String,
    pub summary: String,
    pub description: String,
    pub issue_type: String,
}

/// Typed access to the Jira REST API
pub struct JiraApi<'a> {
    gateway: &'a dyn Gateway,
}

impl<'a> JiraApi<'a> {
    pub fn new(gateway: &'a dyn Gateway) -> Self {
        Self { gateway }
    }

    async fn send(&self, request: ApiRequest) -> Result<Value> {
        self.gateway.send(request).await
    }

    pub async fn search(&self, jql: &str, max_results: u64) -> Result<IssueSearch> {
        let request = ApiRequest::get(Service::Jira, "2/search")
            .query("jql", jql)
            .query("maxResults", max_results);
        IssueSearch::from_value(&self.send(request).await?)
    }

    pub async fn issue(&self, key: &str) -> Result<Issue> {
        let body = self
            .send(ApiRequest::get(Service::Jira, format!("2/issue/{}", key)))
            .await?;
        Issue::from_value(&body)
    }

    /// Create an issue, returning its key
    pub async fn create_issue(&self, issue: &NewIssue) -> Result<String> {
        let payload = json!({
            "fields": {
                "project": {"key": issue.project_key},
                "summary": issue.summary,
                "description": issue.description,
                "issuetype": {"name": issue.issue_type}
            }
        });
        let body = self
            .send(ApiRequest::post(Service::Jira, "2/issue", payload))
            .await?;

        body.get("key")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| BridgeError::Decode("created issue has no key".to_string()))
    }

    /// Replace the given fields on an issue
    pub async fn update_fields(&self, key: &str, fields: serde_json::Map<String, Value>) -> Result<()> {
        self.send(ApiRequest::put(
            Service::Jira,
            format!("2/issue/{}", key),
            json!({"fields": fields}),
        ))
        .await?;
        Ok(())
    }

    pub async fn transitions(&self, key: &str) -> Result<Vec<Transition>> {
        let body = self
            .send(ApiRequest::get(Service::Jira, format!("2/issue/{}/transitions", key)))
            .await?;
        Transition::list_from_value(&body)
    }

    pub async fn transition(&self, key: &str, transition_id: &str) -> Result<()> {
        self.send(ApiRequest::post(
            Service::Jira,
            format!("2/issue/{}/transitions", key),
            json!({"transition": {"id": transition_id}}),
        ))
        .await?;
        Ok(())
    }

    pub async fn add_comment(&self, key: &str, comment: &str) -> Result<()> {
        self.send(ApiRequest::post(
            Service::Jira,
            format!("2/issue/{}/comment", key),
            json!({"body": comment}),
        ))
        .await?;
        Ok(())
    }

    /// Account id of the authenticated user
    pub async fn current_account_id(&self) -> Result<String> {
        let body = self.send(ApiRequest::get(Service::Jira, "3/myself")).await?;
        body.get("accountId")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| BridgeError::Decode("current user has no accountId".to_string()))
    }

    pub async fn assign(&self, key: &str, account_id: &str) -> Result<()> {
        self.send(ApiRequest::put(
            Service::Jira,
            format!("3/issue/{}/assignee", key),
            json!({"accountId": account_id}),
        ))
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{HttpMethod, MockGateway};

    #[tokio::test]
    async fn test_search_encodes_query() {
        let gateway = MockGateway::new().on(
            Service::Jira,
            HttpMethod::Get,
            "2/search",
            json!({"total": 0, "issues": []}),
        );
        let api = JiraApi::new(&gateway);

        let result = api.search("project = PROJ AND status = \"To Do\"", 5).await.unwrap();
        assert!(result.issues.is_empty());

        let call = &gateway.calls()[0];
        assert_eq!(call.query_value("jql"), Some("project = PROJ AND status = \"To Do\""));
        assert_eq!(call.query_value("maxResults"), Some("5"));
    }

    #[tokio::test]
    async fn test_create_issue_payload() {
        let gateway = MockGateway::new().on(Service::Jira, HttpMethod::Post, "2/issue", json!({"key": "PROJ-9"}));
        let api = JiraApi::new(&gateway);

        let key = api
            .create_issue(&NewIssue {
                project_key: "PROJ".to_string(),
                summary: "New thing".to_string(),
                description: String::new(),
                issue_type: "Story".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(key, "PROJ-9");

        let body = gateway.calls()[0].body.clone().unwrap();
        assert_eq!(body["fields"]["project"]["key"], "PROJ");
        assert_eq!(body["fields"]["issuetype"]["name"], "Story");
    }

    #[tokio::test]
    async fn test_create_issue_without_key() {
        let gateway = MockGateway::new().on(Service::Jira, HttpMethod::Post, "2/issue", json!({}));
        let api = JiraApi::new(&gateway);
        let err = api
            .create_issue(&NewIssue {
                project_key: "PROJ".to_string(),
                summary: "x".to_string(),
                description: String::new(),
                issue_type: "Task".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::Decode(_)));
    }

    #[tokio::test]
    async fn test_assign_uses_v3_endpoints() {
        let gateway = MockGateway::new()
            .on(Service::Jira, HttpMethod::Get, "3/myself", json!({"accountId": "me-123"}))
            .on(Service::Jira, HttpMethod::Put, "3/issue/PROJ-1/assignee", json!({}));
        let api = JiraApi::new(&gateway);

        let me = api.current_account_id().await.unwrap();
        api.assign("PROJ-1", &me).await.unwrap();

        let calls = gateway.calls_to("3/issue/PROJ-1/assignee");
        assert_eq!(calls[0].body, Some(json!({"accountId": "me-123"})));
    }
}
