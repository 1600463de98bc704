//! Source control endpoints, scoped to one workspace

use serde_json::{Value, json};

use crate::domain::{Branch, Commit, PullRequest, Repository};
use crate::error::{BridgeError, Result};
use crate::gateway::{ApiRequest, Gateway, Service};

/// Fields for a new pull request
#[derive(Debug, Clone, PartialEq)]
pub struct NewPullRequest {
    pub title: String,
    pub description: String,
    pub source_branch: String,
    pub destination_branch: String,
}

/// Typed access to the Bitbucket REST API
pub struct BitbucketApi<'a> {
    gateway: &'a dyn Gateway,
    workspace: &'a str,
}

impl<'a> BitbucketApi<'a> {
    pub fn new(gateway: &'a dyn Gateway, workspace: &'a str) -> Self {
        Self { gateway, workspace }
    }

    fn repo_path(&self, repo: &str, rest: &str) -> String {
        if rest.is_empty() {
            format!("repositories/{}/{}", self.workspace, repo)
        } else {
            format!("repositories/{}/{}/{}", self.workspace, repo, rest)
        }
    }

    pub async fn repositories(&self, limit: u64) -> Result<Vec<Repository>> {
        let request = ApiRequest::get(Service::Bitbucket, format!("repositories/{}", self.workspace))
            .query("pagelen", limit);
        Repository::page_from_value(&self.gateway.send(request).await?)
    }

    pub async fn repository(&self, repo: &str) -> Result<Repository> {
        let request = ApiRequest::get(Service::Bitbucket, self.repo_path(repo, ""));
        Repository::from_value(&self.gateway.send(request).await?)
    }

    /// Pull requests in a repository; `state` of `None` leaves the server default
    pub async fn pull_requests(&self, repo: &str, state: Option<&str>, limit: u64) -> Result<Vec<PullRequest>> {
        let mut request = ApiRequest::get(Service::Bitbucket, self.repo_path(repo, "pullrequests"));
        if let Some(state) = state {
            request = request.query("state", state);
        }
        let request = request.query("pagelen", limit);
        PullRequest::page_from_value(&self.gateway.send(request).await?)
    }

    /// Open a pull request, returning its id
    pub async fn create_pull_request(&self, repo: &str, pr: &NewPullRequest) -> Result<u64> {
        let payload = json!({
            "title": pr.title,
            "description": pr.description,
            "source": {"branch": {"name": pr.source_branch}},
            "destination": {"branch": {"name": pr.destination_branch}}
        });
        let body = self
            .gateway
            .send(ApiRequest::post(Service::Bitbucket, self.repo_path(repo, "pullrequests"), payload))
            .await?;

        body.get("id")
            .and_then(Value::as_u64)
            .ok_or_else(|| BridgeError::Decode("created pull request has no id".to_string()))
    }

    pub async fn branches(&self, repo: &str, limit: u64) -> Result<Vec<Branch>> {
        let request = ApiRequest::get(Service::Bitbucket, self.repo_path(repo, "refs/branches"))
            .query("pagelen", limit);
        Branch::page_from_value(&self.gateway.send(request).await?)
    }

    pub async fn commits(&self, repo: &str, branch: &str, limit: u64) -> Result<Vec<Commit>> {
        let request = ApiRequest::get(
            Service::Bitbucket,
            self.repo_path(repo, &format!("commits/{}", branch)),
        )
        .query("pagelen", limit);
        Commit::page_from_value(&self.gateway.send(request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{HttpMethod, MockGateway};

    #[tokio::test]
    async fn test_paths_are_workspace_scoped() {
        let gateway = MockGateway::new()
            .on(Service::Bitbucket, HttpMethod::Get, "repositories/acme", json!({"values": [{"name": "api"}]}))
            .on(
                Service::Bitbucket,
                HttpMethod::Get,
                "repositories/acme/api/refs/branches",
                json!({"values": [{"name": "main"}]}),
            )
            .on(
                Service::Bitbucket,
                HttpMethod::Get,
                "repositories/acme/api/commits/main",
                json!({"values": []}),
            );
        let api = BitbucketApi::new(&gateway, "acme");

        assert_eq!(api.repositories(10).await.unwrap().len(), 1);
        assert_eq!(api.branches("api", 5).await.unwrap()[0].name, "main");
        assert!(api.commits("api", "main", 5).await.unwrap().is_empty());

        let calls = gateway.calls();
        assert_eq!(calls[0].query_value("pagelen"), Some("10"));
        assert_eq!(calls[1].query_value("pagelen"), Some("5"));
    }

    #[tokio::test]
    async fn test_pull_requests_state_optional() {
        let gateway = MockGateway::new().on(
            Service::Bitbucket,
            HttpMethod::Get,
            "repositories/acme/api/pullrequests",
            json!({"values": []}),
        );
        let api = BitbucketApi::new(&gateway, "acme");

        api.pull_requests("api", Some("MERGED"), 10).await.unwrap();
        api.pull_requests("api", None, 50).await.unwrap();

        let calls = gateway.calls();
        assert_eq!(calls[0].query_value("state"), Some("MERGED"));
        assert_eq!(calls[1].query_value("state"), None);
        assert_eq!(calls[1].query_value("pagelen"), Some("50"));
    }

    #[tokio::test]
    async fn test_create_pull_request_payload() {
        let gateway = MockGateway::new().on(
            Service::Bitbucket,
            HttpMethod::Post,
            "repositories/acme/api/pullrequests",
            json!({"id": 77}),
        );
        let api = BitbucketApi::new(&gateway, "acme");

        let id = api
            .create_pull_request(
                "api",
                &NewPullRequest {
                    title: "Add retries".to_string(),
                    description: "Resolves: PROJ-1".to_string(),
                    source_branch: "feature/retries".to_string(),
                    destination_branch: "main".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(id, 77);

        let body = gateway.calls()[0].body.clone().unwrap();
        assert_eq!(body["source"]["branch"]["name"], "feature/retries");
        assert_eq!(body["destination"]["branch"]["name"], "main");
    }
}
