//! Request Gateway - authenticated REST calls to the issue tracker and source control services
//!
//! This module provides:
//! - Service and HTTP method types
//! - ApiRequest builder
//! - Gateway trait for transport abstraction
//! - HttpGateway (reqwest) and MockGateway implementations
//! - Credential resolution

mod auth;
mod http;
mod mock;

pub use auth::Credentials;
pub use http::HttpGateway;
pub use mock::MockGateway;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{BridgeError, Result};

/// Backing service a request is addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// Issue tracker, paths relative to `{url}/rest/api/` (version-prefixed)
    Jira,
    /// Source control, paths relative to the `2.0` API root
    Bitbucket,
}

impl Service {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jira => "jira",
            Self::Bitbucket => "bitbucket",
        }
    }
}

/// HTTP verbs the gateway is allowed to issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

impl HttpMethod {
    /// Parse a verb; anything other than GET/POST/PUT is rejected
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            _ => Err(BridgeError::UnsupportedMethod(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }
}

/// A single REST call
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub service: Service,
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(service: Service, method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            service,
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(service: Service, path: impl Into<String>) -> Self {
        Self::new(service, HttpMethod::Get, path)
    }

    pub fn post(service: Service, path: impl Into<String>, body: Value) -> Self {
        Self::new(service, HttpMethod::Post, path).with_body(Some(body))
    }

    pub fn put(service: Service, path: impl Into<String>, body: Value) -> Self {
        Self::new(service, HttpMethod::Put, path).with_body(Some(body))
    }

    /// Append a query parameter (values are encoded by the transport)
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: Option<Value>) -> Self {
        self.body = body;
        self
    }

    /// Look up a query parameter by name
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Transport to the backing services - one network call per `send`
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Issue a request and return the decoded JSON body (`{}` when empty)
    async fn send(&self, request: ApiRequest) -> Result<Value>;

    /// `request(service, method, path, payload?)` with a textual verb
    async fn request(
        &self,
        service: Service,
        method: &str,
        path: &str,
        payload: Option<Value>,
    ) -> Result<Value> {
        let method = HttpMethod::parse(method)?;
        self.send(ApiRequest::new(service, method, path).with_body(payload))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_method_parse() {
        assert_eq!(HttpMethod::parse("GET").unwrap(), HttpMethod::Get);
        assert_eq!(HttpMethod::parse("post").unwrap(), HttpMethod::Post);
        assert_eq!(HttpMethod::parse(" Put ").unwrap(), HttpMethod::Put);
    }

    #[test]
    fn test_http_method_rejects_others() {
        for verb in ["DELETE", "PATCH", "HEAD", ""] {
            let err = HttpMethod::parse(verb).unwrap_err();
            assert!(matches!(err, BridgeError::UnsupportedMethod(_)));
        }
    }

    #[test]
    fn test_api_request_builder() {
        let request = ApiRequest::get(Service::Jira, "2/search")
            .query("jql", "project = PROJ")
            .query("maxResults", 10);

        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.query_value("jql"), Some("project = PROJ"));
        assert_eq!(request.query_value("maxResults"), Some("10"));
        assert!(request.query_value("startAt").is_none());
        assert!(request.body.is_none());
    }

    #[test]
    fn test_api_request_post_carries_body() {
        let request = ApiRequest::post(Service::Bitbucket, "repositories/acme/api/pullrequests", json!({"title": "x"}));
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.body, Some(json!({"title": "x"})));
    }

    #[tokio::test]
    async fn test_request_rejects_unsupported_method() {
        let gateway = MockGateway::new();
        let err = gateway
            .request(Service::Jira, "DELETE", "2/issue/PROJ-1", None)
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::UnsupportedMethod(_)));
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_request_with_textual_method() {
        let gateway = MockGateway::new().on(Service::Jira, HttpMethod::Put, "2/issue/PROJ-1", json!({}));
        let body = gateway
            .request(Service::Jira, "put", "2/issue/PROJ-1", Some(json!({"fields": {}})))
            .await
            .unwrap();
        assert_eq!(body, json!({}));
        assert_eq!(gateway.calls()[0].body, Some(json!({"fields": {}})));
    }
}
