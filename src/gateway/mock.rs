//! Canned-response gateway for tests and offline runs

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::{ApiRequest, Gateway, HttpMethod, Service};
use crate::error::{BridgeError, Result};

#[derive(Debug, Clone)]
enum MockResponse {
    Json(Value),
    Error { status: Option<u16>, message: String },
}

#[derive(Debug, Clone)]
struct Route {
    service: Service,
    method: HttpMethod,
    path: String,
    response: MockResponse,
}

/// Gateway that answers from registered routes and records every call
#[derive(Debug, Default)]
pub struct MockGateway {
    routes: Vec<Route>,
    calls: Mutex<Vec<ApiRequest>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method path` on `service` with a JSON body
    pub fn on(mut self, service: Service, method: HttpMethod, path: impl Into<String>, body: Value) -> Self {
        self.routes.push(Route {
            service,
            method,
            path: path.into(),
            response: MockResponse::Json(body),
        });
        self
    }

    /// Answer `method path` on `service` with an HTTP failure
    pub fn fail(
        mut self,
        service: Service,
        method: HttpMethod,
        path: impl Into<String>,
        status: u16,
        message: impl Into<String>,
    ) -> Self {
        self.routes.push(Route {
            service,
            method,
            path: path.into(),
            response: MockResponse::Error {
                status: Some(status),
                message: message.into(),
            },
        });
        self
    }

    /// Every request sent so far, in order
    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// Requests addressed to one path
    pub fn calls_to(&self, path: &str) -> Vec<ApiRequest> {
        self.calls().into_iter().filter(|c| c.path == path).collect()
    }
}

#[async_trait]
impl Gateway for MockGateway {
    async fn send(&self, request: ApiRequest) -> Result<Value> {
        let route = self
            .routes
            .iter()
            .find(|r| r.service == request.service && r.method == request.method && r.path == request.path)
            .cloned();

        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request.clone());

        match route.map(|r| r.response) {
            Some(MockResponse::Json(body)) => Ok(body),
            Some(MockResponse::Error { status, message }) => Err(BridgeError::transport(status, message)),
            None => Err(BridgeError::transport(
                Some(404),
                format!(
                    "No mock route for {} {} {}",
                    request.service.as_str(),
                    request.method.as_str(),
                    request.path
                ),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_returns_registered_body() {
        let gateway = MockGateway::new().on(Service::Jira, HttpMethod::Get, "2/issue/A-1", json!({"key": "A-1"}));

        let body = gateway.send(ApiRequest::get(Service::Jira, "2/issue/A-1")).await.unwrap();
        assert_eq!(body["key"], "A-1");
        assert_eq!(gateway.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_routes_by_service_and_method() {
        let gateway = MockGateway::new().on(Service::Jira, HttpMethod::Post, "2/issue", json!({"key": "A-2"}));

        let err = gateway.send(ApiRequest::get(Service::Jira, "2/issue")).await.unwrap_err();
        assert_eq!(err.status(), Some(404));

        let err = gateway
            .send(ApiRequest::post(Service::Bitbucket, "2/issue", json!({})))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_mock_failure_route() {
        let gateway = MockGateway::new().fail(Service::Bitbucket, HttpMethod::Get, "repositories/acme", 403, "Forbidden");

        let err = gateway
            .send(ApiRequest::get(Service::Bitbucket, "repositories/acme"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(403));
        assert_eq!(gateway.calls_to("repositories/acme").len(), 1);
    }
}
