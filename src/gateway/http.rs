//! reqwest-backed gateway implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

use super::{ApiRequest, Credentials, Gateway, HttpMethod, Service};
use crate::config::Config;
use crate::error::{BridgeError, Result};

/// Base URL plus credentials for one service
#[derive(Debug, Clone)]
struct Endpoint {
    base_url: String,
    credentials: Credentials,
}

/// HTTP gateway to Jira and Bitbucket
pub struct HttpGateway {
    client: Client,
    jira: Option<Endpoint>,
    bitbucket: Option<Endpoint>,
}

impl HttpGateway {
    /// Build from configuration; services without usable credentials stay unconfigured
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.http.timeout_ms))
            .user_agent(config.http.user_agent.clone())
            .build()
            .map_err(|e| BridgeError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        let jira = match (config.jira_base_url(), Credentials::for_jira(&config.jira)) {
            (Ok(base), Ok(credentials)) => Some(Endpoint {
                base_url: format!("{}/rest/api", base),
                credentials,
            }),
            _ => None,
        };

        let bitbucket = Credentials::for_bitbucket(&config.bitbucket)
            .ok()
            .map(|credentials| Endpoint {
                base_url: config.bitbucket.api_url.trim_end_matches('/').to_string(),
                credentials,
            });

        Ok(Self {
            client,
            jira,
            bitbucket,
        })
    }

    /// Whether a service has an endpoint configured
    pub fn is_configured(&self, service: Service) -> bool {
        self.endpoint(service).is_ok()
    }

    fn endpoint(&self, service: Service) -> Result<&Endpoint> {
        let endpoint = match service {
            Service::Jira => self.jira.as_ref(),
            Service::Bitbucket => self.bitbucket.as_ref(),
        };
        endpoint.ok_or_else(|| {
            BridgeError::Configuration(format!("{} is not configured", service.as_str()))
        })
    }

    fn url(endpoint: &Endpoint, path: &str) -> String {
        format!("{}/{}", endpoint.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn send(&self, request: ApiRequest) -> Result<Value> {
        let endpoint = self.endpoint(request.service)?;
        let url = Self::url(endpoint, &request.path);

        log::debug!(
            "{} {} ({} auth, {} query params)",
            request.method.as_str(),
            url,
            endpoint.credentials.scheme(),
            request.query.len()
        );

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
        };

        builder = endpoint
            .credentials
            .apply(builder)
            .header("Accept", "application/json");

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            log::warn!("{} {} failed: {}", request.method.as_str(), url, e);
            BridgeError::transport(e.status().map(|s| s.as_u16()), e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            log::warn!(
                "{} {} returned {}",
                request.method.as_str(),
                url,
                status.as_u16()
            );
            return Err(BridgeError::transport(Some(status.as_u16()), error_body));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| BridgeError::transport(Some(status.as_u16()), e.to_string()))?;

        if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(json!({}));
        }

        serde_json::from_slice(&bytes)
            .map_err(|e| BridgeError::Decode(format!("Invalid JSON from {}: {}", request.service.as_str(), e)))
    }
}

impl std::fmt::Debug for HttpGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGateway")
            .field("jira", &self.jira)
            .field("bitbucket", &self.bitbucket)
            .finish()
    }
}
