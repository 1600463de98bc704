use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BridgeError, Result};
use crate::gateway::Credentials;

const PROJECT_NAME: &str = "atlassian-mcp";

/// Default Bitbucket Cloud REST root
pub const DEFAULT_BITBUCKET_API_URL: &str = "https://api.bitbucket.org/2.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub jira: JiraConfig,
    pub bitbucket: BitbucketConfig,
    pub http: HttpConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JiraConfig {
    /// Site root, e.g. https://acme.atlassian.net
    pub url: Option<String>,
    pub email: Option<String>,
    pub api_token: Option<String>,
    pub bearer_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BitbucketConfig {
    pub api_url: String,
    pub workspace: Option<String>,
    pub username: Option<String>,
    pub app_password: Option<String>,
    pub api_token: Option<String>,
}

impl Default for BitbucketConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BITBUCKET_API_URL.to_string(),
            workspace: None,
            username: None,
            app_password: None,
            api_token: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30000,
            user_agent: format!("{}/{}", PROJECT_NAME, env!("CARGO_PKG_VERSION")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub name: String,
    pub version: String,
    pub tool_set: ToolSet,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "atlassian-mcp-server".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            tool_set: ToolSet::Full,
        }
    }
}

/// Which groups of tools the server exposes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolSet {
    Jira,
    Bitbucket,
    #[default]
    Full,
}

impl ToolSet {
    /// Parse from string representation
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "jira" => Some(Self::Jira),
            "bitbucket" => Some(Self::Bitbucket),
            "full" | "all" => Some(Self::Full),
            _ => None,
        }
    }

    pub fn includes_jira(&self) -> bool {
        matches!(self, Self::Jira | Self::Full)
    }

    pub fn includes_bitbucket(&self) -> bool {
        matches!(self, Self::Bitbucket | Self::Full)
    }

    /// Cross-reference tools need both services
    pub fn includes_cross_reference(&self) -> bool {
        matches!(self, Self::Full)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            jira: JiraConfig::default(),
            bitbucket: BitbucketConfig::default(),
            http: HttpConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain, then apply environment overrides
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let mut config = Self::load_file_chain(config_path)?;
        config.apply_env();
        Ok(config)
    }

    fn load_file_chain(config_path: Option<&PathBuf>) -> Result<Self> {
        // An explicit path must load; no silent fallback
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        // Try primary location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            let primary_config = config_dir.join(PROJECT_NAME).join(format!("{}.yml", PROJECT_NAME));
            if primary_config.exists() {
                match Self::load_from_file(&primary_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", primary_config.display(), e);
                    }
                }
            }
        }

        // Try fallback location: ./<project>.yml
        let fallback_config = PathBuf::from(format!("{}.yml", PROJECT_NAME));
        if fallback_config.exists() {
            match Self::load_from_file(&fallback_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", fallback_config.display(), e);
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).map_err(|e| {
            BridgeError::Configuration(format!("Failed to read {}: {}", path.as_ref().display(), e))
        })?;

        let config: Self = serde_yaml::from_str(&content)?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Override file values with process environment variables
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Override file values using an arbitrary variable lookup; empty values are ignored
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("JIRA_URL") {
            self.jira.url = Some(v);
        }
        if let Some(v) = get("JIRA_EMAIL") {
            self.jira.email = Some(v);
        }
        if let Some(v) = get("JIRA_API_TOKEN") {
            self.jira.api_token = Some(v);
        }
        if let Some(v) = get("JIRA_BEARER_TOKEN") {
            self.jira.bearer_token = Some(v);
        }
        if let Some(v) = get("BITBUCKET_API_URL") {
            self.bitbucket.api_url = v;
        }
        if let Some(v) = get("BITBUCKET_WORKSPACE") {
            self.bitbucket.workspace = Some(v);
        }
        if let Some(v) = get("BITBUCKET_USERNAME") {
            self.bitbucket.username = Some(v);
        }
        if let Some(v) = get("BITBUCKET_APP_PASSWORD") {
            self.bitbucket.app_password = Some(v);
        }
        if let Some(v) = get("BITBUCKET_API_TOKEN") {
            self.bitbucket.api_token = Some(v);
        }
        if let Some(v) = get("ATLASSIAN_MCP_TOOLSET") {
            match ToolSet::from_str(&v) {
                Some(tool_set) => self.server.tool_set = tool_set,
                None => log::warn!("Ignoring unknown ATLASSIAN_MCP_TOOLSET value: {}", v),
            }
        }
    }

    /// Check that every service the selected tool set talks to is reachable
    pub fn validate(&self) -> Result<()> {
        if self.server.tool_set.includes_jira() {
            self.jira_base_url()?;
            Credentials::for_jira(&self.jira)?;
        }
        if self.server.tool_set.includes_bitbucket() {
            Credentials::for_bitbucket(&self.bitbucket)?;
        }
        Ok(())
    }

    /// Jira site root without a trailing slash
    pub fn jira_base_url(&self) -> Result<&str> {
        self.jira
            .url
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .ok_or_else(|| BridgeError::Configuration("JIRA_URL is not configured".to_string()))
    }

    /// Link to an issue in the Jira web UI
    pub fn browse_url(&self, issue_key: &str) -> Option<String> {
        self.jira_base_url()
            .ok()
            .map(|base| format!("{}/browse/{}", base, issue_key))
    }
}
