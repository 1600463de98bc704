//! Tool execution context - shared gateway and read-only configuration

use std::sync::Arc;

use super::Arguments;
use crate::config::Config;
use crate::error::{BridgeError, Result};
use crate::gateway::Gateway;

/// Everything a tool handler may touch
#[derive(Clone)]
pub struct ToolContext {
    pub gateway: Arc<dyn Gateway>,
    pub config: Arc<Config>,
}

impl ToolContext {
    pub fn new(gateway: Arc<dyn Gateway>, config: Arc<Config>) -> Self {
        Self { gateway, config }
    }

    pub fn gateway(&self) -> &dyn Gateway {
        self.gateway.as_ref()
    }

    /// Workspace from the `workspace` argument, else the configured default
    pub fn workspace<'a>(&'a self, args: &'a Arguments) -> Result<&'a str> {
        args.opt_str("workspace")
            .or(self.config.bitbucket.workspace.as_deref().filter(|w| !w.trim().is_empty()))
            .ok_or_else(|| {
                BridgeError::Validation(
                    "No workspace given and BITBUCKET_WORKSPACE is not configured".to_string(),
                )
            })
    }

    pub fn browse_url(&self, issue_key: &str) -> Option<String> {
        self.config.browse_url(issue_key)
    }
}

impl std::fmt::Debug for ToolContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolContext")
            .field("tool_set", &self.config.server.tool_set)
            .finish()
    }
}
