//! Tool registry - name -> schema -> handler routing

use std::collections::HashMap;

use serde_json::Value;

use super::catalog::{bitbucket_tools, cross_reference_tools, jira_tools};
use super::{Tool, ToolContext, ToolDefinition, ToolResult};
use crate::config::ToolSet;
use crate::error::{BridgeError, Result};
use crate::format;

/// Ordered set of tools bound to one execution context
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
    index: HashMap<&'static str, usize>,
    ctx: ToolContext,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new(ctx: ToolContext) -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
            ctx,
        }
    }

    /// Registry holding every tool the tool set includes
    pub fn for_tool_set(tool_set: ToolSet, ctx: ToolContext) -> Result<Self> {
        let mut registry = Self::new(ctx);
        if tool_set.includes_jira() {
            registry.register_all(jira_tools())?;
        }
        if tool_set.includes_bitbucket() {
            registry.register_all(bitbucket_tools())?;
        }
        if tool_set.includes_cross_reference() {
            registry.register_all(cross_reference_tools())?;
        }
        log::debug!("Registered {} tools for {:?}", registry.len(), tool_set);
        Ok(registry)
    }

    /// Add a tool; names must be unique
    pub fn register(&mut self, tool: Box<dyn Tool>) -> Result<()> {
        let name = tool.name();
        if self.index.contains_key(name) {
            return Err(BridgeError::DuplicateTool(name.to_string()));
        }
        self.index.insert(name, self.tools.len());
        self.tools.push(tool);
        Ok(())
    }

    pub fn register_all(&mut self, tools: Vec<Box<dyn Tool>>) -> Result<()> {
        tools.into_iter().try_for_each(|tool| self.register(tool))
    }

    /// Definitions in registration order
    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.definition()).collect()
    }

    pub fn has_tool(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Run a tool by name
    ///
    /// An unknown name is the only `Err`. Invalid arguments and handler
    /// failures come back as error content.
    pub async fn call_tool(&self, name: &str, args: Value) -> Result<ToolResult> {
        let tool = self
            .index
            .get(name)
            .map(|&i| &self.tools[i])
            .ok_or_else(|| BridgeError::ToolNotFound(name.to_string()))?;

        let args = match tool.input_schema().validate(args) {
            Ok(args) => args,
            Err(e) => {
                log::info!("Rejected call to {}: {}", name, e);
                return Ok(ToolResult::error(e.to_string()));
            }
        };

        log::info!("Calling tool {}", name);
        match tool.execute(args, &self.ctx).await {
            Ok(content) => Ok(ToolResult::success(content)),
            Err(e) => {
                log::warn!("Tool {} failed: {}", name, e);
                Ok(ToolResult::error(format::error(tool.action(), e)))
            }
        }
    }
}
