//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - serve: run the stdio protocol server (default)
//! - tools: print the tool catalog
//! - check: validate configuration and credentials
//! - call: run one tool and print its result

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use atlassian_mcp::config::ToolSet;

/// Atlassian MCP - Jira and Bitbucket tools over the Model Context Protocol
#[derive(Parser, Debug)]
#[command(name = "atlassian-mcp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Tool set to expose (jira, bitbucket, full); overrides config
    #[arg(short, long, global = true, value_parser = parse_tool_set)]
    pub tool_set: Option<ToolSet>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

fn parse_tool_set(s: &str) -> Result<ToolSet, String> {
    ToolSet::from_str(s).ok_or_else(|| format!("unknown tool set '{}' (expected jira, bitbucket or full)", s))
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve tool requests on stdin/stdout (default)
    Serve,

    /// List the tools the server would expose
    Tools {
        /// Print full input schemas as JSON
        #[arg(short, long)]
        schema: bool,
    },

    /// Validate configuration and credentials
    Check,

    /// Run a single tool and print its result
    Call {
        /// Tool name
        name: String,

        /// Arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        args: String,
    },
}
