//! CLI module for atlassian-mcp - command-line interface and subcommands.
//!
//! Provides the main entry point with subcommands for serving, inspecting
//! the tool catalog, and checking configuration.

pub mod commands;

pub use commands::Cli;
