use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use log::{LevelFilter, info};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

mod cli;

use atlassian_mcp::config::Config;
use atlassian_mcp::gateway::{HttpGateway, Service};
use atlassian_mcp::server::{self, Dispatcher};
use cli::Cli;
use cli::commands::Commands;

const PROJECT_NAME: &str = "atlassian-mcp";

fn setup_logging(verbose: bool) -> Result<PathBuf> {
    // stdout carries the protocol, so logs go to a file
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(PROJECT_NAME)
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join(format!("{}.log", PROJECT_NAME));

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    // Filter wide open; the global max level gates until RUST_LOG says otherwise
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("trace"))
        .target(env_logger::Target::Pipe(target))
        .init();
    if !rust_log_set() {
        log::set_max_level(effective_level(verbose, None));
    }

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(log_file)
}

fn rust_log_set() -> bool {
    std::env::var_os("RUST_LOG").is_some()
}

/// `--verbose` wins, then the config's `log_level`, then info
fn effective_level(verbose: bool, configured: Option<&str>) -> LevelFilter {
    if verbose {
        return LevelFilter::Debug;
    }
    match configured.map(str::parse::<LevelFilter>) {
        Some(Ok(level)) => level,
        Some(Err(_)) => {
            log::warn!("Ignoring unknown log_level: {:?}", configured);
            LevelFilter::Info
        }
        None => LevelFilter::Info,
    }
}

fn build_dispatcher(config: Config) -> Result<Dispatcher> {
    let gateway = HttpGateway::from_config(&config).context("Failed to create HTTP gateway")?;
    let dispatcher = Dispatcher::from_config(Arc::new(config), Arc::new(gateway))
        .context("Failed to build tool registry")?;
    Ok(dispatcher)
}

async fn run_application(cli: &Cli, config: Config) -> Result<()> {
    info!("Starting application");

    match &cli.command {
        None | Some(Commands::Serve) => handle_serve_command(config).await,
        Some(Commands::Tools { schema }) => handle_tools_command(config, *schema),
        Some(Commands::Check) => handle_check_command(&config),
        Some(Commands::Call { name, args }) => handle_call_command(config, name, args).await,
    }
}

async fn handle_serve_command(config: Config) -> Result<()> {
    config.validate().context("Invalid configuration")?;
    info!("Serving tool set {:?} on stdio", config.server.tool_set);

    let dispatcher = build_dispatcher(config)?;
    let stats = server::serve_stdio(&dispatcher).await.context("Server loop failed")?;

    info!("Shutting down after {} responses", stats.responses);
    Ok(())
}

fn handle_tools_command(config: Config, schema: bool) -> Result<()> {
    let dispatcher = build_dispatcher(config)?;
    let registry = dispatcher
        .registry()
        .ok_or_else(|| eyre!("Tool registry was not installed"))?;

    if schema {
        println!("{}", serde_json::to_string_pretty(&registry.list_tools())?);
        return Ok(());
    }

    println!("{} {}", "Tools:".green(), registry.len());
    for tool in registry.list_tools() {
        println!("  {} - {}", tool.name.cyan(), tool.description);
    }
    Ok(())
}

fn handle_check_command(config: &Config) -> Result<()> {
    let gateway = HttpGateway::from_config(config).context("Failed to create HTTP gateway")?;

    println!("{} {:?}", "Tool set:".green(), config.server.tool_set);
    for service in [Service::Jira, Service::Bitbucket] {
        let status = if gateway.is_configured(service) {
            "configured".green()
        } else {
            "not configured".yellow()
        };
        println!("  {}: {}", service.as_str(), status);
    }
    match config.bitbucket.workspace.as_deref() {
        Some(workspace) => println!("  workspace: {}", workspace),
        None => println!("  workspace: {}", "not set".yellow()),
    }

    match config.validate() {
        Ok(()) => {
            println!("{}", "Configuration OK".green());
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "Configuration invalid:".red(), e);
            Err(eyre!(e))
        }
    }
}

async fn handle_call_command(config: Config, name: &str, args: &str) -> Result<()> {
    let arguments: serde_json::Value = serde_json::from_str(args).context("Arguments must be a JSON object")?;

    let dispatcher = build_dispatcher(config)?;
    let registry = dispatcher
        .registry()
        .ok_or_else(|| eyre!("Tool registry was not installed"))?;

    let result = registry.call_tool(name, arguments).await?;
    if result.is_error {
        println!("{}", result.content.red());
        return Err(eyre!("Tool '{}' reported an error", name));
    }
    println!("{}", result.content);
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging before anything can warn
    setup_logging(cli.is_verbose()).context("Failed to setup logging")?;

    // Load configuration
    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(tool_set) = cli.tool_set {
        config.server.tool_set = tool_set;
    }
    if !rust_log_set() {
        log::set_max_level(effective_level(cli.is_verbose(), config.log_level.as_deref()));
    }

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, config).await.context("Application failed")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_level_verbose_wins() {
        assert_eq!(effective_level(true, Some("error")), LevelFilter::Debug);
    }

    #[test]
    fn test_effective_level_from_config() {
        assert_eq!(effective_level(false, Some("warn")), LevelFilter::Warn);
        assert_eq!(effective_level(false, Some("TRACE")), LevelFilter::Trace);
    }

    #[test]
    fn test_effective_level_fallback() {
        assert_eq!(effective_level(false, None), LevelFilter::Info);
        assert_eq!(effective_level(false, Some("loud")), LevelFilter::Info);
    }
}
