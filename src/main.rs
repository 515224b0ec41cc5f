//! MacroTrack
//!
//! An MCP server for food nutrition lookup and macro goal calculation.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use macrotrack::build_info;
use macrotrack::config::ResolverConfig;
use macrotrack::mcp::MacroTrackService;
use macrotrack::nutrition::NutritionResolver;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("macrotrack=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    // Print startup banner to stderr
    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    // Read provider configuration once
    let config = ResolverConfig::from_env();
    match config.provider {
        Some(provider) => eprintln!(
            "Nutrition provider: {} (credentials {})",
            provider,
            if config.is_remote_configured() { "present" } else { "missing" }
        ),
        None => eprintln!("Nutrition provider: none (local food table only)"),
    }

    let resolver = NutritionResolver::new(&config)?;

    // Create the MacroTrack service
    let service = MacroTrackService::new(resolver);

    // Create stdio transport
    let transport = (stdin(), stdout());

    // Start the MCP server
    let server = service.serve(transport).await?;

    // Wait for the server to complete
    server.waiting().await?;

    Ok(())
}
