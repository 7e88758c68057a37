//! CLI entrypoint for atlas
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use atlas_application::{
    ExecuteToolBatchUseCase, FunctionCallRequest, HandleRpcRequestUseCase, HandlerProvider,
    ToolGatewayPort, ToolSchemaPort,
};
use atlas_domain::ToolCall;
use atlas_infrastructure::{
    ApiFlavor, ConfigLoader, FavoritesHandler, FileConfig, JsonSchemaToolConverter,
    PlacesHandler, ToolGateway, ToolGatewayBuilder, sample_places,
};
use atlas_presentation::{
    CatalogFormat, Cli, Command, ConsoleFormatter, JsonFormatter, OutputFormat, OutputFormatter,
};
use clap::Parser;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level; RUST_LOG wins when set
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting atlas");

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("failed to load configuration")?
    };
    config.validate().context("invalid configuration")?;

    if cli.command == Command::ShowConfig {
        return show_config(&cli, &config);
    }

    // === Dependency Injection ===
    let gateway = Arc::new(build_gateway(&config, cli.timeout_ms).await?);

    match cli.command {
        Command::Tools { format } => print_tools(&gateway, format),
        Command::Call { name, args, format } => call_tool(&gateway, &name, &args, format).await,
        Command::Batch { input } => run_batch(gateway, &input).await,
        Command::ServeStdio => serve_stdio(gateway).await,
        Command::ShowConfig => Ok(()),
    }
}

/// Register the enabled bundled providers and bring the gateway to ready.
async fn build_gateway(config: &FileConfig, timeout_ms: Option<u64>) -> Result<ToolGateway> {
    let mut gateway_config = config.to_gateway_config();
    if let Some(ms) = timeout_ms {
        if ms == 0 {
            bail!("--timeout-ms must be greater than 0");
        }
        gateway_config = gateway_config.with_call_timeout(std::time::Duration::from_millis(ms));
    }

    let mut builder = ToolGatewayBuilder::new().with_config(gateway_config);

    let places = &config.providers.places;
    if places.enabled {
        let entries = if places.entries.is_empty() {
            sample_places()
        } else {
            places.entries.clone()
        };
        builder = builder.try_register("places", HandlerProvider::new(PlacesHandler::new(entries)))?;
    }

    let favorites = &config.providers.favorites;
    if favorites.enabled {
        builder = builder.try_register(
            "favorites",
            HandlerProvider::new(FavoritesHandler::new(favorites.max_entries)),
        )?;
    }

    if builder.is_empty() {
        bail!("no providers enabled; enable at least one under [providers]");
    }

    let gateway = builder.initialize_all().await?;
    debug!(providers = ?gateway.provider_ids(), "Gateway built");
    Ok(gateway)
}

fn print_tools(gateway: &ToolGateway, format: CatalogFormat) -> Result<()> {
    let output = match format {
        CatalogFormat::Table => {
            let stats = gateway.stats();
            format!(
                "{}\n{}",
                ConsoleFormatter::format_catalog(&gateway.all_tools()),
                ConsoleFormatter::format_summary(stats.total_tools, &stats.tools_per_provider)
            )
        }
        CatalogFormat::Json => serde_json::to_string_pretty(&gateway.all_tools())?,
        CatalogFormat::Openai | CatalogFormat::Anthropic => {
            let flavor = if format == CatalogFormat::Openai {
                ApiFlavor::OpenAi
            } else {
                ApiFlavor::Anthropic
            };
            let converter = JsonSchemaToolConverter::new(flavor);
            let schemas = converter.all_tools_schema(&gateway.to_function_calling_schema());
            serde_json::to_string_pretty(&schemas)?
        }
    };

    println!("{}", output);
    Ok(())
}

async fn call_tool(
    gateway: &ToolGateway,
    name: &str,
    args: &str,
    format: OutputFormat,
) -> Result<()> {
    let call = ToolCall::from_function_call(name, args)
        .with_context(|| format!("invalid --args for '{}'", name))?;

    // Routing errors abort with a non-zero exit; error results are printed
    let result = gateway.execute_tool(&call).await?;

    let output = match format {
        OutputFormat::Text => ConsoleFormatter.format_result(name, &result),
        OutputFormat::Json => JsonFormatter.format_result(name, &result),
    };
    println!("{}", output);
    Ok(())
}

async fn run_batch(gateway: Arc<ToolGateway>, input: &str) -> Result<()> {
    let raw = if input == "-" {
        let mut buffer = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buffer)
            .await
            .context("failed to read batch from stdin")?;
        buffer
    } else {
        tokio::fs::read_to_string(input)
            .await
            .with_context(|| format!("failed to read batch file '{}'", input))?
    };

    let requests: Vec<FunctionCallRequest> =
        serde_json::from_str(&raw).context("batch must be a JSON array of {name, arguments}")?;

    let use_case = ExecuteToolBatchUseCase::new(gateway);
    let responses = use_case.execute(&requests).await;

    println!("{}", serde_json::to_string_pretty(&responses)?);
    Ok(())
}

async fn serve_stdio(gateway: Arc<ToolGateway>) -> Result<()> {
    let use_case = HandleRpcRequestUseCase::new(gateway);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    info!("Serving JSON-RPC on stdio");
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        if let Some(response) = use_case.handle_line(&line).await {
            let mut encoded = serde_json::to_string(&response)?;
            encoded.push('\n');
            stdout.write_all(encoded.as_bytes()).await?;
            stdout.flush().await?;
        }
    }

    info!("stdin closed, shutting down");
    Ok(())
}

fn show_config(cli: &Cli, config: &FileConfig) -> Result<()> {
    println!("Configuration sources (in priority order):");
    if cli.no_config {
        println!("  --no-config: every source skipped, built-in defaults only");
    } else {
        for source in ConfigLoader::sources(cli.config.as_ref()) {
            println!(
                "{}",
                ConsoleFormatter::format_source(source.label, &source.location, source.found)
            );
        }
    }

    println!();
    println!("Effective configuration:");
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
