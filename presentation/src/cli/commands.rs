//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// How `atlas tools` prints the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CatalogFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Qualified descriptors as JSON
    Json,
    /// OpenAI function-calling tool entries
    Openai,
    /// Anthropic tool-use entries
    Anthropic,
}

/// How tool results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Colored console output
    #[default]
    Text,
    /// Tool result JSON
    Json,
}

/// CLI arguments for atlas
#[derive(Parser, Debug)]
#[command(name = "atlas")]
#[command(author, version, about = "Tool gateway for travel-planning assistants")]
#[command(long_about = r#"
Atlas aggregates tool providers behind one catalog. Every tool is published
as <provider>_<tool> and calls are routed back to the provider that owns it.

Configuration is loaded from (in priority order):
1. ATLAS_* environment variables (ATLAS_GATEWAY__CALL_TIMEOUT_MS=5000)
2. --config <path>     Explicit config file
3. ./atlas.toml        Project-level config
4. ~/.config/atlas/config.toml   Global config

Example:
  atlas tools --format openai
  atlas call places_search --args '{"query": "museum", "city": "Paris"}'
  echo '[{"name": "favorites_list"}]' | atlas batch -
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files and environment overrides
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Per-call timeout in milliseconds (overrides configuration)
    #[arg(long, value_name = "MS", global = true)]
    pub timeout_ms: Option<u64>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List every published tool
    Tools {
        #[arg(short, long, value_enum, default_value_t = CatalogFormat::Table)]
        format: CatalogFormat,
    },

    /// Execute one tool call
    Call {
        /// Qualified tool name (<provider>_<tool>)
        name: String,

        /// Arguments as a JSON object
        #[arg(short, long, value_name = "JSON", default_value = "")]
        args: String,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Execute a JSON array of calls concurrently ('-' reads stdin)
    Batch {
        #[arg(value_name = "FILE")]
        input: String,
    },

    /// Answer JSON-RPC requests read line by line from stdin
    ServeStdio,

    /// Show configuration sources and the effective configuration
    ShowConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_call_with_global_flags() {
        let cli = Cli::try_parse_from([
            "atlas",
            "call",
            "places_search",
            "--args",
            r#"{"query":"museum"}"#,
            "-vv",
            "--timeout-ms",
            "500",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.timeout_ms, Some(500));
        assert_eq!(
            cli.command,
            Command::Call {
                name: "places_search".into(),
                args: r#"{"query":"museum"}"#.into(),
                format: OutputFormat::Text,
            }
        );
    }

    #[test]
    fn test_parse_tools_format() {
        let cli = Cli::try_parse_from(["atlas", "--no-config", "tools", "--format", "openai"])
            .unwrap();
        assert!(cli.no_config);
        assert_eq!(
            cli.command,
            Command::Tools {
                format: CatalogFormat::Openai
            }
        );
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Cli::try_parse_from(["atlas"]).is_err());
    }

    #[test]
    fn test_parse_serve_stdio() {
        let cli = Cli::try_parse_from(["atlas", "serve-stdio"]).unwrap();
        assert_eq!(cli.command, Command::ServeStdio);
    }
}
