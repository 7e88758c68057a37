//! Configuration file loading for atlas
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `ATLAS_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./atlas.toml` or `./.atlas.toml`
//! 4. Global: `$XDG_CONFIG_HOME/atlas/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileFavoritesConfig, FileGatewayConfig, FilePlacesConfig,
    FileProvidersConfig,
};
pub use loader::{ConfigLoader, ConfigSource, ENV_PREFIX};
