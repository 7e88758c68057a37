//! Infrastructure layer for atlas
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the tool gateway, the bundled providers,
//! the schema converter and configuration file loading.

pub mod config;
pub mod tools;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigSource, ConfigValidationError, FileConfig, FileFavoritesConfig,
    FileGatewayConfig, FilePlacesConfig, FileProvidersConfig,
};
pub use tools::{
    ApiFlavor, ConfigurationError, FavoritesHandler, FavoritesProvider, GatewayStats,
    InitializationError, JsonSchemaToolConverter, PlaceEntry, PlacesHandler, PlacesProvider,
    ToolGateway, ToolGatewayBuilder, sample_places,
};
