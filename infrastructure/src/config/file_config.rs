//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application types.

use atlas_application::config::GatewayConfig;
use atlas_application::ports::tool_gateway::QUALIFIER_SEPARATOR;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tools::favorites::DEFAULT_MAX_ENTRIES;
use crate::tools::places::PlaceEntry;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("gateway.call_timeout_ms cannot be 0")]
    InvalidCallTimeout,

    #[error("providers.favorites.max_entries cannot be 0")]
    InvalidMaxEntries,

    #[error("gateway.separator must be \"{expected}\", got \"{found}\"")]
    UnsupportedSeparator { expected: char, found: String },

    #[error("providers.places.entries[{0}] has an empty name")]
    EmptyPlaceName(usize),
}

/// Raw gateway configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGatewayConfig {
    /// Upper bound for a single tool call, in milliseconds
    pub call_timeout_ms: u64,
    /// Qualified-name separator. Informative only: it is fixed to `_`.
    pub separator: String,
}

impl Default for FileGatewayConfig {
    fn default() -> Self {
        Self {
            call_timeout_ms: 10_000,
            separator: QUALIFIER_SEPARATOR.to_string(),
        }
    }
}

/// Raw places provider configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePlacesConfig {
    pub enabled: bool,
    /// Places to search; the bundled samples are used when empty
    pub entries: Vec<PlaceEntry>,
}

impl Default for FilePlacesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            entries: Vec::new(),
        }
    }
}

/// Raw favorites provider configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileFavoritesConfig {
    pub enabled: bool,
    pub max_entries: usize,
}

impl Default for FileFavoritesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

/// Raw providers configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    pub places: FilePlacesConfig,
    pub favorites: FileFavoritesConfig,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Gateway settings
    pub gateway: FileGatewayConfig,
    /// Bundled provider settings
    pub providers: FileProvidersConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.gateway.call_timeout_ms == 0 {
            return Err(ConfigValidationError::InvalidCallTimeout);
        }

        if self.gateway.separator != QUALIFIER_SEPARATOR.to_string() {
            return Err(ConfigValidationError::UnsupportedSeparator {
                expected: QUALIFIER_SEPARATOR,
                found: self.gateway.separator.clone(),
            });
        }

        if self.providers.favorites.max_entries == 0 {
            return Err(ConfigValidationError::InvalidMaxEntries);
        }

        if let Some(index) = self
            .providers
            .places
            .entries
            .iter()
            .position(|p| p.name.trim().is_empty())
        {
            return Err(ConfigValidationError::EmptyPlaceName(index));
        }

        Ok(())
    }

    /// Gateway runtime settings derived from this file
    pub fn to_gateway_config(&self) -> GatewayConfig {
        GatewayConfig::from_millis(self.gateway.call_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[gateway]
call_timeout_ms = 2500

[providers.places]
enabled = true

[[providers.places.entries]]
name = "Louvre"
city = "Paris"
category = "museum"
rating = 4.7

[[providers.places.entries]]
name = "Prado"
city = "Madrid"

[providers.favorites]
enabled = false
max_entries = 20
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.gateway.call_timeout_ms, 2500);
        assert_eq!(config.providers.places.entries.len(), 2);
        assert_eq!(config.providers.places.entries[0].rating, Some(4.7));
        assert!(!config.providers.favorites.enabled);
        assert_eq!(config.providers.favorites.max_entries, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[providers.favorites]
max_entries = 5
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        // Defaults should apply
        assert_eq!(config.gateway.call_timeout_ms, 10_000);
        assert_eq!(config.gateway.separator, "_");
        assert!(config.providers.places.enabled);
        assert!(config.providers.favorites.enabled);
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.to_gateway_config().call_timeout,
            Duration::from_secs(10)
        );
        assert_eq!(config.providers.favorites.max_entries, 100);
    }

    #[test]
    fn test_validate_zero_timeout() {
        let toml_str = r#"
[gateway]
call_timeout_ms = 0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidCallTimeout)
        );
    }

    #[test]
    fn test_validate_zero_max_entries() {
        let mut config = FileConfig::default();
        config.providers.favorites.max_entries = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidMaxEntries));
    }

    #[test]
    fn test_validate_separator() {
        let mut config = FileConfig::default();
        config.gateway.separator = ".".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::UnsupportedSeparator { .. })
        ));
    }

    #[test]
    fn test_validate_empty_place_name() {
        let mut config = FileConfig::default();
        config.providers.places.entries = vec![
            PlaceEntry::new("Louvre", "Paris", "museum"),
            PlaceEntry::new(" ", "Paris", "cafe"),
        ];
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyPlaceName(1)));
    }
}
