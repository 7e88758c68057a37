//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Prefix of environment overrides (`ATLAS_GATEWAY__CALL_TIMEOUT_MS=5000`)
pub const ENV_PREFIX: &str = "ATLAS_";

const PROJECT_FILES: [&str; 2] = ["atlas.toml", ".atlas.toml"];

/// One place configuration may come from, for `show-config`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    pub label: &'static str,
    pub location: String,
    pub found: bool,
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables prefixed with `ATLAS_` (`__` separates levels)
    /// 2. Explicit config path (if provided; must exist)
    /// 3. Project root: `./atlas.toml` or `./.atlas.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/atlas/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(&global_path));
            }
        }

        if let Some(project_path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(project_path));
        }

        if let Some(path) = config_path {
            if !path.exists() {
                return Err(Box::new(figment::Error::from(format!(
                    "config file not found: {}",
                    path.display()
                ))));
            }
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/atlas/config.toml if set,
    /// otherwise the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("atlas").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Every source consulted by [`load`](Self::load), highest priority first.
    pub fn sources(config_path: Option<&PathBuf>) -> Vec<ConfigSource> {
        let mut sources = Vec::new();

        let env_set = std::env::vars().any(|(key, _)| key.starts_with(ENV_PREFIX));
        sources.push(ConfigSource {
            label: "Env",
            location: format!("{}*", ENV_PREFIX),
            found: env_set,
        });

        if let Some(path) = config_path {
            sources.push(file_source("Explicit", path));
        }

        match Self::project_config_path() {
            Some(path) => sources.push(file_source("Project", &path)),
            None => sources.push(ConfigSource {
                label: "Project",
                location: PROJECT_FILES.join(" or "),
                found: false,
            }),
        }

        if let Some(path) = Self::global_config_path() {
            sources.push(file_source("Global", &path));
        }

        sources.push(ConfigSource {
            label: "Default",
            location: "built-in defaults".to_string(),
            found: true,
        });
        sources
    }
}

fn file_source(label: &'static str, path: &Path) -> ConfigSource {
    ConfigSource {
        label,
        location: path.display().to_string(),
        found: path.exists(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_global_config_path_returns_some() {
        // Should return a path (even if file doesn't exist)
        let path = ConfigLoader::global_config_path().unwrap();
        assert!(path.ends_with("atlas/config.toml"));
    }

    #[test]
    fn test_project_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "atlas.toml",
                r#"
                [gateway]
                call_timeout_ms = 3000

                [providers.favorites]
                max_entries = 7
                "#,
            )?;

            let config = ConfigLoader::load(None).map_err(|e| *e)?;
            assert_eq!(config.gateway.call_timeout_ms, 3000);
            assert_eq!(config.providers.favorites.max_entries, 7);
            assert!(config.providers.places.enabled);
            Ok(())
        });
    }

    #[test]
    fn test_explicit_file_overrides_project_file() {
        Jail::expect_with(|jail| {
            jail.create_file(".atlas.toml", "[gateway]\ncall_timeout_ms = 3000\n")?;
            jail.create_file("custom.toml", "[gateway]\ncall_timeout_ms = 4000\n")?;

            let explicit = PathBuf::from("custom.toml");
            let config = ConfigLoader::load(Some(&explicit)).map_err(|e| *e)?;
            assert_eq!(config.gateway.call_timeout_ms, 4000);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_files() {
        Jail::expect_with(|jail| {
            jail.create_file("atlas.toml", "[gateway]\ncall_timeout_ms = 3000\n")?;
            jail.set_env("ATLAS_GATEWAY__CALL_TIMEOUT_MS", "1500");
            jail.set_env("ATLAS_PROVIDERS__PLACES__ENABLED", "false");

            let config = ConfigLoader::load(None).map_err(|e| *e)?;
            assert_eq!(config.gateway.call_timeout_ms, 1500);
            assert!(!config.providers.places.enabled);
            Ok(())
        });
    }

    #[test]
    fn test_explicit_absolute_path() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[providers.places]\nenabled = false").unwrap();

        let path = file.path().to_path_buf();
        let config = ConfigLoader::load(Some(&path)).unwrap();
        assert!(!config.providers.places.enabled);
        assert!(config.providers.favorites.enabled);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        Jail::expect_with(|_jail| {
            let missing = PathBuf::from("nope.toml");
            let err = ConfigLoader::load(Some(&missing)).unwrap_err();
            assert!(err.to_string().contains("nope.toml"));
            Ok(())
        });
    }

    #[test]
    fn test_invalid_value_type_is_an_error() {
        Jail::expect_with(|jail| {
            jail.create_file("atlas.toml", "[gateway]\ncall_timeout_ms = \"soon\"\n")?;
            assert!(ConfigLoader::load(None).is_err());
            Ok(())
        });
    }

    #[test]
    fn test_sources_listing() {
        Jail::expect_with(|jail| {
            jail.create_file("atlas.toml", "")?;
            let explicit = PathBuf::from("other.toml");
            let sources = ConfigLoader::sources(Some(&explicit));

            let labels: Vec<&str> = sources.iter().map(|s| s.label).collect();
            assert_eq!(labels.first(), Some(&"Env"));
            assert_eq!(labels.last(), Some(&"Default"));

            let explicit = sources.iter().find(|s| s.label == "Explicit").unwrap();
            assert!(!explicit.found);
            let project = sources.iter().find(|s| s.label == "Project").unwrap();
            assert!(project.found);
            Ok(())
        });
    }
}
