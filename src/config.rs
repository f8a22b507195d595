//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/orbitmap/orbitmap.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `ORBITMAP_*` prefix (`__` separates sections)
//! 5. Command line flags (applied by the CLI via [`Settings::with_overrides`])

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::DEFAULT_ROOT;

/// Bodies whose orbited parents the transfer query connects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TransferConfig {
    /// Body the transfer starts from (default: YOU)
    pub from: String,
    /// Body the transfer ends at (default: SAN)
    pub to: String,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            from: "YOU".into(),
            to: "SAN".into(),
        }
    }
}

/// Unified configuration for orbitmap.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Name of the universal center of mass (default: COM)
    pub root: String,
    /// Transfer query endpoints
    pub transfer: TransferConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root: DEFAULT_ROOT.into(),
            transfer: TransferConfig::default(),
        }
    }
}

/// Get the XDG config directory for orbitmap.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "orbitmap").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("orbitmap.toml"))
}

impl Settings {
    /// Load settings with layered precedence from the standard locations.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; must exist when given
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let global = global_config_path();
        Self::load_layers(global.as_deref(), config_file)
    }

    /// Load settings from an optional global file and an optional explicit file,
    /// then apply `ORBITMAP_*` environment overrides.
    ///
    /// A missing global file is skipped; a missing explicit file is an error.
    pub fn load_layers(
        global: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("root", defaults.root)
            .map_err(config_err)?
            .set_default("transfer.from", defaults.transfer.from)
            .map_err(config_err)?
            .set_default("transfer.to", defaults.transfer.to)
            .map_err(config_err)?;

        if let Some(global_path) = global {
            debug!("global config: {}", global_path.display());
            builder = builder.add_source(
                File::from(global_path)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            debug!("explicit config: {}", path.display());
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("ORBITMAP")
                .prefix_separator("_")
                .separator("__"),
        );

        let config = builder.build().map_err(config_err)?;
        let settings: Self = config.try_deserialize().map_err(config_err)?;
        settings.validate()?;

        Ok(settings)
    }

    /// Apply command line overrides on top of loaded settings.
    pub fn with_overrides(
        mut self,
        root: Option<&str>,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Self, ApplicationError> {
        if let Some(root) = root {
            self.root = root.to_string();
        }
        if let Some(from) = from {
            self.transfer.from = from.to_string();
        }
        if let Some(to) = to {
            self.transfer.to = to.to_string();
        }
        self.validate()?;
        Ok(self)
    }

    /// Reject empty body names.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        let fields = [
            ("root", &self.root),
            ("transfer.from", &self.transfer.from),
            ("transfer.to", &self.transfer.to),
        ];
        match fields.iter().find(|(_, value)| value.is_empty()) {
            Some((key, _)) => Err(ApplicationError::Config {
                message: format!("{key} must not be empty"),
            }),
            None => Ok(()),
        }
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# orbitmap configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/orbitmap/orbitmap.toml
#   Explicit: file passed with --config
#   Env:      ORBITMAP_* environment variables (e.g. ORBITMAP_TRANSFER__FROM)
#   Flags:    --root, --from, --to

# Name of the universal center of mass
# root = "COM"

[transfer]
# Body whose parent the transfer starts at
# from = "YOU"

# Body whose parent the transfer ends at
# to = "SAN"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
