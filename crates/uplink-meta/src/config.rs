//! Settings for processes that produce or read command metadata
//!
//! Loaded from a TOML file. Every section and key is optional:
//!
//! ```toml
//! [logging]
//! profile = "production"
//! filter = "uplink_meta=info"
//!
//! [defaults]
//! vcid = 2
//!
//! [wire]
//! format = "msgpack"
//! ```

use serde::Deserialize;
use std::path::Path;

use crate::errors::{CmdMetaError, Result};
use crate::logging_facility::{self, Profile};

/// Environment variable naming the settings file
pub const CONFIG_ENV: &str = "UPLINK_META_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub defaults: Defaults,
    pub wire: WireSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
    pub profile: Profile,
    pub filter: Option<String>,
}

/// Values applied to new records unless the caller overrides them
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Defaults {
    pub vcid: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WireSettings {
    pub format: WireFormat,
}

/// Encoding used when a marshalled record leaves the process
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WireFormat {
    #[default]
    Json,
    Msgpack,
}

impl Settings {
    /// Parse settings from TOML text
    ///
    /// # Errors
    ///
    /// Returns `CmdMetaError::Config` for malformed TOML, unknown keys or
    /// out-of-range values.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a settings file
    ///
    /// # Errors
    ///
    /// Returns `CmdMetaError::Io` if the file cannot be read and
    /// `CmdMetaError::Config` if it does not parse.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| CmdMetaError::Io {
            message: format!("{}: {}", path.display(), e),
        })?;
        let settings = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Load from the file named by `UPLINK_META_CONFIG`, or defaults when unset
    ///
    /// # Errors
    ///
    /// Same as [`Settings::from_path`] when the variable is set.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => Self::from_path(Path::new(&path)),
            _ => Ok(Self::default()),
        }
    }

    /// Install the logging subscriber described by these settings
    pub fn init_logging(&self) {
        logging_facility::init_with_filter(self.logging.profile, self.logging.filter.as_deref());
    }
}
