//! TOML configuration for the CLI.
//!
//! ```toml
//! [ephemeris.backend]
//! kind = "tabulated"
//! path = "tables/2000-2040.gcht"
//!
//! [solver]
//! tolerance_deg = 1e-6
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use gochara_ephem::EphemerisConfig;
use gochara_search::SolverConfig;
use serde::Deserialize;
use tracing::debug;

/// Everything a config file may set. Missing sections take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub ephemeris: EphemerisConfig,
    pub solver: SolverConfig,
}

#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "cannot read config {}: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid config {}: {source}", path.display())
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

impl CliConfig {
    /// Defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), ?config, "config loaded");
        Ok(config)
    }

    /// `--tables` overrides whatever backend the file chose.
    pub fn with_tables(mut self, tables: Option<PathBuf>) -> Self {
        if let Some(path) = tables {
            self.ephemeris = EphemerisConfig::tabulated(path);
        }
        self
    }
}
