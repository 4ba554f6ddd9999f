//! Ephemeris session: the one long-lived, explicitly closed resource.
//!
//! An [`Ephemeris`] owns a backend behind an `RwLock`. Queries take the
//! read side and may run concurrently; [`Ephemeris::close`] takes the
//! write side, so it waits for in-flight queries and every later query
//! fails with [`EphemError::Closed`].
//!
//! ```no_run
//! use std::sync::Arc;
//! use gochara_ephem::{Body, Ephemeris, EphemerisConfig, PositionFlags, PositionProvider};
//!
//! let eph = Arc::new(Ephemeris::open(EphemerisConfig::default()).unwrap());
//! let worker = {
//!     let eph = Arc::clone(&eph);
//!     std::thread::spawn(move || eph.longitude(Body::Moon, 2_460_000.5, PositionFlags::default()))
//! };
//! let _ = worker.join().unwrap();
//! eph.close();
//! ```

use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::analytic::AnalyticProvider;
use crate::body::Body;
use crate::error::EphemError;
use crate::flags::PositionFlags;
use crate::provider::{Coverage, EclipticPosition, PositionProvider};
use crate::table::provider::TabulatedProvider;

/// Which backend a session opens.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Backend {
    /// Series models, no data files.
    #[default]
    Analytic,
    /// A `GCHT` Chebyshev table on disk.
    Tabulated { path: PathBuf },
}

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EphemerisConfig {
    pub backend: Backend,
}

impl EphemerisConfig {
    pub fn analytic() -> Self {
        Self {
            backend: Backend::Analytic,
        }
    }

    pub fn tabulated(path: impl Into<PathBuf>) -> Self {
        Self {
            backend: Backend::Tabulated { path: path.into() },
        }
    }

    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if let Backend::Tabulated { path } = &self.backend {
            if path.as_os_str().is_empty() {
                return Err("tabulated backend path must not be empty");
            }
        }
        Ok(())
    }
}

/// An open (or closed) ephemeris session.
pub struct Ephemeris {
    backend: RwLock<Option<Box<dyn PositionProvider>>>,
    label: &'static str,
    coverage: Coverage,
}

impl std::fmt::Debug for Ephemeris {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ephemeris")
            .field("backend", &self.label)
            .field("coverage", &self.coverage)
            .field("open", &self.is_open())
            .finish()
    }
}

impl Ephemeris {
    /// Open a session, loading any data files the backend needs.
    pub fn open(config: EphemerisConfig) -> Result<Self, EphemError> {
        config.validate().map_err(EphemError::InvalidConfig)?;
        let provider: Box<dyn PositionProvider> = match &config.backend {
            Backend::Analytic => Box::new(AnalyticProvider::new()),
            Backend::Tabulated { path } => Box::new(TabulatedProvider::load(path)?),
        };
        Ok(Self::from_boxed(provider))
    }

    /// Wrap an already constructed provider in a session.
    pub fn from_provider(provider: impl PositionProvider + 'static) -> Self {
        Self::from_boxed(Box::new(provider))
    }

    fn from_boxed(provider: Box<dyn PositionProvider>) -> Self {
        let label = provider.name();
        let coverage = provider.coverage();
        info!(
            backend = label,
            start_jd = coverage.start_jd_ut,
            end_jd = coverage.end_jd_ut,
            "ephemeris session opened"
        );
        Self {
            backend: RwLock::new(Some(provider)),
            label,
            coverage,
        }
    }

    /// Open, run `f`, and close on every exit path.
    pub fn with_session<T, E>(
        config: EphemerisConfig,
        f: impl FnOnce(&Ephemeris) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<EphemError>,
    {
        let session = Self::open(config)?;
        let result = f(&session);
        session.close();
        result
    }

    /// Release the backend. Idempotent.
    pub fn close(&self) {
        let mut guard = self.backend.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        if guard.take().is_some() {
            info!(backend = self.label, "ephemeris session closed");
        } else {
            debug!(backend = self.label, "ephemeris session already closed");
        }
    }

    pub fn is_open(&self) -> bool {
        self.read().is_some()
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<Box<dyn PositionProvider>>> {
        self.backend.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PositionProvider for Ephemeris {
    fn name(&self) -> &'static str {
        self.label
    }

    /// Coverage of the backend the session was opened with.
    fn coverage(&self) -> Coverage {
        self.coverage
    }

    fn position(
        &self,
        body: Body,
        jd_ut: f64,
        flags: PositionFlags,
    ) -> Result<EclipticPosition, EphemError> {
        match self.read().as_ref() {
            Some(provider) => provider.position(body, jd_ut, flags),
            None => Err(EphemError::Closed),
        }
    }
}

impl Drop for Ephemeris {
    fn drop(&mut self) {
        self.close();
    }
}
