//! Tabulated ("compiled") provider over a [`ChebyshevTable`].

use std::path::{Path, PathBuf};

use gochara_frames::normalize_360;
use tracing::info;

use crate::body::Body;
use crate::error::EphemError;
use crate::flags::PositionFlags;
use crate::provider::{Coverage, EclipticPosition, PositionProvider};
use crate::table::format::{Channel, ChebyshevTable};

/// Evaluates stored Chebyshev segments; speed comes from the series
/// derivative rather than finite differences.
#[derive(Debug, Clone)]
pub struct TabulatedProvider {
    table: ChebyshevTable,
    source: Option<PathBuf>,
}

impl TabulatedProvider {
    pub fn from_table(table: ChebyshevTable) -> Self {
        Self {
            table,
            source: None,
        }
    }

    /// Load a `GCHT` file.
    pub fn load(path: &Path) -> Result<Self, EphemError> {
        let table = ChebyshevTable::load(path)?;
        info!(
            path = %path.display(),
            bodies = table.series.len(),
            start_jd = table.start_jd,
            end_jd = table.end_jd,
            "loaded chebyshev table"
        );
        Ok(Self {
            table,
            source: Some(path.to_path_buf()),
        })
    }

    pub fn table(&self) -> &ChebyshevTable {
        &self.table
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl PositionProvider for TabulatedProvider {
    fn name(&self) -> &'static str {
        "tabulated"
    }

    fn coverage(&self) -> Coverage {
        Coverage::new(self.table.start_jd, self.table.end_jd)
    }

    fn position(
        &self,
        body: Body,
        jd_ut: f64,
        flags: PositionFlags,
    ) -> Result<EclipticPosition, EphemError> {
        self.coverage().check(jd_ut)?;
        let series = self
            .table
            .series(body)
            .ok_or_else(|| EphemError::DataUnavailable(format!("table has no {body} series")))?;
        let eval = |ch: Channel| {
            series
                .evaluate(ch, jd_ut)
                .ok_or(EphemError::OutOfRange { jd_ut })
        };

        let lon_channel = if flags.is_apparent() {
            Channel::ApparentLon
        } else {
            Channel::GeometricLon
        };
        let (lon, dlon) = eval(lon_channel)?;
        let (lat, _) = eval(Channel::LatitudeDeg)?;
        let (dist, _) = eval(Channel::DistanceAu)?;

        let speed = if flags.speed {
            dlon + flags.frame_offset_rate(jd_ut)
        } else {
            0.0
        };
        Ok(EclipticPosition {
            lon_deg: normalize_360(lon + flags.frame_offset_deg(jd_ut)),
            lat_deg: lat,
            distance_au: dist,
            speed_deg_per_day: speed,
        })
    }
}
