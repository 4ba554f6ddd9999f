//! `GCHT` table file: per-body Chebyshev segments, little-endian.
//!
//! ```text
//! header   magic "GCHT" | version u16 | body_count u16 | start_jd f64 | end_jd f64
//! per body code u8 | n_coeffs u8 | reserved u16 | segment_days f64 | segment_count u32
//!          segment_count × CHANNELS × n_coeffs f64   (segment-major, then channel)
//! ```
//!
//! Longitude channels are unwrapped within each segment, so evaluation may
//! return values outside [0, 360); callers normalise.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::body::Body;
use crate::chebyshev::{clenshaw, clenshaw_derivative};
use crate::error::EphemError;

pub const TABLE_MAGIC: [u8; 4] = *b"GCHT";
pub const TABLE_VERSION: u16 = 1;
/// Channels stored per segment.
pub const CHANNELS: usize = 4;
const MAX_COEFFS: u8 = 64;
pub(crate) const MAX_SEGMENTS: u32 = 10_000_000;

/// One stored quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Geometric longitude, mean equinox of date, degrees.
    GeometricLon = 0,
    /// Light-time corrected longitude, mean equinox of date, degrees.
    ApparentLon = 1,
    LatitudeDeg = 2,
    DistanceAu = 3,
}

/// Fixed-length segments covering one body from the table start.
#[derive(Debug, Clone, PartialEq)]
pub struct BodySeries {
    pub body: Body,
    pub segment_days: f64,
    pub n_coeffs: usize,
    pub start_jd: f64,
    /// `[segment][channel][coeff]`, flattened.
    pub coeffs: Vec<f64>,
}

impl BodySeries {
    pub fn segment_count(&self) -> usize {
        self.coeffs.len() / (CHANNELS * self.n_coeffs)
    }

    pub fn end_jd(&self) -> f64 {
        self.start_jd + self.segment_count() as f64 * self.segment_days
    }

    /// `(value, d value / d day)` for a channel, or `None` outside the series.
    pub fn evaluate(&self, channel: Channel, jd: f64) -> Option<(f64, f64)> {
        let count = self.segment_count();
        if count == 0 || !(jd >= self.start_jd && jd <= self.end_jd()) {
            return None;
        }
        let idx = (((jd - self.start_jd) / self.segment_days).floor() as usize).min(count - 1);
        let seg_start = self.start_jd + idx as f64 * self.segment_days;
        let half = 0.5 * self.segment_days;
        let s = ((jd - seg_start) / half - 1.0).clamp(-1.0, 1.0);
        let base = (idx * CHANNELS + channel as usize) * self.n_coeffs;
        let c = &self.coeffs[base..base + self.n_coeffs];
        Some((clenshaw(c, s), clenshaw_derivative(c, s) / half))
    }
}

/// A loaded or freshly built table.
#[derive(Debug, Clone, PartialEq)]
pub struct ChebyshevTable {
    pub start_jd: f64,
    pub end_jd: f64,
    pub series: Vec<BodySeries>,
}

impl ChebyshevTable {
    pub fn series(&self, body: Body) -> Option<&BodySeries> {
        self.series.iter().find(|s| s.body == body)
    }

    pub fn bodies(&self) -> impl Iterator<Item = Body> + '_ {
        self.series.iter().map(|s| s.body)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let payload: usize = self.series.iter().map(|s| 16 + 8 * s.coeffs.len()).sum();
        let mut out = Vec::with_capacity(24 + payload);
        out.extend_from_slice(&TABLE_MAGIC);
        out.extend_from_slice(&TABLE_VERSION.to_le_bytes());
        out.extend_from_slice(&(self.series.len() as u16).to_le_bytes());
        out.extend_from_slice(&self.start_jd.to_le_bytes());
        out.extend_from_slice(&self.end_jd.to_le_bytes());
        for s in &self.series {
            out.push(s.body.code());
            out.push(s.n_coeffs as u8);
            out.extend_from_slice(&0u16.to_le_bytes());
            out.extend_from_slice(&s.segment_days.to_le_bytes());
            out.extend_from_slice(&(s.segment_count() as u32).to_le_bytes());
            for c in &s.coeffs {
                out.extend_from_slice(&c.to_le_bytes());
            }
        }
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EphemError> {
        let mut r = Reader { buf: bytes, pos: 0 };
        if r.take(4)? != TABLE_MAGIC {
            return Err(EphemError::InvalidData("not a GCHT table (bad magic)".into()));
        }
        let version = r.u16()?;
        if version != TABLE_VERSION {
            return Err(EphemError::InvalidData(format!(
                "unsupported table version {version}"
            )));
        }
        let body_count = r.u16()? as usize;
        let start_jd = r.f64()?;
        let end_jd = r.f64()?;
        if !(start_jd.is_finite() && end_jd.is_finite() && start_jd < end_jd) {
            return Err(EphemError::InvalidData("bad table time span".into()));
        }

        let mut series = Vec::with_capacity(body_count.min(16));
        for _ in 0..body_count {
            let code = r.u8()?;
            let body = Body::from_code(code)
                .ok_or_else(|| EphemError::InvalidData(format!("unknown body code {code}")))?;
            let n_coeffs = r.u8()?;
            let _reserved = r.u16()?;
            let segment_days = r.f64()?;
            let segment_count = r.u32()?;
            if n_coeffs == 0 || n_coeffs > MAX_COEFFS {
                return Err(EphemError::InvalidData(format!(
                    "{body}: coefficient count {n_coeffs} out of range"
                )));
            }
            if !(segment_days.is_finite() && segment_days > 0.0) {
                return Err(EphemError::InvalidData(format!("{body}: bad segment length")));
            }
            if segment_count == 0 || segment_count > MAX_SEGMENTS {
                return Err(EphemError::InvalidData(format!(
                    "{body}: segment count {segment_count} out of range"
                )));
            }
            if start_jd + segment_count as f64 * segment_days < end_jd {
                return Err(EphemError::InvalidData(format!(
                    "{body}: segments stop short of the table end"
                )));
            }
            let n = segment_count as usize * CHANNELS * n_coeffs as usize;
            if n.checked_mul(8).is_none_or(|len| len > r.remaining()) {
                return Err(EphemError::InvalidData(format!(
                    "{body}: truncated, {n} coefficients declared but {} bytes left",
                    r.remaining()
                )));
            }
            let mut coeffs = Vec::with_capacity(n);
            for _ in 0..n {
                coeffs.push(r.f64()?);
            }
            series.push(BodySeries {
                body,
                segment_days,
                n_coeffs: n_coeffs as usize,
                start_jd,
                coeffs,
            });
        }
        if r.pos != bytes.len() {
            return Err(EphemError::InvalidData(format!(
                "{} trailing bytes after last series",
                bytes.len() - r.pos
            )));
        }
        Ok(Self {
            start_jd,
            end_jd,
            series,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), EphemError> {
        let mut file = fs::File::create(path)?;
        file.write_all(&self.to_bytes())?;
        file.flush()?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, EphemError> {
        let bytes = fs::read(path).map_err(|e| {
            EphemError::DataUnavailable(format!("{}: {e}", path.display()))
        })?;
        Self::from_bytes(&bytes)
    }
}

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], EphemError> {
        let end = self.pos + n;
        let chunk = self
            .buf
            .get(self.pos..end)
            .ok_or_else(|| EphemError::InvalidData(format!("truncated at byte {}", self.pos)))?;
        self.pos = end;
        Ok(chunk)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], EphemError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn u8(&mut self) -> Result<u8, EphemError> {
        Ok(self.array::<1>()?[0])
    }

    fn u16(&mut self) -> Result<u16, EphemError> {
        Ok(u16::from_le_bytes(self.array()?))
    }

    fn u32(&mut self) -> Result<u32, EphemError> {
        Ok(u32::from_le_bytes(self.array()?))
    }

    fn f64(&mut self) -> Result<f64, EphemError> {
        Ok(f64::from_le_bytes(self.array()?))
    }
}
