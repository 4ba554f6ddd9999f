//! Fit Chebyshev tables from any position provider.

use gochara_frames::unwrap_near;
use tracing::{debug, info};

use crate::body::{ALL_BODIES, Body};
use crate::chebyshev::{chebyshev_nodes, coefficients_from_nodes};
use crate::error::EphemError;
use crate::flags::{PositionFlags, PositionKind, Zodiac};
use crate::provider::PositionProvider;
use crate::table::format::{BodySeries, CHANNELS, ChebyshevTable, MAX_SEGMENTS};

/// Nominal segment length and series order for one body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentSpec {
    pub segment_days: f64,
    pub n_coeffs: usize,
}

impl SegmentSpec {
    pub fn new(segment_days: f64, n_coeffs: usize) -> Self {
        Self {
            segment_days,
            n_coeffs,
        }
    }

    /// Lengths chosen so the fit error stays well below 1e-4°.
    pub fn for_body(body: Body) -> Self {
        match body {
            Body::Moon => Self::new(4.0, 14),
            Body::Sun => Self::new(16.0, 12),
            Body::Mercury => Self::new(8.0, 14),
            Body::Venus | Body::Mars | Body::TrueNode => Self::new(8.0, 12),
            Body::Jupiter | Body::Saturn => Self::new(32.0, 12),
            Body::Uranus | Body::Neptune | Body::Pluto => Self::new(32.0, 10),
            Body::MeanNode => Self::new(32.0, 6),
        }
    }
}

/// Builds a [`ChebyshevTable`] over `[start_jd, end_jd]` (UT).
///
/// Each body's nominal segment length is shrunk so a whole number of
/// segments tiles the span exactly; no sample falls outside it.
#[derive(Debug, Clone, PartialEq)]
pub struct TableBuilder {
    start_jd: f64,
    end_jd: f64,
    bodies: Vec<(Body, SegmentSpec)>,
}

impl TableBuilder {
    /// All bodies with their default segment specs.
    pub fn new(start_jd: f64, end_jd: f64) -> Self {
        Self {
            start_jd,
            end_jd,
            bodies: ALL_BODIES
                .iter()
                .map(|&b| (b, SegmentSpec::for_body(b)))
                .collect(),
        }
    }

    pub fn with_bodies(mut self, bodies: &[Body]) -> Self {
        self.bodies = bodies
            .iter()
            .map(|&b| (b, SegmentSpec::for_body(b)))
            .collect();
        self
    }

    pub fn with_segment(mut self, body: Body, spec: SegmentSpec) -> Self {
        match self.bodies.iter_mut().find(|(b, _)| *b == body) {
            Some(entry) => entry.1 = spec,
            None => self.bodies.push((body, spec)),
        }
        self
    }

    fn validate(&self, provider: &dyn PositionProvider) -> Result<(), EphemError> {
        if !(self.start_jd.is_finite() && self.end_jd.is_finite() && self.start_jd < self.end_jd)
        {
            return Err(EphemError::InvalidConfig("table span must be finite and non-empty"));
        }
        if self.bodies.is_empty() {
            return Err(EphemError::InvalidConfig("table needs at least one body"));
        }
        for (_, spec) in &self.bodies {
            if !(spec.segment_days.is_finite() && spec.segment_days > 0.0) {
                return Err(EphemError::InvalidConfig("segment_days must be positive"));
            }
            if !(2..=64).contains(&spec.n_coeffs) {
                return Err(EphemError::InvalidConfig("n_coeffs must be in 2..=64"));
            }
            if segment_count(self.end_jd - self.start_jd, spec.segment_days) > MAX_SEGMENTS as f64 {
                return Err(EphemError::InvalidConfig("too many segments for the table span"));
            }
        }
        let cov = provider.coverage();
        cov.check(self.start_jd)?;
        cov.check(self.end_jd)?;
        Ok(())
    }

    pub fn build(&self, provider: &dyn PositionProvider) -> Result<ChebyshevTable, EphemError> {
        self.validate(provider)?;
        info!(
            source = provider.name(),
            bodies = self.bodies.len(),
            start_jd = self.start_jd,
            end_jd = self.end_jd,
            "building chebyshev table"
        );
        let series = self
            .bodies
            .iter()
            .map(|&(body, spec)| self.fit_body(provider, body, spec))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ChebyshevTable {
            start_jd: self.start_jd,
            end_jd: self.end_jd,
            series,
        })
    }

    fn fit_body(
        &self,
        provider: &dyn PositionProvider,
        body: Body,
        spec: SegmentSpec,
    ) -> Result<BodySeries, EphemError> {
        let span = self.end_jd - self.start_jd;
        let count = segment_count(span, spec.segment_days) as usize;
        let segment_days = span / count as f64;
        let half = 0.5 * segment_days;
        let nodes = chebyshev_nodes(spec.n_coeffs);

        let base = PositionFlags {
            zodiac: Zodiac::Tropical,
            position: PositionKind::True,
            nutation: false,
            speed: false,
        };
        let apparent = base.with_position(PositionKind::Apparent);

        let mut coeffs = Vec::with_capacity(count * CHANNELS * spec.n_coeffs);
        let mut samples = vec![Vec::with_capacity(spec.n_coeffs); CHANNELS];
        for seg in 0..count {
            let mid = self.start_jd + (seg as f64 + 0.5) * segment_days;
            samples.iter_mut().for_each(Vec::clear);
            for &x in &nodes {
                let jd = (mid + half * x).clamp(self.start_jd, self.end_jd);
                let geo = provider.position(body, jd, base)?;
                let app = provider.position(body, jd, apparent)?;
                push_unwrapped(&mut samples[0], geo.lon_deg);
                push_unwrapped(&mut samples[1], app.lon_deg);
                samples[2].push(geo.lat_deg);
                samples[3].push(geo.distance_au);
            }
            for channel in &samples {
                coeffs.extend(coefficients_from_nodes(channel));
            }
        }
        debug!(%body, segments = count, segment_days, "fitted body series");
        Ok(BodySeries {
            body,
            segment_days,
            n_coeffs: spec.n_coeffs,
            start_jd: self.start_jd,
            coeffs,
        })
    }
}

/// Append a longitude continuing the previous sample across 0°/360°.
/// Segments needed to tile `span` days, at least one.
fn segment_count(span: f64, segment_days: f64) -> f64 {
    (span / segment_days).ceil().max(1.0)
}

fn push_unwrapped(series: &mut Vec<f64>, lon: f64) {
    let value = match series.last() {
        Some(&prev) => unwrap_near(lon, prev),
        None => lon,
    };
    series.push(value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytic::AnalyticProvider;
    use crate::table::format::Channel;
    use gochara_frames::circular_distance;

    const JD0: f64 = 2_460_000.5;

    #[test]
    fn segments_tile_span_exactly() {
        let table = TableBuilder::new(JD0, JD0 + 30.0)
            .with_bodies(&[Body::Moon])
            .build(&AnalyticProvider)
            .unwrap();
        let s = table.series(Body::Moon).unwrap();
        // 30 days at nominal 4 → 8 segments of 3.75 days
        assert_eq!(s.segment_count(), 8);
        assert!((s.segment_days - 3.75).abs() < 1e-12);
        assert!((s.end_jd() - (JD0 + 30.0)).abs() < 1e-9);
    }

    #[test]
    fn fit_matches_source_between_nodes() {
        let table = TableBuilder::new(JD0, JD0 + 20.0)
            .with_bodies(&[Body::Moon, Body::Mercury])
            .build(&AnalyticProvider)
            .unwrap();
        let flags = PositionFlags::default()
            .with_position(PositionKind::True)
            .with_nutation(false);
        for body in [Body::Moon, Body::Mercury] {
            let s = table.series(body).unwrap();
            for i in 0..=80 {
                let jd = JD0 + i as f64 * 0.25;
                let (fit, _) = s.evaluate(Channel::GeometricLon, jd).unwrap();
                let truth = AnalyticProvider.position(body, jd, flags).unwrap().lon_deg;
                assert!(circular_distance(fit, truth).abs() < 1e-5, "{body} at {jd}");
            }
        }
    }

    #[test]
    fn rejects_span_outside_source() {
        let err = TableBuilder::new(2_300_000.5, 2_300_010.5)
            .build(&AnalyticProvider)
            .unwrap_err();
        assert!(matches!(err, EphemError::OutOfRange { .. }));
    }

    #[test]
    fn rejects_bad_spec() {
        let err = TableBuilder::new(JD0, JD0 + 10.0)
            .with_segment(Body::Sun, SegmentSpec::new(8.0, 1))
            .build(&AnalyticProvider)
            .unwrap_err();
        assert_eq!(err, EphemError::InvalidConfig("n_coeffs must be in 2..=64"));
    }

    #[test]
    fn rejects_segment_count_the_loader_would_refuse() {
        let err = TableBuilder::new(JD0, JD0 + 10.0)
            .with_segment(Body::Sun, SegmentSpec::new(1e-9, 8))
            .build(&AnalyticProvider)
            .unwrap_err();
        assert_eq!(err, EphemError::InvalidConfig("too many segments for the table span"));
    }

    #[test]
    fn unwrap_crosses_seam() {
        let mut v = Vec::new();
        for lon in [358.0, 359.5, 1.0, 2.5] {
            push_unwrapped(&mut v, lon);
        }
        assert_eq!(v, vec![358.0, 359.5, 361.0, 362.5]);
    }
}
