//! Cartesian → spherical conversion for ecliptic vectors.

/// Spherical coordinates: longitude, latitude, distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalCoords {
    /// Longitude in degrees, range [0, 360).
    pub lon_deg: f64,
    /// Latitude in degrees, range [-90, 90].
    pub lat_deg: f64,
    /// Distance from origin, in the input's length unit.
    pub distance: f64,
}

/// Convert Cartesian `[x, y, z]` to spherical coordinates.
///
/// Longitude is measured in the x-y plane from +x toward +y; latitude is
/// elevation above that plane. The zero vector maps to all zeros.
pub fn cartesian_to_spherical(xyz: &[f64; 3]) -> SphericalCoords {
    let [x, y, z] = *xyz;
    let r = (x * x + y * y + z * z).sqrt();
    if r == 0.0 {
        return SphericalCoords {
            lon_deg: 0.0,
            lat_deg: 0.0,
            distance: 0.0,
        };
    }
    SphericalCoords {
        lon_deg: crate::angle::normalize_360(y.atan2(x).to_degrees()),
        lat_deg: (z / r).asin().to_degrees(),
        distance: r,
    }
}
