//! `proj4rs` backend for projection families without a native implementation.

use std::fmt;

use proj4rs::Proj;

use crate::error::ProjError;
use crate::proj::definition::ProjString;

/// A geographic/projected pair of `proj4rs` definitions sharing one datum.
///
/// Angles cross this boundary in radians, like the native projections.
pub struct Proj4Fallback {
    definition: String,
    geographic: Proj,
    projected: Proj,
}

impl Proj4Fallback {
    /// Build both endpoints. When the definition carries no ellipsoid,
    /// `ellps_default` is appended to both.
    ///
    /// # Errors
    ///
    /// Returns [`ProjError::Unsupported`] when `proj4rs` rejects the string.
    pub fn new(def: &ProjString, ellps_default: Option<&str>) -> Result<Self, ProjError> {
        let (projected_src, shape) = if def.has_shape() {
            (def.definition().to_string(), def.shape_fragment())
        } else {
            match ellps_default {
                Some(ellps) => (format!("{} +ellps={ellps}", def.definition()), format!("+ellps={ellps}")),
                None => (def.definition().to_string(), String::new()),
            }
        };
        let geographic_src = format!("+proj=longlat {shape}");

        let build = |src: &str| {
            Proj::from_user_string(src).map_err(|e| ProjError::Unsupported(format!("{src}: {e}")))
        };
        Ok(Self {
            definition: projected_src.clone(),
            geographic: build(geographic_src.trim())?,
            projected: build(&projected_src)?,
        })
    }

    /// (lon_rad, lat_rad) -> projected.
    pub fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        self.run(&self.geographic, &self.projected, (lon, lat))
    }

    /// Projected -> (lon_rad, lat_rad).
    pub fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        self.run(&self.projected, &self.geographic, (x, y))
    }

    /// The definition handed to `proj4rs`, including any appended ellipsoid.
    pub fn definition(&self) -> &str {
        &self.definition
    }

    fn run(&self, src: &Proj, dst: &Proj, mut point: (f64, f64)) -> Result<(f64, f64), ProjError> {
        if !point.0.is_finite() || !point.1.is_finite() {
            return Err(ProjError::OutsideDomain);
        }
        proj4rs::transform::transform(src, dst, &mut point)
            .map_err(|e| ProjError::TransformFailed(e.to_string()))?;
        if point.0.is_finite() && point.1.is_finite() {
            Ok(point)
        } else {
            Err(ProjError::OutsideDomain)
        }
    }
}

impl fmt::Debug for Proj4Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Proj4Fallback").field("definition", &self.definition).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_utm_roundtrip() {
        let def = ProjString::parse("+proj=utm +zone=33 +ellps=WGS84 +units=m").unwrap();
        let fb = Proj4Fallback::new(&def, None).unwrap();
        let (lon, lat) = (10.75_f64.to_radians(), 59.91_f64.to_radians());
        let (e, n) = fb.forward(lon, lat).unwrap();
        assert!(e > 200_000.0 && e < 800_000.0, "easting out of range: {e}");
        assert!(n > 6_000_000.0 && n < 7_000_000.0, "northing out of range: {n}");
        let (lon2, lat2) = fb.inverse(e, n).unwrap();
        assert_relative_eq!(lon2, lon, epsilon = 1e-9);
        assert_relative_eq!(lat2, lat, epsilon = 1e-9);
    }

    #[test]
    fn test_default_ellipsoid_appended() {
        let def = ProjString::parse("+proj=tmerc +lon_0=9").unwrap();
        let fb = Proj4Fallback::new(&def, Some("WGS84")).unwrap();
        assert!(fb.definition().ends_with("+ellps=WGS84"));
    }

    #[test]
    fn test_unknown_family_rejected() {
        let def = ProjString::parse("+proj=notaprojection +ellps=WGS84").unwrap();
        assert!(matches!(Proj4Fallback::new(&def, None), Err(ProjError::Unsupported(_))));
    }

    #[test]
    fn test_nan_input() {
        let def = ProjString::parse("+proj=utm +zone=33 +ellps=WGS84").unwrap();
        let fb = Proj4Fallback::new(&def, None).unwrap();
        assert_eq!(fb.forward(f64::NAN, 0.0), Err(ProjError::OutsideDomain));
    }
}
