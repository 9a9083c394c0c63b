//! Single entry point for projecting coordinates given a PROJ string.

use tracing::debug;

use crate::error::ProjError;
use crate::proj::definition::ProjString;
use crate::proj::equirectangular::Equirectangular;
use crate::proj::fallback::Proj4Fallback;
use crate::proj::mercator::Mercator;
use crate::proj::mollweide::Mollweide;
use crate::proj::robinson::Robinson;
use crate::proj::sinusoidal::Sinusoidal;
use crate::proj::{Origin, Projection};

#[derive(Debug)]
enum Backend {
    /// Geographic definitions pass angles through unchanged.
    LongLat,
    Native(Box<dyn Projection>),
    Fallback(Box<Proj4Fallback>),
}

/// A resolved projection: parsed once, then applied point by point.
#[derive(Debug)]
pub struct Projector {
    definition: ProjString,
    backend: Backend,
    to_meter: f64,
}

impl Projector {
    /// Resolve `definition`, using `ellps_default` when it names no ellipsoid.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is malformed, names an unknown
    /// ellipsoid or unit, or the family is unsupported by every backend.
    pub fn new(definition: &str, ellps_default: Option<&str>) -> Result<Self, ProjError> {
        let def = ProjString::parse(definition)?;
        let (backend, to_meter) = if def.is_geographic() {
            (Backend::LongLat, 1.0)
        } else if let Some(native) = native(&def, ellps_default)? {
            (Backend::Native(native), def.to_meter()?)
        } else {
            (Backend::Fallback(Box::new(Proj4Fallback::new(&def, ellps_default)?)), 1.0)
        };
        debug!(
            family = def.projection(),
            backend = match backend {
                Backend::LongLat => "longlat",
                Backend::Native(_) => "native",
                Backend::Fallback(_) => "proj4rs",
            },
            "resolved projection"
        );
        Ok(Self { definition: def, backend, to_meter })
    }

    /// The parsed definition.
    #[must_use]
    pub fn definition(&self) -> &ProjString {
        &self.definition
    }

    /// Whether angles pass through without projection.
    #[must_use]
    pub fn is_geographic(&self) -> bool {
        matches!(self.backend, Backend::LongLat)
    }

    /// Project one point, returning `(NaN, NaN)` when it cannot be projected.
    ///
    /// Forward input (and inverse output) is in degrees when `degrees` is set,
    /// radians otherwise.
    #[must_use]
    pub fn project(&self, x: f64, y: f64, inverse: bool, degrees: bool) -> (f64, f64) {
        let result = if inverse { self.try_inverse(x, y, degrees) } else { self.try_forward(x, y, degrees) };
        result.unwrap_or((f64::NAN, f64::NAN))
    }

    /// Geographic to projected coordinates.
    ///
    /// # Errors
    ///
    /// Returns an error when the point lies outside the projection domain.
    pub fn try_forward(&self, lon: f64, lat: f64, degrees: bool) -> Result<(f64, f64), ProjError> {
        let (lam, phi) = if degrees { (lon.to_radians(), lat.to_radians()) } else { (lon, lat) };
        match &self.backend {
            Backend::LongLat => finite(lon, lat),
            Backend::Native(p) => {
                let (x, y) = p.forward(lam, phi)?;
                finite(x / self.to_meter, y / self.to_meter)
            }
            Backend::Fallback(p) => p.forward(lam, phi),
        }
    }

    /// Projected to geographic coordinates.
    ///
    /// # Errors
    ///
    /// Returns an error when the point has no geographic counterpart.
    pub fn try_inverse(&self, x: f64, y: f64, degrees: bool) -> Result<(f64, f64), ProjError> {
        let (lam, phi) = match &self.backend {
            Backend::LongLat => return finite(x, y),
            Backend::Native(p) => p.inverse(x * self.to_meter, y * self.to_meter)?,
            Backend::Fallback(p) => p.inverse(x, y)?,
        };
        if degrees { finite(lam.to_degrees(), phi.to_degrees()) } else { finite(lam, phi) }
    }
}

fn finite(x: f64, y: f64) -> Result<(f64, f64), ProjError> {
    if x.is_finite() && y.is_finite() { Ok((x, y)) } else { Err(ProjError::OutsideDomain) }
}

/// Native implementation for the families implemented in this crate.
fn native(def: &ProjString, ellps_default: Option<&str>) -> Result<Option<Box<dyn Projection>>, ProjError> {
    let family = def.projection();
    if !matches!(family, "robin" | "moll" | "sinu" | "eqc" | "merc") {
        return Ok(None);
    }
    let ellipsoid = def.ellipsoid(ellps_default)?;
    let origin = Origin::from_definition(def)?;
    let lat_ts = def.get_f64("lat_ts")?.unwrap_or(0.0).to_radians();

    let projection: Box<dyn Projection> = match family {
        "robin" => Box::new(Robinson::new(ellipsoid, origin)),
        "moll" => Box::new(Mollweide::new(ellipsoid, origin)),
        "sinu" => Box::new(Sinusoidal::new(ellipsoid, origin)),
        "eqc" => Box::new(Equirectangular::new(ellipsoid, origin, lat_ts)?),
        _ => match def.get_f64("k_0")?.or(def.get_f64("k")?) {
            Some(k0) => Box::new(Mercator::with_scale(ellipsoid, origin, k0)),
            None => Box::new(Mercator::with_lat_ts(ellipsoid, origin, lat_ts)),
        },
    };
    Ok(Some(projection))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const ROBIN: &str = "+proj=robin +lon_0=0 +x_0=0 +y_0=0 +ellps=WGS84 +datum=WGS84 +units=m +no_defs";

    #[test]
    fn test_robinson_origin_roundtrip() {
        let p = Projector::new(ROBIN, Some("sphere")).unwrap();
        let (x, y) = p.project(0.0, 0.0, false, true);
        assert!(x.is_finite() && y.is_finite());
        let (lon, lat) = p.project(x, y, true, true);
        assert_relative_eq!(lon, 0.0, epsilon = 1e-9);
        assert_relative_eq!(lat, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_units_scale_native_output() {
        let m = Projector::new("+proj=eqc +ellps=WGS84", None).unwrap();
        let km = Projector::new("+proj=eqc +ellps=WGS84 +units=km", None).unwrap();
        let (xm, _) = m.project(10.0, 0.0, false, true);
        let (xkm, _) = km.project(10.0, 0.0, false, true);
        assert_relative_eq!(xm / 1000.0, xkm, max_relative = 1e-12);
        let (lon, _) = km.project(xkm, 0.0, true, true);
        assert_relative_eq!(lon, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_polar_true_scale_parallel_rejected() {
        assert!(Projector::new("+proj=eqc +lat_ts=90 +ellps=WGS84", None).is_err());
        assert!(Projector::new("+proj=eqc +lat_ts=-90 +ellps=WGS84", None).is_err());
        assert!(Projector::new("+proj=eqc +lat_ts=60 +ellps=WGS84", None).is_ok());
    }

    #[test]
    fn test_longlat_passthrough() {
        let p = Projector::new("+proj=longlat +datum=WGS84", None).unwrap();
        assert!(p.is_geographic());
        assert_eq!(p.project(12.5, -3.0, false, true), (12.5, -3.0));
        assert_eq!(p.project(12.5, -3.0, true, true), (12.5, -3.0));
    }

    #[test]
    fn test_failure_is_nan() {
        let p = Projector::new("+proj=merc +ellps=WGS84", None).unwrap();
        let (x, y) = p.project(0.0, 90.0, false, true);
        assert!(x.is_nan() && y.is_nan());
    }

    #[test]
    fn test_radians_mode() {
        let p = Projector::new("+proj=sinu +R=1", None).unwrap();
        let (x, y) = p.project(0.5, 0.0, false, false);
        assert_relative_eq!(x, 0.5, epsilon = 1e-12);
        assert_relative_eq!(y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_missing_ellipsoid_rejected() {
        assert!(matches!(Projector::new("+proj=robin", None), Err(ProjError::MissingEllipsoid(_))));
        assert!(Projector::new("+proj=robin", Some("sphere")).is_ok());
    }

    #[test]
    fn test_fallback_family() {
        let p = Projector::new("+proj=utm +zone=32 +ellps=WGS84", None).unwrap();
        assert!(!p.is_geographic());
        let (x, y) = p.project(9.0, 48.0, false, true);
        assert_relative_eq!(x, 500_000.0, epsilon = 1e-3);
        assert!(y > 5_000_000.0);
    }
}
