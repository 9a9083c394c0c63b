//! Reference ellipsoids.

use crate::error::ProjError;

/// Reference ellipsoid parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    /// Semi-major axis (metres)
    pub a: f64,
    /// Flattening (dimensionless)
    pub f: f64,
    /// Semi-minor axis: a * (1 - f)
    pub b: f64,
    /// First eccentricity squared
    pub e2: f64,
}

impl Ellipsoid {
    /// Ellipsoid from semi-major axis and flattening.
    pub const fn new(a: f64, f: f64) -> Self {
        Self { a, f, b: a * (1.0 - f), e2: 2.0 * f - f * f }
    }

    /// Ellipsoid from semi-major axis and inverse flattening (`rf = 0` is a sphere).
    pub fn from_rf(a: f64, rf: f64) -> Self {
        if rf == 0.0 {
            Self::new(a, 0.0)
        } else {
            Self::new(a, 1.0 / rf)
        }
    }

    /// Sphere of radius `r`.
    pub const fn sphere(r: f64) -> Self {
        Self::new(r, 0.0)
    }

    /// Get the first eccentricity (computed at runtime).
    pub fn eccentricity(&self) -> f64 {
        self.e2.sqrt()
    }

    /// Whether the ellipsoid has no flattening.
    pub fn is_sphere(&self) -> bool {
        self.f == 0.0
    }

    /// Look up one of PROJ's named ellipsoids (`+ellps=`).
    ///
    /// # Errors
    ///
    /// Returns [`ProjError::UnknownEllipsoid`] for names outside the table.
    pub fn from_name(name: &str) -> Result<Self, ProjError> {
        match name {
            "WGS84" => Ok(WGS84),
            "GRS80" => Ok(GRS80),
            "WGS72" => Ok(Self::from_rf(6_378_135.0, 298.26)),
            "sphere" => Ok(SPHERE),
            "clrk66" => Ok(CLARKE_1866),
            "clrk80" => Ok(Self::from_rf(6_378_249.145, 293.4663)),
            "intl" => Ok(Self::from_rf(6_378_388.0, 297.0)),
            "bessel" => Ok(Self::from_rf(6_377_397.155, 299.152_812_8)),
            "krass" => Ok(Self::from_rf(6_378_245.0, 298.3)),
            "airy" => Ok(Self::new(6_377_563.396, 1.0 - 6_356_256.910 / 6_377_563.396)),
            "aust_SA" => Ok(Self::from_rf(6_378_160.0, 298.25)),
            _ => Err(ProjError::UnknownEllipsoid(name.to_string())),
        }
    }

    /// Ellipsoid implied by a `+datum=` name.
    pub fn from_datum(datum: &str) -> Option<Self> {
        match datum {
            "WGS84" => Some(WGS84),
            "NAD83" => Some(GRS80),
            "NAD27" => Some(CLARKE_1866),
            "potsdam" => Some(Self::from_rf(6_377_397.155, 299.152_812_8)),
            "OSGB36" => Some(Self::new(6_377_563.396, 1.0 - 6_356_256.910 / 6_377_563.396)),
            _ => None,
        }
    }
}

/// World Geodetic System 1984.
pub const WGS84: Ellipsoid = Ellipsoid::new(6_378_137.0, 1.0 / 298.257_223_563);
/// Geodetic Reference System 1980.
pub const GRS80: Ellipsoid = Ellipsoid::new(6_378_137.0, 1.0 / 298.257_222_101);
/// PROJ's `sphere`: the normal sphere of radius 6 370 997 m.
pub const SPHERE: Ellipsoid = Ellipsoid::sphere(6_370_997.0);
/// Clarke 1866 (NAD27).
pub const CLARKE_1866: Ellipsoid = Ellipsoid::new(6_378_206.4, 1.0 - 6_356_583.8 / 6_378_206.4);
