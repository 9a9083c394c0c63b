//! Robinson projection (spherical, table based).
//!
//! The parallels are interpolated from Robinson's 5° table with cubic
//! polynomials per interval:
//!   forward: x = a·FXC·X(φ)·(λ - λ₀), y = a·FYC·Y(φ)
//!   inverse: Newton iteration on Y inside the bracketing interval

use crate::error::ProjError;
use crate::proj::common::adjlon;
use crate::proj::ellipsoid::Ellipsoid;
use crate::proj::{Origin, Projection};

/// Cubic coefficients `c0 + z·(c1 + z·(c2 + z·c3))` per 5° node.
type Coefs = [f64; 4];

#[rustfmt::skip]
const X: [Coefs; 19] = [
    [1.0,    2.2199e-17,   -7.15515e-05,  3.1103e-06],
    [0.9986, -0.000482243, -2.4897e-05,   -1.3309e-06],
    [0.9954, -0.00083103,  -4.48605e-05,  -9.86701e-07],
    [0.99,   -0.00135364,  -5.9661e-05,   3.6777e-06],
    [0.9822, -0.00167442,  -4.49547e-06,  -5.72411e-06],
    [0.973,  -0.00214868,  -9.03571e-05,  1.8736e-08],
    [0.96,   -0.00305085,  -9.00761e-05,  1.64917e-06],
    [0.9427, -0.00382792,  -6.53386e-05,  -2.6154e-06],
    [0.9216, -0.00467746,  -0.00010457,   4.81243e-06],
    [0.8962, -0.00536223,  -3.23831e-05,  -5.43432e-06],
    [0.8679, -0.00609363,  -0.000113898,  3.32484e-06],
    [0.835,  -0.00698325,  -6.40253e-05,  9.34959e-07],
    [0.7986, -0.00755338,  -5.00009e-05,  9.35324e-07],
    [0.7597, -0.00798324,  -3.5971e-05,   -2.27626e-06],
    [0.7186, -0.00851367,  -7.01149e-05,  -8.6303e-06],
    [0.6732, -0.00986209,  -0.000199569,  1.91974e-05],
    [0.6213, -0.010418,    8.83923e-05,   6.24051e-06],
    [0.5722, -0.00906601,  0.000182,      6.24051e-06],
    [0.5322, -0.00677797,  0.000275608,   6.24051e-06],
];

#[rustfmt::skip]
const Y: [Coefs; 19] = [
    [-5.20417e-18, 0.0124,     1.21431e-18,  -8.45284e-11],
    [0.062,        0.0124,     -1.26793e-09, 4.22642e-10],
    [0.124,        0.0124,     5.07171e-09,  -1.60604e-09],
    [0.186,        0.0123999,  -1.90189e-08, 6.00152e-09],
    [0.248,        0.0124002,  7.10039e-08,  -2.24e-08],
    [0.31,         0.0123992,  -2.64997e-07, 8.35986e-08],
    [0.372,        0.0124029,  9.88983e-07,  -3.11994e-07],
    [0.434,        0.0123893,  -3.69093e-06, -4.35621e-07],
    [0.4958,       0.0123198,  -1.02252e-05, -3.45523e-07],
    [0.5571,       0.0121916,  -1.54081e-05, -5.82288e-07],
    [0.6176,       0.0119938,  -2.41424e-05, -5.25327e-07],
    [0.6769,       0.011713,   -3.20223e-05, -5.16405e-07],
    [0.7346,       0.0113541,  -3.97684e-05, -6.09052e-07],
    [0.7903,       0.0109107,  -4.89042e-05, -1.04739e-06],
    [0.8435,       0.0103431,  -6.4615e-05,  -1.40374e-09],
    [0.8936,       0.00969686, -6.4636e-05,  -8.547e-06],
    [0.9394,       0.00840947, -0.000192841, -4.2106e-06],
    [0.9761,       0.00616527, -0.000256,    -4.2106e-06],
    [1.0,          0.00328947, -0.000319159, -4.2106e-06],
];

const FXC: f64 = 0.8487;
const FYC: f64 = 1.3523;
/// Nodes per radian: 180 / (5π).
const C1: f64 = 11.459_155_902_616_464;
/// Node spacing in radians (5°).
const RC1: f64 = 0.087_266_462_599_716_47;
const NODES: usize = 18;
const ONEEPS: f64 = 1.000_001;
const EPS: f64 = 1e-10;
const MAX_ITER: usize = 100;

fn v(c: &Coefs, z: f64) -> f64 {
    c[0] + z * (c[1] + z * (c[2] + z * c[3]))
}

fn dv(c: &Coefs, z: f64) -> f64 {
    c[1] + 2.0 * z * c[2] + z * z * 3.0 * c[3]
}

/// Robinson pseudo-cylindrical projection from tabulated coefficients.
#[derive(Debug, Clone)]
pub struct Robinson {
    ellipsoid: Ellipsoid,
    origin: Origin,
}

impl Robinson {
    /// Robinson is defined on the sphere; only `a` of the ellipsoid is used.
    pub fn new(ellipsoid: Ellipsoid, origin: Origin) -> Self {
        Self { ellipsoid, origin }
    }
}

impl Projection for Robinson {
    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        if !lon.is_finite() || !lat.is_finite() {
            return Err(ProjError::OutsideDomain);
        }
        let lam = adjlon(lon - self.origin.lon0);
        let dphi = lat.abs();
        let i = ((dphi * C1 + 1e-15).floor() as usize).min(NODES);
        let dphi = (dphi - RC1 * i as f64).to_degrees();

        let x = v(&X[i], dphi) * FXC * lam;
        let y = v(&Y[i], dphi) * FYC;
        let y = if lat < 0.0 { -y } else { y };

        Ok((
            self.ellipsoid.a * x + self.origin.false_easting,
            self.ellipsoid.a * y + self.origin.false_northing,
        ))
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(ProjError::OutsideDomain);
        }
        let x = (x - self.origin.false_easting) / self.ellipsoid.a / FXC;
        let y = (y - self.origin.false_northing) / self.ellipsoid.a / FYC;

        let abs_y = y.abs();
        let (lam, phi) = if abs_y >= 1.0 {
            if abs_y > ONEEPS {
                return Err(ProjError::OutsideDomain);
            }
            (x / X[NODES][0], std::f64::consts::FRAC_PI_2)
        } else {
            let mut i = (abs_y * NODES as f64).floor() as usize;
            if i >= NODES {
                return Err(ProjError::OutsideDomain);
            }
            loop {
                if Y[i][0] > abs_y && i > 0 {
                    i -= 1;
                } else if Y[i + 1][0] <= abs_y && i + 1 < NODES {
                    i += 1;
                } else {
                    break;
                }
            }
            let node = &Y[i];
            // first guess: linear interpolation inside the interval
            let mut t = 5.0 * (abs_y - node[0]) / (Y[i + 1][0] - node[0]);
            let mut converged = false;
            for _ in 0..MAX_ITER {
                let step = (v(node, t) - abs_y) / dv(node, t);
                t -= step;
                if step.abs() < EPS {
                    converged = true;
                    break;
                }
            }
            if !converged {
                return Err(ProjError::TransformFailed("Robinson inverse did not converge".into()));
            }
            let phi = (5.0 * i as f64 + t).to_radians();
            (x / v(&X[i], t), phi)
        };

        let lat = if y < 0.0 { -phi } else { phi };
        Ok((adjlon(lam + self.origin.lon0), lat))
    }

    fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proj::ellipsoid::WGS84;
    use approx::assert_relative_eq;

    fn robin() -> Robinson {
        Robinson::new(WGS84, Origin::default())
    }

    #[test]
    fn test_origin() {
        let (x, y) = robin().forward(0.0, 0.0).unwrap();
        assert_relative_eq!(x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_pole_height() {
        // y at the pole is FYC·a
        let (_, y) = robin().forward(0.0, std::f64::consts::FRAC_PI_2).unwrap();
        assert_relative_eq!(y, FYC * WGS84.a, max_relative = 1e-5);
    }

    #[test]
    fn test_equator_width() {
        let (x, _) = robin().forward(std::f64::consts::PI, 0.0).unwrap();
        assert_relative_eq!(x, FXC * WGS84.a * std::f64::consts::PI, max_relative = 1e-9);
    }

    #[test]
    fn test_roundtrip() {
        let proj = robin();
        let cases: &[(f64, f64)] = &[
            (0.0, 0.0),
            (10.0, 45.0),
            (-73.9857, 40.7484),
            (139.6917, 35.6895),
            (-179.0, -62.5),
            (120.0, 87.0),
        ];
        for &(lon_deg, lat_deg) in cases {
            let lon = lon_deg.to_radians();
            let lat = lat_deg.to_radians();
            let (x, y) = proj.forward(lon, lat).unwrap();
            let (lon2, lat2) = proj.inverse(x, y).unwrap();
            assert_relative_eq!(lon2, lon, epsilon = 1e-8);
            assert_relative_eq!(lat2, lat, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_symmetry() {
        let proj = robin();
        let (x1, y1) = proj.forward(0.5, 0.7).unwrap();
        let (x2, y2) = proj.forward(-0.5, -0.7).unwrap();
        assert_relative_eq!(x1, -x2, epsilon = 1e-9);
        assert_relative_eq!(y1, -y2, epsilon = 1e-9);
    }

    #[test]
    fn test_inverse_outside_domain() {
        let proj = robin();
        assert!(proj.inverse(0.0, 2.0 * FYC * WGS84.a).is_err());
        assert!(proj.forward(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_central_meridian() {
        let proj = Robinson::new(WGS84, Origin { lon0: 1.0, ..Origin::default() });
        let (x, _) = proj.forward(1.0, 0.3).unwrap();
        assert_relative_eq!(x, 0.0, epsilon = 1e-6);
    }
}
