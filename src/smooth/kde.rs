//! Binned kernel density estimation.
//!
//! Observations are linearly binned onto an equally spaced grid and the
//! kernel is applied to the bin counts, so the cost depends on the grid size
//! rather than the sample size. Bandwidth selection uses the direct plug-in
//! rule with binned estimates of the density functionals.
//!
//! ## References
//! - Wand, M. P. (1994). "Fast Computation of Multivariate Kernel Estimators."
//!   Journal of Computational and Graphical Statistics.
//! - Sheather, S. J. & Jones, M. C. (1991). "A Reliable Data-Based Bandwidth
//!   Selection Method for Kernel Density Estimation." JRSS B.
//! - Wand, M. P. & Jones, M. C. (1995). *Kernel Smoothing*. Chapman & Hall.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::Range;

/// Default number of grid points.
pub const DEFAULT_GRIDSIZE: usize = 401;

/// Smoothing kernel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "lowercase"))]
pub enum Kernel {
    /// Standard normal density.
    #[default]
    Normal,
    /// Uniform on `[-1, 1]`.
    Box,
    /// Epanechnikov.
    Epanech,
    /// Biweight (quartic).
    Biweight,
    /// Triweight.
    Triweight,
}

impl Kernel {
    /// Kernel value at `u`.
    #[must_use]
    pub fn eval(self, u: f64) -> f64 {
        let inside = u.abs() <= 1.0;
        let w = 1.0 - u * u;
        match self {
            Kernel::Normal => (-0.5 * u * u).exp() / (2.0 * PI).sqrt(),
            Kernel::Box if inside => 0.5,
            Kernel::Epanech if inside => 0.75 * w,
            Kernel::Biweight if inside => 15.0 / 16.0 * w * w,
            Kernel::Triweight if inside => 35.0 / 32.0 * w * w * w,
            _ => 0.0,
        }
    }

    /// Multiple of the bandwidth beyond which the kernel is ignored.
    #[must_use]
    pub fn support(self) -> f64 {
        match self {
            Kernel::Normal => 4.0,
            _ => 1.0,
        }
    }

    /// Scale turning a bandwidth into the canonical bandwidth of this kernel.
    #[must_use]
    pub fn canonical_factor(self) -> f64 {
        match self {
            Kernel::Normal => (1.0 / (4.0 * PI)).powf(0.1),
            Kernel::Box => 4.5f64.powf(0.2),
            Kernel::Epanech => 15f64.powf(0.2),
            Kernel::Biweight => 35f64.powf(0.2),
            Kernel::Triweight => (9450.0f64 / 143.0).powf(0.2),
        }
    }

    /// Lower-case name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Kernel::Normal => "normal",
            Kernel::Box => "box",
            Kernel::Epanech => "epanech",
            Kernel::Biweight => "biweight",
            Kernel::Triweight => "triweight",
        }
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Kernel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "normal" | "gaussian" => Ok(Kernel::Normal),
            "box" | "rectangular" => Ok(Kernel::Box),
            "epanech" | "epanechnikov" => Ok(Kernel::Epanech),
            "biweight" | "quartic" => Ok(Kernel::Biweight),
            "triweight" => Ok(Kernel::Triweight),
            other => Err(Error::InvalidParameter(format!("unknown kernel '{other}'"))),
        }
    }
}

/// Density estimate on a grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Density {
    /// Grid points.
    pub x: Vec<f64>,
    /// Density at each grid point.
    pub y: Vec<f64>,
    /// Bandwidth used.
    pub bandwidth: f64,
}

/// Linear binning of `xs` onto `gridsize` points spanning `range`.
///
/// Each observation splits its unit weight between the two neighbouring grid
/// points in proportion to proximity. An observation exactly on the upper
/// bound lands on the last point. Observations outside the range are dropped
/// when `truncate` is set, otherwise added to the nearest end point.
#[must_use]
pub fn linbin(xs: &[f64], range: Range, gridsize: usize, truncate: bool) -> Vec<f64> {
    let m = gridsize;
    let mut counts = vec![0.0; m];
    if m == 0 {
        return counts;
    }
    if m == 1 || range.span() <= 0.0 {
        counts[0] = xs.iter().filter(|x| x.is_finite() && (!truncate || range.contains(**x))).count() as f64;
        return counts;
    }

    let delta = range.span() / (m - 1) as f64;
    for &x in xs.iter().filter(|x| x.is_finite()) {
        let pos = (x - range.min) / delta;
        let li = pos.floor();
        let rem = pos - li;
        if li >= 0.0 && (li as usize) < m - 1 {
            let i = li as usize;
            counts[i] += 1.0 - rem;
            counts[i + 1] += rem;
        } else if x >= range.min && x <= range.max {
            counts[m - 1] += 1.0;
        } else if !truncate {
            if li < 0.0 {
                counts[0] += 1.0;
            } else {
                counts[m - 1] += 1.0;
            }
        }
    }
    counts
}

/// Symmetric discrete convolution of `counts` with `weights[|i - j|]`.
fn convolve(counts: &[f64], weights: &[f64]) -> Vec<f64> {
    let m = counts.len();
    let l = weights.len().saturating_sub(1);
    let mut out = vec![0.0; m];
    for (i, &c) in counts.iter().enumerate() {
        if c == 0.0 {
            continue;
        }
        let lo = i.saturating_sub(l);
        let hi = (i + l).min(m - 1);
        for (j, o) in out.iter_mut().enumerate().take(hi + 1).skip(lo) {
            *o += c * weights[i.abs_diff(j)];
        }
    }
    out
}

/// Binned kernel density estimate.
///
/// # Errors
///
/// Returns [`Error::InsufficientData`] with fewer than two finite values and
/// [`Error::InvalidParameter`] for a non-positive bandwidth, a grid of fewer
/// than two points or an empty range.
pub fn bkde(
    xs: &[f64],
    kernel: Kernel,
    bandwidth: f64,
    gridsize: usize,
    range: Option<Range>,
    truncate: bool,
) -> Result<Density> {
    let finite = finite_values(xs)?;
    if bandwidth <= 0.0 || !bandwidth.is_finite() {
        return Err(Error::InvalidParameter(format!("bandwidth must be positive, got {bandwidth}")));
    }
    if gridsize < 2 {
        return Err(Error::InvalidParameter(format!("gridsize must be at least 2, got {gridsize}")));
    }
    let h = bandwidth;
    let tau = kernel.support();
    let range = range.unwrap_or_else(|| {
        let r = Range::of_finite(&finite).unwrap_or(Range::new(0.0, 0.0));
        Range::new(r.min - tau * h, r.max + tau * h)
    });
    if range.span() <= 0.0 || !range.span().is_finite() {
        return Err(Error::InvalidParameter(format!("empty estimation range {:?}", range.as_tuple())));
    }

    let n = finite.len() as f64;
    let gpoints = range.seq(gridsize);
    let counts = linbin(&finite, range, gridsize, truncate);

    let delta = range.span() / (h * (gridsize - 1) as f64);
    let l = ((tau / delta).floor() as usize).min(gridsize);
    let weights: Vec<f64> = (0..=l).map(|i| kernel.eval(i as f64 * delta) / (n * h)).collect();

    let y = convolve(&counts, &weights).into_iter().map(|v| v.max(0.0)).collect();
    Ok(Density { x: gpoints, y, bandwidth })
}

/// Binned estimate of the density functional `ψ_r = ∫ f^(r) f` for even
/// `drv`, with a normal kernel of bandwidth `h`, from grid counts over `range`.
#[must_use]
pub fn bkfe(counts: &[f64], drv: u32, h: f64, range: Range) -> f64 {
    let m = counts.len();
    if m < 2 {
        return f64::NAN;
    }
    let delta = range.span() / (m - 1) as f64;
    let tau = 4.0 + f64::from(drv);
    let l = ((tau * h / delta).floor() as usize).min(m);

    let weights: Vec<f64> = (0..=l)
        .map(|i| {
            let arg = i as f64 * delta / h;
            hermite(drv, arg) * Kernel::Normal.eval(arg) / h.powi(drv as i32 + 1)
        })
        .collect();

    let n: f64 = counts.iter().sum();
    let smoothed = convolve(counts, &weights);
    counts.iter().zip(&smoothed).map(|(c, s)| c * s).sum::<f64>() / (n * n)
}

/// Probabilists' Hermite polynomial `He_n(x)`.
fn hermite(n: u32, x: f64) -> f64 {
    let (mut h0, mut h1) = (1.0, x);
    if n == 0 {
        return h0;
    }
    for i in 2..=n {
        let h2 = x * h1 - f64::from(i - 1) * h0;
        h0 = h1;
        h1 = h2;
    }
    h1
}

/// Direct plug-in bandwidth (two-stage, normal kernel), using the smaller
/// of the standard deviation and `IQR / 1.349` as the scale estimate.
///
/// # Errors
///
/// Returns [`Error::InsufficientData`] with fewer than two finite values and
/// [`Error::InvalidParameter`] when the data have no spread.
pub fn dpik(xs: &[f64], gridsize: usize, range: Option<Range>, truncate: bool) -> Result<f64> {
    let mut finite = finite_values(xs)?;
    finite.sort_by(f64::total_cmp);
    let n = finite.len() as f64;
    let mean = finite.iter().sum::<f64>() / n;
    let stdev = (finite.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt();
    let iqr = (quantile(&finite, 0.75) - quantile(&finite, 0.25)) / 1.349;
    let scale = match (stdev > 0.0, iqr > 0.0) {
        (true, true) => stdev.min(iqr),
        (true, false) => stdev,
        (false, true) => iqr,
        (false, false) => return Err(Error::InvalidParameter("bandwidth selection needs spread in the data".into())),
    };

    let range = range.or_else(|| Range::of_finite(&finite)).unwrap_or(Range::new(0.0, 1.0));
    let standard = Range::new((range.min - mean) / scale, (range.max - mean) / scale);
    let sx: Vec<f64> = finite.iter().map(|x| (x - mean) / scale).collect();
    let counts = linbin(&sx, standard, gridsize.max(2), truncate);

    let alpha = (2.0 * 2f64.sqrt().powi(9) / (7.0 * n)).powf(1.0 / 9.0);
    let psi6 = bkfe(&counts, 6, alpha, standard);
    let alpha = (-3.0 * (2.0 / PI).sqrt() / (psi6 * n)).powf(1.0 / 7.0);
    let psi4 = bkfe(&counts, 4, alpha, standard);

    let h = scale * Kernel::Normal.canonical_factor() * (1.0 / (psi4 * n)).powf(0.2);
    if !(h.is_finite() && h > 0.0) {
        return Err(Error::InvalidParameter(format!("plug-in bandwidth is not positive ({h})")));
    }
    Ok(h)
}

/// Linear-interpolation quantile of sorted values.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let k = p * (sorted.len() - 1) as f64;
    let f = k.floor() as usize;
    let c = (f + 1).min(sorted.len() - 1);
    sorted[f] + (k - f as f64) * (sorted[c] - sorted[f])
}

fn finite_values(xs: &[f64]) -> Result<Vec<f64>> {
    let finite: Vec<f64> = xs.iter().copied().filter(|x| x.is_finite()).collect();
    if finite.len() < 2 {
        return Err(Error::InsufficientData { needed: 2, got: finite.len() });
    }
    Ok(finite)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Deterministic, roughly normal sample (Box-Muller on a lattice).
    fn normal_sample(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| {
                let u1 = (i as f64 + 0.5) / n as f64;
                let u2 = ((i * 7919) % n) as f64 / n as f64 + 0.5 / n as f64;
                (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
            })
            .collect()
    }

    #[test]
    fn test_kernels_integrate_to_one() {
        for kernel in [Kernel::Normal, Kernel::Box, Kernel::Epanech, Kernel::Biweight, Kernel::Triweight] {
            let step = 1e-3;
            let area: f64 = (-5000..=5000).map(|i| kernel.eval(f64::from(i) * step) * step).sum();
            assert_relative_eq!(area, 1.0, epsilon = 2e-3);
        }
    }

    #[test]
    fn test_kernel_from_str() {
        assert_eq!("epanech".parse::<Kernel>().unwrap(), Kernel::Epanech);
        assert_eq!(Kernel::Triweight.to_string(), "triweight");
        assert!("cosine".parse::<Kernel>().is_err());
    }

    #[test]
    fn test_linbin_conserves_weight() {
        let counts = linbin(&[0.0, 0.25, 1.0, 0.6], Range::new(0.0, 1.0), 5, true);
        assert_relative_eq!(counts.iter().sum::<f64>(), 4.0);
        assert_relative_eq!(counts[0], 1.0);
        assert_relative_eq!(counts[1], 1.0);
        assert_relative_eq!(counts[4], 1.0);
        assert_relative_eq!(counts[2], 0.6, epsilon = 1e-12);
        assert_relative_eq!(counts[3], 0.4, epsilon = 1e-12);
    }

    #[test]
    fn test_linbin_truncate() {
        let xs = [-1.0, 0.5, 2.0];
        let kept = linbin(&xs, Range::new(0.0, 1.0), 3, true);
        assert_relative_eq!(kept.iter().sum::<f64>(), 1.0);
        let all = linbin(&xs, Range::new(0.0, 1.0), 3, false);
        assert_eq!(all, vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_bkde_integrates_to_one() {
        let xs = normal_sample(500);
        let d = bkde(&xs, Kernel::Normal, 0.3, DEFAULT_GRIDSIZE, None, true).unwrap();
        assert_eq!(d.x.len(), DEFAULT_GRIDSIZE);
        let step = d.x[1] - d.x[0];
        assert_relative_eq!(d.y.iter().sum::<f64>() * step, 1.0, epsilon = 1e-2);
        let peak = d.y.iter().copied().fold(0.0, f64::max);
        assert!(peak > 0.3 && peak < 0.5, "peak {peak}");
    }

    #[test]
    fn test_bkde_compact_kernels() {
        let xs = normal_sample(300);
        for kernel in [Kernel::Box, Kernel::Epanech, Kernel::Biweight, Kernel::Triweight] {
            let d = bkde(&xs, kernel, 0.5, 201, None, true).unwrap();
            let step = d.x[1] - d.x[0];
            assert_relative_eq!(d.y.iter().sum::<f64>() * step, 1.0, epsilon = 6e-2);
            assert!(d.y.iter().all(|v| *v >= 0.0));
        }
    }

    #[test]
    fn test_bkde_errors() {
        assert!(matches!(
            bkde(&[1.0, f64::NAN], Kernel::Normal, 1.0, 10, None, true),
            Err(Error::InsufficientData { needed: 2, got: 1 })
        ));
        assert!(bkde(&[1.0, 2.0], Kernel::Normal, 0.0, 10, None, true).is_err());
        assert!(bkde(&[1.0, 2.0], Kernel::Normal, 1.0, 1, None, true).is_err());
    }

    #[test]
    fn test_hermite() {
        assert_eq!(hermite(0, 2.0), 1.0);
        assert_eq!(hermite(1, 2.0), 2.0);
        assert_relative_eq!(hermite(4, 2.0), 16.0 - 24.0 + 3.0);
        assert_relative_eq!(hermite(6, 1.0), 1.0 - 15.0 + 45.0 - 15.0);
    }

    #[test]
    fn test_dpik_near_normal_reference() {
        let xs = normal_sample(1000);
        let h = dpik(&xs, DEFAULT_GRIDSIZE, None, true).unwrap();
        // normal reference rule: 1.06 * sigma * n^(-1/5)
        let reference = 1.06 * 1000f64.powf(-0.2);
        assert!(h > 0.5 * reference && h < 1.5 * reference, "h = {h}, reference = {reference}");
    }

    #[test]
    fn test_dpik_scales_with_data() {
        let xs = normal_sample(400);
        let wide: Vec<f64> = xs.iter().map(|x| x * 10.0 + 3.0).collect();
        let h = dpik(&xs, DEFAULT_GRIDSIZE, None, true).unwrap();
        let hw = dpik(&wide, DEFAULT_GRIDSIZE, None, true).unwrap();
        assert_relative_eq!(hw, 10.0 * h, max_relative = 1e-6);
    }

    #[test]
    fn test_dpik_no_spread() {
        assert!(matches!(dpik(&[2.0, 2.0, 2.0], 401, None, true), Err(Error::InvalidParameter(_))));
        assert!(matches!(dpik(&[2.0], 401, None, true), Err(Error::InsufficientData { .. })));
    }

    #[test]
    fn test_quantile() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(quantile(&v, 0.25), 1.75);
        assert_relative_eq!(quantile(&v, 0.5), 2.5);
        assert_relative_eq!(quantile(&v, 1.0), 4.0);
    }
}
