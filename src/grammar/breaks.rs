//! Axis break placement.
//!
//! Majors come from the extended labelling algorithm of Talbot, Lin and
//! Hanrahan (2010), which scores candidate sequences for simplicity,
//! coverage, density and legibility. Minors sit between consecutive majors.

/// Preference-ordered nice step multipliers.
const Q: [f64; 6] = [1.0, 5.0, 2.0, 2.5, 4.0, 3.0];
/// Weights for simplicity, coverage, density and legibility.
const W: [f64; 4] = [0.25, 0.2, 0.5, 0.05];
/// Hard stop on the skip factor; real searches end long before.
const MAX_SKIP: usize = 1_000;

/// Default number of target majors.
pub const TARGET_BREAKS: usize = 5;

fn simplicity(qi: usize, j: f64, lmin: f64, lmax: f64, lstep: f64) -> f64 {
    let eps = f64::EPSILON * 100.0;
    let rem = lmin.rem_euclid(lstep);
    let has_zero = (rem < eps || lstep - rem < eps) && lmin <= 0.0 && lmax >= 0.0;
    1.0 - qi as f64 / (Q.len() - 1) as f64 - j + if has_zero { 1.0 } else { 0.0 }
}

fn simplicity_max(qi: usize, j: f64) -> f64 {
    1.0 - qi as f64 / (Q.len() - 1) as f64 - j + 1.0
}

fn coverage(dmin: f64, dmax: f64, lmin: f64, lmax: f64) -> f64 {
    let range = dmax - dmin;
    1.0 - 0.5 * ((dmax - lmax).powi(2) + (dmin - lmin).powi(2)) / (0.1 * range).powi(2)
}

fn coverage_max(dmin: f64, dmax: f64, span: f64) -> f64 {
    let range = dmax - dmin;
    if span > range {
        let half = (span - range) / 2.0;
        1.0 - half.powi(2) / (0.1 * range).powi(2)
    } else {
        1.0
    }
}

fn density(k: f64, m: f64, dmin: f64, dmax: f64, lmin: f64, lmax: f64) -> f64 {
    let r = (k - 1.0) / (lmax - lmin);
    let rt = (m - 1.0) / (lmax.max(dmax) - dmin.min(lmin));
    2.0 - (r / rt).max(rt / r)
}

fn density_max(k: f64, m: f64) -> f64 {
    if k >= m {
        2.0 - (k - 1.0) / (m - 1.0)
    } else {
        1.0
    }
}

/// Extended breaks for `[dmin, dmax]` aiming at `m` labels.
///
/// Returns an empty vector for non-finite input and `[dmin]` for a zero
/// width range. The result may extend past the range; callers censor.
#[must_use]
pub fn extended(dmin: f64, dmax: f64, m: usize) -> Vec<f64> {
    if !dmin.is_finite() || !dmax.is_finite() {
        return Vec::new();
    }
    let (dmin, dmax) = if dmin <= dmax { (dmin, dmax) } else { (dmax, dmin) };
    if dmax - dmin < 1e-10 * dmax.abs().max(1.0) {
        return vec![dmin];
    }
    let m = m.max(2) as f64;

    let mut best: Option<(f64, f64, f64)> = None;
    let mut best_score = -2.0;

    let mut j = 1.0;
    'skip: while (j as usize) < MAX_SKIP {
        for (qi, &q) in Q.iter().enumerate() {
            let sm = simplicity_max(qi, j);
            if W[0] * sm + W[1] + W[2] + W[3] < best_score {
                break 'skip;
            }
            let mut k = 2.0;
            loop {
                let dm = density_max(k, m);
                if W[0] * sm + W[1] + W[2] * dm + W[3] < best_score {
                    break;
                }
                let delta = (dmax - dmin) / (k + 1.0) / j / q;
                let mut z = delta.log10().ceil();
                loop {
                    let step = j * q * 10f64.powf(z);
                    let cm = coverage_max(dmin, dmax, step * (k - 1.0));
                    if W[0] * sm + W[1] * cm + W[2] * dm + W[3] < best_score {
                        break;
                    }
                    let min_start = (dmax / step).floor() * j - (k - 1.0) * j;
                    let max_start = (dmin / step).ceil() * j;
                    let mut start = min_start;
                    while start <= max_start {
                        let lmin = start * (step / j);
                        let lmax = lmin + step * (k - 1.0);
                        let score = W[0] * simplicity(qi, j, lmin, lmax, step)
                            + W[1] * coverage(dmin, dmax, lmin, lmax)
                            + W[2] * density(k, m, dmin, dmax, lmin, lmax)
                            + W[3];
                        if score > best_score {
                            best_score = score;
                            best = Some((lmin, lmax, step));
                        }
                        start += 1.0;
                    }
                    z += 1.0;
                }
                k += 1.0;
            }
        }
        j += 1.0;
    }

    match best {
        Some((lmin, lmax, step)) => {
            let n = ((lmax - lmin) / step).round() as usize;
            (0..=n).map(|i| snap(lmin + step * i as f64, step)).collect()
        }
        None => Vec::new(),
    }
}

/// Remove float noise such as `0.30000000000000004`.
fn snap(v: f64, step: f64) -> f64 {
    let digits = (-step.abs().log10().floor() + 12.0).clamp(0.0, 15.0) as i32;
    let p = 10f64.powi(digits);
    let snapped = (v * p).round() / p;
    if snapped == 0.0 {
        0.0
    } else {
        snapped
    }
}

/// Minor breaks between consecutive majors, `n` intervals per major
/// interval, extended one interval past the majors when the limits allow.
/// The output includes the majors themselves.
#[must_use]
pub fn regular_minor(majors: &[f64], limits: (f64, f64), n: usize) -> Vec<f64> {
    let mut b: Vec<f64> = majors.iter().copied().filter(|v| v.is_finite()).collect();
    if b.len() < 2 || n == 0 {
        return Vec::new();
    }
    let bd = b[1] - b[0];
    let (lo, hi) = (limits.0.min(limits.1), limits.0.max(limits.1));
    if lo < b[0] {
        b.insert(0, b[0] - bd);
    }
    if let Some(&last) = b.last() {
        if hi > last {
            b.push(last + bd);
        }
    }

    let mut out = Vec::with_capacity((b.len() - 1) * n + 1);
    for pair in b.windows(2) {
        let step = (pair[1] - pair[0]) / n as f64;
        out.extend((0..n).map(|i| pair[0] + step * i as f64));
    }
    out.extend(b.last().copied());
    out
}

/// Keep only the values inside `range` (with a relative tolerance).
#[must_use]
pub fn censor(values: &[f64], range: (f64, f64)) -> Vec<f64> {
    let (lo, hi) = (range.0.min(range.1), range.0.max(range.1));
    let tol = (hi - lo).abs() * 1e-10;
    values.iter().copied().filter(|&v| v.is_finite() && v >= lo - tol && v <= hi + tol).collect()
}
