//! Small numeric helpers shared by the envelope functions.
//!
//! All functions follow the conventions of their array-programming
//! counterparts: `interp` clamps outside the sample range, `gradient` uses
//! central differences in the interior and one-sided differences at the ends.

/// Piecewise-linear interpolation of `(xp, fp)` at `x`.
///
/// `xp` must be non-decreasing. Values outside `[xp[0], xp[n-1]]` are clamped
/// to the first and last sample.
pub fn interp(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    debug_assert_eq!(xp.len(), fp.len());
    let n = xp.len();
    if n == 0 {
        return 0.0;
    }
    if x <= xp[0] {
        return fp[0];
    }
    if x >= xp[n - 1] {
        return fp[n - 1];
    }
    // First index with xp[i] > x; guaranteed in 1..n by the checks above.
    let hi = xp.partition_point(|&v| v <= x);
    let lo = hi - 1;
    let span = xp[hi] - xp[lo];
    if span <= 0.0 {
        return fp[lo];
    }
    let frac = (x - xp[lo]) / span;
    fp[lo] + frac * (fp[hi] - fp[lo])
}

/// Trapezoidal integral of `y` over the sample points `x`.
pub fn trapz(y: &[f64], x: &[f64]) -> f64 {
    debug_assert_eq!(x.len(), y.len());
    y.windows(2)
        .zip(x.windows(2))
        .map(|(yw, xw)| 0.5 * (yw[0] + yw[1]) * (xw[1] - xw[0]))
        .sum()
}

/// Running trapezoidal integral; element `i` is the integral over `x[0..=i]`.
pub fn cumulative_trapz(y: &[f64], x: &[f64]) -> Vec<f64> {
    debug_assert_eq!(x.len(), y.len());
    let mut out = Vec::with_capacity(y.len());
    let mut acc = 0.0;
    if !y.is_empty() {
        out.push(0.0);
    }
    for i in 1..y.len() {
        acc += 0.5 * (y[i - 1] + y[i]) * (x[i] - x[i - 1]);
        out.push(acc);
    }
    out
}

/// Per-sample gradient with unit spacing.
pub fn gradient(y: &[f64]) -> Vec<f64> {
    let n = y.len();
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => (0..n)
            .map(|i| {
                if i == 0 {
                    y[1] - y[0]
                } else if i == n - 1 {
                    y[n - 1] - y[n - 2]
                } else {
                    0.5 * (y[i + 1] - y[i - 1])
                }
            })
            .collect(),
    }
}

/// `n` evenly spaced points from `start` to `stop` inclusive.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}
