//! Low-order 1D interpolants with polynomial extrapolation.
//!
//! Rust counterpart of the `scipy.interpolate.interp1d(kind=...,
//! fill_value='extrapolate')` calls in `plotHeatLoads`, restricted to the
//! two kinds the simulator uses. Inside the data the interpolant passes
//! through the support points; outside, the end polynomial is extended.

use kstar_types::error::{SimError, SimResult};

/// Interpolant degree. Python kinds: 'linear', 'quadratic'.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitOrder {
    Linear,
    Quadratic,
}

impl FitOrder {
    pub const fn degree(self) -> usize {
        match self {
            FitOrder::Linear => 1,
            FitOrder::Quadratic => 2,
        }
    }
}

/// A fitted 1D interpolant over strictly monotonic abscissae.
///
/// Descending input is reversed at fit time, mirroring scipy's internal
/// sort. Duplicate or non-finite abscissae are rejected; the strike-line
/// analyzer treats that as a degenerate branch.
#[derive(Debug, Clone)]
pub struct Extrapolant1d {
    xs: Vec<f64>,
    ys: Vec<f64>,
    order: FitOrder,
}

impl Extrapolant1d {
    pub fn fit(xs: &[f64], ys: &[f64], order: FitOrder) -> SimResult<Self> {
        if xs.len() != ys.len() {
            return Err(SimError::ShapeMismatch {
                got: ys.len(),
                expected: xs.len(),
            });
        }
        let needed = order.degree() + 1;
        if xs.len() < needed {
            return Err(SimError::ModelError(format!(
                "interpolant needs at least {} points, got {}",
                needed,
                xs.len()
            )));
        }
        if xs.iter().chain(ys.iter()).any(|v| !v.is_finite()) {
            return Err(SimError::ModelError(
                "non-finite support point in interpolant".to_string(),
            ));
        }

        let (mut xs, mut ys) = (xs.to_vec(), ys.to_vec());
        if xs[0] > xs[xs.len() - 1] {
            xs.reverse();
            ys.reverse();
        }
        for w in xs.windows(2) {
            if w[1] <= w[0] {
                return Err(SimError::ModelError(
                    "abscissae must be strictly monotonic".to_string(),
                ));
            }
        }

        Ok(Extrapolant1d { xs, ys, order })
    }

    /// Evaluate at `x`, extrapolating beyond the data range.
    pub fn eval(&self, x: f64) -> f64 {
        let n = self.xs.len();
        let k = self.order.degree();

        // Support window of k+1 points nearest x.
        let start = if x <= self.xs[0] {
            0
        } else if x >= self.xs[n - 1] {
            n - (k + 1)
        } else {
            // Locate the bracketing segment.
            let mut seg = 0;
            while seg + 1 < n && self.xs[seg + 1] < x {
                seg += 1;
            }
            match self.order {
                FitOrder::Linear => seg,
                FitOrder::Quadratic => {
                    // Center the 3-point stencil on whichever side is closer.
                    let lo = seg.saturating_sub(1);
                    let hi = (seg + 2).min(n - 1) - 2;
                    let mid_lo = self.xs[lo + 1];
                    if (x - mid_lo).abs() <= (x - self.xs[hi + 1]).abs() {
                        lo
                    } else {
                        hi
                    }
                }
            }
        };

        lagrange(&self.xs[start..start + k + 1], &self.ys[start..start + k + 1], x)
    }
}

/// Lagrange polynomial through the given support points.
fn lagrange(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    let mut sum = 0.0;
    for i in 0..xs.len() {
        let mut term = ys[i];
        for j in 0..xs.len() {
            if j != i {
                term *= (x - xs[j]) / (xs[i] - xs[j]);
            }
        }
        sum += term;
    }
    sum
}

/// Evenly spaced samples from `start` to `stop` inclusive. Python:
/// `np.linspace(start, stop, n)`.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![start];
    }
    let step = (stop - start) / (n - 1) as f64;
    (0..n).map(|i| start + step * i as f64).collect()
}
