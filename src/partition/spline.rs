// src/partition/spline.rs
//! Interpolating B-spline of degree k. No smoothing: the curve passes through
//! every data point.
//!
//! Knots: k+1 copies of each end point, interior knots at the data points
//! (odd k, "not-a-knot") or at midpoints between them (even k). That leaves
//! exactly n basis functions for n points, and the Schoenberg–Whitney condition
//! holds, so the collocation matrix is non-singular.

use crate::error::{CdmsError, Result};

pub const MAX_DEGREE: usize = 5;

#[derive(Clone, Debug, PartialEq)]
pub struct BSpline {
    knots: Vec<f64>,
    coefs: Vec<f64>,
    degree: usize,
}

impl BSpline {
    /// `xs` strictly increasing, `xs.len() == ys.len() > degree`.
    pub fn interpolate(xs: &[f64], ys: &[f64], degree: usize) -> Result<Self> {
        let n = xs.len();
        if degree == 0 || degree > MAX_DEGREE {
            return Err(CdmsError::Spline(format!("degree must be 1..={MAX_DEGREE}, got {degree}")));
        }
        if n != ys.len() {
            return Err(CdmsError::Spline(format!("{n} x values but {} y values", ys.len())));
        }
        if n <= degree {
            return Err(CdmsError::Spline(format!("need more than {degree} points, got {n}")));
        }
        if xs.iter().chain(ys).any(|v| !v.is_finite()) {
            return Err(CdmsError::Spline(s!("non-finite input")));
        }
        if xs.windows(2).any(|w| w[1] <= w[0]) {
            return Err(CdmsError::Spline(s!("x values must be strictly increasing")));
        }

        let knots = knot_vector(xs, degree);
        let mut a = vec![vec![0.0; n]; n];
        for (row, &x) in a.iter_mut().zip(xs) {
            let span = find_span(&knots, degree, n, x);
            let basis = basis_funcs(&knots, degree, span, x);
            for (r, b) in basis.into_iter().enumerate() {
                row[span - degree + r] = b;
            }
        }
        let coefs = solve(a, ys.to_vec())?;
        Ok(Self { knots, coefs, degree })
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.knots[0], self.knots[self.knots.len() - 1])
    }

    /// de Boor evaluation; outside the data range the end pieces are extended.
    pub fn eval(&self, x: f64) -> f64 {
        let (k, n) = (self.degree, self.coefs.len());
        let span = find_span(&self.knots, k, n, x);
        let t = &self.knots;

        let mut d: Vec<f64> = (0..=k).map(|j| self.coefs[span - k + j]).collect();
        for r in 1..=k {
            for j in (r..=k).rev() {
                let i = span - k + j;
                let denom = t[i + k + 1 - r] - t[i];
                let alpha = if denom == 0.0 { 0.0 } else { (x - t[i]) / denom };
                d[j] = (1.0 - alpha) * d[j - 1] + alpha * d[j];
            }
        }
        d[k]
    }
}

fn knot_vector(xs: &[f64], k: usize) -> Vec<f64> {
    let n = xs.len();
    let (first, last) = (xs[0], xs[n - 1]);
    let mut t = Vec::with_capacity(n + k + 1);
    t.extend(std::iter::repeat_n(first, k + 1));
    if k % 2 == 1 {
        let h = (k + 1) / 2;
        t.extend_from_slice(&xs[h..n - h]);
    } else {
        let h = k / 2;
        t.extend((h..n - h - 1).map(|i| 0.5 * (xs[i] + xs[i + 1])));
    }
    t.extend(std::iter::repeat_n(last, k + 1));
    debug_assert_eq!(t.len(), n + k + 1);
    t
}

/// Index `i` with `t[i] <= x < t[i+1]`, clamped to `k..=n-1`.
fn find_span(t: &[f64], k: usize, n: usize, x: f64) -> usize {
    if x >= t[n] {
        return n - 1;
    }
    if x <= t[k] {
        return k;
    }
    // t[k..=n] is non-decreasing; want the last i with t[i] <= x
    let (mut lo, mut hi) = (k, n);
    while hi - lo > 1 {
        let mid = (lo + hi) / 2;
        if x < t[mid] { hi = mid; } else { lo = mid; }
    }
    lo
}

/// The k+1 non-zero basis values N_{span-k..=span, k}(x) (Cox–de Boor).
fn basis_funcs(t: &[f64], k: usize, span: usize, x: f64) -> Vec<f64> {
    let mut n = vec![0.0; k + 1];
    let mut left = vec![0.0; k + 1];
    let mut right = vec![0.0; k + 1];
    n[0] = 1.0;
    for j in 1..=k {
        left[j] = x - t[span + 1 - j];
        right[j] = t[span + j] - x;
        let mut saved = 0.0;
        for r in 0..j {
            let denom = right[r + 1] + left[j - r];
            let temp = if denom == 0.0 { 0.0 } else { n[r] / denom };
            n[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        n[j] = saved;
    }
    n
}

/// Gaussian elimination with partial pivoting; systems here are tiny.
fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Result<Vec<f64>> {
    let n = b.len();
    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .unwrap_or(col);
        if a[pivot][col].abs() < f64::EPSILON {
            return Err(CdmsError::Spline(s!("singular collocation matrix")));
        }
        a.swap(col, pivot);
        b.swap(col, pivot);
        let (upper, lower) = a.split_at_mut(col + 1);
        let pivot_row = &upper[col];
        for (off, row) in lower.iter_mut().enumerate() {
            let factor = row[col] / pivot_row[col];
            if factor == 0.0 { continue; }
            for c in col..n {
                row[c] -= factor * pivot_row[c];
            }
            b[col + 1 + off] -= factor * b[col];
        }
    }
    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let s: f64 = (row + 1..n).map(|c| a[row][c] * x[c]).sum();
        x[row] = (b[row] - s) / a[row][row];
    }
    Ok(x)
}
