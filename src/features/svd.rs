//! Singular-value computation on pixel matrices.
//!
//! The default feature algorithms build a row-major luminance (or channel)
//! matrix from the decoded image and take its singular values with a
//! one-sided Jacobi sweep. Values come back in descending order, truncated to
//! `min(rows, cols)`.

/// Minimal row-major `f64` matrix.
#[derive(Debug, Clone)]
pub(crate) struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Build a matrix from row-major data.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != rows * cols`.
    pub(crate) fn new(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        assert_eq!(data.len(), rows * cols, "matrix data length mismatch");
        Self { rows, cols, data }
    }
}

/// Rec. 601 luma of one sRGB pixel, scaled to [0, 1].
#[inline]
pub(crate) fn luma(r: u8, g: u8, b: u8) -> f64 {
    (0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b)) / 255.0
}

/// Singular values of a matrix, descending, truncated to `min(rows, cols)`.
///
/// One-sided Jacobi (Hestenes): column pairs are rotated until mutually
/// orthogonal; the singular values are the column norms at convergence. The
/// tolerance is relative, so uniformly scaled matrices converge identically.
pub(crate) fn singular_values(mut m: Matrix) -> Vec<f64> {
    let n = m.cols;
    if n == 0 || m.rows == 0 {
        return Vec::new();
    }

    const MAX_SWEEPS: usize = 30;
    const TOL: f64 = 1e-10;

    for _ in 0..MAX_SWEEPS {
        let mut rotated = false;

        for p in 0..n.saturating_sub(1) {
            for q in (p + 1)..n {
                let mut app = 0.0;
                let mut aqq = 0.0;
                let mut apq = 0.0;
                for r in 0..m.rows {
                    let vp = m.data[r * n + p];
                    let vq = m.data[r * n + q];
                    app += vp * vp;
                    aqq += vq * vq;
                    apq += vp * vq;
                }

                if apq.abs() <= TOL * (app * aqq).sqrt() {
                    continue;
                }
                rotated = true;

                let zeta = (aqq - app) / (2.0 * apq);
                let t = if zeta >= 0.0 {
                    1.0 / (zeta + (1.0 + zeta * zeta).sqrt())
                } else {
                    1.0 / (zeta - (1.0 + zeta * zeta).sqrt())
                };
                let c = 1.0 / (1.0 + t * t).sqrt();
                let s = c * t;

                for r in 0..m.rows {
                    let vp = m.data[r * n + p];
                    let vq = m.data[r * n + q];
                    m.data[r * n + p] = c * vp - s * vq;
                    m.data[r * n + q] = s * vp + c * vq;
                }
            }
        }

        if !rotated {
            break;
        }
    }

    let mut values: Vec<f64> = (0..n)
        .map(|j| {
            (0..m.rows)
                .map(|r| m.data[r * n + j].powi(2))
                .sum::<f64>()
                .sqrt()
        })
        .collect();
    values.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    values.truncate(m.rows.min(m.cols));
    values
}
