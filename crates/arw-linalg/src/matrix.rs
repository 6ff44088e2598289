//! Dense matrices over the rational-function field
//!
//! Row-major storage with the column operations the solver is built from.
//! Every mutation routes its scalar results through the field's canonical
//! reduction (the `Rat` operators reduce on construction), which is what
//! keeps entry size bounded across repeated elimination steps.

use crate::{LinalgError, Result};
use arw_symbolic::Rat;

/// A `rows x cols` matrix of exact rational functions.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    arity: usize,
    data: Vec<Rat>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize, arity: usize) -> Self {
        Matrix {
            rows,
            cols,
            arity,
            data: vec![Rat::zero(arity); rows * cols],
        }
    }

    pub fn identity(n: usize, arity: usize) -> Self {
        let mut m = Matrix::zeros(n, n, arity);
        for i in 0..n {
            m.set(i, i, Rat::one(arity));
        }
        m
    }

    /// Build from explicit rows; fails when the rows are ragged.
    pub fn from_rows(rows: Vec<Vec<Rat>>, arity: usize) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map(|r| r.len()).unwrap_or(0);
        if rows.iter().any(|r| r.len() != n_cols) {
            return Err(LinalgError::ShapeMismatch {
                context: "ragged rows".to_string(),
            });
        }
        Ok(Matrix {
            rows: n_rows,
            cols: n_cols,
            arity,
            data: rows.into_iter().flatten().collect(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn get(&self, r: usize, c: usize) -> &Rat {
        &self.data[r * self.cols + c]
    }

    pub fn set(&mut self, r: usize, c: usize, value: Rat) {
        self.data[r * self.cols + c] = value;
    }

    /// Clone of row `r`.
    pub fn row(&self, r: usize) -> Vec<Rat> {
        (0..self.cols).map(|c| self.get(r, c).clone()).collect()
    }

    /// Swap columns `i` and `j`; no-op when they coincide.
    pub fn swap_cols(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        for r in 0..self.rows {
            self.data.swap(r * self.cols + i, r * self.cols + j);
        }
    }

    /// Multiply column `j` by `factor` element-wise.
    pub fn scale_col(&mut self, j: usize, factor: &Rat) {
        for r in 0..self.rows {
            let idx = r * self.cols + j;
            let scaled = &self.data[idx] * factor;
            self.data[idx] = scaled;
        }
    }

    /// Add `factor` times column `from` into column `to`.
    ///
    /// Contractual short-circuit on a zero factor: callers rely on the
    /// reduction pass being skipped entirely when nothing changes.
    pub fn add_col(&mut self, from: usize, to: usize, factor: &Rat) {
        if factor.is_zero() {
            return;
        }
        for r in 0..self.rows {
            let term = self.get(r, from) * factor;
            let idx = r * self.cols + to;
            let combined = &self.data[idx] + &term;
            self.data[idx] = combined;
        }
    }

    /// Matrix product `self * rhs`.
    pub fn mul(&self, rhs: &Matrix) -> Result<Matrix> {
        if self.cols != rhs.rows {
            return Err(LinalgError::ShapeMismatch {
                context: format!(
                    "cannot multiply {}x{} by {}x{}",
                    self.rows, self.cols, rhs.rows, rhs.cols
                ),
            });
        }
        let mut out = Matrix::zeros(self.rows, rhs.cols, self.arity);
        for i in 0..self.rows {
            for j in 0..rhs.cols {
                let mut acc = Rat::zero(self.arity);
                for k in 0..self.cols {
                    acc = &acc + &(self.get(i, k) * rhs.get(k, j));
                }
                out.set(i, j, acc);
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arw_symbolic::ParamSet;

    fn q0() -> Rat {
        Rat::var(0, &ParamSet::sleep_probs(1)).unwrap()
    }

    #[test]
    fn swap_is_noop_on_same_column() {
        let mut m = Matrix::identity(2, 1);
        let before = m.clone();
        m.swap_cols(1, 1);
        assert_eq!(m, before);
        m.swap_cols(0, 1);
        assert_eq!(*m.get(0, 0), Rat::zero(1));
        assert_eq!(*m.get(0, 1), Rat::one(1));
    }

    #[test]
    fn add_col_short_circuits_on_zero_factor() {
        let mut m = Matrix::identity(2, 1);
        let before = m.clone();
        m.add_col(0, 1, &Rat::zero(1));
        assert_eq!(m, before);
    }

    #[test]
    fn scale_and_combine() {
        // start from I, scale col 0 by q, add q * col0 into col1
        let mut m = Matrix::identity(2, 1);
        m.scale_col(0, &q0());
        m.add_col(0, 1, &q0());
        assert_eq!(*m.get(0, 0), q0());
        assert_eq!(*m.get(0, 1), &q0() * &q0());
        assert_eq!(*m.get(1, 1), Rat::one(1));
    }

    #[test]
    fn product_against_identity() {
        let mut m = Matrix::zeros(2, 2, 1);
        m.set(0, 0, q0());
        m.set(0, 1, Rat::one(1));
        m.set(1, 0, &Rat::one(1) - &q0());
        let id = Matrix::identity(2, 1);
        assert_eq!(m.mul(&id).unwrap(), m);
    }

    #[test]
    fn ragged_rows_rejected() {
        let rows = vec![vec![Rat::one(1)], vec![Rat::one(1), Rat::zero(1)]];
        assert!(matches!(
            Matrix::from_rows(rows, 1),
            Err(LinalgError::ShapeMismatch { .. })
        ));
    }
}
