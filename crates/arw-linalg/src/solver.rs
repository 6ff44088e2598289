//! Column-reduction solver
//!
//! Solves `X * A = B` by making `A` lower-triangular with column
//! operations, then back-substituting into `X`. The pivot at each step is
//! the candidate whose reduced numerator has the smallest total degree,
//! which keeps intermediate expressions from growing combinatorially; any
//! nonzero candidate would be mathematically valid.
//!
//! Both matrices are consumed: every column operation applies to the
//! coefficient matrix and the solution matrix in lockstep, never to one
//! alone, until the back-substitution phase which touches only `X`.

use crate::matrix::Matrix;
use crate::progress::ProgressSink;
use crate::sparse::SparseMatrix;
use crate::{LinalgError, Result};
use arw_symbolic::Rat;

/// Result of one elimination pass.
///
/// Singularity is an outcome, not an error: the partially triangularized
/// matrices are handed back so callers such as [`null_vector`] can
/// post-process them.
#[derive(Debug)]
pub enum EliminationOutcome {
    /// The system was solved; the payload is `X` with `X * A = B`.
    Solved(Matrix),
    /// No pivot candidate existed in `row`; `a` is lower-triangular in its
    /// leading `row x row` block and `x` holds the work done so far.
    Singular { row: usize, a: Matrix, x: Matrix },
}

/// The coefficient and solution matrices under joint column operations.
struct Paired<'m> {
    a: &'m mut Matrix,
    x: &'m mut Matrix,
}

impl Paired<'_> {
    fn swap(&mut self, i: usize, j: usize) {
        self.a.swap_cols(i, j);
        self.x.swap_cols(i, j);
    }

    fn scale(&mut self, j: usize, factor: &Rat) {
        self.a.scale_col(j, factor);
        self.x.scale_col(j, factor);
    }

    fn add(&mut self, from: usize, to: usize, factor: &Rat) {
        self.a.add_col(from, to, factor);
        self.x.add_col(from, to, factor);
    }
}

/// Pick the pivot column for `row`: among columns `row..`, the nonzero
/// entry of minimal numerator degree, ties to the lowest column index.
fn find_pivot(a: &Matrix, row: usize) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    for col in row..a.cols() {
        let entry = a.get(row, col);
        if entry.is_zero() {
            continue;
        }
        let degree = entry.numerator_degree();
        match best {
            Some((_, d)) if degree >= d => {}
            _ => best = Some((col, degree)),
        }
    }
    best
}

/// Run the elimination, reporting singularity as an outcome.
///
/// `a` must be square and `x` must have as many columns as `a`; both are
/// consumed. Progress events are emitted in order: `forward` for each
/// forward column, `backward` for each back-substitution column, and a
/// terminal `done`.
pub fn eliminate(
    mut a: Matrix,
    mut x: Matrix,
    sink: &mut dyn ProgressSink,
) -> Result<EliminationOutcome> {
    if a.rows() != a.cols() {
        return Err(LinalgError::ShapeMismatch {
            context: format!("coefficient matrix is {}x{}", a.rows(), a.cols()),
        });
    }
    if x.cols() != a.cols() {
        return Err(LinalgError::ShapeMismatch {
            context: format!(
                "solution matrix has {} columns, expected {}",
                x.cols(),
                a.cols()
            ),
        });
    }

    let n = a.cols();

    // Forward phase: make a lower-triangular by column operations.
    for i in 0..n {
        let (pivot_col, pivot_degree) = match find_pivot(&a, i) {
            Some(p) => p,
            None => {
                // Row i has no nonzero entry at or right of the diagonal,
                // which happens if and only if the matrix is singular.
                sink.on_done(i as i64);
                return Ok(EliminationOutcome::Singular { row: i, a, x });
            }
        };

        let mut pair = Paired {
            a: &mut a,
            x: &mut x,
        };
        pair.swap(i, pivot_col);
        let scale = pair.a.get(i, i).inv()?;
        pair.scale(i, &scale);
        for j in (i + 1)..n {
            let factor = -pair.a.get(i, j);
            pair.add(i, j, &factor);
        }

        sink.on_forward(i, Some(pivot_degree));
    }

    // Back-substitution: a is lower-triangular with unit diagonal; only x
    // changes from here on.
    for i in (0..n).rev() {
        for j in 0..i {
            let factor = -a.get(i, j);
            x.add_col(i, j, &factor);
        }
        sink.on_backward(i);
    }

    sink.on_done(-1);
    Ok(EliminationOutcome::Solved(x))
}

/// Solve `X * A = B`, consuming both matrices.
///
/// Fails with [`LinalgError::SingularMatrix`] when `a` is singular; the
/// error carries the failing row for diagnosis.
pub fn solve(a: Matrix, b: Matrix, sink: &mut dyn ProgressSink) -> Result<Matrix> {
    match eliminate(a, b, sink)? {
        EliminationOutcome::Solved(x) => Ok(x),
        EliminationOutcome::Singular { row, a, .. } => Err(LinalgError::SingularMatrix {
            row,
            row_entries: a.row(row),
        }),
    }
}

/// Extract a nonzero right null vector of `a`, or `None` when `a` turns
/// out to be invertible.
///
/// On the singular outcome at row `i`, the already-triangularized leading
/// block is back-solved for coefficients `c[0..=i]` with `c[i] = 1` such
/// that `c` annihilates the original matrix: `c * A = 0`.
pub fn null_vector(a: Matrix, sink: &mut dyn ProgressSink) -> Result<Option<SparseMatrix>> {
    let n = a.cols();
    let arity = a.arity();
    let empty = Matrix::zeros(0, n, arity);

    let (row, mut a) = match eliminate(a, empty, sink)? {
        EliminationOutcome::Solved(_) => return Ok(None),
        EliminationOutcome::Singular { row, a, .. } => (row, a),
    };

    let mut coeffs = vec![Rat::zero(arity); row + 1];
    coeffs[row] = Rat::one(arity);
    for j in (0..row).rev() {
        let c = (-a.get(row, j)).div(a.get(j, j))?;
        // Fold c times row j into row i, zeroing column j of row i.
        for l in 0..=j {
            let folded = a.get(row, l) + &(a.get(j, l) * &c);
            a.set(row, l, folded);
        }
        coeffs[j] = c;
    }

    let mut v = SparseMatrix::new(1, n, arity);
    for (j, c) in coeffs.into_iter().enumerate() {
        v.insert(0, j, c);
    }
    Ok(Some(v))
}

/// Compute the requested entries of `a^{-1}`: the submatrix with rows
/// `row_indices` and columns `col_indices`.
///
/// Only the selected rows are solved for, so extracting a single row of an
/// inverse costs one elimination pass rather than `n`. Singularity is
/// fatal here; there is no recovery path.
pub fn selected_inverse(
    a: Matrix,
    row_indices: &[usize],
    col_indices: &[usize],
    sink: &mut dyn ProgressSink,
) -> Result<Matrix> {
    if a.rows() != a.cols() {
        return Err(LinalgError::ShapeMismatch {
            context: format!("matrix is {}x{}", a.rows(), a.cols()),
        });
    }
    let n = a.rows();
    let arity = a.arity();
    let b = SparseMatrix::selector(row_indices, n, arity).to_dense();
    let x = solve(a, b, sink)?;

    let mut out = Matrix::zeros(row_indices.len(), col_indices.len(), arity);
    for r in 0..row_indices.len() {
        for (ci, &c) in col_indices.iter().enumerate() {
            out.set(r, ci, x.get(r, c).clone());
        }
    }
    Ok(out)
}
