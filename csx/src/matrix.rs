use crate::csr::Csr;
use crate::dia::Dia;
use crate::error::{check_bounds, MatrixError};
use ndarray::Array2;

/// Minimal capability shared by every matrix type: dimensions and element access.
pub trait Matrix {
    /// Shape as `(rows, cols)`
    fn dims(&self) -> (usize, usize);

    /// Element at `(row, col)`. Out of range indices give `RowRange` / `ColRange`.
    fn at(&self, row: usize, col: usize) -> Result<f64, MatrixError>;

    /// Report whether this matrix is one of the representations the multiplication fast
    /// paths understand. Everything else is treated as an opaque, dense-access matrix.
    fn sparse_ref(&self) -> SparseRef<'_> {
        SparseRef::Other
    }
}

/// Closed set of representations recognised when selecting a multiplication algorithm.
#[derive(Clone, Copy, Debug)]
pub enum SparseRef<'a> {
    /// Compressed sparse row matrix
    Csr(&'a Csr),
    /// Diagonal matrix
    Dia(&'a Dia),
    /// Anything else: accessed through `Matrix::at`
    Other,
}

impl Matrix for Array2<f64> {
    fn dims(&self) -> (usize, usize) {
        self.dim()
    }

    fn at(&self, row: usize, col: usize) -> Result<f64, MatrixError> {
        check_bounds(row, col, self.dim())?;
        Ok(self[(row, col)])
    }
}

/// Number of non-zero values in a dense matrix
pub fn dense_nnz(m: &Array2<f64>) -> usize {
    m.iter().filter(|&&v| v != 0.0).count()
}
