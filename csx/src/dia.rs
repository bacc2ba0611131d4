use crate::error::{check_bounds, MatrixError};
use crate::matrix::{Matrix, SparseRef};
use ndarray::Array2;

/// Diagonal matrix: only the entries `(i, i)` may be non-zero.
#[derive(Clone, Debug, PartialEq)]
pub struct Dia {
    rows: usize,
    cols: usize,
    diagonal: Vec<f64>,
}

impl Dia {
    /// Create a `rows x cols` diagonal matrix. `diagonal` must hold `min(rows, cols)`
    /// values.
    pub fn new(rows: usize, cols: usize, diagonal: Vec<f64>) -> Result<Dia, MatrixError> {
        if diagonal.len() != rows.min(cols) {
            return Err(MatrixError::Structure(format!(
                "{} diagonal values for a {}x{} matrix",
                diagonal.len(),
                rows,
                cols
            )));
        }
        Ok(Dia { rows, cols, diagonal })
    }

    /// Square `n x n` diagonal matrix with the `n` values of `diagonal`
    pub fn from_diagonal(diagonal: Vec<f64>) -> Dia {
        let n = diagonal.len();
        Dia {
            rows: n,
            cols: n,
            diagonal,
        }
    }

    /// The diagonal values, in row order
    pub fn diagonal(&self) -> &[f64] {
        &self.diagonal
    }

    /// True if rows == cols
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Number of stored diagonal values
    pub fn nnz(&self) -> usize {
        self.diagonal.len()
    }

    /// Dense copy
    pub fn to_dense(&self) -> Array2<f64> {
        let mut arr = Array2::zeros((self.rows, self.cols));
        for (i, &v) in self.diagonal.iter().enumerate() {
            arr[(i, i)] = v;
        }
        arr
    }
}

impl Matrix for Dia {
    fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    fn at(&self, row: usize, col: usize) -> Result<f64, MatrixError> {
        check_bounds(row, col, self.dims())?;
        Ok(if row == col { self.diagonal[row] } else { 0.0 })
    }

    fn sparse_ref(&self) -> SparseRef<'_> {
        SparseRef::Dia(self)
    }
}
