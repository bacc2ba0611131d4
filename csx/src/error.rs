use thiserror::Error;

/// Errors raised by matrix access, construction checks and multiplication.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// Row index outside `[0, rows)`
    #[error("row index {index} out of range for matrix with {rows} rows")]
    RowRange {
        /// offending row index
        index: usize,
        /// number of rows in the matrix
        rows: usize,
    },

    /// Column index outside `[0, cols)`
    #[error("column index {index} out of range for matrix with {cols} columns")]
    ColRange {
        /// offending column index
        index: usize,
        /// number of columns in the matrix
        cols: usize,
    },

    /// Operands of a product have incompatible shapes
    #[error("dimension mismatch: cannot multiply {a_rows}x{a_cols} by {b_rows}x{b_cols}")]
    Shape {
        /// rows of the left operand
        a_rows: usize,
        /// columns of the left operand
        a_cols: usize,
        /// rows of the right operand
        b_rows: usize,
        /// columns of the right operand
        b_cols: usize,
    },

    /// Compressed arrays do not describe a well formed matrix
    #[error("malformed compressed storage: {0}")]
    Structure(String),
}

impl MatrixError {
    /// Swap the row and column variants. Used where the storage axes are the transpose
    /// of the public ones.
    pub(crate) fn transposed(self) -> MatrixError {
        match self {
            MatrixError::RowRange { index, rows } => MatrixError::ColRange { index, cols: rows },
            MatrixError::ColRange { index, cols } => MatrixError::RowRange { index, rows: cols },
            other => other,
        }
    }
}

/// Check `(row, col)` against the dimensions `(rows, cols)`.
pub(crate) fn check_bounds(row: usize, col: usize, (rows, cols): (usize, usize)) -> Result<(), MatrixError> {
    if row >= rows {
        return Err(MatrixError::RowRange { index: row, rows });
    }
    if col >= cols {
        return Err(MatrixError::ColRange { index: col, cols });
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn transposed_swaps_axes() {
        let e = MatrixError::RowRange { index: 4, rows: 3 };
        assert_eq!(e.transposed(), MatrixError::ColRange { index: 4, cols: 3 });
        let e = MatrixError::Shape {
            a_rows: 2,
            a_cols: 3,
            b_rows: 4,
            b_cols: 2,
        };
        assert_eq!(e.clone().transposed(), e);
    }

    #[test]
    fn messages_identify_offender() {
        assert_eq!(
            MatrixError::ColRange { index: 7, cols: 2 }.to_string(),
            "column index 7 out of range for matrix with 2 columns"
        );
        assert_eq!(
            MatrixError::Shape {
                a_rows: 2,
                a_cols: 3,
                b_rows: 4,
                b_cols: 2
            }
            .to_string(),
            "dimension mismatch: cannot multiply 2x3 by 4x2"
        );
    }
}
