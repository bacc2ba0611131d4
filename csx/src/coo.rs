use crate::csc::Csc;
use crate::csr::Csr;
use crate::dok::Dok;
use crate::error::{check_bounds, MatrixError};
use crate::format::Sparser;
use crate::matrix::Matrix;
use crate::shared::SharedVec;
use itertools::Itertools;
use ndarray::Array2;

/// Coordinate (triplet) format: parallel arrays of row index, column index and value.
/// Duplicate coordinates are allowed and sum. Compressing keeps duplicates as separate
/// stored entries, and compressed lookup returns the first one stored.
///
/// Like the compressed formats, a `Coo` is a view over `SharedVec` arrays. Conversion to
/// CSR or CSC sorts the triplets in place, which reorders every array sharing storage
/// with this matrix.
#[derive(Clone, Debug, Default)]
pub struct Coo {
    rows: usize,
    cols: usize,
    row_ind: SharedVec<usize>,
    col_ind: SharedVec<usize>,
    data: SharedVec<f64>,
}

impl Coo {
    /// Create a `rows x cols` matrix over the given triplet arrays, without copying them.
    ///
    /// The arrays are not checked. An index out of range panics in conversions; call
    /// `validate` to check them eagerly.
    pub fn new(
        rows: usize,
        cols: usize,
        row_ind: impl Into<SharedVec<usize>>,
        col_ind: impl Into<SharedVec<usize>>,
        data: impl Into<SharedVec<f64>>,
    ) -> Coo {
        Coo {
            rows,
            cols,
            row_ind: row_ind.into(),
            col_ind: col_ind.into(),
            data: data.into(),
        }
    }

    /// Handle to the row index array
    pub fn row_indices(&self) -> SharedVec<usize> {
        self.row_ind.clone()
    }

    /// Handle to the column index array
    pub fn col_indices(&self) -> SharedVec<usize> {
        self.col_ind.clone()
    }

    /// Handle to the value array
    pub fn data(&self) -> SharedVec<f64> {
        self.data.clone()
    }

    /// Equivalent matrix whose arrays are not shared with `self`
    pub fn deep_copy(&self) -> Coo {
        Coo::new(
            self.rows,
            self.cols,
            self.row_ind.deep_copy(),
            self.col_ind.deep_copy(),
            self.data.deep_copy(),
        )
    }

    /// Check that the three arrays have equal lengths and every index is in range
    pub fn validate(&self) -> Result<(), MatrixError> {
        let rows = self.row_ind.borrow();
        let cols = self.col_ind.borrow();
        let nnz = self.data.len();

        if rows.len() != nnz || cols.len() != nnz {
            return Err(MatrixError::Structure(format!(
                "{} row indices and {} column indices for {} values",
                rows.len(),
                cols.len(),
                nnz
            )));
        }
        if let Some(&bad) = rows.iter().find(|&&r| r >= self.rows) {
            return Err(MatrixError::Structure(format!(
                "row index {} out of range for {} rows",
                bad, self.rows
            )));
        }
        if let Some(&bad) = cols.iter().find(|&&c| c >= self.cols) {
            return Err(MatrixError::Structure(format!(
                "column index {} out of range for {} columns",
                bad, self.cols
            )));
        }
        Ok(())
    }

    /// Stable sort of the triplets by row, in place
    pub fn sort_by_row(&self) {
        self.sort_by(&self.row_ind);
    }

    /// Stable sort of the triplets by column, in place
    pub fn sort_by_col(&self) {
        self.sort_by(&self.col_ind);
    }

    fn sort_by(&self, key: &SharedVec<usize>) {
        let perm = {
            let key = key.borrow();
            (0..key.len()).sorted_by_key(|&k| key[k]).collect::<Vec<_>>()
        };
        self.row_ind.permute(&perm);
        self.col_ind.permute(&perm);
        self.data.permute(&perm);
    }
}

/// Cumulative count of entries before each major index, given the sorted major index of
/// every entry
fn compress(majors: &[usize], n: usize) -> Vec<usize> {
    let mut indptr = vec![0; n + 1];
    for &m in majors {
        indptr[m + 1] += 1;
    }
    for i in 0..n {
        indptr[i + 1] += indptr[i];
    }
    indptr
}

impl Matrix for Coo {
    fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    fn at(&self, row: usize, col: usize) -> Result<f64, MatrixError> {
        check_bounds(row, col, self.dims())?;
        let rows = self.row_ind.borrow();
        let cols = self.col_ind.borrow();
        let data = self.data.borrow();
        Ok(rows
            .iter()
            .zip(cols.iter())
            .zip(data.iter())
            .filter(|&((&r, &c), _)| r == row && c == col)
            .map(|(_, &v)| v)
            .sum())
    }
}

impl Sparser for Coo {
    fn nnz(&self) -> usize {
        self.data.len()
    }

    fn to_dense(&self) -> Array2<f64> {
        let mut arr = Array2::zeros((self.rows, self.cols));
        let rows = self.row_ind.borrow();
        let cols = self.col_ind.borrow();
        for ((&r, &c), &v) in rows.iter().zip(cols.iter()).zip(self.data.borrow().iter()) {
            arr[(r, c)] += v;
        }
        arr
    }

    fn to_dok(&self) -> Dok {
        let mut dok = Dok::new(self.rows, self.cols);
        let rows = self.row_ind.borrow();
        let cols = self.col_ind.borrow();
        for ((&r, &c), &v) in rows.iter().zip(cols.iter()).zip(self.data.borrow().iter()) {
            dok.accumulate(r, c, v);
        }
        dok
    }

    fn to_coo(&self) -> Coo {
        self.clone()
    }

    /// Sorts the triplets by row in place; the result shares the column indices and
    /// values with `self`
    fn to_csr(&self) -> Csr {
        self.sort_by_row();
        let indptr = compress(&self.row_ind.borrow(), self.rows);
        Csr::new(self.rows, self.cols, indptr, self.col_ind.clone(), self.data.clone())
    }

    /// Sorts the triplets by column in place; the result shares the row indices and
    /// values with `self`
    fn to_csc(&self) -> Csc {
        self.sort_by_col();
        let indptr = compress(&self.col_ind.borrow(), self.cols);
        Csc::new(self.rows, self.cols, indptr, self.row_ind.clone(), self.data.clone())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use ndarray::array;

    fn sample() -> Coo {
        // [[0, 2, 0],
        //  [1, 0, 3]] in scrambled order
        Coo::new(2, 3, vec![1, 0, 1], vec![2, 1, 0], vec![3.0, 2.0, 1.0])
    }

    #[test]
    fn access() {
        let m = sample();
        assert_eq!(m.nnz(), 3);
        assert_eq!(m.at(1, 2), Ok(3.0));
        assert_eq!(m.at(0, 0), Ok(0.0));
        assert_eq!(m.at(0, 3), Err(MatrixError::ColRange { index: 3, cols: 3 }));
        assert_eq!(m.to_dense(), array![[0.0, 2.0, 0.0], [1.0, 0.0, 3.0]]);
    }

    #[test]
    fn duplicates_sum() {
        let m = Coo::new(1, 1, vec![0, 0], vec![0, 0], vec![1.5, 2.5]);
        assert_eq!(m.at(0, 0), Ok(4.0));
        assert_eq!(m.to_dense(), array![[4.0]]);
        assert_eq!(m.to_dok().nnz(), 1);

        // compressing keeps both entries; lookup finds the first
        let csr = m.deep_copy().to_csr();
        assert_eq!(csr.nnz(), 2);
        assert_eq!(csr.indptr().to_vec(), vec![0, 2]);
        assert_eq!(csr.at(0, 0), Ok(1.5));
    }

    #[test]
    fn validate() {
        assert!(sample().validate().is_ok());
        assert!(Coo::new(3, 2, vec![], vec![], vec![]).validate().is_ok());

        let bad = [
            Coo::new(2, 3, vec![1, 0], vec![2, 1, 0], vec![3.0, 2.0, 1.0]),
            Coo::new(2, 3, vec![1, 2, 1], vec![2, 1, 0], vec![3.0, 2.0, 1.0]),
            Coo::new(2, 3, vec![1, 0, 1], vec![3, 1, 0], vec![3.0, 2.0, 1.0]),
        ];
        for m in bad {
            assert!(matches!(m.validate(), Err(MatrixError::Structure(_))));
        }
    }

    #[test]
    fn to_csr_sorts_in_place() {
        let m = sample();
        let csr = m.to_csr();
        assert_eq!(m.row_indices().to_vec(), vec![0, 1, 1]);
        assert_eq!(m.col_indices().to_vec(), vec![1, 2, 0]);
        assert_eq!(csr.indptr().to_vec(), vec![0, 1, 3]);
        assert!(SharedVec::ptr_eq(&csr.data(), &m.data()));
        assert!(csr.validate().is_ok());
        assert_eq!(csr.to_dense(), m.to_dense());
    }

    #[test]
    fn to_csc_sorts_in_place() {
        let m = sample();
        let csc = m.to_csc();
        assert_eq!(m.col_indices().to_vec(), vec![0, 1, 2]);
        assert_eq!(m.data().to_vec(), vec![1.0, 2.0, 3.0]);
        assert_eq!(csc.indptr().to_vec(), vec![0, 1, 2, 3]);
        assert!(SharedVec::ptr_eq(&csc.indices(), &m.row_indices()));
        assert!(csc.validate().is_ok());
        assert_eq!(csc.to_dense(), m.to_dense());
    }

    #[test]
    fn empty() {
        let m = Coo::new(3, 2, vec![], vec![], vec![]);
        assert_eq!(m.to_csr().indptr().to_vec(), vec![0, 0, 0, 0]);
        assert_eq!(m.to_csc().indptr().to_vec(), vec![0, 0, 0]);
    }
}
