use crate::coo::Coo;
use crate::csc::Csc;
use crate::csr::Csr;
use crate::error::{check_bounds, MatrixError};
use crate::format::Sparser;
use crate::matrix::Matrix;
use fxhash::FxHashMap;
use itertools::Itertools;
use ndarray::Array2;

/// Dictionary of keys format: a map from `(row, col)` to value. Cheap to build
/// incrementally; convert to `Csr` or `Csc` for arithmetic. Zero values are never stored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dok {
    rows: usize,
    cols: usize,
    elements: FxHashMap<(usize, usize), f64>,
}

impl Dok {
    /// An empty `rows x cols` matrix
    pub fn new(rows: usize, cols: usize) -> Dok {
        Dok {
            rows,
            cols,
            elements: FxHashMap::default(),
        }
    }

    /// Set element `(row, col)` to `v`. Setting 0 removes the element.
    pub fn set(&mut self, row: usize, col: usize, v: f64) -> Result<(), MatrixError> {
        check_bounds(row, col, self.dims())?;
        self.insert(row, col, v);
        Ok(())
    }

    pub(crate) fn insert(&mut self, row: usize, col: usize, v: f64) {
        if v == 0.0 {
            self.elements.remove(&(row, col));
        } else {
            self.elements.insert((row, col), v);
        }
    }

    pub(crate) fn accumulate(&mut self, row: usize, col: usize, v: f64) {
        let sum = self.elements.get(&(row, col)).copied().unwrap_or(0.0) + v;
        self.insert(row, col, sum);
    }

    /// Keys in row-major order
    fn sorted_keys(&self) -> Vec<(usize, usize)> {
        self.elements.keys().copied().sorted_unstable().collect()
    }
}

impl Matrix for Dok {
    fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    fn at(&self, row: usize, col: usize) -> Result<f64, MatrixError> {
        check_bounds(row, col, self.dims())?;
        Ok(self.elements.get(&(row, col)).copied().unwrap_or(0.0))
    }
}

impl Sparser for Dok {
    fn nnz(&self) -> usize {
        self.elements.len()
    }

    fn to_dense(&self) -> Array2<f64> {
        let mut arr = Array2::zeros((self.rows, self.cols));
        for (&idx, &v) in &self.elements {
            arr[idx] = v;
        }
        arr
    }

    fn to_dok(&self) -> Dok {
        self.clone()
    }

    /// Fresh triplet arrays in row-major order
    fn to_coo(&self) -> Coo {
        let keys = self.sorted_keys();
        let data = keys.iter().map(|k| self.elements[k]).collect::<Vec<f64>>();
        let (row_ind, col_ind): (Vec<usize>, Vec<usize>) = keys.into_iter().unzip();
        Coo::new(self.rows, self.cols, row_ind, col_ind, data)
    }

    fn to_csr(&self) -> Csr {
        self.to_coo().to_csr()
    }

    fn to_csc(&self) -> Csc {
        self.to_coo().to_csc()
    }
}
