use crate::compressed::CompressedSparse;
use crate::coo::Coo;
use crate::csc::Csc;
use crate::dok::Dok;
use crate::error::MatrixError;
use crate::format::Sparser;
use crate::matrix::{Matrix, SparseRef};
use crate::prod;
use crate::shared::SharedVec;
use log::debug;
use ndarray::Array2;
use std::time::Instant;

/// Compressed Sparse Row matrix (also known as Compressed Row Storage).
///
/// `indptr` has one entry per row plus one: `indptr[i]` is the number of entries stored
/// before row `i`. `ind` holds the column of each stored entry and `data` its value.
/// Element `(i, j)` is found by scanning
///
/// ```text
/// for k in indptr[i]..indptr[i + 1] {
///     if ind[k] == j { return data[k] }
/// }
/// ```
///
/// The arrays are `SharedVec` handles. `Clone` shares them; `deep_copy` does not.
/// CSR is poor for incremental construction (use `Dok` or `Coo` and convert) but good for
/// arithmetic. A CSR matrix is the transpose of a CSC matrix over the same arrays.
#[derive(Clone, Debug, Default)]
pub struct Csr {
    pub(crate) cs: CompressedSparse,
}

impl Csr {
    /// Create a `rows x cols` matrix over the given row pointers, column indices and
    /// values. The arrays become the backing storage of the matrix: nothing is copied, so
    /// later changes through any handle to them are reflected in the matrix and vice versa.
    ///
    /// The arrays are not checked. Lookups on malformed arrays give meaningless results or
    /// panic; call `validate` to check them eagerly.
    pub fn new(
        rows: usize,
        cols: usize,
        indptr: impl Into<SharedVec<usize>>,
        ind: impl Into<SharedVec<usize>>,
        data: impl Into<SharedVec<f64>>,
    ) -> Csr {
        Csr {
            cs: CompressedSparse::new(rows, cols, indptr.into(), ind.into(), data.into()),
        }
    }

    /// An all zero `rows x cols` matrix
    pub fn zeros(rows: usize, cols: usize) -> Csr {
        Csr {
            cs: CompressedSparse::zeros(rows, cols),
        }
    }

    /// Product `a * b` as a new matrix
    pub fn product(a: &dyn Matrix, b: &dyn Matrix) -> Result<Csr, MatrixError> {
        let mut c = Csr::default();
        c.mul(a, b)?;
        Ok(c)
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.cs.major
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cs.minor
    }

    /// Handle to the row pointer array
    pub fn indptr(&self) -> SharedVec<usize> {
        self.cs.indptr.clone()
    }

    /// Handle to the column index array
    pub fn indices(&self) -> SharedVec<usize> {
        self.cs.ind.clone()
    }

    /// Handle to the value array
    pub fn data(&self) -> SharedVec<f64> {
        self.cs.data.clone()
    }

    /// Number of entries stored in row `row`
    pub fn row_nnz(&self, row: usize) -> Result<usize, MatrixError> {
        self.cs.segment_len(row)
    }

    /// Transpose as a CSC matrix sharing this matrix's arrays. O(1): rows become columns,
    /// and a change through either matrix shows in the other.
    pub fn t(&self) -> Csc {
        Csc {
            cs: self.cs.clone(),
        }
    }

    /// Stored entries as `(row, col, value)`, in storage order. Explicit zeros included.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> {
        self.cs.triplets().into_iter()
    }

    /// Equivalent matrix whose arrays are not shared with `self`
    pub fn deep_copy(&self) -> Csr {
        Csr {
            cs: self.cs.deep_copy(),
        }
    }

    /// Check that the arrays describe a well formed matrix: `indptr` has `rows + 1`
    /// non-decreasing entries from 0 to `nnz`, and every column index is in range.
    pub fn validate(&self) -> Result<(), MatrixError> {
        self.cs.validate()
    }

    /// Store the matrix product `a * b` in `self`. Fails with `Shape` if `a.cols != b.rows`,
    /// in which case `self` is left untouched.
    ///
    /// A diagonal operand (either side) uses a scaling fast path; a CSR left operand is
    /// walked row by row over its stored entries; anything else is read into a dense row
    /// buffer first. Only non-zero results are stored; there is no tolerance, so near
    /// cancellation leaves small stored values.
    ///
    /// The result replaces the contents of this matrix's arrays in place. Other matrices
    /// sharing those arrays see the new contents (but keep their own dimensions).
    pub fn mul(&mut self, a: &dyn Matrix, b: &dyn Matrix) -> Result<(), MatrixError> {
        let (ar, ac) = a.dims();
        let (br, bc) = b.dims();

        if ac != br {
            return Err(MatrixError::Shape {
                a_rows: ar,
                a_cols: ac,
                b_rows: br,
                b_cols: bc,
            });
        }

        let tick = Instant::now();
        let product = prod::mat_mat_mult(a, b)?;
        debug!(
            "csr mul {}x{} by {}x{} via {} gave nnz {} in {:.3}s",
            ar,
            ac,
            br,
            bc,
            product.method,
            product.data.len(),
            tick.elapsed().as_millis() as f64 / 1000.0
        );

        self.cs.major = product.rows;
        self.cs.minor = product.cols;
        self.cs.indptr.replace(product.indptr);
        self.cs.ind.replace(product.ind);
        self.cs.data.replace(product.data);
        Ok(())
    }

    /// Copy into a `sprs::CsMat` in CSR storage. Duplicate entries are summed.
    pub fn to_csmat(&self) -> sprs::CsMat<f64> {
        let mut tri = sprs::TriMat::with_capacity((self.rows(), self.cols()), self.nnz());
        self.cs.foreach(|row, col, v| tri.add_triplet(row, col, v));
        tri.to_csr()
    }

    /// Copy a `sprs::CsMat` of either storage order into a new CSR matrix
    pub fn from_csmat<T: Copy + Into<f64>, I: sprs::SpIndex>(mat: &sprs::CsMatI<T, I>) -> Csr {
        let (rows, cols) = mat.shape();

        if mat.storage() == sprs::CSR {
            let mut indptr = Vec::with_capacity(rows + 1);
            let mut ind: Vec<usize> = Vec::with_capacity(mat.nnz());
            let mut data: Vec<f64> = Vec::with_capacity(mat.nnz());
            indptr.push(0);

            for v in mat.outer_iterator() {
                ind.extend(v.indices().iter().map(|i| i.index()));
                data.extend(v.data().iter().map(|&x| x.into()));
                indptr.push(ind.len());
            }
            Csr::new(rows, cols, indptr, ind, data)
        } else {
            Csc::from_csmat(mat).to_csr()
        }
    }
}

impl Matrix for Csr {
    fn dims(&self) -> (usize, usize) {
        (self.cs.major, self.cs.minor)
    }

    fn at(&self, row: usize, col: usize) -> Result<f64, MatrixError> {
        self.cs.at(row, col)
    }

    fn sparse_ref(&self) -> SparseRef<'_> {
        SparseRef::Csr(self)
    }
}

impl Sparser for Csr {
    fn nnz(&self) -> usize {
        self.cs.nnz()
    }

    /// Dense copy; shares nothing with `self`
    fn to_dense(&self) -> Array2<f64> {
        let mut arr = Array2::zeros((self.rows(), self.cols()));
        self.cs.foreach(|row, col, v| arr[(row, col)] = v);
        arr
    }

    /// Dictionary copy; shares nothing with `self`
    fn to_dok(&self) -> Dok {
        let mut dok = Dok::new(self.rows(), self.cols());
        self.cs.foreach(|row, col, v| dok.insert(row, col, v));
        dok
    }

    /// Coordinate form with a fresh row index array, sharing the column indices and values
    /// with `self`. Sorting the result reorders this matrix's arrays too.
    fn to_coo(&self) -> Coo {
        Coo::new(
            self.rows(),
            self.cols(),
            self.cs.expand_indptr(),
            self.cs.ind.clone(),
            self.cs.data.clone(),
        )
    }

    fn to_csr(&self) -> Csr {
        self.clone()
    }

    /// Goes through `to_coo`, which reorders the shared arrays into column order and so
    /// leaves `self` inconsistent with its row pointers.
    fn to_csc(&self) -> Csc {
        self.to_coo().to_csc()
    }
}
