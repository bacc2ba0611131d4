use crate::compressed::CompressedSparse;
use crate::coo::Coo;
use crate::csr::Csr;
use crate::dok::Dok;
use crate::error::MatrixError;
use crate::format::Sparser;
use crate::matrix::Matrix;
use crate::shared::SharedVec;
use ndarray::Array2;

/// Compressed Sparse Column matrix (also known as Compressed Column Storage).
///
/// The column-major sibling of `Csr`: `indptr` has one entry per column plus one, `ind`
/// holds the row of each stored entry. Internally the storage core is indexed
/// (column, row). CSC has no multiplication of its own; as an operand of `Csr::mul` it is
/// read through `Matrix::at`.
#[derive(Clone, Debug, Default)]
pub struct Csc {
    pub(crate) cs: CompressedSparse,
}

impl Csc {
    /// Create a `rows x cols` matrix over the given column pointers, row indices and
    /// values. The arrays become the backing storage of the matrix without being copied or
    /// checked; see `Csr::new`.
    pub fn new(
        rows: usize,
        cols: usize,
        indptr: impl Into<SharedVec<usize>>,
        ind: impl Into<SharedVec<usize>>,
        data: impl Into<SharedVec<f64>>,
    ) -> Csc {
        Csc {
            cs: CompressedSparse::new(cols, rows, indptr.into(), ind.into(), data.into()),
        }
    }

    /// An all zero `rows x cols` matrix
    pub fn zeros(rows: usize, cols: usize) -> Csc {
        Csc {
            cs: CompressedSparse::zeros(cols, rows),
        }
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.cs.minor
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cs.major
    }

    /// Handle to the column pointer array
    pub fn indptr(&self) -> SharedVec<usize> {
        self.cs.indptr.clone()
    }

    /// Handle to the row index array
    pub fn indices(&self) -> SharedVec<usize> {
        self.cs.ind.clone()
    }

    /// Handle to the value array
    pub fn data(&self) -> SharedVec<f64> {
        self.cs.data.clone()
    }

    /// Number of entries stored in column `col`
    pub fn col_nnz(&self, col: usize) -> Result<usize, MatrixError> {
        self.cs.segment_len(col).map_err(MatrixError::transposed)
    }

    /// Transpose as a CSR matrix sharing this matrix's arrays
    pub fn t(&self) -> Csr {
        Csr {
            cs: self.cs.clone(),
        }
    }

    /// Stored entries as `(row, col, value)`, in storage (column-major) order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> {
        self.cs
            .triplets()
            .into_iter()
            .map(|(col, row, v)| (row, col, v))
    }

    /// Equivalent matrix whose arrays are not shared with `self`
    pub fn deep_copy(&self) -> Csc {
        Csc {
            cs: self.cs.deep_copy(),
        }
    }

    /// Check that the arrays describe a well formed matrix
    pub fn validate(&self) -> Result<(), MatrixError> {
        self.cs.validate()
    }

    /// Copy into a `sprs::CsMat` in CSC storage. Duplicate entries are summed.
    pub fn to_csmat(&self) -> sprs::CsMat<f64> {
        let mut tri = sprs::TriMat::with_capacity((self.rows(), self.cols()), self.nnz());
        self.cs.foreach(|col, row, v| tri.add_triplet(row, col, v));
        tri.to_csc()
    }

    /// Copy a `sprs::CsMat` of either storage order into a new CSC matrix
    pub fn from_csmat<T: Copy + Into<f64>, I: sprs::SpIndex>(mat: &sprs::CsMatI<T, I>) -> Csc {
        let (rows, cols) = mat.shape();

        if mat.storage() == sprs::CSC {
            let mut indptr = Vec::with_capacity(cols + 1);
            let mut ind: Vec<usize> = Vec::with_capacity(mat.nnz());
            let mut data: Vec<f64> = Vec::with_capacity(mat.nnz());
            indptr.push(0);

            for v in mat.outer_iterator() {
                ind.extend(v.indices().iter().map(|i| i.index()));
                data.extend(v.data().iter().map(|&x| x.into()));
                indptr.push(ind.len());
            }
            Csc::new(rows, cols, indptr, ind, data)
        } else {
            let mut row_ind: Vec<usize> = Vec::with_capacity(mat.nnz());
            let mut col_ind: Vec<usize> = Vec::with_capacity(mat.nnz());
            let mut data: Vec<f64> = Vec::with_capacity(mat.nnz());
            for (&v, (r, c)) in mat.iter() {
                row_ind.push(r.index());
                col_ind.push(c.index());
                data.push(v.into());
            }
            Coo::new(rows, cols, row_ind, col_ind, data).to_csc()
        }
    }
}

impl Matrix for Csc {
    fn dims(&self) -> (usize, usize) {
        (self.cs.minor, self.cs.major)
    }

    fn at(&self, row: usize, col: usize) -> Result<f64, MatrixError> {
        self.cs.at(col, row).map_err(MatrixError::transposed)
    }
}

impl Sparser for Csc {
    fn nnz(&self) -> usize {
        self.cs.nnz()
    }

    /// Dense copy; shares nothing with `self`
    fn to_dense(&self) -> Array2<f64> {
        let mut arr = Array2::zeros((self.rows(), self.cols()));
        self.cs.foreach(|col, row, v| arr[(row, col)] = v);
        arr
    }

    /// Dictionary copy; shares nothing with `self`
    fn to_dok(&self) -> Dok {
        let mut dok = Dok::new(self.rows(), self.cols());
        self.cs.foreach(|col, row, v| dok.insert(row, col, v));
        dok
    }

    /// Coordinate form with a fresh column index array, sharing the row indices and values
    /// with `self`. Sorting the result reorders this matrix's arrays too.
    fn to_coo(&self) -> Coo {
        Coo::new(
            self.rows(),
            self.cols(),
            self.cs.ind.clone(),
            self.cs.expand_indptr(),
            self.cs.data.clone(),
        )
    }

    /// Goes through `to_coo`, which reorders the shared arrays into row order and so
    /// leaves `self` inconsistent with its column pointers.
    fn to_csr(&self) -> Csr {
        self.to_coo().to_csr()
    }

    fn to_csc(&self) -> Csc {
        self.clone()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::gen_rand::{random_csc, random_dense_mat};
    use crate::matrix::dense_nnz;
    use ndarray::array;
    use rand::prelude::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    // [[1, 0, 2],
    //  [0, 0, 3]]
    fn sample() -> Csc {
        Csc::new(2, 3, vec![0, 1, 1, 3], vec![0, 1, 0], vec![1.0, 3.0, 2.0])
    }

    #[test]
    fn access() {
        let m = sample();
        assert_eq!(m.dims(), (2, 3));
        assert_eq!(m.nnz(), 3);
        assert_eq!(m.at(0, 0), Ok(1.0));
        assert_eq!(m.at(0, 2), Ok(2.0));
        assert_eq!(m.at(1, 2), Ok(3.0));
        assert_eq!(m.at(1, 1), Ok(0.0));
        assert_eq!(m.at(2, 0), Err(MatrixError::RowRange { index: 2, rows: 2 }));
        assert_eq!(m.at(0, 3), Err(MatrixError::ColRange { index: 3, cols: 3 }));
        assert_eq!(m.to_dense(), array![[1.0, 0.0, 2.0], [0.0, 0.0, 3.0]]);
        assert_eq!(m.iter().collect::<Vec<_>>(), vec![(0, 0, 1.0), (1, 2, 3.0), (0, 2, 2.0)]);
    }

    #[test]
    fn col_nnz() {
        let m = sample();
        assert_eq!(m.col_nnz(0), Ok(1));
        assert_eq!(m.col_nnz(1), Ok(0));
        assert_eq!(m.col_nnz(2), Ok(2));
        assert_eq!(m.col_nnz(3), Err(MatrixError::ColRange { index: 3, cols: 3 }));
    }

    #[test]
    fn dense_round_trip() {
        let rng = &mut Pcg64Mcg::seed_from_u64(42);
        for _ in 0..50 {
            let (rows, cols) = (rng.gen_range(0..20), rng.gen_range(0..20));
            let m = random_csc(rng, rows, cols, 0.3);
            let dense = m.to_dense();
            assert_eq!(dense.dim(), (rows, cols));
            for ((r, c), &v) in dense.indexed_iter() {
                assert_eq!(m.at(r, c), Ok(v));
            }
            let dok = m.to_dok();
            assert_eq!(dok.nnz(), dense_nnz(&dense));
            assert_eq!(dok.to_dense(), dense);
        }
    }

    #[test]
    fn transpose_aliases() {
        let m = sample();
        let t = m.t();
        assert_eq!(t.dims(), (3, 2));
        assert_eq!(t.to_dense(), m.to_dense().t());
        assert!(SharedVec::ptr_eq(&t.indices(), &m.indices()));

        let tt = t.t();
        assert_eq!(tt.to_dense(), m.to_dense());
        m.data().borrow_mut()[1] = -3.0;
        assert_eq!(tt.at(1, 2), Ok(-3.0));
        assert_eq!(t.at(2, 1), Ok(-3.0));
    }

    #[test]
    fn coo_shares_storage() {
        // [[0, 1],
        //  [2, 0]] stored by column: (1, 0) = 2 then (0, 1) = 1
        let m = Csc::new(2, 2, vec![0, 1, 2], vec![1, 0], vec![2.0, 1.0]);
        let coo = m.to_coo();
        assert_eq!(coo.col_indices().to_vec(), vec![0, 1]);
        assert!(SharedVec::ptr_eq(&coo.row_indices(), &m.indices()));

        coo.sort_by_row();
        assert_eq!(m.data().to_vec(), vec![1.0, 2.0]);
        assert_eq!(m.at(1, 0), Ok(0.0));
    }

    #[test]
    fn to_csr() {
        let rng = &mut Pcg64Mcg::seed_from_u64(42);
        for _ in 0..50 {
            let m = random_csc(rng, 7, 13, 0.3);
            let dense = m.to_dense();
            let copy = m.deep_copy();
            let csr = copy.to_csr();
            assert_eq!(csr.to_dense(), dense);
            assert_eq!(csr.nnz(), m.nnz());
            assert!(SharedVec::ptr_eq(&csr.data(), &copy.data()));
            assert_eq!(m.to_dense(), dense);
        }
    }

    #[test]
    fn operand_of_csr_mul() -> anyhow::Result<()> {
        let rng = &mut Pcg64Mcg::seed_from_u64(42);
        for _ in 0..20 {
            let a = random_csc(rng, 6, 5, 0.4);
            let b = random_dense_mat(rng, 5, 4);
            let c = Csr::product(&a, &b)?;
            assert_eq!(c.to_dense(), a.to_dense().dot(&b));
            let c = Csr::product(&b.t().to_owned(), &a.t())?;
            assert_eq!(c.to_dense(), b.t().dot(&a.to_dense().t()));
        }
        Ok(())
    }

    #[test]
    fn sprs_conversion() {
        let rng = &mut Pcg64Mcg::seed_from_u64(42);
        for _ in 0..20 {
            let m = random_csc(rng, 10, 15, 0.3);
            let csmat = m.to_csmat();
            assert!(csmat.is_csc());
            assert_eq!(csmat.to_dense(), m.to_dense());
            assert_eq!(Csc::from_csmat(&csmat).to_dense(), m.to_dense());
            assert_eq!(Csc::from_csmat(&csmat.to_csr()).to_dense(), m.to_dense());
        }
    }
}
