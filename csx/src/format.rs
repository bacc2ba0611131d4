use crate::coo::Coo;
use crate::csc::Csc;
use crate::csr::Csr;
use crate::dok::Dok;
use crate::error::MatrixError;
use crate::matrix::{Matrix, SparseRef};
use ndarray::Array2;

/// Conversions every sparse format supports.
///
/// Dense and dictionary conversions always copy. Coordinate and compressed conversions
/// from a compressed format share the index and value arrays with the source, and the
/// CSR <-> CSC conversions sort those shared arrays, corrupting the source. Convert a
/// `deep_copy` when the source must stay usable.
pub trait Sparser: Matrix {
    /// Number of stored entries. For the compressed and coordinate formats this includes
    /// explicitly stored zeros.
    fn nnz(&self) -> usize;

    /// Dense copy
    fn to_dense(&self) -> Array2<f64>;

    /// Dictionary of keys copy. Stored zeros are dropped.
    fn to_dok(&self) -> Dok;

    /// Coordinate form
    fn to_coo(&self) -> Coo;

    /// Compressed Sparse Row form
    fn to_csr(&self) -> Csr;

    /// Compressed Sparse Column form
    fn to_csc(&self) -> Csc;

    /// Convert to the format selected by `matrix_type`
    fn to_type(&self, matrix_type: MatrixType) -> AnyMatrix
    where
        Self: Sized,
    {
        matrix_type.convert(self)
    }
}

/// Selector for a generic "convert to format" request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatrixType {
    /// `ndarray::Array2<f64>`
    Dense,
    /// Dictionary of keys
    Dok,
    /// Coordinate
    Coo,
    /// Compressed Sparse Row
    Csr,
    /// Compressed Sparse Column
    Csc,
}

impl MatrixType {
    /// Convert `source` to this format, with the sharing rules of the corresponding
    /// `Sparser` method
    pub fn convert(self, source: &dyn Sparser) -> AnyMatrix {
        match self {
            MatrixType::Dense => AnyMatrix::Dense(source.to_dense()),
            MatrixType::Dok => AnyMatrix::Dok(source.to_dok()),
            MatrixType::Coo => AnyMatrix::Coo(source.to_coo()),
            MatrixType::Csr => AnyMatrix::Csr(source.to_csr()),
            MatrixType::Csc => AnyMatrix::Csc(source.to_csc()),
        }
    }
}

/// Result of a `MatrixType` conversion
#[derive(Clone, Debug)]
pub enum AnyMatrix {
    /// Dense matrix
    Dense(Array2<f64>),
    /// Dictionary of keys
    Dok(Dok),
    /// Coordinate
    Coo(Coo),
    /// Compressed Sparse Row
    Csr(Csr),
    /// Compressed Sparse Column
    Csc(Csc),
}

impl AnyMatrix {
    /// Format of the contained matrix
    pub fn matrix_type(&self) -> MatrixType {
        match self {
            AnyMatrix::Dense(_) => MatrixType::Dense,
            AnyMatrix::Dok(_) => MatrixType::Dok,
            AnyMatrix::Coo(_) => MatrixType::Coo,
            AnyMatrix::Csr(_) => MatrixType::Csr,
            AnyMatrix::Csc(_) => MatrixType::Csc,
        }
    }

    fn inner(&self) -> &dyn Matrix {
        match self {
            AnyMatrix::Dense(m) => m,
            AnyMatrix::Dok(m) => m,
            AnyMatrix::Coo(m) => m,
            AnyMatrix::Csr(m) => m,
            AnyMatrix::Csc(m) => m,
        }
    }
}

impl Matrix for AnyMatrix {
    fn dims(&self) -> (usize, usize) {
        self.inner().dims()
    }

    fn at(&self, row: usize, col: usize) -> Result<f64, MatrixError> {
        self.inner().at(row, col)
    }

    fn sparse_ref(&self) -> SparseRef<'_> {
        self.inner().sparse_ref()
    }
}
