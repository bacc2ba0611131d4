//! # Csx: Compressed sparse row and column matrices.
//!
//! A matrix dominated by zero entries is stored as three parallel arrays: an index
//! pointer array with one cumulative count per row (CSR) or column (CSC), a minor-axis
//! index for every stored entry, and the stored values themselves. Memory is proportional
//! to the number of stored entries rather than to rows x columns.
//!
//! Csx provides:
//! - `Csr` and `Csc` views over a shared compressed storage core,
//! - conversions to dense (`ndarray::Array2`), dictionary-of-keys, coordinate and the
//!   sibling compressed format,
//! - matrix multiplication into a `Csr` receiver, with a fast path for diagonal operands.
//!
//! ## Shared storage
//!
//! Formats never copy the arrays they are built from. Each array is a `SharedVec`, a
//! reference counted handle, so a caller holding a handle sees (and makes) changes to the
//! matrix. `Csr::t`, `Csc::t` and every coordinate or cross-compressed conversion share
//! storage with the source. Sorting the coordinate form (which CSR <-> CSC conversion
//! does) reorders the shared arrays and leaves the source matrix inconsistent with its
//! index pointers. Use `deep_copy` first when an independent matrix is needed.

#![deny(missing_docs)]
#![deny(warnings)]

/// Error type shared by every format
pub mod error;

/// Reference counted, mutable backing arrays
pub mod shared;

/// The generic matrix capability and operand dispatch
pub mod matrix;

/// Storage and lookup shared by CSR and CSC
mod compressed;

/// Compressed Sparse Row matrices
pub mod csr;

/// Compressed Sparse Column matrices
pub mod csc;

/// Coordinate (triplet) format
pub mod coo;

/// Dictionary of keys format
pub mod dok;

/// Diagonal matrices
pub mod dia;

/// Conversion protocol between formats
pub mod format;

/// Methods for multiplying matrices into a CSR receiver.
mod prod;

/// Methods for generating random sparse and dense matrices. Useful for testing and benchmarking
pub mod gen_rand;

pub use coo::Coo;
pub use csc::Csc;
pub use csr::Csr;
pub use dia::Dia;
pub use dok::Dok;
pub use error::MatrixError;
pub use format::{AnyMatrix, MatrixType, Sparser};
pub use matrix::{Matrix, SparseRef};
pub use shared::SharedVec;
