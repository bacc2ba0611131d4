use crate::{Csc, Csr, Dia};
use ndarray::Array2;
use rand::prelude::Rng;
use rand::seq::index;

/// A random non-zero integer value in `[-9, 9]`, as `f64`. Integer values keep products and
/// sums exact, so results can be compared without a tolerance.
fn random_value(rng: &mut impl Rng) -> f64 {
    let v = rng.gen_range(1..10) as f64;
    if rng.gen_bool(0.5) {
        v
    } else {
        -v
    }
}

/// Generate a random dense matrix with integer values in the range `[-9, 9]`.
pub fn random_dense_mat(rng: &mut impl Rng, rows: usize, cols: usize) -> Array2<f64> {
    Array2::from_shape_fn((rows, cols), |_| rng.gen_range(-9..10) as f64)
}

/// Compressed arrays for `major` segments over a minor axis of length `minor`. Each
/// segment holds a random subset of the minor indices, in random order, with non-zero
/// values; `density` is the expected fraction of stored entries.
fn random_compressed(
    rng: &mut impl Rng,
    major: usize,
    minor: usize,
    density: f64,
) -> (Vec<usize>, Vec<usize>, Vec<f64>) {
    let mut indptr = Vec::with_capacity(major + 1);
    let mut ind = Vec::new();
    let mut data = Vec::new();
    indptr.push(0);

    for _ in 0..major {
        let nnz = (0..minor).filter(|_| rng.gen_bool(density)).count();
        ind.extend(index::sample(rng, minor, nnz).into_iter());
        data.extend((0..nnz).map(|_| random_value(rng)));
        indptr.push(ind.len());
    }
    (indptr, ind, data)
}

/// Generate a random CSR matrix of size `(rows, cols)`. Column indices within a row are
/// not sorted.
pub fn random_csr(rng: &mut impl Rng, rows: usize, cols: usize, density: f64) -> Csr {
    let (indptr, ind, data) = random_compressed(rng, rows, cols, density);
    Csr::new(rows, cols, indptr, ind, data)
}

/// Generate a random CSC matrix of size `(rows, cols)`. Row indices within a column are
/// not sorted.
pub fn random_csc(rng: &mut impl Rng, rows: usize, cols: usize, density: f64) -> Csc {
    let (indptr, ind, data) = random_compressed(rng, cols, rows, density);
    Csc::new(rows, cols, indptr, ind, data)
}

/// Generate a random square diagonal matrix of size `n`. About one diagonal value in five
/// is zero.
pub fn random_dia(rng: &mut impl Rng, n: usize) -> Dia {
    let diagonal = (0..n)
        .map(|_| if rng.gen_bool(0.2) { 0.0 } else { random_value(rng) })
        .collect();
    Dia::from_diagonal(diagonal)
}
