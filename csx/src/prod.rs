use crate::csr::Csr;
use crate::error::MatrixError;
use crate::matrix::{Matrix, SparseRef};

/// Compressed row arrays of a product, before they are committed to a receiver
pub(crate) struct Product {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) indptr: Vec<usize>,
    pub(crate) ind: Vec<usize>,
    pub(crate) data: Vec<f64>,
    /// which algorithm produced the result, for logging
    pub(crate) method: &'static str,
}

/// Compute `a * b` in CSR layout. The caller has checked `a.cols == b.rows`.
pub(crate) fn mat_mat_mult(a: &dyn Matrix, b: &dyn Matrix) -> Result<Product, MatrixError> {
    match (a.sparse_ref(), b.sparse_ref()) {
        (SparseRef::Dia(dia), _) if dia.is_square() => dia_mat_mult(dia.diagonal(), b, false),
        (_, SparseRef::Dia(dia)) if dia.is_square() => dia_mat_mult(dia.diagonal(), a, true),
        (SparseRef::Csr(lhs), _) => csr_mat_mult(lhs, b),
        _ => dense_mat_mult(a, b),
    }
}

/// CSR-any multiplication: accumulate over the stored entries of each row of `lhs`,
/// reading `rhs` by element.
fn csr_mat_mult(lhs: &Csr, rhs: &dyn Matrix) -> Result<Product, MatrixError> {
    let rows = lhs.cs.major;
    let (_, cols) = rhs.dims();

    let lhs_indptr = lhs.cs.indptr.borrow();
    let lhs_ind = lhs.cs.ind.borrow();
    let lhs_data = lhs.cs.data.borrow();

    let mut indptr = Vec::with_capacity(rows + 1);
    let mut ind = Vec::new();
    let mut data = Vec::new();

    for i in 0..rows {
        indptr.push(ind.len());
        for j in 0..cols {
            let mut v = 0.0;
            for k in lhs_indptr[i]..lhs_indptr[i + 1] {
                v += lhs_data[k] * rhs.at(lhs_ind[k], j)?;
            }
            if v != 0.0 {
                ind.push(j);
                data.push(v);
            }
        }
    }
    indptr.push(ind.len());

    Ok(Product {
        rows,
        cols,
        indptr,
        ind,
        data,
        method: "csr rows",
    })
}

/// Any-any multiplication: each row of `lhs` is read into a dense buffer once, rather than
/// once per output column.
fn dense_mat_mult(lhs: &dyn Matrix, rhs: &dyn Matrix) -> Result<Product, MatrixError> {
    let (rows, inner) = lhs.dims();
    let (_, cols) = rhs.dims();

    let mut indptr = Vec::with_capacity(rows + 1);
    let mut ind = Vec::new();
    let mut data = Vec::new();
    let mut row = vec![0.0; inner];

    for i in 0..rows {
        indptr.push(ind.len());
        for (ci, r) in row.iter_mut().enumerate() {
            *r = lhs.at(i, ci)?;
        }
        for j in 0..cols {
            let mut v = 0.0;
            for (ci, &e) in row.iter().enumerate() {
                v += e * rhs.at(ci, j)?;
            }
            if v != 0.0 {
                ind.push(j);
                data.push(v);
            }
        }
    }
    indptr.push(ind.len());

    Ok(Product {
        rows,
        cols,
        indptr,
        ind,
        data,
        method: "dense rows",
    })
}

/// Multiply by a square diagonal matrix with entries `diag`. The result has the shape of
/// `other`. If `trans`, `other` is the left operand and each column `k` is scaled by
/// `diag[k]`; otherwise the diagonal is on the left and row `i` is scaled by `diag[i]`.
/// Products that are exactly zero are not stored.
fn dia_mat_mult(diag: &[f64], other: &dyn Matrix, trans: bool) -> Result<Product, MatrixError> {
    let (rows, cols) = other.dims();
    let scale = |i: usize, k: usize| if trans { diag[k] } else { diag[i] };

    let mut indptr = Vec::with_capacity(rows + 1);

    let (ind, data, method) = if let SparseRef::Csr(csr) = other.sparse_ref() {
        let o_indptr = csr.cs.indptr.borrow();
        let o_ind = csr.cs.ind.borrow();
        let o_data = csr.cs.data.borrow();

        // scaling keeps the sparsity pattern, so the output is at most as large as `other`
        let mut ind = vec![0; o_data.len()];
        let mut data = vec![0.0; o_data.len()];
        let mut t = 0;

        for i in 0..rows {
            indptr.push(t);
            for k in o_indptr[i]..o_indptr[i + 1] {
                let v = o_data[k] * scale(i, o_ind[k]);
                if v != 0.0 {
                    ind[t] = o_ind[k];
                    data[t] = v;
                    t += 1;
                }
            }
        }
        ind.truncate(t);
        data.truncate(t);
        (ind, data, "diagonal scaling of csr")
    } else {
        let mut ind = Vec::new();
        let mut data = Vec::new();

        for i in 0..rows {
            indptr.push(ind.len());
            for k in 0..cols {
                let v = other.at(i, k)? * scale(i, k);
                if v != 0.0 {
                    ind.push(k);
                    data.push(v);
                }
            }
        }
        (ind, data, "diagonal scaling of dense")
    };
    indptr.push(ind.len());

    Ok(Product {
        rows,
        cols,
        indptr,
        ind,
        data,
        method,
    })
}
