use crate::error::MatrixError;
use crate::shared::SharedVec;

/// Storage common to CSR and CSC. The core only knows a major and a minor axis: for CSR
/// these are (rows, cols), for CSC (cols, rows).
///
/// `indptr[k]..indptr[k + 1]` is the range of `ind` / `data` holding the entries of major
/// index `k`. Entries within a segment need not be ordered by minor index, and explicitly
/// stored zeros count as entries.
#[derive(Clone, Debug)]
pub(crate) struct CompressedSparse {
    pub(crate) major: usize,
    pub(crate) minor: usize,
    pub(crate) indptr: SharedVec<usize>,
    pub(crate) ind: SharedVec<usize>,
    pub(crate) data: SharedVec<f64>,
}

impl Default for CompressedSparse {
    fn default() -> Self {
        CompressedSparse::zeros(0, 0)
    }
}

impl CompressedSparse {
    pub(crate) fn new(
        major: usize,
        minor: usize,
        indptr: SharedVec<usize>,
        ind: SharedVec<usize>,
        data: SharedVec<f64>,
    ) -> CompressedSparse {
        CompressedSparse {
            major,
            minor,
            indptr,
            ind,
            data,
        }
    }

    /// Empty storage with all index pointers at 0
    pub(crate) fn zeros(major: usize, minor: usize) -> CompressedSparse {
        CompressedSparse::new(
            major,
            minor,
            vec![0; major + 1].into(),
            SharedVec::default(),
            SharedVec::default(),
        )
    }

    /// Number of stored entries, including explicit zeros
    pub(crate) fn nnz(&self) -> usize {
        self.data.len()
    }

    /// Value at `(major, minor)`, or 0 if nothing is stored there. An out of range major
    /// index is reported as `RowRange`, minor as `ColRange`; callers with transposed axes
    /// swap them.
    pub(crate) fn at(&self, major: usize, minor: usize) -> Result<f64, MatrixError> {
        if major >= self.major {
            return Err(MatrixError::RowRange {
                index: major,
                rows: self.major,
            });
        }
        if minor >= self.minor {
            return Err(MatrixError::ColRange {
                index: minor,
                cols: self.minor,
            });
        }

        let indptr = self.indptr.borrow();
        let ind = self.ind.borrow();

        // TODO: binary search once segments are known to be sorted by minor index.
        match (indptr[major]..indptr[major + 1]).find(|&k| ind[k] == minor) {
            Some(k) => Ok(self.data.borrow()[k]),
            None => Ok(0.0),
        }
    }

    /// Number of entries stored for major index `major`
    pub(crate) fn segment_len(&self, major: usize) -> Result<usize, MatrixError> {
        if major >= self.major {
            return Err(MatrixError::RowRange {
                index: major,
                rows: self.major,
            });
        }
        let indptr = self.indptr.borrow();
        Ok(indptr[major + 1] - indptr[major])
    }

    /// Visit every stored entry as `(major, minor, value)`, in storage order
    pub(crate) fn foreach(&self, mut f: impl FnMut(usize, usize, f64)) {
        let indptr = self.indptr.borrow();
        let ind = self.ind.borrow();
        let data = self.data.borrow();

        for major in 0..self.major {
            for k in indptr[major]..indptr[major + 1] {
                f(major, ind[k], data[k]);
            }
        }
    }

    /// Copy out the stored entries as `(major, minor, value)` triplets
    pub(crate) fn triplets(&self) -> Vec<(usize, usize, f64)> {
        let mut out = Vec::with_capacity(self.nnz());
        self.foreach(|major, minor, v| out.push((major, minor, v)));
        out
    }

    /// Major index of every stored entry, positionally aligned with `ind` / `data`
    pub(crate) fn expand_indptr(&self) -> Vec<usize> {
        let indptr = self.indptr.borrow();
        let mut majors = vec![0; self.nnz()];
        for major in 0..self.major {
            for m in &mut majors[indptr[major]..indptr[major + 1]] {
                *m = major;
            }
        }
        majors
    }

    /// Same shape and contents on storage not shared with `self`
    pub(crate) fn deep_copy(&self) -> CompressedSparse {
        CompressedSparse::new(
            self.major,
            self.minor,
            self.indptr.deep_copy(),
            self.ind.deep_copy(),
            self.data.deep_copy(),
        )
    }

    /// Check the index pointer invariants that construction does not enforce
    pub(crate) fn validate(&self) -> Result<(), MatrixError> {
        let indptr = self.indptr.borrow();
        let ind = self.ind.borrow();
        let nnz = self.data.len();

        if indptr.len() != self.major + 1 {
            return Err(MatrixError::Structure(format!(
                "index pointer has length {}, expected {}",
                indptr.len(),
                self.major + 1
            )));
        }
        if indptr[0] != 0 {
            return Err(MatrixError::Structure(format!(
                "index pointer starts at {}, expected 0",
                indptr[0]
            )));
        }
        if let Some(k) = (0..self.major).find(|&k| indptr[k] > indptr[k + 1]) {
            return Err(MatrixError::Structure(format!(
                "index pointer decreases at position {}: {} > {}",
                k,
                indptr[k],
                indptr[k + 1]
            )));
        }
        if indptr[self.major] != nnz {
            return Err(MatrixError::Structure(format!(
                "index pointer ends at {} but {} values are stored",
                indptr[self.major], nnz
            )));
        }
        if ind.len() != nnz {
            return Err(MatrixError::Structure(format!(
                "{} indices but {} values",
                ind.len(),
                nnz
            )));
        }
        if let Some(&bad) = ind.iter().find(|&&i| i >= self.minor) {
            return Err(MatrixError::Structure(format!(
                "index {} out of range for minor dimension {}",
                bad, self.minor
            )));
        }
        Ok(())
    }
}
