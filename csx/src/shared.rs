use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

/// Backing array of a sparse matrix. Cloning a `SharedVec` yields a new handle to the
/// same array, not a copy: every matrix built from a handle, and every handle, observes
/// mutations made through any other. Use `to_vec` for an independent copy.
///
/// Borrows follow `RefCell` rules. Holding a `borrow_mut` guard while calling into a
/// matrix that shares the array panics.
pub struct SharedVec<T>(Rc<RefCell<Vec<T>>>);

impl<T> SharedVec<T> {
    /// Take ownership of `vec` as a new shared array
    pub fn new(vec: Vec<T>) -> SharedVec<T> {
        SharedVec(Rc::new(RefCell::new(vec)))
    }

    /// Immutably borrow the array
    pub fn borrow(&self) -> Ref<'_, Vec<T>> {
        self.0.borrow()
    }

    /// Mutably borrow the array
    pub fn borrow_mut(&self) -> RefMut<'_, Vec<T>> {
        self.0.borrow_mut()
    }

    /// Number of elements in the array
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// True if the array holds no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace the contents of the array. All handles observe the new contents.
    pub fn replace(&self, vec: Vec<T>) {
        *self.0.borrow_mut() = vec;
    }

    /// True if `a` and `b` are handles to the same array
    pub fn ptr_eq(a: &SharedVec<T>, b: &SharedVec<T>) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl<T: Clone> SharedVec<T> {
    /// Copy the current contents into a new, unshared `Vec`
    pub fn to_vec(&self) -> Vec<T> {
        self.0.borrow().clone()
    }

    /// Copy the current contents into a new, unshared `SharedVec`
    pub fn deep_copy(&self) -> SharedVec<T> {
        SharedVec::new(self.to_vec())
    }

    /// Reorder the array in place so that position `i` holds the element previously at
    /// `perm[i]`. `perm` must be a permutation of `0..len`.
    pub(crate) fn permute(&self, perm: &[usize]) {
        let permuted = {
            let v = self.0.borrow();
            perm.iter().map(|&p| v[p].clone()).collect::<Vec<T>>()
        };
        self.replace(permuted);
    }
}

impl<T> Clone for SharedVec<T> {
    fn clone(&self) -> Self {
        SharedVec(Rc::clone(&self.0))
    }
}

impl<T> From<Vec<T>> for SharedVec<T> {
    fn from(vec: Vec<T>) -> Self {
        SharedVec::new(vec)
    }
}

impl<T> Default for SharedVec<T> {
    fn default() -> Self {
        SharedVec::new(Vec::new())
    }
}

impl<T: fmt::Debug> fmt::Debug for SharedVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.borrow().iter()).finish()
    }
}
