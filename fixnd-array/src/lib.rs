//! Fixed-shape arrays, strided views and lazy elementwise expressions.
//!
//! # Core Types
//!
//! - [`Array`]: owned, contiguous, row-major storage whose shape is part of
//!   the type (`Array<f64, Ix2<2, 3>>`)
//! - [`ArrayView`] / [`ArrayViewMut`]: borrowed strided windows onto a
//!   buffer, with runtime sizes, used for slicing and in-place updates
//! - [`LazyArray`]: a deferred elementwise computation over a multi-index;
//!   composes without allocating and is evaluated once on materialization
//!
//! # Operators
//!
//! Arithmetic, bitwise and shift operators apply position-wise to arrays
//! (eagerly), views and lazy arrays (lazily). Every function of the scalar
//! catalog in [`fixnd_traits::Real`] is lifted as a method:
//!
//! ```rust
//! use fixnd_array::Array;
//! use fixnd_traits::Ix1;
//!
//! let a: Array<f64, Ix1<2>> = Array::from([1.0, 2.0]);
//! let b = Array::from([3.0, 4.0]);
//! assert_eq!((&a + &b).as_slice(), &[4.0, 6.0]);
//!
//! // Deferred: nothing is computed until `to_array`.
//! let c: Array<f64, Ix1<2>> = (a.lazy() * 2.0 + b.lazy()).sqrt().to_array();
//! assert_eq!(c.as_slice(), &[5.0f64.sqrt(), 8.0f64.sqrt()]);
//! ```
//!
//! Operands of a binary operator must have identical shapes. For arrays this
//! is checked by the type system; for views and lazy arrays the operator
//! panics with [`ArrayError::ShapeMismatch`] and the `try_*` methods return
//! it instead.
//!
//! # Features
//!
//! - `parallel`: split large materializations across rayon workers.

pub mod array;
mod fmt;
pub mod lazy;
mod math;
mod ops;
mod ops_lazy;
mod ops_view;
mod reduce;
mod threading;
pub mod view;

pub use array::Array;
pub use lazy::{Constant, Expr, FromFn, LazyArray, Map, MatMul, Permuted, Zip, Zip3};
pub use reduce::Dot;
pub use threading::{WorkerSend, WorkerSync};
pub use view::{ArrayView, ArrayViewMut, Slice};

/// Errors raised by shape checks and fallible constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArrayError {
    /// Nesting depth or number of axes does not match.
    #[error("rank mismatch: {0} vs {1}")]
    RankMismatch(usize, usize),

    /// Operand shapes differ.
    #[error("shape mismatch: {0:?} vs {1:?}")]
    ShapeMismatch(Vec<usize>, Vec<usize>),

    /// Buffer length differs from the number of elements of the shape.
    #[error("length mismatch: expected {expected} elements, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    /// A view would reach outside its buffer.
    #[error("offset overflow while computing view bounds")]
    OffsetOverflow,

    /// Invalid axis index for the given rank.
    #[error("invalid axis {axis} for rank {rank}")]
    InvalidAxis { axis: usize, rank: usize },

    /// Axis order is not a permutation of `0..rank`.
    #[error("invalid permutation {0:?}")]
    InvalidPermutation(Vec<usize>),

    /// Slice bounds fall outside the axis.
    #[error("slice {from}..{to} out of bounds for axis {axis} of size {size}")]
    SliceOutOfBounds {
        axis: usize,
        from: isize,
        to: isize,
        size: usize,
    },

    /// Multi-index outside the shape.
    #[error("index {index:?} out of bounds for shape {sizes:?}")]
    IndexOutOfBounds { index: Vec<usize>, sizes: Vec<usize> },

    /// Malformed textual array.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Result type for fixnd array operations.
pub type Result<T> = std::result::Result<T, ArrayError>;

/// Check that two operands have the same sizes.
pub(crate) fn ensure_same_shape(a: &[usize], b: &[usize]) -> Result<()> {
    if a != b {
        return Err(ArrayError::ShapeMismatch(a.to_vec(), b.to_vec()));
    }
    Ok(())
}

/// Operator form of [`ensure_same_shape`]: a mismatch is a programming error.
#[track_caller]
pub(crate) fn assert_same_shape(a: &[usize], b: &[usize]) {
    if let Err(err) = ensure_same_shape(a, b) {
        panic!("{err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_same_shape() {
        assert!(ensure_same_shape(&[2, 3], &[2, 3]).is_ok());
        assert_eq!(
            ensure_same_shape(&[2, 3], &[3, 2]),
            Err(ArrayError::ShapeMismatch(vec![2, 3], vec![3, 2]))
        );
    }

    #[test]
    #[should_panic(expected = "shape mismatch: [2, 3] vs [3, 2]")]
    fn test_assert_same_shape_panics() {
        assert_same_shape(&[2, 3], &[3, 2]);
    }

    #[test]
    fn test_error_display() {
        let err = ArrayError::LengthMismatch {
            expected: 6,
            got: 5,
        };
        assert_eq!(err.to_string(), "length mismatch: expected 6 elements, got 5");
    }
}
