//! Fixed-shape n-dimensional arrays with lazy elementwise expressions and
//! forward-mode differentiation.
//!
//! This crate re-exports the fixnd workspace and adds the free-function form
//! of the math catalog:
//!
//! - [`Array`]: owned storage whose shape is a type (`Array<f64, Ix2<2, 3>>`)
//! - [`ArrayView`] / [`ArrayViewMut`]: strided windows for slicing and
//!   in-place updates
//! - [`LazyArray`]: deferred elementwise expressions, materialized once
//! - [`Dual`]: value plus derivative, propagated by the chain rule
//!
//! # Example
//!
//! ```rust
//! use fixnd::{Array, Dual, Ix1};
//!
//! let a: Array<f64, Ix1<2>> = Array::from([1.0, 2.0]);
//! let b = Array::from([3.0, 4.0]);
//! assert_eq!((&a + &b).as_slice(), &[4.0, 6.0]);
//!
//! // Same function names on scalars, duals, arrays and lazy arrays.
//! assert_eq!(fixnd::sin(Dual::new(0.0, 1.0)), Dual::new(0.0, 1.0));
//! let s = fixnd::sqrt(&b);
//! let lazy: Array<f64, Ix1<2>> = fixnd::hypot(a.lazy(), b.lazy()).to_array();
//! assert_eq!(s[[1]], 2.0);
//! assert_eq!(lazy[[0]], 10.0f64.sqrt());
//! ```
//!
//! # Features
//!
//! - `parallel`: split large materializations across rayon workers.

mod math;

pub use math::*;

pub use fixnd_array::{
    Array, ArrayError, ArrayView, ArrayViewMut, Constant, Dot, Expr, FromFn, LazyArray, Map,
    MatMul, Permuted, Result, Slice, WorkerSend, WorkerSync, Zip, Zip3,
};
pub use fixnd_dual::{Dual, Elementary, Rule};
pub use fixnd_traits::{
    indices, op, row_major_strides, BinaryOp, ComplexParts, Func, Indices, Ix1, Ix2, Ix3, Ix4,
    MultiIndex, Real, RealFloat, Scalar, Shape, TernaryOp, UnaryOp,
};
pub use num_complex::Complex;
