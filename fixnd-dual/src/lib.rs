//! Forward-mode automatic differentiation.
//!
//! A [`Dual`] carries a value and its derivative. Every function in the
//! [`Real`](fixnd_traits::Real) catalog is implemented for `Dual<T>` through
//! the chain rule, so generic numeric code written against `Real` computes
//! derivatives without modification:
//!
//! ```
//! use fixnd_dual::Dual;
//! use fixnd_traits::Real;
//!
//! let x = Dual::variable(0.0f64);
//! let y = x.sin();
//! assert_eq!((y.real(), y.dual()), (0.0, 1.0));
//! ```
//!
//! `Dual<Dual<f64>>` nests, giving second derivatives.

mod dual;
mod ops;
mod real;
pub mod rule;

pub use dual::Dual;
pub use rule::{Elementary, Rule};
