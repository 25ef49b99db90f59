//! Shared traits for the fixnd crates.
//!
//! This crate provides the definitions every other fixnd crate builds on:
//!
//! - [`Shape`] and the type-level shapes [`Ix1`] .. [`Ix4`]
//! - [`MultiIndex`] and the row-major [`Indices`] iterator
//! - the scalar math catalog: [`Real`], [`RealFloat`] and [`ComplexParts`]
//! - the [`Scalar`] marker used to tell broadcast scalars from arrays
//! - operator identities in [`op`], consumed through [`UnaryOp`],
//!   [`BinaryOp`] and [`TernaryOp`]
//!
//! External crates can depend on `fixnd-traits` to implement these traits
//! for their own element types without orphan rule violations.

pub mod index;
pub mod op;
pub mod scalar;
pub mod shape;

pub use index::{indices, row_major_strides, Indices, MultiIndex};
pub use op::{BinaryOp, Func, TernaryOp, UnaryOp};
pub use scalar::{ComplexParts, Real, RealFloat, Scalar};
pub use shape::{Ix1, Ix2, Ix3, Ix4, Shape};
