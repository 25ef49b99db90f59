use fixnd_traits::{Real, Scalar};
use num_traits::{One, Zero};
use std::fmt;

use crate::rule::Elementary;

/// A dual number `real + dual·ε` with `ε² = 0`.
///
/// Equality compares both parts. Ordering is lexicographic (real part
/// first), so sorting by value behaves as expected.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Hash)]
pub struct Dual<T> {
    pub(crate) real: T,
    pub(crate) dual: T,
}

impl<T> Dual<T> {
    /// Dual number from a value and its derivative.
    #[inline]
    pub const fn new(real: T, dual: T) -> Self {
        Dual { real, dual }
    }

    /// Destructure into `(real, dual)`.
    #[inline]
    pub fn into_parts(self) -> (T, T) {
        (self.real, self.dual)
    }
}

impl<T: Copy> Dual<T> {
    /// The value part.
    #[inline]
    pub fn real(&self) -> T {
        self.real
    }

    /// The derivative part.
    #[inline]
    pub fn dual(&self) -> T {
        self.dual
    }

    /// Complex conjugate. Dual numbers over reals are their own conjugate.
    #[inline]
    pub fn conj(self) -> Self {
        self
    }
}

impl<T: Real> Dual<T> {
    /// Independent variable: derivative seeded with one.
    #[inline]
    pub fn variable(x: T) -> Self {
        Dual::new(x, T::one())
    }

    /// Constant: derivative zero.
    #[inline]
    pub fn constant(x: T) -> Self {
        Dual::new(x, T::zero())
    }

    /// Dual conjugate `real - dual·ε`.
    #[inline]
    pub fn dual_conj(self) -> Self {
        Dual::new(self.real, -self.dual)
    }

    /// Evaluate an elementary function through its chain-rule entry.
    #[inline]
    pub fn apply(self, f: Elementary) -> Self {
        Dual::new(
            f.eval(self.real),
            f.rule::<T>().derivative(self.real, self.dual),
        )
    }
}

impl<T> From<T> for Dual<T>
where
    T: Real,
{
    #[inline]
    fn from(x: T) -> Self {
        Dual::constant(x)
    }
}

impl<T: Real> Zero for Dual<T> {
    #[inline]
    fn zero() -> Self {
        Dual::new(T::zero(), T::zero())
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.real.is_zero() && self.dual.is_zero()
    }
}

impl<T: Real> One for Dual<T> {
    #[inline]
    fn one() -> Self {
        Dual::constant(T::one())
    }
}

impl<T: Copy + 'static> Scalar for Dual<T> {}

impl<T: fmt::Display> fmt::Display for Dual<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        fmt::Display::fmt(&self.real, f)?;
        write!(f, ", ")?;
        fmt::Display::fmt(&self.dual, f)?;
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let x = Dual::variable(3.0f64);
        assert_eq!((x.real(), x.dual()), (3.0, 1.0));
        let c = Dual::constant(3.0f32);
        assert_eq!(c.dual(), 0.0);
        assert_eq!(Dual::from(2.0f64), Dual::new(2.0, 0.0));
        assert_eq!(Dual::new(1, 2).into_parts(), (1, 2));
    }

    #[test]
    fn test_conjugates() {
        let x = Dual::new(0.25f64, -0.5);
        assert_eq!(x.conj(), x);
        assert_eq!(x.dual_conj(), Dual::new(0.25, 0.5));
    }

    #[test]
    fn test_zero_one() {
        assert!(Dual::<f64>::zero().is_zero());
        assert!(!Dual::new(0.0f64, 1.0).is_zero());
        assert_eq!(Dual::<f64>::one(), Dual::new(1.0, 0.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Dual::new(1.5f64, -2.0).to_string(), "(1.5, -2)");
        assert_eq!(format!("{:.1}", Dual::new(1.0f64, 2.0)), "(1.0, 2.0)");
    }

    #[test]
    fn test_lexicographic_order() {
        assert!(Dual::new(1.0, 5.0) < Dual::new(2.0, 0.0));
        assert!(Dual::new(1.0, 0.0) < Dual::new(1.0, 1.0));
    }
}
