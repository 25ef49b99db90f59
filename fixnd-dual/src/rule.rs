//! Chain-rule table for the elementary functions.
//!
//! Each entry states how the derivative of `f(x)` is formed from the real
//! part `x` and the incoming derivative `dx`: either `g(x)·dx`
//! ([`Rule::Numer`]) or `dx / g(x)` ([`Rule::Denom`]).

use fixnd_traits::Real;
use std::f64::consts::{FRAC_2_SQRT_PI, LN_10, LN_2};

/// How a derivative is assembled from `g(x)` and `dx`.
pub enum Rule<T> {
    /// `g(x) * dx`
    Numer(fn(T) -> T),
    /// `dx / g(x)`
    Denom(fn(T) -> T),
}

impl<T> Clone for Rule<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Rule<T> {}

impl<T: Real> Rule<T> {
    /// Derivative of `f` at `x` given the incoming derivative `dx`.
    #[inline]
    pub fn derivative(self, x: T, dx: T) -> T {
        match self {
            Rule::Numer(g) => g(x) * dx,
            Rule::Denom(g) => dx / g(x),
        }
    }
}

#[inline(always)]
fn sq<T: Real>(x: T) -> T {
    x * x
}

macro_rules! elementary {
    ($($variant:ident => $f:ident, $kind:ident |$x:ident| $g:expr;)*) => {
        /// Elementary functions with a tabulated derivative.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum Elementary {
            $($variant),*
        }

        impl Elementary {
            /// Every table entry, in table order.
            pub const ALL: &'static [Elementary] = &[$(Elementary::$variant),*];

            /// C math library name of the function.
            pub fn name(self) -> &'static str {
                match self {
                    $(Elementary::$variant => stringify!($f)),*
                }
            }

            /// Evaluate the function itself.
            #[inline]
            pub fn eval<T: Real>(self, x: T) -> T {
                match self {
                    $(Elementary::$variant => Real::$f(x)),*
                }
            }

            /// Chain-rule entry for the function.
            #[inline]
            pub fn rule<T: Real>(self) -> Rule<T> {
                match self {
                    $(Elementary::$variant => Rule::$kind(|$x: T| $g)),*
                }
            }
        }
    };
}

elementary! {
    Exp => exp, Numer |x| x.exp();
    Log => log, Denom |x| x;
    Exp2 => exp2, Numer |x| T::from_f64(LN_2) * x.exp2();
    Log2 => log2, Denom |x| T::from_f64(LN_2) * x;
    Log10 => log10, Denom |x| T::from_f64(LN_10) * x;
    Expm1 => expm1, Numer |x| x.exp();
    Log1p => log1p, Denom |x| T::one() + x;
    Sqrt => sqrt, Denom |x| T::from_f64(2.0) * x.sqrt();
    Cbrt => cbrt, Denom |x| T::from_f64(3.0) * sq(x.cbrt());
    Erf => erf, Numer |x| T::from_f64(FRAC_2_SQRT_PI) * (-sq(x)).exp();
    Erfc => erfc, Numer |x| -T::from_f64(FRAC_2_SQRT_PI) * (-sq(x)).exp();
    Sin => sin, Numer |x| x.cos();
    Cos => cos, Numer |x| -x.sin();
    Tan => tan, Denom |x| sq(x.cos());
    Asin => asin, Denom |x| (T::one() - sq(x)).sqrt();
    Acos => acos, Denom |x| -(T::one() - sq(x)).sqrt();
    Atan => atan, Denom |x| T::one() + sq(x);
    Sinh => sinh, Numer |x| x.cosh();
    Cosh => cosh, Numer |x| x.sinh();
    Tanh => tanh, Denom |x| sq(x.cosh());
    Asinh => asinh, Denom |x| (sq(x) + T::one()).sqrt();
    Acosh => acosh, Denom |x| (sq(x) - T::one()).sqrt();
    Atanh => atanh, Denom |x| T::one() - sq(x);
}
