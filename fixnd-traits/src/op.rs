//! Operator identities.
//!
//! Each operator and catalog function is a zero-sized type implementing
//! [`UnaryOp`], [`BinaryOp`] or [`TernaryOp`]. Array crates write one generic
//! elementwise implementation per arity and instantiate it per identity, so
//! the same `Sin` drives eager arrays, lazy expressions and free functions.

use crate::scalar::{ComplexParts, Real, RealFloat};

/// A function of one element.
pub trait UnaryOp<T> {
    type Output;
    fn apply(&self, x: T) -> Self::Output;
}

/// A function of two elements.
pub trait BinaryOp<A, B> {
    type Output;
    fn apply(&self, a: A, b: B) -> Self::Output;
}

/// A function of three elements.
pub trait TernaryOp<A, B, C> {
    type Output;
    fn apply(&self, a: A, b: B, c: C) -> Self::Output;
}

/// Adapter turning a closure into an operator identity.
#[derive(Clone, Copy, Debug, Default)]
pub struct Func<F>(pub F);

impl<T, R, F> UnaryOp<T> for Func<F>
where
    F: Fn(T) -> R,
{
    type Output = R;
    #[inline(always)]
    fn apply(&self, x: T) -> R {
        (self.0)(x)
    }
}

impl<A, B, R, F> BinaryOp<A, B> for Func<F>
where
    F: Fn(A, B) -> R,
{
    type Output = R;
    #[inline(always)]
    fn apply(&self, a: A, b: B) -> R {
        (self.0)(a, b)
    }
}

impl<A, B, C, R, F> TernaryOp<A, B, C> for Func<F>
where
    F: Fn(A, B, C) -> R,
{
    type Output = R;
    #[inline(always)]
    fn apply(&self, a: A, b: B, c: C) -> R {
        (self.0)(a, b, c)
    }
}

macro_rules! identity {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {$(
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        pub struct $name;
    )*};
}

// ---- arithmetic ----

identity!(
    /// Unary plus (identity).
    Pos,
    Neg,
    /// Bitwise not for integers, logical not for `bool`.
    Not,
);

impl<T> UnaryOp<T> for Pos {
    type Output = T;
    #[inline(always)]
    fn apply(&self, x: T) -> T {
        x
    }
}

impl<T: std::ops::Neg> UnaryOp<T> for Neg {
    type Output = T::Output;
    #[inline(always)]
    fn apply(&self, x: T) -> T::Output {
        -x
    }
}

impl<T: std::ops::Not> UnaryOp<T> for Not {
    type Output = T::Output;
    #[inline(always)]
    fn apply(&self, x: T) -> T::Output {
        !x
    }
}

macro_rules! arithmetic {
    ($($name:ident: $tr:ident::$method:ident),* $(,)?) => {$(
        identity!($name);

        impl<A: std::ops::$tr<B>, B> BinaryOp<A, B> for $name {
            type Output = A::Output;
            #[inline(always)]
            fn apply(&self, a: A, b: B) -> A::Output {
                std::ops::$tr::$method(a, b)
            }
        }
    )*};
}

arithmetic!(
    Add: Add::add,
    Sub: Sub::sub,
    Mul: Mul::mul,
    Div: Div::div,
    Rem: Rem::rem,
    BitAnd: BitAnd::bitand,
    BitOr: BitOr::bitor,
    BitXor: BitXor::bitxor,
    Shl: Shl::shl,
    Shr: Shr::shr,
);

macro_rules! comparison {
    ($($name:ident: $tr:ident::$method:ident),* $(,)?) => {$(
        identity!($name);

        impl<A: $tr<B>, B> BinaryOp<A, B> for $name {
            type Output = bool;
            #[inline(always)]
            fn apply(&self, a: A, b: B) -> bool {
                a.$method(&b)
            }
        }
    )*};
}

comparison!(
    Eq: PartialEq::eq,
    Ne: PartialEq::ne,
    Lt: PartialOrd::lt,
    Gt: PartialOrd::gt,
    Le: PartialOrd::le,
    Ge: PartialOrd::ge,
);

identity!(And, Or);

impl BinaryOp<bool, bool> for And {
    type Output = bool;
    #[inline(always)]
    fn apply(&self, a: bool, b: bool) -> bool {
        a && b
    }
}

impl BinaryOp<bool, bool> for Or {
    type Output = bool;
    #[inline(always)]
    fn apply(&self, a: bool, b: bool) -> bool {
        a || b
    }
}

// ---- math catalog ----

macro_rules! unary_fn {
    ($bound:ident; $($name:ident => $method:ident -> $out:ty),* $(,)?) => {$(
        identity!($name);

        impl<T: $bound> UnaryOp<T> for $name {
            type Output = $out;
            #[inline(always)]
            fn apply(&self, x: T) -> $out {
                $bound::$method(x)
            }
        }
    )*};
}

unary_fn!(Real;
    Abs => abs -> T,
    Fabs => fabs -> T,
    Floor => floor -> T,
    Ceil => ceil -> T,
    Trunc => trunc -> T,
    Round => round -> T,
    Sqrt => sqrt -> T,
    Cbrt => cbrt -> T,
    Exp => exp -> T,
    Exp2 => exp2 -> T,
    Expm1 => expm1 -> T,
    Log => log -> T,
    Log2 => log2 -> T,
    Log10 => log10 -> T,
    Log1p => log1p -> T,
    Erf => erf -> T,
    Erfc => erfc -> T,
    Sin => sin -> T,
    Cos => cos -> T,
    Tan => tan -> T,
    Asin => asin -> T,
    Acos => acos -> T,
    Atan => atan -> T,
    Sinh => sinh -> T,
    Cosh => cosh -> T,
    Tanh => tanh -> T,
    Asinh => asinh -> T,
    Acosh => acosh -> T,
    Atanh => atanh -> T,
    Csc => csc -> T,
    Sec => sec -> T,
    Cot => cot -> T,
    Csch => csch -> T,
    Sech => sech -> T,
    Coth => coth -> T,
    Acsc => acsc -> T,
    Asec => asec -> T,
    Acot => acot -> T,
    Acsch => acsch -> T,
    Asech => asech -> T,
    Acoth => acoth -> T,
    Isnan => isnan -> bool,
    Isinf => isinf -> bool,
    Isfinite => isfinite -> bool,
    Isnormal => isnormal -> bool,
    Signbit => signbit -> bool,
);

unary_fn!(RealFloat;
    Rint => rint -> T,
    Nearbyint => nearbyint -> T,
    Logb => logb -> T,
    Lgamma => lgamma -> T,
    Tgamma => tgamma -> T,
    Lrint => lrint -> i64,
    Lround => lround -> i64,
    Ilogb => ilogb -> i32,
    Frexp => frexp -> (T, i32),
    Modf => modf -> (T, T),
);

unary_fn!(ComplexParts;
    Re => real -> T::Real,
    Im => imag -> T::Real,
    Conj => conj -> T,
    Arg => arg -> T::Real,
    Norm => norm -> T::Real,
);

macro_rules! binary_fn {
    ($bound:ident; $($name:ident => $method:ident($rhs:ty) -> $out:ty),* $(,)?) => {$(
        identity!($name);

        impl<T: $bound> BinaryOp<T, $rhs> for $name {
            type Output = $out;
            #[inline(always)]
            fn apply(&self, a: T, b: $rhs) -> $out {
                $bound::$method(a, b)
            }
        }
    )*};
}

binary_fn!(Real;
    Pow => pow(T) -> T,
    Hypot => hypot(T) -> T,
    Atan2 => atan2(T) -> T,
    Copysign => copysign(T) -> T,
    Fmin => fmin(T) -> T,
    Fmax => fmax(T) -> T,
    Fdim => fdim(T) -> T,
    Nthpow => nthpow(i32) -> T,
);

binary_fn!(RealFloat;
    Fmod => fmod(T) -> T,
    Remainder => remainder(T) -> T,
    Nextafter => nextafter(T) -> T,
    Remquo => remquo(T) -> (T, i32),
    Ldexp => ldexp(i32) -> T,
    Scalbn => scalbn(i32) -> T,
);

identity!(Fma, Clamp);

impl<T: RealFloat> TernaryOp<T, T, T> for Fma {
    type Output = T;
    #[inline(always)]
    fn apply(&self, x: T, y: T, z: T) -> T {
        x.fma(y, z)
    }
}

impl<T: Real> TernaryOp<T, T, T> for Clamp {
    type Output = T;
    #[inline(always)]
    fn apply(&self, x: T, lo: T, hi: T) -> T {
        Real::clamp(x, lo, hi)
    }
}
