//! Free-function form of the scalar math catalog.
//!
//! `fixnd::sin(x)` works for `f32`, `f64`, [`Dual`], [`Complex`] (complex
//! parts only), `&Array` (eager, returns an [`Array`]), and [`ArrayView`] or
//! [`LazyArray`] (lazy, returns a [`LazyArray`]). Dispatch goes through the
//! [`Lift`] family: each function is one operator identity from
//! [`fixnd_traits::op`] handed to `x.lift(..)`.

use fixnd_array::{Array, ArrayView, Constant, Expr, LazyArray, Map, Zip, Zip3};
use fixnd_dual::Dual;
use fixnd_traits::op::{self, BinaryOp, TernaryOp, UnaryOp};
use fixnd_traits::{Real, Shape};
use num_complex::Complex;

/// Apply a unary operator identity to a scalar or position-wise to an array.
pub trait Lift<O> {
    type Output;

    fn lift(self, op: O) -> Self::Output;
}

/// Binary counterpart of [`Lift`]; `Y` is the second operand.
pub trait Lift2<O, Y> {
    type Output;

    fn lift2(self, y: Y, op: O) -> Self::Output;
}

/// Ternary counterpart of [`Lift`].
pub trait Lift3<O, Y, Z> {
    type Output;

    fn lift3(self, y: Y, z: Z, op: O) -> Self::Output;
}

/// Clamp with scalar bounds shared by every element.
pub trait LiftClamp {
    type Bound;
    type Output;

    fn lift_clamp(self, lo: Self::Bound, hi: Self::Bound) -> Self::Output;
}

/// Split the result of a pair-valued function.
///
/// Scalars already give a tuple; an array of pairs becomes a pair of arrays;
/// a lazy array of pairs stays lazy.
pub trait Unzip {
    type Output;

    fn unzip(self) -> Self::Output;
}

macro_rules! lift_scalar {
    ($([$($gen:ident),*] $t:ty),*) => {$(
        impl<$($gen,)* O: UnaryOp<$t>> Lift<O> for $t {
            type Output = O::Output;

            #[inline]
            fn lift(self, op: O) -> O::Output {
                op.apply(self)
            }
        }

        impl<$($gen,)* O: BinaryOp<$t, Y>, Y> Lift2<O, Y> for $t {
            type Output = O::Output;

            #[inline]
            fn lift2(self, y: Y, op: O) -> O::Output {
                op.apply(self, y)
            }
        }

        impl<$($gen,)* O: TernaryOp<$t, Y, Z>, Y, Z> Lift3<O, Y, Z> for $t {
            type Output = O::Output;

            #[inline]
            fn lift3(self, y: Y, z: Z, op: O) -> O::Output {
                op.apply(self, y, z)
            }
        }
    )*};
}

lift_scalar!([] f32, [] f64, [T] Dual<T>, [T] Complex<T>);

macro_rules! clamp_scalar {
    ($([$($gen:ident),*] $t:ty),*) => {$(
        impl<$($gen: Real)*> LiftClamp for $t {
            type Bound = $t;
            type Output = $t;

            #[inline]
            fn lift_clamp(self, lo: $t, hi: $t) -> $t {
                op::Clamp.apply(self, lo, hi)
            }
        }
    )*};
}

clamp_scalar!([] f32, [] f64, [T] Dual<T>);

impl<'a, T: Clone, S: Shape, O: UnaryOp<T>> Lift<O> for &'a Array<T, S> {
    type Output = Array<O::Output, S>;

    fn lift(self, op: O) -> Self::Output {
        self.apply(op)
    }
}

impl<'a, 'b, T, U, S, O> Lift2<O, &'b Array<U, S>> for &'a Array<T, S>
where
    T: Clone,
    U: Clone,
    S: Shape,
    O: BinaryOp<T, U>,
{
    type Output = Array<O::Output, S>;

    fn lift2(self, y: &'b Array<U, S>, op: O) -> Self::Output {
        self.zip_apply(y, op)
    }
}

impl<'a, T, S, O> Lift2<O, i32> for &'a Array<T, S>
where
    T: Clone,
    S: Shape,
    O: BinaryOp<T, i32>,
{
    type Output = Array<O::Output, S>;

    fn lift2(self, n: i32, op: O) -> Self::Output {
        self.map(|x| op.apply(x.clone(), n))
    }
}

impl<'a, 'b, 'c, T, U, V, S, O> Lift3<O, &'b Array<U, S>, &'c Array<V, S>> for &'a Array<T, S>
where
    T: Clone,
    U: Clone,
    V: Clone,
    S: Shape,
    O: TernaryOp<T, U, V>,
{
    type Output = Array<O::Output, S>;

    fn lift3(self, y: &'b Array<U, S>, z: &'c Array<V, S>, op: O) -> Self::Output {
        self.zip3_apply(y, z, op)
    }
}

impl<'a, T: Real, S: Shape> LiftClamp for &'a Array<T, S> {
    type Bound = T;
    type Output = Array<T, S>;

    fn lift_clamp(self, lo: T, hi: T) -> Self::Output {
        self.clamp(lo, hi)
    }
}

impl<A, B, S: Shape> Unzip for Array<(A, B), S> {
    type Output = (Array<A, S>, Array<B, S>);

    fn unzip(self) -> Self::Output {
        Array::unzip(self)
    }
}

impl<A, B> Unzip for (A, B) {
    type Output = (A, B);

    fn unzip(self) -> (A, B) {
        self
    }
}

impl<E: Expr<R>, O: UnaryOp<E::Item>, const R: usize> Lift<O> for LazyArray<E, R> {
    type Output = LazyArray<Map<E, O>, R>;

    fn lift(self, op: O) -> Self::Output {
        self.apply(op)
    }
}

impl<E, B, O, const R: usize> Lift2<O, LazyArray<B, R>> for LazyArray<E, R>
where
    E: Expr<R>,
    B: Expr<R>,
    O: BinaryOp<E::Item, B::Item>,
{
    type Output = LazyArray<Zip<E, B, O>, R>;

    #[track_caller]
    fn lift2(self, y: LazyArray<B, R>, op: O) -> Self::Output {
        self.zip_apply(y, op)
    }
}

impl<E, O, const R: usize> Lift2<O, i32> for LazyArray<E, R>
where
    E: Expr<R>,
    O: BinaryOp<E::Item, i32>,
{
    type Output = LazyArray<Zip<E, Constant<i32>, O>, R>;

    fn lift2(self, n: i32, op: O) -> Self::Output {
        let sizes = self.sizes();
        self.zip_apply(LazyArray::constant(sizes, n), op)
    }
}

impl<E, B, C, O, const R: usize> Lift3<O, LazyArray<B, R>, LazyArray<C, R>> for LazyArray<E, R>
where
    E: Expr<R>,
    B: Expr<R>,
    C: Expr<R>,
    O: TernaryOp<E::Item, B::Item, C::Item>,
{
    type Output = LazyArray<Zip3<E, B, C, O>, R>;

    #[track_caller]
    fn lift3(self, y: LazyArray<B, R>, z: LazyArray<C, R>, op: O) -> Self::Output {
        self.zip3_apply(y, z, op)
    }
}

impl<E, const R: usize> LiftClamp for LazyArray<E, R>
where
    E: Expr<R>,
    E::Item: Real,
{
    type Bound = E::Item;
    type Output = LazyArray<Zip3<E, Constant<E::Item>, Constant<E::Item>, op::Clamp>, R>;

    fn lift_clamp(self, lo: E::Item, hi: E::Item) -> Self::Output {
        self.clamp(lo, hi)
    }
}

impl<E: Expr<R>, const R: usize> Unzip for LazyArray<E, R> {
    type Output = Self;

    fn unzip(self) -> Self {
        self
    }
}

impl<'a, T: Clone, O: UnaryOp<T>, const R: usize> Lift<O> for ArrayView<'a, T, R> {
    type Output = LazyArray<Map<ArrayView<'a, T, R>, O>, R>;

    fn lift(self, op: O) -> Self::Output {
        self.lazy().apply(op)
    }
}

impl<'a, 'b, T, U, O, const R: usize> Lift2<O, ArrayView<'b, U, R>> for ArrayView<'a, T, R>
where
    T: Clone,
    U: Clone,
    O: BinaryOp<T, U>,
{
    type Output = LazyArray<Zip<ArrayView<'a, T, R>, ArrayView<'b, U, R>, O>, R>;

    #[track_caller]
    fn lift2(self, y: ArrayView<'b, U, R>, op: O) -> Self::Output {
        self.lazy().zip_apply(y.lazy(), op)
    }
}

impl<'a, T, O, const R: usize> Lift2<O, i32> for ArrayView<'a, T, R>
where
    T: Clone,
    O: BinaryOp<T, i32>,
{
    type Output = LazyArray<Zip<ArrayView<'a, T, R>, Constant<i32>, O>, R>;

    fn lift2(self, n: i32, op: O) -> Self::Output {
        self.lazy().lift2(n, op)
    }
}

impl<'a, T: Real, const R: usize> LiftClamp for ArrayView<'a, T, R> {
    type Bound = T;
    type Output =
        LazyArray<Zip3<ArrayView<'a, T, R>, Constant<T>, Constant<T>, op::Clamp>, R>;

    fn lift_clamp(self, lo: T, hi: T) -> Self::Output {
        self.lazy().clamp(lo, hi)
    }
}

macro_rules! unary_functions {
    ($($name:ident => $op:ident),* $(,)?) => {$(
        #[inline]
        pub fn $name<X: Lift<op::$op>>(x: X) -> X::Output {
            x.lift(op::$op)
        }
    )*};
}

unary_functions!(
    abs => Abs,
    fabs => Fabs,
    floor => Floor,
    ceil => Ceil,
    trunc => Trunc,
    round => Round,
    rint => Rint,
    nearbyint => Nearbyint,
    lrint => Lrint,
    lround => Lround,
    sqrt => Sqrt,
    cbrt => Cbrt,
    exp => Exp,
    exp2 => Exp2,
    expm1 => Expm1,
    log => Log,
    log2 => Log2,
    log10 => Log10,
    log1p => Log1p,
    logb => Logb,
    ilogb => Ilogb,
    erf => Erf,
    erfc => Erfc,
    lgamma => Lgamma,
    tgamma => Tgamma,
    sin => Sin,
    cos => Cos,
    tan => Tan,
    asin => Asin,
    acos => Acos,
    atan => Atan,
    sinh => Sinh,
    cosh => Cosh,
    tanh => Tanh,
    asinh => Asinh,
    acosh => Acosh,
    atanh => Atanh,
    csc => Csc,
    sec => Sec,
    cot => Cot,
    csch => Csch,
    sech => Sech,
    coth => Coth,
    acsc => Acsc,
    asec => Asec,
    acot => Acot,
    acsch => Acsch,
    asech => Asech,
    acoth => Acoth,
    isnan => Isnan,
    isinf => Isinf,
    isfinite => Isfinite,
    isnormal => Isnormal,
    signbit => Signbit,
    real => Re,
    imag => Im,
    conj => Conj,
    arg => Arg,
    norm => Norm,
);

macro_rules! binary_functions {
    ($($name:ident => $op:ident),* $(,)?) => {$(
        #[inline]
        #[track_caller]
        pub fn $name<X: Lift2<op::$op, Y>, Y>(x: X, y: Y) -> X::Output {
            x.lift2(y, op::$op)
        }
    )*};
}

binary_functions!(
    pow => Pow,
    hypot => Hypot,
    atan2 => Atan2,
    copysign => Copysign,
    fmin => Fmin,
    fmax => Fmax,
    fdim => Fdim,
    fmod => Fmod,
    remainder => Remainder,
    nextafter => Nextafter,
    nthpow => Nthpow,
    ldexp => Ldexp,
    scalbn => Scalbn,
);

/// `x * y + z` with a single rounding.
#[inline]
#[track_caller]
pub fn fma<X: Lift3<op::Fma, Y, Z>, Y, Z>(x: X, y: Y, z: Z) -> X::Output {
    x.lift3(y, z, op::Fma)
}

#[inline]
pub fn clamp<X: LiftClamp>(x: X, lo: X::Bound, hi: X::Bound) -> X::Output {
    x.lift_clamp(lo, hi)
}

/// Mantissa in `[0.5, 1)` and binary exponent.
pub fn frexp<X>(x: X) -> <X::Output as Unzip>::Output
where
    X: Lift<op::Frexp>,
    X::Output: Unzip,
{
    x.lift(op::Frexp).unzip()
}

/// Fractional and integral parts.
pub fn modf<X>(x: X) -> <X::Output as Unzip>::Output
where
    X: Lift<op::Modf>,
    X::Output: Unzip,
{
    x.lift(op::Modf).unzip()
}

/// IEEE remainder and the low bits of the rounded quotient.
#[track_caller]
pub fn remquo<X, Y>(x: X, y: Y) -> <X::Output as Unzip>::Output
where
    X: Lift2<op::Remquo, Y>,
    X::Output: Unzip,
{
    x.lift2(y, op::Remquo).unzip()
}
