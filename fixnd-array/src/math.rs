//! The scalar math catalog lifted over arrays and lazy arrays.
//!
//! On [`Array`] each function is eager and returns a new array whose element
//! type is the scalar function's result (`bool` for classification, `i32`
//! for `ilogb`, ...). On [`LazyArray`] the same names compose a new
//! expression node instead.
//!
//! Functions with a side output (`frexp`, `modf`, `remquo`) return a pair of
//! arrays on `Array` and a lazy array of pairs on `LazyArray`.

use fixnd_traits::op::{self, BinaryOp, TernaryOp, UnaryOp};
use fixnd_traits::{Real, RealFloat, Shape};

use crate::array::Array;
use crate::lazy::{Constant, Expr, LazyArray, Map, Zip, Zip3};

macro_rules! lift_unary {
    ($($name:ident => $op:ident),* $(,)?) => {
        impl<T: Clone, S: Shape> Array<T, S> {
            $(
                #[inline]
                pub fn $name(&self) -> Array<<op::$op as UnaryOp<T>>::Output, S>
                where
                    op::$op: UnaryOp<T>,
                {
                    self.apply(op::$op)
                }
            )*
        }

        impl<E: Expr<R>, const R: usize> LazyArray<E, R> {
            $(
                #[inline]
                pub fn $name(self) -> LazyArray<Map<E, op::$op>, R>
                where
                    op::$op: UnaryOp<E::Item>,
                {
                    self.apply(op::$op)
                }
            )*
        }
    };
}

lift_unary!(
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

macro_rules! lift_binary {
    ($($name:ident => $op:ident),* $(,)?) => {
        impl<T: Clone, S: Shape> Array<T, S> {
            $(
                #[inline]
                pub fn $name<U: Clone>(
                    &self,
                    y: &Array<U, S>,
                ) -> Array<<op::$op as BinaryOp<T, U>>::Output, S>
                where
                    op::$op: BinaryOp<T, U>,
                {
                    self.zip_apply(y, op::$op)
                }
            )*
        }

        impl<E: Expr<R>, const R: usize> LazyArray<E, R> {
            $(
                /// # Panics
                /// Panics if the sizes differ.
                #[track_caller]
                pub fn $name<B: Expr<R>>(self, y: LazyArray<B, R>) -> LazyArray<Zip<E, B, op::$op>, R>
                where
                    op::$op: BinaryOp<E::Item, B::Item>,
                {
                    self.zip_apply(y, op::$op)
                }
            )*
        }
    };
}

lift_binary!(
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
);

// Integer second operand, shared by every element.
macro_rules! lift_with_int {
    ($($name:ident => $op:ident),* $(,)?) => {
        impl<T: Clone, S: Shape> Array<T, S> {
            $(
                #[inline]
                pub fn $name(&self, n: i32) -> Array<<op::$op as BinaryOp<T, i32>>::Output, S>
                where
                    op::$op: BinaryOp<T, i32>,
                {
                    self.map(|x| op::$op.apply(x.clone(), n))
                }
            )*
        }

        impl<E: Expr<R>, const R: usize> LazyArray<E, R> {
            $(
                #[inline]
                pub fn $name(self, n: i32) -> LazyArray<Zip<E, Constant<i32>, op::$op>, R>
                where
                    op::$op: BinaryOp<E::Item, i32>,
                {
                    self.zip_unchecked(Constant(n), op::$op)
                }
            )*
        }
    };
}

lift_with_int!(
    nthpow => Nthpow,
    ldexp => Ldexp,
    scalbn => Scalbn,
);

impl<T: RealFloat, S: Shape> Array<T, S> {
    /// Mantissa in `[0.5, 1)` and binary exponent of every element.
    pub fn frexp(&self) -> (Array<T, S>, Array<i32, S>) {
        self.apply(op::Frexp).unzip()
    }

    /// Fractional and integral parts of every element.
    pub fn modf(&self) -> (Array<T, S>, Array<T, S>) {
        self.apply(op::Modf).unzip()
    }

    /// IEEE remainder and low bits of the quotient.
    pub fn remquo(&self, y: &Array<T, S>) -> (Array<T, S>, Array<i32, S>) {
        self.zip_apply(y, op::Remquo).unzip()
    }

    /// `self * y + z` with a single rounding.
    pub fn fma(&self, y: &Array<T, S>, z: &Array<T, S>) -> Array<T, S> {
        self.zip3_apply(y, z, op::Fma)
    }
}

impl<T: Real, S: Shape> Array<T, S> {
    /// Clamp every element into `[lo, hi]`.
    pub fn clamp(&self, lo: T, hi: T) -> Array<T, S> {
        self.map(|&x| op::Clamp.apply(x, lo, hi))
    }
}

impl<E: Expr<R>, const R: usize> LazyArray<E, R> {
    /// Lazy array of `(mantissa, exponent)` pairs.
    pub fn frexp(self) -> LazyArray<Map<E, op::Frexp>, R>
    where
        E::Item: RealFloat,
    {
        self.apply(op::Frexp)
    }

    /// Lazy array of `(fractional, integral)` pairs.
    pub fn modf(self) -> LazyArray<Map<E, op::Modf>, R>
    where
        E::Item: RealFloat,
    {
        self.apply(op::Modf)
    }

    #[track_caller]
    pub fn remquo<B>(self, y: LazyArray<B, R>) -> LazyArray<Zip<E, B, op::Remquo>, R>
    where
        B: Expr<R, Item = E::Item>,
        E::Item: RealFloat,
    {
        self.zip_apply(y, op::Remquo)
    }

    #[track_caller]
    pub fn fma<B, C>(self, y: LazyArray<B, R>, z: LazyArray<C, R>) -> LazyArray<Zip3<E, B, C, op::Fma>, R>
    where
        B: Expr<R>,
        C: Expr<R>,
        op::Fma: TernaryOp<E::Item, B::Item, C::Item>,
    {
        self.zip3_apply(y, z, op::Fma)
    }

    pub fn clamp(
        self,
        lo: E::Item,
        hi: E::Item,
    ) -> LazyArray<Zip3<E, Constant<E::Item>, Constant<E::Item>, op::Clamp>, R>
    where
        E::Item: Real,
    {
        let sizes = self.sizes();
        self.zip3_apply(
            LazyArray::constant(sizes, lo),
            LazyArray::constant(sizes, hi),
            op::Clamp,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use fixnd_traits::{Ix1, Ix2};
    use num_complex::Complex;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random(seed: u64, lo: f64, hi: f64) -> Array<f64, Ix2<3, 3>> {
        let mut rng = StdRng::seed_from_u64(seed);
        Array::from_fn(|_| rng.gen_range(lo..hi))
    }

    #[test]
    fn test_unary_lifting_matches_scalar() {
        let a = random(1, 0.1, 0.9);
        let cases: [(Array<f64, Ix2<3, 3>>, fn(f64) -> f64); 8] = [
            (a.sin(), f64::sin),
            (a.exp(), f64::exp),
            (a.sqrt(), f64::sqrt),
            (a.atanh(), f64::atanh),
            (a.log1p(), f64::ln_1p),
            (a.cbrt(), f64::cbrt),
            (a.floor(), f64::floor),
            (a.tanh(), f64::tanh),
        ];
        for (out, f) in cases {
            for (&y, &x) in out.iter().zip(a.iter()) {
                assert_relative_eq!(y, f(x), max_relative = 1e-15);
            }
        }
    }

    #[test]
    fn test_reciprocal_trig_identities() {
        let a = random(2, 0.2, 1.2);
        for (s, c) in a.csc().iter().zip(a.sin().iter()) {
            assert_relative_eq!(s * c, 1.0, epsilon = 1e-14);
        }
        for (s, c) in a.sech().iter().zip(a.cosh().iter()) {
            assert_relative_eq!(s * c, 1.0, epsilon = 1e-14);
        }
        let back = a.cot().acot();
        for (&x, &y) in back.iter().zip(a.iter()) {
            assert_relative_eq!(x, y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_classification_and_integer_results() {
        let a = Array::from([1.0f64, f64::NAN, f64::INFINITY, -0.0, 2.5]);
        assert_eq!(a.isnan().as_slice(), &[false, true, false, false, false]);
        assert_eq!(a.isfinite().as_slice(), &[true, false, false, true, true]);
        assert_eq!(a.signbit().as_slice(), &[false, false, false, true, false]);
        let b = Array::from([8.0f64, 0.75, -3.0]);
        assert_eq!(b.ilogb().as_slice(), &[3, -1, 1]);
        assert_eq!(b.lround().as_slice(), &[8, 1, -3]);
    }

    #[test]
    fn test_binary_and_integer_operand() {
        let x = Array::from([3.0f64, 1.0, -2.0]);
        let y = Array::from([4.0f64, 1.0, 0.5]);
        assert_eq!(x.hypot(&y)[[0]], 5.0);
        assert_eq!(x.fmax(&y).as_slice(), &[4.0, 1.0, 0.5]);
        assert_eq!(x.fdim(&y).as_slice(), &[0.0, 0.0, 0.0]);
        assert_eq!(x.nthpow(3).as_slice(), &[27.0, 1.0, -8.0]);
        assert_eq!(x.ldexp(2).as_slice(), &[12.0, 4.0, -8.0]);
        assert_eq!(x.copysign(&-&y).as_slice(), &[-3.0, -1.0, -2.0]);
        assert_eq!(x.clamp(0.0, 2.0).as_slice(), &[2.0, 1.0, 0.0]);
        assert_eq!(x.fma(&y, &x).as_slice(), &[15.0, 2.0, -3.0]);
    }

    #[test]
    fn test_decomposition_pairs() {
        let a = Array::from([8.0f64, -3.5]);
        let (m, e) = a.frexp();
        assert_eq!(m.as_slice(), &[0.5, -0.875]);
        assert_eq!(e.as_slice(), &[4, 2]);
        let (frac, int) = a.modf();
        assert_eq!(frac.as_slice(), &[0.0, -0.5]);
        assert_eq!(int.as_slice(), &[8.0, -3.0]);
        let (r, q) = Array::from([7.0f64]).remquo(&Array::from([2.0]));
        assert_eq!(r[[0]], -1.0);
        assert_eq!(q[[0]] & 0b111, 4);
    }

    #[test]
    fn test_complex_parts() {
        let z = Array::from([Complex::new(3.0f64, 4.0), Complex::new(0.0, -1.0)]);
        assert_eq!(z.real().as_slice(), &[3.0, 0.0]);
        assert_eq!(z.imag().as_slice(), &[4.0, -1.0]);
        assert_eq!(z.norm().as_slice(), &[25.0, 1.0]);
        assert_eq!(z.conj()[[1]], Complex::new(0.0, 1.0));
        let r = Array::from([-2.0f64, 2.0]);
        assert_eq!(r.arg()[[1]], 0.0);
        assert_relative_eq!(r.arg()[[0]], std::f64::consts::PI);
        assert_eq!(r.imag().as_slice(), &[0.0, 0.0]);
    }

    #[test]
    fn test_lazy_math_matches_eager() {
        let a = random(5, -1.0, 1.0);
        let b = random(6, 0.5, 2.0);
        let eager = a.sin().hypot(&b.sqrt()).clamp(0.0, 1.2);
        let lazy: Array<f64, Ix2<3, 3>> = a
            .lazy()
            .sin()
            .hypot(b.lazy().sqrt())
            .clamp(0.0, 1.2)
            .to_array();
        assert_eq!(lazy, eager);
        let (m, e) = a.frexp();
        let pairs = a.lazy().frexp().to_vec();
        assert!(pairs
            .iter()
            .zip(m.iter().zip(e.iter()))
            .all(|(&(pm, pe), (&em, &ee))| pm == em && pe == ee));
        let fused: Array<f64, Ix2<3, 3>> = a.lazy().fma(b.lazy(), a.lazy()).to_array();
        assert_eq!(fused, a.fma(&b, &a));
    }

    #[test]
    fn test_lazy_integer_operand_and_classification() {
        let x = LazyArray::from_fn([4], |[i]| i as f32 - 1.0);
        let p: Array<f32, Ix1<4>> = x.nthpow(2).to_array();
        assert_eq!(p.as_slice(), &[1.0, 0.0, 1.0, 4.0]);
        let s: Array<bool, Ix1<4>> = x.signbit().to_array();
        assert_eq!(s.as_slice(), &[true, false, false, false]);
    }
}
