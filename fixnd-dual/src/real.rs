//! The scalar math catalog on dual numbers.

use fixnd_traits::{Real, RealFloat};
use num_traits::Zero;

use crate::rule::Elementary;
use crate::Dual;

macro_rules! tabulated {
    ($($method:ident => $entry:ident),* $(,)?) => {$(
        #[inline]
        fn $method(self) -> Self {
            self.apply(Elementary::$entry)
        }
    )*};
}

macro_rules! flat {
    ($($method:ident),* $(,)?) => {$(
        #[inline]
        fn $method(self) -> Self {
            Dual::constant(self.real.$method())
        }
    )*};
}

impl<T: Real> Real for Dual<T> {
    #[inline]
    fn from_f64(x: f64) -> Self {
        Dual::constant(T::from_f64(x))
    }

    #[inline]
    fn abs(self) -> Self {
        if self.real.signbit() {
            -self
        } else {
            self
        }
    }

    // piecewise constant: derivative zero almost everywhere
    flat!(floor, ceil, trunc, round);

    tabulated!(
        sqrt => Sqrt,
        cbrt => Cbrt,
        exp => Exp,
        exp2 => Exp2,
        expm1 => Expm1,
        log => Log,
        log2 => Log2,
        log10 => Log10,
        log1p => Log1p,
        erf => Erf,
        erfc => Erfc,
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
    );

    /// `d(x^y) = y·x^(y-1)·dx + x^y·ln(x)·dy`; a term whose incoming
    /// derivative is zero is skipped, so constant exponents work for
    /// negative bases.
    fn pow(self, y: Self) -> Self {
        let value = self.real.pow(y.real);
        let mut dual = T::zero();
        if !self.dual.is_zero() {
            dual = dual + y.real * self.real.pow(y.real - T::one()) * self.dual;
        }
        if !y.dual.is_zero() {
            dual = dual + value * self.real.log() * y.dual;
        }
        Dual::new(value, dual)
    }

    fn hypot(self, y: Self) -> Self {
        let h = self.real.hypot(y.real);
        if h.is_zero() {
            return Dual::constant(h);
        }
        Dual::new(h, (self.real * self.dual + y.real * y.dual) / h)
    }

    fn atan2(self, x: Self) -> Self {
        let y = self;
        let denom = x.real * x.real + y.real * y.real;
        Dual::new(
            y.real.atan2(x.real),
            (x.real * y.dual - y.real * x.dual) / denom,
        )
    }

    #[inline]
    fn copysign(self, sign: Self) -> Self {
        if self.real.signbit() == sign.real.signbit() {
            self
        } else {
            -self
        }
    }

    fn fmin(self, y: Self) -> Self {
        if self.real.isnan() || y.real < self.real {
            y
        } else {
            self
        }
    }

    fn fmax(self, y: Self) -> Self {
        if self.real.isnan() || y.real > self.real {
            y
        } else {
            self
        }
    }

    fn fdim(self, y: Self) -> Self {
        if self.real > y.real {
            self - y
        } else {
            Dual::constant(self.real.fdim(y.real))
        }
    }

    #[inline]
    fn isnan(self) -> bool {
        self.real.isnan()
    }

    #[inline]
    fn isinf(self) -> bool {
        self.real.isinf()
    }

    #[inline]
    fn isfinite(self) -> bool {
        self.real.isfinite() && self.dual.isfinite()
    }

    #[inline]
    fn isnormal(self) -> bool {
        self.real.isnormal()
    }

    #[inline]
    fn signbit(self) -> bool {
        self.real.signbit()
    }

    /// Compares on the value only, so the derivative passes through inside
    /// the interval.
    fn clamp(self, lo: Self, hi: Self) -> Self {
        if self.real < lo.real {
            lo
        } else if self.real > hi.real {
            hi
        } else {
            self
        }
    }
}

/// Digamma `ψ = Γ'/Γ`, the derivative of `lgamma`.
///
/// Shifts the argument above 6 by `ψ(x) = ψ(x + 1) - 1/x`, then sums the
/// asymptotic series; arguments below 1/2 go through the reflection
/// `ψ(x) = ψ(1 - x) - π·cot(πx)`. Poles at the non-positive integers give a
/// non-finite result.
fn digamma<T: Real>(x: T) -> T {
    let half = T::from_f64(0.5);
    if x < half {
        let pi = T::from_f64(std::f64::consts::PI);
        return digamma(T::one() - x) - pi / (pi * x).tan();
    }
    let mut x = x;
    let mut acc = T::zero();
    while x < T::from_f64(6.0) {
        acc = acc - T::one() / x;
        x = x + T::one();
    }
    let inv = T::one() / x;
    let inv2 = inv * inv;
    // Bernoulli terms B_2k / 2k, innermost first
    let series = [1.0 / 132.0, -1.0 / 240.0, 1.0 / 252.0, -1.0 / 120.0, 1.0 / 12.0]
        .iter()
        .fold(T::zero(), |acc, &b| (acc + T::from_f64(b)) * inv2);
    acc + x.log() - half * inv - series
}

impl<T: RealFloat> Dual<T> {
    /// Derivative of `self - n·y` for the integer quotient `n` implied by the
    /// remainder `r`.
    #[inline]
    fn remainder_dual(self, y: Self, r: T) -> Self {
        let n = ((self.real - r) / y.real).round();
        Dual::new(r, self.dual - n * y.dual)
    }
}

impl<T: RealFloat> RealFloat for Dual<T> {
    fn fma(self, y: Self, z: Self) -> Self {
        Dual::new(
            self.real.fma(y.real, z.real),
            self.dual * y.real + self.real * y.dual + z.dual,
        )
    }

    fn fmod(self, y: Self) -> Self {
        self.remainder_dual(y, self.real.fmod(y.real))
    }

    fn remainder(self, y: Self) -> Self {
        self.remainder_dual(y, self.real.remainder(y.real))
    }

    fn remquo(self, y: Self) -> (Self, i32) {
        let (r, quo) = self.real.remquo(y.real);
        (self.remainder_dual(y, r), quo)
    }

    /// One ulp away from the identity: the derivative passes through.
    #[inline]
    fn nextafter(self, toward: Self) -> Self {
        Dual::new(self.real.nextafter(toward.real), self.dual)
    }

    /// `self = m·2^e`, so `dm = dx·2^-e`.
    fn frexp(self) -> (Self, i32) {
        let (m, e) = self.real.frexp();
        (Dual::new(m, self.dual.ldexp(-e)), e)
    }

    #[inline]
    fn ldexp(self, exp: i32) -> Self {
        Dual::new(self.real.ldexp(exp), self.dual.ldexp(exp))
    }

    #[inline]
    fn scalbn(self, exp: i32) -> Self {
        Dual::new(self.real.scalbn(exp), self.dual.scalbn(exp))
    }

    fn modf(self) -> (Self, Self) {
        let (frac, int) = self.real.modf();
        (Dual::new(frac, self.dual), Dual::constant(int))
    }

    #[inline]
    fn ilogb(self) -> i32 {
        self.real.ilogb()
    }

    #[inline]
    fn lrint(self) -> i64 {
        self.real.lrint()
    }

    #[inline]
    fn lround(self) -> i64 {
        self.real.lround()
    }

    flat!(logb, rint);

    fn lgamma(self) -> Self {
        Dual::new(self.real.lgamma(), digamma(self.real) * self.dual)
    }

    fn tgamma(self) -> Self {
        let g = self.real.tgamma();
        Dual::new(g, g * digamma(self.real) * self.dual)
    }
}
