//! Scalar element types and the scalar math catalog.
//!
//! [`Real`] is the function set every real-like element supports, including
//! dual numbers. [`RealFloat`] adds the bit-level IEEE operations that only
//! make sense on `f32` / `f64`.
//! Floating-point implementations go through `libm`, so results are the same
//! on every target.

use num_complex::Complex;
use num_traits::{Float, NumOps, One, Zero};
use std::fmt::Debug;
use std::ops::Neg;

/// Element types that broadcast as a single value against an array.
///
/// The marker keeps `array * scalar` and `array * array` from overlapping.
pub trait Scalar: Copy + 'static {}

macro_rules! impl_scalar {
    ($($t:ty),* $(,)?) => {
        $(impl Scalar for $t {})*
    };
}

impl_scalar!(
    bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
);

impl<T: Copy + 'static> Scalar for Complex<T> {}

/// Real-valued math catalog.
///
/// Method names follow the C math library. Domain and range errors are
/// reported through IEEE values (NaN, infinities), never by panicking.
pub trait Real:
    Copy + PartialOrd + Debug + Zero + One + NumOps + Neg<Output = Self> + 'static
{
    /// Convert a literal constant into this type.
    fn from_f64(x: f64) -> Self;

    fn abs(self) -> Self;
    fn floor(self) -> Self;
    fn ceil(self) -> Self;
    fn trunc(self) -> Self;
    /// Round half away from zero.
    fn round(self) -> Self;

    fn sqrt(self) -> Self;
    fn cbrt(self) -> Self;
    fn exp(self) -> Self;
    fn exp2(self) -> Self;
    fn expm1(self) -> Self;
    fn log(self) -> Self;
    fn log2(self) -> Self;
    fn log10(self) -> Self;
    fn log1p(self) -> Self;
    fn erf(self) -> Self;
    fn erfc(self) -> Self;

    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn tan(self) -> Self;
    fn asin(self) -> Self;
    fn acos(self) -> Self;
    fn atan(self) -> Self;
    fn sinh(self) -> Self;
    fn cosh(self) -> Self;
    fn tanh(self) -> Self;
    fn asinh(self) -> Self;
    fn acosh(self) -> Self;
    fn atanh(self) -> Self;

    fn pow(self, y: Self) -> Self;
    fn hypot(self, y: Self) -> Self;
    /// `atan2(self, x)`, with `self` as the y coordinate.
    fn atan2(self, x: Self) -> Self;
    fn copysign(self, sign: Self) -> Self;
    /// Minimum; a NaN operand yields the other operand.
    fn fmin(self, y: Self) -> Self;
    /// Maximum; a NaN operand yields the other operand.
    fn fmax(self, y: Self) -> Self;
    /// Positive difference, `max(self - y, 0)`.
    fn fdim(self, y: Self) -> Self;

    fn isnan(self) -> bool;
    fn isinf(self) -> bool;
    fn isfinite(self) -> bool;
    fn isnormal(self) -> bool;
    fn signbit(self) -> bool;

    #[inline]
    fn fabs(self) -> Self {
        self.abs()
    }

    #[inline]
    fn csc(self) -> Self {
        Self::one() / self.sin()
    }
    #[inline]
    fn sec(self) -> Self {
        Self::one() / self.cos()
    }
    #[inline]
    fn cot(self) -> Self {
        Self::one() / self.tan()
    }
    #[inline]
    fn csch(self) -> Self {
        Self::one() / self.sinh()
    }
    #[inline]
    fn sech(self) -> Self {
        Self::one() / self.cosh()
    }
    #[inline]
    fn coth(self) -> Self {
        Self::one() / self.tanh()
    }
    #[inline]
    fn acsc(self) -> Self {
        (Self::one() / self).asin()
    }
    #[inline]
    fn asec(self) -> Self {
        (Self::one() / self).acos()
    }
    #[inline]
    fn acot(self) -> Self {
        (Self::one() / self).atan()
    }
    #[inline]
    fn acsch(self) -> Self {
        (Self::one() / self).asinh()
    }
    #[inline]
    fn asech(self) -> Self {
        (Self::one() / self).acosh()
    }
    #[inline]
    fn acoth(self) -> Self {
        (Self::one() / self).atanh()
    }

    /// Integer power by repeated squaring. Negative exponents give the
    /// reciprocal.
    fn nthpow(self, n: i32) -> Self {
        let mut base = self;
        let mut e = n.unsigned_abs();
        let mut acc = Self::one();
        while e > 0 {
            if e & 1 == 1 {
                acc = acc * base;
            }
            e >>= 1;
            if e > 0 {
                base = base * base;
            }
        }
        if n < 0 {
            Self::one() / acc
        } else {
            acc
        }
    }

    /// Restrict to `[lo, hi]`. NaN passes through unchanged.
    #[inline]
    fn clamp(self, lo: Self, hi: Self) -> Self {
        if self < lo {
            lo
        } else if self > hi {
            hi
        } else {
            self
        }
    }
}

/// IEEE operations available on the primitive floating-point types.
pub trait RealFloat: Real {
    /// `self * y + z` with a single rounding.
    fn fma(self, y: Self, z: Self) -> Self;
    /// Remainder with the sign of `self` (C `fmod`).
    fn fmod(self, y: Self) -> Self;
    /// IEEE remainder, quotient rounded to nearest.
    fn remainder(self, y: Self) -> Self;
    /// IEEE remainder plus the low bits and sign of the quotient.
    fn remquo(self, y: Self) -> (Self, i32);
    fn nextafter(self, toward: Self) -> Self;
    /// Split into a mantissa in `[0.5, 1)` and a binary exponent.
    fn frexp(self) -> (Self, i32);
    fn ldexp(self, exp: i32) -> Self;
    fn scalbn(self, exp: i32) -> Self;
    /// Split into `(fractional, integral)` parts, both with the sign of `self`.
    fn modf(self) -> (Self, Self);
    fn logb(self) -> Self;
    fn ilogb(self) -> i32;
    /// Round to nearest, ties to even.
    fn rint(self) -> Self;
    fn lgamma(self) -> Self;
    fn tgamma(self) -> Self;

    #[inline]
    fn nearbyint(self) -> Self {
        self.rint()
    }
    fn lrint(self) -> i64;
    fn lround(self) -> i64;
}

macro_rules! impl_real_float {
    (
        $t:ty,
        unary: { $($u:ident => $uf:path),* $(,)? },
        binary: { $($b:ident => $bf:path),* $(,)? },
        fma: $fma:path,
        fmod: $fmod:path,
        remainder: $remainder:path,
        remquo: $remquo:path,
        nextafter: $nextafter:path,
        frexp: $frexp:path,
        ldexp: $ldexp:path,
        scalbn: $scalbn:path,
        modf: $modf:path,
        ilogb: $ilogb:path,
        rint: $rint:path,
        lgamma: $lgamma:path,
        tgamma: $tgamma:path,
    ) => {
        impl Real for $t {
            #[inline]
            fn from_f64(x: f64) -> Self {
                x as $t
            }
            $(
                #[inline]
                fn $u(self) -> Self {
                    $uf(self)
                }
            )*
            $(
                #[inline]
                fn $b(self, y: Self) -> Self {
                    $bf(self, y)
                }
            )*
            #[inline]
            fn isnan(self) -> bool {
                <$t>::is_nan(self)
            }
            #[inline]
            fn isinf(self) -> bool {
                <$t>::is_infinite(self)
            }
            #[inline]
            fn isfinite(self) -> bool {
                <$t>::is_finite(self)
            }
            #[inline]
            fn isnormal(self) -> bool {
                <$t>::is_normal(self)
            }
            #[inline]
            fn signbit(self) -> bool {
                <$t>::is_sign_negative(self)
            }
        }

        impl RealFloat for $t {
            #[inline]
            fn fma(self, y: Self, z: Self) -> Self {
                $fma(self, y, z)
            }
            #[inline]
            fn fmod(self, y: Self) -> Self {
                $fmod(self, y)
            }
            #[inline]
            fn remainder(self, y: Self) -> Self {
                $remainder(self, y)
            }
            #[inline]
            fn remquo(self, y: Self) -> (Self, i32) {
                $remquo(self, y)
            }
            #[inline]
            fn nextafter(self, toward: Self) -> Self {
                $nextafter(self, toward)
            }
            #[inline]
            fn frexp(self) -> (Self, i32) {
                $frexp(self)
            }
            #[inline]
            fn ldexp(self, exp: i32) -> Self {
                $ldexp(self, exp)
            }
            #[inline]
            fn scalbn(self, exp: i32) -> Self {
                $scalbn(self, exp)
            }
            #[inline]
            fn modf(self) -> (Self, Self) {
                $modf(self)
            }
            fn logb(self) -> Self {
                if self.is_nan() {
                    self
                } else if self == 0.0 {
                    <$t>::NEG_INFINITY
                } else if self.is_infinite() {
                    <$t>::INFINITY
                } else {
                    $ilogb(self) as $t
                }
            }
            #[inline]
            fn ilogb(self) -> i32 {
                $ilogb(self)
            }
            #[inline]
            fn rint(self) -> Self {
                $rint(self)
            }
            #[inline]
            fn lgamma(self) -> Self {
                $lgamma(self)
            }
            #[inline]
            fn tgamma(self) -> Self {
                $tgamma(self)
            }
            #[inline]
            fn lrint(self) -> i64 {
                self.rint() as i64
            }
            #[inline]
            fn lround(self) -> i64 {
                Real::round(self) as i64
            }
        }
    };
}

impl_real_float!(
    f64,
    unary: {
        abs => libm::fabs,
        floor => libm::floor,
        ceil => libm::ceil,
        trunc => libm::trunc,
        round => libm::round,
        sqrt => libm::sqrt,
        cbrt => libm::cbrt,
        exp => libm::exp,
        exp2 => libm::exp2,
        expm1 => libm::expm1,
        log => libm::log,
        log2 => libm::log2,
        log10 => libm::log10,
        log1p => libm::log1p,
        erf => libm::erf,
        erfc => libm::erfc,
        sin => libm::sin,
        cos => libm::cos,
        tan => libm::tan,
        asin => libm::asin,
        acos => libm::acos,
        atan => libm::atan,
        sinh => libm::sinh,
        cosh => libm::cosh,
        tanh => libm::tanh,
        asinh => libm::asinh,
        acosh => libm::acosh,
        atanh => libm::atanh,
    },
    binary: {
        pow => libm::pow,
        hypot => libm::hypot,
        atan2 => libm::atan2,
        copysign => libm::copysign,
        fmin => libm::fmin,
        fmax => libm::fmax,
        fdim => libm::fdim,
    },
    fma: libm::fma,
    fmod: libm::fmod,
    remainder: libm::remainder,
    remquo: libm::remquo,
    nextafter: libm::nextafter,
    frexp: libm::frexp,
    ldexp: libm::ldexp,
    scalbn: libm::scalbn,
    modf: libm::modf,
    ilogb: libm::ilogb,
    rint: libm::rint,
    lgamma: libm::lgamma,
    tgamma: libm::tgamma,
);

impl_real_float!(
    f32,
    unary: {
        abs => libm::fabsf,
        floor => libm::floorf,
        ceil => libm::ceilf,
        trunc => libm::truncf,
        round => libm::roundf,
        sqrt => libm::sqrtf,
        cbrt => libm::cbrtf,
        exp => libm::expf,
        exp2 => libm::exp2f,
        expm1 => libm::expm1f,
        log => libm::logf,
        log2 => libm::log2f,
        log10 => libm::log10f,
        log1p => libm::log1pf,
        erf => libm::erff,
        erfc => libm::erfcf,
        sin => libm::sinf,
        cos => libm::cosf,
        tan => libm::tanf,
        asin => libm::asinf,
        acos => libm::acosf,
        atan => libm::atanf,
        sinh => libm::sinhf,
        cosh => libm::coshf,
        tanh => libm::tanhf,
        asinh => libm::asinhf,
        acosh => libm::acoshf,
        atanh => libm::atanhf,
    },
    binary: {
        pow => libm::powf,
        hypot => libm::hypotf,
        atan2 => libm::atan2f,
        copysign => libm::copysignf,
        fmin => libm::fminf,
        fmax => libm::fmaxf,
        fdim => libm::fdimf,
    },
    fma: libm::fmaf,
    fmod: libm::fmodf,
    remainder: libm::remainderf,
    remquo: libm::remquof,
    nextafter: libm::nextafterf,
    frexp: libm::frexpf,
    ldexp: libm::ldexpf,
    scalbn: libm::scalbnf,
    modf: libm::modff,
    ilogb: libm::ilogbf,
    rint: libm::rintf,
    lgamma: libm::lgammaf,
    tgamma: libm::tgammaf,
);

/// Real and imaginary parts of a possibly-complex element.
///
/// Real types behave as complex numbers with a zero imaginary part.
pub trait ComplexParts: Copy {
    type Real;

    fn real(self) -> Self::Real;
    fn imag(self) -> Self::Real;
    fn conj(self) -> Self;
    /// Phase angle in `(-pi, pi]`.
    fn arg(self) -> Self::Real;
    /// Squared magnitude.
    fn norm(self) -> Self::Real;
}

macro_rules! impl_complex_parts_real {
    ($($t:ty),*) => {$(
        impl ComplexParts for $t {
            type Real = $t;

            #[inline]
            fn real(self) -> $t {
                self
            }
            #[inline]
            fn imag(self) -> $t {
                0.0
            }
            #[inline]
            fn conj(self) -> $t {
                self
            }
            #[inline]
            fn arg(self) -> $t {
                Real::atan2(0.0, self)
            }
            #[inline]
            fn norm(self) -> $t {
                self * self
            }
        }
    )*};
}

impl_complex_parts_real!(f32, f64);

impl<T: Float> ComplexParts for Complex<T> {
    type Real = T;

    #[inline]
    fn real(self) -> T {
        self.re
    }
    #[inline]
    fn imag(self) -> T {
        self.im
    }
    #[inline]
    fn conj(self) -> Self {
        Complex::conj(&self)
    }
    #[inline]
    fn arg(self) -> T {
        Complex::arg(self)
    }
    #[inline]
    fn norm(self) -> T {
        self.norm_sqr()
    }
}
