//! Arithmetic on dual numbers.

use fixnd_traits::Real;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign};

use crate::Dual;

impl<T: Real> Neg for Dual<T> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Dual::new(-self.real, -self.dual)
    }
}

impl<T: Real> Add for Dual<T> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Dual::new(self.real + rhs.real, self.dual + rhs.dual)
    }
}

impl<T: Real> Sub for Dual<T> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Dual::new(self.real - rhs.real, self.dual - rhs.dual)
    }
}

impl<T: Real> Mul for Dual<T> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Dual::new(
            self.real * rhs.real,
            self.real * rhs.dual + self.dual * rhs.real,
        )
    }
}

impl<T: Real> Div for Dual<T> {
    type Output = Self;
    #[inline]
    fn div(self, rhs: Self) -> Self {
        Dual::new(
            self.real / rhs.real,
            (self.dual * rhs.real - self.real * rhs.dual) / (rhs.real * rhs.real),
        )
    }
}

/// Truncated remainder, `a - trunc(a / b) * b`.
impl<T: Real> Rem for Dual<T> {
    type Output = Self;
    #[inline]
    fn rem(self, rhs: Self) -> Self {
        let q = (self.real / rhs.real).trunc();
        Dual::new(self.real % rhs.real, self.dual - q * rhs.dual)
    }
}

macro_rules! assign_ops {
    ($($tr:ident::$method:ident => $op:tt),*) => {$(
        impl<T: Real> $tr for Dual<T> {
            #[inline]
            fn $method(&mut self, rhs: Self) {
                *self = *self $op rhs;
            }
        }
    )*};
}

assign_ops!(
    AddAssign::add_assign => +,
    SubAssign::sub_assign => -,
    MulAssign::mul_assign => *,
    DivAssign::div_assign => /,
    RemAssign::rem_assign => %
);

// Mixed forms with a plain scalar, per primitive.
macro_rules! scalar_ops {
    ($($t:ty),*) => {$(
        impl Add<$t> for Dual<$t> {
            type Output = Self;
            #[inline]
            fn add(self, rhs: $t) -> Self {
                Dual::new(self.real + rhs, self.dual)
            }
        }

        impl Sub<$t> for Dual<$t> {
            type Output = Self;
            #[inline]
            fn sub(self, rhs: $t) -> Self {
                Dual::new(self.real - rhs, self.dual)
            }
        }

        impl Mul<$t> for Dual<$t> {
            type Output = Self;
            #[inline]
            fn mul(self, rhs: $t) -> Self {
                Dual::new(self.real * rhs, self.dual * rhs)
            }
        }

        impl Div<$t> for Dual<$t> {
            type Output = Self;
            #[inline]
            fn div(self, rhs: $t) -> Self {
                Dual::new(self.real / rhs, self.dual / rhs)
            }
        }

        impl Rem<$t> for Dual<$t> {
            type Output = Self;
            #[inline]
            fn rem(self, rhs: $t) -> Self {
                Dual::new(self.real % rhs, self.dual)
            }
        }

        impl Add<Dual<$t>> for $t {
            type Output = Dual<$t>;
            #[inline]
            fn add(self, rhs: Dual<$t>) -> Dual<$t> {
                Dual::new(self + rhs.real, rhs.dual)
            }
        }

        impl Sub<Dual<$t>> for $t {
            type Output = Dual<$t>;
            #[inline]
            fn sub(self, rhs: Dual<$t>) -> Dual<$t> {
                Dual::new(self - rhs.real, -rhs.dual)
            }
        }

        impl Mul<Dual<$t>> for $t {
            type Output = Dual<$t>;
            #[inline]
            fn mul(self, rhs: Dual<$t>) -> Dual<$t> {
                Dual::new(self * rhs.real, self * rhs.dual)
            }
        }

        impl Div<Dual<$t>> for $t {
            type Output = Dual<$t>;
            #[inline]
            fn div(self, rhs: Dual<$t>) -> Dual<$t> {
                Dual::constant(self) / rhs
            }
        }

        impl Rem<Dual<$t>> for $t {
            type Output = Dual<$t>;
            #[inline]
            fn rem(self, rhs: Dual<$t>) -> Dual<$t> {
                Dual::constant(self) % rhs
            }
        }

        impl AddAssign<$t> for Dual<$t> {
            #[inline]
            fn add_assign(&mut self, rhs: $t) {
                self.real += rhs;
            }
        }

        impl SubAssign<$t> for Dual<$t> {
            #[inline]
            fn sub_assign(&mut self, rhs: $t) {
                self.real -= rhs;
            }
        }

        impl MulAssign<$t> for Dual<$t> {
            #[inline]
            fn mul_assign(&mut self, rhs: $t) {
                *self = *self * rhs;
            }
        }

        impl DivAssign<$t> for Dual<$t> {
            #[inline]
            fn div_assign(&mut self, rhs: $t) {
                *self = *self / rhs;
            }
        }

        impl RemAssign<$t> for Dual<$t> {
            #[inline]
            fn rem_assign(&mut self, rhs: $t) {
                self.real %= rhs;
            }
        }
    )*};
}

scalar_ops!(f32, f64);
