//! Operators on lazy arrays.
//!
//! Each operator wraps its operands in a new expression node; operand sizes
//! are checked here, at composition, so a mismatch never survives until
//! materialization.

use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Not, Rem, Shl, Shr, Sub};

use fixnd_dual::Dual;
use fixnd_traits::{op, Scalar};

use crate::lazy::{Constant, Expr, LazyArray, Map, Zip};
use crate::view::ArrayView;

macro_rules! lazy_binary_ops {
    ($($tr:ident::$method:ident => $op:ident),*) => {$(
        impl<A, B, const R: usize> $tr<LazyArray<B, R>> for LazyArray<A, R>
        where
            A: Expr<R>,
            B: Expr<R>,
            A::Item: $tr<B::Item>,
        {
            type Output = LazyArray<Zip<A, B, op::$op>, R>;

            #[track_caller]
            fn $method(self, rhs: LazyArray<B, R>) -> Self::Output {
                self.zip_apply(rhs, op::$op)
            }
        }

        impl<'b, A, U, const R: usize> $tr<ArrayView<'b, U, R>> for LazyArray<A, R>
        where
            A: Expr<R>,
            U: Clone,
            A::Item: $tr<U>,
        {
            type Output = LazyArray<Zip<A, ArrayView<'b, U, R>, op::$op>, R>;

            #[track_caller]
            fn $method(self, rhs: ArrayView<'b, U, R>) -> Self::Output {
                self.zip_apply(rhs.lazy(), op::$op)
            }
        }

        impl<A, U, const R: usize> $tr<U> for LazyArray<A, R>
        where
            A: Expr<R>,
            U: Scalar,
            A::Item: $tr<U>,
        {
            type Output = LazyArray<Zip<A, Constant<U>, op::$op>, R>;

            #[inline]
            fn $method(self, rhs: U) -> Self::Output {
                self.zip_unchecked(Constant(rhs), op::$op)
            }
        }
    )*};
}

lazy_binary_ops!(
    Add::add => Add,
    Sub::sub => Sub,
    Mul::mul => Mul,
    Div::div => Div,
    Rem::rem => Rem,
    BitAnd::bitand => BitAnd,
    BitOr::bitor => BitOr,
    BitXor::bitxor => BitXor,
    Shl::shl => Shl,
    Shr::shr => Shr
);

macro_rules! scalar_lhs_lazy_op {
    ([$($gen:ident),*] $scalar:ty, $tr:ident::$method:ident => $op:ident) => {
        impl<$($gen,)* A, const R: usize> $tr<LazyArray<A, R>> for $scalar
        where
            A: Expr<R>,
            $scalar: $tr<A::Item> + Clone,
        {
            type Output = LazyArray<Zip<Constant<$scalar>, A, op::$op>, R>;

            #[inline]
            fn $method(self, rhs: LazyArray<A, R>) -> Self::Output {
                LazyArray::constant(rhs.sizes(), self).zip_unchecked(rhs.into_expr(), op::$op)
            }
        }
    };
}

macro_rules! scalar_lhs_lazy_ops {
    ($gens:tt $scalar:ty; $($tr:ident::$method:ident => $op:ident),*) => {$(
        scalar_lhs_lazy_op!($gens $scalar, $tr::$method => $op);
    )*};
}

macro_rules! scalar_lhs_lazy {
    ($($scalar:ty),*) => {$(
        scalar_lhs_lazy_ops!([] $scalar;
            Add::add => Add,
            Sub::sub => Sub,
            Mul::mul => Mul,
            Div::div => Div,
            Rem::rem => Rem,
            BitAnd::bitand => BitAnd,
            BitOr::bitor => BitOr,
            BitXor::bitxor => BitXor,
            Shl::shl => Shl,
            Shr::shr => Shr
        );
    )*};
}

scalar_lhs_lazy!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool);

scalar_lhs_lazy_ops!([D] Dual<D>;
    Add::add => Add,
    Sub::sub => Sub,
    Mul::mul => Mul,
    Div::div => Div,
    Rem::rem => Rem
);

impl<A, const R: usize> Neg for LazyArray<A, R>
where
    A: Expr<R>,
    A::Item: Neg,
{
    type Output = LazyArray<Map<A, op::Neg>, R>;

    fn neg(self) -> Self::Output {
        self.apply(op::Neg)
    }
}

impl<A, const R: usize> Not for LazyArray<A, R>
where
    A: Expr<R>,
    A::Item: Not,
{
    type Output = LazyArray<Map<A, op::Not>, R>;

    fn not(self) -> Self::Output {
        self.apply(op::Not)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Array;
    use fixnd_traits::{Ix1, Ix2};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_lazy_matches_eager() {
        let mut rng = StdRng::seed_from_u64(42);
        let a: Array<f64, Ix2<3, 4>> = Array::from_fn(|_| rng.gen_range(-2.0..2.0));
        let b: Array<f64, Ix2<3, 4>> = Array::from_fn(|_| rng.gen_range(0.5..2.0));
        let eager = &(&(&a * &b) - &a) / &b + 1.0;
        let lazy: Array<f64, Ix2<3, 4>> =
            ((a.lazy() * b.lazy() - a.lazy()) / b.lazy() + 1.0).to_array();
        assert_eq!(lazy, eager);
        let negated: Array<f64, Ix2<3, 4>> = (-(2.0f64 * a.lazy())).to_array();
        assert_eq!(negated, -(&a * 2.0));
    }

    #[test]
    fn test_scalar_on_left_of_lazy() {
        let x = LazyArray::from_fn([2, 2], |[i, j]| (i * 2 + j + 1) as f64);
        let inverse: Array<f64, Ix2<2, 2>> = (2.0f64 / x).to_array();
        assert_eq!(inverse.as_slice(), &[2.0, 1.0, 2.0 / 3.0, 0.5]);
        let shifted = 10i32 - LazyArray::constant([3], 4i32);
        assert_eq!(shifted.to_vec(), vec![6, 6, 6]);
        let masked = 0b1010u16 & LazyArray::from_fn([2], |[i]| 0b0110u16 << i);
        assert_eq!(masked.to_vec(), vec![0b0010, 0b1000]);
        let remainder = 7.5f32 % LazyArray::constant([1], 2.0f32);
        assert_eq!(remainder.to_vec(), vec![1.5]);
    }

    #[test]
    fn test_lazy_with_view_operand() {
        let a = Array::from([1, 2, 3]);
        let b = Array::from([4, 5, 6]);
        let c: Array<i32, Ix1<3>> = (a.lazy() << b.view()).to_array();
        assert_eq!(c.as_slice(), &[16, 64, 192]);
        let d: Array<i32, Ix1<3>> = (7i32 & !a.lazy()).to_array();
        assert_eq!(d.as_slice(), &[6, 5, 4]);
    }

    #[test]
    fn test_composition_keeps_first_sizes() {
        let a = LazyArray::constant([2, 3], 1u32);
        let b = LazyArray::from_fn([2, 3], |[i, j]| (i * j) as u32);
        let c = (a + b) * 3u32;
        assert_eq!(c.sizes(), [2, 3]);
        assert_eq!(c.eval([1, 2]), 9);
    }

    #[test]
    #[should_panic(expected = "shape mismatch: [2, 3] vs [3, 2]")]
    fn test_mismatched_lazy_operands_panic() {
        let a = LazyArray::constant([2, 3], 1.0f64);
        let b = LazyArray::constant([3, 2], 1.0f64);
        let _ = a - b;
    }

    #[test]
    fn test_dual_scalar_on_left() {
        let x = LazyArray::from_fn([2], |[i]| Dual::variable(i as f64));
        let y = Dual::constant(2.0f64) * x + 1.0f64;
        assert_eq!(y.eval([1]), Dual::new(3.0, 2.0));
    }
}
