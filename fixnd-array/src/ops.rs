//! Eager elementwise operators on [`Array`].
//!
//! Every binary operator comes in the forms `&a • &b`, `a • b` (and the
//! mixed owned/borrowed forms), `a • scalar` and `scalar • a`, plus the
//! compound assignment `a •= b` / `a •= scalar`. The element type of the
//! result is the scalar operator's `Output`.

use std::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div,
    DivAssign, Mul, MulAssign, Neg, Not, Rem, RemAssign, Shl, ShlAssign, Shr, ShrAssign, Sub,
    SubAssign,
};

use fixnd_dual::Dual;
use fixnd_traits::op::{self, BinaryOp};
use fixnd_traits::{Scalar, Shape};

use crate::array::Array;

macro_rules! binary_ops {
    ($($tr:ident::$method:ident, $assign:ident::$assign_method:ident => $op:ident;)*) => {$(
        impl<'a, 'b, T, U, S> $tr<&'b Array<U, S>> for &'a Array<T, S>
        where
            T: Clone + $tr<U>,
            U: Clone,
            S: Shape,
        {
            type Output = Array<<T as $tr<U>>::Output, S>;

            #[inline]
            fn $method(self, rhs: &'b Array<U, S>) -> Self::Output {
                self.zip_apply(rhs, op::$op)
            }
        }

        impl<'b, T, U, S> $tr<&'b Array<U, S>> for Array<T, S>
        where
            T: Clone + $tr<U>,
            U: Clone,
            S: Shape,
        {
            type Output = Array<<T as $tr<U>>::Output, S>;

            #[inline]
            fn $method(self, rhs: &'b Array<U, S>) -> Self::Output {
                (&self).$method(rhs)
            }
        }

        impl<'a, T, U, S> $tr<Array<U, S>> for &'a Array<T, S>
        where
            T: Clone + $tr<U>,
            U: Clone,
            S: Shape,
        {
            type Output = Array<<T as $tr<U>>::Output, S>;

            #[inline]
            fn $method(self, rhs: Array<U, S>) -> Self::Output {
                self.$method(&rhs)
            }
        }

        impl<T, U, S> $tr<Array<U, S>> for Array<T, S>
        where
            T: Clone + $tr<U>,
            U: Clone,
            S: Shape,
        {
            type Output = Array<<T as $tr<U>>::Output, S>;

            #[inline]
            fn $method(self, rhs: Array<U, S>) -> Self::Output {
                (&self).$method(&rhs)
            }
        }

        impl<'a, T, U, S> $tr<U> for &'a Array<T, S>
        where
            T: Clone + $tr<U>,
            U: Scalar,
            S: Shape,
        {
            type Output = Array<<T as $tr<U>>::Output, S>;

            #[inline]
            fn $method(self, rhs: U) -> Self::Output {
                self.map(|x| op::$op.apply(x.clone(), rhs))
            }
        }

        impl<T, U, S> $tr<U> for Array<T, S>
        where
            T: Clone + $tr<U>,
            U: Scalar,
            S: Shape,
        {
            type Output = Array<<T as $tr<U>>::Output, S>;

            #[inline]
            fn $method(self, rhs: U) -> Self::Output {
                (&self).$method(rhs)
            }
        }

        impl<'b, T, U, S> $assign<&'b Array<U, S>> for Array<T, S>
        where
            T: $assign<U>,
            U: Clone,
            S: Shape,
        {
            #[inline]
            fn $assign_method(&mut self, rhs: &'b Array<U, S>) {
                self.zip_mut_with(rhs, |a, b| a.$assign_method(b.clone()));
            }
        }

        impl<T, U, S> $assign<Array<U, S>> for Array<T, S>
        where
            T: $assign<U>,
            U: Clone,
            S: Shape,
        {
            #[inline]
            fn $assign_method(&mut self, rhs: Array<U, S>) {
                self.$assign_method(&rhs);
            }
        }

        impl<T, U, S> $assign<U> for Array<T, S>
        where
            T: $assign<U>,
            U: Scalar,
            S: Shape,
        {
            #[inline]
            fn $assign_method(&mut self, rhs: U) {
                self.map_inplace(|a| a.$assign_method(rhs));
            }
        }
    )*};
}

binary_ops! {
    Add::add, AddAssign::add_assign => Add;
    Sub::sub, SubAssign::sub_assign => Sub;
    Mul::mul, MulAssign::mul_assign => Mul;
    Div::div, DivAssign::div_assign => Div;
    Rem::rem, RemAssign::rem_assign => Rem;
    BitAnd::bitand, BitAndAssign::bitand_assign => BitAnd;
    BitOr::bitor, BitOrAssign::bitor_assign => BitOr;
    BitXor::bitxor, BitXorAssign::bitxor_assign => BitXor;
    Shl::shl, ShlAssign::shl_assign => Shl;
    Shr::shr, ShrAssign::shr_assign => Shr;
}

// `scalar • array`: the scalar type must be named, so one impl per type.
macro_rules! scalar_lhs_op {
    ([$($gen:ident),*] $scalar:ty, $tr:ident::$method:ident => $op:ident) => {
        impl<'a, $($gen,)* T, S> $tr<&'a Array<T, S>> for $scalar
        where
            $scalar: $tr<T> + Copy,
            T: Clone,
            S: Shape,
        {
            type Output = Array<<$scalar as $tr<T>>::Output, S>;

            #[inline]
            fn $method(self, rhs: &'a Array<T, S>) -> Self::Output {
                rhs.map(|x| op::$op.apply(self, x.clone()))
            }
        }

        impl<$($gen,)* T, S> $tr<Array<T, S>> for $scalar
        where
            $scalar: $tr<T> + Copy,
            T: Clone,
            S: Shape,
        {
            type Output = Array<<$scalar as $tr<T>>::Output, S>;

            #[inline]
            fn $method(self, rhs: Array<T, S>) -> Self::Output {
                <$scalar as $tr<&Array<T, S>>>::$method(self, &rhs)
            }
        }
    };
}

macro_rules! scalar_lhs_ops {
    ($gens:tt $scalar:ty; $($tr:ident::$method:ident => $op:ident),*) => {$(
        scalar_lhs_op!($gens $scalar, $tr::$method => $op);
    )*};
}

macro_rules! scalar_lhs {
    ($($scalar:ty),*) => {$(
        scalar_lhs_ops!([] $scalar;
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

scalar_lhs!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool);

scalar_lhs_ops!([D] Dual<D>;
    Add::add => Add,
    Sub::sub => Sub,
    Mul::mul => Mul,
    Div::div => Div,
    Rem::rem => Rem
);

impl<'a, T, S> Neg for &'a Array<T, S>
where
    T: Clone + Neg,
    S: Shape,
{
    type Output = Array<T::Output, S>;

    #[inline]
    fn neg(self) -> Self::Output {
        self.apply(op::Neg)
    }
}

impl<T, S> Neg for Array<T, S>
where
    T: Clone + Neg,
    S: Shape,
{
    type Output = Array<T::Output, S>;

    #[inline]
    fn neg(self) -> Self::Output {
        -&self
    }
}

impl<'a, T, S> Not for &'a Array<T, S>
where
    T: Clone + Not,
    S: Shape,
{
    type Output = Array<T::Output, S>;

    #[inline]
    fn not(self) -> Self::Output {
        self.apply(op::Not)
    }
}

impl<T, S> Not for Array<T, S>
where
    T: Clone + Not,
    S: Shape,
{
    type Output = Array<T::Output, S>;

    #[inline]
    fn not(self) -> Self::Output {
        !&self
    }
}

macro_rules! comparisons {
    ($($(#[$meta:meta])* $name:ident => $op:ident: $bound:ident;)*) => {
        /// Elementwise comparisons, producing `bool` arrays.
        ///
        /// `==` on whole arrays keeps its ordinary meaning; these compare
        /// position by position.
        impl<T, S: Shape> Array<T, S> {
            $(
                $(#[$meta])*
                pub fn $name<U>(&self, other: &Array<U, S>) -> Array<bool, S>
                where
                    T: $bound<U>,
                {
                    self.zip_with(other, |a, b| op::$op.apply(a, b))
                }
            )*
        }
    };
}

comparisons! {
    /// `self[k] == other[k]`
    eq_elem => Eq: PartialEq;
    ne_elem => Ne: PartialEq;
    /// `self[k] < other[k]`
    lt_elem => Lt: PartialOrd;
    gt_elem => Gt: PartialOrd;
    le_elem => Le: PartialOrd;
    ge_elem => Ge: PartialOrd;
}

impl<S: Shape> Array<bool, S> {
    /// Logical and.
    pub fn and(&self, other: &Self) -> Self {
        self.zip_apply(other, op::And)
    }

    /// Logical or.
    pub fn or(&self, other: &Self) -> Self {
        self.zip_apply(other, op::Or)
    }
}
