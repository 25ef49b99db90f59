//! Operators on strided views.
//!
//! Compound assignment into an [`ArrayViewMut`] accepts another view, an
//! array, a lazy array or a scalar, and updates the window in place. An
//! owned [`Array`] also accepts a view or a lazy array on the right, through
//! its full-window view.
//! Non-assigning operators on an [`ArrayView`] build a [`LazyArray`]: a view
//! carries its sizes at runtime, so there is no array type to produce
//! eagerly. Operand sizes are asserted when the operator is applied.

use std::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div,
    DivAssign, Mul, MulAssign, Neg, Not, Rem, RemAssign, Shl, ShlAssign, Shr, ShrAssign, Sub,
    SubAssign,
};

use fixnd_dual::Dual;
use fixnd_traits::{op, Scalar, Shape};

use crate::array::Array;
use crate::lazy::{Constant, Expr, LazyArray, Map, Zip};
use crate::view::{ArrayView, ArrayViewMut};
use crate::assert_same_shape;

macro_rules! view_assign_ops {
    ($($assign:ident::$method:ident),*) => {$(
        impl<'a, 'b, T, U, const R: usize> $assign<ArrayView<'b, U, R>> for ArrayViewMut<'a, T, R>
        where
            T: $assign<U>,
            U: Clone,
        {
            #[track_caller]
            fn $method(&mut self, rhs: ArrayView<'b, U, R>) {
                assert_same_shape(&self.sizes(), &rhs.sizes());
                self.for_each_indexed(|k, x| x.$method(rhs.at(&k).clone()));
            }
        }

        impl<'a, 'b, T, U, S, const R: usize> $assign<&'b Array<U, S>> for ArrayViewMut<'a, T, R>
        where
            T: $assign<U>,
            U: Clone,
            S: Shape<Index = [usize; R]>,
        {
            #[track_caller]
            fn $method(&mut self, rhs: &'b Array<U, S>) {
                assert_same_shape(&self.sizes(), &S::sizes());
                self.for_each_indexed(|k, x| x.$method(rhs[k].clone()));
            }
        }

        impl<'a, T, E, const R: usize> $assign<LazyArray<E, R>> for ArrayViewMut<'a, T, R>
        where
            E: Expr<R>,
            T: $assign<E::Item>,
        {
            #[track_caller]
            fn $method(&mut self, rhs: LazyArray<E, R>) {
                assert_same_shape(&self.sizes(), &rhs.sizes());
                self.for_each_indexed(|k, x| x.$method(rhs.eval(k)));
            }
        }

        impl<'a, T, U, const R: usize> $assign<U> for ArrayViewMut<'a, T, R>
        where
            T: $assign<U>,
            U: Scalar,
        {
            fn $method(&mut self, rhs: U) {
                self.for_each_mut(|x| x.$method(rhs));
            }
        }

        impl<'b, T, U, S, const R: usize> $assign<ArrayView<'b, U, R>> for Array<T, S>
        where
            T: $assign<U>,
            U: Clone,
            S: Shape<Index = [usize; R]>,
        {
            #[track_caller]
            fn $method(&mut self, rhs: ArrayView<'b, U, R>) {
                $assign::$method(&mut self.view_mut(), rhs);
            }
        }

        impl<T, E, S, const R: usize> $assign<LazyArray<E, R>> for Array<T, S>
        where
            E: Expr<R>,
            T: $assign<E::Item>,
            S: Shape<Index = [usize; R]>,
        {
            #[track_caller]
            fn $method(&mut self, rhs: LazyArray<E, R>) {
                $assign::$method(&mut self.view_mut(), rhs);
            }
        }
    )*};
}

view_assign_ops!(
    AddAssign::add_assign,
    SubAssign::sub_assign,
    MulAssign::mul_assign,
    DivAssign::div_assign,
    RemAssign::rem_assign,
    BitAndAssign::bitand_assign,
    BitOrAssign::bitor_assign,
    BitXorAssign::bitxor_assign,
    ShlAssign::shl_assign,
    ShrAssign::shr_assign
);

macro_rules! view_binary_ops {
    ($($tr:ident::$method:ident => $op:ident),*) => {$(
        impl<'a, 'b, T, U, const R: usize> $tr<ArrayView<'b, U, R>> for ArrayView<'a, T, R>
        where
            T: Clone + $tr<U>,
            U: Clone,
        {
            type Output = LazyArray<Zip<ArrayView<'a, T, R>, ArrayView<'b, U, R>, op::$op>, R>;

            #[track_caller]
            fn $method(self, rhs: ArrayView<'b, U, R>) -> Self::Output {
                self.lazy().zip_apply(rhs.lazy(), op::$op)
            }
        }

        impl<'a, T, B, const R: usize> $tr<LazyArray<B, R>> for ArrayView<'a, T, R>
        where
            B: Expr<R>,
            T: Clone + $tr<B::Item>,
        {
            type Output = LazyArray<Zip<ArrayView<'a, T, R>, B, op::$op>, R>;

            #[track_caller]
            fn $method(self, rhs: LazyArray<B, R>) -> Self::Output {
                self.lazy().zip_apply(rhs, op::$op)
            }
        }

        impl<'a, T, U, const R: usize> $tr<U> for ArrayView<'a, T, R>
        where
            T: Clone + $tr<U>,
            U: Scalar,
        {
            type Output = LazyArray<Zip<ArrayView<'a, T, R>, Constant<U>, op::$op>, R>;

            #[inline]
            fn $method(self, rhs: U) -> Self::Output {
                self.lazy().zip_unchecked(Constant(rhs), op::$op)
            }
        }
    )*};
}

view_binary_ops!(
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

macro_rules! scalar_lhs_view_op {
    ([$($gen:ident),*] $scalar:ty, $tr:ident::$method:ident => $op:ident) => {
        impl<'b, $($gen,)* U, const R: usize> $tr<ArrayView<'b, U, R>> for $scalar
        where
            $scalar: $tr<U> + Clone,
            U: Clone,
        {
            type Output = LazyArray<Zip<Constant<$scalar>, ArrayView<'b, U, R>, op::$op>, R>;

            #[inline]
            fn $method(self, rhs: ArrayView<'b, U, R>) -> Self::Output {
                LazyArray::constant(rhs.sizes(), self).zip_unchecked(rhs, op::$op)
            }
        }
    };
}

macro_rules! scalar_lhs_view_ops {
    ($gens:tt $scalar:ty; $($tr:ident::$method:ident => $op:ident),*) => {$(
        scalar_lhs_view_op!($gens $scalar, $tr::$method => $op);
    )*};
}

macro_rules! scalar_lhs_view {
    ($($scalar:ty),*) => {$(
        scalar_lhs_view_ops!([] $scalar;
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

scalar_lhs_view!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool);

scalar_lhs_view_ops!([D] Dual<D>;
    Add::add => Add,
    Sub::sub => Sub,
    Mul::mul => Mul,
    Div::div => Div,
    Rem::rem => Rem
);

impl<'a, T: Clone + Neg, const R: usize> Neg for ArrayView<'a, T, R> {
    type Output = LazyArray<Map<ArrayView<'a, T, R>, op::Neg>, R>;

    fn neg(self) -> Self::Output {
        self.lazy().apply(op::Neg)
    }
}

impl<'a, T: Clone + Not, const R: usize> Not for ArrayView<'a, T, R> {
    type Output = LazyArray<Map<ArrayView<'a, T, R>, op::Not>, R>;

    fn not(self) -> Self::Output {
        self.lazy().apply(op::Not)
    }
}
