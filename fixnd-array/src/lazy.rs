//! Lazy elementwise expressions.
//!
//! A [`LazyArray`] pairs an expression `E: Expr<R>` with the sizes it is
//! defined over. Composing lazy arrays (operators, lifted math functions,
//! [`map`](LazyArray::map), [`permute`](LazyArray::permute), ...) only builds
//! a larger expression value; nothing is evaluated until the result is
//! materialized with [`to_array`](LazyArray::to_array),
//! [`ArrayViewMut::assign`](crate::ArrayViewMut::assign) or one of the
//! reductions.
//!
//! Expression nodes are plain generic structs, so a composed expression is
//! monomorphized into a single loop body with no boxing.

use std::ops::Mul;

use fixnd_traits::op::{BinaryOp, Func, TernaryOp, UnaryOp};
use fixnd_traits::{indices, MultiIndex, Shape};
use num_traits::Zero;

use crate::array::Array;
use crate::threading::{WorkerSend, WorkerSync};
use crate::view::ArrayView;
use crate::{assert_same_shape, ensure_same_shape, threading, ArrayError, Result};

/// A pure function of a rank-`R` multi-index.
///
/// `eval` is only called with indices inside the sizes of the enclosing
/// [`LazyArray`], and must return the same value for the same index.
pub trait Expr<const R: usize> {
    type Item;

    fn eval(&self, index: [usize; R]) -> Self::Item;
}

impl<E: Expr<R> + ?Sized, const R: usize> Expr<R> for &E {
    type Item = E::Item;

    #[inline(always)]
    fn eval(&self, index: [usize; R]) -> E::Item {
        (**self).eval(index)
    }
}

// ============================================================================
// Expression nodes
// ============================================================================

/// Leaf evaluating a closure of the multi-index.
#[derive(Clone, Copy, Debug)]
pub struct FromFn<F>(pub F);

impl<F, T, const R: usize> Expr<R> for FromFn<F>
where
    F: Fn([usize; R]) -> T,
{
    type Item = T;

    #[inline(always)]
    fn eval(&self, index: [usize; R]) -> T {
        (self.0)(index)
    }
}

/// Leaf broadcasting one value to every index.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Constant<T>(pub T);

impl<T: Clone, const R: usize> Expr<R> for Constant<T> {
    type Item = T;

    #[inline(always)]
    fn eval(&self, _: [usize; R]) -> T {
        self.0.clone()
    }
}

impl<T: Clone, const R: usize> Expr<R> for ArrayView<'_, T, R> {
    type Item = T;

    #[inline(always)]
    fn eval(&self, index: [usize; R]) -> T {
        self.at(&index).clone()
    }
}

/// `op(inner[k])`
#[derive(Clone, Copy, Debug)]
pub struct Map<A, O> {
    pub(crate) inner: A,
    pub(crate) op: O,
}

impl<A, O, const R: usize> Expr<R> for Map<A, O>
where
    A: Expr<R>,
    O: UnaryOp<A::Item>,
{
    type Item = O::Output;

    #[inline(always)]
    fn eval(&self, index: [usize; R]) -> O::Output {
        self.op.apply(self.inner.eval(index))
    }
}

/// `op(lhs[k], rhs[k])`
#[derive(Clone, Copy, Debug)]
pub struct Zip<A, B, O> {
    pub(crate) lhs: A,
    pub(crate) rhs: B,
    pub(crate) op: O,
}

impl<A, B, O, const R: usize> Expr<R> for Zip<A, B, O>
where
    A: Expr<R>,
    B: Expr<R>,
    O: BinaryOp<A::Item, B::Item>,
{
    type Item = O::Output;

    #[inline(always)]
    fn eval(&self, index: [usize; R]) -> O::Output {
        self.op.apply(self.lhs.eval(index), self.rhs.eval(index))
    }
}

/// `op(a[k], b[k], c[k])`
#[derive(Clone, Copy, Debug)]
pub struct Zip3<A, B, C, O> {
    pub(crate) a: A,
    pub(crate) b: B,
    pub(crate) c: C,
    pub(crate) op: O,
}

impl<A, B, C, O, const R: usize> Expr<R> for Zip3<A, B, C, O>
where
    A: Expr<R>,
    B: Expr<R>,
    C: Expr<R>,
    O: TernaryOp<A::Item, B::Item, C::Item>,
{
    type Item = O::Output;

    #[inline(always)]
    fn eval(&self, index: [usize; R]) -> O::Output {
        self.op
            .apply(self.a.eval(index), self.b.eval(index), self.c.eval(index))
    }
}

/// Axis reordering: output axis `d` reads input axis `perm[d]`.
#[derive(Clone, Copy, Debug)]
pub struct Permuted<A, const R: usize> {
    inner: A,
    perm: [usize; R],
}

impl<A: Expr<R>, const R: usize> Expr<R> for Permuted<A, R> {
    type Item = A::Item;

    #[inline]
    fn eval(&self, index: [usize; R]) -> A::Item {
        let mut source = [0; R];
        for (d, &p) in self.perm.iter().enumerate() {
            source[p] = index[d];
        }
        self.inner.eval(source)
    }
}

/// Matrix product `sum_k lhs[i, k] * rhs[k, j]`, evaluated per element.
#[derive(Clone, Copy, Debug)]
pub struct MatMul<A, B> {
    lhs: A,
    rhs: B,
    inner: usize,
}

impl<A, B, T> Expr<2> for MatMul<A, B>
where
    A: Expr<2>,
    B: Expr<2>,
    A::Item: Mul<B::Item, Output = T>,
    T: Zero,
{
    type Item = T;

    fn eval(&self, [i, j]: [usize; 2]) -> T {
        (0..self.inner).fold(T::zero(), |acc, k| {
            acc + self.lhs.eval([i, k]) * self.rhs.eval([k, j])
        })
    }
}

// ============================================================================
// LazyArray
// ============================================================================

/// A deferred elementwise computation of runtime sizes `[usize; R]`.
///
/// # Example
/// ```
/// use fixnd_array::{Array, LazyArray};
/// use fixnd_traits::Ix2;
///
/// let eye = LazyArray::from_fn([2, 2], |[i, j]| if i == j { 1.0 } else { 0.0 });
/// let m: Array<f64, Ix2<2, 2>> = (eye * 3.0).to_array();
/// assert_eq!(m.as_slice(), &[3.0, 0.0, 0.0, 3.0]);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct LazyArray<E, const R: usize> {
    expr: E,
    sizes: [usize; R],
}

impl<E, const R: usize> LazyArray<E, R> {
    pub fn new(expr: E, sizes: [usize; R]) -> Self {
        LazyArray { expr, sizes }
    }

    #[inline]
    pub fn sizes(&self) -> [usize; R] {
        self.sizes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sizes.product()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn expr(&self) -> &E {
        &self.expr
    }

    pub fn into_expr(self) -> E {
        self.expr
    }

    /// Borrow the expression, so it can be composed without being moved.
    pub fn by_ref(&self) -> LazyArray<&E, R> {
        LazyArray::new(&self.expr, self.sizes)
    }
}

impl<F, const R: usize> LazyArray<FromFn<F>, R> {
    /// Lazy array whose element at `k` is `f(k)`.
    pub fn from_fn<T>(sizes: [usize; R], f: F) -> Self
    where
        F: Fn([usize; R]) -> T,
    {
        LazyArray::new(FromFn(f), sizes)
    }
}

impl<T: Clone, const R: usize> LazyArray<Constant<T>, R> {
    pub fn constant(sizes: [usize; R], value: T) -> Self {
        LazyArray::new(Constant(value), sizes)
    }
}

impl<E: Expr<R>, const R: usize> LazyArray<E, R> {
    /// Evaluate one in-bounds element.
    #[inline]
    pub fn eval(&self, index: [usize; R]) -> E::Item {
        self.expr.eval(index)
    }

    /// Evaluate one element, or `None` if `index` is out of bounds.
    pub fn get(&self, index: [usize; R]) -> Option<E::Item> {
        index
            .in_bounds(&self.sizes)
            .then(|| self.expr.eval(index))
    }

    /// Compose with a closure applied to every element.
    pub fn map<F, U>(self, f: F) -> LazyArray<Map<E, Func<F>>, R>
    where
        F: Fn(E::Item) -> U,
    {
        self.apply(Func(f))
    }

    /// Compose with a unary operator identity.
    pub fn apply<O: UnaryOp<E::Item>>(self, op: O) -> LazyArray<Map<E, O>, R> {
        LazyArray::new(
            Map {
                inner: self.expr,
                op,
            },
            self.sizes,
        )
    }

    /// Combine with another lazy array of the same sizes.
    ///
    /// # Panics
    /// Panics with the [`ArrayError::ShapeMismatch`] message if the sizes
    /// differ.
    #[track_caller]
    pub fn zip_with<B, F, U>(self, other: LazyArray<B, R>, f: F) -> LazyArray<Zip<E, B, Func<F>>, R>
    where
        B: Expr<R>,
        F: Fn(E::Item, B::Item) -> U,
    {
        self.zip_apply(other, Func(f))
    }

    /// Non-panicking form of [`zip_with`](Self::zip_with).
    pub fn try_zip_with<B, F, U>(
        self,
        other: LazyArray<B, R>,
        f: F,
    ) -> Result<LazyArray<Zip<E, B, Func<F>>, R>>
    where
        B: Expr<R>,
        F: Fn(E::Item, B::Item) -> U,
    {
        self.try_zip_apply(other, Func(f))
    }

    #[track_caller]
    pub fn zip_apply<B, O>(self, other: LazyArray<B, R>, op: O) -> LazyArray<Zip<E, B, O>, R>
    where
        B: Expr<R>,
        O: BinaryOp<E::Item, B::Item>,
    {
        assert_same_shape(&self.sizes, &other.sizes);
        self.zip_unchecked(other.expr, op)
    }

    pub fn try_zip_apply<B, O>(
        self,
        other: LazyArray<B, R>,
        op: O,
    ) -> Result<LazyArray<Zip<E, B, O>, R>>
    where
        B: Expr<R>,
        O: BinaryOp<E::Item, B::Item>,
    {
        ensure_same_shape(&self.sizes, &other.sizes)?;
        Ok(self.zip_unchecked(other.expr, op))
    }

    /// Zip with an expression already known to cover `self.sizes`.
    pub(crate) fn zip_unchecked<B, O>(self, rhs: B, op: O) -> LazyArray<Zip<E, B, O>, R> {
        LazyArray::new(
            Zip {
                lhs: self.expr,
                rhs,
                op,
            },
            self.sizes,
        )
    }

    /// Combine three lazy arrays of the same sizes.
    #[track_caller]
    pub fn zip3_apply<B, C, O>(
        self,
        b: LazyArray<B, R>,
        c: LazyArray<C, R>,
        op: O,
    ) -> LazyArray<Zip3<E, B, C, O>, R>
    where
        B: Expr<R>,
        C: Expr<R>,
        O: TernaryOp<E::Item, B::Item, C::Item>,
    {
        assert_same_shape(&self.sizes, &b.sizes);
        assert_same_shape(&self.sizes, &c.sizes);
        LazyArray::new(
            Zip3 {
                a: self.expr,
                b: b.expr,
                c: c.expr,
                op,
            },
            self.sizes,
        )
    }

    /// Reorder axes: output axis `d` reads input axis `perm[d]`.
    ///
    /// # Errors
    /// Returns [`ArrayError::InvalidPermutation`] unless `perm` is a
    /// permutation of `0..R`.
    pub fn permute(self, perm: [usize; R]) -> Result<LazyArray<Permuted<E, R>, R>> {
        let mut seen = [false; R];
        for &p in &perm {
            if p >= R || seen[p] {
                return Err(ArrayError::InvalidPermutation(perm.to_vec()));
            }
            seen[p] = true;
        }
        let sizes = perm.map(|p| self.sizes[p]);
        Ok(LazyArray::new(
            Permuted {
                inner: self.expr,
                perm,
            },
            sizes,
        ))
    }

    /// Sum of all elements; zero when empty.
    pub fn sum(&self) -> E::Item
    where
        E::Item: Zero,
    {
        indices(self.sizes).fold(E::Item::zero(), |acc, k| acc + self.expr.eval(k))
    }

    /// Smallest element, or `Default` when empty.
    ///
    /// Incomparable elements (NaN) never replace the running minimum.
    pub fn min(&self) -> E::Item
    where
        E::Item: PartialOrd + Default,
    {
        self.fold_select(|x, acc| x < acc)
    }

    /// Largest element, or `Default` when empty.
    pub fn max(&self) -> E::Item
    where
        E::Item: PartialOrd + Default,
    {
        self.fold_select(|x, acc| x > acc)
    }

    fn fold_select(&self, better: impl Fn(&E::Item, &E::Item) -> bool) -> E::Item
    where
        E::Item: Default,
    {
        let mut all = indices(self.sizes).map(|k| self.expr.eval(k));
        let Some(first) = all.next() else {
            return E::Item::default();
        };
        all.fold(first, |acc, x| if better(&x, &acc) { x } else { acc })
    }

    /// Evaluate every element into a row-major `Vec`.
    pub fn to_vec(&self) -> Vec<E::Item>
    where
        E: WorkerSync,
        E::Item: WorkerSend,
    {
        threading::collect_indexed(self.sizes, |k| self.expr.eval(k))
    }

    /// Materialize into an array of shape `S`.
    ///
    /// # Panics
    /// Panics if `S` does not have the sizes of `self`.
    #[track_caller]
    pub fn to_array<S>(&self) -> Array<E::Item, S>
    where
        S: Shape<Index = [usize; R]>,
        E: WorkerSync,
        E::Item: WorkerSend,
    {
        assert_same_shape(&S::sizes(), &self.sizes);
        Array::from_vec_unchecked(self.to_vec())
    }

    pub fn try_to_array<S>(&self) -> Result<Array<E::Item, S>>
    where
        S: Shape<Index = [usize; R]>,
        E: WorkerSync,
        E::Item: WorkerSend,
    {
        ensure_same_shape(&S::sizes(), &self.sizes)?;
        Ok(Array::from_vec_unchecked(self.to_vec()))
    }
}

impl<E: Expr<1>> LazyArray<E, 1> {
    /// Inner product with another rank-1 lazy array.
    #[track_caller]
    pub fn dot<B, T>(&self, other: &LazyArray<B, 1>) -> T
    where
        B: Expr<1>,
        E::Item: Mul<B::Item, Output = T>,
        T: Zero,
    {
        assert_same_shape(&self.sizes, &other.sizes);
        (0..self.sizes[0]).fold(T::zero(), |acc, i| {
            acc + self.expr.eval([i]) * other.expr.eval([i])
        })
    }
}

impl<E: Expr<2>> LazyArray<E, 2> {
    pub fn transpose(self) -> LazyArray<Permuted<E, 2>, 2> {
        let [m, n] = self.sizes;
        LazyArray::new(
            Permuted {
                inner: self.expr,
                perm: [1, 0],
            },
            [n, m],
        )
    }

    /// Lazy matrix product; each element is an inner product evaluated on
    /// demand.
    ///
    /// # Panics
    /// Panics if the inner extents differ.
    #[track_caller]
    pub fn matmul<B: Expr<2>>(self, rhs: LazyArray<B, 2>) -> LazyArray<MatMul<E, B>, 2> {
        match self.try_matmul(rhs) {
            Ok(product) => product,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_matmul<B: Expr<2>>(self, rhs: LazyArray<B, 2>) -> Result<LazyArray<MatMul<E, B>, 2>> {
        let [m, k] = self.sizes;
        let [k2, n] = rhs.sizes;
        if k != k2 {
            return Err(ArrayError::ShapeMismatch(self.sizes.to_vec(), rhs.sizes.to_vec()));
        }
        Ok(LazyArray::new(
            MatMul {
                lhs: self.expr,
                rhs: rhs.expr,
                inner: k,
            },
            [m, n],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixnd_traits::op;
    use fixnd_traits::{Ix1, Ix2};

    #[test]
    fn test_from_fn_and_get() {
        let a = LazyArray::from_fn([2, 3], |[i, j]| i * 3 + j);
        assert_eq!(a.get([1, 2]), Some(5));
        assert_eq!(a.get([2, 0]), None);
        assert_eq!(a.len(), 6);
    }

    // `Cell` is not `Sync`, so this only materializes without `parallel`.
    #[cfg(not(feature = "parallel"))]
    #[test]
    fn test_composition_is_deferred() {
        use std::cell::Cell;
        let calls = Cell::new(0);
        let a = LazyArray::from_fn([4], |[i]| {
            calls.set(calls.get() + 1);
            i as f64
        });
        let composed = a.map(|x| x * 2.0).apply(op::Sqrt);
        assert_eq!(calls.get(), 0);
        let v = composed.to_vec();
        assert_eq!(calls.get(), 4);
        assert_eq!(v[2], 2.0);
    }

    #[test]
    fn test_zip_and_try_zip() {
        let a = LazyArray::from_fn([2, 3], |[i, j]| (i + j) as i32);
        let b = LazyArray::constant([2, 3], 10);
        let c = a.by_ref().zip_with(b, |x, y| x * y);
        assert_eq!(c.eval([1, 2]), 30);
        let wrong = LazyArray::constant([3, 2], 1);
        assert_eq!(
            a.try_zip_with(wrong, |x, y| x + y).err(),
            Some(ArrayError::ShapeMismatch(vec![2, 3], vec![3, 2]))
        );
    }

    #[test]
    #[should_panic(expected = "shape mismatch")]
    fn test_zip_mismatch_panics() {
        let a = LazyArray::constant([2, 3], 1.0);
        let b = LazyArray::constant([3, 2], 1.0);
        let _ = a.zip_apply(b, op::Add);
    }

    #[test]
    fn test_permute_and_transpose() {
        let a = LazyArray::from_fn([2, 3, 4], |[i, j, k]| 100 * i + 10 * j + k);
        let p = a.permute([2, 0, 1]).unwrap();
        assert_eq!(p.sizes(), [4, 2, 3]);
        assert_eq!(p.eval([3, 1, 2]), 123);
        assert!(a.permute([1, 1, 0]).is_err());
        let m = LazyArray::from_fn([2, 3], |[i, j]| 10 * i + j);
        let t = m.transpose();
        assert_eq!(t.sizes(), [3, 2]);
        assert_eq!(t.eval([2, 1]), 12);
    }

    #[test]
    fn test_matmul() {
        let a = LazyArray::from_fn([2, 3], |[i, j]| (i * 3 + j) as f64);
        let b = LazyArray::from_fn([3, 2], |[i, j]| if i == j { 1.0 } else { 0.0 });
        let c: Array<f64, Ix2<2, 2>> = a.matmul(b).to_array();
        assert_eq!(c.as_slice(), &[0.0, 1.0, 3.0, 4.0]);
        assert!(a.try_matmul(a).is_err());
    }

    #[test]
    fn test_reductions() {
        let a = LazyArray::from_fn([2, 2], |[i, j]| (i as f64) - (j as f64) * 3.0);
        assert_eq!(a.sum(), -6.0 + 2.0);
        assert_eq!(a.min(), -3.0);
        assert_eq!(a.max(), 1.0);
        let empty = LazyArray::from_fn([0], |_| 5i32);
        assert_eq!(empty.min(), 0);
        assert_eq!(empty.max(), 0);
        let x = LazyArray::from_fn([3], |[i]| i as f64 + 1.0);
        assert_eq!(x.dot(&x), 14.0);
    }

    #[test]
    fn test_to_array_and_try_to_array() {
        let a = LazyArray::from_fn([3], |[i]| i as u8);
        let arr: Array<u8, Ix1<3>> = a.to_array();
        assert_eq!(arr.as_slice(), &[0, 1, 2]);
        assert_eq!(a.try_to_array::<Ix1<3>>().ok(), Some(arr));
        assert!(a.try_to_array::<Ix1<4>>().is_err());
    }

    #[test]
    fn test_view_leaf() {
        let data = [1.0, 2.0, 3.0, 4.0];
        let v = ArrayView::new(&data, [2, 2]).unwrap().transpose();
        let doubled = v.lazy().map(|x| 2.0 * x);
        assert_eq!(doubled.to_vec(), vec![2.0, 6.0, 4.0, 8.0]);
    }
}
