//! Owned fixed-shape arrays.

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

use fixnd_traits::op::{BinaryOp, TernaryOp, UnaryOp};
use fixnd_traits::{indices, row_major_strides, Ix1, Ix2, MultiIndex, Shape};

use crate::lazy::LazyArray;
use crate::view::{ArrayView, ArrayViewMut};
use crate::{ArrayError, Result};

/// An owned array whose shape is fixed at the type level.
///
/// Elements are stored contiguously in row-major order (last axis
/// fastest). Two arrays combined by an operator must share the shape type,
/// so mismatched shapes are rejected by the compiler.
///
/// # Example
/// ```
/// use fixnd_array::Array;
/// use fixnd_traits::Ix2;
///
/// let m: Array<i32, Ix2<2, 3>> = Array::from_fn(|[i, j]| (10 * i + j) as i32);
/// assert_eq!(m[[1, 2]], 12);
/// assert_eq!(m.as_slice(), &[0, 1, 2, 10, 11, 12]);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Array<T, S: Shape> {
    data: Vec<T>,
    _shape: PhantomData<S>,
}

impl<T, S: Shape> Array<T, S> {
    /// Wrap a buffer that is known to hold exactly `S::LEN` elements.
    #[inline]
    pub(crate) fn from_vec_unchecked(data: Vec<T>) -> Self {
        debug_assert_eq!(data.len(), S::LEN);
        Array {
            data,
            _shape: PhantomData,
        }
    }

    /// Build from a row-major buffer.
    ///
    /// # Errors
    /// Returns [`ArrayError::LengthMismatch`] unless `data.len() == S::LEN`.
    pub fn from_vec(data: Vec<T>) -> Result<Self> {
        if data.len() != S::LEN {
            return Err(ArrayError::LengthMismatch {
                expected: S::LEN,
                got: data.len(),
            });
        }
        Ok(Self::from_vec_unchecked(data))
    }

    /// Build by evaluating `f` at every multi-index, in row-major order.
    ///
    /// The index is a plain `[usize; R]`, so closures can destructure it
    /// (`|[i, j]| ...`) before the shape type is known.
    pub fn from_fn<const R: usize>(f: impl FnMut([usize; R]) -> T) -> Self
    where
        S: Shape<Index = [usize; R]>,
    {
        Self::from_vec_unchecked(indices(S::sizes()).map(f).collect())
    }

    /// Fill every position with a copy of `value`.
    pub fn from_elem(value: T) -> Self
    where
        T: Clone,
    {
        Self::from_vec_unchecked(vec![value; S::LEN])
    }

    /// Extent of each axis.
    #[inline]
    pub fn sizes(&self) -> S::Index {
        S::sizes()
    }

    /// Number of axes.
    #[inline]
    pub fn rank(&self) -> usize {
        S::RANK
    }

    /// Total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        S::LEN
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        S::LEN == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Elements in row-major order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    /// Element at `index`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, index: S::Index) -> Option<&T> {
        index.offset_in(&S::sizes()).map(|i| &self.data[i])
    }

    #[inline]
    pub fn get_mut(&mut self, index: S::Index) -> Option<&mut T> {
        index.offset_in(&S::sizes()).map(move |i| &mut self.data[i])
    }

    /// Unary plus: an elementwise copy.
    pub fn pos(&self) -> Self
    where
        T: Clone,
    {
        self.clone()
    }

    /// Apply `f` to every element, producing a new array of the same shape.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Array<U, S> {
        Array::from_vec_unchecked(self.data.iter().map(f).collect())
    }

    /// Update every element in place.
    pub fn map_inplace(&mut self, f: impl FnMut(&mut T)) {
        self.data.iter_mut().for_each(f);
    }

    /// Apply an operator identity to every element.
    pub fn apply<O: UnaryOp<T>>(&self, op: O) -> Array<O::Output, S>
    where
        T: Clone,
    {
        self.map(|x| op.apply(x.clone()))
    }

    /// Combine with another array of the same shape position by position.
    pub fn zip_with<U, V>(
        &self,
        other: &Array<U, S>,
        mut f: impl FnMut(&T, &U) -> V,
    ) -> Array<V, S> {
        Array::from_vec_unchecked(
            self.data
                .iter()
                .zip(other.data.iter())
                .map(|(a, b)| f(a, b))
                .collect(),
        )
    }

    /// Binary operator identity applied position by position.
    pub fn zip_apply<U, O>(&self, other: &Array<U, S>, op: O) -> Array<O::Output, S>
    where
        T: Clone,
        U: Clone,
        O: BinaryOp<T, U>,
    {
        self.zip_with(other, |a, b| op.apply(a.clone(), b.clone()))
    }

    /// Ternary operator identity applied position by position.
    pub fn zip3_apply<U, V, O>(
        &self,
        b: &Array<U, S>,
        c: &Array<V, S>,
        op: O,
    ) -> Array<O::Output, S>
    where
        T: Clone,
        U: Clone,
        V: Clone,
        O: TernaryOp<T, U, V>,
    {
        Array::from_vec_unchecked(
            self.data
                .iter()
                .zip(b.data.iter())
                .zip(c.data.iter())
                .map(|((x, y), z)| op.apply(x.clone(), y.clone(), z.clone()))
                .collect(),
        )
    }

    /// Mutate each element together with the matching element of `other`.
    pub fn zip_mut_with<U>(&mut self, other: &Array<U, S>, mut f: impl FnMut(&mut T, &U)) {
        self.data
            .iter_mut()
            .zip(other.data.iter())
            .for_each(|(a, b)| f(a, b));
    }

    /// Reinterpret the row-major buffer under another shape with the same
    /// number of elements.
    ///
    /// # Errors
    /// Returns [`ArrayError::LengthMismatch`] if the lengths differ.
    pub fn try_reshape<S2: Shape>(self) -> Result<Array<T, S2>> {
        Array::from_vec(self.data)
    }

    /// Panicking form of [`try_reshape`](Self::try_reshape).
    #[track_caller]
    pub fn reshape<S2: Shape>(self) -> Array<T, S2> {
        match self.try_reshape() {
            Ok(reshaped) => reshaped,
            Err(err) => panic!("{err}"),
        }
    }

    /// Borrow as a strided view.
    pub fn view<const R: usize>(&self) -> ArrayView<'_, T, R>
    where
        S: Shape<Index = [usize; R]>,
    {
        let sizes = S::sizes();
        ArrayView::from_parts(&self.data, sizes, row_major_strides(&sizes), 0)
    }

    /// Borrow as a mutable strided view.
    pub fn view_mut<const R: usize>(&mut self) -> ArrayViewMut<'_, T, R>
    where
        S: Shape<Index = [usize; R]>,
    {
        let sizes = S::sizes();
        ArrayViewMut::from_parts(&mut self.data, sizes, row_major_strides(&sizes), 0)
    }

    /// Borrow as a lazy array, for building deferred expressions.
    pub fn lazy<const R: usize>(&self) -> LazyArray<ArrayView<'_, T, R>, R>
    where
        S: Shape<Index = [usize; R]>,
        T: Clone,
    {
        self.view().lazy()
    }
}

impl<A, B, S: Shape> Array<(A, B), S> {
    /// Split an array of pairs into a pair of arrays.
    pub fn unzip(self) -> (Array<A, S>, Array<B, S>) {
        let (a, b): (Vec<A>, Vec<B>) = self.data.into_iter().unzip();
        (Array::from_vec_unchecked(a), Array::from_vec_unchecked(b))
    }
}

impl<T: Default, S: Shape> Default for Array<T, S> {
    fn default() -> Self {
        Self::from_vec_unchecked(std::iter::repeat_with(T::default).take(S::LEN).collect())
    }
}

impl<T: fmt::Debug, S: Shape> fmt::Debug for Array<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Array")
            .field("sizes", &S::sizes())
            .field("data", &self.data)
            .finish()
    }
}

impl<T, S, const R: usize> Index<[usize; R]> for Array<T, S>
where
    S: Shape<Index = [usize; R]>,
{
    type Output = T;

    #[track_caller]
    #[inline]
    fn index(&self, index: [usize; R]) -> &T {
        match index.offset_in(&S::sizes()) {
            Some(i) => &self.data[i],
            None => panic!("index {:?} out of bounds for shape {:?}", index, S::sizes()),
        }
    }
}

impl<T, S, const R: usize> IndexMut<[usize; R]> for Array<T, S>
where
    S: Shape<Index = [usize; R]>,
{
    #[track_caller]
    #[inline]
    fn index_mut(&mut self, index: [usize; R]) -> &mut T {
        match index.offset_in(&S::sizes()) {
            Some(i) => &mut self.data[i],
            None => panic!("index {:?} out of bounds for shape {:?}", index, S::sizes()),
        }
    }
}

impl<T, const N: usize> From<[T; N]> for Array<T, Ix1<N>> {
    fn from(values: [T; N]) -> Self {
        Self::from_vec_unchecked(Vec::from(values))
    }
}

impl<T, const M: usize, const N: usize> From<[[T; N]; M]> for Array<T, Ix2<M, N>> {
    fn from(rows: [[T; N]; M]) -> Self {
        Self::from_vec_unchecked(rows.into_iter().flatten().collect())
    }
}

impl<T, S: Shape> TryFrom<Vec<T>> for Array<T, S> {
    type Error = ArrayError;

    fn try_from(data: Vec<T>) -> Result<Self> {
        Self::from_vec(data)
    }
}

impl<T: Clone, S: Shape> TryFrom<&[T]> for Array<T, S> {
    type Error = ArrayError;

    fn try_from(data: &[T]) -> Result<Self> {
        Self::from_vec(data.to_vec())
    }
}

impl<T, S: Shape> IntoIterator for Array<T, S> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T, S: Shape> IntoIterator for &'a Array<T, S> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixnd_traits::Ix3;

    #[test]
    fn test_from_fn_row_major() {
        let a: Array<usize, Ix3<2, 2, 3>> = Array::from_fn(|[i, j, k]| 100 * i + 10 * j + k);
        assert_eq!(a[[0, 0, 0]], 0);
        assert_eq!(a[[1, 0, 2]], 102);
        assert_eq!(a.as_slice()[3], 10);
        assert_eq!(a.len(), 12);
        assert_eq!(a.rank(), 3);
    }

    #[test]
    fn test_from_vec_length_checked() {
        let ok: Result<Array<i32, Ix2<2, 2>>> = Array::from_vec(vec![1, 2, 3, 4]);
        assert!(ok.is_ok());
        let err: Result<Array<i32, Ix2<2, 2>>> = Array::try_from(&[1, 2, 3][..]);
        assert_eq!(
            err,
            Err(ArrayError::LengthMismatch {
                expected: 4,
                got: 3
            })
        );
    }

    #[test]
    fn test_from_fn_destructures_before_shape_is_known() {
        let m = Array::from_fn(|[i, j]| (i * 10 + j) as i32);
        let fixed: Array<i32, Ix2<2, 3>> = m;
        assert_eq!(fixed.as_slice(), &[0, 1, 2, 10, 11, 12]);
        let filled = Array::from_fn(|_| 1u8);
        let ones: Array<u8, Ix3<1, 2, 1>> = filled;
        assert_eq!(ones.as_slice(), &[1, 1]);
    }

    #[test]
    fn test_from_nested_arrays() {
        let m: Array<i32, Ix2<2, 3>> = Array::from([[1, 2, 3], [4, 5, 6]]);
        assert_eq!(m.sizes(), [2, 3]);
        assert_eq!(m[[1, 0]], 4);
    }

    #[test]
    fn test_default_and_from_elem() {
        let z: Array<f64, Ix1<3>> = Array::default();
        assert_eq!(z.as_slice(), &[0.0; 3]);
        let o: Array<u8, Ix2<2, 2>> = Array::from_elem(7);
        assert!(o.iter().all(|&x| x == 7));
    }

    #[test]
    fn test_get_out_of_bounds() {
        let m: Array<i32, Ix2<2, 2>> = Array::from([[1, 2], [3, 4]]);
        assert_eq!(m.get([1, 1]), Some(&4));
        assert_eq!(m.get([2, 0]), None);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_index_out_of_bounds_panics() {
        let m = Array::from([1, 2, 3]);
        let _ = m[[3]];
    }

    #[test]
    fn test_reshape() {
        let a = Array::from([1, 2, 3, 4, 5, 6]);
        let m: Array<i32, Ix2<2, 3>> = a.clone().reshape();
        assert_eq!(m[[1, 0]], 4);
        assert!(a.try_reshape::<Ix2<2, 2>>().is_err());
    }

    #[test]
    fn test_unzip_and_map() {
        let a = Array::from([1.5f64, -2.25]);
        let (int, frac) = a.map(|&x| (x.trunc(), x.fract())).unzip();
        assert_eq!(int.as_slice(), &[1.0, -2.0]);
        assert_eq!(frac.as_slice(), &[0.5, -0.25]);
    }

    #[test]
    fn test_views_cover_storage() {
        let mut m: Array<i32, Ix2<2, 2>> = Array::from([[1, 2], [3, 4]]);
        assert_eq!(m.view().to_vec(), vec![1, 2, 3, 4]);
        m.view_mut().fill(9);
        assert_eq!(m.as_slice(), &[9; 4]);
    }
}
