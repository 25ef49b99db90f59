//! Borrowed strided views.
//!
//! A view is a window `(sizes, strides, offset)` onto a slice it does not own:
//!
//! - [`ArrayView`]: shared view, `Copy`, usable as a lazy expression leaf
//! - [`ArrayViewMut`]: exclusive view for in-place updates and assignment
//!
//! Geometric transformations (slicing, axis removal, diagonals,
//! permutation) only rewrite the window and never touch the elements.

use std::fmt;
use std::ops::{Index, IndexMut, Range, RangeFull};

use fixnd_traits::{indices, row_major_strides, Indices, MultiIndex};
use num_traits::{One, Zero};

use crate::lazy::{Expr, LazyArray};
use crate::threading::{WorkerSend, WorkerSync};
use crate::{ensure_same_shape, threading, ArrayError, Result};

// ============================================================================
// Slice
// ============================================================================

/// A half-open range `from..to` along one axis.
///
/// Negative bounds count from the end: `-1` stands for the axis length, so
/// [`Slice::full`] is `{ from: 0, to: -1 }`. When `from > to` (after that
/// adjustment) the range is walked backwards, from `from - 1` down to `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Slice {
    pub from: isize,
    pub to: isize,
}

impl Slice {
    pub const fn new(from: isize, to: isize) -> Self {
        Slice { from, to }
    }

    /// The single position `k`.
    pub const fn index(k: usize) -> Self {
        Slice {
            from: k as isize,
            to: k as isize + 1,
        }
    }

    /// The whole axis.
    pub const fn full() -> Self {
        Slice { from: 0, to: -1 }
    }

    /// The whole axis, reversed.
    pub const fn rev() -> Self {
        Slice { from: -1, to: 0 }
    }

    /// Resolve against an axis of length `size`: `(first, len, reversed)`.
    fn resolve(self, size: usize) -> Option<(usize, usize, bool)> {
        let n = size as isize;
        let from = if self.from < 0 { self.from + n + 1 } else { self.from };
        let to = if self.to < 0 { self.to + n + 1 } else { self.to };
        if from < 0 || to < 0 || from > n || to > n {
            return None;
        }
        if to >= from {
            Some((from as usize, (to - from) as usize, false))
        } else {
            Some(((from - 1) as usize, (from - to) as usize, true))
        }
    }
}

impl Default for Slice {
    fn default() -> Self {
        Slice::full()
    }
}

impl From<Range<usize>> for Slice {
    fn from(range: Range<usize>) -> Self {
        Slice::new(range.start as isize, range.end as isize)
    }
}

impl From<RangeFull> for Slice {
    fn from(_: RangeFull) -> Self {
        Slice::full()
    }
}

// ============================================================================
// Layout
// ============================================================================

/// Validate that all accessed offsets stay within `[0, len)`.
fn validate_bounds<const R: usize>(
    len: usize,
    sizes: &[usize; R],
    strides: &[isize; R],
    offset: usize,
) -> Result<()> {
    if sizes.iter().any(|&n| n == 0) {
        return Ok(());
    }
    let base = isize::try_from(offset).map_err(|_| ArrayError::OffsetOverflow)?;
    let mut min_offset = base;
    let mut max_offset = base;
    for (&n, &stride) in sizes.iter().zip(strides) {
        if n > 1 {
            let end = stride
                .checked_mul(n as isize - 1)
                .ok_or(ArrayError::OffsetOverflow)?;
            if end >= 0 {
                max_offset = max_offset
                    .checked_add(end)
                    .ok_or(ArrayError::OffsetOverflow)?;
            } else {
                min_offset = min_offset
                    .checked_add(end)
                    .ok_or(ArrayError::OffsetOverflow)?;
            }
        }
    }
    if min_offset < 0 || max_offset as usize >= len {
        return Err(ArrayError::OffsetOverflow);
    }
    Ok(())
}

/// Window geometry shared by both view types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Layout<const R: usize> {
    pub(crate) sizes: [usize; R],
    pub(crate) strides: [isize; R],
    pub(crate) offset: usize,
}

impl<const R: usize> Layout<R> {
    fn row_major(sizes: [usize; R]) -> Self {
        Layout {
            sizes,
            strides: row_major_strides(&sizes),
            offset: 0,
        }
    }

    #[inline]
    fn len(&self) -> usize {
        self.sizes.product()
    }

    /// Buffer position of an in-bounds index.
    #[inline]
    pub(crate) fn offset_of(&self, index: &[usize; R]) -> usize {
        (self.offset as isize + index.linearize(&self.strides)) as usize
    }

    #[inline]
    fn position(&self, index: &[usize; R]) -> Option<usize> {
        index
            .in_bounds(&self.sizes)
            .then(|| self.offset_of(index))
    }

    #[track_caller]
    fn position_or_panic(&self, index: &[usize; R]) -> usize {
        match self.position(index) {
            Some(i) => i,
            None => panic!("index {:?} out of bounds for sizes {:?}", index, self.sizes),
        }
    }

    /// Buffer range when the window is a non-empty row-major block.
    fn contiguous_range(&self) -> Option<Range<usize>> {
        let len = self.len();
        (len > 0 && self.strides == row_major_strides(&self.sizes))
            .then(|| self.offset..self.offset + len)
    }

    fn check_axis(axis: usize) -> Result<()> {
        if axis >= R {
            return Err(ArrayError::InvalidAxis { axis, rank: R });
        }
        Ok(())
    }

    fn slice(mut self, axis: usize, slice: Slice) -> Result<Self> {
        Self::check_axis(axis)?;
        let size = self.sizes[axis];
        let (first, len, reversed) =
            slice
                .resolve(size)
                .ok_or(ArrayError::SliceOutOfBounds {
                    axis,
                    from: slice.from,
                    to: slice.to,
                    size,
                })?;
        let stride = self.strides[axis];
        if len > 0 {
            self.offset = (self.offset as isize + first as isize * stride) as usize;
        }
        self.sizes[axis] = len;
        if reversed {
            self.strides[axis] = -stride;
        }
        Ok(self)
    }

    fn remove_axis<const Q: usize>(self, axis: usize, k: usize) -> Result<Layout<Q>> {
        debug_assert_eq!(Q + 1, R);
        Self::check_axis(axis)?;
        if k >= self.sizes[axis] {
            return Err(ArrayError::IndexOutOfBounds {
                index: vec![k],
                sizes: vec![self.sizes[axis]],
            });
        }
        let skip = |i: usize| if i < axis { i } else { i + 1 };
        Ok(Layout {
            sizes: std::array::from_fn(|i| self.sizes[skip(i)]),
            strides: std::array::from_fn(|i| self.strides[skip(i)]),
            offset: (self.offset as isize + k as isize * self.strides[axis]) as usize,
        })
    }

    /// Output axis `d` takes input axis `perm[d]`.
    fn permute(self, perm: [usize; R]) -> Result<Self> {
        let mut seen = [false; R];
        for &p in &perm {
            if p >= R || seen[p] {
                return Err(ArrayError::InvalidPermutation(perm.to_vec()));
            }
            seen[p] = true;
        }
        Ok(Layout {
            sizes: perm.map(|p| self.sizes[p]),
            strides: perm.map(|p| self.strides[p]),
            offset: self.offset,
        })
    }
}

impl Layout<2> {
    /// Diagonal `p`: `p > 0` starts `p` rows down, `p < 0` starts `-p`
    /// columns right. Out-of-range diagonals are empty.
    fn diag(self, p: isize) -> Layout<1> {
        let [n0, n1] = self.sizes;
        let [s0, s1] = self.strides;
        let (skip, along, across, step) = if p >= 0 {
            (p.unsigned_abs(), n0, n1, s0)
        } else {
            (p.unsigned_abs(), n1, n0, s1)
        };
        let len = along.saturating_sub(skip).min(across);
        let offset = if len > 0 {
            (self.offset as isize + skip as isize * step) as usize
        } else {
            self.offset
        };
        Layout {
            sizes: [len],
            strides: [s0 + s1],
            offset,
        }
    }

    fn transpose(self) -> Self {
        let [n0, n1] = self.sizes;
        let [s0, s1] = self.strides;
        Layout {
            sizes: [n1, n0],
            strides: [s1, s0],
            offset: self.offset,
        }
    }
}

fn unwrap_or_panic<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{err}"),
    }
}

// ============================================================================
// ArrayView
// ============================================================================

/// Shared strided view over a borrowed slice.
pub struct ArrayView<'a, T, const R: usize> {
    data: &'a [T],
    layout: Layout<R>,
}

impl<T, const R: usize> Clone for ArrayView<'_, T, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const R: usize> Copy for ArrayView<'_, T, R> {}

impl<T, const R: usize> fmt::Debug for ArrayView<'_, T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayView")
            .field("sizes", &self.layout.sizes)
            .field("strides", &self.layout.strides)
            .field("offset", &self.layout.offset)
            .finish()
    }
}

impl<'a, T, const R: usize> ArrayView<'a, T, R> {
    /// Row-major view covering the whole of `data`.
    ///
    /// # Errors
    /// Returns [`ArrayError::LengthMismatch`] unless `data.len()` equals the
    /// product of `sizes`.
    pub fn new(data: &'a [T], sizes: [usize; R]) -> Result<Self> {
        let expected = sizes.product();
        if data.len() != expected {
            return Err(ArrayError::LengthMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self::from_layout(data, Layout::row_major(sizes)))
    }

    /// View with explicit element strides starting at `offset`.
    ///
    /// # Errors
    /// Returns [`ArrayError::OffsetOverflow`] if any reachable position lies
    /// outside `data`.
    pub fn with_strides(
        data: &'a [T],
        sizes: [usize; R],
        strides: [isize; R],
        offset: usize,
    ) -> Result<Self> {
        validate_bounds(data.len(), &sizes, &strides, offset)?;
        Ok(Self::from_parts(data, sizes, strides, offset))
    }

    #[inline]
    pub(crate) fn from_parts(
        data: &'a [T],
        sizes: [usize; R],
        strides: [isize; R],
        offset: usize,
    ) -> Self {
        Self::from_layout(
            data,
            Layout {
                sizes,
                strides,
                offset,
            },
        )
    }

    #[inline]
    fn from_layout(data: &'a [T], layout: Layout<R>) -> Self {
        ArrayView { data, layout }
    }

    #[inline]
    pub fn sizes(&self) -> [usize; R] {
        self.layout.sizes
    }

    #[inline]
    pub fn strides(&self) -> [isize; R] {
        self.layout.strides
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.layout.offset
    }

    #[inline]
    pub fn rank(&self) -> usize {
        R
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.layout.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn get(&self, index: [usize; R]) -> Option<&'a T> {
        self.layout.position(&index).map(|i| &self.data[i])
    }

    /// Element at an in-bounds index.
    #[inline]
    pub(crate) fn at(&self, index: &[usize; R]) -> &'a T {
        &self.data[self.layout.offset_of(index)]
    }

    /// Elements in row-major order of the view.
    pub fn iter(&self) -> Iter<'a, T, R> {
        Iter {
            data: self.data,
            layout: self.layout,
            indices: indices(self.layout.sizes),
        }
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Use the view as the leaf of a lazy expression.
    pub fn lazy(self) -> LazyArray<Self, R>
    where
        T: Clone,
    {
        LazyArray::new(self, self.layout.sizes)
    }

    /// Restrict one axis.
    ///
    /// # Panics
    /// Panics if `axis` is invalid or the slice falls outside the axis.
    #[track_caller]
    pub fn slice(self, axis: usize, slice: impl Into<Slice>) -> Self {
        unwrap_or_panic(self.try_slice(axis, slice))
    }

    pub fn try_slice(self, axis: usize, slice: impl Into<Slice>) -> Result<Self> {
        let layout = self.layout.slice(axis, slice.into())?;
        Ok(Self::from_layout(self.data, layout))
    }

    /// Reorder axes: output axis `d` is input axis `perm[d]`.
    pub fn permute(self, perm: [usize; R]) -> Result<Self> {
        let layout = self.layout.permute(perm)?;
        Ok(Self::from_layout(self.data, layout))
    }

    pub fn sum(&self) -> T
    where
        T: Clone + Zero,
    {
        self.iter().cloned().fold(T::zero(), |acc, x| acc + x)
    }

    pub fn prod(&self) -> T
    where
        T: Clone + One,
    {
        self.iter().cloned().fold(T::one(), |acc, x| acc * x)
    }
}

impl<const R: usize> ArrayView<'_, bool, R> {
    pub fn any(&self) -> bool {
        self.iter().any(|&b| b)
    }

    pub fn all(&self) -> bool {
        self.iter().all(|&b| b)
    }
}

impl<'a, T> ArrayView<'a, T, 2> {
    /// Diagonal `p` (see [`ArrayViewMut::diag`]).
    pub fn diag(self, p: isize) -> ArrayView<'a, T, 1> {
        ArrayView::from_layout(self.data, self.layout.diag(p))
    }

    pub fn transpose(self) -> Self {
        Self::from_layout(self.data, self.layout.transpose())
    }

    /// Sum of the main diagonal.
    pub fn trace(&self) -> T
    where
        T: Clone + Zero,
    {
        self.diag(0).sum()
    }
}

impl<T, const R: usize> Index<[usize; R]> for ArrayView<'_, T, R> {
    type Output = T;

    #[track_caller]
    #[inline]
    fn index(&self, index: [usize; R]) -> &T {
        &self.data[self.layout.position_or_panic(&index)]
    }
}

/// Row-major iterator over the elements of an [`ArrayView`].
#[derive(Clone, Debug)]
pub struct Iter<'a, T, const R: usize> {
    data: &'a [T],
    layout: Layout<R>,
    indices: Indices<[usize; R]>,
}

impl<'a, T, const R: usize> Iterator for Iter<'a, T, R> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        let index = self.indices.next()?;
        Some(&self.data[self.layout.offset_of(&index)])
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl<T, const R: usize> ExactSizeIterator for Iter<'_, T, R> {}

impl<'a, T, const R: usize> IntoIterator for ArrayView<'a, T, R> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// ArrayViewMut
// ============================================================================

/// Exclusive strided view over a borrowed slice.
pub struct ArrayViewMut<'a, T, const R: usize> {
    data: &'a mut [T],
    layout: Layout<R>,
}

impl<T, const R: usize> fmt::Debug for ArrayViewMut<'_, T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayViewMut")
            .field("sizes", &self.layout.sizes)
            .field("strides", &self.layout.strides)
            .field("offset", &self.layout.offset)
            .finish()
    }
}

impl<'a, T, const R: usize> ArrayViewMut<'a, T, R> {
    /// Row-major view covering the whole of `data`.
    pub fn new(data: &'a mut [T], sizes: [usize; R]) -> Result<Self> {
        let expected = sizes.product();
        if data.len() != expected {
            return Err(ArrayError::LengthMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self::from_layout(data, Layout::row_major(sizes)))
    }

    /// View with explicit element strides starting at `offset`.
    ///
    /// Strides that alias (two indices reaching the same position) are
    /// accepted; writes through such a view land on the shared element.
    pub fn with_strides(
        data: &'a mut [T],
        sizes: [usize; R],
        strides: [isize; R],
        offset: usize,
    ) -> Result<Self> {
        validate_bounds(data.len(), &sizes, &strides, offset)?;
        Ok(Self::from_parts(data, sizes, strides, offset))
    }

    #[inline]
    pub(crate) fn from_parts(
        data: &'a mut [T],
        sizes: [usize; R],
        strides: [isize; R],
        offset: usize,
    ) -> Self {
        Self::from_layout(
            data,
            Layout {
                sizes,
                strides,
                offset,
            },
        )
    }

    #[inline]
    fn from_layout(data: &'a mut [T], layout: Layout<R>) -> Self {
        ArrayViewMut { data, layout }
    }

    #[inline]
    pub fn sizes(&self) -> [usize; R] {
        self.layout.sizes
    }

    #[inline]
    pub fn strides(&self) -> [isize; R] {
        self.layout.strides
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.layout.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn get(&self, index: [usize; R]) -> Option<&T> {
        self.layout.position(&index).map(|i| &self.data[i])
    }

    #[inline]
    pub fn get_mut(&mut self, index: [usize; R]) -> Option<&mut T> {
        self.layout.position(&index).map(move |i| &mut self.data[i])
    }

    /// Shared view of the same window.
    pub fn view(&self) -> ArrayView<'_, T, R> {
        ArrayView::from_layout(self.data, self.layout)
    }

    /// Shorter-lived exclusive view of the same window.
    pub fn reborrow(&mut self) -> ArrayViewMut<'_, T, R> {
        ArrayViewMut::from_layout(self.data, self.layout)
    }

    #[track_caller]
    pub fn slice(self, axis: usize, slice: impl Into<Slice>) -> Self {
        unwrap_or_panic(self.try_slice(axis, slice))
    }

    pub fn try_slice(self, axis: usize, slice: impl Into<Slice>) -> Result<Self> {
        let layout = self.layout.slice(axis, slice.into())?;
        Ok(Self::from_layout(self.data, layout))
    }

    pub fn permute(self, perm: [usize; R]) -> Result<Self> {
        let layout = self.layout.permute(perm)?;
        Ok(Self::from_layout(self.data, layout))
    }

    /// Visit every element of the window in row-major order.
    pub fn for_each_mut(&mut self, mut f: impl FnMut(&mut T)) {
        for index in indices(self.layout.sizes) {
            f(&mut self.data[self.layout.offset_of(&index)]);
        }
    }

    /// Visit every element together with its multi-index.
    pub(crate) fn for_each_indexed(&mut self, mut f: impl FnMut([usize; R], &mut T)) {
        for index in indices(self.layout.sizes) {
            f(index, &mut self.data[self.layout.offset_of(&index)]);
        }
    }

    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.for_each_mut(|x| *x = value.clone());
    }

    /// Materialize `src` into the window.
    ///
    /// # Panics
    /// Panics if the sizes differ.
    #[track_caller]
    pub fn assign<E>(&mut self, src: LazyArray<E, R>)
    where
        E: Expr<R, Item = T> + WorkerSync,
        T: WorkerSend,
    {
        unwrap_or_panic(self.try_assign(src))
    }

    pub fn try_assign<E>(&mut self, src: LazyArray<E, R>) -> Result<()>
    where
        E: Expr<R, Item = T> + WorkerSync,
        T: WorkerSend,
    {
        ensure_same_shape(&self.layout.sizes, &src.sizes())?;
        match self.layout.contiguous_range() {
            Some(range) => {
                threading::write_indexed(&mut self.data[range], self.layout.sizes, |k| {
                    src.eval(k)
                });
            }
            None => {
                log::trace!("assign: strided window {:?}", self.layout);
                self.for_each_indexed(|k, x| *x = src.eval(k));
            }
        }
        Ok(())
    }
}

impl<'a, T> ArrayViewMut<'a, T, 2> {
    /// Diagonal `p`: `p > 0` starts `p` rows below the main diagonal,
    /// `p < 0` starts `-p` columns right of it. A diagonal outside the
    /// matrix is empty.
    pub fn diag(self, p: isize) -> ArrayViewMut<'a, T, 1> {
        ArrayViewMut::from_layout(self.data, self.layout.diag(p))
    }

    pub fn transpose(self) -> Self {
        Self::from_layout(self.data, self.layout.transpose())
    }

    /// Exchange rows `i` and `j`.
    #[track_caller]
    pub fn swap_rows(&mut self, i: usize, j: usize) {
        let [rows, cols] = self.layout.sizes;
        assert!(i < rows && j < rows, "row out of bounds for {rows} rows");
        for c in 0..cols {
            let a = self.layout.offset_of(&[i, c]);
            let b = self.layout.offset_of(&[j, c]);
            self.data.swap(a, b);
        }
    }

    /// Exchange columns `i` and `j`.
    #[track_caller]
    pub fn swap_cols(&mut self, i: usize, j: usize) {
        let [rows, cols] = self.layout.sizes;
        assert!(i < cols && j < cols, "column out of bounds for {cols} columns");
        for r in 0..rows {
            let a = self.layout.offset_of(&[r, i]);
            let b = self.layout.offset_of(&[r, j]);
            self.data.swap(a, b);
        }
    }
}

impl<T, const R: usize> Index<[usize; R]> for ArrayViewMut<'_, T, R> {
    type Output = T;

    #[track_caller]
    #[inline]
    fn index(&self, index: [usize; R]) -> &T {
        &self.data[self.layout.position_or_panic(&index)]
    }
}

impl<T, const R: usize> IndexMut<[usize; R]> for ArrayViewMut<'_, T, R> {
    #[track_caller]
    #[inline]
    fn index_mut(&mut self, index: [usize; R]) -> &mut T {
        let i = self.layout.position_or_panic(&index);
        &mut self.data[i]
    }
}

// ============================================================================
// Rank-reducing operations
// ============================================================================

macro_rules! rank_reducing {
    ($view:ident: $($r:literal => $q:literal),*) => {$(
        impl<'a, T> $view<'a, T, $r> {
            /// Fix `axis` at position `k`, dropping that axis.
            ///
            /// # Panics
            /// Panics if `axis` or `k` is out of range.
            #[track_caller]
            pub fn index_axis(self, axis: usize, k: usize) -> $view<'a, T, $q> {
                unwrap_or_panic(self.try_index_axis(axis, k))
            }

            pub fn try_index_axis(self, axis: usize, k: usize) -> Result<$view<'a, T, $q>> {
                let layout = self.layout.remove_axis(axis, k)?;
                Ok($view::from_layout(self.data, layout))
            }
        }
    )*};
}

rank_reducing!(ArrayView: 2 => 1, 3 => 2, 4 => 3);
rank_reducing!(ArrayViewMut: 2 => 1, 3 => 2, 4 => 3);

macro_rules! rows_and_cols {
    ($($view:ident),*) => {$(
        impl<'a, T> $view<'a, T, 2> {
            #[track_caller]
            pub fn row(self, i: usize) -> $view<'a, T, 1> {
                self.index_axis(0, i)
            }

            #[track_caller]
            pub fn col(self, j: usize) -> $view<'a, T, 1> {
                self.index_axis(1, j)
            }
        }
    )*};
}

rows_and_cols!(ArrayView, ArrayViewMut);

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Vec<i32> {
        (0..12).collect()
    }

    #[test]
    fn test_new_checks_length() {
        let data = grid();
        assert!(ArrayView::new(&data, [3, 4]).is_ok());
        assert_eq!(
            ArrayView::new(&data, [5, 4]).unwrap_err(),
            ArrayError::LengthMismatch {
                expected: 20,
                got: 12
            }
        );
    }

    #[test]
    fn test_with_strides_bounds() {
        let data = grid();
        let v = ArrayView::with_strides(&data, [4, 3], [1, 4], 0).unwrap();
        assert_eq!(v[[1, 2]], 9);
        assert!(ArrayView::with_strides(&data, [4, 4], [1, 4], 0).is_err());
        // reversed axis starting at the last element
        let r = ArrayView::with_strides(&data, [12], [-1], 11).unwrap();
        assert_eq!(r[[0]], 11);
        assert_eq!(
            ArrayView::with_strides(&data, [13], [-1], 11).unwrap_err(),
            ArrayError::OffsetOverflow
        );
    }

    #[test]
    fn test_slice_forward_and_negative() {
        let data = grid();
        let v = ArrayView::new(&data, [3, 4]).unwrap();
        let s = v.slice(1, Slice::new(1, 3));
        assert_eq!(s.sizes(), [3, 2]);
        assert_eq!(s.to_vec(), vec![1, 2, 5, 6, 9, 10]);
        // -1 is the axis length, -2 the last element
        let tail = v.slice(1, Slice::new(-2, -1));
        assert_eq!(tail.to_vec(), vec![3, 7, 11]);
        assert_eq!(v.slice(0, 1usize..2).to_vec(), vec![4, 5, 6, 7]);
        assert_eq!(v.slice(0, ..).len(), 12);
    }

    #[test]
    fn test_slice_reversed() {
        let data = grid();
        let v = ArrayView::new(&data, [3, 4]).unwrap();
        let r = v.slice(0, Slice::rev());
        assert_eq!(r.row(0).to_vec(), vec![8, 9, 10, 11]);
        assert_eq!(r.strides(), [-4, 1]);
        let part = v.slice(1, Slice::new(3, 1));
        assert_eq!(part.row(0).to_vec(), vec![2, 1]);
    }

    #[test]
    fn test_reversed_negative_slice_of_slice() {
        let data = grid();
        let v = ArrayView::new(&data, [3, 4]).unwrap();
        let window = v.slice(1, Slice::new(1, 4));
        assert_eq!(window.sizes(), [3, 3]);
        let back = window.slice(1, Slice::new(-1, -3));
        assert_eq!(back.sizes(), [3, 2]);
        assert_eq!(back.strides(), [4, -1]);
        assert_eq!(back.to_vec(), vec![3, 2, 7, 6, 11, 10]);
        assert_eq!(window.slice(1, Slice::new(-1, 0)).row(2).to_vec(), vec![11, 10, 9]);
        // reversing a reversed axis restores the forward stride
        let flipped = v.slice(0, Slice::rev()).slice(0, Slice::new(-1, -3));
        assert_eq!(flipped.strides(), [4, 1]);
        assert_eq!(flipped.col(0).to_vec(), vec![0, 4]);
        assert!(window.try_slice(1, Slice::new(-5, 0)).is_err());
    }

    #[test]
    fn test_slice_errors() {
        let data = grid();
        let v = ArrayView::new(&data, [3, 4]).unwrap();
        assert_eq!(
            v.try_slice(1, Slice::new(0, 5)).unwrap_err(),
            ArrayError::SliceOutOfBounds {
                axis: 1,
                from: 0,
                to: 5,
                size: 4
            }
        );
        assert_eq!(
            v.try_slice(2, Slice::full()).unwrap_err(),
            ArrayError::InvalidAxis { axis: 2, rank: 2 }
        );
        let empty = v.slice(1, Slice::new(4, 4));
        assert!(empty.is_empty());
        assert_eq!(empty.iter().count(), 0);
    }

    #[test]
    #[should_panic(expected = "slice 0..9 out of bounds")]
    fn test_slice_panics() {
        let data = grid();
        let v = ArrayView::new(&data, [3, 4]).unwrap();
        let _ = v.slice(0, Slice::new(0, 9));
    }

    #[test]
    fn test_index_axis_rows_cols() {
        let data = grid();
        let v = ArrayView::new(&data, [2, 2, 3]).unwrap();
        let m = v.index_axis(1, 1);
        assert_eq!(m.sizes(), [2, 3]);
        assert_eq!(m.to_vec(), vec![3, 4, 5, 9, 10, 11]);
        assert_eq!(m.col(2).to_vec(), vec![5, 11]);
        assert!(v.try_index_axis(2, 3).is_err());
    }

    #[test]
    fn test_diag() {
        let data = grid();
        let v = ArrayView::new(&data, [3, 4]).unwrap();
        assert_eq!(v.diag(0).to_vec(), vec![0, 5, 10]);
        assert_eq!(v.diag(1).to_vec(), vec![4, 9]);
        assert_eq!(v.diag(-1).to_vec(), vec![1, 6, 11]);
        assert_eq!(v.diag(-3).to_vec(), vec![3]);
        assert!(v.diag(3).is_empty());
        assert!(v.diag(-4).is_empty());
        assert_eq!(v.trace(), 15);
    }

    #[test]
    fn test_permute_and_transpose() {
        let data = grid();
        let v = ArrayView::new(&data, [2, 3, 2]).unwrap();
        let p = v.permute([2, 0, 1]).unwrap();
        assert_eq!(p.sizes(), [2, 2, 3]);
        assert_eq!(p[[1, 0, 2]], v[[0, 2, 1]]);
        assert_eq!(
            v.permute([0, 0, 1]).unwrap_err(),
            ArrayError::InvalidPermutation(vec![0, 0, 1])
        );
        let m = ArrayView::new(&data, [3, 4]).unwrap();
        assert_eq!(m.transpose()[[3, 1]], 7);
    }

    #[test]
    fn test_reductions() {
        let data = [1.0, 2.0, 3.0, 4.0];
        let v = ArrayView::new(&data, [2, 2]).unwrap();
        assert_eq!(v.sum(), 10.0);
        assert_eq!(v.prod(), 24.0);
        let flags = [true, false];
        let b = ArrayView::new(&flags, [2]).unwrap();
        assert!(b.any());
        assert!(!b.all());
    }

    #[test]
    fn test_mut_fill_and_swap() {
        let mut data = grid();
        {
            let mut v = ArrayViewMut::new(&mut data, [3, 4]).unwrap();
            v.reborrow().col(0).fill(-1);
            v.swap_rows(0, 2);
            v.swap_cols(1, 3);
            v[[1, 1]] = 100;
        }
        assert_eq!(data, vec![-1, 11, 10, 9, -1, 100, 6, 5, -1, 3, 2, 1]);
    }

    #[test]
    fn test_assign_strided_and_contiguous() {
        let mut data = vec![0; 6];
        let mut v = ArrayViewMut::new(&mut data, [2, 3]).unwrap();
        v.assign(LazyArray::from_fn([2, 3], |[i, j]| (10 * i + j) as i32));
        v.reborrow()
            .transpose()
            .assign(LazyArray::from_fn([3, 2], |[i, _]| i as i32));
        assert_eq!(data, vec![0, 1, 2, 0, 1, 2]);
    }

    #[test]
    fn test_try_assign_shape_mismatch() {
        let mut data = vec![0.0; 6];
        let mut v = ArrayViewMut::new(&mut data, [2, 3]).unwrap();
        let err = v
            .try_assign(LazyArray::constant([3, 2], 1.0))
            .unwrap_err();
        assert_eq!(err, ArrayError::ShapeMismatch(vec![2, 3], vec![3, 2]));
    }
}
