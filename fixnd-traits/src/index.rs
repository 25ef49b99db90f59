//! Multi-index arithmetic.
//!
//! Every array-like type in fixnd addresses elements with a `[usize; R]`
//! multi-index. Iteration is always row-major: the last axis varies fastest.

use std::fmt::Debug;

/// A fixed-rank multi-index.
///
/// Implemented for `[usize; R]`; the provided methods operate through the
/// slice views so the rank never has to be spelled out.
pub trait MultiIndex:
    Copy + Debug + PartialEq + AsRef<[usize]> + AsMut<[usize]> + Send + Sync + 'static
{
    /// The all-zero index.
    fn zeros() -> Self;

    /// Total number of elements addressed by `self` used as a size vector.
    #[inline]
    fn product(&self) -> usize {
        self.as_ref().iter().product()
    }

    /// Advance to the next row-major position inside `sizes`.
    ///
    /// Returns `false` once the index wraps back around to zero.
    #[inline]
    fn increment(&mut self, sizes: &Self) -> bool {
        let sizes = sizes.as_ref();
        let index = self.as_mut();
        for d in (0..index.len()).rev() {
            index[d] += 1;
            if index[d] < sizes[d] {
                return true;
            }
            index[d] = 0;
        }
        false
    }

    /// Whether every component is below the matching size.
    #[inline]
    fn in_bounds(&self, sizes: &Self) -> bool {
        self.as_ref()
            .iter()
            .zip(sizes.as_ref())
            .all(|(&k, &n)| k < n)
    }

    /// Row-major linear offset, or `None` if the index is out of bounds.
    #[inline]
    fn offset_in(&self, sizes: &Self) -> Option<usize> {
        if !self.in_bounds(sizes) {
            return None;
        }
        let mut offset = 0;
        for (&k, &n) in self.as_ref().iter().zip(sizes.as_ref()) {
            offset = offset * n + k;
        }
        Some(offset)
    }

    /// Offset of this index under explicit element strides.
    #[inline]
    fn linearize(&self, strides: &[isize]) -> isize {
        self.as_ref()
            .iter()
            .zip(strides)
            .map(|(&k, &s)| k as isize * s)
            .sum()
    }

    /// Inverse of [`offset_in`](Self::offset_in) for in-bounds offsets.
    #[inline]
    fn unravel(mut linear: usize, sizes: &Self) -> Self {
        let mut index = Self::zeros();
        let sizes = sizes.as_ref();
        let out = index.as_mut();
        for d in (0..out.len()).rev() {
            if sizes[d] > 0 {
                out[d] = linear % sizes[d];
                linear /= sizes[d];
            }
        }
        index
    }
}

impl<const R: usize> MultiIndex for [usize; R] {
    #[inline]
    fn zeros() -> Self {
        [0; R]
    }
}

/// Compute row-major strides (C default: last index varies fastest).
pub fn row_major_strides<const R: usize>(sizes: &[usize; R]) -> [isize; R] {
    let mut strides = [1isize; R];
    for d in (0..R.saturating_sub(1)).rev() {
        strides[d] = strides[d + 1] * sizes[d + 1] as isize;
    }
    strides
}

/// Row-major iterator over every multi-index inside a size vector.
#[derive(Clone, Debug)]
pub struct Indices<I: MultiIndex> {
    next: Option<I>,
    sizes: I,
    remaining: usize,
}

/// Iterate all multi-indices of `sizes` in row-major order.
///
/// A size vector with any zero extent yields nothing. A rank-0 size vector
/// yields the single empty index.
pub fn indices<I: MultiIndex>(sizes: I) -> Indices<I> {
    let remaining = sizes.product();
    Indices {
        next: if remaining == 0 { None } else { Some(I::zeros()) },
        sizes,
        remaining,
    }
}

impl<I: MultiIndex> Iterator for Indices<I> {
    type Item = I;

    #[inline]
    fn next(&mut self) -> Option<I> {
        let current = self.next?;
        let mut advanced = current;
        self.next = if advanced.increment(&self.sizes) {
            Some(advanced)
        } else {
            None
        };
        self.remaining -= 1;
        Some(current)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<I: MultiIndex> ExactSizeIterator for Indices<I> {}
