//! Whole-array reductions and the small linear-algebra helpers on fixed
//! shapes.

use std::ops::Mul;

use fixnd_traits::{Ix1, Ix2, MultiIndex, Shape};
use num_traits::{One, Zero};

use crate::array::Array;

impl<T, S: Shape> Array<T, S> {
    /// Full reduction in row-major order: `f(..f(f(init, a0), a1).., an)`.
    pub fn reduce<U>(&self, init: U, f: impl FnMut(U, &T) -> U) -> U {
        self.iter().fold(init, f)
    }

    /// Sum of all elements; zero when empty.
    pub fn sum(&self) -> T
    where
        T: Clone + Zero,
    {
        self.reduce(T::zero(), |acc, x| acc + x.clone())
    }

    /// Product of all elements; one when empty.
    pub fn prod(&self) -> T
    where
        T: Clone + One,
    {
        self.reduce(T::one(), |acc, x| acc * x.clone())
    }

    /// Smallest element, `None` when empty.
    ///
    /// Incomparable elements (NaN) never replace the running minimum.
    pub fn min(&self) -> Option<T>
    where
        T: Clone + PartialOrd,
    {
        self.select(|x, best| x < best).map(|(_, x)| x.clone())
    }

    /// Largest element, `None` when empty.
    pub fn max(&self) -> Option<T>
    where
        T: Clone + PartialOrd,
    {
        self.select(|x, best| x > best).map(|(_, x)| x.clone())
    }

    /// Multi-index of the first smallest element.
    pub fn argmin(&self) -> Option<S::Index>
    where
        T: PartialOrd,
    {
        self.select(|x, best| x < best)
            .map(|(i, _)| S::Index::unravel(i, &S::sizes()))
    }

    /// Multi-index of the first largest element.
    pub fn argmax(&self) -> Option<S::Index>
    where
        T: PartialOrd,
    {
        self.select(|x, best| x > best)
            .map(|(i, _)| S::Index::unravel(i, &S::sizes()))
    }

    fn select(&self, better: impl Fn(&T, &T) -> bool) -> Option<(usize, &T)> {
        let mut all = self.iter().enumerate();
        let first = all.next()?;
        Some(all.fold(first, |best, cand| {
            if better(cand.1, best.1) {
                cand
            } else {
                best
            }
        }))
    }
}

impl<S: Shape> Array<bool, S> {
    /// `true` if any element is `true`.
    pub fn any(&self) -> bool {
        self.iter().any(|&x| x)
    }

    /// `true` if every element is `true` (vacuously for empty arrays).
    pub fn all(&self) -> bool {
        self.iter().all(|&x| x)
    }
}

impl<T: Clone, const M: usize, const N: usize> Array<T, Ix2<M, N>> {
    pub fn transpose(&self) -> Array<T, Ix2<N, M>> {
        Array::from_fn(|[i, j]| self[[j, i]].clone())
    }

    /// Sum of the main diagonal, over `min(M, N)` entries.
    pub fn trace(&self) -> T
    where
        T: Zero,
    {
        (0..M.min(N)).fold(T::zero(), |acc, i| acc + self[[i, i]].clone())
    }
}

/// Inner and matrix products on fixed shapes.
///
/// Extents are checked by the type system: a vector of length `N` can only
/// be multiplied with a matrix having `N` rows or columns as appropriate.
pub trait Dot<Rhs> {
    type Output;

    fn dot(&self, rhs: &Rhs) -> Self::Output;
}

fn inner<T, F, G>(n: usize, lhs: F, rhs: G) -> T
where
    T: Clone + Zero + Mul<Output = T>,
    F: Fn(usize) -> T,
    G: Fn(usize) -> T,
{
    (0..n).fold(T::zero(), |acc, k| acc + lhs(k) * rhs(k))
}

/// Vector · vector
impl<T, const N: usize> Dot<Array<T, Ix1<N>>> for Array<T, Ix1<N>>
where
    T: Clone + Zero + Mul<Output = T>,
{
    type Output = T;

    fn dot(&self, rhs: &Array<T, Ix1<N>>) -> T {
        inner(N, |k| self[[k]].clone(), |k| rhs[[k]].clone())
    }
}

/// Matrix · vector
impl<T, const M: usize, const N: usize> Dot<Array<T, Ix1<N>>> for Array<T, Ix2<M, N>>
where
    T: Clone + Zero + Mul<Output = T>,
{
    type Output = Array<T, Ix1<M>>;

    fn dot(&self, rhs: &Array<T, Ix1<N>>) -> Self::Output {
        Array::from_fn(|[i]| inner(N, |k| self[[i, k]].clone(), |k| rhs[[k]].clone()))
    }
}

/// Vector · matrix
impl<T, const M: usize, const N: usize> Dot<Array<T, Ix2<M, N>>> for Array<T, Ix1<M>>
where
    T: Clone + Zero + Mul<Output = T>,
{
    type Output = Array<T, Ix1<N>>;

    fn dot(&self, rhs: &Array<T, Ix2<M, N>>) -> Self::Output {
        Array::from_fn(|[j]| inner(M, |k| self[[k]].clone(), |k| rhs[[k, j]].clone()))
    }
}

/// Matrix · matrix
impl<T, const M: usize, const N: usize, const P: usize> Dot<Array<T, Ix2<N, P>>>
    for Array<T, Ix2<M, N>>
where
    T: Clone + Zero + Mul<Output = T>,
{
    type Output = Array<T, Ix2<M, P>>;

    fn dot(&self, rhs: &Array<T, Ix2<N, P>>) -> Self::Output {
        Array::from_fn(|[i, j]| inner(N, |k| self[[i, k]].clone(), |k| rhs[[k, j]].clone()))
    }
}
