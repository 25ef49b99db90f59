//! Type-level shapes.
//!
//! A fixed-shape array carries its extents in its type. `Ix2<2, 3>` is the
//! shape of a 2x3 matrix; combining it with an `Ix2<3, 2>` operand does not
//! type-check.

use crate::index::MultiIndex;
use std::fmt::Debug;
use std::hash::Hash;

/// Compile-time extents of a fixed-shape array.
pub trait Shape: Copy + Default + Debug + Eq + Hash + Send + Sync + 'static {
    /// Number of axes.
    const RANK: usize;
    /// Number of elements (product of the extents).
    const LEN: usize;
    /// Multi-index type, always `[usize; RANK]`.
    type Index: MultiIndex;

    /// The extents as a multi-index value.
    fn sizes() -> Self::Index;
}

macro_rules! define_shape {
    ($(#[$meta:meta])* $name:ident, $rank:literal, [$($n:ident),+]) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        pub struct $name<$(const $n: usize),+>;

        impl<$(const $n: usize),+> Shape for $name<$($n),+> {
            const RANK: usize = $rank;
            const LEN: usize = 1 $(* $n)+;
            type Index = [usize; $rank];

            #[inline]
            fn sizes() -> [usize; $rank] {
                [$($n),+]
            }
        }
    };
}

define_shape!(
    /// Rank-1 shape (vector of length `N0`).
    Ix1, 1, [N0]
);
define_shape!(
    /// Rank-2 shape (`N0` rows by `N1` columns).
    Ix2, 2, [N0, N1]
);
define_shape!(
    /// Rank-3 shape.
    Ix3, 3, [N0, N1, N2]
);
define_shape!(
    /// Rank-4 shape.
    Ix4, 4, [N0, N1, N2, N3]
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_constants() {
        assert_eq!(<Ix1<5> as Shape>::RANK, 1);
        assert_eq!(<Ix1<5> as Shape>::LEN, 5);
        assert_eq!(<Ix2<2, 3> as Shape>::LEN, 6);
        assert_eq!(<Ix3<2, 3, 4> as Shape>::sizes(), [2, 3, 4]);
        assert_eq!(<Ix4<1, 2, 0, 4> as Shape>::LEN, 0);
    }
}
