//! Materialization loops, optionally split across rayon workers.
//!
//! Every index of the output is evaluated exactly once. The sequential path
//! visits indices in row-major order; with the `parallel` feature, outputs of
//! at least [`MINTHREADLENGTH`] elements are produced by rayon in
//! unspecified order.

use fixnd_traits::{indices, MultiIndex};

macro_rules! worker_bound {
    ($(#[$doc:meta])* $name:ident: $bound:ident) => {
        $(#[$doc])*
        #[cfg(feature = "parallel")]
        pub trait $name: $bound {}
        #[cfg(feature = "parallel")]
        impl<T: $bound> $name for T {}

        $(#[$doc])*
        #[cfg(not(feature = "parallel"))]
        pub trait $name {}
        #[cfg(not(feature = "parallel"))]
        impl<T> $name for T {}
    };
}

worker_bound! {
    /// Element values a materialization may produce on one rayon worker and
    /// store from another: [`Send`] with the `parallel` feature, any type
    /// without it.
    WorkerSend: Send
}

worker_bound! {
    /// Expressions (and the index closures built from them) evaluated from
    /// several rayon workers at once: [`Sync`] with the `parallel` feature,
    /// any type without it, so `Rc` leaves and `Cell` captures still
    /// materialize sequentially.
    WorkerSync: Sync
}

/// Minimum number of elements to justify multi-threaded execution.
pub(crate) const MINTHREADLENGTH: usize = 1 << 15;

/// Collect `f(k)` for every multi-index `k` of `sizes` into a row-major
/// buffer.
pub(crate) fn collect_indexed<T, F, const R: usize>(sizes: [usize; R], f: F) -> Vec<T>
where
    F: Fn([usize; R]) -> T + WorkerSync,
    T: WorkerSend,
{
    let len = sizes.product();

    #[cfg(feature = "parallel")]
    {
        if len >= MINTHREADLENGTH {
            use rayon::prelude::*;
            log::debug!("materialize {sizes:?}: {len} elements on rayon workers");
            let mut out = Vec::with_capacity(len);
            (0..len)
                .into_par_iter()
                .map(|i| f(<[usize; R]>::unravel(i, &sizes)))
                .collect_into_vec(&mut out);
            return out;
        }
    }

    log::trace!("materialize {sizes:?}: {len} elements");
    indices(sizes).map(f).collect()
}

/// Overwrite a row-major buffer with `f(k)` for every multi-index `k`.
pub(crate) fn write_indexed<T, F, const R: usize>(out: &mut [T], sizes: [usize; R], f: F)
where
    F: Fn([usize; R]) -> T + WorkerSync,
    T: WorkerSend,
{
    debug_assert_eq!(out.len(), sizes.product());

    #[cfg(feature = "parallel")]
    {
        if out.len() >= MINTHREADLENGTH {
            use rayon::prelude::*;
            log::debug!("assign {sizes:?}: {} elements on rayon workers", out.len());
            out.par_iter_mut()
                .enumerate()
                .for_each(|(i, x)| *x = f(<[usize; R]>::unravel(i, &sizes)));
            return;
        }
    }

    log::trace!("assign {sizes:?}: {} elements", out.len());
    for (x, k) in out.iter_mut().zip(indices(sizes)) {
        *x = f(k);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_row_major() {
        let out = collect_indexed([2, 3], |[i, j]| 10 * i + j);
        assert_eq!(out, vec![0, 1, 2, 10, 11, 12]);
    }

    #[test]
    fn test_collect_empty_and_scalar() {
        assert!(collect_indexed([4, 0], |_| 1).is_empty());
        assert_eq!(collect_indexed([], |_| 7), vec![7]);
    }

    #[test]
    fn test_write_indexed() {
        let mut out = vec![0usize; 6];
        write_indexed(&mut out, [3, 2], |[i, j]| i * j);
        assert_eq!(out, vec![0, 0, 0, 1, 0, 2]);
    }

    #[test]
    fn test_worker_bounds_cover_element_and_expression_types() {
        fn element<T: WorkerSend>() {}
        fn expression<E: crate::Expr<2> + WorkerSync>(_: &E) {}
        element::<f64>();
        element::<fixnd_dual::Dual<f32>>();
        element::<num_complex::Complex<f64>>();
        let data = [1.0f64, 2.0, 3.0, 4.0];
        let v = crate::ArrayView::new(&data, [2, 2]).unwrap();
        expression(&v);
        expression(&(v.lazy() * 2.0).into_expr());
    }

    #[cfg(not(feature = "parallel"))]
    #[test]
    fn test_rc_elements_materialize_sequentially() {
        use std::rc::Rc;
        let shared = Rc::new(5i32);
        let out = collect_indexed([3], |[i]| Rc::new(*shared + i as i32));
        let values: Vec<i32> = out.iter().map(|x| **x).collect();
        assert_eq!(values, vec![5, 6, 7]);
    }

    #[test]
    fn test_large_output_visits_every_index_once() {
        let n = MINTHREADLENGTH + 17;
        let out = collect_indexed([n], |[i]| i);
        assert!(out.iter().enumerate().all(|(i, &x)| i == x));
        let mut buf = vec![0usize; 2 * n];
        write_indexed(&mut buf, [2, n], |[i, j]| i * n + j);
        assert!(buf.iter().enumerate().all(|(i, &x)| i == x));
    }
}
