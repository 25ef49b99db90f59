use fixnd::{Array, ArrayError, ArrayView, ArrayViewMut, Ix1, Ix2, LazyArray, Slice};

fn matrix() -> Array<i32, Ix2<3, 4>> {
    Array::from_fn(|[i, j]| (i * 4 + j) as i32)
}

#[test]
fn test_slice_window_and_reverse() {
    let a = matrix();
    let v = a.view().slice(1, 1usize..3);
    assert_eq!(v.sizes(), [3, 2]);
    assert_eq!(v.to_vec(), vec![1, 2, 5, 6, 9, 10]);
    let rev = a.view().slice(0, Slice::rev());
    assert_eq!(rev.row(0).to_vec(), vec![8, 9, 10, 11]);
    let tail = a.view().slice(1, Slice::new(-2, -1));
    assert_eq!(tail.col(0).to_vec(), vec![3, 7, 11]);
}

#[test]
fn test_slice_out_of_bounds_is_an_error() {
    let a = matrix();
    assert!(matches!(
        a.view().try_slice(1, 2usize..9),
        Err(ArrayError::SliceOutOfBounds { axis: 1, .. })
    ));
}

#[test]
fn test_index_axis_and_diag() {
    let a = matrix();
    let row = a.view().index_axis(0, 2);
    assert_eq!(row.to_vec(), vec![8, 9, 10, 11]);
    assert_eq!(a.view().diag(0).to_vec(), vec![0, 5, 10]);
    assert_eq!(a.view().diag(1).to_vec(), vec![4, 9]);
    assert_eq!(a.view().diag(-1).to_vec(), vec![1, 6, 11]);
}

#[test]
fn test_assign_lazy_into_transposed_window() {
    let a = matrix();
    let mut out: Array<i32, Ix2<4, 3>> = Array::default();
    out.view_mut().assign(a.view().transpose() * 2);
    assert_eq!(out, &a.transpose() * 2);
}

#[test]
fn test_views_are_borrowed_windows() {
    let mut data = vec![0.0f64; 12];
    {
        let mut v = ArrayViewMut::new(&mut data, [3, 4]).unwrap();
        let mut col = v.reborrow().col(2);
        col.fill(1.0);
        v.swap_rows(0, 2);
    }
    let v = ArrayView::new(&data, [3, 4]).unwrap();
    assert_eq!(v.sum(), 3.0);
    assert_eq!(v.col(2).to_vec(), vec![1.0, 1.0, 1.0]);
}

#[test]
fn test_array_and_lazy_round_trip_through_views() {
    let a = Array::from([1.0f64, -2.0, 3.0]);
    let mut b: Array<f64, Ix1<3>> = Array::from_elem(1.0);
    {
        let mut v = b.view_mut();
        v += &a;
        v *= a.view();
    }
    assert_eq!(b.as_slice(), &[2.0, 2.0, 12.0]);
    assert_eq!(a.as_slice(), &[1.0, -2.0, 3.0]);
}

fn mismatched() -> (Vec<f64>, Vec<f64>) {
    (vec![1.0; 6], vec![2.0; 6])
}

macro_rules! mismatch_panics {
    ($($name:ident: $op:tt),*) => {$(
        #[test]
        #[should_panic(expected = "shape mismatch: [2, 3] vs [3, 2]")]
        fn $name() {
            let (x, y) = mismatched();
            let a = ArrayView::new(&x, [2, 3]).unwrap();
            let b = ArrayView::new(&y, [3, 2]).unwrap();
            let _ = a.lazy() $op b.lazy();
        }
    )*};
}

mismatch_panics!(
    test_mismatch_add: +,
    test_mismatch_sub: -,
    test_mismatch_mul: *,
    test_mismatch_div: /,
    test_mismatch_rem: %
);

macro_rules! int_mismatch_panics {
    ($($name:ident: $op:tt),*) => {$(
        #[test]
        #[should_panic(expected = "shape mismatch: [2, 3] vs [3, 2]")]
        fn $name() {
            let x = [1u32; 6];
            let a = ArrayView::new(&x, [2, 3]).unwrap();
            let b = ArrayView::new(&x, [3, 2]).unwrap();
            let _ = a $op b;
        }
    )*};
}

int_mismatch_panics!(
    test_mismatch_bitand: &,
    test_mismatch_bitor: |,
    test_mismatch_bitxor: ^,
    test_mismatch_shl: <<,
    test_mismatch_shr: >>
);

#[test]
#[should_panic(expected = "shape mismatch: [2, 3] vs [3, 2]")]
fn test_mismatch_lifted_function() {
    let a = LazyArray::constant([2, 3], 1.0f64);
    let b = LazyArray::constant([3, 2], 1.0f64);
    let _ = fixnd::hypot(a, b);
}

#[test]
fn test_try_zip_reports_mismatch() {
    let a = LazyArray::constant([2, 3], 1.0f64);
    let b = LazyArray::constant([3, 2], 1.0f64);
    assert_eq!(
        a.try_zip_with(b, |x, y| x + y).err(),
        Some(ArrayError::ShapeMismatch(vec![2, 3], vec![3, 2]))
    );
}

#[test]
fn test_try_forms_reject_transposed_shapes_of_equal_length() {
    let x = [1.0f64; 6];
    let a = ArrayView::new(&x, [2, 3]).unwrap();
    let b = ArrayView::new(&x, [3, 2]).unwrap();
    let expected = Some(ArrayError::ShapeMismatch(vec![2, 3], vec![3, 2]));

    assert_eq!(a.lazy().try_zip_apply(b.lazy(), fixnd::op::Add).err(), expected);
    assert_eq!(
        a.lazy().try_to_array::<Ix2<3, 2>>().err(),
        Some(ArrayError::ShapeMismatch(vec![3, 2], vec![2, 3]))
    );

    let mut out = vec![0.0f64; 6];
    let mut dst = ArrayViewMut::new(&mut out, [2, 3]).unwrap();
    assert_eq!(dst.try_assign(b.lazy()).err(), expected);
    assert_eq!(out, vec![0.0; 6]);

    // the same data through a transposed window has the matching shape
    let mut dst = ArrayViewMut::new(&mut out, [2, 3]).unwrap();
    assert!(dst.try_assign(b.transpose().lazy()).is_ok());
    assert_eq!(out, vec![1.0; 6]);
}

#[test]
fn test_scalar_assign_through_column_and_transpose() {
    let mut a = matrix();
    {
        let mut col = a.view_mut().col(3);
        col += 100;
    }
    {
        let mut t = a.view_mut().transpose();
        t *= 2;
    }
    let expected: Array<i32, Ix2<3, 4>> =
        Array::from_fn(|[i, j]| 2 * ((i * 4 + j) as i32 + if j == 3 { 100 } else { 0 }));
    assert_eq!(a, expected);
}

#[test]
fn test_scalar_on_left_of_every_operand_kind() {
    let a: Array<f64, Ix1<3>> = Array::from([1.0, 2.0, 4.0]);
    let eager = 2.0f64 - &a;
    let lazy: Array<f64, Ix1<3>> = (2.0f64 / a.lazy()).to_array();
    let view: Array<f64, Ix1<3>> = (2.0f64 * a.view()).to_array();
    assert_eq!(eager.as_slice(), &[1.0, 0.0, -2.0]);
    assert_eq!(lazy.as_slice(), &[2.0, 1.0, 0.5]);
    assert_eq!(view.as_slice(), &[2.0, 4.0, 8.0]);
}
