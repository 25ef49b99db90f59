use approx::assert_relative_eq;
use fixnd::{Array, Dual, Elementary, Ix1, Ix2, Ix3, LazyArray, Real};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

type M = Array<f64, Ix2<3, 4>>;

fn random(seed: u64, lo: f64, hi: f64) -> M {
    let mut rng = StdRng::seed_from_u64(seed);
    Array::from_fn(|_| rng.gen_range(lo..hi))
}

fn random_int(seed: u64) -> Array<i64, Ix3<2, 3, 2>> {
    let mut rng = StdRng::seed_from_u64(seed);
    Array::from_fn(|_| rng.gen_range(1..64))
}

#[test]
fn test_concrete_addition() {
    let a = Array::from([1.0, 2.0]);
    let b = Array::from([3.0, 4.0]);
    assert_eq!((&a + &b).as_slice(), &[4.0, 6.0]);
    assert_eq!((a + b).as_slice(), &[4.0, 6.0]);
}

#[test]
fn test_concrete_dual_sin() {
    assert_eq!(fixnd::sin(Dual::new(0.0f64, 1.0)), Dual::new(0.0, 1.0));
}

#[test]
fn test_float_operators_elementwise() {
    let a = random(1, -3.0, 3.0);
    let b = random(2, 0.5, 2.0);
    let cases: [(M, fn(f64, f64) -> f64); 5] = [
        (&a + &b, |x, y| x + y),
        (&a - &b, |x, y| x - y),
        (&a * &b, |x, y| x * y),
        (&a / &b, |x, y| x / y),
        (&a % &b, |x, y| x % y),
    ];
    for (out, f) in cases {
        for k in fixnd::indices([3, 4]) {
            assert_eq!(out[k], f(a[k], b[k]));
        }
    }
    let neg = -&a;
    for k in fixnd::indices([3, 4]) {
        assert_eq!(neg[k], -a[k]);
    }
}

#[test]
fn test_integer_operators_elementwise() {
    let a = random_int(3);
    let b = random_int(4).map(|&x| x % 7);
    let cases: [(Array<i64, Ix3<2, 3, 2>>, fn(i64, i64) -> i64); 5] = [
        (&a & &b, |x, y| x & y),
        (&a | &b, |x, y| x | y),
        (&a ^ &b, |x, y| x ^ y),
        (&a << &b, |x, y| x << y),
        (&a >> &b, |x, y| x >> y),
    ];
    for (out, f) in cases {
        for k in fixnd::indices([2, 3, 2]) {
            assert_eq!(out[k], f(a[k], b[k]));
        }
    }
    let not = !&a;
    assert!(not.iter().zip(a.iter()).all(|(&n, &x)| n == !x));
}

#[test]
fn test_scalar_broadcast_both_sides() {
    let a = random(5, -1.0, 1.0);
    let right = &a * 3.0;
    let left = 3.0f64 * &a;
    assert_eq!(right, left);
    let shifted = 10.0f64 - &a;
    for (s, x) in shifted.iter().zip(a.iter()) {
        assert_eq!(*s, 10.0 - x);
    }
}

#[test]
fn test_compound_assign_leaves_rhs_unchanged() {
    let mut a = random(6, -1.0, 1.0);
    let b = random(7, -1.0, 1.0);
    let a0 = a.clone();
    let b0 = b.clone();
    a += &b;
    assert_eq!(a, &a0 + &b);
    assert_eq!(b, b0);
    a *= 2.0;
    assert_eq!(a, &(&a0 + &b) * 2.0);
}

#[test]
fn test_comparisons() {
    let a = Array::from([1, 5, 3]);
    let b = Array::from([2, 5, 1]);
    assert_eq!(a.lt_elem(&b).as_slice(), &[true, false, false]);
    assert_eq!(a.eq_elem(&b).as_slice(), &[false, true, false]);
    assert_eq!(a.ge_elem(&b).as_slice(), &[false, true, true]);
    let both = a.le_elem(&b).and(&a.ne_elem(&b));
    assert_eq!(both.as_slice(), &[true, false, false]);
}

#[test]
fn test_lazy_equals_eager() {
    let a = random(8, 0.1, 2.0);
    let b = random(9, 0.1, 2.0);
    let eager = (&(&a * &b) + &a.sin()).sqrt().atan2(&b);
    let lazy: M = (a.lazy() * b.lazy() + a.lazy().sin())
        .sqrt()
        .atan2(b.lazy())
        .to_array();
    assert_eq!(lazy, eager);
    let from: M = (fixnd::exp(a.lazy()) - 1.0).to_array();
    assert_eq!(from, &a.exp() - 1.0);
}

#[test]
fn test_reciprocal_trig_identities() {
    let a = random(10, 0.1, 1.4);
    let pairs = [
        (fixnd::csc(&a), fixnd::sin(&a)),
        (fixnd::sec(&a), fixnd::cos(&a)),
        (fixnd::cot(&a), fixnd::tan(&a)),
        (fixnd::csch(&a), fixnd::sinh(&a)),
        (fixnd::sech(&a), fixnd::cosh(&a)),
        (fixnd::coth(&a), fixnd::tanh(&a)),
    ];
    for (recip, primary) in pairs {
        for (r, p) in recip.iter().zip(primary.iter()) {
            assert_relative_eq!(r * p, 1.0, epsilon = 1e-12);
        }
    }
    let b = random(11, 1.1, 3.0);
    for (x, y) in fixnd::acsc(&b).iter().zip(b.iter()) {
        assert_relative_eq!(*x, (1.0 / y).asin(), epsilon = 1e-15);
    }
    for (x, y) in fixnd::asech(&(1.0f64 / &b)).iter().zip(b.iter()) {
        assert_relative_eq!(*x, y.acosh(), epsilon = 1e-12);
    }
}

fn central_difference(f: impl Fn(f64) -> f64, x: f64) -> f64 {
    let h = 1e-6;
    (f(x + h) - f(x - h)) / (2.0 * h)
}

#[test]
fn test_dual_matches_finite_differences_over_arrays() {
    let mut rng = StdRng::seed_from_u64(12);
    for &entry in Elementary::ALL {
        let (lo, hi) = match entry {
            Elementary::Acosh => (1.5, 3.0),
            Elementary::Asin | Elementary::Acos | Elementary::Atanh => (-0.7, 0.7),
            Elementary::Log
            | Elementary::Log2
            | Elementary::Log10
            | Elementary::Sqrt
            | Elementary::Cbrt => (0.2, 3.0),
            _ => (-1.0, 1.0),
        };
        let x: Array<f64, Ix1<8>> = Array::from_fn(|_| rng.gen_range(lo..hi));
        let duals = x.map(|&v| Dual::variable(v).apply(entry));
        for (d, &v) in duals.iter().zip(x.iter()) {
            let expected = central_difference(|t| entry.eval(t), v);
            assert_relative_eq!(d.dual(), expected, epsilon = 1e-5, max_relative = 1e-5);
            assert_relative_eq!(d.real(), entry.eval(v), max_relative = 1e-15);
        }
    }
}

#[test]
fn test_dual_reciprocal_trig_derivative() {
    let x: Array<Dual<f64>, Ix1<4>> = Array::from_fn(|[i]| Dual::variable(0.3 + 0.2 * i as f64));
    for (d, x0) in fixnd::sec(&x).iter().zip(x.iter().map(Dual::real)) {
        let expected = central_difference(|t| 1.0 / t.cos(), x0);
        assert_relative_eq!(d.dual(), expected, epsilon = 1e-5);
        assert_relative_eq!(d.real(), Real::sec(x0), max_relative = 1e-15);
    }
}

#[test]
fn test_dual_arrays_through_lazy_expression() {
    let x: Array<Dual<f64>, Ix1<3>> = Array::from_fn(|[i]| Dual::variable(i as f64 + 1.0));
    let y: Array<Dual<f64>, Ix1<3>> = (x.lazy() * x.lazy() + Dual::constant(1.0)).to_array();
    let derivatives: Vec<f64> = y.iter().map(Dual::dual).collect();
    assert_eq!(derivatives, vec![2.0, 4.0, 6.0]);
}

#[test]
fn test_lazy_reductions_and_products() {
    let a: Array<f64, Ix2<2, 3>> = Array::from([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    let lazy = a.lazy();
    assert_eq!(lazy.sum(), 21.0);
    assert_eq!(lazy.max(), 6.0);
    assert_eq!(lazy.by_ref().transpose().sizes(), [3, 2]);
    let g: Array<f64, Ix2<2, 2>> = lazy.matmul(a.lazy().transpose()).to_array();
    assert_eq!(g.as_slice(), &[14.0, 32.0, 32.0, 77.0]);
    let row = LazyArray::from_fn([3], |[j]| j as f64);
    assert_eq!(row.dot(&a.view().row(1).lazy()), 17.0);
}
