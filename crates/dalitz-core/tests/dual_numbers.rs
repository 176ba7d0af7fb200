use dalitz_core::{Complex, Dual, Real};

#[test]
fn quotient_rule() {
    // d/dx (x / (1 + x)) at x = 2 is 1 / 9.
    let x = Dual::variable(2.0);
    let y = x / (Dual::constant(1.0) + x);
    assert!((y.re - 2.0 / 3.0).abs() < 1e-15);
    assert!((y.eps - 1.0 / 9.0).abs() < 1e-15);
}

#[test]
fn sqrt_derivative() {
    let x = Dual::variable(4.0);
    let root = x.sqrt();
    assert_eq!(root.re, 2.0);
    assert!((root.eps - 0.25).abs() < 1e-15);
}

#[test]
fn sqrt_of_negative_is_flagged_non_finite() {
    assert!(!Dual::variable(-1.0).sqrt().is_finite());
    assert!(!Real::sqrt(-1.0_f64).is_finite());
}

#[test]
fn complex_inverse_carries_derivatives() {
    // f(x) = 1 / (x + i), |f|² = 1 / (x² + 1), d|f|²/dx at x = 1 is -1/2.
    let x = Dual::variable(1.0);
    let z = Complex::new(x, Dual::constant(1.0)).inverse();
    let modulus = z.abs2();
    assert!((modulus.re - 0.5).abs() < 1e-15);
    assert!((modulus.eps + 0.5).abs() < 1e-15);
}

#[test]
fn f32_and_f64_share_the_contract() {
    fn hypot<T: Real>(a: T, b: T) -> T {
        (a.square() + b.square()).sqrt()
    }
    assert_eq!(hypot(3.0_f64, 4.0), 5.0);
    assert_eq!(hypot(3.0_f32, 4.0), 5.0);
    assert_eq!(hypot(Dual::constant(3.0), Dual::constant(4.0)).re, 5.0);
}
