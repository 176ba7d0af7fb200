use dalitz_core::complex::{dot, elementwise_mul, sum};
use dalitz_core::Complex;
use proptest::prelude::*;

fn close(a: Complex<f64>, b: Complex<f64>, tol: f64) -> bool {
    (a.re - b.re).abs() <= tol && (a.im - b.im).abs() <= tol
}

#[test]
fn inverse_of_three_four() {
    let z = Complex::new(3.0, 4.0);
    let inv = z.inverse();
    assert!(close(inv, Complex::new(0.12, -0.16), 1e-15));
    assert!(close(z * inv, Complex::one(), 1e-15));
}

#[test]
fn imaginary_unit_squares_to_minus_one() {
    let i = Complex::<f64>::one_i();
    assert_eq!(i * i, Complex::new(-1.0, 0.0));
    assert_eq!(Complex::new(3.0, 4.0).abs2(), 25.0);
}

#[test]
fn inverse_of_zero_is_not_finite() {
    let inv = Complex::<f64>::zero().inverse();
    assert!(!inv.is_finite());
}

#[test]
fn field_order_is_re_then_im() {
    let z = Complex::new(1.5_f64, -2.5);
    let json = serde_json::to_string(&z).expect("serialize");
    assert_eq!(json, r#"{"re":1.5,"im":-2.5}"#);
}

#[test]
fn vector_helpers() {
    let a = vec![Complex::new(1.0, 1.0), Complex::new(0.0, 2.0)];
    let b = vec![Complex::new(2.0, 0.0), Complex::new(0.0, 1.0), Complex::new(9.0, 9.0)];
    let product = elementwise_mul(&a, &b);
    assert_eq!(product, vec![Complex::new(2.0, 2.0), Complex::new(-2.0, 0.0)]);
    assert_eq!(sum(&product), Complex::new(0.0, 2.0));
    assert_eq!(dot(&a, &b), Complex::new(0.0, 2.0));
}

proptest! {
    #[test]
    fn product_with_inverse_is_one(re in -1e3f64..1e3, im in -1e3f64..1e3) {
        prop_assume!(re.abs() + im.abs() > 1e-3);
        let z = Complex::new(re, im);
        prop_assert!(close(z * z.inverse(), Complex::one(), 1e-12));
    }

    #[test]
    fn conjugate_product_is_modulus(re in -1e3f64..1e3, im in -1e3f64..1e3) {
        let z = Complex::new(re, im);
        let w = z * z.conj();
        prop_assert!((w.re - z.abs2()).abs() <= 1e-9 * (1.0 + z.abs2()));
        prop_assert!(w.im.abs() <= 1e-9 * (1.0 + z.abs2()));
    }
}
