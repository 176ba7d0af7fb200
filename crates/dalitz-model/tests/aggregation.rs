use dalitz_core::{Complex, Dual};
use dalitz_model::{intensity, normalization, normalized_intensity, InterferenceMatrix};
use nalgebra::DMatrix;

#[test]
fn intensity_is_squared_coherent_sum() {
    let amplitudes = [Complex::new(1.0, 0.0), Complex::new(0.0, 1.0)];
    let coefficients = [Complex::new(2.0, 0.0), Complex::new(1.0, 0.0)];
    // |2 + i|² = 5
    assert_eq!(intensity(&amplitudes, &coefficients).expect("equal lengths"), 5.0);

    let opposite = [Complex::new(1.0, 0.0), Complex::new(0.0, 1.0)];
    let cancel = [Complex::new(1.0, 0.0), Complex::new(0.0, 1.0)];
    // 1 + i·i = 0
    assert_eq!(intensity(&opposite, &cancel).expect("equal lengths"), 0.0);
}

#[test]
fn length_mismatch_is_an_error() {
    let err = intensity(&[Complex::<f64>::one()], &[]).unwrap_err();
    assert_eq!(err.code(), "coefficient-mismatch");
    assert_eq!(err.info().context["amplitudes"], "1");
}

#[test]
fn identity_matrix_gives_sum_of_moduli() {
    let coefficients = [Complex::new(1.0, 2.0), Complex::new(-0.5, 0.5)];
    let norm: f64 = normalization(&coefficients, &InterferenceMatrix::identity(2)).expect("dim 2");
    assert!((norm - (5.0 + 0.5)).abs() < 1e-15);
}

#[test]
fn off_diagonal_terms_use_the_real_part_of_the_bilinear_form() {
    // I = [[1, i], [-i, 1]] is Hermitian; θ = (1, 1):
    // Σ Re(θᵢ* I_ij θⱼ) = 1 + Re(i) + Re(-i) + 1 = 2.
    let matrix = InterferenceMatrix::from_rows(
        &[vec![1.0, 0.0], vec![0.0, 1.0]],
        &[vec![0.0, 1.0], vec![-1.0, 0.0]],
    )
    .expect("square");
    let theta = [Complex::<f64>::new(1.0, 0.0), Complex::new(1.0, 0.0)];
    assert!((normalization(&theta, &matrix).expect("dim 2") - 2.0).abs() < 1e-15);

    // θ = (1, i): θ₀* I₀₁ θ₁ = i·i = -1 and θ₁* I₁₀ θ₀ = (-i)(-i) = -1.
    let theta = [Complex::<f64>::new(1.0, 0.0), Complex::new(0.0, 1.0)];
    assert!((normalization(&theta, &matrix).expect("dim 2") - 0.0).abs() < 1e-15);
    assert_eq!(matrix.entry(1, 0), Some(Complex::new(0.0, -1.0)));
    assert_eq!(matrix.entry(2, 0), None);
}

#[test]
fn malformed_matrices_are_rejected() {
    let err = InterferenceMatrix::new(DMatrix::zeros(2, 3), DMatrix::zeros(2, 3)).unwrap_err();
    assert_eq!(err.code(), "matrix-shape");
    let err = InterferenceMatrix::new(DMatrix::zeros(2, 2), DMatrix::zeros(3, 3)).unwrap_err();
    assert_eq!(err.code(), "matrix-shape");
    let err = InterferenceMatrix::from_rows(&[vec![1.0, 0.0], vec![1.0]], &[vec![0.0, 0.0], vec![0.0]])
        .unwrap_err();
    assert_eq!(err.code(), "matrix-shape");

    let matrix = InterferenceMatrix::identity(3);
    let err = normalization(&[Complex::new(1.0, 0.0)], &matrix).unwrap_err();
    assert_eq!(err.code(), "coefficient-mismatch");
}

#[test]
fn matrix_json_is_row_major() {
    let json = r#"{"re": [[1.0, 0.5], [0.5, 2.0]], "im": [[0.0, 0.1], [-0.1, 0.0]]}"#;
    let matrix: InterferenceMatrix = serde_json::from_str(json).expect("parse");
    assert_eq!(matrix.dim(), 2);
    assert_eq!(matrix.entry(0, 1), Some(Complex::new(0.5, 0.1)));
    let back = serde_json::to_value(&matrix).expect("serialize");
    assert_eq!(back["im"][1][0], -0.1);

    let bad = r#"{"re": [[1.0]], "im": [[0.0, 1.0]]}"#;
    assert!(serde_json::from_str::<InterferenceMatrix>(bad).is_err());
}

#[test]
fn normalized_density_divides_by_norm() {
    let amplitudes = [Complex::new(1.0, 0.0), Complex::new(1.0, 0.0)];
    let theta = [Complex::<f64>::new(1.0, 0.0), Complex::new(1.0, 0.0)];
    let value: f64 = normalized_intensity(&amplitudes, &theta, &InterferenceMatrix::identity(2)).expect("ok");
    assert!((value - 2.0).abs() < 1e-15);
}

#[test]
fn normalization_gradient_with_dual_coefficients() {
    // Norm(θ) = |θ₀|² + |θ₁|² with identity overlap; d/dRe θ₀ = 2 Re θ₀.
    let theta = [
        Complex::new(Dual::variable(0.7), Dual::constant(0.2)),
        Complex::new(Dual::constant(0.3), Dual::constant(-0.4)),
    ];
    let norm = normalization(&theta, &InterferenceMatrix::identity(2)).expect("dim 2");
    assert!((norm.re - (0.49 + 0.04 + 0.09 + 0.16)).abs() < 1e-12);
    assert!((norm.eps - 1.4).abs() < 1e-12);
}
