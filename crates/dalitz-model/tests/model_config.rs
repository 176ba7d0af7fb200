use dalitz_core::{Complex, Dual};
use dalitz_model::{Amplitude, BatchOpts, Breakdown, Model, ModelConfig, InterferenceMatrix};

const D_TO_3PI: &str = r#"
topology:
  kind: three-body
  parent: d
  daughters: [pi, pi, pi]
components:
  - name: nr
    kind: non-resonant
  - name: rho
    kind: resonant
    resonance: rho_770
    symmetrize: true
  - name: f0
    kind: resonant
    resonance: f0_980
    symmetrize: true
background:
  - name: flat_bkg
    kind: non-resonant
"#;

const D0_TO_4PI: &str = r#"
catalogue:
  extend_builtin: true
topology:
  kind: four-body
  parent: d0
  daughters: [pi, pi, pi, pi]
components:
  - name: a1_rho
    kind: cascade
    first: a1_1260
    second: rho_770
    orbital: [1, 0, 1]
    symmetrize: true
  - name: nr
    kind: non-resonant
"#;

fn model() -> Model {
    Model::from_yaml_slice(D_TO_3PI.as_bytes()).expect("valid model")
}

#[test]
fn introspection() {
    let model = model();
    assert_eq!(model.num_resonances(), 3);
    assert_eq!(model.num_variables(), 2);
    assert_eq!(model.num_background(), 1);
    let names: Vec<&str> = model.components().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["nr", "rho", "f0"]);
    assert!(model.components()[1].symmetrize);
    assert!(matches!(model.components()[0].amplitude, Amplitude::ThreeBody(_)));
}

#[test]
fn amplitudes_follow_component_order() {
    let model = model();
    let point = [0.6, 1.2];
    let amplitudes = model.amplitudes(&point).expect("two invariants");
    assert_eq!(amplitudes.len(), 3);
    assert_eq!(amplitudes[0], Complex::new(1.0, 0.0));
    for (index, value) in amplitudes.iter().enumerate() {
        assert_eq!(model.amplitude(index, &point).expect("index"), *value);
    }
    assert_eq!(model.background_intensities(&point).expect("ok"), vec![1.0]);
    assert_eq!(model.amplitudes(&[0.0, 0.0]).expect("ok"), vec![Complex::zero(); 3]);
}

#[test]
fn bad_index_and_dimension_are_errors() {
    let model = model();
    let err = model.amplitude(3, &[0.6, 1.2]).unwrap_err();
    assert_eq!(err.code(), "unknown-resonance");
    assert_eq!(err.info().context["index"], "3");
    let err = model.amplitudes(&[0.6]).unwrap_err();
    assert_eq!(err.code(), "dimension-mismatch");
}

#[test]
fn intensity_and_normalization_through_the_model() {
    let model = model();
    let theta = [
        Complex::new(0.5, 0.0),
        Complex::new(1.0, 0.3),
        Complex::new(-0.2, 0.8),
    ];
    let point = [0.6, 1.2];
    let amplitudes = model.amplitudes(&point).expect("ok");
    let expected = dalitz_model::intensity(&amplitudes, &theta).expect("ok");
    assert_eq!(model.intensity(&point, &theta).expect("ok"), expected);

    let norm: f64 = model.normalization(&theta, &InterferenceMatrix::identity(3)).expect("dim 3");
    assert!((norm - (0.25 + 1.09 + 0.68)).abs() < 1e-12);
    let err = model.normalization(&theta, &InterferenceMatrix::identity(2)).unwrap_err();
    assert_eq!(err.code(), "matrix-shape");
}

#[test]
fn breakdown_is_serializable() {
    let model = model();
    let breakdown = model.breakdown(1, &[0.6, 1.2]).expect("index 1");
    assert!(matches!(breakdown, Breakdown::ThreeBody(ref b) if b.inside));
    let json = serde_json::to_value(&breakdown).expect("serialize");
    assert_eq!(json["topology"], "three-body");
    assert!(json["propagator"]["re"].is_number());
    assert_eq!(breakdown.substitution_count(), 0);
}

#[test]
fn batch_evaluation_matches_sequential() {
    let model = model();
    let points: Vec<Vec<f64>> = (0..200)
        .map(|i| vec![0.1 + 0.014 * i as f64, 2.9 - 0.013 * i as f64])
        .collect();
    let sequential: Vec<_> = points.iter().map(|p| model.amplitudes(p).expect("ok")).collect();
    let parallel = model.evaluate_batch(&points, &BatchOpts::default()).expect("ok");
    let pooled = model.evaluate_batch(&points, &BatchOpts { concurrency: 3 }).expect("ok");
    assert_eq!(parallel, sequential);
    assert_eq!(pooled, sequential);

    let err = model.evaluate_batch(&[vec![1.0]], &BatchOpts::default()).unwrap_err();
    assert_eq!(err.code(), "dimension-mismatch");
}

#[test]
fn config_hash_is_stable_and_content_sensitive() {
    let a = model();
    let b = model();
    assert_eq!(a.config_hash(), b.config_hash());
    assert_eq!(a.config_hash().map(str::len), Some(64));

    let changed = D_TO_3PI.replace("f0_980", "f0_1500");
    let c = Model::from_yaml_slice(changed.as_bytes()).expect("valid");
    assert_ne!(a.config_hash(), c.config_hash());
}

#[test]
fn four_body_model_from_yaml() {
    let model = Model::from_yaml_slice(D0_TO_4PI.as_bytes()).expect("valid model");
    assert_eq!(model.num_variables(), 5);
    assert_eq!(model.num_resonances(), 2);
    let far_outside = [10.0, 10.0, 10.0, 10.0, 10.0];
    assert_eq!(model.amplitudes(&far_outside).expect("ok"), vec![Complex::zero(); 2]);
}

#[test]
fn assembly_errors() {
    let unknown = D_TO_3PI.replace("rho_770", "rho_999");
    let err = Model::from_yaml_slice(unknown.as_bytes()).unwrap_err();
    assert_eq!(err.code(), "unknown-resonance-name");

    let unknown_particle = D_TO_3PI.replace("parent: d", "parent: b_meson");
    let err = Model::from_yaml_slice(unknown_particle.as_bytes()).unwrap_err();
    assert_eq!(err.code(), "unknown-particle");

    let mismatch = D_TO_3PI.replace(
        "kind: non-resonant\n  - name: rho",
        "kind: cascade\n    first: a1_1260\n    second: rho_770\n  - name: rho",
    );
    let err = Model::from_yaml_slice(mismatch.as_bytes()).unwrap_err();
    assert_eq!(err.code(), "topology-mismatch");

    let bad_transition = D0_TO_4PI.replace("orbital: [1, 0, 1]", "orbital: [0, 0, 1]");
    let err = Model::from_yaml_slice(bad_transition.as_bytes()).unwrap_err();
    assert_eq!(err.code(), "unsupported-transition");

    let err = Model::from_yaml_slice(b"topology: {kind: two-body}").unwrap_err();
    assert_eq!(err.code(), "yaml-deserialize");
}

#[test]
fn config_round_trips_through_yaml() {
    let config: ModelConfig = serde_yaml::from_str(D_TO_3PI).expect("parse");
    let text = serde_yaml::to_string(&config).expect("serialize");
    let again: ModelConfig = serde_yaml::from_str(&text).expect("reparse");
    assert_eq!(config, again);
}

#[test]
fn model_is_generic_over_the_scalar() {
    let model = model();
    let point = [Dual::variable(0.6), Dual::constant(1.2)];
    let dual = model.amplitudes(&point).expect("ok");
    let plain = model.amplitudes(&[0.6, 1.2]).expect("ok");
    for (d, p) in dual.iter().zip(&plain) {
        assert!((d.re.re - p.re).abs() < 1e-12);
        assert!((d.im.re - p.im).abs() < 1e-12);
    }
}
