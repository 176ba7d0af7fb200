use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dalitz_core::Dual;
use dalitz_model::{uniform_dalitz_points, BatchOpts, Model, SampleOpts, ThreeBodyTopology};

const MODEL: &str = r#"
topology:
  kind: three-body
  parent: d
  daughters: [pi, pi, pi]
components:
  - name: rho
    kind: resonant
    resonance: rho_770
    symmetrize: true
  - name: f0_980
    kind: resonant
    resonance: f0_980
    symmetrize: true
  - name: f2
    kind: resonant
    resonance: f2_1270
    symmetrize: true
"#;

fn points(count: usize) -> Vec<Vec<f64>> {
    let catalogue = dalitz_core::Catalogue::builtin();
    let pi = catalogue.particle("pi").expect("pion");
    let topology = ThreeBodyTopology {
        parent: catalogue.particle("d").expect("d"),
        a: pi.clone(),
        b: pi.clone(),
        c: pi,
    };
    uniform_dalitz_points(&topology, &SampleOpts::new(count, 2024))
        .expect("sample")
        .into_iter()
        .map(|p| vec![p.m2_ab, p.m2_bc])
        .collect()
}

fn bench_amplitudes(c: &mut Criterion) {
    let model = Model::from_yaml_slice(MODEL.as_bytes()).expect("model");
    let batch = points(10_000);

    c.bench_function("amplitudes_single_point", |b| {
        b.iter(|| model.amplitudes(black_box(&[0.6, 1.2])).expect("eval"));
    });
    c.bench_function("amplitudes_single_point_dual", |b| {
        let point = [Dual::variable(0.6), Dual::constant(1.2)];
        b.iter(|| model.amplitudes(black_box(&point)).expect("eval"));
    });
    c.bench_function("evaluate_batch_10k", |b| {
        b.iter(|| {
            model
                .evaluate_batch(black_box(&batch), &BatchOpts::default())
                .expect("batch")
        });
    });
}

criterion_group!(benches, bench_amplitudes);
criterion_main!(benches);
