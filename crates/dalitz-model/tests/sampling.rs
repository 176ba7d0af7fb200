use std::sync::Arc;

use dalitz_core::Catalogue;
use dalitz_model::{uniform_dalitz_points, SampleOpts, ThreeBodyTopology};

fn d_to_3pi() -> ThreeBodyTopology {
    let catalogue = Catalogue::builtin();
    let pi = catalogue.particle("pi").expect("pion");
    ThreeBodyTopology {
        parent: catalogue.particle("d").expect("d"),
        a: Arc::clone(&pi),
        b: Arc::clone(&pi),
        c: pi,
    }
}

fn opts(count: usize, seed: u64) -> SampleOpts {
    SampleOpts {
        chunk_size: 256,
        ..SampleOpts::new(count, seed)
    }
}

#[test]
fn sampled_points_lie_inside() {
    let topology = d_to_3pi();
    let points = uniform_dalitz_points(&topology, &opts(1000, 11)).expect("sampled");
    assert_eq!(points.len(), 1000);
    assert!(points.iter().all(|p| topology.contains(p.m2_ab, p.m2_bc)));
}

#[test]
fn sampling_is_reproducible_and_thread_independent() {
    let topology = d_to_3pi();
    let reference = uniform_dalitz_points(&topology, &opts(700, 42)).expect("sampled");
    for threads in [1, 4] {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .expect("pool");
        let again = pool
            .install(|| uniform_dalitz_points(&topology, &opts(700, 42)))
            .expect("sampled");
        assert_eq!(again, reference);
    }
    let other = uniform_dalitz_points(&topology, &opts(700, 43)).expect("sampled");
    assert_ne!(other, reference);
}

#[test]
fn points_cover_the_plot() {
    let topology = d_to_3pi();
    let points = uniform_dalitz_points(&topology, &opts(4000, 5)).expect("sampled");
    let mean_ab = points.iter().map(|p| p.m2_ab).sum::<f64>() / points.len() as f64;
    let mean_bc = points.iter().map(|p| p.m2_bc).sum::<f64>() / points.len() as f64;
    // Identical daughters: both projections share one distribution.
    assert!((mean_ab - mean_bc).abs() < 0.05, "{mean_ab} vs {mean_bc}");
}

#[test]
fn zero_count_yields_nothing() {
    let points = uniform_dalitz_points(&d_to_3pi(), &opts(0, 1)).expect("empty");
    assert!(points.is_empty());
}

#[test]
fn exhausted_proposals_are_reported() {
    let limited = SampleOpts {
        max_attempts: 1,
        ..opts(10, 3)
    };
    let err = uniform_dalitz_points(&d_to_3pi(), &limited).unwrap_err();
    assert_eq!(err.code(), "sampling-exhausted");
}
