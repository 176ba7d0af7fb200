//! Uniform Dalitz-plot points by rejection from the kinematic bounding box.

use dalitz_core::{DalitzError, ErrorInfo, RngHandle};
use dalitz_dyn::phase_space::pair_range;
use dalitz_dyn::DalitzPoint;
use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::three_body::ThreeBodyTopology;

fn default_chunk_size() -> usize {
    1024
}

fn default_max_attempts() -> usize {
    1_000_000
}

/// Sampling options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleOpts {
    /// Number of points to produce.
    pub count: usize,
    /// Master seed; chunk `k` draws from substream `k`.
    pub seed: u64,
    /// Points per chunk.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Proposal limit per chunk before giving up.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

impl SampleOpts {
    /// Options with default chunking.
    pub fn new(count: usize, seed: u64) -> Self {
        Self {
            count,
            seed,
            chunk_size: default_chunk_size(),
            max_attempts: default_max_attempts(),
        }
    }
}

/// Draws `opts.count` points uniformly distributed over the Dalitz plot.
///
/// Chunks are generated in parallel, each from its own substream, and
/// concatenated in chunk order, so the output only depends on `opts`.
pub fn uniform_dalitz_points(
    topology: &ThreeBodyTopology,
    opts: &SampleOpts,
) -> Result<Vec<DalitzPoint<f64>>, DalitzError> {
    let chunk_size = opts.chunk_size.max(1);
    let chunks = opts.count.div_ceil(chunk_size);
    let ab = pair_range(&topology.parent, &topology.a, &topology.b, &topology.c);
    let bc = pair_range(&topology.parent, &topology.b, &topology.c, &topology.a);

    let parts: Vec<Vec<DalitzPoint<f64>>> = (0..chunks)
        .into_par_iter()
        .map(|chunk| {
            let wanted = chunk_size.min(opts.count - chunk * chunk_size);
            sample_chunk(topology, ab, bc, wanted, chunk as u64, opts)
        })
        .collect::<Result<_, _>>()?;

    info!(
        "event=sampling_complete module=dalitz-model points={} chunks={} seed={}",
        opts.count, chunks, opts.seed
    );
    Ok(parts.into_iter().flatten().collect())
}

fn sample_chunk(
    topology: &ThreeBodyTopology,
    ab: (f64, f64),
    bc: (f64, f64),
    wanted: usize,
    chunk: u64,
    opts: &SampleOpts,
) -> Result<Vec<DalitzPoint<f64>>, DalitzError> {
    let mut rng = RngHandle::substream(opts.seed, chunk);
    let mut points = Vec::with_capacity(wanted);
    let mut attempts = 0usize;
    while points.len() < wanted {
        if attempts >= opts.max_attempts {
            return Err(DalitzError::Model(
                ErrorInfo::new("sampling-exhausted", "proposal limit reached before the chunk was filled")
                    .with_context("chunk", chunk.to_string())
                    .with_context("accepted", points.len().to_string())
                    .with_context("attempts", attempts.to_string()),
            ));
        }
        attempts += 1;
        let m2_ab = rng.uniform(ab.0, ab.1);
        let m2_bc = rng.uniform(bc.0, bc.1);
        if topology.contains(m2_ab, m2_bc) {
            points.push(DalitzPoint::new(m2_ab, m2_bc));
        }
    }
    Ok(points)
}
