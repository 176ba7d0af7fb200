#![deny(missing_docs)]
#![doc = "Resonance models for three- and four-body decays, coherent aggregation, interference normalization, YAML model assembly and uniform Dalitz sampling."]

/// Coherent sums and interference normalization.
pub mod aggregate;
/// Sum type over all resonance models.
pub mod amplitude;
/// Model descriptions and assembly.
pub mod config;
/// Four-body resonance models.
pub mod four_body;
/// Model entry points.
pub mod model;
/// Uniform Dalitz-plot sampling.
pub mod sample;
/// Three-body resonance models.
pub mod three_body;

pub use aggregate::{intensity, normalization, normalized_intensity, InterferenceMatrix, MatrixRecord};
pub use amplitude::{Amplitude, Breakdown, Component};
pub use config::{ComponentConfig, ComponentKind, ModelConfig, TopologyConfig};
pub use four_body::{Cascade, FourBodyBreakdown, FourBodyDecay, FourBodyKind, FourBodyTopology, StageAngles};
pub use model::{BatchOpts, Model};
pub use sample::{uniform_dalitz_points, SampleOpts};
pub use three_body::{ThreeBodyBreakdown, ThreeBodyDecay, ThreeBodyKind, ThreeBodyTopology};
