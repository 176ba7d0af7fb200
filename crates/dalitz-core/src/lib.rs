#![deny(missing_docs)]
#![doc = "Core scalar, complex-pair and particle catalogue types shared by the Dalitz amplitude crates."]

pub mod catalogue;
pub mod complex;
pub mod errors;
pub mod hash;
pub mod particle;
pub mod rng;
pub mod scalar;
pub mod serde;

pub use catalogue::{Catalogue, CatalogueConfig, LineShapeParams, Resonance, KAON_MASS, PION_MASS};
pub use complex::Complex;
pub use errors::{DalitzError, ErrorInfo};
pub use hash::stable_hash_string;
pub use particle::{Particle, Wave};
pub use rng::{derive_substream_seed, RngHandle};
pub use scalar::{Dual, Real};
