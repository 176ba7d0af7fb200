#![deny(missing_docs)]
#![doc = "Scalar-generic kinematic and dynamical building blocks: phase-space gates, breakup momenta, Blatt-Weisskopf barriers, Breit-Wigner and Flatté propagators, Zemach angular factors and rest-frame boosts."]

/// Blatt-Weisskopf angular momentum barrier factors.
pub mod barrier;
/// Collinear Lorentz boosts between rest frames.
pub mod boost;
/// Two-body breakup momenta.
pub mod breakup;
/// Substitution of non-finite intermediate terms.
pub mod guard;
/// Breit-Wigner and Flatté propagators.
pub mod lineshape;
/// Kinematic region tests for three- and four-body decays.
pub mod phase_space;
/// Zemach angular correlation factors.
pub mod zemach;

pub use barrier::blatt_weisskopf;
pub use boost::Boost;
pub use breakup::{complex_p, p2};
pub use guard::{Reason, Substitution, Term};
pub use lineshape::{breit_wigner, flatte, relativistic_width, FlatteChannel};
pub use phase_space::{valid3, valid3_masses, valid5, DalitzPoint, FourBodyInvariants, FourBodyMasses};
pub use zemach::{zemach3, ChainAngular};
