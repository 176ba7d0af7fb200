//! Zemach tensor angular factors.

use dalitz_core::{DalitzError, ErrorInfo, Real, Wave};
use serde::{Deserialize, Serialize};

/// Three-body Zemach factor for a resonance of spin `spin` in `(a b)`
/// recoiling against `c`.
///
/// `m2_parent` is the squared mass of the decaying particle.
pub fn zemach3<T: Real>(
    spin: Wave,
    m2_ab: T,
    m2_bc: T,
    m2_parent: T,
    m2_a: T,
    m2_b: T,
    m2_c: T,
) -> T {
    match spin {
        Wave::S => T::one(),
        Wave::P => vector_term(m2_ab, m2_bc, m2_parent, m2_a, m2_b, m2_c),
        Wave::D => {
            let two = T::from_f64(2.0);
            let z1 = vector_term(m2_ab, m2_bc, m2_parent, m2_a, m2_b, m2_c);
            let pc = m2_parent - m2_c;
            let ab = m2_a - m2_b;
            let parent_side = m2_ab - two * m2_parent - two * m2_c + pc * pc / m2_ab;
            let pair_side = m2_ab - two * m2_a - two * m2_b + ab * ab / m2_ab;
            z1 * z1 - parent_side * pair_side / T::from_f64(3.0)
        }
    }
}

fn vector_term<T: Real>(m2_ab: T, m2_bc: T, m2_parent: T, m2_a: T, m2_b: T, m2_c: T) -> T {
    m2_parent + m2_a + m2_b + m2_c
        - m2_ab
        - T::from_f64(2.0) * m2_bc
        - (m2_parent - m2_c) * (m2_a - m2_b) / m2_ab
}

/// Angular factor of one stage `J → j + l` of a sequential decay, in terms
/// of `z² = p*²/s` and `cos²θ` of the rest-frame decay angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainAngular {
    /// `0 → 0 + S`: isotropic.
    ScalarToScalar,
    /// `0 → 1 + P`: `(1 + z²) cos²θ`.
    ScalarToVectorP,
    /// `1 → 1 + S`: `1 + z² cos²θ`.
    VectorToVectorS,
    /// `1 → 1 + D`: `1 + (3 + 4z²) cos²θ`.
    VectorToVectorD,
}

impl ChainAngular {
    /// Selects the factor for parent spin `parent`, intermediate spin
    /// `intermediate` and orbital momentum `orbital`.
    pub fn from_spins(parent: u32, intermediate: u32, orbital: u32) -> Result<Self, DalitzError> {
        match (parent, intermediate, orbital) {
            (0, 0, 0) => Ok(ChainAngular::ScalarToScalar),
            (0, 1, 1) => Ok(ChainAngular::ScalarToVectorP),
            (1, 1, 0) => Ok(ChainAngular::VectorToVectorS),
            (1, 1, 2) => Ok(ChainAngular::VectorToVectorD),
            _ => Err(DalitzError::Model(
                ErrorInfo::new(
                    "unsupported-transition",
                    "no closed-form angular factor for this spin transition",
                )
                .with_context("parent_spin", parent.to_string())
                .with_context("intermediate_spin", intermediate.to_string())
                .with_context("orbital", orbital.to_string())
                .with_hint("supported (J, j, l): (0,0,0), (0,1,1), (1,1,0), (1,1,2)"),
            )),
        }
    }

    /// The `(J, j, l)` triple.
    pub fn spins(self) -> (u32, u32, u32) {
        match self {
            ChainAngular::ScalarToScalar => (0, 0, 0),
            ChainAngular::ScalarToVectorP => (0, 1, 1),
            ChainAngular::VectorToVectorS => (1, 1, 0),
            ChainAngular::VectorToVectorD => (1, 1, 2),
        }
    }

    /// Evaluates the factor.
    pub fn value<T: Real>(self, z2: T, cos2_theta: T) -> T {
        match self {
            ChainAngular::ScalarToScalar => T::one(),
            ChainAngular::ScalarToVectorP => (T::one() + z2) * cos2_theta,
            ChainAngular::VectorToVectorS => T::one() + z2 * cos2_theta,
            ChainAngular::VectorToVectorD => {
                T::one() + (T::from_f64(3.0) + T::from_f64(4.0) * z2) * cos2_theta
            }
        }
    }
}
