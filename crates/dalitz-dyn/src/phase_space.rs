//! Kinematic region tests.
//!
//! Points outside the region are not errors: every amplitude evaluates to
//! zero there. The tests compare with `<`/`>` on possibly non-finite
//! intermediates, so a NaN anywhere always rejects the point.

use dalitz_core::{Particle, Real};
use serde::{Deserialize, Serialize};

/// Whether `(m2_ab, m2_bc)` lies inside the Dalitz plot of `P → a b c`.
pub fn valid3<T: Real>(
    m2_ab: T,
    m2_bc: T,
    parent: &Particle,
    a: &Particle,
    b: &Particle,
    c: &Particle,
) -> bool {
    valid3_masses(
        m2_ab,
        m2_bc,
        T::from_f64(parent.m2()),
        T::from_f64(a.m2()),
        T::from_f64(b.m2()),
        T::from_f64(c.m2()),
    )
}

/// [`valid3`] on raw squared masses. The parent and daughters may be
/// running (off-shell) masses.
pub fn valid3_masses<T: Real>(m2_ab: T, m2_bc: T, m2_p: T, m2_a: T, m2_b: T, m2_c: T) -> bool {
    let two = T::from_f64(2.0);
    let lower = m2_a + m2_b + two * (m2_a * m2_b).sqrt();
    let upper = m2_p + m2_c - two * (m2_p * m2_c).sqrt();
    if !(m2_ab >= lower && m2_ab <= upper) {
        return false;
    }

    let m_ab = m2_ab.sqrt();
    let e_b = (m2_ab - m2_a + m2_b) / (two * m_ab);
    let e_c = (m2_p - m2_ab - m2_c) / (two * m_ab);
    let p_b = (e_b * e_b - m2_b).sqrt();
    let p_c = (e_c * e_c - m2_c).sqrt();

    (m2_bc - m2_b - m2_c - two * e_b * e_c).abs() <= two * p_b * p_c
}

/// Allowed range of a pair invariant `m²_xy` in `P → x y s`:
/// `[(m_x + m_y)², (M − m_s)²]`.
pub fn pair_range(parent: &Particle, x: &Particle, y: &Particle, spectator: &Particle) -> (f64, f64) {
    let low = x.m() + y.m();
    let high = parent.m() - spectator.m();
    (low * low, high * high)
}

/// Coordinates of a three-body Dalitz point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DalitzPoint<T> {
    /// Invariant squared mass of `a b`.
    pub m2_ab: T,
    /// Invariant squared mass of `b c`.
    pub m2_bc: T,
}

impl<T: Real> DalitzPoint<T> {
    /// Creates a point.
    pub fn new(m2_ab: T, m2_bc: T) -> Self {
        Self { m2_ab, m2_bc }
    }

    /// The point with both coordinates exchanged.
    pub fn swapped(self) -> Self {
        Self::new(self.m2_bc, self.m2_ab)
    }

    /// Third invariant `m²_ca` from `m²_ab + m²_bc + m²_ca = M² + Σ m²ᵢ`.
    pub fn m2_ca(self, parent: &Particle, a: &Particle, b: &Particle, c: &Particle) -> T {
        T::from_f64(parent.m2() + a.m2() + b.m2() + c.m2()) - self.m2_ab - self.m2_bc
    }
}

/// Final-state particles of a four-body decay `P → a b c d`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FourBodyMasses {
    /// Decaying particle.
    pub parent: Particle,
    /// Daughter `a` (from the inner resonance).
    pub a: Particle,
    /// Daughter `b` (from the inner resonance).
    pub b: Particle,
    /// Bachelor `c` of the outer resonance.
    pub c: Particle,
    /// Bachelor `d` of the parent.
    pub d: Particle,
}

/// The five independent invariants of a four-body decay, in evaluation
/// order `(m²₁₂, m²₁₄, m²₂₃, m²₃₄, m²₁₃)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FourBodyInvariants<T> {
    /// Invariant squared mass of `a b`.
    pub m2_12: T,
    /// Invariant squared mass of `a d`.
    pub m2_14: T,
    /// Invariant squared mass of `b c`.
    pub m2_23: T,
    /// Invariant squared mass of `c d`.
    pub m2_34: T,
    /// Invariant squared mass of `a c`.
    pub m2_13: T,
}

impl<T: Real> FourBodyInvariants<T> {
    /// Creates the invariants in evaluation order.
    pub fn new(m2_12: T, m2_14: T, m2_23: T, m2_34: T, m2_13: T) -> Self {
        Self {
            m2_12,
            m2_14,
            m2_23,
            m2_34,
            m2_13,
        }
    }

    /// Builds the invariants from a slice in evaluation order.
    pub fn from_slice(values: &[T]) -> Option<Self> {
        match values {
            [m2_12, m2_14, m2_23, m2_34, m2_13] => {
                Some(Self::new(*m2_12, *m2_14, *m2_23, *m2_34, *m2_13))
            }
            _ => None,
        }
    }

    /// Invariant squared mass of `a b c`:
    /// `m²₁₂ + m²₁₃ + m²₂₃ − m²_a − m²_b − m²_c`.
    pub fn m2_123(&self, masses: &FourBodyMasses) -> T {
        self.m2_12 + self.m2_13 + self.m2_23
            - T::from_f64(masses.a.m2() + masses.b.m2() + masses.c.m2())
    }

    /// Invariant squared mass of `b d` from the sum rule
    /// `Σ m²ᵢⱼ = M² + 2 Σ m²ᵢ`.
    pub fn m2_24(&self, masses: &FourBodyMasses) -> T {
        let total = masses.parent.m2()
            + 2.0 * (masses.a.m2() + masses.b.m2() + masses.c.m2() + masses.d.m2());
        T::from_f64(total) - (self.m2_12 + self.m2_13 + self.m2_14 + self.m2_23 + self.m2_34)
    }

    /// Invariants with daughters `a` and `b` exchanged.
    pub fn swap_ab(&self, masses: &FourBodyMasses) -> Self {
        Self::new(self.m2_12, self.m2_24(masses), self.m2_13, self.m2_34, self.m2_23)
    }
}

/// Whether a four-body point is reachable through `P → R₁ d`, `R₁ → a b c`.
///
/// Two nested three-body checks on running masses:
/// `P → (ab) c d` seen as `(abc)` against `(cd)`, and `(abc) → a b c`.
pub fn valid5<T: Real>(invariants: &FourBodyInvariants<T>, masses: &FourBodyMasses) -> bool {
    let m2_123 = invariants.m2_123(masses);
    let m2_a = T::from_f64(masses.a.m2());
    let m2_b = T::from_f64(masses.b.m2());
    let m2_c = T::from_f64(masses.c.m2());
    let m2_d = T::from_f64(masses.d.m2());

    if !valid3_masses(
        m2_123,
        invariants.m2_34,
        T::from_f64(masses.parent.m2()),
        invariants.m2_12,
        m2_c,
        m2_d,
    ) {
        return false;
    }
    valid3_masses(invariants.m2_12, invariants.m2_23, m2_123, m2_a, m2_b, m2_c)
}
