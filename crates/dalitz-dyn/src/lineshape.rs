//! Dynamical propagators.
//!
//! Both functions are pure and defined everywhere the arithmetic is; the
//! caller gates on the kinematic region before using the result.

use dalitz_core::{Complex, Real, Wave};

use crate::barrier::blatt_weisskopf;
use crate::breakup::{complex_p, p2};

/// Mass dependent width of a relativistic Breit-Wigner:
/// `Γ₀ · (M / √m²) · (q/q₀)^(2L+1) · (F(q) / F(q₀))²`.
pub fn relativistic_width<T: Real>(
    mass: T,
    width: T,
    l: Wave,
    radius: T,
    m2: T,
    m_a: T,
    m_b: T,
) -> T {
    let m2_pole = mass * mass;
    let r2 = radius * radius;
    let ratio = p2(m2, m_a, m_b) / p2(m2_pole, m_a, m_b);
    let barrier = blatt_weisskopf(l, r2, m2, m_a, m_b) / blatt_weisskopf(l, r2, m2_pole, m_a, m_b);
    width * (mass / m2.sqrt()) * ratio.powi(l.as_u32()) * ratio.sqrt() * barrier * barrier
}

/// Breit-Wigner propagator `1 / (M² − m² − i·M·Γ)`.
pub fn breit_wigner<T: Real>(mass: T, m2: T, width: T) -> Complex<T> {
    Complex::new(mass * mass - m2, -(mass * width)).inverse()
}

/// One decay channel of a Flatté resonance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatteChannel<T> {
    /// Coupling constant `g`; enters squared.
    pub coupling: T,
    /// First daughter mass.
    pub m_a: T,
    /// Second daughter mass.
    pub m_b: T,
}

impl<T: Real> FlatteChannel<T> {
    /// Channel decaying into two particles of equal mass.
    pub fn symmetric(coupling: T, mass: T) -> Self {
        Self {
            coupling,
            m_a: mass,
            m_b: mass,
        }
    }
}

/// Flatté propagator `1 / (M² − m² − i·(2/√m²)·Σ g²·p(m²))` with complex
/// breakup momenta, so channels below threshold contribute to the real part.
pub fn flatte<T: Real>(mass: T, m2: T, channels: &[FlatteChannel<T>]) -> Complex<T> {
    let coupled = channels.iter().fold(Complex::zero(), |acc, channel| {
        acc + complex_p(m2, channel.m_a, channel.m_b).scale(channel.coupling.square())
    });
    let width_term = (Complex::one_i() * coupled).scale(T::from_f64(2.0) / m2.sqrt());
    (Complex::from_real(mass * mass - m2) - width_term).inverse()
}
