//! Resonance models of a three-body decay `P → a b c` with the resonance
//! in the `(a b)` pair.

use std::sync::Arc;

use dalitz_core::{Complex, DalitzError, LineShapeParams, Particle, Real, Resonance, Wave};
use dalitz_dyn::guard::{finite_or, width_or_nominal, Term};
use dalitz_dyn::{
    blatt_weisskopf, breit_wigner, flatte, relativistic_width, valid3, zemach3, DalitzPoint,
    FlatteChannel, Substitution,
};
use serde::Serialize;

/// Parent and daughters of a three-body decay, shared by every model of
/// the same decay.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreeBodyTopology {
    /// Decaying particle.
    pub parent: Arc<Particle>,
    /// First daughter of the resonant pair.
    pub a: Arc<Particle>,
    /// Second daughter of the resonant pair.
    pub b: Arc<Particle>,
    /// Bachelor.
    pub c: Arc<Particle>,
}

impl ThreeBodyTopology {
    /// Whether the point lies inside the Dalitz plot.
    pub fn contains<T: Real>(&self, m2_ab: T, m2_bc: T) -> bool {
        valid3(m2_ab, m2_bc, &self.parent, &self.a, &self.b, &self.c)
    }
}

/// Line shape of a three-body resonance model.
#[derive(Debug, Clone, PartialEq)]
pub enum ThreeBodyKind {
    /// Constant amplitude `1` inside the Dalitz plot.
    NonResonant,
    /// Relativistic Breit-Wigner resonance.
    BreitWigner {
        /// Resonance record.
        resonance: Arc<Resonance>,
        /// Spin of the resonance, also the orbital momentum at both vertices.
        wave: Wave,
        /// Nominal width.
        width: f64,
    },
    /// Flatté resonance.
    Flatte {
        /// Resonance record.
        resonance: Arc<Resonance>,
        /// Spin of the resonance.
        wave: Wave,
        /// Coupled channels.
        channels: Vec<FlatteChannel<f64>>,
    },
}

/// One resonance model of a three-body decay.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreeBodyDecay {
    topology: Arc<ThreeBodyTopology>,
    kind: ThreeBodyKind,
}

/// Every intermediate factor of one three-body evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreeBodyBreakdown<T> {
    /// Whether the point passed the phase-space gate.
    pub inside: bool,
    /// Barrier ratio at the `P → R c` vertex.
    pub parent_form_factor: T,
    /// Barrier ratio at the `R → a b` vertex.
    pub resonance_form_factor: T,
    /// Line-shape propagator.
    pub propagator: Complex<T>,
    /// Zemach factor.
    pub angular: T,
    /// Product of all factors.
    pub amplitude: Complex<T>,
    /// Factors replaced because they were not finite.
    pub substitutions: Vec<Substitution>,
}

impl<T: Real> ThreeBodyBreakdown<T> {
    fn outside() -> Self {
        Self {
            inside: false,
            parent_form_factor: T::zero(),
            resonance_form_factor: T::zero(),
            propagator: Complex::zero(),
            angular: T::zero(),
            amplitude: Complex::zero(),
            substitutions: Vec::new(),
        }
    }

    fn flat() -> Self {
        Self {
            inside: true,
            parent_form_factor: T::one(),
            resonance_form_factor: T::one(),
            propagator: Complex::one(),
            angular: T::one(),
            amplitude: Complex::one(),
            substitutions: Vec::new(),
        }
    }
}

impl ThreeBodyDecay {
    /// Constant amplitude inside the Dalitz plot.
    pub fn non_resonant(topology: Arc<ThreeBodyTopology>) -> Self {
        Self {
            topology,
            kind: ThreeBodyKind::NonResonant,
        }
    }

    /// Resonance in the `(a b)` pair with the line shape of its record.
    pub fn resonant(
        topology: Arc<ThreeBodyTopology>,
        resonance: Arc<Resonance>,
    ) -> Result<Self, DalitzError> {
        let wave = Wave::try_from(resonance.particle().spin())?;
        let kind = match *resonance.shape() {
            LineShapeParams::BreitWigner { width } => ThreeBodyKind::BreitWigner {
                resonance,
                wave,
                width,
            },
            LineShapeParams::Flatte {
                g_pp,
                g_kk,
                m_pp,
                m_kk,
            } => ThreeBodyKind::Flatte {
                resonance,
                wave,
                channels: vec![
                    FlatteChannel::symmetric(g_pp, m_pp),
                    FlatteChannel::symmetric(g_kk, m_kk),
                ],
            },
        };
        Ok(Self { topology, kind })
    }

    /// Shared topology.
    pub fn topology(&self) -> &Arc<ThreeBodyTopology> {
        &self.topology
    }

    /// Line shape.
    pub fn kind(&self) -> &ThreeBodyKind {
        &self.kind
    }

    /// Amplitude at `(m²_ab, m²_bc)`; zero outside the Dalitz plot.
    pub fn value<T: Real>(&self, m2_ab: T, m2_bc: T) -> Complex<T> {
        self.breakdown(m2_ab, m2_bc).amplitude
    }

    /// `value(x, y) + value(y, x)`, for identical `a` and `c`.
    pub fn value_sym<T: Real>(&self, m2_ab: T, m2_bc: T) -> Complex<T> {
        self.value(m2_ab, m2_bc) + self.value(m2_bc, m2_ab)
    }

    /// Amplitude at a point.
    pub fn value_at<T: Real>(&self, point: DalitzPoint<T>) -> Complex<T> {
        self.value(point.m2_ab, point.m2_bc)
    }

    /// Evaluates the amplitude keeping every intermediate factor.
    pub fn breakdown<T: Real>(&self, m2_ab: T, m2_bc: T) -> ThreeBodyBreakdown<T> {
        if !self.topology.contains(m2_ab, m2_bc) {
            return ThreeBodyBreakdown::outside();
        }
        match &self.kind {
            ThreeBodyKind::NonResonant => ThreeBodyBreakdown::flat(),
            ThreeBodyKind::BreitWigner {
                resonance,
                wave,
                width,
            } => {
                let r = resonance.particle();
                let (m_a, m_b) = (T::from_f64(self.topology.a.m()), T::from_f64(self.topology.b.m()));
                let mut substitutions = Vec::new();
                let running = relativistic_width(
                    T::from_f64(r.m()),
                    T::from_f64(*width),
                    *wave,
                    T::from_f64(r.r()),
                    m2_ab,
                    m_a,
                    m_b,
                );
                let width = width_or_nominal(
                    running,
                    T::from_f64(*width),
                    T::from_f64(r.m()),
                    m_a + m_b,
                    Term::Width,
                    &mut substitutions,
                );
                let propagator = breit_wigner(T::from_f64(r.m()), m2_ab, width);
                self.resonant_breakdown(r, *wave, m2_ab, m2_bc, propagator, substitutions)
            }
            ThreeBodyKind::Flatte {
                resonance,
                wave,
                channels,
            } => {
                let channels: Vec<FlatteChannel<T>> = channels
                    .iter()
                    .map(|channel| FlatteChannel {
                        coupling: T::from_f64(channel.coupling),
                        m_a: T::from_f64(channel.m_a),
                        m_b: T::from_f64(channel.m_b),
                    })
                    .collect();
                let r = resonance.particle();
                let propagator = flatte(T::from_f64(r.m()), m2_ab, &channels);
                self.resonant_breakdown(r, *wave, m2_ab, m2_bc, propagator, Vec::new())
            }
        }
    }

    fn resonant_breakdown<T: Real>(
        &self,
        r: &Particle,
        wave: Wave,
        m2_ab: T,
        m2_bc: T,
        propagator: Complex<T>,
        mut substitutions: Vec<Substitution>,
    ) -> ThreeBodyBreakdown<T> {
        let top = &*self.topology;
        let lift = T::from_f64;
        let m_ab = m2_ab.sqrt();

        let parent_form_factor = finite_or(
            blatt_weisskopf(wave, lift(top.parent.r2()), lift(top.parent.m2()), m_ab, lift(top.c.m()))
                / blatt_weisskopf(
                    wave,
                    lift(top.parent.r2()),
                    lift(top.parent.m2()),
                    lift(r.m()),
                    lift(top.c.m()),
                ),
            T::one(),
            Term::ParentFormFactor,
            &mut substitutions,
        );
        let resonance_form_factor = finite_or(
            blatt_weisskopf(wave, lift(r.r2()), m2_ab, lift(top.a.m()), lift(top.b.m()))
                / blatt_weisskopf(wave, lift(r.r2()), lift(r.m2()), lift(top.a.m()), lift(top.b.m())),
            T::one(),
            Term::ResonanceFormFactor,
            &mut substitutions,
        );
        let angular = finite_or(
            zemach3(
                wave,
                m2_ab,
                m2_bc,
                lift(top.parent.m2()),
                lift(top.a.m2()),
                lift(top.b.m2()),
                lift(top.c.m2()),
            ),
            T::zero(),
            Term::Angular,
            &mut substitutions,
        );

        let amplitude = propagator.scale(parent_form_factor * resonance_form_factor * angular);
        ThreeBodyBreakdown {
            inside: true,
            parent_form_factor,
            resonance_form_factor,
            propagator,
            angular,
            amplitude,
            substitutions,
        }
    }
}
