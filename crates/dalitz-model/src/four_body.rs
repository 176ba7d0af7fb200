//! Resonance models of a four-body decay `P → a b c d`.
//!
//! The cascade runs `P → R₁ d`, `R₁ → R₂ c`, `R₂ → a b`. Angular factors are
//! formed in the rest frame of the decaying resonance: the spectator momentum
//! known in the frame one level up is boosted with `v = p / E` before
//! `cos²θ` and `z²` are computed.

use std::sync::Arc;

use dalitz_core::{Complex, DalitzError, ErrorInfo, LineShapeParams, Particle, Real, Resonance, Wave};
use dalitz_dyn::guard::{finite_or, substitute, width_or_nominal, Reason, Term};
use dalitz_dyn::{
    blatt_weisskopf, breit_wigner, p2, relativistic_width, valid5, Boost, ChainAngular,
    FourBodyInvariants, FourBodyMasses, Substitution,
};
use serde::Serialize;

/// Parent and daughters of a four-body decay.
#[derive(Debug, Clone, PartialEq)]
pub struct FourBodyTopology {
    /// Decaying particle.
    pub parent: Arc<Particle>,
    /// First daughter of the inner resonance.
    pub a: Arc<Particle>,
    /// Second daughter of the inner resonance.
    pub b: Arc<Particle>,
    /// Bachelor of the outer resonance.
    pub c: Arc<Particle>,
    /// Bachelor of the parent.
    pub d: Arc<Particle>,
}

impl FourBodyTopology {
    /// Plain copies of the masses used by the phase-space checks.
    pub fn masses(&self) -> FourBodyMasses {
        FourBodyMasses {
            parent: *self.parent,
            a: *self.a,
            b: *self.b,
            c: *self.c,
            d: *self.d,
        }
    }
}

/// A Breit-Wigner resonance inside a cascade.
#[derive(Debug, Clone, PartialEq)]
pub struct CascadeResonance {
    /// Resonance record.
    pub resonance: Arc<Resonance>,
    /// Nominal width.
    pub width: f64,
}

impl CascadeResonance {
    fn from_record(resonance: Arc<Resonance>) -> Result<Self, DalitzError> {
        match *resonance.shape() {
            LineShapeParams::BreitWigner { width } => Ok(Self { resonance, width }),
            LineShapeParams::Flatte { .. } => Err(DalitzError::Model(
                ErrorInfo::new(
                    "unsupported-line-shape",
                    "cascade resonances must use a Breit-Wigner line shape",
                )
                .with_context("mass", resonance.particle().m().to_string()),
            )),
        }
    }

    fn particle(&self) -> &Particle {
        self.resonance.particle()
    }
}

/// Two-resonance cascade `P → R₁ d → R₂ c d → a b c d`.
#[derive(Debug, Clone, PartialEq)]
pub struct Cascade {
    first: CascadeResonance,
    second: CascadeResonance,
    orbital: [Wave; 3],
    outer: ChainAngular,
    inner: ChainAngular,
}

impl Cascade {
    /// Builds the cascade. `orbital` holds the orbital momenta between
    /// `R₁ d`, `R₂ c` and `a b`.
    pub fn new(
        parent: &Particle,
        first: Arc<Resonance>,
        second: Arc<Resonance>,
        orbital: [u32; 3],
    ) -> Result<Self, DalitzError> {
        let outer = ChainAngular::from_spins(parent.spin(), first.particle().spin(), orbital[0])?;
        let inner =
            ChainAngular::from_spins(first.particle().spin(), second.particle().spin(), orbital[1])?;
        Ok(Self {
            first: CascadeResonance::from_record(first)?,
            second: CascadeResonance::from_record(second)?,
            orbital: [
                Wave::try_from(orbital[0])?,
                Wave::try_from(orbital[1])?,
                Wave::try_from(orbital[2])?,
            ],
            outer,
            inner,
        })
    }

    /// Outer resonance `R₁`.
    pub fn first(&self) -> &CascadeResonance {
        &self.first
    }

    /// Inner resonance `R₂`.
    pub fn second(&self) -> &CascadeResonance {
        &self.second
    }

    /// Orbital momenta `(l₁, l₂, l₃)`.
    pub fn orbital(&self) -> [Wave; 3] {
        self.orbital
    }
}

/// Line shape of a four-body resonance model.
#[derive(Debug, Clone, PartialEq)]
pub enum FourBodyKind {
    /// Constant amplitude `1` inside the phase space.
    NonResonant,
    /// Sequential two-resonance decay.
    Cascade(Cascade),
}

/// One resonance model of a four-body decay.
#[derive(Debug, Clone, PartialEq)]
pub struct FourBodyDecay {
    topology: Arc<FourBodyTopology>,
    kind: FourBodyKind,
}

/// Kinematics and value of one cascade angular factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StageAngles<T> {
    /// `p*² / s` in the resonance rest frame.
    pub z2: T,
    /// Squared cosine of the decay angle.
    pub cos2_theta: T,
    /// Zemach factor.
    pub value: T,
}

impl<T: Real> StageAngles<T> {
    fn isotropic() -> Self {
        Self {
            z2: T::zero(),
            cos2_theta: T::zero(),
            value: T::one(),
        }
    }

    fn substituted(value: T) -> Self {
        Self {
            z2: T::zero(),
            cos2_theta: T::zero(),
            value,
        }
    }
}

/// Every intermediate factor of one four-body evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FourBodyBreakdown<T> {
    /// Whether the point passed the phase-space gate.
    pub inside: bool,
    /// Invariant squared mass of `a b c`.
    pub m2_123: T,
    /// Barrier ratio at `P → R₁ d`.
    pub parent_form_factor: T,
    /// Barrier ratio at `R₁ → R₂ c`.
    pub resonance_form_factor: T,
    /// Barrier ratio at `R₂ → a b`.
    pub inner_form_factor: T,
    /// Running width of `R₁` at `m²_abc`.
    pub first_width: T,
    /// Running width of `R₂` at `m²_ab`.
    pub second_width: T,
    /// Propagator of `R₁` at `m²_abc`.
    pub first_propagator: Complex<T>,
    /// Propagator of `R₂` at `m²_ab`.
    pub second_propagator: Complex<T>,
    /// Angular factor of `P → R₁ d` in the `R₁` frame.
    pub outer_angular: StageAngles<T>,
    /// Angular factor of `R₁ → R₂ c` in the `R₂` frame.
    pub inner_angular: StageAngles<T>,
    /// Product of all factors.
    pub amplitude: Complex<T>,
    /// Factors replaced because they were not finite.
    pub substitutions: Vec<Substitution>,
}

impl<T: Real> FourBodyBreakdown<T> {
    fn constant(inside: bool, m2_123: T) -> Self {
        let (unit, amplitude) = if inside {
            (T::one(), Complex::one())
        } else {
            (T::zero(), Complex::zero())
        };
        Self {
            inside,
            m2_123,
            parent_form_factor: unit,
            resonance_form_factor: unit,
            inner_form_factor: unit,
            first_width: T::zero(),
            second_width: T::zero(),
            first_propagator: amplitude,
            second_propagator: amplitude,
            outer_angular: StageAngles::substituted(unit),
            inner_angular: StageAngles::substituted(unit),
            amplitude,
            substitutions: Vec::new(),
        }
    }
}

/// Inputs of one rest-frame angular factor. The bachelor is already at rest
/// in the decaying system's frame; the spectator is known one frame up.
struct Stage<T> {
    m2_system: T,
    p2_bachelor: T,
    e_bachelor: T,
    m2_bachelor: T,
    p2_spectator: T,
    e_spectator: T,
    m2_spectator: T,
    m2_pair: T,
}

fn stage_angles<T: Real>(
    transition: ChainAngular,
    stage: Stage<T>,
    term: Term,
    substitutions: &mut Vec<Substitution>,
) -> StageAngles<T> {
    if transition == ChainAngular::ScalarToScalar {
        return StageAngles::isotropic();
    }
    if !(stage.p2_spectator > T::zero() && stage.p2_bachelor > T::zero()) {
        let zero = substitute(term, Reason::NonPositiveMomentum, T::zero(), substitutions);
        return StageAngles::substituted(zero);
    }

    let p_spectator = stage.p2_spectator.sqrt();
    let e_system = (stage.m2_system + stage.p2_spectator).sqrt();
    let boost = match Boost::from_momentum(p_spectator, e_system) {
        Some(boost) => boost,
        None => {
            let zero = substitute(term, Reason::Superluminal, T::zero(), substitutions);
            return StageAngles::substituted(zero);
        }
    };
    let (p_rest, e_rest) = boost.apply(p_spectator, stage.e_spectator);
    let p2_rest = p_rest * p_rest;

    let two = T::from_f64(2.0);
    let dot = -(stage.m2_pair - stage.m2_bachelor - stage.m2_spectator
        - two * stage.e_bachelor * e_rest)
        / two;
    let cos2_theta = dot * dot / (stage.p2_bachelor * p2_rest);
    let s = stage.m2_system + stage.m2_spectator + two * stage.m2_system.sqrt() * e_rest;
    let z2 = p2_rest / s;
    let value = finite_or(transition.value(z2, cos2_theta), T::zero(), term, substitutions);

    StageAngles {
        z2,
        cos2_theta,
        value,
    }
}

impl FourBodyDecay {
    /// Constant amplitude inside the phase space.
    pub fn non_resonant(topology: Arc<FourBodyTopology>) -> Self {
        Self {
            topology,
            kind: FourBodyKind::NonResonant,
        }
    }

    /// Two-resonance cascade.
    pub fn cascade(topology: Arc<FourBodyTopology>, cascade: Cascade) -> Self {
        Self {
            topology,
            kind: FourBodyKind::Cascade(cascade),
        }
    }

    /// Shared topology.
    pub fn topology(&self) -> &Arc<FourBodyTopology> {
        &self.topology
    }

    /// Line shape.
    pub fn kind(&self) -> &FourBodyKind {
        &self.kind
    }

    /// Amplitude at the given invariants; zero outside the phase space.
    pub fn value<T: Real>(&self, invariants: &FourBodyInvariants<T>) -> Complex<T> {
        self.breakdown(invariants).amplitude
    }

    /// Amplitude symmetrized under exchange of daughters `a` and `b`.
    pub fn value_sym<T: Real>(&self, invariants: &FourBodyInvariants<T>) -> Complex<T> {
        let swapped = invariants.swap_ab(&self.topology.masses());
        self.value(invariants) + self.value(&swapped)
    }

    /// Evaluates the amplitude keeping every intermediate factor.
    pub fn breakdown<T: Real>(&self, invariants: &FourBodyInvariants<T>) -> FourBodyBreakdown<T> {
        let masses = self.topology.masses();
        let m2_123 = invariants.m2_123(&masses);
        if !valid5(invariants, &masses) {
            return FourBodyBreakdown::constant(false, m2_123);
        }
        match &self.kind {
            FourBodyKind::NonResonant => FourBodyBreakdown::constant(true, m2_123),
            FourBodyKind::Cascade(cascade) => self.cascade_breakdown(cascade, invariants, m2_123),
        }
    }

    fn cascade_breakdown<T: Real>(
        &self,
        cascade: &Cascade,
        inv: &FourBodyInvariants<T>,
        m2_123: T,
    ) -> FourBodyBreakdown<T> {
        let top = &*self.topology;
        let lift = T::from_f64;
        let [l1, l2, l3] = cascade.orbital;
        let r1 = cascade.first.particle();
        let r2 = cascade.second.particle();
        let (m_a, m_b, m_c, m_d) = (lift(top.a.m()), lift(top.b.m()), lift(top.c.m()), lift(top.d.m()));
        let (m2_b, m2_c, m2_d) = (lift(top.b.m2()), lift(top.c.m2()), lift(top.d.m2()));
        let m_12 = inv.m2_12.sqrt();
        let m_123 = m2_123.sqrt();
        let mut substitutions = Vec::new();

        let parent_form_factor = finite_or(
            blatt_weisskopf(l1, lift(top.parent.r2()), lift(top.parent.m2()), m_123, m_d)
                / blatt_weisskopf(l1, lift(top.parent.r2()), lift(top.parent.m2()), lift(r1.m()), m_d),
            T::one(),
            Term::ParentFormFactor,
            &mut substitutions,
        );
        let resonance_form_factor = finite_or(
            blatt_weisskopf(l2, lift(r1.r2()), m2_123, m_12, m_c)
                / blatt_weisskopf(l2, lift(r1.r2()), lift(r1.m2()), m_12, m_c),
            T::one(),
            Term::ResonanceFormFactor,
            &mut substitutions,
        );
        let inner_form_factor = finite_or(
            blatt_weisskopf(l3, lift(r2.r2()), inv.m2_12, m_a, m_b)
                / blatt_weisskopf(l3, lift(r2.r2()), lift(r2.m2()), m_a, m_b),
            T::one(),
            Term::InnerFormFactor,
            &mut substitutions,
        );

        let first_width = width_or_nominal(
            relativistic_width(lift(r1.m()), lift(cascade.first.width), l2, lift(r1.r()), m2_123, m_12, m_c),
            lift(cascade.first.width),
            lift(r1.m()),
            m_12 + m_c,
            Term::FirstWidth,
            &mut substitutions,
        );
        let first_propagator = breit_wigner(lift(r1.m()), m2_123, first_width);
        let second_width = width_or_nominal(
            relativistic_width(lift(r2.m()), lift(cascade.second.width), l3, lift(r2.r()), inv.m2_12, m_a, m_b),
            lift(cascade.second.width),
            lift(r2.m()),
            m_a + m_b,
            Term::SecondWidth,
            &mut substitutions,
        );
        let second_propagator = breit_wigner(lift(r2.m()), inv.m2_12, second_width);

        let p2_c = p2(m2_123, m_12, m_c);
        let e_c = (m2_c + p2_c).sqrt();
        let p2_d = p2(lift(top.parent.m2()), m_123, m_d);
        let e_d = (m2_d + p2_d).sqrt();
        let outer_angular = stage_angles(
            cascade.outer,
            Stage {
                m2_system: m2_123,
                p2_bachelor: p2_c,
                e_bachelor: e_c,
                m2_bachelor: m2_c,
                p2_spectator: p2_d,
                e_spectator: e_d,
                m2_spectator: m2_d,
                m2_pair: inv.m2_34,
            },
            Term::OuterAngular,
            &mut substitutions,
        );

        let p2_b = p2(inv.m2_12, m_a, m_b);
        let e_b = (m2_b + p2_b).sqrt();
        let inner_angular = stage_angles(
            cascade.inner,
            Stage {
                m2_system: inv.m2_12,
                p2_bachelor: p2_b,
                e_bachelor: e_b,
                m2_bachelor: m2_b,
                p2_spectator: p2_c,
                e_spectator: e_c,
                m2_spectator: m2_c,
                m2_pair: inv.m2_23,
            },
            Term::InnerAngular,
            &mut substitutions,
        );

        let real_factor = parent_form_factor
            * resonance_form_factor
            * inner_form_factor
            * outer_angular.value
            * inner_angular.value;
        let amplitude = (first_propagator * second_propagator).scale(real_factor);

        FourBodyBreakdown {
            inside: true,
            m2_123,
            parent_form_factor,
            resonance_form_factor,
            inner_form_factor,
            first_width,
            second_width,
            first_propagator,
            second_propagator,
            outer_angular,
            inner_angular,
            amplitude,
            substitutions,
        }
    }
}
