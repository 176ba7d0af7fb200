//! Replacement of non-finite factors.
//!
//! Near kinematic boundaries square roots of negative numbers and divisions
//! by zero can turn single factors into NaN or infinity. The offending
//! factor is replaced by a neutral value, a `warn!` record is emitted and a
//! [`Substitution`] is appended to the caller's list so the event stays
//! visible without a logger.

use core::fmt;

use dalitz_core::Real;
use log::warn;
use serde::{Deserialize, Serialize};

/// Factor of an amplitude that may be substituted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Term {
    /// Barrier ratio at the parent vertex.
    ParentFormFactor,
    /// Barrier ratio at the (first) resonance vertex.
    ResonanceFormFactor,
    /// Barrier ratio at the second resonance vertex of a cascade.
    InnerFormFactor,
    /// Three-body Zemach factor.
    Angular,
    /// Zemach factor of the outer cascade stage.
    OuterAngular,
    /// Zemach factor of the inner cascade stage.
    InnerAngular,
    /// Running width of a three-body Breit-Wigner.
    Width,
    /// Running width of the outer cascade resonance.
    FirstWidth,
    /// Running width of the inner cascade resonance.
    SecondWidth,
}

impl Term {
    /// Stable label used in log records.
    pub fn as_str(self) -> &'static str {
        match self {
            Term::ParentFormFactor => "parent_form_factor",
            Term::ResonanceFormFactor => "resonance_form_factor",
            Term::InnerFormFactor => "inner_form_factor",
            Term::Angular => "angular",
            Term::OuterAngular => "outer_angular",
            Term::InnerAngular => "inner_angular",
            Term::Width => "width",
            Term::FirstWidth => "first_width",
            Term::SecondWidth => "second_width",
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cause of a substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    /// The factor evaluated to NaN or infinity.
    NonFinite,
    /// A squared momentum entering the factor was not positive.
    NonPositiveMomentum,
    /// A rest-frame boost would need `|v| ≥ 1`.
    Superluminal,
    /// The pole mass does not lie above the daughters' threshold.
    BelowThreshold,
}

impl Reason {
    /// Stable label used in log records.
    pub fn as_str(self) -> &'static str {
        match self {
            Reason::NonFinite => "non_finite",
            Reason::NonPositiveMomentum => "non_positive_momentum",
            Reason::Superluminal => "superluminal",
            Reason::BelowThreshold => "below_threshold",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record of one replaced factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Substitution {
    /// Which factor was replaced.
    pub term: Term,
    /// Why it was replaced.
    pub reason: Reason,
    /// Value used instead.
    pub replacement: f64,
}

/// Records a substitution of `term` by `replacement` and returns it.
pub fn substitute<T: Real>(
    term: Term,
    reason: Reason,
    replacement: T,
    log: &mut Vec<Substitution>,
) -> T {
    warn!(
        "event=non_finite_substituted module=dalitz-dyn term={} reason={} replacement={}",
        term,
        reason,
        replacement.to_f64()
    );
    log.push(Substitution {
        term,
        reason,
        replacement: replacement.to_f64(),
    });
    replacement
}

/// Returns `value` if finite, otherwise substitutes `fallback`.
pub fn finite_or<T: Real>(value: T, fallback: T, term: Term, log: &mut Vec<Substitution>) -> T {
    if value.is_finite() {
        value
    } else {
        substitute(term, Reason::NonFinite, fallback, log)
    }
}

/// Returns the running width, or the nominal width when the pole mass is
/// not above `threshold` or the running width is not finite.
///
/// Below threshold the momentum at the pole is imaginary and the running
/// width has no physical value even where the arithmetic stays finite.
pub fn width_or_nominal<T: Real>(
    running: T,
    nominal: T,
    pole_mass: T,
    threshold: T,
    term: Term,
    log: &mut Vec<Substitution>,
) -> T {
    if !(pole_mass > threshold) {
        return substitute(term, Reason::BelowThreshold, nominal, log);
    }
    finite_or(running, nominal, term, log)
}
