//! Closed sum over every resonance model, dispatched through one `value`.

use dalitz_core::{Complex, DalitzError, ErrorInfo, Real};
use dalitz_dyn::FourBodyInvariants;
use serde::Serialize;

use crate::four_body::{FourBodyBreakdown, FourBodyDecay};
use crate::three_body::{ThreeBodyBreakdown, ThreeBodyDecay};

fn dimension_error(expected: usize, found: usize) -> DalitzError {
    DalitzError::Model(
        ErrorInfo::new("dimension-mismatch", "wrong number of invariants for this decay")
            .with_context("expected", expected.to_string())
            .with_context("found", found.to_string()),
    )
}

/// A resonance model of either decay topology.
#[derive(Debug, Clone, PartialEq)]
pub enum Amplitude {
    /// Three-body model over `(m²_ab, m²_bc)`.
    ThreeBody(ThreeBodyDecay),
    /// Four-body model over `(m²₁₂, m²₁₄, m²₂₃, m²₃₄, m²₁₃)`.
    FourBody(FourBodyDecay),
}

/// Intermediate factors of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "topology", rename_all = "kebab-case")]
pub enum Breakdown<T> {
    /// Three-body factors.
    ThreeBody(ThreeBodyBreakdown<T>),
    /// Four-body factors.
    FourBody(FourBodyBreakdown<T>),
}

impl<T: Real> Breakdown<T> {
    /// Final amplitude.
    pub fn amplitude(&self) -> Complex<T> {
        match self {
            Breakdown::ThreeBody(inner) => inner.amplitude,
            Breakdown::FourBody(inner) => inner.amplitude,
        }
    }

    /// Number of substituted factors.
    pub fn substitution_count(&self) -> usize {
        match self {
            Breakdown::ThreeBody(inner) => inner.substitutions.len(),
            Breakdown::FourBody(inner) => inner.substitutions.len(),
        }
    }
}

impl Amplitude {
    /// Number of invariants a point of this decay has.
    pub fn num_variables(&self) -> usize {
        match self {
            Amplitude::ThreeBody(_) => 2,
            Amplitude::FourBody(_) => 5,
        }
    }

    fn check_dimension<T>(&self, invariants: &[T]) -> Result<(), DalitzError> {
        if invariants.len() == self.num_variables() {
            Ok(())
        } else {
            Err(dimension_error(self.num_variables(), invariants.len()))
        }
    }

    fn four_body<T: Real>(invariants: &[T]) -> Result<FourBodyInvariants<T>, DalitzError> {
        FourBodyInvariants::from_slice(invariants).ok_or_else(|| dimension_error(5, invariants.len()))
    }

    /// Amplitude at a point given in evaluation order.
    pub fn value<T: Real>(&self, invariants: &[T]) -> Result<Complex<T>, DalitzError> {
        self.check_dimension(invariants)?;
        Ok(match self {
            Amplitude::ThreeBody(decay) => decay.value(invariants[0], invariants[1]),
            Amplitude::FourBody(decay) => decay.value(&Self::four_body(invariants)?),
        })
    }

    /// Amplitude symmetrized over identical daughters: the `(m²_ab, m²_bc)`
    /// swap for three bodies, the `a ↔ b` exchange for four.
    pub fn value_sym<T: Real>(&self, invariants: &[T]) -> Result<Complex<T>, DalitzError> {
        self.check_dimension(invariants)?;
        Ok(match self {
            Amplitude::ThreeBody(decay) => decay.value_sym(invariants[0], invariants[1]),
            Amplitude::FourBody(decay) => decay.value_sym(&Self::four_body(invariants)?),
        })
    }

    /// Unsymmetrized evaluation with all intermediate factors.
    pub fn breakdown<T: Real>(&self, invariants: &[T]) -> Result<Breakdown<T>, DalitzError> {
        self.check_dimension(invariants)?;
        Ok(match self {
            Amplitude::ThreeBody(decay) => {
                Breakdown::ThreeBody(decay.breakdown(invariants[0], invariants[1]))
            }
            Amplitude::FourBody(decay) => {
                Breakdown::FourBody(decay.breakdown(&Self::four_body(invariants)?))
            }
        })
    }
}

/// A named model term of a [`crate::Model`].
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    /// Label used in reports.
    pub name: String,
    /// Resonance model.
    pub amplitude: Amplitude,
    /// Evaluate through [`Amplitude::value_sym`].
    pub symmetrize: bool,
}

impl Component {
    /// Creates a component.
    pub fn new(name: impl Into<String>, amplitude: Amplitude, symmetrize: bool) -> Self {
        Self {
            name: name.into(),
            amplitude,
            symmetrize,
        }
    }

    /// Component value at a point, symmetrized if requested.
    pub fn evaluate<T: Real>(&self, invariants: &[T]) -> Result<Complex<T>, DalitzError> {
        if self.symmetrize {
            self.amplitude.value_sym(invariants)
        } else {
            self.amplitude.value(invariants)
        }
    }
}
