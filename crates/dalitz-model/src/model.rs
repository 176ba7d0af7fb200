//! A full decay model: coherent components, incoherent background and the
//! entry points the external driver calls.

use dalitz_core::serde::from_yaml_slice;
use dalitz_core::{stable_hash_string, Complex, DalitzError, ErrorInfo, Real};
use log::debug;
use rayon::prelude::*;

use crate::aggregate::{intensity, normalization, InterferenceMatrix};
use crate::amplitude::{Breakdown, Component};
use crate::config::{assemble, ModelConfig};

pub(crate) fn topology_error(name: &str, message: impl Into<String>) -> DalitzError {
    DalitzError::Model(ErrorInfo::new("topology-mismatch", message).with_context("component", name))
}

/// Options for [`Model::evaluate_batch`].
#[derive(Debug, Clone, Default)]
pub struct BatchOpts {
    /// Worker threads; `0` uses the global rayon pool.
    pub concurrency: usize,
}

/// Coherent sum of resonance components plus incoherent background terms.
#[derive(Debug, Clone)]
pub struct Model {
    num_variables: usize,
    components: Vec<Component>,
    background: Vec<Component>,
    config_hash: Option<String>,
}

impl Model {
    /// Builds a model from already assembled components. Every component
    /// must take `num_variables` invariants.
    pub fn new(
        num_variables: usize,
        components: Vec<Component>,
        background: Vec<Component>,
    ) -> Result<Self, DalitzError> {
        for component in components.iter().chain(&background) {
            if component.amplitude.num_variables() != num_variables {
                return Err(topology_error(
                    &component.name,
                    format!(
                        "component takes {} invariants, model takes {num_variables}",
                        component.amplitude.num_variables()
                    ),
                ));
            }
        }
        Ok(Self {
            num_variables,
            components,
            background,
            config_hash: None,
        })
    }

    /// Assembles a model from its description.
    pub fn from_config(config: &ModelConfig) -> Result<Self, DalitzError> {
        let assembled = assemble(config)?;
        let mut model = Self::new(assembled.num_variables, assembled.components, assembled.background)?;
        let hash = stable_hash_string(config)?;
        debug!(
            "event=model_assembled module=dalitz-model components={} background={} hash={}",
            model.num_resonances(),
            model.num_background(),
            hash
        );
        model.config_hash = Some(hash);
        Ok(model)
    }

    /// Parses and assembles a YAML model description.
    pub fn from_yaml_slice(data: &[u8]) -> Result<Self, DalitzError> {
        let config: ModelConfig = from_yaml_slice(data)?;
        Self::from_config(&config)
    }

    /// Number of coherent components.
    pub fn num_resonances(&self) -> usize {
        self.components.len()
    }

    /// Number of invariants per point.
    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    /// Number of background components.
    pub fn num_background(&self) -> usize {
        self.background.len()
    }

    /// Coherent components in coefficient order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Background components.
    pub fn background(&self) -> &[Component] {
        &self.background
    }

    /// SHA-256 of the canonical configuration, for models built from one.
    pub fn config_hash(&self) -> Option<&str> {
        self.config_hash.as_deref()
    }

    fn component(&self, index: usize) -> Result<&Component, DalitzError> {
        self.components.get(index).ok_or_else(|| {
            DalitzError::Model(
                ErrorInfo::new("unknown-resonance", "resonance index out of range")
                    .with_context("index", index.to_string())
                    .with_context("num_resonances", self.components.len().to_string()),
            )
        })
    }

    /// Amplitude of component `index` at a point.
    pub fn amplitude<T: Real>(&self, index: usize, invariants: &[T]) -> Result<Complex<T>, DalitzError> {
        self.component(index)?.evaluate(invariants)
    }

    /// Amplitudes of all components at a point.
    pub fn amplitudes<T: Real>(&self, invariants: &[T]) -> Result<Vec<Complex<T>>, DalitzError> {
        self.components
            .iter()
            .map(|component| component.evaluate(invariants))
            .collect()
    }

    /// Squared modulus of every background component at a point.
    pub fn background_intensities<T: Real>(&self, invariants: &[T]) -> Result<Vec<T>, DalitzError> {
        self.background
            .iter()
            .map(|component| -> Result<T, DalitzError> { Ok(component.evaluate(invariants)?.abs2()) })
            .collect()
    }

    /// Unsymmetrized intermediate factors of component `index`.
    pub fn breakdown<T: Real>(&self, index: usize, invariants: &[T]) -> Result<Breakdown<T>, DalitzError> {
        self.component(index)?.amplitude.breakdown(invariants)
    }

    /// Density `|Σ θᵢ Aᵢ|²` at a point.
    pub fn intensity<T: Real>(
        &self,
        invariants: &[T],
        coefficients: &[Complex<T>],
    ) -> Result<T, DalitzError> {
        intensity(&self.amplitudes(invariants)?, coefficients)
    }

    /// Normalization of the coefficients against an interference matrix
    /// covering all coherent components.
    pub fn normalization<T: Real>(
        &self,
        coefficients: &[Complex<T>],
        matrix: &InterferenceMatrix,
    ) -> Result<T, DalitzError> {
        if matrix.dim() != self.num_resonances() {
            return Err(DalitzError::Normalization(
                ErrorInfo::new("matrix-shape", "matrix dimension differs from the number of resonances")
                    .with_context("dim", matrix.dim().to_string())
                    .with_context("num_resonances", self.num_resonances().to_string()),
            ));
        }
        normalization(coefficients, matrix)
    }

    /// Amplitude vectors for many points, evaluated in parallel. Output is
    /// in input order.
    pub fn evaluate_batch(
        &self,
        points: &[Vec<f64>],
        opts: &BatchOpts,
    ) -> Result<Vec<Vec<Complex<f64>>>, DalitzError> {
        let run = || -> Result<Vec<Vec<Complex<f64>>>, DalitzError> {
            points.par_iter().map(|point| self.amplitudes(point)).collect()
        };
        if opts.concurrency == 0 {
            return run();
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(opts.concurrency)
            .build()
            .map_err(|err| DalitzError::Model(ErrorInfo::new("thread-pool", err.to_string())))?;
        pool.install(run)
    }
}
