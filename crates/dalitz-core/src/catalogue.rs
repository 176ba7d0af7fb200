//! Named particle and resonance records supplied to model assembly.
//!
//! The catalogue is built once, explicitly, and passed to whoever assembles
//! a model. Entries are handed out as `Arc`s so many resonance models can
//! share a single immutable record.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::errors::{DalitzError, ErrorInfo};
use crate::particle::{Particle, ParticleRecord};
use crate::serde::{from_json_slice, from_yaml_slice};

/// Charged pion mass in GeV.
pub const PION_MASS: f64 = 0.13957;
/// Charged kaon mass in GeV.
pub const KAON_MASS: f64 = 0.49368;

fn catalogue_error(code: &str, message: impl Into<String>) -> DalitzError {
    DalitzError::Catalogue(ErrorInfo::new(code, message))
}

fn default_pp_mass() -> f64 {
    PION_MASS
}

fn default_kk_mass() -> f64 {
    KAON_MASS
}

/// Line-shape specific parameters of a resonance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum LineShapeParams {
    /// Relativistic Breit-Wigner with nominal width.
    BreitWigner {
        /// Nominal width Γ₀ in GeV.
        width: f64,
    },
    /// Two-channel Flatté.
    Flatte {
        /// Coupling to the first (light) channel.
        g_pp: f64,
        /// Coupling to the second (heavy) channel.
        g_kk: f64,
        /// Daughter mass of the first channel.
        #[serde(default = "default_pp_mass")]
        m_pp: f64,
        /// Daughter mass of the second channel.
        #[serde(default = "default_kk_mass")]
        m_kk: f64,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ResonanceRecord {
    #[serde(flatten)]
    particle: ParticleRecord,
    shape: LineShapeParams,
}

/// Resonance: particle properties at the pole plus its line shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "ResonanceRecord", into = "ResonanceRecord")]
pub struct Resonance {
    particle: Particle,
    shape: LineShapeParams,
}

impl Resonance {
    /// Breit-Wigner resonance.
    pub fn breit_wigner(spin: u32, mass: f64, width: f64, radius: f64) -> Self {
        Self {
            particle: Particle::new(mass, radius, spin),
            shape: LineShapeParams::BreitWigner { width },
        }
    }

    /// Flatté resonance coupled to the π⁺π⁻ and K⁺K⁻ channels.
    pub fn flatte(spin: u32, mass: f64, g_pp: f64, g_kk: f64, radius: f64) -> Self {
        Self {
            particle: Particle::new(mass, radius, spin),
            shape: LineShapeParams::Flatte {
                g_pp,
                g_kk,
                m_pp: PION_MASS,
                m_kk: KAON_MASS,
            },
        }
    }

    /// Pole properties (mass, radius, spin).
    pub fn particle(&self) -> &Particle {
        &self.particle
    }

    /// Line-shape parameters.
    pub fn shape(&self) -> &LineShapeParams {
        &self.shape
    }
}

impl From<ResonanceRecord> for Resonance {
    fn from(record: ResonanceRecord) -> Self {
        Self {
            particle: record.particle.into(),
            shape: record.shape,
        }
    }
}

impl From<Resonance> for ResonanceRecord {
    fn from(resonance: Resonance) -> Self {
        Self {
            particle: resonance.particle.into(),
            shape: resonance.shape,
        }
    }
}

/// Serializable catalogue description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CatalogueConfig {
    /// Start from the built-in tables before applying the entries below.
    #[serde(default)]
    pub extend_builtin: bool,
    /// Stable particles by name.
    #[serde(default)]
    pub particles: BTreeMap<String, Particle>,
    /// Resonances by name.
    #[serde(default)]
    pub resonances: BTreeMap<String, Resonance>,
}

/// Read-only name → record lookup.
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    particles: BTreeMap<String, Arc<Particle>>,
    resonances: BTreeMap<String, Arc<Resonance>>,
}

impl Catalogue {
    /// Empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in tables: charged pion, kaon and D mesons plus the light
    /// resonances used by the D → 3π and D⁰ → 4π models.
    pub fn builtin() -> Self {
        let mut catalogue = Self::new();
        catalogue.insert_particle("pi", Particle::new(PION_MASS, 5.0, 0));
        catalogue.insert_particle("k", Particle::new(KAON_MASS, 5.0, 0));
        catalogue.insert_particle("d", Particle::new(1.86960, 5.0, 0));
        catalogue.insert_particle("d0", Particle::new(1.86484, 5.0, 0));

        catalogue.insert_resonance("toy0_1000", Resonance::breit_wigner(0, 1.0, 0.1, 1.0));
        catalogue.insert_resonance("toy0_1200", Resonance::breit_wigner(0, 1.2, 0.1, 1.0));
        catalogue.insert_resonance("toy0_flatte", Resonance::flatte(0, 1.0, 0.329, 0.658, 1.1));
        catalogue.insert_resonance("f0_600", Resonance::breit_wigner(0, 0.800, 0.800, 1.0));
        catalogue.insert_resonance("f0_980", Resonance::flatte(0, 0.980, 0.329, 0.658, 1.0));
        catalogue.insert_resonance("f0_1370", Resonance::breit_wigner(0, 1.350, 0.350, 1.0));
        catalogue.insert_resonance("f0_1500", Resonance::breit_wigner(0, 1.507, 0.109, 1.0));
        catalogue.insert_resonance("rho_770", Resonance::breit_wigner(1, 0.770, 0.1491, 1.0));
        catalogue.insert_resonance("f2_1270", Resonance::breit_wigner(2, 1.2754, 0.1852, 1.0));
        catalogue.insert_resonance("a1_1260", Resonance::breit_wigner(1, 1.230, 0.420, 1.0));
        catalogue
    }

    /// Builds a catalogue from its serialized description.
    pub fn from_config(config: &CatalogueConfig) -> Self {
        let mut catalogue = if config.extend_builtin {
            Self::builtin()
        } else {
            Self::new()
        };
        for (name, particle) in &config.particles {
            catalogue.insert_particle(name, *particle);
        }
        for (name, resonance) in &config.resonances {
            catalogue.insert_resonance(name, *resonance);
        }
        catalogue
    }

    /// Parses a YAML catalogue description.
    pub fn from_yaml_slice(data: &[u8]) -> Result<Self, DalitzError> {
        let config: CatalogueConfig = from_yaml_slice(data)?;
        Ok(Self::from_config(&config))
    }

    /// Parses a JSON catalogue description.
    pub fn from_json_slice(data: &[u8]) -> Result<Self, DalitzError> {
        let config: CatalogueConfig = from_json_slice(data)?;
        Ok(Self::from_config(&config))
    }

    /// Serializable snapshot of the catalogue contents.
    pub fn to_config(&self) -> CatalogueConfig {
        CatalogueConfig {
            extend_builtin: false,
            particles: self
                .particles
                .iter()
                .map(|(name, particle)| (name.clone(), **particle))
                .collect(),
            resonances: self
                .resonances
                .iter()
                .map(|(name, resonance)| (name.clone(), **resonance))
                .collect(),
        }
    }

    /// Adds or replaces a particle.
    pub fn insert_particle(&mut self, name: impl Into<String>, particle: Particle) {
        self.particles.insert(name.into(), Arc::new(particle));
    }

    /// Adds or replaces a resonance.
    pub fn insert_resonance(&mut self, name: impl Into<String>, resonance: Resonance) {
        self.resonances.insert(name.into(), Arc::new(resonance));
    }

    /// Looks up a stable particle by name.
    pub fn particle(&self, name: &str) -> Result<Arc<Particle>, DalitzError> {
        self.particles.get(name).cloned().ok_or_else(|| {
            DalitzError::Catalogue(
                ErrorInfo::new("unknown-particle", "particle is not in the catalogue")
                    .with_context("name", name),
            )
        })
    }

    /// Looks up a resonance by name.
    pub fn resonance(&self, name: &str) -> Result<Arc<Resonance>, DalitzError> {
        self.resonances.get(name).cloned().ok_or_else(|| {
            DalitzError::Catalogue(
                ErrorInfo::new("unknown-resonance-name", "resonance is not in the catalogue")
                    .with_context("name", name)
                    .with_hint("resonances and stable particles live in separate tables"),
            )
        })
    }

    /// Looks up a particle, falling back to the pole record of a resonance.
    ///
    /// Four-body topologies name intermediate states whose pole mass is
    /// needed even when they are not treated as stable.
    pub fn particle_or_pole(&self, name: &str) -> Result<Particle, DalitzError> {
        if let Some(particle) = self.particles.get(name) {
            return Ok(**particle);
        }
        if let Some(resonance) = self.resonances.get(name) {
            return Ok(*resonance.particle());
        }
        Err(catalogue_error("unknown-particle", format!("no particle or resonance named '{name}'")))
    }

    /// Names of all stable particles.
    pub fn particle_names(&self) -> impl Iterator<Item = &str> {
        self.particles.keys().map(String::as_str)
    }

    /// Names of all resonances.
    pub fn resonance_names(&self) -> impl Iterator<Item = &str> {
        self.resonances.keys().map(String::as_str)
    }
}
