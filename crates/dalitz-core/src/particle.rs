//! Immutable particle records and angular momentum labels.

use serde::{Deserialize, Serialize};

use crate::errors::{DalitzError, ErrorInfo};

/// Serialized form of a particle record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleRecord {
    /// Mass in GeV.
    pub mass: f64,
    /// Interaction radius in GeV⁻¹.
    #[serde(default = "default_radius")]
    pub radius: f64,
    /// Spin quantum number.
    #[serde(default)]
    pub spin: u32,
}

fn default_radius() -> f64 {
    1.0
}

/// Particle with cached squared mass and squared radius.
///
/// Constructed once from the catalogue and only ever read afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "ParticleRecord", into = "ParticleRecord")]
pub struct Particle {
    mass: f64,
    mass2: f64,
    radius: f64,
    radius2: f64,
    spin: u32,
}

impl Particle {
    /// Creates a particle from mass (GeV), radius (GeV⁻¹) and spin.
    pub fn new(mass: f64, radius: f64, spin: u32) -> Self {
        Self {
            mass,
            mass2: mass * mass,
            radius,
            radius2: radius * radius,
            spin,
        }
    }

    /// Mass in GeV.
    pub fn m(&self) -> f64 {
        self.mass
    }

    /// Squared mass in GeV².
    pub fn m2(&self) -> f64 {
        self.mass2
    }

    /// Radius in GeV⁻¹.
    pub fn r(&self) -> f64 {
        self.radius
    }

    /// Squared radius in GeV⁻².
    pub fn r2(&self) -> f64 {
        self.radius2
    }

    /// Spin quantum number.
    pub fn spin(&self) -> u32 {
        self.spin
    }
}

impl From<ParticleRecord> for Particle {
    fn from(record: ParticleRecord) -> Self {
        Particle::new(record.mass, record.radius, record.spin)
    }
}

impl From<Particle> for ParticleRecord {
    fn from(particle: Particle) -> Self {
        ParticleRecord {
            mass: particle.mass,
            radius: particle.radius,
            spin: particle.spin,
        }
    }
}

/// Angular momentum label (spin or orbital) supported by the closed-form
/// barrier and angular factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Wave {
    /// L = 0.
    S,
    /// L = 1.
    P,
    /// L = 2.
    D,
}

impl Wave {
    /// Numeric value of the label.
    pub fn as_u32(self) -> u32 {
        match self {
            Wave::S => 0,
            Wave::P => 1,
            Wave::D => 2,
        }
    }
}

impl TryFrom<u32> for Wave {
    type Error = DalitzError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Wave::S),
            1 => Ok(Wave::P),
            2 => Ok(Wave::D),
            other => Err(DalitzError::Kinematics(
                ErrorInfo::new(
                    "unsupported-wave",
                    "angular momentum above 2 has no closed-form barrier or angular factor",
                )
                .with_context("value", other.to_string()),
            )),
        }
    }
}

impl From<Wave> for u32 {
    fn from(wave: Wave) -> Self {
        wave.as_u32()
    }
}
