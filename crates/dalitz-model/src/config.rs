//! YAML description of a model and its assembly against a catalogue.

use std::sync::Arc;

use dalitz_core::{Catalogue, CatalogueConfig, DalitzError};
use serde::{Deserialize, Serialize};

use crate::amplitude::{Amplitude, Component};
use crate::four_body::{Cascade, FourBodyDecay, FourBodyTopology};
use crate::three_body::{ThreeBodyDecay, ThreeBodyTopology};

fn default_orbital() -> [u32; 3] {
    [1, 0, 1]
}

/// Parent and final-state particles, by catalogue name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TopologyConfig {
    /// `P → a b c`, resonances in `(a b)`.
    ThreeBody {
        /// Parent name.
        parent: String,
        /// Daughters `[a, b, c]`.
        daughters: [String; 3],
    },
    /// `P → a b c d`, cascades through `(a b c)` and `(a b)`.
    FourBody {
        /// Parent name.
        parent: String,
        /// Daughters `[a, b, c, d]`.
        daughters: [String; 4],
    },
}

/// Line shape of one component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ComponentKind {
    /// Constant inside the phase space.
    NonResonant,
    /// Single three-body resonance; the line shape comes from its record.
    Resonant {
        /// Resonance name.
        resonance: String,
    },
    /// Four-body cascade `P → R₁ d → R₂ c d`.
    Cascade {
        /// Outer resonance `R₁`.
        first: String,
        /// Inner resonance `R₂`.
        second: String,
        /// Orbital momenta between `R₁ d`, `R₂ c` and `a b`.
        #[serde(default = "default_orbital")]
        orbital: [u32; 3],
    },
}

/// One coherent or background term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentConfig {
    /// Label used in reports.
    pub name: String,
    /// Line shape.
    #[serde(flatten)]
    pub kind: ComponentKind,
    /// Symmetrize over identical daughters.
    #[serde(default)]
    pub symmetrize: bool,
}

/// Complete model description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Inline catalogue; the built-in tables when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalogue: Option<CatalogueConfig>,
    /// Decay topology.
    pub topology: TopologyConfig,
    /// Coherent components, in coefficient order.
    #[serde(default)]
    pub components: Vec<ComponentConfig>,
    /// Incoherent background components.
    #[serde(default)]
    pub background: Vec<ComponentConfig>,
}

impl ModelConfig {
    /// Catalogue the model is assembled against.
    pub fn catalogue(&self) -> Catalogue {
        match &self.catalogue {
            Some(config) => Catalogue::from_config(config),
            None => Catalogue::builtin(),
        }
    }

    /// Resolved three-body topology, for sampling. Four-body descriptions
    /// are rejected with `topology-mismatch`.
    pub fn three_body_topology(&self) -> Result<ThreeBodyTopology, DalitzError> {
        match ResolvedTopology::resolve(&self.topology, &self.catalogue())? {
            ResolvedTopology::Three(topology) => Ok((*topology).clone()),
            ResolvedTopology::Four(_) => Err(crate::model::topology_error(
                "topology",
                "uniform sampling is defined for three-body topologies only",
            )),
        }
    }
}

enum ResolvedTopology {
    Three(Arc<ThreeBodyTopology>),
    Four(Arc<FourBodyTopology>),
}

impl ResolvedTopology {
    fn resolve(config: &TopologyConfig, catalogue: &Catalogue) -> Result<Self, DalitzError> {
        Ok(match config {
            TopologyConfig::ThreeBody { parent, daughters } => {
                let [a, b, c] = daughters;
                ResolvedTopology::Three(Arc::new(ThreeBodyTopology {
                    parent: catalogue.particle(parent)?,
                    a: catalogue.particle(a)?,
                    b: catalogue.particle(b)?,
                    c: catalogue.particle(c)?,
                }))
            }
            TopologyConfig::FourBody { parent, daughters } => {
                let [a, b, c, d] = daughters;
                ResolvedTopology::Four(Arc::new(FourBodyTopology {
                    parent: catalogue.particle(parent)?,
                    a: catalogue.particle(a)?,
                    b: catalogue.particle(b)?,
                    c: catalogue.particle(c)?,
                    d: catalogue.particle(d)?,
                }))
            }
        })
    }

    fn num_variables(&self) -> usize {
        match self {
            ResolvedTopology::Three(_) => 2,
            ResolvedTopology::Four(_) => 5,
        }
    }

    fn component(
        &self,
        config: &ComponentConfig,
        catalogue: &Catalogue,
    ) -> Result<Component, DalitzError> {
        let amplitude = match (self, &config.kind) {
            (ResolvedTopology::Three(top), ComponentKind::NonResonant) => {
                Amplitude::ThreeBody(ThreeBodyDecay::non_resonant(top.clone()))
            }
            (ResolvedTopology::Three(top), ComponentKind::Resonant { resonance }) => {
                Amplitude::ThreeBody(ThreeBodyDecay::resonant(top.clone(), catalogue.resonance(resonance)?)?)
            }
            (ResolvedTopology::Four(top), ComponentKind::NonResonant) => {
                Amplitude::FourBody(FourBodyDecay::non_resonant(top.clone()))
            }
            (
                ResolvedTopology::Four(top),
                ComponentKind::Cascade {
                    first,
                    second,
                    orbital,
                },
            ) => {
                let cascade = Cascade::new(
                    &top.parent,
                    catalogue.resonance(first)?,
                    catalogue.resonance(second)?,
                    *orbital,
                )?;
                Amplitude::FourBody(FourBodyDecay::cascade(top.clone(), cascade))
            }
            (_, kind) => {
                return Err(crate::model::topology_error(
                    &config.name,
                    format!("component kind {kind:?} does not fit a {}-variable topology", self.num_variables()),
                ))
            }
        };
        Ok(Component::new(config.name.clone(), amplitude, config.symmetrize))
    }
}

/// Assembled components and background plus the variable count.
pub(crate) struct Assembled {
    pub num_variables: usize,
    pub components: Vec<Component>,
    pub background: Vec<Component>,
}

pub(crate) fn assemble(config: &ModelConfig) -> Result<Assembled, DalitzError> {
    let catalogue = config.catalogue();
    let topology = ResolvedTopology::resolve(&config.topology, &catalogue)?;
    let components = config
        .components
        .iter()
        .map(|component| topology.component(component, &catalogue))
        .collect::<Result<Vec<_>, _>>()?;
    let background = config
        .background
        .iter()
        .map(|component| topology.component(component, &catalogue))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Assembled {
        num_variables: topology.num_variables(),
        components,
        background,
    })
}
