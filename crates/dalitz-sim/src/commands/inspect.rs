use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use dalitz_core::serde::to_pretty_json_string;
use dalitz_core::Complex;
use dalitz_model::{Breakdown, Model};
use log::warn;
use serde::Serialize;

use super::{boxed, emit_json, load_model};

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// YAML model description.
    #[arg(long)]
    pub model: PathBuf,
    /// Comma separated invariants of a point to break down.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub point: Vec<f64>,
    /// Output JSON; stdout when absent.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ComponentReport {
    name: String,
    symmetrize: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    amplitude: Option<Complex<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    breakdown: Option<Breakdown<f64>>,
}

#[derive(Debug, Serialize)]
struct InspectReport {
    config_hash: Option<String>,
    num_variables: usize,
    num_resonances: usize,
    num_background: usize,
    components: Vec<ComponentReport>,
    background: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    point: Option<Vec<f64>>,
}

pub fn run(args: &InspectArgs) -> Result<(), Box<dyn Error>> {
    let (_, model) = load_model(&args.model)?;
    let point = (!args.point.is_empty()).then(|| args.point.clone());
    let components = component_reports(&model, point.as_deref())?;
    let report = InspectReport {
        config_hash: model.config_hash().map(str::to_owned),
        num_variables: model.num_variables(),
        num_resonances: model.num_resonances(),
        num_background: model.num_background(),
        components,
        background: model.background().iter().map(|c| c.name.clone()).collect(),
        point,
    };
    emit_json(args.out.as_ref(), &to_pretty_json_string(&report).map_err(boxed)?)
}

fn component_reports(model: &Model, point: Option<&[f64]>) -> Result<Vec<ComponentReport>, Box<dyn Error>> {
    let mut reports = Vec::with_capacity(model.num_resonances());
    for (index, component) in model.components().iter().enumerate() {
        let (amplitude, breakdown) = match point {
            Some(point) => {
                let breakdown = model.breakdown(index, point).map_err(boxed)?;
                if breakdown.substitution_count() > 0 {
                    warn!(
                        "event=inspect_substitutions module=dalitz-sim component={} count={}",
                        component.name,
                        breakdown.substitution_count()
                    );
                }
                (Some(model.amplitude(index, point).map_err(boxed)?), Some(breakdown))
            }
            None => (None, None),
        };
        reports.push(ComponentReport {
            name: component.name.clone(),
            symmetrize: component.symmetrize,
            amplitude,
            breakdown,
        });
    }
    Ok(reports)
}
