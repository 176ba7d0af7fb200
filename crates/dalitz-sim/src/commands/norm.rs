use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use dalitz_core::serde::{from_json_slice, to_pretty_json_string};
use dalitz_model::InterferenceMatrix;
use serde::Serialize;

use super::{boxed, emit_json, load_coefficients, load_model};

#[derive(Args, Debug)]
pub struct NormArgs {
    /// YAML model description.
    #[arg(long)]
    pub model: PathBuf,
    /// JSON coefficient vector.
    #[arg(long)]
    pub coefficients: PathBuf,
    /// JSON interference matrix `{ "re": [[..]], "im": [[..]] }`.
    #[arg(long)]
    pub matrix: PathBuf,
    /// Output JSON; stdout when absent.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct NormReport {
    normalization: f64,
    num_resonances: usize,
    config_hash: Option<String>,
}

pub fn run(args: &NormArgs) -> Result<(), Box<dyn Error>> {
    let (_, model) = load_model(&args.model)?;
    let coefficients = load_coefficients(&args.coefficients)?;
    let matrix: InterferenceMatrix = from_json_slice(&fs::read(&args.matrix)?).map_err(boxed)?;
    let normalization = model.normalization(&coefficients, &matrix).map_err(boxed)?;
    let report = NormReport {
        normalization,
        num_resonances: model.num_resonances(),
        config_hash: model.config_hash().map(str::to_owned),
    };
    emit_json(args.out.as_ref(), &to_pretty_json_string(&report).map_err(boxed)?)
}
