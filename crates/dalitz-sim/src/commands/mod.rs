pub mod eval;
pub mod inspect;
pub mod norm;
pub mod sample;
pub mod version;

use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use dalitz_core::serde::{from_json_slice, from_yaml_slice};
use dalitz_core::Complex;
use dalitz_model::{Model, ModelConfig};

pub(crate) fn boxed(err: dalitz_core::DalitzError) -> Box<dyn Error> {
    Box::new(err)
}

/// Reads a YAML model description and assembles it.
pub(crate) fn load_model(path: &Path) -> Result<(ModelConfig, Model), Box<dyn Error>> {
    let raw = fs::read(path)?;
    let config: ModelConfig = from_yaml_slice(&raw).map_err(boxed)?;
    let model = Model::from_config(&config).map_err(boxed)?;
    Ok((config, model))
}

/// Reads a JSON array of `{ "re": .., "im": .. }` coefficients.
pub(crate) fn load_coefficients(path: &Path) -> Result<Vec<Complex<f64>>, Box<dyn Error>> {
    let raw = fs::read(path)?;
    from_json_slice(&raw).map_err(boxed)
}

/// Reads a CSV with a header row; every field must parse as `f64` and each
/// row must have `width` fields.
pub(crate) fn read_points(path: &Path, width: usize) -> Result<Vec<Vec<f64>>, Box<dyn Error>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut points = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() != width {
            return Err(format!(
                "row {row} of {} has {} columns, model takes {width} invariants",
                path.display(),
                record.len()
            )
            .into());
        }
        let point = record
            .iter()
            .map(|field| field.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| format!("row {row} of {}: {err}", path.display()))?;
        points.push(point);
    }
    Ok(points)
}

/// CSV writer on a file, or stdout when no path is given.
pub(crate) fn csv_writer(out: Option<&PathBuf>) -> Result<csv::Writer<Box<dyn Write>>, Box<dyn Error>> {
    let sink: Box<dyn Write> = match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            Box::new(fs::File::create(path)?)
        }
        None => Box::new(io::stdout()),
    };
    Ok(csv::Writer::from_writer(sink))
}

/// Writes a JSON document to a file, or stdout when no path is given.
pub(crate) fn emit_json(out: Option<&PathBuf>, json: &str) -> Result<(), Box<dyn Error>> {
    match out {
        Some(path) => fs::write(path, format!("{json}\n"))?,
        None => println!("{json}"),
    }
    Ok(())
}
