use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use dalitz_model::BatchOpts;
use log::info;

use super::{boxed, csv_writer, load_coefficients, load_model, read_points};

#[derive(Args, Debug)]
pub struct EvalArgs {
    /// YAML model description.
    #[arg(long)]
    pub model: PathBuf,
    /// CSV of events, one invariant per column, with a header row.
    #[arg(long)]
    pub events: PathBuf,
    /// Output CSV; stdout when absent.
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// JSON coefficient vector; adds an `intensity` column.
    #[arg(long)]
    pub coefficients: Option<PathBuf>,
    /// Worker threads; 0 uses every core.
    #[arg(long, default_value_t = 0)]
    pub concurrency: usize,
}

pub fn run(args: &EvalArgs) -> Result<(), Box<dyn Error>> {
    let (_, model) = load_model(&args.model)?;
    let points = read_points(&args.events, model.num_variables())?;
    let coefficients = args
        .coefficients
        .as_deref()
        .map(load_coefficients)
        .transpose()?;

    let opts = BatchOpts {
        concurrency: args.concurrency,
    };
    let amplitudes = model.evaluate_batch(&points, &opts).map_err(boxed)?;

    let mut header = vec!["event".to_string()];
    for component in model.components() {
        header.push(format!("{}_re", component.name));
        header.push(format!("{}_im", component.name));
    }
    for component in model.background() {
        header.push(format!("{}_bkg", component.name));
    }
    if coefficients.is_some() {
        header.push("intensity".into());
    }

    let mut writer = csv_writer(args.out.as_ref())?;
    writer.write_record(&header)?;
    for (index, (point, row)) in points.iter().zip(&amplitudes).enumerate() {
        let mut record = vec![index.to_string()];
        for value in row {
            record.push(value.re.to_string());
            record.push(value.im.to_string());
        }
        for value in model.background_intensities(point).map_err(boxed)? {
            record.push(value.to_string());
        }
        if let Some(coefficients) = &coefficients {
            let density = dalitz_model::intensity(row, coefficients).map_err(boxed)?;
            record.push(density.to_string());
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;

    info!(
        "event=eval_complete module=dalitz-sim events={} components={} background={}",
        points.len(),
        model.num_resonances(),
        model.num_background()
    );
    Ok(())
}
