use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use dalitz_model::{uniform_dalitz_points, SampleOpts};

use super::{boxed, csv_writer, load_model};

#[derive(Args, Debug)]
pub struct SampleArgs {
    /// YAML model description with a three-body topology.
    #[arg(long)]
    pub model: PathBuf,
    /// Number of points.
    #[arg(long, default_value_t = 1000)]
    pub count: usize,
    /// Master seed.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
    /// Points per parallel chunk.
    #[arg(long, default_value_t = 1024)]
    pub chunk_size: usize,
    /// Output CSV (`m2_ab,m2_bc`); stdout when absent.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run(args: &SampleArgs) -> Result<(), Box<dyn Error>> {
    let (config, _) = load_model(&args.model)?;
    let topology = config.three_body_topology().map_err(boxed)?;
    let opts = SampleOpts {
        chunk_size: args.chunk_size,
        ..SampleOpts::new(args.count, args.seed)
    };
    let points = uniform_dalitz_points(&topology, &opts).map_err(boxed)?;

    let mut writer = csv_writer(args.out.as_ref())?;
    writer.write_record(["m2_ab", "m2_bc"])?;
    for point in &points {
        writer.write_record([point.m2_ab.to_string(), point.m2_bc.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}
