use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    eval::{self, EvalArgs},
    inspect::{self, InspectArgs},
    norm::{self, NormArgs},
    sample::{self, SampleArgs},
    version::{self, VersionArgs},
};

mod commands;
mod logging;

#[derive(Parser, Debug)]
#[command(name = "dalitz-sim", about = "Dalitz amplitude engine CLI")]
struct Cli {
    /// Log filter for stderr output (error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate every component amplitude over a CSV of events.
    Eval(EvalArgs),
    /// Compute the normalization of a coefficient vector.
    Norm(NormArgs),
    /// Draw uniformly distributed Dalitz-plot points.
    Sample(SampleArgs),
    /// Summarize a model and optionally break down one point.
    Inspect(InspectArgs),
    /// Print version information.
    Version(VersionArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let _logger = logging::init(&cli.log_level)?;
    match cli.command {
        Command::Eval(args) => eval::run(&args),
        Command::Norm(args) => norm::run(&args),
        Command::Sample(args) => sample::run(&args),
        Command::Inspect(args) => inspect::run(&args),
        Command::Version(args) => version::run(&args),
    }
}
