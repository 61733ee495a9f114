mod input;
mod save_to_file;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use input::Input;
use rand::{SeedableRng, rngs::StdRng};
use save_to_file::SaveToFile;
use scinti_common::{init_tracer, tracer::TracerOptions};
use scinti_pulses::{simulate, simulate_replicas};
use std::path::PathBuf;
use summary::Summary;
use tracing::{info, info_span};

#[derive(Clone, Parser)]
#[clap(author, version, about)]
struct Cli {
    #[command(flatten)]
    input: Input,

    /// Seed of the random generator, drawn from the OS if not given
    #[clap(long)]
    seed: Option<u64>,

    #[command(flatten)]
    tracer_options: TracerOptions,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Clone, Subcommand)]
enum Mode {
    /// Simulate a single frame
    Trace {
        /// CSV file to write the time grid and the nine stage waveforms to
        #[clap(long)]
        output: Option<PathBuf>,
    },

    /// Simulate independent replicas of the same frame in parallel and report their statistics
    Replicas {
        /// Number of replicas
        #[clap(long, default_value = "100")]
        count: usize,

        /// Directory to write one CSV file per replica to
        #[clap(long)]
        output_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _tracer = init_tracer!(cli.tracer_options.clone())?;

    let config = cli.input.load_config()?;
    let energies = cli.input.load_energies()?;
    let arrivals = cli.input.load_arrival_times()?;
    let seed = cli.seed.unwrap_or_else(rand::random);
    info!("Simulating {} energies with seed {seed}", energies.len());

    match cli.mode {
        Mode::Trace { output } => {
            let _guard = info_span!("Trace").entered();
            let mut rng = StdRng::seed_from_u64(seed);
            let trace = simulate(&energies, arrivals.as_deref(), &config, &mut rng)?;
            Summary::new(std::slice::from_ref(&trace)).report();
            if let Some(output) = output {
                trace.save_to_file(&output)?;
                info!("Trace written to {}", output.display());
            }
        }
        Mode::Replicas { count, output_dir } => {
            let count = input::check_count(count)?;
            let _guard = info_span!("Replicas", count).entered();
            let traces = simulate_replicas(&energies, arrivals.as_deref(), &config, seed, count)?;
            Summary::new(&traces).report();
            if let Some(output_dir) = output_dir {
                std::fs::create_dir_all(&output_dir)?;
                for (index, trace) in traces.iter().enumerate() {
                    trace.save_to_file(&output_dir.join(format!("replica_{index}.csv")))?;
                }
                info!("{} replicas written to {}", traces.len(), output_dir.display());
            }
        }
    }
    Ok(())
}
