//! The pipeline entry points.
//!
//! Each stage consumes the complete waveform of its predecessor and every
//! random draw comes from the caller's generator, so identical inputs and
//! generator state reproduce identical traces.
mod stage;
#[cfg(test)]
mod tests;

pub use stage::{Stage, StageWaveforms, Unit};

use crate::{
    config::SimulationConfig,
    error::Result,
    event_list::{Event, generate_events, validate_input, validate_light_output},
    stages,
    time_grid::TimeGrid,
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use scinti_common::{Real, Time};
use tracing::{debug, info, instrument};

/// Counts gathered while a trace is generated.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TraceMetadata {
    pub events: Vec<Event>,
    pub primary_photoelectrons: u64,
    pub after_pulses: u64,
    pub dark_counts: usize,
    pub clipped_samples: usize,
}

impl TraceMetadata {
    pub fn num_events(&self) -> usize {
        self.events.len()
    }
}

#[derive(Clone, Debug)]
pub struct SimulatedTrace {
    pub grid: TimeGrid,
    pub waveforms: StageWaveforms,
    pub metadata: TraceMetadata,
}

impl SimulatedTrace {
    pub fn time(&self) -> Vec<Time> {
        self.grid.iter().collect()
    }

    pub fn get(&self, stage: Stage) -> &[Real] {
        self.waveforms.get(stage)
    }
}

/// Converts the deposited `energies` (keV) into the nine stage waveforms.
///
/// `arrivals`, when given, holds one arrival time per energy; otherwise the
/// arrival times are drawn as configured by `physics.event-count`.
/// All inputs are validated before any random draw is made.
#[instrument(skip_all, fields(num_energies = energies.len()))]
pub fn simulate<R: Rng + ?Sized>(
    energies: &[Real],
    arrivals: Option<&[Time]>,
    config: &SimulationConfig,
    rng: &mut R,
) -> Result<SimulatedTrace> {
    config.validate()?;
    validate_input(energies, arrivals)?;
    validate_light_output(
        energies,
        config.physics.light_yield,
        config.photodetector.quantum_efficiency,
    )?;

    let SimulationConfig {
        physics,
        photodetector,
        electronics,
        digitisation,
    } = config;
    let grid = TimeGrid::new(physics.frame_duration, digitisation.sample_rate);
    let time_step = grid.time_step();
    debug!("Time grid of {} samples, step {:e} s", grid.len(), time_step);

    let events = generate_events(energies, arrivals, physics, rng)?;

    let (v0, event_pulses) =
        stages::synthesise(&events, physics.light_yield, photodetector, &grid, rng)?;
    let shot_noise = stages::add_shot_noise(&event_pulses, photodetector, &grid, rng)?;
    let (v2, after_pulses) = stages::add_after_pulses(
        &shot_noise.waveform,
        &event_pulses,
        &shot_noise.photoelectrons,
        photodetector,
        &grid,
        rng,
    )?;
    let (v3, dark_counts) = stages::add_dark_counts(&v2, physics, photodetector, &grid, rng)?;
    let v4 = stages::to_voltage(
        &v3,
        photodetector.capacitance,
        electronics.voltage_baseline,
    );
    let v5 = stages::add_electronic_noise(&v4, electronics, rng)?;
    let v6 = stages::preamplify(&v5, electronics, time_step);
    let v7 = stages::shape(&v6, electronics, time_step);
    let digitised = stages::digitise(&v7, digitisation, time_step);

    let metadata = TraceMetadata {
        primary_photoelectrons: shot_noise.total_photoelectrons(),
        events,
        after_pulses,
        dark_counts,
        clipped_samples: digitised.clipped,
    };
    debug!(
        "Trace with {} events, {} photoelectrons, {} after-pulses, {} dark counts",
        metadata.num_events(),
        metadata.primary_photoelectrons,
        metadata.after_pulses,
        metadata.dark_counts
    );

    Ok(SimulatedTrace {
        grid,
        waveforms: StageWaveforms {
            v0,
            v1: shot_noise.waveform,
            v2,
            v3,
            v4,
            v5,
            v6,
            v7,
            v8: digitised.waveform,
        },
        metadata,
    })
}

/// Runs `count` independent Monte-Carlo replicas in parallel.
///
/// Replica `k` draws from its own generator seeded with `seed + k`, so the
/// result does not depend on how the work is scheduled across threads.
#[instrument(skip_all, fields(count = count, seed = seed))]
pub fn simulate_replicas(
    energies: &[Real],
    arrivals: Option<&[Time]>,
    config: &SimulationConfig,
    seed: u64,
    count: usize,
) -> Result<Vec<SimulatedTrace>> {
    config.validate()?;
    validate_input(energies, arrivals)?;
    validate_light_output(
        energies,
        config.physics.light_yield,
        config.photodetector.quantum_efficiency,
    )?;

    let span = tracing::Span::current();
    let traces = (0..count)
        .into_par_iter()
        .map(|replica| {
            span.in_scope(|| {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(replica as u64));
                simulate(energies, arrivals, config, &mut rng)
            })
        })
        .collect::<Result<Vec<_>>>()?;
    info!("Generated {} replicas", traces.len());
    Ok(traces)
}
