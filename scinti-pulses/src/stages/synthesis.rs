use super::PhotoelectronGain;
use crate::{
    config::PhotodetectorParameters,
    error::Result,
    event_list::Event,
    pulses::{Pulse, PulseShape},
    time_grid::TimeGrid,
};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use scinti_common::Real;
use tracing::{instrument, trace};

/// An event together with its response shape and expected photoelectron count.
#[derive(Clone, Debug, PartialEq)]
pub struct EventPulse {
    pub event: Event,
    pub shape: PulseShape,
    pub mean_photoelectrons: Real,
}

impl EventPulse {
    /// Draws the capacitance fluctuation when `capacitance_sd` is non-zero.
    fn new<R: Rng + ?Sized>(
        event: &Event,
        light_yield: Real,
        photodetector: &PhotodetectorParameters,
        fluctuation: Option<&Normal<Real>>,
        rng: &mut R,
    ) -> Self {
        let mut mean_photoelectrons =
            event.energy * light_yield * photodetector.quantum_efficiency;
        if let Some(fluctuation) = fluctuation {
            // Charge scales with the relative capacitance c/C1, which has unit mean
            let capacitance = fluctuation.sample(rng).max(0.0);
            mean_photoelectrons *= capacitance / photodetector.capacitance;
        }
        Self {
            event: event.clone(),
            shape: PulseShape::new(event.decay, photodetector.spread_time_constant),
            mean_photoelectrons,
        }
    }

    pub fn pulse(&self, amplitude: Real) -> Pulse {
        Pulse::new(self.event.time, amplitude, self.shape)
    }
}

/// Builds the idealised charge waveform `v0`, the superposition of every
/// event's mean photoelectron count, times the mean photoelectron gain,
/// times its response shape.
#[instrument(skip_all, level = "debug", fields(num_events = events.len()))]
pub fn synthesise<R: Rng + ?Sized>(
    events: &[Event],
    light_yield: Real,
    photodetector: &PhotodetectorParameters,
    grid: &TimeGrid,
    rng: &mut R,
) -> Result<(Vec<Real>, Vec<EventPulse>)> {
    let fluctuation = if photodetector.capacitance_sd > 0.0 {
        Some(Normal::new(
            photodetector.capacitance,
            photodetector.capacitance_sd,
        )?)
    } else {
        None
    };

    let event_pulses: Vec<_> = events
        .iter()
        .map(|event| {
            EventPulse::new(
                event,
                light_yield,
                photodetector,
                fluctuation.as_ref(),
                &mut *rng,
            )
        })
        .collect();

    let gain = PhotoelectronGain::new(photodetector).mean();
    let mut waveform = grid.zeros();
    for event_pulse in &event_pulses {
        trace!(
            "Event at {:e} s with {:.1} expected photoelectrons",
            event_pulse.event.time, event_pulse.mean_photoelectrons
        );
        event_pulse
            .pulse(gain * event_pulse.mean_photoelectrons)
            .add_to(grid, &mut waveform);
    }
    Ok((waveform, event_pulses))
}
