use super::{EventPulse, PhotoelectronGain};
use crate::{config::PhotodetectorParameters, error::Result, time_grid::TimeGrid};
use rand::Rng;
use rand_distr::{Binomial, Distribution, Exp};
use scinti_common::Real;
use tracing::{debug, instrument};

/// Adds one single photoelectron pulse, delayed exponentially behind its
/// parent event, for each primary photoelectron that triggers an after-pulse.
/// Returns `v2` and the number of after-pulses.
#[instrument(skip_all, level = "debug")]
pub fn add_after_pulses<R: Rng + ?Sized>(
    v1: &[Real],
    event_pulses: &[EventPulse],
    photoelectrons: &[u64],
    photodetector: &PhotodetectorParameters,
    grid: &TimeGrid,
    rng: &mut R,
) -> Result<(Vec<Real>, u64)> {
    let mut waveform = v1.to_vec();
    if !photodetector.after_pulses {
        return Ok((waveform, 0));
    }

    let delay = Exp::new(1.0 / photodetector.after_pulse_delay)?;
    let gain = PhotoelectronGain::new(photodetector);
    let mut num_after_pulses: u64 = 0;
    for (event_pulse, &primaries) in event_pulses.iter().zip(photoelectrons) {
        let triggered =
            Binomial::new(primaries, photodetector.after_pulse_probability)?.sample(rng);
        for _ in 0..triggered {
            let mut pulse = event_pulse.pulse(gain.sample(1, rng)?);
            pulse.start += delay.sample(rng);
            pulse.add_to(grid, &mut waveform);
        }
        num_after_pulses = num_after_pulses.saturating_add(triggered);
    }
    debug!("Added {num_after_pulses} after-pulses");
    Ok((waveform, num_after_pulses))
}
