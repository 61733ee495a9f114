use super::{EventPulse, PhotoelectronGain};
use crate::{config::PhotodetectorParameters, error::Result, time_grid::TimeGrid};
use rand::Rng;
use rand_distr::{Distribution, Normal, Poisson};
use scinti_common::Real;
use tracing::{debug, instrument};

/// Means above which the count is drawn from the normal limit of the Poisson law.
const NORMAL_LIMIT: Real = 1e12;

/// The photon counting realisation `v1` and the primary photoelectrons drawn per event.
pub struct ShotNoise {
    pub waveform: Vec<Real>,
    pub photoelectrons: Vec<u64>,
}

impl ShotNoise {
    pub fn total_photoelectrons(&self) -> u64 {
        self.photoelectrons
            .iter()
            .fold(0, |total, &count| total.saturating_add(count))
    }
}

fn draw_photoelectrons<R: Rng + ?Sized>(mean: Real, rng: &mut R) -> Result<u64> {
    if mean.is_nan() || mean <= 0.0 {
        Ok(0)
    } else if mean > NORMAL_LIMIT {
        let count = Normal::new(mean, mean.sqrt())?.sample(rng);
        Ok(count.round().max(0.0) as u64)
    } else {
        let count: Real = Poisson::new(mean)?.sample(rng);
        Ok(count as u64)
    }
}

/// Replaces each event's expected photoelectron count with a Poisson draw
/// around it, each photoelectron carrying a random gain, so that the mean
/// of `v1` equals `v0`.
#[instrument(skip_all, level = "debug", fields(num_events = event_pulses.len()))]
pub fn add_shot_noise<R: Rng + ?Sized>(
    event_pulses: &[EventPulse],
    photodetector: &PhotodetectorParameters,
    grid: &TimeGrid,
    rng: &mut R,
) -> Result<ShotNoise> {
    let photoelectrons = event_pulses
        .iter()
        .map(|event_pulse| draw_photoelectrons(event_pulse.mean_photoelectrons, &mut *rng))
        .collect::<Result<Vec<_>>>()?;

    let gain = PhotoelectronGain::new(photodetector);
    let mut waveform = grid.zeros();
    for (event_pulse, &count) in event_pulses.iter().zip(&photoelectrons) {
        event_pulse
            .pulse(gain.sample(count, rng)?)
            .add_to(grid, &mut waveform);
    }
    let shot_noise = ShotNoise {
        waveform,
        photoelectrons,
    };
    debug!(
        "Drew {} primary photoelectrons",
        shot_noise.total_photoelectrons()
    );
    Ok(shot_noise)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        event_list::{DecayChannel, Event},
        pulses::PulseShape,
    };
    use assert_approx_eq::assert_approx_eq;
    use rand::{SeedableRng, rngs::StdRng};

    fn event_pulse(mean_photoelectrons: Real) -> EventPulse {
        EventPulse {
            event: Event {
                time: 0.0,
                energy: 1.0,
                channel: DecayChannel::Prompt,
                decay: 100e-9,
            },
            shape: PulseShape::new(100e-9, 0.0),
            mean_photoelectrons,
        }
    }

    fn unit_gain() -> PhotodetectorParameters {
        PhotodetectorParameters::default()
    }

    #[test]
    fn zero_mean_gives_zero_waveform() {
        let grid = TimeGrid::new(1e-6, 1e9);
        let mut rng = StdRng::seed_from_u64(0);
        let shot_noise = add_shot_noise(&[event_pulse(0.0)], &unit_gain(), &grid, &mut rng).unwrap();
        assert_eq!(shot_noise.photoelectrons, vec![0]);
        assert!(shot_noise.waveform.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn waveform_follows_counts() {
        let grid = TimeGrid::new(1e-6, 1e9);
        let mut rng = StdRng::seed_from_u64(1);
        let shot_noise = add_shot_noise(&[event_pulse(50.0)], &unit_gain(), &grid, &mut rng).unwrap();
        let count = shot_noise.photoelectrons[0] as Real;
        assert_approx_eq!(shot_noise.waveform[0], count, 1e-12);
        assert_approx_eq!(shot_noise.waveform[100], count * Real::exp(-1.0), 1e-9);
    }

    #[test]
    fn variance_matches_mean() {
        let grid = TimeGrid::new(1e-8, 1e9);
        let mut rng = StdRng::seed_from_u64(2);
        let samples: Vec<Real> = (0..20000)
            .map(|_| {
                add_shot_noise(&[event_pulse(40.0)], &unit_gain(), &grid, &mut rng)
                    .unwrap()
                    .waveform[0]
            })
            .collect();
        let mean = samples.iter().sum::<Real>() / samples.len() as Real;
        let variance = samples.iter().map(|s| (s - mean).powi(2)).sum::<Real>()
            / (samples.len() - 1) as Real;
        assert_approx_eq!(mean, 40.0, 0.3);
        assert_approx_eq!(variance, 40.0, 2.0);
    }

    #[test]
    fn gain_spread_inflates_variance() {
        let grid = TimeGrid::new(1e-8, 1e9);
        let photodetector = PhotodetectorParameters {
            single_electron_charge: 1.0,
            charge_spread: 0.5,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        let samples: Vec<Real> = (0..20000)
            .map(|_| {
                add_shot_noise(&[event_pulse(40.0)], &photodetector, &grid, &mut rng)
                    .unwrap()
                    .waveform[0]
            })
            .collect();
        let mean = samples.iter().sum::<Real>() / samples.len() as Real;
        let variance = samples.iter().map(|s| (s - mean).powi(2)).sum::<Real>()
            / (samples.len() - 1) as Real;
        // compound Poisson, Q (q^2 + sigma^2)
        assert_approx_eq!(mean, 40.0, 0.3);
        assert_approx_eq!(variance, 50.0, 2.5);
    }

    #[test]
    fn huge_means_use_the_normal_limit() {
        let mut rng = StdRng::seed_from_u64(4);
        let count = draw_photoelectrons(1e16, &mut rng).unwrap() as Real;
        assert_approx_eq!(count / 1e16, 1.0, 1e-6);
        assert_eq!(draw_photoelectrons(Real::NAN, &mut rng).unwrap(), 0);
    }
}
