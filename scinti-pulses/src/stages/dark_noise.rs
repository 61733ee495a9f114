use super::PhotoelectronGain;
use crate::{
    config::{PhotodetectorParameters, PhysicsParameters},
    error::Result,
    event_list::poisson_arrivals,
    pulses::{Pulse, PulseShape},
    time_grid::TimeGrid,
};
use rand::Rng;
use scinti_common::Real;
use tracing::{debug, instrument};

/// Adds a single photoelectron pulse with the prompt shape for each arrival of the thermionic
/// background process. Returns `v3` and the number of dark counts.
#[instrument(skip_all, level = "debug")]
pub fn add_dark_counts<R: Rng + ?Sized>(
    v2: &[Real],
    physics: &PhysicsParameters,
    photodetector: &PhotodetectorParameters,
    grid: &TimeGrid,
    rng: &mut R,
) -> Result<(Vec<Real>, usize)> {
    let mut waveform = v2.to_vec();
    if !photodetector.dark_noise {
        return Ok((waveform, 0));
    }

    let shape = PulseShape::new(
        physics.prompt_decay,
        photodetector.spread_time_constant,
    );
    let arrivals = poisson_arrivals(photodetector.dark_rate, physics.frame_duration, rng)?;
    let gain = PhotoelectronGain::new(photodetector);
    for &time in &arrivals {
        Pulse::new(time, gain.sample(1, rng)?, shape).add_to(grid, &mut waveform);
    }
    debug!("Added {} dark counts", arrivals.len());
    Ok((waveform, arrivals.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn disabled_is_pass_through() {
        let grid = TimeGrid::new(1e-7, 1e9);
        let v2: Vec<_> = (0..100).map(|i| (i as Real).sqrt()).collect();
        let mut rng = StdRng::seed_from_u64(0);
        let (v3, count) = add_dark_counts(
            &v2,
            &PhysicsParameters::default(),
            &PhotodetectorParameters::default(),
            &grid,
            &mut rng,
        )
        .unwrap();
        assert_eq!(v3, v2);
        assert_eq!(count, 0);
    }

    #[test]
    fn dark_count_rate() {
        let physics = PhysicsParameters {
            frame_duration: 1e-3,
            ..Default::default()
        };
        let photodetector = PhotodetectorParameters {
            dark_noise: true,
            dark_rate: 1e4,
            ..Default::default()
        };
        // a coarse grid keeps the test fast, the count does not depend on it
        let grid = TimeGrid::new(1e-3, 1e7);
        let v2 = grid.zeros();
        let mut rng = StdRng::seed_from_u64(3);
        let counts: Vec<_> = (0..1000)
            .map(|_| {
                add_dark_counts(&v2, &physics, &photodetector, &grid, &mut rng)
                    .unwrap()
                    .1 as Real
            })
            .collect();
        let mean = counts.iter().sum::<Real>() / counts.len() as Real;
        let variance =
            counts.iter().map(|c| (c - mean).powi(2)).sum::<Real>() / counts.len() as Real;
        assert_approx_eq!(mean, 10.0, 0.4);
        assert_approx_eq!(variance, 10.0, 2.0);
    }

    #[test]
    fn dark_pulses_carry_the_gain() {
        let physics = PhysicsParameters {
            frame_duration: 1e-5,
            prompt_decay: 1e-9,
            ..Default::default()
        };
        let photodetector = PhotodetectorParameters {
            dark_noise: true,
            dark_rate: 1e6,
            spread_time_constant: 0.0,
            single_electron_charge: 3.0,
            ..Default::default()
        };
        let grid = TimeGrid::new(1e-5, 1e9);
        let mut rng = StdRng::seed_from_u64(4);
        let (v3, count) =
            add_dark_counts(&grid.zeros(), &physics, &photodetector, &grid, &mut rng).unwrap();
        assert!(count > 0);
        let peak = v3.iter().copied().fold(Real::MIN, Real::max);
        assert!(peak <= 3.0 * count as Real + 1e-9);
        assert!(peak > 3.0 * Real::exp(-1.0));
    }
}
