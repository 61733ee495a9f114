use crate::{config::ElectronicsParameters, error::Result};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use scinti_common::Voltage;
use tracing::instrument;

/// Adds white Gaussian thermal noise of standard deviation `noise_rms` to every sample.
#[instrument(skip_all, level = "debug")]
pub fn add_electronic_noise<R: Rng + ?Sized>(
    v4: &[Voltage],
    electronics: &ElectronicsParameters,
    rng: &mut R,
) -> Result<Vec<Voltage>> {
    if !electronics.electronic_noise {
        return Ok(v4.to_vec());
    }
    let noise = Normal::new(0.0, electronics.noise_rms)?;
    Ok(v4.iter().map(|value| value + noise.sample(rng)).collect())
}
