
use crate::config::SimulationConfig;
use rand::{SeedableRng, rngs::StdRng};
use scinti_common::Real;

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// A one microsecond frame at 1 GHz with nothing but shot noise.
fn short_frame() -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.physics.frame_duration = 1e-6;
    config
}

/// Every optional stage switched on.
fn full_chain() -> SimulationConfig {
    let mut config = short_frame();
    config.photodetector.after_pulses = true;
    config.photodetector.dark_noise = true;
    config.photodetector.dark_rate = 1e7;
    config.electronics.electronic_noise = true;
    config.electronics.preamplifier = true;
    config.electronics.amplifier = true;
    config.electronics.cr_order = 2;
    config.digitisation.enabled = true;
    config.digitisation.full_scale = 1e-4;
    config
}

fn mean(values: &[Real]) -> Real {
    values.iter().sum::<Real>() / values.len() as Real
}

fn variance(values: &[Real]) -> Real {
    let mean = mean(values);
    values.iter().map(|v| (v - mean).powi(2)).sum::<Real>() / values.len() as Real
}
