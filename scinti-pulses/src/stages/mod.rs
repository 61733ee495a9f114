//! One module per pipeline stage, in the order they are applied.
//! Each stage consumes the complete waveform of its predecessor.
pub(crate) mod after_pulse;
pub(crate) mod analog;
pub(crate) mod dark_noise;
pub(crate) mod digitiser;
pub(crate) mod electronic_noise;
pub(crate) mod gain;
pub(crate) mod shot_noise;
pub(crate) mod synthesis;
pub(crate) mod voltage;

pub use after_pulse::add_after_pulses;
pub use analog::{preamplify, shape};
pub use dark_noise::add_dark_counts;
pub use digitiser::{Digitised, digitise, quantise, saturate, step_size};
pub use electronic_noise::add_electronic_noise;
pub use gain::PhotoelectronGain;
pub use shot_noise::{ShotNoise, add_shot_noise};
pub use synthesis::{EventPulse, synthesise};
pub use voltage::to_voltage;
