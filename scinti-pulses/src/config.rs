//! Enumerated configuration of a simulation.
//!
//! Each group mirrors one stage family of the pipeline. Every field has a
//! documented default so a JSON file need only name the options it changes:
//! ```json
//! {
//!     "physics": { "frame-duration": 1e-3, "event-count": "from-energies" },
//!     "photodetector": { "dark-noise": true, "dark-rate": 1e4 },
//!     "digitisation": { "enabled": true, "bits": 12 }
//! }
//! ```
use crate::error::ConfigError;
use scinti_common::{Frequency, Real, Time, Voltage};
use serde::Deserialize;

/// Largest ADC resolution whose code width is still resolved by an `f64`.
pub const MAX_BITS: i32 = 52;

/// How the number of events is chosen when no arrival times are supplied.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum EventCount {
    /// Arrivals follow a Poisson process of rate `event-rate`, energies are
    /// bootstrapped if the process produces more arrivals than energies.
    #[default]
    Poisson,
    /// Exactly one event per energy, uniformly scattered over the frame.
    FromEnergies,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct PhysicsParameters {
    /// Duration of the frame in seconds (`tN`).
    pub frame_duration: Time,
    /// Rate of the arrival process in s⁻¹ (`lambda_`).
    pub event_rate: Frequency,
    /// Prompt fluorescence decay constant in seconds (`tau1`).
    pub prompt_decay: Time,
    /// Delayed fluorescence decay constant in seconds (`tau2`).
    pub delayed_decay: Time,
    /// Probability that an event decays through the delayed channel (`p_delayed`).
    pub delayed_probability: Real,
    /// Scintillation light yield in keV⁻¹ (`L`).
    pub light_yield: Real,
    pub event_count: EventCount,
    /// Synthesise only the first event, placed at the start of the frame.
    pub single_pulse: bool,
}

impl Default for PhysicsParameters {
    fn default() -> Self {
        Self {
            frame_duration: 1e-4,
            event_rate: 1e5,
            prompt_decay: 100e-9,
            delayed_decay: 2000e-9,
            delayed_probability: 0.0,
            light_yield: 1.0,
            event_count: EventCount::Poisson,
            single_pulse: false,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct PhotodetectorParameters {
    /// Quantum efficiency of the photocathode (`rendQ`).
    pub quantum_efficiency: Real,
    /// Anode capacitance in farads (`C1`).
    pub capacitance: Real,
    /// Standard deviation of the anode capacitance in farads (`sigma_C1`).
    pub capacitance_sd: Real,
    /// Time constant of the charge spreading kernel in seconds (`tauS`).
    pub spread_time_constant: Time,
    /// (`darkNoise`)
    pub dark_noise: bool,
    /// Dark count rate in s⁻¹ (`fD`).
    pub dark_rate: Frequency,
    /// (`afterPulses`)
    pub after_pulses: bool,
    /// Probability that a photoelectron triggers an after-pulse (`pA`).
    pub after_pulse_probability: Real,
    /// Mean delay of an after-pulse behind its parent in seconds (`tauA`).
    pub after_pulse_delay: Time,
    /// Mean gain of a single photoelectron, in unit photoelectron charges.
    pub single_electron_charge: Real,
    /// Standard deviation of the gain of a single photoelectron.
    pub charge_spread: Real,
}

impl Default for PhotodetectorParameters {
    fn default() -> Self {
        Self {
            quantum_efficiency: 1.0,
            capacitance: 1e-12,
            capacitance_sd: 0.0,
            spread_time_constant: 1e-9,
            dark_noise: false,
            dark_rate: 1e4,
            after_pulses: false,
            after_pulse_probability: 0.01,
            after_pulse_delay: 1e-6,
            single_electron_charge: 1.0,
            charge_spread: 0.0,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct ElectronicsParameters {
    /// (`electronicNoise`)
    pub electronic_noise: bool,
    /// Standard deviation of the thermal noise in volts (`sigmaRMS`).
    pub noise_rms: Voltage,
    /// (`pream`)
    pub preamplifier: bool,
    /// (`G1`)
    pub preamplifier_gain: Real,
    /// (`tauRC`)
    pub preamplifier_time_constant: Time,
    /// (`ampli`)
    pub amplifier: bool,
    /// (`G2`)
    pub amplifier_gain: Real,
    /// (`tauCR`)
    pub amplifier_time_constant: Time,
    /// Number of cascaded CR stages (`nCR`).
    pub cr_order: i32,
    /// Constant offset added when charge is converted to voltage.
    pub voltage_baseline: Voltage,
}

impl Default for ElectronicsParameters {
    fn default() -> Self {
        Self {
            electronic_noise: false,
            noise_rms: 1e-6,
            preamplifier: false,
            preamplifier_gain: 1.0,
            preamplifier_time_constant: 10e-6,
            amplifier: false,
            amplifier_gain: 1.0,
            amplifier_time_constant: 2e-6,
            cr_order: 1,
            voltage_baseline: 0.0,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct DigitisationParameters {
    /// (`digitization`)
    pub enabled: bool,
    /// Sampling rate of the whole pipeline in Hz (`fS`).
    pub sample_rate: Frequency,
    /// Cutoff of the anti-aliasing filter in Hz (`fc`).
    pub cutoff_frequency: Frequency,
    /// ADC resolution (`R`).
    pub bits: i32,
    /// Saturation voltage, the ADC range is `[-full_scale, full_scale]` (`Vs`).
    pub full_scale: Voltage,
}

impl Default for DigitisationParameters {
    fn default() -> Self {
        Self {
            enabled: false,
            sample_rate: 1e9,
            cutoff_frequency: 2e8,
            bits: 14,
            full_scale: 1.0,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct SimulationConfig {
    pub physics: PhysicsParameters,
    pub photodetector: PhotodetectorParameters,
    pub electronics: ElectronicsParameters,
    pub digitisation: DigitisationParameters,
}

fn probability(name: &'static str, value: Real) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Probability { name, value })
    }
}

fn positive(name: &'static str, value: Real) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: Real) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

impl PhysicsParameters {
    fn validate(&self) -> Result<(), ConfigError> {
        positive("frame-duration", self.frame_duration)?;
        non_negative("event-rate", self.event_rate)?;
        positive("prompt-decay", self.prompt_decay)?;
        positive("delayed-decay", self.delayed_decay)?;
        probability("delayed-probability", self.delayed_probability)?;
        non_negative("light-yield", self.light_yield)
    }
}

impl PhotodetectorParameters {
    fn validate(&self) -> Result<(), ConfigError> {
        probability("quantum-efficiency", self.quantum_efficiency)?;
        positive("capacitance", self.capacitance)?;
        non_negative("capacitance-sd", self.capacitance_sd)?;
        non_negative("spread-time-constant", self.spread_time_constant)?;
        non_negative("dark-rate", self.dark_rate)?;
        probability("after-pulse-probability", self.after_pulse_probability)?;
        positive("after-pulse-delay", self.after_pulse_delay)?;
        positive("single-electron-charge", self.single_electron_charge)?;
        non_negative("charge-spread", self.charge_spread)
    }
}

impl ElectronicsParameters {
    fn validate(&self) -> Result<(), ConfigError> {
        non_negative("noise-rms", self.noise_rms)?;
        positive("preamplifier-time-constant", self.preamplifier_time_constant)?;
        positive("amplifier-time-constant", self.amplifier_time_constant)?;
        if self.cr_order < 0 {
            return Err(ConfigError::CrOrder(self.cr_order));
        }
        Ok(())
    }
}

impl DigitisationParameters {
    fn validate(&self) -> Result<(), ConfigError> {
        positive("sample-rate", self.sample_rate)?;
        if !(1..=MAX_BITS).contains(&self.bits) {
            return Err(ConfigError::Bits(self.bits));
        }
        if self.enabled {
            positive("cutoff-frequency", self.cutoff_frequency)?;
            positive("full-scale", self.full_scale)?;
            if self.sample_rate <= 2.0 * self.cutoff_frequency {
                return Err(ConfigError::Aliasing {
                    sample_rate: self.sample_rate,
                    cutoff: self.cutoff_frequency,
                });
            }
        }
        Ok(())
    }
}

impl SimulationConfig {
    /// Checks every option, returning the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.physics.validate()?;
        self.photodetector.validate()?;
        self.electronics.validate()?;
        self.digitisation.validate()
    }

    pub fn time_step(&self) -> Time {
        1.0 / self.digitisation.sample_rate
    }
}
