//! Stochastic simulation of the signal chain of a scintillation detector.
//!
//! A list of deposited energies is turned into nine aligned waveforms, one
//! per stage of the chain: idealised charge, shot noise, after-pulses, dark
//! counts, anode voltage, thermal noise, RC preamplifier, CRⁿ shaper and ADC.
//! ```no_run
//! use rand::{SeedableRng, rngs::StdRng};
//! use scinti_pulses::{SimulationConfig, Stage, simulate};
//!
//! let mut rng = StdRng::seed_from_u64(0);
//! let trace = simulate(&[100.0, 662.0], None, &SimulationConfig::default(), &mut rng)?;
//! assert_eq!(trace.get(Stage::V4).len(), trace.grid.len());
//! # Ok::<(), scinti_pulses::SimulationError>(())
//! ```
pub mod config;
pub mod error;
pub mod event_list;
pub mod filters;
pub mod pulses;
pub mod simulation;
pub mod stages;
pub mod time_grid;

pub use config::{
    DigitisationParameters, ElectronicsParameters, EventCount, PhotodetectorParameters,
    PhysicsParameters, SimulationConfig,
};
pub use error::{ConfigError, InputError, Result, SimulationError};
pub use event_list::{DecayChannel, Event};
pub use simulation::{
    SimulatedTrace, Stage, StageWaveforms, TraceMetadata, Unit, simulate, simulate_replicas,
};
pub use time_grid::TimeGrid;
