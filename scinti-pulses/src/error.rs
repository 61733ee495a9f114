use scinti_common::Real;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("Energy at index {index} is negative or not finite: {value}")]
    InvalidEnergy { index: usize, value: Real },
    #[error("Arrival time at index {index} is negative or not finite: {value}")]
    InvalidArrivalTime { index: usize, value: Real },
    #[error("{times} arrival times supplied for {energies} energies")]
    LengthMismatch { energies: usize, times: usize },
    #[error("Energy at index {index} yields {photoelectrons} photoelectrons, more than {limit}")]
    TooManyPhotoelectrons {
        index: usize,
        photoelectrons: Real,
        limit: Real,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a probability in [0, 1], got {value}")]
    Probability { name: &'static str, value: Real },
    #[error("{name} must be strictly positive, got {value}")]
    NotPositive { name: &'static str, value: Real },
    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: Real },
    #[error("bits must lie in 1..=52, got {0}")]
    Bits(i32),
    #[error("cr-order must not be negative, got {0}")]
    CrOrder(i32),
    #[error("sample-rate {sample_rate} Hz does not exceed twice the cutoff-frequency {cutoff} Hz")]
    Aliasing { sample_rate: Real, cutoff: Real },
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Invalid Input: {0}")]
    Input(#[from] InputError),
    #[error("Invalid Configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Invalid Poisson Distribution: {0}")]
    Poisson(#[from] rand_distr::PoissonError),
    #[error("Invalid Binomial Distribution: {0}")]
    Binomial(#[from] rand_distr::BinomialError),
    #[error("Invalid Normal Distribution: {0}")]
    Normal(#[from] rand_distr::NormalError),
    #[error("Invalid Exponential Distribution: {0}")]
    Exp(#[from] rand_distr::ExpError),
}

pub type Result<T> = std::result::Result<T, SimulationError>;
