pub mod tracer;

/// Scalar used for every sampled quantity.
pub type Real = f64;
/// Seconds.
pub type Time = Real;
/// Electrons.
pub type Charge = Real;
/// Volts.
pub type Voltage = Real;
/// Hertz.
pub type Frequency = Real;

/// Elementary charge in coulombs (exact, SI 2019).
pub const ELEMENTARY_CHARGE: Real = 1.602_176_634e-19;

/// Number of samples covering `duration` at `sample_rate`, rounded to the nearest integer.
pub fn sample_count(duration: Time, sample_rate: Frequency) -> usize {
    (duration * sample_rate).round().max(0.0) as usize
}
