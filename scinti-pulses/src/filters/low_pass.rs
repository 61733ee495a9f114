use super::Filter;
use scinti_common::{Frequency, Real, Time};
use std::f64::consts::PI;

/// Single pole RC low-pass, `y[i] = a x[i] + (1 - a) y[i-1]` with `a = dt/(tau + dt)`.
#[derive(Default, Clone, Debug)]
pub struct LowPass {
    alpha: Real,
    previous: Option<Real>,
}

impl LowPass {
    pub fn new(time_constant: Time, time_step: Time) -> Self {
        LowPass {
            alpha: time_step / (time_constant + time_step),
            ..Default::default()
        }
    }

    /// Low-pass whose -3 dB point lies at `cutoff`, i.e. `tau = 1/(2 pi fc)`.
    pub fn from_cutoff(cutoff: Frequency, time_step: Time) -> Self {
        Self::new(1.0 / (2.0 * PI * cutoff), time_step)
    }
}

impl Filter for LowPass {
    fn push(&mut self, value: Real) -> Real {
        let output = match self.previous {
            // The first output follows the first input
            None => value,
            Some(previous) => self.alpha * value + (1.0 - self.alpha) * previous,
        };
        self.previous = Some(output);
        output
    }
}
