use crate::time_grid::TimeGrid;
use scinti_common::{Real, Time};

/// Lifetimes after which a pulse is considered spent.
const CUTOFF_LIFETIMES: Real = 30.0;

/// Relative difference below which the decay and spreading constants are treated as equal.
const CRITICAL_TOLERANCE: Real = 1e-6;

/// Response of a single photoelectron: an exponential decay convolved with
/// the unit-area charge spreading kernel `exp(-t/rise)/rise`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PulseShape {
    /// No spreading, `f(t) = e^{-t/d}`.
    Exponential { decay: Time },
    /// `f(t) = A(e^{-t/d} - e^{-t/r})` with `A = d/(d - r)`.
    Biexp { decay: Time, rise: Time, coef: Real },
    /// Limit of `Biexp` as `r -> d`, `f(t) = (t/d)e^{-t/d}`.
    Critical { decay: Time },
}

impl PulseShape {
    pub fn new(decay: Time, spread: Time) -> Self {
        if spread <= 0.0 {
            Self::Exponential { decay }
        } else if (decay - spread).abs() <= CRITICAL_TOLERANCE * decay.max(spread) {
            Self::Critical { decay }
        } else {
            Self::Biexp {
                decay,
                rise: spread,
                coef: decay / (decay - spread),
            }
        }
    }

    /// Value at `time` after the pulse starts, zero before it.
    pub fn get_value_at(&self, time: Time) -> Real {
        if time < 0.0 {
            return Real::default();
        }
        match *self {
            Self::Exponential { decay } => Real::exp(-time / decay),
            Self::Biexp { decay, rise, coef } => {
                coef * (Real::exp(-time / decay) - Real::exp(-time / rise))
            }
            Self::Critical { decay } => time / decay * Real::exp(-time / decay),
        }
    }

    /// Time after which the response is negligible.
    pub fn duration(&self) -> Time {
        CUTOFF_LIFETIMES
            * match *self {
                Self::Exponential { decay } | Self::Critical { decay } => decay,
                Self::Biexp { decay, rise, .. } => decay.max(rise),
            }
    }

    /// Time and value of the maximum.
    pub fn peak(&self) -> (Time, Real) {
        match *self {
            Self::Exponential { .. } => (0.0, 1.0),
            Self::Biexp { decay, rise, .. } => {
                /*
                f'(t) = A(e^{-t/r}/r - e^{-t/d}/d) = 0
                t' = ln(d/r) dr/(d - r)
                */
                let peak_time = Real::ln(decay / rise) * decay * rise / (decay - rise);
                (peak_time, self.get_value_at(peak_time))
            }
            Self::Critical { decay } => (decay, Real::exp(-1.0)),
        }
    }
}

/// A scaled copy of a pulse shape starting at a given time.
#[derive(Clone, Debug, PartialEq)]
pub struct Pulse {
    pub start: Time,
    pub amplitude: Real,
    pub shape: PulseShape,
}

impl Pulse {
    pub fn new(start: Time, amplitude: Real, shape: PulseShape) -> Self {
        Self {
            start,
            amplitude,
            shape,
        }
    }

    /// Superposes the pulse onto `waveform`, which must be aligned with `grid`.
    pub fn add_to(&self, grid: &TimeGrid, waveform: &mut [Real]) {
        if self.amplitude == 0.0 {
            return;
        }
        let first = grid.index_at_or_after(self.start);
        let last = grid
            .index_at_or_after(self.start + self.shape.duration())
            .min(waveform.len());
        for (index, value) in waveform
            .iter_mut()
            .enumerate()
            .take(last)
            .skip(first)
        {
            let time = (grid.time_at(index) - self.start).max(0.0);
            *value += self.amplitude * self.shape.get_value_at(time);
        }
    }
}
