use scinti_common::{Frequency, Real, Time, sample_count};

/// Offsets within this fraction of a sample are treated as landing on the sample.
const INDEX_TOLERANCE: Real = 1e-9;

/// The uniformly spaced instants shared by every stage waveform.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeGrid {
    time_step: Time,
    len: usize,
}

impl TimeGrid {
    pub fn new(duration: Time, sample_rate: Frequency) -> Self {
        Self {
            time_step: 1.0 / sample_rate,
            len: sample_count(duration, sample_rate),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn time_step(&self) -> Time {
        self.time_step
    }

    pub fn time_at(&self, index: usize) -> Time {
        index as Time * self.time_step
    }

    /// Index of the first instant not earlier than `time`, or `len` if there is none.
    pub fn index_at_or_after(&self, time: Time) -> usize {
        let index = (time / self.time_step - INDEX_TOLERANCE).ceil().max(0.0);
        if index >= self.len as Real {
            self.len
        } else {
            index as usize
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Time> + '_ {
        (0..self.len).map(|index| self.time_at(index))
    }

    pub fn zeros(&self) -> Vec<Real> {
        vec![Real::default(); self.len]
    }
}
