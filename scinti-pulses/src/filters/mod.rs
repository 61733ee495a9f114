//! First order recursive filters applied sample by sample.
//!
//! A filter owns its recursion state and sees samples strictly in
//! increasing time order, so output `i` depends only on inputs `0..=i`.
//! Typical usage:
//! ```ignore
//! let shaped: Vec<Real> = trace
//!     .iter()
//!     .copied()
//!     .filtered(LowPass::new(tau_rc, dt))
//!     .filtered(Cascade::new(HighPass::new(tau_cr, dt), n))
//!     .collect();
//! ```
pub(crate) mod cascade;
pub(crate) mod high_pass;
pub(crate) mod low_pass;

pub use cascade::Cascade;
pub use high_pass::HighPass;
pub use low_pass::LowPass;

use scinti_common::Real;

pub trait Filter: Clone {
    /// Consumes the next input sample and returns the matching output sample.
    fn push(&mut self, value: Real) -> Real;
}

#[derive(Clone)]
pub struct FilterIter<I, F>
where
    I: Iterator<Item = Real>,
    F: Filter,
{
    filter: F,
    source: I,
}

impl<I, F> FilterIter<I, F>
where
    I: Iterator<Item = Real>,
    F: Filter,
{
    pub fn new(source: I, filter: F) -> Self {
        FilterIter { source, filter }
    }
}

impl<I, F> Iterator for FilterIter<I, F>
where
    I: Iterator<Item = Real>,
    F: Filter,
{
    type Item = Real;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.source.next()?;
        Some(self.filter.push(value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.source.size_hint()
    }
}

pub trait FilterIterator<I>
where
    I: Iterator<Item = Real>,
{
    fn filtered<F: Filter>(self, filter: F) -> FilterIter<I, F>;
}

impl<I> FilterIterator<I> for I
where
    I: Iterator<Item = Real>,
{
    fn filtered<F: Filter>(self, filter: F) -> FilterIter<I, F> {
        FilterIter::new(self, filter)
    }
}

#[cfg(test)]
pub(crate) mod test_utils {
    use super::*;

    /// Asserts that changing input `index` leaves every earlier output untouched.
    pub(crate) fn assert_causal<F: Filter>(filter: F, len: usize, index: usize) {
        let input: Vec<Real> = (0..len).map(|i| (i as Real * 0.37).sin()).collect();
        let mut perturbed = input.clone();
        perturbed[index] += 5.0;

        let output: Vec<_> = input.into_iter().filtered(filter.clone()).collect();
        let perturbed: Vec<_> = perturbed.into_iter().filtered(filter).collect();

        assert_eq!(output[..index], perturbed[..index]);
        assert_ne!(output[index], perturbed[index]);
    }
}
