use super::Filter;
use scinti_common::Real;

/// Identical filters applied in series, each stage feeding the next.
#[derive(Clone, Debug)]
pub struct Cascade<F: Filter> {
    stages: Vec<F>,
}

impl<F: Filter> Cascade<F> {
    /// `order` copies of `filter`, an order of zero passes samples through unchanged.
    pub fn new(filter: F, order: usize) -> Self {
        Cascade {
            stages: vec![filter; order],
        }
    }

    pub fn order(&self) -> usize {
        self.stages.len()
    }
}

impl<F: Filter> Filter for Cascade<F> {
    fn push(&mut self, value: Real) -> Real {
        self.stages
            .iter_mut()
            .fold(value, |value, stage| stage.push(value))
    }
}
