use super::Filter;
use scinti_common::{Real, Time};

/// Single pole CR high-pass, `y[i] = b (y[i-1] + x[i] - x[i-1])` with `b = tau/(tau + dt)`.
#[derive(Default, Clone, Debug)]
pub struct HighPass {
    beta: Real,
    // (input, output)
    previous: Option<(Real, Real)>,
}

impl HighPass {
    pub fn new(time_constant: Time, time_step: Time) -> Self {
        HighPass {
            beta: time_constant / (time_constant + time_step),
            ..Default::default()
        }
    }
}

impl Filter for HighPass {
    fn push(&mut self, value: Real) -> Real {
        let output = match self.previous {
            // The first output follows the first input
            None => value,
            Some((previous_input, previous_output)) => {
                self.beta * (previous_output + value - previous_input)
            }
        };
        self.previous = Some((value, output));
        output
    }
}
