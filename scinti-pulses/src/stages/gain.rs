use crate::{config::PhotodetectorParameters, error::Result};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use scinti_common::Real;

/// Charge multiplication of the photodetector: each photoelectron delivers
/// an independent `Normal(single_electron_charge, charge_spread)` charge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhotoelectronGain {
    charge: Real,
    spread: Real,
}

impl PhotoelectronGain {
    pub fn new(photodetector: &PhotodetectorParameters) -> Self {
        Self {
            charge: photodetector.single_electron_charge,
            spread: photodetector.charge_spread,
        }
    }

    pub fn mean(&self) -> Real {
        self.charge
    }

    /// Total charge of `count` photoelectrons, `Normal(n q, sqrt(n) sigma)`.
    pub fn sample<R: Rng + ?Sized>(&self, count: u64, rng: &mut R) -> Result<Real> {
        let count = count as Real;
        if count == 0.0 || self.spread == 0.0 {
            return Ok(count * self.charge);
        }
        Ok(Normal::new(count * self.charge, count.sqrt() * self.spread)?.sample(rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use rand::{SeedableRng, rngs::StdRng};

    fn gain(charge: Real, spread: Real) -> PhotoelectronGain {
        PhotoelectronGain::new(&PhotodetectorParameters {
            single_electron_charge: charge,
            charge_spread: spread,
            ..Default::default()
        })
    }

    #[test]
    fn no_spread_is_exact() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(gain(1.5, 0.0).sample(10, &mut rng).unwrap(), 15.0);
        assert_eq!(gain(1.5, 0.3).sample(0, &mut rng).unwrap(), 0.0);
    }

    #[test]
    fn spread_adds_in_quadrature() {
        let mut rng = StdRng::seed_from_u64(1);
        let gain = gain(2.0, 0.5);
        let samples: Vec<_> = (0..20000)
            .map(|_| gain.sample(100, &mut rng).unwrap())
            .collect();
        let mean = samples.iter().sum::<Real>() / samples.len() as Real;
        let variance =
            samples.iter().map(|s| (s - mean).powi(2)).sum::<Real>() / samples.len() as Real;
        assert_approx_eq!(mean, 200.0, 0.1);
        // 100 electrons of variance 0.25 each
        assert_approx_eq!(variance, 25.0, 1.5);
    }
}
