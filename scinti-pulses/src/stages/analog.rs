use crate::{
    config::ElectronicsParameters,
    filters::{Cascade, FilterIterator, HighPass, LowPass},
};
use scinti_common::{Time, Voltage};
use tracing::instrument;

/// RC preamplifier `v6`: single pole low-pass of `v5` scaled by `G1`.
#[instrument(skip_all, level = "debug")]
pub fn preamplify(
    v5: &[Voltage],
    electronics: &ElectronicsParameters,
    time_step: Time,
) -> Vec<Voltage> {
    if !electronics.preamplifier {
        return v5.to_vec();
    }
    v5.iter()
        .copied()
        .filtered(LowPass::new(
            electronics.preamplifier_time_constant,
            time_step,
        ))
        .map(|value| electronics.preamplifier_gain * value)
        .collect()
}

/// CR^n fast shaper `v7`: `cr_order` cascaded high-pass stages applied to `v6`,
/// the last stage's output scaled by `G2`.
#[instrument(skip_all, level = "debug", fields(order = electronics.cr_order))]
pub fn shape(
    v6: &[Voltage],
    electronics: &ElectronicsParameters,
    time_step: Time,
) -> Vec<Voltage> {
    if !electronics.amplifier {
        return v6.to_vec();
    }
    let stage = HighPass::new(electronics.amplifier_time_constant, time_step);
    let order = usize::try_from(electronics.cr_order).unwrap_or_default();
    v6.iter()
        .copied()
        .filtered(Cascade::new(stage, order))
        .map(|value| electronics.amplifier_gain * value)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use scinti_common::Real;

    fn step() -> Vec<Voltage> {
        std::iter::once(0.0)
            .chain(std::iter::repeat_n(1.0, 999))
            .collect()
    }

    #[test]
    fn disabled_is_pass_through() {
        let electronics = ElectronicsParameters::default();
        assert_eq!(preamplify(&step(), &electronics, 1e-9), step());
        assert_eq!(shape(&step(), &electronics, 1e-9), step());
    }

    #[test]
    fn preamplifier_gain() {
        let electronics = ElectronicsParameters {
            preamplifier: true,
            preamplifier_gain: 10.0,
            preamplifier_time_constant: 10e-9,
            ..Default::default()
        };
        let v6 = preamplify(&step(), &electronics, 1e-9);
        assert_eq!(v6[0], 0.0);
        assert_approx_eq!(v6[999], 10.0, 1e-6);
    }

    #[test]
    fn zero_order_shaper_is_pure_gain() {
        let electronics = ElectronicsParameters {
            amplifier: true,
            amplifier_gain: 3.0,
            cr_order: 0,
            ..Default::default()
        };
        let v7 = shape(&step(), &electronics, 1e-9);
        for (a, b) in v7.iter().zip(step()) {
            assert_eq!(*a, 3.0 * b);
        }
    }

    #[test]
    fn shaper_returns_to_baseline() {
        let electronics = ElectronicsParameters {
            amplifier: true,
            amplifier_gain: 2.0,
            amplifier_time_constant: 20e-9,
            cr_order: 2,
            ..Default::default()
        };
        let v7 = shape(&step(), &electronics, 1e-9);
        assert_approx_eq!(v7[1], 2.0 * Real::powi(20.0 / 21.0, 2), 1e-12);
        assert_approx_eq!(v7[999], 0.0, 1e-6);
        // a second order CR shaper undershoots
        assert!(v7.iter().any(|v| *v < 0.0));
    }

    #[test]
    fn causality() {
        let electronics = ElectronicsParameters {
            preamplifier: true,
            amplifier: true,
            cr_order: 3,
            preamplifier_time_constant: 30e-9,
            amplifier_time_constant: 10e-9,
            ..Default::default()
        };
        let input: Vec<Voltage> = (0..500).map(|i| (i as Real * 0.05).sin()).collect();
        for index in [0, 250, 499] {
            let mut perturbed = input.clone();
            perturbed[index] -= 1.0;
            let output = shape(&preamplify(&input, &electronics, 1e-9), &electronics, 1e-9);
            let changed = shape(
                &preamplify(&perturbed, &electronics, 1e-9),
                &electronics,
                1e-9,
            );
            assert_eq!(output[..index], changed[..index]);
            assert_ne!(output[index], changed[index]);
        }
    }
}
