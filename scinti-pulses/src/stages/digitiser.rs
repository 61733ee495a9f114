use crate::{
    config::DigitisationParameters,
    filters::{FilterIterator, LowPass},
};
use scinti_common::{Time, Voltage};
use tracing::{instrument, warn};

/// The ADC output `v8` and how many samples were clipped.
pub struct Digitised {
    pub waveform: Vec<Voltage>,
    pub clipped: usize,
}

/// Width of one ADC code, `2 Vs / 2^R`.
pub fn step_size(bits: i32, full_scale: Voltage) -> Voltage {
    2.0 * full_scale / Voltage::powi(2.0, bits)
}

pub fn saturate(value: Voltage, full_scale: Voltage) -> Voltage {
    value.clamp(-full_scale, full_scale)
}

/// Nearest multiple of `step`.
pub fn quantise(value: Voltage, step: Voltage) -> Voltage {
    step * (value / step).round()
}

/// Anti-aliasing low-pass at `cutoff_frequency`, then saturation to
/// `[-full_scale, full_scale]`, then quantisation to `bits`.
#[instrument(skip_all, level = "debug", fields(bits = digitisation.bits))]
pub fn digitise(
    v7: &[Voltage],
    digitisation: &DigitisationParameters,
    time_step: Time,
) -> Digitised {
    if !digitisation.enabled {
        return Digitised {
            waveform: v7.to_vec(),
            clipped: 0,
        };
    }
    let full_scale = digitisation.full_scale;
    let step = step_size(digitisation.bits, full_scale);
    let mut clipped = 0;
    let waveform = v7
        .iter()
        .copied()
        .filtered(LowPass::from_cutoff(
            digitisation.cutoff_frequency,
            time_step,
        ))
        .map(|value| {
            if value.abs() > full_scale {
                clipped += 1;
            }
            quantise(saturate(value, full_scale), step)
        })
        .collect();
    if clipped > 0 {
        warn!("{clipped} samples saturated the ADC range of ±{full_scale} V");
    }
    Digitised { waveform, clipped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use scinti_common::Real;

    fn digitisation(bits: i32, full_scale: Voltage) -> DigitisationParameters {
        DigitisationParameters {
            enabled: true,
            bits,
            full_scale,
            ..Default::default()
        }
    }

    fn is_multiple(value: Voltage, step: Voltage) -> bool {
        let codes = value / step;
        (codes - codes.round()).abs() < 1e-9
    }

    #[test]
    fn step_sizes() {
        assert_eq!(step_size(1, 1.0), 1.0);
        assert_eq!(step_size(8, 2.0), 4.0 / 256.0);
        assert_approx_eq!(step_size(14, 1.0), 1.220703125e-4, 1e-16);
    }

    #[test]
    fn quantise_to_nearest() {
        assert_eq!(quantise(0.26, 0.5), 0.5);
        assert_eq!(quantise(0.24, 0.5), 0.0);
        assert_eq!(quantise(-0.8, 0.5), -1.0);
    }

    #[test]
    fn saturation_bounds() {
        assert_eq!(saturate(3.0, 2.0), 2.0);
        assert_eq!(saturate(-3.0, 2.0), -2.0);
        assert_eq!(saturate(1.5, 2.0), 1.5);
    }

    #[test]
    fn disabled_is_pass_through() {
        let v7 = vec![5.0, -0.123456, 0.0];
        let digitised = digitise(&v7, &DigitisationParameters::default(), 1e-9);
        assert_eq!(digitised.waveform, v7);
        assert_eq!(digitised.clipped, 0);
    }

    #[test]
    fn output_on_code_grid_and_in_range() {
        let v7: Vec<Voltage> = (0..2000)
            .map(|i| 3.0 * (i as Real * 0.01).sin())
            .collect();
        for (bits, full_scale) in [(1, 1.0), (4, 1.0), (12, 2.5), (14, 0.1)] {
            let step = step_size(bits, full_scale);
            let digitised = digitise(&v7, &digitisation(bits, full_scale), 1e-9);
            assert_eq!(digitised.waveform.len(), v7.len());
            assert!(digitised.clipped > 0);
            for value in &digitised.waveform {
                assert!(value.abs() <= full_scale);
                assert!(is_multiple(*value, step));
            }
        }
    }

    #[test]
    fn zero_input_stays_zero() {
        let digitised = digitise(&[0.0; 100], &digitisation(10, 1.0), 1e-9);
        assert!(digitised.waveform.iter().all(|v| *v == 0.0));
        assert_eq!(digitised.clipped, 0);
    }
}
