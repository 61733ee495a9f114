use scinti_common::{ELEMENTARY_CHARGE, Real, Voltage};
use tracing::instrument;

/// Converts a charge waveform in electrons to the anode voltage `q_e/C1`
/// per electron, plus a constant baseline. `capacitance` must be positive.
#[instrument(skip_all, level = "debug")]
pub fn to_voltage(v3: &[Real], capacitance: Real, baseline: Voltage) -> Vec<Voltage> {
    let volts_per_electron = ELEMENTARY_CHARGE / capacitance;
    v3.iter()
        .map(|charge| charge * volts_per_electron + baseline)
        .collect()
}
