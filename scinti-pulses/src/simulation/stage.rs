use scinti_common::Real;
use strum::{Display, EnumIter};

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum Unit {
    Electrons,
    Volts,
}

/// The nine ordered outputs of the pipeline.
#[derive(Clone, Copy, Debug, Display, EnumIter, PartialEq, Eq, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum Stage {
    /// Idealised mean charge.
    V0,
    /// With shot noise.
    V1,
    /// With after-pulses.
    V2,
    /// With dark counts.
    V3,
    /// Anode voltage.
    V4,
    /// With thermal noise.
    V5,
    /// After the RC preamplifier.
    V6,
    /// After the CR^n shaper.
    V7,
    /// After the ADC.
    V8,
}

impl Stage {
    pub fn unit(&self) -> Unit {
        match self {
            Stage::V0 | Stage::V1 | Stage::V2 | Stage::V3 => Unit::Electrons,
            _ => Unit::Volts,
        }
    }
}

/// One waveform per stage, all aligned to the same time grid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StageWaveforms {
    pub v0: Vec<Real>,
    pub v1: Vec<Real>,
    pub v2: Vec<Real>,
    pub v3: Vec<Real>,
    pub v4: Vec<Real>,
    pub v5: Vec<Real>,
    pub v6: Vec<Real>,
    pub v7: Vec<Real>,
    pub v8: Vec<Real>,
}

impl StageWaveforms {
    pub fn get(&self, stage: Stage) -> &[Real] {
        match stage {
            Stage::V0 => &self.v0,
            Stage::V1 => &self.v1,
            Stage::V2 => &self.v2,
            Stage::V3 => &self.v3,
            Stage::V4 => &self.v4,
            Stage::V5 => &self.v5,
            Stage::V6 => &self.v6,
            Stage::V7 => &self.v7,
            Stage::V8 => &self.v8,
        }
    }
}
