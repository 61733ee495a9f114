use scinti_common::Real;
use scinti_pulses::{SimulatedTrace, Stage};
use strum::IntoEnumIterator;
use tracing::info;

/// Sample mean and standard deviation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Statistics {
    pub(crate) mean: Real,
    pub(crate) sd: Real,
}

impl Statistics {
    pub(crate) fn new(values: impl Iterator<Item = Real> + Clone) -> Self {
        let count = values.clone().count();
        if count == 0 {
            return Self::default();
        }
        let mean = values.clone().sum::<Real>() / count as Real;
        let variance = values.map(|v| (v - mean).powi(2)).sum::<Real>() / count as Real;
        Self {
            mean,
            sd: variance.sqrt(),
        }
    }
}

/// Per replica counts and the height of each stage's largest excursion.
pub(crate) struct Summary {
    replicas: usize,
    events: Statistics,
    photoelectrons: Statistics,
    after_pulses: Statistics,
    dark_counts: Statistics,
    clipped_samples: Statistics,
    peaks: Vec<(Stage, Statistics)>,
}

fn peak(waveform: &[Real]) -> Real {
    waveform.iter().copied().fold(Real::MIN, Real::max)
}

impl Summary {
    pub(crate) fn new(traces: &[SimulatedTrace]) -> Self {
        let metadata = || traces.iter().map(|trace| &trace.metadata);
        Self {
            replicas: traces.len(),
            events: Statistics::new(metadata().map(|m| m.num_events() as Real)),
            photoelectrons: Statistics::new(metadata().map(|m| m.primary_photoelectrons as Real)),
            after_pulses: Statistics::new(metadata().map(|m| m.after_pulses as Real)),
            dark_counts: Statistics::new(metadata().map(|m| m.dark_counts as Real)),
            clipped_samples: Statistics::new(metadata().map(|m| m.clipped_samples as Real)),
            peaks: Stage::iter()
                .map(|stage| {
                    let peaks = traces.iter().map(move |trace| peak(trace.get(stage)));
                    (stage, Statistics::new(peaks))
                })
                .collect(),
        }
    }

    pub(crate) fn report(&self) {
        info!("Replicas: {}", self.replicas);
        for (name, stats) in [
            ("Events", self.events),
            ("Photoelectrons", self.photoelectrons),
            ("After-pulses", self.after_pulses),
            ("Dark counts", self.dark_counts),
            ("Clipped samples", self.clipped_samples),
        ] {
            info!("{name}: {:.3} ± {:.3}", stats.mean, stats.sd);
        }
        for (stage, stats) in &self.peaks {
            info!(
                "Peak of {stage} ({}): {:.4e} ± {:.4e}",
                stage.unit(),
                stats.mean,
                stats.sd
            );
        }
    }
}
