mod tracer_engine;

pub use tracer_engine::{TracerEngine, TracerError, TracerOptions};

/// Should be called at the start of each binary.
/// Installs the stdout subscriber and reports which binary and module
/// it was initialised from.
#[macro_export]
macro_rules! init_tracer {
    ($options:expr) => {{
        let tracer =
            $crate::tracer::TracerEngine::new($options, env!("CARGO_BIN_NAME"), module_path!());
        if let Ok(tracer) = &tracer {
            tracing::info!(
                "Tracing initialised for {} ({})",
                tracer.service_name(),
                tracer.module_name()
            );
        }
        tracer
    }};
}
