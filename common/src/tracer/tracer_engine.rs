use clap::Args;
use thiserror::Error;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt};

#[derive(Debug, Error)]
pub enum TracerError {
    #[error("Invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
    #[error("Global subscriber already set: {0}")]
    AlreadySet(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Command line options controlling the stdout tracer.
#[derive(Clone, Debug, Args)]
pub struct TracerOptions {
    /// Log filter used when `RUST_LOG` is not set, e.g. `info` or `scinti_pulses=debug`
    #[clap(long, env = "SCINTI_LOG", default_value = "info")]
    pub log_filter: String,

    /// Disable coloured output
    #[clap(long)]
    pub no_ansi: bool,
}

impl Default for TracerOptions {
    fn default() -> Self {
        Self {
            log_filter: "info".to_owned(),
            no_ansi: false,
        }
    }
}

/// This object initialises the stdout tracer, given a TracerOptions struct.
pub struct TracerEngine {
    service_name: String,
    module_name: String,
}

impl TracerEngine {
    /// Initialises the stdout tracer for the crate
    /// #Arguments
    /// * `options` - The caller-specified instance of TracerOptions.
    /// * `service_name` - The name of the binary.
    /// * `module_name` - The name of the current module.
    /// #Returns
    /// An instance of TracerEngine, or an error if a subscriber is already installed.
    pub fn new(
        options: TracerOptions,
        service_name: &str,
        module_name: &str,
    ) -> Result<Self, TracerError> {
        let stdout_tracer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stdout)
            .with_ansi(!options.no_ansi);

        // RUST_LOG takes precedence over the command line default
        let log_filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::try_new(&options.log_filter)?,
        };

        let subscriber =
            tracing_subscriber::Registry::default().with(stdout_tracer.with_filter(log_filter));
        tracing::subscriber::set_global_default(subscriber)?;

        Ok(Self {
            service_name: service_name.to_owned(),
            module_name: module_name.to_owned(),
        })
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }
}
