use anyhow::{Context, Result, bail};
use clap::Args;
use scinti_common::{Real, Time};
use scinti_pulses::SimulationConfig;
use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};
use tracing::debug;

#[derive(Clone, Debug, Args)]
pub(crate) struct Input {
    /// JSON file of simulation options, every option not named keeps its default
    #[clap(long)]
    config: Option<PathBuf>,

    /// Deposited energies in keV, comma separated
    #[clap(long, value_delimiter = ',', allow_negative_numbers = true)]
    energies: Vec<Real>,

    /// File of deposited energies in keV, separated by whitespace or commas
    #[clap(long, conflicts_with = "energies")]
    energy_file: Option<PathBuf>,

    /// Arrival time in seconds of each energy, comma separated
    #[clap(long, value_delimiter = ',', allow_negative_numbers = true)]
    arrival_times: Option<Vec<Time>>,

    /// File of arrival times in seconds, one per energy
    #[clap(long, conflicts_with = "arrival_times")]
    arrival_file: Option<PathBuf>,
}

/// Parses numbers separated by any mix of whitespace and commas.
pub(crate) fn parse_values(text: &str) -> Result<Vec<Real>> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(index, token)| {
            token
                .parse::<Real>()
                .with_context(|| format!("Value {index} is not a number: {token:?}"))
        })
        .collect()
}

fn read_values(path: &Path) -> Result<Vec<Real>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    let values = parse_values(&text).with_context(|| format!("In {}", path.display()))?;
    debug!("Read {} values from {}", values.len(), path.display());
    Ok(values)
}

impl Input {
    pub(crate) fn load_config(&self) -> Result<SimulationConfig> {
        let Some(path) = &self.config else {
            return Ok(SimulationConfig::default());
        };
        let file = File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;
        let config = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;
        debug!("Configuration: {config:?}");
        Ok(config)
    }

    pub(crate) fn load_energies(&self) -> Result<Vec<Real>> {
        match &self.energy_file {
            Some(path) => read_values(path),
            None => Ok(self.energies.clone()),
        }
    }

    pub(crate) fn load_arrival_times(&self) -> Result<Option<Vec<Time>>> {
        match (&self.arrival_file, &self.arrival_times) {
            (Some(path), _) => read_values(path).map(Some),
            (None, Some(times)) => Ok(Some(times.clone())),
            (None, None) => Ok(None),
        }
    }
}

/// Rejects an empty replica count before any work is scheduled.
pub(crate) fn check_count(count: usize) -> Result<usize> {
    if count == 0 {
        bail!("At least one replica must be requested");
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_separators() {
        assert_eq!(
            parse_values("100, 662\n 1.5e3\t-2,").unwrap(),
            vec![100.0, 662.0, 1500.0, -2.0]
        );
    }

    #[test]
    fn empty_text() {
        assert!(parse_values(" \n ").unwrap().is_empty());
    }

    #[test]
    fn bad_token_is_reported() {
        let error = parse_values("1, two, 3").unwrap_err();
        assert!(error.to_string().contains("\"two\""));
    }

    #[test]
    fn zero_replicas_rejected() {
        assert!(check_count(0).is_err());
        assert_eq!(check_count(3).unwrap(), 3);
    }
}
