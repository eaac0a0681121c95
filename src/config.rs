use crate::error::Error;
use crate::scheduler::round_robin::DEFAULT_QUANTUM;
use crate::scheduler::{Policy, PriorityOrder, Ticks};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub const CONFIG_FILE: &str = "config.json";

/// Which end of the priority scale wins, per priority policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PriorityConfig {
    pub non_preemptive: PriorityOrder,
    pub preemptive: PriorityOrder,
}

impl Default for PriorityConfig {
    fn default() -> Self {
        Self {
            non_preemptive: PriorityOrder::LowerFirst,
            preemptive: PriorityOrder::HigherFirst,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub scheduler: Option<Policy>,
    pub quantum: Ticks,
    pub priority: PriorityConfig,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let file = File::open(path).map_err(|error| Error::IO(error.kind()))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `config.json` from the working directory, if no valid file is
    /// found the default config is used.
    pub fn load() -> Self {
        let path = match std::env::current_dir() {
            Ok(mut path) => {
                path.push(CONFIG_FILE);
                path
            }
            Err(error) => {
                log::warn!("No working directory ({}), using default config", error);
                return Config::default();
            }
        };

        match Config::from_file(&path) {
            Ok(config) => {
                log::debug!("Loaded config from {}", path.display());
                config
            }
            Err(Error::IO(std::io::ErrorKind::NotFound)) => Config::default(),
            Err(error) => {
                log::warn!("Ignoring {}: {}", path.display(), error);
                Config::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.quantum == 0 {
            return Err(Error::InvalidQuantum);
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scheduler: Some(Policy::Fcfs),
            quantum: DEFAULT_QUANTUM,
            priority: PriorityConfig::default(),
        }
    }
}
