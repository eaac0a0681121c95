pub mod config;
pub mod error;
pub mod parser;
pub mod scheduler;

pub use config::Config;
pub use error::Error;
pub use scheduler::{Policy, ProcessRecord, Schedule, SchedulerEngine, SimulationResult};
