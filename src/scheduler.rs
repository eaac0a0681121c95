pub mod engine;
pub mod fcfs;
pub mod metrics;
pub mod policy;
pub mod priority;
pub mod process;
pub mod round_robin;
pub mod sjf;
pub mod state;

pub use engine::SchedulerEngine;
pub use metrics::Averages;
pub use policy::{Policy, PriorityOrder};
pub use process::{ProcessId, ProcessRecord, Schedule, SimulationResult, Slice, Ticks};
