use crate::config::Config;
use crate::error::Error;
use crate::scheduler::{fcfs, priority, round_robin, sjf};
use crate::scheduler::{Averages, Policy, ProcessRecord, Schedule, Ticks};
use std::collections::HashSet;
use std::str::FromStr;

/// Dispatches a policy to its implementation.
///
/// Holds only configuration, every run works on its own copy of the state.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchedulerEngine {
    config: Config,
}

impl SchedulerEngine {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn run(&self, policy: Policy, processes: &[ProcessRecord]) -> Result<Schedule, Error> {
        self.config.validate()?;
        validate(processes)?;

        log::debug!("Running {} over {} processes", policy, processes.len());

        let schedule = match policy {
            Policy::Fcfs => fcfs::schedule(processes),
            Policy::SjfNonPreemptive => sjf::non_preemptive(processes),
            Policy::SjfPreemptive => sjf::preemptive(processes),
            Policy::PriorityNonPreemptive => {
                priority::non_preemptive(processes, self.config.priority.non_preemptive)
            }
            Policy::PriorityPreemptive => {
                priority::preemptive(processes, self.config.priority.preemptive)
            }
            Policy::RoundRobin => round_robin::schedule(processes, self.config.quantum),
        };

        log::debug!(
            "{} finished at t={} with {} idle",
            policy,
            schedule.makespan(),
            schedule.idle_time()
        );

        Ok(schedule)
    }

    pub fn run_named(&self, name: &str, processes: &[ProcessRecord]) -> Result<Schedule, Error> {
        let policy = Policy::from_str(name)?;
        self.run(policy, processes)
    }

    /// Runs `policy` and reduces its results, `None` averages means no data.
    pub fn run_with_averages(
        &self,
        policy: Policy,
        processes: &[ProcessRecord],
    ) -> Result<(Schedule, Option<Averages>), Error> {
        let schedule = self.run(policy, processes)?;
        let averages = Averages::from_results(&schedule.results);
        Ok((schedule, averages))
    }
}

fn validate(processes: &[ProcessRecord]) -> Result<(), Error> {
    let mut ids = HashSet::with_capacity(processes.len());
    for process in processes {
        if !ids.insert(process.id) {
            log::warn!("Rejected input, process id {} is duplicated", process.id);
            return Err(Error::DuplicateId(process.id));
        }
    }

    // The clock never passes the latest arrival plus all the work
    let latest = processes.iter().map(|p| p.arrival).max().unwrap_or(0);
    let horizon = processes
        .iter()
        .try_fold(latest, |time, process| time.checked_add(process.burst));
    if horizon.is_none() {
        log::warn!("Rejected input, workload overflows the clock");
        return Err(Error::TimeOverflow(Ticks::MAX));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::PriorityOrder;

    #[test]
    fn duplicate_ids_are_rejected() {
        let processes = [ProcessRecord::new(1, 0, 1), ProcessRecord::new(1, 2, 1)];
        let engine = SchedulerEngine::default();

        assert_eq!(
            engine.run(Policy::Fcfs, &processes),
            Err(Error::DuplicateId(1))
        );
    }

    #[test]
    fn clock_overflow_is_rejected() {
        let processes = [
            ProcessRecord::new(1, i64::MAX as u64, i64::MAX as u64),
            ProcessRecord::new(2, 0, i64::MAX as u64),
            ProcessRecord::new(3, 0, i64::MAX as u64),
        ];
        let engine = SchedulerEngine::default();

        for policy in Policy::ALL {
            assert_eq!(
                engine.run(policy, &processes),
                Err(Error::TimeOverflow(Ticks::MAX))
            );
        }
    }

    #[test]
    fn largest_clock_is_accepted() {
        let processes = [ProcessRecord::new(1, Ticks::MAX - 3, 3)];
        let schedule = SchedulerEngine::default()
            .run(Policy::Fcfs, &processes)
            .unwrap();

        assert_eq!(schedule.makespan(), Ticks::MAX);
    }

    #[test]
    fn unknown_name_is_rejected() {
        let engine = SchedulerEngine::default();

        assert_eq!(
            engine.run_named("MLFQ", &[]),
            Err(Error::UnknownPolicy("MLFQ".to_string()))
        );
    }

    #[test]
    fn zero_quantum_is_rejected() {
        let engine = SchedulerEngine::new(Config {
            quantum: 0,
            ..Config::default()
        });

        assert_eq!(
            engine.run(Policy::RoundRobin, &[ProcessRecord::new(1, 0, 1)]),
            Err(Error::InvalidQuantum)
        );
    }

    #[test]
    fn empty_input_has_no_data() {
        let engine = SchedulerEngine::default();

        for policy in Policy::ALL {
            let (schedule, averages) = engine.run_with_averages(policy, &[]).unwrap();
            assert!(schedule.results.is_empty());
            assert!(schedule.timeline.is_empty());
            assert_eq!(averages, None);
        }
    }

    #[test]
    fn priority_direction_comes_from_config() {
        let processes = [
            ProcessRecord::new(1, 0, 2).with_priority(1),
            ProcessRecord::new(2, 0, 2).with_priority(9),
        ];

        let engine = SchedulerEngine::default();
        let schedule = engine.run(Policy::PriorityNonPreemptive, &processes).unwrap();
        assert_eq!(schedule.results[0].id, 1);
        let schedule = engine.run(Policy::PriorityPreemptive, &processes).unwrap();
        assert_eq!(schedule.results[0].id, 2);

        let mut config = Config::default();
        config.priority.non_preemptive = PriorityOrder::HigherFirst;
        config.priority.preemptive = PriorityOrder::LowerFirst;
        let engine = SchedulerEngine::new(config);
        let schedule = engine.run(Policy::PriorityNonPreemptive, &processes).unwrap();
        assert_eq!(schedule.results[0].id, 2);
        let schedule = engine.run(Policy::PriorityPreemptive, &processes).unwrap();
        assert_eq!(schedule.results[0].id, 1);
    }

    #[test]
    fn quantum_comes_from_config() {
        let processes = [ProcessRecord::new(1, 0, 6)];
        let engine = SchedulerEngine::new(Config {
            quantum: 3,
            ..Config::default()
        });

        let schedule = engine.run(Policy::RoundRobin, &processes).unwrap();
        assert_eq!(schedule.timeline.len(), 2);
    }
}
