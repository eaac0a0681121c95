use crate::scheduler::{ProcessId, ProcessRecord, Schedule, SimulationResult, Slice, Ticks};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Working state of a single simulation run.
///
/// Owns the clock, the per-process remaining burst and first dispatch time,
/// and the schedule being built. Dropped when the policy returns.
#[derive(Debug)]
pub struct SimState<'a> {
    now: Ticks,
    // Not yet completed, input order
    pending: Vec<&'a ProcessRecord>,
    remaining: HashMap<ProcessId, Ticks>,
    started: HashMap<ProcessId, Ticks>,
    schedule: Schedule,
}

impl<'a> SimState<'a> {
    pub fn new(processes: &'a [ProcessRecord]) -> Self {
        Self {
            now: 0,
            pending: processes.iter().collect(),
            remaining: processes.iter().map(|p| (p.id, p.burst)).collect(),
            started: HashMap::with_capacity(processes.len()),
            schedule: Schedule {
                results: Vec::with_capacity(processes.len()),
                timeline: vec![],
            },
        }
    }

    pub fn now(&self) -> Ticks {
        self.now
    }

    pub fn is_done(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn remaining(&self, id: ProcessId) -> Ticks {
        self.remaining.get(&id).copied().unwrap_or(0)
    }

    /// Processes that have arrived and not yet completed, in input order.
    pub fn available(&self) -> impl Iterator<Item = &'a ProcessRecord> + '_ {
        let now = self.now;
        self.pending
            .iter()
            .copied()
            .filter(move |process| process.arrival <= now)
    }

    pub fn next_arrival(&self) -> Option<Ticks> {
        self.pending
            .iter()
            .map(|process| process.arrival)
            .filter(|&arrival| arrival > self.now)
            .min()
    }

    /// Moves the clock forward to `time`, never backwards.
    pub fn advance_to(&mut self, time: Ticks) {
        self.now = self.now.max(time);
    }

    /// Jumps over a period where nothing is ready to run.
    pub fn skip_idle(&mut self) {
        if let Some(arrival) = self.next_arrival() {
            log::trace!("t={} idle until {}", self.now, arrival);
            self.advance_to(arrival);
        }
    }

    /// Gives the CPU to `process` for `duration` units, completing it when its
    /// remaining burst reaches zero.
    pub fn run(&mut self, process: &'a ProcessRecord, duration: Ticks) {
        self.dispatch(process, duration, false);
    }

    /// Runs `process` for a single unit, extending its slice if it also held
    /// the CPU during the previous unit.
    pub fn step(&mut self, process: &'a ProcessRecord) {
        let duration = self.remaining(process.id).min(1);
        self.dispatch(process, duration, true);
    }

    fn dispatch(&mut self, process: &'a ProcessRecord, duration: Ticks, extend: bool) {
        let remaining = self.remaining(process.id);
        debug_assert!(
            process.arrival <= self.now,
            "Process {} dispatched before its arrival",
            process.id
        );
        debug_assert!(
            duration <= remaining,
            "Process {} dispatched for {} with only {} remaining",
            process.id,
            duration,
            remaining
        );

        self.started.entry(process.id).or_insert(self.now);

        if duration > 0 {
            log::trace!("t={} run process {} for {}", self.now, process.id, duration);
            self.push_slice(process.id, duration, extend);
            self.now += duration;
        }

        let remaining = remaining - duration;
        self.remaining.insert(process.id, remaining);

        if remaining == 0 {
            self.complete(process);
        }
    }

    pub fn into_schedule(self) -> Schedule {
        debug_assert!(self.pending.is_empty(), "Simulation ended with pending processes");
        self.schedule
    }

    fn push_slice(&mut self, id: ProcessId, duration: Ticks, extend: bool) {
        let end = self.now + duration;
        match self.schedule.timeline.last_mut() {
            Some(last) if extend && last.id == id && last.end == self.now => last.end = end,
            _ => self.schedule.timeline.push(Slice {
                id,
                start: self.now,
                end,
            }),
        }
    }

    fn complete(&mut self, process: &'a ProcessRecord) {
        let start = self.started.get(&process.id).copied().unwrap_or(self.now);
        let result = SimulationResult::new(process, start, self.now);
        log::trace!("t={} process {} completed", self.now, process.id);

        self.schedule.results.push(result);
        self.pending.retain(|pending| pending.id != process.id);
    }
}

/// Runs processes to completion in the given order, waiting for each one to
/// arrive before dispatching it.
pub fn run_in_order(processes: &[ProcessRecord], order: &[usize]) -> Schedule {
    let mut state = SimState::new(processes);

    for &index in order {
        let process = &processes[index];
        state.advance_to(process.arrival);
        state.run(process, process.burst);
    }

    state.into_schedule()
}

/// At every completion, picks the least available process under `order` and
/// runs it to completion.
pub fn run_non_preemptive<F>(processes: &[ProcessRecord], order: F) -> Schedule
where
    F: Fn(&ProcessRecord, &ProcessRecord) -> Ordering,
{
    let mut state = SimState::new(processes);

    while !state.is_done() {
        match state.available().min_by(|a, b| order(a, b)) {
            Some(process) => {
                let remaining = state.remaining(process.id);
                state.run(process, remaining);
            }
            None => state.skip_idle(),
        }
    }

    state.into_schedule()
}

/// Every time unit, picks the least available process under `order` and
/// runs it for one unit.
pub fn run_preemptive<F>(processes: &[ProcessRecord], order: F) -> Schedule
where
    F: Fn(&SimState<'_>, &ProcessRecord, &ProcessRecord) -> Ordering,
{
    let mut state = SimState::new(processes);

    while !state.is_done() {
        match state.available().min_by(|a, b| order(&state, a, b)) {
            Some(process) => state.step(process),
            None => state.skip_idle(),
        }
    }

    state.into_schedule()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn available_respects_arrival() {
        let processes = [ProcessRecord::new(1, 0, 2), ProcessRecord::new(2, 3, 1)];
        let mut state = SimState::new(&processes);

        let ids: Vec<_> = state.available().map(|p| p.id).collect();
        assert_eq!(ids, vec![1]);

        state.run(&processes[0], 2);
        assert_eq!(state.available().count(), 0);
        assert_eq!(state.next_arrival(), Some(3));

        state.skip_idle();
        assert_eq!(state.now(), 3);
        let ids: Vec<_> = state.available().map(|p| p.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn unit_steps_merge_into_one_slice() {
        let processes = [ProcessRecord::new(1, 0, 3)];
        let mut state = SimState::new(&processes);

        for _ in 0..3 {
            state.step(&processes[0]);
        }

        let schedule = state.into_schedule();
        assert_eq!(schedule.timeline, vec![Slice { id: 1, start: 0, end: 3 }]);
        assert_eq!(schedule.results[0].end, 3);
    }

    #[test]
    fn separate_dispatches_stay_separate() {
        let processes = [ProcessRecord::new(1, 0, 4)];
        let mut state = SimState::new(&processes);

        state.run(&processes[0], 2);
        state.run(&processes[0], 2);

        let schedule = state.into_schedule();
        assert_eq!(schedule.timeline.len(), 2);
    }

    #[test]
    fn zero_burst_completes_without_cpu() {
        let processes = [ProcessRecord::new(1, 4, 0)];
        let mut state = SimState::new(&processes);

        state.skip_idle();
        state.run(&processes[0], 0);

        let schedule = state.into_schedule();
        assert!(schedule.timeline.is_empty());
        assert_eq!(schedule.results[0].start, 4);
        assert_eq!(schedule.results[0].end, 4);
        assert_eq!(schedule.results[0].waiting, 0);
    }

    #[test]
    fn start_is_first_dispatch() {
        let processes = [ProcessRecord::new(1, 0, 2), ProcessRecord::new(2, 0, 1)];
        let mut state = SimState::new(&processes);

        state.run(&processes[0], 1);
        state.run(&processes[1], 1);
        state.run(&processes[0], 1);

        let schedule = state.into_schedule();
        let first = schedule.result(1).unwrap();
        assert_eq!(first.start, 0);
        assert_eq!(first.end, 3);
        assert_eq!(first.waiting, 1);
        assert_eq!(schedule.timeline.len(), 3);
    }
}
