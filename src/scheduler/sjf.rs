use crate::scheduler::state::{run_non_preemptive, run_preemptive};
use crate::scheduler::{ProcessRecord, Schedule};

/// Shortest-Job-First without preemption.
///
/// Ready processes are ordered by burst, then arrival, then id. The chosen
/// process keeps the CPU until it finishes, even if a shorter one arrives.
pub fn non_preemptive(processes: &[ProcessRecord]) -> Schedule {
    run_non_preemptive(processes, |a, b| {
        a.burst
            .cmp(&b.burst)
            .then_with(|| a.arrival.cmp(&b.arrival))
            .then_with(|| a.id.cmp(&b.id))
    })
}

/// Shortest-Remaining-Time-First.
///
/// Re-evaluated every time unit by remaining burst, then arrival, then id.
pub fn preemptive(processes: &[ProcessRecord]) -> Schedule {
    run_preemptive(processes, |state, a, b| {
        state
            .remaining(a.id)
            .cmp(&state.remaining(b.id))
            .then_with(|| a.arrival.cmp(&b.arrival))
            .then_with(|| a.id.cmp(&b.id))
    })
}
