use crate::scheduler::state::SimState;
use crate::scheduler::{ProcessRecord, Schedule, Ticks};
use std::collections::VecDeque;

pub const DEFAULT_QUANTUM: Ticks = 2;

/// Round Robin with a fixed time quantum.
///
/// A process joins the tail of the ready queue once the clock reaches its
/// arrival. Processes arriving while a slice runs are queued ahead of the
/// process that slice preempted.
pub fn schedule(processes: &[ProcessRecord], quantum: Ticks) -> Schedule {
    debug_assert!(quantum > 0, "Round Robin quantum must be positive");

    let mut admission: Vec<&ProcessRecord> = processes.iter().collect();
    // Stable, simultaneous arrivals keep their input order
    admission.sort_by_key(|process| process.arrival);
    let mut admission: VecDeque<&ProcessRecord> = admission.into();

    let mut state = SimState::new(processes);
    let mut ready: VecDeque<&ProcessRecord> = VecDeque::new();

    loop {
        admit(&mut admission, &mut ready, state.now());

        let Some(process) = ready.pop_front() else {
            match admission.front() {
                Some(next) => {
                    state.advance_to(next.arrival);
                    continue;
                }
                None => break,
            }
        };

        let slice = quantum.min(state.remaining(process.id));
        state.run(process, slice);

        admit(&mut admission, &mut ready, state.now());
        if state.remaining(process.id) > 0 {
            ready.push_back(process);
        }
    }

    state.into_schedule()
}

fn admit<'a>(
    admission: &mut VecDeque<&'a ProcessRecord>,
    ready: &mut VecDeque<&'a ProcessRecord>,
    now: Ticks,
) {
    while let Some(process) = admission.front() {
        if process.arrival > now {
            break;
        }
        ready.push_back(*process);
        admission.pop_front();
    }
}
