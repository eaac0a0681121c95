use crate::scheduler::state::run_in_order;
use crate::scheduler::{ProcessRecord, Schedule};

/// First-Come-First-Served: arrival order, simultaneous arrivals keep their
/// input order.
pub fn schedule(processes: &[ProcessRecord]) -> Schedule {
    let mut order: Vec<usize> = (0..processes.len()).collect();
    // Stable
    order.sort_by_key(|&index| processes[index].arrival);

    run_in_order(processes, &order)
}
