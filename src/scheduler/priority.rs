use crate::scheduler::state::{run_in_order, run_preemptive};
use crate::scheduler::{PriorityOrder, ProcessRecord, Schedule};
use std::cmp::Ordering;

fn by_priority(order: PriorityOrder, a: &ProcessRecord, b: &ProcessRecord) -> Ordering {
    order
        .compare(a.priority, b.priority)
        .then_with(|| a.arrival.cmp(&b.arrival))
        .then_with(|| a.id.cmp(&b.id))
}

/// Runs every process to completion in static priority order.
///
/// The order is fixed up front, so the CPU waits for a more urgent process
/// that has not arrived yet instead of picking among the ready ones.
pub fn non_preemptive(processes: &[ProcessRecord], order: PriorityOrder) -> Schedule {
    let mut sequence: Vec<usize> = (0..processes.len()).collect();
    sequence.sort_by(|&a, &b| by_priority(order, &processes[a], &processes[b]));

    run_in_order(processes, &sequence)
}

/// Re-evaluated every time unit: the most urgent ready process runs.
pub fn preemptive(processes: &[ProcessRecord], order: PriorityOrder) -> Schedule {
    run_preemptive(processes, |_, a, b| by_priority(order, a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn processes() -> Vec<ProcessRecord> {
        vec![
            ProcessRecord::new(1, 0, 4).with_priority(2),
            ProcessRecord::new(2, 1, 3).with_priority(1),
            ProcessRecord::new(3, 2, 2).with_priority(3),
        ]
    }

    #[test]
    fn non_preemptive_lower_first() {
        let schedule = non_preemptive(&processes(), PriorityOrder::LowerFirst);

        let ids: Vec<_> = schedule.results.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);

        // Process 2 is dispatched at its arrival even though 1 was ready
        let second = schedule.result(2).unwrap();
        assert_eq!((second.start, second.end), (1, 4));
        let first = schedule.result(1).unwrap();
        assert_eq!((first.start, first.end, first.waiting), (4, 8, 4));
        assert_eq!(schedule.idle_time(), 1);
    }

    #[test]
    fn non_preemptive_higher_first() {
        let schedule = non_preemptive(&processes(), PriorityOrder::HigherFirst);

        let ids: Vec<_> = schedule.results.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn non_preemptive_ties_by_arrival() {
        let processes = [
            ProcessRecord::new(1, 3, 1).with_priority(1),
            ProcessRecord::new(2, 0, 1).with_priority(1),
        ];
        let schedule = non_preemptive(&processes, PriorityOrder::LowerFirst);

        assert_eq!(schedule.results[0].id, 2);
    }

    #[test]
    fn preemptive_higher_first() {
        let schedule = preemptive(&processes(), PriorityOrder::HigherFirst);

        // 1 runs 0..2, 3 preempts it 2..4, 1 resumes 4..6, 2 runs 6..9
        let ids: Vec<_> = schedule.results.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);

        let first = schedule.result(1).unwrap();
        assert_eq!((first.start, first.end, first.waiting), (0, 6, 2));
        let third = schedule.result(3).unwrap();
        assert_eq!((third.start, third.end, third.response), (2, 4, 0));
        let second = schedule.result(2).unwrap();
        assert_eq!((second.start, second.end, second.response), (6, 9, 5));
    }

    #[test]
    fn preemptive_lower_first() {
        let schedule = preemptive(&processes(), PriorityOrder::LowerFirst);

        let second = schedule.result(2).unwrap();
        assert_eq!((second.start, second.end), (1, 4));
        assert_eq!(schedule.result(1).unwrap().end, 7);
        assert_eq!(schedule.result(3).unwrap().end, 9);
    }

    #[test]
    fn preemptive_equal_priority_keeps_earlier_arrival() {
        let processes = [
            ProcessRecord::new(1, 0, 3).with_priority(5),
            ProcessRecord::new(2, 1, 3).with_priority(5),
        ];
        let schedule = preemptive(&processes, PriorityOrder::HigherFirst);

        assert_eq!(schedule.timeline.len(), 2);
        assert_eq!(schedule.result(1).unwrap().end, 3);
    }
}
