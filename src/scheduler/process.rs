use serde::{Deserialize, Serialize};

pub type ProcessId = usize;
pub type Ticks = u64;

/// Static description of one workload, never mutated by a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProcessRecord {
    pub id: ProcessId,
    pub arrival: Ticks,
    pub burst: Ticks,
    #[serde(default)]
    pub priority: i64,
}

impl ProcessRecord {
    pub fn new(id: ProcessId, arrival: Ticks, burst: Ticks) -> Self {
        Self {
            id,
            arrival,
            burst,
            priority: 0,
        }
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct SimulationResult {
    pub id: ProcessId,
    pub start: Ticks,
    pub end: Ticks,
    pub waiting: Ticks,
    pub turnaround: Ticks,
    pub response: Ticks,
}

impl SimulationResult {
    /// Derives the metrics of `process` from its first dispatch and completion.
    pub fn new(process: &ProcessRecord, start: Ticks, end: Ticks) -> Self {
        debug_assert!(start >= process.arrival, "Process {} started before arrival", process.id);
        debug_assert!(
            end >= start + process.burst,
            "Process {} finished before consuming its burst",
            process.id
        );

        let turnaround = end - process.arrival;
        Self {
            id: process.id,
            start,
            end,
            waiting: turnaround - process.burst,
            turnaround,
            response: start - process.arrival,
        }
    }
}

/// One contiguous CPU allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Slice {
    pub id: ProcessId,
    pub start: Ticks,
    pub end: Ticks,
}

impl Slice {
    pub fn len(&self) -> Ticks {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Schedule {
    // Completion order
    pub results: Vec<SimulationResult>,
    // Chronological order
    pub timeline: Vec<Slice>,
}

impl Schedule {
    pub fn result(&self, id: ProcessId) -> Option<&SimulationResult> {
        self.results.iter().find(|result| result.id == id)
    }

    pub fn slices_of(&self, id: ProcessId) -> impl Iterator<Item = &Slice> {
        self.timeline.iter().filter(move |slice| slice.id == id)
    }

    /// Time the last process completes. Zero-burst processes leave no slice,
    /// so results count as well as the timeline.
    pub fn makespan(&self) -> Ticks {
        let last_slice = self.timeline.last().map_or(0, |slice| slice.end);
        self.results
            .iter()
            .map(|result| result.end)
            .fold(last_slice, Ticks::max)
    }

    pub fn busy_time(&self) -> Ticks {
        self.timeline.iter().map(Slice::len).sum()
    }

    pub fn idle_time(&self) -> Ticks {
        self.makespan() - self.busy_time()
    }
}
