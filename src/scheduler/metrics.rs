use crate::scheduler::SimulationResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Arithmetic means over a set of results.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Averages {
    pub waiting: f64,
    pub turnaround: f64,
    pub response: f64,
}

impl Averages {
    /// `None` when there is nothing to average.
    pub fn from_results(results: &[SimulationResult]) -> Option<Self> {
        if results.is_empty() {
            return None;
        }

        let count = results.len() as f64;
        let mean = |metric: fn(&SimulationResult) -> u64| {
            results.iter().map(metric).sum::<u64>() as f64 / count
        };

        Some(Self {
            waiting: mean(|r| r.waiting),
            turnaround: mean(|r| r.turnaround),
            response: mean(|r| r.response),
        })
    }
}

impl fmt::Display for Averages {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Average Turnaround Time: {:.2}", self.turnaround)?;
        writeln!(f, "Average Waiting Time: {:.2}", self.waiting)?;
        write!(f, "Average Response Time: {:.2}", self.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ProcessRecord;

    #[test]
    fn empty_is_no_data() {
        assert_eq!(Averages::from_results(&[]), None);
    }

    #[test]
    fn means() {
        let results = [
            SimulationResult::new(&ProcessRecord::new(1, 0, 5), 0, 5),
            SimulationResult::new(&ProcessRecord::new(2, 1, 3), 5, 8),
        ];
        let averages = Averages::from_results(&results).unwrap();

        assert_eq!(averages.waiting, 2.0);
        assert_eq!(averages.turnaround, 6.0);
        assert_eq!(averages.response, 2.0);
    }

    #[test]
    fn two_decimals() {
        let averages = Averages {
            waiting: 7.75,
            turnaround: 14.0,
            response: 1.0 / 3.0,
        };

        assert_eq!(
            averages.to_string(),
            "Average Turnaround Time: 14.00\nAverage Waiting Time: 7.75\nAverage Response Time: 0.33"
        );
    }
}
