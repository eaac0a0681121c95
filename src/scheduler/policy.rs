use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Policy {
    #[serde(rename = "FCFS")]
    Fcfs,
    #[serde(rename = "SJF-NonPreemptive")]
    SjfNonPreemptive,
    #[serde(rename = "SJF-Preemptive")]
    SjfPreemptive,
    #[serde(rename = "Priority-NonPreemptive")]
    PriorityNonPreemptive,
    #[serde(rename = "Priority-Preemptive", alias = "Priority")]
    PriorityPreemptive,
    RoundRobin,
}

impl Policy {
    pub const ALL: [Policy; 6] = [
        Policy::Fcfs,
        Policy::SjfNonPreemptive,
        Policy::SjfPreemptive,
        Policy::PriorityNonPreemptive,
        Policy::PriorityPreemptive,
        Policy::RoundRobin,
    ];

    pub fn is_preemptive(&self) -> bool {
        matches!(
            self,
            Policy::SjfPreemptive | Policy::PriorityPreemptive | Policy::RoundRobin
        )
    }

    pub fn uses_priority(&self) -> bool {
        matches!(
            self,
            Policy::PriorityNonPreemptive | Policy::PriorityPreemptive
        )
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Policy::Fcfs => write!(f, "FCFS"),
            Policy::SjfNonPreemptive => write!(f, "SJF-NonPreemptive"),
            Policy::SjfPreemptive => write!(f, "SJF-Preemptive"),
            Policy::PriorityNonPreemptive => write!(f, "Priority-NonPreemptive"),
            Policy::PriorityPreemptive => write!(f, "Priority-Preemptive"),
            Policy::RoundRobin => write!(f, "RoundRobin"),
        }
    }
}

impl FromStr for Policy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "FCFS" => Ok(Policy::Fcfs),
            "SJF-NonPreemptive" => Ok(Policy::SjfNonPreemptive),
            "SJF-Preemptive" => Ok(Policy::SjfPreemptive),
            "Priority-NonPreemptive" => Ok(Policy::PriorityNonPreemptive),
            // Plain "Priority" names the preemptive variant
            "Priority-Preemptive" | "Priority" => Ok(Policy::PriorityPreemptive),
            "RoundRobin" => Ok(Policy::RoundRobin),
            other => Err(Self::Err::UnknownPolicy(other.to_string())),
        }
    }
}

/// Which end of the priority scale dispatches first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum PriorityOrder {
    LowerFirst,
    HigherFirst,
}

impl PriorityOrder {
    /// `Less` means `a` dispatches before `b`.
    pub fn compare(&self, a: i64, b: i64) -> Ordering {
        match self {
            PriorityOrder::LowerFirst => a.cmp(&b),
            PriorityOrder::HigherFirst => b.cmp(&a),
        }
    }
}

impl fmt::Display for PriorityOrder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PriorityOrder::LowerFirst => write!(f, "lower number first"),
            PriorityOrder::HigherFirst => write!(f, "higher number first"),
        }
    }
}
