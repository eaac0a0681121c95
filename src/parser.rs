use crate::error::Error;
use crate::scheduler::{Averages, Policy, ProcessId, ProcessRecord, Schedule, SimulationResult};
use serde::{Deserialize, Serialize};

// Workload files as written by hand, validated before becoming records
#[derive(Debug, Deserialize)]
struct RawProcess {
    id: ProcessId,
    arrival: i64,
    burst: i64,
    #[serde(default)]
    priority: i64,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    policy: Policy,
    results: &'a [SimulationResult],
    averages: Option<Averages>,
}

/// Builds a record from the raw values of one process, rejecting negative
/// times.
pub fn validate_process(
    id: ProcessId,
    arrival: i64,
    burst: i64,
    priority: i64,
) -> Result<ProcessRecord, Error> {
    if arrival < 0 {
        log::warn!("Rejected process {}, arrival {}", id, arrival);
        return Err(Error::NegativeArrival(id, arrival));
    }
    if burst < 0 {
        log::warn!("Rejected process {}, burst {}", id, burst);
        return Err(Error::NegativeBurst(id, burst));
    }

    Ok(ProcessRecord::new(id, arrival as u64, burst as u64).with_priority(priority))
}

pub fn parse_number(id: ProcessId, field: &'static str, value: &str) -> Result<i64, Error> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| Error::ParseIntError(id, field, value.to_string()))
}

/// Parses the text fields of one process as typed in the form, an empty
/// priority means 0.
pub fn parse_process(
    id: ProcessId,
    arrival: &str,
    burst: &str,
    priority: &str,
) -> Result<ProcessRecord, Error> {
    let arrival = parse_number(id, "arrival time", arrival)?;
    let burst = parse_number(id, "burst time", burst)?;
    let priority = if priority.trim().is_empty() {
        0
    } else {
        parse_number(id, "priority", priority)?
    };

    validate_process(id, arrival, burst, priority)
}

// Parse a plain text workload: `arrival burst [priority]` per line
pub fn read_workload(stream: &[u8]) -> Result<Vec<ProcessRecord>, Error> {
    // Read bytes to string and remove trailing spaces, leading lines keep numbering
    let string = match std::str::from_utf8(stream) {
        Ok(content) => content.trim_end(),
        Err(_) => return Err(Error::Utf8Error),
    };

    let mut processes: Vec<ProcessRecord> = vec![];

    for (i, line) in string.lines().enumerate() {
        // Drop comments
        let line = line.split('#').next().unwrap_or_default();
        let fields = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|field| !field.is_empty())
            .collect::<Vec<&str>>();

        // Ignore empty lines
        if fields.is_empty() {
            continue;
        }
        if fields.len() < 2 || fields.len() > 3 {
            return Err(Error::InvalidNumberFields(i + 1, fields.len()));
        }

        let mut values = [0i64; 3];
        for (value, field) in values.iter_mut().zip(&fields) {
            *value = field
                .parse::<i64>()
                .map_err(|_| Error::InvalidField(i + 1, field.to_string()))?;
        }

        // Ids follow insertion order, starting at 1
        let id = processes.len() + 1;
        processes.push(validate_process(id, values[0], values[1], values[2])?);
    }

    Ok(processes)
}

pub fn read_workload_json(stream: &[u8]) -> Result<Vec<ProcessRecord>, Error> {
    let raw: Vec<RawProcess> = serde_json::from_slice(stream)?;

    raw.into_iter()
        .map(|p| validate_process(p.id, p.arrival, p.burst, p.priority))
        .collect()
}

/// Picks the workload format from the file name.
pub fn read_workload_file(file_name: &str, stream: &[u8]) -> Result<Vec<ProcessRecord>, Error> {
    if file_name.to_ascii_lowercase().ends_with(".json") {
        read_workload_json(stream)
    } else {
        read_workload(stream)
    }
}

pub fn workload_to_json(processes: &[ProcessRecord]) -> Result<String, Error> {
    Ok(serde_json::to_string_pretty(processes)?)
}

pub fn report_to_json(policy: Policy, schedule: &Schedule) -> Result<String, Error> {
    let report = Report {
        policy,
        results: &schedule.results,
        averages: Averages::from_results(&schedule.results),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
