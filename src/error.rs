use std::io;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("'{2}' is not a valid {1} for process {0}, expected an integer.")]
    ParseIntError(usize, &'static str, String),
    #[error("Arrival time of process {0} can't be negative ({1}).")]
    NegativeArrival(usize, i64),
    #[error("Burst time of process {0} can't be negative ({1}).")]
    NegativeBurst(usize, i64),
    #[error("Process id {0} is used more than once.")]
    DuplicateId(usize),
    #[error("Unknown scheduling algorithm '{0}'.")]
    UnknownPolicy(String),
    #[error("Workload does not fit the clock: latest arrival plus total burst exceeds {0}.")]
    TimeOverflow(u64),
    #[error("Round Robin quantum must be at least 1.")]
    InvalidQuantum,
    #[error("Invalid number of fields on line {0}: expected 2 or 3, found {1}.")]
    InvalidNumberFields(usize, usize),
    #[error("Invalid value '{1}' on line {0}.")]
    InvalidField(usize, String),
    #[error("File select dialog closed.")]
    DialogClosed,
    #[error("IO Error")]
    IO(io::ErrorKind),
    #[error("The given path does not contain a file name.")]
    NotFile,
    #[error("File should contain valid utf8")]
    Utf8Error,
    #[error("Malformed JSON: {0}")]
    Json(String),
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Json(error.to_string())
    }
}
