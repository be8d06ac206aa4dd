// VM Error types: load failures, register lookups, runtime faults

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Program loading errors
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Cannot read program source {}: {source}", path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Register Errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegisterError {
    #[error("Invalid register: {0}")]
    InvalidRegister(String),
}

/// VM Errors. Every fault aborts the run at the instruction that raised it.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum VMFault {
    #[error("Unknown instruction: {0}")]
    UnknownOpcode(String),
    #[error("Invalid register: {0}")]
    InvalidRegister(String),
    #[error("{opcode} has malformed operands: '{operands}'")]
    MalformedOperands { opcode: &'static str, operands: String },
    #[error("MOV value must be an integer: {0}")]
    InvalidImmediate(String),
    #[error("Undefined sensor: {name}. Available: {available:?}")]
    UndefinedSensor { name: String, available: Vec<String> },
    #[error("Undefined label: {0}")]
    UndefinedLabel(String),
    #[error("EXERCISE requires a name")]
    MissingExerciseName,
    #[error("Unterminated quoted exercise name: {0}")]
    UnterminatedExerciseName(String),
    #[error("Cycle limit of {0} exceeded")]
    CycleLimitExceeded(u64),
}

impl From<RegisterError> for VMFault {
    fn from(err: RegisterError) -> Self {
        match err {
            RegisterError::InvalidRegister(name) => VMFault::InvalidRegister(name),
        }
    }
}

/// A fault together with the location where the run stopped
#[derive(Error, Debug, PartialEq, Eq, Clone)]
#[error("PC {pc} `{instruction}`: {fault}")]
pub struct RunError {
    pub pc: usize,
    pub instruction: String,
    #[source]
    pub fault: VMFault,
}
