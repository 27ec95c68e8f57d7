use std::path::PathBuf;

use thiserror::Error;

/// Failures of a single `calc` run.
#[derive(Error, Debug)]
pub enum CalcError {
    #[error("{source_name}:{line}: cannot parse {text:?} as a number")]
    Parse {
        source_name: String,
        line: usize,
        text: String,
    },

    #[error("'{operation}' needs at least one number, but the input is empty")]
    EmptyStream { operation: &'static str },

    #[error("{source_name}:{line}: {value} is outside the domain of '{operation}'")]
    Domain {
        operation: &'static str,
        value: f64,
        source_name: String,
        line: usize,
    },

    #[error("unknown operation '{name}', valid operations are: {}", .valid.join(", "))]
    UnknownOperation { name: String, valid: Vec<&'static str> },

    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("cannot read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CalcError {
    /// Process exit status for this failure class (BSD sysexits).
    pub fn exit_code(&self) -> u8 {
        match self {
            CalcError::UnknownOperation { .. } | CalcError::InvalidArgument { .. } => 64,
            CalcError::Parse { .. } | CalcError::Domain { .. } => 65,
            CalcError::EmptyStream { .. } => 66,
            CalcError::Io { .. } => 74,
        }
    }
}
