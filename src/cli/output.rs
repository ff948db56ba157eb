//! CLI output: error mapping from domain errors to messages and exit codes.

use crate::error::{DescriptorError, ReconfigError};

/// Process exit statuses. Each failure class gets its own code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitStatus {
    Success = 0,
    Usage = 1,
    MissingDescriptor = 5,
    InvalidDescriptor = 6,
    FileUpdateFailed = 7,
}

impl ExitStatus {
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// Exit status for a failed run.
pub fn exit_code(e: &ReconfigError) -> ExitStatus {
    match e {
        ReconfigError::Descriptor(DescriptorError::Missing(_)) => ExitStatus::MissingDescriptor,
        ReconfigError::Descriptor(DescriptorError::Read { .. }) => ExitStatus::MissingDescriptor,
        ReconfigError::Descriptor(_) => ExitStatus::InvalidDescriptor,
        ReconfigError::FileUpdate { .. } => ExitStatus::FileUpdateFailed,
        ReconfigError::ConfigError(_) => ExitStatus::Usage,
    }
}

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &ReconfigError) -> String {
    e.to_string()
}
