//! Error types for the node configuration patcher.

use crate::descriptor::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while patching a single target file
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("Unable to find the configuration file: {0}")]
    FileNotFound(PathBuf),

    #[error("Configuration path is not a regular file: {0}")]
    NotAFile(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to write to the output file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Substitution keys overlap: '{inner}' is contained in '{outer}'")]
    OverlappingKeys { outer: String, inner: String },

    #[error("Substitution key must not be empty")]
    EmptyKey,
}

/// Errors raised while loading the node descriptor
#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("Invalid configuration file: {0}")]
    Missing(PathBuf),

    #[error("Failed to read descriptor {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to load the configuration file {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Descriptor {0} does not contain any node records")]
    Empty(PathBuf),

    #[error("Descriptor validation failed: {}", format_validation(.0))]
    Invalid(Vec<ValidationError>),
}

fn format_validation(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Top-level error for a reconfiguration run
#[derive(Debug, Error)]
pub enum ReconfigError {
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    #[error("Failed to update {role} file for node {node}: {source}")]
    FileUpdate {
        node: String,
        role: &'static str,
        #[source]
        source: PatchError,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
