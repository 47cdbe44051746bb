//! Error taxonomy for building and submitting a trial job
//!
//! Configuration problems are caught locally before the scheduler is contacted. Scheduler
//! failures are carried through untouched. Failures of the job once it runs on the cluster are
//! never seen here and have to be looked up with the scheduler's own tooling.

use thiserror::Error;

/// A required parameter is missing, empty, or has the wrong shape
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("{field} must be a positive integer")]
    NotPositive { field: &'static str },
    #[error("invalid study storage URI {uri:?}: {reason}")]
    InvalidStorage { uri: String, reason: String },
    #[error("{field} must be an absolute path, got {path:?}")]
    NotAbsolute { field: &'static str, path: String },
    #[error("{name:?} is not a valid environment variable name")]
    InvalidVariable { name: String },
    #[error("can't read {path}: {reason}")]
    Read { path: String, reason: String },
    #[error("can't decode JSON: {0}")]
    Decode(String),
    #[error("bundled parameter schema does not compile: {0}")]
    InvalidSchema(String),
    #[error("parameters fail schema validation: {}", errors.join("; "))]
    Schema { errors: Vec<String> },
    #[error("can't deserialise parameters: {0}")]
    Deserialise(String),
}

/// The scheduler client failed to accept the job
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("failed to launch scheduler CLI {program}: {reason}")]
    Launch { program: String, reason: String },
    #[error("scheduler rejected the job (exit code {code:?}): {stderr}")]
    Rejected { code: Option<i32>, stderr: String },
    #[error("scheduler authorization failed: {0}")]
    Unauthorized(String),
    #[error("unexpected scheduler response: {0}")]
    UnexpectedResponse(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
}
