//! Trial parameters: defaults, derived names, validation and JSON parameter files

/// Parameters of one hyperparameter-search trial
pub mod params;
/// Read and validate JSON parameter files
pub mod read;
/// Bundled JSON schema for parameter files
pub mod schema;
