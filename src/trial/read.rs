use std::fs;
use std::path::Path;

use log::{info, warn};
use serde_json::Value;

use crate::error::ConfigError;
use crate::trial::params::TrialParameters;
use crate::trial::schema;

impl TrialParameters {
    /// Read a JSON parameter file, checking it against the bundled schema before deserialising
    pub fn read(path: &Path) -> Result<TrialParameters, ConfigError> {
        info!("Reading trial parameters at {}", path.display());
        let json_string = fs::read_to_string(path).map_err(|err| {
            warn!("Can't read trial parameters at path {}: {}", path.display(), err);
            ConfigError::Read { path: path.display().to_string(), reason: err.to_string() }
        })?;
        Self::from_json(&json_string)
    }

    pub fn from_json(json_string: &str) -> Result<TrialParameters, ConfigError> {
        info!("Parsing JSON into untyped structure");
        let json: Value = serde_json::from_str(json_string)
            .map_err(|err| ConfigError::Decode(err.to_string()))?;

        info!("Validating raw parameters against JSON schema");
        let compiled_schema = schema::load_schema()?;
        if let Err(err) = schema::validate(&compiled_schema, &json) {
            warn!("Parameters fail validation");
            return Err(err);
        }

        info!("Deserialising valid JSON into typed Rust object");
        serde_json::from_value::<TrialParameters>(json)
            .map_err(|err| ConfigError::Deserialise(err.to_string()))
    }
}
