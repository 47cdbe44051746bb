use jsonschema::JSONSchema;
use serde_json::Value;

use crate::error::ConfigError;

/// included parameter file schema
static TRIAL_SCHEMA: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/schema/trial.json"));

/// Compile the bundled trial schema
pub fn load_schema() -> Result<JSONSchema, ConfigError> {
    let schema: Value = serde_json::from_str(TRIAL_SCHEMA)
        .map_err(|err| ConfigError::InvalidSchema(err.to_string()))?;
    JSONSchema::compile(&schema)
        .map_err(|err| ConfigError::InvalidSchema(err.to_string()))
}

/// Validate an untyped JSON document, collecting every violation
pub fn validate(schema: &JSONSchema, json: &Value) -> Result<(), ConfigError> {
    schema.validate(json).map_err(|errors| ConfigError::Schema {
        errors: errors
            .map(|err| format!("{}: {}", err.instance_path, err))
            .collect(),
    })
}
