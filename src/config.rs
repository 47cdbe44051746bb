//! Cluster-side constants for a trial submission
//!
//! The defaults describe the cluster the CHiME-7 diarization search runs on. A different cluster
//! (or a test) supplies its own `ClusterConfig` instead of touching shared state.

use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Container image with NeMo and the CHiME-7 recipe installed
static IMAGE: &str = "nvcr.io/nvidia/nemo:23.03";
/// GPU instance class (one 32GB V100)
static INSTANCE: &str = "dgx1v.32g.1.norm";
static WORKSPACE: &str = "chime7_ws";
static MOUNT: &str = "/ws";
static RESULT: &str = "/result";
static JOB_PREFIX: &str = "chime7-infer";
static ACCOUNTING_LABEL: &str = "speech_diar";
static WORKLOAD_LABEL: &str = "_wl___other";
/// NeMo checkout inside the container
static PROJECT_ROOT: &str = "/ws/nemo_chime7";
static PROGRAM: &str = "scripts/chime7/optimize_diar.py";
static INTERPRETER: &str = "python";
static SEARCH_PATH_VAR: &str = "PYTHONPATH";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClusterConfig {
    pub image: String,
    pub instance: String,
    pub workspace: String,
    /// where `workspace` is mounted inside the container
    pub mount: String,
    pub result: String,
    pub job_prefix: String,
    pub accounting_label: String,
    pub workload_label: String,
    pub project_root: String,
    /// optimization script, relative to `project_root`
    pub program: String,
    pub interpreter: String,
    pub search_path_var: String,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        ClusterConfig {
            image: IMAGE.to_string(),
            instance: INSTANCE.to_string(),
            workspace: WORKSPACE.to_string(),
            mount: MOUNT.to_string(),
            result: RESULT.to_string(),
            job_prefix: JOB_PREFIX.to_string(),
            accounting_label: ACCOUNTING_LABEL.to_string(),
            workload_label: WORKLOAD_LABEL.to_string(),
            project_root: PROJECT_ROOT.to_string(),
            program: PROGRAM.to_string(),
            interpreter: INTERPRETER.to_string(),
            search_path_var: SEARCH_PATH_VAR.to_string(),
        }
    }
}

impl ClusterConfig {
    /// Load a cluster configuration from a JSON file
    pub fn read(path: &Path) -> Result<ClusterConfig, ConfigError> {
        info!("Reading cluster configuration at {}", path.display());
        let json = fs::read_to_string(path).map_err(|err| ConfigError::Read {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<ClusterConfig, ConfigError> {
        serde_json::from_str(json).map_err(|err| ConfigError::Deserialise(err.to_string()))
    }

    /// Scheduler labels: accounting first, workload class second
    pub fn labels(&self) -> Vec<String> {
        vec![self.accounting_label.clone(), self.workload_label.clone()]
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("image", &self.image),
            ("instance", &self.instance),
            ("workspace", &self.workspace),
            ("mount", &self.mount),
            ("result", &self.result),
            ("job_prefix", &self.job_prefix),
            ("accounting_label", &self.accounting_label),
            ("workload_label", &self.workload_label),
            ("project_root", &self.project_root),
            ("program", &self.program),
            ("interpreter", &self.interpreter),
            ("search_path_var", &self.search_path_var),
        ];
        for (field, value) in required {
            non_empty(field, value)?;
        }

        absolute("mount", &self.mount)?;
        absolute("result", &self.result)?;
        absolute("project_root", &self.project_root)?;

        if !is_identifier(&self.search_path_var) {
            return Err(ConfigError::InvalidVariable { name: self.search_path_var.clone() });
        }
        Ok(())
    }
}

pub(crate) fn non_empty(field: &'static str, value: &str) -> Result<(), ConfigError> {
    match value.trim().is_empty() {
        true => Err(ConfigError::Empty { field }),
        false => Ok(()),
    }
}

fn absolute(field: &'static str, path: &str) -> Result<(), ConfigError> {
    match path.starts_with('/') {
        true => Ok(()),
        false => Err(ConfigError::NotAbsolute { field, path: path.to_string() }),
    }
}

/// POSIX shell variable name
pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
