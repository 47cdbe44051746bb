use log::info;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::non_empty;
use crate::error::ConfigError;
use crate::subset::Subset;

static EXPERIMENT: &str = "msdd_optuna";
/// dereverberation variant of the input audio
static DEREVERB: &str = "d03";
static OUTPUT_ROOT: &str = "/ws/chime7/optuna";
static MANIFEST_ROOT: &str = "/ws/chime7/manifests";
static PATTERN: &str = "*.wav";
static CONFIG_URL: &str = "conf/inference/diar_infer_msdd_v2.yaml";
static N_TRIALS: u32 = 1000;
static N_JOBS: u32 = 2;
static BATCH_SIZE: u32 = 11;

/// A named, versioned pair of model checkpoints
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Checkpoints {
    pub revision: String,
    pub vad_model_path: String,
    pub msdd_model_path: String,
}

impl Checkpoints {
    /// Frame VAD and MSDD checkpoints the search currently tunes against
    pub fn current() -> Self {
        Checkpoints {
            revision: "msdd-v2-e53".to_string(),
            vad_model_path: "/ws/chime7/checkpoints/frame_vad_chime7_acrobat.nemo".to_string(),
            msdd_model_path: "/ws/chime7/checkpoints/msdd_v2_PALO_bs6_a003_version6_e53.ckpt".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TrialParameters {
    pub trial_id: u32,
    pub subset: Subset,
    pub dereverb: String,
    pub experiment: String,
    pub n_trials: u32,
    /// parallel optuna workers inside the job
    pub n_jobs: u32,
    /// study storage URI, e.g. `sqlite:////ws/study.db`
    pub storage: String,
    pub output_log: String,
    pub batch_size: u32,
    pub pattern: String,
    pub manifest_path: String,
    pub config_url: String,
    /// also passed as `--temp_dir`
    pub output_dir: String,
    #[serde(default)]
    pub checkpoints: Option<Checkpoints>,
}

impl TrialParameters {
    /// Default parameters for a trial, with log, storage and output names derived from the id
    pub fn new(trial_id: u32, subset: Subset) -> Self {
        let stem = study_stem(EXPERIMENT, DEREVERB, trial_id);
        TrialParameters {
            trial_id,
            subset,
            dereverb: DEREVERB.to_string(),
            experiment: EXPERIMENT.to_string(),
            n_trials: N_TRIALS,
            n_jobs: N_JOBS,
            storage: format!("sqlite:///{OUTPUT_ROOT}/{stem}.db"),
            output_log: format!("{OUTPUT_ROOT}/{stem}.log"),
            batch_size: BATCH_SIZE,
            pattern: PATTERN.to_string(),
            manifest_path: format!("{MANIFEST_ROOT}/chime7_{subset}_{DEREVERB}.json"),
            config_url: CONFIG_URL.to_string(),
            output_dir: format!("{OUTPUT_ROOT}/{stem}"),
            checkpoints: Some(Checkpoints::current()),
        }
    }

    /// Stem shared by the log file, study database and output directory
    pub fn study_stem(&self) -> String {
        study_stem(&self.experiment, &self.dereverb, self.trial_id)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        info!("Validating parameters of trial {}", self.trial_id);
        let required = [
            ("dereverb", &self.dereverb),
            ("experiment", &self.experiment),
            ("output_log", &self.output_log),
            ("pattern", &self.pattern),
            ("manifest_path", &self.manifest_path),
            ("config_url", &self.config_url),
            ("output_dir", &self.output_dir),
        ];
        for (field, value) in required {
            non_empty(field, value)?;
        }

        let counts = [
            ("n_trials", self.n_trials),
            ("n_jobs", self.n_jobs),
            ("batch_size", self.batch_size),
        ];
        for (field, value) in counts {
            if value == 0 {
                return Err(ConfigError::NotPositive { field });
            }
        }

        validate_storage(&self.storage)?;

        if let Some(checkpoints) = &self.checkpoints {
            non_empty("checkpoints.revision", &checkpoints.revision)?;
            non_empty("checkpoints.vad_model_path", &checkpoints.vad_model_path)?;
            non_empty("checkpoints.msdd_model_path", &checkpoints.msdd_model_path)?;
        }
        Ok(())
    }
}

fn study_stem(experiment: &str, dereverb: &str, trial_id: u32) -> String {
    format!("{experiment}-{dereverb}-t{trial_id}")
}

/// Syntactic check only, the database itself is opened remotely
fn validate_storage(uri: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidStorage { uri: uri.to_string(), reason };
    if uri.trim().is_empty() {
        return Err(invalid("empty URI".to_string()));
    }
    Url::parse(uri).map_err(|err| invalid(err.to_string()))?;
    Ok(())
}
