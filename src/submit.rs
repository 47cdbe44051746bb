use chrono::{DateTime, Utc};
use log::{info, warn};

use crate::config::ClusterConfig;
use crate::error::SubmitError;
use crate::job::descriptor::JobDescriptor;
use crate::job::inner::inner_command;
use crate::scheduler::{JobHandle, SchedulerClient};
use crate::trial::params::TrialParameters;

/// An acknowledged submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub handle: JobHandle,
    pub job_name: String,
    pub submitted_at: DateTime<Utc>,
}

/// Validate, build and submit one trial
///
/// Configuration errors return before the scheduler is contacted. The scheduler is called
/// exactly once and whatever it returns is passed back untouched, there are no retries.
pub fn submit(
    config: &ClusterConfig,
    params: &TrialParameters,
    client: &dyn SchedulerClient,
) -> Result<Submission, SubmitError> {
    config.validate()?;
    params.validate()?;

    let job = build(config, params);
    info!("Submitting {} ({} labels)", job.name, job.labels.len());

    match client.run_batch_job(&job) {
        Ok(handle) => {
            info!("Scheduler job id: {handle}");
            Ok(Submission { handle, job_name: job.name, submitted_at: Utc::now() })
        }
        Err(err) => {
            warn!("Submission of {} failed: {}", job.name, err);
            Err(err.into())
        }
    }
}

/// Inner command and descriptor for already validated inputs
pub fn build(config: &ClusterConfig, params: &TrialParameters) -> JobDescriptor {
    let command = inner_command(config, params);
    JobDescriptor::new(config, params, &command)
}
