use log::info;

use crate::error::SchedulerError;
use crate::job::descriptor::JobDescriptor;
use crate::scheduler::ngc::batch_run_args;
use crate::scheduler::{JobHandle, SchedulerClient};

static DRY_RUN_ID: &str = "dry-run";

/// Logs the `ngc` arguments that would be used and never contacts the cluster
pub struct DryRunClient;

impl SchedulerClient for DryRunClient {
    fn run_batch_job(&self, job: &JobDescriptor) -> Result<JobHandle, SchedulerError> {
        info!("--dry-run set, not submitting {}", job.name);
        info!("ngc {:?}", batch_run_args(job));
        Ok(JobHandle(DRY_RUN_ID.to_string()))
    }
}
