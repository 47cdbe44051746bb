//! Hand a job descriptor to the cluster scheduler

/// Submit through the `ngc batch run` CLI
pub mod ngc;
/// Print what would be submitted
pub mod dry_run;
#[cfg(test)]
pub mod testing;

use std::fmt;

use crate::error::SchedulerError;
use crate::job::descriptor::JobDescriptor;

/// Job id as acknowledged by the scheduler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle(pub String);

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The only scheduler capability a submission needs
///
/// Implementations block until the scheduler acknowledges the job, not until it finishes.
pub trait SchedulerClient {
    fn run_batch_job(&self, job: &JobDescriptor) -> Result<JobHandle, SchedulerError>;
}
