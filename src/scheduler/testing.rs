use std::cell::RefCell;

use crate::error::SchedulerError;
use crate::job::descriptor::JobDescriptor;
use crate::scheduler::{JobHandle, SchedulerClient};

/// In-memory scheduler that records every descriptor it is given
pub struct RecordingScheduler {
    pub submitted: RefCell<Vec<JobDescriptor>>,
    reply: Result<JobHandle, SchedulerError>,
}

impl RecordingScheduler {
    pub fn accepting(id: &str) -> Self {
        RecordingScheduler { submitted: RefCell::new(Vec::new()), reply: Ok(JobHandle(id.to_string())) }
    }

    pub fn failing(err: SchedulerError) -> Self {
        RecordingScheduler { submitted: RefCell::new(Vec::new()), reply: Err(err) }
    }

    pub fn calls(&self) -> usize {
        self.submitted.borrow().len()
    }
}

impl SchedulerClient for RecordingScheduler {
    fn run_batch_job(&self, job: &JobDescriptor) -> Result<JobHandle, SchedulerError> {
        self.submitted.borrow_mut().push(job.clone());
        self.reply.clone()
    }
}
