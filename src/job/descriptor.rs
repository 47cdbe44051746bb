use log::info;

use crate::command::InnerCommand;
use crate::config::ClusterConfig;
use crate::subset::Subset;
use crate::trial::params::TrialParameters;

/// Everything the scheduler needs to run one trial
///
/// Built once per submission and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDescriptor {
    pub name: String,
    pub image: String,
    pub instance: String,
    pub result: String,
    pub workspace: String,
    pub mount: String,
    /// rendered inner command, opaque to the scheduler
    pub command: String,
    pub labels: Vec<String>,
}

impl JobDescriptor {
    pub fn new(config: &ClusterConfig, params: &TrialParameters, command: &InnerCommand) -> Self {
        let name = job_name(&config.job_prefix, params.trial_id, params.subset);
        info!("Creating job descriptor {name} on {} with image {}", config.instance, config.image);
        JobDescriptor {
            name,
            image: config.image.clone(),
            instance: config.instance.clone(),
            result: config.result.clone(),
            workspace: config.workspace.clone(),
            mount: config.mount.clone(),
            command: command.render(),
            labels: config.labels(),
        }
    }

    /// Workspace mount in `<workspace>:<mount point>:<mode>` form, always read-write
    pub fn workspace_mount(&self) -> String {
        format!("{}:{}:RW", self.workspace, self.mount)
    }
}

/// `<prefix>-t<trial id>-<mode>`
pub fn job_name(prefix: &str, trial_id: u32, subset: Subset) -> String {
    format!("{prefix}-t{trial_id}-{subset}")
}
