use log::debug;

use crate::command::{InnerCommand, Invocation, Step};
use crate::config::ClusterConfig;
use crate::trial::params::TrialParameters;

/// Build the command executed inside the container
///
/// Order is fixed: change into the project, report disk usage on the workspace mount, put the
/// project on the search path, echo the search path, then run the optimization script.
pub fn inner_command(config: &ClusterConfig, params: &TrialParameters) -> InnerCommand {
    let command = InnerCommand::builder()
        .step(Step::ChangeDir(config.project_root.clone()))
        .step(Step::Run(Invocation::new("df").arg("-h").arg(&config.mount)))
        .step(Step::PrependPath {
            var: config.search_path_var.clone(),
            prefix: config.project_root.clone(),
        })
        .step(Step::ShowVar(config.search_path_var.clone()))
        .step(Step::Run(optimize(config, params)))
        .build();
    debug!("Inner command steps: {:?}", command.steps());
    if let Some(program) = command.program() {
        debug!("{} invoked with {} flags", program.executable(), program.flags().len());
    }
    command
}

fn optimize(config: &ClusterConfig, params: &TrialParameters) -> Invocation {
    let checkpoints = params.checkpoints.as_ref();
    Invocation::new(&config.interpreter)
        .arg(&config.program)
        .flag("--n_trials", params.n_trials)
        .flag("--n_jobs", params.n_jobs)
        .flag("--output_log", &params.output_log)
        .flag("--storage", &params.storage)
        .flag("--pattern", &params.pattern)
        .flag("--subset", params.subset)
        .flag("--manifest_path", &params.manifest_path)
        .flag("--config_url", &params.config_url)
        .flag_opt("--vad_model_path", checkpoints.map(|c| &c.vad_model_path))
        .flag_opt("--msdd_model_path", checkpoints.map(|c| &c.msdd_model_path))
        .flag("--batch_size", params.batch_size)
        .flag("--temp_dir", &params.output_dir)
}
