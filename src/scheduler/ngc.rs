use std::path::PathBuf;
use std::process::{Command, Output};

use log::{info, warn};
use serde_json::Value;

use crate::error::SchedulerError;
use crate::job::descriptor::JobDescriptor;
use crate::scheduler::{JobHandle, SchedulerClient};

/// stderr words that mean the CLI was refused access
static AUTH_MARKERS: [&str; 5] = ["unauthorized", "forbidden", "401", "403", "authentication"];

/// Submits jobs by running the NGC CLI as a child process
pub struct NgcClient {
    pub program: PathBuf,
}

impl SchedulerClient for NgcClient {
    fn run_batch_job(&self, job: &JobDescriptor) -> Result<JobHandle, SchedulerError> {
        let mut ngc = Command::new(&self.program);
        let cmd = ngc.args(batch_run_args(job));
        info!("Running ngc process");
        info!("{:?}", &cmd);

        let output = cmd.output().map_err(|err| SchedulerError::Launch {
            program: self.program.display().to_string(),
            reason: err.to_string(),
        })?;
        read_acknowledgment(output)
    }
}

/// Arguments to `ngc`, starting at the `batch run` subcommand
pub fn batch_run_args(job: &JobDescriptor) -> Vec<String> {
    let mut args: Vec<String> = vec![
        "batch".into(),
        "run".into(),
        "--name".into(),
        job.name.clone(),
        "--instance".into(),
        job.instance.clone(),
        "--image".into(),
        job.image.clone(),
        "--result".into(),
        job.result.clone(),
        "--workspace".into(),
        job.workspace_mount(),
        "--commandline".into(),
        job.command.clone(),
    ];
    for label in &job.labels {
        args.push("--label".into());
        args.push(label.clone());
    }
    args.push("--format_type".into());
    args.push("json".into());
    args
}

fn read_acknowledgment(output: Output) -> Result<JobHandle, SchedulerError> {
    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

    if !output.status.success() {
        warn!("ngc exited with {}", output.status);
        return Err(classify_failure(output.status.code(), stderr));
    }
    parse_job_id(&stdout)
}

/// Sort a failed CLI run into an authorization failure or a plain rejection, keeping stderr
fn classify_failure(code: Option<i32>, stderr: String) -> SchedulerError {
    let lower = stderr.to_lowercase();
    // whole words only, so ids like `nv-us-4013` are not mistaken for a status code
    let auth = lower
        .split(|c: char| !c.is_ascii_alphanumeric())
        .any(|word| AUTH_MARKERS.contains(&word));
    match auth {
        true => SchedulerError::Unauthorized(stderr),
        false => SchedulerError::Rejected { code, stderr },
    }
}

/// Pull the job id out of the `--format_type json` acknowledgment
fn parse_job_id(stdout: &str) -> Result<JobHandle, SchedulerError> {
    let unexpected = || SchedulerError::UnexpectedResponse(stdout.to_string());
    let json: Value = serde_json::from_str(stdout).map_err(|_| unexpected())?;
    match json.get("id") {
        Some(Value::Number(id)) => Ok(JobHandle(id.to_string())),
        Some(Value::String(id)) if !id.is_empty() => Ok(JobHandle(id.clone())),
        _ => Err(unexpected()),
    }
}

#[cfg(test)]
mod tests {
    use crate::config::ClusterConfig;
    use crate::job::inner::inner_command;
    use crate::subset::Subset;
    use crate::trial::params::TrialParameters;

    use super::*;

    #[test]
    fn args_describe_the_whole_job() {
        let config = ClusterConfig::default();
        let params = TrialParameters::new(221, Subset::Eval);
        let job = JobDescriptor::new(&config, &params, &inner_command(&config, &params));
        let args = batch_run_args(&job);

        assert_eq!(&args[..4], &["batch", "run", "--name", "chime7-infer-t221-eval"]);
        let pos = |flag: &str| args.iter().position(|a| a == flag).unwrap();
        assert_eq!(args[pos("--workspace") + 1], "chime7_ws:/ws:RW");
        assert_eq!(args[pos("--commandline") + 1], job.command);
        assert_eq!(args[pos("--instance") + 1], "dgx1v.32g.1.norm");
        let labels: Vec<&String> = args
            .iter()
            .enumerate()
            .filter(|(i, _)| *i > 0 && args[i - 1] == "--label")
            .map(|(_, a)| a)
            .collect();
        assert_eq!(labels, vec!["speech_diar", "_wl___other"]);
        assert_eq!(&args[args.len() - 2..], &["--format_type", "json"]);
    }

    #[test]
    fn numeric_and_string_ids_are_accepted() {
        assert_eq!(parse_job_id(r#"{"id": 4416021, "jobStatus": {}}"#), Ok(JobHandle("4416021".into())));
        assert_eq!(parse_job_id(r#"{"id": "4416021"}"#), Ok(JobHandle("4416021".into())));
    }

    #[test]
    fn missing_id_is_unexpected() {
        assert_eq!(
            parse_job_id("Job submitted"),
            Err(SchedulerError::UnexpectedResponse("Job submitted".into()))
        );
        assert!(matches!(parse_job_id(r#"{"name": "x"}"#), Err(SchedulerError::UnexpectedResponse(_))));
    }

    #[test]
    fn auth_failures_keep_stderr() {
        let stderr = "Error: 401 Unauthorized: invalid API key".to_string();
        assert_eq!(classify_failure(Some(1), stderr.clone()), SchedulerError::Unauthorized(stderr));
    }

    #[test]
    fn forbidden_status_is_an_auth_failure() {
        let stderr = "Client Error: 403 Response: Forbidden - Request Id: None Url: https://api.ngc.nvidia.com".to_string();
        assert_eq!(classify_failure(Some(1), stderr.clone()), SchedulerError::Unauthorized(stderr));
    }

    #[test]
    fn status_digits_inside_names_are_rejections() {
        for stderr in [
            "Error: quota exceeded for ace nv-us-4013",
            "Error: job 4401 already exists in team 4030",
        ] {
            assert_eq!(
                classify_failure(Some(1), stderr.to_string()),
                SchedulerError::Rejected { code: Some(1), stderr: stderr.to_string() }
            );
        }
    }

    #[test]
    fn other_failures_are_rejections() {
        let stderr = "Error: instance type 'dgx9' not found".to_string();
        assert_eq!(
            classify_failure(Some(1), stderr.clone()),
            SchedulerError::Rejected { code: Some(1), stderr }
        );
    }

    #[test]
    fn missing_binary_is_a_launch_error() {
        let client = NgcClient { program: PathBuf::from("/nonexistent/bin/ngc") };
        let config = ClusterConfig::default();
        let params = TrialParameters::new(1, Subset::Dev);
        let job = JobDescriptor::new(&config, &params, &inner_command(&config, &params));
        assert!(matches!(client.run_batch_job(&job), Err(SchedulerError::Launch { .. })));
    }
}
