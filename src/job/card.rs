use chrono::Utc;
use serde::Serialize;
use tinytemplate::{format_unescaped, TinyTemplate};

use crate::job::descriptor::JobDescriptor;
use crate::trial::params::Checkpoints;

/// included job card template
static JOB_CARD: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/templates/job_card.txt"));

/// Rendering context for the job card
#[derive(Serialize)]
struct CardContext<'a> {
    name: &'a str,
    image: &'a str,
    instance: &'a str,
    workspace_mount: String,
    result: &'a str,
    labels: &'a [String],
    checkpoints: String,
    time_now: String,
    command: &'a str,
}

impl JobDescriptor {
    /// Summary of the submission for logs and `--dry-run`
    pub fn card(&self, checkpoints: Option<&Checkpoints>) -> Result<String, tinytemplate::error::Error> {
        let mut tt = TinyTemplate::new();
        // shell commands must not be HTML escaped
        tt.set_default_formatter(&format_unescaped);
        tt.add_template("job_card", JOB_CARD)?;

        let context = CardContext {
            name: &self.name,
            image: &self.image,
            instance: &self.instance,
            workspace_mount: self.workspace_mount(),
            result: &self.result,
            labels: &self.labels,
            checkpoints: checkpoints
                .map(|c| format!("{} (vad {}, msdd {})", c.revision, c.vad_model_path, c.msdd_model_path))
                .unwrap_or_else(|| "none".to_string()),
            time_now: Utc::now().to_string(),
            command: &self.command,
        };
        tt.render("job_card", &context)
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
    fn card_shows_descriptor_unescaped() {
        let config = ClusterConfig::default();
        let params = TrialParameters::new(221, Subset::Eval);
        let job = JobDescriptor::new(&config, &params, &inner_command(&config, &params));
        let card = job.card(params.checkpoints.as_ref()).unwrap();

        assert!(card.contains("# job     chime7-infer-t221-eval"));
        assert!(card.contains("# mount   chime7_ws:/ws:RW"));
        assert!(card.contains("# labels  speech_diar _wl___other "));
        assert!(card.contains("# ckpt    msdd-v2-e53"));
        assert!(card.contains(&job.command));
    }

    #[test]
    fn card_without_checkpoints() {
        let config = ClusterConfig::default();
        let params = TrialParameters { checkpoints: None, ..TrialParameters::new(1, Subset::Dev) };
        let job = JobDescriptor::new(&config, &params, &inner_command(&config, &params));
        assert!(job.card(None).unwrap().contains("# ckpt    none"));
    }
}
