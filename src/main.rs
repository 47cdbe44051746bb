use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;

use crate::config::ClusterConfig;
use crate::scheduler::dry_run::DryRunClient;
use crate::scheduler::ngc::NgcClient;
use crate::scheduler::SchedulerClient;
use crate::subset::Subset;
use crate::submit::{build, submit};
use crate::trial::params::TrialParameters;

mod command;
mod config;
mod error;
mod job;
mod scheduler;
mod submit;
mod subset;
mod trial;

#[derive(Parser, Debug)]
#[command(name = "chime7-launch")]
#[command(about = "Submit one CHiME-7 diarization search trial as a batch job")]
struct Args {
    /// Trial id, used to derive the job name, log file and study storage
    #[arg(long, default_value_t = 221)]
    trial_id: u32,
    /// Dataset subset scored by the trial, also the job mode
    #[arg(long, value_enum, default_value_t = Subset::Eval)]
    subset: Subset,
    /// JSON file with the complete trial parameters
    #[arg(long, conflicts_with_all = ["trial_id", "subset"])]
    params: Option<PathBuf>,
    /// JSON file replacing the built-in cluster configuration
    #[arg(long)]
    cluster: Option<PathBuf>,
    /// Path to the ngc CLI
    #[arg(long, default_value = "ngc")]
    ngc: PathBuf,
    /// Print the job instead of submitting it
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    info!("terve! starting up :)");
    let args = Args::parse();

    let config = match &args.cluster {
        Some(path) => ClusterConfig::read(path)
            .with_context(|| format!("loading cluster configuration {}", path.display()))?,
        None => ClusterConfig::default(),
    };
    let params = match &args.params {
        Some(path) => TrialParameters::read(path)
            .with_context(|| format!("loading trial parameters {}", path.display()))?,
        None => TrialParameters::new(args.trial_id, args.subset),
    };

    let client: Box<dyn SchedulerClient> = match args.dry_run {
        true => Box::new(DryRunClient),
        false => Box::new(NgcClient { program: args.ngc.clone() }),
    };

    if args.dry_run {
        config.validate()?;
        params.validate()?;
        let card = build(&config, &params).card(params.checkpoints.as_ref())?;
        println!("{card}");
    }

    let submission = submit(&config, &params, client.as_ref())?;
    info!("Submitted {} at {}", submission.job_name, submission.submitted_at);
    println!("{}", submission.handle);
    Ok(())
}
