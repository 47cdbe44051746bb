//! The shell command line run inside the remote container
//!
//! Steps are kept typed until the last moment so tests can inspect flags structurally. Rendering
//! joins them with `&&`: the remote shell stops at the first failing step.

/// A single program invocation with ordered flags
pub mod invocation;

use std::fmt;

pub use invocation::Invocation;

/// Separator between rendered steps
pub const CHAIN: &str = " && ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// `cd <dir>`
    ChangeDir(String),
    /// `export NAME=<prefix>:${NAME}`, keeping any existing value as a suffix
    PrependPath { var: String, prefix: String },
    /// `echo "NAME=${NAME}"`
    ShowVar(String),
    Run(Invocation),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Step::ChangeDir(dir) => write!(f, "cd {}", shell_escape(dir)),
            Step::PrependPath { var, prefix } => {
                write!(f, "export {var}={}:${{{var}}}", shell_escape(prefix))
            }
            Step::ShowVar(var) => write!(f, "echo \"{var}=${{{var}}}\""),
            Step::Run(invocation) => write!(f, "{invocation}"),
        }
    }
}

/// Ordered, immutable list of steps. Build with [`InnerCommand::builder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerCommand {
    steps: Vec<Step>,
}

impl InnerCommand {
    pub fn builder() -> InnerCommandBuilder {
        InnerCommandBuilder { steps: Vec::new() }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// The final program invocation, if any
    pub fn program(&self) -> Option<&Invocation> {
        self.steps.iter().rev().find_map(|step| match step {
            Step::Run(invocation) => Some(invocation),
            _ => None,
        })
    }

    pub fn render(&self) -> String {
        self.steps
            .iter()
            .map(|step| step.to_string())
            .collect::<Vec<String>>()
            .join(CHAIN)
    }
}

pub struct InnerCommandBuilder {
    steps: Vec<Step>,
}

impl InnerCommandBuilder {
    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn build(self) -> InnerCommand {
        InnerCommand { steps: self.steps }
    }
}

/// Minimal POSIX shell quoting (single quotes)
pub fn shell_escape(s: &str) -> String {
    if s.is_empty() {
        return "''".to_string();
    }
    if s.chars().all(|c| c.is_ascii_alphanumeric() || "-_./:@=+,%".contains(c)) {
        return s.to_string();
    }
    format!("'{}'", s.replace('\'', "'\\''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_leaves_plain_paths_alone() {
        assert_eq!(shell_escape("/ws/nemo_chime7"), "/ws/nemo_chime7");
        assert_eq!(shell_escape("sqlite:////ws/a.db"), "sqlite:////ws/a.db");
    }

    #[test]
    fn escape_quotes_metacharacters() {
        assert_eq!(shell_escape("*.wav"), "'*.wav'");
        assert_eq!(shell_escape("a b"), "'a b'");
        assert_eq!(shell_escape("it's"), "'it'\\''s'");
        assert_eq!(shell_escape(""), "''");
    }

    #[test]
    fn steps_render_in_order_with_chain() {
        let command = InnerCommand::builder()
            .step(Step::ChangeDir("/ws/repo".into()))
            .step(Step::Run(Invocation::new("df").arg("-h").arg("/ws")))
            .step(Step::PrependPath { var: "PYTHONPATH".into(), prefix: "/ws/repo".into() })
            .step(Step::ShowVar("PYTHONPATH".into()))
            .step(Step::Run(Invocation::new("python").arg("run.py").flag("--n_jobs", "2")))
            .build();

        assert_eq!(
            command.render(),
            "cd /ws/repo && df -h /ws && export PYTHONPATH=/ws/repo:${PYTHONPATH} \
             && echo \"PYTHONPATH=${PYTHONPATH}\" && python run.py --n_jobs 2"
        );
    }

    #[test]
    fn program_is_last_invocation() {
        let command = InnerCommand::builder()
            .step(Step::Run(Invocation::new("df")))
            .step(Step::ChangeDir("/tmp".into()))
            .step(Step::Run(Invocation::new("python")))
            .build();
        assert_eq!(command.program().map(|p| p.executable()), Some("python"));
    }
}
