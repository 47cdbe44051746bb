use std::fmt;

use crate::command::shell_escape;

/// Executable, positional arguments, then `--flag value` pairs in insertion order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    executable: String,
    args: Vec<String>,
    flags: Vec<(String, String)>,
}

impl Invocation {
    pub fn new(executable: impl Into<String>) -> Self {
        Invocation { executable: executable.into(), args: Vec::new(), flags: Vec::new() }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn flag(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.flags.push((name.into(), value.to_string()));
        self
    }

    /// Add the flag only when a value is present
    pub fn flag_opt(self, name: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.flag(name, value),
            None => self,
        }
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub fn flags(&self) -> &[(String, String)] {
        &self.flags
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", shell_escape(&self.executable))?;
        for arg in &self.args {
            write!(f, " {}", shell_escape(arg))?;
        }
        for (name, value) in &self.flags {
            write!(f, " {} {}", name, shell_escape(value))?;
        }
        Ok(())
    }
}
