use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// CHiME-7 dataset partition a trial is scored on. Also used as the job mode suffix.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Subset {
    Dev,
    Eval,
    Train,
}

/// Same lowercase name clap accepts on the command line
impl fmt::Display for Subset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let value = self.to_possible_value().ok_or(fmt::Error)?;
        f.write_str(value.get_name())
    }
}
