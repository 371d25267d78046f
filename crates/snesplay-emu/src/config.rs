use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Settings for driving a [`Console`](crate::Console) headlessly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Instructions to execute
    pub steps:           u64,
    /// Where to write the compressed state once the run ends
    pub save_state_path: Option<PathBuf>,
    /// Log the register file after every instruction
    pub trace:           bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self { steps: 1_000_000, save_state_path: None, trace: false }
    }
}
