use serde::{Deserialize, Serialize};

/// Settings for [`crate::env::OthelloEnv`]. Every field is optional when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    /// Include the legal-move grid in renders.
    pub verbose: bool,
    /// Emit renders through the `log` facade at debug level.
    pub log_renders: bool,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            log_renders: true,
        }
    }
}
