use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Lower bound for the listener's sleep between polls
pub const MIN_POLL_INTERVAL_MS: u64 = 10;

fn default_combination() -> String {
    "CmdOrCtrl+Shift+D".to_string()
}

fn default_poll_interval_ms() -> u64 {
    50
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct HotkeyConfig {
    /// Accelerator string, e.g. "CmdOrCtrl+Shift+D"
    #[serde(default = "default_combination")]
    pub combination: String,
    /// How often the listener thread checks for presses
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl HotkeyConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(MIN_POLL_INTERVAL_MS))
    }
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            combination: default_combination(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}
