use serde::{Deserialize, Serialize};

fn default_always_on_top() -> bool {
    true
}

fn default_startup_notice() -> bool {
    true
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct UiConfig {
    #[serde(default = "default_always_on_top")]
    pub always_on_top: bool,
    /// Show the "now running" notice once the UI loop starts
    #[serde(default = "default_startup_notice")]
    pub startup_notice: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            always_on_top: default_always_on_top(),
            startup_notice: default_startup_notice(),
        }
    }
}
