use serde::{Deserialize, Serialize};

use self::capture::CaptureConfig;
use self::hotkey::{HotkeyConfig, MIN_POLL_INTERVAL_MS};
use self::lookup::{LookupConfig, MIN_TIMEOUT_MS};
use self::ui::UiConfig;

pub mod capture;
pub mod hotkey;
pub mod lookup;
pub mod ui;

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub hotkey: HotkeyConfig,
    pub lookup: LookupConfig,
    pub capture: CaptureConfig,
    pub ui: UiConfig,
}

impl Config {
    /// Overlay `WORDPEEK_*` values on top of whatever was loaded.
    ///
    /// Unparseable numbers are ignored and the current value kept.
    pub fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(combination) = var("WORDPEEK_HOTKEY")
            && !combination.trim().is_empty()
        {
            self.hotkey.combination = combination;
        }

        if let Some(api_url) = var("WORDPEEK_API_URL")
            && !api_url.trim().is_empty()
        {
            self.lookup.api_url = api_url;
        }

        if let Some(timeout_ms) = var("WORDPEEK_LOOKUP_TIMEOUT_MS").and_then(|v| v.parse().ok()) {
            self.lookup.timeout_ms = timeout_ms;
        }

        if let Some(delay_ms) = var("WORDPEEK_SETTLE_DELAY_MS").and_then(|v| v.parse().ok()) {
            self.capture.settle_delay_ms = delay_ms;
        }

        self.clamp_limits();
    }

    /// Raise zero or tiny intervals to their minimums
    fn clamp_limits(&mut self) {
        self.lookup.timeout_ms = self.lookup.timeout_ms.max(MIN_TIMEOUT_MS);
        self.hotkey.poll_interval_ms = self.hotkey.poll_interval_ms.max(MIN_POLL_INTERVAL_MS);
    }
}
