use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;
use wordpeek_config::Config;

const DEFAULT_PROFILE: &str = "config.json";

/// Profile file path: `WORDPEEK_CONFIG` if set, else `config.json` in the
/// working directory
fn profile_path() -> PathBuf {
    env::var_os("WORDPEEK_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PROFILE))
}

fn load_profile_file(path: &Path) -> anyhow::Result<Config> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(config)
}

/// Load the profile, falling back to defaults, then apply env overrides.
///
/// Never fails: a broken profile is logged and ignored.
pub fn load_config() -> Config {
    load_config_from(&profile_path(), |key| env::var(key).ok())
}

pub fn load_config_from<F>(path: &Path, var: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = if path.exists() {
        tracing::info!("Loading profile from {}", path.display());
        load_profile_file(path).unwrap_or_else(|e| {
            tracing::error!("{:#}, using defaults", e);
            Config::default()
        })
    } else {
        tracing::debug!("No profile at {}, using defaults", path.display());
        Config::default()
    };

    config.apply_overrides(var);
    config
}
