/// Config file loading and creation for the prefsort CLI.
///
/// Config lives at ~/.config/prefsort/config.toml.
/// All fields are optional. CLI args override config values.
use prefsort_core::EngineConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::bail;

/// Pause between the end of a session and the result screen.
pub const DEFAULT_FINISH_DELAY_MS: u64 = 600;

#[derive(Deserialize, Default, Debug)]
pub struct PrefsortConfig {
    /// Default image directory for `prefsort rank`.
    pub images: Option<String>,
    pub finish_delay_ms: Option<u64>,
    pub seed: Option<u64>,
    /// Engine tuning. Missing keys fall back to the engine defaults.
    #[serde(default)]
    pub engine: EngineConfig,
}

const DEFAULT_CONFIG_TEMPLATE: &str = "\
# prefsort configuration
# All values here can be overridden by CLI flags.

# Directory to rank when --images is not given
# images = \"/home/me/Pictures/shortlist\"

# Pause (ms) between the end of a session and the results
# finish_delay_ms = 600

# Fixed RNG seed for reproducible group order
# seed = 42

[engine]
# Images shown per comparison while ratings are still rough (2-6)
# exploration_group_size = 6

# Images shown per comparison once the ranking has settled (2-6)
# precision_group_size = 4

# Skips after which an image is dropped
# pass_elimination_threshold = 2

# Consecutive skips that end the session
# global_pass_limit = 3

# Settled comparisons without progress before the stalemate breaker fires
# stalemate_limit = 5
";

/// Returns the default config path: ~/.config/prefsort/config.toml
pub fn config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| bail("HOME environment variable not set"));
    PathBuf::from(home).join(".config").join("prefsort").join("config.toml")
}

/// Parse config text. Separate from `load_config` so it can be tested without a file.
pub fn parse_config(content: &str) -> Result<PrefsortConfig, toml::de::Error> {
    toml::from_str(content)
}

/// Load config from a file path. Returns default (all None) if file doesn't exist.
pub fn load_config(path: &Path) -> PrefsortConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content)
            .unwrap_or_else(|e| bail(format!("Failed to parse config at {}: {e}", path.display()))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => PrefsortConfig::default(),
        Err(e) => bail(format!("Failed to read config at {}: {e}", path.display())),
    }
}

/// Create the default config file. Errors if it already exists.
pub fn create_default_config() -> PathBuf {
    let path = config_path();

    if path.exists() {
        bail(format!("Config file already exists at {}", path.display()));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| bail(format!("Failed to create directory {}: {e}", parent.display())));
    }

    std::fs::write(&path, DEFAULT_CONFIG_TEMPLATE)
        .unwrap_or_else(|e| bail(format!("Failed to write config to {}: {e}", path.display())));

    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_parses_to_defaults() {
        let cfg = parse_config(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert!(cfg.images.is_none());
        assert!(cfg.finish_delay_ms.is_none());
        assert_eq!(cfg.engine, EngineConfig::default());
    }

    #[test]
    fn test_partial_engine_table() {
        let cfg = parse_config(
            "seed = 7\nfinish_delay_ms = 0\n[engine]\nprecision_group_size = 3\n",
        )
        .unwrap();
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.finish_delay_ms, Some(0));
        assert_eq!(cfg.engine.precision_group_size, 3);
        assert_eq!(cfg.engine.exploration_group_size, EngineConfig::default().exploration_group_size);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(&dir.path().join("nope.toml"));
        assert!(cfg.seed.is_none());
        assert_eq!(cfg.engine, EngineConfig::default());
    }

    #[test]
    fn test_unknown_type_is_an_error() {
        assert!(parse_config("seed = \"abc\"").is_err());
    }
}
