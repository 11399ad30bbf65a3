/// Config file loading and creation for the animelo CLI.
///
/// Config lives at ~/.config/animelo/config.toml.
/// All fields are optional; CLI flags override config values.
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::bail;

#[derive(Deserialize, Default, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AnimeloConfig {
    pub database: Option<PathBuf>,
    pub eligible_status: Option<String>,
    pub log_file: Option<PathBuf>,
}

const DEFAULT_CONFIG_TEMPLATE: &str = "\
# animelo configuration
# All values here can be overridden by CLI flags.

# Rating database (SQLite). Relative paths resolve against the working directory.
# database = \"animes.db\"

# Only items whose list status equals this label are offered for comparison.
# eligible_status = \"Completed\"

# Write logs to this file instead of stderr.
# log_file = \"/tmp/animelo.log\"
";

/// Returns the default config path: ~/.config/animelo/config.toml
pub fn config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| bail("HOME environment variable not set"));
    PathBuf::from(home).join(".config").join("animelo").join("config.toml")
}

/// Load config from a file path. Returns default (all None) if file doesn't exist.
pub fn load_config(path: &Path) -> AnimeloConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content)
            .unwrap_or_else(|e| bail(format!("Failed to parse config at {}: {e}", path.display()))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => AnimeloConfig::default(),
        Err(e) => bail(format!("Failed to read config at {}: {e}", path.display())),
    }
}

fn parse_config(content: &str) -> Result<AnimeloConfig, toml::de::Error> {
    toml::from_str(content)
}

/// Create the default config file at `path`. Errors if it already exists.
pub fn create_default_config(path: &Path) {
    if path.exists() {
        bail(format!("Config file already exists at {}", path.display()));
    }

    // Create parent directories
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| bail(format!("Failed to create directory {}: {e}", parent.display())));
    }

    std::fs::write(path, DEFAULT_CONFIG_TEMPLATE)
        .unwrap_or_else(|e| bail(format!("Failed to write config to {}: {e}", path.display())));
}
