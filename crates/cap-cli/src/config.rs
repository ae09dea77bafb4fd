//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the planning snapshot file.
    pub data_path: PathBuf,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("data_path", &self.data_path)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            data_path: data_dir.join("snapshot.json"),
        }
    }
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("CAP_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for cap.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("cap"))
}

/// Returns the platform-specific data directory for cap.
///
/// On Linux: `~/.local/share/cap`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("cap"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_dirs_data_path_returns_some() {
        assert!(dirs_data_path().is_some());
    }

    #[test]
    fn test_dirs_data_path_ends_with_cap() {
        let path = dirs_data_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "cap");
    }

    #[test]
    fn test_default_config_points_at_data_dir_snapshot() {
        let config = Config::default();
        let data_dir = dirs_data_path().unwrap();
        assert_eq!(config.data_path, data_dir.join("snapshot.json"));
    }

    #[test]
    fn test_explicit_config_file_overrides_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "data_path = \"/tmp/plan.json\"").unwrap();

        let config = Config::load_from(Some(&path)).unwrap();
        assert_eq!(config.data_path, PathBuf::from("/tmp/plan.json"));
    }
}
