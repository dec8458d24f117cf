//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level gradecalc configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradecalcConfig {
    /// Snapshot file used when `--snapshot` is not given.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,
    /// Default target grade for `summary` and `targets`.
    #[serde(default)]
    pub desired_grade: Option<f64>,
    /// Directory `export` writes to when `--output` is not given.
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("grades.json")
}
fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for GradecalcConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
            desired_grade: None,
            export_dir: default_export_dir(),
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `gradecalc.toml` in the current directory
/// 2. `~/.config/gradecalc/config.toml`
///
/// `GRADECALC_SNAPSHOT` overrides the snapshot path.
pub fn load_config_from(path: Option<&Path>) -> Result<GradecalcConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("gradecalc.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<GradecalcConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => GradecalcConfig::default(),
    };

    if let Ok(snapshot) = std::env::var("GRADECALC_SNAPSHOT") {
        if !snapshot.is_empty() {
            config.snapshot_path = PathBuf::from(snapshot);
        }
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gradecalc"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = GradecalcConfig::default();
        assert_eq!(config.snapshot_path, PathBuf::from("grades.json"));
        assert!(config.desired_grade.is_none());
    }

    #[test]
    fn parse_partial_config() {
        let config: GradecalcConfig = toml::from_str("desired_grade = 60.0\n").unwrap();
        assert_eq!(config.desired_grade, Some(60.0));
        assert_eq!(config.export_dir, PathBuf::from("."));
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = load_config_from(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gradecalc.toml");
        std::fs::write(&path, "snapshot_path = \"my.json\"\ndesired_grade = 70\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.desired_grade, Some(70.0));
    }
}
