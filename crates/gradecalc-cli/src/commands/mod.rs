pub mod export;
pub mod grade;
pub mod import;
pub mod init;
pub mod summary;
pub mod targets;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use gradecalc_core::classification::Classification;
use gradecalc_core::persistence;
use gradecalc_core::GradeSnapshot;

use crate::config::{load_config_from, GradecalcConfig};

/// Loaded config plus the snapshot path it resolves to.
pub struct Session {
    pub config: GradecalcConfig,
    pub snapshot_path: PathBuf,
}

impl Session {
    pub fn open(snapshot: Option<PathBuf>, config: Option<PathBuf>) -> Result<Self> {
        let config = load_config_from(config.as_deref())?;
        let snapshot_path = snapshot.unwrap_or_else(|| config.snapshot_path.clone());
        Ok(Self {
            config,
            snapshot_path,
        })
    }

    pub fn load_snapshot(&self) -> Result<GradeSnapshot> {
        persistence::load_snapshot(&self.snapshot_path)
    }

    /// Desired grade from the flag, then the config, then the snapshot.
    pub fn desired_grade(
        &self,
        flag: Option<&str>,
        snapshot: &GradeSnapshot,
    ) -> Result<Option<f64>> {
        match flag {
            Some(raw) => parse_desired(raw).map(Some),
            None => Ok(self.config.desired_grade.or(snapshot.desired_grade)),
        }
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }
}

/// Parse a desired grade given as a number ("65.5") or band ("2:1").
pub fn parse_desired(raw: &str) -> Result<f64> {
    if let Ok(grade) = raw.trim().parse::<f64>() {
        anyhow::ensure!(
            (0.0..=100.0).contains(&grade),
            "desired grade must be between 0 and 100, got {grade}"
        );
        return Ok(grade);
    }
    raw.parse::<Classification>()
        .map(Classification::boundary)
        .map_err(anyhow::Error::msg)
        .with_context(|| format!("invalid desired grade: {raw}"))
}
