//! Snapshot import, export and JSON file persistence.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;

use crate::aggregate::recalculate_assignment;
use crate::error::ImportError;
use crate::model::GradeSnapshot;
use crate::store::SnapshotObserver;

/// What an export keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportMode {
    /// Everything, including scores and the desired grade.
    #[default]
    Full,
    /// Structure only: scores cleared, nothing done, no desired grade.
    StructureOnly,
}

impl ExportMode {
    /// Label used in export file names.
    pub fn label(self) -> &'static str {
        match self {
            ExportMode::Full => "full",
            ExportMode::StructureOnly => "structure",
        }
    }
}

/// Parse a JSON string into a snapshot.
pub fn parse_snapshot(json: &str) -> Result<GradeSnapshot, ImportError> {
    let value: Value = serde_json::from_str(json).map_err(ImportError::Json)?;
    snapshot_from_value(value)
}

/// Validate and decode a JSON value into a snapshot.
///
/// The value must carry a `years` array before anything else is looked at.
/// Assignments with subtasks get their derived fields recomputed.
pub fn snapshot_from_value(value: Value) -> Result<GradeSnapshot, ImportError> {
    if !value.get("years").is_some_and(Value::is_array) {
        return Err(ImportError::MissingYears);
    }
    let snapshot: GradeSnapshot = serde_json::from_value(value).map_err(ImportError::Schema)?;
    Ok(normalize(snapshot))
}

/// Recompute every subtask-derived assignment.
pub fn normalize(mut snapshot: GradeSnapshot) -> GradeSnapshot {
    for year in &mut snapshot.years {
        for module in &mut year.modules {
            module.assignments = std::mem::take(&mut module.assignments)
                .into_iter()
                .map(recalculate_assignment)
                .collect();
        }
    }
    snapshot
}

/// Produce an export copy of the snapshot.
pub fn export_snapshot(snapshot: &GradeSnapshot, mode: ExportMode) -> GradeSnapshot {
    let mut data = snapshot.clone();
    if mode == ExportMode::StructureOnly {
        data.desired_grade = None;
        for assignment in data
            .years
            .iter_mut()
            .flat_map(|y| y.modules.iter_mut())
            .flat_map(|m| m.assignments.iter_mut())
        {
            assignment.score = None;
            assignment.done = false;
            for task in assignment.sub_tasks.iter_mut().flatten() {
                task.score = None;
                task.done = false;
            }
        }
    }
    data
}

/// The part of the snapshot kept in local storage: years and the active
/// year. The desired grade is transient.
pub fn persisted_view(snapshot: &GradeSnapshot) -> GradeSnapshot {
    GradeSnapshot {
        years: snapshot.years.clone(),
        active_year_id: snapshot.active_year_id.clone(),
        desired_grade: None,
    }
}

/// Serialize a snapshot as pretty JSON.
pub fn to_json(snapshot: &GradeSnapshot) -> Result<String> {
    serde_json::to_string_pretty(snapshot).context("failed to serialize snapshot")
}

/// Save a snapshot as JSON to a file, creating parent directories.
pub fn save_snapshot(snapshot: &GradeSnapshot, path: &Path) -> Result<()> {
    let json = to_json(snapshot)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write snapshot to {}", path.display()))?;
    tracing::info!("saved snapshot to {}", path.display());
    Ok(())
}

/// Load a snapshot from a JSON file.
pub fn load_snapshot(path: &Path) -> Result<GradeSnapshot> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot from {}", path.display()))?;
    let snapshot = parse_snapshot(&content)
        .with_context(|| format!("failed to import snapshot from {}", path.display()))?;
    tracing::info!(
        "loaded snapshot from {} ({} years)",
        path.display(),
        snapshot.years.len()
    );
    Ok(snapshot)
}

/// Observer that saves the persisted view after every change.
///
/// Saving is best effort: failures are logged and otherwise ignored.
#[derive(Debug, Clone)]
pub struct FileObserver {
    path: PathBuf,
}

impl FileObserver {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotObserver for FileObserver {
    fn on_change(&self, snapshot: &GradeSnapshot) {
        if let Err(e) = save_snapshot(&persisted_view(snapshot), &self.path) {
            tracing::warn!("failed to persist snapshot: {e:#}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::{final_grade, module_average, module_segments, year_average};
    use crate::model::{Assignment, SubTask};
    use crate::sample::sample_snapshot;

    #[test]
    fn rejects_non_json() {
        let err = parse_snapshot("not json {").unwrap_err();
        assert!(matches!(err, ImportError::Json(_)));
        assert!(!err.is_shape_error());
    }

    #[test]
    fn rejects_missing_years() {
        assert!(matches!(
            parse_snapshot(r#"{"activeYearId":"x"}"#),
            Err(ImportError::MissingYears)
        ));
        assert!(matches!(
            parse_snapshot(r#"{"years":{}}"#),
            Err(ImportError::MissingYears)
        ));
    }

    #[test]
    fn rejects_bad_schema() {
        let err = parse_snapshot(r#"{"years":[{"id":"y"}]}"#).unwrap_err();
        assert!(matches!(err, ImportError::Schema(_)));
        assert!(err.is_shape_error());
    }

    #[test]
    fn accepts_empty_years() {
        let snapshot = parse_snapshot(r#"{"years":[]}"#).unwrap();
        assert!(snapshot.years.is_empty());
        assert!(snapshot.active_year_id.is_none());
    }

    #[test]
    fn import_rederives_subtask_assignments() {
        let json = r#"{"years":[{"id":"y","name":"Y","weight":1,"modules":[
            {"id":"m","code":"M","credits":20,"assignments":[
                {"id":"a","name":"A","weight":100,"score":12,"done":false,"subTasks":[
                    {"id":"t1","name":"T1","weight":50,"score":80,"done":true},
                    {"id":"t2","name":"T2","weight":50,"score":60,"done":true}
                ]}
            ]}
        ]}]}"#;
        let snapshot = parse_snapshot(json).unwrap();
        let a = &snapshot.years[0].modules[0].assignments[0];
        assert_eq!(a.score, Some(70.0));
        assert!(a.done);
    }

    #[test]
    fn roundtrip_is_observationally_identical() {
        let original = sample_snapshot();
        let reloaded = parse_snapshot(&to_json(&original).unwrap()).unwrap();
        assert_eq!(reloaded, original);
        assert_eq!(final_grade(&reloaded.years), final_grade(&original.years));
        for (a, b) in reloaded.years.iter().zip(&original.years) {
            assert_eq!(year_average(a), year_average(b));
            for (ma, mb) in a.modules.iter().zip(&b.modules) {
                assert_eq!(module_average(ma), module_average(mb));
                assert_eq!(module_segments(ma), module_segments(mb));
            }
        }
    }

    #[test]
    fn structure_only_export_strips_grades() {
        let mut snapshot = sample_snapshot();
        snapshot.desired_grade = Some(70.0);
        snapshot.years[0].modules[0].assignments[0].sub_tasks = Some(vec![SubTask {
            id: "t".into(),
            name: "T".into(),
            weight: 100.0,
            score: Some(75.0),
            done: true,
        }]);

        let exported = export_snapshot(&snapshot, ExportMode::StructureOnly);
        assert!(exported.desired_grade.is_none());
        let all: Vec<&Assignment> = exported
            .years
            .iter()
            .flat_map(|y| &y.modules)
            .flat_map(|m| &m.assignments)
            .collect();
        assert!(all.iter().all(|a| a.score.is_none() && !a.done));
        let task = &all[0].sub_tasks.as_ref().unwrap()[0];
        assert!(task.score.is_none() && !task.done);
        assert_eq!(exported.years[0].modules[0].assignments[0].weight, 60.0);
        assert!(final_grade(&exported.years).is_none());

        let full = export_snapshot(&snapshot, ExportMode::Full);
        assert_eq!(full, snapshot);
    }

    #[test]
    fn save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("grades.json");

        save_snapshot(&sample_snapshot(), &path).unwrap();
        let loaded = load_snapshot(&path).unwrap();
        assert_eq!(loaded.years.len(), 2);
        assert_eq!(loaded.years[0].modules[0].code, "CS101");
    }

    #[test]
    fn load_reports_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"modules":[]}"#).unwrap();
        let err = load_snapshot(&path).unwrap_err();
        assert!(format!("{err:#}").contains("years"));
    }

    #[test]
    fn file_observer_drops_desired_grade() {
        let dir = tempfile::tempdir().unwrap();
        let observer = FileObserver::new(dir.path().join("state.json"));
        let mut snapshot = sample_snapshot();
        snapshot.desired_grade = Some(60.0);
        snapshot.active_year_id = Some("year-2".into());

        observer.on_change(&snapshot);

        let saved = load_snapshot(observer.path()).unwrap();
        assert!(saved.desired_grade.is_none());
        assert_eq!(saved.active_year_id.as_deref(), Some("year-2"));
    }
}
