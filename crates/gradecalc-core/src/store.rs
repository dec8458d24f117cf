//! The snapshot store: sole owner of the grade tree.
//!
//! Mutations go through explicit add/update/remove calls. Each one either
//! fully applies or returns an error with the snapshot untouched, and any
//! assignment touched by a mutation has its subtask-derived `score`/`done`
//! recomputed before the call returns. Derived values are never cached; the
//! selectors recompute from the current snapshot on every call.

use serde_json::Value;

use crate::aggregate::{recalculate_assignment, Segments};
use crate::error::{ImportError, StoreError};
use crate::hierarchy;
use crate::model::{
    new_id, Assignment, AssignmentDraft, AssignmentPatch, GradeSnapshot, Id, Module,
    ModuleDraft, ModulePatch, SubTaskDraft, SubTaskPatch, Year, YearPatch,
};
use crate::persistence::{self, ExportMode};
use crate::solver::{self, AssignmentTarget};

/// Receives the snapshot after every successful mutation.
pub trait SnapshotObserver {
    fn on_change(&self, snapshot: &GradeSnapshot);
}

/// Owner of the mutable grade snapshot.
#[derive(Default)]
pub struct GradeStore {
    snapshot: GradeSnapshot,
    observers: Vec<Box<dyn SnapshotObserver>>,
}

impl std::fmt::Debug for GradeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GradeStore")
            .field("snapshot", &self.snapshot)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl GradeStore {
    /// Create a store over an existing snapshot, re-deriving subtask scores.
    pub fn new(snapshot: GradeSnapshot) -> Self {
        Self {
            snapshot: persistence::normalize(snapshot),
            observers: Vec::new(),
        }
    }

    pub fn snapshot(&self) -> &GradeSnapshot {
        &self.snapshot
    }

    pub fn into_snapshot(self) -> GradeSnapshot {
        self.snapshot
    }

    /// Register an observer notified after each mutation.
    pub fn subscribe(&mut self, observer: Box<dyn SnapshotObserver>) {
        self.observers.push(observer);
    }

    fn notify(&self) {
        for observer in &self.observers {
            observer.on_change(&self.snapshot);
        }
    }

    // -----------------------------------------------------------------------
    // Lookup helpers
    // -----------------------------------------------------------------------

    fn year_mut(&mut self, year_id: &str) -> Result<&mut Year, StoreError> {
        self.snapshot
            .years
            .iter_mut()
            .find(|y| y.id == year_id)
            .ok_or_else(|| StoreError::YearNotFound(year_id.to_string()))
    }

    fn module_mut(&mut self, year_id: &str, module_id: &str) -> Result<&mut Module, StoreError> {
        self.year_mut(year_id)?
            .modules
            .iter_mut()
            .find(|m| m.id == module_id)
            .ok_or_else(|| StoreError::ModuleNotFound {
                year_id: year_id.to_string(),
                module_id: module_id.to_string(),
            })
    }

    fn assignment_mut(
        &mut self,
        year_id: &str,
        module_id: &str,
        assignment_id: &str,
    ) -> Result<&mut Assignment, StoreError> {
        self.module_mut(year_id, module_id)?
            .assignments
            .iter_mut()
            .find(|a| a.id == assignment_id)
            .ok_or_else(|| StoreError::AssignmentNotFound {
                module_id: module_id.to_string(),
                assignment_id: assignment_id.to_string(),
            })
    }

    /// Copy-on-write edit of one assignment: the edit runs on a copy, the
    /// derivation is re-run, then the copy replaces the original.
    fn edit_assignment<F>(
        &mut self,
        year_id: &str,
        module_id: &str,
        assignment_id: &str,
        edit: F,
    ) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Assignment) -> Result<(), StoreError>,
    {
        let slot = self.assignment_mut(year_id, module_id, assignment_id)?;
        let mut draft = slot.clone();
        edit(&mut draft)?;
        *slot = recalculate_assignment(draft);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Years
    // -----------------------------------------------------------------------

    pub fn add_year(&mut self, name: impl Into<String>, weight: Option<f64>) -> Id {
        let id = new_id();
        self.snapshot.years.push(Year {
            id: id.clone(),
            name: name.into(),
            weight: weight.unwrap_or(0.0),
            modules: Vec::new(),
        });
        tracing::debug!("added year {id}");
        self.notify();
        id
    }

    pub fn update_year(&mut self, year_id: &str, patch: YearPatch) -> Result<(), StoreError> {
        patch.apply(self.year_mut(year_id)?);
        tracing::debug!("updated year {year_id}");
        self.notify();
        Ok(())
    }

    /// Remove a year and everything under it. Clears the active year if it
    /// pointed here.
    pub fn remove_year(&mut self, year_id: &str) -> Result<(), StoreError> {
        let before = self.snapshot.years.len();
        self.snapshot.years.retain(|y| y.id != year_id);
        if self.snapshot.years.len() == before {
            return Err(StoreError::YearNotFound(year_id.to_string()));
        }
        if self.snapshot.active_year_id.as_deref() == Some(year_id) {
            self.snapshot.active_year_id = None;
        }
        tracing::debug!("removed year {year_id}");
        self.notify();
        Ok(())
    }

    pub fn set_active_year(&mut self, year_id: Option<&str>) -> Result<(), StoreError> {
        if let Some(id) = year_id {
            if self.snapshot.year(id).is_none() {
                return Err(StoreError::YearNotFound(id.to_string()));
            }
        }
        self.snapshot.active_year_id = year_id.map(str::to_string);
        self.notify();
        Ok(())
    }

    pub fn active_year_id(&self) -> Option<&str> {
        self.snapshot.active_year_id.as_deref()
    }

    // -----------------------------------------------------------------------
    // Modules
    // -----------------------------------------------------------------------

    pub fn add_module(&mut self, year_id: &str, draft: ModuleDraft) -> Result<Id, StoreError> {
        let id = new_id();
        let module = draft.build(id.clone());
        let module = Module {
            assignments: module
                .assignments
                .into_iter()
                .map(recalculate_assignment)
                .collect(),
            ..module
        };
        self.year_mut(year_id)?.modules.push(module);
        tracing::debug!("added module {id} to year {year_id}");
        self.notify();
        Ok(id)
    }

    pub fn update_module(
        &mut self,
        year_id: &str,
        module_id: &str,
        patch: ModulePatch,
    ) -> Result<(), StoreError> {
        patch.apply(self.module_mut(year_id, module_id)?);
        tracing::debug!("updated module {module_id}");
        self.notify();
        Ok(())
    }

    pub fn remove_module(&mut self, year_id: &str, module_id: &str) -> Result<(), StoreError> {
        let year = self.year_mut(year_id)?;
        let before = year.modules.len();
        year.modules.retain(|m| m.id != module_id);
        if year.modules.len() == before {
            return Err(StoreError::ModuleNotFound {
                year_id: year_id.to_string(),
                module_id: module_id.to_string(),
            });
        }
        tracing::debug!("removed module {module_id}");
        self.notify();
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Assignments
    // -----------------------------------------------------------------------

    pub fn add_assignment(
        &mut self,
        year_id: &str,
        module_id: &str,
        draft: AssignmentDraft,
    ) -> Result<Id, StoreError> {
        let id = new_id();
        let assignment = draft.build(id.clone());
        self.module_mut(year_id, module_id)?
            .assignments
            .push(assignment);
        tracing::debug!("added assignment {id} to module {module_id}");
        self.notify();
        Ok(id)
    }

    /// Patch an assignment. `score`/`done` in the patch do not survive on an
    /// assignment with subtasks.
    pub fn update_assignment(
        &mut self,
        year_id: &str,
        module_id: &str,
        assignment_id: &str,
        patch: AssignmentPatch,
    ) -> Result<(), StoreError> {
        self.edit_assignment(year_id, module_id, assignment_id, |a| {
            patch.apply(a);
            Ok(())
        })?;
        tracing::debug!("updated assignment {assignment_id}");
        self.notify();
        Ok(())
    }

    pub fn remove_assignment(
        &mut self,
        year_id: &str,
        module_id: &str,
        assignment_id: &str,
    ) -> Result<(), StoreError> {
        let module = self.module_mut(year_id, module_id)?;
        let before = module.assignments.len();
        module.assignments.retain(|a| a.id != assignment_id);
        if module.assignments.len() == before {
            return Err(StoreError::AssignmentNotFound {
                module_id: module_id.to_string(),
                assignment_id: assignment_id.to_string(),
            });
        }
        tracing::debug!("removed assignment {assignment_id}");
        self.notify();
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Subtasks
    // -----------------------------------------------------------------------

    pub fn add_sub_task(
        &mut self,
        year_id: &str,
        module_id: &str,
        assignment_id: &str,
        draft: SubTaskDraft,
    ) -> Result<Id, StoreError> {
        let id = new_id();
        let task = draft.build(id.clone());
        self.edit_assignment(year_id, module_id, assignment_id, |a| {
            a.sub_tasks.get_or_insert_with(Vec::new).push(task);
            Ok(())
        })?;
        tracing::debug!("added subtask {id} to assignment {assignment_id}");
        self.notify();
        Ok(id)
    }

    pub fn update_sub_task(
        &mut self,
        year_id: &str,
        module_id: &str,
        assignment_id: &str,
        sub_task_id: &str,
        patch: SubTaskPatch,
    ) -> Result<(), StoreError> {
        self.edit_assignment(year_id, module_id, assignment_id, |a| {
            let task = a
                .sub_tasks
                .iter_mut()
                .flatten()
                .find(|t| t.id == sub_task_id)
                .ok_or_else(|| sub_task_not_found(assignment_id, sub_task_id))?;
            patch.apply(task);
            Ok(())
        })?;
        tracing::debug!("updated subtask {sub_task_id}");
        self.notify();
        Ok(())
    }

    /// Remove a subtask. Removing the last one keeps the assignment's last
    /// derived score and done flag.
    pub fn remove_sub_task(
        &mut self,
        year_id: &str,
        module_id: &str,
        assignment_id: &str,
        sub_task_id: &str,
    ) -> Result<(), StoreError> {
        self.edit_assignment(year_id, module_id, assignment_id, |a| {
            let tasks = a
                .sub_tasks
                .as_mut()
                .ok_or_else(|| sub_task_not_found(assignment_id, sub_task_id))?;
            let before = tasks.len();
            tasks.retain(|t| t.id != sub_task_id);
            if tasks.len() == before {
                return Err(sub_task_not_found(assignment_id, sub_task_id));
            }
            Ok(())
        })?;
        tracing::debug!("removed subtask {sub_task_id}");
        self.notify();
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Desired grade
    // -----------------------------------------------------------------------

    pub fn set_desired_grade(&mut self, grade: Option<f64>) {
        self.snapshot.desired_grade = grade;
        self.notify();
    }

    pub fn desired_grade(&self) -> Option<f64> {
        self.snapshot.desired_grade
    }

    // -----------------------------------------------------------------------
    // Import / export
    // -----------------------------------------------------------------------

    /// Replace the whole snapshot from JSON text. Nothing changes on error.
    pub fn import_json(&mut self, json: &str) -> Result<(), ImportError> {
        let value: Value = serde_json::from_str(json).map_err(ImportError::Json)?;
        self.import_value(value)
    }

    /// Replace the whole snapshot from a JSON value. Nothing changes on error.
    pub fn import_value(&mut self, value: Value) -> Result<(), ImportError> {
        let snapshot = persistence::snapshot_from_value(value)?;
        tracing::info!("imported snapshot with {} years", snapshot.years.len());
        self.snapshot = snapshot;
        self.notify();
        Ok(())
    }

    pub fn export(&self, mode: ExportMode) -> GradeSnapshot {
        persistence::export_snapshot(&self.snapshot, mode)
    }

    // -----------------------------------------------------------------------
    // Selectors
    // -----------------------------------------------------------------------

    pub fn module_average(&self, year_id: &str, module_id: &str) -> Option<f64> {
        self.snapshot
            .module(year_id, module_id)
            .and_then(hierarchy::module_average)
    }

    pub fn module_achieved_score(&self, year_id: &str, module_id: &str) -> Option<f64> {
        self.snapshot
            .module(year_id, module_id)
            .map(hierarchy::module_achieved_score)
    }

    pub fn module_completion_percent(&self, year_id: &str, module_id: &str) -> f64 {
        self.snapshot
            .module(year_id, module_id)
            .map_or(0.0, hierarchy::module_completion_percent)
    }

    pub fn module_segments(&self, year_id: &str, module_id: &str) -> Segments {
        self.snapshot
            .module(year_id, module_id)
            .map_or(Segments::EMPTY, hierarchy::module_segments)
    }

    /// `false` for a module that does not exist.
    pub fn is_module_valid(&self, year_id: &str, module_id: &str) -> bool {
        self.snapshot
            .module(year_id, module_id)
            .is_some_and(hierarchy::module_is_valid)
    }

    pub fn year_average(&self, year_id: &str) -> Option<f64> {
        self.snapshot.year(year_id).and_then(hierarchy::year_average)
    }

    pub fn year_segments(&self, year_id: &str) -> Segments {
        self.snapshot
            .year(year_id)
            .map_or(Segments::EMPTY, hierarchy::year_segments)
    }

    pub fn is_year_valid(&self, year_id: &str) -> bool {
        self.snapshot
            .year(year_id)
            .is_some_and(hierarchy::year_is_valid)
    }

    pub fn final_grade(&self) -> Option<f64> {
        hierarchy::final_grade(&self.snapshot.years)
    }

    pub fn year_weights_normalised(&self) -> bool {
        hierarchy::year_weights_normalised(&self.snapshot.years)
    }

    pub fn required_module_score(
        &self,
        year_id: &str,
        module_id: &str,
        desired: f64,
    ) -> Option<f64> {
        solver::required_module_score(&self.snapshot.years, year_id, module_id, desired)
    }

    pub fn required_per_assignment(
        &self,
        year_id: &str,
        module_id: &str,
        desired: f64,
    ) -> Vec<AssignmentTarget> {
        solver::required_per_assignment(&self.snapshot.years, year_id, module_id, desired)
    }
}

fn sub_task_not_found(assignment_id: &str, sub_task_id: &str) -> StoreError {
    StoreError::SubTaskNotFound {
        assignment_id: assignment_id.to_string(),
        sub_task_id: sub_task_id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::sample_snapshot;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingObserver(Rc<Cell<usize>>);

    impl SnapshotObserver for CountingObserver {
        fn on_change(&self, _snapshot: &GradeSnapshot) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn store_with_module() -> (GradeStore, Id, Id) {
        let mut store = GradeStore::default();
        let year = store.add_year("Year 1", Some(1.0));
        let module = store
            .add_module(
                &year,
                ModuleDraft {
                    code: Some("CS101".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        (store, year, module)
    }

    #[test]
    fn add_returns_fresh_ids() {
        let mut store = GradeStore::default();
        let a = store.add_year("A", None);
        let b = store.add_year("B", None);
        assert_ne!(a, b);
        assert_eq!(store.snapshot().years.len(), 2);
        assert_eq!(store.snapshot().years[0].weight, 0.0);
    }

    #[test]
    fn module_defaults_to_twenty_credits() {
        let (store, year, module) = store_with_module();
        let m = store.snapshot().module(&year, &module).unwrap();
        assert_eq!(m.credits, 20.0);
        assert_eq!(m.code, "CS101");
    }

    #[test]
    fn missing_parent_is_an_error_and_changes_nothing() {
        let (mut store, year, _) = store_with_module();
        let before = store.snapshot().clone();

        let err = store
            .add_assignment(&year, "missing", AssignmentDraft::default())
            .unwrap_err();
        assert!(matches!(err, StoreError::ModuleNotFound { .. }));
        assert!(matches!(
            store.add_module("missing", ModuleDraft::default()),
            Err(StoreError::YearNotFound(_))
        ));
        assert_eq!(store.snapshot(), &before);
    }

    #[test]
    fn assignment_crud() {
        let (mut store, year, module) = store_with_module();
        let id = store
            .add_assignment(
                &year,
                &module,
                AssignmentDraft {
                    name: Some("Exam".into()),
                    weight: Some(150.0),
                    score: Some(70.0),
                    done: None,
                },
            )
            .unwrap();
        let a = &store.snapshot().module(&year, &module).unwrap().assignments[0];
        assert_eq!(a.weight, 100.0);
        assert!(a.done);

        store
            .update_assignment(
                &year,
                &module,
                &id,
                AssignmentPatch {
                    weight: Some(80.0),
                    score: Some(None),
                    ..Default::default()
                },
            )
            .unwrap();
        let a = &store.snapshot().module(&year, &module).unwrap().assignments[0];
        assert_eq!(a.weight, 80.0);
        assert!(a.score.is_none());
        assert_eq!(a.name, "Exam");

        store.remove_assignment(&year, &module, &id).unwrap();
        assert!(store
            .snapshot()
            .module(&year, &module)
            .unwrap()
            .assignments
            .is_empty());
        assert!(store.remove_assignment(&year, &module, &id).is_err());
    }

    #[test]
    fn subtask_mutations_rederive_parent() {
        let (mut store, year, module) = store_with_module();
        let a = store
            .add_assignment(
                &year,
                &module,
                AssignmentDraft {
                    weight: Some(100.0),
                    ..Default::default()
                },
            )
            .unwrap();

        let t1 = store
            .add_sub_task(
                &year,
                &module,
                &a,
                SubTaskDraft {
                    weight: Some(40.0),
                    score: Some(50.0),
                    done: Some(true),
                    ..Default::default()
                },
            )
            .unwrap();
        let get = |s: &GradeStore| s.snapshot().module(&year, &module).unwrap().assignments[0].clone();
        assert_eq!(get(&store).score, Some(20.0));
        assert!(get(&store).done);

        let t2 = store
            .add_sub_task(
                &year,
                &module,
                &a,
                SubTaskDraft {
                    weight: Some(60.0),
                    score: Some(90.0),
                    ..Default::default()
                },
            )
            .unwrap();
        // Undone subtask scores still count toward the parent score.
        assert_eq!(get(&store).score, Some(74.0));
        assert!(!get(&store).done);

        store
            .update_sub_task(
                &year,
                &module,
                &a,
                &t2,
                SubTaskPatch {
                    done: Some(true),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(get(&store).done);
        assert_eq!(store.module_average(&year, &module), Some(74.0));

        store.remove_sub_task(&year, &module, &a, &t2).unwrap();
        assert_eq!(get(&store).score, Some(20.0));

        store.remove_sub_task(&year, &module, &a, &t1).unwrap();
        // Last derived values remain once no subtasks are left.
        assert_eq!(get(&store).score, Some(20.0));
        assert!(get(&store).done);

        assert!(matches!(
            store.remove_sub_task(&year, &module, &a, &t1),
            Err(StoreError::SubTaskNotFound { .. })
        ));
    }

    #[test]
    fn derived_fields_override_assignment_patch() {
        let (mut store, year, module) = store_with_module();
        let a = store
            .add_assignment(&year, &module, AssignmentDraft::default())
            .unwrap();
        store
            .add_sub_task(
                &year,
                &module,
                &a,
                SubTaskDraft {
                    weight: Some(100.0),
                    score: Some(55.0),
                    ..Default::default()
                },
            )
            .unwrap();
        store
            .update_assignment(
                &year,
                &module,
                &a,
                AssignmentPatch {
                    score: Some(Some(99.0)),
                    done: Some(true),
                    ..Default::default()
                },
            )
            .unwrap();
        let assignment = &store.snapshot().module(&year, &module).unwrap().assignments[0];
        assert_eq!(assignment.score, Some(55.0));
        assert!(!assignment.done);
    }

    #[test]
    fn failed_subtask_update_leaves_assignment_intact() {
        let (mut store, year, module) = store_with_module();
        let a = store
            .add_assignment(&year, &module, AssignmentDraft::default())
            .unwrap();
        let before = store.snapshot().clone();
        let err = store
            .update_sub_task(&year, &module, &a, "nope", SubTaskPatch::default())
            .unwrap_err();
        assert!(matches!(err, StoreError::SubTaskNotFound { .. }));
        assert_eq!(store.snapshot(), &before);
    }

    #[test]
    fn removing_a_year_cascades_and_clears_active() {
        let mut store = GradeStore::new(sample_snapshot());
        store.set_active_year(Some("year-1")).unwrap();
        store.remove_year("year-1").unwrap();
        assert!(store.snapshot().year("year-1").is_none());
        assert!(store.active_year_id().is_none());
        assert!(store.module_average("year-1", "mod-1").is_none());
        assert!(matches!(
            store.remove_year("year-1"),
            Err(StoreError::YearNotFound(_))
        ));
    }

    #[test]
    fn active_year_must_exist() {
        let mut store = GradeStore::new(sample_snapshot());
        assert!(store.set_active_year(Some("nope")).is_err());
        store.set_active_year(Some("year-2")).unwrap();
        assert_eq!(store.active_year_id(), Some("year-2"));
        store.set_active_year(None).unwrap();
        assert!(store.active_year_id().is_none());
    }

    #[test]
    fn update_year_and_module() {
        let mut store = GradeStore::new(sample_snapshot());
        store
            .update_year(
                "year-1",
                YearPatch {
                    weight: Some(0.5),
                    ..Default::default()
                },
            )
            .unwrap();
        store
            .update_module(
                "year-1",
                "mod-1",
                ModulePatch {
                    name: Some(None),
                    credits: Some(40.0),
                    ..Default::default()
                },
            )
            .unwrap();
        let m = store.snapshot().module("year-1", "mod-1").unwrap();
        assert!(m.name.is_none());
        assert_eq!(m.credits, 40.0);
        assert_eq!(store.snapshot().year("year-1").unwrap().weight, 0.5);

        store.remove_module("year-1", "mod-2").unwrap();
        assert_eq!(store.snapshot().year("year-1").unwrap().modules.len(), 1);
    }

    #[test]
    fn selectors_on_sample() {
        let store = GradeStore::new(sample_snapshot());
        assert_eq!(store.module_average("year-1", "mod-1"), Some(75.0));
        assert_eq!(store.module_achieved_score("year-1", "mod-1"), Some(45.0));
        assert_eq!(store.module_completion_percent("year-1", "mod-1"), 60.0);
        assert!(store.is_module_valid("year-1", "mod-1"));
        assert!(!store.is_module_valid("year-1", "missing"));
        assert_eq!(store.year_average("year-2"), Some(78.0));
        assert!(store.is_year_valid("year-1"));
        assert_eq!(store.final_grade(), Some(77.4));
        assert!(store.year_weights_normalised());
        assert_eq!(store.module_segments("x", "y"), Segments::EMPTY);
        assert_eq!(store.year_segments("x"), Segments::EMPTY);
        assert_eq!(store.required_module_score("year-2", "mod-3", 70.0), Some(47.2));
        assert_eq!(store.required_per_assignment("year-2", "mod-3", 70.0).len(), 1);
    }

    #[test]
    fn malformed_import_keeps_prior_state() {
        let mut store = GradeStore::new(sample_snapshot());
        let before = store.snapshot().clone();

        assert!(store.import_json("{ nope").is_err());
        assert!(store.import_json(r#"{"years": 3}"#).is_err());
        assert!(store
            .import_value(serde_json::json!({"years": [{"name": "no id"}]}))
            .is_err());
        assert_eq!(store.snapshot(), &before);

        store.import_json(r#"{"years": []}"#).unwrap();
        assert!(store.snapshot().years.is_empty());
        assert!(store.final_grade().is_none());
    }

    #[test]
    fn observers_see_every_mutation_but_not_failures() {
        let count = Rc::new(Cell::new(0));
        let mut store = GradeStore::default();
        store.subscribe(Box::new(CountingObserver(count.clone())));

        let year = store.add_year("Y", Some(1.0));
        store.set_desired_grade(Some(70.0));
        assert!(store.remove_year("missing").is_err());
        store.remove_year(&year).unwrap();

        assert_eq!(count.get(), 3);
        assert_eq!(store.desired_grade(), Some(70.0));
    }

    #[test]
    fn export_modes() {
        let mut store = GradeStore::new(sample_snapshot());
        store.set_desired_grade(Some(60.0));
        assert_eq!(store.export(ExportMode::Full).desired_grade, Some(60.0));
        let structure = store.export(ExportMode::StructureOnly);
        assert!(structure.desired_grade.is_none());
        // The live snapshot is untouched.
        assert_eq!(store.module_average("year-1", "mod-1"), Some(75.0));
    }
}
