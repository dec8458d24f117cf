//! Core data model types for gradecalc.
//!
//! The tree is Years → Modules → Assignments → SubTasks. Field names and
//! nesting serialise exactly as the persisted JSON snapshot expects
//! (`subTasks`, `activeYearId`, `desiredGrade`).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of any entity in the snapshot.
pub type Id = String;

/// Generate a fresh unique identifier.
pub fn new_id() -> Id {
    Uuid::new_v4().to_string()
}

/// Clamp a percentage weight into `[0, 100]`.
pub fn clamp_percent(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

/// A leaf piece of work inside an assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubTask {
    pub id: Id,
    pub name: String,
    /// Percentage of the parent assignment (0..100).
    pub weight: f64,
    /// Score out of 100, absent until graded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default)]
    pub done: bool,
}

/// A graded deliverable of a module.
///
/// When `sub_tasks` is non-empty, `score` and `done` are derived from the
/// subtasks and are not user-editable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: Id,
    pub name: String,
    /// Percentage of the parent module (0..100).
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default)]
    pub done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_tasks: Option<Vec<SubTask>>,
}

impl Assignment {
    /// Whether `score`/`done` are derived from subtasks.
    pub fn has_sub_tasks(&self) -> bool {
        self.sub_tasks.as_ref().is_some_and(|t| !t.is_empty())
    }
}

/// A module (course unit) weighted by credits within its year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub id: Id,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub credits: f64,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}

/// An academic year and its contribution to the final grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Year {
    pub id: Id,
    pub name: String,
    /// Contribution to the final grade, conventionally 0..1. Not required to
    /// sum to 1 across years.
    pub weight: f64,
    #[serde(default)]
    pub modules: Vec<Module>,
}

impl Year {
    /// Look up a module of this year by id.
    pub fn module(&self, module_id: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.id == module_id)
    }
}

/// The entire persisted state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeSnapshot {
    pub years: Vec<Year>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_year_id: Option<Id>,
    /// Ephemeral target grade, only consumed by the target solver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_grade: Option<f64>,
}

impl GradeSnapshot {
    /// Look up a year by id.
    pub fn year(&self, year_id: &str) -> Option<&Year> {
        self.years.iter().find(|y| y.id == year_id)
    }

    /// Look up a module by its year and module ids.
    pub fn module(&self, year_id: &str, module_id: &str) -> Option<&Module> {
        self.year(year_id).and_then(|y| y.module(module_id))
    }
}

// ---------------------------------------------------------------------------
// Drafts (add-operations)
// ---------------------------------------------------------------------------

/// Fields for a new module. Missing fields take their defaults.
#[derive(Debug, Clone, Default)]
pub struct ModuleDraft {
    pub code: Option<String>,
    pub name: Option<String>,
    pub credits: Option<f64>,
    pub assignments: Vec<Assignment>,
}

/// Fields for a new assignment.
#[derive(Debug, Clone, Default)]
pub struct AssignmentDraft {
    pub name: Option<String>,
    pub weight: Option<f64>,
    pub score: Option<f64>,
    /// Defaults to whether a score was given.
    pub done: Option<bool>,
}

/// Fields for a new subtask.
#[derive(Debug, Clone, Default)]
pub struct SubTaskDraft {
    pub name: Option<String>,
    pub weight: Option<f64>,
    pub score: Option<f64>,
    pub done: Option<bool>,
}

pub(crate) const DEFAULT_MODULE_CREDITS: f64 = 20.0;

impl ModuleDraft {
    pub(crate) fn build(self, id: Id) -> Module {
        Module {
            id,
            code: self.code.unwrap_or_default(),
            name: self.name,
            credits: self.credits.unwrap_or(DEFAULT_MODULE_CREDITS),
            assignments: self.assignments,
        }
    }
}

impl AssignmentDraft {
    pub(crate) fn build(self, id: Id) -> Assignment {
        let done = self.done.unwrap_or(self.score.is_some());
        Assignment {
            id,
            name: self.name.unwrap_or_default(),
            weight: clamp_percent(self.weight.unwrap_or(0.0)),
            score: self.score,
            done,
            sub_tasks: None,
        }
    }
}

impl SubTaskDraft {
    pub(crate) fn build(self, id: Id) -> SubTask {
        SubTask {
            id,
            name: self.name.unwrap_or_default(),
            weight: clamp_percent(self.weight.unwrap_or(0.0)),
            score: self.score,
            done: self.done.unwrap_or(false),
        }
    }
}

// ---------------------------------------------------------------------------
// Patches (update-operations)
// ---------------------------------------------------------------------------

/// Partial update of a year. `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct YearPatch {
    pub name: Option<String>,
    /// Unclamped.
    pub weight: Option<f64>,
}

/// Partial update of a module.
#[derive(Debug, Clone, Default)]
pub struct ModulePatch {
    pub code: Option<String>,
    /// `Some(None)` clears the name.
    pub name: Option<Option<String>>,
    pub credits: Option<f64>,
}

/// Partial update of an assignment.
#[derive(Debug, Clone, Default)]
pub struct AssignmentPatch {
    pub name: Option<String>,
    pub weight: Option<f64>,
    /// `Some(None)` clears the score. Ignored when the assignment has subtasks.
    pub score: Option<Option<f64>>,
    /// Ignored when the assignment has subtasks.
    pub done: Option<bool>,
}

/// Partial update of a subtask.
#[derive(Debug, Clone, Default)]
pub struct SubTaskPatch {
    pub name: Option<String>,
    pub weight: Option<f64>,
    pub score: Option<Option<f64>>,
    pub done: Option<bool>,
}

impl YearPatch {
    pub(crate) fn apply(self, year: &mut Year) {
        if let Some(name) = self.name {
            year.name = name;
        }
        if let Some(weight) = self.weight {
            year.weight = weight;
        }
    }
}

impl ModulePatch {
    pub(crate) fn apply(self, module: &mut Module) {
        if let Some(code) = self.code {
            module.code = code;
        }
        if let Some(name) = self.name {
            module.name = name;
        }
        if let Some(credits) = self.credits {
            module.credits = credits;
        }
    }
}

impl AssignmentPatch {
    pub(crate) fn apply(self, assignment: &mut Assignment) {
        if let Some(name) = self.name {
            assignment.name = name;
        }
        if let Some(weight) = self.weight {
            assignment.weight = clamp_percent(weight);
        }
        if let Some(score) = self.score {
            assignment.score = score;
        }
        if let Some(done) = self.done {
            assignment.done = done;
        }
    }
}

impl SubTaskPatch {
    pub(crate) fn apply(self, task: &mut SubTask) {
        if let Some(name) = self.name {
            task.name = name;
        }
        if let Some(weight) = self.weight {
            task.weight = clamp_percent(weight);
        }
        if let Some(score) = self.score {
            task.score = score;
        }
        if let Some(done) = self.done {
            task.done = done;
        }
    }
}
