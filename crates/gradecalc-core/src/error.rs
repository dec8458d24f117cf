//! Store and import error types.
//!
//! Computations never fail; undefined results are `Option`s. These errors
//! cover mutations that address something missing and imports that do not
//! look like a snapshot.

use thiserror::Error;

use crate::model::Id;

/// Errors from snapshot store mutations. The snapshot is unchanged when one
/// is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("year not found: {0}")]
    YearNotFound(Id),

    #[error("module not found: {module_id} (year {year_id})")]
    ModuleNotFound { year_id: Id, module_id: Id },

    #[error("assignment not found: {assignment_id} (module {module_id})")]
    AssignmentNotFound { module_id: Id, assignment_id: Id },

    #[error("subtask not found: {sub_task_id} (assignment {assignment_id})")]
    SubTaskNotFound { assignment_id: Id, sub_task_id: Id },
}

/// Errors from importing a serialized snapshot. The prior state is retained.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The input is not JSON at all.
    #[error("failed to parse snapshot JSON: {0}")]
    Json(#[source] serde_json::Error),

    /// The input has no `years` array.
    #[error("snapshot has no `years` array")]
    MissingYears,

    /// The input has a `years` array but does not decode as a snapshot.
    #[error("snapshot does not match the expected shape: {0}")]
    Schema(#[source] serde_json::Error),
}

impl ImportError {
    /// Returns `true` if the input was JSON but not shaped like a snapshot.
    pub fn is_shape_error(&self) -> bool {
        matches!(self, ImportError::MissingYears | ImportError::Schema(_))
    }
}
