//! gradecalc-core: weighted grade aggregation and target solving.
//!
//! This crate owns the Years → Modules → Assignments → SubTasks data model,
//! the aggregation rules at every level, the "what do I still need" solver,
//! and the snapshot store that keeps derived assignment scores consistent.

pub mod aggregate;
pub mod classification;
pub mod error;
pub mod hierarchy;
pub mod model;
pub mod persistence;
pub mod report;
pub mod sample;
pub mod solver;
pub mod store;
pub mod validation;

pub use error::{ImportError, StoreError};
pub use model::GradeSnapshot;
pub use store::GradeStore;
