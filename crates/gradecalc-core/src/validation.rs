//! Snapshot lint.
//!
//! None of these findings stop anything from computing; they flag data a
//! user probably wants to fix.

use std::collections::HashSet;

use serde::Serialize;

use crate::aggregate::{weight_total, WEIGHT_TOLERANCE};
use crate::hierarchy::{module_is_valid, year_weight_total, year_weights_normalised};
use crate::model::{GradeSnapshot, Id};

/// A warning from snapshot validation.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationWarning {
    /// The entity the warning is about, if any.
    pub entity_id: Option<Id>,
    pub message: String,
}

impl ValidationWarning {
    fn new(entity_id: Option<&Id>, message: String) -> Self {
        Self {
            entity_id: entity_id.cloned(),
            message,
        }
    }
}

/// Validate a snapshot for common issues.
pub fn validate_snapshot(snapshot: &GradeSnapshot) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if !snapshot.years.is_empty() && !year_weights_normalised(&snapshot.years) {
        warnings.push(ValidationWarning::new(
            None,
            format!(
                "year weights sum to {}; they will be normalised when computing the final grade",
                year_weight_total(&snapshot.years)
            ),
        ));
    }

    for year in &snapshot.years {
        for module in &year.modules {
            if !module_is_valid(module) {
                warnings.push(ValidationWarning::new(
                    Some(&module.id),
                    format!(
                        "{} / {} assignment weights sum to {}%",
                        year.name,
                        module.code,
                        weight_total(&module.assignments)
                    ),
                ));
            }

            if module.credits <= 0.0 {
                warnings.push(ValidationWarning::new(
                    Some(&module.id),
                    format!("{} / {} has non-positive credits", year.name, module.code),
                ));
            }

            // Subtask weights may legitimately differ from 100; flag it so
            // derived scores above 100 are not a surprise.
            for assignment in &module.assignments {
                let Some(tasks) = assignment.sub_tasks.as_deref().filter(|t| !t.is_empty())
                else {
                    continue;
                };
                let total = weight_total(tasks);
                if (total - 100.0).abs() >= WEIGHT_TOLERANCE {
                    warnings.push(ValidationWarning::new(
                        Some(&assignment.id),
                        format!(
                            "{} / {} / {} subtask weights sum to {}%",
                            year.name, module.code, assignment.name, total
                        ),
                    ));
                }
            }
        }
    }

    let mut seen = HashSet::new();
    let ids = snapshot.years.iter().flat_map(|y| {
        std::iter::once(&y.id).chain(y.modules.iter().flat_map(|m| {
            std::iter::once(&m.id).chain(m.assignments.iter().flat_map(|a| {
                std::iter::once(&a.id).chain(a.sub_tasks.iter().flatten().map(|t| &t.id))
            }))
        }))
    });
    for id in ids {
        if !seen.insert(id) {
            warnings.push(ValidationWarning::new(
                Some(id),
                format!("duplicate id: {id}"),
            ));
        }
    }

    warnings
}
