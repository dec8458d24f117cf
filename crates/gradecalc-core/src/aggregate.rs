//! Weighted aggregation over sets of graded and pending items.
//!
//! An item is *counted* when it is done and carries a score; otherwise its
//! weight is still pending. Everything here is a pure function of its input.

use serde::{Deserialize, Serialize};

use crate::model::{Assignment, SubTask};

/// Tolerance for the "weights sum to 100" predicate.
pub const WEIGHT_TOLERANCE: f64 = 1e-4;

/// Decimal places for averages and scores.
pub const AVERAGE_PLACES: i32 = 2;

/// Decimal places for displayed percentages.
pub const PERCENT_PLACES: i32 = 1;

/// Round `value` to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Something with a percentage weight and an optional score.
pub trait Weighted {
    /// Percentage weight within the parent (0..100).
    fn weight(&self) -> f64;
    /// Score out of 100, if graded.
    fn score(&self) -> Option<f64>;
    /// Whether the item is complete.
    fn is_done(&self) -> bool;
}

impl Weighted for Assignment {
    fn weight(&self) -> f64 {
        self.weight
    }
    fn score(&self) -> Option<f64> {
        self.score
    }
    fn is_done(&self) -> bool {
        self.done
    }
}

impl Weighted for SubTask {
    fn weight(&self) -> f64 {
        self.weight
    }
    fn score(&self) -> Option<f64> {
        self.score
    }
    fn is_done(&self) -> bool {
        self.done
    }
}

/// Three-way split of a parent's weight, in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Segments {
    /// Weight secured by achieved score.
    pub completed: f64,
    /// Weight lost to imperfect scores on finished work.
    pub missed: f64,
    /// Weight not yet graded.
    pub remaining: f64,
}

impl Segments {
    /// All three segments at zero, used when there is no weight at all.
    pub const EMPTY: Segments = Segments {
        completed: 0.0,
        missed: 0.0,
        remaining: 0.0,
    };

    /// Rescale raw magnitudes so they sum to 100, rounded to one decimal.
    pub fn rescaled(completed: f64, missed: f64, remaining: f64) -> Self {
        let total = completed + missed + remaining;
        if total == 0.0 {
            return Self::EMPTY;
        }
        let scale = 100.0 / total;
        Self {
            completed: round_to(completed * scale, PERCENT_PLACES),
            missed: round_to(missed * scale, PERCENT_PLACES),
            remaining: round_to(remaining * scale, PERCENT_PLACES),
        }
    }

    pub fn total(&self) -> f64 {
        self.completed + self.missed + self.remaining
    }
}

fn graded<T: Weighted>(items: &[T]) -> impl Iterator<Item = (f64, f64)> + '_ {
    items
        .iter()
        .filter(|i| i.is_done())
        .filter_map(|i| i.score().map(|s| (s, i.weight())))
}

/// Weighted mean of the graded portion, re-based to 0..100.
///
/// Returns `None` when no graded weight exists. Unrounded.
pub fn graded_average<T: Weighted>(items: &[T]) -> Option<f64> {
    let (total_weight, total_score) = graded(items)
        .fold((0.0, 0.0), |(w, s), (score, weight)| {
            (w + weight, s + score * weight / 100.0)
        });
    if total_weight == 0.0 {
        return None;
    }
    Some(total_score / (total_weight / 100.0))
}

/// Raw contribution of graded items in parent-weight terms (not re-based).
pub fn achieved_contribution<T: Weighted>(items: &[T]) -> f64 {
    graded(items).map(|(score, weight)| score * weight / 100.0).sum()
}

/// Sum of the weights of items not yet done.
pub fn remaining_weight<T: Weighted>(items: &[T]) -> f64 {
    items
        .iter()
        .filter(|i| !i.is_done())
        .map(|i| i.weight())
        .sum()
}

/// Sum of the weights of done items, whether scored or not.
pub fn done_weight<T: Weighted>(items: &[T]) -> f64 {
    items
        .iter()
        .filter(|i| i.is_done())
        .map(|i| i.weight())
        .sum()
}

pub fn weight_total<T: Weighted>(items: &[T]) -> f64 {
    items.iter().map(|i| i.weight()).sum()
}

/// Whether the weights sum to 100 within [`WEIGHT_TOLERANCE`].
pub fn weights_valid<T: Weighted>(items: &[T]) -> bool {
    (weight_total(items) - 100.0).abs() < WEIGHT_TOLERANCE
}

/// Completed / missed / remaining breakdown, summing to 100 when any weight
/// exists. A done item with no score counts as fully missed.
pub fn segments<T: Weighted>(items: &[T]) -> Segments {
    let mut completed = 0.0;
    let mut missed = 0.0;
    let mut remaining = 0.0;

    for item in items {
        let weight = item.weight();
        if !item.is_done() {
            remaining += weight;
        } else {
            let achieved = item.score().unwrap_or(0.0) / 100.0 * weight;
            completed += achieved;
            missed += weight - achieved;
        }
    }

    Segments::rescaled(completed, missed, remaining)
}

/// Weighted mean of `(value, weight)` pairs normalised by the total weight.
///
/// Used with credits for year averages and with year weights for the final
/// grade. Returns `None` when the total weight is zero.
pub fn weighted_mean<I>(pairs: I) -> Option<f64>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let (total_weight, weighted_sum) = pairs
        .into_iter()
        .fold((0.0, 0.0), |(w, s), (value, weight)| {
            (w + weight, s + value * weight)
        });
    if total_weight == 0.0 {
        return None;
    }
    Some(weighted_sum / total_weight)
}

/// Re-derive an assignment's `score` and `done` from its subtasks.
///
/// Every subtask score contributes regardless of the subtask's own `done`
/// flag; the parent is done only when all subtasks are. The derived score is
/// not clamped. Assignments without subtasks are returned unchanged.
pub fn recalculate_assignment(assignment: Assignment) -> Assignment {
    if !assignment.has_sub_tasks() {
        return assignment;
    }
    let tasks = assignment.sub_tasks.as_deref().unwrap_or_default();

    let weighted_sum: f64 = tasks
        .iter()
        .filter_map(|t| t.score.map(|s| s * t.weight))
        .sum();
    let all_done = tasks.iter().all(|t| t.done);

    Assignment {
        score: Some(round_to(weighted_sum / 100.0, AVERAGE_PLACES)),
        done: all_done,
        ..assignment
    }
}
