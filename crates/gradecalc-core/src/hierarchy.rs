//! Module, year and final-grade selectors.
//!
//! Assignments weigh by percentage inside a module, modules weigh by credits
//! inside a year, and years weigh by their configured weight in the final
//! grade. Levels with no graded work drop out of their parent's aggregate
//! instead of counting as zero.

use crate::aggregate::{self, round_to, weighted_mean, Segments, AVERAGE_PLACES};
use crate::model::{Module, Year};

/// Tolerance for the "year weights sum to 1" check.
pub const YEAR_WEIGHT_TOLERANCE: f64 = 1e-3;

// ---------------------------------------------------------------------------
// Module level
// ---------------------------------------------------------------------------

/// Performance on graded work, re-based to 0..100. `None` with no graded
/// assignments.
pub fn module_average(module: &Module) -> Option<f64> {
    aggregate::graded_average(&module.assignments).map(|avg| round_to(avg, AVERAGE_PLACES))
}

/// Share of the whole module secured so far (contributions are not
/// re-based, unlike [`module_average`]).
pub fn module_achieved_score(module: &Module) -> f64 {
    round_to(
        aggregate::achieved_contribution(&module.assignments),
        AVERAGE_PLACES,
    )
}

/// Weight of done assignments, rounded to a whole percent.
pub fn module_completion_percent(module: &Module) -> f64 {
    aggregate::done_weight(&module.assignments).round()
}

pub fn module_segments(module: &Module) -> Segments {
    aggregate::segments(&module.assignments)
}

/// Whether assignment weights sum to 100. Reported only, never enforced.
pub fn module_is_valid(module: &Module) -> bool {
    aggregate::weights_valid(&module.assignments)
}

/// Weight of assignments that are not yet done.
pub fn module_remaining_weight(module: &Module) -> f64 {
    aggregate::remaining_weight(&module.assignments)
}

// ---------------------------------------------------------------------------
// Year level
// ---------------------------------------------------------------------------

/// Credit-weighted mean of the module averages that are defined.
pub fn year_average(year: &Year) -> Option<f64> {
    let pairs = year
        .modules
        .iter()
        .filter_map(|m| module_average(m).map(|avg| (avg, m.credits)));
    weighted_mean(pairs).map(|avg| round_to(avg, AVERAGE_PLACES))
}

/// Module segments blended by each module's credit share.
pub fn year_segments(year: &Year) -> Segments {
    let total_credits: f64 = year.modules.iter().map(|m| m.credits).sum();
    if total_credits == 0.0 {
        return Segments::EMPTY;
    }

    let (mut completed, mut missed, mut remaining) = (0.0, 0.0, 0.0);
    for module in &year.modules {
        // seg.* are percentages of the module (sum = 100)
        let seg = module_segments(module);
        completed += seg.completed / 100.0 * module.credits;
        missed += seg.missed / 100.0 * module.credits;
        remaining += seg.remaining / 100.0 * module.credits;
    }

    Segments::rescaled(completed, missed, remaining)
}

/// Whether every module in the year has valid weights.
pub fn year_is_valid(year: &Year) -> bool {
    year.modules.iter().all(module_is_valid)
}

// ---------------------------------------------------------------------------
// Final grade
// ---------------------------------------------------------------------------

/// Year-weighted mean of the defined year averages, renormalised over the
/// years that have one.
pub fn final_grade(years: &[Year]) -> Option<f64> {
    let pairs = years
        .iter()
        .filter_map(|y| year_average(y).map(|avg| (avg, y.weight)));
    weighted_mean(pairs).map(|grade| round_to(grade, AVERAGE_PLACES))
}

pub fn year_weight_total(years: &[Year]) -> f64 {
    years.iter().map(|y| y.weight).sum()
}

/// Whether year weights sum to 1. The final grade renormalises either way.
pub fn year_weights_normalised(years: &[Year]) -> bool {
    (year_weight_total(years) - 1.0).abs() <= YEAR_WEIGHT_TOLERANCE
}
