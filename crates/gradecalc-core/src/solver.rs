//! Target solver: the minimum average still needed on a module's pending
//! work to reach a desired final grade.
//!
//! The final grade is a credit-weighted, renormalised blend across levels, so
//! there is no closed-form inverse. Instead [`final_if`] is evaluated inside a
//! fixed-length bisection over `[0, 100]`; it is non-decreasing in the
//! hypothetical score because all weights and credits are non-negative.

use serde::{Deserialize, Deserializer, Serialize};

use crate::aggregate::{self, round_to, weighted_mean, PERCENT_PLACES};
use crate::hierarchy::{module_average, year_average};
use crate::model::{Id, Module, Year};

/// Bisection steps. 100 / 2^20 is far below the 0.1 display resolution.
pub const SEARCH_ITERATIONS: u32 = 20;

/// Outcome of solving a module target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetSolution {
    /// Minimum uniform average on pending work, rounded to one decimal.
    Required(f64),
    /// Even 100 on every pending assignment cannot reach the target.
    Infeasible,
    /// The module has no pending weight left.
    FullyGraded,
    /// The year or module does not exist.
    NotFound,
}

impl TargetSolution {
    pub fn required(self) -> Option<f64> {
        match self {
            TargetSolution::Required(x) => Some(x),
            _ => None,
        }
    }
}

/// Requirement reported for one pending assignment.
///
/// Infinite sentinels serialise as `null` and read back as infinity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentTarget {
    pub assignment_id: Id,
    /// Module-level average target, identical for every pending assignment.
    /// `f64::INFINITY` when the module target is infeasible.
    #[serde(deserialize_with = "infinite_if_null")]
    pub required: f64,
    /// Score this assignment alone would need if every other pending
    /// assignment scored zero.
    #[serde(deserialize_with = "infinite_if_null")]
    pub solo_required: f64,
    pub feasible: bool,
}

fn infinite_if_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
}

/// Everything held fixed while the hypothetical score varies.
struct TargetContext<'a> {
    years: &'a [Year],
    year: &'a Year,
    module: &'a Module,
    completed: f64,
    remaining: f64,
}

impl<'a> TargetContext<'a> {
    fn new(years: &'a [Year], year_id: &str, module_id: &str) -> Option<Self> {
        let year = years.iter().find(|y| y.id == year_id)?;
        let module = year.module(module_id)?;
        Some(Self {
            years,
            year,
            module,
            completed: aggregate::achieved_contribution(&module.assignments),
            remaining: aggregate::remaining_weight(&module.assignments),
        })
    }

    fn final_if(&self, x: f64) -> Option<f64> {
        let module_avg = self.completed + x * (self.remaining / 100.0);

        let year_avg = weighted_mean(self.year.modules.iter().filter_map(|m| {
            let avg = if m.id == self.module.id {
                Some(module_avg)
            } else {
                module_average(m)
            };
            avg.map(|a| (a, m.credits))
        }))?;

        weighted_mean(self.years.iter().filter_map(|y| {
            let avg = if y.id == self.year.id {
                Some(year_avg)
            } else {
                year_average(y)
            };
            avg.map(|a| (a, y.weight))
        }))
    }

    fn solve(&self, desired: f64) -> TargetSolution {
        if self.remaining <= 0.0 {
            return TargetSolution::FullyGraded;
        }
        if !self.reaches(100.0, desired) {
            return TargetSolution::Infeasible;
        }

        let (mut lo, mut hi) = (0.0_f64, 100.0_f64);
        for _ in 0..SEARCH_ITERATIONS {
            let mid = (lo + hi) / 2.0;
            if self.reaches(mid, desired) {
                hi = mid;
            } else {
                lo = mid;
            }
        }
        TargetSolution::Required(round_to(hi, PERCENT_PLACES))
    }

    fn reaches(&self, x: f64, desired: f64) -> bool {
        self.final_if(x).is_some_and(|grade| grade >= desired)
    }
}

/// Final grade if every pending assignment of the module averaged `x`, all
/// other modules and years held at their current averages.
///
/// `None` when the ids do not resolve or no weight remains to blend.
pub fn final_if(years: &[Year], year_id: &str, module_id: &str, x: f64) -> Option<f64> {
    TargetContext::new(years, year_id, module_id)?.final_if(x)
}

pub fn solve_module_target(
    years: &[Year],
    year_id: &str,
    module_id: &str,
    desired: f64,
) -> TargetSolution {
    match TargetContext::new(years, year_id, module_id) {
        Some(ctx) => ctx.solve(desired),
        None => TargetSolution::NotFound,
    }
}

/// Minimum average on the module's pending work for the final grade to reach
/// `desired`. `None` when fully graded, infeasible or not found.
pub fn required_module_score(
    years: &[Year],
    year_id: &str,
    module_id: &str,
    desired: f64,
) -> Option<f64> {
    solve_module_target(years, year_id, module_id, desired).required()
}

/// Per-assignment view of the module target, one entry per pending
/// assignment. Empty when the module is fully graded or not found.
pub fn required_per_assignment(
    years: &[Year],
    year_id: &str,
    module_id: &str,
    desired: f64,
) -> Vec<AssignmentTarget> {
    let Some(ctx) = TargetContext::new(years, year_id, module_id) else {
        return Vec::new();
    };
    let pending = ctx.module.assignments.iter().filter(|a| !a.done);

    match ctx.solve(desired) {
        TargetSolution::Required(x) => pending
            .map(|a| {
                let solo_required = solo_requirement(x, ctx.remaining, a.weight);
                AssignmentTarget {
                    assignment_id: a.id.clone(),
                    required: x,
                    solo_required,
                    feasible: solo_required <= 100.0,
                }
            })
            .collect(),
        TargetSolution::Infeasible => pending
            .map(|a| AssignmentTarget {
                assignment_id: a.id.clone(),
                required: f64::INFINITY,
                solo_required: f64::INFINITY,
                feasible: false,
            })
            .collect(),
        TargetSolution::FullyGraded | TargetSolution::NotFound => Vec::new(),
    }
}

/// `x * remaining / weight`, rounded. A zero-weight assignment cannot carry
/// any shortfall.
fn solo_requirement(x: f64, remaining: f64, weight: f64) -> f64 {
    if weight <= 0.0 {
        return if x == 0.0 { 0.0 } else { f64::INFINITY };
    }
    round_to(x * (remaining / weight), PERCENT_PLACES)
}
