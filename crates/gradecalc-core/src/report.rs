//! Grade report: every derived number for a snapshot in one serialisable
//! value, with markdown rendering.

use serde::{Deserialize, Serialize};

use crate::aggregate::Segments;
use crate::classification::Classification;
use crate::hierarchy;
use crate::model::{GradeSnapshot, Id, Module, Year};
use crate::solver::{self, AssignmentTarget};

/// A complete grade report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeReport {
    pub final_grade: Option<f64>,
    pub classification: Option<Classification>,
    /// Target the module requirements were solved for.
    pub desired_grade: Option<f64>,
    pub year_weights_normalised: bool,
    pub years: Vec<YearReport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearReport {
    pub id: Id,
    pub name: String,
    pub weight: f64,
    pub average: Option<f64>,
    pub segments: Segments,
    pub valid: bool,
    pub modules: Vec<ModuleReport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleReport {
    pub id: Id,
    pub code: String,
    pub name: Option<String>,
    pub credits: f64,
    pub average: Option<f64>,
    pub achieved_score: f64,
    pub completion_percent: f64,
    pub segments: Segments,
    pub valid: bool,
    /// Present when a desired grade was given and work is still pending.
    pub target: Option<ModuleTarget>,
}

/// What the module's pending work needs for the desired grade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleTarget {
    /// `None` when even perfect scores fall short.
    pub required: Option<f64>,
    pub assignments: Vec<AssignmentTarget>,
}

impl GradeReport {
    /// Build a report, solving targets against `desired` when given.
    pub fn build(snapshot: &GradeSnapshot, desired: Option<f64>) -> Self {
        let years = snapshot
            .years
            .iter()
            .map(|y| year_report(&snapshot.years, y, desired))
            .collect();
        let final_grade = hierarchy::final_grade(&snapshot.years);

        Self {
            final_grade,
            classification: final_grade.map(Classification::from_grade),
            desired_grade: desired,
            year_weights_normalised: hierarchy::year_weights_normalised(&snapshot.years),
            years,
        }
    }

    /// Returns true if any module's weights do not sum to 100.
    pub fn has_invalid_modules(&self) -> bool {
        self.years.iter().any(|y| !y.valid)
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Final grade:** {} ({})\n\n",
            fmt_grade(self.final_grade),
            self.classification
                .map_or_else(|| "—".to_string(), |c| c.to_string())
        ));
        if let Some(desired) = self.desired_grade {
            md.push_str(&format!(
                "**Desired grade:** {desired} ({})\n\n",
                Classification::from_grade(desired)
            ));
        }
        if self.has_invalid_modules() {
            md.push_str("> Some modules have assignment weights that do not sum to 100%.\n\n");
        }
        if !self.year_weights_normalised {
            md.push_str("> Year weights do not sum to 1. They are normalised for the final grade.\n\n");
        }

        for year in &self.years {
            md.push_str(&format!(
                "### {} (weight {}, average {})\n\n",
                year.name,
                year.weight,
                fmt_grade(year.average)
            ));
            md.push_str("| Module | Credits | Average | Completed | Missed | Remaining | Required |\n");
            md.push_str("|--------|---------|---------|-----------|--------|-----------|----------|\n");
            for m in &year.modules {
                let required = match &m.target {
                    Some(ModuleTarget {
                        required: Some(x), ..
                    }) => format!("{x:.1}"),
                    Some(ModuleTarget { required: None, .. }) => "unreachable".to_string(),
                    None => "—".to_string(),
                };
                md.push_str(&format!(
                    "| {}{} | {} | {} | {:.1}% | {:.1}% | {:.1}% | {} |\n",
                    m.code,
                    if m.valid { "" } else { " ⚠" },
                    m.credits,
                    fmt_grade(m.average),
                    m.segments.completed,
                    m.segments.missed,
                    m.segments.remaining,
                    required
                ));
            }
            md.push('\n');
        }

        md
    }
}

fn year_report(years: &[Year], year: &Year, desired: Option<f64>) -> YearReport {
    YearReport {
        id: year.id.clone(),
        name: year.name.clone(),
        weight: year.weight,
        average: hierarchy::year_average(year),
        segments: hierarchy::year_segments(year),
        valid: hierarchy::year_is_valid(year),
        modules: year
            .modules
            .iter()
            .map(|m| module_report(years, year, m, desired))
            .collect(),
    }
}

fn module_report(years: &[Year], year: &Year, module: &Module, desired: Option<f64>) -> ModuleReport {
    let target = desired
        .filter(|_| hierarchy::module_remaining_weight(module) > 0.0)
        .map(|d| ModuleTarget {
            required: solver::required_module_score(years, &year.id, &module.id, d),
            assignments: solver::required_per_assignment(years, &year.id, &module.id, d),
        });

    ModuleReport {
        id: module.id.clone(),
        code: module.code.clone(),
        name: module.name.clone(),
        credits: module.credits,
        average: hierarchy::module_average(module),
        achieved_score: hierarchy::module_achieved_score(module),
        completion_percent: hierarchy::module_completion_percent(module),
        segments: hierarchy::module_segments(module),
        valid: hierarchy::module_is_valid(module),
        target,
    }
}

/// Two-decimal grade or `—`.
pub fn fmt_grade(grade: Option<f64>) -> String {
    grade.map_or_else(|| "—".to_string(), |g| format!("{g:.2}"))
}
