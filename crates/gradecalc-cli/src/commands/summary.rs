//! The `gradecalc summary` command.

use std::path::PathBuf;

use anyhow::Result;

use gradecalc_core::classification::classify;
use gradecalc_core::report::{fmt_grade, GradeReport, ModuleTarget};

use super::Session;

pub fn execute(
    snapshot: Option<PathBuf>,
    desired: Option<String>,
    format: String,
    config: Option<PathBuf>,
) -> Result<()> {
    let session = Session::open(snapshot, config)?;
    let snapshot = session.load_snapshot()?;
    let desired = session.desired_grade(desired.as_deref(), &snapshot)?;

    let report = GradeReport::build(&snapshot, desired);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => print_text(&report),
    }

    Ok(())
}

fn print_text(report: &GradeReport) {
    use comfy_table::{Cell, Table};

    println!(
        "Final grade: {} ({})",
        fmt_grade(report.final_grade),
        classify(report.final_grade)
    );
    if let Some(desired) = report.desired_grade {
        println!("Desired grade: {desired}");
    }
    if !report.year_weights_normalised {
        println!("Note: year weights do not sum to 1, normalising.");
    }

    for year in &report.years {
        println!(
            "\n{} (weight {}, average {})",
            year.name,
            year.weight,
            fmt_grade(year.average)
        );

        let mut table = Table::new();
        let mut header = vec![
            "Module",
            "Credits",
            "Average",
            "Achieved",
            "Done",
            "Completed",
            "Missed",
            "Remaining",
        ];
        if report.desired_grade.is_some() {
            header.push("Required");
        }
        table.set_header(header);

        for m in &year.modules {
            let code = if m.valid {
                m.code.clone()
            } else {
                format!("{} (weights != 100%)", m.code)
            };
            let mut row = vec![
                Cell::new(code),
                Cell::new(m.credits),
                Cell::new(fmt_grade(m.average)),
                Cell::new(format!("{:.2}", m.achieved_score)),
                Cell::new(format!("{}%", m.completion_percent)),
                Cell::new(format!("{:.1}%", m.segments.completed)),
                Cell::new(format!("{:.1}%", m.segments.missed)),
                Cell::new(format!("{:.1}%", m.segments.remaining)),
            ];
            if report.desired_grade.is_some() {
                let required = match &m.target {
                    Some(ModuleTarget {
                        required: Some(x), ..
                    }) => format!("{x:.1}"),
                    Some(ModuleTarget { required: None, .. }) => "unreachable".to_string(),
                    None => "—".to_string(),
                };
                row.push(Cell::new(required));
            }
            table.add_row(row);
        }

        println!("{table}");
    }
}
