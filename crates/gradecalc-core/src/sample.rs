//! Reference snapshot used by `gradecalc init` and the test suites.

use crate::model::{Assignment, GradeSnapshot, Module, Year};

fn assignment(id: &str, name: &str, weight: f64, score: Option<f64>, done: bool) -> Assignment {
    Assignment {
        id: id.into(),
        name: name.into(),
        weight,
        score,
        done,
        sub_tasks: None,
    }
}

/// Two years weighted 0.2/0.8 with three modules.
///
/// CS101's coursework and CS201's project are still pending. MA101's exam
/// carries a score but is not marked done, so it does not count yet.
pub fn sample_snapshot() -> GradeSnapshot {
    GradeSnapshot {
        years: vec![
            Year {
                id: "year-1".into(),
                name: "Year 1".into(),
                weight: 0.2,
                modules: vec![
                    Module {
                        id: "mod-1".into(),
                        code: "CS101".into(),
                        name: Some("Intro to Programming".into()),
                        credits: 20.0,
                        assignments: vec![
                            assignment("a-1", "Exam", 60.0, Some(75.0), true),
                            assignment("a-2", "Coursework", 40.0, None, false),
                        ],
                    },
                    Module {
                        id: "mod-2".into(),
                        code: "MA101".into(),
                        name: Some("Calculus".into()),
                        credits: 20.0,
                        assignments: vec![assignment("a-3", "Exam", 100.0, Some(68.0), false)],
                    },
                ],
            },
            Year {
                id: "year-2".into(),
                name: "Year 2".into(),
                weight: 0.8,
                modules: vec![Module {
                    id: "mod-3".into(),
                    code: "CS201".into(),
                    name: Some("Data Structures".into()),
                    credits: 20.0,
                    assignments: vec![
                        assignment("a-4", "Exam", 70.0, Some(78.0), true),
                        assignment("a-5", "Project", 30.0, None, false),
                    ],
                }],
            },
        ],
        active_year_id: None,
        desired_grade: None,
    }
}
