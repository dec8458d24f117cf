//! The `gradecalc grade` command.

use std::path::PathBuf;

use anyhow::Result;

use gradecalc_core::model::{AssignmentPatch, SubTaskPatch};
use gradecalc_core::persistence::{persisted_view, save_snapshot};
use gradecalc_core::report::fmt_grade;
use gradecalc_core::GradeStore;

use super::Session;

#[allow(clippy::too_many_arguments)]
pub fn execute(
    snapshot: Option<PathBuf>,
    year_id: String,
    module_id: String,
    assignment_id: String,
    sub_task_id: Option<String>,
    score: f64,
    pending: bool,
    config: Option<PathBuf>,
) -> Result<()> {
    anyhow::ensure!(
        (0.0..=100.0).contains(&score),
        "score must be between 0 and 100, got {score}"
    );

    let session = Session::open(snapshot, config)?;
    let mut store = GradeStore::new(session.load_snapshot()?);

    match sub_task_id {
        Some(sub_task_id) => store.update_sub_task(
            &year_id,
            &module_id,
            &assignment_id,
            &sub_task_id,
            SubTaskPatch {
                score: Some(Some(score)),
                done: Some(!pending),
                ..Default::default()
            },
        )?,
        None => {
            // Score and done of an assignment with subtasks are derived.
            let derived = store
                .snapshot()
                .module(&year_id, &module_id)
                .and_then(|m| m.assignments.iter().find(|a| a.id == assignment_id))
                .is_some_and(|a| a.has_sub_tasks());
            if derived {
                anyhow::bail!(
                    "assignment {assignment_id} is scored from its subtasks; pass --sub-task to grade one"
                );
            }
            store.update_assignment(
                &year_id,
                &module_id,
                &assignment_id,
                AssignmentPatch {
                    score: Some(Some(score)),
                    done: Some(!pending),
                    ..Default::default()
                },
            )?
        }
    }

    save_snapshot(&persisted_view(store.snapshot()), session.snapshot_path())?;

    println!(
        "Recorded {score} for {assignment_id}. Module average: {}, final grade: {}",
        fmt_grade(store.module_average(&year_id, &module_id)),
        fmt_grade(store.final_grade())
    );

    Ok(())
}
