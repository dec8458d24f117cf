//! End-to-end store scenarios: build a record from scratch, persist it,
//! export it and read it back.

use gradecalc_core::classification::Classification;
use gradecalc_core::model::{AssignmentDraft, AssignmentPatch, ModuleDraft, SubTaskDraft, SubTaskPatch};
use gradecalc_core::persistence::{load_snapshot, ExportMode, FileObserver};
use gradecalc_core::solver::{solve_module_target, TargetSolution};
use gradecalc_core::GradeStore;

#[test]
fn build_grade_and_persist() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grades.json");

    let mut store = GradeStore::default();
    store.subscribe(Box::new(FileObserver::new(&path)));

    let year = store.add_year("Year 1", Some(1.0));
    store.set_active_year(Some(year.as_str())).unwrap();
    let module = store
        .add_module(
            &year,
            ModuleDraft {
                code: Some("CS101".into()),
                ..Default::default()
            },
        )
        .unwrap();
    store
        .add_assignment(
            &year,
            &module,
            AssignmentDraft {
                name: Some("Exam".into()),
                weight: Some(60.0),
                score: Some(80.0),
                ..Default::default()
            },
        )
        .unwrap();
    let coursework = store
        .add_assignment(
            &year,
            &module,
            AssignmentDraft {
                name: Some("Coursework".into()),
                weight: Some(40.0),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(store.module_average(&year, &module), Some(80.0));
    assert_eq!(store.module_achieved_score(&year, &module), Some(48.0));
    assert_eq!(store.module_completion_percent(&year, &module), 60.0);
    assert!(store.is_module_valid(&year, &module));
    assert_eq!(store.required_module_score(&year, &module, 70.0), Some(55.0));

    // Grade the coursework through two subtasks.
    let part1 = store
        .add_sub_task(
            &year,
            &module,
            &coursework,
            SubTaskDraft {
                name: Some("Part 1".into()),
                weight: Some(50.0),
                score: Some(60.0),
                done: Some(true),
            },
        )
        .unwrap();
    let part2 = store
        .add_sub_task(
            &year,
            &module,
            &coursework,
            SubTaskDraft {
                name: Some("Part 2".into()),
                weight: Some(50.0),
                ..Default::default()
            },
        )
        .unwrap();

    let cw = &store.snapshot().years[0].modules[0].assignments[1];
    assert_eq!(cw.score, Some(30.0));
    assert!(!cw.done);

    store
        .update_sub_task(
            &year,
            &module,
            &coursework,
            &part2,
            SubTaskPatch {
                score: Some(Some(80.0)),
                done: Some(true),
                ..Default::default()
            },
        )
        .unwrap();

    let cw = &store.snapshot().years[0].modules[0].assignments[1];
    assert_eq!(cw.score, Some(70.0));
    assert!(cw.done);
    assert_eq!(store.module_average(&year, &module), Some(76.0));
    assert_eq!(store.final_grade(), Some(76.0));
    assert_eq!(
        Classification::from_grade(store.final_grade().unwrap()),
        Classification::First
    );

    // Direct score edits do not override derived values.
    store
        .update_assignment(
            &year,
            &module,
            &coursework,
            AssignmentPatch {
                score: Some(Some(10.0)),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(store.module_average(&year, &module), Some(76.0));

    // Every change was written through the observer.
    let saved = load_snapshot(&path).unwrap();
    assert_eq!(&saved, store.snapshot());
    assert_eq!(saved.active_year_id.as_deref(), Some(year.as_str()));
    assert!(saved.years[0].modules[0].assignments[1]
        .sub_tasks
        .as_ref()
        .unwrap()
        .iter()
        .any(|t| t.id == part1));
}

#[test]
fn structure_export_reimports_as_blank_record() {
    let mut store = GradeStore::new(gradecalc_core::sample::sample_snapshot());
    store.set_desired_grade(Some(65.0));

    let json = serde_json::to_string(&store.export(ExportMode::StructureOnly)).unwrap();

    let mut fresh = GradeStore::default();
    fresh.import_json(&json).unwrap();

    assert_eq!(fresh.snapshot().years.len(), 2);
    assert!(fresh.desired_grade().is_none());
    assert!(fresh.final_grade().is_none());
    assert_eq!(fresh.module_average("year-1", "mod-1"), None);
    assert_eq!(fresh.module_completion_percent("year-1", "mod-1"), 0.0);
    assert_eq!(
        solve_module_target(&fresh.snapshot().years, "year-1", "mod-1", 60.0),
        TargetSolution::Required(60.0)
    );
}

#[test]
fn failed_import_keeps_record_and_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grades.json");

    let mut store = GradeStore::new(gradecalc_core::sample::sample_snapshot());
    store.subscribe(Box::new(FileObserver::new(&path)));
    store.set_desired_grade(Some(60.0));
    let before = std::fs::read_to_string(&path).unwrap();

    assert!(store.import_json("not json").is_err());
    assert!(store.import_json(r#"{"version": 2}"#).unwrap_err().is_shape_error());

    assert_eq!(store.final_grade(), Some(77.4));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}
