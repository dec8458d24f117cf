//! The `gradecalc export` command.

use std::path::{Path, PathBuf};

use anyhow::Result;

use gradecalc_core::persistence::{save_snapshot, ExportMode};
use gradecalc_core::GradeStore;

use super::Session;

pub fn execute(
    snapshot: Option<PathBuf>,
    output: Option<PathBuf>,
    structure_only: bool,
    config: Option<PathBuf>,
) -> Result<()> {
    let session = Session::open(snapshot, config)?;
    let store = GradeStore::new(session.load_snapshot()?);

    let mode = if structure_only {
        ExportMode::StructureOnly
    } else {
        ExportMode::Full
    };
    let output = output.unwrap_or_else(|| default_export_path(&session.config.export_dir, mode));

    save_snapshot(&store.export(mode), &output)?;
    println!("Exported {} snapshot to {}", mode.label(), output.display());

    Ok(())
}

/// `grades-<mode>-<YYYY-MM-DD>.json` inside `dir`.
fn default_export_path(dir: &Path, mode: ExportMode) -> PathBuf {
    let date = chrono::Local::now().format("%Y-%m-%d");
    dir.join(format!("grades-{}-{date}.json", mode.label()))
}
