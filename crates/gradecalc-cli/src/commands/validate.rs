//! The `gradecalc validate` command.

use std::path::PathBuf;

use anyhow::Result;

use gradecalc_core::validation::validate_snapshot;

use super::Session;

pub fn execute(snapshot: Option<PathBuf>, config: Option<PathBuf>) -> Result<()> {
    let session = Session::open(snapshot, config)?;
    let snapshot = session.load_snapshot()?;

    let module_count: usize = snapshot.years.iter().map(|y| y.modules.len()).sum();
    println!(
        "Snapshot: {} ({} years, {} modules)",
        session.snapshot_path().display(),
        snapshot.years.len(),
        module_count
    );

    let warnings = validate_snapshot(&snapshot);
    for w in &warnings {
        let prefix = w
            .entity_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Snapshot valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
