//! The `gradecalc import` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use gradecalc_core::persistence::{persisted_view, save_snapshot};
use gradecalc_core::{GradeSnapshot, GradeStore};

use super::Session;

pub fn execute(snapshot: Option<PathBuf>, input: PathBuf, config: Option<PathBuf>) -> Result<()> {
    let session = Session::open(snapshot, config)?;
    let content = std::fs::read_to_string(&input)
        .with_context(|| format!("failed to read {}", input.display()))?;

    // A missing snapshot file just means there is nothing to replace yet.
    let current = if session.snapshot_path().exists() {
        session.load_snapshot()?
    } else {
        GradeSnapshot::default()
    };

    let mut store = GradeStore::new(current);
    store
        .import_json(&content)
        .with_context(|| format!("failed to import {}", input.display()))?;
    save_snapshot(&persisted_view(store.snapshot()), session.snapshot_path())?;

    println!(
        "Imported {} year(s) into {}",
        store.snapshot().years.len(),
        session.snapshot_path().display()
    );

    Ok(())
}
