//! The `gradecalc init` command.

use anyhow::Result;

use gradecalc_core::persistence::save_snapshot;
use gradecalc_core::sample::sample_snapshot;

pub fn execute() -> Result<()> {
    // Create gradecalc.toml
    if std::path::Path::new("gradecalc.toml").exists() {
        println!("gradecalc.toml already exists, skipping.");
    } else {
        std::fs::write("gradecalc.toml", SAMPLE_CONFIG)?;
        println!("Created gradecalc.toml");
    }

    // Create sample snapshot
    let snapshot_path = std::path::Path::new("grades.json");
    if snapshot_path.exists() {
        println!("grades.json already exists, skipping.");
    } else {
        save_snapshot(&sample_snapshot(), snapshot_path)?;
        println!("Created grades.json");
    }

    println!("\nNext steps:");
    println!("  1. Edit grades.json with your own years, modules and assignments");
    println!("  2. Run: gradecalc validate");
    println!("  3. Run: gradecalc summary --desired 2:1");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gradecalc configuration

# Snapshot file used when --snapshot is not given
snapshot_path = "grades.json"

# Directory for `gradecalc export` when --output is not given
export_dir = "."

# Default target for `summary` and `targets`
# desired_grade = 60.0
"#;
