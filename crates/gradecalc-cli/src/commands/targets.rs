//! The `gradecalc targets` command.

use std::path::PathBuf;

use anyhow::Result;

use gradecalc_core::classification::Classification;
use gradecalc_core::solver::{self, TargetSolution};

use super::Session;

pub fn execute(
    snapshot: Option<PathBuf>,
    year_id: String,
    module_id: String,
    desired: Option<String>,
    config: Option<PathBuf>,
) -> Result<()> {
    let session = Session::open(snapshot, config)?;
    let snapshot = session.load_snapshot()?;
    let Some(desired) = session.desired_grade(desired.as_deref(), &snapshot)? else {
        anyhow::bail!("no desired grade: pass --desired or set desired_grade in gradecalc.toml");
    };

    let module = snapshot
        .module(&year_id, &module_id)
        .ok_or_else(|| anyhow::anyhow!("module not found: {module_id} (year {year_id})"))?;

    println!(
        "{} towards a final grade of {desired} ({})",
        module.code,
        Classification::from_grade(desired)
    );

    match solver::solve_module_target(&snapshot.years, &year_id, &module_id, desired) {
        TargetSolution::Required(x) => {
            println!("Required average on remaining work: {x:.1}");
        }
        TargetSolution::Infeasible => {
            println!("Not achievable: 100 on all remaining work still falls short.");
        }
        TargetSolution::FullyGraded => {
            println!("Module is fully graded, nothing left to target.");
            return Ok(());
        }
        TargetSolution::NotFound => {
            anyhow::bail!("module not found: {module_id} (year {year_id})");
        }
    }

    let targets = solver::required_per_assignment(&snapshot.years, &year_id, &module_id, desired);
    for target in &targets {
        let name = module
            .assignments
            .iter()
            .find(|a| a.id == target.assignment_id)
            .map_or(target.assignment_id.as_str(), |a| a.name.as_str());
        if target.solo_required.is_finite() {
            println!(
                "  {name}: {:.1} alone{}",
                target.solo_required,
                if target.feasible { "" } else { " (not feasible)" }
            );
        } else {
            println!("  {name}: unreachable");
        }
    }

    Ok(())
}
