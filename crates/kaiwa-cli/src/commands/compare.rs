//! The `kaiwa compare` command.

use std::path::PathBuf;

use anyhow::Result;

use kaiwa_core::report::EvaluationReport;

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    threshold: u32,
    fail_on_regression: bool,
) -> Result<()> {
    let baseline = EvaluationReport::load_json(&baseline_path)?;
    let current = EvaluationReport::load_json(&current_path)?;

    let progress = current.compare(&baseline, threshold);

    println!(
        "Comparison: {} improved, {} regressed, {} unchanged (total {:+})",
        progress.improved.len(),
        progress.regressed.len(),
        progress.unchanged,
        progress.total_delta
    );

    if !progress.improved.is_empty() {
        println!("\nImproved:");
        for d in &progress.improved {
            println!(
                "  {} {} -> {} ({:+})",
                d.skill, d.baseline, d.current, d.delta
            );
        }
    }

    if !progress.regressed.is_empty() {
        println!("\nRegressed:");
        for d in &progress.regressed {
            println!(
                "  {} {} -> {} ({:+})",
                d.skill, d.baseline, d.current, d.delta
            );
        }
    }

    if progress.baseline_level != progress.current_level {
        println!(
            "\nEstimated level: {} -> {}",
            progress.baseline_level, progress.current_level
        );
    }

    if fail_on_regression && !progress.regressed.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}
