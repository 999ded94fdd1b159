//! The `kaiwa estimate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use kaiwa_core::estimator;
use kaiwa_core::model::JlptLevel;

pub fn execute(
    text: Option<String>,
    file: Option<PathBuf>,
    target_level: Option<String>,
) -> Result<()> {
    let text = match (text, file) {
        (Some(t), _) => t,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, None) => anyhow::bail!("provide either --text or --file"),
    };

    let target = target_level
        .as_deref()
        .map(|s| s.parse::<JlptLevel>())
        .transpose()?;

    let estimate = estimator::estimate(&text, target);

    println!(
        "Estimated level: {} (confidence {:.0}%)",
        estimate.estimated_level,
        estimate.confidence * 100.0
    );
    if let Some(target) = target {
        if estimate.matches_target {
            println!("Matches target {target}");
        } else {
            println!("Differs from target {target}");
        }
    }

    let mut table = Table::new();
    table.set_header(vec!["Level", "Score"]);
    for level in JlptLevel::strongest_first() {
        let score = estimate.level_scores.get(&level).copied().unwrap_or(0.0);
        table.add_row(vec![Cell::new(level), Cell::new(format!("{score:.1}"))]);
    }
    println!("{table}");

    println!(
        "Text: {} chars, kanji ratio {:.2}",
        estimate.indicators.sentence_length, estimate.indicators.kanji_ratio
    );

    Ok(())
}
