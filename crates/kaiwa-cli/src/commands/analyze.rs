//! The `kaiwa analyze` command.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use comfy_table::{Cell, Table};

use kaiwa_core::model::{JlptLevel, Skill};
use kaiwa_core::pipeline::{self, EvaluateOptions};
use kaiwa_core::report::{EvaluationReport, TranscriptSummary};
use kaiwa_core::transcript::{self, Transcript};
use kaiwa_providers::load_config_from;

pub fn execute(
    transcript_path: PathBuf,
    target_level: Option<String>,
    output: Option<PathBuf>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let target_override = target_level
        .as_deref()
        .map(|s| s.parse::<JlptLevel>())
        .transpose()?;

    let config = load_config_from(config_path.as_deref())?;

    let transcripts = if transcript_path.is_dir() {
        transcript::load_transcript_directory(&transcript_path)?
    } else {
        vec![transcript::parse_transcript(&transcript_path)?]
    };

    for mut t in transcripts {
        let options = EvaluateOptions {
            weights: config.scoring.weights,
            weakness_threshold: config.scoring.weakness_threshold,
            target_level: target_override.or(t.target_level),
            context: t.context,
        };

        let start = Instant::now();
        let evaluation = pipeline::evaluate(&mut t.messages, &options)?;
        let duration_ms = start.elapsed().as_millis() as u64;

        let report = EvaluationReport {
            id: uuid::Uuid::new_v4(),
            created_at: chrono::Utc::now(),
            transcript: TranscriptSummary {
                id: t.id.clone(),
                name: t.name.clone(),
                message_count: t.messages.len(),
            },
            target_level: options.target_level,
            composite: evaluation.composite,
            estimate: evaluation.estimate,
            weaknesses: evaluation.weaknesses,
            duration_ms,
        };

        match format.as_str() {
            "json" => println!("{}", serde_json::to_string_pretty(&report)?),
            _ => print_summary(&t, &report),
        }

        if let Some(dir) = &output {
            std::fs::create_dir_all(dir)?;
            let path = dir.join(format!("report-{}.json", t.id));
            report.save_json(&path)?;
            eprintln!("Report saved to: {}", path.display());
        }
    }

    Ok(())
}

fn print_summary(transcript: &Transcript, report: &EvaluationReport) {
    println!(
        "Transcript: {} ({} messages)",
        transcript.name,
        transcript.messages.len()
    );

    let mut table = Table::new();
    table.set_header(vec!["Skill", "Score", ""]);
    for skill in Skill::ALL {
        let score = report.composite.sub_score(skill);
        let flag = if report.weaknesses.contains(&skill) {
            "weak"
        } else {
            ""
        };
        table.add_row(vec![
            Cell::new(skill),
            Cell::new(format!("{score}/100")),
            Cell::new(flag),
        ]);
    }
    table.add_row(vec![
        Cell::new("total"),
        Cell::new(format!("{}/100", report.composite.total)),
        Cell::new(""),
    ]);
    println!("{table}");

    println!(
        "Estimated level: {} (confidence {:.0}%)",
        report.estimate.estimated_level,
        report.estimate.confidence * 100.0
    );
    if let Some(target) = report.target_level {
        let verdict = if report.estimate.matches_target {
            "matches"
        } else {
            "differs from"
        };
        println!("  {verdict} target {target}");
    }
}
