//! Evaluation reports with JSON persistence and progress comparison.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::estimator::LevelEstimate;
use crate::model::{CompositeScore, JlptLevel, Skill};

/// A complete evaluation report for one conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Summary of the evaluated transcript.
    pub transcript: TranscriptSummary,
    /// Level the learner was studying toward, if any.
    pub target_level: Option<JlptLevel>,
    pub composite: CompositeScore,
    pub estimate: LevelEstimate,
    pub weaknesses: Vec<Skill>,
    /// Wall-clock evaluation duration in milliseconds.
    pub duration_ms: u64,
}

/// Summary of a transcript (without the full turns).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSummary {
    pub id: String,
    pub name: String,
    pub message_count: usize,
}

impl EvaluationReport {
    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: EvaluationReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Compare this report against an earlier baseline.
    ///
    /// A sub-score delta beyond `threshold` points counts as improvement or
    /// regression; smaller movements are reported as unchanged.
    pub fn compare(&self, baseline: &EvaluationReport, threshold: u32) -> ProgressReport {
        let mut improved = Vec::new();
        let mut regressed = Vec::new();
        let mut unchanged = 0usize;

        for skill in Skill::ALL {
            let before = baseline.composite.sub_score(skill);
            let after = self.composite.sub_score(skill);
            let delta = after as i64 - before as i64;
            if delta > threshold as i64 {
                improved.push(SkillDelta {
                    skill,
                    baseline: before,
                    current: after,
                    delta,
                });
            } else if delta < -(threshold as i64) {
                regressed.push(SkillDelta {
                    skill,
                    baseline: before,
                    current: after,
                    delta,
                });
            } else {
                unchanged += 1;
            }
        }

        ProgressReport {
            improved,
            regressed,
            unchanged,
            baseline_level: baseline.estimate.estimated_level,
            current_level: self.estimate.estimated_level,
            total_delta: self.composite.total as i64 - baseline.composite.total as i64,
        }
    }
}

/// One skill's movement between two reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillDelta {
    pub skill: Skill,
    pub baseline: u32,
    pub current: u32,
    pub delta: i64,
}

/// Learner progress between two evaluation reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
    pub improved: Vec<SkillDelta>,
    pub regressed: Vec<SkillDelta>,
    pub unchanged: usize,
    pub baseline_level: JlptLevel,
    pub current_level: JlptLevel,
    pub total_delta: i64,
}

impl ProgressReport {
    /// Whether the estimated level moved up the ladder.
    pub fn level_advanced(&self) -> bool {
        self.current_level > self.baseline_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator;

    fn sample_report(composite: CompositeScore, text: &str) -> EvaluationReport {
        EvaluationReport {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            transcript: TranscriptSummary {
                id: "t-1".into(),
                name: "Sample".into(),
                message_count: 2,
            },
            target_level: Some(JlptLevel::N4),
            composite,
            estimate: estimator::estimate(text, None),
            weaknesses: vec![],
            duration_ms: 3,
        }
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");
        let report = sample_report(
            CompositeScore {
                grammar: 80,
                vocabulary: 75,
                fluency: 90,
                naturalness: 70,
                total: 79,
            },
            "私は学生です",
        );
        report.save_json(&path).unwrap();

        let loaded = EvaluationReport::load_json(&path).unwrap();
        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.composite, report.composite);
        assert_eq!(loaded.target_level, Some(JlptLevel::N4));
        assert_eq!(
            loaded.estimate.estimated_level,
            report.estimate.estimated_level
        );
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = EvaluationReport::load_json(Path::new("/nonexistent/report.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/report.json"));
    }

    #[test]
    fn compare_classifies_skill_movement() {
        let baseline = sample_report(
            CompositeScore {
                grammar: 60,
                vocabulary: 70,
                fluency: 80,
                naturalness: 70,
                total: 69,
            },
            "学校に行く",
        );
        let current = sample_report(
            CompositeScore {
                grammar: 75,
                vocabulary: 72,
                fluency: 60,
                naturalness: 70,
                total: 70,
            },
            "私は学校に行きます。準備について説明します。",
        );

        let progress = current.compare(&baseline, 5);
        assert_eq!(progress.improved.len(), 1);
        assert_eq!(progress.improved[0].skill, Skill::Grammar);
        assert_eq!(progress.improved[0].delta, 15);
        assert_eq!(progress.regressed.len(), 1);
        assert_eq!(progress.regressed[0].skill, Skill::Fluency);
        assert_eq!(progress.unchanged, 2);
        assert_eq!(progress.total_delta, 1);
    }

    #[test]
    fn level_advancement() {
        let baseline = sample_report(CompositeScore::default(), "私は学生です");
        let mut current = sample_report(CompositeScore::default(), "私は学生です");
        current.estimate.estimated_level = JlptLevel::N2;

        let progress = current.compare(&baseline, 5);
        assert!(progress.level_advanced());
        assert_eq!(progress.baseline_level, baseline.estimate.estimated_level);
    }
}
