//! Particle (助詞) analyzer.
//!
//! Extracts the particles present in a text unit and checks for doubled
//! particles, confusable-pair overuse, and the potential-form object-marker
//! mistake (を with a potential verb where が is required).

use serde::{Deserialize, Serialize};

use crate::patterns::{PARTICLE_MARKERS, POTENTIAL_VERB_STEMS};

use super::finalize_score;

const BASE_SCORE: f64 = 10.0;
const ERROR_PENALTY: f64 = 2.0;

/// Result of particle analysis for one text unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleResult {
    /// Score in [0.0, 10.0]: 10.0 minus 2.0 per detected error, clamped.
    pub score: f64,
    pub errors: Vec<String>,
    pub suggestions: Vec<String>,
    /// Distinct particles found, in first-seen order.
    pub detected_particles: Vec<char>,
    pub particle_count: usize,
}

/// Analyze particle usage in one text unit.
pub fn analyze(text: &str) -> ParticleResult {
    let text = text.trim();
    if text.is_empty() {
        return ParticleResult {
            score: 0.0,
            errors: Vec::new(),
            suggestions: Vec::new(),
            detected_particles: Vec::new(),
            particle_count: 0,
        };
    }

    let chars: Vec<char> = text.chars().collect();
    let mut errors = Vec::new();
    let mut suggestions = Vec::new();

    let mut detected: Vec<char> = Vec::new();
    for &c in &chars {
        if PARTICLE_MARKERS.contains(&c) && !detected.contains(&c) {
            detected.push(c);
        }
    }

    let count_of = |p: char| chars.iter().filter(|&&c| c == p).count();

    // は/が confusion: both present and either used more than twice.
    let wa = count_of('は');
    let ga = count_of('が');
    if wa > 0 && ga > 0 && (wa > 2 || ga > 2) {
        errors.push("は/が: Multiple uses may indicate confusion".to_string());
        suggestions.push("Review は (topic) vs が (subject/emphasis) usage".to_string());
    }

    // に/で confusion, same rule.
    let ni = count_of('に');
    let de = count_of('で');
    if ni > 0 && de > 0 && (ni > 2 || de > 2) {
        errors.push("に/で: Multiple uses may indicate confusion".to_string());
        suggestions.push("に for existence/destination, で for action location".to_string());
    }

    // Doubled particles: the same marker twice in direct succession, one
    // error per distinct marker.
    let mut doubled: Vec<char> = Vec::new();
    for window in chars.windows(2) {
        if window[0] == window[1]
            && PARTICLE_MARKERS.contains(&window[0])
            && !doubled.contains(&window[0])
        {
            doubled.push(window[0]);
        }
    }
    for p in doubled {
        errors.push(format!("Double particle \"{p}{p}\" detected"));
        suggestions.push(format!("Remove duplicate \"{p}\""));
    }

    // Potential-form verbs (e.g. 話せる/読める family written as stem + ける)
    // take が as their object marker, not を.
    let has_potential_form = chars
        .windows(3)
        .any(|w| POTENTIAL_VERB_STEMS.contains(&w[0]) && w[1] == 'け' && w[2] == 'る');
    if has_potential_form && chars.contains(&'を') && !chars.contains(&'が') {
        errors.push("を/が: Potential form verbs should use が instead of を".to_string());
        suggestions.push("Use が with potential form verbs (e.g. 日本語が話せます)".to_string());
    }

    let score = BASE_SCORE - ERROR_PENALTY * errors.len() as f64;

    ParticleResult {
        score: finalize_score(score),
        errors,
        suggestions,
        particle_count: detected.len(),
        detected_particles: detected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_zero_result() {
        let result = analyze("");
        assert_eq!(result.score, 0.0);
        assert!(result.detected_particles.is_empty());
        assert_eq!(result.particle_count, 0);
    }

    #[test]
    fn clean_sentence_scores_full() {
        let result = analyze("私は学校に行きます");
        assert_eq!(result.score, 10.0);
        assert!(result.errors.is_empty());
        assert!(result.detected_particles.contains(&'は'));
        assert!(result.detected_particles.contains(&'に'));
    }

    #[test]
    fn detected_particles_deduplicated_in_order() {
        let result = analyze("ははにに");
        // Dedup keeps first-seen order.
        assert_eq!(result.detected_particles, vec!['は', 'に']);
        assert_eq!(result.particle_count, 2);
    }

    #[test]
    fn double_particle_costs_two_points_each() {
        let result = analyze("私はは本を読みます");
        assert!(result
            .errors
            .iter()
            .any(|e| e.contains("Double particle \"はは\"")));
        assert_eq!(result.score, 8.0);

        // Two distinct doubled markers: two errors, four points.
        let result = analyze("私はは本を読む がが");
        let doubles = result
            .errors
            .iter()
            .filter(|e| e.contains("Double particle"))
            .count();
        assert_eq!(doubles, 2);
    }

    #[test]
    fn repeated_double_of_same_marker_counts_once() {
        let result = analyze("はは そして はは");
        let doubles = result
            .errors
            .iter()
            .filter(|e| e.contains("Double particle"))
            .count();
        assert_eq!(doubles, 1);
        assert_eq!(result.score, 8.0);
    }

    #[test]
    fn wa_ga_overuse_flagged() {
        let result = analyze("私は犬が猫が魚が好き");
        assert!(result.errors.iter().any(|e| e.starts_with("は/が")));
    }

    #[test]
    fn potential_form_with_wrong_object_marker() {
        let result = analyze("日本語を話けるようになりたい");
        assert!(result.errors.iter().any(|e| e.starts_with("を/が")));
        assert!(result
            .suggestions
            .iter()
            .any(|s| s.contains("日本語が話せます")));
    }

    #[test]
    fn potential_form_with_ga_not_flagged() {
        let result = analyze("日本語が話けるようになった");
        assert!(!result.errors.iter().any(|e| e.starts_with("を/が")));
    }

    #[test]
    fn score_never_negative() {
        // Many distinct doubled particles drive the raw score below zero.
        let result = analyze("ははがが をを にに でで へへ とと やや");
        assert_eq!(result.score, 0.0);
    }
}
