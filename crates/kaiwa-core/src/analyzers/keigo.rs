//! Keigo (敬語) analyzer.
//!
//! Matches text against the three honorific tiers and scores register
//! appropriateness for an optional formal/casual context.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::SpeechContext;
use crate::patterns::{
    FORMAL_SUBSTITUTIONS, KENJOUGO_PATTERNS, SONKEIGO_PATTERNS, TEINEIGO_PATTERNS,
};

use super::finalize_score;

/// The three honorific tiers, weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeigoType {
    /// Polite copula (丁寧語).
    Teineigo,
    /// Humble register (謙譲語).
    Kenjougo,
    /// Respectful register (尊敬語).
    Sonkeigo,
}

impl KeigoType {
    fn patterns(self) -> &'static [&'static str] {
        match self {
            KeigoType::Sonkeigo => SONKEIGO_PATTERNS,
            KeigoType::Kenjougo => KENJOUGO_PATTERNS,
            KeigoType::Teineigo => TEINEIGO_PATTERNS,
        }
    }
}

impl fmt::Display for KeigoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeigoType::Teineigo => write!(f, "teineigo"),
            KeigoType::Kenjougo => write!(f, "kenjougo"),
            KeigoType::Sonkeigo => write!(f, "sonkeigo"),
        }
    }
}

/// Result of keigo analysis for one text unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeigoResult {
    /// Score in [0.0, 10.0], one decimal.
    pub score: f64,
    pub has_keigo: bool,
    /// Honorific tiers detected, in sonkeigo/kenjougo/teineigo scan order.
    pub keigo_types: Vec<KeigoType>,
    pub errors: Vec<String>,
    pub suggestions: Vec<String>,
    /// The register context the analysis was performed against.
    pub context: Option<SpeechContext>,
}

/// Analyze keigo usage in one text unit.
pub fn analyze(text: &str, context: Option<SpeechContext>) -> KeigoResult {
    let text = text.trim();
    if text.is_empty() {
        return KeigoResult {
            score: 0.0,
            has_keigo: false,
            keigo_types: Vec::new(),
            errors: Vec::new(),
            suggestions: Vec::new(),
            context,
        };
    }

    let mut keigo_types = Vec::new();
    for tier in [KeigoType::Sonkeigo, KeigoType::Kenjougo, KeigoType::Teineigo] {
        if tier.patterns().iter().any(|p| text.contains(p)) {
            keigo_types.push(tier);
        }
    }

    let mut errors = Vec::new();
    let mut suggestions = Vec::new();

    if context == Some(SpeechContext::Formal) {
        for (plain, formal) in FORMAL_SUBSTITUTIONS {
            if text.contains(plain) {
                errors.push(format!(
                    "Consider using '{formal}' instead of '{plain}' in formal context"
                ));
                suggestions.push(format!("Replace '{plain}' with '{formal}'"));
            }
        }
    }

    let has_keigo = !keigo_types.is_empty();
    let sonkeigo = keigo_types.contains(&KeigoType::Sonkeigo);

    let score = if has_keigo {
        let mut score = 7.0;
        if keigo_types.len() > 1 {
            score += 1.0;
        }
        score -= 0.5 * errors.len() as f64;
        match context {
            Some(SpeechContext::Formal) if sonkeigo => score += 1.0,
            Some(SpeechContext::Casual) if sonkeigo => score -= 1.0,
            _ => {}
        }
        score
    } else if context == Some(SpeechContext::Formal) {
        errors.push("Formal context may require keigo".to_string());
        suggestions.push("Consider using です/ます form or honorific language".to_string());
        5.0
    } else {
        // No keigo in a casual or unspecified context is fine.
        8.0
    };

    KeigoResult {
        score: finalize_score(score),
        has_keigo,
        keigo_types,
        errors,
        suggestions,
        context,
    }
}

/// The strongest honorific tier present, or `None` for plain speech.
pub fn detect_keigo_level(text: &str) -> Option<KeigoType> {
    analyze(text, None).keigo_types.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_zero_result() {
        let result = analyze("", Some(SpeechContext::Formal));
        assert_eq!(result.score, 0.0);
        assert!(!result.has_keigo);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn teineigo_alone_scores_base() {
        let result = analyze("今日は暑いですね", None);
        assert!(result.has_keigo);
        assert_eq!(result.keigo_types, vec![KeigoType::Teineigo]);
        assert_eq!(result.score, 7.0);
    }

    #[test]
    fn multiple_tiers_earn_bonus() {
        // Sonkeigo (いらっしゃる) + teineigo (です ending).
        let result = analyze("先生はいらっしゃるそうです", None);
        assert!(result.keigo_types.len() > 1);
        assert_eq!(result.score, 8.0);
    }

    #[test]
    fn sonkeigo_appropriate_in_formal_context() {
        let result = analyze("先生がご覧になる", Some(SpeechContext::Formal));
        assert!(result.keigo_types.contains(&KeigoType::Sonkeigo));
        // 7.0 base + 1.0 context bonus, no substitution mistakes.
        assert_eq!(result.score, 8.0);
    }

    #[test]
    fn sonkeigo_penalized_in_casual_context() {
        let result = analyze("先生がご覧になる", Some(SpeechContext::Casual));
        assert_eq!(result.score, 6.0);
    }

    #[test]
    fn formal_substitution_mistakes_cost_half_point() {
        // です in formal context flags a substitution; ます is absent.
        let result = analyze("これです、ご覧になってください", Some(SpeechContext::Formal));
        assert!(result
            .errors
            .iter()
            .any(|e| e.contains("でございます")));
    }

    #[test]
    fn no_keigo_formal_context_suggests_honorifics() {
        let result = analyze("これ、いいね", Some(SpeechContext::Formal));
        assert!(!result.has_keigo);
        assert_eq!(result.score, 5.0);
        assert!(result.errors.iter().any(|e| e.contains("Formal context")));
    }

    #[test]
    fn no_keigo_casual_context_is_fine() {
        let result = analyze("これ、いいね", Some(SpeechContext::Casual));
        assert_eq!(result.score, 8.0);
        assert!(result.errors.is_empty());

        let unspecified = analyze("これ、いいね", None);
        assert_eq!(unspecified.score, 8.0);
    }

    #[test]
    fn detect_level_picks_strongest_tier() {
        assert_eq!(
            detect_keigo_level("召し上がる"),
            Some(KeigoType::Sonkeigo)
        );
        // Kenjougo outranks the teineigo ending in the same sentence.
        assert_eq!(
            detect_keigo_level("拝見するつもりです"),
            Some(KeigoType::Kenjougo)
        );
        assert_eq!(detect_keigo_level("学生です"), Some(KeigoType::Teineigo));
        assert_eq!(detect_keigo_level("これ、いいね"), None);
    }
}
