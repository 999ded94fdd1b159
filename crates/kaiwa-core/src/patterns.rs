//! Immutable pattern tables keyed by JLPT level.
//!
//! All analysis is substring-based: the tables hold literal Japanese text
//! fragments, not regular expressions. Grammar patterns are stored without
//! the dictionary attachment placeholder (〜) since learner text never
//! contains it.

use crate::model::JlptLevel;

/// Polite-register sentence endings.
pub const POLITE_MARKERS: [&str; 2] = ["です", "ます"];

/// Doubled-particle substrings flagged by the grammar analyzer.
pub const DOUBLED_PARTICLE_ERRORS: [&str; 2] = ["はは", "がが"];

/// Single-character grammatical particles (助詞) the particle analyzer
/// extracts and checks.
pub const PARTICLE_MARKERS: [char; 13] = [
    'は', 'が', 'を', 'に', 'で', 'へ', 'と', 'や', 'か', 'ら', 'ま', 'よ', 'り',
];

/// Verb stems whose potential form (stem + ける) takes が, not を.
pub const POTENTIAL_VERB_STEMS: [char; 5] = ['見', '聞', '読', '書', '話'];

/// Respectful-register (尊敬語) patterns.
pub const SONKEIGO_PATTERNS: &[&str] = &[
    "いらっしゃる",
    "おっしゃる",
    "なさる",
    "くださる",
    "召し上がる",
    "ご覧になる",
    "おいでになる",
];

/// Humble-register (謙譲語) patterns.
pub const KENJOUGO_PATTERNS: &[&str] = &[
    "いたす",
    "申し上げる",
    "いただく",
    "拝見する",
    "お目にかかる",
    "存じる",
    "参る",
];

/// Polite-copula (丁寧語) patterns.
pub const TEINEIGO_PATTERNS: &[&str] = &["です", "ます", "ございます", "でございます"];

/// Register substitutions expected in formal contexts: (plain, formal).
pub const FORMAL_SUBSTITUTIONS: [(&str, &str); 2] =
    [("です", "でございます"), ("ます", "いたします")];

/// Grammar patterns per level. One point each in the level estimator.
pub fn grammar_patterns(level: JlptLevel) -> &'static [&'static str] {
    match level {
        JlptLevel::N5 => &[
            "です", "ます", "だ", "である", "は", "が", "を", "に", "で", "たい", "ない",
            "た", "ている",
        ],
        JlptLevel::N4 => &[
            "てください",
            "てもいい",
            "てはいけない",
            "なければならない",
            "ほうがいい",
            "ので",
            "から",
            "が",
            "けど",
            "ようだ",
            "そうだ",
            "らしい",
        ],
        JlptLevel::N3 => &[
            "ば",
            "なら",
            "たら",
            "ところ",
            "ばかり",
            "だけ",
            "によって",
            "について",
            "に対して",
            "ように",
            "ために",
            "のに",
        ],
        JlptLevel::N2 => &[
            "ばかりか",
            "どころか",
            "ばかりでなく",
            "に限らず",
            "に応じて",
            "に伴って",
            "に加えて",
            "に代わって",
            "に基づいて",
            "に従って",
            "に沿って",
            "に反して",
        ],
        JlptLevel::N1 => &[
            "を余儀なくされる",
            "を禁じ得ない",
            "に越したことはない",
            "に足る",
            "をものともせず",
            "をよそに",
            "を皮切りに",
            "を機に",
            "を問わず",
            "を抜きにして",
        ],
    }
}

/// Vocabulary complexity indicators per level. Half a point each in the
/// level estimator.
pub fn vocabulary_indicators(level: JlptLevel) -> &'static [&'static str] {
    match level {
        JlptLevel::N5 => &[
            "私", "あなた", "これ", "それ", "あれ", "食べる", "飲む", "行く", "来る",
        ],
        JlptLevel::N4 => &["準備", "練習", "説明", "経験", "約束", "心配", "大切"],
        JlptLevel::N3 => &["影響", "関係", "状況", "条件", "理由", "方法", "目的"],
        JlptLevel::N2 => &["実施", "促進", "改善", "対応", "検討", "確認", "調整"],
        JlptLevel::N1 => &[
            "実施", "促進", "改善", "対応", "検討", "確認", "調整", "抽象的", "具体的",
        ],
    }
}

/// Whether a character is in the CJK unified ideograph block used as the
/// kanji complexity proxy.
pub fn is_kanji(c: char) -> bool {
    ('\u{4e00}'..='\u{9faf}').contains(&c)
}

/// Fraction of kanji characters in the text, 0.0 for empty input.
pub fn kanji_ratio(text: &str) -> f64 {
    let total = text.chars().count();
    if total == 0 {
        return 0.0;
    }
    let kanji = text.chars().filter(|&c| is_kanji(c)).count();
    kanji as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_level_has_patterns() {
        for level in JlptLevel::LADDER {
            assert!(!grammar_patterns(level).is_empty());
            assert!(!vocabulary_indicators(level).is_empty());
        }
    }

    #[test]
    fn kanji_detection() {
        assert!(is_kanji('日'));
        assert!(is_kanji('語'));
        assert!(!is_kanji('で'));
        assert!(!is_kanji('ア'));
        assert!(!is_kanji('a'));
    }

    #[test]
    fn kanji_ratio_counts_chars_not_bytes() {
        // 2 kanji out of 4 chars (not 12 bytes).
        assert!((kanji_ratio("日本です") - 0.5).abs() < f64::EPSILON);
        assert_eq!(kanji_ratio(""), 0.0);
        assert_eq!(kanji_ratio("ひらがな"), 0.0);
        assert_eq!(kanji_ratio("漢字"), 1.0);
    }
}
