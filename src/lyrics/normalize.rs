//! Artist/title clean-up for search matching.
//!
//! Latin-script metadata gets an aggressive pass (bracketed qualifiers,
//! "- Official Video" suffixes and `|` tails removed). Non-Latin metadata only
//! gets glyph and whitespace clean-up, because brackets there often carry the
//! disambiguating part of the title.

use once_cell::sync::Lazy;
use regex::Regex;

static PARENTHESIZED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^()]*\)").unwrap());

static BRACKETED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\[\]]*\]").unwrap());

// A dash followed only by release-noise words up to the end of the text
static NOISE_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\s*[-–—]\s*(?:official|audio|video|lyrics?|music|visuali[sz]er|hd|hq|4k|mv)(?:(?:\s*[-–—]\s*|\s+)(?:official|audio|video|lyrics?|music|visuali[sz]er|hd|hq|4k|mv))*\s*$",
    )
    .unwrap()
});

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// True when `text` contains Devanagari, CJK, Hangul or Arabic code points.
pub fn is_non_latin(text: &str) -> bool {
    text.chars().any(|c| {
        matches!(c as u32,
            0x0900..=0x097F          // Devanagari
            | 0x0600..=0x06FF        // Arabic
            | 0x0750..=0x077F        // Arabic supplement
            | 0x1100..=0x11FF        // Hangul jamo
            | 0x3040..=0x30FF        // Hiragana, Katakana
            | 0x3130..=0x318F        // Hangul compatibility jamo
            | 0x3400..=0x4DBF        // CJK extension A
            | 0x4E00..=0x9FFF        // CJK unified ideographs
            | 0xAC00..=0xD7AF        // Hangul syllables
            | 0xF900..=0xFAFF        // CJK compatibility ideographs
        )
    })
}

/// Normalize an artist or title string. Pure and idempotent.
pub fn normalize(text: &str, non_latin: bool) -> String {
    if non_latin {
        return conservative(text);
    }

    let cleaned = aggressive(text);
    if cleaned.is_empty() {
        // Titles like "(Intro)" would vanish entirely
        return conservative(text);
    }
    cleaned
}

fn conservative(text: &str) -> String {
    collapse_whitespace(&normalize_quotes(text))
}

fn aggressive(text: &str) -> String {
    let mut s = match text.find('|') {
        Some(idx) => text[..idx].to_string(),
        None => text.to_string(),
    };

    // Repeat until stable so nested brackets disappear in one call
    loop {
        let stripped = BRACKETED
            .replace_all(&PARENTHESIZED.replace_all(&s, " "), " ")
            .into_owned();
        if stripped == s {
            break;
        }
        s = stripped;
    }

    let s = NOISE_SUFFIX.replace(&s, "");
    collapse_whitespace(&normalize_quotes(&s))
}

fn normalize_quotes(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' | '\u{00B4}'
            | '\u{0060}' | '\u{FF07}' => '\'',
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' | '\u{00AB}'
            | '\u{00BB}' | '\u{FF02}' => '"',
            c => c,
        })
        .collect()
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_scripts() {
        assert!(is_non_latin("周杰伦 晴天"));
        assert!(is_non_latin("Arijit Singh तुम ही हो"));
        assert!(is_non_latin("아이유"));
        assert!(is_non_latin("عمرو دياب"));
        assert!(is_non_latin("あいみょん"));
        assert!(!is_non_latin("Beyoncé - Halo"));
        assert!(!is_non_latin(""));
    }

    #[test]
    fn test_latin_strips_qualifiers() {
        assert_eq!(normalize("Hello (Official Video)", false), "Hello");
        assert_eq!(normalize("Hello [HD] (Remastered 2011)", false), "Hello");
        assert_eq!(normalize("Hello - Official Music Video", false), "Hello");
        assert_eq!(normalize("Hello - lyrics", false), "Hello");
        assert_eq!(normalize("Hello - Lyrics - Official HD", false), "Hello");
        assert_eq!(normalize("Hello – Official Audio  ", false), "Hello");
        assert_eq!(normalize("Hello | Adele | 25", false), "Hello");
        assert_eq!(normalize("  Rolling   in the  Deep ", false), "Rolling in the Deep");
    }

    #[test]
    fn test_latin_keeps_meaningful_dashes() {
        assert_eq!(normalize("Anti-Hero", false), "Anti-Hero");
        assert_eq!(normalize("Hello - Live at the Church", false), "Hello - Live at the Church");
        assert_eq!(normalize("Audioslave", false), "Audioslave");
        assert_eq!(normalize("Anti-Video Game", false), "Anti-Video Game");
        assert_eq!(normalize("Hello - Official Video Extended", false), "Hello - Official Video Extended");
        assert_eq!(normalize("Hello - Audio Engineering Society", false), "Hello - Audio Engineering Society");
    }

    #[test]
    fn test_nested_brackets() {
        assert_eq!(normalize("Song (feat. A (B remix))", false), "Song");
        assert_eq!(normalize("Song [x (y) z] tail", false), "Song tail");
    }

    #[test]
    fn test_quote_glyphs() {
        assert_eq!(normalize("Don\u{2019}t Stop Me Now", false), "Don't Stop Me Now");
        assert_eq!(normalize("\u{201C}Heroes\u{201D}", false), "\"Heroes\"");
        assert_eq!(normalize("Don\u{2019}t  (Live)", true), "Don't (Live)");
    }

    #[test]
    fn test_non_latin_keeps_brackets() {
        assert_eq!(normalize("晴天 (Live)", true), "晴天 (Live)");
        assert_eq!(normalize("  사랑  [Acoustic]  ", true), "사랑 [Acoustic]");
    }

    #[test]
    fn test_all_bracket_title_falls_back() {
        assert_eq!(normalize("(Intro)", false), "(Intro)");
        assert_eq!(normalize("", false), "");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "Hello (Official Video)",
            "Song (feat. A (B remix)) - Official Audio | extra",
            "((unbalanced) text",
            "text) (",
            "A - Lyrics - Official",
            "(Intro)",
            "[a] [b]",
            "  spaced \t\n out  ",
            "Don\u{2019}t \u{201C}quote\u{201D}",
            "晴天 (Live) | 周杰伦",
            "Night - HD",
            "Anti-Video Game",
            "A - Video Game - Lyrics",
            "- video",
            "Hello - Official\nVideo",
            "",
        ];
        for s in samples {
            for non_latin in [false, true] {
                let once = normalize(s, non_latin);
                assert_eq!(normalize(&once, non_latin), once, "input {:?}", s);
            }
        }
    }
}
