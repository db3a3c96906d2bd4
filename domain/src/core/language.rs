//! Language detection heuristic for the verdict language rule.
//!
//! The judge must answer in the language of the user's original request.
//! Detection is script-based: we count characters per Unicode script and
//! pick the dominant one. This is deliberately coarse: it only needs to
//! name a language for the judge prompt, not to perform real language
//! identification.

use serde::{Deserialize, Serialize};

/// Dominant script of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    Korean,
    Japanese,
    Chinese,
    English,
    Unknown,
}

impl Language {
    /// English name used when instructing the judge.
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Korean => "Korean",
            Language::Japanese => "Japanese",
            Language::Chinese => "Chinese",
            Language::English => "English",
            Language::Unknown => "the same language as the request",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Detect the dominant script of `text`.
///
/// Kana presence wins over Han (Japanese text mixes both), Hangul wins
/// over Latin, and Latin is only reported when it is the clear majority
/// of alphabetic characters.
pub fn detect_language(text: &str) -> Language {
    let mut hangul = 0usize;
    let mut kana = 0usize;
    let mut han = 0usize;
    let mut latin = 0usize;

    for c in text.chars() {
        match c {
            '\u{AC00}'..='\u{D7A3}' | '\u{1100}'..='\u{11FF}' | '\u{3130}'..='\u{318F}' => {
                hangul += 1
            }
            '\u{3040}'..='\u{30FF}' => kana += 1,
            '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}' => han += 1,
            'a'..='z' | 'A'..='Z' => latin += 1,
            _ => {}
        }
    }

    let total = hangul + kana + han + latin;
    if total == 0 {
        return Language::Unknown;
    }

    if kana > 0 && kana + han >= hangul && kana + han >= latin {
        Language::Japanese
    } else if hangul >= han && hangul >= latin && hangul > 0 {
        Language::Korean
    } else if han >= latin && han > 0 {
        Language::Chinese
    } else {
        Language::English
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_korean() {
        assert_eq!(
            detect_language("이직을 해야 할까요, 말아야 할까요?"),
            Language::Korean
        );
    }

    #[test]
    fn test_detect_english() {
        assert_eq!(
            detect_language("Should I quit my job and start a company?"),
            Language::English
        );
    }

    #[test]
    fn test_detect_japanese_mixed_kana_and_han() {
        assert_eq!(detect_language("転職すべきでしょうか?"), Language::Japanese);
    }

    #[test]
    fn test_detect_chinese() {
        assert_eq!(detect_language("我应该换工作吗"), Language::Chinese);
    }

    #[test]
    fn test_detect_unknown_for_symbols_only() {
        assert_eq!(detect_language("1234 !!! ???"), Language::Unknown);
    }

    #[test]
    fn test_korean_wins_over_sprinkled_latin() {
        assert_eq!(
            detect_language("AI 스타트업으로 이직하는 게 맞을까요? (연봉 10% 삭감)"),
            Language::Korean
        );
    }
}
