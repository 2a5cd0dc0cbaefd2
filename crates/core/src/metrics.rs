//! Length metrics for generated record text.
//!
//! The school records system stores Hangul at 3 bytes per character and
//! everything else at 1 byte, regardless of the actual UTF-8 width. Record
//! quotas are expressed in that unit, so [`byte_length`] reproduces it
//! exactly rather than using `str::len`.

use serde::{Deserialize, Serialize};

/// Weight of a Hangul syllable or jamo.
const HANGUL_WEIGHT: usize = 3;

/// Weight of every other code point.
const OTHER_WEIGHT: usize = 1;

/// Whether the code point is a precomposed syllable, a conjoining jamo, or a
/// compatibility jamo.
fn is_hangul(ch: char) -> bool {
    matches!(ch as u32, 0xAC00..=0xD7A3 | 0x1100..=0x11FF | 0x3130..=0x318F)
}

/// Record-system byte length of `text`.
///
/// Additive under concatenation; the empty string measures 0.
pub fn byte_length(text: &str) -> usize {
    text.chars()
        .map(|ch| if is_hangul(ch) { HANGUL_WEIGHT } else { OTHER_WEIGHT })
        .sum()
}

/// Counts shown next to a piece of record text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextMetrics {
    /// Code points, whitespace included.
    pub chars_with_spaces: usize,
    /// Code points, whitespace excluded.
    pub chars_without_spaces: usize,
    /// Record-system bytes (see [`byte_length`]).
    pub bytes: usize,
}

impl TextMetrics {
    pub fn measure(text: &str) -> Self {
        Self {
            chars_with_spaces: text.chars().count(),
            chars_without_spaces: text.chars().filter(|c| !c.is_whitespace()).count(),
            bytes: byte_length(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_is_zero() {
        assert_eq!(byte_length(""), 0);
    }

    #[test]
    fn hangul_syllable_counts_three() {
        assert_eq!(byte_length("가"), 3);
        assert_eq!(byte_length("힣"), 3);
    }

    #[test]
    fn ascii_counts_one_each() {
        assert_eq!(byte_length("A1 "), 3);
        assert_eq!(byte_length("\n\t.,"), 4);
    }

    #[test]
    fn jamo_ranges_count_three() {
        // conjoining jamo, compatibility jamo
        assert_eq!(byte_length("\u{1100}"), 3);
        assert_eq!(byte_length("ㄱㅏ"), 6);
    }

    #[test]
    fn other_scripts_count_one() {
        // CJK ideograph and emoji are outside the Hangul ranges
        assert_eq!(byte_length("漢"), 1);
        assert_eq!(byte_length("🚀"), 1);
    }

    #[test]
    fn additive_under_concatenation() {
        let samples = ["", "가나다", "abc", "학생은 팀 프로젝트에서", "ㅋㅋ!!", "漢字 mixed 한글"];
        for a in samples {
            for b in samples {
                let joined = format!("{a}{b}");
                assert_eq!(byte_length(&joined), byte_length(a) + byte_length(b));
            }
        }
    }

    #[test]
    fn metrics_measure_all_counts() {
        let m = TextMetrics::measure("코딩 수업 A");
        assert_eq!(m.chars_with_spaces, 7);
        assert_eq!(m.chars_without_spaces, 5);
        assert_eq!(m.bytes, 4 * 3 + 2 + 1);
    }
}
