//! Offset helpers for platforms and engines that count in UTF-16 code units.

use std::ops::Range;

/// Map a UTF-16 `offset`/`length` pair onto a byte range of `text`.
///
/// Returns `None` when either end falls outside the text or inside a
/// surrogate pair.
pub fn utf16_span_to_bytes(text: &str, offset: usize, length: usize) -> Option<Range<usize>> {
    let start = utf16_to_byte(text, offset)?;
    let end = utf16_to_byte(text, offset.checked_add(length)?)?;
    Some(start..end)
}

fn utf16_to_byte(text: &str, units: usize) -> Option<usize> {
    let mut seen = 0;
    for (idx, ch) in text.char_indices() {
        if seen == units {
            return Some(idx);
        }
        if seen > units {
            return None;
        }
        seen += ch.len_utf16();
    }
    (seen == units).then_some(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii() {
        assert_eq!(utf16_span_to_bytes("Ths is a tst", 9, 3), Some(9..12));
    }

    #[test]
    fn test_cyrillic() {
        // Each Cyrillic letter is 1 UTF-16 unit but 2 bytes.
        let text = "Превет мир";
        assert_eq!(utf16_span_to_bytes(text, 0, 6), Some(0..12));
        assert_eq!(utf16_span_to_bytes(text, 7, 3), Some(13..19));
        assert_eq!(&text[13..19], "мир");
    }

    #[test]
    fn test_surrogate_pair() {
        // The emoji takes 2 UTF-16 units and 4 bytes.
        let text = "😀 tst";
        assert_eq!(utf16_span_to_bytes(text, 3, 3), Some(5..8));
        assert_eq!(utf16_span_to_bytes(text, 1, 1), None);
    }

    #[test]
    fn test_end_of_text() {
        assert_eq!(utf16_span_to_bytes("abc", 3, 0), Some(3..3));
        assert_eq!(utf16_span_to_bytes("abc", 2, 2), None);
        assert_eq!(utf16_span_to_bytes("", 0, 0), Some(0..0));
    }
}
