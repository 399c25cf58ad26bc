//! UTF-16 helpers.
//!
//! Telegram measures offsets, lengths and message limits in UTF-16 code units, so the
//! span renderer and the slicer work on `&[u16]` and convert back to `String` only at
//! the edges.

/// Length of `text` in UTF-16 code units.
pub fn len(text: &str) -> usize {
    text.encode_utf16().count()
}

pub fn encode(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}

/// Decodes a unit slice. A surrogate half cut off by a malformed span becomes U+FFFD.
pub fn decode(units: &[u16]) -> String {
    String::from_utf16_lossy(units)
}

pub fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..0xDC00).contains(&unit)
}

/// Whitespace test for a single unit; surrogate halves are never whitespace.
pub fn is_whitespace(unit: u16) -> bool {
    char::from_u32(u32::from(unit)).is_some_and(char::is_whitespace)
}

/// Moves a cut point left if it would separate a surrogate pair.
pub fn align_cut(units: &[u16], cut: usize) -> usize {
    if cut > 0 && cut < units.len() && is_high_surrogate(units[cut - 1]) {
        cut - 1
    } else {
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len_counts_astral_chars_twice() {
        assert_eq!(len("abc"), 3);
        assert_eq!(len("a🥲"), 3);
    }

    #[test]
    fn test_align_cut_never_splits_pairs() {
        let units = encode("a🥲b");
        assert_eq!(align_cut(&units, 2), 1);
        assert_eq!(align_cut(&units, 3), 3);
        assert_eq!(align_cut(&units, 1), 1);
    }

    #[test]
    fn test_whitespace_units() {
        assert!(is_whitespace(u16::from(b' ')));
        assert!(is_whitespace(u16::from(b'\n')));
        assert!(!is_whitespace(0xD83E));
    }
}
