//! UTF-16 ⇄ UTF-8 offset conversion
//!
//! JS strings index by UTF-16 code unit; the engine indexes by byte. Offsets
//! past the end clamp to the end; an offset landing inside a surrogate pair
//! rounds down to the start of that char.

/// Byte offset for a UTF-16 code-unit offset
pub fn utf16_to_byte(text: &str, utf16: usize) -> usize {
    let mut units = 0;
    for (byte, c) in text.char_indices() {
        let next = units + c.len_utf16();
        if next > utf16 {
            return byte;
        }
        units = next;
    }
    text.len()
}

/// UTF-16 code-unit offset for a byte offset
pub fn byte_to_utf16(text: &str, byte: usize) -> usize {
    let mut units = 0;
    for (at, c) in text.char_indices() {
        if at >= byte {
            break;
        }
        units += c.len_utf16();
    }
    units
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_identity() {
        assert_eq!(utf16_to_byte("hello", 3), 3);
        assert_eq!(byte_to_utf16("hello", 3), 3);
    }

    #[test]
    fn test_multibyte_and_astral() {
        // 'é' = 2 bytes / 1 unit, '😀' = 4 bytes / 2 units
        let text = "é😀#a";
        assert_eq!(utf16_to_byte(text, 1), 2);
        assert_eq!(utf16_to_byte(text, 3), 6);
        assert_eq!(byte_to_utf16(text, 6), 3);
        assert_eq!(byte_to_utf16(text, text.len()), 5);
    }

    #[test]
    fn test_inside_surrogate_pair_rounds_down() {
        assert_eq!(utf16_to_byte("😀x", 1), 0);
    }

    #[test]
    fn test_clamps_past_end() {
        assert_eq!(utf16_to_byte("ab", 10), 2);
    }
}
