/// Splits text into fixed-width chunks of at most `chunk_size` characters.
///
/// Chunks are contiguous, non-overlapping, and cover the input exactly once
/// in original order. Width is measured in characters, not bytes, so
/// multi-byte UTF-8 text is never cut inside a code point. The final chunk
/// may be shorter than `chunk_size`; empty input yields no chunks.
///
/// # Panics
///
/// Panics if `chunk_size` is zero.
///
/// # Examples
///
/// ```
/// use cheatmark::chunk_text;
///
/// let chunks = chunk_text("abcde", 2);
/// assert_eq!(chunks, vec!["ab", "cd", "e"]);
///
/// assert!(chunk_text("", 1024).is_empty());
/// ```
#[must_use]
pub fn chunk_text(text: &str, chunk_size: usize) -> Vec<&str> {
    assert!(chunk_size > 0, "chunk size must be positive");

    if text.is_empty() {
        return Vec::new();
    }

    let mut chunks = Vec::with_capacity(text.len() / chunk_size + 1);
    let mut start = 0;
    let mut width = 0;

    for (offset, _) in text.char_indices() {
        if width == chunk_size {
            chunks.push(&text[start..offset]);
            start = offset;
            width = 0;
        }
        width += 1;
    }
    chunks.push(&text[start..]);

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_multiple_of_chunk_size() {
        assert_eq!(chunk_text("abcd", 2), vec!["ab", "cd"]);
    }

    #[test]
    fn test_short_final_chunk() {
        assert_eq!(chunk_text("abcde", 2), vec!["ab", "cd", "e"]);
    }

    #[test]
    fn test_input_shorter_than_chunk_size() {
        assert_eq!(chunk_text("hello world", 1024), vec!["hello world"]);
    }

    #[test]
    fn test_empty_input_yields_no_chunks() {
        assert!(chunk_text("", 2).is_empty());
        assert!(chunk_text("", 1024).is_empty());
    }

    #[test]
    fn test_concatenation_reconstructs_input() {
        let text = "The quick brown fox jumps over the lazy dog";
        for size in [1, 3, 7, 1024] {
            let chunks = chunk_text(text, size);
            assert_eq!(chunks.concat(), text);
        }
    }

    #[test]
    fn test_chunk_count_matches_ceiling_division() {
        let text = "x".repeat(50);
        for size in 1..8 {
            for len in 0..=text.len() {
                let chunks = chunk_text(&text[..len], size);
                assert_eq!(chunks.len(), len.div_ceil(size), "len={len} size={size}");
            }
        }
    }

    #[test]
    fn test_all_chunks_except_last_are_full_width() {
        let chunks = chunk_text("abcdefghij", 3);
        assert_eq!(chunks, vec!["abc", "def", "ghi", "j"]);
        for chunk in &chunks[..chunks.len() - 1] {
            assert_eq!(chunk.chars().count(), 3);
        }
    }

    #[test]
    fn test_multibyte_text_splits_on_character_boundaries() {
        let chunks = chunk_text("αβγδε", 2);
        assert_eq!(chunks, vec!["αβ", "γδ", "ε"]);

        let mixed = "a¢€𐍈b";
        let chunks = chunk_text(mixed, 2);
        assert_eq!(chunks.concat(), mixed);
        assert_eq!(chunks.len(), 3);
        for chunk in &chunks[..chunks.len() - 1] {
            assert_eq!(chunk.chars().count(), 2);
        }
    }

    #[test]
    #[should_panic(expected = "chunk size must be positive")]
    fn test_zero_chunk_size_panics() {
        chunk_text("abc", 0);
    }
}
