//! Split oversized text into provider-size-compliant chunks

/// Sentence boundaries preferred as chunk cut points
const SENTENCE_BOUNDARIES: &[&str] = &[". ", ".\n", "! ", "!\n", "? ", "?\n"];

/// How far back from the hard cutoff to search for a sentence boundary
/// (characters)
pub const BOUNDARY_LOOKBACK_CHARS: usize = 200;

/// Split `text` into chunks of at most `max_chars` characters
///
/// Chunks are exact substrings of the input, so their concatenation
/// reconstructs it byte-for-byte. Each cut prefers the last sentence
/// boundary found within [`BOUNDARY_LOOKBACK_CHARS`] characters before the
/// hard limit; when none is found, the cut lands at the hard limit (always
/// on a `char` boundary).
///
/// # Examples
///
/// ```
/// use resumegraph_embedding::chunk::chunk_text;
///
/// let text = "First sentence. Second sentence. Third.";
/// let chunks = chunk_text(text, 20);
/// assert_eq!(chunks.concat(), text);
/// assert!(chunks.iter().all(|c| c.chars().count() <= 20));
/// ```
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<&str> {
    if max_chars == 0 {
        return vec![text];
    }

    let mut chunks = Vec::new();
    let mut rest = text;

    loop {
        let hard = byte_index_of_char(rest, max_chars);
        if hard >= rest.len() {
            if !rest.is_empty() {
                chunks.push(rest);
            }
            break;
        }

        let lookback_start =
            byte_index_of_char(rest, max_chars.saturating_sub(BOUNDARY_LOOKBACK_CHARS));
        let window = &rest[lookback_start..hard];

        // The latest boundary in the window wins; the boundary characters
        // stay with the left chunk.
        let cut_at = SENTENCE_BOUNDARIES
            .iter()
            .filter_map(|boundary| window.rfind(boundary).map(|i| i + boundary.len()))
            .max()
            .map(|relative| lookback_start + relative)
            .unwrap_or(hard);

        chunks.push(&rest[..cut_at]);
        rest = &rest[cut_at..];
    }

    chunks
}

/// Byte offset of the `n`th character, or the string's length if shorter
fn byte_index_of_char(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map(|(i, _)| i).unwrap_or(s.len())
}
