/// Split text into chunks of at most `max_chars` characters.
///
/// Cuts prefer the last whitespace at or before `max_chars`; the whitespace run
/// at a soft cut is dropped. A token longer than `max_chars` is cut hard at
/// exactly `max_chars`. Lengths are counted in `char`s.
///
/// Empty input yields a single empty chunk. A chunk that would hold only
/// whitespace is dropped like the whitespace at any other soft cut, so
/// whitespace-only input also yields a single empty chunk.
///
/// # Panics
/// Panics if `max_chars` is 0.
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    assert!(max_chars > 0, "max_chars must be positive");

    let mut chunks = Vec::new();
    let mut remaining = text;

    // Byte offset of the char at index `max_chars`, present only while the
    // remaining text is still longer than the limit.
    while let Some((limit, _)) = remaining.char_indices().nth(max_chars) {
        let (chunk, rest) = match last_soft_break(remaining, limit) {
            Some(split_at) => (&remaining[..split_at], remaining[split_at..].trim_start()),
            None => remaining.split_at(limit),
        };
        if !chunk.trim().is_empty() {
            chunks.push(chunk.to_string());
        }
        remaining = rest;
    }

    if !remaining.trim().is_empty() {
        chunks.push(remaining.to_string());
    } else if chunks.is_empty() {
        chunks.push(String::new());
    }

    chunks
}

/// Byte offset of the last whitespace char at or before `limit`, excluding
/// offset 0 (a cut there would produce an empty chunk).
fn last_soft_break(text: &str, limit: usize) -> Option<usize> {
    text.char_indices()
        .take_while(|(offset, _)| *offset <= limit)
        .filter(|(offset, c)| *offset > 0 && c.is_whitespace())
        .map(|(offset, _)| offset)
        .last()
}
