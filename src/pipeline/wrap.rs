//! Greedy fixed-column word wrap.
//!
//! Widths are counted in characters, not points: body text is set in a
//! proportional font but wrapped at a column count that comfortably fits the
//! printable width. Runs of whitespace collapse to a single space and words
//! longer than a line are hard-broken.

/// Wrap `text` into lines of at most `width` characters.
///
/// Blank input yields no lines.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let mut word = word;
        let mut word_len = word.chars().count();

        // Join onto the current line when it fits (plus one space).
        if current_len > 0 && current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
            continue;
        }

        if current_len > 0 {
            lines.push(std::mem::take(&mut current));
        }

        while word_len > width {
            let split = word
                .char_indices()
                .nth(width)
                .map_or(word.len(), |(idx, _)| idx);
            lines.push(word[..split].to_string());
            word = &word[split..];
            word_len -= width;
        }

        current.push_str(word);
        current_len = word_len;
    }

    if current_len > 0 {
        lines.push(current);
    }
    lines
}
