//! Word wrapping by display width.
//!
//! Fitting is done by `textwrap` with first-fit placement, breaks only at
//! ASCII spaces and no hyphenation. Widths are display columns, so wide CJK
//! characters count as two and combining marks as zero.

use textwrap::{Options, WordSeparator, WordSplitter, WrapAlgorithm};

/// Wrap `text` into lines of at most `width` display columns.
///
/// Breaks only at whitespace. A word wider than `width` is placed on its own
/// line unsplit. Hard newlines are kept, and an empty line between paragraphs
/// stays an empty line. Text that is empty or whitespace-only yields no lines.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let options = Options::new(width.max(1))
        .break_words(false)
        .word_separator(WordSeparator::AsciiSpace)
        .word_splitter(WordSplitter::NoHyphenation)
        .wrap_algorithm(WrapAlgorithm::FirstFit);

    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        // A blank paragraph still occupies a line.
        if words.is_empty() {
            lines.push(String::new());
            continue;
        }
        let normalized = words.join(" ");
        lines.extend(
            textwrap::wrap(&normalized, &options)
                .into_iter()
                .map(|line| line.into_owned()),
        );
    }
    lines
}

/// Number of characters in `text`, as the heuristic line estimate counts them.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
