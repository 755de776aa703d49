// src/core/wrapper.rs

//! Greedy word wrapping bounded by display width.
//!
//! Words are packed onto a line while `line + 1 + word` fits. A word that is
//! wider than a whole line on its own is hard-split into line-sized chunks,
//! so no produced line is ever wider than the budget.

use std::str::SplitWhitespace;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Lazily produced lines of a wrapped text.
///
/// Cloning the iterator (or calling [`wrap`] again) restarts the sequence.
#[derive(Debug, Clone)]
pub struct WrappedLines<'a> {
    words: SplitWhitespace<'a>,
    /// Tail of a word that did not fit on the previous line.
    pending: Option<&'a str>,
    first_width: usize,
    width: usize,
    emitted: bool,
    finished: bool,
}

/// Wraps `text` into lines no wider than `width` columns.
///
/// Empty input yields a single empty line. A `width` of zero is treated as one.
pub fn wrap(text: &str, width: usize) -> WrappedLines<'_> {
    wrap_hanging(text, width, width)
}

/// Like [`wrap`], with a separate budget for the first line.
///
/// Used when the first line continues after a prefix that was already written.
pub fn wrap_hanging(text: &str, first_width: usize, width: usize) -> WrappedLines<'_> {
    WrappedLines {
        words: text.split_whitespace(),
        pending: None,
        first_width: first_width.max(1),
        width: width.max(1),
        emitted: false,
        finished: false,
    }
}

/// Display width of `text` in terminal columns.
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Splits `word` after as many characters as fit in `width` columns.
/// The head always holds at least one character so callers make progress.
fn split_at_width(word: &str, width: usize) -> (&str, &str) {
    let mut used = 0;
    for (index, ch) in word.char_indices() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + ch_width > width && index > 0 {
            return word.split_at(index);
        }
        used += ch_width;
    }
    (word, "")
}

impl<'a> WrappedLines<'a> {
    fn next_word(&mut self) -> Option<&'a str> {
        self.pending.take().or_else(|| self.words.next())
    }
}

impl Iterator for WrappedLines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.finished {
            return None;
        }

        let width = if self.emitted {
            self.width
        } else {
            self.first_width
        };
        let mut line = String::new();
        let mut line_width = 0;

        while let Some(word) = self.next_word() {
            let word_width = display_width(word);

            if line.is_empty() {
                if word_width <= width {
                    line.push_str(word);
                    line_width = word_width;
                } else {
                    let (head, tail) = split_at_width(word, width);
                    line.push_str(head);
                    if !tail.is_empty() {
                        self.pending = Some(tail);
                    }
                    break;
                }
            } else if line_width + 1 + word_width <= width {
                line.push(' ');
                line.push_str(word);
                line_width += 1 + word_width;
            } else {
                self.pending = Some(word);
                break;
            }
        }

        if line.is_empty() {
            self.finished = true;
            // Empty input still produces one (blank) line.
            return (!self.emitted).then(|| {
                self.emitted = true;
                line
            });
        }

        self.emitted = true;
        Some(line)
    }
}
