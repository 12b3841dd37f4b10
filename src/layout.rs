//! Title layout engine: greedy word wrap + three-line clamp.
//!
//! Splits a title on whitespace runs and packs words into lines no wider
//! than `max_width` as measured by a [`TextMeasure`]. Words are never broken;
//! a single word wider than the budget sits alone on its line.
//!
//! When the wrap needs more than [`MAX_LINES`] lines, only the first three
//! are kept and the third is rewritten: its trailing word is dropped and
//! [`ELLIPSIS`] appended, dropping further words while the result is still
//! too wide.
//!
//! The function is total: empty and whitespace-only titles yield zero lines.
//! Substituting a placeholder for those is the caller's policy
//! ([`display_title`](crate::compose::display_title)).

use crate::imaging::{FontSpec, TextMeasure};
use crate::types::LineLayout;

/// Maximum number of title lines drawn.
pub const MAX_LINES: usize = 3;

/// Marker appended to a truncated third line.
pub const ELLIPSIS: &str = "...";

/// Wrap and clamp `title` into at most [`MAX_LINES`] lines.
pub fn wrap_title<M: TextMeasure + ?Sized>(
    title: &str,
    measure: &M,
    font: &FontSpec,
    max_width: f32,
) -> LineLayout {
    let mut lines = greedy_lines(title, measure, font, max_width);
    if lines.len() <= MAX_LINES {
        return LineLayout {
            lines,
            truncated: false,
        };
    }

    log::debug!(
        "title wraps to {} lines, clamping to {MAX_LINES}",
        lines.len()
    );
    lines.truncate(MAX_LINES);
    if let Some(last) = lines.last_mut() {
        *last = ellipsize(last, measure, font, max_width);
    }
    LineLayout {
        lines,
        truncated: true,
    }
}

/// Greedy wrap without any line limit.
pub fn greedy_lines<M: TextMeasure + ?Sized>(
    title: &str,
    measure: &M,
    font: &FontSpec,
    max_width: f32,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in title.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if measure.measure(&candidate, font) > max_width {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Drop the trailing word and append the ellipsis, repeating while the
/// result is wider than `max_width` and words remain to drop.
fn ellipsize<M: TextMeasure + ?Sized>(
    line: &str,
    measure: &M,
    font: &FontSpec,
    max_width: f32,
) -> String {
    let mut kept = drop_last_word(line);
    loop {
        let candidate = format!("{kept}{ELLIPSIS}");
        if measure.measure(&candidate, font) <= max_width || !kept.contains(' ') {
            return candidate;
        }
        kept = drop_last_word(kept);
    }
}

/// Remove a trailing `<space><word>` run. A single word is returned as is.
fn drop_last_word(line: &str) -> &str {
    match line.rfind(char::is_whitespace) {
        Some(idx) => line[..idx].trim_end(),
        None => line,
    }
}
