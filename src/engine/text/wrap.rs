//! Greedy line breaking.
//!
//! Wide-script text is broken between any two characters; everything
//! else is broken at single spaces. A character or word that is wider
//! than `max_width` on its own still gets a line to itself rather than
//! being dropped.

use super::script::Script;
use crate::engine::bridge::text::{TextMeasureError, TextMeasurer};

pub fn wrap<F>(
    text: &str,
    font: &F,
    max_width: f32,
    measurer: &dyn TextMeasurer<F>,
) -> Result<Vec<String>, TextMeasureError> {
    let fits = |line: &str| -> Result<bool, TextMeasureError> {
        Ok(measurer.measure(line, font)?.width <= max_width)
    };

    match Script::detect(text) {
        Script::Wide => wrap_chars(text, fits),
        Script::Latin => wrap_words(text, fits),
    }
}

/// Lines joined with `'\n'`.
pub fn join_lines(lines: &[String]) -> String {
    lines.join("\n")
}

fn wrap_chars<F>(text: &str, fits: F) -> Result<Vec<String>, TextMeasureError>
where
    F: Fn(&str) -> Result<bool, TextMeasureError>,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        let mut candidate = current.clone();
        candidate.push(ch);

        if fits(&candidate)? {
            current = candidate;
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current.push(ch);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    Ok(lines)
}

fn wrap_words<F>(text: &str, fits: F) -> Result<Vec<String>, TextMeasureError>
where
    F: Fn(&str) -> Result<bool, TextMeasureError>,
{
    let mut lines = Vec::new();
    let mut words = text.split(' ');
    let mut current = words.next().unwrap_or_default().to_string();

    for word in words {
        let candidate = format!("{current} {word}");

        if fits(&candidate)? {
            current = candidate;
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current = word.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    Ok(lines)
}
