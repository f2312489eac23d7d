//! Bulk text format
//!
//! Categories are written as `[Name]` header lines followed by one question
//! per line. Blank lines are ignored when reading; block boundaries come only
//! from header lines.
//!
//! ```text
//! [Fun]
//! What is your favorite color?
//!
//! [Deep]
//! What scares you?
//! ```

use super::model::{Category, Question};

/// A classified input line
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    /// `[name]` header, name is the raw text between the brackets
    Header(&'a str),
    /// Anything else that is non-empty after trimming
    Question(&'a str),
}

/// Classify a line, returning `None` for blank lines
fn classify(line: &str) -> Option<Line<'_>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    match trimmed.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
        Some(name) => Some(Line::Header(name)),
        None => Some(Line::Question(trimmed)),
    }
}

/// Whether `name` can be written as a header and read back unchanged
pub fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty() && !name.contains(['\n', '\r'])
}

/// Normalize question text to what a bulk text line reads back as.
///
/// Returns `None` for text that cannot be a question line: blank, spanning
/// several lines, or shaped like a `[header]`.
pub fn question_text(text: &str) -> Option<&str> {
    let text = text.trim();
    if text.contains(['\n', '\r']) {
        return None;
    }
    match classify(text)? {
        Line::Question(text) => Some(text),
        Line::Header(_) => None,
    }
}

/// Parse text into `(name, questions)` blocks in input order.
///
/// Question lines that appear before any header, or under a header whose
/// name is blank, are dropped along with that header.
fn parse_blocks(text: &str) -> Vec<(&str, Vec<&str>)> {
    let mut blocks: Vec<(&str, Vec<&str>)> = Vec::new();
    // true while lines belong to the last pushed block
    let mut attached = false;

    for line in text.lines().filter_map(classify) {
        match line {
            Line::Header(name) if name.trim().is_empty() => attached = false,
            Line::Header(name) => {
                blocks.push((name, Vec::new()));
                attached = true;
            }
            Line::Question(text) if attached => {
                if let Some((_, questions)) = blocks.last_mut() {
                    questions.push(text);
                }
            }
            Line::Question(text) => {
                tracing::trace!("Dropping question line without a category: {}", text);
            }
        }
    }

    blocks
}

/// Render categories in the bulk text format.
///
/// Every line ends with `\n`; blocks are separated by a single blank line and
/// nothing follows the last question. An empty list renders as `""`.
pub fn encode(categories: &[Category]) -> String {
    let mut out = String::new();

    for (index, category) in categories.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        out.push('[');
        out.push_str(&category.name);
        out.push_str("]\n");
        for question in &category.questions {
            out.push_str(&question.text);
            out.push('\n');
        }
    }

    out
}

/// Parse bulk text into brand-new categories and questions
pub fn decode(text: &str) -> Vec<Category> {
    parse_blocks(text)
        .into_iter()
        .map(|(name, questions)| {
            Category::with_questions(name, questions.into_iter().map(Question::new).collect())
        })
        .collect()
}

/// Parse bulk text and append it onto `existing`.
///
/// A parsed block whose name exactly matches a category already in the
/// result (the first match wins) has its questions appended to that
/// category. Other blocks become new categories at the end. Existing
/// categories are never removed or reordered.
pub fn merge_decode(existing: &[Category], text: &str) -> Vec<Category> {
    let mut merged = existing.to_vec();

    for (name, questions) in parse_blocks(text) {
        let questions = questions.into_iter().map(Question::new);
        match merged.iter_mut().find(|c| c.name == name) {
            Some(category) => category.questions.extend(questions),
            None => merged.push(Category::with_questions(name, questions.collect())),
        }
    }

    merged
}
