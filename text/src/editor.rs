//! Shorthand-aware statement block removal.
//!
//! The editor is a two-state line automaton:
//!
//! - `Copy`: lines are emitted. A line starting with the subject is
//!   dropped, together with a pure comment line emitted just before it.
//!   If the statement is not terminated on that line the automaton moves
//!   to `SkipContinuation`.
//! - `SkipContinuation`: blank and comment lines are dropped. Indented
//!   lines are continuation lines of the `;`-chain and are dropped; one
//!   ending with `.` returns to `Copy`. A line at column 0, a closing
//!   brace or another subject line returns to `Copy` and is handled there.
//!
//! Closing braces are never dropped.

use crate::{TextError, TextResult};
use log::debug;
use regex_lite::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Copy,
    SkipContinuation,
}

/// Removes the statement block of one subject.
#[derive(Debug, Clone)]
pub struct TextBlockEditor {
    subject: String,
    pattern: Regex,
}

impl TextBlockEditor {
    /// Create an editor for a subject token such as `vad:p1` or
    /// `<http://example.org/vad#p1>`.
    pub fn new(subject: &str) -> TextResult<Self> {
        if subject.is_empty() {
            return Err(TextError::EmptySubject);
        }
        if subject.chars().any(char::is_whitespace) {
            return Err(TextError::invalid_subject(subject));
        }

        // The token must be followed by whitespace or the end of the line,
        // so `vad:p1` never matches `vad:p10`
        let pattern = Regex::new(&format!(r"^\s*{}(\s|$)", regex_lite::escape(subject)))
            .map_err(|e| TextError::Pattern {
                message: e.to_string(),
            })?;

        Ok(Self {
            subject: subject.to_string(),
            pattern,
        })
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns true if the line starts a statement about the subject.
    pub fn is_subject_line(&self, line: &str) -> bool {
        self.pattern.is_match(line)
    }

    /// Remove every statement block of the subject from `text`.
    ///
    /// Lines are split on `\n` and rejoined with `\n`; kept lines are
    /// unchanged byte for byte.
    pub fn remove_block(&self, text: &str) -> String {
        let mut out: Vec<&str> = Vec::new();
        let mut state = State::Copy;
        let mut removed = 0usize;

        for line in text.split('\n') {
            if state == State::SkipContinuation {
                let trimmed = line.trim();
                if trimmed.is_empty() || is_comment(trimmed) {
                    removed += 1;
                    continue;
                }
                if self.is_structural(line) {
                    state = State::Copy;
                } else {
                    removed += 1;
                    if is_terminated(line) {
                        state = State::Copy;
                    }
                    continue;
                }
            }

            if self.is_subject_line(line) {
                removed += 1;
                if out.last().map_or(false, |prev| is_comment(prev.trim())) {
                    out.pop();
                    removed += 1;
                }
                if !is_terminated(line) {
                    state = State::SkipContinuation;
                }
                continue;
            }

            out.push(line);
        }

        debug!("removed {} line(s) for {}", removed, self.subject);
        out.join("\n")
    }

    /// A line that ends skipping: top-level content, a closing brace or
    /// another statement about the subject.
    fn is_structural(&self, line: &str) -> bool {
        let starts_at_column_zero = !line.starts_with(char::is_whitespace);
        starts_at_column_zero || line.trim_start().starts_with('}') || self.is_subject_line(line)
    }
}

/// Remove `subject`'s statement blocks from `text`.
pub fn remove_subject_block(text: &str, subject: &str) -> TextResult<String> {
    Ok(TextBlockEditor::new(subject)?.remove_block(text))
}

/// Collapse runs of blank lines into a single blank line.
pub fn collapse_blank_runs(text: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    let mut previous_blank = false;
    for line in text.split('\n') {
        let blank = line.trim().is_empty();
        if blank && previous_blank {
            continue;
        }
        previous_blank = blank;
        out.push(line);
    }
    out.join("\n")
}

fn is_comment(trimmed: &str) -> bool {
    trimmed.starts_with('#')
}

/// Returns true if the statement on this line ends with `.`, ignoring a
/// trailing comment.
fn is_terminated(line: &str) -> bool {
    strip_comment(line).trim_end().ends_with('.')
}

/// The line without a trailing `#` comment. A `#` inside a string or an
/// IRI is not a comment.
fn strip_comment(line: &str) -> &str {
    let mut quote: Option<char> = None;
    let mut in_iri = false;
    let mut escaped = false;

    for (i, c) in line.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        if in_iri {
            if c == '>' {
                in_iri = false;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '<' => in_iri = true,
            '#' => return &line[..i],
            _ => {}
        }
    }
    line
}
