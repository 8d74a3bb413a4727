//! Editing serialized Turtle/TriG text.
//!
//! [`TextBlockEditor`] removes one subject's statement block, including
//! its `;`-chained continuation lines, from raw text without touching the
//! surrounding statements or graph braces.

mod editor;
mod error;

pub use editor::{collapse_blank_runs, remove_subject_block, TextBlockEditor};
pub use error::{TextError, TextResult};
